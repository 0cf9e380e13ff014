//! SQLite row conversion functions.
//!
//! Pure functions for converting SQLite rows into domain types, plus the
//! statement helpers that load or attach a user's contact items inside an
//! open connection or transaction.

use contactbook_core::contact::{Email, PhoneNumber, User};
use rusqlite::{Connection, OptionalExtension, Row};

use super::schema;

/// Convert a SQLite row to a User without contact items.
///
/// Expected columns: id, lastname, firstname
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let id: i64 = row.get(0)?;
    let lastname: String = row.get(1)?;
    let firstname: String = row.get(2)?;

    Ok(User::new(id, lastname, firstname))
}

/// Convert a SQLite row to an Email.
///
/// Expected columns: id, email
pub fn row_to_email(row: &Row) -> rusqlite::Result<Email> {
    Ok(Email::new(row.get(0)?, row.get::<_, String>(1)?))
}

/// Convert a SQLite row to a PhoneNumber.
///
/// Expected columns: id, number
pub fn row_to_phone_number(row: &Row) -> rusqlite::Result<PhoneNumber> {
    Ok(PhoneNumber::new(row.get(0)?, row.get::<_, String>(1)?))
}

/// Fills `emails` and `phonenumbers` in association order.
pub fn load_contacts(conn: &Connection, user: &mut User) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare(schema::SELECT_EMAILS_BY_USER)?;
    user.emails = stmt
        .query_map([user.id], row_to_email)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut stmt = conn.prepare(schema::SELECT_PHONENUMBERS_BY_USER)?;
    user.phonenumbers = stmt
        .query_map([user.id], row_to_phone_number)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(())
}

/// Loads a user with its contact items.
pub fn load_user(conn: &Connection, id: i64) -> rusqlite::Result<Option<User>> {
    let user = conn
        .query_row(schema::SELECT_USER_BY_ID, [id], row_to_user)
        .optional()?;

    match user {
        Some(mut user) => {
            load_contacts(conn, &mut user)?;
            Ok(Some(user))
        }
        None => Ok(None),
    }
}

/// Stores a fresh email row and links it to the user.
pub fn insert_email(conn: &Connection, user_id: i64, address: &str) -> rusqlite::Result<()> {
    conn.execute(schema::INSERT_EMAIL, [address])?;
    let email_id = conn.last_insert_rowid();
    conn.execute(schema::LINK_EMAIL, [user_id, email_id])?;
    Ok(())
}

/// Stores a fresh phone number row and links it to the user.
pub fn insert_phone_number(conn: &Connection, user_id: i64, number: &str) -> rusqlite::Result<()> {
    conn.execute(schema::INSERT_PHONENUMBER, [number])?;
    let phone_id = conn.last_insert_rowid();
    conn.execute(schema::LINK_PHONENUMBER, [user_id, phone_id])?;
    Ok(())
}

/// Clamps a page bound to SQLite's signed integer range.
pub fn to_sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(schema::CREATE_TABLES).unwrap();
        conn
    }

    #[test]
    fn test_row_to_user() {
        let conn = setup();
        conn.execute(schema::INSERT_USER, ["Doe", "John"]).unwrap();

        let user = conn
            .query_row(schema::SELECT_USER_BY_ID, [1], row_to_user)
            .unwrap();

        assert_eq!(user, User::new(1, "Doe", "John"));
    }

    #[test]
    fn test_load_user_keeps_association_order() {
        let conn = setup();
        conn.execute(schema::INSERT_USER, ["Doe", "John"]).unwrap();
        insert_email(&conn, 1, "b@example.com").unwrap();
        insert_email(&conn, 1, "a@example.com").unwrap();
        insert_phone_number(&conn, 1, "555-0100").unwrap();

        let user = load_user(&conn, 1).unwrap().unwrap();

        assert_eq!(user.email_addresses(), vec!["b@example.com", "a@example.com"]);
        assert_eq!(user.phonenumbers, vec![PhoneNumber::new(1, "555-0100")]);
    }

    #[test]
    fn test_load_missing_user() {
        let conn = setup();
        assert!(load_user(&conn, 5).unwrap().is_none());
    }

    #[test]
    fn test_to_sql_bound() {
        assert_eq!(to_sql_bound(10), 10);
        assert_eq!(to_sql_bound(u64::MAX), i64::MAX);
    }
}
