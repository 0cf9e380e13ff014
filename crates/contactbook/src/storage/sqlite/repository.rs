//! SQLite repository implementation.
//!
//! Implements the repository traits from `contactbook_core::storage` using SQLite.

use async_trait::async_trait;
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use contactbook_core::contact::{ContactSet, Email, NewContact, NewUser, PhoneNumber, User};
use contactbook_core::storage::{
    ContactRepository, RepositoryError, Result, UserFilter, UserRepository,
};

use super::conversions::{
    insert_email, insert_phone_number, load_contacts, load_user, row_to_email,
    row_to_phone_number, row_to_user, to_sql_bound,
};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let user = user.clone();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;

                tx.execute(schema::INSERT_USER, [&user.lastname, &user.firstname])
                    .map_err(wrap_err)?;
                let id = tx.last_insert_rowid();

                for address in &user.emails {
                    insert_email(&tx, id, address).map_err(wrap_err)?;
                }
                for number in &user.phonenumbers {
                    insert_phone_number(&tx, id, number).map_err(wrap_err)?;
                }

                let created = load_user(&tx, id)
                    .map_err(wrap_err)?
                    .ok_or_else(|| wrap_err(rusqlite::Error::QueryReturnedNoRows))?;

                tx.commit().map_err(wrap_err)?;
                Ok(created)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", "unknown"))
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.conn
            .call(move |conn| load_user(conn, id).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id.to_string()))
    }

    async fn count_users(&self, filter: &UserFilter) -> Result<u64> {
        let filter = filter.clone();

        self.conn
            .call(move |conn| {
                let count: i64 = conn
                    .query_row(
                        schema::COUNT_USERS,
                        rusqlite::params![filter.id, filter.firstname],
                        |row| row.get(0),
                    )
                    .map_err(wrap_err)?;
                Ok(u64::try_from(count).unwrap_or_default())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", "unknown"))
    }

    async fn list_users(&self, filter: &UserFilter, offset: u64, limit: u64) -> Result<Vec<User>> {
        let filter = filter.clone();
        let offset = to_sql_bound(offset);
        let limit = to_sql_bound(limit);

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_USERS_PAGE).map_err(wrap_err)?;
                let rows = stmt
                    .query_map(
                        rusqlite::params![filter.id, filter.firstname, limit, offset],
                        row_to_user,
                    )
                    .map_err(wrap_err)?;

                let mut users = Vec::new();
                for row_result in rows {
                    let mut user = row_result.map_err(wrap_err)?;
                    load_contacts(conn, &mut user).map_err(wrap_err)?;
                    users.push(user);
                }
                Ok(users)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", "unknown"))
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;

                tx.execute(schema::UNLINK_USER_EMAILS, [id])
                    .map_err(wrap_err)?;
                tx.execute(schema::UNLINK_USER_PHONENUMBERS, [id])
                    .map_err(wrap_err)?;
                let rows = tx.execute(schema::DELETE_USER, [id]).map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }

                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id.to_string()))
    }
}

// ============================================================================
// ContactRepository implementation
// ============================================================================

#[async_trait]
impl ContactRepository for SqliteRepository {
    async fn add_contact(&self, user_id: i64, contact: &NewContact) -> Result<User> {
        let contact = contact.clone();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;

                let exists = tx
                    .query_row(schema::SELECT_USER_BY_ID, [user_id], row_to_user)
                    .optional()
                    .map_err(wrap_err)?
                    .is_some();
                if !exists {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }

                insert_email(&tx, user_id, &contact.email).map_err(wrap_err)?;
                insert_phone_number(&tx, user_id, &contact.phone_number).map_err(wrap_err)?;

                let user = load_user(&tx, user_id)
                    .map_err(wrap_err)?
                    .ok_or_else(|| wrap_err(rusqlite::Error::QueryReturnedNoRows))?;

                tx.commit().map_err(wrap_err)?;
                Ok(user)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", user_id.to_string()))
    }

    async fn replace_contacts(&self, user_id: i64, contacts: &ContactSet) -> Result<User> {
        let contacts = contacts.clone();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;

                let exists = tx
                    .query_row(schema::SELECT_USER_BY_ID, [user_id], row_to_user)
                    .optional()
                    .map_err(wrap_err)?
                    .is_some();
                if !exists {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }

                tx.execute(schema::UNLINK_USER_EMAILS, [user_id])
                    .map_err(wrap_err)?;
                tx.execute(schema::UNLINK_USER_PHONENUMBERS, [user_id])
                    .map_err(wrap_err)?;

                for address in &contacts.emails {
                    insert_email(&tx, user_id, address).map_err(wrap_err)?;
                }
                for number in &contacts.phonenumbers {
                    insert_phone_number(&tx, user_id, number).map_err(wrap_err)?;
                }

                let user = load_user(&tx, user_id)
                    .map_err(wrap_err)?
                    .ok_or_else(|| wrap_err(rusqlite::Error::QueryReturnedNoRows))?;

                tx.commit().map_err(wrap_err)?;
                Ok(user)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", user_id.to_string()))
    }

    async fn get_user_email(&self, user_id: i64, email_id: i64) -> Result<Option<Email>> {
        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_USER_EMAIL, [user_id, email_id], row_to_email)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Email", email_id.to_string()))
    }

    async fn get_user_phone_number(
        &self,
        user_id: i64,
        phone_id: i64,
    ) -> Result<Option<PhoneNumber>> {
        self.conn
            .call(move |conn| {
                conn.query_row(
                    schema::SELECT_USER_PHONENUMBER,
                    [user_id, phone_id],
                    row_to_phone_number,
                )
                .optional()
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "PhoneNumber", phone_id.to_string()))
    }
}
