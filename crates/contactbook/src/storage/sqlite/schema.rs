//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Email and phone number rows are only referenced from
//! the association tables, so deleting a user cascades to its links but
//! leaves the rows themselves in place.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    lastname TEXT NOT NULL,
    firstname TEXT NOT NULL
);

-- Contact item tables
CREATE TABLE IF NOT EXISTS emails (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS phonenumbers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    number TEXT NOT NULL
);

-- Association tables (insertion order is kept by their own id)
CREATE TABLE IF NOT EXISTS user_emails (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    email_id INTEGER NOT NULL,
    UNIQUE (user_id, email_id),
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (email_id) REFERENCES emails(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS user_phonenumbers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    phonenumber_id INTEGER NOT NULL,
    UNIQUE (user_id, phonenumber_id),
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (phonenumber_id) REFERENCES phonenumbers(id) ON DELETE CASCADE
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_users_firstname ON users(firstname);
CREATE INDEX IF NOT EXISTS idx_user_emails_user_id ON user_emails(user_id);
CREATE INDEX IF NOT EXISTS idx_user_phonenumbers_user_id ON user_phonenumbers(user_id);
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (lastname, firstname)
VALUES (?1, ?2)
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, lastname, firstname
FROM users
WHERE id = ?1
"#;

/// `?1` is an optional id and `?2` an optional first name; NULL disables
/// the corresponding filter.
pub const COUNT_USERS: &str = r#"
SELECT COUNT(*)
FROM users
WHERE (?1 IS NULL OR id = ?1)
  AND (?2 IS NULL OR firstname = ?2)
"#;

pub const SELECT_USERS_PAGE: &str = r#"
SELECT id, lastname, firstname
FROM users
WHERE (?1 IS NULL OR id = ?1)
  AND (?2 IS NULL OR firstname = ?2)
ORDER BY id
LIMIT ?3 OFFSET ?4
"#;

pub const DELETE_USER: &str = "DELETE FROM users WHERE id = ?1";

// Email queries
pub const INSERT_EMAIL: &str = "INSERT INTO emails (email) VALUES (?1)";

pub const LINK_EMAIL: &str = "INSERT INTO user_emails (user_id, email_id) VALUES (?1, ?2)";

pub const UNLINK_USER_EMAILS: &str = "DELETE FROM user_emails WHERE user_id = ?1";

pub const SELECT_EMAILS_BY_USER: &str = r#"
SELECT e.id, e.email
FROM emails e
INNER JOIN user_emails ue ON ue.email_id = e.id
WHERE ue.user_id = ?1
ORDER BY ue.id
"#;

pub const SELECT_USER_EMAIL: &str = r#"
SELECT e.id, e.email
FROM emails e
INNER JOIN user_emails ue ON ue.email_id = e.id
WHERE ue.user_id = ?1 AND e.id = ?2
"#;

// Phone number queries
pub const INSERT_PHONENUMBER: &str = "INSERT INTO phonenumbers (number) VALUES (?1)";

pub const LINK_PHONENUMBER: &str =
    "INSERT INTO user_phonenumbers (user_id, phonenumber_id) VALUES (?1, ?2)";

pub const UNLINK_USER_PHONENUMBERS: &str = "DELETE FROM user_phonenumbers WHERE user_id = ?1";

pub const SELECT_PHONENUMBERS_BY_USER: &str = r#"
SELECT p.id, p.number
FROM phonenumbers p
INNER JOIN user_phonenumbers up ON up.phonenumber_id = p.id
WHERE up.user_id = ?1
ORDER BY up.id
"#;

pub const SELECT_USER_PHONENUMBER: &str = r#"
SELECT p.id, p.number
FROM phonenumbers p
INNER JOIN user_phonenumbers up ON up.phonenumber_id = p.id
WHERE up.user_id = ?1 AND p.id = ?2
"#;
