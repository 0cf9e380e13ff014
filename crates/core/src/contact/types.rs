use serde::{Deserialize, Serialize};

/// An email address record.
///
/// Emails are independent rows: a new one is stored every time an address is
/// attached to a user, and it outlives the user it was attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub id: i64,
    pub email: String,
}

impl Email {
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

/// A free-form phone number record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub id: i64,
    pub number: String,
}

impl PhoneNumber {
    pub fn new(id: i64, number: impl Into<String>) -> Self {
        Self {
            id,
            number: number.into(),
        }
    }
}

/// A user together with its associated contact records.
///
/// `emails` and `phonenumbers` are kept in association order, which is the
/// order in which they were attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub lastname: String,
    pub firstname: String,
    pub emails: Vec<Email>,
    pub phonenumbers: Vec<PhoneNumber>,
}

impl User {
    /// Creates a user without any contact records.
    pub fn new(id: i64, lastname: impl Into<String>, firstname: impl Into<String>) -> Self {
        Self {
            id,
            lastname: lastname.into(),
            firstname: firstname.into(),
            emails: Vec::new(),
            phonenumbers: Vec::new(),
        }
    }

    /// Returns the email with the given id if it belongs to this user.
    pub fn email(&self, email_id: i64) -> Option<&Email> {
        self.emails.iter().find(|e| e.id == email_id)
    }

    /// Returns the phone number with the given id if it belongs to this user.
    pub fn phone_number(&self, phone_id: i64) -> Option<&PhoneNumber> {
        self.phonenumbers.iter().find(|p| p.id == phone_id)
    }

    /// Email addresses in association order.
    pub fn email_addresses(&self) -> Vec<String> {
        self.emails.iter().map(|e| e.email.clone()).collect()
    }

    /// Phone numbers in association order.
    pub fn numbers(&self) -> Vec<String> {
        self.phonenumbers.iter().map(|p| p.number.clone()).collect()
    }
}

/// A validated user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub lastname: String,
    pub firstname: String,
    pub emails: Vec<String>,
    pub phonenumbers: Vec<String>,
}

/// A validated pair of contact items to append to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub email: String,
    pub phone_number: String,
}

/// A validated full set of contact items that replaces a user's current set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSet {
    pub emails: Vec<String>,
    pub phonenumbers: Vec<String>,
}
