//! API request payloads for user and contact operations.
//!
//! Every field is optional at the wire level so that a missing field becomes a
//! field-level validation error instead of a body parse failure. `validate`
//! turns a payload into the matching validated type from [`super::types`].

use serde::{Deserialize, Serialize};

use crate::serde::deserialize_optional_string;
use crate::storage::UserFilter;

use super::types::{ContactSet, NewContact, NewUser};
use super::validation::{
    check_email, check_phone_number, require_list, require_text, ValidationErrors,
    MSG_INVALID_INTEGER, MSG_REQUIRED, NAME_MAX_LENGTH,
};

/// Request payload for `POST /users/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonenumbers: Option<Vec<String>>,
}

impl CreateUserRequest {
    pub fn new(lastname: impl Into<String>, firstname: impl Into<String>) -> Self {
        Self {
            lastname: Some(lastname.into()),
            firstname: Some(firstname.into()),
            emails: Some(Vec::new()),
            phonenumbers: Some(Vec::new()),
        }
    }

    /// Append an email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.emails.get_or_insert_with(Vec::new).push(email.into());
        self
    }

    /// Append a phone number.
    pub fn with_phone_number(mut self, number: impl Into<String>) -> Self {
        self.phonenumbers
            .get_or_insert_with(Vec::new)
            .push(number.into());
        self
    }

    /// Validates every field, requiring at least one email.
    pub fn validate(self) -> Result<NewUser, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let lastname = require_text(&mut errors, "lastname", self.lastname, NAME_MAX_LENGTH);
        let firstname = require_text(&mut errors, "firstname", self.firstname, NAME_MAX_LENGTH);
        let emails = require_list(&mut errors, "emails", self.emails, false, check_email);
        let phonenumbers = require_list(
            &mut errors,
            "phonenumbers",
            self.phonenumbers,
            true,
            check_phone_number,
        );

        match (lastname, firstname, emails, phonenumbers) {
            (Some(lastname), Some(firstname), Some(emails), Some(phonenumbers)) => {
                errors.into_result(NewUser {
                    lastname,
                    firstname,
                    emails,
                    phonenumbers,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Request payload for `POST /users/{id}/contact/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddContactRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl AddContactRequest {
    pub fn new(email: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            phone_number: Some(phone_number.into()),
        }
    }

    /// Validates that both an email and a phone number are present and well formed.
    pub fn validate(self) -> Result<NewContact, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = match self.email {
            Some(value) => check_email(&mut errors, "email", &value),
            None => {
                errors.add("email", MSG_REQUIRED);
                None
            }
        };
        let phone_number = match self.phone_number {
            Some(value) => check_phone_number(&mut errors, "phone_number", &value),
            None => {
                errors.add("phone_number", MSG_REQUIRED);
                None
            }
        };

        match (email, phone_number) {
            (Some(email), Some(phone_number)) => errors.into_result(NewContact {
                email,
                phone_number,
            }),
            _ => Err(errors),
        }
    }
}

/// Request payload for `PUT /users/{id}/contact/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplaceContactRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonenumbers: Option<Vec<String>>,
}

impl ReplaceContactRequest {
    pub fn new(emails: Vec<String>, phonenumbers: Vec<String>) -> Self {
        Self {
            emails: Some(emails),
            phonenumbers: Some(phonenumbers),
        }
    }

    /// Validates the full replacement set. Empty lists are allowed and clear
    /// that kind of contact.
    pub fn validate(self) -> Result<ContactSet, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let emails = require_list(&mut errors, "emails", self.emails, true, check_email);
        let phonenumbers = require_list(
            &mut errors,
            "phonenumbers",
            self.phonenumbers,
            true,
            check_phone_number,
        );

        match (emails, phonenumbers) {
            (Some(emails), Some(phonenumbers)) => errors.into_result(ContactSet {
                emails,
                phonenumbers,
            }),
            _ => Err(errors),
        }
    }
}

/// Request payload for `DELETE /users/`.
///
/// `id` is kept as raw JSON so that strings holding digits are accepted and
/// anything else is reported as a field error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
}

impl DeleteUserRequest {
    pub fn new(id: i64) -> Self {
        Self {
            id: Some(serde_json::Value::from(id)),
        }
    }

    pub fn validate(self) -> Result<i64, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let id = match self.id {
            None | Some(serde_json::Value::Null) => {
                errors.add("id", MSG_REQUIRED);
                None
            }
            Some(value) => {
                let parsed = match &value {
                    serde_json::Value::Number(n) => n.as_i64(),
                    serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                };
                if parsed.is_none() {
                    errors.add("id", MSG_INVALID_INTEGER);
                }
                parsed
            }
        };

        match id {
            Some(id) => errors.into_result(id),
            None => Err(errors),
        }
    }
}

/// Query parameters for `GET /users/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUsersQuery {
    /// Exact user id filter.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub id: Option<String>,
    /// Exact first name filter.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub firstname: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub page: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub per_page: Option<String>,
}

impl ListUsersQuery {
    /// Builds the storage filter, rejecting a non-integer `id`.
    pub fn filter(&self) -> Result<UserFilter, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let id = match self.id.as_deref().map(str::trim) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add("id", MSG_INVALID_INTEGER);
                    None
                }
            },
            None => None,
        };

        errors.into_result(UserFilter {
            id,
            firstname: self.firstname.clone(),
        })
    }
}
