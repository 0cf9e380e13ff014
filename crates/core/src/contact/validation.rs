//! Field-level validation for contact payloads.
//!
//! Every validator records its failures into a [`ValidationErrors`] map keyed
//! by field name, so a single response can report all invalid fields at once.
//! List items are keyed as `field[index]`.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

pub const NAME_MAX_LENGTH: usize = 255;
pub const EMAIL_MAX_LENGTH: usize = 1024;
pub const PHONE_NUMBER_MAX_LENGTH: usize = 24;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_EMPTY_LIST: &str = "This list may not be empty.";
pub const MSG_INVALID_EMAIL: &str = "Enter a valid email address.";
pub const MSG_INVALID_INTEGER: &str = "A valid integer is required.";

/// Field name to error messages, serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("validation failed: {fields:?}")]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns `value` if nothing was recorded, otherwise the collected errors.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

fn max_length_message(max: usize) -> String {
    format!("Ensure this field has no more than {max} characters.")
}

/// Validates a required, trimmed, non-blank string of bounded length.
///
/// Returns the trimmed value when valid.
pub fn require_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<String>,
    max: usize,
) -> Option<String> {
    let Some(value) = value else {
        errors.add(field, MSG_REQUIRED);
        return None;
    };
    check_text(errors, field, &value, max)
}

fn check_text(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, MSG_BLANK);
        return None;
    }
    if trimmed.chars().count() > max {
        errors.add(field, max_length_message(max));
        return None;
    }
    Some(trimmed.to_string())
}

/// Validates a single email address field.
pub fn check_email(errors: &mut ValidationErrors, field: &str, value: &str) -> Option<String> {
    let email = check_text(errors, field, value, EMAIL_MAX_LENGTH)?;
    if !is_valid_email(&email) {
        errors.add(field, MSG_INVALID_EMAIL);
        return None;
    }
    Some(email)
}

/// Validates a single phone number field. Numbers are free form.
pub fn check_phone_number(errors: &mut ValidationErrors, field: &str, value: &str) -> Option<String> {
    check_text(errors, field, value, PHONE_NUMBER_MAX_LENGTH)
}

/// Validates a required list, applying `check` to every item.
///
/// Items are reported as `field[index]`. Returns the cleaned list only when
/// the list itself and every item are valid.
pub fn require_list<F>(
    errors: &mut ValidationErrors,
    field: &str,
    values: Option<Vec<String>>,
    allow_empty: bool,
    check: F,
) -> Option<Vec<String>>
where
    F: Fn(&mut ValidationErrors, &str, &str) -> Option<String>,
{
    let Some(values) = values else {
        errors.add(field, MSG_REQUIRED);
        return None;
    };
    if values.is_empty() && !allow_empty {
        errors.add(field, MSG_EMPTY_LIST);
        return None;
    }

    let mut cleaned = Vec::with_capacity(values.len());
    let mut all_valid = true;
    for (index, value) in values.iter().enumerate() {
        match check(errors, &format!("{field}[{index}]"), value.as_str()) {
            Some(item) => cleaned.push(item),
            None => all_valid = false,
        }
    }
    all_valid.then_some(cleaned)
}

/// Checks an email address for a plausible `local@domain.tld` shape.
///
/// The local part accepts the RFC 5322 dot-atom characters; the domain must
/// have at least two labels of letters, digits and inner hyphens, with an
/// alphanumeric top-level label of two or more characters. A bare
/// `localhost` domain is accepted as well.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

const ALLOWED_BARE_DOMAIN: &str = "localhost";

fn is_valid_local_part(local: &str) -> bool {
    const SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

    !local.is_empty()
        && local
            .split('.')
            .all(|atom| {
                !atom.is_empty()
                    && atom
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || SPECIALS.contains(c))
            })
}

fn is_valid_domain(domain: &str) -> bool {
    if domain == ALLOWED_BARE_DOMAIN {
        return true;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && !tld.chars().all(|c| c.is_ascii_digit()));

    labels_ok && tld_ok
}
