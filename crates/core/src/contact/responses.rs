//! Response bodies, one per endpoint, with explicit mapping from [`User`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{Email, PhoneNumber, User};

/// Body of `POST /users/`: echoes the four submitted fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUserResponse {
    pub lastname: String,
    pub firstname: String,
    pub emails: Vec<String>,
    pub phonenumbers: Vec<String>,
}

impl From<&User> for CreatedUserResponse {
    fn from(user: &User) -> Self {
        Self {
            lastname: user.lastname.clone(),
            firstname: user.firstname.clone(),
            emails: user.email_addresses(),
            phonenumbers: user.numbers(),
        }
    }
}

/// One item of the `GET /users/` page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListItem {
    pub id: i64,
    pub lastname: String,
    pub firstname: String,
    pub emails: Vec<String>,
    pub phonenumbers: Vec<String>,
}

impl From<&User> for UserListItem {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            lastname: user.lastname.clone(),
            firstname: user.firstname.clone(),
            emails: user.email_addresses(),
            phonenumbers: user.numbers(),
        }
    }
}

/// Body of `GET /users/{id}/contact/`.
///
/// Contact items are keyed by their own identifiers. Ids come from a single
/// increasing sequence, so key order matches association order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfoResponse {
    pub id: i64,
    pub lastname: String,
    pub firstname: String,
    pub emails: BTreeMap<i64, String>,
    pub phonenumbers: BTreeMap<i64, String>,
}

impl From<&User> for ContactInfoResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            lastname: user.lastname.clone(),
            firstname: user.firstname.clone(),
            emails: user
                .emails
                .iter()
                .map(|e| (e.id, e.email.clone()))
                .collect(),
            phonenumbers: user
                .phonenumbers
                .iter()
                .map(|p| (p.id, p.number.clone()))
                .collect(),
        }
    }
}

/// Body of `POST` and `PUT /users/{id}/contact/`: the user's contact lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactListsResponse {
    pub emails: Vec<String>,
    pub phonenumbers: Vec<String>,
}

impl From<&User> for ContactListsResponse {
    fn from(user: &User) -> Self {
        Self {
            emails: user.email_addresses(),
            phonenumbers: user.numbers(),
        }
    }
}

/// Body of `GET /users/{id}/contact/email/{pk}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailResponse {
    pub id: i64,
    pub email: String,
}

impl From<&Email> for EmailResponse {
    fn from(email: &Email) -> Self {
        Self {
            id: email.id,
            email: email.email.clone(),
        }
    }
}

/// Body of `GET /users/{id}/contact/phone-number/{pk}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumberResponse {
    pub id: i64,
    pub number: String,
}

impl From<&PhoneNumber> for PhoneNumberResponse {
    fn from(phone: &PhoneNumber) -> Self {
        Self {
            id: phone.id,
            number: phone.number.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let mut user = User::new(1, "Doe", "John");
        user.emails = vec![
            Email::new(2, "john.doe@gmail.com"),
            Email::new(5, "noname@domain.com"),
        ];
        user.phonenumbers = vec![PhoneNumber::new(9, "+90 555 555 55 55")];
        user
    }

    #[test]
    fn test_created_user_echoes_only_submitted_fields() {
        let json = serde_json::to_value(CreatedUserResponse::from(&sample_user())).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "lastname": "Doe",
                "firstname": "John",
                "emails": ["john.doe@gmail.com", "noname@domain.com"],
                "phonenumbers": ["+90 555 555 55 55"],
            })
        );
    }

    #[test]
    fn test_list_item_includes_id() {
        let item = UserListItem::from(&sample_user());

        assert_eq!(item.id, 1);
        assert_eq!(item.emails.len(), 2);
        assert_eq!(item.phonenumbers.len(), 1);
    }

    #[test]
    fn test_contact_info_keys_items_by_id() {
        let json = serde_json::to_value(ContactInfoResponse::from(&sample_user())).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["emails"]["2"], "john.doe@gmail.com");
        assert_eq!(json["emails"]["5"], "noname@domain.com");
        assert_eq!(json["phonenumbers"]["9"], "+90 555 555 55 55");
    }

    #[test]
    fn test_contact_lists_keep_order() {
        let lists = ContactListsResponse::from(&sample_user());

        assert_eq!(lists.emails.last().map(String::as_str), Some("noname@domain.com"));
        assert_eq!(lists.phonenumbers, vec!["+90 555 555 55 55"]);
    }

    #[test]
    fn test_single_item_responses() {
        let user = sample_user();

        let email = EmailResponse::from(&user.emails[0]);
        let phone = PhoneNumberResponse::from(&user.phonenumbers[0]);

        assert_eq!(email, EmailResponse { id: 2, email: "john.doe@gmail.com".into() });
        assert_eq!(phone, PhoneNumberResponse { id: 9, number: "+90 555 555 55 55".into() });
    }
}
