use async_trait::async_trait;

use crate::contact::{ContactSet, Email, NewContact, NewUser, PhoneNumber, User};

use super::{Result, UserFilter};

/// Repository for user rows and their lifecycle.
///
/// Every method is atomic: either all of its writes become visible or none do.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a user, then one email and one phone number row per input
    /// value, linked in input order. Returns the stored user.
    async fn create_user(&self, user: &NewUser) -> Result<User>;

    /// Gets a user with its contact items by ID.
    async fn get_user(&self, id: i64) -> Result<Option<User>>;

    /// Counts users matching the filter.
    async fn count_users(&self, filter: &UserFilter) -> Result<u64>;

    /// Lists users matching the filter, ordered by ID.
    async fn list_users(&self, filter: &UserFilter, offset: u64, limit: u64) -> Result<Vec<User>>;

    /// Deletes a user and its associations. Email and phone number rows are
    /// left in place. Fails with `NotFound` if the user does not exist.
    async fn delete_user(&self, id: i64) -> Result<()>;
}

/// Repository for a user's contact items.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Appends one email and one phone number to the user.
    async fn add_contact(&self, user_id: i64, contact: &NewContact) -> Result<User>;

    /// Drops every association of the user, then links a fresh row for each
    /// value in `contacts`, in input order.
    async fn replace_contacts(&self, user_id: i64, contacts: &ContactSet) -> Result<User>;

    /// Gets an email only if it is associated with the user.
    async fn get_user_email(&self, user_id: i64, email_id: i64) -> Result<Option<Email>>;

    /// Gets a phone number only if it is associated with the user.
    async fn get_user_phone_number(
        &self,
        user_id: i64,
        phone_id: i64,
    ) -> Result<Option<PhoneNumber>>;
}
