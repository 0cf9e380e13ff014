//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use contactbook_core::contact::{ContactSet, Email, NewContact, NewUser, PhoneNumber, User};
use contactbook_core::storage::{
    ContactRepository, RepositoryError, Result, UserFilter, UserRepository,
};

/// A user row without its contact items.
#[derive(Debug, Clone)]
struct UserRow {
    id: i64,
    lastname: String,
    firstname: String,
}

/// All tables plus their id sequences.
///
/// Association vectors keep `(user_id, item_id)` pairs in insertion order,
/// which is the order contact items are reported in.
#[derive(Debug)]
struct Tables {
    users: BTreeMap<i64, UserRow>,
    emails: BTreeMap<i64, Email>,
    phonenumbers: BTreeMap<i64, PhoneNumber>,
    user_emails: Vec<(i64, i64)>,
    user_phonenumbers: Vec<(i64, i64)>,
    next_user_id: i64,
    next_email_id: i64,
    next_phone_id: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            emails: BTreeMap::new(),
            phonenumbers: BTreeMap::new(),
            user_emails: Vec::new(),
            user_phonenumbers: Vec::new(),
            next_user_id: 1,
            next_email_id: 1,
            next_phone_id: 1,
        }
    }
}

impl Tables {
    fn insert_email(&mut self, user_id: i64, address: &str) {
        let id = self.next_email_id;
        self.next_email_id += 1;
        self.emails.insert(id, Email::new(id, address));
        self.user_emails.push((user_id, id));
    }

    fn insert_phone_number(&mut self, user_id: i64, number: &str) {
        let id = self.next_phone_id;
        self.next_phone_id += 1;
        self.phonenumbers.insert(id, PhoneNumber::new(id, number));
        self.user_phonenumbers.push((user_id, id));
    }

    fn unlink_all(&mut self, user_id: i64) {
        self.user_emails.retain(|(owner, _)| *owner != user_id);
        self.user_phonenumbers.retain(|(owner, _)| *owner != user_id);
    }

    fn hydrate(&self, row: &UserRow) -> User {
        let mut user = User::new(row.id, row.lastname.clone(), row.firstname.clone());
        user.emails = self
            .user_emails
            .iter()
            .filter(|(owner, _)| *owner == row.id)
            .filter_map(|(_, email_id)| self.emails.get(email_id).cloned())
            .collect();
        user.phonenumbers = self
            .user_phonenumbers
            .iter()
            .filter(|(owner, _)| *owner == row.id)
            .filter_map(|(_, phone_id)| self.phonenumbers.get(phone_id).cloned())
            .collect();
        user
    }

    fn user(&self, id: i64) -> Result<User> {
        self.users
            .get(&id)
            .map(|row| self.hydrate(row))
            .ok_or_else(|| RepositoryError::not_found("User", id))
    }

    fn is_linked(links: &[(i64, i64)], user_id: i64, item_id: i64) -> bool {
        links.contains(&(user_id, item_id))
    }
}

/// In-memory storage backend.
///
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;

        let id = tables.next_user_id;
        tables.next_user_id += 1;
        tables.users.insert(
            id,
            UserRow {
                id,
                lastname: user.lastname.clone(),
                firstname: user.firstname.clone(),
            },
        );
        for address in &user.emails {
            tables.insert_email(id, address);
        }
        for number in &user.phonenumbers {
            tables.insert_phone_number(id, number);
        }

        tables.user(id)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).map(|row| tables.hydrate(row)))
    }

    async fn count_users(&self, filter: &UserFilter) -> Result<u64> {
        let tables = self.tables.read().await;
        let count = tables
            .users
            .values()
            .filter(|row| filter.matches_fields(row.id, &row.firstname))
            .count();
        Ok(count as u64)
    }

    async fn list_users(&self, filter: &UserFilter, offset: u64, limit: u64) -> Result<Vec<User>> {
        let tables = self.tables.read().await;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(tables
            .users
            .values()
            .filter(|row| filter.matches_fields(row.id, &row.firstname))
            .skip(offset)
            .take(limit)
            .map(|row| tables.hydrate(row))
            .collect())
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(RepositoryError::not_found("User", id));
        }
        tables.unlink_all(id);
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for InMemoryRepository {
    async fn add_contact(&self, user_id: i64, contact: &NewContact) -> Result<User> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(RepositoryError::not_found("User", user_id));
        }

        tables.insert_email(user_id, &contact.email);
        tables.insert_phone_number(user_id, &contact.phone_number);

        tables.user(user_id)
    }

    async fn replace_contacts(&self, user_id: i64, contacts: &ContactSet) -> Result<User> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(RepositoryError::not_found("User", user_id));
        }

        tables.unlink_all(user_id);
        for address in &contacts.emails {
            tables.insert_email(user_id, address);
        }
        for number in &contacts.phonenumbers {
            tables.insert_phone_number(user_id, number);
        }

        tables.user(user_id)
    }

    async fn get_user_email(&self, user_id: i64, email_id: i64) -> Result<Option<Email>> {
        let tables = self.tables.read().await;
        if !Tables::is_linked(&tables.user_emails, user_id, email_id) {
            return Ok(None);
        }
        Ok(tables.emails.get(&email_id).cloned())
    }

    async fn get_user_phone_number(
        &self,
        user_id: i64,
        phone_id: i64,
    ) -> Result<Option<PhoneNumber>> {
        let tables = self.tables.read().await;
        if !Tables::is_linked(&tables.user_phonenumbers, user_id, phone_id) {
            return Ok(None);
        }
        Ok(tables.phonenumbers.get(&phone_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john_doe() -> NewUser {
        NewUser {
            lastname: "Doe".to_string(),
            firstname: "John".to_string(),
            emails: vec![
                "john@example.com".to_string(),
                "jd@example.com".to_string(),
            ],
            phonenumbers: vec!["555-0100".to_string()],
        }
    }

    fn named(firstname: &str) -> NewUser {
        NewUser {
            lastname: "Smith".to_string(),
            firstname: firstname.to_string(),
            emails: vec![format!("{}@example.com", firstname.to_lowercase())],
            phonenumbers: Vec::new(),
        }
    }

    // ==================== User Tests ====================

    #[tokio::test]
    async fn test_create_user_assigns_sequential_ids() {
        let repo = InMemoryRepository::new();

        let first = repo.create_user(&john_doe()).await.unwrap();
        let second = repo.create_user(&named("Jane")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.email_addresses(), vec!["john@example.com", "jd@example.com"]);
        assert_eq!(first.emails[0].id, 1);
        assert_eq!(first.emails[1].id, 2);
        assert_eq!(second.emails[0].id, 3);
        assert_eq!(first.numbers(), vec!["555-0100"]);
    }

    #[tokio::test]
    async fn test_get_user() {
        let repo = InMemoryRepository::new();
        let created = repo.create_user(&john_doe()).await.unwrap();

        let retrieved = repo.get_user(created.id).await.unwrap();
        assert_eq!(retrieved, Some(created));
    }

    #[tokio::test]
    async fn test_get_nonexistent_user() {
        let repo = InMemoryRepository::new();
        let result = repo.get_user(42).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_count_and_list_with_filter() {
        let repo = InMemoryRepository::new();
        for name in ["Ann", "Bob", "Ann", "Cid"] {
            repo.create_user(&named(name)).await.unwrap();
        }

        let all = UserFilter::default();
        assert_eq!(repo.count_users(&all).await.unwrap(), 4);

        let anns = UserFilter {
            firstname: Some("Ann".to_string()),
            ..UserFilter::default()
        };
        assert_eq!(repo.count_users(&anns).await.unwrap(), 2);
        let ids: Vec<i64> = repo
            .list_users(&anns, 0, 10)
            .await
            .unwrap()
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);

        let by_id = UserFilter {
            id: Some(2),
            ..UserFilter::default()
        };
        let users = repo.list_users(&by_id, 0, 10).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].firstname, "Bob");
    }

    #[tokio::test]
    async fn test_list_users_offset_and_limit() {
        let repo = InMemoryRepository::new();
        for i in 0..5 {
            repo.create_user(&named(&format!("User{i}"))).await.unwrap();
        }

        let page = repo
            .list_users(&UserFilter::default(), 2, 2)
            .await
            .unwrap();
        let ids: Vec<i64> = page.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![3, 4]);

        let tail = repo
            .list_users(&UserFilter::default(), 4, 10)
            .await
            .unwrap();
        assert_eq!(tail.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_user_keeps_contact_rows() {
        let repo = InMemoryRepository::new();
        let user = repo.create_user(&john_doe()).await.unwrap();

        repo.delete_user(user.id).await.unwrap();

        assert!(repo.get_user(user.id).await.unwrap().is_none());
        let tables = repo.tables.read().await;
        assert_eq!(tables.emails.len(), 2);
        assert_eq!(tables.phonenumbers.len(), 1);
        assert!(tables.user_emails.is_empty());
        assert!(tables.user_phonenumbers.is_empty());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_user() {
        let repo = InMemoryRepository::new();
        let result = repo.delete_user(7).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryRepository::new();
        let user = repo.create_user(&john_doe()).await.unwrap();
        repo.delete_user(user.id).await.unwrap();

        let next = repo.create_user(&named("Jane")).await.unwrap();
        assert_eq!(next.id, 2);
        assert_eq!(next.emails[0].id, 3);
    }

    // ==================== Contact Tests ====================

    #[tokio::test]
    async fn test_add_contact_appends() {
        let repo = InMemoryRepository::new();
        let user = repo.create_user(&john_doe()).await.unwrap();

        let contact = NewContact {
            email: "new@example.com".to_string(),
            phone_number: "555-0199".to_string(),
        };
        let updated = repo.add_contact(user.id, &contact).await.unwrap();

        assert_eq!(
            updated.email_addresses(),
            vec!["john@example.com", "jd@example.com", "new@example.com"]
        );
        assert_eq!(updated.numbers(), vec!["555-0100", "555-0199"]);
    }

    #[tokio::test]
    async fn test_add_contact_unknown_user() {
        let repo = InMemoryRepository::new();
        let contact = NewContact {
            email: "new@example.com".to_string(),
            phone_number: "555-0199".to_string(),
        };

        let result = repo.add_contact(99, &contact).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        assert!(repo.tables.read().await.emails.is_empty());
    }

    #[tokio::test]
    async fn test_replace_contacts() {
        let repo = InMemoryRepository::new();
        let user = repo.create_user(&john_doe()).await.unwrap();

        let contacts = ContactSet {
            emails: vec!["only@example.com".to_string()],
            phonenumbers: Vec::new(),
        };
        let updated = repo.replace_contacts(user.id, &contacts).await.unwrap();

        assert_eq!(updated.email_addresses(), vec!["only@example.com"]);
        assert!(updated.phonenumbers.is_empty());
        assert_eq!(updated.emails[0].id, 3);

        // Previous rows are unlinked but still stored
        assert_eq!(repo.tables.read().await.emails.len(), 3);
        assert!(repo.get_user_email(user.id, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_contacts_unknown_user() {
        let repo = InMemoryRepository::new();
        let result = repo.replace_contacts(3, &ContactSet::default()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_user_email_checks_ownership() {
        let repo = InMemoryRepository::new();
        let john = repo.create_user(&john_doe()).await.unwrap();
        let jane = repo.create_user(&named("Jane")).await.unwrap();

        let email = repo.get_user_email(john.id, 2).await.unwrap();
        assert_eq!(email, Some(Email::new(2, "jd@example.com")));

        assert!(repo.get_user_email(jane.id, 2).await.unwrap().is_none());
        assert!(repo.get_user_email(john.id, 99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_user_phone_number_checks_ownership() {
        let repo = InMemoryRepository::new();
        let john = repo.create_user(&john_doe()).await.unwrap();
        let jane = repo.create_user(&named("Jane")).await.unwrap();

        let phone = repo.get_user_phone_number(john.id, 1).await.unwrap();
        assert_eq!(phone, Some(PhoneNumber::new(1, "555-0100")));

        assert!(repo
            .get_user_phone_number(jane.id, 1)
            .await
            .unwrap()
            .is_none());
    }
}
