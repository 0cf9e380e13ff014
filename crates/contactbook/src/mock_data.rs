use contactbook_core::contact::{CreateUserRequest, User};
use contactbook_core::storage::UserRepository;

const FIRSTNAMES: &[&str] = &["John", "Jane", "Maria", "Pedro", "Ana", "Lucas", "Sofia", "Diego"];
const LASTNAMES: &[&str] = &["Doe", "Smith", "Garcia", "Silva", "Pereira", "Lopez"];

/// Builds the `index`-th demo user payload: one email and one phone number.
///
/// Names cycle through fixed lists so the same index always yields the same
/// user.
pub fn demo_user(index: usize) -> CreateUserRequest {
    let firstname = FIRSTNAMES[index % FIRSTNAMES.len()];
    let lastname = LASTNAMES[index % LASTNAMES.len()];

    CreateUserRequest::new(lastname, firstname)
        .with_email(format!(
            "{}.{}{}@example.com",
            firstname.to_lowercase(),
            lastname.to_lowercase(),
            index + 1
        ))
        .with_phone_number(format!("+1 555 01{:02}", index % 100))
}

/// Validates and stores `count` demo users, then returns them.
pub async fn seed_demo_users(
    repo: &dyn UserRepository,
    count: usize,
) -> anyhow::Result<Vec<User>> {
    let mut users = Vec::with_capacity(count);
    for index in 0..count {
        let new_user = demo_user(index).validate()?;
        users.push(repo.create_user(&new_user).await?);
    }
    Ok(users)
}

#[cfg(test)]
mod tests {
    use contactbook_core::storage::UserFilter;

    use super::*;
    use crate::storage::InMemoryRepository;

    #[test]
    fn test_demo_users_pass_validation() {
        for index in 0..50 {
            let user = demo_user(index).validate().unwrap();

            assert_eq!(user.emails.len(), 1);
            assert_eq!(user.phonenumbers.len(), 1);
        }
    }

    #[test]
    fn test_demo_emails_are_unique() {
        let a = demo_user(0);
        let b = demo_user(FIRSTNAMES.len() * LASTNAMES.len());

        assert_eq!(a.firstname, b.firstname);
        assert_ne!(a.emails, b.emails);
    }

    #[tokio::test]
    async fn test_seed_demo_users() {
        let repo = InMemoryRepository::new();

        let users = seed_demo_users(&repo, 12).await.unwrap();

        assert_eq!(users.len(), 12);
        assert_eq!(users[11].id, 12);
        assert_eq!(users[0].firstname, "John");
        assert_eq!(users[0].email_addresses(), vec!["john.doe1@example.com"]);
        assert_eq!(repo.count_users(&UserFilter::default()).await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_seed_zero_users() {
        let repo = InMemoryRepository::new();

        let users = seed_demo_users(&repo, 0).await.unwrap();

        assert!(users.is_empty());
    }
}
