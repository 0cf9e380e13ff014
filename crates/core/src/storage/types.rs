use crate::contact::User;

/// Exact-match filters for listing users. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub id: Option<i64>,
    pub firstname: Option<String>,
}

impl UserFilter {
    /// Returns true if the user passes every set filter.
    pub fn matches(&self, user: &User) -> bool {
        self.matches_fields(user.id, &user.firstname)
    }

    /// Same check as [`Self::matches`] on the filtered columns alone, for
    /// backends that hold users as plain rows.
    pub fn matches_fields(&self, id: i64, firstname: &str) -> bool {
        self.id.is_none_or(|wanted| wanted == id)
            && self
                .firstname
                .as_deref()
                .is_none_or(|wanted| wanted == firstname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(UserFilter::default().matches(&User::new(1, "Doe", "John")));
    }

    #[test]
    fn test_id_filter() {
        let filter = UserFilter {
            id: Some(2),
            ..UserFilter::default()
        };

        assert!(filter.matches(&User::new(2, "Doe", "John")));
        assert!(!filter.matches(&User::new(3, "Doe", "John")));
    }

    #[test]
    fn test_firstname_filter_is_exact() {
        let filter = UserFilter {
            firstname: Some("John".to_string()),
            ..UserFilter::default()
        };

        assert!(filter.matches(&User::new(1, "Doe", "John")));
        assert!(!filter.matches(&User::new(1, "Doe", "john")));
        assert!(!filter.matches(&User::new(1, "Doe", "Johnny")));
    }

    #[test]
    fn test_matches_fields_agrees_with_matches() {
        let filter = UserFilter {
            id: Some(1),
            firstname: Some("Jane".to_string()),
        };

        for user in [
            User::new(1, "Doe", "Jane"),
            User::new(1, "Doe", "John"),
            User::new(2, "Doe", "Jane"),
        ] {
            assert_eq!(
                filter.matches(&user),
                filter.matches_fields(user.id, &user.firstname)
            );
        }
        assert!(filter.matches_fields(1, "Jane"));
        assert!(!filter.matches_fields(2, "Jane"));
    }

    #[test]
    fn test_filters_combine() {
        let filter = UserFilter {
            id: Some(1),
            firstname: Some("Jane".to_string()),
        };

        assert!(filter.matches(&User::new(1, "Doe", "Jane")));
        assert!(!filter.matches(&User::new(1, "Doe", "John")));
    }
}
