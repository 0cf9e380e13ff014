//! HTTP status codes for repository failures.
//!
//! Kept free of any HTTP crate so the server decides how to build responses.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404
/// - `AlreadyExists` -> 409
/// - `InvalidData` -> 400
/// - `ConnectionFailed` -> 503
/// - `QueryFailed`, `Serialization` -> 500
///
/// # Examples
///
/// ```
/// use contactbook_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let error = RepositoryError::not_found("User", 2121);
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::InvalidData(_) => 400,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) | RepositoryError::Serialization(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::not_found("PhoneNumber", 1)),
            404
        );
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::AlreadyExists {
                entity_type: "User",
                id: "1".to_string(),
            }),
            409
        );
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::InvalidData("bad".to_string())),
            400
        );
    }

    #[test]
    fn test_server_errors() {
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::ConnectionFailed("down".to_string())),
            503
        );
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::QueryFailed("syntax".to_string())),
            500
        );
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::Serialization("json".to_string())),
            500
        );
    }
}
