use thiserror::Error;

/// Errors produced while resolving a requested page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Invalid page.")]
    InvalidPage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_page_display() {
        assert_eq!(PaginationError::InvalidPage.to_string(), "Invalid page.");
    }
}
