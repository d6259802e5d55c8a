//! # Validation Utilities
//!
//! Credential checks run before a login or registration request leaves the client.

/// Validation failure, carrying the offending field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Empty { field: String },
    InvalidEmail,
    TooShort { field: String, min: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Empty { field } => write!(fmt, "{field} cannot be empty"),
            Error::InvalidEmail => write!(fmt, "Invalid email format"),
            Error::TooShort { field, min } => {
                write!(fmt, "{field} must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Validate that a string is not blank.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        Err(Error::Empty {
            field: field_name.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Validate email shape: one `@` with a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> Result<(), Error> {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(Error::InvalidEmail);
    };
    let dotted = domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());
    if local.is_empty() || domain.contains('@') || !dotted {
        return Err(Error::InvalidEmail);
    }
    Ok(())
}

/// Validate minimum length in characters.
pub fn validate_min_length(value: &str, min: usize, field_name: &str) -> Result<(), Error> {
    if value.chars().count() < min {
        Err(Error::TooShort {
            field: field_name.to_string(),
            min,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert_eq!(validate_email("test@example"), Err(Error::InvalidEmail));
        assert_eq!(validate_email("@example.com"), Err(Error::InvalidEmail));
        assert_eq!(validate_email("a@b@c.io"), Err(Error::InvalidEmail));
    }

    #[test]
    fn test_validate_min_length_counts_chars() {
        assert!(validate_min_length("héllo", 5, "password").is_ok());
        assert_eq!(
            validate_min_length("abc", 8, "password").unwrap_err().to_string(),
            "password must be at least 8 characters"
        );
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("  ", "email").is_err());
        assert!(validate_not_empty("x", "email").is_ok());
    }
}
