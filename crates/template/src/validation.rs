use kubegen_base::consts::k8s::MAX_NAME_LENGTH;
use snafu::ensure;

use crate::{
    config::non_blank,
    error::{Error, InvalidIdentifierSnafu},
};

/// Checks Kubernetes object names before they are substituted into a
/// template.
pub trait IdentifierValidator {
    /// Validates `value` for the field called `field`.
    ///
    /// Returns the name to use, or `None` when the field is not set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] when `value` is not a legal name.
    fn validate(&self, field: &str, value: Option<&str>) -> Result<Option<String>, Error>;
}

/// Accepts RFC 1123 DNS labels, the naming rule Kubernetes applies to
/// services and replication controllers.
///
/// Unset and blank values are passed through as unset.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dns1123Validator;

impl IdentifierValidator for Dns1123Validator {
    fn validate(&self, field: &str, value: Option<&str>) -> Result<Option<String>, Error> {
        let Some(value) = non_blank(value) else {
            return Ok(None);
        };

        let invalid = |reason: String| InvalidIdentifierSnafu { field, value, reason };

        ensure!(
            value.len() <= MAX_NAME_LENGTH,
            invalid(format!("must be no more than {MAX_NAME_LENGTH} characters"))
        );

        if let Some((index, ch)) = value
            .char_indices()
            .find(|(_, ch)| !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '-'))
        {
            let reason = if ch.is_uppercase() {
                format!("invalid upper case letter '{ch}' at index {index}")
            } else {
                format!("invalid character '{ch}' at index {index}")
            };
            return invalid(reason).fail();
        }

        ensure!(
            !value.starts_with('-') && !value.ends_with('-'),
            invalid("must start and end with an alphanumeric character".to_string())
        );

        Ok(Some(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(value: Option<&str>) -> Result<Option<String>, Error> {
        Dns1123Validator.validate("serviceName", value)
    }

    #[test]
    fn test_accepts_dns_labels() {
        assert_eq!(validate(Some("cheese")).unwrap().as_deref(), Some("cheese"));
        assert_eq!(validate(Some("my-app-2")).unwrap().as_deref(), Some("my-app-2"));
        assert_eq!(validate(Some("0")).unwrap().as_deref(), Some("0"));
    }

    #[test]
    fn test_unset_and_blank_pass_through() {
        assert_eq!(validate(None).unwrap(), None);
        assert_eq!(validate(Some("")).unwrap(), None);
        assert_eq!(validate(Some("   ")).unwrap(), None);
    }

    #[test]
    fn test_rejects_upper_case() {
        let err = validate(Some("MyApp")).unwrap_err();
        assert!(matches!(err, Error::InvalidIdentifier { .. }));
        let message = err.to_string();
        assert!(message.contains("serviceName"), "{message}");
        assert!(message.contains("MyApp"), "{message}");
        assert!(message.contains("'M' at index 0"), "{message}");
    }

    #[test]
    fn test_rejects_invalid_characters() {
        assert!(validate(Some("my_app")).is_err());
        assert!(validate(Some("my.app")).is_err());
        assert!(validate(Some("-app")).is_err());
        assert!(validate(Some("app-")).is_err());
    }

    #[test]
    fn test_rejects_long_names() {
        let name = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate(Some(&name)).is_err());
        let name = "a".repeat(MAX_NAME_LENGTH);
        assert!(validate(Some(&name)).is_ok());
    }
}
