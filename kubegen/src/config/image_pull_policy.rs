use std::{fmt, str::FromStr};

use snafu::Snafu;

/// When the kubelet pulls the container image.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImagePullPolicy {
    IfNotPresent,
    Always,
    Never,
}

impl ImagePullPolicy {
    /// The spelling Kubernetes expects in a container spec.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IfNotPresent => "IfNotPresent",
            Self::Always => "Always",
            Self::Never => "Never",
        }
    }
}

impl fmt::Display for ImagePullPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ImagePullPolicy {
    type Err = ParseImagePullPolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().replace(['-', '_'], "").to_lowercase().as_str() {
            "ifnotpresent" => Ok(Self::IfNotPresent),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => InvalidSnafu { value }.fail(),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ParseImagePullPolicyError {
    #[snafu(display(
        "'{value}' is not a valid image pull policy, expected one of Always, IfNotPresent, Never"
    ))]
    Invalid { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Always".parse::<ImagePullPolicy>().unwrap(), ImagePullPolicy::Always);
        assert_eq!("never".parse::<ImagePullPolicy>().unwrap(), ImagePullPolicy::Never);
        assert_eq!(
            "if-not-present".parse::<ImagePullPolicy>().unwrap(),
            ImagePullPolicy::IfNotPresent
        );
    }

    #[test]
    fn test_parse_rejects_unknown_policy() {
        let err = "sometimes".parse::<ImagePullPolicy>().unwrap_err();
        assert!(err.to_string().contains("sometimes"));
    }

    #[test]
    fn test_display_uses_kubernetes_spelling() {
        assert_eq!(ImagePullPolicy::IfNotPresent.to_string(), "IfNotPresent");
    }
}
