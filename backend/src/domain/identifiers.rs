//! Validated string identifiers shared across the domain.
//!
//! Identifiers are caller supplied and opaque. The only rule is that they are
//! not blank; surrounding whitespace is preserved as given.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation error raised when an identifier or name is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("value must not be empty")]
pub struct BlankValueError;

macro_rules! define_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the value.
            pub fn new(value: impl Into<String>) -> Result<Self, BlankValueError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(BlankValueError);
                }
                Ok(Self(value))
            }

            /// Borrow the raw string.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = BlankValueError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = BlankValueError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_identifier! {
    /// Stable user identifier supplied by the caller.
    UserId
}

define_identifier! {
    /// Display name of a user.
    Username
}

define_identifier! {
    /// Globally unique team name.
    TeamName
}

define_identifier! {
    /// Caller-supplied, globally unique pull request identifier.
    PullRequestId
}

define_identifier! {
    /// Human readable pull request title.
    PullRequestTitle
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_values_are_rejected(#[case] raw: &str) {
        assert_eq!(UserId::new(raw), Err(BlankValueError));
        assert_eq!(TeamName::new(raw), Err(BlankValueError));
    }

    #[rstest]
    fn values_are_kept_verbatim() {
        let id = PullRequestId::new(" pr-1 ").expect("non-blank id");
        assert_eq!(id.as_str(), " pr-1 ");
    }

    #[rstest]
    fn deserialisation_applies_validation() {
        let result: Result<TeamName, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
        let name: TeamName = serde_json::from_str("\"backend\"").expect("valid name");
        assert_eq!(name.as_str(), "backend");
    }
}
