//! Strongly typed entity identifiers.
//!
//! Each identifier wraps a [`Uuid`] so user, course, and enrollment ids cannot
//! be swapped by accident at call sites.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_entity_id!(
    /// Stable user identifier.
    UserId
);
define_entity_id!(
    /// Stable course identifier.
    CourseId
);
define_entity_id!(
    /// Stable enrollment identifier.
    EnrollmentId
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parses_and_displays_hyphenated_uuid() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id: UserId = raw.parse().expect("valid uuid");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    fn rejects_malformed_input() {
        assert!("not-a-uuid".parse::<CourseId>().is_err());
    }

    #[rstest]
    fn serialises_as_bare_string() {
        let id = EnrollmentId::from_uuid(Uuid::nil());
        let value = serde_json::to_value(id).expect("serialise id");
        assert_eq!(value, serde_json::json!("00000000-0000-0000-0000-000000000000"));
    }

    #[rstest]
    fn ordering_follows_uuid_bytes() {
        let low = UserId::from_uuid(Uuid::from_u128(1));
        let high = UserId::from_uuid(Uuid::from_u128(2));
        assert!(low < high);
    }
}
