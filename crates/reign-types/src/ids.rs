//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every entity in a reign has a strongly-typed ID so that an event ID can
//! never be passed where a harem member ID is expected. The engine builds
//! IDs from its seeded RNG via [`from_random_bytes`](RulerId::from_random_bytes)
//! so that a replayed session produces identical identifiers; `new()` is
//! kept for hosts and tests that do not care about reproducibility.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Build an identifier from 16 random bytes (UUID v4 layout).
            pub const fn from_random_bytes(bytes: [u8; 16]) -> Self {
                Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a ruler (one per reign).
    RulerId
}

define_id! {
    /// Unique identifier for an event instance drawn into a cycle.
    EventId
}

define_id! {
    /// Unique identifier for an option within an event instance.
    OptionId
}

define_id! {
    /// Unique identifier for a harem member.
    MemberId
}

define_id! {
    /// Unique identifier for an heir.
    HeirId
}

define_id! {
    /// Unique identifier for a chronicle log entry.
    LogId
}

define_id! {
    /// Unique identifier for a memory fragment.
    FragmentId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_bytes_are_reproducible() {
        let a = EventId::from_random_bytes([7; 16]);
        let b = EventId::from_random_bytes([7; 16]);
        assert_eq!(a, b);
        assert_eq!(a.into_inner().get_version_num(), 4);
    }

    #[test]
    fn ids_are_distinct() {
        assert_ne!(HeirId::new(), HeirId::new());
    }
}
