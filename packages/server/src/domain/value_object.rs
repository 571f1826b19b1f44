//! Value objects.
//!
//! Identifiers are plain strings on the wire and are taken as-is: no format or
//! emptiness rule is enforced, so an empty room id or username is still a valid key.

use std::fmt;

use uuid::Uuid;

macro_rules! string_value_object {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_value_object!(
    /// Transport-assigned identity of a single WebSocket connection
    ConnectionId
);

string_value_object!(
    /// Room key chosen by the participants
    RoomId
);

string_value_object!(
    /// Display name given at join time (not unique)
    Username
);

string_value_object!(
    /// Opaque video identifier (URL or provider id)
    VideoId
);

/// Generates fresh connection ids
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a random (UUID v4) connection id
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}
