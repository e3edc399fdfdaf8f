use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Strongly typed connection identifier backed by ULID.
///
/// Logged as the `connection_id` field of every connection event so log
/// lines from one persistent connection can be grouped.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct ConnectionId(pub ulid::Ulid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ConnectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConnectionId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ConnectionId(ulid::Ulid::from_string(s)?))
    }
}
