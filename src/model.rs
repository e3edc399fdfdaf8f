//! User record data model.

use serde::{Deserialize, Serialize};

/// A user record as it is sent over the wire and stored on one line.
///
/// Field order is significant: serializing yields exactly
/// `{"id":"…","name":"…","address":"…","tel":"…","age":"…"}`.
/// The id is minted by whoever creates the record, never by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub tel: String,
    pub age: String,
}

impl UserRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        tel: impl Into<String>,
        age: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            tel: tel.into(),
            age: age.into(),
        }
    }

    /// Build a record with a freshly generated ULID id.
    pub fn with_generated_id(
        name: impl Into<String>,
        address: impl Into<String>,
        tel: impl Into<String>,
        age: impl Into<String>,
    ) -> Self {
        Self::new(ulid::Ulid::new().to_string(), name, address, tel, age)
    }

    /// Serialize to the single-line store format.
    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{contains_id, extract_field};

    #[test]
    fn test_to_line_shape() {
        let user = UserRecord::new("x1", "bae", "Seoul", "010-0101-0101", "10");
        assert_eq!(
            user.to_line().unwrap(),
            r#"{"id":"x1","name":"bae","address":"Seoul","tel":"010-0101-0101","age":"10"}"#
        );
    }

    #[test]
    fn test_generated_ids_are_distinct_and_scannable() {
        let a = UserRecord::with_generated_id("a", "b", "c", "1");
        let b = UserRecord::with_generated_id("a", "b", "c", "1");
        assert_ne!(a.id, b.id);
        let line = a.to_line().unwrap();
        assert_eq!(extract_field(&line, "id"), Some(a.id.as_str()));
        assert!(contains_id(&line, &a.id));
    }
}
