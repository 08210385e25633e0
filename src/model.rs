//! Row types for the `characters` and `droids` tables, and validated write payloads.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub age: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Droid {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Owning character by label; not enforced against `characters.name`.
    pub belongs: String,
}

/// Character fields that passed validation. Only built by `service::validation`.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCharacter {
    pub name: String,
    pub description: String,
    pub age: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewDroid {
    pub name: String,
    pub description: String,
    pub belongs: String,
}

impl NewCharacter {
    pub fn into_row(self, id: i64) -> Character {
        Character {
            id,
            name: self.name,
            description: self.description,
            age: self.age,
        }
    }
}

impl NewDroid {
    pub fn into_row(self, id: i64) -> Droid {
        Droid {
            id,
            name: self.name,
            description: self.description,
            belongs: self.belongs,
        }
    }
}

/// The `:id` path segment, kept as the caller wrote it. Segments that parse as an integer
/// address rows; anything else never matches a row. Serializes as the raw text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathId {
    raw: String,
    id: Option<i64>,
}

impl PathId {
    pub fn parse(segment: &str) -> Self {
        PathId {
            raw: segment.to_string(),
            id: segment.parse::<i64>().ok(),
        }
    }

    pub fn as_id(&self) -> Option<i64> {
        self.id
    }
}

impl From<i64> for PathId {
    fn from(id: i64) -> Self {
        PathId {
            raw: id.to_string(),
            id: Some(id),
        }
    }
}

impl Serialize for PathId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl std::fmt::Display for PathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A resolved LIMIT/OFFSET window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}
