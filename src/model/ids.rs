use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// Key for camps and the enquiries and suggestions filed under them. An
/// `Id<Camp>` cannot stand in for an `Id<Enquiry>`.
///
/// Users are keyed by their login string instead, see [`crate::model::User::user_id`].
pub struct Id<T>(Uuid, PhantomData<fn() -> T>);

impl<T> Id<T> {
    pub fn from_uuid(value: Uuid) -> Self {
        Id(value, PhantomData)
    }

    pub fn generate() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    fn kind() -> &'static str {
        let full = std::any::type_name::<T>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// Accepts the hyphenated form written by `Display`, with surrounding whitespace.
impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self::from_uuid)
    }
}

// On the wire an id is just its uuid string.
impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", Self::kind(), self.0)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Camp;

    #[test]
    fn generated_ids_differ() {
        assert_ne!(Id::<Camp>::generate(), Id::<Camp>::generate());
    }

    #[test]
    fn parse_accepts_display_output_with_padding() {
        let id = Id::<Camp>::generate();
        let parsed: Id<Camp> = format!("  {id}\n").parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<Id<Camp>>().is_err());
    }

    #[test]
    fn debug_names_the_entity() {
        let id = Id::<Camp>::generate();
        assert_eq!(format!("{id:?}"), format!("Camp({})", id.as_uuid()));
    }

    #[test]
    fn serializes_as_bare_uuid_string() {
        let id = Id::<Camp>::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        assert_eq!(serde_json::from_str::<Id<Camp>>(&json).unwrap(), id);
    }
}
