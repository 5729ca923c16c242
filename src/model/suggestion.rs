use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::Id;

/// A proposal from a committee member. Staff either accept it, which earns the
/// sender a point, or reject it. Both remove it from the camp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: Id<Suggestion>,
    pub sender: String,
    pub message: String,
}

impl Suggestion {
    pub fn create(sender: String, message: String) -> Self {
        Self {
            id: Id::generate(),
            sender,
            message,
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sender, self.message)
    }
}
