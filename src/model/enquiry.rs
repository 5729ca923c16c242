use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::Id;
use crate::error::{CampError, CampResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub responder: String,
    pub message: String,
}

/// A question a user sent to a camp. It can be changed until someone answers it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enquiry {
    pub id: Id<Enquiry>,
    pub sender: String,
    pub message: String,
    pub reply: Option<Reply>,
}

impl Enquiry {
    pub fn create(sender: String, message: String) -> Self {
        Self {
            id: Id::generate(),
            sender,
            message,
            reply: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.reply.is_some()
    }

    pub fn edit(&mut self, message: String) -> CampResult<()> {
        if self.is_answered() {
            return Err(CampError::AlreadyAnswered);
        }
        self.message = message;
        Ok(())
    }

    pub fn answer(&mut self, responder: String, message: String) -> CampResult<()> {
        if self.is_answered() {
            return Err(CampError::AlreadyAnswered);
        }
        self.reply = Some(Reply { responder, message });
        Ok(())
    }
}

impl fmt::Display for Enquiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sender, self.message)?;
        match &self.reply {
            Some(reply) => write!(f, " (answered by {}: {})", reply.responder, reply.message),
            None => write!(f, " (unanswered)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_allowed_until_answered() {
        let mut enquiry = Enquiry::create("alice".into(), "Is lunch provided?".into());
        enquiry.edit("Is dinner provided?".into()).unwrap();
        assert_eq!(enquiry.message, "Is dinner provided?");

        enquiry.answer("bob".into(), "Yes".into()).unwrap();
        assert!(matches!(
            enquiry.edit("Breakfast?".into()),
            Err(CampError::AlreadyAnswered)
        ));
        assert_eq!(enquiry.message, "Is dinner provided?");
    }

    #[test]
    fn answer_only_once() {
        let mut enquiry = Enquiry::create("alice".into(), "Bring a tent?".into());
        enquiry.answer("bob".into(), "No".into()).unwrap();
        assert!(enquiry.answer("carol".into(), "Yes".into()).is_err());
        assert_eq!(enquiry.reply.as_ref().unwrap().responder, "bob");
    }
}
