use alloc::string::String;
use serde::{Deserialize, Serialize};

/// A stored trivia question. The `id` is assigned by the store on insertion.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Question {
    pub id: i32,
    /// Prompt shown to the player.
    pub question: String,
    /// Expected answer, revealed after the player responds.
    pub answer: String,
    /// Identifier of the owning [`Category`]. Validated by the store on insertion.
    pub category: i32,
    /// Ranges from `1` (easiest) to `5` (hardest).
    pub difficulty: i16,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Acceptable schema for new questions.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i16,
}

impl NewQuestion {
    /// Attaches a store-assigned identifier.
    pub fn with_id(self, id: i32) -> Question {
        let Self { question, answer, category, difficulty } = self;
        Question { id, question, answer, category, difficulty }
    }
}
