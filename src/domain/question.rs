use serde::{Deserialize, Serialize};

use super::{Chunk, MessageRole};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaQuery {
    pub question: String,
    #[serde(default)]
    pub chat_history: Vec<ChatTurn>,
}

impl QaQuery {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            chat_history: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcedAnswer {
    pub answer: String,
    pub confidence_score: f32,
    pub sources: Vec<Chunk>,
}

impl SourcedAnswer {
    pub fn unsourced(answer: impl Into<String>, confidence_score: f32) -> Self {
        Self {
            answer: answer.into(),
            confidence_score,
            sources: Vec::new(),
        }
    }
}
