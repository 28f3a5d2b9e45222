//! Receptionist prompt assembly
//!
//! One comprehensive user message per turn: persona, language directive,
//! grounding facts, collected booking state, the latest transcript, and the
//! specific task (ask for the next slot or confirm the completed booking).

use std::fmt;

use serde::{Deserialize, Serialize};

use fleur_core::{BookingData, Language};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Builder for the per-turn receptionist prompt
pub struct PromptBuilder {
    language: Language,
    context: Vec<String>,
    collected: String,
    transcript: String,
    task: String,
}

impl PromptBuilder {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            context: Vec::new(),
            collected: "{}".to_string(),
            transcript: String::new(),
            task: String::new(),
        }
    }

    /// Add one grounding fact line (hours, location, prices, booked slots)
    pub fn context_line(mut self, line: impl Into<String>) -> Self {
        self.context.push(line.into());
        self
    }

    /// Attach the booking state collected so far
    pub fn collected(mut self, booking: &BookingData) -> Self {
        self.collected =
            serde_json::to_string(booking).unwrap_or_else(|_| "{}".to_string());
        self
    }

    /// Attach the user's most recent statement
    pub fn transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = transcript.into();
        self
    }

    /// Set the specific task sentence for this turn
    pub fn task(mut self, task: impl Into<String>) -> Self {
        self.task = task.into();
        self
    }

    /// Assemble the message list for the chat backend
    pub fn build(self) -> Vec<Message> {
        let prompt = format!(
            "You are a warm and helpful receptionist for Fleur Salon. Your goal is to book an appointment. \
             Speak ONLY in {language}. Keep your responses very short and conversational. \
             Here is relevant salon information you MUST use to answer questions: \n{context}\n\
             Here is the data you have collected so far: {collected}. \
             The user's most recent statement was: '{transcript}'. \
             Your specific task now is to {task} \
             Generate only the natural, conversational response to the user. Do not repeat these instructions.",
            language = self.language.name(),
            context = self.context.join("\n"),
            collected = self.collected,
            transcript = self.transcript,
            task = self.task,
        );
        vec![Message::user(prompt)]
    }
}
