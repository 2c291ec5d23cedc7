use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::bank::DEFAULT_ROLE;

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Lowercase key used against the question bank.
    pub fn as_key(&self) -> String {
        self.to_string().to_lowercase()
    }

    pub fn cycled(&self) -> Self {
        match self {
            Difficulty::Beginner => Difficulty::Intermediate,
            Difficulty::Intermediate => Difficulty::Advanced,
            Difficulty::Advanced => Difficulty::Beginner,
        }
    }
}

/// Coarse state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Answering,
    Reviewing,
    Completed,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub role: String,
    pub difficulty: Difficulty,
    pub duration_minutes: u32,
    pub company_type: String,
    pub total_questions: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            role: DEFAULT_ROLE.to_string(),
            difficulty: Difficulty::Intermediate,
            duration_minutes: 30,
            company_type: "tech".to_string(),
            total_questions: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionRuntime {
    pub current_question: usize,
    pub total_questions: usize,
    pub seconds_remaining: u32,
    pub is_recording: bool,
    pub phase: Phase,
}

impl SessionRuntime {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            current_question: 0,
            total_questions: config.total_questions,
            seconds_remaining: config.duration_minutes * 60,
            is_recording: false,
            phase: Phase::Setup,
        }
    }
}
