//! Interaction event record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DifficultyTier, LearnerId, Timestamp, ValidationError};

/// The kind of a learning event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Question,
    Answer,
    SessionStart,
    SessionEnd,
    ContentView,
}

impl InteractionKind {
    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Answer)
    }

    /// Kinds that carry a meaningful topic.
    pub fn is_topic_bearing(&self) -> bool {
        matches!(self, Self::Question | Self::Answer | Self::ContentView)
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Question => "question",
            Self::Answer => "answer",
            Self::SessionStart => "session_start",
            Self::SessionEnd => "session_end",
            Self::ContentView => "content_view",
        };
        write!(f, "{}", s)
    }
}

/// An immutable learning event.
///
/// Never mutated or deleted once appended; correctness is present only for
/// answer events. Matches the persistence record format one to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    learner_id: LearnerId,
    timestamp: Timestamp,
    topic: String,
    kind: InteractionKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    correctness: Option<bool>,
    difficulty_tier: DifficultyTier,
}

impl Interaction {
    /// Creates a validated interaction.
    ///
    /// Rejects correctness on non-answer kinds and an empty topic on
    /// topic-bearing kinds. Session events may carry an empty topic.
    pub fn new(
        learner_id: LearnerId,
        timestamp: Timestamp,
        topic: impl Into<String>,
        kind: InteractionKind,
        correctness: Option<bool>,
        difficulty_tier: DifficultyTier,
    ) -> Result<Self, ValidationError> {
        let topic = topic.into();
        if correctness.is_some() && !kind.is_answer() {
            return Err(ValidationError::correctness_on_non_answer(kind));
        }
        if kind.is_topic_bearing() && topic.trim().is_empty() {
            return Err(ValidationError::empty_field("topic"));
        }
        Ok(Self {
            learner_id,
            timestamp,
            topic,
            kind,
            correctness,
            difficulty_tier,
        })
    }

    /// Convenience constructor for a graded answer event.
    pub fn answer(
        learner_id: LearnerId,
        timestamp: Timestamp,
        topic: impl Into<String>,
        correct: bool,
        difficulty_tier: DifficultyTier,
    ) -> Result<Self, ValidationError> {
        Self::new(
            learner_id,
            timestamp,
            topic,
            InteractionKind::Answer,
            Some(correct),
            difficulty_tier,
        )
    }

    /// Convenience constructor for a session boundary event.
    pub fn session_boundary(
        learner_id: LearnerId,
        timestamp: Timestamp,
        kind: InteractionKind,
    ) -> Result<Self, ValidationError> {
        debug_assert!(matches!(
            kind,
            InteractionKind::SessionStart | InteractionKind::SessionEnd
        ));
        Self::new(
            learner_id,
            timestamp,
            String::new(),
            kind,
            None,
            DifficultyTier::default(),
        )
    }

    // Getters
    pub fn learner_id(&self) -> &LearnerId {
        &self.learner_id
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn kind(&self) -> InteractionKind {
        self.kind
    }

    pub fn correctness(&self) -> Option<bool> {
        self.correctness
    }

    pub fn difficulty_tier(&self) -> DifficultyTier {
        self.difficulty_tier
    }
}
