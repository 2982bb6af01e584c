//! Analytics snapshot: a pure fold over the interaction log.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::foundation::{DifficultyTier, LearnerId, Timestamp};
use crate::domain::interaction::{Interaction, InteractionKind};

/// How many recently-attempted difficulty tiers the snapshot keeps.
pub const RECENT_TIER_WINDOW: usize = 10;

/// Per-topic attempt counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopicStats {
    /// Graded answers for this topic.
    pub attempts: u32,
    /// Correct answers among the attempts.
    pub correct: u32,
    /// All topic-bearing events (questions, answers, content views).
    pub touches: u32,
    /// Timestamp of the most recent topic-bearing event.
    pub last_seen: Option<Timestamp>,
}

impl TopicStats {
    /// Accuracy as correct/attempted, or None when nothing was attempted.
    pub fn accuracy(&self) -> Option<f64> {
        if self.attempts == 0 {
            None
        } else {
            Some(f64::from(self.correct) / f64::from(self.attempts))
        }
    }
}

/// A non-fatal data inconsistency detected while folding the log.
///
/// Anomalies are recorded in the snapshot rather than thrown, so analytics
/// stay available in degraded form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// A session_start with no session_end before the next session_start.
    UnmatchedSessionStart { started_at: Timestamp },
    /// A session_end with no open session.
    UnmatchedSessionEnd { ended_at: Timestamp },
}

/// Derived metrics for one learner.
///
/// Every field is a pure function of the interaction sequence up to `as_of`:
/// recomputing from scratch always reproduces the same values. The fold is
/// applied incrementally on each new event and replayed in full on cold
/// start; the two must agree bit for bit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSnapshot {
    learner_id: LearnerId,
    as_of: Option<Timestamp>,
    event_count: u64,
    topics: BTreeMap<String, TopicStats>,
    /// Signed correctness streak: positive runs of correct answers, negative
    /// runs of incorrect ones. Flips to plus or minus one on polarity change.
    streak: i32,
    /// Completed sessions (matched start/end pairs).
    session_count: u32,
    /// Total engaged time over completed sessions, in seconds.
    engaged_seconds: i64,
    /// Difficulty tiers of the last [`RECENT_TIER_WINDOW`] answers, oldest first.
    recent_tiers: Vec<DifficultyTier>,
    anomalies: Vec<Anomaly>,
    // Interaction-kind mix, used for learning-style inference.
    questions: u32,
    answers: u32,
    content_views: u32,
    // Fold state: start of the currently open session, if any. Kept in the
    // snapshot so the incremental fold and a full replay stay identical.
    open_session: Option<Timestamp>,
}

impl AnalyticsSnapshot {
    /// Empty snapshot for a learner with no events.
    pub fn empty(learner_id: LearnerId) -> Self {
        Self {
            learner_id,
            as_of: None,
            event_count: 0,
            topics: BTreeMap::new(),
            streak: 0,
            session_count: 0,
            engaged_seconds: 0,
            recent_tiers: Vec::new(),
            anomalies: Vec::new(),
            questions: 0,
            answers: 0,
            content_views: 0,
            open_session: None,
        }
    }

    /// Recomputes a snapshot from scratch by folding over the full event
    /// sequence.
    pub fn replay<'a>(
        learner_id: LearnerId,
        events: impl IntoIterator<Item = &'a Interaction>,
    ) -> Self {
        let mut snapshot = Self::empty(learner_id);
        for event in events {
            snapshot.apply(event);
        }
        snapshot
    }

    /// Folds one event into the snapshot.
    ///
    /// Events are assumed to arrive in log order; the caller (the log)
    /// enforces monotonic timestamps.
    pub fn apply(&mut self, event: &Interaction) {
        self.event_count += 1;
        self.as_of = Some(event.timestamp());

        if event.kind().is_topic_bearing() {
            let stats = self.topics.entry(event.topic().to_string()).or_default();
            stats.touches += 1;
            stats.last_seen = Some(event.timestamp());
        }

        match event.kind() {
            InteractionKind::Answer => {
                self.answers += 1;
                let correct = event.correctness().unwrap_or(false);
                let stats = self.topics.entry(event.topic().to_string()).or_default();
                stats.attempts += 1;
                if correct {
                    stats.correct += 1;
                }
                self.streak = match (correct, self.streak) {
                    (true, s) if s > 0 => s + 1,
                    (true, _) => 1,
                    (false, s) if s < 0 => s - 1,
                    (false, _) => -1,
                };
                self.recent_tiers.push(event.difficulty_tier());
                if self.recent_tiers.len() > RECENT_TIER_WINDOW {
                    self.recent_tiers.remove(0);
                }
            }
            InteractionKind::Question => self.questions += 1,
            InteractionKind::ContentView => self.content_views += 1,
            InteractionKind::SessionStart => {
                if let Some(previous) = self.open_session.replace(event.timestamp()) {
                    self.anomalies.push(Anomaly::UnmatchedSessionStart {
                        started_at: previous,
                    });
                }
            }
            InteractionKind::SessionEnd => match self.open_session.take() {
                Some(start) => {
                    self.session_count += 1;
                    self.engaged_seconds +=
                        event.timestamp().duration_since(&start).num_seconds();
                }
                None => {
                    self.anomalies.push(Anomaly::UnmatchedSessionEnd {
                        ended_at: event.timestamp(),
                    });
                }
            },
        }
    }

    // Getters
    pub fn learner_id(&self) -> &LearnerId {
        &self.learner_id
    }

    pub fn as_of(&self) -> Option<Timestamp> {
        self.as_of
    }

    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    pub fn topics(&self) -> &BTreeMap<String, TopicStats> {
        &self.topics
    }

    pub fn topic(&self, topic: &str) -> Option<&TopicStats> {
        self.topics.get(topic)
    }

    pub fn streak(&self) -> i32 {
        self.streak
    }

    pub fn session_count(&self) -> u32 {
        self.session_count
    }

    pub fn engaged_seconds(&self) -> i64 {
        self.engaged_seconds
    }

    pub fn recent_tiers(&self) -> &[DifficultyTier] {
        &self.recent_tiers
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    pub fn questions(&self) -> u32 {
        self.questions
    }

    pub fn answers(&self) -> u32 {
        self.answers
    }

    pub fn content_views(&self) -> u32 {
        self.content_views
    }
}
