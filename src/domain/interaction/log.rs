//! Append-only interaction log for a single learner.

use crate::domain::foundation::{LearnerId, Timestamp, ValidationError};

use super::Interaction;

/// Ordered, append-only record of one learner's events.
///
/// Insertion order is the log's definition of "recent"; events are never
/// reordered. Timestamps must be monotonically non-decreasing.
#[derive(Debug, Clone)]
pub struct InteractionLog {
    learner_id: LearnerId,
    events: Vec<Interaction>,
}

impl InteractionLog {
    /// Creates an empty log for a learner.
    pub fn new(learner_id: LearnerId) -> Self {
        Self {
            learner_id,
            events: Vec::new(),
        }
    }

    /// Rebuilds a log from persisted events, re-validating the append
    /// invariants on the way in.
    pub fn from_events(
        learner_id: LearnerId,
        events: Vec<Interaction>,
    ) -> Result<Self, ValidationError> {
        let mut log = Self::new(learner_id);
        for event in events {
            log.append(event)?;
        }
        Ok(log)
    }

    pub fn learner_id(&self) -> &LearnerId {
        &self.learner_id
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Timestamp of the most recent event, if any.
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.events.last().map(|e| e.timestamp())
    }

    /// Checks whether an event could be appended, without mutating the log.
    pub fn validate_append(&self, event: &Interaction) -> Result<(), ValidationError> {
        if event.learner_id() != &self.learner_id {
            return Err(ValidationError::invalid_format(
                "learner_id",
                format!(
                    "event belongs to '{}', log belongs to '{}'",
                    event.learner_id(),
                    self.learner_id
                ),
            ));
        }
        if let Some(last) = self.last_timestamp() {
            if event.timestamp().is_before(&last) {
                return Err(ValidationError::out_of_order(
                    self.learner_id.as_str(),
                    last,
                    event.timestamp(),
                ));
            }
        }
        Ok(())
    }

    /// Appends an event. Fails without any partial effect.
    pub fn append(&mut self, event: Interaction) -> Result<(), ValidationError> {
        self.validate_append(&event)?;
        self.events.push(event);
        Ok(())
    }

    /// All events in insertion order.
    pub fn events(&self) -> &[Interaction] {
        &self.events
    }

    /// Lazy, restartable view of events in insertion order, optionally
    /// filtered by topic and a lower timestamp bound (inclusive).
    pub fn events_for<'a>(
        &'a self,
        topic: Option<&'a str>,
        since: Option<Timestamp>,
    ) -> impl Iterator<Item = &'a Interaction> + 'a {
        self.events.iter().filter(move |event| {
            topic.map_or(true, |t| event.topic() == t)
                && since.map_or(true, |s| !event.timestamp().is_before(&s))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DifficultyTier;
    use crate::domain::interaction::InteractionKind;

    fn learner() -> LearnerId {
        LearnerId::new("learner-1").unwrap()
    }

    fn ts(offset: i64) -> Timestamp {
        Timestamp::from_unix(1_700_000_000 + offset).unwrap()
    }

    fn answer(topic: &str, offset: i64, correct: bool) -> Interaction {
        Interaction::answer(learner(), ts(offset), topic, correct, DifficultyTier::Beginner)
            .unwrap()
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut log = InteractionLog::new(learner());
        log.append(answer("fractions", 0, true)).unwrap();
        log.append(answer("algebra", 10, false)).unwrap();

        let topics: Vec<&str> = log.events().iter().map(|e| e.topic()).collect();
        assert_eq!(topics, vec!["fractions", "algebra"]);
    }

    #[test]
    fn equal_timestamps_are_accepted() {
        let mut log = InteractionLog::new(learner());
        log.append(answer("fractions", 5, true)).unwrap();
        log.append(answer("fractions", 5, false)).unwrap();
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn out_of_order_append_is_rejected_and_log_unchanged() {
        let mut log = InteractionLog::new(learner());
        log.append(answer("fractions", 100, true)).unwrap();
        let len_before = log.len();

        let result = log.append(answer("fractions", 50, true));

        assert!(matches!(
            result,
            Err(ValidationError::OutOfOrderTimestamp { .. })
        ));
        assert_eq!(log.len(), len_before);
    }

    #[test]
    fn append_rejects_foreign_learner() {
        let mut log = InteractionLog::new(learner());
        let other = LearnerId::new("learner-2").unwrap();
        let event =
            Interaction::answer(other, ts(0), "fractions", true, DifficultyTier::Beginner)
                .unwrap();

        assert!(log.append(event).is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn events_for_filters_by_topic_and_since() {
        let mut log = InteractionLog::new(learner());
        log.append(answer("fractions", 0, true)).unwrap();
        log.append(answer("algebra", 10, true)).unwrap();
        log.append(answer("fractions", 20, false)).unwrap();

        let fractions: Vec<_> = log.events_for(Some("fractions"), None).collect();
        assert_eq!(fractions.len(), 2);

        let recent: Vec<_> = log.events_for(None, Some(ts(10))).collect();
        assert_eq!(recent.len(), 2);

        let recent_fractions: Vec<_> = log.events_for(Some("fractions"), Some(ts(10))).collect();
        assert_eq!(recent_fractions.len(), 1);
        assert_eq!(recent_fractions[0].timestamp(), ts(20));
    }

    #[test]
    fn events_for_is_restartable() {
        let mut log = InteractionLog::new(learner());
        log.append(answer("fractions", 0, true)).unwrap();

        let first_pass = log.events_for(None, None).count();
        let second_pass = log.events_for(None, None).count();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn from_events_revalidates_order() {
        let events = vec![answer("a", 10, true), answer("a", 0, true)];
        assert!(InteractionLog::from_events(learner(), events).is_err());
    }

    #[test]
    fn session_events_interleave_with_answers() {
        let mut log = InteractionLog::new(learner());
        log.append(
            Interaction::session_boundary(learner(), ts(0), InteractionKind::SessionStart)
                .unwrap(),
        )
        .unwrap();
        log.append(answer("fractions", 5, true)).unwrap();
        log.append(
            Interaction::session_boundary(learner(), ts(10), InteractionKind::SessionEnd)
                .unwrap(),
        )
        .unwrap();
        assert_eq!(log.len(), 3);
    }
}
