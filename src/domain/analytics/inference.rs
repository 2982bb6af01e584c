//! Learning-style inference from the interaction-kind mix.

use crate::domain::foundation::LearningStyle;
use crate::domain::profile::StyleSuggestion;

use super::AnalyticsSnapshot;

/// Minimum topic-bearing events before inference produces a suggestion.
pub const MIN_EVENTS_FOR_INFERENCE: u32 = 10;

/// Derives an optional style suggestion from how the learner interacts.
///
/// Content-view-heavy histories suggest a visual learner, question-heavy
/// ones a reading learner, answer-heavy ones a kinesthetic learner. The
/// dominant kind's share of all topic-bearing events is the confidence.
/// Suggestions are advisory: the profile applies its own confidence gate and
/// the declared style is never overwritten.
pub fn infer_style(snapshot: &AnalyticsSnapshot) -> Option<StyleSuggestion> {
    let questions = snapshot.questions();
    let answers = snapshot.answers();
    let views = snapshot.content_views();
    let total = questions + answers + views;
    if total < MIN_EVENTS_FOR_INFERENCE {
        return None;
    }

    let (style, dominant) = [
        (LearningStyle::Visual, views),
        (LearningStyle::Reading, questions),
        (LearningStyle::Kinesthetic, answers),
    ]
    .into_iter()
    .max_by_key(|(_, count)| *count)?;

    let confidence = f64::from(dominant) / f64::from(total);
    StyleSuggestion::new(style, confidence).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DifficultyTier, LearnerId, Timestamp};
    use crate::domain::interaction::{Interaction, InteractionKind};

    fn learner() -> LearnerId {
        LearnerId::new("learner-1").unwrap()
    }

    fn events_of(kind: InteractionKind, count: usize) -> Vec<Interaction> {
        (0..count)
            .map(|i| {
                let ts = Timestamp::from_unix(1_700_000_000 + i as i64).unwrap();
                let correctness = kind.is_answer().then_some(true);
                Interaction::new(
                    learner(),
                    ts,
                    "fractions",
                    kind,
                    correctness,
                    DifficultyTier::Beginner,
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn too_few_events_yield_no_suggestion() {
        let events = events_of(InteractionKind::ContentView, 5);
        let snapshot = AnalyticsSnapshot::replay(learner(), &events);
        assert!(infer_style(&snapshot).is_none());
    }

    #[test]
    fn content_view_heavy_history_suggests_visual() {
        let mut events = events_of(InteractionKind::ContentView, 9);
        for event in events_of(InteractionKind::Question, 3) {
            let shifted = Interaction::new(
                learner(),
                event.timestamp().add_seconds(100),
                event.topic(),
                event.kind(),
                None,
                event.difficulty_tier(),
            )
            .unwrap();
            events.push(shifted);
        }
        let snapshot = AnalyticsSnapshot::replay(learner(), &events);

        let suggestion = infer_style(&snapshot).unwrap();
        assert_eq!(suggestion.style(), LearningStyle::Visual);
        assert!((suggestion.confidence() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn answer_heavy_history_suggests_kinesthetic() {
        let events = events_of(InteractionKind::Answer, 12);
        let snapshot = AnalyticsSnapshot::replay(learner(), &events);

        let suggestion = infer_style(&snapshot).unwrap();
        assert_eq!(suggestion.style(), LearningStyle::Kinesthetic);
        assert_eq!(suggestion.confidence(), 1.0);
    }
}
