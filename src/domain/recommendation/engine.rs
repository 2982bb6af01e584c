//! Recommendation scoring.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::domain::analytics::AnalyticsSnapshot;
use crate::domain::foundation::Timestamp;
use crate::domain::profile::LearnerProfile;

/// Weakness term used for topics with zero attempts: midpoint, so untried
/// topics rank between mastered and struggling ones.
const NEUTRAL_WEAKNESS: f64 = 0.5;

/// Named scoring weights, each independently tunable.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RecommendationWeights {
    /// Weight on (1 - accuracy): prioritize weak topics.
    #[serde(default = "default_weight_weakness")]
    pub weight_weakness: f64,
    /// Weight on normalized recency: topics not touched recently score higher.
    #[serde(default = "default_weight_recency")]
    pub weight_recency: f64,
    /// Bonus weight when the topic matches a declared subject.
    #[serde(default = "default_weight_affinity")]
    pub weight_affinity: f64,
}

fn default_weight_weakness() -> f64 {
    0.5
}

fn default_weight_recency() -> f64 {
    0.3
}

fn default_weight_affinity() -> f64 {
    0.2
}

impl Default for RecommendationWeights {
    fn default() -> Self {
        Self {
            weight_weakness: default_weight_weakness(),
            weight_recency: default_weight_recency(),
            weight_affinity: default_weight_affinity(),
        }
    }
}

/// A ranked suggestion. Ephemeral: recomputed per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub topic: String,
    pub reason: String,
    pub score: f64,
}

/// Ranks candidate topics for a learner.
///
/// A pure function of snapshot + profile: identical inputs always produce an
/// identical ordered list. Candidates are the union of topics seen in the
/// log and the profile's declared subjects.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    weights: RecommendationWeights,
}

impl RecommendationEngine {
    pub fn new(weights: RecommendationWeights) -> Self {
        Self { weights }
    }

    /// Produces up to `k` recommendations, highest score first; equal scores
    /// order lexically by topic.
    pub fn recommend(
        &self,
        profile: &LearnerProfile,
        snapshot: &AnalyticsSnapshot,
        k: usize,
    ) -> Vec<Recommendation> {
        let candidates: BTreeSet<&str> = snapshot
            .topics()
            .keys()
            .map(String::as_str)
            .chain(profile.subjects().iter().map(String::as_str))
            .collect();

        let oldest_seen = snapshot
            .topics()
            .values()
            .filter_map(|stats| stats.last_seen)
            .min();

        let mut ranked: Vec<Recommendation> = candidates
            .into_iter()
            .map(|topic| self.score_topic(topic, profile, snapshot, oldest_seen))
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.topic.cmp(&b.topic))
        });
        ranked.truncate(k);
        ranked
    }

    fn score_topic(
        &self,
        topic: &str,
        profile: &LearnerProfile,
        snapshot: &AnalyticsSnapshot,
        oldest_seen: Option<Timestamp>,
    ) -> Recommendation {
        let stats = snapshot.topic(topic);
        let accuracy = stats.and_then(|s| s.accuracy());

        let weakness = accuracy.map_or(NEUTRAL_WEAKNESS, |a| 1.0 - a);
        let recency = recency_norm(
            stats.and_then(|s| s.last_seen),
            oldest_seen,
            snapshot.as_of(),
        );
        let affinity = if profile.declares_subject(topic) {
            1.0
        } else {
            0.0
        };

        let weakness_part = self.weights.weight_weakness * weakness;
        let recency_part = self.weights.weight_recency * recency;
        let affinity_part = self.weights.weight_affinity * affinity;

        let reason = if stats.map_or(true, |s| s.attempts == 0) {
            "not yet attempted".to_string()
        } else if weakness_part >= recency_part && weakness_part >= affinity_part {
            match accuracy {
                Some(a) => format!("weak topic (accuracy {:.0}%)", a * 100.0),
                None => "weak topic".to_string(),
            }
        } else if recency_part >= affinity_part {
            "not practiced recently".to_string()
        } else {
            "declared subject".to_string()
        };

        Recommendation {
            topic: topic.to_string(),
            reason,
            score: weakness_part + recency_part + affinity_part,
        }
    }
}

/// Normalized staleness in [0, 1] against the snapshot's own clock.
///
/// Untouched topics score 1.0. When every touched topic was seen at the same
/// instant there is no spread to normalize over and touched topics score 0.
fn recency_norm(
    last_seen: Option<Timestamp>,
    oldest_seen: Option<Timestamp>,
    as_of: Option<Timestamp>,
) -> f64 {
    let (Some(last), Some(oldest), Some(now)) = (last_seen, oldest_seen, as_of) else {
        return 1.0;
    };
    let span = now.duration_since(&oldest).num_seconds();
    if span <= 0 {
        return 0.0;
    }
    let age = now.duration_since(&last).num_seconds().max(0);
    (age as f64 / span as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DifficultyTier, LearnerId, LearningStyle};
    use crate::domain::interaction::Interaction;

    fn learner() -> LearnerId {
        LearnerId::new("learner-1").unwrap()
    }

    fn ts(offset: i64) -> Timestamp {
        Timestamp::from_unix(1_700_000_000 + offset).unwrap()
    }

    fn profile_with(subjects: &[&str]) -> LearnerProfile {
        LearnerProfile::new(
            learner(),
            LearningStyle::Visual,
            subjects.iter().map(|s| s.to_string()).collect(),
            None,
            vec![],
            ts(0),
        )
        .unwrap()
    }

    fn answer(topic: &str, offset: i64, correct: bool) -> Interaction {
        Interaction::answer(learner(), ts(offset), topic, correct, DifficultyTier::Beginner)
            .unwrap()
    }

    #[test]
    fn weak_topics_outrank_mastered_ones() {
        let profile = profile_with(&["algebra", "fractions"]);
        let events = vec![
            answer("fractions", 0, true),
            answer("fractions", 10, true),
            answer("algebra", 20, false),
            answer("algebra", 30, false),
        ];
        let snapshot = AnalyticsSnapshot::replay(learner(), &events);

        let engine = RecommendationEngine::default();
        let recs = engine.recommend(&profile, &snapshot, 10);

        let algebra_pos = recs.iter().position(|r| r.topic == "algebra").unwrap();
        let fractions_pos = recs.iter().position(|r| r.topic == "fractions").unwrap();
        assert!(algebra_pos < fractions_pos);
        assert!(recs[algebra_pos].reason.contains("weak topic"));
    }

    #[test]
    fn untried_declared_subjects_are_included_with_neutral_score() {
        let profile = profile_with(&["geometry"]);
        let events = vec![answer("fractions", 0, true)];
        let snapshot = AnalyticsSnapshot::replay(learner(), &events);

        let engine = RecommendationEngine::default();
        let recs = engine.recommend(&profile, &snapshot, 10);

        let geometry = recs.iter().find(|r| r.topic == "geometry").unwrap();
        assert_eq!(geometry.reason, "not yet attempted");
        // neutral weakness 0.5, untouched recency 1.0, affinity 1.0
        let expected = 0.5 * 0.5 + 0.3 * 1.0 + 0.2 * 1.0;
        assert!((geometry.score - expected).abs() < 1e-9);
    }

    #[test]
    fn recommend_is_deterministic() {
        let profile = profile_with(&["algebra", "fractions", "geometry"]);
        let events = vec![
            answer("fractions", 0, true),
            answer("algebra", 10, false),
        ];
        let snapshot = AnalyticsSnapshot::replay(learner(), &events);
        let engine = RecommendationEngine::default();

        let first = engine.recommend(&profile, &snapshot, 5);
        let second = engine.recommend(&profile, &snapshot, 5);
        assert_eq!(first, second);
    }

    #[test]
    fn equal_scores_order_lexically() {
        // Two untouched declared subjects score identically.
        let profile = profile_with(&["zoology", "botany"]);
        let snapshot = AnalyticsSnapshot::empty(learner());

        let engine = RecommendationEngine::default();
        let recs = engine.recommend(&profile, &snapshot, 10);

        assert_eq!(recs.len(), 2);
        assert!((recs[0].score - recs[1].score).abs() < 1e-12);
        assert_eq!(recs[0].topic, "botany");
        assert_eq!(recs[1].topic, "zoology");
    }

    #[test]
    fn k_limits_the_result_length() {
        let profile = profile_with(&["a", "b", "c", "d"]);
        let snapshot = AnalyticsSnapshot::empty(learner());

        let engine = RecommendationEngine::default();
        assert_eq!(engine.recommend(&profile, &snapshot, 2).len(), 2);
        assert_eq!(engine.recommend(&profile, &snapshot, 0).len(), 0);
    }

    #[test]
    fn stale_topics_outrank_fresh_ones_all_else_equal() {
        let profile = profile_with(&["old", "new"]);
        let events = vec![
            answer("old", 0, true),
            answer("new", 1000, true),
        ];
        let snapshot = AnalyticsSnapshot::replay(learner(), &events);

        let engine = RecommendationEngine::default();
        let recs = engine.recommend(&profile, &snapshot, 10);

        let old_pos = recs.iter().position(|r| r.topic == "old").unwrap();
        let new_pos = recs.iter().position(|r| r.topic == "new").unwrap();
        assert!(old_pos < new_pos);
    }

    #[test]
    fn zero_attempts_never_divide_by_zero() {
        let profile = profile_with(&["fresh"]);
        let snapshot = AnalyticsSnapshot::empty(learner());

        let engine = RecommendationEngine::default();
        let recs = engine.recommend(&profile, &snapshot, 10);
        assert!(recs[0].score.is_finite());
    }
}
