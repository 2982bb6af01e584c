//! LearnerProfile aggregate root and core value objects.

use std::collections::BTreeSet;

use crate::domain::foundation::{
    DifficultyTier, LearnerId, LearningStyle, Timestamp, ValidationError,
};

use super::ProfilePatch;

/// Profile version for tracking updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProfileVersion(u32);

impl ProfileVersion {
    /// Create initial version (1).
    pub fn initial() -> Self {
        Self(1)
    }

    /// Create from value.
    pub fn from_u32(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            Err(ValidationError::invalid_format(
                "version",
                "must be greater than 0",
            ))
        } else {
            Ok(Self(value))
        }
    }

    /// Increment version.
    pub fn increment(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Get inner value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl Default for ProfileVersion {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for ProfileVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inferred learning style with a confidence score in [0, 1].
///
/// Suggestions sit beside the declared style; they never replace it. Only an
/// explicit patch can change the declared tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSuggestion {
    style: LearningStyle,
    confidence: f64,
}

impl StyleSuggestion {
    /// Creates a suggestion, validating the confidence range.
    pub fn new(style: LearningStyle, confidence: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ValidationError::invalid_format(
                "confidence",
                format!("{} is outside [0, 1]", confidence),
            ));
        }
        Ok(Self { style, confidence })
    }

    pub fn style(&self) -> LearningStyle {
        self.style
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// LearnerProfile aggregate root.
///
/// Created at onboarding and mutated only through [`ProfilePatch`] or a
/// confidence-gated style suggestion. Other components receive read-only
/// views.
#[derive(Debug, Clone, PartialEq)]
pub struct LearnerProfile {
    learner_id: LearnerId,
    learning_style: LearningStyle,
    subjects: BTreeSet<String>,
    difficulty_preference: Option<DifficultyTier>,
    goals: Vec<String>,
    style_suggestion: Option<StyleSuggestion>,
    version: ProfileVersion,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl LearnerProfile {
    /// Creates a profile at onboarding.
    ///
    /// The subject set must be non-empty.
    pub fn new(
        learner_id: LearnerId,
        learning_style: LearningStyle,
        subjects: BTreeSet<String>,
        difficulty_preference: Option<DifficultyTier>,
        goals: Vec<String>,
        timestamp: Timestamp,
    ) -> Result<Self, ValidationError> {
        if subjects.is_empty() || subjects.iter().all(|s| s.trim().is_empty()) {
            return Err(ValidationError::empty_field("subjects"));
        }

        Ok(Self {
            learner_id,
            learning_style,
            subjects,
            difficulty_preference,
            goals,
            style_suggestion: None,
            version: ProfileVersion::initial(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Restores a profile from persisted parts. Used by repository adapters.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        learner_id: LearnerId,
        learning_style: LearningStyle,
        subjects: BTreeSet<String>,
        difficulty_preference: Option<DifficultyTier>,
        goals: Vec<String>,
        style_suggestion: Option<StyleSuggestion>,
        version: ProfileVersion,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        if subjects.is_empty() {
            return Err(ValidationError::empty_field("subjects"));
        }
        Ok(Self {
            learner_id,
            learning_style,
            subjects,
            difficulty_preference,
            goals,
            style_suggestion,
            version,
            created_at,
            updated_at,
        })
    }

    // Getters
    pub fn learner_id(&self) -> &LearnerId {
        &self.learner_id
    }

    pub fn learning_style(&self) -> LearningStyle {
        self.learning_style
    }

    pub fn subjects(&self) -> &BTreeSet<String> {
        &self.subjects
    }

    pub fn difficulty_preference(&self) -> Option<DifficultyTier> {
        self.difficulty_preference
    }

    pub fn goals(&self) -> &[String] {
        &self.goals
    }

    pub fn style_suggestion(&self) -> Option<StyleSuggestion> {
        self.style_suggestion
    }

    pub fn version(&self) -> ProfileVersion {
        self.version
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Checks whether a topic matches one of the declared subjects.
    pub fn declares_subject(&self, topic: &str) -> bool {
        self.subjects
            .iter()
            .any(|s| s.eq_ignore_ascii_case(topic))
    }

    /// Applies an explicit user edit.
    ///
    /// When the patch carries an expected version it must match the current
    /// one, otherwise the patch is rejected and nothing changes. An empty
    /// subject set in the patch is rejected for the same reason a profile
    /// cannot be created without subjects.
    pub fn apply_patch(
        &mut self,
        patch: ProfilePatch,
        timestamp: Timestamp,
    ) -> Result<(), ValidationError> {
        if let Some(expected) = patch.expected_version {
            if expected != self.version.as_u32() {
                return Err(ValidationError::version_conflict(
                    expected,
                    self.version.as_u32(),
                ));
            }
        }
        if let Some(subjects) = &patch.subjects {
            if subjects.is_empty() || subjects.iter().all(|s| s.trim().is_empty()) {
                return Err(ValidationError::empty_field("subjects"));
            }
        }

        if let Some(style) = patch.learning_style {
            self.learning_style = style;
            // An explicit choice supersedes any pending suggestion.
            self.style_suggestion = None;
        }
        if let Some(subjects) = patch.subjects {
            self.subjects = subjects;
        }
        if let Some(preference) = patch.difficulty_preference {
            self.difficulty_preference = Some(preference);
        }
        if let Some(goals) = patch.goals {
            self.goals = goals;
        }

        self.version = self.version.increment();
        self.updated_at = timestamp;
        Ok(())
    }

    /// Records an inferred style suggestion when it clears the confidence
    /// threshold. Returns true when the suggestion was stored.
    ///
    /// The declared style is never overwritten here.
    pub fn record_style_suggestion(
        &mut self,
        suggestion: StyleSuggestion,
        threshold: f64,
        timestamp: Timestamp,
    ) -> bool {
        if suggestion.confidence() < threshold {
            return false;
        }
        if suggestion.style() == self.learning_style {
            // Nothing to suggest: inference agrees with the declared style.
            return false;
        }
        if self.style_suggestion == Some(suggestion) {
            return false;
        }
        self.style_suggestion = Some(suggestion);
        self.version = self.version.increment();
        self.updated_at = timestamp;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_learner_id() -> LearnerId {
        LearnerId::new("learner-1").unwrap()
    }

    fn test_timestamp() -> Timestamp {
        Timestamp::from_unix(1_704_326_400).unwrap()
    }

    fn subjects(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn test_profile() -> LearnerProfile {
        LearnerProfile::new(
            test_learner_id(),
            LearningStyle::Visual,
            subjects(&["algebra", "fractions"]),
            Some(DifficultyTier::Beginner),
            vec!["pass the exam".to_string()],
            test_timestamp(),
        )
        .unwrap()
    }

    #[test]
    fn new_profile_requires_subjects() {
        let result = LearnerProfile::new(
            test_learner_id(),
            LearningStyle::Visual,
            BTreeSet::new(),
            None,
            vec![],
            test_timestamp(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_profile_starts_at_version_one() {
        let profile = test_profile();
        assert_eq!(profile.version().as_u32(), 1);
        assert_eq!(profile.learning_style(), LearningStyle::Visual);
        assert!(profile.style_suggestion().is_none());
    }

    #[test]
    fn declares_subject_is_case_insensitive() {
        let profile = test_profile();
        assert!(profile.declares_subject("Algebra"));
        assert!(!profile.declares_subject("history"));
    }

    #[test]
    fn patch_bumps_version_and_timestamp() {
        let mut profile = test_profile();
        let later = test_timestamp().add_seconds(3600);

        let patch = ProfilePatch {
            learning_style: Some(LearningStyle::Reading),
            ..Default::default()
        };
        profile.apply_patch(patch, later).unwrap();

        assert_eq!(profile.learning_style(), LearningStyle::Reading);
        assert_eq!(profile.version().as_u32(), 2);
        assert_eq!(profile.updated_at(), later);
    }

    #[test]
    fn patch_with_stale_version_is_rejected() {
        let mut profile = test_profile();
        let patch = ProfilePatch {
            expected_version: Some(7),
            learning_style: Some(LearningStyle::Auditory),
            ..Default::default()
        };

        let result = profile.apply_patch(patch, test_timestamp());
        assert!(matches!(
            result,
            Err(ValidationError::VersionConflict { expected: 7, actual: 1 })
        ));
        // Rejected patch changed nothing.
        assert_eq!(profile.learning_style(), LearningStyle::Visual);
        assert_eq!(profile.version().as_u32(), 1);
    }

    #[test]
    fn patch_cannot_empty_the_subject_set() {
        let mut profile = test_profile();
        let patch = ProfilePatch {
            subjects: Some(BTreeSet::new()),
            ..Default::default()
        };
        assert!(profile.apply_patch(patch, test_timestamp()).is_err());
        assert_eq!(profile.subjects().len(), 2);
    }

    #[test]
    fn suggestion_below_threshold_is_discarded() {
        let mut profile = test_profile();
        let suggestion = StyleSuggestion::new(LearningStyle::Kinesthetic, 0.4).unwrap();

        let stored = profile.record_style_suggestion(suggestion, 0.7, test_timestamp());

        assert!(!stored);
        assert!(profile.style_suggestion().is_none());
        assert_eq!(profile.version().as_u32(), 1);
    }

    #[test]
    fn suggestion_above_threshold_never_touches_declared_style() {
        let mut profile = test_profile();
        let suggestion = StyleSuggestion::new(LearningStyle::Kinesthetic, 0.9).unwrap();

        let stored = profile.record_style_suggestion(suggestion, 0.7, test_timestamp());

        assert!(stored);
        assert_eq!(profile.learning_style(), LearningStyle::Visual);
        assert_eq!(
            profile.style_suggestion().map(|s| s.style()),
            Some(LearningStyle::Kinesthetic)
        );
    }

    #[test]
    fn explicit_style_patch_clears_suggestion() {
        let mut profile = test_profile();
        let suggestion = StyleSuggestion::new(LearningStyle::Kinesthetic, 0.9).unwrap();
        profile.record_style_suggestion(suggestion, 0.7, test_timestamp());

        let patch = ProfilePatch {
            learning_style: Some(LearningStyle::Kinesthetic),
            ..Default::default()
        };
        profile.apply_patch(patch, test_timestamp()).unwrap();

        assert_eq!(profile.learning_style(), LearningStyle::Kinesthetic);
        assert!(profile.style_suggestion().is_none());
    }

    #[test]
    fn suggestion_confidence_must_be_in_range() {
        assert!(StyleSuggestion::new(LearningStyle::Visual, 1.5).is_err());
        assert!(StyleSuggestion::new(LearningStyle::Visual, -0.1).is_err());
    }
}
