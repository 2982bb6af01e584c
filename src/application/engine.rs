//! LearningEngine - the facade over domain logic and persistence ports.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::config::{EngineConfig, RetryConfig};
use crate::domain::analytics::{infer_style, AnalyticsSnapshot};
use crate::domain::assessment::{DifficultyController, DifficultyState, TierChange};
use crate::domain::foundation::{DifficultyTier, LearnerId, LearningStyle, Timestamp};
use crate::domain::interaction::{Interaction, InteractionLog};
use crate::domain::profile::{LearnerProfile, ProfilePatch, StyleSuggestion};
use crate::domain::recommendation::{Recommendation, RecommendationEngine};
use crate::ports::{
    DifficultyStateRepository, InteractionStore, LogExport, PersistenceError, ProfileRepository,
};

use super::EngineError;

/// In-memory working state for one learner.
///
/// Guarded by a per-learner mutex, so appends, snapshot reads, difficulty
/// decisions and profile writes for the same learner are serialized while
/// different learners proceed in parallel.
struct LearnerCell {
    log: InteractionLog,
    snapshot: AnalyticsSnapshot,
    difficulty: HashMap<String, DifficultyState>,
}

/// Core API surface of the personalization engine.
///
/// Every mutation validates synchronously and persists with bounded backoff
/// before committing to the in-memory cell; a failed operation leaves the
/// in-memory state exactly as it was. The durable event append is the single
/// commit point for `record_interaction`, and all profile read-modify-write
/// goes through the per-learner lock so concurrent writers cannot clobber
/// each other.
pub struct LearningEngine {
    profiles: Arc<dyn ProfileRepository>,
    interactions: Arc<dyn InteractionStore>,
    difficulty_states: Arc<dyn DifficultyStateRepository>,
    controller: DifficultyController,
    recommender: RecommendationEngine,
    retry: RetryConfig,
    style_confidence_threshold: f64,
    cells: Mutex<HashMap<LearnerId, Arc<Mutex<LearnerCell>>>>,
}

impl LearningEngine {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        interactions: Arc<dyn InteractionStore>,
        difficulty_states: Arc<dyn DifficultyStateRepository>,
        config: EngineConfig,
    ) -> Self {
        Self {
            profiles,
            interactions,
            difficulty_states,
            controller: DifficultyController::new(config.difficulty),
            recommender: RecommendationEngine::new(config.recommendation),
            retry: config.retry,
            style_confidence_threshold: config.style_confidence_threshold,
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Records one interaction event.
    ///
    /// The event is validated against the learner's log, appended durably,
    /// and folded into the analytics snapshot. A graded answer also advances
    /// the per-topic difficulty state; the returned [`TierChange`] reports
    /// any promotion or demotion it caused.
    #[instrument(skip(self, event), fields(learner = %event.learner_id(), kind = ?event.kind()))]
    pub async fn record_interaction(&self, event: Interaction) -> Result<TierChange, EngineError> {
        let cell = self.cell(event.learner_id()).await?;
        let mut cell = cell.lock().await;

        // Validate first; a rejected event has no effect anywhere.
        cell.log.validate_append(&event)?;

        // Compute the difficulty outcome on a copy. Nothing in the cell
        // changes until the durable append has succeeded.
        let mut change = TierChange::Unchanged;
        let mut updated_state = None;
        if let Some(correct) = event.correctness() {
            let mut state = match cell.difficulty.get(event.topic()) {
                Some(state) => state.clone(),
                None => {
                    let tier = self.initial_tier(event.learner_id()).await?;
                    DifficultyState::initial(event.learner_id().clone(), event.topic(), tier)
                }
            };
            change = self.controller.on_answer(&mut state, correct);
            updated_state = Some(state);
        }

        // The append is the single commit point: it either lands the event
        // durably or the whole operation fails with no effect anywhere.
        self.with_retry("append interaction", || self.interactions.append(&event))
            .await?;

        // Commit. The append was validated above and cannot fail here.
        let timestamp = event.timestamp();
        cell.snapshot.apply(&event);
        cell.log.append(event)?;
        if let Some(state) = updated_state {
            // The event is already committed, so a failed state write must
            // not surface: the saved record is a full overwrite and the next
            // answer on this topic re-persists it.
            if let Err(e) = self
                .with_retry("save difficulty state", || {
                    self.difficulty_states.save(&state)
                })
                .await
            {
                warn!(error = %e, topic = state.topic(), "difficulty state not persisted");
            }
            cell.difficulty.insert(state.topic().to_string(), state);
        }

        if let TierChange::Promoted(tier) | TierChange::Demoted(tier) = change {
            debug!(%tier, "difficulty tier changed");
        }

        // Opportunistic style inference. Advisory only: a persistence
        // failure here must not fail the recorded interaction.
        if let Some(suggestion) = infer_style(&cell.snapshot) {
            let learner_id = cell.snapshot.learner_id().clone();
            if let Err(e) = self
                .store_suggestion(&learner_id, suggestion, timestamp)
                .await
            {
                warn!(error = %e, "could not store style suggestion");
            }
        }

        Ok(change)
    }

    /// Current analytics snapshot for a learner.
    ///
    /// Always answerable from memory once the cell is warm, so analytics
    /// stay available even when the store is down.
    pub async fn get_snapshot(&self, learner_id: &LearnerId) -> Result<AnalyticsSnapshot, EngineError> {
        let cell = self.cell(learner_id).await?;
        let cell = cell.lock().await;
        Ok(cell.snapshot.clone())
    }

    /// Difficulty tier for the learner's next question on a topic.
    ///
    /// A topic without history starts at the profile's declared preference,
    /// or beginner; absence of state or profile is never an error.
    pub async fn get_next_difficulty(
        &self,
        learner_id: &LearnerId,
        topic: &str,
    ) -> Result<DifficultyTier, EngineError> {
        let cell = self.cell(learner_id).await?;
        let cell = cell.lock().await;
        if let Some(state) = cell.difficulty.get(topic) {
            return Ok(state.tier());
        }
        drop(cell);
        self.initial_tier(learner_id).await
    }

    /// Up to `k` ranked recommendations for a learner.
    pub async fn get_recommendations(
        &self,
        learner_id: &LearnerId,
        k: usize,
    ) -> Result<Vec<Recommendation>, EngineError> {
        let profile = self.require_profile(learner_id).await?;
        let snapshot = self.get_snapshot(learner_id).await?;
        Ok(self.recommender.recommend(&profile, &snapshot, k))
    }

    /// Creates a profile at onboarding.
    #[instrument(skip_all, fields(learner = %learner_id))]
    pub async fn create_profile(
        &self,
        learner_id: LearnerId,
        learning_style: LearningStyle,
        subjects: std::collections::BTreeSet<String>,
        difficulty_preference: Option<DifficultyTier>,
        goals: Vec<String>,
    ) -> Result<LearnerProfile, EngineError> {
        let cell = self.cell(&learner_id).await?;
        let _guard = cell.lock().await;
        let profile = LearnerProfile::new(
            learner_id,
            learning_style,
            subjects,
            difficulty_preference,
            goals,
            Timestamp::now(),
        )?;
        self.with_retry("save profile", || self.profiles.save(&profile))
            .await?;
        Ok(profile)
    }

    pub async fn get_profile(&self, learner_id: &LearnerId) -> Result<LearnerProfile, EngineError> {
        self.require_profile(learner_id).await
    }

    /// Applies an explicit profile edit and persists the new version.
    ///
    /// The read-modify-write runs under the learner's cell lock, so a patch
    /// and a concurrently stored style suggestion serialize instead of
    /// overwriting each other.
    #[instrument(skip(self, patch), fields(learner = %learner_id))]
    pub async fn update_profile(
        &self,
        learner_id: &LearnerId,
        patch: ProfilePatch,
    ) -> Result<LearnerProfile, EngineError> {
        let cell = self.cell(learner_id).await?;
        let _guard = cell.lock().await;
        let mut profile = self.require_profile(learner_id).await?;
        profile.apply_patch(patch, Timestamp::now())?;
        self.with_retry("save profile", || self.profiles.save(&profile))
            .await?;
        Ok(profile)
    }

    /// Deletes a profile. Idempotent; interaction history is kept.
    pub async fn delete_profile(&self, learner_id: &LearnerId) -> Result<(), EngineError> {
        let cell = self.cell(learner_id).await?;
        let _guard = cell.lock().await;
        self.with_retry("delete profile", || self.profiles.delete(learner_id))
            .await?;
        Ok(())
    }

    /// Re-runs style inference against the current snapshot and persists the
    /// suggestion when it clears the confidence gate. Returns the suggestion
    /// now stored on the profile, if any.
    pub async fn refresh_style_suggestion(
        &self,
        learner_id: &LearnerId,
    ) -> Result<Option<StyleSuggestion>, EngineError> {
        let cell = self.cell(learner_id).await?;
        let cell = cell.lock().await;
        if let Some(suggestion) = infer_style(&cell.snapshot) {
            let as_of = cell.snapshot.as_of().unwrap_or_else(Timestamp::now);
            self.store_suggestion(learner_id, suggestion, as_of).await?;
        }
        Ok(self.require_profile(learner_id).await?.style_suggestion())
    }

    /// Events for a learner, optionally filtered by topic and a lower
    /// timestamp bound.
    pub async fn get_events(
        &self,
        learner_id: &LearnerId,
        topic: Option<&str>,
        since: Option<Timestamp>,
    ) -> Result<Vec<Interaction>, EngineError> {
        let cell = self.cell(learner_id).await?;
        let cell = cell.lock().await;
        Ok(cell.log.events_for(topic, since).cloned().collect())
    }

    /// Exports the learner's raw log with an integrity checksum.
    pub async fn export_log(&self, learner_id: &LearnerId) -> Result<LogExport, EngineError> {
        Ok(self.interactions.export(learner_id).await?)
    }

    async fn require_profile(&self, learner_id: &LearnerId) -> Result<LearnerProfile, EngineError> {
        self.profiles
            .find(learner_id)
            .await?
            .ok_or_else(|| EngineError::ProfileNotFound(learner_id.clone()))
    }

    async fn initial_tier(&self, learner_id: &LearnerId) -> Result<DifficultyTier, EngineError> {
        let preference = self
            .profiles
            .find(learner_id)
            .await?
            .and_then(|p| p.difficulty_preference());
        Ok(preference.unwrap_or_default())
    }

    /// Caller must hold the learner's cell lock; the find-modify-save below
    /// relies on it for exclusivity.
    async fn store_suggestion(
        &self,
        learner_id: &LearnerId,
        suggestion: StyleSuggestion,
        timestamp: Timestamp,
    ) -> Result<(), EngineError> {
        let Some(mut profile) = self.profiles.find(learner_id).await? else {
            return Ok(());
        };
        if profile.record_style_suggestion(suggestion, self.style_confidence_threshold, timestamp) {
            self.with_retry("save profile", || self.profiles.save(&profile))
                .await?;
            debug!(style = %suggestion.style(), confidence = suggestion.confidence(),
                "style suggestion stored");
        }
        Ok(())
    }

    /// Returns the learner's cell, loading and replaying persisted state on
    /// first access.
    async fn cell(&self, learner_id: &LearnerId) -> Result<Arc<Mutex<LearnerCell>>, EngineError> {
        if let Some(cell) = self.cells.lock().await.get(learner_id) {
            return Ok(Arc::clone(cell));
        }
        // Load outside the map lock; a concurrent loader may win the insert,
        // in which case both built the same state from the same store.
        let loaded = self.load_cell(learner_id).await?;
        let mut cells = self.cells.lock().await;
        let cell = cells
            .entry(learner_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(loaded)));
        Ok(Arc::clone(cell))
    }

    async fn load_cell(&self, learner_id: &LearnerId) -> Result<LearnerCell, EngineError> {
        let events = self.interactions.load_for(learner_id).await?;
        let log = InteractionLog::from_events(learner_id.clone(), events)?;
        let snapshot = AnalyticsSnapshot::replay(learner_id.clone(), log.events());
        let difficulty = self
            .difficulty_states
            .list_for(learner_id)
            .await?
            .into_iter()
            .map(|state| (state.topic().to_string(), state))
            .collect();
        debug!(learner = %learner_id, events = log.len(), "cold-started learner cell");
        Ok(LearnerCell {
            log,
            snapshot,
            difficulty,
        })
    }

    async fn with_retry<T, F, Fut>(&self, what: &'static str, op: F) -> Result<T, PersistenceError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, PersistenceError>>,
    {
        let mut attempt: u32 = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.retry.max_attempts => {
                    let delay = Duration::from_millis(
                        self.retry
                            .base_delay_ms
                            .saturating_mul(2u64.saturating_pow(attempt - 1)),
                    );
                    warn!(error = %e, attempt, what, "persistence write failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
