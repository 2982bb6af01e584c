//! LearnPulse binary: wires the filesystem adapters to the engine and runs a
//! short demonstration sequence against the configured data directory.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use learnpulse::adapters::filesystem::{
    FsDifficultyStateRepository, FsInteractionStore, FsProfileRepository,
};
use learnpulse::application::{EngineError, LearningEngine};
use learnpulse::config::AppConfig;
use learnpulse::domain::foundation::{LearnerId, LearningStyle, Timestamp};
use learnpulse::domain::interaction::Interaction;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(data_dir = %config.storage.data_dir, "starting learnpulse");

    let engine = LearningEngine::new(
        Arc::new(FsProfileRepository::new(&config.storage.data_dir)),
        Arc::new(FsInteractionStore::new(&config.storage.data_dir)),
        Arc::new(FsDifficultyStateRepository::new(&config.storage.data_dir)),
        config.engine.clone(),
    );

    run_demo(&engine).await?;
    Ok(())
}

async fn run_demo(engine: &LearningEngine) -> Result<(), EngineError> {
    let learner_id = LearnerId::new("demo-learner")?;

    let profile = match engine.get_profile(&learner_id).await {
        Ok(profile) => profile,
        Err(EngineError::ProfileNotFound(_)) => {
            let subjects: BTreeSet<String> =
                ["fractions", "algebra"].iter().map(|s| s.to_string()).collect();
            engine
                .create_profile(
                    learner_id.clone(),
                    LearningStyle::Visual,
                    subjects,
                    None,
                    vec!["master fractions".to_string()],
                )
                .await?
        }
        Err(e) => return Err(e),
    };
    info!(version = %profile.version(), "profile ready");

    let tier = engine.get_next_difficulty(&learner_id, "fractions").await?;
    let event = Interaction::answer(
        learner_id.clone(),
        Timestamp::now(),
        "fractions",
        true,
        tier,
    )?;
    let change = engine.record_interaction(event).await?;
    info!(?change, "answer recorded");

    let snapshot = engine.get_snapshot(&learner_id).await?;
    info!(
        events = snapshot.event_count(),
        streak = snapshot.streak(),
        "analytics snapshot"
    );

    let next = engine.get_next_difficulty(&learner_id, "fractions").await?;
    info!(%next, "next difficulty for fractions");

    for rec in engine.get_recommendations(&learner_id, 3).await? {
        info!(topic = %rec.topic, score = rec.score, reason = %rec.reason, "recommendation");
    }

    let export = engine.export_log(&learner_id).await?;
    info!(checksum = %export.checksum, "log exported");
    Ok(())
}
