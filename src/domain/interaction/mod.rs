//! Immutable learning events and the append-only interaction log.

mod event;
mod log;

pub use event::{Interaction, InteractionKind};
pub use log::InteractionLog;
