//! Publish orchestration.

mod orchestrator;
mod stage;

pub use orchestrator::{PublishOutcome, Publisher};
pub use stage::Stage;
