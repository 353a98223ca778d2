//! Common functionality shared between release commands
use log::*;
use std::fmt::Display;

/// Whether a checkpoint reports forward progress or a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointType {
    Success,
    Failure,
}

/// Log a decision point of the release workflow.
pub fn checkpoint(message: impl Display, kind: CheckpointType) {
    match kind {
        CheckpointType::Success => info!("✔ {message}"),
        CheckpointType::Failure => warn!("✖ {message}"),
    }
}
