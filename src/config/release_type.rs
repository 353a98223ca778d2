use std::{fmt::Display, str::FromStr};

use crate::{
    error::ReleaseError,
    updater::{
        framework::{Framework, Simple},
        node::Node,
        rust::Rust,
    },
};

/// Supported release types for updating package manifest files
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum ReleaseType {
    #[default]
    Node,
    Rust,
    Simple,
}

impl ReleaseType {
    /// Framework implementing this release type's manifest handling.
    pub fn framework(&self) -> Box<dyn Framework> {
        match self {
            ReleaseType::Node => Box::new(Node),
            ReleaseType::Rust => Box::new(Rust),
            ReleaseType::Simple => Box::new(Simple),
        }
    }
}

impl FromStr for ReleaseType {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "node" => Ok(ReleaseType::Node),
            "rust" => Ok(ReleaseType::Rust),
            "simple" => Ok(ReleaseType::Simple),
            _ => Err(ReleaseError::InvalidReleaseType(s.to_string())),
        }
    }
}

impl Display for ReleaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReleaseType::Node => f.write_str("node"),
            ReleaseType::Rust => f.write_str("rust"),
            ReleaseType::Simple => f.write_str("simple"),
        }
    }
}
