//! Status enums for backend records.

use serde::{Deserialize, Serialize};

/// Order processing status.
///
/// Maps to the lifecycle reported by the orders service. Values the service
/// adds later deserialize as [`OrderStatus::Unknown`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    New,
    Received,
    Processing,
    Complete,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Received => write!(f, "received"),
            Self::Processing => write!(f, "processing"),
            Self::Complete => write!(f, "complete"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
