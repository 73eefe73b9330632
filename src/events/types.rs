//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All events emitted by a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Run-level events
    Pipeline(PipelineEvent),
    /// Per-stage lifecycle events
    Stage(StageEvent),
    /// Intermediate hash values computed by the signing stages
    Sign(SignEvent),
}

/// Run-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// All stages are about to be launched
    Started { run_id: Uuid, stages: usize },
    /// Every stage returned and the completion channel closed
    Completed { summary: PipelineSummary },
}

/// Per-stage lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageEvent {
    /// The stage thread is running
    Started { index: usize, name: String },
    /// The stage returned and its output boundary was closed
    Finished { index: usize, name: String },
    /// An item was skipped but the stage keeps running
    ItemDropped { name: String, reason: String },
}

/// A single intermediate value of the signing stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SignEvent {
    Step {
        stage: String,
        data: String,
        step: SignStep,
        value: String,
    },
}

/// Which intermediate value a [`SignEvent`] carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignStep {
    /// The decimal rendering of the input
    Data,
    /// md5(data)
    Md5,
    /// crc32(data)
    Crc32,
    /// crc32(md5(data))
    Crc32Md5,
    /// crc32(round + data)
    Round(usize),
    /// The value the stage emits downstream
    Result,
}

/// Summary of a finished pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Identifier of the run
    pub run_id: Uuid,
    /// Number of stages wired together
    pub stages: usize,
    /// Items skipped by stages because of their kind
    pub dropped_items: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for SignStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignStep::Data => write!(f, "data"),
            SignStep::Md5 => write!(f, "md5(data)"),
            SignStep::Crc32 => write!(f, "crc32(data)"),
            SignStep::Crc32Md5 => write!(f, "crc32(md5(data))"),
            SignStep::Round(round) => write!(f, "crc32(th+data) {round}"),
            SignStep::Result => write!(f, "result"),
        }
    }
}
