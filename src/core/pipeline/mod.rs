//! # Pipeline Module
//!
//! Runs an ordered list of stages concurrently, wired by rendezvous
//! channels.
//!
//! ## Wiring
//! For `n` stages the executor allocates `n` boundaries. Stage `i` reads
//! boundary `i` and writes boundary `i + 1`; the last stage writes
//! boundary `0`. A boundary is closed when the stage writing it returns.
//!
//! ## Completion
//! The last stage signals a completion channel after it returns. The
//! caller drains that channel and then joins every stage thread, so
//! [`Pipeline::run`] only returns once the whole chain has drained.

mod executor;
mod item;
mod stage;

pub use executor::{execute_pipeline, Pipeline, PipelineBuilder};
pub use item::{Item, ItemKind};
pub use stage::{
    forward_to, from_fn, source, FnStage, ForwardTo, Inbox, Outbox, Passthrough, Source, Stage,
};
