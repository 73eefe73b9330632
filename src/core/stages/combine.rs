//! CombineResults: sort everything that arrived and join it.

use super::RESULT_SEPARATOR;
use crate::core::pipeline::{Inbox, ItemKind, Outbox, Stage};

/// Terminal signing stage.
///
/// Emits nothing until its input is closed, then exactly one string: the
/// byte-wise sorted inputs joined with `_`.
#[derive(Debug, Default)]
pub struct CombineResults;

impl CombineResults {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for CombineResults {
    fn name(&self) -> &str {
        "combine_results"
    }

    fn run(&self, input: &Inbox, output: &Outbox) {
        let mut collected = Vec::new();
        for item in input.iter() {
            match item.into_text() {
                Ok(data) => collected.push(data),
                Err(item) => output.reject(&item, ItemKind::Text),
            }
        }

        collected.sort_unstable();
        let result = collected.join(RESULT_SEPARATOR);
        tracing::debug!(items = collected.len(), "combined results");
        output.send(result);
    }
}
