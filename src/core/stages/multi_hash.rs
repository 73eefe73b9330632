//! MultiHash: six indexed crc32 rounds per string, joined in round order.

use super::{join_all, trace};
use crate::core::pipeline::{Inbox, ItemKind, Outbox, Stage};
use crate::core::signer::DataSigner;
use crate::events::SignStep;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

/// Number of indexed rounds per item
pub const MULTI_HASH_ROUNDS: usize = 6;

/// Second signing stage.
///
/// Round `i` computes `crc32(i + data)`. Rounds of one item run
/// concurrently and write into a slot array indexed by round, so the
/// joined result never depends on which round finished first.
pub struct MultiHash {
    signer: Arc<dyn DataSigner>,
}

impl MultiHash {
    pub fn new(signer: Arc<dyn DataSigner>) -> Self {
        Self { signer }
    }

    fn hash_rounds(&self, data: &str, output: &Outbox) -> String {
        let slots: Mutex<[String; MULTI_HASH_ROUNDS]> = Mutex::new(Default::default());

        thread::scope(|scope| {
            let handles: Vec<_> = (0..MULTI_HASH_ROUNDS)
                .map(|round| {
                    let slots = &slots;
                    scope.spawn(move || {
                        let hash = self.signer.crc32(&format!("{round}{data}"));
                        trace(output, data, SignStep::Round(round), &hash);
                        slots.lock().unwrap_or_else(PoisonError::into_inner)[round] = hash;
                    })
                })
                .collect();
            join_all(handles);
        });

        let result = slots
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .concat();
        trace(output, data, SignStep::Result, &result);
        result
    }
}

impl Stage for MultiHash {
    fn name(&self) -> &str {
        "multi_hash"
    }

    fn run(&self, input: &Inbox, output: &Outbox) {
        thread::scope(|scope| {
            for item in input.iter() {
                let data = match item.into_text() {
                    Ok(data) => data,
                    Err(item) => {
                        output.reject(&item, ItemKind::Text);
                        continue;
                    }
                };

                scope.spawn(move || {
                    let result = self.hash_rounds(&data, output);
                    output.send(result);
                });
            }
        });
    }
}
