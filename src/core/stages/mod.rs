//! # Stages Module
//!
//! The three signing stages and the pipeline that chains them.
//!
//! ## Flow
//! 1. **SingleHash** - `int -> crc32(data)~crc32(md5(data))`
//! 2. **MultiHash** - `string -> crc32(0+s)..crc32(5+s)` concatenated
//! 3. **CombineResults** - sort all strings, join with `_`
//!
//! ## Example
//! ```rust,ignore
//! use signer_pipeline::core::signer::StandardSigner;
//! use signer_pipeline::core::stages::sign_values;
//! use signer_pipeline::events::null_sender;
//! use std::sync::Arc;
//!
//! let signature = sign_values(&[0, 1], Arc::new(StandardSigner::new()), &null_sender());
//! println!("{}", signature.result);
//! ```

mod combine;
mod multi_hash;
mod single_hash;

pub use combine::CombineResults;
pub use multi_hash::{MultiHash, MULTI_HASH_ROUNDS};
pub use single_hash::SingleHash;

use crate::core::pipeline::{forward_to, source, Outbox, Pipeline, Stage};
use crate::core::signer::DataSigner;
use crate::events::{Event, EventSender, PipelineSummary, SignEvent, SignStep};
use crossbeam_channel::unbounded;
use std::sync::Arc;
use std::thread::ScopedJoinHandle;

/// Joins the two halves of a SingleHash result
pub const HASH_SEPARATOR: &str = "~";

/// Joins the sorted inputs of CombineResults
pub const RESULT_SEPARATOR: &str = "_";

/// Result of signing a list of values
#[derive(Debug, Clone)]
pub struct Signature {
    /// The combined signature string
    pub result: String,
    /// Summary of the pipeline run that produced it
    pub summary: PipelineSummary,
}

/// SingleHash, MultiHash and CombineResults sharing one signer
pub fn signing_stages(signer: Arc<dyn DataSigner>) -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(SingleHash::new(Arc::clone(&signer))),
        Box::new(MultiHash::new(signer)),
        Box::new(CombineResults::new()),
    ]
}

/// Sign `values` with a full source -> signing stages -> sink pipeline
pub fn sign_values(
    values: &[i64],
    signer: Arc<dyn DataSigner>,
    events: &EventSender,
) -> Signature {
    let (sender, receiver) = unbounded();

    let mut builder = Pipeline::builder().stage(source(values.iter().copied()));
    for stage in signing_stages(signer) {
        builder = builder.boxed_stage(stage);
    }
    let pipeline = builder.stage(forward_to(sender)).build();

    let summary = pipeline.run_with_events(events);
    let result = receiver
        .try_iter()
        .find_map(|item| item.into_text().ok())
        .unwrap_or_default();

    Signature { result, summary }
}

/// Log an intermediate hash and report it as an event
fn trace(output: &Outbox, data: &str, step: SignStep, value: &str) {
    tracing::debug!(stage = output.stage_name(), %step, data, value, "sign step");
    output.events().send(Event::Sign(SignEvent::Step {
        stage: output.stage_name().to_string(),
        data: data.to_string(),
        step,
        value: value.to_string(),
    }));
}

/// Join a scoped worker, re-raising its panic on this thread
fn join<T>(handle: ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

fn join_all<T>(handles: Vec<ScopedJoinHandle<'_, T>>) -> Vec<T> {
    handles.into_iter().map(join).collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::pipeline::{forward_to, source, Item, Pipeline, Stage};
    use crate::core::signer::DataSigner;
    use crossbeam_channel::unbounded;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::{Duration, Instant};

    /// Holds every crc32 call until `expected` calls have started, or
    /// until a deadline when they never overlap, and records the peak
    /// number of calls in flight.
    pub struct Overlap {
        expected: usize,
        started: AtomicUsize,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl Overlap {
        const DEADLINE: Duration = Duration::from_secs(2);

        pub fn new(expected: usize) -> Self {
            Self {
                expected,
                started: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }

        pub fn peak(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }
    }

    impl DataSigner for Overlap {
        fn crc32(&self, data: &str) -> String {
            self.started.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            let start = Instant::now();
            while self.started.load(Ordering::SeqCst) < self.expected
                && start.elapsed() < Self::DEADLINE
            {
                thread::sleep(Duration::from_millis(1));
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            format!("c({data})")
        }

        fn md5(&self, data: &str) -> String {
            format!("m({data})")
        }
    }

    /// Wraps its input so the call structure shows in the output
    pub struct Tagging;

    impl DataSigner for Tagging {
        fn crc32(&self, data: &str) -> String {
            format!("c({data})")
        }

        fn md5(&self, data: &str) -> String {
            format!("m({data})")
        }
    }

    /// Run `stage` between a source of `items` and a collecting sink
    pub fn run_stage(stage: impl Stage + 'static, items: Vec<Item>) -> Vec<Item> {
        let (sender, receiver) = unbounded();
        Pipeline::builder()
            .stage(source(items))
            .stage(stage)
            .stage(forward_to(sender))
            .build()
            .run();
        receiver.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::Tagging;
    use super::*;
    use crate::events::{null_sender, EventChannel};

    /// crc32 is identity, md5 repeats its input twice
    struct Doubling;

    impl DataSigner for Doubling {
        fn crc32(&self, data: &str) -> String {
            data.to_string()
        }

        fn md5(&self, data: &str) -> String {
            data.repeat(2)
        }
    }

    #[test]
    fn signs_with_stand_in_primitives() {
        let signature = sign_values(&[0, 1], Arc::new(Doubling), &null_sender());

        assert_eq!(
            signature.result,
            "00~0010~0020~0030~0040~0050~00_01~1111~1121~1131~1141~1151~11"
        );
        assert_eq!(signature.summary.stages, 5);
        assert_eq!(signature.summary.dropped_items, 0);
    }

    #[test]
    fn no_values_yield_empty_signature() {
        let signature = sign_values(&[], Arc::new(Doubling), &null_sender());

        assert_eq!(signature.result, "");
    }

    #[test]
    fn reports_every_intermediate_step() {
        let (sender, receiver) = EventChannel::new();

        sign_values(&[5], Arc::new(Tagging), &sender);
        drop(sender);

        let steps: Vec<(String, SignStep)> = receiver
            .iter()
            .filter_map(|event| match event {
                Event::Sign(SignEvent::Step { stage, step, .. }) => Some((stage, step)),
                _ => None,
            })
            .collect();

        let single = steps.iter().filter(|(s, _)| s == "single_hash").count();
        let rounds = steps
            .iter()
            .filter(|(_, step)| matches!(step, SignStep::Round(_)))
            .count();
        // data, md5, crc32, crc32(md5), result
        assert_eq!(single, 5);
        assert_eq!(rounds, MULTI_HASH_ROUNDS);
    }

    #[test]
    fn signing_stages_are_in_order() {
        let names: Vec<String> = signing_stages(Arc::new(Tagging))
            .iter()
            .map(|stage| stage.name().to_string())
            .collect();

        assert_eq!(names, vec!["single_hash", "multi_hash", "combine_results"]);
    }
}
