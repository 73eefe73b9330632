//! Pipeline execution implementation.

use super::item::Item;
use super::stage::{Inbox, Outbox, Stage};
use crate::events::{null_sender, Event, EventSender, PipelineEvent, PipelineSummary, StageEvent};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use uuid::Uuid;

/// Builder for an ordered list of stages
pub struct PipelineBuilder {
    stages: Vec<Box<dyn Stage>>,
}

impl PipelineBuilder {
    /// Create an empty pipeline builder
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage
    pub fn stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Append an already boxed stage
    pub fn boxed_stage(mut self, stage: Box<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            stages: self.stages,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered chain of stages.
///
/// Stage `i` reads boundary `i` and writes boundary `(i + 1) % n`, so the
/// last stage writes into the first stage's input.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Create a pipeline from already boxed stages
    pub fn from_stages(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run the pipeline without events
    pub fn run(&self) -> PipelineSummary {
        self.run_with_events(&null_sender())
    }

    /// Run every stage on its own thread and block until all of them return.
    ///
    /// A panic inside a stage is re-raised here once the other stages drain.
    pub fn run_with_events(&self, events: &EventSender) -> PipelineSummary {
        let start_time = Instant::now();
        let run_id = Uuid::new_v4();
        let count = self.stages.len();

        events.send(Event::Pipeline(PipelineEvent::Started {
            run_id,
            stages: count,
        }));

        if count == 0 {
            tracing::warn!(%run_id, "pipeline has no stages");
            return self.complete(events, run_id, 0, start_time);
        }

        let dropped = Arc::new(AtomicUsize::new(0));
        let (mut senders, receivers): (Vec<Sender<Item>>, Vec<Receiver<Item>>) =
            (0..count).map(|_| bounded(0)).unzip();
        // Stage i writes boundary i + 1; the last one wraps around to 0
        senders.rotate_left(1);

        let (done_tx, done_rx) = bounded::<()>(0);
        let last = count - 1;

        thread::scope(|scope| {
            let wiring = self.stages.iter().zip(receivers).zip(senders);
            for (index, ((stage, receiver), sender)) in wiring.enumerate() {
                let stage = stage.as_ref();
                let inbox = Inbox::new(receiver);
                let outbox =
                    Outbox::new(sender, stage.name(), events.clone(), Arc::clone(&dropped));
                let done = (index == last).then(|| done_tx.clone());
                let events = events.clone();

                scope.spawn(move || {
                    let name = stage.name().to_string();
                    tracing::debug!(%run_id, index, stage = %name, "stage started");
                    events.send(Event::Stage(StageEvent::Started {
                        index,
                        name: name.clone(),
                    }));

                    stage.run(&inbox, &outbox);
                    drop(inbox);
                    drop(outbox);

                    tracing::debug!(%run_id, index, stage = %name, "stage finished");
                    events.send(Event::Stage(StageEvent::Finished { index, name }));

                    if let Some(done) = done {
                        let _ = done.send(());
                    }
                });
            }
            drop(done_tx);

            for () in done_rx.iter() {}
        });

        self.complete(events, run_id, dropped.load(Ordering::Relaxed), start_time)
    }

    fn complete(
        &self,
        events: &EventSender,
        run_id: Uuid,
        dropped_items: usize,
        start_time: Instant,
    ) -> PipelineSummary {
        let summary = PipelineSummary {
            run_id,
            stages: self.stages.len(),
            dropped_items,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };
        tracing::info!(
            %run_id,
            stages = summary.stages,
            dropped = summary.dropped_items,
            duration_ms = summary.duration_ms,
            "pipeline completed"
        );
        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: summary.clone(),
        }));
        summary
    }
}

/// Run `stages` as one pipeline and block until it has drained
pub fn execute_pipeline(stages: Vec<Box<dyn Stage>>) -> PipelineSummary {
    Pipeline::from_stages(stages).run()
}
