//! Stage contract and the endpoints a stage is handed.

use super::item::{Item, ItemKind};
use crate::error::StageError;
use crate::events::{Event, EventSender, StageEvent};
use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A unit of work wired between two boundary channels.
///
/// `run` must keep reading `input` until it is exhausted, and must not
/// return while any work it spawned for an accepted item is still running.
/// The stage only borrows its [`Outbox`]; the executor closes the boundary
/// once `run` returns.
pub trait Stage: Send + Sync {
    /// Name used in logs and events
    fn name(&self) -> &str;

    /// Consume `input` until it is closed, emitting into `output`
    fn run(&self, input: &Inbox, output: &Outbox);
}

/// Reading end of a stage boundary
pub struct Inbox {
    receiver: Receiver<Item>,
}

impl Inbox {
    pub(crate) fn new(receiver: Receiver<Item>) -> Self {
        Self { receiver }
    }

    /// Block until the next item arrives; `None` once the boundary is closed
    pub fn recv(&self) -> Option<Item> {
        self.receiver.recv().ok()
    }

    /// Iterate until the boundary is closed
    pub fn iter(&self) -> impl Iterator<Item = Item> + '_ {
        self.receiver.iter()
    }
}

/// Writing end of a stage boundary.
///
/// `Outbox` is `Sync`, so workers spawned inside a stage can borrow it.
pub struct Outbox {
    sender: Sender<Item>,
    stage: String,
    events: EventSender,
    dropped: Arc<AtomicUsize>,
}

impl Outbox {
    pub(crate) fn new(
        sender: Sender<Item>,
        stage: &str,
        events: EventSender,
        dropped: Arc<AtomicUsize>,
    ) -> Self {
        Self {
            sender,
            stage: stage.to_string(),
            events,
            dropped,
        }
    }

    /// Name of the stage writing into this outbox
    pub fn stage_name(&self) -> &str {
        &self.stage
    }

    /// Event sender of the current run
    pub fn events(&self) -> &EventSender {
        &self.events
    }

    /// Hand an item to the next stage, blocking until it is taken.
    ///
    /// Returns `false` if the receiving stage has already returned; the
    /// item is discarded in that case.
    pub fn send(&self, item: impl Into<Item>) -> bool {
        match self.sender.send(item.into()) {
            Ok(()) => true,
            Err(_) => {
                let error = StageError::Disconnected {
                    stage: self.stage.clone(),
                };
                tracing::debug!("{}", error);
                false
            }
        }
    }

    /// Report an item of the wrong kind and skip it.
    pub fn reject(&self, item: &Item, expected: ItemKind) {
        let error = StageError::TypeMismatch {
            stage: self.stage.clone(),
            expected,
            found: item.kind(),
        };
        tracing::warn!(stage = %self.stage, "{}", error);
        self.dropped.fetch_add(1, Ordering::Relaxed);
        self.events.send(Event::Stage(StageEvent::ItemDropped {
            name: self.stage.clone(),
            reason: error.to_string(),
        }));
    }
}

/// A stage built from a closure
pub struct FnStage<F> {
    name: String,
    f: F,
}

impl<F> Stage for FnStage<F>
where
    F: Fn(&Inbox, &Outbox) + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: &Inbox, output: &Outbox) {
        (self.f)(input, output)
    }
}

/// Turn any `Fn(&Inbox, &Outbox)` into a named stage
pub fn from_fn<F>(name: &str, f: F) -> FnStage<F>
where
    F: Fn(&Inbox, &Outbox) + Send + Sync,
{
    FnStage {
        name: name.to_string(),
        f,
    }
}

/// Producer stage: ignores its input and emits a fixed list of items
pub struct Source {
    items: Vec<Item>,
}

/// Create a producer stage for `items`
pub fn source<I, T>(items: I) -> Source
where
    I: IntoIterator<Item = T>,
    T: Into<Item>,
{
    Source {
        items: items.into_iter().map(Into::into).collect(),
    }
}

impl Stage for Source {
    fn name(&self) -> &str {
        "source"
    }

    fn run(&self, _input: &Inbox, output: &Outbox) {
        for item in &self.items {
            if !output.send(item.clone()) {
                break;
            }
        }
    }
}

/// Consumer stage: forwards everything it receives out of the pipeline
pub struct ForwardTo {
    sender: Sender<Item>,
}

/// Create a consumer stage that forwards items to `sender`
pub fn forward_to(sender: Sender<Item>) -> ForwardTo {
    ForwardTo { sender }
}

impl Stage for ForwardTo {
    fn name(&self) -> &str {
        "forward_to"
    }

    fn run(&self, input: &Inbox, _output: &Outbox) {
        for item in input.iter() {
            // Keep draining even if nobody listens anymore
            let _ = self.sender.send(item);
        }
    }
}

/// Identity stage
pub struct Passthrough;

impl Stage for Passthrough {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn run(&self, input: &Inbox, output: &Outbox) {
        for item in input.iter() {
            output.send(item);
        }
    }
}
