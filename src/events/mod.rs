//! # Events Module
//!
//! Event-driven progress reporting for pipeline runs.
//!
//! ## Design
//! The executor and the signing stages emit events through a channel,
//! so the CLI (or any other front end) can follow a run while it is
//! in progress without touching the stage boundaries.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Sign(SignEvent::Step { data, step, value, .. }) = event {
//!             println!("{data} {step} {value}");
//!         }
//!     }
//! });
//!
//! pipeline.run_with_events(&sender);
//! ```

mod channel;
mod types;

pub use channel::{EventChannel, EventReceiver, EventSender, null_sender};
pub use types::*;
