//! # Events Module
//!
//! Event-driven progress reporting for signing runs.
//!
//! ## Design
//! The core library emits events through channels, so any front-end (CLI,
//! GUI, log collector) can subscribe without the pipeline knowing about it.
//! Dropped receivers never fail the pipeline - progress reporting is
//! strictly optional.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::Stage(StageEvent::ItemFinished { stage, completed }) => {
//!                 println!("{stage}: {completed} items done")
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//!
//! signer.sign_with_events(&inputs, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{EventChannel, EventReceiver, EventSender, null_sender};
pub use types::*;
