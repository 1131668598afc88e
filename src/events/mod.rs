//! # Events Module
//!
//! Progress reporting over channels.
//!
//! The pipeline emits events as it scans, reads capture dates and stacks;
//! a front end (the CLI progress bar, a GUI) listens on the receiving end.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Dates(DateEvent::Progress { completed, total }) = event {
//!             eprintln!("{}/{}", completed, total);
//!         }
//!     }
//! });
//!
//! pipeline.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
