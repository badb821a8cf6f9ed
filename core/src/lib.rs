#![no_std]

extern crate alloc;

pub use clock::*;
pub use config::*;
pub use controller::*;
pub use deck::*;
pub use error::*;
pub use format::*;
pub use phase::*;
pub use score::*;
pub use sequencer::*;
pub use snapshot::*;
pub use timer::*;
pub use turn::*;
pub use types::*;

mod clock;
mod config;
mod controller;
mod deck;
mod error;
mod format;
mod phase;
mod score;
mod sequencer;
mod snapshot;
mod timer;
mod turn;
mod types;
