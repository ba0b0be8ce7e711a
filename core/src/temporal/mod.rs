//! Temporal navigation over generated steps
//!
//! `playback` is the synchronous state machine; `driver` runs its clock
//! on tokio.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod driver;
pub mod playback;

pub use self::driver::PlaybackDriver;
pub use self::playback::{
    PlaybackController, PlaybackError, PlaybackMode, PlaybackSnapshot, StepOutcome,
};
