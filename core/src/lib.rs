//! Stepwise computational core
//!
//! Algorithms are run to completion up front, producing an immutable
//! sequence of steps; a generic playback controller then navigates that
//! sequence over time. The presentation layer only ever reads
//! `steps[current_index]`.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod config;
pub mod execution;
pub mod temporal;

pub use algorithm::{
    catalog, AlgorithmCategory, AlgorithmComplexity, AlgorithmDescriptor, AlgorithmError,
    AlgorithmId, Step, StepGenerator, StepRecorder, StepSequence, StepState,
};
pub use config::{ConfigError, CoreConfig, InputLimits, PlaybackConfig};
pub use execution::history::ExecutionHistory;
pub use temporal::driver::PlaybackDriver;
pub use temporal::playback::{
    PlaybackController, PlaybackError, PlaybackMode, PlaybackSnapshot, StepOutcome,
};

/// Crate version with semantic versioning
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the core with an optional configuration.
///
/// Validates the configuration and installs the `env_logger` backend using
/// `CoreConfig::log_level` as the default filter (`RUST_LOG` still wins).
/// Calling this more than once is harmless; only the first call installs a
/// logger.
pub fn init_with_config(config: Option<CoreConfig>) -> Result<CoreConfig, ConfigError> {
    let config = config.unwrap_or_default();
    config.validate()?;

    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already installed; keeping existing backend");
    }

    log::info!("Stepwise core {} initialized", VERSION);
    Ok(config)
}
