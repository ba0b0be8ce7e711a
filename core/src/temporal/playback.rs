//! Generic playback controller
//!
//! A finite-state machine over an immutable `StepSequence`. It knows
//! nothing about the algorithm that produced the steps: it owns the
//! current index, the mode, and the speed factor.
//!
//! Time is supplied by the host. `advance_time` moves the controller's
//! clock forward and fires any auto-advance that has come due; at most one
//! advance is ever scheduled. Every manual command cancels it before
//! returning, so no stale advance can fire afterwards.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;
use std::time::Duration;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::step::{Step, StepSequence};
use crate::algorithm::traits::StepState;
use crate::config::{ConfigError, PlaybackConfig};

/// Playback mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    Idle,
    Playing,
    Paused,
    Finished,
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackMode::Idle => "idle",
            PlaybackMode::Playing => "playing",
            PlaybackMode::Paused => "paused",
            PlaybackMode::Finished => "finished",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("Cannot play an empty step sequence")]
    EmptySequence,

    #[error("Cannot {action} while {from}")]
    InvalidTransition {
        from: PlaybackMode,
        action: &'static str,
    },
}

/// Result of a manual step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Moved to this index (`None` is "not started")
    Moved(Option<usize>),
    /// Moved onto the final step; playback is finished
    ReachedEnd(usize),
    /// No further reachable state in that direction; index unchanged
    Exhausted,
}

/// Read-only view for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub mode: PlaybackMode,
    /// `-1` before the first step
    pub current_index: isize,
    pub length: usize,
    pub speed: f64,
}

/// Playback state machine over one step sequence
#[derive(Debug, Clone)]
pub struct PlaybackController<S: StepState> {
    steps: StepSequence<S>,
    config: PlaybackConfig,
    mode: PlaybackMode,
    current: Option<usize>,
    speed: f64,
    /// Controller clock
    elapsed: Duration,
    /// Clock time of the single pending auto-advance
    due: Option<Duration>,
}

impl<S: StepState> PlaybackController<S> {
    /// Build a controller after checking the speed range and delay
    pub fn new(steps: StepSequence<S>, config: PlaybackConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::unchecked(steps, config))
    }

    pub fn with_defaults(steps: StepSequence<S>) -> Self {
        Self::unchecked(steps, PlaybackConfig::default())
    }

    fn unchecked(steps: StepSequence<S>, config: PlaybackConfig) -> Self {
        let speed = config.clamp_speed(config.default_speed);
        Self {
            steps,
            config,
            mode: PlaybackMode::Idle,
            current: None,
            speed,
            elapsed: Duration::ZERO,
            due: None,
        }
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.mode == PlaybackMode::Playing
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn sequence(&self) -> &StepSequence<S> {
        &self.steps
    }

    pub fn current_step(&self) -> Option<&Step<S>> {
        self.current.and_then(|i| self.steps.get(i))
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            mode: self.mode,
            current_index: self.current.map_or(-1, |i| i as isize),
            length: self.steps.len(),
            speed: self.speed,
        }
    }

    /// Fold over steps `0..=current`, returning `init` before the first step
    pub fn replay<T, F>(&self, init: T, fold: F) -> T
    where
        F: FnMut(T, &Step<S>) -> T,
    {
        match self.current {
            Some(index) => self.steps.replay_to(index, init, fold),
            None => init,
        }
    }

    /// Delay between auto-advances at the current speed
    pub fn step_delay(&self) -> Duration {
        let base = self.config.base_delay();
        Duration::try_from_secs_f64(base.as_secs_f64() / self.speed).unwrap_or(base)
    }

    /// Time left before the pending auto-advance, if one is scheduled
    pub fn time_until_next_advance(&self) -> Option<Duration> {
        self.due.map(|due| due.saturating_sub(self.elapsed))
    }

    /// Begin playback from "not started"; the first step is due immediately
    pub fn start(&mut self) -> Result<(), PlaybackError> {
        if self.steps.is_empty() {
            return Err(PlaybackError::EmptySequence);
        }
        if self.mode == PlaybackMode::Playing {
            return Ok(());
        }
        self.current = None;
        self.due = Some(self.elapsed);
        self.transition(PlaybackMode::Playing);
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.mode == PlaybackMode::Playing {
            self.due = None;
            self.transition(PlaybackMode::Paused);
        }
    }

    pub fn resume(&mut self) -> Result<(), PlaybackError> {
        if self.mode != PlaybackMode::Paused || !self.has_next() {
            return Err(PlaybackError::InvalidTransition {
                from: self.mode,
                action: "resume",
            });
        }
        self.due = Some(self.elapsed + self.step_delay());
        self.transition(PlaybackMode::Playing);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.due = None;
        self.current = None;
        self.transition(PlaybackMode::Idle);
    }

    pub fn step_forward(&mut self) -> StepOutcome {
        if self.steps.is_empty() {
            return StepOutcome::Exhausted;
        }
        self.due = None;
        let last = self.steps.len() - 1;
        match self.current {
            Some(index) if index >= last => {
                self.transition(PlaybackMode::Finished);
                StepOutcome::Exhausted
            }
            current => {
                let next = current.map_or(0, |i| i + 1);
                self.current = Some(next);
                if next == last {
                    self.transition(PlaybackMode::Finished);
                    StepOutcome::ReachedEnd(next)
                } else {
                    self.transition(PlaybackMode::Paused);
                    StepOutcome::Moved(Some(next))
                }
            }
        }
    }

    pub fn step_backward(&mut self) -> StepOutcome {
        if self.steps.is_empty() {
            return StepOutcome::Exhausted;
        }
        self.due = None;
        self.transition(PlaybackMode::Paused);
        match self.current {
            None => StepOutcome::Exhausted,
            Some(index) => {
                self.current = index.checked_sub(1);
                StepOutcome::Moved(self.current)
            }
        }
    }

    /// Jump to `index`, clamped to `[-1, len - 1]`
    pub fn go_to(&mut self, index: isize) -> Option<usize> {
        if self.steps.is_empty() {
            return None;
        }
        self.due = None;
        let last = (self.steps.len() - 1) as isize;
        let target = index.clamp(-1, last);
        self.current = usize::try_from(target).ok();
        self.transition(PlaybackMode::Paused);
        self.current
    }

    /// Set the speed factor, clamped to the configured range.
    /// A pending advance is rescheduled from now at the new delay.
    pub fn set_speed(&mut self, factor: f64) -> f64 {
        self.speed = self.config.clamp_speed(factor);
        if self.due.is_some() {
            self.due = Some(self.elapsed + self.step_delay());
        }
        debug!("Playback speed set to {}", self.speed);
        self.speed
    }

    /// Move the clock forward by `dt`, firing every advance that comes due.
    /// Returns how many steps were advanced.
    pub fn advance_time(&mut self, dt: Duration) -> usize {
        self.elapsed += dt;
        let mut fired = 0;

        while self.mode == PlaybackMode::Playing {
            let due = match self.due {
                Some(due) if due <= self.elapsed => due,
                _ => break,
            };
            let next = self.current.map_or(0, |i| i + 1);
            self.current = Some(next);
            fired += 1;
            trace!("Auto-advance to step {}", next);

            if next + 1 >= self.steps.len() {
                self.due = None;
                self.transition(PlaybackMode::Finished);
            } else {
                self.due = Some(due + self.step_delay());
            }
        }

        fired
    }

    fn has_next(&self) -> bool {
        match self.current {
            None => !self.steps.is_empty(),
            Some(index) => index + 1 < self.steps.len(),
        }
    }

    fn transition(&mut self, to: PlaybackMode) {
        if self.mode != to {
            debug!("Playback {} -> {} at {:?}", self.mode, to, self.current);
            self.mode = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::step::StepRecorder;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Seek(u32);

    impl StepState for Seek {}

    fn steps(distances: &[u32]) -> StepSequence<Seek> {
        let mut recorder = StepRecorder::new();
        for &d in distances {
            recorder.record(Seek(d), format!("seek {}", d));
        }
        recorder.finish()
    }

    fn controller(len: usize) -> PlaybackController<Seek> {
        let distances: Vec<u32> = (1..=len as u32).collect();
        PlaybackController::with_defaults(steps(&distances))
    }

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_start_requires_steps() {
        let mut empty = controller(0);
        assert_eq!(empty.start(), Err(PlaybackError::EmptySequence));
        assert_eq!(empty.mode(), PlaybackMode::Idle);
    }

    #[test]
    fn test_start_schedules_first_step_immediately() {
        let mut playback = controller(3);
        playback.start().unwrap();
        assert_eq!(playback.mode(), PlaybackMode::Playing);
        assert_eq!(playback.current_index(), None);
        assert_eq!(playback.time_until_next_advance(), Some(Duration::ZERO));

        assert_eq!(playback.advance_time(Duration::ZERO), 1);
        assert_eq!(playback.current_index(), Some(0));
        assert_eq!(playback.time_until_next_advance(), Some(SECOND));
    }

    #[test]
    fn test_auto_play_finishes_at_last_step() {
        let mut playback = controller(3);
        playback.start().unwrap();
        assert_eq!(playback.advance_time(Duration::from_secs(10)), 3);
        assert_eq!(playback.current_index(), Some(2));
        assert_eq!(playback.mode(), PlaybackMode::Finished);
        assert_eq!(playback.time_until_next_advance(), None);
    }

    #[test]
    fn test_start_while_playing_is_noop() {
        let mut playback = controller(4);
        playback.start().unwrap();
        playback.advance_time(SECOND);
        assert_eq!(playback.current_index(), Some(1));
        playback.start().unwrap();
        assert_eq!(playback.current_index(), Some(1));
        assert_eq!(playback.time_until_next_advance(), Some(SECOND));
    }

    #[test]
    fn test_pause_cancels_pending_advance() {
        let mut playback = controller(5);
        playback.start().unwrap();
        playback.advance_time(Duration::ZERO);
        playback.pause();
        assert_eq!(playback.mode(), PlaybackMode::Paused);
        assert_eq!(playback.advance_time(Duration::from_secs(60)), 0);
        assert_eq!(playback.current_index(), Some(0));
    }

    #[test]
    fn test_resume_waits_one_delay() {
        let mut playback = controller(5);
        playback.start().unwrap();
        playback.advance_time(Duration::ZERO);
        playback.pause();
        playback.resume().unwrap();
        assert_eq!(playback.advance_time(Duration::from_millis(999)), 0);
        assert_eq!(playback.advance_time(Duration::from_millis(1)), 1);
        assert_eq!(playback.current_index(), Some(1));
    }

    #[test]
    fn test_resume_rejected_at_end_or_when_not_paused() {
        let mut playback = controller(3);
        assert!(matches!(
            playback.resume(),
            Err(PlaybackError::InvalidTransition { from: PlaybackMode::Idle, .. })
        ));
        playback.go_to(2);
        assert_eq!(playback.mode(), PlaybackMode::Paused);
        assert!(playback.resume().is_err());
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut playback = controller(3);
        playback.start().unwrap();
        playback.advance_time(SECOND);
        playback.reset();
        assert_eq!(playback.current_index(), None);
        assert_eq!(playback.mode(), PlaybackMode::Idle);
        assert_eq!(playback.time_until_next_advance(), None);

        playback.go_to(1);
        playback.reset();
        assert_eq!(playback.snapshot().current_index, -1);

        playback.go_to(10);
        playback.step_forward();
        assert_eq!(playback.mode(), PlaybackMode::Finished);
        playback.reset();
        assert_eq!(playback.mode(), PlaybackMode::Idle);
        assert_eq!(playback.current_index(), None);
    }

    #[test]
    fn test_step_forward_past_end_finishes() {
        let mut playback = controller(4);
        assert_eq!(playback.go_to(3), Some(3));
        assert_eq!(playback.mode(), PlaybackMode::Paused);
        assert_eq!(playback.step_forward(), StepOutcome::Exhausted);
        assert_eq!(playback.current_index(), Some(3));
        assert_eq!(playback.mode(), PlaybackMode::Finished);
    }

    #[test]
    fn test_step_forward_onto_last_step() {
        let mut playback = controller(2);
        assert_eq!(playback.step_forward(), StepOutcome::Moved(Some(0)));
        assert_eq!(playback.mode(), PlaybackMode::Paused);
        assert_eq!(playback.step_forward(), StepOutcome::ReachedEnd(1));
        assert_eq!(playback.mode(), PlaybackMode::Finished);
    }

    #[test]
    fn test_step_backward_clamps_at_not_started() {
        let mut playback = controller(3);
        playback.go_to(0);
        assert_eq!(playback.step_backward(), StepOutcome::Moved(None));
        assert_eq!(playback.step_backward(), StepOutcome::Exhausted);
        assert_eq!(playback.current_index(), None);
        assert_eq!(playback.mode(), PlaybackMode::Paused);
    }

    #[test]
    fn test_manual_step_cancels_auto_play() {
        let mut playback = controller(5);
        playback.start().unwrap();
        playback.advance_time(Duration::ZERO);
        playback.step_forward();
        assert_eq!(playback.mode(), PlaybackMode::Paused);
        assert_eq!(playback.advance_time(Duration::from_secs(60)), 0);
        assert_eq!(playback.current_index(), Some(1));
    }

    #[test]
    fn test_go_to_clamps() {
        let mut playback = controller(3);
        assert_eq!(playback.go_to(-5), None);
        assert_eq!(playback.go_to(99), Some(2));
        assert_eq!(playback.go_to(1), Some(1));
    }

    #[test]
    fn test_replay_recomputes_cumulative_values() {
        let mut playback = controller(5);
        let total = |p: &PlaybackController<Seek>| p.replay(0, |acc, step| acc + step.payload.0);
        assert_eq!(total(&playback), 0);
        playback.go_to(4);
        assert_eq!(total(&playback), 15);
        playback.go_to(1);
        assert_eq!(total(&playback), 3);
        playback.step_forward();
        assert_eq!(total(&playback), 6);
    }

    #[test]
    fn test_speed_scales_delay_and_clamps() {
        let mut playback = controller(5);
        assert_eq!(playback.set_speed(2.0), 2.0);
        assert_eq!(playback.step_delay(), Duration::from_millis(500));
        assert_eq!(playback.set_speed(100.0), 4.0);
        assert_eq!(playback.set_speed(0.0), 0.25);
        assert_eq!(playback.set_speed(f64::NAN), 1.0);
    }

    #[test]
    fn test_inverted_speed_range_is_rejected() {
        let config = PlaybackConfig { min_speed: 2.0, max_speed: 1.0, ..PlaybackConfig::default() };
        let result = PlaybackController::new(steps(&[1, 2]), config);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let playback = PlaybackController::new(steps(&[1, 2]), PlaybackConfig::default()).unwrap();
        assert_eq!(playback.snapshot().speed, 1.0);
    }

    #[test]
    fn test_speed_change_reschedules_pending_advance() {
        let mut playback = controller(5);
        playback.start().unwrap();
        playback.advance_time(Duration::ZERO);
        playback.advance_time(Duration::from_millis(400));
        playback.set_speed(4.0);
        assert_eq!(playback.time_until_next_advance(), Some(Duration::from_millis(250)));
        assert_eq!(playback.advance_time(Duration::from_millis(250)), 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut playback = controller(3);
        playback.go_to(1);
        let json = serde_json::to_value(playback.snapshot()).unwrap();
        assert_eq!(json["mode"], "paused");
        assert_eq!(json["current_index"], 1);
        assert_eq!(json["length"], 3);
    }

    #[test]
    fn test_empty_sequence_navigation() {
        let mut playback = controller(0);
        assert_eq!(playback.step_forward(), StepOutcome::Exhausted);
        assert_eq!(playback.go_to(3), None);
        assert_eq!(playback.mode(), PlaybackMode::Idle);
    }
}
