//! Async driver for a playback controller
//!
//! Pumps the controller's clock from a single tokio task and publishes a
//! `PlaybackSnapshot` on a watch channel after every change. A command that
//! changes the mode, position, speed, or pending advance aborts the running
//! task and bumps the epoch, so a task from an earlier command can never
//! advance the controller. Commands that change none of these keep the
//! running task and its timer.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::algorithm::step::Step;
use crate::algorithm::traits::StepState;
use crate::temporal::playback::{
    PlaybackController, PlaybackError, PlaybackMode, PlaybackSnapshot, StepOutcome,
};

struct Shared<S: StepState> {
    controller: PlaybackController<S>,
    epoch: u64,
}

/// Owns a controller and the one task that advances it.
///
/// Must be used from within a tokio runtime.
pub struct PlaybackDriver<S: StepState> {
    shared: Arc<Mutex<Shared<S>>>,
    updates: Arc<watch::Sender<PlaybackSnapshot>>,
    task: Option<JoinHandle<()>>,
}

impl<S: StepState> PlaybackDriver<S> {
    pub fn new(controller: PlaybackController<S>) -> Self {
        let (updates, _) = watch::channel(controller.snapshot());
        Self {
            shared: Arc::new(Mutex::new(Shared { controller, epoch: 0 })),
            updates: Arc::new(updates),
            task: None,
        }
    }

    /// Receiver that observes every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.updates.subscribe()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.shared.lock().controller.snapshot()
    }

    pub fn current_step(&self) -> Option<Step<S>> {
        self.shared.lock().controller.current_step().cloned()
    }

    /// Fold over steps `0..=current`
    pub fn replay<T, F>(&self, init: T, fold: F) -> T
    where
        F: FnMut(T, &Step<S>) -> T,
    {
        self.shared.lock().controller.replay(init, fold)
    }

    pub fn start(&mut self) -> Result<(), PlaybackError> {
        self.command(|controller| controller.start())
    }

    pub fn pause(&mut self) {
        self.command(|controller| controller.pause())
    }

    pub fn resume(&mut self) -> Result<(), PlaybackError> {
        self.command(|controller| controller.resume())
    }

    pub fn reset(&mut self) {
        self.command(|controller| controller.reset())
    }

    pub fn step_forward(&mut self) -> StepOutcome {
        self.command(|controller| controller.step_forward())
    }

    pub fn step_backward(&mut self) -> StepOutcome {
        self.command(|controller| controller.step_backward())
    }

    pub fn go_to(&mut self, index: isize) -> Option<usize> {
        self.command(|controller| controller.go_to(index))
    }

    pub fn set_speed(&mut self, factor: f64) -> f64 {
        self.command(|controller| controller.set_speed(factor))
    }

    fn command<T>(&mut self, apply: impl FnOnce(&mut PlaybackController<S>) -> T) -> T {
        let (result, snapshot, epoch) = {
            let mut shared = self.shared.lock();
            let before = timer_state(&shared.controller);
            let result = apply(&mut shared.controller);
            let snapshot = shared.controller.snapshot();

            // Nothing the pump depends on moved; leave the running task alone.
            let pumping = self.task.as_ref().map_or(false, |task| !task.is_finished());
            if pumping && before == timer_state(&shared.controller) {
                return result;
            }

            shared.epoch += 1;
            (result, snapshot, shared.epoch)
        };

        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.updates.send_replace(snapshot);

        if snapshot.mode == PlaybackMode::Playing {
            self.task = Some(tokio::spawn(pump(
                Arc::clone(&self.shared),
                Arc::clone(&self.updates),
                epoch,
            )));
        }
        result
    }
}

fn timer_state<S: StepState>(
    controller: &PlaybackController<S>,
) -> (PlaybackSnapshot, Option<Duration>) {
    (controller.snapshot(), controller.time_until_next_advance())
}

impl<S: StepState> Drop for PlaybackDriver<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Sleep until the pending advance, feed the elapsed time to the
/// controller, publish, repeat while playing.
async fn pump<S: StepState>(
    shared: Arc<Mutex<Shared<S>>>,
    updates: Arc<watch::Sender<PlaybackSnapshot>>,
    epoch: u64,
) {
    let mut last = Instant::now();
    loop {
        let wait = {
            let shared = shared.lock();
            if shared.epoch != epoch || !shared.controller.is_playing() {
                return;
            }
            match shared.controller.time_until_next_advance() {
                Some(wait) => wait,
                None => return,
            }
        };

        time::sleep(wait).await;

        let now = Instant::now();
        let snapshot = {
            let mut shared = shared.lock();
            if shared.epoch != epoch {
                return;
            }
            shared.controller.advance_time(now - last);
            shared.controller.snapshot()
        };
        last = now;
        updates.send_replace(snapshot);
    }
}
