//! Realtime driver: the timer loop that owns the store.
//!
//! The driver is the single writer. UI threads send `DriverMessage`s over
//! a channel; the loop applies them between ticks. While running, a tick
//! fires every `speed.period_from(base_period)`, counted from the end of the
//! previous tick, so missed periods are skipped rather than fired in a burst.
//! A pause only affects the next scheduled tick, and a speed change re-arms
//! the timer.

use crate::{
    clock::{SimSpeed, BASE_TICK_PERIOD},
    command::PlayerCommand,
    snapshot::WorldSnapshot,
    store::WorldStore,
};
use std::{
    ops::ControlFlow,
    sync::mpsc::{Receiver, RecvTimeoutError},
    time::{Duration, Instant},
};

#[derive(Debug, Clone)]
pub enum DriverMessage {
    Command(PlayerCommand),
    Quit,
}

#[derive(Debug, Clone, Copy)]
pub struct DriverOptions {
    /// Timer period at 1x.
    pub base_period: Duration,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self { base_period: BASE_TICK_PERIOD }
    }
}

/// Run until `Quit`, a disconnected channel, or the observer breaks.
///
/// The observer sees a fresh snapshot after every tick and after every
/// applied command. A command that fails is logged and skipped.
pub fn run_realtime<F>(
    store: &mut WorldStore,
    messages: &Receiver<DriverMessage>,
    options: DriverOptions,
    mut observer: F,
)
where
    F: FnMut(&WorldSnapshot) -> ControlFlow<()>,
{
    let period = |speed: SimSpeed| speed.period_from(options.base_period);
    let mut deadline = Instant::now() + period(store.speed());

    loop {
        let received = if store.state().is_running {
            let wait = deadline.saturating_duration_since(Instant::now());
            messages.recv_timeout(wait)
        } else {
            messages.recv().map_err(|_| RecvTimeoutError::Disconnected)
        };

        match received {
            Ok(DriverMessage::Quit) | Err(RecvTimeoutError::Disconnected) => break,
            Ok(DriverMessage::Command(command)) => {
                let was_running = store.state().is_running;
                let old_speed = store.speed();
                if let Err(e) = store.apply(command) {
                    log::warn!("command rejected: {e}");
                    continue;
                }
                let started = !was_running && store.state().is_running;
                if started || store.speed() != old_speed {
                    deadline = Instant::now() + period(store.speed());
                }
                if observer(&store.snapshot()).is_break() {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                store.tick();
                if observer(&store.snapshot()).is_break() {
                    break;
                }
                // Re-arm from now so a slow tick or observer never bunches ticks.
                deadline = Instant::now() + period(store.speed());
            }
        }
    }

    log::info!("driver stopped at tick {}", store.current_time());
}
