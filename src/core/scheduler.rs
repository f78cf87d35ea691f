//! Cancellable repeating battle timer.
//!
//! A [`TickScheduler`] is bound to the battle epoch that was current when it
//! was spawned. Before every fire it takes the session lock and checks that
//! the same battle is still running, so a stop issued under the lock is
//! never followed by a tick. A stop request also wakes the wait early.

use super::game_state::GameState;
use super::session::GameSession;
use super::tick::TickResult;
use crate::persistence::KeyValueStore;
use log::debug;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub type SharedSession<S> = Arc<Mutex<GameSession<S>>>;

pub struct TickScheduler {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl TickScheduler {
    /// Starts firing `GameSession::tick` for the battle currently running in
    /// `session`: once immediately, then every `interval`. Each tick result
    /// is sent on `events`.
    ///
    /// The thread exits when the battle stops, a newer battle starts, the
    /// player dies, the receiver hangs up, or [`TickScheduler::stop`] is
    /// called.
    pub fn spawn<S>(
        session: SharedSession<S>,
        interval: Duration,
        events: Sender<TickResult>,
    ) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let epoch = session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .battle_epoch();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            debug!("battle loop {} started", epoch);
            // The first round fires straight away, then once per interval.
            let mut wait = Duration::ZERO;
            loop {
                match stop_rx.recv_timeout(wait) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }

                let result = {
                    let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
                    if !still_running(guard.state(), guard.battle_epoch(), epoch) {
                        break;
                    }
                    guard.tick()
                };

                wait = interval;
                let died = result.player_died();
                if events.send(result).is_err() || died {
                    break;
                }
            }
            debug!("battle loop {} finished", epoch);
        });

        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Cancels the timer and waits for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    /// True once the thread has exited on its own.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    fn shutdown(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn still_running(state: &GameState, current_epoch: u64, bound_epoch: u64) -> bool {
    state.is_fighting() && current_epoch == bound_epoch
}
