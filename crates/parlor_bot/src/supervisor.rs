//! Per-conversation turn timers.
//!
//! One timer slot exists for each (conversation, game kind) pair. Arming a
//! slot cancels whatever was there, so only the most recently armed timer
//! can ever fire. A timer that fires clears its own slot before running its
//! callback.

use crate::store::lock;
use parlor_core::{ConversationId, GameKind};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

type TimerKey = (ConversationId, GameKind);

#[derive(Debug)]
struct ArmedTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Force-ends games whose current player stops responding.
#[derive(Debug)]
pub struct TurnTimeoutSupervisor {
    timeout: Duration,
    timers: Arc<Mutex<HashMap<TimerKey, ArmedTimer>>>,
    next_generation: AtomicU64,
}

impl TurnTimeoutSupervisor {
    /// Creates a supervisor that waits `timeout` before firing.
    #[instrument]
    pub fn new(timeout: Duration) -> Self {
        info!(?timeout, "Creating turn timeout supervisor");
        Self {
            timeout,
            timers: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Inactivity window per turn.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Starts (or restarts) the timer for a conversation's game.
    ///
    /// Any timer already armed for the same conversation and kind is
    /// cancelled first. Must be called from within a tokio runtime.
    #[instrument(skip(self, on_timeout))]
    pub fn arm<F, Fut>(&self, conversation: ConversationId, kind: GameKind, on_timeout: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let key: TimerKey = (conversation, kind);
        let timers = Arc::clone(&self.timers);
        let timeout = self.timeout;
        let task_key = key.clone();

        // Held until the new entry is in place so the task can't look it up early.
        let mut armed = lock(&self.timers);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;

            let still_current = {
                let mut timers = lock(&timers);
                match timers.get(&task_key) {
                    Some(timer) if timer.generation == generation => {
                        timers.remove(&task_key);
                        true
                    }
                    _ => false,
                }
            };

            if still_current {
                info!(conversation = %task_key.0, kind = %task_key.1, "Turn timer fired");
                on_timeout().await;
            } else {
                debug!(conversation = %task_key.0, kind = %task_key.1, "Superseded timer woke up");
            }
        });

        if let Some(previous) = armed.insert(key, ArmedTimer { generation, handle }) {
            previous.handle.abort();
            debug!("Replaced armed timer");
        }
    }

    /// Cancels the timer for a conversation's game. Returns true if one was armed.
    #[instrument(skip(self))]
    pub fn disarm(&self, conversation: &ConversationId, kind: GameKind) -> bool {
        let removed = lock(&self.timers).remove(&(conversation.clone(), kind));
        match removed {
            Some(timer) => {
                timer.handle.abort();
                debug!("Timer disarmed");
                true
            }
            None => false,
        }
    }

    /// Returns true if a timer is armed for the conversation's game.
    pub fn is_armed(&self, conversation: &ConversationId, kind: GameKind) -> bool {
        lock(&self.timers).contains_key(&(conversation.clone(), kind))
    }

    /// Number of armed timers across all conversations.
    pub fn armed_count(&self) -> usize {
        lock(&self.timers).len()
    }
}

impl Drop for TurnTimeoutSupervisor {
    fn drop(&mut self) {
        for (_, timer) in lock(&self.timers).drain() {
            timer.handle.abort();
        }
    }
}
