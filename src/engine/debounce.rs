// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Cancel-and-rearm timer that coalesces bursts of edits.
//!
//! Each `arm` cancels whatever quiet period was pending and starts a new one.
//! Only the quiet period can be cancelled: once it elapses the action runs to
//! completion on its own task. The action receives the sequence number it was
//! armed with and should call [`Debouncer::settle`] before doing any work, which
//! tells it whether it is still the live timer.
//!
//! All timers are children of one shutdown token, so [`Debouncer::shutdown`]
//! stops every pending quiet period at once.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
struct PendingTimer {
    seq: u64,
    token: CancellationToken,
}

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    shutdown: CancellationToken,
    pending: Option<PendingTimer>,
    next_seq: u64,
}

impl Debouncer {
    pub fn new(delay: Duration, shutdown: CancellationToken) -> Self {
        Self {
            delay,
            shutdown,
            pending: None,
            next_seq: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start a new quiet period, replacing any pending one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm<F, Fut>(&mut self, action: F) -> u64
    where
        F: FnOnce(u64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.next_seq += 1;
        let seq = self.next_seq;
        let token = self.shutdown.child_token();
        self.pending = Some(PendingTimer {
            seq,
            token: token.clone(),
        });

        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
            action(seq).await;
        });
        seq
    }

    /// Drop the pending quiet period, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(timer) => {
                timer.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Claim an elapsed timer. Returns `false` if `seq` was re-armed or
    /// cancelled in the meantime, in which case the action must do nothing.
    pub fn settle(&mut self, seq: u64) -> bool {
        match &self.pending {
            Some(timer) if timer.seq == seq && !timer.token.is_cancelled() => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Cancel the pending timer and refuse to run any timer armed from now on.
    pub fn shutdown(&mut self) {
        self.cancel();
        self.shutdown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Fired = Arc<Mutex<Vec<u64>>>;

    fn arm_recording(debouncer: &mut Debouncer, fired: &Fired) -> u64 {
        let fired = Arc::clone(fired);
        debouncer.arm(move |seq| async move {
            fired.lock().unwrap().push(seq);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once_with_last_sequence() {
        let fired: Fired = Arc::default();
        let mut debouncer = Debouncer::new(Duration::from_millis(500), CancellationToken::new());

        arm_recording(&mut debouncer, &fired);
        tokio::time::sleep(Duration::from_millis(10)).await;
        arm_recording(&mut debouncer, &fired);
        tokio::time::sleep(Duration::from_millis(10)).await;
        let last = arm_recording(&mut debouncer, &fired);

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(fired.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*fired.lock().unwrap(), vec![last]);
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_arms_each_fire() {
        let fired: Fired = Arc::default();
        let mut debouncer = Debouncer::new(Duration::from_millis(100), CancellationToken::new());

        let first = arm_recording(&mut debouncer, &fired);
        tokio::time::sleep(Duration::from_millis(150)).await;
        let second = arm_recording(&mut debouncer, &fired);
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(*fired.lock().unwrap(), vec![first, second]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_firing() {
        let fired: Fired = Arc::default();
        let mut debouncer = Debouncer::new(Duration::from_millis(100), CancellationToken::new());

        arm_recording(&mut debouncer, &fired);
        assert!(debouncer.cancel());
        assert!(!debouncer.is_armed());
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(fired.lock().unwrap().is_empty());
        assert!(!debouncer.cancel());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_pending_timer() {
        let fired: Fired = Arc::default();
        let shutdown = CancellationToken::new();
        let mut debouncer = Debouncer::new(Duration::from_millis(100), shutdown.clone());

        arm_recording(&mut debouncer, &fired);
        debouncer.shutdown();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(shutdown.is_cancelled());
        assert!(fired.lock().unwrap().is_empty());
    }

    #[test]
    fn settle_only_accepts_the_live_sequence() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        runtime.block_on(async {
            let mut debouncer = Debouncer::new(Duration::from_secs(1), CancellationToken::new());
            let stale = debouncer.arm(|_| async {});
            let live = debouncer.arm(|_| async {});

            assert!(!debouncer.settle(stale));
            assert!(debouncer.is_armed());
            assert!(debouncer.settle(live));
            assert!(!debouncer.is_armed());
            assert!(!debouncer.settle(live));
        });
    }
}
