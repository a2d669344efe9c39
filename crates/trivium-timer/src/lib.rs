//! Round timing primitives for Trivium.
//!
//! A room runs at most one [`Countdown`] at a time: 15 discrete one-second
//! ticks racing against the players answering early. Whoever wins must be
//! able to silence the loser, so cancellation is explicit: a pending timer
//! is not revoked by state changes, it has to be disarmed.
//!
//! # Integration
//!
//! Both primitives are designed to sit inside a room actor's
//! `tokio::select!` loop and to pend forever while disarmed:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* handle commands */ }
//!         remaining = countdown.tick() => { /* broadcast, evaluate at 0 */ }
//!         _ = pause.elapsed() => { /* begin the next round */ }
//!     }
//! }
//! ```
//!
//! Dropping an in-flight `tick()`/`elapsed()` future (another `select!`
//! branch won) leaves the timer state untouched: all mutation happens
//! after the deadline resolves.

use std::time::Duration;

use rand::Rng;
use tokio::time::{self, Instant as TokioInstant};
use tracing::{debug, trace};

/// Spacing between countdown ticks.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

// ---------------------------------------------------------------------------
// Countdown
// ---------------------------------------------------------------------------

/// A cancellable 1 Hz countdown.
///
/// `start(n)` arms `n` ticks; each [`tick`](Self::tick) resolves one second
/// after the previous and yields the count remaining after it (`n-1` down
/// to `0`). The zero tick is the expiry signal, and the countdown disarms
/// itself after yielding it, so it can never fire again for a round that
/// already expired.
pub struct Countdown {
    deadline: Option<TokioInstant>,
    remaining: u32,
    /// Random jitter (0–max µs) added when arming, to desynchronize the
    /// 1 Hz ticks of many rooms started at the same instant.
    jitter_us: u64,
}

impl Countdown {
    /// Creates a disarmed countdown with no jitter.
    pub fn new() -> Self {
        Self::with_jitter(0)
    }

    /// Creates a disarmed countdown with up to `jitter_us` microseconds of
    /// first-tick jitter.
    pub fn with_jitter(jitter_us: u64) -> Self {
        Self {
            deadline: None,
            remaining: 0,
            jitter_us,
        }
    }

    /// Arms the countdown for `ticks` ticks, replacing any previous schedule.
    pub fn start(&mut self, ticks: u32) {
        let jitter = if self.jitter_us > 0 {
            let us = rand::rng().random_range(0..self.jitter_us);
            Duration::from_micros(us)
        } else {
            Duration::ZERO
        };
        self.remaining = ticks;
        self.deadline = Some(TokioInstant::now() + TICK_INTERVAL + jitter);
        debug!(ticks, "countdown armed");
    }

    /// Disarms the countdown. Idempotent; a disarmed countdown never ticks.
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            debug!(remaining = self.remaining, "countdown cancelled");
        }
        self.remaining = 0;
    }

    /// Whether a tick is currently scheduled.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Ticks left before expiry (0 when disarmed).
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Waits for the next tick and returns the count remaining after it.
    ///
    /// Pends forever while disarmed, so it is always safe as a `select!`
    /// branch. The tick that returns `0` disarms the countdown.
    pub async fn tick(&mut self) -> u32 {
        let Some(deadline) = self.deadline else {
            // Disarmed: never resolves; select! drives the other branches.
            std::future::pending::<()>().await;
            unreachable!()
        };

        time::sleep_until(deadline).await;

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.deadline = None;
        } else {
            self.deadline = Some(deadline + TICK_INTERVAL);
        }

        trace!(remaining = self.remaining, "countdown tick");
        self.remaining
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Pause
// ---------------------------------------------------------------------------

/// A cancellable one-shot delay, used for the gap between rounds.
///
/// Same discipline as [`Countdown`]: pends forever while disarmed, fires
/// exactly once per `start`, and disarms itself on firing.
pub struct Pause {
    deadline: Option<TokioInstant>,
}

impl Pause {
    /// Creates a disarmed pause.
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Arms the pause to fire after `delay`, replacing any previous schedule.
    pub fn start(&mut self, delay: Duration) {
        self.deadline = Some(TokioInstant::now() + delay);
        debug!(delay_ms = delay.as_millis() as u64, "pause armed");
    }

    /// Disarms the pause. Idempotent.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether the pause is currently scheduled.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Waits for the deadline, then disarms. Pends forever while disarmed.
    pub async fn elapsed(&mut self) {
        let Some(deadline) = self.deadline else {
            std::future::pending::<()>().await;
            unreachable!()
        };

        time::sleep_until(deadline).await;
        self.deadline = None;
        trace!("pause elapsed");
    }
}

impl Default for Pause {
    fn default() -> Self {
        Self::new()
    }
}
