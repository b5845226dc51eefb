//! Fixed-duration progress driver for text, image and quote panels.
//!
//! The clock has no time source of its own. It is polled with the caller's
//! monotonic milliseconds, which keeps it deterministic under a virtual
//! clock: the same duration and tick interval always produce the same
//! sequence of emissions, however coarsely it is polled.

use log::trace;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClockEvent {
    /// Fraction of the panel duration that has elapsed.
    Progress(f32),
    /// Emitted once, right after the final `Progress(1.0)`.
    Elapsed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ClockState {
    Idle,
    /// Started but not yet anchored to a timestamp; the first poll anchors it.
    Armed {
        duration_ms: u32,
    },
    Running {
        start_ms: u64,
        duration_ms: u32,
        emitted: u32,
        total: u32,
    },
    CompletionPending,
    Done,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlaybackClock {
    tick_ms: u32,
    state: ClockState,
}

impl PlaybackClock {
    pub const fn new(tick_ms: u32) -> Self {
        Self {
            tick_ms: if tick_ms == 0 { 1 } else { tick_ms },
            state: ClockState::Idle,
        }
    }

    pub const fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    /// Number of `Progress` emissions a run of `duration_ms` produces.
    pub const fn emission_count(duration_ms: u32, tick_ms: u32) -> u32 {
        let tick_ms = if tick_ms == 0 { 1 } else { tick_ms };
        let duration_ms = if duration_ms == 0 { 1 } else { duration_ms };
        duration_ms.div_ceil(tick_ms)
    }

    /// Starts (or restarts) a run. Any previous run is abandoned without
    /// further emissions.
    pub fn start(&mut self, duration_ms: u32) {
        self.state = ClockState::Armed {
            duration_ms: duration_ms.max(1),
        };
    }

    /// Stops the run. No event is emitted after this returns.
    pub fn cancel(&mut self) {
        self.state = ClockState::Idle;
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            ClockState::Armed { .. } | ClockState::Running { .. } | ClockState::CompletionPending
        )
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, ClockState::Done)
    }

    /// Returns the next due event, if any. Call repeatedly until `None` to
    /// drain every tick that became due since the previous poll.
    pub fn poll(&mut self, now_ms: u64) -> Option<ClockEvent> {
        match self.state {
            ClockState::Idle | ClockState::Done => None,
            ClockState::Armed { duration_ms } => {
                let total = Self::emission_count(duration_ms, self.tick_ms);
                trace!(
                    "clock: anchored start_ms={} duration_ms={} ticks={}",
                    now_ms, duration_ms, total
                );
                self.state = ClockState::Running {
                    start_ms: now_ms,
                    duration_ms,
                    emitted: 0,
                    total,
                };
                None
            }
            ClockState::Running {
                start_ms,
                duration_ms,
                emitted,
                total,
            } => {
                let next = emitted + 1;
                let offset_ms = (next as u64 * self.tick_ms as u64).min(duration_ms as u64);
                if now_ms < start_ms.saturating_add(offset_ms) {
                    return None;
                }

                if next >= total {
                    self.state = ClockState::CompletionPending;
                    return Some(ClockEvent::Progress(1.0));
                }

                self.state = ClockState::Running {
                    start_ms,
                    duration_ms,
                    emitted: next,
                    total,
                };
                Some(ClockEvent::Progress(offset_ms as f32 / duration_ms as f32))
            }
            ClockState::CompletionPending => {
                self.state = ClockState::Done;
                Some(ClockEvent::Elapsed)
            }
        }
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(50)
    }
}
