//! # Rate Limiting
//!
//! Throttle and debounce as explicit state machines. Time is passed in by the
//! caller (milliseconds from any monotonic origin, e.g. `performance.now()`),
//! so both are deterministic under test.
//!
//! - [`Throttle`]: the first call passes, later calls are dropped until the
//!   interval has elapsed; the next call then passes and restarts the window.
//! - [`Debounce`]: every call supersedes the previous one; the host arms a
//!   timer per call and only the newest ticket yields the arguments.
//!
//! ## Example
//!
//! ```rust
//! use folio_core::timing::Throttled;
//!
//! let mut hits = 0;
//! let mut on_scroll = Throttled::new(100.0, |_: f64| hits += 1);
//! for t in [0.0, 10.0, 20.0, 30.0, 40.0] {
//!     on_scroll.call(t, t);
//! }
//! on_scroll.call(150.0, 150.0);
//! drop(on_scroll);
//! assert_eq!(hits, 2);
//! ```

/// Time gate admitting at most one call per interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Throttle {
    interval_ms: f64,
    window_start: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Throttle {
            interval_ms,
            window_start: None,
        }
    }

    /// Returns true if a call at `now_ms` may run. Admitted calls open a new
    /// window; refused calls are dropped, never queued.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.window_start {
            Some(start) if now_ms - start < self.interval_ms => false,
            _ => {
                self.window_start = Some(now_ms);
                true
            }
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}

/// A callback wrapped in a [`Throttle`].
pub struct Throttled<F> {
    gate: Throttle,
    callback: F,
}

impl<F> Throttled<F> {
    pub fn new(interval_ms: f64, callback: F) -> Self {
        Throttled {
            gate: Throttle::new(interval_ms),
            callback,
        }
    }

    /// Invoke the callback with `arg` unless the window is still open.
    /// Returns whether the callback ran.
    pub fn call<A>(&mut self, now_ms: f64, arg: A) -> bool
    where
        F: FnMut(A),
    {
        if self.gate.admit(now_ms) {
            (self.callback)(arg);
            true
        } else {
            false
        }
    }
}

/// Identifies one debounced call; only the newest ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceTicket(u64);

/// Collapses a burst of calls into the last one.
#[derive(Debug, Clone)]
pub struct Debounce<A> {
    delay_ms: u32,
    generation: u64,
    pending: Option<A>,
}

impl<A> Debounce<A> {
    pub fn new(delay_ms: u32) -> Self {
        Debounce {
            delay_ms,
            generation: 0,
            pending: None,
        }
    }

    /// Record a call. The host should (re)arm a `delay_ms` timer carrying the
    /// returned ticket, cancelling the timer for any earlier ticket.
    pub fn call(&mut self, arg: A) -> DebounceTicket {
        self.generation += 1;
        self.pending = Some(arg);
        DebounceTicket(self.generation)
    }

    /// Timer for `ticket` elapsed. Yields the latest arguments if no newer
    /// call arrived in the meantime.
    pub fn fire(&mut self, ticket: DebounceTicket) -> Option<A> {
        if ticket.0 == self.generation {
            self.pending.take()
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Generation number of the newest ticket, for hosts that key timers on it
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl DebounceTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }

    pub fn from_generation(generation: u64) -> Self {
        DebounceTicket(generation)
    }
}
