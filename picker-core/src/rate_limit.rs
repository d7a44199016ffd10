//! Throttling and debouncing for high frequency events.
//!
//! Both are driven by the caller's clock so they stay deterministic in
//! tests; neither owns a timer.

/// Leading edge throttle: the first call in a window fires, the rest of
/// the window is dropped.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: f64,
    window_start: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: f64::from(interval_ms),
            window_start: None,
        }
    }

    /// Claim the window if it is open.
    pub fn try_fire(&mut self, now_ms: f64) -> bool {
        let open = match self.window_start {
            Some(start) => now_ms - start >= self.interval_ms,
            None => true,
        };
        if open {
            self.window_start = Some(now_ms);
        }
        open
    }

    pub fn reset(&mut self) {
        self.window_start = None;
    }
}

/// Trailing edge debounce by ticket.
///
/// Each request supersedes the previous one; whoever schedules the quiet
/// interval hands the ticket back to [`Debounce::settle`] when it elapses
/// and only the newest ticket wins.
#[derive(Debug, Clone, Default)]
pub struct Debounce {
    generation: u64,
    pending: bool,
}

impl Debounce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self) -> u64 {
        self.generation += 1;
        self.pending = true;
        self.generation
    }

    /// True exactly once, for the newest outstanding ticket.
    pub fn settle(&mut self, ticket: u64) -> bool {
        if self.pending && ticket == self.generation {
            self.pending = false;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.pending = false;
    }
}
