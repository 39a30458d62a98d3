//! Leading-edge throttle over an injected millisecond clock.
//!
//! The first call opens a window of `limit_ms`; every call landing inside
//! that window is dropped rather than queued. The next call after the window
//! runs immediately and opens a new one.

#[derive(Clone, Debug, PartialEq)]
pub struct Throttle {
    limit_ms: f64,
    window_started_at: Option<f64>,
}

impl Throttle {
    pub fn new(limit_ms: u32) -> Self {
        Self {
            limit_ms: f64::from(limit_ms),
            window_started_at: None,
        }
    }

    /// Returns `true` when a call at `now_ms` should run.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        if let Some(started_at) = self.window_started_at {
            // A clock that steps backwards opens a fresh window instead of
            // stalling until it catches up.
            if now_ms >= started_at && now_ms - started_at < self.limit_ms {
                return false;
            }
        }

        self.window_started_at = Some(now_ms);
        true
    }

    pub fn call<R>(&mut self, now_ms: f64, f: impl FnOnce() -> R) -> Option<R> {
        self.admit(now_ms).then(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_inside_one_window_runs_once() {
        let mut throttle = Throttle::new(100);
        let mut runs = 0;

        for step in 0..10 {
            throttle.call(1_000.0 + f64::from(step) * 9.0, || runs += 1);
        }

        assert_eq!(runs, 1);
    }

    #[test]
    fn calls_spaced_beyond_limit_all_run() {
        let mut throttle = Throttle::new(16);
        let admitted = (0..5)
            .filter(|step| throttle.admit(f64::from(*step) * 17.0))
            .count();

        assert_eq!(admitted, 5);
    }

    #[test]
    fn window_is_anchored_at_first_admitted_call() {
        let mut throttle = Throttle::new(100);

        assert!(throttle.admit(0.0));
        assert!(!throttle.admit(60.0));
        assert!(!throttle.admit(99.9));
        assert!(throttle.admit(100.0));
        assert!(!throttle.admit(150.0));
    }

    #[test]
    fn dropped_call_returns_none() {
        let mut throttle = Throttle::new(50);

        assert_eq!(throttle.call(0.0, || "first"), Some("first"));
        assert_eq!(throttle.call(10.0, || "second"), None);
    }

    #[test]
    fn backwards_clock_reopens_window() {
        let mut throttle = Throttle::new(100);

        assert!(throttle.admit(500.0));
        assert!(throttle.admit(20.0));
        assert!(!throttle.admit(50.0));
    }
}
