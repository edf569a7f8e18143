use std::time::{Duration, Instant};

/// Delay-and-coalesce timer for persistence.
///
/// Every content mutation pokes the timer, pushing the deadline out by
/// the window; the save fires only once the deadline passes with no
/// further pokes. Purely deadline-based, so hosts drive it from whatever
/// event loop they have and tests drive it with synthetic instants.
#[derive(Debug, Clone)]
pub struct Debounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    /// Matches the shell's autosave window.
    pub const DEFAULT_WINDOW: Duration = Duration::from_millis(350);

    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Resets the deadline to `now + window`.
    pub fn poke(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// True while a deadline is armed.
    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fires at most once per armed deadline: returns true and disarms
    /// when the deadline has passed.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_window_passes() {
        let mut d = Debounce::new(Duration::from_millis(350));
        let t0 = Instant::now();
        d.poke(t0);
        assert!(!d.ready(t0 + Duration::from_millis(100)));
        assert!(d.ready(t0 + Duration::from_millis(350)));
        // Disarmed after firing
        assert!(!d.ready(t0 + Duration::from_millis(1000)));
        assert!(!d.pending());
    }

    #[test]
    fn poke_resets_the_deadline() {
        let mut d = Debounce::new(Duration::from_millis(350));
        let t0 = Instant::now();
        d.poke(t0);
        d.poke(t0 + Duration::from_millis(300));
        // Original deadline passed, but the second poke pushed it out
        assert!(!d.ready(t0 + Duration::from_millis(400)));
        assert!(d.ready(t0 + Duration::from_millis(650)));
    }

    #[test]
    fn cancel_disarms() {
        let mut d = Debounce::default();
        let t0 = Instant::now();
        d.poke(t0);
        d.cancel();
        assert!(!d.ready(t0 + Duration::from_secs(10)));
    }
}
