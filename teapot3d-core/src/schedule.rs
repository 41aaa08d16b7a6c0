/// Monotonic "next due time" tracking for periodic activities
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    interval: Duration,
    next_due: Instant,
}

impl Deadline {
    /// First firing is one interval after `now`
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    pub fn reset(&mut self, now: Instant) {
        self.next_due = now + self.interval;
    }

    /// Fire at most once per call.
    ///
    /// A deadline that has fallen more than one interval behind is
    /// re-anchored to `now` instead of replaying every missed tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_interval() {
        let start = Instant::now();
        let interval = Duration::from_millis(30);
        let mut deadline = Deadline::new(interval, start);

        assert!(!deadline.poll(start));
        assert!(!deadline.poll(start + Duration::from_millis(29)));
        assert!(deadline.poll(start + interval));
        assert!(!deadline.poll(start + interval));
        assert!(deadline.poll(start + interval * 2));
    }

    #[test]
    fn test_keeps_cadence_when_slightly_late() {
        let start = Instant::now();
        let interval = Duration::from_millis(30);
        let mut deadline = Deadline::new(interval, start);

        assert!(deadline.poll(start + Duration::from_millis(35)));
        assert_eq!(deadline.next_due(), start + interval * 2);
    }

    #[test]
    fn test_reanchors_when_far_behind() {
        let start = Instant::now();
        let interval = Duration::from_millis(30);
        let mut deadline = Deadline::new(interval, start);

        let late = start + Duration::from_millis(500);
        assert!(deadline.poll(late));
        assert!(!deadline.poll(late));
        assert_eq!(deadline.next_due(), late + interval);
    }

    #[test]
    fn test_reset() {
        let start = Instant::now();
        let mut deadline = Deadline::new(Duration::from_secs(1), start);
        let later = start + Duration::from_millis(900);
        deadline.reset(later);
        assert!(!deadline.poll(start + Duration::from_secs(1)));
        assert!(deadline.poll(later + Duration::from_secs(1)));
    }
}
