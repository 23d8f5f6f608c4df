use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Per-employee guess throttle for the PIN verifier.
///
/// State lives in process memory only: counters reset on restart, and a
/// horizontally scaled deployment gets one counter per instance. That is an
/// accepted constraint for a single-instance internal tool; anything beyond
/// that needs this state moved into the credential store.

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_LOCKOUT: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Allowed,
    Locked { remaining: Duration },
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    attempt_count: u32,
    locked_until: Option<Instant>,
}

#[derive(Debug)]
pub struct PinRateLimiter {
    max_attempts: u32,
    lockout: Duration,
    entries: Mutex<HashMap<i32, Entry>>,
}

impl Default for PinRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_LOCKOUT)
    }
}

impl PinRateLimiter {
    pub fn new(max_attempts: u32, lockout: Duration) -> Self {
        Self {
            max_attempts,
            lockout,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Must be consulted before every verification attempt.
    pub fn check(&self, employee_id: i32) -> Gate {
        self.check_at(employee_id, Instant::now())
    }

    /// Record a wrong-PIN outcome. Reaching the attempt threshold starts the
    /// lockout window.
    pub fn record_failure(&self, employee_id: i32) {
        self.record_failure_at(employee_id, Instant::now());
    }

    /// A successful verification clears all throttle state for the employee.
    pub fn record_success(&self, employee_id: i32) {
        let mut entries = self.entries.lock().expect("rate limiter poisoned");
        entries.remove(&employee_id);
    }

    fn check_at(&self, employee_id: i32, now: Instant) -> Gate {
        let entries = self.entries.lock().expect("rate limiter poisoned");
        match entries.get(&employee_id).and_then(|e| e.locked_until) {
            Some(until) if until > now => Gate::Locked {
                remaining: until - now,
            },
            _ => Gate::Allowed,
        }
    }

    fn record_failure_at(&self, employee_id: i32, now: Instant) {
        let mut entries = self.entries.lock().expect("rate limiter poisoned");
        let entry = entries.entry(employee_id).or_insert(Entry {
            attempt_count: 0,
            locked_until: None,
        });

        // A failure after an expired lockout opens a fresh window rather than
        // continuing the old count.
        if matches!(entry.locked_until, Some(until) if until <= now) {
            entry.attempt_count = 0;
            entry.locked_until = None;
        }

        entry.attempt_count += 1;
        if entry.attempt_count >= self.max_attempts {
            entry.locked_until = Some(now + self.lockout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> PinRateLimiter {
        PinRateLimiter::new(5, Duration::from_secs(300))
    }

    #[test]
    fn test_allows_initial_attempts() {
        let rl = limiter();
        assert_eq!(rl.check(1), Gate::Allowed);
        for _ in 0..4 {
            rl.record_failure(1);
        }
        assert_eq!(rl.check(1), Gate::Allowed);
    }

    #[test]
    fn test_locks_after_threshold() {
        let rl = limiter();
        let now = Instant::now();
        for _ in 0..5 {
            rl.record_failure_at(1, now);
        }
        match rl.check_at(1, now) {
            Gate::Locked { remaining } => assert_eq!(remaining, Duration::from_secs(300)),
            Gate::Allowed => panic!("expected lockout after 5 failures"),
        }
    }

    #[test]
    fn test_lockout_is_per_employee() {
        let rl = limiter();
        let now = Instant::now();
        for _ in 0..5 {
            rl.record_failure_at(1, now);
        }
        assert_eq!(rl.check_at(2, now), Gate::Allowed);
    }

    #[test]
    fn test_lockout_expires() {
        let rl = limiter();
        let now = Instant::now();
        for _ in 0..5 {
            rl.record_failure_at(1, now);
        }
        let later = now + Duration::from_secs(301);
        assert_eq!(rl.check_at(1, later), Gate::Allowed);
    }

    #[test]
    fn test_failure_after_expiry_starts_fresh_window() {
        let rl = limiter();
        let now = Instant::now();
        for _ in 0..5 {
            rl.record_failure_at(1, now);
        }
        let later = now + Duration::from_secs(301);
        // Attempt #1 of the new window: four more failures fit before the
        // next lockout.
        rl.record_failure_at(1, later);
        assert_eq!(rl.check_at(1, later), Gate::Allowed);
        for _ in 0..3 {
            rl.record_failure_at(1, later);
        }
        assert_eq!(rl.check_at(1, later), Gate::Allowed);
        rl.record_failure_at(1, later);
        assert!(matches!(rl.check_at(1, later), Gate::Locked { .. }));
    }

    #[test]
    fn test_success_clears_state() {
        let rl = limiter();
        let now = Instant::now();
        for _ in 0..4 {
            rl.record_failure_at(1, now);
        }
        rl.record_success(1);
        for _ in 0..4 {
            rl.record_failure_at(1, now);
        }
        assert_eq!(rl.check_at(1, now), Gate::Allowed);
    }
}
