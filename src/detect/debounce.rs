//! Temporal filters that turn per-frame readings into discrete events
//!
//! Two different semantics live here and must not be confused:
//! - [`EdgeTrigger`] fires once on a DOWN to UP transition, gated by a cooldown.
//!   Holding the arm up produces nothing after the first event.
//! - [`RateLimiter`] passes a reading through at most once per cooldown window
//!   while the signal is present. It does not look for edges.
//!
//! Both take the current time explicitly so they can be driven by tests.

use std::time::{Duration, Instant};

use super::landmarks::ArmState;

/// Cooldown between two arm-raise events
pub const ARM_COOLDOWN: Duration = Duration::from_millis(400);
/// Minimum spacing between two reported finger counts
pub const FINGER_COOLDOWN: Duration = Duration::from_millis(1000);

/// Rising-edge detector for the arm state
#[derive(Debug, Clone)]
pub struct EdgeTrigger {
    previous: ArmState,
    last_fired: Option<Instant>,
    cooldown: Duration,
}

impl EdgeTrigger {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            previous: ArmState::Down,
            last_fired: None,
            cooldown,
        }
    }

    /// Feed one reading. Returns true on a DOWN to UP edge outside the
    /// cooldown window. The stored state is updated whether or not it fires.
    pub fn update(&mut self, current: ArmState, now: Instant) -> bool {
        let rising = current == ArmState::Up && self.previous == ArmState::Down;
        let cooled = self
            .last_fired
            .is_none_or(|t| now.saturating_duration_since(t) > self.cooldown);

        let fire = rising && cooled;
        if fire {
            self.last_fired = Some(now);
        }
        self.previous = current;
        fire
    }

    pub fn previous(&self) -> ArmState {
        self.previous
    }
}

impl Default for EdgeTrigger {
    fn default() -> Self {
        Self::new(ARM_COOLDOWN)
    }
}

/// At-most-once-per-window gate
#[derive(Debug, Clone)]
pub struct RateLimiter {
    last_emit: Option<Instant>,
    cooldown: Duration,
}

impl RateLimiter {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            last_emit: None,
            cooldown,
        }
    }

    /// Returns true (and restarts the window) if the last admitted reading is
    /// older than the cooldown.
    pub fn admit(&mut self, now: Instant) -> bool {
        let open = self
            .last_emit
            .is_none_or(|t| now.saturating_duration_since(t) > self.cooldown);
        if open {
            self.last_emit = Some(now);
        }
        open
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(FINGER_COOLDOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ArmState::{Down, Up};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_edge_sequence_fires_twice() {
        // DOWN, UP, UP, DOWN, UP with the second UP edge past the cooldown
        let t0 = Instant::now();
        let mut trigger = EdgeTrigger::default();
        let fired: Vec<bool> = [(Down, 0), (Up, 100), (Up, 200), (Down, 300), (Up, 600)]
            .into_iter()
            .map(|(state, at)| trigger.update(state, t0 + ms(at)))
            .collect();
        assert_eq!(fired, vec![false, true, false, false, true]);
    }

    #[test]
    fn test_held_arm_fires_once() {
        let t0 = Instant::now();
        let mut trigger = EdgeTrigger::default();
        let events = (0..100)
            .filter(|&i| trigger.update(Up, t0 + ms(i * 16)))
            .count();
        assert_eq!(events, 1);
    }

    #[test]
    fn test_cooldown_suppresses_second_edge() {
        let t0 = Instant::now();
        let mut trigger = EdgeTrigger::new(ARM_COOLDOWN);
        assert!(trigger.update(Up, t0));
        assert!(!trigger.update(Down, t0 + ms(100)));
        assert!(!trigger.update(Up, t0 + ms(200)));
        // State was still tracked, so a fresh edge after the window fires
        assert!(!trigger.update(Down, t0 + ms(450)));
        assert!(trigger.update(Up, t0 + ms(500)));
    }

    #[test]
    fn test_cooldown_boundary_is_exclusive() {
        let t0 = Instant::now();
        let mut trigger = EdgeTrigger::new(ms(400));
        assert!(trigger.update(Up, t0));
        trigger.update(Down, t0 + ms(200));
        assert!(!trigger.update(Up, t0 + ms(400)));
    }

    #[test]
    fn test_previous_state_tracks_suppressed_reading() {
        let t0 = Instant::now();
        let mut trigger = EdgeTrigger::default();
        trigger.update(Up, t0);
        trigger.update(Down, t0 + ms(10));
        trigger.update(Up, t0 + ms(20));
        assert_eq!(trigger.previous(), Up);
    }

    #[test]
    fn test_rate_limiter_repeated_reading() {
        let t0 = Instant::now();
        let mut limiter = RateLimiter::default();
        let admitted: Vec<u64> = (0..=60)
            .map(|i| i * 25)
            .filter(|&at| limiter.admit(t0 + ms(at)))
            .collect();
        // Every 25ms for 1.5s: admitted at 0, then first sample past 1000ms
        assert_eq!(admitted, vec![0, 1025]);
    }

    #[test]
    fn test_rate_limiter_first_reading_passes() {
        let mut limiter = RateLimiter::new(ms(1000));
        assert!(limiter.admit(Instant::now()));
    }
}
