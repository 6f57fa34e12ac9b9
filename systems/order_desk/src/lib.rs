#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic order desk responsible for emitting new customer orders.

use std::time::Duration;

use kitchen_core::{Command, Event, OrderView, Recipe};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Share of the front order's lifetime that passes before the next order arrives.
pub const DEFAULT_OVERLAP: f32 = 0.45;

/// Configuration parameters required to construct the order desk.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    min_lifetime: Duration,
    max_lifetime: Duration,
    overlap: f32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration drawing lifetimes from the provided range.
    ///
    /// The bounds are swapped when given in the wrong order.
    #[must_use]
    pub fn new(min_lifetime: Duration, max_lifetime: Duration, rng_seed: u64) -> Self {
        let (min_lifetime, max_lifetime) = if min_lifetime <= max_lifetime {
            (min_lifetime, max_lifetime)
        } else {
            (max_lifetime, min_lifetime)
        };
        Self {
            min_lifetime,
            max_lifetime,
            overlap: DEFAULT_OVERLAP,
            rng_seed,
        }
    }

    /// Overrides the share of the front order's lifetime that paces new orders.
    ///
    /// Values are clamped to `0.0..=1.0`; NaN keeps the default.
    #[must_use]
    pub fn with_overlap(mut self, overlap: f32) -> Self {
        if !overlap.is_nan() {
            self.overlap = overlap.clamp(0.0, 1.0);
        }
        self
    }
}

/// Pure system that keeps a steady, overlapping stream of orders flowing.
#[derive(Debug)]
pub struct OrderDesk {
    min_lifetime_ms: u64,
    max_lifetime_ms: u64,
    overlap: f32,
    pacing: Duration,
    rng: ChaCha8Rng,
}

impl OrderDesk {
    /// Creates a new order desk using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            min_lifetime_ms: millis(config.min_lifetime),
            max_lifetime_ms: millis(config.max_lifetime),
            overlap: config.overlap,
            pacing: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and the current order queue to emit order commands.
    ///
    /// An empty queue is refilled immediately. Otherwise a new order arrives
    /// once the pacing timer covers the configured share of the front
    /// order's lifetime.
    pub fn handle(&mut self, events: &[Event], orders: &OrderView, out: &mut Vec<Command>) {
        let Some(front) = orders.front() else {
            out.push(self.next_order());
            self.pacing = Duration::ZERO;
            return;
        };

        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }

        if accumulated.is_zero() {
            return;
        }

        if self.pacing < front.lifetime.mul_f32(self.overlap) {
            self.pacing = self.pacing.saturating_add(accumulated);
        } else {
            out.push(self.next_order());
            self.pacing = Duration::ZERO;
        }
    }

    fn next_order(&mut self) -> Command {
        let recipe = Recipe::ALL[self.rng.gen_range(0..Recipe::ALL.len())];
        let lifetime_ms = self
            .rng
            .gen_range(self.min_lifetime_ms..=self.max_lifetime_ms);
        Command::IssueOrder {
            recipe,
            lifetime: Duration::from_millis(lifetime_ms),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_orders_reversed_bounds() {
        let config = Config::new(Duration::from_secs(70), Duration::from_secs(40), 7);
        assert_eq!(config.min_lifetime, Duration::from_secs(40));
        assert_eq!(config.max_lifetime, Duration::from_secs(70));
    }

    #[test]
    fn overlap_is_clamped() {
        let config = Config::new(Duration::from_secs(1), Duration::from_secs(2), 7).with_overlap(3.0);
        assert_eq!(config.overlap, 1.0);
    }

    #[test]
    fn lifetimes_stay_within_bounds() {
        let mut desk = OrderDesk::new(Config::new(
            Duration::from_secs(40),
            Duration::from_secs(70),
            0x5eed,
        ));
        for _ in 0..64 {
            match desk.next_order() {
                Command::IssueOrder { lifetime, .. } => {
                    assert!(lifetime >= Duration::from_secs(40));
                    assert!(lifetime <= Duration::from_secs(70));
                }
                other => panic!("unexpected command {other:?}"),
            }
        }
    }
}
