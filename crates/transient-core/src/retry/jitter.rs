//! Random source for backoff jitter.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Picks a delay within the backoff envelope.
///
/// `ThreadLocal` draws from each thread's own generator, so concurrent
/// evaluations never contend. `Seeded` shares one generator behind a lock and
/// gives reproducible sequences.
#[derive(Debug, Default)]
pub enum Jitter {
    #[default]
    ThreadLocal,
    Seeded(Mutex<StdRng>),
}

impl Jitter {
    pub fn seeded(seed: u64) -> Self {
        Jitter::Seeded(Mutex::new(StdRng::seed_from_u64(seed)))
    }

    /// Uniform draw in `[0, upper)`; 0 when the range is empty.
    pub fn draw_below(&self, upper: u64) -> u64 {
        if upper == 0 {
            return 0;
        }
        match self {
            Jitter::ThreadLocal => rand::thread_rng().gen_range(0..upper),
            Jitter::Seeded(rng) => {
                // A panic elsewhere cannot leave the generator in a bad state.
                let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                rng.gen_range(0..upper)
            }
        }
    }
}

impl Clone for Jitter {
    /// Seeded sources are cloned at their current position.
    fn clone(&self) -> Self {
        match self {
            Jitter::ThreadLocal => Jitter::ThreadLocal,
            Jitter::Seeded(rng) => {
                let rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                Jitter::Seeded(Mutex::new(rng.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_range_draws_zero() {
        assert_eq!(Jitter::ThreadLocal.draw_below(0), 0);
        assert_eq!(Jitter::seeded(1).draw_below(0), 0);
    }

    #[test]
    fn draws_stay_below_upper() {
        let jitter = Jitter::default();
        for _ in 0..1000 {
            assert!(jitter.draw_below(10) < 10);
        }
        assert_eq!(jitter.draw_below(1), 0);
    }

    #[test]
    fn seeded_is_reproducible() {
        let a = Jitter::seeded(42);
        let b = Jitter::seeded(42);
        let xs: Vec<u64> = (0..16).map(|_| a.draw_below(10_000)).collect();
        let ys: Vec<u64> = (0..16).map(|_| b.draw_below(10_000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn draws_cover_the_range() {
        let jitter = Jitter::seeded(7);
        let mut seen = [false; 10];
        for _ in 0..1000 {
            seen[jitter.draw_below(10) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
