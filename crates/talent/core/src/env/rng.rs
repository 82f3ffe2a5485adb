//! RNG oracle and the per-attempt roll stream.
//!
//! The oracle is a pure function from seed to value. [`Dice`] turns it into a
//! stream: every draw derives a fresh seed from the game seed, the attempt
//! nonce and a draw counter, so an attempt replays identically from the same
//! state.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same value.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// LCG step: `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Oracle that returns the same value for every seed.
///
/// `FixedRng::new(0)` makes every failure roll land at zero, so any ability
/// with a non-zero failure rate fails; `FixedRng::new(99)` makes rolls land at
/// the top of their range.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedRng {
    value: u32,
}

impl FixedRng {
    pub const fn new(value: u32) -> Self {
        Self { value }
    }
}

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.value
    }
}

/// Compute deterministic seed from roll components.
///
/// * `game_seed` - Base seed set at game start
/// * `nonce` - Attempt sequence number
/// * `stream` - Independent stream within the attempt
/// * `draw` - Draw counter within the stream
pub fn compute_seed(game_seed: u64, nonce: u64, stream: u32, draw: u32) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = game_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (draw as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Roll stream for one attempt.
///
/// All randomness used by costs, failure checks and effects flows through a
/// single `Dice`, which is the only thing tests need to substitute.
pub struct Dice<'a> {
    rng: &'a dyn RngOracle,
    game_seed: u64,
    nonce: u64,
    draws: u32,
}

impl<'a> Dice<'a> {
    pub fn new(rng: &'a dyn RngOracle, game_seed: u64, nonce: u64) -> Self {
        Self {
            rng,
            game_seed,
            nonce,
            draws: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    fn next(&mut self) -> u32 {
        let seed = compute_seed(self.game_seed, self.nonce, 0, self.draws);
        self.draws = self.draws.wrapping_add(1);
        self.rng.next_u32(seed)
    }

    /// Uniform draw in `[0, max)`; zero when `max <= 0`.
    pub fn random2(&mut self, max: i32) -> i32 {
        if max <= 1 {
            return 0;
        }
        (self.next() % max as u32) as i32
    }

    /// Average of `rolls` uniform draws in `[0, max)`.
    ///
    /// Biased toward the middle of the range; extreme values get rarer as
    /// `rolls` grows.
    pub fn random2avg(&mut self, max: i32, rolls: i32) -> i32 {
        let rolls = rolls.max(1);
        let mut sum = 0;
        for _ in 0..rolls {
            sum += self.random2(max);
        }
        sum / rolls
    }

    /// Inclusive range `[low, high]`.
    pub fn random_range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        low + self.random2(high - low + 1)
    }

    /// Sum of `num` dice with `size` sides each (1-based faces).
    pub fn roll_dice(&mut self, num: i32, size: i32) -> i32 {
        if size <= 0 {
            return 0;
        }
        (0..num.max(0)).map(|_| 1 + self.random2(size)).sum()
    }

    pub fn coinflip(&mut self) -> bool {
        self.random2(2) == 0
    }

    /// Bernoulli trial succeeding `x` times in `y`.
    pub fn x_chance_in_y(&mut self, x: i32, y: i32) -> bool {
        if x <= 0 {
            return false;
        }
        if x >= y {
            return true;
        }
        self.random2(y) < x
    }

    pub fn one_chance_in(&mut self, n: i32) -> bool {
        self.x_chance_in_y(1, n)
    }

    /// `num / den`, rounding the remainder up with matching probability.
    pub fn div_rand_round(&mut self, num: i32, den: i32) -> i32 {
        if den <= 0 {
            return 0;
        }
        let rem = num % den;
        num / den + i32::from(rem > 0 && self.random2(den) < rem)
    }

    /// Uniform choice from a non-empty slice.
    pub fn choose<'s, T>(&mut self, items: &'s [T]) -> Option<&'s T> {
        if items.is_empty() {
            return None;
        }
        let index = self.random2(items.len() as i32) as usize;
        items.get(index)
    }

    /// Weighted choice; entries with non-positive weight never win.
    pub fn choose_weighted<'s, T>(&mut self, items: &'s [(T, i32)]) -> Option<&'s T> {
        let total: i32 = items.iter().map(|(_, w)| (*w).max(0)).sum();
        if total <= 0 {
            return None;
        }
        let mut roll = self.random2(total);
        for (item, weight) in items {
            let weight = (*weight).max(0);
            if roll < weight {
                return Some(item);
            }
            roll -= weight;
        }
        None
    }
}

impl core::fmt::Debug for Dice<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dice")
            .field("game_seed", &self.game_seed)
            .field("nonce", &self.nonce)
            .field("draws", &self.draws)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn same_seed_same_stream() {
        let rng = PcgRng;
        let mut a = Dice::new(&rng, 9, 4);
        let mut b = Dice::new(&rng, 9, 4);
        let xs: Vec<i32> = (0..10).map(|_| a.random2(1000)).collect();
        let ys: Vec<i32> = (0..10).map(|_| b.random2(1000)).collect();
        assert_eq!(xs, ys);
        assert_eq!(a.draws(), 10);
    }

    #[test]
    fn fixed_rng_pins_rolls() {
        let zero = FixedRng::new(0);
        let mut dice = Dice::new(&zero, 0, 0);
        assert_eq!(dice.random2avg(100, 3), 0);
        assert_eq!(dice.roll_dice(3, 6), 3);

        let high = FixedRng::new(99);
        let mut dice = Dice::new(&high, 0, 0);
        assert_eq!(dice.random2avg(100, 3), 99);
        assert!(!dice.coinflip());
    }

    #[test]
    fn degenerate_ranges_do_not_draw() {
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 1, 1);
        assert_eq!(dice.random2(0), 0);
        assert_eq!(dice.random2(1), 0);
        assert_eq!(dice.random_range(5, 5), 5);
        assert_eq!(dice.draws(), 0);
    }

    #[test]
    fn div_rand_round_brackets_quotient() {
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 5, 0);
        for _ in 0..50 {
            let value = dice.div_rand_round(25, 2);
            assert!(value == 12 || value == 13);
        }
        assert_eq!(dice.div_rand_round(10, 2), 5);
    }

    #[test]
    fn weighted_choice_skips_zero_weights() {
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 11, 0);
        let items = [("never", 0), ("always", 5)];
        for _ in 0..20 {
            assert_eq!(dice.choose_weighted(&items), Some(&"always"));
        }
        assert_eq!(dice.choose::<u8>(&[]), None);
    }
}
