// Seeded, portable pseudo-random number generator.
//
// Implements xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64 seeding,
// hand-rolled with zero external dependencies. Procedural plot scattering in
// `siteplan_core` draws every random decision from an explicit `PlanRng`
// instance passed into the routine — there is no global seed and no OS
// entropy anywhere in the project, so a session re-run with the same seed
// reproduces the same plots.
//
// **Critical constraint: determinism.** Every method must produce identical
// output given the same prior state, on every platform and at every
// optimization level. No floating-point arithmetic in the core generator.

use serde::{Deserialize, Serialize};

/// Xoshiro256++ PRNG — the project's sole source of randomness.
///
/// Each session owns its own `PlanRng`, seeded from `PlanConfig::rng_seed`.
/// The serialized state round-trips, so a snapshotted session resumes its
/// random stream exactly where it left off.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanRng {
    s: [u64; 4],
}

impl PlanRng {
    /// Create a new PRNG seeded from a `u64`, expanding the seed into the
    /// 256-bit internal state via SplitMix64 (the seeding procedure the
    /// xoshiro authors recommend).
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Generate a `u32` from the upper 32 bits of a `u64`.
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate a uniform `f32` in [0, 1) from the upper 24 bits of a `u64`
    /// (24 bits fills the f32 mantissa exactly).
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Generate a uniform random `usize` in `[low, high)`.
    ///
    /// Uses rejection sampling to avoid modulo bias.
    /// Panics if `low >= high`.
    pub fn range_usize(&mut self, low: usize, high: usize) -> usize {
        assert!(low < high, "range_usize: low must be less than high");
        let (low, high) = (low as u64, high as u64);
        let range = high - low;
        if range.is_power_of_two() {
            return (low + (self.next_u64() & (range - 1))) as usize;
        }
        let threshold = range.wrapping_neg() % range; // = (2^64 - range) % range
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return (low + (r % range)) as usize;
            }
        }
    }

    /// Return `true` with probability `p`. Values outside [0, 1] clamp:
    /// `p <= 0.0` is always false, `p >= 1.0` always true.
    pub fn random_bool(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }
}

/// SplitMix64 — used only to expand a small seed into the xoshiro state.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
