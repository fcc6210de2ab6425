//! Delay model: Human-like pauses between keystrokes.
//!
//! Inter-key delays are drawn from a normal distribution whose mean follows
//! the configured typing rate, after the timing observations in Dhakal et
//! al., "Observations on Typing from 136 Million Keystrokes" (CHI 2018).
//!
//! | Rate    | Mean delay | Max delay |
//! |---------|------------|-----------|
//! | 40 WPM  | 300 ms     | 3000 ms   |
//! | 80 WPM  | 150 ms     | 1500 ms   |
//! | 400 WPM | 30 ms      | 300 ms    |

use crate::error::ConfigError;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::time::Duration;

/// Characters per word used for WPM/CPS conversion.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Rate the baseline delays are calibrated for.
pub const REFERENCE_WPM: f64 = 40.0;

/// Mean delay at [`REFERENCE_WPM`]: `1000 / (40 * 5 / 60)` = 300 ms.
pub const BASE_DELAY_MS: f64 = 1000.0 / (REFERENCE_WPM * CHARS_PER_WORD / 60.0);

/// Longest pause at [`REFERENCE_WPM`]. Scales with the rate like the mean.
pub const MAX_DELAY_MS: f64 = 3000.0;

/// Slowest accepted rate.
pub const MIN_WPM: f64 = 0.01;

/// Typing rate in words per minute.
///
/// Characters-per-second values are converted at construction with
/// [`Rate::from_cps`]; the rate itself is always WPM.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Rate(f64);

impl Rate {
    /// Default rate (80 WPM).
    pub const DEFAULT: Self = Self(80.0);
    /// The calibration rate (40 WPM).
    pub const REFERENCE: Self = Self(REFERENCE_WPM);

    /// Create a rate from words per minute.
    pub fn wpm(wpm: f64) -> Result<Self, ConfigError> {
        if wpm.is_finite() && wpm >= MIN_WPM {
            Ok(Self(wpm))
        } else {
            Err(ConfigError::InvalidRate(wpm))
        }
    }

    /// Create a rate from characters per second.
    pub fn from_cps(cps: f64) -> Result<Self, ConfigError> {
        Self::wpm(cps * 60.0 / CHARS_PER_WORD).map_err(|_| ConfigError::InvalidRate(cps))
    }

    /// Words per minute.
    #[inline]
    pub const fn as_wpm(self) -> f64 {
        self.0
    }

    /// Characters per second.
    #[inline]
    pub fn cps(self) -> f64 {
        self.0 * CHARS_PER_WORD / 60.0
    }

    /// How much slower than [`REFERENCE_WPM`] this rate is.
    #[inline]
    pub fn speed_factor(self) -> f64 {
        REFERENCE_WPM / self.0
    }

    /// Mean inter-key delay in milliseconds.
    #[inline]
    pub fn mean_delay_ms(self) -> f64 {
        BASE_DELAY_MS * self.speed_factor()
    }

    /// Upper clamp of the inter-key delay in milliseconds.
    #[inline]
    pub fn max_delay_ms(self) -> f64 {
        MAX_DELAY_MS * self.speed_factor()
    }
}

impl Default for Rate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Debug for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} WPM", self.0)
    }
}

/// Samples inter-key delays from an injected random source.
#[derive(Debug, Clone)]
pub struct DelayModel<R = SmallRng> {
    rng: R,
}

impl DelayModel<SmallRng> {
    /// Create a model seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    /// Create a deterministic model.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl Default for DelayModel<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> DelayModel<R> {
    /// Create a model drawing from `rng`.
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a delay in milliseconds, in `[0, rate.max_delay_ms()]`.
    ///
    /// The draw is normal with mean `rate.mean_delay_ms()` and a standard
    /// deviation of half the mean.
    pub fn sample_millis(&mut self, rate: Rate) -> f64 {
        let mean = rate.mean_delay_ms();
        let z: f64 = self.rng.sample(StandardNormal);
        (mean + z * mean / 2.0).clamp(0.0, rate.max_delay_ms())
    }

    /// Draw a delay as a [`Duration`].
    pub fn sample(&mut self, rate: Rate) -> Duration {
        Duration::from_secs_f64(self.sample_millis(rate) / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_base_delay_constant() {
        assert!((BASE_DELAY_MS - 300.0).abs() < 1e-9);
        assert!((Rate::REFERENCE.mean_delay_ms() - 300.0).abs() < 1e-9);
        assert!((Rate::REFERENCE.max_delay_ms() - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn test_rate_rejects_non_positive() {
        assert_eq!(Rate::wpm(0.0), Err(ConfigError::InvalidRate(0.0)));
        assert_eq!(Rate::wpm(-5.0), Err(ConfigError::InvalidRate(-5.0)));
        assert!(Rate::wpm(f64::NAN).is_err());
        assert!(Rate::wpm(f64::INFINITY).is_err());
        assert!(Rate::wpm(MIN_WPM / 2.0).is_err());
        assert!(Rate::from_cps(0.0).is_err());
    }

    #[test]
    fn test_cps_conversion() {
        let rate = Rate::from_cps(10.0).unwrap();
        assert!((rate.as_wpm() - 120.0).abs() < 1e-9);
        assert!((Rate::REFERENCE.cps() - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_speed_factor_scales_mean() {
        let fast = Rate::wpm(400.0).unwrap();
        assert!((fast.speed_factor() - 0.1).abs() < 1e-12);
        assert!((fast.mean_delay_ms() - 30.0).abs() < 1e-9);
        assert!((Rate::DEFAULT.mean_delay_ms() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = DelayModel::seeded(7);
        let mut b = DelayModel::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.sample(Rate::DEFAULT), b.sample(Rate::DEFAULT));
        }
    }

    #[test]
    fn test_mean_converges_at_reference_rate() {
        let mut model = DelayModel::seeded(0x5eed);
        let n = 20_000;
        let total: f64 = (0..n).map(|_| model.sample_millis(Rate::REFERENCE)).sum();
        let mean = total / f64::from(n);

        // Clamping the lower tail lifts the expectation to about 301.3 ms.
        assert!((292.0..311.0).contains(&mean), "mean was {mean}");
    }

    proptest! {
        #[test]
        fn prop_sample_within_bounds(wpm in 0.5f64..2000.0, seed in any::<u64>()) {
            let rate = Rate::wpm(wpm).unwrap();
            let mut model = DelayModel::seeded(seed);
            for _ in 0..16 {
                let ms = model.sample_millis(rate);
                prop_assert!(ms >= 0.0);
                prop_assert!(ms <= 3000.0 * 40.0 / wpm + 1e-9);
            }
        }
    }
}
