use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Source of uniform random draws used by fighter creation, battles and AI tiers.
///
/// Every random decision in the crate goes through this trait so that callers
/// can substitute a seeded generator ([`BattleRng`]) or a fixed script of draws
/// ([`ScriptedRandom`]).
pub trait RandomSource {
    /// Returns a uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Returns a uniform draw in `[low, high)`.
    fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Returns `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Returns a uniform index in `0..len` (`0` when `len` is zero).
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn index(&mut self, len: usize) -> usize {
        let i = (self.next_f64() * len as f64) as usize;
        i.min(len.saturating_sub(1))
    }
}

impl<T> RandomSource for &mut T
where
    T: RandomSource + ?Sized,
{
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Seed for reproducible battles.
///
/// A 128-bit seed, serialized as a 32-character hex string, used to
/// initialize [`BattleRng`]. The same seed replays the same battle.
///
/// # Example
///
/// ```
/// use mlbattle_engine::{BattleRng, BattleSeed, RandomSource as _};
/// use rand::Rng as _;
///
/// let seed: BattleSeed = rand::rng().random();
/// let mut a = BattleRng::with_seed(seed);
/// let mut b = BattleRng::with_seed(seed);
/// assert_eq!(a.next_f64(), b.next_f64());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleSeed([u8; 16]);

impl BattleSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Parses a 32-character hex string (either case).
    pub fn from_hex(hex_str: &str) -> Result<Self, SeedParseError> {
        if hex_str.len() != 32 {
            return Err(SeedParseError::Length(hex_str.len()));
        }
        let num = u128::from_str_radix(hex_str, 16).map_err(|_| SeedParseError::Digit)?;
        Ok(Self(num.to_be_bytes()))
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("{:032x}", u128::from_be_bytes(self.0))
    }
}

/// Error returned when a seed string is not 32 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    #[display("invalid hex: expected 32 characters, got {_0}")]
    Length(#[error(not(source))] usize),
    #[display("invalid hex: non-hex digit")]
    Digit,
}

impl std::str::FromStr for BattleSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl std::fmt::Display for BattleSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for BattleSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for BattleSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `BattleSeed` values with `rng.random()`.
impl Distribution<BattleSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BattleSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BattleSeed(seed)
    }
}

/// Production random source backed by `Pcg32`.
#[derive(Debug, Clone)]
pub struct BattleRng {
    seed: BattleSeed,
    rng: Pcg32,
}

impl Default for BattleRng {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleRng {
    /// Creates a generator with a fresh seed from the thread-local RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: BattleSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    #[must_use]
    pub fn seed(&self) -> BattleSeed {
        self.seed
    }

    /// Derives an independent generator seeded from this one.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self::with_seed(self.rng.random())
    }
}

impl RandomSource for BattleRng {
    fn next_f64(&mut self) -> f64 {
        self.rng.random()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// An empty script always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: Vec<f64>,
    pos: usize,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            pos: 0,
        }
    }

    /// A source that always returns `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }

    /// Number of draws taken so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let v = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod battle_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: BattleSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: BattleSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = BattleSeed::from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
        }

        #[test]
        fn test_deserialize_uppercase_hex() {
            let json = "\"0123456789ABCDEFFEDCBA9876543210\"";
            let seed: BattleSeed = serde_json::from_str(json).unwrap();
            assert_eq!(seed.to_hex(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_error_wrong_length() {
            for json in ["\"\"", "\"0123456789abcdef0123456789abcde\""] {
                let err = serde_json::from_str::<BattleSeed>(json).unwrap_err();
                assert!(err.to_string().contains("invalid hex"));
            }
        }

        #[test]
        fn test_error_invalid_hex_characters() {
            let err = "ghijklmnopqrstuvwxyzghijklmnopqr"
                .parse::<BattleSeed>()
                .unwrap_err();
            assert_eq!(err, SeedParseError::Digit);
        }
    }

    #[test]
    fn test_same_seed_same_draws() {
        let seed = BattleSeed::from_bytes([7; 16]);
        let mut a = BattleRng::with_seed(seed);
        let mut b = BattleRng::with_seed(seed);
        for _ in 0..50 {
            let x = a.next_f64();
            assert!((0.0..1.0).contains(&x));
            assert_eq!(x, b.next_f64());
        }
    }

    #[test]
    fn test_fork_is_reproducible() {
        let seed = BattleSeed::from_bytes([3; 16]);
        let mut a = BattleRng::with_seed(seed);
        let mut b = BattleRng::with_seed(seed);
        let mut fa = a.fork();
        let mut fb = b.fork();
        assert_eq!(fa.seed(), fb.seed());
        assert_ne!(fa.seed(), seed);
        assert_eq!(fa.next_f64(), fb.next_f64());
        assert_eq!(a.next_f64(), b.next_f64());
    }

    #[test]
    fn test_scripted_random_cycles() {
        let mut rng = ScriptedRandom::new([0.1, 0.9]);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.next_f64(), 0.9);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.consumed(), 3);
        assert_eq!(ScriptedRandom::default().next_f64(), 0.0);
    }

    #[test]
    fn test_derived_draws() {
        let mut rng = ScriptedRandom::constant(0.5);
        assert_eq!(rng.range_f64(-10.0, 10.0), 0.0);
        assert!(rng.chance(0.6));
        assert!(!rng.chance(0.5));
        assert_eq!(rng.index(4), 2);
        assert_eq!(ScriptedRandom::constant(0.999_999).index(3), 2);
        assert_eq!(rng.index(0), 0);
    }
}
