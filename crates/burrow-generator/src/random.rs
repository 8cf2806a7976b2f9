use crate::Generator;
use burrow_core::shortcode::{ALPHABET, SHORT_CODE_LENGTH};
use burrow_core::ShortCode;
use rand::rngs::OsRng;
use rand::Rng;

/// Draws every character uniformly from `[A-Za-z0-9]` using the operating
/// system's cryptographically secure RNG.
///
/// The keyspace is 62^8 (about 2.18 * 10^14), so collisions are rare but
/// still possible.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortCode {
        let mut rng = OsRng;
        let code: String = (0..SHORT_CODE_LENGTH)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generates_valid_short_codes() {
        let generator = RandomGenerator::new();

        for _ in 0..1_000 {
            let code = generator.generate();
            assert!(ShortCode::new(code.as_str()).is_ok(), "invalid code {code}");
        }
    }

    #[test]
    fn codes_are_distinct() {
        let generator = RandomGenerator::new();

        let codes: HashSet<_> = (0..1_000).map(|_| generator.generate()).collect();
        assert_eq!(codes.len(), 1_000);
    }

    #[test]
    fn uses_the_whole_alphabet() {
        let generator = RandomGenerator::new();

        let seen: HashSet<char> = (0..2_000)
            .flat_map(|_| generator.generate().as_str().chars().collect::<Vec<_>>())
            .collect();
        // 16k draws over 62 symbols; every symbol shows up with overwhelming probability.
        assert_eq!(seen.len(), ALPHABET.len());
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
