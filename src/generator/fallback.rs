use rand::{Rng, seq::IndexedRandom};

/// Last-resort answer when the configured set is empty.
const LAST_RESORT: &str = "Przepraszam, mam chwilową przerwę w myśleniu! 😅 Spróbuj ponownie za chwilę.";

/// Canned answers served when every provider failed. Never empty.
#[derive(Debug, Clone)]
pub struct FallbackSet {
    responses: Vec<String>,
}

impl FallbackSet {
    /// Blank entries are dropped; an empty list falls back to the built-in set.
    pub fn new(responses: impl IntoIterator<Item = String>) -> Self {
        let responses: Vec<String> = responses
            .into_iter()
            .filter(|r| !r.trim().is_empty())
            .collect();

        if responses.is_empty() {
            return Self::default();
        }

        Self { responses }
    }

    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    pub fn contains(&self, text: &str) -> bool {
        self.responses.iter().any(|r| r == text)
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        pick_fallback(&self.responses, rng)
    }
}

impl Default for FallbackSet {
    fn default() -> Self {
        Self {
            responses: crate::config::default_fallback_responses(),
        }
    }
}

/// Uniform choice from `responses`.
pub fn pick_fallback<'a, R: Rng + ?Sized>(responses: &'a [String], rng: &mut R) -> &'a str {
    responses
        .choose(rng)
        .map(String::as_str)
        .unwrap_or(LAST_RESORT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    #[test]
    fn test_pick_is_member() {
        let set = FallbackSet::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            assert!(set.contains(set.pick(&mut rng)));
        }
    }

    #[test]
    fn test_pick_is_deterministic_for_seed() {
        let set = FallbackSet::default();
        let first: Vec<String> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| set.pick(&mut rng).to_string()).collect()
        };
        let second: Vec<String> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| set.pick(&mut rng).to_string()).collect()
        };

        assert_eq!(first, second);
    }

    #[test]
    fn test_pick_covers_whole_set() {
        let set = FallbackSet::default();
        let mut rng = StdRng::seed_from_u64(1);
        let seen: HashSet<&str> = (0..200).map(|_| set.pick(&mut rng)).collect();

        assert_eq!(seen.len(), set.len());
    }

    #[test]
    fn test_empty_configuration_uses_builtin_set() {
        let set = FallbackSet::new(vec!["  ".to_string()]);
        assert_eq!(set.len(), 4);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_pick_from_empty_slice() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(pick_fallback(&[], &mut rng), LAST_RESORT);
    }
}
