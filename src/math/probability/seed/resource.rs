use rand::SeedableRng;
use rand::rngs::StdRng;

/// Source of the random generator for one placement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedResource {
    pub seed: Option<u64>,
}

impl SeedResource {
    pub fn from_option(seed: Option<u64>) -> Self {
        Self { seed }
    }

    /// Fresh generator: seeded when a seed is set, from the thread rng otherwise.
    pub fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => {
                let mut thread_rng = rand::rng();
                StdRng::from_rng(&mut thread_rng)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_unseeded_rngs_differ() {
        let s = SeedResource::from_option(None);
        let a: u64 = s.make_rng().random();
        let b: u64 = s.make_rng().random();
        assert_ne!(a, b);
    }

    #[test]
    fn test_seeded_rng_repeats() {
        let s = SeedResource::from_option(Some(7));
        let a: Vec<f64> = (0..5).map(|_| s.make_rng().random()).collect();
        let mut rng1 = s.make_rng();
        let mut rng2 = s.make_rng();
        let b: Vec<f64> = (0..5).map(|_| rng1.random()).collect();
        let c: Vec<f64> = (0..5).map(|_| rng2.random()).collect();
        assert_eq!(b, c);
        assert!(a.iter().all(|v| *v == a[0]));
    }
}
