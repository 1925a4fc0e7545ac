use rand::Rng;

/// `SeedSource` picks the seed of a new draw.
///
/// The seed is the only random input of a draw: it fixes the assignment and
/// every reveal token derived for it.
pub trait SeedSource: Send + Sync {
    /// Return a seed for the next draw of a group. `previous` is the seed of
    /// the group's current draw, if it has one.
    fn next_seed(&self, previous: Option<i64>) -> i64;
}

/// Fresh random seed on every draw from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSeed;

impl SeedSource for RandomSeed {
    fn next_seed(&self, previous: Option<i64>) -> i64 {
        let mut rng = rand::thread_rng();
        loop {
            let seed: i64 = rng.gen();
            // re-using the old seed would keep the old links valid
            if Some(seed) != previous {
                return seed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_seed_never_repeats_previous() {
        let seeds = RandomSeed;
        let first = seeds.next_seed(None);

        for _ in 0..100 {
            assert_ne!(seeds.next_seed(Some(first)), first);
        }
    }
}
