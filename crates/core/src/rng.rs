use rand::{rngs::StdRng, seq::SliceRandom, Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

/// Result of one dice roll. With advantage the lowest die is kept in `dropped` and
/// left out of `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub dice: Vec<u32>,
    pub dropped: Option<u32>,
    pub total: u32,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.gen_range(0..len))
    }

    pub fn die(&mut self, sides: u32) -> u32 {
        self.rng.gen_range(1..=sides.max(1))
    }

    /// Rolls `count` dice, or `count + 1` dropping the lowest when `advantage` is set.
    pub fn roll(&mut self, count: usize, sides: u32, advantage: bool) -> DiceRoll {
        let thrown = if advantage { count + 1 } else { count };
        let mut dice: Vec<u32> = (0..thrown).map(|_| self.die(sides)).collect();
        let dropped = if advantage {
            dice.sort_unstable();
            Some(dice[0])
        } else {
            None
        };
        let total = dice.iter().sum::<u32>() - dropped.unwrap_or(0);
        DiceRoll {
            dice,
            dropped,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_rolls() {
        let mut a = RngState::from_seed(9);
        let mut b = RngState::from_seed(9);
        for _ in 0..50 {
            assert_eq!(a.roll(2, 8, false), b.roll(2, 8, false));
        }
    }

    #[test]
    fn plain_roll_stays_in_range() {
        let mut rng = RngState::from_seed(1);
        for _ in 0..500 {
            let roll = rng.roll(2, 8, false);
            assert_eq!(roll.dice.len(), 2);
            assert!((2..=16).contains(&roll.total));
            assert_eq!(roll.dropped, None);
        }
    }

    #[test]
    fn advantage_drops_the_lowest() {
        let mut rng = RngState::from_seed(2);
        for _ in 0..500 {
            let roll = rng.roll(2, 8, true);
            assert_eq!(roll.dice.len(), 3);
            let lowest = roll.dice.iter().copied().min().unwrap();
            assert_eq!(roll.dropped, Some(lowest));
            assert_eq!(roll.total, roll.dice.iter().sum::<u32>() - lowest);
        }
    }
}
