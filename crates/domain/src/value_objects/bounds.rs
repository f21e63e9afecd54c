//! Inclusive integer ranges used by reward definitions

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// An inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

impl Bounds {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: u32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Uniform sample; degenerates to `min` when `min == max`.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> u32 {
        if self.min >= self.max {
            return self.min;
        }
        rng.gen_range(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::ScriptedRandom;

    #[test]
    fn fixed_bounds_never_consult_rng() {
        let mut rng = ScriptedRandom::new().with_ints(&[99]);
        assert_eq!(Bounds::fixed(7).sample(&mut rng), 7);
    }

    #[test]
    fn sample_stays_in_range() {
        let mut rng = ScriptedRandom::new().with_ints(&[500, 0]);
        let bounds = Bounds::new(10, 20);
        assert_eq!(bounds.sample(&mut rng), 20);
        assert_eq!(bounds.sample(&mut rng), 10);
    }
}
