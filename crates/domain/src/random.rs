//! Injected randomness.
//!
//! The domain never owns an RNG. Callers hand in a `RandomSource`, which the
//! engine backs with either the thread RNG or a seeded one.

/// Source of uniform random values.
pub trait RandomSource {
    /// Uniform integer in `[min, max]` inclusive. Returns `min` when
    /// `max <= min`.
    fn gen_range(&mut self, min: u32, max: u32) -> u32;

    /// Uniform float in `[0, 100)`.
    fn gen_percent(&mut self) -> f64;

    /// Uniform index into a collection of `len` elements (`len > 0`).
    fn gen_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let max = u32::try_from(len - 1).unwrap_or(u32::MAX);
        self.gen_range(0, max) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn gen_range(&mut self, min: u32, max: u32) -> u32 {
        (**self).gen_range(min, max)
    }

    fn gen_percent(&mut self) -> f64 {
        (**self).gen_percent()
    }
}

/// Fisher-Yates shuffle driven by a `RandomSource`.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_index(i + 1);
        items.swap(i, j);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedRandom;
    use super::*;

    #[test]
    fn gen_index_of_single_element_is_zero() {
        let mut rng = ScriptedRandom::new().with_ints(&[7]);
        assert_eq!(rng.gen_index(1), 0);
    }

    #[test]
    fn shuffle_keeps_all_elements() {
        let mut rng = ScriptedRandom::new().with_ints(&[0, 2, 1, 0]);
        let mut items = vec![1, 2, 3, 4, 5];
        shuffle(&mut items, &mut rng);
        items.sort();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }
}
