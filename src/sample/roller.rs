use crate::common::{Float, NonZeroUInt};
use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};

/// Rolls `count` dice with faces `1..=sides` and totals them.
///
/// Every [Rng] is a roller, drawing each face uniformly.
pub trait Roller {
    fn roll_sum(&mut self, count: NonZeroUInt, sides: NonZeroUInt) -> Float;
}

impl<R: Rng> Roller for R {
    fn roll_sum(&mut self, count: NonZeroUInt, sides: NonZeroUInt) -> Float {
        let faces = Uniform::new_inclusive(1, sides.get());
        (0..count.get()).map(|_| Float::from(faces.sample(self))).sum()
    }
}

#[cfg(test)]
pub(crate) use scripted::ScriptedRoller;

#[cfg(test)]
mod scripted {
    use super::*;
    use crate::common::UInt;
    use std::collections::VecDeque;

    /// Hands out a fixed list of faces in order. Running out is a test failure.
    pub(crate) struct ScriptedRoller {
        faces: VecDeque<UInt>,
    }

    impl ScriptedRoller {
        pub fn new(faces: &[UInt]) -> Self {
            Self {
                faces: faces.iter().copied().collect(),
            }
        }

        pub fn remaining(&self) -> usize {
            self.faces.len()
        }
    }

    impl Roller for ScriptedRoller {
        fn roll_sum(&mut self, count: NonZeroUInt, sides: NonZeroUInt) -> Float {
            let mut total = 0.0;
            for _ in 0..count.get() {
                let face = self.faces.pop_front().expect("scripted faces ran out");
                assert!((1..=sides.get()).contains(&face), "{} is not a face of d{}", face, sides);
                total += Float::from(face);
            }
            total
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::UInt;
    use rand::{rngs::StdRng, SeedableRng};

    fn nz(x: UInt) -> NonZeroUInt {
        NonZeroUInt::new(x).unwrap()
    }

    #[test]
    fn test_rng_sums_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let faces: Vec<_> = (0..1000).map(|_| rng.roll_sum(nz(1), nz(6))).collect();
        assert!(faces.iter().all(|x| (1.0..=6.0).contains(x)));
        for face in 1..=6 {
            assert!(faces.contains(&Float::from(face)));
        }

        for _ in 0..1000 {
            let total = rng.roll_sum(nz(3), nz(6));
            assert!((3.0..=18.0).contains(&total));
            assert_eq!(total.fract(), 0.0);
        }
    }

    #[test]
    fn test_one_sided_dice() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(rng.roll_sum(nz(4), nz(1)), 4.0);
    }

    #[test]
    fn test_scripted_roller() {
        let mut roller = ScriptedRoller::new(&[1, 2, 3, 6]);
        assert_eq!(roller.roll_sum(nz(3), nz(6)), 6.0);
        assert_eq!(roller.remaining(), 1);
        assert_eq!(roller.roll_sum(nz(1), nz(6)), 6.0);
        assert_eq!(roller.remaining(), 0);
    }
}
