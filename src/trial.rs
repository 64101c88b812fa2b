use rand::Rng;

use crate::error::{Error, Result};
use crate::union_find::DisjointSet;

pub const DEFAULT_PRISONERS: usize = 100;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// every cycle fits within the bound, so every prisoner finds their number
    Found,
    NotFound,
}

impl Outcome {
    pub fn is_found(self) -> bool {
        self == Outcome::Found
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TrialParams {
    pub prisoners: usize,
    /// boxes each prisoner may open
    pub cycle_bound: usize,
}

impl TrialParams {
    pub fn new(prisoners: usize, cycle_bound: usize) -> Result<Self> {
        if prisoners == 0 {
            return Err(Error::InvalidParams(
                "need at least one prisoner".to_string(),
            ));
        }
        Ok(TrialParams {
            prisoners,
            cycle_bound,
        })
    }

    /// The classic setup, where each prisoner may open half the boxes.
    pub fn classic(prisoners: usize) -> Result<Self> {
        TrialParams::new(prisoners, prisoners / 2)
    }
}

impl Default for TrialParams {
    fn default() -> Self {
        TrialParams {
            prisoners: DEFAULT_PRISONERS,
            cycle_bound: DEFAULT_PRISONERS / 2,
        }
    }
}

/// Simulates one room of boxes.
///
/// Walks a Fisher-Yates shuffle from the top index down, pairing `current`
/// with a partner drawn from `[0, current]`. Instead of swapping, each pair is
/// unioned, so the forest tracks the cycles of the shuffled permutation as it
/// is built. Bails out as soon as any cycle outgrows the bound.
pub fn run_trial<R: Rng>(params: TrialParams, rng: &mut R) -> Outcome {
    run_trial_with(params, |current| rng.gen_range(0..=current))
}

/// [`run_trial`] with the partner draws supplied by `draw`, which is called
/// with `current` and must return an index in `[0, current]`.
pub fn run_trial_with<F>(params: TrialParams, mut draw: F) -> Outcome
where
    F: FnMut(usize) -> usize,
{
    let mut boxes = DisjointSet::new(params.prisoners);
    for current in (1..params.prisoners).rev() {
        let partner = draw(current);
        assert!(
            partner <= current,
            "partner {} drawn outside [0, {}]",
            partner,
            current
        );

        boxes.union(current, partner);
        if boxes.partition_size(current) > params.cycle_bound {
            return Outcome::NotFound;
        }
    }
    Outcome::Found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Seed;

    fn params(prisoners: usize, cycle_bound: usize) -> TrialParams {
        TrialParams::new(prisoners, cycle_bound).unwrap()
    }

    #[test]
    fn test_single_prisoner_always_found() {
        let mut rng = Seed::Fixed(7).rng_for(0).unwrap();
        for bound in 0..4 {
            assert_eq!(run_trial(params(1, bound), &mut rng), Outcome::Found);
        }
        // the loop never runs, so draw is never called
        let outcome = run_trial_with(params(1, 0), |_| panic!("no draws expected"));
        assert_eq!(outcome, Outcome::Found);
    }

    #[test]
    fn test_zero_bound_fails_on_first_union() {
        let mut calls = 0;
        let outcome = run_trial_with(params(10, 0), |current| {
            calls += 1;
            current
        });
        assert_eq!(outcome, Outcome::NotFound);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_identity_permutation_is_found() {
        // every partner is itself, so every cycle has length one
        let outcome = run_trial_with(params(100, 1), |current| current);
        assert_eq!(outcome, Outcome::Found);
    }

    #[test]
    fn test_single_long_cycle_fails_when_it_crosses_bound() {
        // partner 0 every time grows one cycle by one per step
        let mut calls = 0;
        let outcome = run_trial_with(params(10, 4), |_| {
            calls += 1;
            0
        });
        assert_eq!(outcome, Outcome::NotFound);
        // sizes after each union: 2, 3, 4, 5 -> fails on the fourth draw
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_partial_cycle_within_bound() {
        // indices 9 down to 4 chain into one cycle of six, the rest stay fixed
        let outcome = run_trial_with(params(10, 6), |current| {
            if current >= 5 {
                current - 1
            } else {
                current
            }
        });
        assert_eq!(outcome, Outcome::Found);

        let outcome = run_trial_with(params(10, 5), |current| {
            if current >= 5 {
                current - 1
            } else {
                current
            }
        });
        assert_eq!(outcome, Outcome::NotFound);
    }

    #[test]
    fn test_same_draws_same_outcome() {
        let draws: Vec<usize> = vec![3, 0, 7, 2, 5, 1, 0, 2, 1];
        let replay = |bound| {
            let mut iter = draws.iter().copied();
            run_trial_with(params(10, bound), move |current| {
                iter.next().unwrap().min(current)
            })
        };
        for bound in 0..10 {
            assert_eq!(replay(bound), replay(bound));
        }
    }

    #[test]
    #[should_panic(expected = "drawn outside")]
    fn test_out_of_range_draw_panics() {
        run_trial_with(params(10, 10), |current| current + 1);
    }

    #[test]
    fn test_classic_params() {
        let p = TrialParams::classic(100).unwrap();
        assert_eq!(p.cycle_bound, 50);
        assert_eq!(p, TrialParams::default());
        assert!(TrialParams::classic(0).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::rng::Seed;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn bound_at_least_n_is_always_found(
            seed in 0_u64..10000,
            n in 1_usize..120,
            extra in 0_usize..10,
        ) {
            let mut rng = Seed::Fixed(seed).rng_for(0).unwrap();
            let p = TrialParams::new(n, n + extra).unwrap();
            prop_assert_eq!(run_trial(p, &mut rng), Outcome::Found);
        }

        #[test]
        fn zero_bound_is_never_found(seed in 0_u64..10000, n in 2_usize..120) {
            let mut rng = Seed::Fixed(seed).rng_for(0).unwrap();
            let p = TrialParams::new(n, 0).unwrap();
            prop_assert_eq!(run_trial(p, &mut rng), Outcome::NotFound);
        }

        #[test]
        fn fixed_seed_is_deterministic(seed in 0_u64..10000, n in 1_usize..120) {
            let p = TrialParams::classic(n).unwrap();
            let mut a = Seed::Fixed(seed).rng_for(0).unwrap();
            let mut b = Seed::Fixed(seed).rng_for(0).unwrap();
            for _ in 0..5 {
                prop_assert_eq!(run_trial(p, &mut a), run_trial(p, &mut b));
            }
        }
    }
}
