use rand::Rng;

use crate::trial::{run_trial, TrialParams};

/// Runs `trials` independent trials off one stream and counts the successes.
///
/// Every trial starts from a fresh forest; the stream itself carries on from
/// trial to trial and is never reseeded.
pub fn run_trials<R: Rng>(params: TrialParams, trials: u64, rng: &mut R) -> u64 {
    let mut successes = 0;
    for _ in 0..trials {
        if run_trial(params, rng).is_found() {
            successes += 1;
        }
    }
    successes
}
