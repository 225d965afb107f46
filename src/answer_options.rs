use crate::answer_evaluator::round2;
use crate::test_parameters::TestParameters;
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

/// Random draws allowed before the remaining slots are filled deterministically.
pub const MAX_ATTEMPTS: usize = 500;
/// Rejected draws after which the jitter range doubles.
pub const REJECTIONS_PER_WIDENING: usize = 50;
pub const MIN_JITTER: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOptionsConfig {
    pub number_of_results: usize,
    pub sort_results: bool,
}

impl From<&TestParameters> for AnswerOptionsConfig {
    fn from(params: &TestParameters) -> Self {
        AnswerOptionsConfig {
            number_of_results: params.number_of_results,
            sort_results: params.sort_results,
        }
    }
}

pub fn generate_answer_options(correct: f64, config: AnswerOptionsConfig) -> Vec<f64> {
    generate_answer_options_with_rng(correct, config, &mut rand::thread_rng())
}

/// Builds the multiple-choice options for `correct`.
///
/// The result holds `number_of_results` distinct values (at least one), contains the
/// two-decimal rounded answer exactly once and never contains negative distractors.
/// Options are ascending when `sort_results` is set, otherwise shuffled.
pub fn generate_answer_options_with_rng<R: Rng>(
    correct: f64,
    config: AnswerOptionsConfig,
    rng: &mut R,
) -> Vec<f64> {
    let correct = round2(correct);
    let target = config.number_of_results.max(1);
    let mut options = Vec::with_capacity(target);
    options.push(correct);

    let mut range = MIN_JITTER.max((correct.abs() / 2.0).ceil() as i64);
    let mut attempts = 0;
    let mut rejections = 0;

    while options.len() < target && attempts < MAX_ATTEMPTS {
        attempts += 1;
        let offset = rng.gen_range(-range..=range);
        let candidate = round2((correct + offset as f64).max(0.0));

        if candidate != correct && !options.contains(&candidate) {
            options.push(candidate);
        } else {
            rejections += 1;
            if rejections % REJECTIONS_PER_WIDENING == 0 {
                range *= 2;
            }
        }
    }

    if options.len() < target {
        debug!(
            "answer options for {}: {} of {} after {} attempts, filling from {}",
            correct,
            options.len(),
            target,
            attempts,
            correct + range as f64
        );
        let mut step = 0;
        while options.len() < target {
            step += 1;
            let filler = round2((correct + (range + step) as f64).max(0.0));
            if !options.contains(&filler) {
                options.push(filler);
            }
        }
    }

    if config.sort_results {
        options.sort_by(f64::total_cmp);
    } else {
        options.shuffle(rng);
    }
    options
}
