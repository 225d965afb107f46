use crate::operations::{MathProblem, OperationKind};
use crate::test_parameters::TestParameters;
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

/// Upper bound on divisors examined per division problem, independent of range size.
pub const MAX_DIVISOR_CANDIDATES: usize = 20;

/// Inclusive operand ranges the generator draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandBounds {
    pub first_min: i64,
    pub first_max: i64,
    pub second_min: i64,
    pub second_max: i64,
}

impl From<&TestParameters> for OperandBounds {
    fn from(params: &TestParameters) -> Self {
        OperandBounds {
            first_min: params.first_operand_min,
            first_max: params.first_operand_max,
            second_min: params.second_operand_min,
            second_max: params.second_operand_max,
        }
    }
}

/// Generates a problem for `operation` using the thread-local RNG.
pub fn generate_problem(params: &TestParameters, operation: OperationKind) -> MathProblem {
    generate_problem_with_rng(params, operation, &mut rand::thread_rng())
}

/// Generates a problem for `operation`, drawing all randomness from `rng`.
///
/// Every operation tries its strategies in order and the last one always succeeds, so this
/// never fails. Subtraction never goes negative and division always divides exactly by a
/// non-zero divisor; the documented fallbacks may give up range placement to keep that.
pub fn generate_problem_with_rng<R: Rng>(
    params: &TestParameters,
    operation: OperationKind,
    rng: &mut R,
) -> MathProblem {
    let bounds = OperandBounds::from(params);
    match operation {
        OperationKind::Addition | OperationKind::Multiplication => {
            independent_draw(operation, &bounds, rng)
        }
        OperationKind::Subtraction => subtraction_within_ranges(&bounds, rng)
            .or_else(|| subtraction_with_redrawn_minuend(&bounds, &mut *rng))
            .unwrap_or_else(|| subtraction_swapped_ranges(&bounds, &mut *rng)),
        OperationKind::Division => {
            let candidates = divisor_candidates(&bounds, rng);
            division_with_in_range_multiple(&bounds, &candidates, rng)
                .unwrap_or_else(|| division_nearest_multiple(&bounds, &candidates))
        }
    }
}

fn draw<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(lo..=hi)
}

pub fn independent_draw<R: Rng>(
    operation: OperationKind,
    bounds: &OperandBounds,
    rng: &mut R,
) -> MathProblem {
    let operand1 = draw(rng, bounds.first_min, bounds.first_max);
    let operand2 = draw(rng, bounds.second_min, bounds.second_max);
    MathProblem::new(operation, operand1, operand2)
}

fn subtrahend_for<R: Rng>(bounds: &OperandBounds, minuend: i64, rng: &mut R) -> Option<i64> {
    let upper = bounds.second_max.min(minuend);
    (bounds.second_min <= upper).then(|| rng.gen_range(bounds.second_min..=upper))
}

/// Both operands from their own ranges, with the subtrahend capped at the minuend.
pub fn subtraction_within_ranges<R: Rng>(
    bounds: &OperandBounds,
    rng: &mut R,
) -> Option<MathProblem> {
    let operand1 = draw(rng, bounds.first_min, bounds.first_max);
    let operand2 = subtrahend_for(bounds, operand1, rng)?;
    Some(MathProblem::new(OperationKind::Subtraction, operand1, operand2))
}

/// Redraws the minuend from the part of the first range that reaches the second range.
pub fn subtraction_with_redrawn_minuend<R: Rng>(
    bounds: &OperandBounds,
    rng: &mut R,
) -> Option<MathProblem> {
    let low = bounds.first_min.max(bounds.second_min);
    if low > bounds.first_max {
        return None;
    }
    debug!(
        "subtraction: redrawing minuend from [{}, {}]",
        low, bounds.first_max
    );
    let operand1 = rng.gen_range(low..=bounds.first_max);
    let operand2 = subtrahend_for(bounds, operand1, rng)?;
    Some(MathProblem::new(OperationKind::Subtraction, operand1, operand2))
}

/// Last resort when the first range lies entirely below the second: one value from each
/// range, the larger becomes the minuend. Operands may swap which range they came from.
pub fn subtraction_swapped_ranges<R: Rng>(bounds: &OperandBounds, rng: &mut R) -> MathProblem {
    debug!(
        "subtraction: ranges [{}, {}] and [{}, {}] are disjoint, swapping operands",
        bounds.first_min, bounds.first_max, bounds.second_min, bounds.second_max
    );
    let a = draw(rng, bounds.first_min, bounds.first_max);
    let b = draw(rng, bounds.second_min, bounds.second_max);
    MathProblem::new(OperationKind::Subtraction, a.max(b), a.min(b))
}

/// Non-zero divisors to try, in random order.
///
/// Small ranges are enumerated in full; larger ones are sampled without repetition.
pub fn divisor_candidates<R: Rng>(bounds: &OperandBounds, rng: &mut R) -> Vec<i64> {
    let low = bounds.second_min.max(1);
    let high = bounds.second_max.max(low);
    let span = (high - low + 1) as usize;

    if span <= MAX_DIVISOR_CANDIDATES {
        let mut candidates: Vec<i64> = (low..=high).collect();
        candidates.shuffle(rng);
        candidates
    } else {
        rand::seq::index::sample(rng, span, MAX_DIVISOR_CANDIDATES)
            .into_iter()
            .map(|offset| low + offset as i64)
            .collect()
    }
}

/// First candidate with a multiple inside the first range, with a random quotient.
pub fn division_with_in_range_multiple<R: Rng>(
    bounds: &OperandBounds,
    candidates: &[i64],
    rng: &mut R,
) -> Option<MathProblem> {
    let first_min = bounds.first_min.max(0);
    candidates.iter().find_map(|&divisor| {
        let min_quotient = (first_min + divisor - 1) / divisor;
        let max_quotient = bounds.first_max / divisor;
        (min_quotient <= max_quotient).then(|| {
            let quotient = rng.gen_range(min_quotient..=max_quotient);
            MathProblem::new(OperationKind::Division, quotient * divisor, divisor)
        })
    })
}

/// Used when no candidate divides anything in the first range. The dividend is the
/// multiple of the first candidate nearest the first range's minimum (at least one times
/// the divisor) and may fall outside the first range.
pub fn division_nearest_multiple(bounds: &OperandBounds, candidates: &[i64]) -> MathProblem {
    let divisor = candidates.first().copied().unwrap_or(1).max(1);
    let quotient = ((bounds.first_min as f64 / divisor as f64).round() as i64).max(1);
    debug!(
        "division: no multiple of any candidate in [{}, {}], using {} ÷ {}",
        bounds.first_min,
        bounds.first_max,
        quotient * divisor,
        divisor
    );
    MathProblem::new(OperationKind::Division, quotient * divisor, divisor)
}
