/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Judges a submission against the target after rounding both to two decimals.
///
/// Non-finite submissions are never correct. `-0` and `0` compare equal.
pub fn is_answer_correct(submitted: f64, target: f64) -> bool {
    if !submitted.is_finite() {
        return false;
    }
    round2(submitted) == round2(target)
}

/// Parses free-text input. Anything unparsable becomes NaN, which the judge rejects.
pub fn parse_submitted_answer(input: &str) -> f64 {
    input.trim().parse::<f64>().unwrap_or(f64::NAN)
}
