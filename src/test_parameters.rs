use crate::operations::OperationKind;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const OPERAND_DOMAIN_MIN: i64 = 0;
pub const OPERAND_DOMAIN_MAX: i64 = 1000;
pub const MIN_RESULTS: usize = 2;
pub const MAX_RESULTS: usize = 8;

/// Difficulty settings, always in sanitized form.
///
/// Construct through [`sanitize_parameters`] or [`TestParameters::sanitized`] when the
/// values come from outside (storage, shared links, command line).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestParameters {
    pub first_operand_min: i64,
    pub first_operand_max: i64,
    pub second_operand_min: i64,
    pub second_operand_max: i64,
    pub operations: Vec<OperationKind>,
    pub number_of_results: usize,
    pub sort_results: bool,
}

impl Default for TestParameters {
    fn default() -> Self {
        TestParameters {
            first_operand_min: 1,
            first_operand_max: 10,
            second_operand_min: 1,
            second_operand_max: 10,
            operations: vec![OperationKind::Addition, OperationKind::Subtraction],
            number_of_results: 6,
            sort_results: false,
        }
    }
}

impl TestParameters {
    /// Re-applies sanitization to a typed record (e.g. one edited field by field).
    pub fn sanitized(&self) -> Self {
        sanitize_parameters(&RawTestParameters::from(self))
    }

    pub fn first_operation(&self) -> OperationKind {
        self.operations
            .first()
            .copied()
            .unwrap_or(OperationKind::Addition)
    }
}

/// A possibly malformed parameter record, as read from storage, a link or the CLI.
///
/// `None` means the field was absent. Present-but-non-numeric values are kept as NaN so
/// they override defaults when merged and still sanitize to a safe value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTestParameters {
    #[serde(deserialize_with = "lenient_number")]
    pub first_operand_min: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub first_operand_max: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub second_operand_min: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub second_operand_max: Option<f64>,
    #[serde(deserialize_with = "lenient_names")]
    pub operations: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_number")]
    pub number_of_results: Option<f64>,
    #[serde(deserialize_with = "truthy")]
    pub sort_results: Option<bool>,
}

impl RawTestParameters {
    /// Fills every absent field from `base`.
    pub fn merged_over(self, base: &TestParameters) -> RawTestParameters {
        let base = RawTestParameters::from(base);
        RawTestParameters {
            first_operand_min: self.first_operand_min.or(base.first_operand_min),
            first_operand_max: self.first_operand_max.or(base.first_operand_max),
            second_operand_min: self.second_operand_min.or(base.second_operand_min),
            second_operand_max: self.second_operand_max.or(base.second_operand_max),
            operations: self.operations.or(base.operations),
            number_of_results: self.number_of_results.or(base.number_of_results),
            sort_results: self.sort_results.or(base.sort_results),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == RawTestParameters::default()
    }
}

impl From<&TestParameters> for RawTestParameters {
    fn from(params: &TestParameters) -> Self {
        RawTestParameters {
            first_operand_min: Some(params.first_operand_min as f64),
            first_operand_max: Some(params.first_operand_max as f64),
            second_operand_min: Some(params.second_operand_min as f64),
            second_operand_max: Some(params.second_operand_max as f64),
            operations: Some(
                params
                    .operations
                    .iter()
                    .map(|op| op.as_str().to_string())
                    .collect(),
            ),
            number_of_results: Some(params.number_of_results as f64),
            sort_results: Some(params.sort_results),
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().unwrap_or(f64::NAN)),
        _ => Some(f64::NAN),
    })
}

fn lenient_names<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(name) => Some(name),
                    _ => None,
                })
                .collect(),
        ),
        _ => Some(Vec::new()),
    })
}

fn truthy<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0 && !x.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }))
}

fn sanitize_bound(value: Option<f64>) -> i64 {
    match value {
        Some(x) if x.is_finite() => {
            x.round()
                .clamp(OPERAND_DOMAIN_MIN as f64, OPERAND_DOMAIN_MAX as f64) as i64
        }
        _ => 0,
    }
}

fn ordered(a: i64, b: i64) -> (i64, i64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn sanitize_operations(names: Option<&[String]>) -> Vec<OperationKind> {
    let mut operations = Vec::new();
    for op in names
        .unwrap_or_default()
        .iter()
        .filter_map(|name| OperationKind::from_name(name))
    {
        if !operations.contains(&op) {
            operations.push(op);
        }
    }
    if operations.is_empty() {
        operations.push(OperationKind::Addition);
    }
    operations
}

fn sanitize_result_count(value: Option<f64>) -> usize {
    match value {
        Some(x) if x.is_finite() => {
            x.round().clamp(MIN_RESULTS as f64, MAX_RESULTS as f64) as usize
        }
        _ => MIN_RESULTS,
    }
}

/// Normalizes an untrusted record into a consistent [`TestParameters`].
///
/// Total and idempotent: bounds are rounded, clamped to the operand domain and then
/// ordered per pair; unknown operations are dropped (falling back to addition); the
/// result count is clamped to the supported option range.
pub fn sanitize_parameters(raw: &RawTestParameters) -> TestParameters {
    let (first_operand_min, first_operand_max) = ordered(
        sanitize_bound(raw.first_operand_min),
        sanitize_bound(raw.first_operand_max),
    );
    let (second_operand_min, second_operand_max) = ordered(
        sanitize_bound(raw.second_operand_min),
        sanitize_bound(raw.second_operand_max),
    );

    TestParameters {
        first_operand_min,
        first_operand_max,
        second_operand_min,
        second_operand_max,
        operations: sanitize_operations(raw.operations.as_deref()),
        number_of_results: sanitize_result_count(raw.number_of_results),
        sort_results: raw.sort_results.unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_params() -> TestParameters {
        TestParameters {
            first_operand_min: 1,
            first_operand_max: 10,
            second_operand_min: 1,
            second_operand_max: 10,
            operations: vec![OperationKind::Addition],
            number_of_results: 4,
            sort_results: false,
        }
    }

    fn raw_with(edit: impl FnOnce(&mut RawTestParameters)) -> RawTestParameters {
        let mut raw = RawTestParameters::from(&valid_params());
        edit(&mut raw);
        raw
    }

    #[test]
    fn test_valid_parameters_pass_through() {
        assert_eq!(valid_params().sanitized(), valid_params());
    }

    #[test]
    fn test_swaps_first_pair_when_inverted() {
        let result = sanitize_parameters(&raw_with(|r| {
            r.first_operand_min = Some(20.0);
            r.first_operand_max = Some(5.0);
        }));
        assert_eq!(result.first_operand_min, 5);
        assert_eq!(result.first_operand_max, 20);
    }

    #[test]
    fn test_swaps_second_pair_when_inverted() {
        let result = sanitize_parameters(&raw_with(|r| {
            r.second_operand_min = Some(50.0);
            r.second_operand_max = Some(10.0);
        }));
        assert_eq!(result.second_operand_min, 10);
        assert_eq!(result.second_operand_max, 50);
    }

    #[test]
    fn test_clamps_bounds_to_domain() {
        let result = sanitize_parameters(&raw_with(|r| {
            r.first_operand_min = Some(-5.0);
            r.first_operand_max = Some(2000.0);
        }));
        assert_eq!(result.first_operand_min, 0);
        assert_eq!(result.first_operand_max, 1000);
    }

    #[test]
    fn test_rounds_fractional_bounds() {
        let result = sanitize_parameters(&raw_with(|r| {
            r.first_operand_min = Some(2.4);
            r.first_operand_max = Some(7.6);
        }));
        assert_eq!(result.first_operand_min, 2);
        assert_eq!(result.first_operand_max, 8);
    }

    #[test]
    fn test_nan_bound_falls_back_to_zero() {
        let result = sanitize_parameters(&raw_with(|r| r.first_operand_min = Some(f64::NAN)));
        assert_eq!(result.first_operand_min, 0);
        assert_eq!(result.first_operand_max, 10);
    }

    #[test]
    fn test_infinite_bound_falls_back_to_zero_then_swaps() {
        let result = sanitize_parameters(&raw_with(|r| {
            r.second_operand_min = Some(1.0);
            r.second_operand_max = Some(f64::INFINITY);
        }));
        assert_eq!(result.second_operand_min, 0);
        assert_eq!(result.second_operand_max, 1);
    }

    #[test]
    fn test_result_count_clamped() {
        let count = |n: f64| {
            sanitize_parameters(&raw_with(|r| r.number_of_results = Some(n))).number_of_results
        };
        assert_eq!(count(0.0), 2);
        assert_eq!(count(1.0), 2);
        assert_eq!(count(20.0), 8);
        assert_eq!(count(f64::NAN), 2);
        assert_eq!(count(5.0), 5);
    }

    #[test]
    fn test_filters_unknown_operations() {
        let result = sanitize_parameters(&raw_with(|r| {
            r.operations = Some(vec![
                "addition".to_string(),
                "bogus".to_string(),
                "subtraction".to_string(),
            ])
        }));
        assert_eq!(
            result.operations,
            vec![OperationKind::Addition, OperationKind::Subtraction]
        );
    }

    #[test]
    fn test_all_unknown_operations_fall_back_to_addition() {
        let result =
            sanitize_parameters(&raw_with(|r| r.operations = Some(vec!["bogus".to_string()])));
        assert_eq!(result.operations, vec![OperationKind::Addition]);
    }

    #[test]
    fn test_empty_or_missing_operations_fall_back_to_addition() {
        let empty = sanitize_parameters(&raw_with(|r| r.operations = Some(vec![])));
        assert_eq!(empty.operations, vec![OperationKind::Addition]);
        let missing = sanitize_parameters(&raw_with(|r| r.operations = None));
        assert_eq!(missing.operations, vec![OperationKind::Addition]);
    }

    #[test]
    fn test_duplicate_operations_collapse() {
        let result = sanitize_parameters(&raw_with(|r| {
            r.operations = Some(vec!["division".to_string(), "division".to_string()])
        }));
        assert_eq!(result.operations, vec![OperationKind::Division]);
    }

    #[test]
    fn test_sort_results_kept() {
        assert!(sanitize_parameters(&raw_with(|r| r.sort_results = Some(true))).sort_results);
        assert!(!sanitize_parameters(&raw_with(|r| r.sort_results = Some(false))).sort_results);
        assert!(!sanitize_parameters(&raw_with(|r| r.sort_results = None)).sort_results);
    }

    #[test]
    fn test_empty_record_produces_safe_defaults() {
        let result = sanitize_parameters(&RawTestParameters::default());
        assert_eq!(result.first_operand_min, 0);
        assert_eq!(result.first_operand_max, 0);
        assert_eq!(result.operations, vec![OperationKind::Addition]);
        assert_eq!(result.number_of_results, 2);
        assert!(!result.sort_results);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let raw = raw_with(|r| {
            r.first_operand_min = Some(900.7);
            r.first_operand_max = Some(-3.0);
            r.operations = Some(vec!["nope".to_string()]);
            r.number_of_results = Some(99.0);
        });
        let once = sanitize_parameters(&raw);
        assert_eq!(once.sanitized(), once);
    }

    #[test]
    fn test_deserialize_lenient_json() {
        let raw: RawTestParameters = serde_json::from_str(
            r#"{
                "firstOperandMin": "five",
                "firstOperandMax": 12,
                "secondOperandMin": null,
                "operations": ["division", 7, "multiplication"],
                "numberOfResults": 3.6,
                "sortResults": 1,
                "theme": "dark"
            }"#,
        )
        .unwrap();

        assert!(raw.first_operand_min.is_some_and(f64::is_nan));
        assert_eq!(raw.first_operand_max, Some(12.0));
        assert_eq!(raw.second_operand_min, None);
        assert_eq!(raw.second_operand_max, None);
        assert_eq!(
            raw.operations,
            Some(vec!["division".to_string(), "multiplication".to_string()])
        );
        assert_eq!(raw.sort_results, Some(true));

        let params = sanitize_parameters(&raw);
        assert_eq!(params.first_operand_min, 0);
        assert_eq!(params.first_operand_max, 12);
        assert_eq!(params.number_of_results, 4);
        assert_eq!(
            params.operations,
            vec![OperationKind::Division, OperationKind::Multiplication]
        );
        assert!(params.sort_results);
    }

    #[test]
    fn test_truthiness_coercion() {
        let sort = |json: &str| {
            let raw: RawTestParameters =
                serde_json::from_str(&format!(r#"{{"sortResults": {}}}"#, json)).unwrap();
            raw.sort_results
        };
        assert_eq!(sort("0"), Some(false));
        assert_eq!(sort("\"\""), Some(false));
        assert_eq!(sort("\"yes\""), Some(true));
        assert_eq!(sort("null"), Some(false));
        assert_eq!(sort("[]"), Some(true));
    }

    #[test]
    fn test_merged_over_keeps_present_fields() {
        let partial = RawTestParameters {
            first_operand_max: Some(100.0),
            sort_results: Some(true),
            ..Default::default()
        };
        let merged = sanitize_parameters(&partial.merged_over(&TestParameters::default()));
        assert_eq!(merged.first_operand_min, 1);
        assert_eq!(merged.first_operand_max, 100);
        assert_eq!(merged.number_of_results, 6);
        assert!(merged.sort_results);
    }

    #[test]
    fn test_typed_json_uses_camel_case() {
        let json = serde_json::to_value(TestParameters::default()).unwrap();
        assert_eq!(json["firstOperandMin"], 1);
        assert_eq!(json["operations"][1], "subtraction");
        assert_eq!(json["sortResults"], false);
    }
}
