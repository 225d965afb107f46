//! Compact query-string encoding of [`TestParameters`] used for shareable links.
//!
//! Keys: `fm`/`fx` first operand min/max, `sm`/`sx` second operand min/max,
//! `op` comma-joined operation names, `nr` number of results, `sr` sort flag (`1`/`0`).

use crate::operations::OperationKind;
use crate::test_parameters::{
    MAX_RESULTS, MIN_RESULTS, RawTestParameters, TestParameters, sanitize_parameters,
};
use log::info;

pub const SETTINGS_KEYS: [&str; 7] = ["fm", "fx", "sm", "sx", "op", "nr", "sr"];

pub type QueryResult<T> = std::result::Result<T, serde_urlencoded::ser::Error>;

pub fn serialize_settings(settings: &TestParameters) -> QueryResult<String> {
    let operations = settings
        .operations
        .iter()
        .map(OperationKind::as_str)
        .collect::<Vec<_>>()
        .join(",");

    serde_urlencoded::to_string([
        ("fm", settings.first_operand_min.to_string()),
        ("fx", settings.first_operand_max.to_string()),
        ("sm", settings.second_operand_min.to_string()),
        ("sx", settings.second_operand_max.to_string()),
        ("op", operations),
        ("nr", settings.number_of_results.to_string()),
        ("sr", if settings.sort_results { "1" } else { "0" }.to_string()),
    ])
}

/// Accepts a bare query, one with a leading `?`, or a full URL.
fn query_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.split_once('?').map_or(query, |(_, q)| q);
    serde_urlencoded::from_str(query).unwrap_or_default()
}

fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Integer part of the value; unparsable input stays NaN so the sanitizer zeroes it.
fn parse_number(value: &str) -> f64 {
    value.trim().parse::<f64>().map_or(f64::NAN, f64::trunc)
}

/// Decodes the keys present in `query` into a partial record.
///
/// Unknown operation names are dropped, and `op` is left unset when none survive.
pub fn deserialize_settings(query: &str) -> RawTestParameters {
    let pairs = query_pairs(query);
    let number = |key| first_value(&pairs, key).map(parse_number);

    let operations = first_value(&pairs, "op")
        .map(|list| {
            list.split(',')
                .filter(|name| OperationKind::from_name(name).is_some())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|names| !names.is_empty());

    let number_of_results = number("nr").map(|n| {
        if n.is_finite() {
            n.clamp(MIN_RESULTS as f64, MAX_RESULTS as f64)
        } else {
            n
        }
    });

    RawTestParameters {
        first_operand_min: number("fm"),
        first_operand_max: number("fx"),
        second_operand_min: number("sm"),
        second_operand_max: number("sx"),
        operations,
        number_of_results,
        sort_results: first_value(&pairs, "sr").map(|flag| flag == "1"),
    }
}

pub fn has_settings_params(query: &str) -> bool {
    let pairs = query_pairs(query);
    SETTINGS_KEYS
        .iter()
        .any(|key| first_value(&pairs, key).is_some())
}

/// Applies a shared link over the defaults and sanitizes the result
pub fn import_settings(query: &str) -> TestParameters {
    let partial = deserialize_settings(query);
    let settings = sanitize_parameters(&partial.merged_over(&TestParameters::default()));
    info!("Imported settings from shared link: {:?}", settings);
    settings
}

pub fn share_link(base_url: &str, settings: &TestParameters) -> QueryResult<String> {
    Ok(format!(
        "{}/?{}",
        base_url.trim_end_matches('/'),
        serialize_settings(settings)?
    ))
}
