use crate::test_parameters::RawTestParameters;
use clap::Parser;
use clap::builder::BoolishValueParser;
use std::path::PathBuf;

/// Elementary arithmetic practice with multiple-choice and typed answers
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "Arithmetic Practice")]
#[command(about = "Practice elementary arithmetic problems", long_about = None)]
#[command(version)]
pub struct Args {
    /// Use in-memory database for testing
    #[arg(long, help = "Use in-memory database for testing")]
    pub test: bool,

    /// Custom database file path
    #[arg(long, value_name = "PATH", help = "Use custom database file path")]
    pub db_path: Option<PathBuf>,

    /// Import settings from a shared link (query string or full URL)
    #[arg(long, value_name = "QUERY")]
    pub settings: Option<String>,

    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub first_min: Option<f64>,

    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub first_max: Option<f64>,

    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub second_min: Option<f64>,

    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub second_max: Option<f64>,

    /// Comma-separated operations (addition,subtraction,multiplication,division)
    #[arg(long, value_name = "LIST")]
    pub operations: Option<String>,

    /// Number of multiple-choice options (2-8)
    #[arg(long, value_name = "N")]
    pub results: Option<f64>,

    /// Show options in ascending order instead of shuffled
    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub sort: Option<bool>,

    /// Forget the stored settings and start from the defaults
    #[arg(long)]
    pub reset: bool,

    /// Print the shareable settings query and exit
    #[arg(long)]
    pub share: bool,

    /// Base URL to prefix the shared settings query with
    #[arg(long, value_name = "URL", requires = "share")]
    pub base_url: Option<String>,

    /// Seed the random generator for a reproducible session
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Settings given as individual flags, to be merged over the stored settings
    pub fn settings_overrides(&self) -> RawTestParameters {
        RawTestParameters {
            first_operand_min: self.first_min,
            first_operand_max: self.first_max,
            second_operand_min: self.second_min,
            second_operand_max: self.second_max,
            operations: self.operations.as_ref().map(|list| {
                list.split(',')
                    .map(|name| name.trim().to_lowercase())
                    .collect()
            }),
            number_of_results: self.results,
            sort_results: self.sort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_args() {
        let args = Args::try_parse_from(["arithmetic_practice"]).unwrap();
        assert!(!args.test);
        assert!(args.db_path.is_none());
        assert!(args.settings.is_none());
        assert!(args.settings_overrides().is_empty());
    }

    #[test]
    fn test_parse_test_flag_and_db_path() {
        let args =
            Args::try_parse_from(["arithmetic_practice", "--test", "--db-path", "/tmp/test.db"])
                .unwrap();
        assert!(args.test);
        assert_eq!(
            args.db_path.as_deref(),
            Some(PathBuf::from("/tmp/test.db").as_path())
        );
    }

    #[test]
    fn test_parse_settings_flags() {
        let args = Args::try_parse_from([
            "arithmetic_practice",
            "--first-min",
            "-5",
            "--first-max",
            "20",
            "--operations",
            "Addition, division",
            "--results",
            "4",
            "--sort",
            "yes",
        ])
        .unwrap();

        let overrides = args.settings_overrides();
        assert_eq!(overrides.first_operand_min, Some(-5.0));
        assert_eq!(overrides.first_operand_max, Some(20.0));
        assert_eq!(overrides.second_operand_min, None);
        assert_eq!(
            overrides.operations,
            Some(vec!["addition".to_string(), "division".to_string()])
        );
        assert_eq!(overrides.number_of_results, Some(4.0));
        assert_eq!(overrides.sort_results, Some(true));
    }

    #[test]
    fn test_parse_share_with_base_url() {
        let args = Args::try_parse_from([
            "arithmetic_practice",
            "--share",
            "--base-url",
            "https://example.org",
        ])
        .unwrap();
        assert!(args.share);
        assert_eq!(args.base_url.as_deref(), Some("https://example.org"));
    }

    #[test]
    fn test_base_url_requires_share() {
        assert!(
            Args::try_parse_from(["arithmetic_practice", "--base-url", "https://example.org"])
                .is_err()
        );
    }

    #[test]
    fn test_parse_reset() {
        let args = Args::try_parse_from(["arithmetic_practice", "--reset"]).unwrap();
        assert!(args.reset);
        assert!(!Args::try_parse_from(["arithmetic_practice"]).unwrap().reset);
    }

    #[test]
    fn test_parse_seed() {
        let args = Args::try_parse_from(["arithmetic_practice", "--seed", "42"]).unwrap();
        assert_eq!(args.seed, Some(42));
        assert!(Args::try_parse_from(["arithmetic_practice", "--seed", "-1"]).is_err());
    }

    #[test]
    fn test_invalid_sort_value_rejected() {
        assert!(Args::try_parse_from(["arithmetic_practice", "--sort", "maybe"]).is_err());
    }
}
