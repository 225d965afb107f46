use arithmetic_practice::cli::Args;
use arithmetic_practice::database::Database;
use arithmetic_practice::database_factory::{DatabaseConfig, DatabaseFactory};
use arithmetic_practice::practice_session::PracticeSession;
use arithmetic_practice::settings_query_string::{
    has_settings_params, import_settings, serialize_settings, share_link,
};
use arithmetic_practice::terminal;
use arithmetic_practice::test_parameters::{TestParameters, sanitize_parameters};
use env_logger::Env;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse_args();
    if args.no_color {
        colored::control::set_override(false);
    }

    let db = DatabaseFactory::create(DatabaseConfig::from(&args))?;
    let params = resolve_settings(&db, &args)?;

    if args.share {
        let shared = match &args.base_url {
            Some(base_url) => share_link(base_url, &params)?,
            None => serialize_settings(&params)?,
        };
        println!("{}", shared);
        return Ok(());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    match args.seed {
        Some(seed) => {
            let mut session = PracticeSession::with_rng(params, StdRng::seed_from_u64(seed));
            terminal::run(&mut session, stdin.lock(), stdout.lock())?;
        }
        None => {
            let mut session = PracticeSession::new(params);
            terminal::run(&mut session, stdin.lock(), stdout.lock())?;
        }
    }

    Ok(())
}

/// Shared link first, then stored settings, then individual flags on top
fn resolve_settings(
    db: &Database,
    args: &Args,
) -> Result<TestParameters, Box<dyn std::error::Error>> {
    if args.reset {
        db.clear_test_parameters()?;
        info!("Stored settings cleared");
    } else if let Some(saved_at) = db.settings_updated_at()? {
        debug!("Using settings saved at {}", saved_at);
    }

    let mut params = match &args.settings {
        Some(query) if has_settings_params(query) => {
            let imported = import_settings(query);
            db.save_test_parameters(&imported)?;
            imported
        }
        Some(query) => {
            warn!("No settings found in '{}', using saved settings", query);
            db.load_test_parameters()?
        }
        None => db.load_test_parameters()?,
    };

    let overrides = args.settings_overrides();
    if !overrides.is_empty() {
        params = sanitize_parameters(&overrides.merged_over(&params));
        db.save_test_parameters(&params)?;
    }

    Ok(params)
}
