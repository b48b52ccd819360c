use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use hewing_cli::data::{load_catalog, load_station_config};
use hewing_cli::report::{self, Outcome};
use hewing_cli::session::{self, SessionPlan};
use hewing_station::StationConfig;

fn usage() {
    eprintln!("Usage: carve-sim [OPTIONS]");
    eprintln!("  --data <dir>       Data directory with items.ron and recipes/ (default: data)");
    eprintln!("  --config <path>    Station config RON file");
    eprintln!("  --log <code>       Item placed on the station (default: game:log-placed-oak-ud)");
    eprintln!("  --recipe <code>    Recipe to carve (default: beam-oak)");
    eprintln!("  --ruin             Cut into required wood first");
    eprintln!("  --json             Print the report as JSON");
}

/// Value following the option at `i`, or exit with usage.
fn value(args: &[String], i: usize) -> String {
    match args.get(i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("Missing value for {}", args[i - 1]);
            usage();
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut data_dir = PathBuf::from("data");
    let mut config_path: Option<PathBuf> = None;
    let mut plan = SessionPlan {
        log: "game:log-placed-oak-ud".to_string(),
        recipe: "beam-oak".to_string(),
        ruin: false,
    };
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" => {
                i += 1;
                data_dir = PathBuf::from(value(&args, i));
            }
            "--config" => {
                i += 1;
                config_path = Some(PathBuf::from(value(&args, i)));
            }
            "--log" => {
                i += 1;
                plan.log = value(&args, i);
            }
            "--recipe" => {
                i += 1;
                plan.recipe = value(&args, i);
            }
            "--ruin" => plan.ruin = true,
            "--json" => json = true,
            "--help" | "-h" => {
                usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match &config_path {
        Some(path) => load_station_config(path),
        None => Ok(StationConfig::default()),
    };
    let config = config.unwrap_or_else(|e| {
        eprintln!("ERROR: {e}");
        process::exit(1);
    });

    let (catalog, summary) = load_catalog(&data_dir).unwrap_or_else(|e| {
        eprintln!("ERROR: {e}");
        process::exit(1);
    });
    log::info!(
        "Catalog {:016x}: {} recipes from {}",
        catalog.content_hash(),
        summary.registered,
        data_dir.display()
    );

    let report = session::run(Arc::new(catalog), config, &plan).unwrap_or_else(|e| {
        eprintln!("ERROR: {e}");
        process::exit(1);
    });

    if json {
        match report::format_json(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("ERROR: {e}");
                process::exit(1);
            }
        }
    } else {
        print!("{}", report::format_text(&report));
    }

    let expected = if plan.ruin { Outcome::Ruined } else { Outcome::Finished };
    if report.outcome != expected {
        process::exit(2);
    }
}
