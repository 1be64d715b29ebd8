mod config;
mod geo;
mod map;
mod tour;
mod track;
mod web;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

use crate::config::Config;
use crate::geo::UtmZone;
use crate::tour::{build_tour, download_name, render_kml};
use crate::track::{load_from, Dataset, TrackStore};

#[derive(Parser)]
#[command(name = "panther-tour")]
#[command(about = "Panther telemetry maps and KML flight tours")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        #[arg(short, long, default_value = "config.yaml")]
        config: String,
    },
    /// Write the KML tour of one subject
    Export {
        #[arg(short, long, default_value = "config.yaml")]
        config: String,
        #[arg(short, long)]
        subject: String,
        /// Defaults to panther_<subject>_telemetry_tour.kml
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List subjects found in the source
    Subjects {
        #[arg(short, long, default_value = "config.yaml")]
        config: String,
    },
    /// Convert a single UTM coordinate to latitude/longitude
    #[command(allow_negative_numbers = true)]
    Convert {
        #[arg(long, default_value_t = 17)]
        zone: u8,
        #[arg(long, default_value_t = 'R')]
        band: char,
        /// Take latitude/longitude and print easting/northing instead
        #[arg(long)]
        inverse: bool,
        first: f64,
        second: f64,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(&config),
        Commands::Export {
            config,
            subject,
            output,
        } => export(&config, &subject, output),
        Commands::Subjects { config } => subjects(&config),
        Commands::Convert {
            zone,
            band,
            inverse,
            first,
            second,
        } => convert(zone, band, inverse, first, second),
    }
}

fn load_config(path: &str) -> Option<Config> {
    match Config::from_file(path) {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Error reading config {}: {}", path, e);
            None
        }
    }
}

fn load_dataset(config: &Config) -> Option<Dataset> {
    let loaded = config
        .track_source()
        .map_err(|e| e.to_string())
        .and_then(|source| {
            let loader = config.loader().map_err(|e| e.to_string())?;
            load_from(source.as_ref(), &loader).map_err(|e| e.to_string())
        });

    match loaded {
        Ok(dataset) => Some(dataset),
        Err(e) => {
            eprintln!("Error loading telemetry: {}", e);
            None
        }
    }
}

fn serve(path: &str) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    let store = match (config.track_source(), config.loader()) {
        (Ok(source), Ok(loader)) => Arc::new(TrackStore::new(source, loader)),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Invalid config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config, store)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn export(path: &str, subject: &str, output: Option<String>) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };
    let Some(dataset) = load_dataset(&config) else {
        return ExitCode::FAILURE;
    };

    let Some(track) = dataset.track(subject) else {
        eprintln!("No fixes for subject {}", subject);
        return ExitCode::FAILURE;
    };

    let tour = build_tour(&track, &config.tour);
    let kml = match render_kml(&tour) {
        Ok(k) => k,
        Err(e) => {
            eprintln!("Error rendering tour: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let output = output.unwrap_or_else(|| download_name(subject));
    if let Err(e) = std::fs::write(&output, kml) {
        eprintln!("Error writing {}: {}", output, e);
        return ExitCode::FAILURE;
    }

    println!(
        "Wrote {} ({} flights, {} placemarks)",
        output,
        tour.poses().count(),
        tour.placemarks().count()
    );
    ExitCode::SUCCESS
}

fn subjects(path: &str) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };
    let Some(dataset) = load_dataset(&config) else {
        return ExitCode::FAILURE;
    };

    for summary in dataset.summaries() {
        println!("{}\t{} fixes", summary.subject, summary.fix_count);
    }
    if dataset.skipped_rows() > 0 {
        println!("({} rows skipped)", dataset.skipped_rows());
    }
    ExitCode::SUCCESS
}

fn convert(zone: u8, band: char, inverse: bool, first: f64, second: f64) -> ExitCode {
    let zone = match UtmZone::new(zone, band) {
        Ok(z) => z,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = if inverse {
        zone.to_utm(first, second)
            .map(|(e, n)| format!("{:.3} {:.3} ({}, {})", e, n, zone, zone.hemisphere()))
    } else {
        zone.to_lat_lon(first, second)
            .map(|p| format!("{:.7} {:.7}", p.latitude, p.longitude))
    };

    match result {
        Ok(line) => {
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
