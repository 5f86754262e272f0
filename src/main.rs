mod overhead;
mod predict;
mod web;

use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;

use crate::overhead::{
    antipodal_hours, estimate_hours_to_overhead, survey, GeoPoint, OrbitalParameters,
    OverheadError,
};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "iss-overhead")]
#[command(about = "Estimate how long until the ISS passes over a location")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate hours until the satellite is over the observer
    Estimate {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, allow_negative_numbers = true)]
        sat_lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        sat_lon: f64,
        #[command(flatten)]
        orbit: OrbitArgs,
    },
    /// Survey the estimate range over random satellite positions
    Survey {
        #[arg(long, default_value_t = 51.547, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, default_value_t = -0.134, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, default_value_t = 1_000_000)]
        samples: u64,
        /// Random seed; a fresh one is drawn and printed when omitted
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1)]
        workers: usize,
        #[command(flatten)]
        orbit: OrbitArgs,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "config.yaml")]
        config: String,
    },
}

#[derive(Args)]
struct OrbitArgs {
    #[arg(long, default_value_t = 6371.0)]
    earth_radius_km: f64,
    #[arg(long, default_value_t = 408.0)]
    altitude_km: f64,
    #[arg(long, default_value_t = 7660.0)]
    speed_m_s: f64,
}

impl OrbitArgs {
    fn parameters(&self) -> Result<OrbitalParameters, OverheadError> {
        OrbitalParameters::new(self.earth_radius_km, self.altitude_km, self.speed_m_s)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate {
            lat,
            lon,
            sat_lat,
            sat_lon,
            orbit,
        } => estimate(lat, lon, sat_lat, sat_lon, &orbit),
        Commands::Survey {
            lat,
            lon,
            samples,
            seed,
            workers,
            orbit,
        } => run_survey(lat, lon, samples, seed, workers, &orbit),
        Commands::Serve { config } => serve(&config),
    }
}

fn estimate(lat: f64, lon: f64, sat_lat: f64, sat_lon: f64, orbit: &OrbitArgs) -> ExitCode {
    let inputs = GeoPoint::new(lat, lon).and_then(|observer| {
        Ok((
            observer,
            GeoPoint::new(sat_lat, sat_lon)?,
            orbit.parameters()?,
        ))
    });

    match inputs {
        Ok((observer, satellite, params)) => {
            let hours = estimate_hours_to_overhead(observer, satellite, &params);
            println!("{:.6}", hours);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Invalid input: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_survey(
    lat: f64,
    lon: f64,
    samples: u64,
    seed: Option<u64>,
    workers: usize,
    orbit: &OrbitArgs,
) -> ExitCode {
    let (observer, params) = match GeoPoint::new(lat, lon)
        .and_then(|observer| Ok((observer, orbit.parameters()?)))
    {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("Invalid input: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let seed = seed.unwrap_or_else(rand::random);
    log::info!(
        "Surveying {} samples on {} workers (seed {})",
        samples,
        survey::effective_workers(workers, samples),
        seed
    );

    let range = survey::survey_parallel(observer, &params, samples, seed, workers);
    if range.is_empty() {
        println!("No samples");
        return ExitCode::SUCCESS;
    }

    println!("{} {}", range.min, range.max);
    println!(
        "antipodal bound {:.6} h, max reached {:.2}%",
        antipodal_hours(&params),
        100.0 * range.max / antipodal_hours(&params)
    );
    println!("seed {}", seed);
    ExitCode::SUCCESS
}

fn serve(path: &str) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
