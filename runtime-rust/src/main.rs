//! RDP accountant binary
//!
//! Evaluates the RDP curve of a mechanism and converts it to an (epsilon, delta) guarantee.
//!
//! ## Usage
//!
//! ```bash
//! rdp-accountant randomized-response --flip-probability 0.7 --sampling-rate 0.05 --steps 100
//! rdp-accountant gaussian --sampling-rate 0.01 --noise-multiplier 1.1 --steps 1000 --delta 1e-5
//! ```

use clap::{Parser, Subcommand};
use error_chain::ChainedError;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use rdp_runtime::compute_curve;
use rdp_validator::base::{Mechanism, RandomizedResponse, SampledGaussian};
use rdp_validator::errors::*;
use rdp_validator::utilities::orders::default_orders;
use rdp_validator::{compute_privacy_spent, generate_report};

/// Renyi differential privacy accountant
#[derive(Parser, Debug)]
#[command(name = "rdp-accountant")]
#[command(version)]
#[command(about = "Computes the RDP curve of a training mechanism and the (epsilon, delta) guarantee it implies", long_about = None)]
struct Args {
    #[command(subcommand)]
    mechanism: Command,

    /// Target delta of the (epsilon, delta) guarantee
    #[arg(short = 'd', long, default_value_t = 1e-5, global = true)]
    delta: f64,

    /// Comma-separated RDP orders [default: 1.1, 1.2, ..., 10.9, 12, 13, ..., 127]
    #[arg(short = 'o', long, value_delimiter = ',', global = true)]
    orders: Vec<f64>,

    /// Print a json report instead of the best epsilon and order
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sampled Gaussian mechanism
    Gaussian {
        /// Probability each record is sampled at a step
        #[arg(short = 'q', long)]
        sampling_rate: f64,

        /// Noise standard deviation relative to the l2-sensitivity
        #[arg(short = 's', long)]
        noise_multiplier: f64,

        /// Number of training steps
        #[arg(short = 'n', long, default_value_t = 1)]
        steps: u64,
    },
    /// Binary randomized response
    RandomizedResponse {
        /// Response probability
        #[arg(short = 'p', long, default_value_t = 0.7)]
        flip_probability: f64,

        /// Outer sampling rate
        #[arg(short = 'q', long, default_value_t = 3000. / 60000.)]
        sampling_rate: f64,

        /// Number of training steps
        #[arg(short = 'n', long, default_value_t = 100)]
        steps: u64,
    },
}

fn run(args: Args) -> Result<()> {
    let (mechanism, steps): (Mechanism, u64) = match args.mechanism {
        Command::Gaussian { sampling_rate, noise_multiplier, steps } =>
            (SampledGaussian::new(sampling_rate, noise_multiplier).into(), steps),
        Command::RandomizedResponse { flip_probability, sampling_rate, steps } =>
            (RandomizedResponse::new(flip_probability, sampling_rate).into(), steps),
    };

    let orders = if args.orders.is_empty() { default_orders() } else { args.orders };
    info!("Evaluating {:?} over {} steps at {} orders", mechanism, steps, orders.len());

    let curve = compute_curve(&mechanism, steps, &orders)?;
    let spent = compute_privacy_spent(&curve, args.delta)?;
    info!("Best order {} gives epsilon {} at delta {}", spent.order, spent.epsilon, spent.delta);

    if args.json {
        println!("{}", generate_report(&mechanism, steps, &curve, Some(&spent))?);
    } else {
        println!("rdp: {}", spent.epsilon);
        println!("ORDERS: {}", spent.order);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    if let Err(err) = run(args) {
        error!("{}", err.display_chain());
        std::process::exit(1);
    }
}
