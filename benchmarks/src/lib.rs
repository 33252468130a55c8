//! # jwt-benchmarks
//!
//! Measures how long RSA, ECDSA and HMAC signed JSON Web Tokens take to issue
//! and to fetch over HTTP, and charts the results.
//!
//! Two binaries drive the crate:
//!
//! - `run_benchmark` signs tokens behind a local HTTP service, fetches each
//!   scheme [`TRIAL_COUNT`] times and writes the measurements to `result.csv`.
//! - `generate_graph` reads `result.csv` and renders `generate.png`,
//!   `size.png` and `transfer.png` into the working directory.
//!
//! Log verbosity follows `RUST_LOG` and defaults to warnings.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod dataset;
pub mod error;
pub mod graph;
pub mod models;
pub mod paths;
pub mod runner;
pub mod server;
pub mod token;

pub use jwt_bench_config::{PlotConfig, Scheme, TRIAL_COUNT};

pub fn setup_logger() -> tracing::subscriber::DefaultGuard {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
                .with_file(false)
                .with_line_number(false),
        )
        .with(filter)
        .set_default()
}
