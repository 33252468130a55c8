use anyhow::Context;
use jwt_bench_config::{Config, HarnessConfig};
use jwt_benchmarks::{runner::run_benchmark, setup_logger, TRIAL_COUNT};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = setup_logger();

    let config = HarnessConfig::from_env().context("failed to read harness config")?;
    let dataset = run_benchmark(&config, TRIAL_COUNT).await?;
    dataset.save(&config.results)?;

    println!("{}", config.results.display());
    Ok(())
}
