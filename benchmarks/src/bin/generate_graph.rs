use jwt_benchmarks::{dataset::Dataset, graph::generate_charts, setup_logger, PlotConfig};

fn main() -> anyhow::Result<()> {
    let _guard = setup_logger();

    let config = PlotConfig::default();
    let dataset = Dataset::from_path(&config)?;
    generate_charts(&dataset, &config)?;

    println!("DONE");
    Ok(())
}
