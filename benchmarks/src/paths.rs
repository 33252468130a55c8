use std::path::PathBuf;

use jwt_bench_config::PlotConfig;

use crate::models::Metric;

/// Get the path of the chart rendered for `metric`.
pub fn graphs_file(config: &PlotConfig, metric: Metric) -> PathBuf {
    config.output_dir.join(metric.file_name())
}

/// Get the paths of every chart, in rendering order.
pub fn graphs_files(config: &PlotConfig) -> Vec<PathBuf> {
    Metric::ALL
        .into_iter()
        .map(|metric| graphs_file(config, metric))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charts_land_in_output_dir() {
        let config = PlotConfig {
            output_dir: PathBuf::from("/tmp/charts"),
            ..PlotConfig::default()
        };

        assert_eq!(
            graphs_files(&config),
            [
                PathBuf::from("/tmp/charts/generate.png"),
                PathBuf::from("/tmp/charts/size.png"),
                PathBuf::from("/tmp/charts/transfer.png"),
            ]
        );
        assert_eq!(
            graphs_file(&PlotConfig::default(), Metric::Size),
            PathBuf::from("./size.png")
        );
    }
}
