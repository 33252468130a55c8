use std::fmt::Display;
use std::path::{Path, PathBuf};

use jwt_bench_config::{PlotConfig, Scheme};
use plotters::prelude::*;

use crate::dataset::Dataset;
use crate::error::{PlotError, Result};
use crate::models::Metric;
use crate::paths::graphs_file;

pub const LOG_TARGET: &str = "jwt-bench::graph";

const CHART_SIZE: (u32, u32) = (640, 480);
const TITLE_FONT_SIZE: u32 = 28;
const LABEL_FONT_SIZE: u32 = 16;
const STROKE_WIDTH: u32 = 2;

const SERIES_COLORS: [RGBColor; 3] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
];

/// Values of one scheme for one metric, indexed by trial.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub scheme: Scheme,
    pub values: Vec<f64>,
}

/// Extract the first `trials` values of `metric` for every group.
pub fn series_for(dataset: &Dataset, metric: Metric, trials: usize) -> Result<Vec<Series>> {
    dataset
        .groups()
        .iter()
        .map(|(scheme, group)| {
            let Some(records) = group.get(..trials) else {
                return Err(PlotError::InsufficientTrials {
                    scheme: *scheme,
                    found: group.len(),
                    expected: trials,
                });
            };

            Ok(Series {
                scheme: *scheme,
                values: records.iter().map(|record| metric.value(record)).collect(),
            })
        })
        .collect()
}

/// Render the generation, size and transfer charts for `dataset`.
///
/// Every series is extracted before the first file is written, so a dataset
/// with a short group leaves no charts behind.
pub fn generate_charts(dataset: &Dataset, config: &PlotConfig) -> Result<Vec<PathBuf>> {
    let charts = Metric::ALL
        .into_iter()
        .map(|metric| Ok((metric, series_for(dataset, metric, config.trials)?)))
        .collect::<Result<Vec<_>>>()?;

    let mut written = Vec::with_capacity(charts.len());
    for (metric, series) in charts {
        let path = graphs_file(config, metric);
        draw_chart(&path, metric, config.trials, &series)?;
        written.push(path);
    }
    Ok(written)
}

fn write_error<E: Display>(path: &Path) -> impl FnOnce(E) -> PlotError + '_ {
    move |err| PlotError::OutputWrite {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

/// Draw one line per series against trial index and save it as a PNG.
pub fn draw_chart(path: &Path, metric: Metric, trials: usize, series: &[Series]) -> Result<()> {
    let x_max = trials.saturating_sub(1).max(1) as u32;
    let y_max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(write_error(path))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(metric.title(), ("sans-serif", TITLE_FONT_SIZE).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..x_max, 0f64..y_max)
        .map_err(write_error(path))?;

    chart
        .configure_mesh()
        .x_desc("trial index")
        .y_desc(metric.y_label())
        .axis_desc_style(("sans-serif", LABEL_FONT_SIZE))
        .draw()
        .map_err(write_error(path))?;

    for (position, s) in series.iter().enumerate() {
        let color = SERIES_COLORS[position % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                s.values
                    .iter()
                    .enumerate()
                    .map(|(trial, value)| (trial as u32, *value)),
                color.stroke_width(STROKE_WIDTH),
            ))
            .map_err(write_error(path))?
            .label(s.scheme.name())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(STROKE_WIDTH))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(write_error(path))?;

    root.present().map_err(write_error(path))?;

    tracing::info!(
        target: LOG_TARGET,
        path = %path.display(),
        chart = metric.title(),
        "generated chart",
    );
    Ok(())
}
