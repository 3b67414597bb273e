//! Chart rendering for benchmark results.
//!
//! Reads the aggregated result rows and renders two line charts, one series
//! per interpreter: interpretation time vs `n` and peak memory vs `n`.

use crate::error::{LuabenchError, Result};
use crate::results::ResultRow;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// File name of the time-vs-n chart.
pub const TIME_PLOT_FILE: &str = "benchmark_time_plot.png";
/// File name of the memory-vs-n chart.
pub const MEMORY_PLOT_FILE: &str = "benchmark_memory_plot.png";

const PLOT_SIZE: (u32, u32) = (1000, 600);

fn plot_err<E: std::error::Error>(e: E) -> LuabenchError {
    LuabenchError::Plot(e.to_string())
}

/// Group rows into one (name, points) series per interpreter, preserving the
/// order interpreters first appear in the table.
fn series_by_interpreter(
    rows: &[ResultRow],
    value: impl Fn(&ResultRow) -> f64,
) -> Vec<(String, Vec<(f64, f64)>)> {
    let mut series: Vec<(String, Vec<(f64, f64)>)> = Vec::new();
    for row in rows {
        let point = (row.n as f64, value(row));
        match series.iter_mut().find(|(name, _)| *name == row.interpreter) {
            Some((_, points)) => points.push(point),
            None => series.push((row.interpreter.clone(), vec![point])),
        }
    }
    series
}

/// Axis ranges covering all points, with 5% headroom above the top value.
fn axis_ranges(series: &[(String, Vec<(f64, f64)>)]) -> ((f64, f64), f64) {
    let mut x_min = f64::MAX;
    let mut x_max = f64::MIN;
    let mut y_max = 0.0f64;
    for (_, points) in series {
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_max = y_max.max(y);
        }
    }
    if y_max <= 0.0 {
        y_max = 1.0;
    }
    ((x_min, x_max), y_max * 1.05)
}

fn draw_chart(
    rows: &[ResultRow],
    path: &Path,
    title: &str,
    y_desc: &str,
    value: impl Fn(&ResultRow) -> f64,
) -> Result<()> {
    let series = series_by_interpreter(rows, value);
    let ((x_min, x_max), y_max) = axis_ranges(&series);

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max.max(x_min + 1.0), 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("n")
        .y_desc(y_desc)
        .draw()
        .map_err(plot_err)?;

    for (idx, (name, points)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(plot_err)?
            .label(name.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&point| Circle::new(point, 3, Palette99::pick(idx).filled())),
            )
            .map_err(plot_err)?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Render both charts into `out_dir` and return their paths.
pub fn render_charts(rows: &[ResultRow], out_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    if rows.is_empty() {
        return Err(LuabenchError::EmptyResults);
    }
    std::fs::create_dir_all(out_dir)?;

    let time_path = out_dir.join(TIME_PLOT_FILE);
    draw_chart(
        rows,
        &time_path,
        "Interpretation time vs n",
        "Time (ms)",
        |row| row.time_ms,
    )?;

    let memory_path = out_dir.join(MEMORY_PLOT_FILE);
    draw_chart(
        rows,
        &memory_path,
        "Peak memory vs n",
        "Peak memory (KB)",
        |row| row.peak_kb,
    )?;

    Ok((time_path, memory_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_rows() -> Vec<ResultRow> {
        vec![
            ResultRow {
                interpreter: "lua".to_string(),
                n: 10,
                time_ms: 1.0,
                peak_kb: 2000.0,
            },
            ResultRow {
                interpreter: "gua".to_string(),
                n: 10,
                time_ms: 2.0,
                peak_kb: 4000.0,
            },
            ResultRow {
                interpreter: "lua".to_string(),
                n: 50,
                time_ms: 3.0,
                peak_kb: 2500.0,
            },
            ResultRow {
                interpreter: "gua".to_string(),
                n: 50,
                time_ms: 6.0,
                peak_kb: 4500.0,
            },
        ]
    }

    #[test]
    fn test_series_grouping_preserves_first_seen_order() {
        let series = series_by_interpreter(&sample_rows(), |r| r.time_ms);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].0, "lua");
        assert_eq!(series[1].0, "gua");
        assert_eq!(series[0].1, vec![(10.0, 1.0), (50.0, 3.0)]);
        assert_eq!(series[1].1, vec![(10.0, 2.0), (50.0, 6.0)]);
    }

    #[test]
    fn test_axis_ranges_cover_all_points_with_headroom() {
        let series = series_by_interpreter(&sample_rows(), |r| r.time_ms);
        let ((x_min, x_max), y_max) = axis_ranges(&series);

        assert_eq!(x_min, 10.0);
        assert_eq!(x_max, 50.0);
        assert!((y_max - 6.3).abs() < 1e-9);
    }

    #[test]
    fn test_axis_ranges_degenerate_y() {
        let series = vec![("lua".to_string(), vec![(10.0, 0.0)])];
        let (_, y_max) = axis_ranges(&series);
        assert!(y_max > 0.0);
    }

    #[test]
    fn test_render_charts_rejects_empty_table() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            render_charts(&[], dir.path()),
            Err(LuabenchError::EmptyResults)
        ));
    }

    #[test]
    fn test_render_charts_writes_both_images() {
        let dir = tempdir().unwrap();
        let (time_path, memory_path) = render_charts(&sample_rows(), dir.path()).unwrap();

        assert_eq!(time_path, dir.path().join(TIME_PLOT_FILE));
        assert_eq!(memory_path, dir.path().join(MEMORY_PLOT_FILE));
        assert!(std::fs::metadata(&time_path).unwrap().len() > 0);
        assert!(std::fs::metadata(&memory_path).unwrap().len() > 0);
    }
}
