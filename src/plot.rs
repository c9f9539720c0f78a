//! Charts of benchmark results
//!
//! Renders SVG charts from [`BenchmarkRecord`]s:
//! - mean sort time against input size per language, log-log axes
//! - the same on linear axes, where constant-factor gaps are visible
//! - mean sort time per input case for one language at its largest size
//!
//! SVG output keeps text as text, so no system fonts are needed to render.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use thiserror::Error;

use crate::bench::{BenchmarkRecord, Case};

/// File name of the log-log chart.
pub const LOG_LOG_FILE: &str = "chart_log_log.svg";
/// File name of the linear chart.
pub const LINEAR_FILE: &str = "chart_linear.svg";
/// File name of the per-case chart.
pub const CASES_FILE: &str = "chart_cases.svg";

const CHART_SIZE: (u32, u32) = (1000, 600);

/// Errors raised while rendering charts.
#[derive(Debug, Error)]
pub enum PlotError {
    /// No records with a plottable point for the requested case.
    #[error("no {0} records to plot")]
    NoCaseData(Case),

    /// No records for the requested language.
    #[error("no records for language '{0}'")]
    NoLanguageData(String),

    /// The drawing backend failed.
    #[error("failed to draw chart: {0}")]
    Draw(String),

    /// Output directory could not be prepared.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for PlotError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Draw(err.to_string())
    }
}

/// Points `(size, mean ms)` per language for one case, sorted by size.
fn series_by_language(records: &[BenchmarkRecord], case: Case) -> BTreeMap<&str, Vec<(f64, f64)>> {
    let mut series: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for record in records.iter().filter(|r| r.case == case) {
        series
            .entry(record.language.as_str())
            .or_default()
            .push((record.size as f64, record.mean_sec * 1000.0));
    }
    for points in series.values_mut() {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
    }
    series
}

/// `((x_min, x_max), (y_min, y_max))` over `points`.
fn bounds<'a>(points: impl Iterator<Item = &'a (f64, f64)>) -> Option<((f64, f64), (f64, f64))> {
    points.fold(None, |acc, &(x, y)| match acc {
        None => Some(((x, x), (y, y))),
        Some(((x0, x1), (y0, y1))) => Some(((x0.min(x), x1.max(x)), (y0.min(y), y1.max(y)))),
    })
}

/// Mean time against input size for `case`, one line per language, log-log axes.
///
/// Points with a zero size or zero time cannot sit on a log axis and are skipped.
pub fn plot_log_log(records: &[BenchmarkRecord], case: Case, path: &Path) -> Result<(), PlotError> {
    let series: BTreeMap<&str, Vec<(f64, f64)>> = series_by_language(records, case)
        .into_iter()
        .map(|(language, points)| {
            let points: Vec<_> = points.into_iter().filter(|&(x, y)| x > 0.0 && y > 0.0).collect();
            (language, points)
        })
        .filter(|(_, points)| !points.is_empty())
        .collect();
    let ((x_lo, x_hi), (y_lo, y_hi)) =
        bounds(series.values().flatten()).ok_or(PlotError::NoCaseData(case))?;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Sort time vs input size, {case} input (log-log)"),
            ("sans-serif", 24),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(
            (x_lo / 1.5..x_hi * 1.5).log_scale(),
            (y_lo / 2.0..y_hi * 2.0).log_scale(),
        )?;

    chart
        .configure_mesh()
        .x_desc("input size (n)")
        .y_desc("mean time (ms)")
        .x_label_formatter(&|x: &f64| format!("{x:.0}"))
        .y_label_formatter(&|y: &f64| format!("{y:.3}"))
        .draw()?;

    for (idx, (language, points)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(*language)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart.draw_series(points.iter().map(|&p| Circle::new(p, 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;

    tracing::debug!(path = %path.display(), %case, languages = series.len(), "log-log chart written");
    Ok(())
}

/// Mean time against input size for `case`, one line per language, linear axes.
pub fn plot_linear(records: &[BenchmarkRecord], case: Case, path: &Path) -> Result<(), PlotError> {
    let series = series_by_language(records, case);
    let ((_, x_hi), (_, y_hi)) = bounds(series.values().flatten()).ok_or(PlotError::NoCaseData(case))?;
    let x_hi = if x_hi > 0.0 { x_hi * 1.05 } else { 1.0 };
    let y_hi = if y_hi > 0.0 { y_hi * 1.1 } else { 1.0 };

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Sort time vs input size, {case} input (linear)"),
            ("sans-serif", 24),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..x_hi, 0f64..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("input size (n)")
        .y_desc("mean time (ms)")
        .x_label_formatter(&|x: &f64| format!("{x:.0}"))
        .y_label_formatter(&|y: &f64| format!("{y:.3}"))
        .draw()?;

    for (idx, (language, points)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(*language)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart.draw_series(points.iter().map(|&p| Circle::new(p, 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;

    tracing::debug!(path = %path.display(), %case, languages = series.len(), "linear chart written");
    Ok(())
}

/// Mean time per input case for `language` at the largest size it was run with.
///
/// Heapsort does the same work whatever the input order, so the bars should
/// come out close to level.
pub fn plot_case_analysis(
    records: &[BenchmarkRecord],
    language: &str,
    path: &Path,
) -> Result<(), PlotError> {
    let largest = records
        .iter()
        .filter(|r| r.language == language)
        .map(|r| r.size)
        .max()
        .ok_or_else(|| PlotError::NoLanguageData(language.to_string()))?;

    let bars: Vec<(Case, f64)> = Case::ALL
        .iter()
        .filter_map(|&case| {
            records
                .iter()
                .find(|r| r.language == language && r.size == largest && r.case == case)
                .map(|r| (case, r.mean_sec * 1000.0))
        })
        .collect();
    let y_hi = bars.iter().map(|&(_, ms)| ms).fold(0.0, f64::max);
    let y_hi = if y_hi > 0.0 { y_hi * 1.2 } else { 1.0 };

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Sort time per input case, {language}, n = {largest}"),
            ("sans-serif", 24),
        )
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..bars.len() as f64, 0f64..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_: &f64| String::new())
        .y_desc("mean time (ms)")
        .draw()?;

    let color = Palette99::pick(0).to_rgba();
    chart.draw_series(bars.iter().enumerate().map(|(i, &(_, ms))| {
        let x = i as f64;
        Rectangle::new([(x + 0.15, 0.0), (x + 0.85, ms)], color.filled())
    }))?;
    chart.draw_series(bars.iter().enumerate().map(|(i, &(case, ms))| {
        Text::new(format!("{case}: {ms:.2} ms"), (i as f64 + 0.2, ms), ("sans-serif", 16))
    }))?;
    root.present()?;

    tracing::debug!(path = %path.display(), language, cases = bars.len(), "case chart written");
    Ok(())
}

/// Render all three charts into `out_dir` and return the written paths.
pub fn render_all(
    records: &[BenchmarkRecord],
    case: Case,
    language: &str,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, PlotError> {
    fs::create_dir_all(out_dir)?;

    let log_log = out_dir.join(LOG_LOG_FILE);
    plot_log_log(records, case, &log_log)?;
    let linear = out_dir.join(LINEAR_FILE);
    plot_linear(records, case, &linear)?;
    let cases = out_dir.join(CASES_FILE);
    plot_case_analysis(records, language, &cases)?;

    Ok(vec![log_log, linear, cases])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::Summary;

    fn record(language: &str, case: Case, size: usize, mean_sec: f64) -> BenchmarkRecord {
        let summary = Summary {
            mean: mean_sec,
            std_dev: mean_sec / 10.0,
            runs: 3,
        };
        BenchmarkRecord::new(language, case, size, &summary)
    }

    fn sample_records() -> Vec<BenchmarkRecord> {
        let mut records = Vec::new();
        for (size, base) in [(1_000, 0.0001), (10_000, 0.0012), (100_000, 0.015)] {
            for case in Case::ALL {
                records.push(record("rust", case, size, base));
                records.push(record("c++", case, size, base * 1.1));
            }
        }
        records
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("heapbench-plot-{tag}-{}", std::process::id()))
    }

    #[test]
    fn test_series_grouped_and_sorted() {
        let mut records = sample_records();
        records.reverse();
        let series = series_by_language(&records, Case::Random);
        assert_eq!(series.keys().copied().collect::<Vec<_>>(), ["c++", "rust"]);
        let sizes: Vec<f64> = series["rust"].iter().map(|p| p.0).collect();
        assert_eq!(sizes, [1_000.0, 10_000.0, 100_000.0]);
        assert!((series["rust"][0].1 - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_render_all_writes_svgs() {
        let dir = scratch_dir("all");
        let paths = render_all(&sample_records(), Case::Random, "rust", &dir).unwrap();

        assert_eq!(paths.len(), 3);
        for path in &paths {
            let svg = fs::read_to_string(path).unwrap();
            assert!(svg.contains("<svg"), "{} is not an SVG", path.display());
        }
        let log_log = fs::read_to_string(dir.join(LOG_LOG_FILE)).unwrap();
        assert!(log_log.contains("rust"));
        assert!(log_log.contains("c++"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_case_is_reported() {
        let records = vec![record("rust", Case::Sorted, 10, 0.001)];
        let path = scratch_dir("missing").with_extension("svg");
        assert!(matches!(
            plot_log_log(&records, Case::Random, &path),
            Err(PlotError::NoCaseData(Case::Random))
        ));
        assert!(matches!(
            plot_case_analysis(&records, "java", &path),
            Err(PlotError::NoLanguageData(_))
        ));
    }

    #[test]
    fn test_zero_timings_fall_back_on_linear_axes() {
        let records = vec![record("rust", Case::Random, 0, 0.0), record("rust", Case::Random, 5, 0.0)];
        let path = scratch_dir("zeros").with_extension("svg");

        assert!(matches!(
            plot_log_log(&records, Case::Random, &path),
            Err(PlotError::NoCaseData(_))
        ));
        plot_linear(&records, Case::Random, &path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("<svg"));
        fs::remove_file(&path).ok();
    }
}
