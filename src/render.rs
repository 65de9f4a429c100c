//! Chart construction.
//!
//! [`render`] turns a table and a [`RenderConfig`] into a [`Chart`]: a plain
//! description of what the plot panel draws. It holds no state.
//! [`render_marker`] does the same for a marker that is already classified,
//! which lets the UI redraw without classifying the column again.

use std::collections::BTreeMap;

use eframe::egui::Color32;

use crate::color::{ColorMap, Gradient};
use crate::data::filter::{ScaleBounds, filtered_indices};
use crate::data::marker::{CategoricalMarker, Marker, NumericMarker, classify};
use crate::data::model::Table;
use crate::error::{VizError, VizResult};

/// Pixels per unit of figure width/height.
pub const PIXELS_PER_UNIT: f32 = 100.0;

/// Number of discrete colours a continuous marker is drawn with.
pub const GRADIENT_STEPS: usize = 64;

/// Legend title for categorical markers.
pub const LEGEND_TITLE: &str = "Levels";

// ---------------------------------------------------------------------------
// Render configuration
// ---------------------------------------------------------------------------

/// Every user-adjustable option of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Column whose values colour the points.
    pub marker: String,
    /// Figure width in hundreds of pixels.
    pub width: f32,
    /// Figure height in hundreds of pixels.
    pub height: f32,
    /// Point radius.
    pub dot_size: f32,
    /// Colour-scale range for numeric markers; `None` uses the outlier-robust
    /// defaults.
    pub scale: Option<ScaleBounds>,
    /// Draw only the rows inside the scale range (numeric markers only).
    pub filter_outliers: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            marker: String::new(),
            width: 10.0,
            height: 10.0,
            dot_size: 5.0,
            scale: None,
            filter_outliers: true,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> VizResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(VizError::InvalidConfig(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(VizError::InvalidConfig(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        if !(self.dot_size.is_finite() && self.dot_size >= 0.0) {
            return Err(VizError::InvalidConfig(format!(
                "dot size must be non-negative, got {}",
                self.dot_size
            )));
        }
        if let Some(b) = self.scale {
            if !(b.min.is_finite() && b.max.is_finite()) {
                return Err(VizError::InvalidConfig(
                    "scale bounds must be finite".to_string(),
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Chart description
// ---------------------------------------------------------------------------

/// One group of identically coloured points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend label; empty for series that stay out of the legend.
    pub name: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Legend {
    /// Discrete levels with their colours, in lexical order.
    Categorical {
        title: String,
        entries: Vec<(String, Color32)>,
    },
    /// Continuous viridis bar spanning `[min, max]`.
    ColorBar { column: String, min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub width_px: f32,
    pub height_px: f32,
    /// Fixed `[min, max]` of the X axis over the full table.
    pub x_range: [f64; 2],
    /// Fixed `[min, max]` of the Y axis over the full table.
    pub y_range: [f64; 2],
    pub show_tick_labels: bool,
    pub x_title: String,
    pub y_title: String,
    pub point_radius: f32,
    pub series: Vec<Series>,
    pub legend: Legend,
}

impl Chart {
    /// Total number of points drawn.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Build the chart for `config.marker`.
pub fn render(table: &Table, config: &RenderConfig) -> VizResult<Chart> {
    config.validate()?;
    let marker = classify(table, &config.marker)?;
    Ok(render_marker(table, &marker, config))
}

/// Build the chart for an already classified marker.
///
/// `config` must already be validated and `marker` must come from `table`.
pub fn render_marker(table: &Table, marker: &Marker, config: &RenderConfig) -> Chart {
    let (series, legend) = match marker {
        Marker::Numeric(m) => numeric_series(table, m, config),
        Marker::Categorical(m) => categorical_series(table, m),
    };

    Chart {
        width_px: config.width * PIXELS_PER_UNIT,
        height_px: config.height * PIXELS_PER_UNIT,
        x_range: table.x_range(),
        y_range: table.y_range(),
        show_tick_labels: false,
        x_title: String::new(),
        y_title: String::new(),
        point_radius: config.dot_size,
        series,
        legend,
    }
}

fn numeric_series(
    table: &Table,
    marker: &NumericMarker,
    config: &RenderConfig,
) -> (Vec<Series>, Legend) {
    let bounds = config.scale.unwrap_or_else(|| marker.stats.default_bounds());

    // Filtered: the colour bar spans the drawn values, or the bounds when
    // nothing is drawn. Unfiltered: every row is drawn on the bounds, and
    // values outside them take the end colours.
    let (rows, lo, hi) = if config.filter_outliers {
        let rows = filtered_indices(&marker.values, bounds);
        let (lo, hi) = rows
            .iter()
            .filter_map(|&i| marker.values[i])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if lo <= hi {
            (rows, lo, hi)
        } else {
            (rows, bounds.min, bounds.max)
        }
    } else {
        let rows = (0..marker.values.len())
            .filter(|&i| marker.values[i].is_some_and(f64::is_finite))
            .collect();
        (rows, bounds.min, bounds.max)
    };

    let gradient = Gradient::viridis();
    let mut buckets: BTreeMap<usize, Vec<[f64; 2]>> = BTreeMap::new();
    for &i in &rows {
        let Some(v) = marker.values[i] else { continue };
        buckets
            .entry(gradient_bucket(v, lo, hi))
            .or_default()
            .push([table.x[i], table.y[i]]);
    }

    let series = buckets
        .into_iter()
        .map(|(bucket, points)| {
            let t = bucket as f64 / (GRADIENT_STEPS - 1) as f64;
            Series {
                name: String::new(),
                color: gradient.color_at(t),
                points,
            }
        })
        .collect();

    let legend = Legend::ColorBar {
        column: marker.column.clone(),
        min: lo,
        max: hi,
    };
    (series, legend)
}

fn gradient_bucket(value: f64, min: f64, max: f64) -> usize {
    let span = max - min;
    if span.abs() < f64::EPSILON {
        return GRADIENT_STEPS / 2;
    }
    let t = ((value - min) / span).clamp(0.0, 1.0);
    (t * (GRADIENT_STEPS - 1) as f64).round() as usize
}

fn categorical_series(table: &Table, marker: &CategoricalMarker) -> (Vec<Series>, Legend) {
    let color_map = ColorMap::new(marker);

    let mut by_code: Vec<Vec<[f64; 2]>> = vec![Vec::new(); marker.n_levels()];
    let mut missing: Vec<[f64; 2]> = Vec::new();
    for (row, code) in marker.codes.iter().enumerate() {
        let point = [table.x[row], table.y[row]];
        match code {
            Some(c) => by_code[*c].push(point),
            None => missing.push(point),
        }
    }

    let mut series: Vec<Series> = marker
        .levels()
        .into_iter()
        .map(|(code, label)| Series {
            name: label.to_string(),
            color: color_map.color_for(Some(code)),
            points: std::mem::take(&mut by_code[code]),
        })
        .collect();

    if !missing.is_empty() {
        series.push(Series {
            name: String::new(),
            color: color_map.color_for(None),
            points: missing,
        });
    }

    let legend = Legend::Categorical {
        title: LEGEND_TITLE.to_string(),
        entries: color_map.legend_entries().to_vec(),
    };
    (series, legend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_tsv;

    const SAMPLE: &[u8] = b"Name\tX\tY\tCD3\tPhenotype\tFlat\n\
        c1\t0\t-5\t1\tb\t2\n\
        c2\t10\t0\t2\ta\t2\n\
        c3\t20\t5\t3\tb\t2\n\
        c4\t30\t10\t4\tc\t2\n\
        c5\t40\t15\t100\ta\t9\n";

    fn config(marker: &str) -> RenderConfig {
        RenderConfig {
            marker: marker.to_string(),
            ..Default::default()
        }
    }

    fn all_points(chart: &Chart) -> Vec<[f64; 2]> {
        let mut pts: Vec<[f64; 2]> = chart
            .series
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .collect();
        pts.sort_by(|a, b| a[0].total_cmp(&b[0]));
        pts
    }

    #[test]
    fn test_numeric_filters_outliers() {
        let table = load_tsv(SAMPLE).unwrap();
        let chart = render(&table, &config("CD3")).unwrap();

        // 100 lies above the upper fence (7) and is dropped.
        assert_eq!(chart.point_count(), 4);
        assert!(!all_points(&chart).contains(&[40.0, 15.0]));
        match chart.legend {
            Legend::ColorBar { min, max, .. } => {
                assert_eq!(min, 1.0);
                assert_eq!(max, 4.0);
            }
            _ => panic!("expected colour bar"),
        }
    }

    #[test]
    fn test_axis_ranges_use_full_table() {
        let table = load_tsv(SAMPLE).unwrap();
        let chart = render(&table, &config("CD3")).unwrap();
        assert_eq!(chart.x_range, [0.0, 40.0]);
        assert_eq!(chart.y_range, [-5.0, 15.0]);

        let narrow = RenderConfig {
            scale: Some(ScaleBounds { min: 2.0, max: 2.0 }),
            ..config("CD3")
        };
        let chart = render(&table, &narrow).unwrap();
        assert_eq!(chart.point_count(), 1);
        assert_eq!(chart.x_range, [0.0, 40.0]);
        assert_eq!(chart.y_range, [-5.0, 15.0]);
    }

    #[test]
    fn test_filter_outliers_disabled() {
        let table = load_tsv(SAMPLE).unwrap();
        let cfg = RenderConfig {
            filter_outliers: false,
            ..config("CD3")
        };
        let chart = render(&table, &cfg).unwrap();
        assert_eq!(chart.point_count(), 5);
    }

    #[test]
    fn test_unfiltered_scale_sets_colour_range() {
        let table = load_tsv(SAMPLE).unwrap();
        let low = RenderConfig {
            filter_outliers: false,
            scale: Some(ScaleBounds { min: 1.0, max: 7.0 }),
            ..config("CD3")
        };
        let high = RenderConfig {
            scale: Some(ScaleBounds { min: 50.0, max: 60.0 }),
            ..low.clone()
        };
        let a = render(&table, &low).unwrap();
        let b = render(&table, &high).unwrap();

        assert_eq!(a.point_count(), 5);
        assert_eq!(b.point_count(), 5);
        assert_ne!(a.series, b.series);
        assert!(matches!(a.legend, Legend::ColorBar { min, max, .. } if min == 1.0 && max == 7.0));
        assert!(matches!(b.legend, Legend::ColorBar { min, max, .. } if min == 50.0 && max == 60.0));

        // Below the [50, 60] scale, everything clamps to the first colour.
        assert_eq!(b.series.len(), 2);
        assert_eq!(b.series[0].color, Gradient::viridis().color_at(0.0));
        assert_eq!(b.series[0].points.len(), 4);
        assert_eq!(b.series[1].color, Gradient::viridis().color_at(1.0));
    }

    #[test]
    fn test_render_marker_matches_render() {
        let table = load_tsv(SAMPLE).unwrap();
        let cfg = config("Phenotype");
        let marker = classify(&table, "Phenotype").unwrap();
        assert_eq!(render_marker(&table, &marker, &cfg), render(&table, &cfg).unwrap());
    }

    #[test]
    fn test_categorical_uses_all_rows() {
        let table = load_tsv(SAMPLE).unwrap();
        let chart = render(&table, &config("Phenotype")).unwrap();

        assert_eq!(chart.point_count(), 5);
        let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        match &chart.legend {
            Legend::Categorical { title, entries } => {
                assert_eq!(title, "Levels");
                assert_eq!(entries.len(), 3);
            }
            _ => panic!("expected categorical legend"),
        }
    }

    #[test]
    fn test_zero_variance_renders() {
        let table = load_tsv(SAMPLE).unwrap();
        // Flat = [2, 2, 2, 2, 9]: Q1 = Q3 = 2, so both fences sit at 2.
        let chart = render(&table, &config("Flat")).unwrap();
        assert_eq!(chart.point_count(), 4);
    }

    #[test]
    fn test_empty_selection_renders() {
        let table = load_tsv(SAMPLE).unwrap();
        let cfg = RenderConfig {
            scale: Some(ScaleBounds { min: 500.0, max: 600.0 }),
            ..config("CD3")
        };
        let chart = render(&table, &cfg).unwrap();
        assert_eq!(chart.point_count(), 0);
        assert!(matches!(
            chart.legend,
            Legend::ColorBar { min, max, .. } if min == 500.0 && max == 600.0
        ));
    }

    #[test]
    fn test_dimensions_and_axes() {
        let table = load_tsv(SAMPLE).unwrap();
        let cfg = RenderConfig {
            width: 8.0,
            height: 6.5,
            dot_size: 2.5,
            ..config("Phenotype")
        };
        let chart = render(&table, &cfg).unwrap();
        assert_eq!(chart.width_px, 800.0);
        assert_eq!(chart.height_px, 650.0);
        assert_eq!(chart.point_radius, 2.5);
        assert!(!chart.show_tick_labels);
        assert!(chart.x_title.is_empty());
        assert!(chart.y_title.is_empty());
    }

    #[test]
    fn test_render_errors() {
        let table = load_tsv(SAMPLE).unwrap();
        assert!(matches!(
            render(&table, &config("CD8")),
            Err(VizError::ColumnNotFound(_))
        ));

        let bad = RenderConfig {
            width: 0.0,
            ..config("CD3")
        };
        assert!(matches!(render(&table, &bad), Err(VizError::InvalidConfig(_))));

        let bad = RenderConfig {
            dot_size: -1.0,
            ..config("CD3")
        };
        assert!(matches!(render(&table, &bad), Err(VizError::InvalidConfig(_))));
    }

    #[test]
    fn test_gradient_bucket_range() {
        assert_eq!(gradient_bucket(0.0, 0.0, 1.0), 0);
        assert_eq!(gradient_bucket(1.0, 0.0, 1.0), GRADIENT_STEPS - 1);
        assert_eq!(gradient_bucket(5.0, 5.0, 5.0), GRADIENT_STEPS / 2);
    }
}
