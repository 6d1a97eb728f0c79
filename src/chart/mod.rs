//! Time-series → vector chart.
//!
//! `render` is pure: it lays out every coordinate and label up front so the
//! result can be asserted on directly, and `svg` turns that layout into markup.

mod svg;

use serde::Serialize;

use crate::format::{format_axis_date, format_axis_value};
use crate::model::ChartPoint;

pub use svg::escape_xml;

/// Fixed drawing width in px.
pub const CHART_WIDTH: f64 = 600.0;
pub const DEFAULT_HEIGHT: f64 = 200.0;
pub const DEFAULT_COLOR: &str = "#007bff";
/// Space below the plot reserved for the date axis.
const AXIS_MARGIN: f64 = 40.0;
/// Gridline positions as fractions of the plot height, top down.
pub const GRID_RATIOS: [f64; 3] = [0.25, 0.5, 0.75];
/// Target upper bound on x-axis date labels.
const MAX_X_TICKS: usize = 6;

#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub title: String,
    pub height: f64,
    pub color: String,
}

impl ChartOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            height: DEFAULT_HEIGHT,
            color: DEFAULT_COLOR.to_string(),
        }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gridline {
    pub ratio: f64,
    pub y: f64,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    /// Index of the point this label belongs to.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Fully laid-out chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub color: String,
    pub width: f64,
    pub height: f64,
    pub plot_height: f64,
    pub min_value: f64,
    pub max_value: f64,
    /// `max - min`, or 1 when every value is equal.
    pub value_span: f64,
    pub point_spacing: f64,
    pub stroke_path: String,
    pub area_path: String,
    pub markers: Vec<Marker>,
    pub gridlines: Vec<Gridline>,
    pub x_labels: Vec<AxisLabel>,
    /// Most recent value, formatted for the corner badge.
    pub latest_label: String,
}

impl Chart {
    /// Value range mapped onto the plot height: `[min, max]`, or `[v, v + 1]`
    /// for a flat series.
    pub fn value_range(&self) -> (f64, f64) {
        (self.min_value, self.min_value + self.value_span)
    }

    fn y_for(&self, value: f64) -> f64 {
        self.plot_height - ((value - self.min_value) / self.value_span) * self.plot_height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartRender {
    /// Empty input; rendered as a placeholder.
    NoData { title: String },
    Chart(Chart),
}

impl ChartRender {
    pub fn chart(&self) -> Option<&Chart> {
        match self {
            ChartRender::Chart(c) => Some(c),
            ChartRender::NoData { .. } => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, ChartRender::NoData { .. })
    }
}

/// Lay out `points` (oldest first) as a line/area chart.
pub fn render(points: &[ChartPoint], options: &ChartOptions) -> ChartRender {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return ChartRender::NoData {
            title: options.title.clone(),
        };
    };

    let (min_value, max_value) = points.iter().fold((first.value, first.value), |(lo, hi), p| {
        (lo.min(p.value), hi.max(p.value))
    });
    let span = max_value - min_value;
    let value_span = if span == 0.0 { 1.0 } else { span };

    let n = points.len();
    let plot_height = options.height - AXIS_MARGIN;
    let point_spacing = CHART_WIDTH / (n - 1).max(1) as f64;

    let mut chart = Chart {
        title: options.title.clone(),
        color: options.color.clone(),
        width: CHART_WIDTH,
        height: options.height,
        plot_height,
        min_value,
        max_value,
        value_span,
        point_spacing,
        stroke_path: String::new(),
        area_path: String::new(),
        markers: Vec::with_capacity(n),
        gridlines: Vec::with_capacity(GRID_RATIOS.len()),
        x_labels: Vec::new(),
        latest_label: format_axis_value(last.value),
    };

    chart.markers = points
        .iter()
        .enumerate()
        .map(|(i, p)| Marker {
            x: i as f64 * point_spacing,
            y: chart.y_for(p.value),
            value: p.value,
        })
        .collect();

    chart.stroke_path = chart
        .markers
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let cmd = if i == 0 { 'M' } else { 'L' };
            format!("{cmd} {} {}", m.x, m.y)
        })
        .collect::<Vec<_>>()
        .join(" ");

    chart.area_path = format!(
        "{} L {} {plot_height} L 0 {plot_height} Z",
        chart.stroke_path,
        (n - 1) as f64 * point_spacing,
    );

    chart.gridlines = GRID_RATIOS
        .iter()
        .map(|&ratio| {
            let value = max_value - (max_value - min_value) * ratio;
            Gridline {
                ratio,
                y: plot_height * ratio,
                value,
                label: format_axis_value(value),
            }
        })
        .collect();

    let step = (n / MAX_X_TICKS).max(1);
    chart.x_labels = points
        .iter()
        .enumerate()
        .filter(|(i, _)| i % step == 0)
        .map(|(i, p)| AxisLabel {
            index: i,
            x: i as f64 * point_spacing,
            y: plot_height + 20.0,
            text: format_axis_date(p.date),
        })
        .collect();

    ChartRender::Chart(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> Vec<ChartPoint> {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| ChartPoint::new(start + chrono::Days::new(i as u64), *v))
            .collect()
    }

    #[test]
    fn test_y_mapping_endpoints() {
        let render = render(&series(&[100.0, 300.0]), &ChartOptions::new("t"));
        let chart = render.chart().unwrap();
        assert_eq!(chart.plot_height, 160.0);
        // min sits on the baseline, max on the top edge
        assert_eq!(chart.markers[0].y, 160.0);
        assert_eq!(chart.markers[1].y, 0.0);
        assert_eq!(chart.stroke_path, "M 0 160 L 600 0");
        assert_eq!(chart.area_path, "M 0 160 L 600 0 L 600 160 L 0 160 Z");
    }

    #[test]
    fn test_single_point_uses_full_width() {
        let render = render(&series(&[5.0]), &ChartOptions::new("t"));
        let chart = render.chart().unwrap();
        assert_eq!(chart.point_spacing, CHART_WIDTH);
        assert_eq!(chart.value_range(), (5.0, 6.0));
        assert_eq!(chart.x_labels.len(), 1);
    }
}
