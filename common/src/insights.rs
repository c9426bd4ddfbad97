//! Insights page state and chart rendering.
//!
//! Charts are drawn with `plotters` into SVG strings that the page inlines.

use plotters::element::Pie;
use plotters::prelude::*;
use tracing::debug;

use crate::error::{ApiError, ChartError};
use crate::model::{DiseaseCount, Insights};

/// Diseases shown in the bar chart.
pub const BAR_LIMIT: usize = 10;
/// Slices shown in the pie chart.
pub const PIE_LIMIT: usize = 6;

const CHART_SIZE: (u32, u32) = (560, 320);
const BAR_COLOR: RGBColor = RGBColor(0x5B, 0x9B, 0xD5);
const PALETTE: [RGBColor; 6] = [
    RGBColor(0x5B, 0x9B, 0xD5),
    RGBColor(0x7F, 0xB3, 0xB8),
    RGBColor(0xB8, 0xA9, 0xD9),
    RGBColor(0x8D, 0xBD, 0xE1),
    RGBColor(0xA3, 0x8F, 0xC3),
    RGBColor(0x67, 0xA7, 0xD7),
];
const AXIS_LABEL_CHARS: usize = 14;

/// What the insights page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum InsightsView {
    Loading,
    Failed(String),
    /// Loaded, but no disease has been recorded yet.
    Empty(Insights),
    Loaded(Insights),
}

impl InsightsView {
    pub fn from_outcome(outcome: Result<Insights, ApiError>) -> Self {
        match outcome {
            Ok(i) if i.frequent_diseases.is_empty() => Self::Empty(i),
            Ok(i) => Self::Loaded(i),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    pub fn insights(&self) -> Option<&Insights> {
        match self {
            Self::Empty(i) | Self::Loaded(i) => Some(i),
            _ => None,
        }
    }
}

/// One summary card above the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub class: &'static str,
}

pub fn stat_cards(insights: &Insights) -> Vec<StatCard> {
    vec![
        StatCard {
            label: "Total Predictions",
            value: insights.total_predictions.to_string(),
            class: "stat-primary",
        },
        StatCard {
            label: "Average Confidence",
            value: format!("{:.1}%", insights.average_confidence),
            class: "stat-secondary",
        },
        StatCard {
            label: "Unique Diseases",
            value: insights.frequent_diseases.len().to_string(),
            class: "stat-accent",
        },
    ]
}

/// Rendered charts, absent for an empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct Charts {
    pub bar_svg: String,
    pub pie_svg: String,
}

pub fn render_charts(diseases: &[DiseaseCount]) -> Result<Option<Charts>, ChartError> {
    let (Some(bar_svg), Some(pie_svg)) = (bar_chart_svg(diseases)?, pie_chart_svg(diseases)?)
    else {
        return Ok(None);
    };
    Ok(Some(Charts { bar_svg, pie_svg }))
}

fn chart_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError(e.to_string())
}

fn short_label(name: &str) -> String {
    if name.chars().count() <= AXIS_LABEL_CHARS {
        return name.to_string();
    }
    let head: String = name.chars().take(AXIS_LABEL_CHARS - 1).collect();
    format!("{head}…")
}

/// Bar chart of the most frequent diseases.
pub fn bar_chart_svg(diseases: &[DiseaseCount]) -> Result<Option<String>, ChartError> {
    let data: Vec<&DiseaseCount> = diseases.iter().take(BAR_LIMIT).collect();
    if data.is_empty() {
        return Ok(None);
    }
    let max = data.iter().map(|d| d.count).max().unwrap_or(0).max(1);
    let y_top = max + max / 10 + 1;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        let mut chart = ChartBuilder::on(&root)
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(40)
            .build_cartesian_2d((0..data.len()).into_segmented(), 0u64..y_top)
            .map_err(chart_err)?;

        let x_label = |v: &SegmentValue<usize>| match v {
            SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => data
                .get(*i)
                .map(|d| short_label(&d.disease))
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(data.len())
            .x_label_formatter(&x_label)
            .x_label_style(("sans-serif", 10))
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_COLOR.filled())
                    .margin(6)
                    .data(data.iter().enumerate().map(|(i, d)| (i, d.count))),
            )
            .map_err(chart_err)?
            .label("Detection Count")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BAR_COLOR.filled()));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(chart_err)?;
        root.present().map_err(chart_err)?;
    }
    debug!("Rendered bar chart ({} diseases)", data.len());
    Ok(Some(svg))
}

/// Pie chart of the distribution among the top diseases, labelled with
/// percentages.
pub fn pie_chart_svg(diseases: &[DiseaseCount]) -> Result<Option<String>, ChartError> {
    let data: Vec<&DiseaseCount> = diseases.iter().take(PIE_LIMIT).collect();
    let total: u64 = data.iter().map(|d| d.count).sum();
    if data.is_empty() || total == 0 {
        return Ok(None);
    }

    let sizes: Vec<f64> = data.iter().map(|d| d.count as f64).collect();
    let colors: Vec<RGBColor> = (0..data.len()).map(|i| PALETTE[i % PALETTE.len()]).collect();
    let labels: Vec<String> = data.iter().map(|d| short_label(&d.disease)).collect();
    let center = (CHART_SIZE.0 as i32 / 2, CHART_SIZE.1 as i32 / 2);
    let radius = 100.0;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 11).into_font().color(&BLACK));
        pie.percentages(("sans-serif", 12).into_font().color(&WHITE));
        root.draw(&pie).map_err(chart_err)?;
        root.present().map_err(chart_err)?;
    }
    debug!("Rendered pie chart ({} slices)", data.len());
    Ok(Some(svg))
}
