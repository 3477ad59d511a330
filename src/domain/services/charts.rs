#[cfg(test)]
#[path = "charts_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::ChartData;
use crate::domain::models::ChartPayload;
use crate::domain::models::ChartSpec;
use crate::domain::models::ChartType;
use crate::domain::models::ColorSpec;

pub const PALETTE: [&str; 10] = [
    "#4e79a7", // blue
    "#f28e2c", // orange
    "#e15759", // red
    "#76b7b2", // teal
    "#59a14f", // green
    "#edc949", // yellow
    "#af7aa1", // purple
    "#ff9da7", // pink
    "#9c755f", // brown
    "#bab0ab", // gray
];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn palette_color(idx: usize) -> String {
    return PALETTE[idx % PALETTE.len()].to_string();
}

fn is_date_like(label: &str) -> bool {
    let bytes = label.as_bytes();
    if bytes.len() >= 7
        && bytes[..4].iter().all(|e| return e.is_ascii_digit())
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(|e| return e.is_ascii_digit())
    {
        return true;
    }

    return MONTHS.iter().any(|month| return label.contains(month));
}

/// Picks a chart type when the API didn't name one. Best effort only:
/// date-like labels read as a time series, small categorical sets as a pie,
/// and everything else as a bar chart.
pub fn infer_chart_type(data: &ChartData) -> ChartType {
    if data.labels.is_empty() || data.datasets.is_empty() {
        return ChartType::Bar;
    }

    if data.labels.iter().any(|label| return is_date_like(label)) {
        return ChartType::Line;
    }

    if data.labels.len() <= 6 {
        return ChartType::Pie;
    }

    return ChartType::Bar;
}

/// Turns an API chart payload into a renderable spec: the type is resolved
/// or inferred, every dataset is validated against the label count, and
/// datasets without colors get palette colors by index.
pub fn normalize(payload: ChartPayload) -> Result<ChartSpec> {
    let mut data = payload.data;

    for dataset in data.datasets.iter() {
        if dataset.values.len() != data.labels.len() {
            bail!(format!(
                "Dataset '{label}' has {values} values for {labels} labels",
                label = dataset.label,
                values = dataset.values.len(),
                labels = data.labels.len()
            ));
        }
    }

    let chart_type = payload
        .chart_type
        .as_deref()
        .and_then(ChartType::parse)
        .unwrap_or_else(|| return infer_chart_type(&data));

    let label_count = data.labels.len();
    for (idx, dataset) in data.datasets.iter_mut().enumerate() {
        if dataset.background_color.is_some() {
            continue;
        }

        match chart_type {
            // Pie variants are colored per slice rather than per dataset.
            ChartType::Pie | ChartType::Doughnut => {
                let colors = (0..label_count).map(palette_color).collect();
                dataset.background_color = Some(ColorSpec::PerLabel(colors));
            }
            ChartType::Line => {
                dataset.border_color = Some(palette_color(idx));
                dataset.background_color = Some(ColorSpec::Single("transparent".to_string()));
            }
            _ => {
                dataset.background_color = Some(ColorSpec::Single(palette_color(idx)));
            }
        }
    }

    return Ok(ChartSpec {
        chart_type,
        data,
        options: payload.options,
    });
}
