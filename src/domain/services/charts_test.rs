use anyhow::Result;

use super::infer_chart_type;
use super::normalize;
use super::PALETTE;
use crate::domain::models::ChartData;
use crate::domain::models::ChartPayload;
use crate::domain::models::ChartType;
use crate::domain::models::ColorSpec;
use crate::domain::models::Dataset;

fn dataset(label: &str, values: Vec<f64>) -> Dataset {
    return Dataset {
        label: label.to_string(),
        values,
        background_color: None,
        border_color: None,
    };
}

fn payload(chart_type: Option<&str>, labels: Vec<&str>, datasets: Vec<Dataset>) -> ChartPayload {
    return ChartPayload {
        chart_type: chart_type.map(|e| return e.to_string()),
        data: ChartData {
            labels: labels.iter().map(|e| return e.to_string()).collect(),
            datasets,
        },
        options: serde_json::Value::Null,
    };
}

#[test]
fn it_cycles_the_palette_by_dataset_index() -> Result<()> {
    let datasets = (0..12)
        .map(|idx| return dataset(&format!("series-{idx}"), vec![1.0, 2.0]))
        .collect::<Vec<Dataset>>();
    let res = normalize(payload(Some("bar"), vec!["Mon", "Tue"], datasets))?;

    let first = res.data.datasets[0].background_color.clone();
    let wrapped = res.data.datasets[PALETTE.len()].background_color.clone();

    assert_eq!(first, Some(ColorSpec::Single(PALETTE[0].to_string())));
    assert_eq!(first, wrapped);
    assert_eq!(
        res.data.datasets[1].background_color,
        Some(ColorSpec::Single(PALETTE[1].to_string()))
    );
    return Ok(());
}

#[test]
fn it_keeps_colors_the_api_already_assigned() -> Result<()> {
    let mut ds = dataset("revenue", vec![1.0, 2.0]);
    ds.background_color = Some(ColorSpec::Single("#123456".to_string()));
    let res = normalize(payload(Some("bar"), vec!["Mon", "Tue"], vec![ds]))?;

    assert_eq!(
        res.data.datasets[0].background_color,
        Some(ColorSpec::Single("#123456".to_string()))
    );
    return Ok(());
}

#[test]
fn it_colors_pie_charts_per_label() -> Result<()> {
    let res = normalize(payload(
        Some("pie"),
        vec!["Pizza", "Pasta", "Salad"],
        vec![dataset("orders", vec![10.0, 5.0, 2.0])],
    ))?;

    assert_eq!(
        res.data.datasets[0].background_color,
        Some(ColorSpec::PerLabel(vec![
            PALETTE[0].to_string(),
            PALETTE[1].to_string(),
            PALETTE[2].to_string(),
        ]))
    );
    return Ok(());
}

#[test]
fn it_gives_line_charts_a_transparent_fill_and_colored_border() -> Result<()> {
    let res = normalize(payload(
        Some("line"),
        vec!["2024-01", "2024-02"],
        vec![dataset("revenue", vec![100.0, 120.0])],
    ))?;

    assert_eq!(
        res.data.datasets[0].background_color,
        Some(ColorSpec::Single("transparent".to_string()))
    );
    assert_eq!(res.data.datasets[0].border_color, Some(PALETTE[0].to_string()));
    return Ok(());
}

#[test]
fn it_infers_line_for_date_labels() {
    let data = ChartData {
        labels: vec!["2024-01".to_string(), "2024-02".to_string(), "2024-03".to_string()],
        datasets: vec![dataset("revenue", vec![1.0, 2.0, 3.0])],
    };
    assert_eq!(infer_chart_type(&data), ChartType::Line);
}

#[test]
fn it_infers_line_for_month_name_labels() {
    let data = ChartData {
        labels: vec!["Jan".to_string(), "Feb".to_string(), "Mar".to_string()],
        datasets: vec![dataset("revenue", vec![1.0, 2.0, 3.0])],
    };
    assert_eq!(infer_chart_type(&data), ChartType::Line);
}

#[test]
fn it_infers_pie_for_small_categorical_sets() {
    let data = ChartData {
        labels: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        datasets: vec![dataset("orders", vec![1.0, 2.0, 3.0])],
    };
    assert_eq!(infer_chart_type(&data), ChartType::Pie);
}

#[test]
fn it_infers_bar_for_large_categorical_sets() {
    let labels = (0..7).map(|idx| return format!("dish-{idx}")).collect::<Vec<String>>();
    let data = ChartData {
        labels,
        datasets: vec![dataset("orders", vec![1.0; 7])],
    };
    assert_eq!(infer_chart_type(&data), ChartType::Bar);
}

#[test]
fn it_infers_bar_when_there_is_nothing_to_plot() {
    assert_eq!(infer_chart_type(&ChartData::default()), ChartType::Bar);
}

#[test]
fn it_respects_an_explicit_type_over_inference() -> Result<()> {
    let res = normalize(payload(
        Some("bar"),
        vec!["A", "B", "C"],
        vec![dataset("orders", vec![1.0, 2.0, 3.0])],
    ))?;

    assert_eq!(res.chart_type, ChartType::Bar);
    return Ok(());
}

#[test]
fn it_infers_when_the_type_is_unknown() -> Result<()> {
    let res = normalize(payload(
        Some("sparkline"),
        vec!["A", "B", "C"],
        vec![dataset("orders", vec![1.0, 2.0, 3.0])],
    ))?;

    assert_eq!(res.chart_type, ChartType::Pie);
    return Ok(());
}

#[test]
fn it_infers_when_the_type_is_missing() -> Result<()> {
    let res = normalize(payload(
        None,
        vec!["2024-01", "2024-02", "2024-03"],
        vec![dataset("revenue", vec![1.0, 2.0, 3.0])],
    ))?;

    assert_eq!(res.chart_type, ChartType::Line);
    return Ok(());
}

#[test]
fn it_rejects_datasets_that_do_not_match_the_labels() {
    let res = normalize(payload(
        Some("bar"),
        vec!["Mon", "Tue", "Wed"],
        vec![dataset("orders", vec![1.0, 2.0])],
    ));

    assert!(res.is_err());
}

#[test]
fn it_passes_chart_options_through() -> Result<()> {
    let mut chart = payload(
        Some("bar"),
        vec!["Mon", "Tue"],
        vec![dataset("orders", vec![1.0, 2.0])],
    );
    chart.options = serde_json::json!({"title": "Orders by day"});

    let res = normalize(chart)?;

    assert_eq!(res.title(), Some("Orders by day".to_string()));
    return Ok(());
}
