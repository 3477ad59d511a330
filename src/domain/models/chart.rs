use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::IntoEnumIterator;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, EnumIter, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Doughnut,
    Area,
    Table,
}

impl ChartType {
    pub fn parse(text: &str) -> Option<ChartType> {
        return ChartType::iter().find(|e| return e.to_string() == text.to_lowercase());
    }
}

/// Either a single color for a whole dataset, or one color per slice the way
/// pie and doughnut charts are colored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    PerLabel(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub label: String,
    #[serde(rename = "data", default)]
    pub values: Vec<f64>,
    #[serde(
        rename = "backgroundColor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub background_color: Option<ColorSpec>,
    #[serde(rename = "borderColor", default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub options: serde_json::Value,
}

impl ChartSpec {
    pub fn title(&self) -> Option<String> {
        return self
            .options
            .get("title")
            .and_then(|e| return e.as_str())
            .map(|e| return e.to_string());
    }
}
