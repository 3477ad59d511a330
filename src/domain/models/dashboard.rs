use chrono::Local;
use chrono::SecondsFormat;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

use super::ChartSpec;

#[derive(Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub id: String,
    pub title: String,
    pub chart: ChartSpec,
    pub query: String,
    pub created: String,
}

impl Dashboard {
    pub fn create_id() -> String {
        let short = Uuid::new_v4()
            .to_string()
            .split('-')
            .take(2)
            .collect::<Vec<&str>>()
            .join("-");

        return format!("dashboard-{short}");
    }

    pub fn new(title: &str, chart: ChartSpec, query: &str) -> Dashboard {
        return Dashboard {
            id: Dashboard::create_id(),
            title: title.to_string(),
            chart,
            query: query.to_string(),
            created: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
        };
    }
}
