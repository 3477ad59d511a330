use std::env;
use std::path::PathBuf;

use uuid::Uuid;

/// A unique directory path under the system temp dir. Nothing is created;
/// storage creates the directory on first write.
pub fn scratch_dir() -> PathBuf {
    return env::temp_dir().join(format!("alfred-tests-{}", Uuid::new_v4()));
}

pub fn reply_fixture() -> &'static str {
    return r#"
Here's a look at your **top dishes** this month.

```sql
SELECT name, COUNT(*) AS orders
FROM orders
GROUP BY name
ORDER BY orders DESC;
```

Margherita leads, followed by the **carbonara**.
Weekend sales drive most of the volume.
"#
    .trim();
}

pub fn chart_spec_json() -> &'static str {
    return r##"{
  "type": "bar",
  "data": {
    "labels": ["Margherita", "Carbonara", "Caesar Salad"],
    "datasets": [
      {"label": "orders", "data": [120.0, 90.0, 45.0], "backgroundColor": "#4e79a7"}
    ]
  },
  "options": {"title": "Top dishes"}
}"##;
}
