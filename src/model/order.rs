use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of work a task belongs to. Used for labels only, never for layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Preparation,
    Production,
    Shipping,
    Review,
    #[default]
    #[serde(other)]
    Other,
}

impl TaskKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Preparation => "Preparation",
            TaskKind::Production => "Production",
            TaskKind::Shipping => "Shipping",
            TaskKind::Review => "Review",
            TaskKind::Other => "Other",
        }
    }
}

/// A contractual milestone on the order schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_date::deserialize")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date::deserialize")]
    pub completed_at: Option<NaiveDate>,
}

impl Milestone {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// A work item tracked against the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderTask {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: TaskKind,
    #[serde(default, deserialize_with = "lenient_date::deserialize")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date::deserialize")]
    pub completed_at: Option<NaiveDate>,
}

impl OrderTask {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// One line of the payment schedule. `due_date` is when the payment is
/// expected; `paid_at` is set once money actually arrived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default, deserialize_with = "lenient_date::deserialize")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date::deserialize")]
    pub paid_at: Option<NaiveDate>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl BillingItem {
    pub fn is_paid(&self) -> bool {
        self.paid_at.is_some()
    }
}

/// A customer order as loaded from disk. All fields are optional or may be
/// empty; partially filled records are expected and must still render.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_date::deserialize")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date::deserialize")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub tasks: Vec<OrderTask>,
    #[serde(default)]
    pub billing_plan: Vec<BillingItem>,
}

impl Order {
    /// Display title: project name, falling back to the order number.
    pub fn title(&self) -> &str {
        self.project_name
            .as_deref()
            .or(self.order_number.as_deref())
            .unwrap_or("Untitled order")
    }
}

/// Try parsing a date string with several common formats.
///
/// Source systems export dates inconsistently (ISO, European, with or
/// without a time component), so be forgiving here.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // Datetime strings: the calendar date is all the timeline cares about.
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Serde helper for dates that may be null, missing, or malformed.
/// An unparseable value becomes `None` instead of failing the whole load.
mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(|s| {
            let parsed = super::parse_date(s);
            if parsed.is_none() && !s.trim().is_empty() {
                log::debug!("unparseable date {:?} treated as missing", s);
            }
            parsed
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_common_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        for s in &[
            "2025-06-15",
            "15/06/2025",
            "15-06-2025",
            "15.06.2025",
            "2025/06/15",
            "2025-06-15T10:30:00",
            "2025-06-15T10:30:00+02:00",
        ] {
            assert_eq!(parse_date(s), Some(expected), "format: {}", s);
        }
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2025-13-40"), None);
    }

    #[test]
    fn order_loads_with_missing_and_bad_dates() {
        let json = r#"{
            "project_name": "Line retrofit",
            "order_number": "SO-1001",
            "start_date": "2025-04-01",
            "end_date": null,
            "milestones": [
                { "name": "Kickoff", "due_date": "01/04/2025", "completed_at": "2025-04-02" },
                { "name": "No date yet", "due_date": "tbd" }
            ],
            "tasks": [
                { "title": "Weld frames", "type": "production", "due_date": "2025-05-10" }
            ],
            "billing_plan": [
                { "due_date": "2025-04-15", "amount": 12500.0, "paid_at": "2025-04-20" }
            ]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.title(), "Line retrofit");
        assert_eq!(
            order.start_date,
            NaiveDate::from_ymd_opt(2025, 4, 1)
        );
        assert_eq!(order.end_date, None);
        assert!(order.milestones[0].is_completed());
        assert_eq!(order.milestones[1].due_date, None);
        assert_eq!(order.tasks[0].kind, TaskKind::Production);
        assert!(order.billing_plan[0].is_paid());
    }

    #[test]
    fn unknown_task_kind_falls_back_to_other() {
        let json = r#"{ "title": "Mystery", "type": "paperwork" }"#;
        let task: OrderTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.kind, TaskKind::Other);
    }

    #[test]
    fn title_falls_back_to_order_number() {
        let order = Order {
            order_number: Some("SO-42".into()),
            ..Default::default()
        };
        assert_eq!(order.title(), "SO-42");
        assert_eq!(Order::default().title(), "Untitled order");
    }
}
