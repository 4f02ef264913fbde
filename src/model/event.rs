use chrono::NaiveDate;
use uuid::Uuid;

use super::order::{Order, TaskKind};

/// Everything that can be plotted on the order timeline, as one closed
/// union. Each variant except `DurationSpan` carries exactly one anchor
/// date that determines its horizontal position.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    /// The order's overall project span. At most one per timeline.
    DurationSpan {
        start: NaiveDate,
        end: Option<NaiveDate>,
    },
    Milestone {
        id: Uuid,
        label: String,
        due: NaiveDate,
        completed: bool,
    },
    Task {
        id: Uuid,
        label: String,
        kind: TaskKind,
        due: NaiveDate,
        completed: bool,
    },
    PaymentDue {
        id: Uuid,
        due: NaiveDate,
        amount: Option<f64>,
        note: Option<String>,
    },
    PaymentReceived {
        id: Uuid,
        received: NaiveDate,
        amount: Option<f64>,
    },
}

impl TimelineEvent {
    /// The date used for x-positioning. For spans this is the start date.
    pub fn anchor_date(&self) -> NaiveDate {
        match self {
            TimelineEvent::DurationSpan { start, .. } => *start,
            TimelineEvent::Milestone { due, .. } => *due,
            TimelineEvent::Task { due, .. } => *due,
            TimelineEvent::PaymentDue { due, .. } => *due,
            TimelineEvent::PaymentReceived { received, .. } => *received,
        }
    }

    /// Stable identity for hover bookkeeping. The span has no record id of
    /// its own; payment due/received from the same billing item share a
    /// uuid, so the kind tag is part of the key.
    pub fn hover_key(&self) -> (&'static str, Uuid) {
        match self {
            TimelineEvent::DurationSpan { .. } => ("span", Uuid::nil()),
            TimelineEvent::Milestone { id, .. } => ("milestone", *id),
            TimelineEvent::Task { id, .. } => ("task", *id),
            TimelineEvent::PaymentDue { id, .. } => ("payment-due", *id),
            TimelineEvent::PaymentReceived { id, .. } => ("payment-received", *id),
        }
    }
}

impl Order {
    /// Collect the plottable events from this order.
    ///
    /// This is the single place where partially dated records are filtered
    /// out: anything without a parseable anchor date is skipped (logged at
    /// debug level) and the rest of the chart renders normally.
    pub fn timeline_events(&self) -> Vec<TimelineEvent> {
        let mut events = Vec::new();

        match self.start_date {
            Some(start) => events.push(TimelineEvent::DurationSpan {
                start,
                end: self.end_date,
            }),
            None => log::debug!("order has no start date; duration bar skipped"),
        }

        for m in &self.milestones {
            match m.due_date {
                Some(due) => events.push(TimelineEvent::Milestone {
                    id: m.id,
                    label: m.name.clone(),
                    due,
                    completed: m.is_completed(),
                }),
                None => log::debug!("milestone '{}' has no due date; skipped", m.name),
            }
        }

        for t in &self.tasks {
            match t.due_date {
                Some(due) => events.push(TimelineEvent::Task {
                    id: t.id,
                    label: t.title.clone(),
                    kind: t.kind,
                    due,
                    completed: t.is_completed(),
                }),
                None => log::debug!("task '{}' has no due date; skipped", t.title),
            }
        }

        for item in &self.billing_plan {
            match item.due_date {
                Some(due) => events.push(TimelineEvent::PaymentDue {
                    id: item.id,
                    due,
                    amount: item.amount,
                    note: item.description.clone(),
                }),
                None => log::debug!("billing item has no due date; skipped"),
            }
            if let Some(received) = item.paid_at {
                events.push(TimelineEvent::PaymentReceived {
                    id: item.id,
                    received,
                    amount: item.amount,
                });
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::order::{BillingItem, Milestone, OrderTask};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn undated_records_are_skipped_without_affecting_siblings() {
        let order = Order {
            start_date: Some(date(2025, 1, 1)),
            milestones: vec![
                Milestone {
                    id: Uuid::new_v4(),
                    name: "Dated".into(),
                    due_date: Some(date(2025, 2, 1)),
                    completed_at: None,
                },
                Milestone {
                    id: Uuid::new_v4(),
                    name: "Undated".into(),
                    due_date: None,
                    completed_at: None,
                },
            ],
            tasks: vec![OrderTask {
                id: Uuid::new_v4(),
                title: "No date".into(),
                kind: Default::default(),
                due_date: None,
                completed_at: None,
            }],
            ..Default::default()
        };

        let events = order.timeline_events();
        assert_eq!(events.len(), 2); // span + one dated milestone
        assert!(matches!(events[0], TimelineEvent::DurationSpan { .. }));
        assert!(
            matches!(&events[1], TimelineEvent::Milestone { label, .. } if label == "Dated")
        );
    }

    #[test]
    fn paid_billing_item_yields_due_and_received_events() {
        let order = Order {
            billing_plan: vec![BillingItem {
                id: Uuid::new_v4(),
                due_date: Some(date(2025, 3, 1)),
                paid_at: Some(date(2025, 3, 7)),
                amount: Some(9000.0),
                description: Some("Down payment".into()),
            }],
            ..Default::default()
        };

        let events = order.timeline_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], TimelineEvent::PaymentDue { .. }));
        assert!(
            matches!(events[1], TimelineEvent::PaymentReceived { received, .. }
                if received == date(2025, 3, 7))
        );
    }

    #[test]
    fn no_start_date_means_no_duration_span() {
        let order = Order {
            end_date: Some(date(2025, 12, 1)),
            ..Default::default()
        };
        assert!(order.timeline_events().is_empty());
    }

    #[test]
    fn hover_keys_distinguish_due_from_received() {
        let id = Uuid::new_v4();
        let due = TimelineEvent::PaymentDue {
            id,
            due: date(2025, 3, 1),
            amount: None,
            note: None,
        };
        let received = TimelineEvent::PaymentReceived {
            id,
            received: date(2025, 3, 1),
            amount: None,
        };
        assert_ne!(due.hover_key(), received.hover_key());
    }
}
