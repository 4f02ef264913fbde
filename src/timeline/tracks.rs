use chrono::Months;

use crate::model::TimelineEvent;
use crate::timeline::axis::TimeAxis;

/// Horizontal gap carved off the right end of the duration bar so it does
/// not visually touch a marker sitting on its end date.
pub const SPAN_GAP: f32 = 4.0;
/// Smallest width a span bar may render at, even for degenerate ranges.
pub const MIN_SPAN_WIDTH: f32 = 12.0;

/// The five fixed timeline rows, in their fixed vertical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Duration,
    Milestones,
    Tasks,
    PaymentsDue,
    PaymentsReceived,
}

impl TrackKind {
    pub const ORDER: [TrackKind; 5] = [
        TrackKind::Duration,
        TrackKind::Milestones,
        TrackKind::Tasks,
        TrackKind::PaymentsDue,
        TrackKind::PaymentsReceived,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TrackKind::Duration => "Duration",
            TrackKind::Milestones => "Milestones",
            TrackKind::Tasks => "Tasks",
            TrackKind::PaymentsDue => "Payments due",
            TrackKind::PaymentsReceived => "Payments received",
        }
    }
}

/// Marker silhouette for point events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Diamond,
    RoundedSquare,
    Circle,
}

/// Render geometry for a horizontal bar.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanGeometry {
    pub x: f32,
    pub width: f32,
    pub event: TimelineEvent,
}

/// Render geometry for a single point marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGeometry {
    pub x: f32,
    pub shape: MarkerShape,
    pub event: TimelineEvent,
}

/// One timeline row: a label plus the geometry of everything on it.
#[derive(Debug, Clone)]
pub struct Track {
    pub kind: TrackKind,
    pub spans: Vec<SpanGeometry>,
    pub markers: Vec<MarkerGeometry>,
}

impl Track {
    fn new(kind: TrackKind) -> Self {
        Self {
            kind,
            spans: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty() && self.markers.is_empty()
    }
}

/// Lay the events out on the five fixed rows.
///
/// Markers sharing an x are left to overlap; there is no stacking or
/// jitter, and each marker's hit region stays centered on its own x.
pub fn build_tracks(events: &[TimelineEvent], axis: &TimeAxis) -> Vec<Track> {
    let mut tracks: Vec<Track> = TrackKind::ORDER.iter().map(|k| Track::new(*k)).collect();

    for event in events {
        match event {
            TimelineEvent::DurationSpan { start, end } => {
                // Open-ended orders get a default one-year bar.
                let effective_end = end.unwrap_or(*start + Months::new(12));
                let x = axis.date_to_x(*start);
                let width = (axis.date_to_x(effective_end) - x - SPAN_GAP).max(MIN_SPAN_WIDTH);
                tracks[0].spans.push(SpanGeometry {
                    x,
                    width,
                    event: event.clone(),
                });
            }
            TimelineEvent::Milestone { .. } => {
                tracks[1].markers.push(point_marker(event, MarkerShape::Diamond, axis));
            }
            TimelineEvent::Task { .. } => {
                tracks[2].markers.push(point_marker(event, MarkerShape::RoundedSquare, axis));
            }
            TimelineEvent::PaymentDue { .. } => {
                tracks[3].markers.push(point_marker(event, MarkerShape::Circle, axis));
            }
            TimelineEvent::PaymentReceived { .. } => {
                tracks[4].markers.push(point_marker(event, MarkerShape::Circle, axis));
            }
        }
    }

    tracks
}

/// Position a point event on the axis via its anchor date.
fn point_marker(event: &TimelineEvent, shape: MarkerShape, axis: &TimeAxis) -> MarkerGeometry {
    MarkerGeometry {
        x: axis.date_to_x(event.anchor_date()),
        shape,
        event: event.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pinned_axis() -> TimeAxis {
        TimeAxis::around(date(2025, 6, 15))
    }

    #[test]
    fn rows_come_out_in_fixed_order() {
        let tracks = build_tracks(&[], &pinned_axis());
        let kinds: Vec<TrackKind> = tracks.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, TrackKind::ORDER.to_vec());
        assert!(tracks.iter().all(|t| t.is_empty()));
    }

    #[test]
    fn open_ended_span_defaults_to_one_year() {
        let axis = pinned_axis();
        let events = [TimelineEvent::DurationSpan {
            start: date(2025, 5, 1),
            end: None,
        }];
        let tracks = build_tracks(&events, &axis);
        let span = &tracks[0].spans[0];
        let expected_width =
            axis.date_to_x(date(2026, 5, 1)) - axis.date_to_x(date(2025, 5, 1)) - SPAN_GAP;
        assert!((span.width - expected_width).abs() < 1e-3);
        assert!(span.width >= MIN_SPAN_WIDTH);
    }

    #[test]
    fn degenerate_span_floors_to_min_width() {
        let axis = pinned_axis();
        // End before start: width would be negative without the floor.
        let events = [TimelineEvent::DurationSpan {
            start: date(2025, 8, 1),
            end: Some(date(2025, 7, 1)),
        }];
        let tracks = build_tracks(&events, &axis);
        assert_eq!(tracks[0].spans[0].width, MIN_SPAN_WIDTH);

        // Same-day span as well.
        let events = [TimelineEvent::DurationSpan {
            start: date(2025, 8, 1),
            end: Some(date(2025, 8, 1)),
        }];
        let tracks = build_tracks(&events, &axis);
        assert_eq!(tracks[0].spans[0].width, MIN_SPAN_WIDTH);
    }

    #[test]
    fn span_clamped_to_window_start_keeps_its_visible_tail() {
        let axis = pinned_axis();
        // Starts a quarter before the window; the bar begins at x = 0 and
        // runs to the effective end.
        let events = [TimelineEvent::DurationSpan {
            start: date(2025, 1, 1),
            end: None,
        }];
        let tracks = build_tracks(&events, &axis);
        let span = &tracks[0].spans[0];
        assert_eq!(span.x, 0.0);
        let expected = axis.date_to_x(date(2026, 1, 1)) - SPAN_GAP;
        assert!((span.width - expected).abs() < 1e-3);
    }

    #[test]
    fn point_events_land_on_their_row_with_their_shape() {
        let axis = pinned_axis();
        let events = [
            TimelineEvent::Milestone {
                id: Uuid::new_v4(),
                label: "FAT".into(),
                due: date(2025, 9, 1),
                completed: false,
            },
            TimelineEvent::Task {
                id: Uuid::new_v4(),
                label: "Assembly".into(),
                kind: Default::default(),
                due: date(2025, 8, 1),
                completed: true,
            },
            TimelineEvent::PaymentDue {
                id: Uuid::new_v4(),
                due: date(2025, 7, 1),
                amount: Some(100.0),
                note: None,
            },
            TimelineEvent::PaymentReceived {
                id: Uuid::new_v4(),
                received: date(2025, 7, 3),
                amount: Some(100.0),
            },
        ];
        let tracks = build_tracks(&events, &axis);

        assert_eq!(tracks[1].markers[0].shape, MarkerShape::Diamond);
        assert_eq!(tracks[1].markers[0].x, axis.date_to_x(date(2025, 9, 1)));
        assert_eq!(tracks[2].markers[0].shape, MarkerShape::RoundedSquare);
        assert_eq!(tracks[3].markers[0].shape, MarkerShape::Circle);
        assert_eq!(tracks[4].markers[0].shape, MarkerShape::Circle);
        assert!(tracks[0].is_empty());
    }

    #[test]
    fn out_of_window_marker_is_pinned_to_the_edge() {
        let axis = pinned_axis();
        let events = [TimelineEvent::Milestone {
            id: Uuid::new_v4(),
            label: "Far future".into(),
            due: date(2027, 1, 1),
            completed: false,
        }];
        let tracks = build_tracks(&events, &axis);
        assert_eq!(tracks[1].markers[0].x, axis.total_width());
    }
}
