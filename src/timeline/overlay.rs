use egui::{Align2, Area, Context, Id, Order, Pos2, Rect, RichText, Ui};

use crate::model::TimelineEvent;
use crate::ui::theme;

/// Vertical gap between a marker's top edge and the tooltip above it.
pub const TOOLTIP_GAP: f32 = 4.0;

/// The currently hovered marker. At most one exists at a time; hovering a
/// second marker replaces it (last-hovered wins) and leaving clears it.
#[derive(Debug, Clone)]
pub struct Hover {
    /// The marker's bounding rect in screen coordinates, as laid out this
    /// frame. Valid under any scroll offset because egui reports widget
    /// rects in screen space.
    pub rect: Rect,
    pub event: TimelineEvent,
}

/// Where the tooltip attaches: horizontally centered on the marker,
/// `TOOLTIP_GAP` above its top edge. The content box ends at this point
/// and grows upward, so it never covers the marker itself.
pub fn tooltip_anchor(marker_rect: Rect) -> Pos2 {
    Pos2::new(marker_rect.center().x, marker_rect.top() - TOOLTIP_GAP)
}

/// Show the tooltip for the hovered marker.
///
/// Rendered as an `Area` on the tooltip layer, outside the scrolling chart
/// body's clip rect, so `overflow` on the scroll container can never cut
/// it off.
pub fn show_tooltip(ctx: &Context, hover: &Hover) {
    Area::new(Id::new("timeline-tooltip"))
        .order(Order::Tooltip)
        .fixed_pos(tooltip_anchor(hover.rect))
        .pivot(Align2::CENTER_BOTTOM)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                tooltip_body(ui, &hover.event);
            });
        });
}

fn tooltip_body(ui: &mut Ui, event: &TimelineEvent) {
    match event {
        TimelineEvent::DurationSpan { start, end } => {
            ui.strong("Project duration");
            match end {
                Some(end) => {
                    ui.label(format!(
                        "{} → {}",
                        start.format("%d/%m/%Y"),
                        end.format("%d/%m/%Y")
                    ));
                }
                None => {
                    ui.label(format!("{} → open", start.format("%d/%m/%Y")));
                }
            }
        }
        TimelineEvent::Milestone {
            label,
            due,
            completed,
            ..
        } => {
            ui.strong(label);
            ui.label(format!("Due {}", due.format("%d/%m/%Y")));
            ui.label(status_text(*completed, "Completed", "Open"));
        }
        TimelineEvent::Task {
            label,
            kind,
            due,
            completed,
            ..
        } => {
            ui.strong(label);
            ui.label(format!("{} · due {}", kind.label(), due.format("%d/%m/%Y")));
            ui.label(status_text(*completed, "Completed", "Open"));
        }
        TimelineEvent::PaymentDue {
            due, amount, note, ..
        } => {
            ui.strong("Payment due");
            ui.label(format!("Due {}", due.format("%d/%m/%Y")));
            if let Some(amount) = amount {
                ui.label(format!("Amount: {:.2}", amount));
            }
            if let Some(note) = note {
                ui.label(RichText::new(note).weak());
            }
        }
        TimelineEvent::PaymentReceived {
            received, amount, ..
        } => {
            ui.strong("Payment received");
            ui.label(format!("Received {}", received.format("%d/%m/%Y")));
            if let Some(amount) = amount {
                ui.label(format!("Amount: {:.2}", amount));
            }
        }
    }
}

fn status_text(completed: bool, done: &str, open: &str) -> RichText {
    if completed {
        RichText::new(done).color(theme::ACCENT)
    } else {
        RichText::new(open).color(theme::TEXT_DIM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use egui::{pos2, vec2};

    #[test]
    fn anchor_sits_centered_above_the_marker() {
        let rect = Rect::from_min_size(pos2(100.0, 200.0), vec2(20.0, 20.0));
        let anchor = tooltip_anchor(rect);
        assert_eq!(anchor.x, 110.0);
        assert_eq!(anchor.y, 200.0 - TOOLTIP_GAP);
    }

    #[test]
    fn anchor_tracks_the_rect_not_the_document() {
        // Same marker after the chart scrolled 300px left: the rect egui
        // reports already moved, and the anchor moves with it.
        let rect = Rect::from_min_size(pos2(400.0, 150.0), vec2(16.0, 16.0));
        let scrolled = rect.translate(vec2(-300.0, 0.0));
        assert_eq!(
            tooltip_anchor(scrolled),
            tooltip_anchor(rect) - vec2(300.0, 0.0)
        );
    }

    #[test]
    fn replacing_the_hover_keeps_exactly_one() {
        let a = Hover {
            rect: Rect::from_min_size(pos2(0.0, 0.0), vec2(10.0, 10.0)),
            event: TimelineEvent::Milestone {
                id: uuid::Uuid::new_v4(),
                label: "A".into(),
                due: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                completed: false,
            },
        };
        let b_event = TimelineEvent::Milestone {
            id: uuid::Uuid::new_v4(),
            label: "B".into(),
            due: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            completed: true,
        };

        // The hover slot is a plain Option: entering B before leaving A
        // overwrites it, so only B's tooltip can render.
        let mut hover = Some(a);
        assert!(hover.is_some());
        hover = Some(Hover {
            rect: Rect::from_min_size(pos2(50.0, 0.0), vec2(10.0, 10.0)),
            event: b_event.clone(),
        });
        assert_eq!(hover.unwrap().event, b_event);
    }
}
