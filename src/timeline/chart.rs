use chrono::Datelike;
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::model::TimelineEvent;
use crate::timeline::axis::{TimeAxis, MONTH_WIDTH};
use crate::timeline::overlay::{self, Hover};
use crate::timeline::tracks::{build_tracks, MarkerGeometry, MarkerShape, SpanGeometry, Track};
use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_GAP: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const LABEL_COL_WIDTH: f32 = theme::LABEL_COL_WIDTH;
const MARKER_SIZE: f32 = theme::MARKER_SIZE;

/// Render the order timeline: fixed label column on the left, then the
/// horizontally scrollable grid of month header plus five event rows, all
/// sharing the axis coordinate system.
pub fn show_timeline(
    events: &[TimelineEvent],
    axis: &TimeAxis,
    scroll_to_today: bool,
    ui: &mut Ui,
) {
    let tracks = build_tracks(events, axis);
    let chart_height =
        HEADER_HEIGHT + tracks.len() as f32 * (ROW_HEIGHT + ROW_GAP) + ROW_GAP;

    ui.horizontal_top(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;

        // The label column does not scroll with the timeline body.
        draw_label_column(&tracks, chart_height, ui);

        let mut scroll = egui::ScrollArea::horizontal().auto_shrink([false, false]);
        if scroll_to_today {
            let today = chrono::Local::now().date_naive();
            let visible = ui.available_width();
            let offset = (axis.date_to_x(today) - visible / 2.0).max(0.0);
            scroll = scroll.scroll_offset(Vec2::new(offset, 0.0));
        }

        scroll.show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(axis.total_width(), chart_height),
                Sense::hover(),
            );
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_row_backgrounds(&painter, origin, axis.total_width(), tracks.len());
            draw_month_header(&painter, origin, axis, chart_height);
            draw_today_line(&painter, origin, axis, chart_height);

            // Last hovered marker wins: every hovered hit overwrites the
            // slot, and no hit leaves it empty.
            let mut hover: Option<Hover> = None;

            for (row, track) in tracks.iter().enumerate() {
                let y = origin.y + HEADER_HEIGHT + row as f32 * (ROW_HEIGHT + ROW_GAP) + ROW_GAP;
                for span in &track.spans {
                    let rect = draw_span_bar(&painter, origin, span, y);
                    hit_test(ui, rect, &span.event, &mut hover);
                }
                for marker in &track.markers {
                    let rect = draw_marker(&painter, origin, marker, y);
                    hit_test(ui, rect, &marker.event, &mut hover);
                }
            }

            draw_header_date_readout(&painter, &response, origin, axis);

            if let Some(hover) = &hover {
                overlay::show_tooltip(ui.ctx(), hover);
            }
        });
    });
}

/// Show the date under the cursor while the pointer is in the header strip.
fn draw_header_date_readout(
    painter: &egui::Painter,
    response: &egui::Response,
    origin: Pos2,
    axis: &TimeAxis,
) {
    let Some(pointer) = response.hover_pos() else {
        return;
    };
    if pointer.y - origin.y > HEADER_HEIGHT {
        return;
    }
    let date = axis.x_to_date(pointer.x - origin.x);
    let text = date.format("%d %b %Y").to_string();
    let galley = painter.layout_no_wrap(text, theme::font_small(), theme::TEXT_PRIMARY);
    let badge_rect = Rect::from_min_size(
        Pos2::new(pointer.x + 8.0, origin.y + 2.0),
        galley.size() + Vec2::new(10.0, 6.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::BG_DARK);
    painter.galley(badge_rect.min + Vec2::new(5.0, 3.0), galley, Color32::TRANSPARENT);
}

fn hit_test(ui: &mut Ui, rect: Rect, event: &TimelineEvent, hover: &mut Option<Hover>) {
    let response = ui.interact(rect, ui.make_persistent_id(event.hover_key()), Sense::hover());
    if response.hovered() {
        *hover = Some(Hover {
            rect,
            event: event.clone(),
        });
    }
}

fn draw_label_column(tracks: &[Track], chart_height: f32, ui: &mut Ui) {
    let (response, painter) =
        ui.allocate_painter(Vec2::new(LABEL_COL_WIDTH, chart_height), Sense::hover());
    let rect = response.rect;

    painter.rect_filled(rect, 0.0, theme::BG_PANEL);
    painter.rect_filled(
        Rect::from_min_size(rect.min, Vec2::new(LABEL_COL_WIDTH, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    // Right border separating labels from the scrolling grid
    painter.line_segment(
        [
            Pos2::new(rect.right(), rect.top()),
            Pos2::new(rect.right(), rect.bottom()),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    for (row, track) in tracks.iter().enumerate() {
        let y = rect.top() + HEADER_HEIGHT + row as f32 * (ROW_HEIGHT + ROW_GAP) + ROW_GAP;
        let color = if track.is_empty() {
            theme::TEXT_DIM
        } else {
            theme::TEXT_SECONDARY
        };
        painter.text(
            Pos2::new(rect.left() + 10.0, y + ROW_HEIGHT / 2.0),
            egui::Align2::LEFT_CENTER,
            track.kind.label(),
            theme::font_bar(),
            color,
        );
    }
}

fn draw_row_backgrounds(painter: &egui::Painter, origin: Pos2, width: f32, rows: usize) {
    for row in 0..rows {
        let y = origin.y + HEADER_HEIGHT + row as f32 * (ROW_HEIGHT + ROW_GAP);
        let row_bg = if row % 2 == 0 {
            theme::BG_PANEL
        } else {
            theme::BG_DARK
        };
        painter.rect_filled(
            Rect::from_min_size(
                Pos2::new(origin.x, y),
                Vec2::new(width, ROW_HEIGHT + ROW_GAP),
            ),
            0.0,
            row_bg,
        );
        painter.line_segment(
            [
                Pos2::new(origin.x, y + ROW_HEIGHT + ROW_GAP),
                Pos2::new(origin.x + width, y + ROW_HEIGHT + ROW_GAP),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
}

fn draw_month_header(painter: &egui::Painter, origin: Pos2, axis: &TimeAxis, height: f32) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(axis.total_width(), HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + axis.total_width(), origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    for (k, month) in axis.months().enumerate() {
        // Header cells are fixed-width; the piecewise axis mapping puts the
        // first of month k at exactly this same x.
        let x = origin.x + k as f32 * MONTH_WIDTH;

        painter.line_segment(
            [
                Pos2::new(x, origin.y + HEADER_HEIGHT),
                Pos2::new(x, origin.y + height),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );

        let label_color = if month.month() == 1 || k == 0 {
            theme::TEXT_PRIMARY
        } else {
            theme::TEXT_SECONDARY
        };
        painter.text(
            Pos2::new(x + 6.0, origin.y + HEADER_HEIGHT / 2.0),
            egui::Align2::LEFT_CENTER,
            month.format("%b %Y").to_string(),
            theme::font_header(),
            label_color,
        );
    }
}

fn draw_today_line(painter: &egui::Painter, origin: Pos2, axis: &TimeAxis, height: f32) {
    let today = chrono::Local::now().date_naive();
    let x = origin.x + axis.date_to_x(today);

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_span_bar(painter: &egui::Painter, origin: Pos2, span: &SpanGeometry, y: f32) -> Rect {
    let inset = theme::BAR_INSET;
    let bar_rect = Rect::from_min_size(
        Pos2::new(origin.x + span.x, y + inset),
        Vec2::new(span.width, ROW_HEIGHT - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, theme::DURATION_BAR);

    // Lighter top highlight
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(span.width, (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    bar_rect
}

fn draw_marker(painter: &egui::Painter, origin: Pos2, marker: &MarkerGeometry, y: f32) -> Rect {
    let center = Pos2::new(origin.x + marker.x, y + ROW_HEIGHT / 2.0);
    let size = MARKER_SIZE;
    let color = marker_color(&marker.event);

    match marker.shape {
        MarkerShape::Diamond => {
            let points = vec![
                Pos2::new(center.x, center.y - size),
                Pos2::new(center.x + size, center.y),
                Pos2::new(center.x, center.y + size),
                Pos2::new(center.x - size, center.y),
            ];
            painter.add(egui::Shape::convex_polygon(points, color, Stroke::NONE));
        }
        MarkerShape::RoundedSquare => {
            let rect = Rect::from_center_size(center, Vec2::splat(size * 1.8));
            painter.rect_filled(rect, Rounding::same(3.0), color);
        }
        MarkerShape::Circle => {
            // Both payment kinds are filled dots; due ones carry a bright
            // border so open and settled payments read apart at a glance.
            if matches!(marker.event, TimelineEvent::PaymentDue { .. }) {
                painter.circle(center, size * 0.9, color, Stroke::new(1.5, theme::TEXT_PRIMARY));
            } else {
                painter.circle_filled(center, size * 0.9, color);
            }
        }
    }

    // Hit region stays centered on the marker's own x even when neighbors
    // overlap it.
    Rect::from_center_size(center, Vec2::splat(size * 2.0 + 4.0))
}

fn marker_color(event: &TimelineEvent) -> Color32 {
    match event {
        TimelineEvent::DurationSpan { .. } => theme::DURATION_BAR,
        TimelineEvent::Milestone { completed, .. } | TimelineEvent::Task { completed, .. } => {
            if *completed {
                theme::ACCENT
            } else {
                theme::MARKER_PENDING
            }
        }
        TimelineEvent::PaymentDue { .. } => theme::PAYMENT_DUE,
        TimelineEvent::PaymentReceived { .. } => theme::PAYMENT_RECEIVED,
    }
}
