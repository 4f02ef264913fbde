use egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::model::{BillingItem, Order};
use crate::ui::theme;

/// Render the left-side order panel: summary header plus read-only
/// listings of milestones, tasks, and the billing plan.
pub fn show_order_panel(order: &Order, ui: &mut Ui) {
    ui.add_space(2.0);
    ui.label(
        RichText::new(order.title())
            .strong()
            .size(15.0)
            .color(theme::TEXT_PRIMARY),
    );
    if let Some(number) = &order.order_number {
        ui.label(
            RichText::new(number)
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    }
    ui.add_space(2.0);
    ui.label(
        RichText::new(format!(
            "{} {} → {}",
            egui_phosphor::regular::CALENDAR_BLANK,
            format_date(order.start_date),
            format_date(order.end_date),
        ))
        .size(11.0)
        .color(theme::TEXT_SECONDARY),
    );

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            section_heading(ui, "Milestones", order.milestones.len());
            for m in &order.milestones {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 6.0;
                    done_icon(ui, m.is_completed());
                    ui.label(RichText::new(&m.name).size(12.0).color(theme::TEXT_PRIMARY));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format_date(m.due_date))
                                .size(10.5)
                                .color(theme::TEXT_DIM),
                        );
                    });
                });
            }
            if order.milestones.is_empty() {
                empty_hint(ui);
            }

            ui.add_space(8.0);
            section_heading(ui, "Tasks", order.tasks.len());
            for t in &order.tasks {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 6.0;
                    done_icon(ui, t.is_completed());
                    ui.label(RichText::new(&t.title).size(12.0).color(theme::TEXT_PRIMARY));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(t.kind.label())
                                .size(10.5)
                                .color(theme::TEXT_DIM),
                        );
                    });
                });
            }
            if order.tasks.is_empty() {
                empty_hint(ui);
            }

            ui.add_space(8.0);
            section_heading(ui, "Billing plan", order.billing_plan.len());
            if order.billing_plan.is_empty() {
                empty_hint(ui);
            } else {
                billing_table(&order.billing_plan, ui);
            }
            ui.add_space(4.0);
        });
}

fn billing_table(items: &[BillingItem], ui: &mut Ui) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false) // the panel already scrolls
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.label(RichText::new("DUE").size(9.0).strong().color(theme::TEXT_DIM));
            });
            header.col(|ui| {
                ui.label(RichText::new("AMOUNT").size(9.0).strong().color(theme::TEXT_DIM));
            });
            header.col(|ui| {
                ui.label(RichText::new("STATUS").size(9.0).strong().color(theme::TEXT_DIM));
            });
        })
        .body(|mut body| {
            for item in items {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.label(
                            RichText::new(format_date(item.due_date))
                                .size(11.0)
                                .color(theme::TEXT_PRIMARY),
                        );
                    });
                    row.col(|ui| {
                        let amount = item
                            .amount
                            .map(|a| format!("{:.2}", a))
                            .unwrap_or_else(|| "—".to_string());
                        ui.label(RichText::new(amount).size(11.0).color(theme::TEXT_PRIMARY));
                    });
                    row.col(|ui| {
                        let (text, color) = if item.is_paid() {
                            ("Paid", theme::PAYMENT_RECEIVED)
                        } else {
                            ("Open", theme::PAYMENT_DUE)
                        };
                        ui.label(RichText::new(text).size(11.0).color(color));
                    });
                });
            }
        });
}

fn section_heading(ui: &mut Ui, title: &str, count: usize) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(title)
                .strong()
                .size(12.5)
                .color(theme::TEXT_PRIMARY),
        );
        ui.label(
            RichText::new(format!("({})", count))
                .size(10.5)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(2.0);
}

fn done_icon(ui: &mut Ui, completed: bool) {
    if completed {
        ui.label(
            RichText::new(egui_phosphor::regular::CHECK_CIRCLE)
                .size(12.0)
                .color(theme::ACCENT),
        );
    } else {
        ui.label(
            RichText::new(egui_phosphor::regular::CIRCLE)
                .size(12.0)
                .color(theme::TEXT_DIM),
        );
    }
}

fn empty_hint(ui: &mut Ui) {
    ui.label(RichText::new("none").size(10.5).weak());
}

fn format_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "—".to_string())
}
