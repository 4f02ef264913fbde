use crate::app::OrderApp;
use crate::ui::theme;
use egui::{Context, RichText, Window};

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut OrderApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Order Timeline").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("An order schedule dashboard");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Render the "Order JSON Format" help dialog.
pub fn show_format_help_dialog(app: &mut OrderApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("Order JSON Format").strong().size(14.0))
        .resizable(true)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_size([540.0, 460.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);

                ui.label(RichText::new("Top-level fields").strong());
                ui.add_space(2.0);
                egui::Grid::new("json_fields")
                    .num_columns(2)
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Field").underline());
                        ui.label(RichText::new("Meaning").underline());
                        ui.end_row();

                        ui.label(RichText::new("project_name").strong());
                        ui.label("Display name of the order's project (optional)");
                        ui.end_row();

                        ui.label(RichText::new("order_number").strong());
                        ui.label("Sales order reference (optional)");
                        ui.end_row();

                        ui.label(RichText::new("start_date / end_date").strong());
                        ui.label("Project span; a missing end renders a one-year bar");
                        ui.end_row();

                        ui.label(RichText::new("milestones[]").strong());
                        ui.label("name, due_date, completed_at");
                        ui.end_row();

                        ui.label(RichText::new("tasks[]").strong());
                        ui.label("title, type, due_date, completed_at");
                        ui.end_row();

                        ui.label(RichText::new("billing_plan[]").strong());
                        ui.label("due_date, paid_at, amount, description");
                        ui.end_row();
                    });
                ui.add_space(8.0);

                ui.label(RichText::new("Supported Date Formats").strong());
                ui.add_space(2.0);
                for fmt in &[
                    "YYYY-MM-DD   (e.g. 2025-06-15)",
                    "DD/MM/YYYY   (e.g. 15/06/2025)",
                    "DD-MM-YYYY   (e.g. 15-06-2025)",
                    "DD.MM.YYYY   (e.g. 15.06.2025)",
                    "YYYY/MM/DD   (e.g. 2025/06/15)",
                    "RFC 3339     (e.g. 2025-06-15T10:30:00+02:00)",
                ] {
                    ui.label(RichText::new(*fmt).monospace().size(11.0));
                }
                ui.add_space(8.0);

                ui.label(RichText::new("Notes").strong());
                ui.add_space(2.0);
                let notes = [
                    "• Records with a missing or unreadable date are left off the chart; everything else still renders.",
                    "• Dates before or after the visible window are pinned to the chart edge.",
                    "• A billing item with paid_at set shows up in both payment rows.",
                    "• Record ids are optional; missing ones are generated on load.",
                ];
                for note in &notes {
                    ui.label(RichText::new(*note).small());
                }
                ui.add_space(10.0);

                ui.label(RichText::new("Minimal Example").strong());
                ui.add_space(2.0);
                let example = "{\n  \"project_name\": \"Line retrofit\",\n  \"order_number\": \"SO-2025-0142\",\n  \"start_date\": \"2025-05-01\",\n  \"end_date\": \"2026-02-28\",\n  \"milestones\": [\n    { \"name\": \"Kickoff\", \"due_date\": \"2025-05-05\", \"completed_at\": \"2025-05-05\" }\n  ],\n  \"billing_plan\": [\n    { \"due_date\": \"2025-05-15\", \"amount\": 12500.0 }\n  ]\n}";
                egui::Frame::dark_canvas(ui.style()).show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut example.to_string())
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .interactive(false),
                    );
                });
                ui.add_space(8.0);
            });

            ui.separator();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.add_sized([80.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_format_help = false;
    }
}
