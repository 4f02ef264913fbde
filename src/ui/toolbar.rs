use crate::app::OrderApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut OrderApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui
                .button(format!("{}  Open Order...", icons::FOLDER_OPEN))
                .clicked()
            {
                app.open_order();
                ui.close_menu();
            }
            if ui
                .button(format!("{}  Reload", icons::ARROW_CLOCKWISE))
                .clicked()
            {
                app.reload_order();
                ui.close_menu();
            }
            ui.separator();
            if ui
                .button(format!("{}  Export Billing CSV...", icons::FILE_CSV))
                .clicked()
            {
                app.export_billing_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui
                .button(format!("{}  Scroll to Today", icons::CROSSHAIR))
                .clicked()
            {
                app.pending_scroll_to_today = true;
                ui.close_menu();
            }
            ui.separator();
            if ui
                .button(format!("{}  Open Data Folder", icons::FOLDER))
                .clicked()
            {
                app.open_data_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("Order JSON Format...").clicked() {
                app.show_format_help = true;
                ui.close_menu();
            }
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned order title and source file
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let source = app
                .file_path
                .as_ref()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
                .unwrap_or("sample data");
            ui.label(
                RichText::new(format!("{} — {}", app.order.title(), source))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
