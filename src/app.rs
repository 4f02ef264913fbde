use chrono::NaiveDate;
use std::path::PathBuf;
use uuid::Uuid;

use crate::io::AppConfig;
use crate::model::{BillingItem, Milestone, Order, OrderTask, TaskKind};
use crate::timeline::TimeAxis;
use crate::ui;

/// Main application state.
pub struct OrderApp {
    pub order: Order,
    pub axis: TimeAxis,
    pub file_path: Option<PathBuf>,

    // Dialog state
    pub show_about: bool,
    pub show_format_help: bool,

    /// Center the timeline on today at the next frame.
    pub pending_scroll_to_today: bool,

    // Status message
    pub status_message: String,

    // Persisted settings
    pub config: AppConfig,
}

impl OrderApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let today = chrono::Local::now().date_naive();
        let config = AppConfig::load();

        let (order, file_path, status_message) = match config.last_order_path.clone() {
            Some(path) if path.exists() => match crate::io::load_order(&path) {
                Ok(order) => {
                    let msg = format!("Loaded {}", path.display());
                    (order, Some(path), msg)
                }
                Err(e) => {
                    log::warn!("could not reload last order: {}", e);
                    (
                        Self::sample_order(today),
                        None,
                        "Showing sample order".to_string(),
                    )
                }
            },
            _ => (
                Self::sample_order(today),
                None,
                "Showing sample order".to_string(),
            ),
        };

        Self {
            order,
            axis: TimeAxis::around(today),
            file_path,
            show_about: false,
            show_format_help: false,
            pending_scroll_to_today: true,
            status_message,
            config,
        }
    }

    /// Generate a sample order for demonstration.
    fn sample_order(today: NaiveDate) -> Order {
        let day = |offset: i64| Some(today + chrono::Duration::days(offset));

        Order {
            project_name: Some("Conveyor line retrofit".to_string()),
            order_number: Some("SO-2025-0142".to_string()),
            start_date: day(-45),
            end_date: day(300),
            milestones: vec![
                Milestone {
                    id: Uuid::new_v4(),
                    name: "Kickoff".to_string(),
                    due_date: day(-40),
                    completed_at: day(-40),
                },
                Milestone {
                    id: Uuid::new_v4(),
                    name: "Design approval".to_string(),
                    due_date: day(-10),
                    completed_at: day(-8),
                },
                Milestone {
                    id: Uuid::new_v4(),
                    name: "Factory acceptance test".to_string(),
                    due_date: day(120),
                    completed_at: None,
                },
                Milestone {
                    id: Uuid::new_v4(),
                    name: "Delivery".to_string(),
                    due_date: day(210),
                    completed_at: None,
                },
                Milestone {
                    id: Uuid::new_v4(),
                    name: "Site acceptance test".to_string(),
                    due_date: day(270),
                    completed_at: None,
                },
            ],
            tasks: vec![
                OrderTask {
                    id: Uuid::new_v4(),
                    title: "Order long-lead parts".to_string(),
                    kind: TaskKind::Preparation,
                    due_date: day(-20),
                    completed_at: day(-22),
                },
                OrderTask {
                    id: Uuid::new_v4(),
                    title: "Frame welding".to_string(),
                    kind: TaskKind::Production,
                    due_date: day(60),
                    completed_at: None,
                },
                OrderTask {
                    id: Uuid::new_v4(),
                    title: "Electrical cabinet build".to_string(),
                    kind: TaskKind::Production,
                    due_date: day(100),
                    completed_at: None,
                },
                OrderTask {
                    id: Uuid::new_v4(),
                    title: "Packing & shipping".to_string(),
                    kind: TaskKind::Shipping,
                    due_date: day(200),
                    completed_at: None,
                },
                OrderTask {
                    id: Uuid::new_v4(),
                    title: "Final documentation review".to_string(),
                    kind: TaskKind::Review,
                    due_date: day(280),
                    completed_at: None,
                },
            ],
            billing_plan: vec![
                BillingItem {
                    id: Uuid::new_v4(),
                    due_date: day(-30),
                    paid_at: day(-25),
                    amount: Some(38500.0),
                    description: Some("30% down payment".to_string()),
                },
                BillingItem {
                    id: Uuid::new_v4(),
                    due_date: day(210),
                    paid_at: None,
                    amount: Some(51300.0),
                    description: Some("40% on delivery".to_string()),
                },
                BillingItem {
                    id: Uuid::new_v4(),
                    due_date: day(285),
                    paid_at: None,
                    amount: Some(38500.0),
                    description: Some("30% after acceptance".to_string()),
                },
            ],
        }
    }

    // --- File operations ---

    pub fn open_order(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Order JSON", &["json"])
            .pick_file()
        {
            self.load_from(path);
        }
    }

    pub fn reload_order(&mut self) {
        match self.file_path.clone() {
            Some(path) => self.load_from(path),
            None => {
                self.status_message = "No order file open — showing sample data".to_string();
            }
        }
    }

    fn load_from(&mut self, path: PathBuf) {
        match crate::io::load_order(&path) {
            Ok(order) => {
                self.order = order;
                self.file_path = Some(path.clone());
                self.config.last_order_path = Some(path);
                self.config.save();
                self.pending_scroll_to_today = true;
                self.status_message = format!("Loaded '{}'", self.order.title());
            }
            Err(e) => {
                log::warn!("{}", e);
                self.status_message = format!("Error loading: {}", e);
            }
        }
    }

    pub fn export_billing_csv(&mut self) {
        if self.order.billing_plan.is_empty() {
            self.status_message = "Nothing to export — order has no billing plan".to_string();
            return;
        }

        let default_name = format!("{}-billing.csv", self.order.title().replace(' ', "-"));
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match crate::io::csv_export::export_billing(&self.order.billing_plan, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} billing items to CSV", count);
                }
                Err(e) => {
                    log::warn!("{}", e);
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    pub fn open_data_folder(&mut self) {
        match AppConfig::data_dir() {
            Some(dir) => {
                let _ = std::fs::create_dir_all(&dir);
                let _ = open::that(&dir);
            }
            None => {
                self.status_message = "No config directory available on this system".to_string();
            }
        }
    }
}

impl eframe::App for OrderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Keyboard shortcuts, handled outside panel closures to avoid borrow issues
        let should_open = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::O));
        let should_reload = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::R));
        if should_open {
            self.open_order();
        }
        if should_reload {
            self.reload_order();
        }

        let events = self.order.timeline_events();

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Events: {}", events.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "Window: {} – {}",
                                self.axis.start.format("%b %Y"),
                                self.axis.last_day().format("%b %Y")
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: order summary and listings
        egui::SidePanel::left("order_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(220.0)
            .max_width(ui::theme::SIDE_PANEL_WIDTH * 2.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                ui::order_panel::show_order_panel(&self.order, ui);
            });

        // Central panel: the timeline
        let scroll_to_today = std::mem::take(&mut self.pending_scroll_to_today);
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            crate::timeline::chart::show_timeline(&events, &self.axis, scroll_to_today, ui);
        });

        // Dialogs
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_format_help {
            ui::dialogs::show_format_help_dialog(self, ctx);
        }
    }
}
