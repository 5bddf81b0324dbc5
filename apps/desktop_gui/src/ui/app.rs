use std::time::Duration;

use client_core::FormState;
use crossbeam_channel::{Receiver, Sender};
use shared::domain::Year;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::submit_lookup;
use crate::controller::reducer::apply_ui_event;

const ERROR_TEXT_COLOR: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);
const ACCENT_COLOR: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);

pub struct LookupFormApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    form: FormState,
    status: String,
    focus_identifier: bool,
}

impl LookupFormApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        max_identifier_len: usize,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            form: FormState::new(max_identifier_len),
            status: "Starting".to_string(),
            focus_identifier: true,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.form, &mut self.status, event);
        }
    }

    fn submit(&mut self) {
        if !submit_lookup(&mut self.form, &self.cmd_tx, &mut self.status) {
            self.focus_identifier = true;
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let max_len = self.form.max_identifier_len();

        ui.label(
            egui::RichText::new(format!("Acknowledgment Number (Last {max_len} digits)")).strong(),
        );
        let mut identifier_buf = self.form.identifier().to_string();
        let edit = egui::TextEdit::singleline(&mut identifier_buf)
            .id_salt("ack_number")
            .hint_text(format!("Enter last {max_len} digits of Ack. No."))
            .char_limit(max_len)
            .desired_width(f32::INFINITY);
        let identifier_resp = ui.add_sized([ui.available_width(), 32.0], edit);
        if self.focus_identifier {
            identifier_resp.request_focus();
            self.focus_identifier = false;
        }
        if identifier_resp.changed() {
            self.form.set_identifier(&identifier_buf);
        }

        ui.add_space(6.0);
        ui.label(egui::RichText::new("Select Year").strong());
        let mut year = self.form.year();
        egui::ComboBox::from_id_salt("year")
            .width(ui.available_width())
            .selected_text(year.as_str())
            .show_ui(ui, |ui| {
                for option in Year::ALL {
                    ui.selectable_value(&mut year, option, option.as_str());
                }
            });
        self.form.set_year(year);

        if let Some(message) = self.form.error_message() {
            ui.label(egui::RichText::new(message).small().color(ERROR_TEXT_COLOR));
        }

        ui.add_space(8.0);
        let loading = self.form.is_loading();
        let button_text = if loading { "Fetching Data..." } else { "Search" };
        let button = egui::Button::new(
            egui::RichText::new(button_text)
                .strong()
                .color(egui::Color32::WHITE),
        )
        .fill(ACCENT_COLOR)
        .min_size(egui::vec2(ui.available_width(), 38.0));

        let clicked = ui
            .horizontal(|ui| {
                if loading {
                    ui.add(egui::Spinner::new());
                }
                ui.add_enabled(!loading, button).clicked()
            })
            .inner;

        let enter_pressed =
            identifier_resp.lost_focus() && ctx.input(|i| i.key_pressed(egui::Key::Enter));
        if clicked || (enter_pressed && !loading) {
            self.submit();
        }
    }

    fn show_results(&self, ui: &mut egui::Ui) {
        if self.form.result().is_none() {
            return;
        }
        let rows = self.form.rows();

        ui.add_space(14.0);
        ui.label(egui::RichText::new("Case Details:").strong());
        ui.add_space(4.0);
        egui::Frame::NONE
            .stroke(egui::Stroke::new(
                1.0,
                ui.visuals().widgets.noninteractive.bg_stroke.color,
            ))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(360.0)
                    .show(ui, |ui| {
                        egui::Grid::new("case_details")
                            .num_columns(2)
                            .striped(true)
                            .spacing([18.0, 6.0])
                            .show(ui, |ui| {
                                for row in &rows {
                                    ui.label(egui::RichText::new(&row.label).strong());
                                    ui.label(&row.value);
                                    ui.end_row();
                                }
                            });
                    });
            });
    }
}

impl eframe::App for LookupFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(360.0, 640.0);
            ui.add_space((avail.y * 0.06).clamp(12.0, 60.0));

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);
                egui::Frame::NONE
                    .fill(ui.visuals().faint_bg_color)
                    .corner_radius(14.0)
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.noninteractive.bg_stroke.color,
                    ))
                    .inner_margin(egui::Margin::symmetric(20, 18))
                    .show(ui, |ui| {
                        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                            ui.heading("Case Information Lookup");
                            ui.weak("Enter the acknowledgment number to retrieve case details");
                            ui.add_space(12.0);

                            self.show_form(ui, ctx);
                            self.show_results(ui);

                            ui.add_space(12.0);
                            ui.separator();
                            ui.small(
                                egui::RichText::new("For assistance, please contact the helpdesk")
                                    .weak(),
                            );
                            ui.horizontal_wrapped(|ui| {
                                ui.small("Status:");
                                ui.small(egui::RichText::new(&self.status).weak());
                            });
                        });
                    });
            });
        });

        if self.form.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
