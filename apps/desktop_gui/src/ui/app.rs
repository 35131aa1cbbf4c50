use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::protocol::Intent;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{reduce, GuiState};
use client_core::SearchDisplay;

const SEARCH_HINT: &str = "search github users";

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub endpoint: Option<String>,
}

pub struct FormApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: GuiState,
    query_input: String,
}

impl FormApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state: GuiState::default(),
            query_input: String::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            reduce(&mut self.state, event);
        }
    }

    fn send_intent(&mut self, intent: Intent) {
        if let Some(err) = dispatch_backend_command(&self.cmd_tx, BackendCommand::Dispatch(intent))
        {
            reduce(&mut self.state, UiEvent::Error(err));
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.state.status_banner.clone() else {
            return;
        };

        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{}: {}",
                            err_label(banner.category()),
                            banner.message()
                        ))
                        .color(egui::Color32::WHITE),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.state.status_banner = None;
                        }
                    });
                });
            });
        ui.add_space(8.0);
    }

    fn show_checkbox_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("CheckBox");
        let mut intents = Vec::new();
        let group = &self.state.view.checkboxes;

        let mut all_selected = group.all_selected();
        if ui
            .checkbox(&mut all_selected, group.bulk_label())
            .changed()
        {
            intents.push(Intent::SetAllChecked {
                value: all_selected,
            });
        }

        ui.indent("checkbox_items", |ui| {
            for item in group.items() {
                let mut checked = item.checked;
                if ui.checkbox(&mut checked, item.label.as_str()).changed() {
                    intents.push(Intent::ToggleItem {
                        label: item.label.clone(),
                    });
                }
            }
        });

        for intent in intents {
            self.send_intent(intent);
        }
    }

    fn show_search_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Github API");
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.query_input)
                .hint_text(SEARCH_HINT)
                .desired_width(280.0),
        );
        if response.changed() {
            let term = self.query_input.clone();
            self.send_intent(Intent::SetQuery { term });
        }
        ui.add_space(6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match self.state.view.search.display() {
                SearchDisplay::Results(users) => {
                    for user in users {
                        ui.hyperlink_to(user.login.as_str(), user.profile_url());
                    }
                }
                SearchDisplay::Message(message) => {
                    ui.label(message);
                }
            });
    }
}

impl eframe::App for FormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(egui::RichText::new(&self.state.status).small());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            ui.add_enabled_ui(self.state.backend_ready, |ui| {
                self.show_checkbox_panel(ui);
                ui.separator();
                self.show_search_panel(ui);
            });
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
