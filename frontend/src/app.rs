use poll_promise::Promise;
use serde::{Deserialize, Serialize};

use crate::client::{self, GenerateResult};
use crate::config::Endpoint;
use crate::download;
use crate::view_model::{PageState, Ticket};

/// Main application state
#[derive(Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CommenterApp {
    page: PageState,
    #[serde(skip)]
    endpoint: Endpoint,
    #[serde(skip)]
    pending: Vec<(Ticket, Promise<GenerateResult>)>,
}

impl CommenterApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        app.endpoint = Endpoint::from_env();
        log::info!("Generate endpoint: {}", app.endpoint.generate_url);
        app
    }

    fn start_generate(&mut self, ctx: &egui::Context) {
        let pending = self.page.begin_generate();
        log::info!("Generate triggered (request #{})", pending.ticket.number());
        let promise = client::spawn_generate(ctx, self.endpoint.clone(), pending.code);
        self.pending.push((pending.ticket, promise));
    }

    /// Move every settled request into the page, oldest first.
    fn poll_pending(&mut self) {
        let mut still_pending = Vec::with_capacity(self.pending.len());
        for (ticket, promise) in std::mem::take(&mut self.pending) {
            match promise.try_take() {
                Ok(outcome) => {
                    self.page.apply_outcome(ticket, outcome);
                }
                Err(promise) => still_pending.push((ticket, promise)),
            }
        }
        self.pending = still_pending;
    }
}

impl eframe::App for CommenterApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_pending();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.heading("Code Commenter");
            });
        });

        egui::TopBottomPanel::bottom("footer_panel")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&self.endpoint.generate_url).weak());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_space(10.0);
                        egui::widgets::global_theme_preference_buttons(ui);
                        if !cfg!(target_arch = "wasm32") && ui.button("Quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("Python code");
                    ui.add(
                        egui::TextEdit::multiline(&mut self.page.code_input)
                            .code_editor()
                            .desired_rows(12)
                            .desired_width(f32::INFINITY)
                            .hint_text("Paste code to comment..."),
                    );

                    ui.horizontal(|ui| {
                        // Stays enabled while busy; each click sends its own request.
                        let generate_button = egui::Button::new("Generate").min_size(egui::vec2(100.0, 30.0));
                        if ui.add(generate_button).clicked() {
                            self.start_generate(ctx);
                        }
                        if self.page.is_busy() {
                            ui.add(egui::Spinner::new());
                            ui.label("Generating...");
                        }
                    });

                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        ui.heading("Commented code");
                        if !self.page.code_output().is_empty() && ui.button("💾 Save").clicked() {
                            download::save(&self.page.commented_code_file());
                        }
                    });
                    // `&str` buffers are read-only and shown verbatim.
                    ui.add(
                        egui::TextEdit::multiline(&mut self.page.code_output())
                            .code_editor()
                            .desired_width(f32::INFINITY),
                    );

                    ui.add_space(10.0);
                    ui.heading("Documentation");
                    ui.add(
                        egui::TextEdit::multiline(&mut self.page.doc_output())
                            .desired_width(f32::INFINITY),
                    );

                    if self.page.download_visible() && ui.button("⬇ Download documentation").clicked() {
                        download::save(&self.page.documentation_file());
                    }
                });
        });
    }
}
