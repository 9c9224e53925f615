use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use eframe::egui::{self, Color32, RichText};
use tracing::{info, warn};

use crate::io::{paper_from_dropped, paper_from_path, run_generation};
use crate::model::AppState;
use scholar_pulse::Config;
use scholar_pulse_common::status::{APP_NAME, APP_TAGLINE, FEATURE_BLURBS, UPLOAD_GUIDANCE};
use scholar_pulse_common::types::format_size;
use scholar_pulse_common::{
    catalog, char_count_label, AnalysisResult, Phase, Report, ReportSection,
};

const ACCENT: Color32 = Color32::from_rgb(79, 70, 229);
const CARD_FILL: Color32 = Color32::from_rgb(24, 28, 40);
const ERROR_COLOR: Color32 = Color32::from_rgb(239, 68, 68);

pub struct DesktopApp {
    state: AppState,
    config: Config,
    generate_rx: Option<Receiver<UiMessage>>,
}

enum UiMessage {
    GenerateDone(Result<AnalysisResult, String>),
}

impl DesktopApp {
    pub fn new() -> Self {
        let mut state = AppState::default();
        let config = match Config::load() {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "failed to load config; using defaults");
                state.notice = Some(format!("Config load failed: {err}"));
                Config::default()
            }
        };
        Self {
            state,
            config,
            generate_rx: None,
        }
    }

    fn browse(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .pick_file()
        {
            match paper_from_path(&path) {
                Ok(file) => self.state.offer_file(file),
                Err(err) => self.state.notice = Some(format!("Load failed: {err}")),
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        // 複数ドロップ時は先頭のみ
        if let Some(file) = dropped.first() {
            match paper_from_dropped(file) {
                Ok(file) => self.state.offer_file(file),
                Err(err) => self.state.notice = Some(format!("Load failed: {err}")),
            }
        }
    }

    fn start_generate(&mut self) {
        let Some(ticket) = self.state.begin() else {
            return;
        };
        info!(file = %ticket.file.name, sections = %ticket.selection.joined(), "generation started");

        let config = self.config.clone();
        let (tx, rx) = mpsc::channel();
        self.generate_rx = Some(rx);

        std::thread::spawn(move || {
            let outcome = run_generation(&config, &ticket).map_err(|err| err.to_string());
            let _ = tx.send(UiMessage::GenerateDone(outcome));
        });
    }

    fn poll_messages(&mut self) {
        let Some(rx) = &self.generate_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(UiMessage::GenerateDone(outcome)) => {
                if let Err(message) = &outcome {
                    warn!(error = %message, "generation failed");
                }
                self.generate_rx = None;
                self.state.finish(outcome);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                // ワーカーが結果を送らずに終了した
                self.generate_rx = None;
                self.state.finish(Err(String::new()));
            }
        }
    }

    fn render_upload(&mut self, ui: &mut egui::Ui, hovering: bool) {
        let phase = self.state.session.phase();
        if let Some(file) = self.state.session.file().cloned() {
            card(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("📄").size(28.0));
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&file.name).strong());
                        ui.label(
                            RichText::new(format!("{} • {}", format_size(file.size), file.media_type))
                                .color(Color32::from_gray(170)),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add_enabled(phase == Phase::FileSelected, egui::Button::new("Remove"))
                            .clicked()
                        {
                            self.state.remove_file();
                        }
                    });
                });
            });
            if file.exceeds_recommended_size() {
                ui.label(
                    RichText::new("This file is larger than 20MB; the service may reject it.")
                        .color(Color32::from_rgb(246, 196, 69)),
                );
            }
            return;
        }

        let stroke_color = if hovering { ACCENT } else { Color32::from_gray(70) };
        egui::Frame::none()
            .fill(if hovering { Color32::from_rgb(30, 32, 56) } else { CARD_FILL })
            .stroke(egui::Stroke::new(1.5, stroke_color))
            .rounding(egui::Rounding::same(12.0))
            .inner_margin(egui::Margin::same(24.0))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Drag & drop your paper here").strong().size(16.0));
                    ui.add_space(6.0);
                    if ui.button("Browse…").clicked() {
                        self.browse();
                    }
                    ui.add_space(6.0);
                    ui.label(RichText::new(UPLOAD_GUIDANCE).color(Color32::from_gray(150)));
                });
            });
    }

    fn render_sections(&mut self, ui: &mut egui::Ui) {
        let editable = self.state.session.phase() == Phase::FileSelected;
        ui.label(RichText::new("Sections").strong());
        ui.add_enabled_ui(editable, |ui| {
            egui::Grid::new("section_grid")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for (i, spec) in catalog().iter().enumerate() {
                        let mut checked = self.state.session.selection().contains(spec.id);
                        let response = ui
                            .checkbox(&mut checked, spec.label)
                            .on_hover_text(spec.description);
                        if response.changed() {
                            self.state.toggle(spec.id);
                        }
                        if i % 2 == 1 {
                            ui.end_row();
                        }
                    }
                });
        });
    }

    fn render_generate(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.state.session.is_generating() {
                ui.add(egui::Spinner::new());
                ui.label(self.state.loading_message());
            } else {
                let button = egui::Button::new(RichText::new("Generate Insights").strong()).fill(ACCENT);
                if ui.add_enabled(self.state.session.can_generate(), button).clicked() {
                    self.start_generate();
                }
            }
        });
        if let Some(error) = self.state.visible_error() {
            ui.label(RichText::new(error).color(ERROR_COLOR));
        }
    }

    fn render_welcome(&self, ui: &mut egui::Ui) {
        ui.add_space(12.0);
        ui.columns(FEATURE_BLURBS.len(), |columns| {
            for (column, (title, body)) in columns.iter_mut().zip(FEATURE_BLURBS) {
                card(column, |ui| {
                    ui.label(RichText::new(title).strong());
                    ui.label(RichText::new(body).color(Color32::from_gray(170)));
                });
            }
        });
    }

    fn render_report(&self, ui: &mut egui::Ui) {
        let (Some(result), Some(file)) = (self.state.session.result(), self.state.session.file())
        else {
            return;
        };
        let report = Report::from_result(result, &file.name);

        ui.horizontal(|ui| {
            ui.heading(report.title);
            ui.label(RichText::new(&report.paper_name).color(Color32::from_gray(170)));
        });
        ui.add_space(8.0);

        if report.is_empty() {
            ui.label("The model returned no sections.");
        }
        for section in &report.sections {
            render_section(ui, section);
            ui.add_space(8.0);
        }
    }
}

fn card<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::none()
        .fill(CARD_FILL)
        .stroke(egui::Stroke::new(1.0, Color32::from_gray(40)))
        .rounding(egui::Rounding::same(10.0))
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

fn render_list(ui: &mut egui::Ui, items: &[String], marker: &str, color: Color32) {
    for item in items {
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new(marker).color(color));
            ui.label(item.as_str());
        });
    }
}

fn render_section(ui: &mut egui::Ui, section: &ReportSection) {
    card(ui, |ui| {
        ui.label(RichText::new(section.heading()).strong().size(15.0));
        ui.add_space(4.0);
        match section {
            ReportSection::Keywords { items } => {
                ui.horizontal_wrapped(|ui| {
                    for keyword in items {
                        egui::Frame::none()
                            .fill(Color32::from_rgb(49, 46, 129))
                            .rounding(egui::Rounding::same(8.0))
                            .inner_margin(egui::Margin::symmetric(8.0, 3.0))
                            .show(ui, |ui| {
                                ui.label(RichText::new(keyword).color(Color32::WHITE));
                            });
                    }
                });
            }
            ReportSection::Explanation { audience, text } => {
                ui.label(RichText::new(audience.subtitle()).italics().color(Color32::from_gray(150)));
                ui.label(text.as_str());
            }
            ReportSection::Tweet { text, char_count, limit } => {
                ui.label(text.as_str());
                ui.horizontal(|ui| {
                    let color = if char_count > limit { ERROR_COLOR } else { Color32::from_gray(150) };
                    ui.label(RichText::new(char_count_label(*char_count, *limit)).color(color));
                    if ui.small_button("Copy").clicked() {
                        ui.output_mut(|o| o.copied_text = text.clone());
                    }
                });
            }
            ReportSection::BulletPoints { items } => render_list(ui, items, "•", ACCENT),
            ReportSection::Strengths { items } => {
                render_list(ui, items, "✔", Color32::from_rgb(34, 197, 94))
            }
            ReportSection::Limitations { items } => {
                render_list(ui, items, "⚠", Color32::from_rgb(246, 196, 69))
            }
            ReportSection::CreativeExtensions { items } | ReportSection::Applications { items } => {
                for (i, item) in items.iter().enumerate() {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new(format!("{}.", i + 1)).color(ACCENT));
                        ui.label(item.as_str());
                    });
                }
            }
        }
    });
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_messages();
        if self.state.session.is_generating() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let phase = self.state.session.phase();
        if matches!(phase, Phase::Idle | Phase::FileSelected) {
            self.handle_dropped_files(ctx);
        }
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(RichText::new(APP_NAME).color(ACCENT).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if phase == Phase::Resulted && ui.button("New Analysis").clicked() {
                        self.state.new_analysis();
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if phase == Phase::Resulted {
                        self.render_report(ui);
                        return;
                    }

                    ui.label(RichText::new(APP_TAGLINE).color(Color32::from_gray(180)));
                    ui.add_space(12.0);
                    self.render_upload(ui, hovering);
                    ui.add_space(12.0);
                    self.render_sections(ui);
                    ui.add_space(12.0);
                    self.render_generate(ui);
                    if phase == Phase::Idle {
                        self.render_welcome(ui);
                    }
                });
        });
    }
}
