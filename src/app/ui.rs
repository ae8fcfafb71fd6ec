use super::DocxUploader;
use eframe::egui::{self, Align, Color32, RichText, Stroke};
use rfd::FileDialog;

const ACCENT: Color32 = Color32::from_rgb(43, 87, 154);
const ERROR_RED: Color32 = Color32::from_rgb(220, 50, 50);
const ERROR_FILL: Color32 = Color32::from_rgb(253, 236, 234);

impl DocxUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let footer_height = 45.0;
            let content_height = ui.available_height() - footer_height;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Word to PDF Converter");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Convert .docx documents to PDF (max 16MB)")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);
                    self.render_drop_zone(ui);
                    ui.add_space(20.0);

                    ui.vertical_centered(|ui| {
                        let button = egui::Button::new("📄 Convert to PDF")
                            .min_size(egui::vec2(200.0, 40.0));
                        if ui.add_enabled(self.controller.can_submit(), button).clicked() {
                            self.start_conversion();
                        }
                    });

                    ui.add_space(20.0);
                    self.render_progress(ui);
                    self.render_error(ui);

                    if let Some(path) = &self.controller.state().last_download {
                        ui.add_space(10.0);
                        ui.vertical_centered(|ui| {
                            ui.label(format!("Saved to {}", path.display()));
                        });
                    }
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(5.0);
                self.render_footer(ui);
            });
        });
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui) {
        let highlighted = self.controller.state().drop_zone.is_highlighted();
        let (fill, stroke) = if highlighted {
            (ACCENT.gamma_multiply(0.15), Stroke::new(2.0, ACCENT))
        } else {
            (
                ui.visuals().extreme_bg_color,
                Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
            )
        };

        egui::Frame::none()
            .fill(fill)
            .stroke(stroke)
            .rounding(8.0)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(if highlighted {
                        "Release to select this file"
                    } else {
                        "Drag & drop your .docx file here, or"
                    });
                    ui.add_space(8.0);
                    if ui.button("📁 Choose File").clicked() {
                        if let Some(path) = FileDialog::new()
                            .add_filter("Word document", &["docx"])
                            .pick_file()
                        {
                            self.controller.select_path(&path);
                        }
                    }
                    ui.add_space(8.0);
                    ui.label(self.controller.state().file_info());
                });
            });
    }

    fn render_progress(&self, ui: &mut egui::Ui) {
        let progress = &self.controller.state().progress;
        if !progress.visible {
            return;
        }

        ui.group(|ui| {
            let bar = egui::ProgressBar::new(progress.fraction())
                .show_percentage()
                .animate(false)
                .fill(ACCENT);
            ui.add(bar);
            if !progress.status_text.is_empty() {
                ui.label(&progress.status_text);
            }
        });
    }

    fn render_error(&mut self, ui: &mut egui::Ui) {
        let banner = &self.controller.state().error;
        if !banner.is_visible() {
            return;
        }
        let message = banner.message().to_string();

        ui.add_space(10.0);
        let mut dismissed = false;
        egui::Frame::none()
            .fill(ERROR_FILL)
            .stroke(Stroke::new(1.0, ERROR_RED))
            .rounding(6.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.colored_label(ERROR_RED, message);
                    ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                        dismissed = ui.small_button("✖").clicked();
                    });
                });
            });

        if dismissed {
            self.controller.dismiss_error();
        }
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        let text = match &self.server_version {
            Some(version) => format!("Server: {} (v{})", self.server_url, version),
            None => format!("Server: {}", self.server_url),
        };
        let weak = ui.visuals().weak_text_color();
        ui.label(RichText::new(text).small().color(weak));
        ui.label(
            RichText::new(format!("Saving to {}", self.downloads.dir().display()))
                .small()
                .color(weak),
        );
    }
}
