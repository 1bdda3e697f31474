use super::FileConverter;
use super::Route;
use crate::catalog;
use crate::utils::file_size::FileSizeUtils;
use crate::workflow::ConversionStatus;
use eframe::egui::{self, Align, Color32, RichText};
use rfd::FileDialog;

const ACCENT: Color32 = Color32::from_rgb(2, 132, 199);
const SUCCESS: Color32 = Color32::from_rgb(22, 163, 74);
const FAILURE: Color32 = Color32::from_rgb(220, 38, 38);

enum HomeAction {
    Pick,
    Remove,
    Format(String),
    Convert,
    Download,
}

impl FileConverter {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("IntelliConvert").strong().size(20.0).color(ACCENT));
                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                    for route in Route::ALL.iter().rev() {
                        if ui
                            .selectable_label(self.state.route == *route, route.title())
                            .clicked()
                        {
                            self.state.route = *route;
                            self.state.notice = None;
                        }
                    }
                });
            });
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Uploaded and converted files are deleted from our servers after one hour.")
                        .small()
                        .color(ui.visuals().text_color().gamma_multiply(0.7)),
                );
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                match self.state.route {
                    Route::Home => self.render_home(ui),
                    Route::About => render_about(ui),
                    Route::Privacy => render_privacy(ui),
                    Route::Contact => self.render_contact(ui),
                }

                if let Some(notice) = &self.state.notice {
                    ui.add_space(10.0);
                    ui.vertical_centered(|ui| {
                        ui.colored_label(FAILURE, notice);
                    });
                }
                ui.add_space(20.0);
            });
        });
    }

    fn render_home(&mut self, ui: &mut egui::Ui) {
        let mut action = None;

        ui.vertical_centered(|ui| {
            ui.heading("The Ultimate Free File Converter");
            ui.add_space(5.0);
            ui.label(
                RichText::new("Convert documents, images, audio, video and archives.")
                    .color(ui.visuals().text_color().gamma_multiply(0.7)),
            );
        });
        ui.add_space(20.0);

        let uploading = self.workflow.status().is_uploading();
        let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());

        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(
                if hovering { 2.0 } else { 1.0 },
                if hovering { ACCENT } else { ui.visuals().widgets.noninteractive.bg_stroke.color },
            ))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.vertical_centered(|ui| match self.workflow.selection() {
                    None => {
                        ui.label("Drag and drop a file here");
                        ui.add_space(6.0);
                        ui.add_enabled_ui(!uploading, |ui| {
                            if ui.button("📁 Choose File").clicked() {
                                action = Some(HomeAction::Pick);
                            }
                        });
                    }
                    Some(selection) => {
                        let file = selection.file();
                        ui.label(RichText::new(&file.name).strong());
                        ui.label(FileSizeUtils::format_size(file.size));
                        ui.add_space(6.0);
                        ui.add_enabled_ui(!uploading, |ui| {
                            ui.horizontal(|ui| {
                                if ui.button("📁 Choose Another").clicked() {
                                    action = Some(HomeAction::Pick);
                                }
                                if ui
                                    .button(RichText::new("Remove File").color(FAILURE))
                                    .clicked()
                                {
                                    action = Some(HomeAction::Remove);
                                }
                            });
                        });
                    }
                });
            });

        if let Some(selection) = self.workflow.selection() {
            ui.add_space(12.0);
            ui.label("Convert To:");
            let candidates = selection.candidates().to_vec();
            let current = selection.output_format().map(str::to_string);

            ui.add_enabled_ui(!uploading && !candidates.is_empty(), |ui| {
                egui::ComboBox::from_id_source("format-select")
                    .selected_text(current.clone().unwrap_or_else(|| "Select a format".to_string()))
                    .width(ui.available_width())
                    .show_ui(ui, |ui| {
                        for format in &candidates {
                            if ui
                                .selectable_label(current.as_deref() == Some(format.as_str()), format.as_str())
                                .clicked()
                            {
                                action = Some(HomeAction::Format(format.clone()));
                            }
                        }
                    });
            });

            if candidates.is_empty() {
                ui.label(
                    RichText::new("No known conversions for this file type.")
                        .small()
                        .color(ui.visuals().text_color().gamma_multiply(0.7)),
                );
            }
            if self.state.suggestions_pending() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Looking for more formats...").small());
                });
            }
        }

        ui.add_space(16.0);
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.workflow.can_convert(), |ui| {
                let button = egui::Button::new("🔄 Convert File").min_size(egui::vec2(200.0, 40.0));
                if ui.add(button).clicked() {
                    action = Some(HomeAction::Convert);
                }
            });
        });

        ui.add_space(16.0);
        match self.workflow.status() {
            ConversionStatus::Idle => {}
            ConversionStatus::Uploading => {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Converting your file...");
                    });
                });
            }
            ConversionStatus::Success { .. } => {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("✅ Conversion Complete!").color(SUCCESS).strong());
                        ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                            if ui.button("⬇ Download File").clicked() {
                                action = Some(HomeAction::Download);
                            }
                        });
                    });
                });
            }
            ConversionStatus::Error(message) => {
                ui.group(|ui| {
                    ui.label(RichText::new("❌ An Error Occurred").color(FAILURE).strong());
                    ui.label(RichText::new(message).color(FAILURE));
                });
            }
        }

        match action {
            Some(HomeAction::Pick) => {
                if let Some(path) = FileDialog::new().pick_file() {
                    self.select_path(path);
                }
            }
            Some(HomeAction::Remove) => self.remove_file(),
            Some(HomeAction::Format(format)) => self.choose_format(&format),
            Some(HomeAction::Convert) => self.start_conversion(),
            Some(HomeAction::Download) => self.open_download(),
            None => {}
        }
    }

    fn render_contact(&mut self, ui: &mut egui::Ui) {
        ui.heading("Get In Touch");
        ui.add_space(5.0);
        ui.label("Have a question, suggestion, or need support? Fill out the form below.");
        ui.add_space(12.0);

        let form = &mut self.state.contact;
        ui.label("Your Name");
        ui.text_edit_singleline(&mut form.name);
        ui.label("Your Email");
        ui.text_edit_singleline(&mut form.email);
        ui.label("Message");
        ui.add(
            egui::TextEdit::multiline(&mut form.message)
                .desired_rows(5)
                .desired_width(ui.available_width()),
        );
        ui.add_space(10.0);

        let ready = form.is_complete();
        let mut send = false;
        ui.add_enabled_ui(ready, |ui| {
            if ui.button("✉ Send Message").clicked() {
                send = true;
            }
        });
        ui.label(
            RichText::new("This will open your default email client.")
                .small()
                .color(ui.visuals().text_color().gamma_multiply(0.7)),
        );

        if send {
            self.send_contact_message();
        }
    }
}

fn render_about(ui: &mut egui::Ui) {
    ui.heading("About IntelliConvert");
    ui.add_space(10.0);
    ui.label(
        "IntelliConvert sends your file to our conversion servers, which use \
         industry-standard tools to produce the format you pick. Documents, \
         spreadsheets, presentations, images, audio, video, CAD drawings and \
         archives are supported.",
    );
    ui.label(format!(
        "{} input file types are recognised out of the box.",
        catalog::supported_extensions().count()
    ));
    ui.add_space(8.0);
    ui.label(
        "When a suggestion service is configured, the converter can also propose \
         extra output formats for file types it does not know yet.",
    );
}

fn render_privacy(ui: &mut egui::Ui) {
    ui.heading("Privacy Policy");
    ui.add_space(10.0);
    ui.group(|ui| {
        ui.label(
            RichText::new(
                "All files you upload for conversion, and the converted output files, \
                 are permanently and automatically deleted from our servers one (1) \
                 hour after the conversion is complete.",
            )
            .strong(),
        );
    });
    ui.add_space(8.0);
    ui.label(
        "No account or personal information is required. Files are never viewed, \
         copied or shared; the conversion is fully automated.",
    );
}
