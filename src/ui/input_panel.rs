use crate::backend::history_backend::SavedResume;
use egui::{RichText, Ui};

/// Actions the input panel hands back to the app for processing.
#[derive(Debug)]
pub enum InputAction {
    ImportResume,
    ImportJobDescription,
    Analyze,
    QuickFix,
    SaveToLibrary(String),
    LoadSaved(String),
    DeleteSaved(String),
}

/// Left-hand panel: the raw inputs an analysis run needs, plus the
/// saved-resume library.
#[derive(Default)]
pub struct InputPanel {
    pub resume_text: String,
    pub jd_text: String,
    pub company: String,
    pub resume_file_name: Option<String>,
    pub jd_file_name: Option<String>,
    pub is_analyzing: bool,
    save_name: String,
}

impl InputPanel {
    pub fn show(&mut self, ui: &mut Ui, library: &[SavedResume]) -> Option<InputAction> {
        let mut action = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.label(RichText::new("Target company").strong());
            ui.text_edit_singleline(&mut self.company);

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("Job description").strong());
                if ui.small_button("Import…").clicked() {
                    action = Some(InputAction::ImportJobDescription);
                }
            });
            if let Some(name) = &self.jd_file_name {
                ui.label(RichText::new(name).small().weak());
            }
            ui.add(
                egui::TextEdit::multiline(&mut self.jd_text)
                    .desired_width(f32::INFINITY)
                    .desired_rows(8),
            );

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("Resume").strong());
                if ui.small_button("Import…").clicked() {
                    action = Some(InputAction::ImportResume);
                }
                if ui.small_button("Quick fix").clicked() {
                    action = Some(InputAction::QuickFix);
                }
            });
            if let Some(name) = &self.resume_file_name {
                ui.label(RichText::new(name).small().weak());
            }
            ui.add(
                egui::TextEdit::multiline(&mut self.resume_text)
                    .desired_width(f32::INFINITY)
                    .desired_rows(14),
            );

            ui.add_space(8.0);
            let can_analyze = !self.is_analyzing
                && !self.resume_text.trim().is_empty()
                && !self.jd_text.trim().is_empty();
            ui.horizontal(|ui| {
                let label = if self.is_analyzing {
                    "Analyzing…"
                } else {
                    "Analyze match"
                };
                if ui.add_enabled(can_analyze, egui::Button::new(label)).clicked() {
                    action = Some(InputAction::Analyze);
                }
                if self.is_analyzing {
                    ui.spinner();
                }
            });

            ui.add_space(10.0);
            ui.separator();
            ui.label(RichText::new("Library").strong());
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut self.save_name);
                let can_save =
                    !self.save_name.trim().is_empty() && !self.resume_text.trim().is_empty();
                if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
                    action = Some(InputAction::SaveToLibrary(self.save_name.trim().to_string()));
                    self.save_name.clear();
                }
            });
            for saved in library {
                ui.horizontal(|ui| {
                    ui.label(&saved.name);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").clicked() {
                            action = Some(InputAction::DeleteSaved(saved.id.clone()));
                        }
                        if ui.small_button("Load").clicked() {
                            action = Some(InputAction::LoadSaved(saved.id.clone()));
                        }
                    });
                });
            }
        });

        action
    }
}
