use crate::backend::ai_backend::AiBackend;
use crate::backend::history_backend::{HistoryBackend, HistoryItem, SavedResume};
use crate::chat::StreamAssembler;
use crate::config::Config;
use crate::import::{import_text_file, validate_not_duplicate};
use crate::messages::{ImportTarget, ResponseMessage};
use crate::render::render_blocks;
use crate::storage::FileStorage;
use crate::style::configure_style;
use crate::ui::chat_panel::{ChatAction, ChatPanel};
use crate::ui::input_panel::{InputAction, InputPanel};
use crate::ui::results_panel::{ResultsAction, ResultsPanel};
use crate::ui::viewer::Viewer;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

pub struct ResumeLensApp {
    config: Config,
    ai: AiBackend,
    store: Option<HistoryBackend<FileStorage>>,

    input: InputPanel,
    chat: ChatPanel,

    /// Resume content before the latest AI edit; drives diff highlighting.
    previous_resume: Option<String>,
    keywords: Vec<String>,
    analysis: Option<crate::analysis::AnalysisResult>,
    history: Vec<HistoryItem>,
    library: Vec<SavedResume>,
    assembler: Option<StreamAssembler>,
    status: Option<String>,

    response_sender: Sender<ResponseMessage>,
    response_receiver: Receiver<ResponseMessage>,
}

impl ResumeLensApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = Config::default();
        configure_style(&cc.egui_ctx, &config.settings.theme);
        let ai = AiBackend::new(&config.settings.ai);

        let store = match FileStorage::new(config.data_dir().join("store")) {
            Ok(storage) => Some(HistoryBackend::new(storage)),
            Err(e) => {
                tracing::error!("Persistence disabled, storage init failed: {}", e);
                None
            }
        };

        let history = store
            .as_ref()
            .and_then(|s| s.load_history().ok())
            .unwrap_or_default();
        let library = store
            .as_ref()
            .and_then(|s| s.load_library().ok())
            .unwrap_or_default();

        let (response_sender, response_receiver) = std::sync::mpsc::channel();

        Self {
            config,
            ai,
            store,
            input: InputPanel::default(),
            chat: ChatPanel::default(),
            previous_resume: None,
            keywords: Vec::new(),
            analysis: None,
            history,
            library,
            assembler: None,
            status: None,
            response_sender,
            response_receiver,
        }
    }

    fn process_responses(&mut self) {
        while let Ok(message) = self.response_receiver.try_recv() {
            match message {
                ResponseMessage::AnalysisReady(Ok(result)) => {
                    self.input.is_analyzing = false;
                    let input_resume = std::mem::take(&mut self.input.resume_text);
                    let (current, baseline, item) =
                        complete_analysis(&self.input.jd_text, input_resume, &result);
                    self.input.resume_text = current;
                    self.previous_resume = Some(baseline);
                    self.keywords = result.highlight_keywords();

                    if let Some(store) = &self.store {
                        match store.push_history(item) {
                            Ok(items) => self.history = items,
                            Err(e) => tracing::error!("Failed to save history: {}", e),
                        }
                    }
                    self.analysis = Some(result);
                    self.status = None;
                }
                ResponseMessage::AnalysisReady(Err(e)) => {
                    self.input.is_analyzing = false;
                    self.status = Some(e.to_string());
                }
                ResponseMessage::QuickFixReady(Ok(text)) => {
                    self.previous_resume = Some(self.input.resume_text.clone());
                    self.input.resume_text = text;
                }
                ResponseMessage::QuickFixReady(Err(e)) => {
                    self.status = Some(e.to_string());
                }
                ResponseMessage::ChatChunk(chunk) => {
                    let assembler = self.assembler.get_or_insert_with(StreamAssembler::new);
                    if let Some(new_resume) = assembler.push(&chunk) {
                        self.previous_resume = Some(self.input.resume_text.clone());
                        self.input.resume_text = new_resume;
                    }
                    let display = assembler.display_text();
                    self.chat.update_stream_text(display);
                }
                ResponseMessage::ChatDone(result) => {
                    self.chat.finish_stream(result.err().map(|e| e.to_string()));
                    if let Some(assembler) = self.assembler.take()
                        && let Some(score) = assembler.score()
                    {
                        self.chat.set_score(score);
                        if let Some(analysis) = &mut self.analysis {
                            analysis.overall_score = score;
                        }
                    }
                }
                ResponseMessage::FileImported(target, Ok((name, content))) => match target {
                    ImportTarget::Resume => {
                        self.input.resume_text = content;
                        self.input.resume_file_name = Some(name);
                        self.previous_resume = None;
                    }
                    ImportTarget::JobDescription => {
                        self.input.jd_text = content;
                        self.input.jd_file_name = Some(name);
                    }
                },
                ResponseMessage::FileImported(_, Err(e)) => {
                    self.status = Some(e.to_string());
                }
            }
        }
    }

    fn handle_input_action(&mut self, action: InputAction) {
        match action {
            InputAction::ImportResume => self.spawn_import(ImportTarget::Resume),
            InputAction::ImportJobDescription => self.spawn_import(ImportTarget::JobDescription),
            InputAction::Analyze => {
                self.input.is_analyzing = true;
                self.status = None;
                self.ai.analyze_resume(
                    &self.input.resume_text,
                    &self.input.jd_text,
                    &self.input.company,
                    self.response_sender.clone(),
                );
            }
            InputAction::QuickFix => {
                self.ai
                    .quick_fix(&self.input.resume_text, self.response_sender.clone());
            }
            InputAction::SaveToLibrary(name) => {
                if let Some(store) = &self.store {
                    match store.save_resume(&name, &self.input.resume_text) {
                        Ok(items) => self.library = items,
                        Err(e) => self.status = Some(e.to_string()),
                    }
                }
            }
            InputAction::LoadSaved(id) => {
                if let Some(saved) = self.library.iter().find(|r| r.id == id) {
                    self.input.resume_text = saved.content.clone();
                    self.input.resume_file_name = Some(saved.name.clone());
                    self.previous_resume = None;
                }
            }
            InputAction::DeleteSaved(id) => {
                if let Some(store) = &self.store {
                    match store.delete_resume(&id) {
                        Ok(items) => self.library = items,
                        Err(e) => self.status = Some(e.to_string()),
                    }
                }
            }
        }
    }

    fn handle_results_action(&mut self, action: ResultsAction) {
        match action {
            ResultsAction::AskCopilot(message) => self.start_chat(message),
            ResultsAction::RestoreHistory(id) => {
                if let Some(item) = self.history.iter().find(|h| h.id == id).cloned() {
                    self.input.jd_text = item.full_jd;
                    self.previous_resume = Some(item.full_resume);
                    self.input.resume_text = item.result.rewritten_resume.clone();
                    self.keywords = item.result.highlight_keywords();
                    self.analysis = Some(item.result);
                }
            }
            ResultsAction::DeleteHistory(id) => {
                if let Some(store) = &self.store {
                    match store.remove_history(&id) {
                        Ok(items) => self.history = items,
                        Err(e) => self.status = Some(e.to_string()),
                    }
                }
            }
            ResultsAction::ClearHistory => {
                if let Some(store) = &self.store {
                    if let Err(e) = store.clear_history() {
                        self.status = Some(e.to_string());
                    } else {
                        self.history.clear();
                    }
                }
            }
        }
    }

    fn start_chat(&mut self, message: String) {
        self.chat.begin_exchange(message);
        self.assembler = Some(StreamAssembler::new());
        self.ai.send_chat(
            &self.input.resume_text,
            &self.input.jd_text,
            self.chat.turns(),
            self.response_sender.clone(),
        );
    }

    fn spawn_import(&self, target: ImportTarget) {
        let sender = self.response_sender.clone();
        let current_name = match target {
            ImportTarget::Resume => self.input.resume_file_name.clone(),
            ImportTarget::JobDescription => self.input.jd_file_name.clone(),
        };

        std::thread::spawn(move || {
            let Some(path) = rfd::FileDialog::new()
                .add_filter("Documents", &["txt", "md", "pdf", "docx"])
                .pick_file()
            else {
                return;
            };

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let result = validate_not_duplicate(&name, current_name.as_deref())
                .and_then(|_| import_text_file(&path))
                .map(|content| (name, content));

            if let Err(e) = sender.send(ResponseMessage::FileImported(target, result)) {
                tracing::error!("Failed to send import result: {}", e);
            }
        });
    }
}

/// State transition for a finished analysis run: the rewritten resume
/// becomes the current text, while the resume the user submitted becomes
/// the diff baseline and the history snapshot.
fn complete_analysis(
    jd: &str,
    input_resume: String,
    result: &crate::analysis::AnalysisResult,
) -> (String, String, HistoryItem) {
    let item = HistoryItem::from_run(jd, &input_resume, result.clone());
    (result.rewritten_resume.clone(), input_resume, item)
}

impl eframe::App for ResumeLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_responses();

        // Background work finishes off-thread; keep polling while busy.
        if self.input.is_analyzing || self.chat.is_streaming {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::SidePanel::left("input_panel")
            .resizable(true)
            .default_width(330.0)
            .show(ctx, |ui| {
                let action = self.input.show(ui, &self.library);
                if let Some(action) = action {
                    self.handle_input_action(action);
                }
            });

        egui::SidePanel::right("chat_panel")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                if let Some(ChatAction::Send(message)) = self.chat.show(ui) {
                    self.start_chat(message);
                }
            });

        if let Some(status) = self.status.clone() {
            egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(220, 38, 38), status);
                    if ui.small_button("Dismiss").clicked() {
                        self.status = None;
                    }
                });
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if let Some(action) =
                    ResultsPanel::show(ui, self.analysis.as_ref(), &self.history)
                {
                    self.handle_results_action(action);
                }

                ui.add_space(10.0);
                ui.separator();

                // Recomputed per frame; resume-sized inputs keep this cheap.
                let blocks = render_blocks(
                    &self.input.resume_text,
                    self.previous_resume.as_deref(),
                    &self.keywords,
                );
                Viewer::show(ui, &blocks, &self.config.settings.visual);
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save settings on exit: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisResult, CultureFit, PersonalInfo};

    fn sample_result(rewritten: &str) -> AnalysisResult {
        AnalysisResult {
            overall_score: 70,
            projected_score: 95,
            summary: String::new(),
            culture_fit: CultureFit {
                company_name: "Acme".to_string(),
                inferred_values: vec![],
                alignment_score: 50,
                analysis: String::new(),
            },
            breakdown: vec![],
            personal_info: PersonalInfo {
                name: "Jane".to_string(),
                title: "Engineer".to_string(),
                email: String::new(),
                phone: String::new(),
                linkedin: None,
                website: None,
                location: None,
            },
            skills: vec![],
            certifications: vec![],
            missing_keywords: vec![],
            critical_keywords: vec![],
            strengths: vec![],
            weaknesses: vec![],
            improvements: vec![],
            rewritten_resume: rewritten.to_string(),
            cover_letter: String::new(),
        }
    }

    #[test]
    fn completed_analysis_snapshots_the_submitted_resume() {
        let submitted = "# Jane\n- Built APIs".to_string();
        let result = sample_result("# Jane\n- Built scalable APIs");

        let (current, baseline, item) = complete_analysis("some jd", submitted.clone(), &result);

        // The rewrite becomes the current text, but history and the diff
        // baseline must keep what the user submitted.
        assert_eq!(current, result.rewritten_resume);
        assert_eq!(baseline, submitted);
        assert_eq!(item.full_resume, submitted);
        assert_ne!(item.full_resume, current);
        assert_eq!(item.full_jd, "some jd");
    }
}
