use crate::backend::ai_backend::{ChatRole, ChatTurn};
use egui::{Color32, RichText, Ui};

#[derive(Debug)]
pub enum ChatAction {
    Send(String),
}

#[derive(Debug, Clone)]
struct ChatMessage {
    role: ChatRole,
    text: String,
}

/// Right-hand panel: the copilot conversation. The app owns the stream
/// assembly; this panel only displays the transcript it is given.
#[derive(Default)]
pub struct ChatPanel {
    messages: Vec<ChatMessage>,
    input: String,
    pub is_streaming: bool,
    last_score: Option<u32>,
}

impl ChatPanel {
    pub fn show(&mut self, ui: &mut Ui) -> Option<ChatAction> {
        let mut action = None;

        ui.label(RichText::new("Copilot").strong());
        if let Some(score) = self.last_score {
            ui.label(
                RichText::new(format!("Updated score: {}", score))
                    .color(Color32::from_rgb(6, 95, 70)),
            );
        }
        ui.separator();

        let input_height = 64.0;
        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .max_height(ui.available_height() - input_height)
            .show(ui, |ui| {
                for message in &self.messages {
                    let (label, color) = match message.role {
                        ChatRole::User => ("You", Color32::from_gray(60)),
                        ChatRole::Model => ("Copilot", Color32::from_rgb(15, 118, 110)),
                    };
                    ui.label(RichText::new(label).small().color(color));
                    let text = if message.text.is_empty() && self.is_streaming {
                        "…"
                    } else {
                        &message.text
                    };
                    ui.label(text);
                    ui.add_space(6.0);
                }
            });

        ui.separator();
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.input)
                    .hint_text("Ask for a rewrite…")
                    .desired_width(ui.available_width() - 56.0),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let clicked = ui
                .add_enabled(!self.is_streaming, egui::Button::new("Send"))
                .clicked();
            if (submitted || clicked) && !self.is_streaming && !self.input.trim().is_empty() {
                action = Some(ChatAction::Send(self.input.trim().to_string()));
                self.input.clear();
            }
        });

        action
    }

    /// Record a user turn and open an empty model turn for the stream.
    pub fn begin_exchange(&mut self, user_text: String) {
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: user_text,
        });
        self.messages.push(ChatMessage {
            role: ChatRole::Model,
            text: String::new(),
        });
        self.is_streaming = true;
    }

    /// Replace the in-flight model turn with the latest display text.
    pub fn update_stream_text(&mut self, display_text: String) {
        if let Some(last) = self.messages.last_mut()
            && last.role == ChatRole::Model
        {
            last.text = display_text;
        }
    }

    pub fn finish_stream(&mut self, error: Option<String>) {
        self.is_streaming = false;
        if let Some(message) = error {
            self.update_stream_text(message);
        }
    }

    pub fn set_score(&mut self, score: u32) {
        self.last_score = Some(score);
    }

    /// The conversation as API turns, oldest first, skipping the empty
    /// in-flight model turn.
    pub fn turns(&self) -> Vec<ChatTurn> {
        self.messages
            .iter()
            .filter(|m| !m.text.is_empty())
            .map(|m| ChatTurn {
                role: m.role,
                text: m.text.clone(),
            })
            .collect()
    }
}
