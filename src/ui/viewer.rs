//! Renders display blocks into the central panel.
//!
//! This is the presentational end of the pipeline: block kinds map to
//! heading/bullet/paragraph widgets, spans map to rich text, and the
//! changed flag gets a tinted backdrop so AI edits stand out.

use crate::config::{LayoutVariant, VisualSettings};
use crate::render::{BlockKind, DisplayBlock, Span};
use egui::{Color32, RichText, Ui};

const CHANGED_FILL: Color32 = Color32::from_rgb(231, 248, 240);
const CHANGED_ACCENT: Color32 = Color32::from_rgb(16, 185, 129);
const KEYWORD_FILL: Color32 = Color32::from_rgb(209, 250, 229);
const KEYWORD_TEXT: Color32 = Color32::from_rgb(6, 95, 70);

pub struct Viewer;

impl Viewer {
    pub fn show(ui: &mut Ui, blocks: &[DisplayBlock], visual: &VisualSettings) {
        for block in blocks {
            if block.changed {
                egui::Frame::new()
                    .fill(CHANGED_FILL)
                    .stroke(egui::Stroke::new(1.0, CHANGED_ACCENT))
                    .inner_margin(egui::Margin::symmetric(6, 2))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        Self::show_block(ui, block, visual);
                    });
            } else {
                Self::show_block(ui, block, visual);
            }
            ui.add_space(visual.line_spacing());
        }
    }

    fn show_block(ui: &mut Ui, block: &DisplayBlock, visual: &VisualSettings) {
        let body = visual.body_size();
        match block.kind {
            BlockKind::Blank => {
                ui.add_space(body * 0.6);
            }
            BlockKind::H1 => {
                Self::show_spans(ui, &block.spans, body * 1.9, Some(visual.accent_color()));
            }
            BlockKind::H2 => {
                Self::show_spans(ui, &block.spans, body * 1.45, Some(visual.accent_color()));
                // The classic layout underlines section headers.
                if visual.layout == LayoutVariant::Classic {
                    ui.separator();
                }
            }
            BlockKind::H3 => {
                Self::show_spans(ui, &block.spans, body * 1.15, None);
            }
            BlockKind::Bullet => {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("•").size(body));
                    Self::span_labels(ui, &block.spans, body, None);
                });
            }
            BlockKind::Paragraph => {
                Self::show_spans(ui, &block.spans, body, None);
            }
        }
    }

    fn show_spans(ui: &mut Ui, spans: &[Span], size: f32, color: Option<Color32>) {
        ui.horizontal_wrapped(|ui| {
            Self::span_labels(ui, spans, size, color);
        });
    }

    fn span_labels(ui: &mut Ui, spans: &[Span], size: f32, color: Option<Color32>) {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            let mut text = RichText::new(&span.text).size(size);
            if let Some(color) = color {
                text = text.color(color);
            }
            if span.bold {
                text = text.strong();
            }
            if span.keyword_match {
                text = text.background_color(KEYWORD_FILL).color(KEYWORD_TEXT);
            }
            ui.label(text);
        }
    }
}
