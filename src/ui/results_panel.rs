use crate::analysis::{AnalysisResult, Impact};
use crate::backend::history_backend::HistoryItem;
use crate::improvement::{Recommendation, parse_recommendation};
use egui::{Color32, RichText, Ui};

#[derive(Debug)]
pub enum ResultsAction {
    /// Forward an improvement to the copilot as a rewrite instruction.
    AskCopilot(String),
    RestoreHistory(String),
    DeleteHistory(String),
    ClearHistory,
}

fn score_color(score: u32) -> Color32 {
    if score >= 80 {
        Color32::from_rgb(5, 150, 105)
    } else if score >= 60 {
        Color32::from_rgb(217, 119, 6)
    } else {
        Color32::from_rgb(220, 38, 38)
    }
}

pub struct ResultsPanel;

impl ResultsPanel {
    pub fn show(
        ui: &mut Ui,
        result: Option<&AnalysisResult>,
        history: &[HistoryItem],
    ) -> Option<ResultsAction> {
        let mut action = None;

        if let Some(result) = result {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("{}", result.overall_score))
                        .size(32.0)
                        .color(score_color(result.overall_score)),
                );
                ui.label(RichText::new("/ 100").weak());
                ui.label(
                    RichText::new(format!("→ {} projected", result.projected_score))
                        .color(score_color(result.projected_score)),
                );
            });
            if !result.summary.is_empty() {
                ui.label(&result.summary);
            }

            ui.add_space(4.0);
            for category in &result.breakdown {
                ui.horizontal(|ui| {
                    ui.label(format!("{}:", category.category));
                    ui.label(
                        RichText::new(format!("{}", category.score))
                            .color(score_color(category.score)),
                    );
                });
            }

            egui::CollapsingHeader::new(format!(
                "Culture fit: {} ({})",
                result.culture_fit.company_name, result.culture_fit.alignment_score
            ))
            .show(ui, |ui| {
                ui.label(result.culture_fit.inferred_values.join(" · "));
                ui.label(&result.culture_fit.analysis);
            });

            egui::CollapsingHeader::new(format!("Improvements ({})", result.improvements.len()))
                .default_open(true)
                .show(ui, |ui| {
                    for improvement in &result.improvements {
                        if let Some(a) = Self::show_improvement(ui, improvement) {
                            action = Some(a);
                        }
                    }
                });
        } else {
            ui.label(RichText::new("Run an analysis to see the match report.").weak());
        }

        if !history.is_empty() {
            ui.add_space(8.0);
            ui.separator();
            ui.horizontal(|ui| {
                ui.label(RichText::new("History").strong());
                if ui.small_button("Clear all").clicked() {
                    action = Some(ResultsAction::ClearHistory);
                }
            });
            for item in history {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("{}", item.score)).color(score_color(item.score)),
                    );
                    ui.label(&item.role);
                    ui.label(
                        RichText::new(item.date.format("%Y-%m-%d %H:%M").to_string())
                            .small()
                            .weak(),
                    );
                    if ui.small_button("Restore").clicked() {
                        action = Some(ResultsAction::RestoreHistory(item.id.clone()));
                    }
                    if ui.small_button("✕").clicked() {
                        action = Some(ResultsAction::DeleteHistory(item.id.clone()));
                    }
                });
            }
        }

        action
    }

    fn show_improvement(
        ui: &mut Ui,
        improvement: &crate::analysis::Improvement,
    ) -> Option<ResultsAction> {
        let mut action = None;
        let impact_color = match improvement.impact {
            Impact::High => Color32::from_rgb(220, 38, 38),
            Impact::Medium => Color32::from_rgb(217, 119, 6),
            Impact::Low => Color32::from_gray(120),
        };

        egui::CollapsingHeader::new(format!(
            "[{}] {}",
            improvement.section, improvement.title
        ))
        .id_salt(&improvement.id)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("{:?} impact", improvement.impact)).color(impact_color));
                if let Some(boost) = improvement.score_boost {
                    ui.label(RichText::new(format!("+{} pts", boost)).weak());
                }
            });

            match parse_recommendation(&improvement.recommendation) {
                Recommendation::Parsed {
                    intro,
                    before,
                    after,
                } => {
                    if !intro.is_empty() {
                        ui.label(intro);
                    }
                    ui.label(
                        RichText::new(format!("Before: {}", before))
                            .color(Color32::from_gray(120))
                            .strikethrough(),
                    );
                    ui.label(
                        RichText::new(format!("After: {}", after))
                            .color(Color32::from_rgb(5, 150, 105)),
                    );
                }
                Recommendation::Plain(text) => {
                    ui.label(text);
                }
            }

            if improvement.is_fixable && ui.small_button("Fix with copilot").clicked() {
                action = Some(ResultsAction::AskCopilot(format!(
                    "Apply this improvement to my resume: {} — {}",
                    improvement.title, improvement.recommendation
                )));
            }
        });

        action
    }
}
