//! Typed model of the AI analysis response.
//!
//! The service replies with one JSON document covering scoring, extracted
//! profile data and the rewritten resume. Field names follow the wire
//! format (camelCase).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: String,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    pub id: String,
    pub section: String,
    pub title: String,
    pub recommendation: String,
    pub impact: Impact,
    #[serde(default)]
    pub is_fixable: bool,
    /// Estimated point increase when applied.
    #[serde(default)]
    pub score_boost: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillCategory {
    Technical,
    Soft,
    Tools,
    Languages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    /// Proficiency 1-5.
    pub rating: u8,
    pub category: SkillCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CultureFit {
    pub company_name: String,
    pub inferred_values: Vec<String>,
    pub alignment_score: u32,
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u32,
    /// Score achievable after applying all suggested fixes.
    pub projected_score: u32,
    #[serde(default)]
    pub summary: String,
    pub culture_fit: CultureFit,
    pub breakdown: Vec<CategoryScore>,
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub critical_keywords: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    pub improvements: Vec<Improvement>,
    /// Full rewritten resume in the markdown dialect the viewer renders.
    pub rewritten_resume: String,
    #[serde(default)]
    pub cover_letter: String,
}

impl AnalysisResult {
    /// Keywords the viewer should emphasize: the critical ones first, then
    /// the missing ones, deduplicated case-insensitively.
    pub fn highlight_keywords(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut out = Vec::new();
        for kw in self.critical_keywords.iter().chain(&self.missing_keywords) {
            let lowered = kw.to_lowercase();
            if !kw.trim().is_empty() && !seen.contains(&lowered) {
                seen.push(lowered);
                out.push(kw.clone());
            }
        }
        out
    }
}
