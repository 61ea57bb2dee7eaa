use crate::analysis::AnalysisResult;
use crate::backend::ai_backend::AiError;
use crate::import::ImportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportTarget {
    Resume,
    JobDescription,
}

/// Response messages from background operations
pub enum ResponseMessage {
    AnalysisReady(Result<AnalysisResult, AiError>),
    QuickFixReady(Result<String, AiError>),
    /// One streamed chunk of the current chat response.
    ChatChunk(String),
    /// Stream finished, successfully or not.
    ChatDone(Result<(), AiError>),
    /// (file name, content) on success.
    FileImported(ImportTarget, Result<(String, String), ImportError>),
}
