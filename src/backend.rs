pub mod ai_backend;
pub mod history_backend;
