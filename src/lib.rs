//! Resume Lens library
//!
//! The diffing and rendering core lives in [`diff`] and [`render`]; the
//! rest wires it to the AI service, persistence and the egui shell.

pub mod analysis;
pub mod app;
pub mod backend;
pub mod chat;
pub mod config;
pub mod constant;
pub mod diff;
pub mod import;
pub mod improvement;
pub mod messages;
pub mod render;
pub mod storage;
pub mod style;
pub mod ui;
