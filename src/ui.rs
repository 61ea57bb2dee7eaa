pub mod chat_panel;
pub mod input_panel;
pub mod results_panel;
pub mod viewer;
pub mod viewport;
