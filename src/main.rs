use resume_lens::app::ResumeLensApp;
use resume_lens::constant;
use resume_lens::ui;

fn main() -> eframe::Result {
    tracing_subscriber::fmt::init();

    let options = ui::viewport::build_viewport();

    eframe::run_native(
        constant::DEFAULT_WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(ResumeLensApp::new(cc)))),
    )
}
