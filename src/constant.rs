// Window size constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 1080.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 720.0;
pub const DEFAULT_WINDOW_TITLE: &str = "Resume Lens";

/// Application name and metadata constants
pub const APP_QUALIFIER: &str = "app";
pub const APP_ORGANIZATION: &str = "ResumeLens";
pub const APP_NAME: &str = "Resume Lens";

/// App related Magic Numbers
pub const MAX_HISTORY_ITEMS: usize = 20;
pub const JD_PREVIEW_CHARS: usize = 120;
