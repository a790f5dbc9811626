mod format;
mod logging;

pub use format::format_clock;
pub use logging::init_logging;
