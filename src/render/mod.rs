pub mod display;
pub mod report;

pub use display::display_value;
pub use report::render_submissions_report;
