// Application layer: what the form and result view do with the core.

pub mod display;
pub mod export;
pub mod session;

pub use display::render_curriculum;
pub use export::{export_filename, CurriculumExporter};
pub use session::GenerationSession;
