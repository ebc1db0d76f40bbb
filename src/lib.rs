pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{GeminiProvider, LocalStorage};
pub use app::{CurriculumExporter, GenerationSession};
pub use config::ProviderSettings;
pub use crate::core::{generator::CurriculumGenerator, materializer::DecodePolicy};
pub use domain::model::{AcademicLevel, Curriculum, GenerationParams, LearningOutcome, Module};
pub use utils::error::{ForgeError, GenerationError, Result, SessionError, ValidationError};
