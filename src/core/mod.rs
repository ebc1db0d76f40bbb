pub mod generator;
pub mod integrity;
pub mod materializer;
pub mod prompt;
pub mod schema;

pub use crate::domain::model::{Curriculum, GenerationParams, LearningOutcome, Module};
pub use crate::domain::ports::{CompletionProvider, Storage};
pub use crate::utils::error::Result;
