// Adapters layer: concrete implementations for external systems (provider http, storage).

pub mod gemini;
pub mod storage;

pub use gemini::GeminiProvider;
pub use storage::LocalStorage;
