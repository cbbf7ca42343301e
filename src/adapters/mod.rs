// Adapters layer: the Gemini content provider and key/value stores.

pub mod gemini;
pub mod store;

pub use gemini::{GeminiConfig, GeminiProvider};
pub use store::{FileStore, MemoryStore};
