// Adapters layer: concrete implementations of the domain ports for external services.

pub mod gemini;
pub mod solapi;

pub use gemini::GeminiRewriter;
pub use solapi::{SolapiAuth, SolapiSender};
