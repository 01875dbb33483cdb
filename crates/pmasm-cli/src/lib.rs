pub mod output;
pub mod settings;

// Re-export commonly used types/functions for the binary and tests
pub use output::{render, Format};
pub use settings::{load_settings, Settings};
