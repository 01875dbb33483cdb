use anyhow::{Context, Result};
use pmasm::{EncoderConfig, ErrorPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::output::Format;

/// Settings file contents; every key is optional.
///
/// ```json
/// { "revision": "v1", "mode": "strict", "on_error": "continue", "format": "vhdl" }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(flatten)]
    pub encoder: EncoderConfig,
    pub on_error: ErrorPolicy,
    pub format: Format,
}

pub fn load_settings(path: &Path) -> Result<Settings> {
    let txt = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings {}", path.display()))?;
    let settings = serde_json::from_str(&txt)
        .with_context(|| format!("parsing settings {}", path.display()))?;
    Ok(settings)
}
