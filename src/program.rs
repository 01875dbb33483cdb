use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::encoder::{EncodeError, Encoder};

/// What to do when a line fails to encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop at the first failing line.
    #[default]
    Abort,
    /// Emit a zero word for the failing line, report it and carry on.
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based source line.
    pub line: usize,
    pub severity: Severity,
    pub message: String,
}

/// One word per source line, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    pub words: Vec<u32>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Assembly {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: EncodeError,
    },
}

pub fn assemble(source: &str, enc: &Encoder, policy: ErrorPolicy) -> Result<Assembly, AssembleError> {
    let mut out = Assembly::default();
    for (idx, text) in source.lines().enumerate() {
        let line = idx + 1;
        match enc.encode_line(text) {
            Ok(encoded) => {
                for w in encoded.warnings {
                    warn!(line, "{w}");
                    out.diagnostics.push(Diagnostic {
                        line,
                        severity: Severity::Warning,
                        message: w.to_string(),
                    });
                }
                debug!(line, word = %format_args!("{:#010x}", encoded.word), "encoded");
                out.words.push(encoded.word);
            }
            Err(source) => match policy {
                ErrorPolicy::Abort => return Err(AssembleError::Line { line, source }),
                ErrorPolicy::Continue => {
                    error!(line, "{source}");
                    out.diagnostics.push(Diagnostic {
                        line,
                        severity: Severity::Error,
                        message: source.to_string(),
                    });
                    out.words.push(0);
                }
            },
        }
    }
    Ok(out)
}
