use serde::{Deserialize, Serialize};

use crate::instructions::InstrClass;
use crate::line::{parse_line, Line};
use crate::revision::{Revision, RevisionId};
use crate::tokenizer::tokenize;

/// How non-fatal problems are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Leave the affected field zero and record a [`Warning`].
    #[default]
    Lenient,
    /// Fail on the first [`Warning`].
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub revision: RevisionId,
    pub mode: Mode,
}

/// Problems that lenient mode tolerates by zero-filling a field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    #[error("unknown {class:?} mnemonic `{mnemonic}`, opcode left zero")]
    UnknownMnemonic { class: InstrClass, mnemonic: String },
    #[error("unknown instruction class `{0}`, class bits left zero")]
    UnknownClass(String),
    #[error("unknown condition `{0}`, condition left zero")]
    UnknownCondition(String),
    #[error("memory offset {0} exceeds 255, offset left zero")]
    OffsetOutOfRange(u32),
    #[error("register operand {index} value {value} exceeds {max}, truncated")]
    RegisterOutOfRange { index: usize, value: u32, max: u32 },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("cannot parse {what} from `{token}`: {reason}")]
    Parse {
        what: &'static str,
        token: String,
        reason: String,
    },
    #[error("rejected in strict mode: {0}")]
    Rejected(#[from] Warning),
}

impl EncodeError {
    pub(crate) fn parse(what: &'static str, token: &str, reason: impl ToString) -> Self {
        EncodeError::Parse {
            what,
            token: token.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Warning sink shared by both modes.
#[derive(Debug)]
pub struct Diagnostics {
    mode: Mode,
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new(mode: Mode) -> Self {
        Self { mode, warnings: Vec::new() }
    }

    pub fn warn(&mut self, w: Warning) -> Result<(), EncodeError> {
        match self.mode {
            Mode::Strict => Err(EncodeError::Rejected(w)),
            Mode::Lenient => {
                self.warnings.push(w);
                Ok(())
            }
        }
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub word: u32,
    pub warnings: Vec<Warning>,
}

/// Encodes lines under one fixed revision. Stateless between calls.
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    cfg: EncoderConfig,
    revision: &'static Revision,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

impl Encoder {
    pub fn new(cfg: EncoderConfig) -> Self {
        Self {
            cfg,
            revision: cfg.revision.revision(),
        }
    }

    pub fn config(&self) -> EncoderConfig {
        self.cfg
    }

    pub fn revision(&self) -> &'static Revision {
        self.revision
    }

    /// Parse tokens into the typed line model without packing.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<(Line, Vec<Warning>), EncodeError> {
        let mut diag = Diagnostics::new(self.cfg.mode);
        let line = parse_line(tokens, self.revision, &mut diag)?;
        Ok((line, diag.into_warnings()))
    }

    pub fn encode_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Encoded, EncodeError> {
        let (line, warnings) = self.parse(tokens)?;
        Ok(Encoded {
            word: line.word(self.revision),
            warnings,
        })
    }

    pub fn encode_line(&self, line: &str) -> Result<Encoded, EncodeError> {
        self.encode_tokens(&tokenize(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict(revision: RevisionId) -> Encoder {
        Encoder::new(EncoderConfig { revision, mode: Mode::Strict })
    }

    #[test]
    fn lenient_collects_warnings() {
        let enc = Encoder::default();
        let out = enc.encode_line("i,1,a,frob").unwrap();
        assert_eq!(out.word, 0xC000_0000);
        assert_eq!(
            out.warnings,
            vec![Warning::UnknownMnemonic { class: InstrClass::Alu, mnemonic: "frob".into() }]
        );
    }

    #[test]
    fn strict_rejects_first_warning() {
        let err = strict(RevisionId::V2).encode_line("i,1,a,frob").unwrap_err();
        assert!(matches!(err, EncodeError::Rejected(Warning::UnknownMnemonic { .. })));
        let err = strict(RevisionId::V2).encode_line("n,1,x,add").unwrap_err();
        assert_eq!(err, EncodeError::Rejected(Warning::UnknownClass("x".into())));
    }

    #[test]
    fn strict_accepts_clean_lines() {
        let out = strict(RevisionId::V2).encode_line("i,0,a,add,r1,r2,r3,s,eq").unwrap();
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn ge_is_not_a_warning_even_in_strict_mode() {
        let out = strict(RevisionId::V2).encode_line("n,0,a,cmp,r1,r2,r3,s,ge").unwrap();
        assert_eq!(out.word & 0xF, 0);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: EncoderConfig = serde_json::from_str(r#"{"mode":"strict"}"#).unwrap();
        assert_eq!(cfg, EncoderConfig { revision: RevisionId::V2, mode: Mode::Strict });
        let cfg: EncoderConfig = serde_json::from_str(r#"{"revision":"v1"}"#).unwrap();
        assert_eq!(cfg.mode, Mode::Lenient);
    }

    #[test]
    fn encoder_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Encoder>();
    }
}
