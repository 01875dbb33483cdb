pub mod encoder;
pub mod instructions;
pub mod isa;
pub mod line;
pub mod program;
pub mod revision;
pub mod tokenizer;

pub use encoder::{EncodeError, Encoded, Encoder, EncoderConfig, Mode, Warning};
pub use instructions::InstrClass;
pub use line::{Directive, Instruction, Line, Operand};
pub use program::{assemble, AssembleError, Assembly, Diagnostic, ErrorPolicy, Severity};
pub use revision::{Field, Revision, RevisionId};
pub use tokenizer::tokenize;
