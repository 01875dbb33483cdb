use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pmasm::{assemble, Assembly, Encoder, ErrorPolicy, Mode, RevisionId};
use pmasm_cli::{load_settings, render, Format, Settings};

/// Program assembled when no input is given.
const DEFAULT_INPUT: &str = "progs/01_bypass_X_to_X.asm";
const DEFAULT_VHDL_OUT: &str = "out.vhdl";
const DEFAULT_TEXT_OUT: &str = "out.txt";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Encode comma-separated instruction lines into 32-bit program words",
    long_about = None
)]
struct Cli {
    /// Source file, one instruction or directive per line.
    /// Without it the default program is written to out.vhdl and out.txt
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output file (default: stdout)
    #[arg(value_name = "OUTPUT", requires = "input")]
    output: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum)]
    format: Option<Format>,
    /// ISA revision: v1 (early), v2 (refined), v3 (stripped)
    #[arg(long)]
    revision: Option<RevisionId>,
    /// Fail on unknown mnemonics, classes, conditions and out-of-range operands
    #[arg(long)]
    strict: bool,
    /// Emit a zero word for lines that fail to encode and keep going
    #[arg(long)]
    keep_going: bool,
    /// JSON settings file (revision, mode, on_error, format); flags override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print the selected revision's tables as JSON and exit
    #[arg(long)]
    print_revision: bool,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut s = match &self.config {
            Some(path) => load_settings(path)?,
            None => Settings::default(),
        };
        if let Some(r) = self.revision {
            s.encoder.revision = r;
        }
        if self.strict {
            s.encoder.mode = Mode::Strict;
        }
        if self.keep_going {
            s.on_error = ErrorPolicy::Continue;
        }
        if let Some(f) = self.format {
            s.format = f;
        }
        Ok(s)
    }
}

fn assemble_file(path: &Path, enc: &Encoder, policy: ErrorPolicy) -> Result<Assembly> {
    let src = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let asm = assemble(&src, enc, policy).with_context(|| format!("assembling {}", path.display()))?;
    info!(
        input = %path.display(),
        words = asm.words.len(),
        revision = %enc.config().revision,
        "assembled"
    );
    Ok(asm)
}

fn write_output(path: &Path, format: Format, words: &[u32]) -> Result<()> {
    fs::write(path, render(format, words)).with_context(|| format!("writing {}", path.display()))?;
    info!(output = %path.display(), ?format, "wrote");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = cli.settings()?;
    let enc = Encoder::new(settings.encoder);

    if cli.print_revision {
        println!("{}", serde_json::to_string_pretty(enc.revision())?);
        return Ok(());
    }

    let asm = match &cli.input {
        None => {
            let asm = assemble_file(Path::new(DEFAULT_INPUT), &enc, settings.on_error)?;
            write_output(Path::new(DEFAULT_VHDL_OUT), Format::Vhdl, &asm.words)?;
            write_output(Path::new(DEFAULT_TEXT_OUT), Format::Bin, &asm.words)?;
            asm
        }
        Some(input) => {
            let asm = assemble_file(input, &enc, settings.on_error)?;
            match &cli.output {
                Some(out) => write_output(out, settings.format, &asm.words)?,
                None => print!("{}", render(settings.format, &asm.words)),
            }
            asm
        }
    };

    let failed = asm.diagnostics.iter().filter(|d| d.severity == pmasm::Severity::Error).count();
    anyhow::ensure!(failed == 0, "{failed} line(s) failed to encode");
    Ok(())
}
