//! Text serializations of an assembled program image.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// One `0x`-prefixed lowercase hex word per line
    #[default]
    Hex,
    /// One 32-digit binary word per line
    Bin,
    /// VHDL `PROGRAM_MEMORY` signal initializer
    Vhdl,
}

pub const VHDL_PREAMBLE: &str = "signal program : PROGRAM_MEMORY := \n  ( \n";
pub const VHDL_POSTAMBLE: &str = "  others => x\"00000000\" \n  ); \n";

pub fn render(format: Format, words: &[u32]) -> String {
    match format {
        Format::Hex => hex_listing(words),
        Format::Bin => bin_listing(words),
        Format::Vhdl => vhdl_listing(words),
    }
}

pub fn hex_listing(words: &[u32]) -> String {
    let mut buf = String::new();
    for w in words {
        let _ = writeln!(buf, "{w:#x}");
    }
    buf
}

pub fn bin_listing(words: &[u32]) -> String {
    let mut buf = String::new();
    for w in words {
        let _ = writeln!(buf, "{w:032b}");
    }
    buf
}

pub fn vhdl_listing(words: &[u32]) -> String {
    let mut buf = String::from(VHDL_PREAMBLE);
    for (i, w) in words.iter().enumerate() {
        let _ = writeln!(buf, "  {i} => x\"{w:08x}\",");
    }
    buf.push_str(VHDL_POSTAMBLE);
    buf
}
