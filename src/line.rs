//! Typed model of one source line and the positional parser that produces it.
//!
//! Tokens are consumed strictly in position order. Parsing stops at the first
//! position the line does not reach, so an [`Instruction`] only ever holds the
//! prefix of fields that was actually written. [`Instruction::pack`] follows
//! the same order and is total.

use crate::encoder::{Diagnostics, EncodeError, Warning};
use crate::instructions::InstrClass;
use crate::revision::{pos, Revision};

/// Reserved token strings.
pub mod marker {
    pub const IMMEDIATE: &str = "i";
    pub const WRITE_ENABLE: &str = "1";
    pub const SIGNED: &str = "s";
    pub const SET_FLAGS: &str = "sf";
    pub const PREDICATE: &str = "p";
    pub const DECIMAL: &str = "di";
    pub const HEX: &str = "dh";
    pub const FLOAT: &str = "df";
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Directive {
    Decimal(u32),
    Hex(u32),
    /// Stored as its IEEE-754 single-precision bit pattern.
    Float(f32),
}

impl Directive {
    /// `Ok(None)` when `head` is not a directive marker.
    pub fn parse(head: &str, literal: &str) -> Result<Option<Directive>, EncodeError> {
        let d = match head {
            marker::DECIMAL => {
                let v: i64 = literal
                    .parse()
                    .map_err(|e| EncodeError::parse("decimal literal", literal, e))?;
                Directive::Decimal(word32("decimal literal", literal, v)?)
            }
            marker::HEX => {
                let (negative, rest) = match literal.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, literal.strip_prefix('+').unwrap_or(literal)),
                };
                let digits = rest
                    .strip_prefix("0x")
                    .or_else(|| rest.strip_prefix("0X"))
                    .unwrap_or(rest);
                if digits.starts_with(&['+', '-'][..]) {
                    return Err(EncodeError::parse("hex literal", literal, "repeated sign"));
                }
                let v = i64::from_str_radix(digits, 16)
                    .map_err(|e| EncodeError::parse("hex literal", literal, e))?;
                Directive::Hex(word32("hex literal", literal, if negative { -v } else { v })?)
            }
            marker::FLOAT => Directive::Float(parse_f32(literal)?),
            _ => return Ok(None),
        };
        Ok(Some(d))
    }

    pub fn word(self) -> u32 {
        match self {
            Directive::Decimal(v) | Directive::Hex(v) => v,
            Directive::Float(f) => f.to_bits(),
        }
    }
}

/// Token 7: signed flag for signed classes, memory offset for the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Signed { signed: bool, set_flags: Option<bool> },
    Offset(u32),
}

/// Field values already resolved against a revision. `None` / missing
/// registers mark where the source line ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instruction {
    pub immediate: bool,
    pub write_enable: bool,
    pub class: Option<InstrClass>,
    pub opcode: Option<u8>,
    pub registers: Vec<u32>,
    pub operand: Option<Operand>,
    pub condition: Option<u8>,
    pub predicate: Option<bool>,
}

impl Instruction {
    pub fn pack(&self, rev: &Revision) -> u32 {
        let l = &rev.layout;
        let mut word = l.immediate.flag(self.immediate) | l.write_enable.flag(self.write_enable);

        let Some(class) = self.class else { return word };
        word |= l.class.place(class.code());

        let Some(op) = self.opcode else { return word };
        word |= l.opcode.place(op as u32);

        let Some(regs) = l.registers else { return word };
        for (field, &r) in regs.iter().zip(&self.registers) {
            word |= field.place(r);
        }
        if self.registers.len() < regs.len() {
            return word;
        }

        let (Some(ol), Some(operand)) = (l.operand, self.operand) else { return word };
        match operand {
            Operand::Signed { signed, set_flags } => {
                word |= ol.signed.flag(signed);
                if let (Some(slot), Some(on)) = (ol.set_flags, set_flags) {
                    word |= slot.field.flag(on);
                }
            }
            Operand::Offset(v) => word |= ol.offset.place(v),
        }

        let Some(cond) = self.condition else { return word };
        word |= ol.condition.place(cond as u32);

        if let (Some(slot), Some(on)) = (ol.predicate, self.predicate) {
            word |= slot.field.flag(on);
        }
        word
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Blank,
    Directive(Directive),
    Instruction(Instruction),
}

impl Line {
    pub fn word(&self, rev: &Revision) -> u32 {
        match self {
            Line::Blank => 0,
            Line::Directive(d) => d.word(),
            Line::Instruction(i) => i.pack(rev),
        }
    }
}

pub fn parse_line<S: AsRef<str>>(
    tokens: &[S],
    rev: &Revision,
    diag: &mut Diagnostics,
) -> Result<Line, EncodeError> {
    let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
    if tokens.len() <= 1 {
        return Ok(Line::Blank);
    }
    if let Some(d) = Directive::parse(tokens[0], tokens[1])? {
        return Ok(Line::Directive(d));
    }
    parse_instruction(&tokens, rev, diag).map(Line::Instruction)
}

fn parse_instruction(
    tokens: &[&str],
    rev: &Revision,
    diag: &mut Diagnostics,
) -> Result<Instruction, EncodeError> {
    let mut insn = Instruction {
        immediate: tokens[pos::IMMEDIATE] == marker::IMMEDIATE,
        write_enable: tokens[pos::WRITE_ENABLE] == marker::WRITE_ENABLE,
        ..Instruction::default()
    };

    let Some(&tok) = tokens.get(pos::CLASS) else { return Ok(insn) };
    // An unrecognised class packs as alu (00) but takes the offset tail.
    let (class, known_class) = match InstrClass::from_marker(tok) {
        Some(c) => (c, true),
        None => {
            diag.warn(Warning::UnknownClass(tok.to_string()))?;
            (InstrClass::Alu, false)
        }
    };
    insn.class = Some(class);

    let Some(&tok) = tokens.get(pos::OPCODE) else { return Ok(insn) };
    insn.opcode = Some(match rev.opcode(class, tok) {
        Some(op) => op,
        None => {
            diag.warn(Warning::UnknownMnemonic { class, mnemonic: tok.to_string() })?;
            0
        }
    });

    let Some(fields) = rev.layout.registers else { return Ok(insn) };
    for (index, (&at, field)) in pos::REGISTERS.iter().zip(fields).enumerate() {
        let Some(&tok) = tokens.get(at) else { return Ok(insn) };
        let value = parse_register(tok)?;
        if !field.fits(value) {
            diag.warn(Warning::RegisterOutOfRange { index, value, max: field.max() })?;
        }
        insn.registers.push(value & field.max());
    }

    let Some(ol) = rev.layout.operand else { return Ok(insn) };
    let Some(&tok) = tokens.get(pos::OPERAND) else { return Ok(insn) };
    let signed_class = known_class && rev.is_signed_class(class);
    insn.operand = Some(if signed_class {
        let set_flags = ol
            .set_flags
            .and_then(|slot| tokens.get(slot.token))
            .map(|&t| t == marker::SET_FLAGS);
        Operand::Signed { signed: tok == marker::SIGNED, set_flags }
    } else {
        let value = parse_unsigned("memory offset", tok)?;
        if ol.offset.fits(value) {
            Operand::Offset(value)
        } else {
            diag.warn(Warning::OffsetOutOfRange(value))?;
            Operand::Offset(0)
        }
    });

    let at = if signed_class { ol.condition_token_signed } else { ol.condition_token_offset };
    let Some(&tok) = tokens.get(at) else { return Ok(insn) };
    insn.condition = Some(if tok.is_empty() {
        0
    } else {
        match rev.condition(tok) {
            Some(c) => c,
            None => {
                diag.warn(Warning::UnknownCondition(tok.to_string()))?;
                0
            }
        }
    });

    let Some(slot) = ol.predicate else { return Ok(insn) };
    if let Some(&tok) = tokens.get(slot.token) {
        insn.predicate = Some(tok == marker::PREDICATE);
    }
    Ok(insn)
}

/// Accepts `-2^31..=2^32-1`; negative values keep their two's complement bits.
fn word32(what: &'static str, literal: &str, v: i64) -> Result<u32, EncodeError> {
    if v < i32::MIN as i64 || v > u32::MAX as i64 {
        return Err(EncodeError::parse(what, literal, "out of 32-bit range"));
    }
    Ok(v as u32)
}

/// Single-precision literal. Spelled-out `inf`/`nan` pass through; finite
/// literals that overflow or flush to zero are rejected.
fn parse_f32(literal: &str) -> Result<f32, EncodeError> {
    let v: f32 = literal
        .parse()
        .map_err(|e| EncodeError::parse("float literal", literal, e))?;
    let body = literal.trim_start_matches(&['+', '-'][..]).to_ascii_lowercase();
    let spelled = matches!(body.as_str(), "inf" | "infinity" | "nan");
    if !spelled && !v.is_finite() {
        return Err(EncodeError::parse("float literal", literal, "overflows f32"));
    }
    let mantissa = body.split('e').next().unwrap_or_default();
    if v == 0.0 && mantissa.chars().any(|c| ('1'..='9').contains(&c)) {
        return Err(EncodeError::parse("float literal", literal, "underflows f32"));
    }
    Ok(v)
}

/// Register operands carry a one-character prefix (`r3`); the rest is the index.
fn parse_register(tok: &str) -> Result<u32, EncodeError> {
    let mut chars = tok.chars();
    chars.next();
    chars
        .as_str()
        .parse()
        .map_err(|e| EncodeError::parse("register operand", tok, e))
}

fn parse_unsigned(what: &'static str, tok: &str) -> Result<u32, EncodeError> {
    tok.parse().map_err(|e| EncodeError::parse(what, tok, e))
}
