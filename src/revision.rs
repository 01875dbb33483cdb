use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::instructions::{InstrClass, OpcodeTable};
use crate::isa;

/// A contiguous bit range inside the 32-bit machine word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Field {
    pub shift: u8,
    pub width: u8,
}

impl Field {
    pub const fn new(shift: u8, width: u8) -> Self {
        Self { shift, width }
    }

    pub const fn bit(shift: u8) -> Self {
        Self { shift, width: 1 }
    }

    /// Unshifted value mask, e.g. `0xF` for a 4-bit field.
    pub const fn max(self) -> u32 {
        if self.width >= 32 { u32::MAX } else { (1u32 << self.width) - 1 }
    }

    /// Mask of the field in word position.
    pub const fn mask(self) -> u32 {
        self.max() << self.shift
    }

    pub const fn fits(self, value: u32) -> bool {
        value <= self.max()
    }

    /// Shift `value` into place. Bits above the field width are dropped.
    pub const fn place(self, value: u32) -> u32 {
        (value & self.max()) << self.shift
    }

    pub const fn flag(self, on: bool) -> u32 {
        self.place(on as u32)
    }
}

/// An optional field fed by its own token position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub token: usize,
    pub field: Field,
}

/// Operand tail (token 7 onwards): signed flag or memory offset, then condition bits.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OperandLayout {
    pub signed: Field,
    pub set_flags: Option<Slot>,
    pub offset: Field,
    pub condition: Field,
    /// Condition token position for classes that carry the signed flag.
    pub condition_token_signed: usize,
    /// Condition token position for offset classes.
    pub condition_token_offset: usize,
    pub predicate: Option<Slot>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Layout {
    pub immediate: Field,
    pub write_enable: Field,
    pub class: Field,
    pub opcode: Field,
    /// `None` when the revision has register operands disabled; encoding stops after the opcode.
    pub registers: Option<[Field; 3]>,
    pub operand: Option<OperandLayout>,
}

/// Token positions shared by every revision.
pub mod pos {
    pub const IMMEDIATE: usize = 0;
    pub const WRITE_ENABLE: usize = 1;
    pub const CLASS: usize = 2;
    pub const OPCODE: usize = 3;
    pub const REGISTERS: [usize; 3] = [4, 5, 6];
    pub const OPERAND: usize = 7;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionId {
    /// Early layout with a set-flags bit and the N/Z/LT/LE condition nibble.
    V1,
    /// Refined layout: extended opcode table, predicate bit.
    #[default]
    V2,
    /// In-progress layout with register operands disabled.
    V3,
}

impl RevisionId {
    pub const ALL: [RevisionId; 3] = [RevisionId::V1, RevisionId::V2, RevisionId::V3];

    pub fn revision(self) -> &'static Revision {
        Revision::get(self)
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RevisionId::V1 => "v1",
            RevisionId::V2 => "v2",
            RevisionId::V3 => "v3",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown ISA revision `{0}` (expected v1, v2 or v3)")]
pub struct UnknownRevision(pub String);

impl FromStr for RevisionId {
    type Err = UnknownRevision;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v1" | "1" | "early" => Ok(RevisionId::V1),
            "v2" | "2" | "refined" => Ok(RevisionId::V2),
            "v3" | "3" | "stripped" => Ok(RevisionId::V3),
            _ => Err(UnknownRevision(s.to_string())),
        }
    }
}

/// Immutable table set describing how tokens pack into a word.
#[derive(Debug, Serialize)]
pub struct Revision {
    pub id: RevisionId,
    pub name: &'static str,
    pub layout: Layout,
    pub opcodes: OpcodeTable,
    /// Condition mnemonic to field-relative value.
    pub conditions: &'static [(&'static str, u8)],
    /// Classes that use the signed flag (and set-flags bit) instead of a memory offset.
    pub signed_classes: &'static [InstrClass],
}

impl Revision {
    pub fn get(id: RevisionId) -> &'static Revision {
        match id {
            RevisionId::V1 => &isa::rev1::REV1,
            RevisionId::V2 => &isa::rev2::REV2,
            RevisionId::V3 => &isa::rev3::REV3,
        }
    }

    pub fn opcode(&self, class: InstrClass, mnemonic: &str) -> Option<u8> {
        self.opcodes.lookup(class, mnemonic)
    }

    pub fn condition(&self, mnemonic: &str) -> Option<u8> {
        self.conditions
            .iter()
            .find(|(m, _)| *m == mnemonic)
            .map(|&(_, c)| c)
    }

    pub fn is_signed_class(&self, class: InstrClass) -> bool {
        self.signed_classes.contains(&class)
    }

    /// Every field an instruction of `class` may touch, in packing order.
    pub fn fields_for(&self, class: InstrClass) -> Vec<Field> {
        let l = &self.layout;
        let mut out = vec![l.immediate, l.write_enable, l.class, l.opcode];
        if let Some(regs) = l.registers {
            out.extend(regs);
        }
        if let Some(op) = l.operand {
            if self.is_signed_class(class) {
                out.push(op.signed);
                if let Some(sf) = op.set_flags {
                    out.push(sf.field);
                }
            } else {
                out.push(op.offset);
            }
            out.push(op.condition);
            if let Some(p) = op.predicate {
                out.push(p.field);
            }
        }
        out
    }
}
