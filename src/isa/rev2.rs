//! Refined revision: extended opcode table, dense condition bits 3..1 and a predicate bit.

use bitflags::bitflags;

use super::{CLASS, IMMEDIATE, OFFSET, OPCODE, REGISTERS, SIGNED, WRITE_ENABLE};
use crate::instructions::{InstrClass, Mnemonics, OpcodeTable, CONTROL_OPS, MEMORY_OPS};
use crate::revision::{Field, Layout, OperandLayout, Revision, RevisionId, Slot};

bitflags! {
    /// Condition components, relative to the condition field (word bits 3..1).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Cond: u8 {
        const LESS = 1 << 0;
        const EQUAL = 1 << 1;
        const INVERT = 1 << 2;
    }
}

pub const ALU_OPS: Mnemonics = &[
    ("nop", 0),
    ("mov", 1),
    ("add", 2),
    ("sub", 3),
    ("adc", 4),
    ("cmp", 5),
    ("and", 6),
    ("or", 7),
    ("not", 8),
    ("xor", 9),
    ("shl", 10),
    ("shr", 11),
    ("mul", 12),
];

// In word position: eq 4, ne 12, lt 2, le 6, gt 10, ge 0.
// `ge` has no encoding in this revision and collapses to the unconditional pattern.
pub const CONDITIONS: &[(&str, u8)] = &[
    ("eq", Cond::EQUAL.bits()),
    ("z", Cond::EQUAL.bits()),
    ("ne", Cond::INVERT.union(Cond::EQUAL).bits()),
    ("nz", Cond::INVERT.union(Cond::EQUAL).bits()),
    ("lt", Cond::LESS.bits()),
    ("le", Cond::EQUAL.union(Cond::LESS).bits()),
    ("gt", Cond::INVERT.union(Cond::LESS).bits()),
    ("ge", Cond::empty().bits()),
];

pub const OPERAND: OperandLayout = OperandLayout {
    signed: SIGNED,
    set_flags: None,
    offset: OFFSET,
    condition: Field::new(1, 3),
    condition_token_signed: 8,
    condition_token_offset: 8,
    predicate: Some(Slot { token: 9, field: Field::bit(0) }),
};

pub static REV2: Revision = Revision {
    id: RevisionId::V2,
    name: "refined",
    layout: Layout {
        immediate: IMMEDIATE,
        write_enable: WRITE_ENABLE,
        class: CLASS,
        opcode: OPCODE,
        registers: Some(REGISTERS),
        operand: Some(OPERAND),
    },
    opcodes: OpcodeTable { alu: ALU_OPS, memory: MEMORY_OPS, control: CONTROL_OPS },
    conditions: CONDITIONS,
    signed_classes: &[InstrClass::Alu, InstrClass::Control],
};
