//! Early revision: set-flags bit, N/Z/LT/LE condition nibble, no predicate.

use bitflags::bitflags;

use super::{CLASS, IMMEDIATE, OFFSET, OPCODE, REGISTERS, SIGNED, WRITE_ENABLE};
use crate::instructions::{InstrClass, Mnemonics, OpcodeTable, CONTROL_OPS, MEMORY_OPS};
use crate::revision::{Field, Layout, OperandLayout, Revision, RevisionId, Slot};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Cond: u8 {
        const LE = 1 << 0;
        const LT = 1 << 1;
        const Z = 1 << 2;
        const N = 1 << 3; // negate
    }
}

pub const ALU_OPS: Mnemonics = &[
    ("nop", 0),
    ("shl", 1),
    ("shr", 2),
    ("mov", 3),
    ("add", 4),
    ("adc", 5),
    ("sub", 6),
    ("sbc", 7),
    ("and", 8),
    ("or", 9),
    ("not", 10),
    ("xor", 11),
    ("mfh", 12),
    ("mul", 15),
];

pub const CONDITIONS: &[(&str, u8)] = &[
    ("z", Cond::Z.bits()),
    ("eq", Cond::Z.bits()),
    ("nz", Cond::N.union(Cond::Z).bits()),
    ("ne", Cond::N.union(Cond::Z).bits()),
    ("lt", Cond::LT.bits()),
    ("gt", Cond::N.union(Cond::LE).bits()),
    ("ge", Cond::N.union(Cond::LT).bits()),
    ("le", Cond::LE.bits()),
];

pub static REV1: Revision = Revision {
    id: RevisionId::V1,
    name: "early",
    layout: Layout {
        immediate: IMMEDIATE,
        write_enable: WRITE_ENABLE,
        class: CLASS,
        opcode: OPCODE,
        registers: Some(REGISTERS),
        operand: Some(OperandLayout {
            signed: SIGNED,
            set_flags: Some(Slot { token: 8, field: Field::bit(10) }),
            offset: OFFSET,
            condition: Field::new(0, 4),
            condition_token_signed: 10,
            condition_token_offset: 9,
            predicate: None,
        }),
    },
    opcodes: OpcodeTable { alu: ALU_OPS, memory: MEMORY_OPS, control: CONTROL_OPS },
    conditions: CONDITIONS,
    signed_classes: &[InstrClass::Alu],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_nibbles() {
        let rev = &REV1;
        assert_eq!(rev.condition("eq"), Some(4));
        assert_eq!(rev.condition("nz"), Some(12));
        assert_eq!(rev.condition("gt"), Some(9));
        assert_eq!(rev.condition("ge"), Some(10));
        assert_eq!(rev.condition("le"), Some(1));
        assert_eq!(rev.condition("al"), None);
    }

    #[test]
    fn opcodes() {
        assert_eq!(REV1.opcode(InstrClass::Alu, "mov"), Some(3));
        assert_eq!(REV1.opcode(InstrClass::Alu, "mul"), Some(15));
        assert_eq!(REV1.opcode(InstrClass::Alu, "cmp"), None);
    }
}
