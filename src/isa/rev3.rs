//! Stripped revision: registers disabled, only flags, class and opcode are encoded.

use super::{rev2, CLASS, IMMEDIATE, OPCODE, WRITE_ENABLE};
use crate::instructions::{OpcodeTable, CONTROL_OPS, MEMORY_OPS};
use crate::revision::{Layout, Revision, RevisionId};

pub static REV3: Revision = Revision {
    id: RevisionId::V3,
    name: "stripped",
    layout: Layout {
        immediate: IMMEDIATE,
        write_enable: WRITE_ENABLE,
        class: CLASS,
        opcode: OPCODE,
        registers: None,
        operand: None,
    },
    opcodes: OpcodeTable { alu: rev2::ALU_OPS, memory: MEMORY_OPS, control: CONTROL_OPS },
    conditions: &[],
    signed_classes: &[],
};
