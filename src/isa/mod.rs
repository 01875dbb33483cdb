//! Per-revision tables. Fields common to every revision live here.

use crate::revision::Field;

pub mod rev1; // early layout
pub mod rev2; // refined layout, default
pub mod rev3; // registers disabled

pub const IMMEDIATE: Field = Field::bit(31);
pub const WRITE_ENABLE: Field = Field::bit(30);
pub const CLASS: Field = Field::new(28, 2);
pub const OPCODE: Field = Field::new(24, 4);
pub const REGISTERS: [Field; 3] = [Field::new(20, 4), Field::new(16, 4), Field::new(12, 4)];
pub const SIGNED: Field = Field::bit(11);
/// Memory offset, bits 11..4; only values up to 255 are written.
pub const OFFSET: Field = Field::new(4, 8);
