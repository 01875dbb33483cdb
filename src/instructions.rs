use serde::{Deserialize, Serialize};

/// Instruction class selected by token 2; gates which operand fields apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrClass {
    Alu,
    Control,
    Memory,
    Float,
}

impl InstrClass {
    pub const ALL: [InstrClass; 4] = [
        InstrClass::Alu,
        InstrClass::Control,
        InstrClass::Memory,
        InstrClass::Float,
    ];

    pub fn from_marker(tok: &str) -> Option<Self> {
        match tok {
            "a" => Some(InstrClass::Alu),
            "c" => Some(InstrClass::Control),
            "m" => Some(InstrClass::Memory),
            "f" => Some(InstrClass::Float),
            _ => None,
        }
    }

    /// Two-bit class code: alu 00, control 01, memory 10, float 11.
    pub const fn code(self) -> u32 {
        match self {
            InstrClass::Alu => 0b00,
            InstrClass::Control => 0b01,
            InstrClass::Memory => 0b10,
            InstrClass::Float => 0b11,
        }
    }
}

/// Mnemonic to opcode pairs for one class.
pub type Mnemonics = &'static [(&'static str, u8)];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct OpcodeTable {
    pub alu: Mnemonics,
    pub memory: Mnemonics,
    pub control: Mnemonics,
}

impl OpcodeTable {
    pub fn for_class(&self, class: InstrClass) -> Mnemonics {
        match class {
            // The FPU path reuses the ALU mnemonics.
            InstrClass::Alu | InstrClass::Float => self.alu,
            InstrClass::Memory => self.memory,
            InstrClass::Control => self.control,
        }
    }

    pub fn lookup(&self, class: InstrClass, mnemonic: &str) -> Option<u8> {
        self.for_class(class)
            .iter()
            .find(|(m, _)| *m == mnemonic)
            .map(|&(_, op)| op)
    }
}

pub const MEMORY_OPS: Mnemonics = &[("lw", 1), ("sw", 2)];

pub const CONTROL_OPS: Mnemonics = &[("jmp", 1), ("hlt", 2), ("int", 3)];
