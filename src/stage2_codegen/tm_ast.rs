use derivative::Derivative;
use derive_more::{Deref, Display, From};

/// The TM register file. Fixed by the calling convention; never allocated.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Register {
    /// Base of the global area.
    Gp = 0,
    /// Base of the active frame.
    Fp = 1,
    /// Return value.
    Rt = 2,
    /// The accumulator.
    Ac = 3,
    Ac1 = 4,
    Ac2 = 5,
    Pc = 7,
}
impl Register {
    /// Fills an operand position that the opcode ignores.
    pub const NONE: Self = Self::Gp;

    pub const COUNT: usize = 8;

    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Index of an instruction in TM instruction memory.
#[derive(Deref, Display, From, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Address(usize);
impl Address {
    pub fn as_word(self) -> i32 {
        self.0 as i32
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RegisterOnlyOpcode {
    Halt,
    /* I/O */
    In,
    InB,
    InC,
    Out,
    OutB,
    OutC,
    OutNl,
    /* r = s op t */
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    /* r = (s op t) ? 1 : 0 */
    Teq,
    Tne,
    Tlt,
    Tle,
    Tgt,
    Tge,
    /* r = random in [0, |s|) */
    Rnd,
}
impl RegisterOnlyOpcode {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Halt => "HALT",
            Self::In => "IN",
            Self::InB => "INB",
            Self::InC => "INC",
            Self::Out => "OUT",
            Self::OutB => "OUTB",
            Self::OutC => "OUTC",
            Self::OutNl => "OUTNL",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Teq => "TEQ",
            Self::Tne => "TNE",
            Self::Tlt => "TLT",
            Self::Tle => "TLE",
            Self::Tgt => "TGT",
            Self::Tge => "TGE",
            Self::Rnd => "RND",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RegisterMemoryOpcode {
    /// r = dMem[d + s]
    Ld,
    /// r = d + s
    Lda,
    /// r = d
    Ldc,
    /// dMem[d + s] = r
    St,
    /// if r != 0 { pc = d + s }
    Jnz,
    /// if r == 0 { pc = d + s }
    Jzr,
}
impl RegisterMemoryOpcode {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Ld => "LD",
            Self::Lda => "LDA",
            Self::Ldc => "LDC",
            Self::St => "ST",
            Self::Jnz => "JNZ",
            Self::Jzr => "JZR",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Instruction {
    RegisterOnly {
        op: RegisterOnlyOpcode,
        r: Register,
        s: Register,
        t: Register,
    },
    RegisterMemory {
        op: RegisterMemoryOpcode,
        r: Register,
        d: i32,
        s: Register,
    },
}

/// Comments are for human readers of the listing; they never affect equality.
#[derive(Derivative, Clone, Debug)]
#[derivative(PartialEq, Eq)]
pub struct AnnotatedInstruction {
    pub instr: Instruction,
    #[derivative(PartialEq = "ignore")]
    pub comment: String,
}

/// A finished instruction stream: every slot holds an instruction.
#[derive(Debug)]
pub struct TmProgram {
    pub instrs: Vec<AnnotatedInstruction>,
    /// Stand-alone comment lines, each preceding the instruction at its address.
    pub comments: Vec<(Address, String)>,
}
