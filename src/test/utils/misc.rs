use crate::stage2_codegen::tm_ast::{Instruction, Register, RegisterMemoryOpcode as RM};

macro_rules! fail {
    ( $($arg:tt),* ) => {
        panic!($($arg)*)
    };
}
pub(crate) use fail;

/// Where a PC-relative jump at address `at` lands, if `instr` is one.
pub fn jump_target(at: usize, instr: &Instruction) -> Option<usize> {
    let d = match *instr {
        Instruction::RegisterMemory { op: RM::Lda, r: Register::Pc, d, s: Register::Pc } => d,
        Instruction::RegisterMemory { op: RM::Jnz | RM::Jzr, d, s: Register::Pc, .. } => d,
        _ => return None,
    };
    usize::try_from(at as i32 + 1 + d).ok()
}
