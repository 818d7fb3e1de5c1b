//! A TM interpreter, enough to run generated programs end to end.

use crate::stage2_codegen::tm_ast::{
    Instruction, Register, RegisterMemoryOpcode as RM, RegisterOnlyOpcode as RO, TmProgram,
};
use anyhow::{Result, anyhow};
use std::collections::VecDeque;

pub const DATA_MEM_SIZE: usize = 1024;
const STEP_LIMIT: usize = 200_000;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Output {
    Int(i32),
    Bool(bool),
    Char(char),
    Newline,
}

pub struct Machine<'a> {
    instrs: Vec<&'a Instruction>,
    reg: [i32; Register::COUNT],
    d_mem: Vec<i32>,
    input: VecDeque<i32>,
    output: Vec<Output>,
    rng: u32,
}
impl<'a> Machine<'a> {
    pub fn new(prog: &'a TmProgram, input: impl IntoIterator<Item = i32>) -> Self {
        let mut d_mem = vec![0; DATA_MEM_SIZE];
        d_mem[0] = DATA_MEM_SIZE as i32 - 1;
        Self {
            instrs: prog.instrs.iter().map(|a_instr| &a_instr.instr).collect(),
            reg: [0; Register::COUNT],
            d_mem,
            input: input.into_iter().collect(),
            output: vec![],
            rng: 0x2545_f491,
        }
    }

    pub fn reg(&self, r: Register) -> i32 {
        self.reg[r.number() as usize]
    }
    pub fn d_mem(&self, addr: i32) -> Result<i32> {
        let i = self.d_addr(addr)?;
        Ok(self.d_mem[i])
    }

    /// Run until `HALT`.
    pub fn run(mut self) -> Result<Vec<Output>> {
        for _ in 0..STEP_LIMIT {
            if self.step()? == false {
                return Ok(self.output);
            }
        }
        Err(anyhow!("No HALT within {STEP_LIMIT} steps. {:?}", self.output))
    }

    /// Returns whether to keep running.
    fn step(&mut self) -> Result<bool> {
        let pc = self.reg(Register::Pc);
        let instr = *usize::try_from(pc)
            .ok()
            .and_then(|pc| self.instrs.get(pc))
            .ok_or_else(|| anyhow!("PC out of instruction memory: {pc}"))?;
        self.set(Register::Pc, pc + 1);

        match *instr {
            Instruction::RegisterOnly { op, r, s, t } => {
                let (vr, vs, vt) = (self.reg(r), self.reg(s), self.reg(t));
                match op {
                    RO::Halt => return Ok(false),
                    RO::In | RO::InB | RO::InC => {
                        let val = self
                            .input
                            .pop_front()
                            .ok_or_else(|| anyhow!("Input exhausted at {pc}"))?;
                        self.set(r, val);
                    }
                    RO::Out => self.output.push(Output::Int(vr)),
                    RO::OutB => self.output.push(Output::Bool(vr != 0)),
                    RO::OutC => {
                        let c = u32::try_from(vr)
                            .ok()
                            .and_then(char::from_u32)
                            .ok_or_else(|| anyhow!("Not a character: {vr}"))?;
                        self.output.push(Output::Char(c));
                    }
                    RO::OutNl => self.output.push(Output::Newline),
                    RO::Add => self.set(r, vs.wrapping_add(vt)),
                    RO::Sub => self.set(r, vs.wrapping_sub(vt)),
                    RO::Mul => self.set(r, vs.wrapping_mul(vt)),
                    RO::Div => {
                        if vt == 0 {
                            return Err(anyhow!("Division by zero at {pc}"));
                        }
                        self.set(r, vs.wrapping_div(vt));
                    }
                    RO::And => self.set(r, vs & vt),
                    RO::Or => self.set(r, vs | vt),
                    RO::Teq => self.set(r, (vs == vt) as i32),
                    RO::Tne => self.set(r, (vs != vt) as i32),
                    RO::Tlt => self.set(r, (vs < vt) as i32),
                    RO::Tle => self.set(r, (vs <= vt) as i32),
                    RO::Tgt => self.set(r, (vs > vt) as i32),
                    RO::Tge => self.set(r, (vs >= vt) as i32),
                    RO::Rnd => {
                        let bound = vs.unsigned_abs();
                        let val = match bound {
                            0 => 0,
                            _ => (self.next_random() % bound) as i32,
                        };
                        self.set(r, val);
                    }
                }
            }
            Instruction::RegisterMemory { op, r, d, s } => {
                let ea = d + self.reg(s);
                match op {
                    RM::Ld => {
                        let val = self.d_mem(ea)?;
                        self.set(r, val);
                    }
                    RM::Lda => self.set(r, ea),
                    RM::Ldc => self.set(r, d),
                    RM::St => {
                        let i = self.d_addr(ea)?;
                        let val = self.reg(r);
                        self.d_mem[i] = val;
                    }
                    RM::Jnz => {
                        if self.reg(r) != 0 {
                            self.set(Register::Pc, ea);
                        }
                    }
                    RM::Jzr => {
                        if self.reg(r) == 0 {
                            self.set(Register::Pc, ea);
                        }
                    }
                }
            }
        }
        Ok(true)
    }

    fn set(&mut self, r: Register, val: i32) {
        self.reg[r.number() as usize] = val;
    }

    fn d_addr(&self, addr: i32) -> Result<usize> {
        usize::try_from(addr)
            .ok()
            .filter(|i| *i < self.d_mem.len())
            .ok_or_else(|| anyhow!("Data address out of range: {addr}"))
    }

    /* xorshift32; reproducible across runs. */
    fn next_random(&mut self) -> u32 {
        let mut x = self.rng;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng = x;
        x
    }
}
