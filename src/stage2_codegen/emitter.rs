use super::tm_ast::*;
use anyhow::{Result, anyhow};

/// An append-only TM instruction stream, with one level of indirection for forward jumps:
///     a slot can be reserved now and filled in (backpatched) once its target is known.
pub trait Emitter {
    fn emit_comment(&mut self, comment: &str);

    fn emit_register_only(
        &mut self,
        op: RegisterOnlyOpcode,
        r: Register,
        s: Register,
        t: Register,
        comment: &str,
    );

    fn emit_register_memory(
        &mut self,
        op: RegisterMemoryOpcode,
        r: Register,
        d: i32,
        s: Register,
        comment: &str,
    );

    /// Emit a placeholder and return its address.
    fn reserve_slot(&mut self) -> Address;

    /// The address the next emitted instruction will occupy.
    fn current_address(&self) -> Address;

    /// Emit `op PC, d(PC)` with the displacement `d` that makes control reach `target`.
    fn emit_absolute_jump(&mut self, op: RegisterMemoryOpcode, target: Address, comment: &str);

    /// Fill the reserved slot at `addr` with an unconditional jump to the current address.
    fn backpatch_jump_to_here(&mut self, addr: Address, comment: &str) -> Result<()>;

    /// Fill the reserved slot at `addr` with `op test_reg, d(PC)` jumping to the current address.
    fn backpatch_conditional_jump_to_here(
        &mut self,
        op: RegisterMemoryOpcode,
        test_reg: Register,
        addr: Address,
        comment: &str,
    ) -> Result<()>;
}

/// PC-relative displacement from the instruction at `from` to `to`.
/// The TM increments PC before executing, hence the `+ 1`.
fn displacement(from: Address, to: Address) -> i32 {
    to.as_word() - (from.as_word() + 1)
}

#[derive(Debug)]
enum Slot {
    Reserved,
    Filled(AnnotatedInstruction),
}

/// In-memory [`Emitter`].
#[derive(Default, Debug)]
pub struct TmCode {
    slots: Vec<Slot>,
    comments: Vec<(Address, String)>,
}
impl TmCode {
    fn push(&mut self, instr: Instruction, comment: &str) {
        let instr = AnnotatedInstruction { instr, comment: comment.to_owned() };
        self.slots.push(Slot::Filled(instr));
    }

    fn patch(&mut self, addr: Address, instr: Instruction, comment: &str) -> Result<()> {
        let slot = self
            .slots
            .get_mut(*addr)
            .ok_or_else(|| anyhow!("Cannot backpatch {addr}; it was never reserved"))?;
        match slot {
            Slot::Reserved => {
                *slot = Slot::Filled(AnnotatedInstruction { instr, comment: comment.to_owned() });
                Ok(())
            }
            Slot::Filled(existing) => Err(anyhow!(
                "Cannot backpatch {addr}; it already holds {existing:?}"
            )),
        }
    }

    pub fn unpatched_addresses(&self) -> Vec<Address> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| match slot {
                Slot::Reserved => Some(Address::from(i)),
                Slot::Filled(_) => None,
            })
            .collect()
    }

    /// Finish the stream. Fails if any reserved slot was never backpatched.
    pub fn into_program(self) -> Result<TmProgram> {
        let unpatched = self.unpatched_addresses();
        if unpatched.is_empty() == false {
            return Err(anyhow!("Reserved slots were never backpatched: {unpatched:?}"));
        }

        let instrs = self
            .slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Filled(instr) => instr,
                Slot::Reserved => unreachable!(),
            })
            .collect();
        Ok(TmProgram { instrs, comments: self.comments })
    }
}
impl Emitter for TmCode {
    fn emit_comment(&mut self, comment: &str) {
        let addr = self.current_address();
        self.comments.push((addr, comment.to_owned()));
    }

    fn emit_register_only(
        &mut self,
        op: RegisterOnlyOpcode,
        r: Register,
        s: Register,
        t: Register,
        comment: &str,
    ) {
        self.push(Instruction::RegisterOnly { op, r, s, t }, comment);
    }

    fn emit_register_memory(
        &mut self,
        op: RegisterMemoryOpcode,
        r: Register,
        d: i32,
        s: Register,
        comment: &str,
    ) {
        self.push(Instruction::RegisterMemory { op, r, d, s }, comment);
    }

    fn reserve_slot(&mut self) -> Address {
        let addr = self.current_address();
        self.slots.push(Slot::Reserved);
        addr
    }

    fn current_address(&self) -> Address {
        Address::from(self.slots.len())
    }

    fn emit_absolute_jump(&mut self, op: RegisterMemoryOpcode, target: Address, comment: &str) {
        let d = displacement(self.current_address(), target);
        self.emit_register_memory(op, Register::Pc, d, Register::Pc, comment);
    }

    fn backpatch_jump_to_here(&mut self, addr: Address, comment: &str) -> Result<()> {
        let d = displacement(addr, self.current_address());
        let instr = Instruction::RegisterMemory {
            op: RegisterMemoryOpcode::Lda,
            r: Register::Pc,
            d,
            s: Register::Pc,
        };
        self.patch(addr, instr, comment)
    }

    fn backpatch_conditional_jump_to_here(
        &mut self,
        op: RegisterMemoryOpcode,
        test_reg: Register,
        addr: Address,
        comment: &str,
    ) -> Result<()> {
        let d = displacement(addr, self.current_address());
        let instr = Instruction::RegisterMemory { op, r: test_reg, d, s: Register::Pc };
        self.patch(addr, instr, comment)
    }
}
