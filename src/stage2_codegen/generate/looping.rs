use super::CodeGenerator;
use crate::{
    stage1_tree::annotated_ast::*,
    stage2_codegen::{emitter::Emitter, tm_ast::*},
};
use anyhow::{Result, anyhow};

use Register as R;
use RegisterMemoryOpcode as RM;

/// One registry of pending `break` jumps per enclosing loop, innermost last.
#[derive(Default, Debug)]
pub(super) struct BreakTargets {
    stack: Vec<Vec<Address>>,
}
impl BreakTargets {
    fn open(&mut self) {
        self.stack.push(vec![]);
    }
    fn close(&mut self) -> Vec<Address> {
        self.stack.pop().unwrap_or_default()
    }
    fn record(&mut self, addr: Address) -> Result<()> {
        match self.stack.last_mut() {
            Some(registry) => {
                registry.push(addr);
                Ok(())
            }
            None => Err(anyhow!("`break` outside of any loop, at {addr}")),
        }
    }
    fn is_in_loop(&self) -> bool {
        self.stack.is_empty() == false
    }
}

/// Statement - loop
impl<E: Emitter> CodeGenerator<E> {
    pub(super) fn gen_stmt_while(&mut self, wile: &While) -> Result<()> {
        self.comment("WHILE");

        self.break_targets.open();
        let loop_result = self.gen_stmt_while_inner(wile);
        let breaks = self.break_targets.close();
        loop_result?;

        for addr in breaks {
            self.emitter
                .backpatch_jump_to_here(addr, "BREAK out of WHILE [BACKPATCH]")?;
        }

        self.comment("END WHILE");
        Ok(())
    }

    fn gen_stmt_while_inner(&mut self, While { condition, body }: &While) -> Result<()> {
        let loop_addr = self.emitter.current_address();
        self.gen_exp(condition)?;
        self.emit_rm(RM::Jnz, R::Ac, 1, R::Pc, "Jump to DO");

        let exit_jump = self.emitter.reserve_slot();

        self.comment("DO");
        self.gen_stmt(body)?;
        self.emitter
            .emit_absolute_jump(RM::Lda, loop_addr, "Go to WHILE");

        self.emitter
            .backpatch_jump_to_here(exit_jump, "Jump past WHILE [BACKPATCH]")
    }

    /// Jumps to just past the innermost enclosing loop; resolved when that loop is closed.
    pub(super) fn gen_stmt_break(&mut self) -> Result<()> {
        if self.break_targets.is_in_loop() == false {
            return Err(anyhow!(
                "`break` outside of any loop, in {:?}",
                self.current_fun
            ));
        }
        let addr = self.emitter.reserve_slot();
        self.break_targets.record(addr)
    }
}
