use super::CodeGenerator;
use crate::{
    stage1_tree::annotated_ast::*,
    stage2_codegen::{emitter::Emitter, tm_ast::*},
};
use anyhow::Result;

use Register as R;
use RegisterMemoryOpcode as RM;

/// Statement - conditional
impl<E: Emitter> CodeGenerator<E> {
    pub(super) fn gen_stmt_conditional(&mut self, If { condition, then, elze }: &If) -> Result<()> {
        self.comment("IF");
        self.gen_exp(condition)?;

        self.comment("THEN");
        let then_jump = self.emitter.reserve_slot();
        self.gen_stmt(then)?;

        match elze {
            None => {
                self.emitter.backpatch_conditional_jump_to_here(
                    RM::Jzr,
                    R::Ac,
                    then_jump,
                    "Jump past THEN if false [BACKPATCH]",
                )?;
            }
            Some(elze) => {
                let else_jump = self.emitter.reserve_slot();
                self.emitter.backpatch_conditional_jump_to_here(
                    RM::Jzr,
                    R::Ac,
                    then_jump,
                    "Jump past THEN if false [BACKPATCH]",
                )?;

                self.comment("ELSE");
                self.gen_stmt(elze)?;
                self.emitter
                    .backpatch_jump_to_here(else_jump, "Jump around the ELSE [BACKPATCH]")?;
            }
        }

        self.comment("END IF");
        Ok(())
    }
}
