use super::{CodeGenerator, base_reg};
use crate::{
    stage1_tree::annotated_ast::*,
    stage2_codegen::{emitter::Emitter, tm_ast::*},
};
use anyhow::Result;

use Register as R;
use RegisterMemoryOpcode as RM;
use RegisterOnlyOpcode as RO;

impl<E: Emitter> CodeGenerator<E> {
    /// The assigned value is left in `AC`, so that assignments can be nested.
    pub(super) fn gen_exp_assignment(&mut self, Assignment { lhs, op }: &Assignment) -> Result<()> {
        self.comment("ASSIGN");

        /* Address in `AC1` (elements only) and current value in `AC`. */

        match lhs {
            LValue::Var(Variable { ident, mem, .. }) => {
                let base = base_reg(mem.storage_base());
                self.emit_rm(RM::Ld, R::Ac, mem.offset, base, &format!("Load variable {ident}"));
            }
            LValue::Element(subscript) => {
                self.gen_element_addr(subscript)?;
                self.emit_rm(RM::Ld, R::Ac, 0, R::Ac1, "OP [");
            }
        }

        let addr_slot = self.temps.push();
        self.emit_rm(RM::St, R::Ac1, addr_slot, R::Fp, "Store address");
        self.spill_ac("Store value");

        /* New value in `AC`. */

        match op {
            AssignmentOperator::Assign(rhs) => {
                self.gen_exp(rhs)?;
                self.temps.pop();
            }
            AssignmentOperator::Update(update_op, rhs) => {
                self.gen_exp(rhs)?;
                self.reload(R::Ac1, "Load value");
                let (ro_op, comment) = match update_op {
                    UpdateOperator::Add => (RO::Add, "ADD for OP +="),
                    UpdateOperator::Sub => (RO::Sub, "SUB for OP -="),
                    UpdateOperator::Mul => (RO::Mul, "MUL for OP *="),
                    UpdateOperator::Div => (RO::Div, "DIV for OP /="),
                };
                self.emit_ro(ro_op, R::Ac, R::Ac1, R::Ac, comment);
            }
            AssignmentOperator::Increment => {
                self.reload(R::Ac1, "Load value");
                self.load_const(R::Ac, 1, "Load integer constant");
                self.emit_ro(RO::Add, R::Ac, R::Ac1, R::Ac, "ADD for OP ++");
            }
            AssignmentOperator::Decrement => {
                self.reload(R::Ac1, "Load value");
                self.load_const(R::Ac, 1, "Load integer constant");
                self.emit_ro(RO::Sub, R::Ac, R::Ac1, R::Ac, "SUB for OP --");
            }
        }

        /* Store back. */

        match lhs {
            LValue::Var(Variable { ident, mem, .. }) => {
                self.temps.pop();
                let base = base_reg(mem.storage_base());
                self.emit_rm(RM::St, R::Ac, mem.offset, base, &format!("Store variable {ident}"));
            }
            LValue::Element(Subscript { array, .. }) => {
                self.reload(R::Ac1, "Load address");
                self.emit_rm(
                    RM::St,
                    R::Ac,
                    0,
                    R::Ac1,
                    &format!("Store element in array {}", array.ident),
                );
            }
        }

        self.comment("END ASSIGN");
        Ok(())
    }
}
