use super::{CodeGenerator, base_reg};
use crate::{
    common::memory::{ArrayAddressing, StorageBase},
    stage1_tree::annotated_ast::*,
    stage2_codegen::{emitter::Emitter, tm_ast::*},
};
use anyhow::Result;

use Register as R;
use RegisterMemoryOpcode as RM;
use RegisterOnlyOpcode as RO;

/// Expression
impl<E: Emitter> CodeGenerator<E> {
    /// Generate `exp`, leaving its value in `AC`.
    pub(super) fn gen_exp(&mut self, exp: &Expression) -> Result<()> {
        match exp {
            Expression::Const(konst) => {
                let comment = format!("Load {} constant", konst.descr());
                self.load_const(R::Ac, konst.as_word(), &comment);
            }
            Expression::Var(var) => self.gen_exp_var(var),
            Expression::Operator(op) => {
                let temps_before = self.temps.offset();
                self.gen_exp_operator(op)?;
                debug_assert_eq!(temps_before, self.temps.offset(), "Unbalanced {op:?}");
            }
            Expression::Assignment(assign) => {
                let temps_before = self.temps.offset();
                self.gen_exp_assignment(assign)?;
                debug_assert_eq!(temps_before, self.temps.offset(), "Unbalanced {assign:?}");
            }
            Expression::Call(call) => self.gen_exp_call(call)?,
        }
        Ok(())
    }

    /// An array-typed identifier evaluates to the address of its element `0`.
    fn gen_exp_var(&mut self, Variable { ident, is_array, mem, .. }: &Variable) {
        let base = base_reg(mem.storage_base());
        if *is_array {
            let comment = format!("Load address of array {ident}");
            match mem.array_addressing() {
                ArrayAddressing::Indirect { ptr_offset } => {
                    self.emit_rm(RM::Ld, R::Ac, ptr_offset, base, &comment)
                }
                ArrayAddressing::Direct { offset, .. } => {
                    self.emit_rm(RM::Lda, R::Ac, offset, base, &comment)
                }
            }
        } else {
            self.emit_rm(RM::Ld, R::Ac, mem.offset, base, &format!("Load variable {ident}"));
        }
    }

    fn gen_exp_operator(&mut self, op: &Operator) -> Result<()> {
        match op {
            Operator::Unary(unary) => self.gen_exp_unary(unary)?,
            Operator::Binary(binary) => self.gen_exp_binary(binary)?,
            Operator::Subscript(subscript) => {
                self.gen_element_addr(subscript)?;
                self.emit_rm(RM::Ld, R::Ac, 0, R::Ac1, "OP [");
            }
            Operator::SizeOf(array) => self.gen_exp_sizeof(array),
        }
        Ok(())
    }
}

/// Unary and binary
impl<E: Emitter> CodeGenerator<E> {
    fn gen_exp_unary(&mut self, Unary { op, operand }: &Unary) -> Result<()> {
        self.gen_exp(operand)?;
        self.spill_ac("Store LHS");
        self.reload(R::Ac, "Load LHS");

        match op {
            UnaryOperator::Negate => {
                self.load_const(R::Ac1, -1, "Load integer constant");
                self.emit_ro(RO::Mul, R::Ac, R::Ac, R::Ac1, "UNARY OP -");
            }
            UnaryOperator::Not => {
                self.load_const(R::Ac1, 0, "Load integer constant");
                self.emit_ro(RO::Teq, R::Ac, R::Ac, R::Ac1, "UNARY OP not");
            }
            UnaryOperator::Random => {
                self.emit_ro(RO::Rnd, R::Ac, R::Ac, R::NONE, "UNARY OP ?");
            }
        }
        Ok(())
    }

    fn gen_exp_binary(&mut self, Binary { op, lhs, rhs }: &Binary) -> Result<()> {
        /* Begin instructions */

        self.gen_exp(lhs)?;
        self.spill_ac("Store LHS");

        self.gen_exp(rhs)?;
        self.spill_ac("Store RHS");

        self.reload(R::Ac1, "Load RHS");
        self.reload(R::Ac, "Load LHS");

        let (ro_op, comment) = match op {
            BinaryOperator::Add => (RO::Add, "OP +"),
            BinaryOperator::Sub => (RO::Sub, "OP -"),
            BinaryOperator::Mul => (RO::Mul, "OP *"),
            BinaryOperator::Div => (RO::Div, "OP /"),
            BinaryOperator::Rem => {
                /* a % b == a - (a / b) * b */
                self.emit_ro(RO::Div, R::Ac2, R::Ac, R::Ac1, "OP %");
                self.emit_ro(RO::Mul, R::Ac2, R::Ac2, R::Ac1, "OP %");
                self.emit_ro(RO::Sub, R::Ac, R::Ac, R::Ac2, "OP %");
                return Ok(());
            }
            BinaryOperator::And => (RO::And, "OP and"),
            BinaryOperator::Or => (RO::Or, "OP or"),
            BinaryOperator::Eq => (RO::Teq, "OP =="),
            BinaryOperator::Neq => (RO::Tne, "OP !="),
            BinaryOperator::Lt => (RO::Tlt, "OP <"),
            BinaryOperator::Lte => (RO::Tle, "OP <="),
            BinaryOperator::Gt => (RO::Tgt, "OP >"),
            BinaryOperator::Gte => (RO::Tge, "OP >="),
        };
        self.emit_ro(ro_op, R::Ac, R::Ac, R::Ac1, comment);

        Ok(())
    }
}

/// Arrays
impl<E: Emitter> CodeGenerator<E> {
    fn gen_exp_sizeof(&mut self, Variable { ident, mem, .. }: &Variable) {
        match mem.array_addressing() {
            ArrayAddressing::Indirect { ptr_offset } => {
                let comment = format!("Load address of array {ident}");
                self.emit_rm(RM::Ld, R::Ac, ptr_offset, R::Fp, &comment);
                self.load_const(R::Ac1, 1, "Load integer constant");
                self.emit_ro(RO::Add, R::Ac, R::Ac, R::Ac1, "Find address of size");
                self.emit_rm(RM::Ld, R::Ac, 0, R::Ac, "UNARY OP *");
            }
            ArrayAddressing::Direct { base, .. } => {
                self.emit_rm(RM::Ld, R::Ac, mem.array_size_offset(), base_reg(base), "UNARY OP *");
            }
        }
    }

    /// Generate the index, then leave the element's address in `AC1`. `AC` is clobbered.
    pub(super) fn gen_element_addr(
        &mut self,
        Subscript { array, index }: &Subscript,
    ) -> Result<()> {
        self.gen_exp(index)?;

        match array.mem.array_addressing() {
            ArrayAddressing::Indirect { ptr_offset } => {
                self.gen_indirect_element_addr(&array.ident, ptr_offset)
            }
            ArrayAddressing::Direct { base, offset } => {
                self.gen_direct_element_addr(&array.ident, base, offset)
            }
        }
        Ok(())
    }
    /// The frame slot holds the runtime address of element `0`; elements grow downward from there.
    fn gen_indirect_element_addr(&mut self, ident: &RawIdentifier, ptr_offset: i32) {
        self.emit_rm(RM::Ld, R::Ac1, ptr_offset, R::Fp, &format!("Load address of array {ident}"));
        self.emit_ro(RO::Sub, R::Ac1, R::Ac1, R::Ac, "Find address of element");
    }
    /// `base + offset - index`
    fn gen_direct_element_addr(&mut self, ident: &RawIdentifier, base: StorageBase, offset: i32) {
        self.load_const(R::Ac1, offset, &format!("Load offset of array {ident}"));
        self.emit_ro(RO::Sub, R::Ac1, R::Ac1, R::Ac, "Find offset of element");
        let comment = format!("Find base address of array {ident}");
        self.emit_rm(RM::Lda, R::Ac, 0, base_reg(base), &comment);
        self.emit_ro(RO::Add, R::Ac1, R::Ac1, R::Ac, "Find address of element");
    }
}
