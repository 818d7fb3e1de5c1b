use super::CodeGenerator;
use crate::{
    common::memory::{FRAME_LINKAGE_SLOTS, RETURN_ADDR_OFFSET, SELF_LINK_OFFSET},
    stage1_tree::annotated_ast::*,
    stage2_codegen::{emitter::Emitter, temp_cursor::TempCursor, tm_ast::*},
};
use anyhow::{Result, anyhow};

use Register as R;
use RegisterMemoryOpcode as RM;
use RegisterOnlyOpcode as RO;

/// Library functions whose bodies are a single TM I/O instruction.
#[derive(Clone, Copy, Debug)]
enum Intrinsic {
    Input,
    InputB,
    InputC,
    Output,
    OutputB,
    OutputC,
    OutNl,
}
impl Intrinsic {
    fn from_ident(ident: &RawIdentifier) -> Option<Self> {
        let intrinsic = match ident.as_str() {
            "input" => Self::Input,
            "inputb" => Self::InputB,
            "inputc" => Self::InputC,
            "output" => Self::Output,
            "outputb" => Self::OutputB,
            "outputc" => Self::OutputC,
            "outnl" => Self::OutNl,
            _ => return None,
        };
        Some(intrinsic)
    }
}

/// Function declaration
impl<E: Emitter> CodeGenerator<E> {
    pub(super) fn gen_fun(&mut self, fun: &FunctionDecl) -> Result<()> {
        let FunctionDecl { ident, mem, params, body, .. } = fun;

        log::debug!("Generating function {ident} with frame size {}.", mem.size);

        let fun_addr = self.emitter.current_address();
        self.fun_addrs.insert(ident.clone(), fun_addr);

        for call_jump in self.pending_calls.remove(ident).unwrap_or_default() {
            self.emitter
                .backpatch_jump_to_here(call_jump, &format!("CALL {ident} [BACKPATCH]"))?;
        }

        self.comment(&format!("FUNCTION {ident}"));
        self.emit_rm(RM::St, R::Ac, RETURN_ADDR_OFFSET, R::Fp, "Store return address");

        match Intrinsic::from_ident(ident) {
            Some(intrinsic) => self.gen_intrinsic_body(ident, intrinsic, params)?,
            None => {
                if ident == &self.entry_ident {
                    self.entry_addr = Some(fun_addr);
                }
                self.current_fun = Some(ident.clone());
                self.temps = TempCursor::new(mem.size);

                if let Some(block) = body {
                    self.gen_block(block)?;
                }

                debug_assert!(self.temps.is_balanced(), "{ident} left temporaries behind.");

                self.comment(&format!("FUNCTION CLOSE {ident}"));
                self.load_const(R::Rt, 0, "Set return value to 0");
                self.gen_return_linkage();
            }
        }

        self.comment(&format!("END FUNCTION {ident}"));

        self.current_fun = None;
        self.temps = Self::top_level_temps();
        Ok(())
    }

    fn gen_intrinsic_body(
        &mut self,
        ident: &RawIdentifier,
        intrinsic: Intrinsic,
        params: &[VarDecl],
    ) -> Result<()> {
        let (op, comment) = match intrinsic {
            Intrinsic::Input => (RO::In, "Grab int input"),
            Intrinsic::InputB => (RO::InB, "Grab bool input"),
            Intrinsic::InputC => (RO::InC, "Grab char input"),
            Intrinsic::Output => (RO::Out, "Output int"),
            Intrinsic::OutputB => (RO::OutB, "Output bool"),
            Intrinsic::OutputC => (RO::OutC, "Output char"),
            Intrinsic::OutNl => (RO::OutNl, "Output newline"),
        };

        match intrinsic {
            Intrinsic::Input | Intrinsic::InputB | Intrinsic::InputC => {
                self.emit_ro(op, R::Rt, R::NONE, R::NONE, comment);
            }
            Intrinsic::Output | Intrinsic::OutputB | Intrinsic::OutputC => {
                let param = params.first().ok_or_else(|| {
                    anyhow!("Intrinsic {ident} is declared without its parameter.")
                })?;
                self.emit_rm(RM::Ld, R::Ac, param.mem.offset, R::Fp, "Load parameter");
                self.emit_ro(op, R::Ac, R::NONE, R::NONE, comment);
                self.load_const(R::Rt, 0, "Set return value to 0");
            }
            Intrinsic::OutNl => {
                self.emit_ro(op, R::NONE, R::NONE, R::NONE, comment);
            }
        }

        self.gen_return_linkage();
        Ok(())
    }

    fn gen_return_linkage(&mut self) {
        self.emit_rm(RM::Ld, R::Ac, RETURN_ADDR_OFFSET, R::Fp, "Load return address");
        self.emit_rm(RM::Ld, R::Fp, SELF_LINK_OFFSET, R::Fp, "Adjust FP");
        self.emit_rm(RM::Lda, R::Pc, 0, R::Ac, "Return");
    }
}

/// Statement - return
impl<E: Emitter> CodeGenerator<E> {
    pub(super) fn gen_stmt_return(&mut self, exp: Option<&Expression>) -> Result<()> {
        self.comment("RETURN");
        if let Some(exp) = exp {
            self.gen_exp(exp)?;
            self.emit_rm(RM::Lda, R::Rt, 0, R::Ac, "Copy result to RT");
        }
        self.gen_return_linkage();
        Ok(())
    }
}

/// Expression - call
impl<E: Emitter> CodeGenerator<E> {
    /// The callee's frame (the "ghost frame") begins at the caller's next free temporary.
    pub(super) fn gen_exp_call(&mut self, Call { ident, args, .. }: &Call) -> Result<()> {
        self.comment(&format!("CALL {ident}"));

        let ghost_frame = self.temps.offset();
        self.emit_rm(RM::St, R::Fp, ghost_frame, R::Fp, "Store old FP in ghost frame");
        self.temps.reserve(FRAME_LINKAGE_SLOTS);

        for (i, arg) in args.iter().enumerate() {
            self.comment(&format!("LOAD PARAM {}", i + 1));
            self.gen_exp(arg)?;
            self.spill_ac("Store parameter");
        }

        self.temps.release(args.len() as i32 + FRAME_LINKAGE_SLOTS);
        debug_assert_eq!(ghost_frame, self.temps.offset());

        self.comment(&format!("JUMP TO {ident}"));
        self.emit_rm(RM::Lda, R::Fp, ghost_frame, R::Fp, "Load addr of new frame");
        self.emit_rm(RM::Lda, R::Ac, 1, R::Pc, "Return addr in AC");

        let jump_comment = format!("CALL {ident}");
        match self.fun_addrs.get(ident) {
            Some(&fun_addr) => self.emitter.emit_absolute_jump(RM::Lda, fun_addr, &jump_comment),
            None => {
                log::trace!("Call to {ident} precedes its declaration; deferring the jump.");
                let call_jump = self.emitter.reserve_slot();
                self.pending_calls.entry(ident.clone()).or_default().push(call_jump);
            }
        }

        self.emit_rm(RM::Lda, R::Ac, 0, R::Rt, "Save result in AC");
        self.comment(&format!("END CALL {ident}"));
        Ok(())
    }
}
