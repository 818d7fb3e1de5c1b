use super::{CodeGenerator, base_reg};
use crate::{
    common::{
        memory::Scope,
        symbol_table::{GlobalBinding, GlobalSymbolTable},
    },
    stage1_tree::annotated_ast::*,
    stage2_codegen::{emitter::Emitter, tm_ast::*},
};
use anyhow::Result;

use Register as R;
use RegisterMemoryOpcode as RM;

/// Block and local declarations
impl<E: Emitter> CodeGenerator<E> {
    pub(super) fn gen_block(&mut self, Block { decls, stmts }: &Block) -> Result<()> {
        self.comment("COMPOUND");
        for decl in decls.iter() {
            self.gen_local_var_decl(decl)?;
        }
        self.comment("COMPOUND BODY");
        for stmt in stmts.iter() {
            self.gen_stmt(stmt)?;
        }
        self.comment("END COMPOUND");
        Ok(())
    }

    fn gen_local_var_decl(&mut self, decl: &VarDecl) -> Result<()> {
        match decl.mem.scope {
            Scope::Local => self.gen_var_init(decl),
            Scope::Global | Scope::Static | Scope::Param => {
                /* No-op. Either initialized by the init sequence, or by the caller. */
                Ok(())
            }
        }
    }

    /// Arrays get their element count; scalars get their initializer, if any.
    fn gen_var_init(&mut self, VarDecl { ident, is_array, mem, init, .. }: &VarDecl) -> Result<()> {
        let base = base_reg(mem.storage_base());
        if *is_array {
            let comment = format!("Load size of array {ident}");
            self.load_const(R::Ac, mem.array_len(), &comment);
            let comment = format!("Save size of array {ident}");
            self.emit_rm(RM::St, R::Ac, mem.array_size_offset(), base, &comment);
        } else if let Some(init) = init {
            self.gen_exp(init)?;
            self.emit_rm(RM::St, R::Ac, mem.offset, base, &format!("Store variable {ident}"));
        }
        Ok(())
    }
}

/// Init sequence
impl<E: Emitter> CodeGenerator<E> {
    /// Set up the global area and the first frame, initialize global-lifetime variables,
    ///     then run the entry function if there is one.
    pub(super) fn gen_init_sequence(
        &mut self,
        init_jump: Address,
        global_frame_size: i32,
        symtab: &GlobalSymbolTable<'_>,
    ) -> Result<()> {
        self.emitter
            .backpatch_jump_to_here(init_jump, "Jump to INIT [BACKPATCH]")?;

        self.comment("INIT");
        self.emit_rm(RM::Ld, R::Gp, 0, R::Gp, "Set GP");
        self.emit_rm(RM::Lda, R::Fp, global_frame_size, R::Gp, "Set first frame");
        self.emit_rm(RM::St, R::Fp, 0, R::Fp, "Store old FP (point to self)");

        self.comment("INIT GLOBALS");
        symtab.for_each_global(|binding| match binding {
            GlobalBinding::Var(decl) if decl.mem.has_global_lifetime() => self.gen_var_init(decl),
            GlobalBinding::Var(_) => Ok(()),
            GlobalBinding::Fun(fun) => {
                log::trace!("Function {} needs no initialization.", fun.ident);
                Ok(())
            }
        })?;
        debug_assert!(self.temps.is_balanced());
        self.comment("END INIT GLOBALS");

        match self.entry_addr {
            Some(entry_addr) => {
                self.emit_rm(RM::Lda, R::Ac, 1, R::Pc, "Return address in AC");
                let comment = format!("Jump to {}", self.entry_ident);
                self.emitter.emit_absolute_jump(RM::Lda, entry_addr, &comment);
            }
            None => {
                log::info!("No entry function {} is defined.", self.entry_ident);
            }
        }

        self.halt();
        self.comment("END INIT");
        Ok(())
    }
}
