mod assign;
mod conditional;
mod decl;
mod exp;
mod fun;
mod looping;

use self::looping::BreakTargets;
use super::{emitter::Emitter, temp_cursor::TempCursor, tm_ast::*};
use crate::{
    common::{
        identifier::RawIdentifier,
        memory::{FRAME_LINKAGE_SLOTS, StorageBase},
        symbol_table::GlobalSymbolTable,
    },
    stage1_tree::annotated_ast::{Declaration, Program, Statement},
};
use anyhow::{Result, anyhow};
use getset::Getters;
use std::collections::HashMap;

use Register as R;
use RegisterMemoryOpcode as RM;
use RegisterOnlyOpcode as RO;

#[derive(Getters, Debug)]
pub struct GeneratedCode<E> {
    code: E,
    #[getset(get = "pub")]
    fun_addrs: HashMap<RawIdentifier, Address>,
    #[getset(get = "pub")]
    entry_addr: Option<Address>,
}
impl<E> GeneratedCode<E> {
    pub fn into_code(self) -> E {
        self.code
    }
}

/// Generator state for one pass over one program.
pub struct CodeGenerator<E> {
    emitter: E,

    entry_ident: RawIdentifier,
    entry_addr: Option<Address>,

    current_fun: Option<RawIdentifier>,
    temps: TempCursor,

    fun_addrs: HashMap<RawIdentifier, Address>,
    /// Call jumps emitted before their callee was walked.
    pending_calls: HashMap<RawIdentifier, Vec<Address>>,

    break_targets: BreakTargets,
}
impl<E: Emitter> CodeGenerator<E> {
    pub fn new(emitter: E, entry_ident: RawIdentifier) -> Self {
        Self {
            emitter,
            entry_ident,
            entry_addr: None,
            current_fun: None,
            temps: Self::top_level_temps(),
            fun_addrs: HashMap::new(),
            pending_calls: HashMap::new(),
            break_targets: BreakTargets::default(),
        }
    }

    /// Temporaries outside any function live in the first frame, below its linkage slots.
    fn top_level_temps() -> TempCursor {
        TempCursor::new(-FRAME_LINKAGE_SLOTS)
    }

    pub fn gen_program(
        mut self,
        Program { global_frame_size, decls }: &Program,
        symtab: &GlobalSymbolTable<'_>,
    ) -> Result<GeneratedCode<E>> {
        log::debug!("Generating {} top-level declarations.", decls.len());

        self.emitter.emit_comment(&format!(
            "C- compiler back end version {}",
            env!("CARGO_PKG_VERSION")
        ));

        let init_jump = self.emitter.reserve_slot();

        for decl in decls.iter() {
            match decl {
                Declaration::Fun(fun_decl) => self.gen_fun(fun_decl)?,
                Declaration::Var(_) => { /* No-op. Initialized by the init sequence. */ }
            }
        }

        self.check_pending_calls()?;

        self.gen_init_sequence(init_jump, *global_frame_size, symtab)?;

        log::debug!(
            "Generated {} functions; entry at {:?}.",
            self.fun_addrs.len(),
            self.entry_addr
        );

        Ok(GeneratedCode {
            code: self.emitter,
            fun_addrs: self.fun_addrs,
            entry_addr: self.entry_addr,
        })
    }

    fn check_pending_calls(&self) -> Result<()> {
        if self.pending_calls.is_empty() {
            return Ok(());
        }
        let mut idents = self
            .pending_calls
            .keys()
            .map(|ident| ident.as_str())
            .collect::<Vec<_>>();
        idents.sort();
        Err(anyhow!("Called but never defined: {idents:?}"))
    }
}

/// Statement
impl<E: Emitter> CodeGenerator<E> {
    fn gen_stmt(&mut self, stmt: &Statement) -> Result<()> {
        let temps_before = self.temps.offset();
        log::trace!(
            "Statement at {} with temporaries at {temps_before}",
            self.emitter.current_address()
        );

        match stmt {
            Statement::Expression(exp) => self.gen_exp(exp)?,
            Statement::Compound(block) => self.gen_block(block)?,
            Statement::If(iff) => self.gen_stmt_conditional(iff)?,
            Statement::While(wile) => self.gen_stmt_while(wile)?,
            Statement::Return(exp) => self.gen_stmt_return(exp.as_ref())?,
            Statement::Break => self.gen_stmt_break()?,
        }

        debug_assert_eq!(
            temps_before,
            self.temps.offset(),
            "Unbalanced temporaries in {:?}. {stmt:?}",
            self.current_fun
        );
        Ok(())
    }
}

/// Emission helpers
impl<E: Emitter> CodeGenerator<E> {
    fn comment(&mut self, comment: &str) {
        self.emitter.emit_comment(comment);
    }
    fn emit_rm(
        &mut self,
        op: RegisterMemoryOpcode,
        r: Register,
        d: i32,
        s: Register,
        comment: &str,
    ) {
        self.emitter.emit_register_memory(op, r, d, s, comment);
    }
    fn emit_ro(
        &mut self,
        op: RegisterOnlyOpcode,
        r: Register,
        s: Register,
        t: Register,
        comment: &str,
    ) {
        self.emitter.emit_register_only(op, r, s, t, comment);
    }

    /// Store `AC` into the next free temporary.
    fn spill_ac(&mut self, comment: &str) {
        let slot = self.temps.push();
        self.emit_rm(RM::St, R::Ac, slot, R::Fp, comment);
    }
    /// Load the most recent temporary into `reg`, freeing it.
    fn reload(&mut self, reg: Register, comment: &str) {
        let slot = self.temps.pop();
        self.emit_rm(RM::Ld, reg, slot, R::Fp, comment);
    }

    fn load_const(&mut self, reg: Register, val: i32, comment: &str) {
        self.emit_rm(RM::Ldc, reg, val, R::NONE, comment);
    }

    fn halt(&mut self) {
        self.emit_ro(RO::Halt, R::NONE, R::NONE, R::NONE, "DONE!");
    }
}

fn base_reg(base: StorageBase) -> Register {
    match base {
        StorageBase::Globals => R::Gp,
        StorageBase::Frame => R::Fp,
    }
}
