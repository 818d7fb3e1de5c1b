use crate::stage1_tree::annotated_ast::{
    Block, Declaration, FunctionDecl, Program, Statement, VarDecl,
};
use anyhow::Result;

/// A binding that lives for the whole program run.
#[derive(Clone, Copy, Debug)]
pub enum GlobalBinding<'a> {
    Var(&'a VarDecl),
    Fun(&'a FunctionDecl),
}

/// The global scope of one program: top-level variables, functions,
///     and `static` locals (which have global lifetime even though their names are block-scoped).
///
/// Bindings are kept in declaration order.
#[derive(Debug)]
pub struct GlobalSymbolTable<'a> {
    bindings: Vec<GlobalBinding<'a>>,
}
impl<'a> From<&'a Program> for GlobalSymbolTable<'a> {
    fn from(prog: &'a Program) -> Self {
        let mut bindings = vec![];
        for decl in prog.decls.iter() {
            match decl {
                Declaration::Var(var_decl) => bindings.push(GlobalBinding::Var(var_decl)),
                Declaration::Fun(fun_decl) => {
                    bindings.push(GlobalBinding::Fun(fun_decl));
                    if let Some(body) = &fun_decl.body {
                        Self::collect_statics(body, &mut bindings);
                    }
                }
            }
        }
        Self { bindings }
    }
}
impl<'a> GlobalSymbolTable<'a> {
    fn collect_statics(block: &'a Block, out: &mut Vec<GlobalBinding<'a>>) {
        out.extend(
            block
                .decls
                .iter()
                .filter(|var_decl| var_decl.mem.has_global_lifetime())
                .map(GlobalBinding::Var),
        );
        for stmt in block.stmts.iter() {
            Self::collect_statics_in_stmt(stmt, out);
        }
    }
    fn collect_statics_in_stmt(stmt: &'a Statement, out: &mut Vec<GlobalBinding<'a>>) {
        match stmt {
            Statement::Compound(block) => Self::collect_statics(block, out),
            Statement::If(iff) => {
                Self::collect_statics_in_stmt(&iff.then, out);
                if let Some(elze) = &iff.elze {
                    Self::collect_statics_in_stmt(elze, out);
                }
            }
            Statement::While(wile) => Self::collect_statics_in_stmt(&wile.body, out),
            Statement::Expression(_) | Statement::Return(_) | Statement::Break => {}
        }
    }

    /// Apply `visitor` to every global binding, stopping at the first error.
    pub fn for_each_global<F>(&self, mut visitor: F) -> Result<()>
    where
        F: FnMut(GlobalBinding<'a>) -> Result<()>,
    {
        for binding in self.bindings.iter() {
            visitor(*binding)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}
