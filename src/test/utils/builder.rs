//! Annotated trees, built the way the front end would lay them out.

pub use crate::{
    common::memory::{MemoryDescriptor, Scope},
    stage1_tree::annotated_ast::*,
};

/* Declarations */

fn var_decl(
    name: &str,
    scope: Scope,
    offset: i32,
    size: i32,
    init: Option<Expression>,
) -> VarDecl {
    VarDecl {
        ident: RawIdentifier::from(name),
        is_array: false,
        mem: MemoryDescriptor::new(scope, offset, size),
        init,
        line: 0,
    }
}
fn array_decl(name: &str, scope: Scope, offset: i32, size: i32) -> VarDecl {
    VarDecl {
        is_array: true,
        ..var_decl(name, scope, offset, size, None)
    }
}

pub fn global_int(name: &str, offset: i32, init: Option<Expression>) -> VarDecl {
    var_decl(name, Scope::Global, offset, 1, init)
}
pub fn static_int(name: &str, offset: i32, init: Option<Expression>) -> VarDecl {
    var_decl(name, Scope::Static, offset, 1, init)
}
pub fn local_int(name: &str, offset: i32, init: Option<Expression>) -> VarDecl {
    var_decl(name, Scope::Local, offset, 1, init)
}
pub fn param_int(name: &str, offset: i32) -> VarDecl {
    var_decl(name, Scope::Param, offset, 1, None)
}

/// `offset` is element `0`; the size word sits right above it.
pub fn global_array(name: &str, offset: i32, len: i32) -> VarDecl {
    array_decl(name, Scope::Global, offset, len + 1)
}
pub fn static_array(name: &str, offset: i32, len: i32) -> VarDecl {
    array_decl(name, Scope::Static, offset, len + 1)
}
pub fn local_array(name: &str, offset: i32, len: i32) -> VarDecl {
    array_decl(name, Scope::Local, offset, len + 1)
}
pub fn param_array(name: &str, offset: i32) -> VarDecl {
    array_decl(name, Scope::Param, offset, 1)
}

pub fn fun(
    name: &str,
    frame_size: i32,
    params: Vec<VarDecl>,
    decls: Vec<VarDecl>,
    stmts: Vec<Statement>,
) -> FunctionDecl {
    FunctionDecl {
        ident: RawIdentifier::from(name),
        mem: MemoryDescriptor::new(Scope::Global, 0, frame_size),
        params,
        body: Some(Block { decls, stmts }),
        line: 0,
    }
}

/// The I/O library, as the front end declares it ahead of any user code.
pub fn io_library() -> Vec<Declaration> {
    let intrinsic = |name: &str, params: Vec<VarDecl>| {
        let frame_size = -2 - params.len() as i32;
        Declaration::Fun(FunctionDecl {
            ident: RawIdentifier::from(name),
            mem: MemoryDescriptor::new(Scope::Global, 0, frame_size),
            params,
            body: None,
            line: 0,
        })
    };
    vec![
        intrinsic("input", vec![]),
        intrinsic("output", vec![param_int("*dummy*", -2)]),
        intrinsic("inputb", vec![]),
        intrinsic("outputb", vec![param_int("*dummy*", -2)]),
        intrinsic("inputc", vec![]),
        intrinsic("outputc", vec![param_int("*dummy*", -2)]),
        intrinsic("outnl", vec![]),
    ]
}

/// The I/O library followed by `decls`.
pub fn program(global_frame_size: i32, decls: Vec<Declaration>) -> Program {
    let mut all_decls = io_library();
    all_decls.extend(decls);
    Program { global_frame_size, decls: all_decls }
}

/* Expressions */

pub fn int(i: i32) -> Expression {
    Expression::Const(Const::Int(i))
}
pub fn bool_const(b: bool) -> Expression {
    Expression::Const(Const::Bool(b))
}
pub fn char_const(c: char) -> Expression {
    Expression::Const(Const::Char(c))
}

pub fn variable(decl: &VarDecl) -> Variable {
    Variable {
        ident: decl.ident.clone(),
        is_array: decl.is_array,
        mem: decl.mem,
        line: 0,
    }
}
pub fn var(decl: &VarDecl) -> Expression {
    Expression::Var(variable(decl))
}

pub fn unary(op: UnaryOperator, operand: Expression) -> Expression {
    Expression::Operator(Operator::Unary(Unary { op, operand: Box::new(operand) }))
}
pub fn binary(op: BinaryOperator, lhs: Expression, rhs: Expression) -> Expression {
    Expression::Operator(Operator::Binary(Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }))
}

pub fn subscript(array: &VarDecl, index: Expression) -> Subscript {
    Subscript { array: variable(array), index: Box::new(index) }
}
pub fn index(array: &VarDecl, index: Expression) -> Expression {
    Expression::Operator(Operator::Subscript(subscript(array, index)))
}
pub fn size_of(array: &VarDecl) -> Expression {
    Expression::Operator(Operator::SizeOf(variable(array)))
}

pub fn assign(lhs: LValue, rhs: Expression) -> Expression {
    Expression::Assignment(Assignment { lhs, op: AssignmentOperator::Assign(Box::new(rhs)) })
}
pub fn update(lhs: LValue, op: UpdateOperator, rhs: Expression) -> Expression {
    Expression::Assignment(Assignment { lhs, op: AssignmentOperator::Update(op, Box::new(rhs)) })
}
pub fn increment(lhs: LValue) -> Expression {
    Expression::Assignment(Assignment { lhs, op: AssignmentOperator::Increment })
}
pub fn decrement(lhs: LValue) -> Expression {
    Expression::Assignment(Assignment { lhs, op: AssignmentOperator::Decrement })
}
pub fn lvar(decl: &VarDecl) -> LValue {
    LValue::Var(variable(decl))
}
pub fn lelem(array: &VarDecl, idx: Expression) -> LValue {
    LValue::Element(subscript(array, idx))
}

pub fn call(name: &str, args: Vec<Expression>) -> Expression {
    Expression::Call(Call { ident: RawIdentifier::from(name), args, line: 0 })
}

/* Statements */

pub fn exp_stmt(exp: Expression) -> Statement {
    Statement::Expression(exp)
}
pub fn output(exp: Expression) -> Statement {
    exp_stmt(call("output", vec![exp]))
}
pub fn ret(exp: Option<Expression>) -> Statement {
    Statement::Return(exp)
}
pub fn if_stmt(condition: Expression, then: Statement, elze: Option<Statement>) -> Statement {
    Statement::If(If {
        condition,
        then: Box::new(then),
        elze: elze.map(Box::new),
    })
}
pub fn while_stmt(condition: Expression, body: Statement) -> Statement {
    Statement::While(While { condition, body: Box::new(body) })
}
pub fn compound(decls: Vec<VarDecl>, stmts: Vec<Statement>) -> Statement {
    Statement::Compound(Block { decls, stmts })
}
