pub use self::declaration::*;
pub use self::expression::*;
pub use self::statement::*;
pub use crate::common::{identifier::RawIdentifier, memory::MemoryDescriptor, primitive::Const};
use serde::{Deserialize, Serialize};

pub type LineNumber = u32;

#[derive(Debug, Serialize, Deserialize)]
pub struct Program {
    /// The global area's final allocation offset. The first frame begins here.
    pub global_frame_size: i32,
    pub decls: Vec<Declaration>,
}

#[derive(Debug, Serialize, Deserialize)]
pub enum Declaration {
    Var(VarDecl),
    Fun(FunctionDecl),
}
mod declaration {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VarDecl {
        pub ident: RawIdentifier,
        #[serde(default)]
        pub is_array: bool,
        pub mem: MemoryDescriptor,
        #[serde(default)]
        pub init: Option<Expression>,
        #[serde(default)]
        pub line: LineNumber,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FunctionDecl {
        pub ident: RawIdentifier,
        pub mem: MemoryDescriptor,
        #[serde(default)]
        pub params: Vec<VarDecl>,
        /// `None` for the I/O library functions that the front end declares implicitly.
        #[serde(default)]
        pub body: Option<Block>,
        #[serde(default)]
        pub line: LineNumber,
    }
}

#[derive(Default, Debug, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub decls: Vec<VarDecl>,
    #[serde(default)]
    pub stmts: Vec<Statement>,
}

#[derive(Debug, Serialize, Deserialize)]
pub enum Statement {
    Expression(Expression),
    Compound(Block),
    If(If),
    While(While),
    Return(Option<Expression>),
    Break,
}
mod statement {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct If {
        pub condition: Expression,
        pub then: Box<Statement>,
        #[serde(default)]
        pub elze: Option<Box<Statement>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct While {
        pub condition: Expression,
        pub body: Box<Statement>,
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub enum Expression {
    Const(Const),
    Var(Variable),
    Operator(Operator),
    Assignment(Assignment),
    Call(Call),
}
mod expression {
    use super::*;

    /// An identifier node.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Variable {
        pub ident: RawIdentifier,
        #[serde(default)]
        pub is_array: bool,
        pub mem: MemoryDescriptor,
        #[serde(default)]
        pub line: LineNumber,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub enum Operator {
        Unary(Unary),
        Binary(Binary),
        Subscript(Subscript),
        /// `*arr`, the element count of an array.
        SizeOf(Variable),
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Unary {
        pub op: UnaryOperator,
        pub operand: Box<Expression>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Binary {
        pub op: BinaryOperator,
        pub lhs: Box<Expression>,
        pub rhs: Box<Expression>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Subscript {
        pub array: Variable,
        pub index: Box<Expression>,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
    pub enum UnaryOperator {
        /* int -> int */
        Negate,
        /// `?n`, a random integer in `[0, n)`.
        Random,
        /* bool -> bool */
        Not,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
    pub enum BinaryOperator {
        /* int -> int */
        Add,
        Sub,
        Mul,
        Div,
        Rem,
        /* bool -> bool */
        And,
        Or,
        /* -(compare)-> bool */
        Eq,
        Neq,
        Lt,
        Lte,
        Gt,
        Gte,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Assignment {
        pub lhs: LValue,
        pub op: AssignmentOperator,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub enum LValue {
        Var(Variable),
        Element(Subscript),
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub enum AssignmentOperator {
        /// `=`
        Assign(Box<Expression>),
        /// `+=` `-=` `*=` `/=`
        Update(UpdateOperator, Box<Expression>),
        /// `++`
        Increment,
        /// `--`
        Decrement,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
    pub enum UpdateOperator {
        Add,
        Sub,
        Mul,
        Div,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Call {
        pub ident: RawIdentifier,
        #[serde(default)]
        pub args: Vec<Expression>,
        #[serde(default)]
        pub line: LineNumber,
    }
}
