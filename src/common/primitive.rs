use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Const {
    Bool(bool),
    Char(char),
    Int(i32),
}
impl Const {
    /// Every constant occupies exactly one TM data word.
    pub fn as_word(&self) -> i32 {
        match self {
            Const::Bool(b) => *b as i32,
            Const::Char(c) => *c as i32,
            Const::Int(i) => *i,
        }
    }

    pub fn descr(&self) -> &'static str {
        match self {
            Const::Bool(_) => "boolean",
            Const::Char(_) => "character",
            Const::Int(_) => "integer",
        }
    }
}
