//! The annotated syntax tree, as handed over by the front end.
//!
//! The front end (lexer, parser, semantic analysis) lies outside this crate.
//! By the time a tree reaches us, every identifier carries its resolved
//!     [`MemoryDescriptor`](crate::common::memory::MemoryDescriptor),
//!     and every operator carries its resolved tag.
//! The tree is serialized as JSON between the two.

pub mod annotated_ast;

use self::annotated_ast::Program;
use anyhow::{Context, Result};
use std::io::Read;

pub fn read_program<R: Read>(reader: R) -> Result<Program> {
    serde_json::from_reader(reader).context("The annotated tree is not well-formed.")
}
