#![allow(rustdoc::private_intra_doc_links)]

mod common;
pub mod driver;
mod stage1_tree;
mod stage2_codegen;
mod stage3_emit;
