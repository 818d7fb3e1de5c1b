//! + Walk the annotated tree once, in declaration order, and emit TM instructions as we go.
//! + Every expression leaves its value in `AC`.
//!     Intermediate values are spilled to frame slots below the current function's
//!     declared storage; there is no hardware operand stack.
//! + Forward jumps (conditionals, loop exits, breaks, calls to functions not yet walked)
//!     are reserved as placeholder slots and backpatched once their targets are known.
//!
//! Calling convention, from the callee frame's point of view:
//!
//! | offset | content |
//! |--------|---------|
//! | `0`    | caller's `FP` (self-link), written by the caller |
//! | `-1`   | return address, written by the callee's prologue from `AC` |
//! | `-2 ..`| arguments, in order, written by the caller |
//! | below  | locals, then temporaries |
//!
//! The return value travels in `RT`.

pub mod emitter;
mod generate;
pub mod temp_cursor;
pub mod tm_ast;

pub use generate::{CodeGenerator, GeneratedCode};
