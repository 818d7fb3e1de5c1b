mod builder;
mod compiler;
mod machine;
mod misc;

pub use builder::*;
pub use compiler::*;
pub use machine::*;
pub use misc::*;
