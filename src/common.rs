pub mod identifier;
pub mod memory;
pub mod primitive;
pub mod symbol_table;
