//! Serialize a finished TM instruction stream as a listing that the TM simulator loads.

pub mod write;
