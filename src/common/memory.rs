//! Storage descriptors assigned by the semantic pass.
//!
//! Offsets are in words. Frames and the global area both grow downward from their base:
//! + slot `0` of a frame holds the caller's frame pointer (self-link);
//! + slot `-1` of a frame holds the return address;
//! + parameters start at slot `-2`.
//!
//! An array of `n` elements at `offset` occupies `n + 1` words:
//!     its size word lives at `offset + 1`, and element `i` lives at `offset - i`.

use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// The self-link and the return address.
pub const FRAME_LINKAGE_SLOTS: i32 = 2;
pub const RETURN_ADDR_OFFSET: i32 = -1;
pub const SELF_LINK_OFFSET: i32 = 0;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Scope {
    Global,
    Static,
    Local,
    Param,
}

/// Which base register an offset is relative to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StorageBase {
    Globals,
    Frame,
}

/// How to locate element `i` of an array at runtime.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ArrayAddressing {
    /// Array parameters: the frame slot holds the runtime address of element `0`.
    Indirect { ptr_offset: i32 },
    /// Arrays whose storage lies at a known offset from a base register.
    Direct { base: StorageBase, offset: i32 },
}

#[derive(Constructor, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MemoryDescriptor {
    pub scope: Scope,
    pub offset: i32,
    /// For variables, the number of words occupied.
    /// For functions, the frame size,
    ///     ie the first (negative) frame offset available to temporaries.
    pub size: i32,
}
impl MemoryDescriptor {
    pub fn storage_base(&self) -> StorageBase {
        match self.scope {
            Scope::Global | Scope::Static => StorageBase::Globals,
            Scope::Local | Scope::Param => StorageBase::Frame,
        }
    }

    pub fn array_addressing(&self) -> ArrayAddressing {
        match self.scope {
            Scope::Param => ArrayAddressing::Indirect { ptr_offset: self.offset },
            Scope::Global | Scope::Static | Scope::Local => ArrayAddressing::Direct {
                base: self.storage_base(),
                offset: self.offset,
            },
        }
    }

    pub fn array_len(&self) -> i32 {
        self.size - 1
    }

    pub fn array_size_offset(&self) -> i32 {
        self.offset + 1
    }

    pub fn has_global_lifetime(&self) -> bool {
        matches!(self.scope, Scope::Global | Scope::Static)
    }
}
