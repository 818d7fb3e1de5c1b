/// A stack of spill slots, realized as frame-relative offsets below the frame's declared storage.
///
/// `floor` is the first offset not claimed by the frame's linkage, parameters, or locals.
/// The cursor starts there and only ever moves below it.
#[derive(Debug)]
pub struct TempCursor {
    floor: i32,
    offset: i32,
}
impl TempCursor {
    pub fn new(floor: i32) -> Self {
        Self { floor, offset: floor }
    }

    /// The next free slot.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Claim the next free slot; return its offset.
    pub fn push(&mut self) -> i32 {
        let slot = self.offset;
        self.offset -= 1;
        slot
    }

    /// Release the most recently claimed slot; return its offset.
    pub fn pop(&mut self) -> i32 {
        self.offset += 1;
        debug_assert!(
            self.offset <= self.floor,
            "Temporary popped into declared frame storage. {self:?}"
        );
        self.offset
    }

    pub fn reserve(&mut self, count: i32) {
        self.offset -= count;
    }

    pub fn release(&mut self, count: i32) {
        self.offset += count;
        debug_assert!(
            self.offset <= self.floor,
            "Temporaries released into declared frame storage. {self:?}"
        );
    }

    pub fn is_balanced(&self) -> bool {
        self.offset == self.floor
    }
}
