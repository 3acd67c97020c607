//! Buff slot table - Fixed-size replicated slot assignment

use super::{BuffError, BuffHandle};

/// Number of slots, including the reserved slot 0
pub const BUFF_SLOT_COUNT: usize = 256;

/// Maps replicated slot indices to the buff instance occupying them
///
/// Slot 0 is never handed out.
#[derive(Debug, Clone)]
pub struct BuffSlotTable {
    slots: [Option<BuffHandle>; BUFF_SLOT_COUNT],
}

impl Default for BuffSlotTable {
    fn default() -> Self {
        BuffSlotTable {
            slots: [None; BUFF_SLOT_COUNT],
        }
    }
}

impl BuffSlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// First slot whose occupant equals `handle`
    ///
    /// `None` searches for a free slot; `Some` searches for that buff's slot.
    pub fn find_slot(&self, handle: Option<BuffHandle>) -> Result<u8, BuffError> {
        (1..BUFF_SLOT_COUNT)
            .find(|&i| self.slots[i] == handle)
            .map(|i| i as u8)
            .ok_or(match handle {
                None => BuffError::NoFreeSlot,
                Some(h) => BuffError::SlotNotFound(h),
            })
    }

    /// Bind `handle` to the first free slot
    pub fn allocate(&mut self, handle: BuffHandle) -> Result<u8, BuffError> {
        let slot = self.find_slot(None)?;
        self.slots[slot as usize] = Some(handle);
        Ok(slot)
    }

    /// Free the slot bound to `handle`
    pub fn release(&mut self, handle: BuffHandle) -> Result<u8, BuffError> {
        let slot = self.find_slot(Some(handle))?;
        self.slots[slot as usize] = None;
        Ok(slot)
    }

    pub fn get(&self, slot: u8) -> Option<BuffHandle> {
        self.slots[slot as usize]
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
