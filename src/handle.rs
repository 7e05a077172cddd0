//! Generational handle table backing every native object.
//!
//! A handle packs a slot index (upper 32 bits) and a generation (lower 32
//! bits). Generations start at 1, so `0` is never a live handle and doubles
//! as the null handle at the C boundary. Releasing a slot bumps its
//! generation: stale handles resolve to `None` rather than to whatever now
//! occupies the slot.

/// Handle passed across the C boundary. `0` is the null handle.
pub type RawHandle = u64;

/// The null handle.
pub const NULL_HANDLE: RawHandle = 0;

fn encode(slot: u32, generation: u32) -> RawHandle {
    ((slot as u64) << 32) | (generation as u64)
}

fn decode(handle: RawHandle) -> (u32, u32) {
    ((handle >> 32) as u32, handle as u32)
}

struct Slot<T> {
    generation: u32,
    data: Option<T>,
}

/// Slot table mapping handles to owned values, with slot reuse.
pub(crate) struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    live: usize,
}

impl<T> HandleTable<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Insert a value and return its handle.
    pub fn insert(&mut self, value: T) -> RawHandle {
        self.live += 1;
        if let Some(slot_idx) = self.free_list.pop() {
            let slot = &mut self.slots[slot_idx as usize];
            slot.data = Some(value);
            encode(slot_idx, slot.generation)
        } else {
            let slot_idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                data: Some(value),
            });
            encode(slot_idx, 1)
        }
    }

    /// Returns `None` for stale or never-issued handles.
    pub fn get(&self, handle: RawHandle) -> Option<&T> {
        let (slot_idx, generation) = decode(handle);
        let slot = self.slots.get(slot_idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.data.as_ref()
    }

    pub fn get_mut(&mut self, handle: RawHandle) -> Option<&mut T> {
        let (slot_idx, generation) = decode(handle);
        let slot = self.slots.get_mut(slot_idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.data.as_mut()
    }

    /// Remove the value behind a handle.
    ///
    /// A slot whose generation wraps to 0 is retired instead of recycled, so
    /// a wrapped generation can never alias an old handle. Removing a stale
    /// handle returns `None`.
    pub fn remove(&mut self, handle: RawHandle) -> Option<T> {
        let (slot_idx, generation) = decode(handle);
        let slot = self.slots.get_mut(slot_idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        let value = slot.data.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        if slot.generation != 0 {
            self.free_list.push(slot_idx);
        }
        self.live -= 1;
        Some(value)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live
    }
}
