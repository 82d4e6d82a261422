//! An open-addressed hash table with linear probing,
//! shared by the [value index](crate::index) and the statement index.
//!
//! The table only stores `u32` handles into some external storage;
//! hashing and key comparison are supplied by the caller,
//! so that the same table serves both terms and statements.

/// The number of slots of a fresh table.
pub const INITIAL_CAPACITY: usize = 255;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Empty,
    // removed entry, still part of probe sequences
    Tombstone,
    Occupied(u32),
}

/// The result of probing a [`ProbeTable`] for a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Probe {
    /// The key is stored at this slot, with this handle.
    Found(usize, u32),
    /// The key is absent; this is the slot where it should be inserted.
    Vacant(usize),
}

#[derive(Clone, Debug)]
pub(crate) struct ProbeTable {
    slots: Vec<Slot>,
    live: usize,
    // live entries + tombstones
    used: usize,
}

impl Default for ProbeTable {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl ProbeTable {
    /// A table able to hold `entries` entries without growing.
    pub fn with_capacity(entries: usize) -> Self {
        let mut capacity = INITIAL_CAPACITY;
        while entries * 3 >= capacity * 2 {
            capacity = capacity * 2 + 1;
        }
        ProbeTable {
            slots: vec![Slot::Empty; capacity],
            live: 0,
            used: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn used(&self) -> usize {
        self.used
    }

    /// Look for the entry with the given `hash` for which `same` returns true.
    ///
    /// Probing goes past tombstones until an empty slot,
    /// so that a key is never stored twice;
    /// the first tombstone met is the preferred insertion slot.
    pub fn probe<F>(&self, hash: u64, mut same: F) -> Probe
    where
        F: FnMut(u32) -> bool,
    {
        let capacity = self.slots.len();
        let mut i = (hash % capacity as u64) as usize;
        let mut reusable = None;
        // the load factor guarantees that an empty slot exists
        loop {
            match self.slots[i] {
                Slot::Empty => return Probe::Vacant(reusable.unwrap_or(i)),
                Slot::Tombstone => {
                    reusable.get_or_insert(i);
                }
                Slot::Occupied(handle) => {
                    if same(handle) {
                        return Probe::Found(i, handle);
                    }
                }
            }
            i += 1;
            if i == capacity {
                i = 0;
            }
        }
    }

    /// Find the handle of the entry with the given `hash` for which `same` returns true.
    pub fn find<F>(&self, hash: u64, same: F) -> Option<u32>
    where
        F: FnMut(u32) -> bool,
    {
        match self.probe(hash, same) {
            Probe::Found(_, handle) => Some(handle),
            Probe::Vacant(_) => None,
        }
    }

    /// Store `handle` at `slot`, as returned by [`ProbeTable::probe`].
    ///
    /// Returns true if the table should now be [rebuilt](ProbeTable::rebuild).
    pub fn occupy(&mut self, slot: usize, handle: u32) -> bool {
        if self.slots[slot] == Slot::Empty {
            self.used += 1;
        }
        self.slots[slot] = Slot::Occupied(handle);
        self.live += 1;
        self.used * 3 >= self.slots.len() * 2
    }

    /// Turn the entry at `slot` into a tombstone.
    pub fn vacate(&mut self, slot: usize) {
        debug_assert!(matches!(self.slots[slot], Slot::Occupied(_)));
        self.slots[slot] = Slot::Tombstone;
        self.live -= 1;
    }

    /// Re-insert every live entry into a fresh slot vector, dropping tombstones.
    ///
    /// The capacity doubles if live entries fill at least half of the table,
    /// otherwise it is kept (the table was mostly filled with tombstones).
    pub fn rebuild<H>(&mut self, hash_of: H)
    where
        H: Fn(u32) -> u64,
    {
        let old_capacity = self.slots.len();
        let capacity = if self.live * 2 >= old_capacity {
            old_capacity * 2 + 1
        } else {
            old_capacity
        };
        let old = std::mem::replace(&mut self.slots, vec![Slot::Empty; capacity]);
        for handle in old.into_iter().filter_map(|slot| match slot {
            Slot::Occupied(handle) => Some(handle),
            _ => None,
        }) {
            let mut i = (hash_of(handle) % capacity as u64) as usize;
            while self.slots[i] != Slot::Empty {
                i = (i + 1) % capacity;
            }
            self.slots[i] = Slot::Occupied(handle);
        }
        log::debug!(
            "probe table rebuilt: {} entries, {} tombstones dropped, capacity {} -> {}",
            self.live,
            self.used - self.live,
            old_capacity,
            capacity,
        );
        self.used = self.live;
    }

    /// Remove every entry, shrinking back to the initial capacity.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The handles of all live entries, in slot order.
    #[cfg(test)]
    pub fn handles(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(handle) => Some(*handle),
            _ => None,
        })
    }
}
