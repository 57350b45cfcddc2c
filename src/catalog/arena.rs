//! Slot arena for linked index nodes.
//!
//! Bucket lists and the order index link their nodes by [`NodeId`] instead of
//! pointers. A slot's generation is bumped whenever it is freed, so a handle to
//! a removed node can never resolve to whatever gets allocated there next, and
//! every arena carries its own id so a handle from a different arena is
//! rejected as well.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(0);

/// Handle to a node stored in an [`Arena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    arena: u64,
    index: usize,
    generation: u64,
}

impl NodeId {
    /// Slot position inside the owning arena
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    value: Option<T>,
}

/// Growable slot storage with free-list reuse
#[derive(Debug)]
pub struct Arena<T> {
    id: u64,
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> Arena<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Store a value, reusing a freed slot when one is available
    pub fn allocate(&mut self, value: T) -> NodeId {
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            debug_assert!(slot.value.is_none());
            slot.value = Some(value);
            return NodeId {
                arena: self.id,
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        NodeId {
            arena: self.id,
            index,
            generation: 0,
        }
    }

    /// Free a slot and return its value.
    /// Returns None for stale or unknown handles.
    pub fn deallocate(&mut self, id: NodeId) -> Option<T> {
        if id.arena != self.id {
            return None;
        }
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation += 1;
        self.free.push(id.index);
        self.len -= 1;
        Some(value)
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        if id.arena != self.id {
            return None;
        }
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        if id.arena != self.id {
            return None;
        }
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live values
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of freed slots waiting for reuse
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
