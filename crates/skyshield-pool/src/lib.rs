//! Bounded object pool for short-lived simulation entities.
//!
//! Entities churn every frame (spawn, die, respawn); the pool reuses slots
//! instead of growing the backing store without bound. Slots are marked
//! active on acquire and reset + deactivated on release. The backing store
//! only grows while below `max_size`; `acquire` returns `None` once every
//! slot is active and the cap is reached, and callers skip the spawn.

use serde::{Deserialize, Serialize};

/// Implemented by anything the pool can store.
///
/// `Default` supplies the construction path; `reset` returns a slot to its
/// pristine state on release.
pub trait PoolItem: Default {
    fn reset(&mut self);
}

/// Index of a slot within a pool. Only valid for the pool that issued it.
pub type SlotIndex = usize;

#[derive(Debug)]
struct Slot<T> {
    item: T,
    active: bool,
    /// Simulation time of the last acquire or release.
    last_used: f64,
}

/// A bounded pool of reusable `T` slots.
#[derive(Debug)]
pub struct ObjectPool<T: PoolItem> {
    slots: Vec<Slot<T>>,
    max_size: usize,
}

/// Usage counters for one pool.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PoolStats {
    pub active: usize,
    pub allocated: usize,
    pub capacity: usize,
    /// active / capacity, in [0, 1].
    pub utilization: f64,
}

impl<T: PoolItem> ObjectPool<T> {
    pub fn new(max_size: usize) -> Self {
        Self {
            slots: Vec::new(),
            max_size,
        }
    }

    /// Pre-populate `count` inactive slots (bounded by `max_size`).
    pub fn with_preallocated(max_size: usize, count: usize) -> Self {
        let mut pool = Self::new(max_size);
        for _ in 0..count.min(max_size) {
            pool.slots.push(Slot {
                item: T::default(),
                active: false,
                last_used: 0.0,
            });
        }
        pool
    }

    /// Check out a slot: first inactive slot, else a fresh one while below
    /// the cap. Returns `None` when the pool is exhausted.
    pub fn acquire(&mut self, now: f64) -> Option<SlotIndex> {
        if let Some(index) = self.slots.iter().position(|s| !s.active) {
            let slot = &mut self.slots[index];
            slot.item.reset();
            slot.active = true;
            slot.last_used = now;
            return Some(index);
        }

        if self.slots.len() < self.max_size {
            self.slots.push(Slot {
                item: T::default(),
                active: true,
                last_used: now,
            });
            return Some(self.slots.len() - 1);
        }

        None
    }

    /// Return a slot to the pool: reset and deactivate. No-op if the index
    /// is out of range or the slot is already inactive.
    pub fn release(&mut self, index: SlotIndex, now: f64) {
        if let Some(slot) = self.slots.get_mut(index) {
            if slot.active {
                slot.item.reset();
                slot.active = false;
                slot.last_used = now;
            }
        }
    }

    /// Release every active slot matching `pred`. Returns the number released.
    pub fn release_where(&mut self, now: f64, mut pred: impl FnMut(&T) -> bool) -> usize {
        let mut released = 0;
        for slot in &mut self.slots {
            if slot.active && pred(&slot.item) {
                slot.item.reset();
                slot.active = false;
                slot.last_used = now;
                released += 1;
            }
        }
        released
    }

    pub fn get(&self, index: SlotIndex) -> Option<&T> {
        self.slots
            .get(index)
            .filter(|s| s.active)
            .map(|s| &s.item)
    }

    pub fn get_mut(&mut self, index: SlotIndex) -> Option<&mut T> {
        self.slots
            .get_mut(index)
            .filter(|s| s.active)
            .map(|s| &mut s.item)
    }

    /// Iterate active slots with their indices.
    pub fn iter_active(&self) -> impl Iterator<Item = (SlotIndex, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (i, &s.item))
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (SlotIndex, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (i, &mut s.item))
    }

    /// Find the first active item matching `pred`.
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<(SlotIndex, &T)> {
        self.iter_active().find(|(_, item)| pred(item))
    }

    pub fn find_mut(&mut self, mut pred: impl FnMut(&T) -> bool) -> Option<(SlotIndex, &mut T)> {
        self.iter_active_mut().find(|(_, item)| pred(item))
    }

    /// Physically drop inactive slots not touched for `max_age`, shrinking
    /// the backing store. Active slots are never dropped.
    pub fn cleanup(&mut self, max_age: f64, now: f64) -> usize {
        let before = self.slots.len();
        self.slots
            .retain(|s| s.active || now - s.last_used <= max_age);
        before - self.slots.len()
    }

    /// Force-release active slots failing the validator (e.g. health <= 0
    /// entities a caller forgot to release). Returns the number released.
    pub fn validate_active(&mut self, now: f64, mut valid: impl FnMut(&T) -> bool) -> usize {
        self.release_where(now, |item| !valid(item))
    }

    /// Release every slot.
    pub fn clear(&mut self, now: f64) {
        for slot in &mut self.slots {
            if slot.active {
                slot.item.reset();
                slot.active = false;
                slot.last_used = now;
            }
        }
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn stats(&self) -> PoolStats {
        let active = self.active_count();
        PoolStats {
            active,
            allocated: self.slots.len(),
            capacity: self.max_size,
            utilization: if self.max_size == 0 {
                0.0
            } else {
                active as f64 / self.max_size as f64
            },
        }
    }

    /// Rough backing-store footprint in bytes.
    pub fn memory_estimate(&self) -> usize {
        self.slots.len() * std::mem::size_of::<Slot<T>>()
    }
}
