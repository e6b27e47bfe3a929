use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Stable handle to a particle stored in an [`Arena`].
///
/// The generation guards against handles that outlive a population reset:
/// once a slot is cleared its generation advances and old handles stop
/// resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ParticleId {
    index: u32,
    generation: u32,
}

impl ParticleId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Generational arena owning every particle of the simulation.
///
/// [`Arena::clear`] bumps every occupied slot so ids handed out before a
/// reset become invalid; the vacated slots are reused in index order.
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_list: VecDeque<usize>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: VecDeque::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: VecDeque::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> ParticleId {
        if let Some(index) = self.free_list.pop_front() {
            let slot = &mut self.slots[index];
            slot.value = Some(value);
            self.len += 1;
            return ParticleId::new(index as u32, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        self.len += 1;
        ParticleId::new(index, 0)
    }

    pub fn get(&self, id: ParticleId) -> Option<&T> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.get(id).is_some()
    }

    /// Drops every entry and invalidates all outstanding ids.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free_list.push_back(index);
        }
        self.len = 0;
    }

    pub fn ids(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value
                .as_ref()
                .map(|_| ParticleId::new(index as u32, slot.generation))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value
                .as_ref()
                .map(|value| (ParticleId::new(index as u32, slot.generation), value))
        })
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.slots.iter_mut().filter_map(|slot| slot.value.as_mut())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
