use crate::hashers::{Fnv1a, KeyHasher, Polynomial};

/// A single slot of the table, either empty or holding exactly one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Empty,
    Occupied(String),
}

/// The coarse state of the table
///
/// `Accepting` means at least one slot is still empty; `Full` means every slot is
/// occupied. The transition happens on the insert that fills the last empty slot, and
/// there is no way back, the table never evicts
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TableState {
    Accepting,
    Full,
}

/// The outcome of probing the table for a single key
///
/// `collisions` is the number of probe steps that landed on a slot occupied by a
/// different key before the probe resolved, the home bucket included
#[derive(Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The key was already stored
    Hit { collisions: u64 },
    /// The key was not stored; it has been placed in the first empty slot found
    Miss { collisions: u64 },
    /// Every slot holds a different key, so the key cannot be placed. The table is
    /// left untouched
    Exhausted,
}

/// A generic trait for probing tables
///
/// Technically not required as we're using static dispatch to speed things up instead
/// of dyn Table, but this gives flexibility for the future with no overhead, and lets
/// tests drive the simulator with hand-picked bucket placements
pub trait TableTrait {
    /// Probes for a key, inserting it on a miss
    ///
    /// Probing starts at the key's home bucket and walks sequential slots, wrapping
    /// modulo the capacity, until the key itself, an empty slot, or every slot has
    /// been seen
    ///
    /// # Arguments
    ///
    /// * `key`: The key being accessed
    ///
    /// returns: AccessOutcome
    fn probe_and_update(&mut self, key: &str) -> AccessOutcome;

    /// Gets the fixed number of slots
    fn capacity(&self) -> usize;

    /// Gets the number of occupied slots. Never exceeds the capacity
    fn occupied_count(&self) -> usize;

    /// Gets the coarse table state
    fn state(&self) -> TableState;

    /// Gets the ratio of occupied slots to capacity, in [0, 1]
    fn load_factor(&self) -> f64;

    /// Gets the number of empty slots. Useful for analysing table pressure or
    /// debugging
    fn empty_slot_count(&self) -> usize;
}

/// A fixed-capacity open-addressing table with linear probing, parameterised by a
/// string hasher
///
/// The general approach here is to have one solid implementation which is easy to
/// maintain and expand with more hashers without compromising on performance
///
/// To facilitate this we rely on Rust's monomorphisation and the inlining of the
/// hasher to keep the per-key cost down, which should be close to on par with writing
/// a specialised table for each hash function
#[derive(Debug)]
pub struct Table<H: KeyHasher> {
    slots: Vec<Slot>,
    occupied: usize,
    hasher: H,
}

impl<H: KeyHasher> Table<H> {
    /// Creates an empty table with the given number of slots
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Callers going through a `SimConfig` get this
    /// checked as a configuration error instead
    pub fn new(capacity: usize, hasher: H) -> Self {
        assert!(capacity > 0, "table capacity must be positive");
        Self {
            slots: vec![Slot::Empty; capacity],
            occupied: 0,
            hasher,
        }
    }

    /// The slot a key probes first
    fn home_bucket(&self, key: &str) -> usize {
        (self.hasher.hash(key) % self.slots.len() as u64) as usize
    }

    /// Read access to the slots, in index order
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }
}

impl<H: KeyHasher> TableTrait for Table<H> {
    fn probe_and_update(&mut self, key: &str) -> AccessOutcome {
        let capacity = self.slots.len();
        let start = self.home_bucket(key);
        let mut collisions = 0;
        for step in 0..capacity {
            let index = (start + step) % capacity;
            match &self.slots[index] {
                Slot::Occupied(stored) if stored == key => {
                    return AccessOutcome::Hit { collisions };
                }
                Slot::Occupied(_) => collisions += 1,
                Slot::Empty => {
                    self.slots[index] = Slot::Occupied(key.to_owned());
                    self.occupied += 1;
                    return AccessOutcome::Miss { collisions };
                }
            }
        }
        // Probing cycled through every slot without a match or an empty slot
        AccessOutcome::Exhausted
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn occupied_count(&self) -> usize {
        self.occupied
    }

    fn state(&self) -> TableState {
        if self.occupied == self.slots.len() {
            TableState::Full
        } else {
            TableState::Accepting
        }
    }

    fn load_factor(&self) -> f64 {
        self.occupied as f64 / self.slots.len() as f64
    }

    fn empty_slot_count(&self) -> usize {
        self.slots.len() - self.occupied
    }
}

/// Enum for the tables over the provided hashers
///
/// Using trait objects in Rust reduces boilerplate, but it is opaque to the compiler,
/// and we would be de-referencing once per key in the input. Branching on the concrete
/// types instead lets the compiler inline the hasher into the probe loop
#[derive(Debug)]
pub enum GenericTable {
    Fnv(Table<Fnv1a>),
    Polynomial(Table<Polynomial>),
}

impl From<Table<Fnv1a>> for GenericTable {
    fn from(value: Table<Fnv1a>) -> Self {
        Self::Fnv(value)
    }
}

impl From<Table<Polynomial>> for GenericTable {
    fn from(value: Table<Polynomial>) -> Self {
        Self::Polynomial(value)
    }
}

impl TableTrait for GenericTable {
    fn probe_and_update(&mut self, key: &str) -> AccessOutcome {
        match self {
            GenericTable::Fnv(t) => t.probe_and_update(key),
            GenericTable::Polynomial(t) => t.probe_and_update(key),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            GenericTable::Fnv(t) => t.capacity(),
            GenericTable::Polynomial(t) => t.capacity(),
        }
    }

    fn occupied_count(&self) -> usize {
        match self {
            GenericTable::Fnv(t) => t.occupied_count(),
            GenericTable::Polynomial(t) => t.occupied_count(),
        }
    }

    fn state(&self) -> TableState {
        match self {
            GenericTable::Fnv(t) => t.state(),
            GenericTable::Polynomial(t) => t.state(),
        }
    }

    fn load_factor(&self) -> f64 {
        match self {
            GenericTable::Fnv(t) => t.load_factor(),
            GenericTable::Polynomial(t) => t.load_factor(),
        }
    }

    fn empty_slot_count(&self) -> usize {
        match self {
            GenericTable::Fnv(t) => t.empty_slot_count(),
            GenericTable::Polynomial(t) => t.empty_slot_count(),
        }
    }
}
