use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Label table: hashed name to byte offset inside the executable image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelTable {
    map: HashMap<u64, u32>,
}

impl LabelTable {
    pub fn new() -> LabelTable {
        LabelTable::default()
    }

    /// Records a definition. The first definition wins; a second one is
    /// rejected so the caller can report it.
    pub fn define(&mut self, hash: u64, offset: u32) -> bool {
        match self.map.entry(hash) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(offset);
                true
            }
        }
    }

    pub fn lookup(&self, hash: u64) -> Option<u32> {
        self.map.get(&hash).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
