/// Slot index with a generation, so a handle to a removed entry never
/// aliases whatever later reuses its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Index {
    slot: u32,
    generation: u32,
}

impl Index {
    pub fn slot(&self) -> u32 {
        self.slot
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone)]
enum Entry<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32 },
}

#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    entries: Vec<Entry<T>>,
    free: Vec<u32>,
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
            entries: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> Index {
        self.len += 1;

        if let Some(slot) = self.free.pop() {
            let entry = &mut self.entries[slot as usize];
            let generation = match entry {
                Entry::Vacant { generation } => *generation,
                Entry::Occupied { .. } => unreachable!("free list points at an occupied slot"),
            };
            *entry = Entry::Occupied { generation, value };
            return Index { slot, generation };
        }

        let slot = self.entries.len() as u32;
        self.entries.push(Entry::Occupied {
            generation: 0,
            value,
        });
        Index {
            slot,
            generation: 0,
        }
    }

    pub fn remove(&mut self, index: Index) -> Option<T> {
        let entry = self.entries.get_mut(index.slot as usize)?;
        let live = matches!(
            entry,
            Entry::Occupied { generation, .. } if *generation == index.generation
        );
        if !live {
            return None;
        }

        let next = Entry::Vacant {
            generation: index.generation.wrapping_add(1),
        };
        match std::mem::replace(entry, next) {
            Entry::Occupied { value, .. } => {
                self.free.push(index.slot);
                self.len -= 1;
                Some(value)
            }
            Entry::Vacant { .. } => None,
        }
    }

    pub fn get(&self, index: Index) -> Option<&T> {
        match self.entries.get(index.slot as usize)? {
            Entry::Occupied { generation, value } if *generation == index.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, index: Index) -> Option<&mut T> {
        match self.entries.get_mut(index.slot as usize)? {
            Entry::Occupied { generation, value } if *generation == index.generation => Some(value),
            _ => None,
        }
    }

    pub fn contains(&self, index: Index) -> bool {
        self.get(index).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Index, &T)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| match entry {
                Entry::Occupied { generation, value } => Some((
                    Index {
                        slot: slot as u32,
                        generation: *generation,
                    },
                    value,
                )),
                Entry::Vacant { .. } => None,
            })
    }

    pub fn indices(&self) -> Vec<Index> {
        self.iter().map(|(index, _)| index).collect()
    }

    pub fn clear(&mut self) {
        for index in self.indices() {
            self.remove(index);
        }
    }
}
