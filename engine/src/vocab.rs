use std::collections::HashMap;

/// Bidirectional symbol table shared by both indices: ids are dense
/// from 0 in first-seen order, and entries are never removed.
#[derive(Debug, Default, Clone)]
pub struct Vocabulary {
    ids: HashMap<String, u32>,
    entries: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `name`, interning it with the next sequential id if unseen.
    pub fn intern(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.entries.len() as u32;
        self.entries.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: u32) -> &str {
        &self.entries[id as usize]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_in_first_seen_order() {
        let mut v = Vocabulary::new();
        assert_eq!(v.intern("cat"), 0);
        assert_eq!(v.intern("sat"), 1);
        assert_eq!(v.intern("cat"), 0);
        assert_eq!(v.intern("mat"), 2);
        assert_eq!(v.len(), 3);
        assert_eq!(v.name(1), "sat");
        assert_eq!(v.get("mat"), Some(2));
        assert_eq!(v.get("dog"), None);
    }
}
