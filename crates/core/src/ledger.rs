//! In-memory stock ledger: ordered entries indexed by identifier.

use std::collections::HashMap;

use crate::entity::{Entity, Stocked};
use crate::error::{DomainError, DomainResult};

/// Ordered collection of entities with O(1) lookup by id.
///
/// Insertion order is kept so a document can be written back with its
/// elements where they were.
#[derive(Debug, Clone)]
pub struct StockLedger<E: Entity> {
    entries: Vec<E>,
    index: HashMap<E::Id, usize>,
}

impl<E: Entity> StockLedger<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a ledger from loaded entries, rejecting repeated identifiers.
    pub fn from_entries(entries: Vec<E>) -> DomainResult<Self> {
        let mut ledger = Self {
            entries: Vec::with_capacity(entries.len()),
            index: HashMap::with_capacity(entries.len()),
        };
        for entry in entries {
            ledger.push(entry)?;
        }
        Ok(ledger)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &E::Id) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.index.get(id).map(|&pos| &self.entries[pos])
    }

    pub fn get_mut(&mut self, id: &E::Id) -> Option<&mut E> {
        match self.index.get(id) {
            Some(&pos) => self.entries.get_mut(pos),
            None => None,
        }
    }

    /// First entry (in insertion order) matching `pred`.
    pub fn find_mut(&mut self, mut pred: impl FnMut(&E) -> bool) -> Option<&mut E> {
        self.entries.iter_mut().find(|e| pred(e))
    }

    /// Append a new entry.
    pub fn push(&mut self, entry: E) -> DomainResult<()> {
        let id = entry.id().clone();
        if self.index.contains_key(&id) {
            return Err(DomainError::duplicate(format!("{id:?}")));
        }
        self.index.insert(id, self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<E> {
        self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &E::Id> {
        self.entries.iter().map(|e| e.id())
    }
}

impl<E: Entity + Stocked> StockLedger<E> {
    pub fn stock_of(&self, id: &E::Id) -> Option<u64> {
        self.get(id).map(Stocked::stock)
    }

    /// `(id, stock)` pairs in insertion order.
    pub fn stock_levels(&self) -> Vec<(E::Id, u64)> {
        self.entries
            .iter()
            .map(|e| (e.id().clone(), e.stock()))
            .collect()
    }
}

impl<E: Entity> Default for StockLedger<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Bin {
        code: String,
        stock: u64,
    }

    impl Entity for Bin {
        type Id = String;

        fn id(&self) -> &String {
            &self.code
        }
    }

    impl Stocked for Bin {
        fn stock(&self) -> u64 {
            self.stock
        }

        fn stock_mut(&mut self) -> &mut u64 {
            &mut self.stock
        }
    }

    fn bin(code: &str, stock: u64) -> Bin {
        Bin {
            code: code.to_string(),
            stock,
        }
    }

    #[test]
    fn lookup_by_id_after_building_from_entries() {
        let ledger = StockLedger::from_entries(vec![bin("a", 1), bin("b", 2)]).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.stock_of(&"b".to_string()), Some(2));
        assert!(ledger.get(&"c".to_string()).is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = StockLedger::from_entries(vec![bin("a", 1), bin("a", 5)]).unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[test]
    fn mutations_through_get_mut_are_visible_in_entries() {
        let mut ledger = StockLedger::from_entries(vec![bin("a", 1), bin("b", 2)]).unwrap();
        *ledger.get_mut(&"a".to_string()).unwrap().stock_mut() += 9;
        assert_eq!(ledger.entries()[0].stock, 10);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut ledger = StockLedger::new();
        ledger.push(bin("z", 0)).unwrap();
        ledger.push(bin("a", 3)).unwrap();
        let levels = ledger.stock_levels();
        assert_eq!(levels, vec![("z".to_string(), 0), ("a".to_string(), 3)]);
        let codes: Vec<_> = ledger.into_entries().into_iter().map(|b| b.code).collect();
        assert_eq!(codes, vec!["z", "a"]);
    }
}
