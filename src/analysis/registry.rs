//! Identity cache: exactly one arena slot per canonical entity name.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::dex::error::DexError;

/// Typed index into one of the analysis arenas.
pub trait ArenaKey: Copy + Eq + Hash + fmt::Debug {
    fn from_index(index: usize) -> Self;
    /// Like `from_index`, but `None` for indexes no key can hold.
    fn try_from_index(index: usize) -> Option<Self>;
    fn index(self) -> usize;
}

/// Structural identity of a raw entity: the image it lives in and its pool id there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub image: usize,
    pub id: u32,
}

impl RecordKey {
    pub fn new(image: usize, id: u32) -> Self {
        RecordKey { image, id }
    }
}

/// The two ways to address a cached entity.
#[derive(Debug, Clone, Copy)]
pub enum CacheKey<'a> {
    Record(RecordKey),
    Name(&'a str),
}

#[derive(Debug)]
struct IdentityCache<K> {
    by_name: HashMap<String, K>,
    by_record: HashMap<RecordKey, K>,
}

impl<K> Default for IdentityCache<K> {
    fn default() -> Self {
        IdentityCache { by_name: HashMap::new(), by_record: HashMap::new() }
    }
}

/// Arena of analysis entities plus the identity cache that addresses it.
#[derive(Debug)]
pub struct Registry<K, T> {
    arena: Vec<T>,
    cache: IdentityCache<K>,
}

impl<K, T> Default for Registry<K, T> {
    fn default() -> Self {
        Registry { arena: Vec::new(), cache: IdentityCache::default() }
    }
}

impl<K: ArenaKey, T> Registry<K, T> {
    /// Return the key for `name`, creating the entity with `make` on first sight.
    /// The second element is true when the entity was created by this call.
    pub(crate) fn get_or_create(&mut self, name: &str, make: impl FnOnce(K) -> T) -> (K, bool) {
        if let Some(key) = self.cache.by_name.get(name) {
            return (*key, false);
        }
        let key = K::from_index(self.arena.len());
        self.arena.push(make(key));
        self.cache.by_name.insert(name.to_string(), key);
        (key, true)
    }

    /// Map a structural record onto an existing key. Rebinding a record to
    /// another key would split one raw entity over two wrappers.
    pub(crate) fn bind(&mut self, record: RecordKey, key: K) -> Result<(), DexError> {
        match self.cache.by_record.get(&record) {
            Some(existing) if *existing != key => Err(DexError::invariant(&format!(
                "record {}:{} already bound to {:?}, refusing {:?}",
                record.image, record.id, existing, key
            ))),
            Some(_) => Ok(()),
            None => {
                self.cache.by_record.insert(record, key);
                Ok(())
            }
        }
    }

    pub fn lookup(&self, key: CacheKey<'_>) -> Option<K> {
        match key {
            CacheKey::Record(r) => self.cache.by_record.get(&r).copied(),
            CacheKey::Name(n) => self.cache.by_name.get(n).copied(),
        }
    }

    pub fn get(&self, key: K) -> Option<&T> {
        self.arena.get(key.index())
    }

    pub(crate) fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.arena.get_mut(key.index())
    }

    pub fn resolve(&self, key: CacheKey<'_>) -> Option<&T> {
        self.lookup(key).and_then(|k| self.get(k))
    }

    /// Entities in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.arena.iter()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}
