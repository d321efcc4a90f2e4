// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Insertion-ordered, token-addressed subscriber registry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

// Tokens draw from one process-wide counter so a token from one bag can
// never alias an entry of another.
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(0);

/// Opaque handle identifying one live entry in a [`Bag`].
///
/// Tokens are never reused: a token whose entry has been removed never
/// matches again, so removing with a stale or foreign token is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(u64);

/// An unordered-removal, insertion-ordered-iteration multiset.
///
/// A `Bag` is the registry a stream keeps its observers in. Entries are
/// addressed by the [`Token`] returned from [`Bag::insert`]; removal is
/// amortized O(1) and tolerant of stale or foreign tokens. Iteration via
/// [`Bag::snapshot`] clones the live entries, so an observer removing itself
/// while being delivered to cannot skip or double-deliver to any other
/// still-registered entry.
pub struct Bag<T> {
    // Tombstoned slots keep iteration order stable under O(1) removal; the
    // vector is compacted once vacancies outnumber live entries.
    entries: Vec<Option<(Token, T)>>,
    index: HashMap<Token, usize>,
    vacancies: usize,
}

impl<T> Bag<T> {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            vacancies: 0,
        }
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the bag holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Inserts a value, returning the token that addresses it.
    pub fn insert(&mut self, value: T) -> Token {
        let token = Token(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed));
        self.index.insert(token, self.entries.len());
        self.entries.push(Some((token, value)));
        token
    }

    /// Removes the entry addressed by `token`, returning it if it was still
    /// present. Stale or foreign tokens are a no-op.
    pub fn remove(&mut self, token: Token) -> Option<T> {
        let slot = self.index.remove(&token)?;
        let removed = self.entries[slot].take().map(|(_, value)| value);
        self.vacancies += 1;
        if self.vacancies > self.entries.len() / 2 {
            self.compact();
        }
        removed
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.vacancies = 0;
    }

    /// Iterates over the live entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries
            .iter()
            .filter_map(|slot| slot.as_ref().map(|(_, value)| value))
    }

    fn compact(&mut self) {
        self.entries.retain(Option::is_some);
        self.index.clear();
        for (position, slot) in self.entries.iter().enumerate() {
            if let Some((token, _)) = slot {
                self.index.insert(*token, position);
            }
        }
        self.vacancies = 0;
    }
}

impl<T: Clone> Bag<T> {
    /// Clones the live entries in insertion order.
    ///
    /// Streams deliver events against a snapshot with their lock released,
    /// which is what makes reentrant removal during delivery safe.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Default for Bag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Bag<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bag").field("len", &self.len()).finish()
    }
}
