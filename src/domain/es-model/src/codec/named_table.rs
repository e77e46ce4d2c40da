// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Name-keyed collection that keeps insertion order.
///
/// Used for every `name -> definition` object of the wire format
/// (analysis tables, mapping properties, aggregations) so that encoding
/// reproduces the order in which definitions were added or decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTable<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for NamedTable<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> NamedTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Inserts or replaces a definition, returning the previous one
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        let name = name.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            return Some(std::mem::replace(existing, value));
        }
        self.entries.push((name, value));
        None
    }

    pub fn remove(&mut self, name: &str) -> Option<V> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Reorders entries to follow the given name sequence, entries not named
    /// there keep their relative order at the end
    pub fn reorder<'a>(&mut self, order: impl IntoIterator<Item = &'a str>) {
        let mut sorted = Vec::with_capacity(self.entries.len());
        for name in order {
            if let Some(pos) = self.entries.iter().position(|(n, _)| n == name) {
                sorted.push(self.entries.remove(pos));
            }
        }
        sorted.append(&mut self.entries);
        self.entries = sorted;
    }
}

impl<V: PartialEq> NamedTable<V> {
    /// Adds a definition unless one with the same name is present.
    ///
    /// Returns `Ok(true)` when added, `Ok(false)` when an identical definition
    /// is already present and `Err(existing)` when the names clash.
    pub fn try_add(&mut self, name: impl Into<String>, value: V) -> Result<bool, &V> {
        let name = name.into();
        match self.entries.iter().position(|(n, _)| *n == name) {
            Some(pos) if self.entries[pos].1 == value => Ok(false),
            Some(pos) => Err(&self.entries[pos].1),
            None => {
                self.entries.push((name, value));
                Ok(true)
            }
        }
    }
}

impl<V> FromIterator<(String, V)> for NamedTable<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, value) in iter {
            table.insert(name, value);
        }
        table
    }
}

impl<V> IntoIterator for NamedTable<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
