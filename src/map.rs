//! Ordered, case-insensitive section storage.
//!
//! [`SectionMap`] wraps an [`IndexMap`] keyed by the ASCII-lowercased section
//! name. This gives us:
//!
//! - **Uniqueness**: `[Net]` and `[NET]` can never coexist
//! - **File order**: sections iterate in insertion order, so writing a loaded
//!   document keeps its layout
//! - **Stable handles**: the parser keeps a section index as its cursor
//!   instead of a reference into the map

use crate::model::Section;
use crate::text::fold;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// The sections of a document, in insertion order.
///
/// Index 0 is always the default (unnamed) section; [`SectionMap::new`]
/// creates it and [`SectionMap::remove`] refuses to remove it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SectionMap(IndexMap<String, Section>);

impl SectionMap {
    pub(crate) fn new() -> Self {
        let mut map = IndexMap::with_capacity(8);
        map.insert(String::new(), Section::new(""));
        SectionMap(map)
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Section> {
        self.0.get(&fold(name))
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.0.get_mut(&fold(name))
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.0.get_index_of(&fold(name))
    }

    pub(crate) fn get_index_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.0.get_index_mut(index).map(|(_, section)| section)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&fold(name))
    }

    /// Appends `section` unless its name is taken. Returns the index of the
    /// new section, or `None` when it was rejected.
    pub(crate) fn insert(&mut self, section: Section) -> Option<usize> {
        match self.0.entry(fold(section.name())) {
            Entry::Occupied(_) => None,
            Entry::Vacant(entry) => {
                let index = entry.index();
                entry.insert(section);
                Some(index)
            }
        }
    }

    /// Removes a named section, keeping the order of the rest.
    pub(crate) fn remove(&mut self, name: &str) -> Option<Section> {
        if name.is_empty() {
            return None;
        }
        self.0.shift_remove(&fold(name))
    }

    pub(crate) fn default_section_mut(&mut self) -> &mut Section {
        self.0
            .entry(String::new())
            .or_insert_with(|| Section::new(""))
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn iter(&self) -> indexmap::map::Values<'_, String, Section> {
        self.0.values()
    }
}

impl Default for SectionMap {
    fn default() -> Self {
        Self::new()
    }
}
