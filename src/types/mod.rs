use std::ops;

use derive_more::From;
use ntex_bytes::Bytes;

/// Single entry of a tagged field section.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct TaggedField {
    pub tag: u32,
    pub data: Bytes,
}

impl TaggedField {
    pub fn new(tag: u32, data: impl Into<Bytes>) -> TaggedField {
        TaggedField {
            tag,
            data: data.into(),
        }
    }
}

/// Tagged fields of a flexible message version, ordered by tag.
#[derive(Debug, PartialEq, Eq, Clone, Hash, Default, From)]
pub struct TaggedFieldSet(pub Vec<TaggedField>);

impl TaggedFieldSet {
    pub fn new() -> TaggedFieldSet {
        TaggedFieldSet(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, TaggedField> {
        self.0.iter()
    }

    /// Data of the field with `tag`, if present.
    pub fn get(&self, tag: u32) -> Option<&Bytes> {
        self.0
            .binary_search_by_key(&tag, |field| field.tag)
            .ok()
            .map(|idx| &self.0[idx].data)
    }

    /// Insert or replace the field with `tag`, keeping tags ordered.
    pub fn insert(&mut self, tag: u32, data: impl Into<Bytes>) {
        let data = data.into();
        match self.0.binary_search_by_key(&tag, |field| field.tag) {
            Ok(idx) => self.0[idx].data = data,
            Err(idx) => self.0.insert(idx, TaggedField { tag, data }),
        }
    }
}

impl ops::Deref for TaggedFieldSet {
    type Target = Vec<TaggedField>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
