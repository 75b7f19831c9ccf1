use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DocError, Result, pointer_segment};
use crate::Node;

/// Where a newly created entry goes in its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement<'a> {
    /// Immediately after the named entry. Falls back to `End` when the anchor
    /// is not present.
    After(&'a str),
    /// As the last entry.
    End,
}

/// An insertion-ordered JSON object with unique keys.
///
/// Every mutation keeps the relative order of the entries it does not touch.
/// Positional inserts shift later entries rather than swapping them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Object {
    entries: IndexMap<String, Node>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Position of `key` among the entries
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.entries.get_index_of(key)
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries.get_mut(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Node)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Set `key` to `value`. An existing entry keeps its position; a new entry
    /// is appended. Returns the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.entries.insert(key.into(), value.into())
    }

    /// Add `key` as the last entry. An existing `key` is a [`DocError::Conflict`]
    /// and keeps its value.
    pub fn append(&mut self, key: &str, value: impl Into<Node>) -> Result<()> {
        if self.entries.contains_key(key) {
            return Err(DocError::conflict(pointer_segment(key)));
        }
        self.entries.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Set `key` to `value` immediately after `anchor`. If `key` already exists it
    /// is moved. A missing anchor appends.
    pub fn insert_after(
        &mut self,
        anchor: &str,
        key: impl Into<String>,
        value: impl Into<Node>,
    ) -> Option<Node> {
        self.place(Placement::After(anchor), key.into(), value.into()).1
    }

    /// Returns the index the entry ended up at and the value it replaced.
    fn place(
        &mut self,
        placement: Placement<'_>,
        key: String,
        value: Node,
    ) -> (usize, Option<Node>) {
        let previous = self.entries.shift_remove(&key);
        let anchor = match placement {
            Placement::After(anchor) => self.entries.get_index_of(anchor),
            Placement::End => None,
        };
        let index = match anchor {
            Some(anchor) => {
                self.entries.shift_insert(anchor + 1, key, value);
                anchor + 1
            }
            None => self.entries.insert_full(key, value).0,
        };
        (index, previous)
    }

    /// Remove `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    /// Rename `from` to `to` without moving it. Returns false when `from` does
    /// not exist.
    ///
    /// An existing `to` entry is a [`DocError::Conflict`] and leaves the object
    /// untouched.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<bool> {
        let Some(index) = self.entries.get_index_of(from) else {
            return Ok(false);
        };
        if from == to {
            return Ok(true);
        }
        if self.entries.contains_key(to) {
            return Err(DocError::conflict(pointer_segment(to)));
        }
        let Some((_, value)) = self.entries.shift_remove_index(index) else {
            return Ok(false);
        };
        self.entries.shift_insert(index, to.to_string(), value);
        Ok(true)
    }

    /// Typed access to a child mapping. `Ok(None)` when the key is absent.
    pub fn object(&self, key: &str) -> Result<Option<&Object>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Node::Object(obj)) => Ok(Some(obj)),
            Some(other) => Err(DocError::schema(
                pointer_segment(key),
                "object",
                other.kind_name(),
            )),
        }
    }

    /// Mutable variant of [`Object::object`].
    pub fn object_mut(&mut self, key: &str) -> Result<Option<&mut Object>> {
        match self.entries.get_mut(key) {
            None => Ok(None),
            Some(Node::Object(obj)) => Ok(Some(obj)),
            Some(other) => Err(DocError::schema(
                pointer_segment(key),
                "object",
                other.kind_name(),
            )),
        }
    }

    /// Return the child mapping at `key`, creating an empty one at `placement`
    /// if it does not exist.
    ///
    /// An existing child is returned as is and never moves. A non-object value
    /// at `key` is a [`DocError::SchemaViolation`].
    pub fn get_or_insert_object(
        &mut self,
        key: &str,
        placement: Placement<'_>,
    ) -> Result<&mut Object> {
        let index = match self.entries.get_index_of(key) {
            Some(index) => index,
            None => {
                let (index, _) =
                    self.place(placement, key.to_string(), Node::Object(Object::new()));
                index
            }
        };
        match &mut self.entries[index] {
            Node::Object(obj) => Ok(obj),
            other => Err(DocError::schema(
                pointer_segment(key),
                "object",
                other.kind_name(),
            )),
        }
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
