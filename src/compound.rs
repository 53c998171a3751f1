use std::fmt;
use std::iter::FromIterator;

use indexmap::IndexMap;

use crate::Value;

/// An ordered map of member names to values, the NBT analog of a JSON object.
///
/// Insertion order is preserved and is also the order members are written on
/// the wire, so an unmutated compound re-encodes byte-for-byte.
#[derive(Clone, PartialEq, Default)]
pub struct Compound {
    map: IndexMap<String, Value>,
}

impl Compound {
    pub fn new() -> Compound {
        Compound {
            map: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.map.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Insert a member. If the key already exists its value is replaced (last
    /// write wins) and the member keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.map.insert(key.into(), value)
    }

    /// Remove a member, preserving the order of the remaining members.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.map.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.map.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.map.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.map.values()
    }
}

impl fmt::Debug for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.map.fmt(f)
    }
}

impl FromIterator<(String, Value)> for Compound {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Compound {
        let mut c = Compound::new();
        for (k, v) in iter {
            c.insert(k, v);
        }
        c
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

impl IntoIterator for Compound {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}
