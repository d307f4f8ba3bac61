use super::{CellPairs, Value};

/// Ordered association list with keys unique under structural equality.
///
/// Lookup and insertion are linear scans. Maps stay small in practice: most
/// are the bindings produced by one pattern match.
#[derive(Clone, Default, Debug)]
pub struct MapValue {
    entries: Vec<(Value, Value)>,
}

impl MapValue {
    pub fn new() -> Self {
        MapValue::default()
    }

    /// A one-entry map.
    pub fn singleton(key: Value, value: Value) -> Self {
        MapValue {
            entries: vec![(key, value)],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.equals(key))
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    /// Insert a key that must not be present yet.
    ///
    /// On a duplicate key the map is unchanged and the rejected key is
    /// handed back.
    pub fn insert_new(&mut self, key: Value, value: Value) -> Result<(), Value> {
        if self.contains_key(&key) {
            return Err(key);
        }
        self.entries.push((key, value));
        Ok(())
    }

    /// Set `key`, replacing an existing entry in place.
    pub fn put(&mut self, key: Value, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| k.equals(&key)) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Move every entry of `other` into `self`. A key present in both is
    /// returned as the error; entries before it have already been moved.
    pub fn merge(&mut self, other: MapValue) -> Result<(), Value> {
        for (key, value) in other.entries {
            self.insert_new(key, value)?;
        }
        Ok(())
    }

    /// Order-independent structural equality: equal length, and every entry
    /// on each side has an equal key with an equal value on the other.
    pub fn equals(&self, other: &MapValue) -> bool {
        self.equals_in(other, &mut CellPairs::new())
    }

    pub(super) fn equals_in(&self, other: &MapValue, cells: &mut CellPairs) -> bool {
        let mut covers = |a: &MapValue, b: &MapValue| {
            a.iter().all(|(k, v)| {
                b.get(k)
                    .is_some_and(|other_v| v.equals_in(other_v, cells))
            })
        };
        self.len() == other.len() && covers(self, other) && covers(other, self)
    }

    /// Move every key and value into `out`, leaving the map empty.
    pub(super) fn drain_into(&mut self, out: &mut Vec<Value>) {
        for (key, value) in self.entries.drain(..) {
            out.push(key);
            out.push(value);
        }
    }
}

impl FromIterator<(Value, Value)> for MapValue {
    /// Collect entries, later duplicates replacing earlier ones.
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut map = MapValue::new();
        for (k, v) in iter {
            map.put(k, v);
        }
        map
    }
}

impl IntoIterator for MapValue {
    type Item = (Value, Value);
    type IntoIter = std::vec::IntoIter<(Value, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
