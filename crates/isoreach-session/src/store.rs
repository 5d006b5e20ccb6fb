use isoreach_core::IsochroneRecord;

/// Ordered working set of committed isochrones.
///
/// Insertion order is display order (a rendering concern only). Ids are
/// UUID-based and minted at commit time, so no id is ever reused even
/// across remove/re-add sequences. Mutation happens only through the
/// orchestrator; readers get iteration and lookup.
#[derive(Debug, Default)]
pub struct IsochroneStore {
    records: Vec<IsochroneRecord>,
}

impl IsochroneStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, record: IsochroneRecord) {
        self.records.push(record);
    }

    /// Removes and returns the record with this id. Absent ids are a no-op,
    /// not an error.
    pub(crate) fn remove(&mut self, id: &str) -> Option<IsochroneRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub(crate) fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&IsochroneRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IsochroneRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use geojson::{Geometry, Value};
    use isoreach_core::{IsochroneRequest, Location, TravelMode};

    use super::*;

    fn record(id: &str) -> IsochroneRecord {
        IsochroneRecord {
            id: id.to_string(),
            request: IsochroneRequest {
                location: Location::new(35.6812, 139.7671),
                time_minutes: 30,
                mode: TravelMode::Walking,
            },
            geometry: Geometry::new(Value::Polygon(vec![vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
                vec![0.0, 0.0],
            ]])),
            color: TravelMode::Walking.color().to_string(),
        }
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut store = IsochroneStore::new();
        store.insert(record("a"));
        store.insert(record("b"));
        store.insert(record("c"));
        let ids: Vec<&str> = store.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = IsochroneStore::new();
        store.insert(record("a"));
        assert!(store.remove("a").is_some());
        assert!(store.remove("a").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn remove_of_absent_id_leaves_store_untouched() {
        let mut store = IsochroneStore::new();
        store.insert(record("a"));
        assert!(store.remove("b").is_none());
        assert_eq!(store.len(), 1);
        assert!(store.contains("a"));
    }

    #[test]
    fn clear_empties_any_contents() {
        let mut store = IsochroneStore::new();
        store.insert(record("a"));
        store.insert(record("b"));
        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert_eq!(store.iter().count(), 0);
        // Clearing again is harmless.
        assert_eq!(store.clear(), 0);
    }
}
