//! Reconciliation between the isochrone store and a map drawing surface.
//!
//! The surface is an external collaborator (a GL map widget in practice),
//! modeled as a trait at the granularity of whole fill+outline layer pairs.
//! Reconciliation is full-state: stale pairs are removed, then every live
//! record's pair is removed and recreated, so a repeated sync never
//! duplicates layers.

use isoreach_core::Location;

use crate::store::IsochroneStore;

/// The drawing surface's interface, as seen by the session.
///
/// `add_layer_pair` draws one fill layer plus one outline layer named from
/// `id`; `remove_layer_pair` removes both. `layer_ids` enumerates the base
/// ids of currently drawn pairs. At most one location marker exists.
pub trait MapSurface {
    /// Whether the surface has finished its own asynchronous style/load
    /// initialization. Layer mutations before this point are lost.
    fn is_loaded(&self) -> bool;

    fn layer_ids(&self) -> Vec<String>;

    fn add_layer_pair(&mut self, id: &str, geometry: &geojson::Geometry, color: &str);

    fn remove_layer_pair(&mut self, id: &str);

    fn set_marker(&mut self, latitude: f64, longitude: f64);

    fn clear_marker(&mut self);

    fn fly_to(&mut self, latitude: f64, longitude: f64);
}

/// Keeps a surface's layer set equal to the store's record set, deferring
/// across the surface's load window.
#[derive(Debug, Default)]
pub struct LayerSync {
    pending: bool,
}

impl LayerSync {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles the surface with the store, or marks the sync pending if
    /// the surface has not finished loading yet.
    pub fn sync<S: MapSurface + ?Sized>(&mut self, surface: &mut S, store: &IsochroneStore) {
        if !surface.is_loaded() {
            self.pending = true;
            return;
        }
        Self::reconcile(surface, store);
    }

    /// Called when the surface finishes loading. Replays a deferred sync
    /// exactly once; a load notification with nothing pending does nothing.
    pub fn notify_loaded<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        store: &IsochroneStore,
    ) {
        if !self.pending {
            return;
        }
        self.pending = false;
        Self::reconcile(surface, store);
    }

    fn reconcile<S: MapSurface + ?Sized>(surface: &mut S, store: &IsochroneStore) {
        for id in surface.layer_ids() {
            if !store.contains(&id) {
                surface.remove_layer_pair(&id);
            }
        }
        for record in store.iter() {
            // Remove-then-add keeps the call idempotent when the pair is
            // already drawn.
            surface.remove_layer_pair(&record.id);
            surface.add_layer_pair(&record.id, &record.geometry, &record.color);
        }
    }

    /// Moves the single current-location marker and recenters the view.
    /// The previous marker, if any, is removed first.
    pub fn show_location<S: MapSurface + ?Sized>(surface: &mut S, location: &Location) {
        surface.clear_marker();
        surface.set_marker(location.latitude, location.longitude);
        surface.fly_to(location.latitude, location.longitude);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use geojson::{Geometry, Value};
    use isoreach_core::{IsochroneRecord, IsochroneRequest, Location, TravelMode};

    use super::*;

    #[derive(Default)]
    struct FakeSurface {
        loaded: bool,
        layers: BTreeSet<String>,
        marker: Option<(f64, f64)>,
        center: Option<(f64, f64)>,
        add_calls: usize,
        marker_sets: usize,
    }

    impl MapSurface for FakeSurface {
        fn is_loaded(&self) -> bool {
            self.loaded
        }

        fn layer_ids(&self) -> Vec<String> {
            self.layers.iter().cloned().collect()
        }

        fn add_layer_pair(&mut self, id: &str, _geometry: &Geometry, _color: &str) {
            assert!(
                self.layers.insert(id.to_string()),
                "duplicate layer pair for {id}"
            );
            self.add_calls += 1;
        }

        fn remove_layer_pair(&mut self, id: &str) {
            self.layers.remove(id);
        }

        fn set_marker(&mut self, latitude: f64, longitude: f64) {
            assert!(self.marker.is_none(), "marker added before previous removed");
            self.marker = Some((latitude, longitude));
            self.marker_sets += 1;
        }

        fn clear_marker(&mut self) {
            self.marker = None;
        }

        fn fly_to(&mut self, latitude: f64, longitude: f64) {
            self.center = Some((latitude, longitude));
        }
    }

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
            color: "#10B981".to_string(),
        }
    }

    fn store_with(ids: &[&str]) -> IsochroneStore {
        let mut store = IsochroneStore::new();
        for id in ids {
            store.insert(record(id));
        }
        store
    }

    #[test]
    fn layers_match_store_after_sync() {
        let mut surface = FakeSurface {
            loaded: true,
            ..FakeSurface::default()
        };
        let store = store_with(&["isochrone-a", "isochrone-b"]);

        let mut sync = LayerSync::new();
        sync.sync(&mut surface, &store);

        let drawn: Vec<String> = surface.layer_ids();
        assert_eq!(drawn, vec!["isochrone-a", "isochrone-b"]);
    }

    #[test]
    fn orphaned_layers_are_removed() {
        let mut surface = FakeSurface {
            loaded: true,
            ..FakeSurface::default()
        };
        surface.layers.insert("isochrone-gone".to_string());
        let store = store_with(&["isochrone-kept"]);

        LayerSync::new().sync(&mut surface, &store);

        assert_eq!(surface.layer_ids(), vec!["isochrone-kept"]);
    }

    #[test]
    fn repeated_sync_is_idempotent() {
        let mut surface = FakeSurface {
            loaded: true,
            ..FakeSurface::default()
        };
        let store = store_with(&["isochrone-a"]);

        let mut sync = LayerSync::new();
        sync.sync(&mut surface, &store);
        sync.sync(&mut surface, &store);
        sync.sync(&mut surface, &store);

        // The FakeSurface would have panicked on a duplicate add; also the
        // final set must still be exactly one pair.
        assert_eq!(surface.layer_ids(), vec!["isochrone-a"]);
    }

    #[test]
    fn sync_before_load_defers_and_replays_exactly_once() {
        let mut surface = FakeSurface::default();
        let store = store_with(&["isochrone-a"]);

        let mut sync = LayerSync::new();
        sync.sync(&mut surface, &store);
        assert!(surface.layer_ids().is_empty(), "nothing drawn before load");

        surface.loaded = true;
        sync.notify_loaded(&mut surface, &store);
        assert_eq!(surface.layer_ids(), vec!["isochrone-a"]);
        assert_eq!(surface.add_calls, 1);

        // A second load notification has nothing pending.
        sync.notify_loaded(&mut surface, &store);
        assert_eq!(surface.add_calls, 1);
    }

    #[test]
    fn cleared_store_leaves_zero_layers() {
        let mut surface = FakeSurface {
            loaded: true,
            ..FakeSurface::default()
        };
        let mut store = store_with(&["isochrone-a", "isochrone-b"]);
        let mut sync = LayerSync::new();
        sync.sync(&mut surface, &store);

        store.clear();
        sync.sync(&mut surface, &store);

        assert!(surface.layer_ids().is_empty());
    }

    #[test]
    fn selecting_a_location_replaces_the_marker_and_recenters() {
        let mut surface = FakeSurface {
            loaded: true,
            ..FakeSurface::default()
        };

        LayerSync::show_location(&mut surface, &Location::new(35.68, 139.76));
        LayerSync::show_location(&mut surface, &Location::new(35.42, 136.76));

        assert_eq!(surface.marker, Some((35.42, 136.76)));
        assert_eq!(surface.center, Some((35.42, 136.76)));
        assert_eq!(surface.marker_sets, 2);
    }
}
