use thiserror::Error;
use uuid::Uuid;

use isoreach_core::{IsochroneRecord, IsochroneRequest, Location, RequestError, TravelMode};
use isoreach_providers::{MapboxClient, ProviderError, TransitClient};

use crate::command::{SessionCommand, SessionEvent};
use crate::store::IsochroneStore;

/// Errors surfaced to the user when a command fails. On any failure the
/// store is left exactly as it was.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Turns user commands into provider calls and store mutations.
///
/// Each add action issues exactly one outbound request (no coalescing or
/// deduplication) and commits exactly one record on success. Mode dispatch:
/// walking/driving go to the road-network provider, transit to its own.
pub struct Orchestrator {
    mapbox: MapboxClient,
    transit: TransitClient,
    store: IsochroneStore,
    current_location: Option<Location>,
}

impl Orchestrator {
    #[must_use]
    pub fn new(mapbox: MapboxClient, transit: TransitClient) -> Self {
        Self {
            mapbox,
            transit,
            store: IsochroneStore::new(),
            current_location: None,
        }
    }

    #[must_use]
    pub fn store(&self) -> &IsochroneStore {
        &self.store
    }

    #[must_use]
    pub fn current_location(&self) -> Option<&Location> {
        self.current_location.as_ref()
    }

    /// Dispatches one command and reports what changed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when an add action fails validation or its
    /// provider call fails; the other commands are infallible.
    pub async fn handle(&mut self, command: SessionCommand) -> Result<SessionEvent, SessionError> {
        match command {
            SessionCommand::AddIsochrone(request) => {
                let record = self.add_isochrone(request).await?;
                Ok(SessionEvent::IsochroneAdded {
                    id: record.id,
                    mode: record.request.mode,
                    time_minutes: record.request.time_minutes,
                })
            }
            SessionCommand::RemoveIsochrone(id) => {
                self.remove_isochrone(&id);
                Ok(SessionEvent::IsochroneRemoved { id })
            }
            SessionCommand::ClearAll => Ok(SessionEvent::Cleared {
                count: self.clear_all(),
            }),
            SessionCommand::SelectLocation(location) => {
                self.select_location(location.clone());
                Ok(SessionEvent::LocationSelected(location))
            }
        }
    }

    /// Fetches one isochrone and commits it to the store.
    ///
    /// Takes the first feature of the normalized response; an empty feature
    /// list (or a first feature without geometry) is
    /// [`ProviderError::EmptyResult`], never a zero-polygon success.
    ///
    /// # Errors
    ///
    /// Any validation or provider failure; the store is unchanged on every
    /// failure path.
    pub async fn add_isochrone(
        &mut self,
        request: IsochroneRequest,
    ) -> Result<IsochroneRecord, SessionError> {
        request.validate()?;

        let collection = match request.mode {
            TravelMode::Walking | TravelMode::Driving => {
                self.mapbox
                    .fetch_isochrone(&request.location, request.time_minutes, request.mode)
                    .await?
            }
            TravelMode::Transit => {
                self.transit
                    .fetch_isochrone(&request.location, request.time_minutes)
                    .await?
            }
        };

        let first = collection
            .features
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResult)?;
        let geometry = first.geometry.ok_or(ProviderError::EmptyResult)?;

        let record = IsochroneRecord {
            id: mint_record_id(),
            color: request.mode.color().to_string(),
            request,
            geometry,
        };
        tracing::debug!(id = %record.id, mode = %record.request.mode, "committed isochrone");
        self.store.insert(record.clone());
        Ok(record)
    }

    /// Removes the record with this id; absent ids are a no-op.
    pub fn remove_isochrone(&mut self, id: &str) -> Option<IsochroneRecord> {
        self.store.remove(id)
    }

    /// Empties the store unconditionally, returning how many records went.
    pub fn clear_all(&mut self) -> usize {
        self.store.clear()
    }

    /// Replaces the single current location.
    pub fn select_location(&mut self, location: Location) {
        self.current_location = Some(location);
    }
}

/// Record ids share the layer-name prefix so the map surface can enumerate
/// isochrone layers without tracking them separately.
fn mint_record_id() -> String {
    format!("isochrone-{}", Uuid::new_v4())
}
