use isoreach_core::{IsochroneRequest, Location, TravelMode};

/// User actions, consumed one at a time by the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    AddIsochrone(IsochroneRequest),
    RemoveIsochrone(String),
    ClearAll,
    SelectLocation(Location),
}

/// What a successfully handled command changed, for transient user feedback.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    IsochroneAdded {
        id: String,
        mode: TravelMode,
        time_minutes: u32,
    },
    IsochroneRemoved {
        id: String,
    },
    Cleared {
        count: usize,
    },
    LocationSelected(Location),
}

impl SessionEvent {
    /// Human-readable toast message for this event.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            SessionEvent::IsochroneAdded {
                mode, time_minutes, ..
            } => format!("added {mode} reachability area ({time_minutes} min)"),
            SessionEvent::IsochroneRemoved { .. } => "removed reachability area".to_string(),
            SessionEvent::Cleared { count } => {
                format!("cleared {count} reachability areas")
            }
            SessionEvent::LocationSelected(location) => format!(
                "selected location: {:.4}, {:.4}",
                location.latitude, location.longitude
            ),
        }
    }
}
