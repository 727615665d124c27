use std::sync::Arc;

use thiserror::Error;

pub mod presenter;
pub mod renderer;
pub mod slot;

pub use presenter::*;
pub use renderer::*;
pub use slot::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidRoute {
    #[error("Route was reported as found but holds no stations")]
    Empty,
    #[error("Route with {stations} stations can not have {lines} hops")]
    HopMismatch { stations: usize, lines: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Select an origin and a destination")]
    MissingStation,
    #[error("Origin and destination are the same station")]
    SameStation,
}

/// Origin and destination names, checked before anything hits the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    pub origin: Arc<str>,
    pub destination: Arc<str>,
}

impl RouteQuery {
    pub fn new(origin: &str, destination: &str) -> Result<Self, QueryError> {
        if origin.is_empty() || destination.is_empty() {
            return Err(QueryError::MissingStation);
        }
        if origin == destination {
            return Err(QueryError::SameStation);
        }
        Ok(Self {
            origin: origin.into(),
            destination: destination.into(),
        })
    }

    /// Whether the search button should be enabled for these inputs.
    pub fn can_submit(origin: &str, destination: &str) -> bool {
        Self::new(origin, destination).is_ok()
    }
}

/// Line change the backend reported explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedTransfer {
    pub station: Arc<str>,
    pub from_line: Arc<str>,
    pub to_line: Arc<str>,
}

/// Hop the backend asks to draw directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub from_station: Arc<str>,
    pub to_station: Arc<str>,
    pub line_code: Arc<str>,
}

/// A found route. `lines[i]` is the line used between `stations[i]` and
/// `stations[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub stations: Vec<Arc<str>>,
    pub lines: Vec<Arc<str>>,
    pub num_stations: u32,
    pub num_transfers: u32,
    pub transfers: Vec<ReportedTransfer>,
    pub segments: Vec<Segment>,
}

impl Route {
    /// Checks the hop invariant and derives both counts from the sequences.
    pub fn new(stations: Vec<Arc<str>>, lines: Vec<Arc<str>>) -> Result<Self, InvalidRoute> {
        if stations.is_empty() {
            return Err(InvalidRoute::Empty);
        }
        if lines.len() != stations.len() - 1 {
            return Err(InvalidRoute::HopMismatch {
                stations: stations.len(),
                lines: lines.len(),
            });
        }
        let num_transfers = lines.windows(2).filter(|hop| hop[0] != hop[1]).count() as u32;
        Ok(Self {
            num_stations: stations.len() as u32,
            num_transfers,
            stations,
            lines,
            transfers: vec![],
            segments: vec![],
        })
    }

    /// Overrides the derived counts with the ones the backend reported.
    pub fn with_counts(mut self, num_stations: Option<u32>, num_transfers: Option<u32>) -> Self {
        if let Some(num_stations) = num_stations {
            self.num_stations = num_stations;
        }
        if let Some(num_transfers) = num_transfers {
            self.num_transfers = num_transfers;
        }
        self
    }

    pub fn with_transfers(mut self, transfers: Vec<ReportedTransfer>) -> Self {
        self.transfers = transfers;
        self
    }

    pub fn with_segments(mut self, segments: Vec<Segment>) -> Self {
        self.segments = segments;
        self
    }

    /// True when the incoming and outgoing hops at `index` use different
    /// lines. Never true for the first or last station.
    pub fn is_transfer_at(&self, index: usize) -> bool {
        index >= 1 && index < self.lines.len() && self.lines[index - 1] != self.lines[index]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Found(Route),
    /// A valid negative answer, not a failure.
    NotFound { reason: Option<String> },
}
