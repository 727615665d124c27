use std::sync::Arc;

use thiserror::Error;

use crate::shared::{Bounds, Coordinate};

pub mod details;
pub mod registry;
pub mod scene;

pub use details::*;
pub use registry::*;
pub use scene::*;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("Coordinate {0:?} can not be placed on the map")]
    InvalidCoordinate(Coordinate),
    #[error("Polyline needs at least two points, got {0}")]
    DegeneratePolyline(usize),
    #[error("Surface rejected the primitive: {0}")]
    Rejected(String),
}

/// Handle of a primitive living on a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub u64);

/// What a primitive asks for when the user clicks it. The host hands it back
/// to [`crate::session::MapSession::select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Station(Arc<str>),
    Line(Arc<str>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGlyph {
    Start,
    End,
    Step(usize),
}

impl RouteGlyph {
    pub fn for_index(index: usize, len: usize) -> Self {
        if index == 0 {
            Self::Start
        } else if index + 1 == len {
            Self::End
        } else {
            Self::Step(index)
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Start => "▶".into(),
            Self::End => "■".into(),
            Self::Step(index) => index.to_string(),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Start => "#00FF00",
            Self::End => "#FF0000",
            Self::Step(_) => "#FFA500",
        }
    }

    pub fn caption(&self) -> String {
        match self {
            Self::Start => "Origin".into(),
            Self::End => "Destination".into(),
            Self::Step(index) => format!("Stop {index}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Station { interchange: bool },
    Route(RouteGlyph),
}

impl MarkerIcon {
    /// Icon edge in pixels.
    pub fn size(&self) -> u32 {
        match self {
            Self::Station { interchange: true } => 16,
            Self::Station { interchange: false } => 12,
            Self::Route(_) => 24,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub badges: Vec<Badge>,
    pub rows: Vec<String>,
    /// Collapsible list, e.g. every stop of a line.
    pub list: Vec<String>,
}

impl Popup {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_row(mut self, row: impl Into<String>) -> Self {
        self.rows.push(row.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub icon: MarkerIcon,
    pub popup: Option<Popup>,
    pub popup_open: bool,
    pub on_select: Option<Selection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Coordinate>,
    pub color: String,
    pub weight: u32,
    pub opacity: f32,
    pub on_select: Option<Selection>,
}

/// What the engine needs from a mapping library.
pub trait MapSurface {
    fn add_marker(&mut self, marker: &Marker) -> Result<PrimitiveId, SurfaceError>;
    fn add_polyline(&mut self, polyline: &Polyline) -> Result<PrimitiveId, SurfaceError>;
    /// Removing an unknown id is a no-op.
    fn remove(&mut self, id: PrimitiveId);
    fn fit_bounds(&mut self, bounds: Bounds);
    fn open_popup(&mut self, at: Coordinate, popup: &Popup);
}
