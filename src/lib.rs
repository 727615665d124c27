pub mod api;
pub mod config;
pub mod loader;
pub mod map;
pub mod panel;
pub mod route;
pub mod session;
pub mod shared;
pub mod topology;

pub mod prelude {
    pub use crate::api::{Backend, HttpBackend};
    pub use crate::config::Config;
    pub use crate::loader::{LoadState, LoadSummary};
    pub use crate::map::{MapSurface, OverlayRegistry, Scene, Selection};
    pub use crate::panel::View;
    pub use crate::route::{Route, RouteOutcome, RouteQuery};
    pub use crate::session::{MapSession, RouteStatus};
    pub use crate::shared::{Bounds, Coordinate};
    pub use crate::topology::{Line, LineGeometry, Station, Topology};
}
