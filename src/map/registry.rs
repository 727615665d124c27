use tracing::{debug, warn};

use crate::{
    map::{MapSurface, Marker, MarkerIcon, Polyline, PrimitiveId, Selection, SurfaceError},
    shared::{Bounds, Coordinate},
    topology::{LineGeometry, Station, TopologyChanged},
};

const LINE_WEIGHT: u32 = 4;
const LINE_OPACITY: f32 = 0.7;

/// Outcome of drawing one batch of primitives.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    pub drawn: usize,
    /// Items with nothing to draw (no coordinate, unresolved station, ...).
    pub skipped: usize,
    /// Items the surface refused.
    pub failed: usize,
}

impl RenderReport {
    fn record(&mut self, result: Result<PrimitiveId, SurfaceError>) -> Option<PrimitiveId> {
        match result {
            Ok(id) => {
                self.drawn += 1;
                Some(id)
            }
            Err(err) => {
                warn!("Failed to place primitive: {err}");
                self.failed += 1;
                None
            }
        }
    }
}

/// Primitives of one drawn route. Built by the route renderer between
/// [`OverlayRegistry::begin_route_overlay`] and
/// [`OverlayRegistry::end_route_overlay`].
#[derive(Debug, Default)]
pub struct RouteOverlay {
    primitives: Vec<PrimitiveId>,
    report: RenderReport,
}

impl RouteOverlay {
    pub fn add_marker<S: MapSurface>(
        &mut self,
        surface: &mut S,
        marker: &Marker,
    ) -> Option<PrimitiveId> {
        let id = self.report.record(surface.add_marker(marker))?;
        self.primitives.push(id);
        Some(id)
    }

    pub fn add_polyline<S: MapSurface>(
        &mut self,
        surface: &mut S,
        polyline: &Polyline,
    ) -> Option<PrimitiveId> {
        let id = self.report.record(surface.add_polyline(polyline))?;
        self.primitives.push(id);
        Some(id)
    }

    pub fn skip(&mut self) {
        self.report.skipped += 1;
    }

    pub fn primitives(&self) -> &[PrimitiveId] {
        &self.primitives
    }

    pub fn report(&self) -> RenderReport {
        self.report
    }

    fn remove_from<S: MapSurface>(self, surface: &mut S) {
        self.primitives.into_iter().for_each(|id| surface.remove(id));
    }
}

/// Owns the bookkeeping of everything drawn on the map.
///
/// Persistent primitives (station markers, line polylines) live as long as
/// the topology revision they were built from. The route overlay is
/// ephemeral: it is always replaced as a whole.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    revision: u64,
    station_markers: Vec<(PrimitiveId, Coordinate)>,
    line_polylines: Vec<PrimitiveId>,
    route: Option<RouteOverlay>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Tears down every primitive built from an older topology, the route
    /// overlay included.
    pub fn on_topology_changed<S: MapSurface>(&mut self, surface: &mut S, event: TopologyChanged) {
        if event.revision == self.revision {
            return;
        }
        debug!(
            "Topology moved from revision {} to {}, dropping {} persistent primitives",
            self.revision,
            event.revision,
            self.station_markers.len() + self.line_polylines.len()
        );
        self.station_markers
            .drain(..)
            .for_each(|(id, _)| surface.remove(id));
        self.line_polylines
            .drain(..)
            .for_each(|id| surface.remove(id));
        self.clear(surface);
        self.revision = event.revision;
    }

    pub fn add_station_markers<S: MapSurface>(
        &mut self,
        surface: &mut S,
        stations: &[Station],
    ) -> RenderReport {
        let mut report = RenderReport::default();
        for station in stations {
            let Some(position) = station.coordinate else {
                report.skipped += 1;
                continue;
            };
            let marker = Marker {
                position,
                icon: MarkerIcon::Station {
                    interchange: station.is_interchange(),
                },
                popup: None,
                popup_open: false,
                on_select: Some(Selection::Station(station.id.clone())),
            };
            if let Some(id) = report.record(surface.add_marker(&marker)) {
                self.station_markers.push((id, position));
            }
        }
        debug!("Station markers: {report:?}");
        report
    }

    pub fn add_line_geometries<S: MapSurface>(
        &mut self,
        surface: &mut S,
        geometries: &[LineGeometry],
    ) -> RenderReport {
        let mut report = RenderReport::default();
        for geometry in geometries {
            if !geometry.is_drawable() {
                report.skipped += 1;
                continue;
            }
            let polyline = Polyline {
                points: geometry.coordinates.to_vec(),
                color: geometry.color.to_string(),
                weight: LINE_WEIGHT,
                opacity: LINE_OPACITY,
                on_select: Some(Selection::Line(geometry.code.clone())),
            };
            if let Some(id) = report.record(surface.add_polyline(&polyline)) {
                self.line_polylines.push(id);
            }
        }
        debug!("Line polylines: {report:?}");
        report
    }

    /// Drops the current route overlay, if any, and hands out an empty one.
    pub fn begin_route_overlay<S: MapSurface>(&mut self, surface: &mut S) -> RouteOverlay {
        self.clear(surface);
        RouteOverlay::default()
    }

    pub fn end_route_overlay<S: MapSurface>(
        &mut self,
        surface: &mut S,
        overlay: RouteOverlay,
        points: &[Coordinate],
        padding: f64,
    ) -> RenderReport {
        if let Some(bounds) = Bounds::from_points(points) {
            surface.fit_bounds(bounds.pad(padding));
        }
        let report = overlay.report();
        // A route drawn while another was installed replaces it.
        self.clear(surface);
        self.route = Some(overlay);
        report
    }

    /// Removes the route overlay only. Calling it again is a no-op.
    pub fn clear<S: MapSurface>(&mut self, surface: &mut S) {
        if let Some(route) = self.route.take() {
            debug!("Clearing route overlay of {} primitives", route.primitives().len());
            route.remove_from(surface);
        }
    }

    /// Fits the viewport to every station marker placed so far.
    pub fn fit_to_stations<S: MapSurface>(&self, surface: &mut S, padding: f64) -> bool {
        match Bounds::from_points(self.station_markers.iter().map(|(_, position)| position)) {
            Some(bounds) => {
                surface.fit_bounds(bounds.pad(padding));
                true
            }
            None => false,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn station_markers(&self) -> impl Iterator<Item = PrimitiveId> {
        self.station_markers.iter().map(|(id, _)| *id)
    }

    pub fn line_polylines(&self) -> &[PrimitiveId] {
        &self.line_polylines
    }

    pub fn route_primitives(&self) -> &[PrimitiveId] {
        self.route
            .as_ref()
            .map(|route| route.primitives())
            .unwrap_or_default()
    }

    pub fn has_route(&self) -> bool {
        self.route.is_some()
    }
}
