use tracing::debug;

use crate::{
    map::{MapSurface, Marker, MarkerIcon, OverlayRegistry, Polyline, Popup, RenderReport, RouteGlyph},
    route::Route,
    shared::Coordinate,
    topology::Topology,
};

const SEGMENT_WEIGHT: u32 = 8;
const SEGMENT_OPACITY: f32 = 0.9;

/// Colors and padding for drawing routes.
#[derive(Debug, Clone)]
pub struct RouteStyle {
    /// Used when a segment's line is unknown to the topology.
    pub default_color: String,
    pub fit_padding: f64,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            default_color: "#FF0000".into(),
            fit_padding: 0.15,
        }
    }
}

/// Replaces the route overlay with `route`.
///
/// Segments are drawn only when the backend sent them; nothing is derived
/// from the station sequence. Stations or segments that can not be resolved
/// against the topology are skipped.
pub fn draw_route<S: MapSurface>(
    route: &Route,
    topology: &Topology,
    registry: &mut OverlayRegistry,
    surface: &mut S,
    style: &RouteStyle,
) -> RenderReport {
    let mut overlay = registry.begin_route_overlay(surface);

    for segment in &route.segments {
        let from = topology
            .station_by_name(&segment.from_station)
            .and_then(|station| station.coordinate);
        let to = topology
            .station_by_name(&segment.to_station)
            .and_then(|station| station.coordinate);
        let (Some(from), Some(to)) = (from, to) else {
            debug!(
                "Skipping segment {} -> {}, endpoint not on the map",
                segment.from_station, segment.to_station
            );
            overlay.skip();
            continue;
        };
        let color = topology
            .line_by_code(&segment.line_code)
            .and_then(|line| line.color.as_deref())
            .unwrap_or(style.default_color.as_str());
        overlay.add_polyline(
            surface,
            &Polyline {
                points: vec![from, to],
                color: color.to_string(),
                weight: SEGMENT_WEIGHT,
                opacity: SEGMENT_OPACITY,
                on_select: None,
            },
        );
    }

    let mut points: Vec<Coordinate> = Vec::with_capacity(route.stations.len());
    for (index, name) in route.stations.iter().enumerate() {
        let Some(position) = topology
            .station_by_name(name)
            .and_then(|station| station.coordinate)
        else {
            debug!("Skipping route stop {index} ({name}), not on the map");
            overlay.skip();
            continue;
        };
        let glyph = RouteGlyph::for_index(index, route.stations.len());
        let marker = Marker {
            position,
            icon: MarkerIcon::Route(glyph),
            popup: Some(Popup::titled(name.to_string()).with_row(glyph.caption())),
            popup_open: glyph == RouteGlyph::Start,
            on_select: None,
        };
        if overlay.add_marker(surface, &marker).is_some() {
            points.push(position);
        }
    }

    registry.end_route_overlay(surface, overlay, &points, style.fit_padding)
}
