use std::collections::BTreeMap;

use crate::{
    map::{MapSurface, Marker, Polyline, Popup, PrimitiveId, Selection, SurfaceError},
    shared::{Bounds, Coordinate},
};

/// Headless [`MapSurface`]. Keeps every primitive in memory so a host can
/// inspect, print or hit-test what the engine drew.
#[derive(Debug, Default)]
pub struct Scene {
    next_id: u64,
    markers: BTreeMap<PrimitiveId, Marker>,
    polylines: BTreeMap<PrimitiveId, Polyline>,
    viewport: Option<Bounds>,
    popup: Option<(Coordinate, Popup)>,
    /// Marker that opened the current popup, `None` when opened directly.
    popup_owner: Option<PrimitiveId>,
}

impl Scene {
    pub fn new() -> Self {
        Default::default()
    }

    fn issue_id(&mut self) -> PrimitiveId {
        self.next_id += 1;
        PrimitiveId(self.next_id)
    }

    pub fn markers(&self) -> impl Iterator<Item = (&PrimitiveId, &Marker)> {
        self.markers.iter()
    }

    pub fn polylines(&self) -> impl Iterator<Item = (&PrimitiveId, &Polyline)> {
        self.polylines.iter()
    }

    pub fn marker(&self, id: PrimitiveId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn polyline(&self, id: PrimitiveId) -> Option<&Polyline> {
        self.polylines.get(&id)
    }

    pub fn contains(&self, id: PrimitiveId) -> bool {
        self.markers.contains_key(&id) || self.polylines.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.markers.len() + self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn viewport(&self) -> Option<Bounds> {
        self.viewport
    }

    pub fn popup(&self) -> Option<&(Coordinate, Popup)> {
        self.popup.as_ref()
    }

    /// Simulates a click, returning what the primitive asks to show.
    pub fn click(&self, id: PrimitiveId) -> Option<Selection> {
        match self.markers.get(&id) {
            Some(marker) => marker.on_select.clone(),
            None => self.polylines.get(&id)?.on_select.clone(),
        }
    }
}

impl MapSurface for Scene {
    fn add_marker(&mut self, marker: &Marker) -> Result<PrimitiveId, SurfaceError> {
        if !marker.position.is_valid() {
            return Err(SurfaceError::InvalidCoordinate(marker.position));
        }
        let id = self.issue_id();
        if marker.popup_open
            && let Some(popup) = &marker.popup
        {
            self.popup = Some((marker.position, popup.clone()));
            self.popup_owner = Some(id);
        }
        self.markers.insert(id, marker.clone());
        Ok(id)
    }

    fn add_polyline(&mut self, polyline: &Polyline) -> Result<PrimitiveId, SurfaceError> {
        if polyline.points.len() < 2 {
            return Err(SurfaceError::DegeneratePolyline(polyline.points.len()));
        }
        if let Some(point) = polyline.points.iter().find(|point| !point.is_valid()) {
            return Err(SurfaceError::InvalidCoordinate(*point));
        }
        let id = self.issue_id();
        self.polylines.insert(id, polyline.clone());
        Ok(id)
    }

    fn remove(&mut self, id: PrimitiveId) {
        if self.markers.remove(&id).is_some() {
            // A popup bound to a removed marker goes with it.
            if self.popup_owner == Some(id) {
                self.popup = None;
                self.popup_owner = None;
            }
        } else {
            self.polylines.remove(&id);
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.viewport = Some(bounds);
    }

    fn open_popup(&mut self, at: Coordinate, popup: &Popup) {
        self.popup = Some((at, popup.clone()));
        self.popup_owner = None;
    }
}

#[test]
fn rejects_degenerate_polyline_test() {
    let mut scene = Scene::new();
    let result = scene.add_polyline(&Polyline {
        points: vec![Coordinate::from((41.0, 2.0))],
        color: "#999".into(),
        weight: 4,
        opacity: 0.7,
        on_select: None,
    });
    assert_eq!(result, Err(SurfaceError::DegeneratePolyline(1)));
    assert!(scene.is_empty());
}

#[test]
fn removing_marker_closes_its_popup_test() {
    use crate::map::{MarkerIcon, RouteGlyph};

    let mut scene = Scene::new();
    let id = scene
        .add_marker(&Marker {
            position: Coordinate::from((41.0, 2.0)),
            icon: MarkerIcon::Route(RouteGlyph::Start),
            popup: Some(Popup::titled("Sants")),
            popup_open: true,
            on_select: None,
        })
        .unwrap();
    assert!(scene.popup().is_some());
    scene.remove(id);
    assert!(scene.popup().is_none());
    scene.remove(id);
    assert!(scene.is_empty());
}

#[test]
fn removing_marker_keeps_foreign_popup_test() {
    use crate::map::{MarkerIcon, RouteGlyph};

    let mut scene = Scene::new();
    let position = Coordinate::from((41.0, 2.0));
    let id = scene
        .add_marker(&Marker {
            position,
            icon: MarkerIcon::Route(RouteGlyph::Start),
            popup: Some(Popup::titled("Origin")),
            popup_open: true,
            on_select: None,
        })
        .unwrap();
    scene.open_popup(position, &Popup::titled("Sants"));
    scene.remove(id);
    assert_eq!(
        scene.popup().map(|(_, popup)| popup.title.as_str()),
        Some("Sants")
    );
}
