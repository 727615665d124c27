#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use metro_map::{
    api::{Backend, Error},
    config::Config,
    map::{LineDetails, Scene, StationDetails},
    panel::{ErrorPanel, Legend, RouteMessage, StationOption, View},
    route::{Route, RouteOutcome, RoutePresentation, RouteQuery, Segment},
    session::MapSession,
    shared::Coordinate,
    topology::{Line, LineGeometry, Station},
};

fn failure(path: &str) -> Error {
    Error::Status {
        status: 500,
        url: format!("http://localhost:8000/{path}"),
    }
}

/// In-memory backend. `None` fields answer with a 500.
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub stations: Option<Vec<Station>>,
    pub lines: Option<Vec<Line>>,
    pub geometries: Option<Vec<LineGeometry>>,
    pub station_details: HashMap<String, StationDetails>,
    pub line_details: HashMap<String, LineDetails>,
    pub routes: HashMap<(String, String), RouteOutcome>,
    /// Route requests never complete.
    pub hang_routes: Cell<bool>,
    pub route_calls: RefCell<Vec<RouteQuery>>,
}

impl FakeBackend {
    pub fn with_route(mut self, origin: &str, destination: &str, outcome: RouteOutcome) -> Self {
        self.routes
            .insert((origin.to_string(), destination.to_string()), outcome);
        self
    }
}

impl Backend for FakeBackend {
    async fn stations(&self) -> Result<Vec<Station>, Error> {
        self.stations.clone().ok_or_else(|| failure("api/stations"))
    }

    async fn lines(&self) -> Result<Vec<Line>, Error> {
        self.lines.clone().ok_or_else(|| failure("api/lines"))
    }

    async fn line_geometries(&self) -> Result<Vec<LineGeometry>, Error> {
        self.geometries
            .clone()
            .ok_or_else(|| failure("api/line-geometries"))
    }

    async fn station(&self, id: &str) -> Result<StationDetails, Error> {
        self.station_details
            .get(id)
            .cloned()
            .ok_or_else(|| failure("api/station"))
    }

    async fn line(&self, code: &str) -> Result<LineDetails, Error> {
        self.line_details
            .get(code)
            .cloned()
            .ok_or_else(|| failure("api/line"))
    }

    async fn route(&self, query: &RouteQuery) -> Result<RouteOutcome, Error> {
        self.route_calls.borrow_mut().push(query.clone());
        if self.hang_routes.get() {
            std::future::pending::<()>().await;
        }
        self.routes
            .get(&(query.origin.to_string(), query.destination.to_string()))
            .cloned()
            .ok_or_else(|| failure("api/route"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Loading(bool),
    ErrorPanel(ErrorPanel),
    StationOptions(Vec<StationOption>),
    Legend(Legend),
    RouteMessage(RouteMessage),
    Route(RoutePresentation),
    ResetRouteForm,
    Alert(String),
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
}

impl RecordingView {
    pub fn last_route_message(&self) -> Option<&RouteMessage> {
        self.events.iter().rev().find_map(|event| match event {
            ViewEvent::RouteMessage(message) => Some(message),
            _ => None,
        })
    }

    pub fn routes(&self) -> Vec<&RoutePresentation> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Route(presentation) => Some(presentation),
                _ => None,
            })
            .collect()
    }

    pub fn alerts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Alert(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl View for RecordingView {
    fn set_loading(&mut self, visible: bool) {
        self.events.push(ViewEvent::Loading(visible));
    }

    fn show_error_panel(&mut self, panel: &ErrorPanel) {
        self.events.push(ViewEvent::ErrorPanel(panel.clone()));
    }

    fn set_station_options(&mut self, options: &[StationOption]) {
        self.events.push(ViewEvent::StationOptions(options.to_vec()));
    }

    fn show_legend(&mut self, legend: &Legend) {
        self.events.push(ViewEvent::Legend(legend.clone()));
    }

    fn show_route_message(&mut self, message: &RouteMessage) {
        self.events.push(ViewEvent::RouteMessage(message.clone()));
    }

    fn show_route(&mut self, presentation: &RoutePresentation) {
        self.events.push(ViewEvent::Route(presentation.clone()));
    }

    fn reset_route_form(&mut self) {
        self.events.push(ViewEvent::ResetRouteForm);
    }

    fn alert(&mut self, message: &str) {
        self.events.push(ViewEvent::Alert(message.to_string()));
    }
}

/// Line 1 runs Alpha, Bravo, Charlie. Line 2 runs Charlie, Delta, Xray,
/// Yankee, Zulu. Yankee has no coordinate.
pub fn stations() -> Vec<Station> {
    vec![
        Station::new("a", "Alpha").at(41.38, 2.15).on_lines(&["1"]),
        Station::new("b", "Bravo").at(41.39, 2.16).on_lines(&["1"]),
        Station::new("c", "Charlie").at(41.40, 2.17).on_lines(&["1", "2"]),
        Station::new("d", "Delta").at(41.41, 2.18).on_lines(&["2"]),
        Station::new("x", "Xray").at(41.42, 2.19).on_lines(&["2"]),
        Station::new("y", "Yankee").on_lines(&["2"]),
        Station::new("z", "Zulu").at(41.44, 2.21).on_lines(&["2"]),
    ]
}

pub fn lines() -> Vec<Line> {
    vec![Line::new("1", "#E4002B"), Line::new("2", "#9B59B6")]
}

pub fn at(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate {
        latitude,
        longitude,
    }
}

pub fn geometries() -> Vec<LineGeometry> {
    vec![
        LineGeometry {
            code: "1".into(),
            color: "#E4002B".into(),
            coordinates: vec![at(41.38, 2.15), at(41.39, 2.16), at(41.40, 2.17)].into(),
        },
        LineGeometry {
            code: "2".into(),
            color: "#9B59B6".into(),
            coordinates: vec![at(41.40, 2.17), at(41.44, 2.21)].into(),
        },
    ]
}

pub fn backend() -> FakeBackend {
    FakeBackend {
        stations: Some(stations()),
        lines: Some(lines()),
        geometries: Some(geometries()),
        ..Default::default()
    }
}

pub fn route(stations: &[&str], lines: &[&str]) -> Route {
    Route::new(
        stations.iter().map(|name| (*name).into()).collect(),
        lines.iter().map(|code| (*code).into()).collect(),
    )
    .expect("valid route")
}

pub fn with_segments(mut route: Route) -> Route {
    route.segments = route
        .stations
        .windows(2)
        .zip(&route.lines)
        .map(|(pair, code)| Segment {
            from_station: pair[0].clone(),
            to_station: pair[1].clone(),
            line_code: code.clone(),
        })
        .collect();
    route
}

pub type TestSession = MapSession<FakeBackend, Scene, RecordingView>;

pub fn session(backend: FakeBackend) -> TestSession {
    MapSession::new(backend, Scene::new(), RecordingView::default(), Config::default())
}

pub async fn started(backend: FakeBackend) -> TestSession {
    let mut session = session(backend);
    session.start().await;
    session
}
