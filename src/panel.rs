use std::{collections::HashSet, fmt::Display, sync::Arc};

use crate::{
    api,
    route::{QueryError, RoutePresentation},
    shared::{Identifiable, line_code},
    topology::Line,
};

/// Page elements around the map that the engine fills in.
pub trait View {
    fn set_loading(&mut self, visible: bool);
    fn show_error_panel(&mut self, panel: &ErrorPanel);
    fn set_station_options(&mut self, options: &[StationOption]);
    fn show_legend(&mut self, legend: &Legend);
    fn show_route_message(&mut self, message: &RouteMessage);
    fn show_route(&mut self, presentation: &RoutePresentation);
    /// Empties the route result and both station selects.
    fn reset_route_form(&mut self);
    fn alert(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationOption {
    pub id: Arc<str>,
    pub name: Arc<str>,
}

/// One option per distinct name, first occurrence kept, sorted ignoring case.
pub fn station_options<T: Identifiable>(stations: &[T]) -> Vec<StationOption> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(stations.len());
    let mut options: Vec<StationOption> = stations
        .iter()
        .filter(|station| seen.insert(station.name()))
        .map(|station| StationOption {
            id: station.id().into(),
            name: station.name().into(),
        })
        .collect();
    options.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    options
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendKind {
    RegularStation,
    InterchangeStation,
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub kind: LegendKind,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn new(lines: &[Line]) -> Self {
        let mut entries = vec![
            LegendEntry {
                kind: LegendKind::RegularStation,
                label: "Regular station".into(),
                color: "#667eea".into(),
            },
            LegendEntry {
                kind: LegendKind::InterchangeStation,
                label: "Interchange station".into(),
                color: "#ff5722".into(),
            },
        ];
        entries.extend(lines.iter().map(|line| LegendEntry {
            kind: LegendKind::Line,
            label: line_code::format(&line.code),
            color: line.display_color().to_string(),
        }));
        Self { entries }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPanel {
    pub title: String,
    pub message: String,
    pub hints: Vec<String>,
    /// Label of the manual retry, which reloads the whole client.
    pub action: String,
}

impl ErrorPanel {
    pub fn load_failure(err: &api::Error) -> Self {
        Self {
            title: "Error".into(),
            message: format!("Failed to load the network: {err}"),
            hints: vec![
                "The SPARQL endpoint is running".into(),
                "The network data has been loaded".into(),
                "The backend is reachable".into(),
            ],
            action: "Retry".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMessage {
    Searching,
    Invalid(QueryError),
    NotFound(Option<String>),
    Failed,
}

impl Display for RouteMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Searching => write!(f, "Searching for a route..."),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::NotFound(Some(reason)) => write!(f, "{reason}"),
            Self::NotFound(None) => write!(f, "No route found between these stations"),
            Self::Failed => write!(f, "Error while searching for a route"),
        }
    }
}

#[test]
fn station_options_unique_by_name_test() {
    use crate::topology::Station;

    let stations = [
        Station::new("2", "bogatell"),
        Station::new("1", "Arc de Triomf"),
        Station::new("3", "Bogatell"),
        Station::new("4", "Arc de Triomf"),
    ];
    let options = station_options(&stations);
    let names: Vec<&str> = options.iter().map(|option| &*option.name).collect();
    assert_eq!(names, vec!["Arc de Triomf", "Bogatell", "bogatell"]);
    assert_eq!(&*options[0].id, "1");
}

#[test]
fn route_message_test() {
    assert_eq!(
        RouteMessage::Invalid(QueryError::SameStation).to_string(),
        "Origin and destination are the same station"
    );
    assert_eq!(
        RouteMessage::NotFound(Some("No connection".into())).to_string(),
        "No connection"
    );
}
