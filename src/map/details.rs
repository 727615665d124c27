use std::sync::Arc;

use crate::{
    map::{Badge, Popup},
    shared::{Coordinate, date, line_code},
    topology::Topology,
};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct StationDetails {
    pub name: Arc<str>,
    pub lines: Box<[Arc<str>]>,
    pub inaugurated: Option<Arc<str>>,
    pub coordinate: Option<Coordinate>,
}

impl StationDetails {
    pub fn is_interchange(&self) -> bool {
        self.lines.len() > 1
    }

    pub fn popup(&self, topology: &Topology) -> Popup {
        let badges = self
            .lines
            .iter()
            .map(|code| Badge {
                label: line_code::format(code),
                color: line_color(topology, code),
            })
            .collect();
        let mut popup = Popup {
            title: self.name.to_string(),
            badges,
            ..Default::default()
        };
        if let Some(inaugurated) = &self.inaugurated {
            popup = popup.with_row(format!("Opened: {}", date::format_date(inaugurated)));
        }
        if let Some(coordinate) = &self.coordinate {
            popup = popup.with_row(format!("Coordinates: {coordinate}"));
        }
        let kind = if self.is_interchange() {
            "Interchange station"
        } else {
            "Regular station"
        };
        popup.with_row(format!("Type: {kind}"))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineStop {
    pub name: Arc<str>,
    pub order: u32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineDetails {
    pub code: Arc<str>,
    pub color: Option<Arc<str>>,
    pub origin: Option<Arc<str>>,
    pub destination: Option<Arc<str>>,
    pub num_stations: u32,
    pub stations: Vec<LineStop>,
}

impl LineDetails {
    pub fn ordered_stations(&self) -> Vec<&LineStop> {
        let mut stations: Vec<&LineStop> = self.stations.iter().collect();
        stations.sort_by_key(|stop| stop.order);
        stations
    }

    pub fn popup(&self) -> Popup {
        let title = match (&self.origin, &self.destination) {
            (Some(origin), Some(destination)) => format!("{origin} ↔ {destination}"),
            _ => "Metro line".to_string(),
        };
        let mut popup = Popup {
            title,
            badges: vec![Badge {
                label: line_code::format(&self.code),
                color: line_code::resolve_color(self.color.as_deref(), &self.code).to_string(),
            }],
            ..Default::default()
        }
        .with_row(format!("Stops: {}", self.num_stations));
        if let Some(origin) = &self.origin {
            popup = popup.with_row(format!("Origin: {origin}"));
        }
        if let Some(destination) = &self.destination {
            popup = popup.with_row(format!("Destination: {destination}"));
        }
        popup.list = self
            .ordered_stations()
            .into_iter()
            .map(|stop| stop.name.to_string())
            .collect();
        popup
    }

    /// Mean position of the line's stations known to the topology.
    pub fn anchor(&self, topology: &Topology) -> Option<Coordinate> {
        let coordinates: Vec<Coordinate> = topology
            .stations_on_line(&self.code)
            .filter_map(|station| station.coordinate)
            .collect();
        if coordinates.is_empty() {
            return None;
        }
        Some(coordinates.into_iter().sum())
    }
}

fn line_color(topology: &Topology, code: &str) -> String {
    match topology.line_by_code(code) {
        Some(line) => line.display_color().to_string(),
        None => line_code::resolve_color(None, code).to_string(),
    }
}
