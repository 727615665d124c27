use std::{collections::HashMap, sync::Arc};

mod models;
pub use models::*;
use tracing::debug;

type KeyToIndex = HashMap<Arc<str>, u32>;

/// Emitted by [`Topology::load`]. Whoever owns overlays derived from the
/// previous topology must drop them when they see a newer revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologyChanged {
    pub revision: u64,
}

/// Last loaded network. Replaced wholesale, never patched.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    stations: Box<[Station]>,
    lines: Box<[Line]>,
    geometries: Box<[LineGeometry]>,

    station_name_lookup: KeyToIndex,
    station_id_lookup: KeyToIndex,
    line_lookup: KeyToIndex,
    revision: u64,
}

impl Topology {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn load(&mut self, stations: Vec<Station>, lines: Vec<Line>) -> TopologyChanged {
        let mut station_name_lookup: KeyToIndex = HashMap::with_capacity(stations.len());
        let mut station_id_lookup: KeyToIndex = HashMap::with_capacity(stations.len());
        for (i, station) in stations.iter().enumerate() {
            // First station with a given name wins, later duplicates are only
            // reachable by id.
            station_name_lookup
                .entry(station.name.clone())
                .or_insert(i as u32);
            station_id_lookup.insert(station.id.clone(), i as u32);
        }

        let mut line_lookup: KeyToIndex = HashMap::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            line_lookup.entry(line.code.clone()).or_insert(i as u32);
        }

        // Everything is built before anything is swapped in.
        self.stations = stations.into();
        self.lines = lines.into();
        self.geometries = Box::default();
        self.station_name_lookup = station_name_lookup;
        self.station_id_lookup = station_id_lookup;
        self.line_lookup = line_lookup;
        self.revision += 1;

        debug!(
            "Topology revision {} with {} stations and {} lines",
            self.revision,
            self.stations.len(),
            self.lines.len()
        );
        TopologyChanged {
            revision: self.revision,
        }
    }

    pub fn attach_geometries(&mut self, geometries: Vec<LineGeometry>) {
        self.geometries = geometries.into();
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn geometries(&self) -> &[LineGeometry] {
        &self.geometries
    }

    pub fn station_by_name(&self, name: &str) -> Option<&Station> {
        let idx = *self.station_name_lookup.get(name)?;
        self.stations.get(idx as usize)
    }

    pub fn station_by_id(&self, id: &str) -> Option<&Station> {
        let idx = *self.station_id_lookup.get(id)?;
        self.stations.get(idx as usize)
    }

    pub fn line_by_code(&self, code: &str) -> Option<&Line> {
        let idx = *self.line_lookup.get(code)?;
        self.lines.get(idx as usize)
    }

    pub fn stations_on_line<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Station> {
        self.stations.iter().filter(move |station| station.serves(code))
    }
}

#[test]
fn duplicate_names_keep_first_test() {
    let mut topology = Topology::new();
    let event = topology.load(
        vec![
            Station::new("1", "Espanya").on_lines(&["1"]),
            Station::new("2", "Espanya").on_lines(&["3"]),
        ],
        vec![Line::new("1", "#E2001A")],
    );
    assert_eq!(event.revision, 1);
    assert_eq!(topology.station_by_name("Espanya").map(|s| &*s.id), Some("1"));
    assert_eq!(topology.station_by_id("2").map(|s| &*s.name), Some("Espanya"));
    assert!(topology.line_by_code("3").is_none());
    assert_eq!(topology.stations_on_line("3").count(), 1);
}

#[test]
fn reload_drops_geometries_test() {
    let mut topology = Topology::new();
    topology.load(vec![], vec![]);
    topology.attach_geometries(vec![LineGeometry::default()]);
    let event = topology.load(vec![], vec![]);
    assert_eq!(event.revision, 2);
    assert!(topology.geometries().is_empty());
}
