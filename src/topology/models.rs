use std::sync::Arc;

use chrono::NaiveDate;

use crate::shared::{Coordinate, Identifiable, date, line_code};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Station {
    pub id: Arc<str>,
    pub name: Arc<str>,
    /// Stations without a coordinate are kept for lookups but never drawn.
    pub coordinate: Option<Coordinate>,
    pub lines: Box<[Arc<str>]>,
    pub inaugurated: Option<Arc<str>>,
}

impl Identifiable for Station {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Station {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinate = Some(Coordinate {
            latitude,
            longitude,
        });
        self
    }

    pub fn on_lines(mut self, lines: &[&str]) -> Self {
        self.lines = lines.iter().map(|code| Arc::from(*code)).collect();
        self
    }

    pub fn is_interchange(&self) -> bool {
        self.lines.len() > 1
    }

    pub fn serves(&self, code: &str) -> bool {
        self.lines.iter().any(|line| line.as_ref() == code)
    }

    pub fn inauguration_date(&self) -> Option<NaiveDate> {
        self.inaugurated.as_deref().and_then(date::parse_date)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Line {
    pub code: Arc<str>,
    pub color: Option<Arc<str>>,
    pub origin: Option<Arc<str>>,
    pub destination: Option<Arc<str>>,
    pub num_stations: Option<u32>,
}

impl Line {
    pub fn new(code: &str, color: &str) -> Self {
        Self {
            code: code.into(),
            color: Some(color.into()),
            ..Default::default()
        }
    }

    pub fn label(&self) -> String {
        line_code::format(&self.code)
    }

    pub fn display_color(&self) -> &str {
        line_code::resolve_color(self.color.as_deref(), &self.code)
    }
}

/// Drawn path of a line. Distinct from the ordered list of its stations.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineGeometry {
    pub code: Arc<str>,
    pub color: Arc<str>,
    pub coordinates: Box<[Coordinate]>,
}

impl LineGeometry {
    pub fn is_drawable(&self) -> bool {
        self.coordinates.len() >= 2
    }
}
