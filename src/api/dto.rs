//! Wire shapes of the backend responses and their conversion into the
//! validated domain types. Malformed optional fields are defaulted here so
//! nothing downstream has to deal with half-filled records.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::{
    map::{LineDetails, LineStop, StationDetails},
    route::{InvalidRoute, ReportedTransfer, Route, RouteOutcome, Segment},
    shared::{Coordinate, line_code},
    topology::{Line, LineGeometry, Station},
};

/// Line codes show up both as strings and as bare integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
    Text(String),
    Integer(i64),
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "RawCode")]
pub struct CodeDto(pub String);

impl From<RawCode> for CodeDto {
    fn from(value: RawCode) -> Self {
        match value {
            RawCode::Text(text) => Self(text),
            RawCode::Integer(number) => Self(number.to_string()),
        }
    }
}

impl From<CodeDto> for Arc<str> {
    fn from(value: CodeDto) -> Self {
        value.0.into()
    }
}

fn non_empty(value: Option<String>) -> Option<Arc<str>> {
    value
        .filter(|text| !text.trim().is_empty())
        .map(|text| text.into())
}

fn codes(values: Vec<CodeDto>) -> Box<[Arc<str>]> {
    values
        .into_iter()
        .filter(|code| !code.0.is_empty())
        .map(Arc::from)
        .collect()
}

fn coordinate(latitude: Option<f64>, longitude: Option<f64>) -> Option<Coordinate> {
    Coordinate::from_parts(latitude, longitude).filter(|coordinate| coordinate.is_valid())
}

#[derive(Deserialize, Debug, Clone)]
pub struct StationDto {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub lines: Vec<CodeDto>,
    pub inaugurated: Option<String>,
}

impl StationDto {
    /// `None` for records without a name, they can not be looked up.
    pub fn into_station(self) -> Option<Station> {
        if self.name.trim().is_empty() {
            debug!("Dropping station {:?} without a name", self.id);
            return None;
        }
        let id = if self.id.is_empty() {
            self.name.clone()
        } else {
            self.id
        };
        Some(Station {
            id: id.into(),
            name: self.name.into(),
            coordinate: coordinate(self.latitude, self.longitude),
            lines: codes(self.lines),
            inaugurated: non_empty(self.inaugurated),
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LineDto {
    pub code: CodeDto,
    pub color: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    #[serde(rename = "numStations")]
    pub num_stations: Option<u32>,
}

impl From<LineDto> for Line {
    fn from(value: LineDto) -> Self {
        Self {
            code: value.code.into(),
            color: non_empty(value.color),
            origin: non_empty(value.origin),
            destination: non_empty(value.destination),
            num_stations: value.num_stations,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct LatLngDto {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LineGeometryDto {
    pub code: CodeDto,
    pub color: Option<String>,
    #[serde(default)]
    pub coordinates: Vec<LatLngDto>,
}

impl From<LineGeometryDto> for LineGeometry {
    fn from(value: LineGeometryDto) -> Self {
        let code: Arc<str> = value.code.into();
        let color = line_code::resolve_color(value.color.as_deref(), &code).into();
        let coordinates = value
            .coordinates
            .into_iter()
            .map(|point| Coordinate::from((point.lat, point.lng)))
            .filter(|point| point.is_valid())
            .collect();
        Self {
            code,
            color,
            coordinates,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct StationDetailsDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lines: Vec<CodeDto>,
    pub inaugurated: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<StationDetailsDto> for StationDetails {
    fn from(value: StationDetailsDto) -> Self {
        Self {
            name: value.name.into(),
            lines: codes(value.lines),
            inaugurated: non_empty(value.inaugurated),
            coordinate: coordinate(value.latitude, value.longitude),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LineStopDto {
    pub name: String,
    #[serde(default)]
    pub order: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LineDetailsDto {
    pub color: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    #[serde(rename = "numStations")]
    pub num_stations: Option<u32>,
    #[serde(default)]
    pub stations: Vec<LineStopDto>,
}

impl LineDetailsDto {
    pub fn into_details(self, code: &str) -> LineDetails {
        let stations: Vec<LineStop> = self
            .stations
            .into_iter()
            .map(|stop| LineStop {
                name: stop.name.into(),
                order: stop.order,
            })
            .collect();
        LineDetails {
            code: code.into(),
            color: non_empty(self.color),
            origin: non_empty(self.origin),
            destination: non_empty(self.destination),
            num_stations: self.num_stations.unwrap_or(stations.len() as u32),
            stations,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct RouteStopDto {
    pub name: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TransferDto {
    pub station: String,
    pub from_line: CodeDto,
    pub to_line: CodeDto,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SegmentDto {
    pub from_station: String,
    pub to_station: String,
    pub line_code: CodeDto,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RouteDto {
    #[serde(default)]
    pub found: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub stations: Vec<RouteStopDto>,
    #[serde(default)]
    pub lines: Vec<CodeDto>,
    pub num_stations: Option<u32>,
    pub num_transfers: Option<u32>,
    pub transfers: Option<Vec<TransferDto>>,
    pub segments: Option<Vec<SegmentDto>>,
}

impl TryFrom<RouteDto> for RouteOutcome {
    type Error = InvalidRoute;

    fn try_from(value: RouteDto) -> Result<Self, Self::Error> {
        if !value.found {
            return Ok(Self::NotFound {
                reason: value.error.filter(|reason| !reason.trim().is_empty()),
            });
        }

        let stations = value
            .stations
            .into_iter()
            .map(|stop| Arc::from(stop.name))
            .collect();
        let lines = value.lines.into_iter().map(Arc::from).collect();
        let transfers = value
            .transfers
            .unwrap_or_default()
            .into_iter()
            .map(|transfer| ReportedTransfer {
                station: transfer.station.into(),
                from_line: transfer.from_line.into(),
                to_line: transfer.to_line.into(),
            })
            .collect();
        let segments = value
            .segments
            .unwrap_or_default()
            .into_iter()
            .map(|segment| Segment {
                from_station: segment.from_station.into(),
                to_station: segment.to_station.into(),
                line_code: segment.line_code.into(),
            })
            .collect();

        let route = Route::new(stations, lines)?
            .with_counts(value.num_stations, value.num_transfers)
            .with_transfers(transfers)
            .with_segments(segments);
        Ok(Self::Found(route))
    }
}
