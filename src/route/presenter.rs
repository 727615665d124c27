use std::{fmt::Display, sync::Arc};

use crate::{route::Route, shared::line_code};

const MINUTES_PER_HOP: u32 = 2;
const MINUTES_PER_TRANSFER: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    /// `line` is absent only for a single station route.
    Origin { line: Option<String> },
    Transfer { from: String, to: String },
    PassThrough,
    Destination,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub index: usize,
    pub station: Arc<str>,
    pub kind: StepKind,
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            StepKind::Origin { line: Some(line) } => {
                write!(f, "Start at {}, take line {line}", self.station)
            }
            StepKind::Origin { line: None } => write!(f, "Start at {}", self.station),
            StepKind::Transfer { from, to } => {
                write!(f, "Change at {} from {from} to {to}", self.station)
            }
            StepKind::PassThrough => write!(f, "Pass through {}", self.station),
            StepKind::Destination => write!(f, "Arrive at {}", self.station),
        }
    }
}

/// Line change exactly as the backend listed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferNotice {
    pub station: Arc<str>,
    pub from: String,
    pub to: String,
}

impl Display for TransferNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} → {}", self.station, self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    pub num_stations: u32,
    pub num_transfers: u32,
    /// Formatted labels, in order of first use.
    pub lines: Vec<String>,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePresentation {
    pub summary: RouteSummary,
    pub instructions: Vec<Instruction>,
    pub transfer_notices: Vec<TransferNotice>,
}

/// Heuristic travel time: two minutes per hop plus three per transfer.
pub fn estimate_duration(num_stations: u32, num_transfers: u32) -> u32 {
    num_stations
        .saturating_sub(1)
        .saturating_mul(MINUTES_PER_HOP)
        .saturating_add(num_transfers.saturating_mul(MINUTES_PER_TRANSFER))
}

pub fn present(route: &Route) -> RoutePresentation {
    let mut distinct: Vec<&str> = Vec::new();
    for code in &route.lines {
        if !distinct.contains(&code.as_ref()) {
            distinct.push(code);
        }
    }

    let summary = RouteSummary {
        num_stations: route.num_stations,
        num_transfers: route.num_transfers,
        lines: distinct.into_iter().map(line_code::format).collect(),
        duration_minutes: estimate_duration(route.num_stations, route.num_transfers),
    };

    let last = route.stations.len().saturating_sub(1);
    let instructions = route
        .stations
        .iter()
        .enumerate()
        .map(|(index, station)| {
            let kind = if index == 0 {
                StepKind::Origin {
                    line: route.lines.first().map(|code| line_code::format(code)),
                }
            } else if index == last {
                StepKind::Destination
            } else if route.is_transfer_at(index) {
                StepKind::Transfer {
                    from: line_code::format(&route.lines[index - 1]),
                    to: line_code::format(&route.lines[index]),
                }
            } else {
                StepKind::PassThrough
            };
            Instruction {
                index,
                station: station.clone(),
                kind,
            }
        })
        .collect();

    let transfer_notices = route
        .transfers
        .iter()
        .map(|transfer| TransferNotice {
            station: transfer.station.clone(),
            from: line_code::format(&transfer.from_line),
            to: line_code::format(&transfer.to_line),
        })
        .collect();

    RoutePresentation {
        summary,
        instructions,
        transfer_notices,
    }
}
