use std::future::Future;

use thiserror::Error;

pub mod dto;
mod http;
pub use http::*;

use crate::{
    map::{LineDetails, StationDetails},
    route::{InvalidRoute, RouteOutcome, RouteQuery},
    topology::{Line, LineGeometry, Station},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { status: u16, url: String },
    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Malformed route: {0}")]
    MalformedRoute(#[from] InvalidRoute),
}

/// Everything the engine asks of the network backend. Responses come back
/// already validated into domain types.
pub trait Backend {
    fn stations(&self) -> impl Future<Output = Result<Vec<Station>, Error>>;
    fn lines(&self) -> impl Future<Output = Result<Vec<Line>, Error>>;
    fn line_geometries(&self) -> impl Future<Output = Result<Vec<LineGeometry>, Error>>;
    fn station(&self, id: &str) -> impl Future<Output = Result<StationDetails, Error>>;
    fn line(&self, code: &str) -> impl Future<Output = Result<LineDetails, Error>>;
    fn route(&self, query: &RouteQuery) -> impl Future<Output = Result<RouteOutcome, Error>>;
}
