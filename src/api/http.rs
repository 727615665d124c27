use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    api::{
        Backend, Error,
        dto::{LineDetailsDto, LineDto, LineGeometryDto, RouteDto, StationDetailsDto, StationDto},
    },
    config::Config,
    map::{LineDetails, StationDetails},
    route::{RouteOutcome, RouteQuery},
    topology::{Line, LineGeometry, Station},
};

/// [`Backend`] speaking JSON over HTTP.
///
/// No timeout is set unless [`Config::request_timeout`] asks for one, a
/// request that never answers stays pending.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut base = config.backend_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, Error> {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        debug!("GET {url}");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Backend for HttpBackend {
    async fn stations(&self) -> Result<Vec<Station>, Error> {
        let stations: Vec<StationDto> = self.get("api/stations", &[]).await?;
        Ok(stations
            .into_iter()
            .filter_map(StationDto::into_station)
            .collect())
    }

    async fn lines(&self) -> Result<Vec<Line>, Error> {
        let lines: Vec<LineDto> = self.get("api/lines", &[]).await?;
        Ok(lines.into_iter().map(Line::from).collect())
    }

    async fn line_geometries(&self) -> Result<Vec<LineGeometry>, Error> {
        let geometries: Vec<LineGeometryDto> = self.get("api/line-geometries", &[]).await?;
        Ok(geometries.into_iter().map(LineGeometry::from).collect())
    }

    async fn station(&self, id: &str) -> Result<StationDetails, Error> {
        let path = format!("api/station/{}", urlencoding::encode(id));
        let details: StationDetailsDto = self.get(&path, &[]).await?;
        Ok(details.into())
    }

    async fn line(&self, code: &str) -> Result<LineDetails, Error> {
        let path = format!("api/line/{}", urlencoding::encode(code));
        let details: LineDetailsDto = self.get(&path, &[]).await?;
        Ok(details.into_details(code))
    }

    async fn route(&self, query: &RouteQuery) -> Result<RouteOutcome, Error> {
        let route: RouteDto = self
            .get(
                "api/route",
                &[("origin", &*query.origin), ("destination", &*query.destination)],
            )
            .await?;
        Ok(RouteOutcome::try_from(route)?)
    }
}
