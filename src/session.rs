use tracing::{debug, info, warn};

use crate::{
    api::{self, Backend},
    config::Config,
    loader::{LoadCoordinator, LoadState, LoadTargets},
    map::{MapSurface, OverlayRegistry, RenderReport, Selection},
    panel::{RouteMessage, View},
    route::{self, QueryError, RouteOutcome, RouteQuery, RouteSlot, RouteTicket},
    topology::Topology,
};

/// Route request that passed validation and holds a ticket.
#[derive(Debug, Clone)]
pub struct PendingRoute {
    ticket: RouteTicket,
    query: RouteQuery,
}

impl PendingRoute {
    pub fn ticket(&self) -> RouteTicket {
        self.ticket
    }

    pub fn query(&self) -> &RouteQuery {
        &self.query
    }

    /// Asks the backend. Does not touch the session, so several fetches may
    /// run at once.
    pub async fn fetch<B: Backend>(self, backend: &B) -> FetchedRoute {
        let result = backend.route(&self.query).await;
        FetchedRoute {
            ticket: self.ticket,
            query: self.query,
            result,
        }
    }
}

#[derive(Debug)]
pub struct FetchedRoute {
    ticket: RouteTicket,
    query: RouteQuery,
    result: Result<RouteOutcome, api::Error>,
}

impl FetchedRoute {
    pub fn ticket(&self) -> RouteTicket {
        self.ticket
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteStatus {
    /// The query never reached the backend.
    Rejected(QueryError),
    Drawn(RenderReport),
    NotFound,
    Failed,
    /// A newer request was issued, or the request was cancelled, before
    /// this one completed.
    Superseded,
}

/// One map client: topology, overlays and the surfaces they are drawn on.
pub struct MapSession<B, S, V> {
    backend: B,
    surface: S,
    view: V,
    config: Config,
    topology: Topology,
    registry: OverlayRegistry,
    loader: LoadCoordinator,
    routes: RouteSlot,
}

impl<B, S, V> MapSession<B, S, V>
where
    B: Backend,
    S: MapSurface,
    V: View,
{
    pub fn new(backend: B, surface: S, view: V, config: Config) -> Self {
        Self {
            backend,
            surface,
            view,
            config,
            topology: Topology::new(),
            registry: OverlayRegistry::new(),
            loader: LoadCoordinator::new(),
            routes: RouteSlot::new(),
        }
    }

    pub async fn start(&mut self) -> &LoadState {
        let targets = LoadTargets {
            topology: &mut self.topology,
            registry: &mut self.registry,
            surface: &mut self.surface,
            view: &mut self.view,
        };
        self.loader
            .load(&self.backend, targets, self.config.initial_fit_padding)
            .await
    }

    pub async fn find_route(&mut self, origin: &str, destination: &str) -> RouteStatus {
        let pending = match self.begin_route_request(origin, destination) {
            Ok(pending) => pending,
            Err(err) => return RouteStatus::Rejected(err),
        };
        let fetched = pending.fetch(&self.backend).await;
        self.complete_route(fetched)
    }

    pub fn begin_route_request(
        &mut self,
        origin: &str,
        destination: &str,
    ) -> Result<PendingRoute, QueryError> {
        let query = match RouteQuery::new(origin, destination) {
            Ok(query) => query,
            Err(err) => {
                debug!("Route query {origin:?} -> {destination:?} rejected: {err}");
                self.view.show_route_message(&RouteMessage::Invalid(err.clone()));
                return Err(err);
            }
        };
        self.view.show_route_message(&RouteMessage::Searching);
        let ticket = self.routes.issue();
        debug!(
            "Route request {ticket:?}: {} -> {}",
            query.origin, query.destination
        );
        Ok(PendingRoute { ticket, query })
    }

    pub fn complete_route(&mut self, fetched: FetchedRoute) -> RouteStatus {
        let FetchedRoute {
            ticket,
            query,
            result,
        } = fetched;
        if !self.routes.is_current(ticket) {
            debug!(
                "Dropping stale route {} -> {} ({ticket:?})",
                query.origin, query.destination
            );
            return RouteStatus::Superseded;
        }

        match result {
            Err(err) => {
                warn!(
                    "Route request {} -> {} failed: {err}",
                    query.origin, query.destination
                );
                self.view.show_route_message(&RouteMessage::Failed);
                RouteStatus::Failed
            }
            Ok(RouteOutcome::NotFound { reason }) => {
                info!("No route from {} to {}", query.origin, query.destination);
                self.view.show_route_message(&RouteMessage::NotFound(reason));
                RouteStatus::NotFound
            }
            Ok(RouteOutcome::Found(found)) => {
                self.view.show_route(&route::present(&found));
                let report = route::draw_route(
                    &found,
                    &self.topology,
                    &mut self.registry,
                    &mut self.surface,
                    &self.config.route,
                );
                RouteStatus::Drawn(report)
            }
        }
    }

    /// Removes the drawn route and resets the form. Requests still in flight
    /// are left alone, see [`MapSession::cancel_pending_route`].
    pub fn clear_route(&mut self) {
        self.registry.clear(&mut self.surface);
        self.view.reset_route_form();
    }

    pub fn cancel_pending_route(&mut self) {
        self.routes.cancel();
    }

    /// Opens the detail popup for whatever primitive was clicked.
    pub async fn select(&mut self, selection: Selection) {
        match selection {
            Selection::Station(id) => match self.backend.station(&id).await {
                Ok(details) => {
                    let at = details.coordinate.or_else(|| {
                        self.topology
                            .station_by_id(&id)
                            .and_then(|station| station.coordinate)
                    });
                    match at {
                        Some(at) => {
                            let popup = details.popup(&self.topology);
                            self.surface.open_popup(at, &popup);
                        }
                        None => debug!("Station {id} has no position for its popup"),
                    }
                }
                Err(err) => {
                    warn!("Failed to load station {id}: {err}");
                    self.view.alert(&format!("Could not load station details: {err}"));
                }
            },
            Selection::Line(code) => match self.backend.line(&code).await {
                Ok(details) => match details.anchor(&self.topology) {
                    Some(at) => self.surface.open_popup(at, &details.popup()),
                    None => debug!("Line {code} has no stations on the map"),
                },
                Err(err) => {
                    warn!("Failed to load line {code}: {err}");
                    self.view.alert(&format!("Could not load line details: {err}"));
                }
            },
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn registry(&self) -> &OverlayRegistry {
        &self.registry
    }

    pub fn load_state(&self) -> &LoadState {
        self.loader.state()
    }
}
