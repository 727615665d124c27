use std::time::Instant;

use futures_util::future::try_join;
use tracing::{error, info, warn};

use crate::{
    api::Backend,
    map::{MapSurface, OverlayRegistry, RenderReport},
    panel::{ErrorPanel, Legend, View, station_options},
    topology::Topology,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub stations: usize,
    pub lines: usize,
    pub geometries: usize,
    pub station_markers: RenderReport,
    pub line_polylines: RenderReport,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(LoadSummary),
    Failed {
        reason: String,
    },
}

impl LoadState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::Failed { .. })
    }
}

/// Everything a load writes into.
pub struct LoadTargets<'a, S, V> {
    pub topology: &'a mut Topology,
    pub registry: &'a mut OverlayRegistry,
    pub surface: &'a mut S,
    pub view: &'a mut V,
}

/// Runs the startup load once: `Idle -> Loading -> Loaded | Failed`.
#[derive(Debug, Default)]
pub struct LoadCoordinator {
    state: LoadState,
}

impl LoadCoordinator {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub async fn load<B, S, V>(
        &mut self,
        backend: &B,
        targets: LoadTargets<'_, S, V>,
        fit_padding: f64,
    ) -> &LoadState
    where
        B: Backend,
        S: MapSurface,
        V: View,
    {
        if self.state != LoadState::Idle {
            warn!("Load requested while {:?}, ignoring", self.state);
            return &self.state;
        }
        let LoadTargets {
            topology,
            registry,
            surface,
            view,
        } = targets;

        self.state = LoadState::Loading;
        view.set_loading(true);
        let now = Instant::now();

        let (stations, lines) = match try_join(backend.stations(), backend.lines()).await {
            Ok(data) => data,
            Err(err) => {
                error!("Failed to load the network: {err}");
                view.set_loading(false);
                view.show_error_panel(&ErrorPanel::load_failure(&err));
                self.state = LoadState::Failed {
                    reason: err.to_string(),
                };
                return &self.state;
            }
        };
        info!(
            "Fetched {} stations and {} lines in {:?}",
            stations.len(),
            lines.len(),
            now.elapsed()
        );

        let event = topology.load(stations, lines);
        registry.on_topology_changed(surface, event);

        match backend.line_geometries().await {
            Ok(geometries) => topology.attach_geometries(geometries),
            Err(err) => warn!("Line geometries unavailable, drawing stations only: {err}"),
        }

        let line_polylines = registry.add_line_geometries(surface, topology.geometries());
        let station_markers = registry.add_station_markers(surface, topology.stations());
        view.set_station_options(&station_options(topology.stations()));
        view.set_loading(false);
        registry.fit_to_stations(surface, fit_padding);
        view.show_legend(&Legend::new(topology.lines()));

        let summary = LoadSummary {
            stations: topology.stations().len(),
            lines: topology.lines().len(),
            geometries: topology.geometries().len(),
            station_markers,
            line_polylines,
        };
        info!("Network ready in {:?}: {summary:?}", now.elapsed());
        self.state = LoadState::Loaded(summary);
        &self.state
    }
}
