mod common;

use common::{RecordingView, ViewEvent, backend, lines, session, started};
use metro_map::{
    loader::{LoadCoordinator, LoadState, LoadTargets},
    map::{MarkerIcon, OverlayRegistry, Scene, Selection},
    panel::LegendKind,
    topology::{Station, Topology},
};

#[tokio::test]
async fn load_success_test() {
    let session = started(backend()).await;

    let LoadState::Loaded(summary) = session.load_state() else {
        panic!("expected Loaded, got {:?}", session.load_state());
    };
    assert_eq!(summary.stations, 7);
    assert_eq!(summary.lines, 2);
    assert_eq!(summary.geometries, 2);
    assert_eq!(summary.station_markers.drawn, 6);
    assert_eq!(summary.station_markers.skipped, 1);
    assert_eq!(summary.line_polylines.drawn, 2);

    let scene = session.surface();
    assert_eq!(scene.markers().count(), 6);
    assert_eq!(scene.polylines().count(), 2);
    assert!(session.registry().revision() >= 1);
}

#[tokio::test]
async fn load_view_sequence_test() {
    let session = started(backend()).await;
    let kinds: Vec<&str> = session
        .view()
        .events
        .iter()
        .map(|event| match event {
            ViewEvent::Loading(true) => "loading",
            ViewEvent::Loading(false) => "loaded",
            ViewEvent::StationOptions(_) => "options",
            ViewEvent::Legend(_) => "legend",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["loading", "options", "loaded", "legend"]);
}

#[tokio::test]
async fn station_options_sorted_test() {
    let mut stations = common::stations();
    stations.insert(0, Station::new("z2", "zeta").at(41.5, 2.3));
    stations.push(Station::new("a2", "Alpha").at(41.6, 2.4));
    let mut backend = backend();
    backend.stations = Some(stations);
    let session = started(backend).await;

    let options = session
        .view()
        .events
        .iter()
        .find_map(|event| match event {
            ViewEvent::StationOptions(options) => Some(options.clone()),
            _ => None,
        })
        .expect("station options");
    let names: Vec<&str> = options.iter().map(|option| &*option.name).collect();
    assert_eq!(
        names,
        vec!["Alpha", "Bravo", "Charlie", "Delta", "Xray", "Yankee", "zeta", "Zulu"]
    );
    // The first Alpha keeps its id.
    assert_eq!(&*options[0].id, "a");
}

#[tokio::test]
async fn legend_test() {
    let session = started(backend()).await;
    let legend = session
        .view()
        .events
        .iter()
        .find_map(|event| match event {
            ViewEvent::Legend(legend) => Some(legend.clone()),
            _ => None,
        })
        .expect("legend");
    assert_eq!(legend.entries.len(), 4);
    assert_eq!(legend.entries[0].kind, LegendKind::RegularStation);
    assert_eq!(legend.entries[1].kind, LegendKind::InterchangeStation);
    let labels: Vec<&str> = legend.entries[2..]
        .iter()
        .map(|entry| entry.label.as_str())
        .collect();
    assert_eq!(labels, vec!["L1", "L2"]);
    assert_eq!(legend.entries[2].color, "#E4002B");
}

#[tokio::test]
async fn initial_fit_test() {
    let session = started(backend()).await;
    let viewport = session.surface().viewport().expect("viewport");
    for station in session.topology().stations() {
        if let Some(coordinate) = station.coordinate {
            assert!(viewport.contains(&coordinate));
        }
    }
    // Padded by a tenth on each side.
    assert!(viewport.south_west.latitude < 41.38);
    assert!(viewport.north_east.latitude > 41.44);
}

#[tokio::test]
async fn stations_without_coordinates_skipped_test() {
    let session = started(backend()).await;
    let scene = session.surface();
    let selected: Vec<Selection> = scene
        .markers()
        .filter_map(|(_, marker)| marker.on_select.clone())
        .collect();
    assert_eq!(selected.len(), 6);
    assert!(!selected.contains(&Selection::Station("y".into())));
    assert!(selected.contains(&Selection::Station("z".into())));
    // Still known to the topology.
    assert!(session.topology().station_by_name("Yankee").is_some());
}

#[tokio::test]
async fn interchange_marker_test() {
    let session = started(backend()).await;
    let scene = session.surface();
    let charlie = session
        .topology()
        .station_by_name("Charlie")
        .and_then(|station| station.coordinate)
        .expect("Charlie on the map");
    let (_, marker) = scene
        .markers()
        .find(|(_, marker)| marker.position == charlie)
        .expect("Charlie marker");
    assert_eq!(marker.icon, MarkerIcon::Station { interchange: true });
    assert_eq!(marker.icon.size(), 16);

    let (_, alpha) = scene
        .markers()
        .find(|(_, marker)| marker.on_select == Some(Selection::Station("a".into())))
        .expect("Alpha marker");
    assert_eq!(alpha.icon.size(), 12);
}

#[tokio::test]
async fn stations_fetch_failure_test() {
    let mut backend = backend();
    backend.stations = None;
    let session = started(backend).await;

    let LoadState::Failed { reason } = session.load_state() else {
        panic!("expected Failed, got {:?}", session.load_state());
    };
    assert!(reason.contains("500"));
    assert!(session.surface().is_empty());

    let events = &session.view().events;
    assert_eq!(events.first(), Some(&ViewEvent::Loading(true)));
    assert!(events.contains(&ViewEvent::Loading(false)));
    let panel = events
        .iter()
        .find_map(|event| match event {
            ViewEvent::ErrorPanel(panel) => Some(panel),
            _ => None,
        })
        .expect("error panel");
    assert_eq!(panel.hints.len(), 3);
    assert_eq!(panel.action, "Retry");
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, ViewEvent::StationOptions(_) | ViewEvent::Legend(_)))
    );
}

#[tokio::test]
async fn lines_fetch_failure_test() {
    let mut backend = backend();
    backend.lines = None;
    let session = started(backend).await;
    assert!(matches!(session.load_state(), LoadState::Failed { .. }));
    assert!(session.topology().stations().is_empty());
}

#[tokio::test]
async fn geometry_failure_still_loads_test() {
    let mut backend = backend();
    backend.geometries = None;
    let session = started(backend).await;

    let LoadState::Loaded(summary) = session.load_state() else {
        panic!("expected Loaded, got {:?}", session.load_state());
    };
    assert_eq!(summary.geometries, 0);
    assert_eq!(summary.station_markers.drawn, 6);
    assert_eq!(session.surface().polylines().count(), 0);
    assert_eq!(session.surface().markers().count(), 6);
}

#[tokio::test]
async fn second_start_ignored_test() {
    let mut session = session(backend());
    session.start().await;
    let before = session.surface().len();
    let state = session.start().await.clone();

    assert!(matches!(state, LoadState::Loaded(_)));
    assert!(state.is_terminal());
    assert_eq!(session.surface().len(), before);
    let loading = session
        .view()
        .events
        .iter()
        .filter(|event| **event == ViewEvent::Loading(true))
        .count();
    assert_eq!(loading, 1);
}

#[tokio::test]
async fn failed_load_is_terminal_test() {
    let mut backend = backend();
    backend.stations = None;
    let mut session = session(backend);
    session.start().await;
    let state = session.start().await;
    assert!(matches!(state, LoadState::Failed { .. }));
}

#[tokio::test]
async fn coordinator_direct_test() {
    let backend = backend();
    let mut topology = Topology::new();
    let mut registry = OverlayRegistry::new();
    let mut scene = Scene::new();
    let mut view = RecordingView::default();
    let mut coordinator = LoadCoordinator::new();
    assert_eq!(coordinator.state(), &LoadState::Idle);

    let state = coordinator
        .load(
            &backend,
            LoadTargets {
                topology: &mut topology,
                registry: &mut registry,
                surface: &mut scene,
                view: &mut view,
            },
            0.1,
        )
        .await;
    assert!(matches!(state, LoadState::Loaded(_)));
    assert_eq!(topology.lines().len(), lines().len());
    assert_eq!(registry.station_markers().count(), 6);
    assert_eq!(registry.line_polylines().len(), 2);
    // Markers are real primitives on the surface.
    for id in registry.station_markers() {
        assert!(scene.contains(id));
    }
}
