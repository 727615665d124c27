mod console;

use crate::console::ConsoleView;
use metro_map::prelude::*;
use tracing::{error, info};

const BACKEND_ENV: &str = "METRO_MAP_BACKEND";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let mut config = Config::default();
    if let Ok(url) = std::env::var(BACKEND_ENV) {
        config = config.with_backend_url(url);
    }
    let args: Vec<_> = std::env::args().skip(1).collect();

    let backend = match HttpBackend::new(&config) {
        Ok(backend) => backend,
        Err(err) => {
            error!("Invalid backend configuration: {err}");
            std::process::exit(1);
        }
    };
    info!("Using backend at {}", backend.base_url());

    let mut session = MapSession::new(backend, Scene::new(), ConsoleView::default(), config);
    if let LoadState::Failed { .. } = session.start().await {
        std::process::exit(1);
    }

    match args.as_slice() {
        [origin, destination, ..] => {
            let status = session.find_route(origin, destination).await;
            info!("Route search finished: {status:?}");
        }
        [] => {
            println!("{} stations available:", session.view().stations.len());
            for option in &session.view().stations {
                println!("  {}", option.name);
            }
        }
        [_] => {
            error!("Missing destination, usage: metro-map-viewer <origin> <destination>");
            std::process::exit(1);
        }
    }

    let scene = session.surface();
    println!(
        "Scene: {} markers, {} polylines",
        scene.markers().count(),
        scene.polylines().count()
    );
    if let Some(viewport) = scene.viewport() {
        println!(
            "Viewport: {} to {}",
            viewport.south_west, viewport.north_east
        );
    }
}
