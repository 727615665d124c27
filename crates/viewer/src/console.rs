use metro_map::{
    panel::{ErrorPanel, Legend, RouteMessage, StationOption, View},
    route::RoutePresentation,
};

/// Prints every panel update to stdout.
#[derive(Debug, Default)]
pub struct ConsoleView {
    pub stations: Vec<StationOption>,
}

impl View for ConsoleView {
    fn set_loading(&mut self, visible: bool) {
        if visible {
            println!("Loading network...");
        }
    }

    fn show_error_panel(&mut self, panel: &ErrorPanel) {
        println!("{}: {}", panel.title, panel.message);
        println!("Make sure that:");
        for hint in &panel.hints {
            println!("  - {hint}");
        }
        println!("[{}] restart the viewer to try again", panel.action);
    }

    fn set_station_options(&mut self, options: &[StationOption]) {
        self.stations = options.to_vec();
    }

    fn show_legend(&mut self, legend: &Legend) {
        println!("Legend:");
        for entry in &legend.entries {
            println!("  {:<20} {}", entry.label, entry.color);
        }
    }

    fn show_route_message(&mut self, message: &RouteMessage) {
        println!("{message}");
    }

    fn show_route(&mut self, presentation: &RoutePresentation) {
        let summary = &presentation.summary;
        println!(
            "{} stations, {} transfers, ~{} min on {}",
            summary.num_stations,
            summary.num_transfers,
            summary.duration_minutes,
            summary.lines.join(", ")
        );
        for instruction in &presentation.instructions {
            println!("  {}. {instruction}", instruction.index + 1);
        }
        if !presentation.transfer_notices.is_empty() {
            println!("Transfers:");
            for notice in &presentation.transfer_notices {
                println!("  {notice}");
            }
        }
    }

    fn reset_route_form(&mut self) {
        println!("Route cleared");
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}
