use std::time::Duration;

use crate::route::RouteStyle;

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    /// `None` keeps requests open until the backend answers.
    pub request_timeout: Option<Duration>,
    /// Padding applied when fitting the map to every station after load.
    pub initial_fit_padding: f64,
    pub route: RouteStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".into(),
            request_timeout: None,
            initial_fit_padding: 0.1,
            route: RouteStyle::default(),
        }
    }
}

impl Config {
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }
}
