//! Static web build served next to the API.
//!
//! Paths that name a file get that file. Any other path gets `index.html`
//! so client-side routes load the app, except under `/assets/`, where a
//! missing file stays a 404.

use std::path::Path;

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::{
    services::{ServeDir, ServeFile},
    set_status::SetStatus,
};

const ASSETS_PREFIX: &str = "/assets/";

/// File service for one web directory.
#[derive(Clone)]
pub struct StaticFiles {
    app: ServeDir<SetStatus<ServeFile>>,
    assets: ServeDir,
}

impl StaticFiles {
    pub fn new(dir: &Path) -> Self {
        Self {
            app: ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("index.html"))),
            assets: ServeDir::new(dir),
        }
    }

    /// Answer `request` from the directory.
    pub async fn serve(&self, request: Request<Body>) -> Response {
        let response = if request.uri().path().starts_with(ASSETS_PREFIX) {
            self.assets
                .clone()
                .oneshot(request)
                .await
                .map(IntoResponse::into_response)
        } else {
            self.app
                .clone()
                .oneshot(request)
                .await
                .map(IntoResponse::into_response)
        };

        match response {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}
