use std::future::Future;
use std::path::{Path, PathBuf};
use axum::{
    Router,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use common::log;

use crate::directory_listing::{
    ListingEntry, relative_request_path, render_directory_listing, sort_entries,
};

/// Static files from `root`. Directories serve their `index.html`, or a
/// generated listing when there is none.
pub fn build_router(root: PathBuf) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let listing_root = root.clone();
    let listing = get(move |uri: Uri| list_directory(listing_root.clone(), uri));

    let serve_dir = ServeDir::new(&root)
        .append_index_html_on_directories(true)
        .fallback(listing);

    Router::new().fallback_service(serve_dir).layer(cors)
}

pub async fn run_web_server(
    addr: &str,
    root: PathBuf,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = build_router(root.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    log!("Serving {} on http://{}", root.display(), local_addr);
    log!("Open http://localhost:{} in a browser to play", local_addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn list_directory(root: PathBuf, uri: Uri) -> Response {
    let Some(relative) = relative_request_path(uri.path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let directory = root.join(relative);
    if !tokio::fs::metadata(&directory)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
    {
        return StatusCode::NOT_FOUND.into_response();
    }

    match read_entries(&directory).await {
        Ok(mut entries) => {
            sort_entries(&mut entries);
            log!("Listing {} ({} entries)", uri.path(), entries.len());
            Html(render_directory_listing(uri.path(), &entries)).into_response()
        }
        Err(e) => {
            log!("Failed to list {}: {}", directory.display(), e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn read_entries(directory: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(directory).await?;

    while let Some(entry) = read_dir.next_entry().await? {
        let metadata = entry.metadata().await?;
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: metadata.is_dir(),
            size: metadata.is_file().then(|| metadata.len()),
        });
    }

    Ok(entries)
}
