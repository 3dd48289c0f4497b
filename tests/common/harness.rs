//! Spawns a real server on an ephemeral port.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use veracity::analysis::Analyzer;
use veracity::config::Config;
use veracity::enrichment::Enrichment;
use veracity::gateway::{AppState, create_router_with_state};
use veracity::model::ModelStore;
use veracity::model::mock::{sample_classifier_artifact, sample_vectorizer_artifact};

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    /// Write the sample artifacts to disk and load them.
    pub with_model: bool,
    /// Headline search endpoint (usually an `httpmock` server).
    pub serpapi_url: Option<String>,
    pub serpapi_key: Option<String>,
    pub headline_cache_capacity: u64,
    pub http_timeout: Duration,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            with_model: true,
            serpapi_url: None,
            serpapi_key: None,
            headline_cache_capacity: 16,
            http_timeout: Duration::from_secs(2),
        }
    }
}

pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    _artifacts: TempDir,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

fn write_artifacts(dir: &TempDir) -> anyhow::Result<(PathBuf, PathBuf)> {
    let classifier = dir.path().join("classifier.json");
    let vectorizer = dir.path().join("vectorizer.json");
    std::fs::write(&classifier, serde_json::to_vec(&sample_classifier_artifact())?)?;
    std::fs::write(&vectorizer, serde_json::to_vec(&sample_vectorizer_artifact())?)?;
    Ok((classifier, vectorizer))
}

pub async fn spawn_test_server(config: TestServerConfig) -> anyhow::Result<TestServer> {
    let artifacts = TempDir::new()?;

    let (classifier_path, vectorizer_path) = if config.with_model {
        write_artifacts(&artifacts)?
    } else {
        (
            artifacts.path().join("missing-classifier.json"),
            artifacts.path().join("missing-vectorizer.json"),
        )
    };

    let defaults = Config::default();
    let server_config = Config {
        port: 0,
        classifier_path,
        vectorizer_path,
        serpapi_key: config.serpapi_key.clone(),
        serpapi_url: config.serpapi_url.clone().unwrap_or(defaults.serpapi_url.clone()),
        translation_enabled: false,
        url_extraction_enabled: true,
        http_timeout: config.http_timeout,
        headline_cache_capacity: config.headline_cache_capacity,
        ..defaults
    };
    server_config.validate()?;

    let model = ModelStore::load_or_degrade(
        &server_config.classifier_path,
        &server_config.vectorizer_path,
    )
    .map(Arc::new);
    let enrichment = Enrichment::from_config(&server_config)?;
    let app = create_router_with_state(AppState::new(Analyzer::new(model, enrichment)));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = rx.await;
            })
            .await;
    });

    Ok(TestServer {
        addr,
        shutdown: Some(tx),
        handle: Some(handle),
        _artifacts: artifacts,
    })
}
