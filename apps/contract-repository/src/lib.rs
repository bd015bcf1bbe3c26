//! Server-rendered admin pages for the WirePact contract repository.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use contracts_client::{ClientFactory, ContractsApi, RpcError};
use serde::Serialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod auth;
pub mod config;
pub mod pages;
pub mod web_maud;

use crate::auth::{BasicCredentials, basic_auth_gate};
use crate::config::Config;

const SERVICE_NAME: &str = "contract-repository";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub credentials: BasicCredentials,
    pub contracts: Arc<dyn ContractsApi>,
    started_at: Instant,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    uptime_seconds: u64,
}

/// Router backed by a lazily connected gRPC client for `config.repo_uri`.
pub fn build_router(config: Config) -> Result<Router, RpcError> {
    let factory = ClientFactory::new(config.repo_uri.clone());
    let contracts = factory.contracts("")?;
    Ok(build_router_with_client(config, Arc::new(contracts)))
}

pub fn build_router_with_client(config: Config, contracts: Arc<dyn ContractsApi>) -> Router {
    let credentials = BasicCredentials::new(&config.auth_user, &config.auth_pass);
    let state = AppState {
        config: Arc::new(config),
        credentials,
        contracts,
        started_at: Instant::now(),
    };

    let pages = Router::new()
        .route("/", get(pages::contract_list))
        .route("/detail/:contract_id", get(pages::contract_detail))
        .route("/detail/:contract_id/delete", post(pages::delete_contract))
        .route(
            "/new",
            get(pages::new_contract_form).post(pages::create_contract),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            basic_auth_gate,
        ));

    Router::new()
        .route("/healthz", get(health))
        .merge(pages)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http()),
        )
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

pub async fn serve(config: Config) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        service = SERVICE_NAME,
        bind_addr = %config.bind_addr,
        repo_uri = %config.repo_uri,
        "contract repository listening"
    );
    axum::serve(listener, build_router(config)?).await?;
    Ok(())
}
