//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with every route and its middleware chain
//! - Wire up cross-cutting layers (CORS, tracing, request ID, timeout, body limit, metrics)
//! - Bind the server to a listener and stop on the shutdown signal

use axum::{
    middleware::{self, from_fn_with_state},
    routing::{delete, get, patch, post, put},
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{DeadlineConfig, QuotaConfig, TodoApiConfig};
use crate::http::handlers::{
    activate_pro, create_todo, delete_todo, health, list_todos, mark_todo_done, register_user,
    show_user, update_todo,
};
use crate::http::middleware::{
    enforce_todo_quota, require_todo, require_user_by_id, require_user_by_username, track_metrics,
};
use crate::store::UserStore;

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub store: UserStore,
    pub quota: QuotaConfig,
    pub deadlines: DeadlineConfig,
}

impl AppState {
    pub fn new(config: &TodoApiConfig, store: UserStore) -> Self {
        Self {
            store,
            quota: config.quota.clone(),
            deadlines: config.deadlines.clone(),
        }
    }
}

/// HTTP server for the to-do API.
pub struct HttpServer {
    router: Router,
    config: TodoApiConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with an empty store.
    pub fn new(config: TodoApiConfig) -> Self {
        Self::with_store(config, UserStore::new())
    }

    /// Create a server around an existing store handle.
    pub fn with_store(config: TodoApiConfig, store: UserStore) -> Self {
        let state = AppState::new(&config, store);
        let router = Self::build_router(&config, state.clone());
        Self {
            router,
            config,
            state,
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Within one route, the last `route_layer` added runs first.
    #[allow(deprecated)]
    pub fn build_router(config: &TodoApiConfig, state: AppState) -> Router {
        let by_id = from_fn_with_state(state.clone(), require_user_by_id);
        let by_username = from_fn_with_state(state.clone(), require_user_by_username);
        let quota = from_fn_with_state(state.clone(), enforce_todo_quota);
        let todo = from_fn_with_state(state.clone(), require_todo);

        Router::new()
            .route("/users", post(register_user))
            .route("/users/{id}", get(show_user).route_layer(by_id.clone()))
            .route("/users/{id}/pro", patch(activate_pro).route_layer(by_id))
            .route("/todos", get(list_todos).route_layer(by_username.clone()))
            .route(
                "/todos",
                post(create_todo)
                    .route_layer(quota)
                    .route_layer(by_username.clone()),
            )
            .route("/todos/{id}", put(update_todo).route_layer(todo.clone()))
            .route(
                "/todos/{id}",
                delete(delete_todo)
                    .route_layer(todo.clone())
                    .route_layer(by_username),
            )
            .route("/todos/{id}/done", patch(mark_todo_done).route_layer(todo))
            .route("/health", get(health))
            .with_state(state)
            .layer(middleware::from_fn(track_metrics))
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            // any origin may call the API; preflights are answered here
            .layer(CorsLayer::permissive())
    }

    /// The assembled router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &TodoApiConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
