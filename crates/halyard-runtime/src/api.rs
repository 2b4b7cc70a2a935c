//! The request façade.

use halyard_capabilities::Registry;
use halyard_core::path::split_path;
use halyard_core::{GraphBuildResult, Resource};
use halyard_graph::Graph;
use halyard_telemetry::{RequestContext, RequestGuard};
use http::StatusCode;
use tracing::{debug, warn};

use crate::dispatcher::Dispatcher;
use crate::error::{ApiError, ApiResult};
use crate::expansion::ExpansionEngine;
use crate::request::{Body, Request, Response};
use crate::resolver::PathResolver;

/// Request handling settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// Prefix every request path must carry; also prefixes generated links.
    pub base_path: String,
    /// Maximum nesting of embedded children.
    pub max_embed_depth: usize,
    /// Whether [`Api::encode`] pretty-prints.
    pub pretty_json: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            max_embed_depth: 16,
            pretty_json: true,
        }
    }
}

impl ApiSettings {
    /// Set the base path.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Set the embedding depth limit.
    #[must_use]
    pub fn with_max_embed_depth(mut self, depth: usize) -> Self {
        self.max_embed_depth = depth;
        self
    }
}

/// A built resource graph, ready to answer requests.
///
/// Holds no per-request state; share it freely between threads.
#[derive(Debug, Clone)]
pub struct Api {
    graph: Graph,
    settings: ApiSettings,
}

impl Api {
    /// Build the graph rooted at `T` with default settings.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphBuildError`](halyard_core::GraphBuildError)
    /// found in the declarations.
    pub fn build<T: Resource>(registry: &Registry) -> GraphBuildResult<Self> {
        Graph::build::<T>(registry).map(Self::from_graph)
    }

    /// Wrap an already built graph.
    #[must_use]
    pub fn from_graph(graph: Graph) -> Self {
        Self {
            graph,
            settings: ApiSettings::default(),
        }
    }

    /// Replace the settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ApiSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The resource graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    /// Answer a request. Never fails: errors become error responses.
    #[must_use]
    pub fn handle(&self, request: &Request) -> Response {
        let _guard = RequestGuard::new(RequestContext::new(
            request.method.as_str(),
            request.path.as_str(),
        ));

        match self.try_handle(request) {
            Ok(response) => {
                debug!(status = response.status.as_u16(), "Handled request");
                response
            },
            Err(e) => {
                if e.status().is_server_error() {
                    warn!(status = e.status().as_u16(), error = %e, "Request failed");
                } else {
                    debug!(status = e.status().as_u16(), error = %e, "Request rejected");
                }
                Response::from_error(&e)
            },
        }
    }

    /// Serialize a response body with the configured formatting.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized.
    pub fn encode(&self, response: &Response) -> serde_json::Result<Vec<u8>> {
        response.to_bytes(self.settings.pretty_json)
    }

    fn try_handle(&self, request: &Request) -> ApiResult<Response> {
        let path = self
            .strip_base_path(&request.path)
            .ok_or_else(|| ApiError::NotFound(request.path.clone()))?;

        let resolved = PathResolver::new(&self.graph).resolve(&split_path(path))?;
        let dispatch = Dispatcher::new(&self.graph).dispatch(
            &resolved,
            &request.method,
            request.payload.clone(),
        )?;

        let Some(entity) = dispatch.entity else {
            return Ok(Response::empty(dispatch.status));
        };

        let body = if dispatch.status == StatusCode::OK && request.method.is_safe() {
            ExpansionEngine::new(
                &self.graph,
                &self.settings.base_path,
                self.settings.max_embed_depth,
            )
            .expand(&resolved, &entity)?
        } else {
            entity.to_json().map_err(|e| ApiError::Internal(e.to_string()))?
        };

        Ok(Response {
            status: dispatch.status,
            body: Body::Json(body),
            allow: Vec::new(),
        })
    }

    fn strip_base_path<'p>(&self, path: &'p str) -> Option<&'p str> {
        let base = self.settings.base_path.as_str();
        if base.is_empty() {
            return Some(path);
        }
        let rest = path.strip_prefix(base)?;
        (rest.is_empty() || rest.starts_with('/')).then_some(rest)
    }
}
