//! Verb dispatch against a resolved node.

use halyard_capabilities::CompiledCapabilitySet;
use halyard_core::{AnyEntity, Capability};
use halyard_graph::{Graph, Node};
use http::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::resolver::ResolvedPath;

/// Every verb, in the order they are reported in `Allow` lists.
pub const METHOD_ORDER: [Method; 6] = [
    Method::GET,
    Method::HEAD,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::POST,
];

/// What a verb produced.
#[derive(Debug, Clone)]
pub struct Dispatch {
    /// Status to answer with.
    pub status: StatusCode,
    /// The entity to render, if any.
    pub entity: Option<AnyEntity>,
}

impl Dispatch {
    fn with_entity(status: StatusCode, entity: AnyEntity) -> Self {
        Self {
            status,
            entity: Some(entity),
        }
    }

    fn empty(status: StatusCode) -> Self {
        Self {
            status,
            entity: None,
        }
    }
}

/// Runs the capability behind a verb.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'g> {
    graph: &'g Graph,
}

impl<'g> Dispatcher<'g> {
    /// Dispatcher over `graph`.
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Whether `node` can answer `method`. PATCH and POST never are.
    #[must_use]
    pub fn supports(node: &Node, method: &Method) -> bool {
        let capabilities = node.capabilities();
        match *method {
            Method::GET | Method::HEAD => capabilities.supports(Capability::Manifest),
            Method::PUT => capabilities.supports(Capability::Write),
            Method::DELETE => {
                capabilities.supports(Capability::Exists)
                    && capabilities.supports(Capability::Delete)
            },
            _ => false,
        }
    }

    /// Supported verbs of `node`, in [`METHOD_ORDER`].
    #[must_use]
    pub fn supported_methods(node: &Node) -> Vec<Method> {
        METHOD_ORDER
            .iter()
            .filter(|m| Self::supports(node, m))
            .cloned()
            .collect()
    }

    /// Run `method` against the resolved target.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MethodNotAllowed`] for an unsupported verb
    /// - [`ApiError::BadRequest`] for a missing or undecodable PUT payload
    /// - [`ApiError::Validation`] when Validate rejects the payload
    /// - [`ApiError::NotFound`] when deleting something that does not exist
    /// - [`ApiError::Capability`] when a capability fails
    ///
    /// # Panics
    ///
    /// Panics if `resolved` was produced over a different graph.
    pub fn dispatch(
        &self,
        resolved: &ResolvedPath,
        method: &Method,
        payload: Option<Value>,
    ) -> ApiResult<Dispatch> {
        let node = self.graph.node(resolved.node());
        if !Self::supports(node, method) {
            return Err(ApiError::MethodNotAllowed {
                method: method.clone(),
                allowed: Self::supported_methods(node),
            });
        }

        debug!(
            resource = %node.type_name(),
            method = %method,
            id = %resolved.id(),
            "Dispatching"
        );

        let capabilities = node.capabilities();
        match *method {
            Method::PUT => Self::put(capabilities, resolved, payload),
            Method::DELETE => Self::delete(capabilities, resolved),
            _ => self.get(resolved),
        }
    }

    /// Manifest the resolved target. A missing entity is a `404` with no
    /// entity rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Capability`] if Manifest fails.
    ///
    /// # Panics
    ///
    /// Panics if `resolved` was produced over a different graph.
    pub fn get(&self, resolved: &ResolvedPath) -> ApiResult<Dispatch> {
        let capabilities = self.graph.node(resolved.node()).capabilities();
        Ok(
            match capabilities.manifest(resolved.parent(), resolved.id())? {
                Some(entity) => Dispatch::with_entity(StatusCode::OK, entity),
                None => Dispatch::empty(StatusCode::NOT_FOUND),
            },
        )
    }

    fn put(
        capabilities: &CompiledCapabilitySet,
        resolved: &ResolvedPath,
        payload: Option<Value>,
    ) -> ApiResult<Dispatch> {
        let value =
            payload.ok_or_else(|| ApiError::BadRequest("request body is required".to_owned()))?;
        let entity = capabilities
            .decode(value)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        if capabilities.is_supplied(Capability::Validate) {
            capabilities
                .validate(&entity, resolved.id(), resolved.parent())
                .map_err(|e| {
                    if e.is_handler_failure() {
                        ApiError::Validation(e.to_string())
                    } else {
                        ApiError::Capability(e)
                    }
                })?;
        }

        let existed = capabilities.exists(resolved.parent(), resolved.id())?;
        capabilities.write(&entity, resolved.id(), resolved.parent())?;

        let status = if existed {
            StatusCode::OK
        } else {
            StatusCode::CREATED
        };
        Ok(Dispatch::with_entity(status, entity))
    }

    fn delete(
        capabilities: &CompiledCapabilitySet,
        resolved: &ResolvedPath,
    ) -> ApiResult<Dispatch> {
        if !capabilities.exists(resolved.parent(), resolved.id())? {
            return Err(ApiError::NotFound(resolved.path()));
        }
        capabilities.delete(resolved.id(), resolved.parent())?;
        Ok(Dispatch::empty(StatusCode::OK))
    }
}
