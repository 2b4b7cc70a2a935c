//! Walking request paths through the resource graph.

use halyard_core::AnyEntity;
use halyard_core::path::join_path;
use halyard_graph::{Child, Graph, NodeId};
use tracing::{debug, trace};

use crate::error::{ApiError, ApiResult};

/// Where a path walk ended: the target node and everything needed to
/// invoke its capabilities.
#[derive(Debug, Clone)]
pub struct ResolvedPath {
    node: NodeId,
    parents: Vec<AnyEntity>,
    id: String,
    segments: Vec<String>,
}

impl ResolvedPath {
    /// The graph root, before any segment is consumed.
    #[must_use]
    pub fn root(graph: &Graph) -> Self {
        Self {
            node: graph.root_id(),
            parents: Vec::new(),
            id: String::new(),
            segments: Vec::new(),
        }
    }

    /// Target node.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The entity manifested one level up; `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<&AnyEntity> {
        self.parents.last()
    }

    /// Every entity manifested on the way, root first.
    #[must_use]
    pub fn parents(&self) -> &[AnyEntity] {
        &self.parents
    }

    /// Current id; empty when no collection was crossed.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Consumed path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Absolute path of the target, `/` for the root.
    #[must_use]
    pub fn path(&self) -> String {
        if self.segments.is_empty() {
            "/".to_owned()
        } else {
            join_path(&self.segments)
        }
    }
}

/// Resolves split paths against a [`Graph`], manifesting each ancestor on
/// the way down.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'g> {
    graph: &'g Graph,
}

impl<'g> PathResolver<'g> {
    /// Resolver over `graph`.
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Walk `segments` from the root.
    ///
    /// The target itself is not manifested; that is the dispatcher's job.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] naming the segment when no child matches it
    /// - [`ApiError::NotFound`] naming the ancestor's path when an ancestor
    ///   manifests to nothing
    /// - [`ApiError::Capability`] when an ancestor's Manifest fails
    pub fn resolve(&self, segments: &[&str]) -> ApiResult<ResolvedPath> {
        let mut resolved = ResolvedPath::root(self.graph);

        for segment in segments {
            let node = self.graph.node(resolved.node);
            let child = node
                .select(segment)
                .ok_or_else(|| ApiError::NotFound((*segment).to_owned()))?;

            let entity = node
                .capabilities()
                .manifest(resolved.parent(), &resolved.id)?
                .ok_or_else(|| {
                    debug!(
                        resource = %node.type_name(),
                        id = %resolved.id,
                        "Ancestor manifested to nothing"
                    );
                    ApiError::NotFound(resolved.path())
                })?;

            resolved = Self::descend(&resolved, entity, child, segment);
        }

        trace!(path = %resolved.path(), id = %resolved.id, "Resolved path");
        Ok(resolved)
    }

    /// Step from `from` into `child`, with `entity` as the manifested
    /// entity of `from`'s node. A collection child takes `segment` as its
    /// id; a named child keeps the current one.
    #[must_use]
    pub fn descend(
        from: &ResolvedPath,
        entity: AnyEntity,
        child: &Child,
        segment: &str,
    ) -> ResolvedPath {
        let mut parents = from.parents.clone();
        parents.push(entity);
        let mut segments = from.segments.clone();
        segments.push(segment.to_owned());

        ResolvedPath {
            node: child.node(),
            parents,
            id: if child.is_collection() {
                segment.to_owned()
            } else {
                from.id.clone()
            },
            segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Catalog;
    use halyard_test::{App, Apps, RecordedCall, Root};
    use http::StatusCode;

    #[test]
    fn test_resolve_root() {
        let catalog = Catalog::new();
        let resolved = PathResolver::new(&catalog.graph).resolve(&[]).unwrap();

        assert_eq!(resolved.node(), catalog.graph.root_id());
        assert!(resolved.parent().is_none());
        assert_eq!(resolved.id(), "");
        assert_eq!(resolved.path(), "/");
        assert!(catalog.recorder.calls().is_empty());
    }

    #[test]
    fn test_resolve_collection_member() {
        let catalog = Catalog::with_test_app();
        let resolved = PathResolver::new(&catalog.graph)
            .resolve(&["apps", "test-app", "1.2.3"])
            .unwrap();

        assert_eq!(resolved.id(), "1.2.3");
        assert_eq!(resolved.path(), "/apps/test-app/1.2.3");
        assert_eq!(resolved.parents().len(), 3);
        assert!(resolved.parents()[0].is::<Root>());
        assert!(resolved.parents()[1].is::<Apps>());
        assert!(resolved.parent().unwrap().is::<App>());
        assert_eq!(catalog.graph.node(resolved.node()).type_name(), "AppVersion");
        // the target is left for the dispatcher
        assert_eq!(catalog.recorder.calls(), vec![
            RecordedCall::new("Root", None, ""),
            RecordedCall::new("Apps", Some("Root"), ""),
            RecordedCall::new("App", Some("Apps"), "test-app"),
        ]);
    }

    #[test]
    fn test_unknown_segment() {
        let catalog = Catalog::new();
        let err = PathResolver::new(&catalog.graph)
            .resolve(&["nothing"])
            .unwrap_err();
        assert_eq!(err.to_string(), "not found: nothing");
    }

    #[test]
    fn test_missing_ancestor_names_its_path() {
        let catalog = Catalog::with_test_app();
        let err = PathResolver::new(&catalog.graph)
            .resolve(&["apps", "ghost", "1.2.3"])
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref path) if path == "/apps/ghost"));
    }

    #[test]
    fn test_ancestor_failure_is_a_capability_error() {
        let catalog = Catalog::with_test_app();
        catalog.recorder.fail_on::<Apps>();

        let err = PathResolver::new(&catalog.graph)
            .resolve(&["apps", "test-app"])
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Apps.Manifest: injected failure for Apps");
    }

    #[test]
    fn test_descend_keeps_id_for_named_child() {
        let catalog = Catalog::new();
        let root = ResolvedPath::root(&catalog.graph);
        let child = catalog.graph.root().select("health").unwrap();
        let entity = AnyEntity::new(Root {
            welcome: String::new(),
            version: String::new(),
        });

        let next = PathResolver::descend(&root, entity, child, "health");
        assert_eq!(next.id(), "");
        assert_eq!(next.path(), "/health");
        assert!(next.parent().unwrap().is::<Root>());
        assert!(catalog.recorder.calls().is_empty());
    }
}
