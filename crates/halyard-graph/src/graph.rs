//! The built resource graph.

use halyard_capabilities::Registry;
use halyard_core::{GraphBuildResult, Resource};

use crate::{GraphBuilder, Node, NodeId};

/// An immutable tree of resource nodes, stored as an arena.
///
/// Built once at startup; safe to share between threads and read without
/// synchronization.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
}

impl Graph {
    /// Build the graph rooted at `T`.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphBuildError`](halyard_core::GraphBuildError)
    /// found in any reachable declaration.
    pub fn build<T: Resource>(registry: &Registry) -> GraphBuildResult<Self> {
        GraphBuilder::new(registry).build::<T>()
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        self.node(self.root)
    }

    /// Id of the root node.
    #[must_use]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// A node by id. Ids are only handed out by the graph that owns them.
    ///
    /// # Panics
    ///
    /// Panics if `id` was handed out by a different, larger graph. Use
    /// [`get`](Self::get) when the origin of `id` is not known.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// A node by id, or `None` if this graph has no such node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes. Never true for a built graph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every routable path, depth-first, with collection segments shown as
    /// `{type}` placeholders.
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        let mut routes = Vec::with_capacity(self.nodes.len());
        self.collect_routes(self.root, "", &mut routes);
        routes
    }

    fn collect_routes(&self, id: NodeId, prefix: &str, out: &mut Vec<String>) {
        out.push(if prefix.is_empty() {
            "/".to_owned()
        } else {
            prefix.to_owned()
        });

        for child in self.node(id).children().iter() {
            let segment = if child.is_collection() {
                format!(
                    "{{{}}}",
                    self.node(child.node()).type_name().to_lowercase()
                )
            } else {
                child.name().to_owned()
            };
            self.collect_routes(child.node(), &format!("{prefix}/{segment}"), out);
        }
    }
}
