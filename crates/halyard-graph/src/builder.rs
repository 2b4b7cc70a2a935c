//! Depth-first graph construction.

use std::collections::BTreeMap;

use halyard_capabilities::{CapabilityCompiler, Declaration, FieldDecl, Registry};
use halyard_core::{
    Directive, FieldShape, GraphBuildError, GraphBuildResult, Resource, TypeToken,
};
use tracing::{debug, info};

use crate::{Child, Children, Graph, Node, NodeId, TypeDescriptor};

/// Builds a [`Graph`] from the declarations in a [`Registry`].
///
/// Children are pushed into the arena before their parent, so the root
/// ends up last. Every reachable type is compiled with the type that
/// encloses it as its expected parent.
#[derive(Debug)]
pub struct GraphBuilder<'r> {
    registry: &'r Registry,
    nodes: Vec<Node>,
    ancestry: Vec<TypeToken>,
}

impl<'r> GraphBuilder<'r> {
    /// Builder over `registry`.
    #[must_use]
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            nodes: Vec::new(),
            ancestry: Vec::new(),
        }
    }

    /// Build the graph rooted at `T`.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphBuildError`] found.
    pub fn build<T: Resource>(self) -> GraphBuildResult<Graph> {
        self.build_from(TypeToken::of::<T>())
    }

    /// Build the graph rooted at the type identified by `root`.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphBuildError`] found.
    pub fn build_from(mut self, root: TypeToken) -> GraphBuildResult<Graph> {
        let root_id = self.build_node(root, None, FieldShape::Scalar)?;
        let graph = Graph {
            nodes: self.nodes,
            root: root_id,
        };
        info!(root = %root, nodes = graph.len(), "Built resource graph");
        Ok(graph)
    }

    fn build_node(
        &mut self,
        token: TypeToken,
        parent: Option<TypeToken>,
        shape: FieldShape,
    ) -> GraphBuildResult<NodeId> {
        let registry = self.registry;
        let declaration = registry
            .get(token)
            .ok_or_else(|| GraphBuildError::MissingManifest { ty: token.name() })?;
        let capabilities = CapabilityCompiler::new(declaration, parent).compile()?;

        self.ancestry.push(token);
        let children = self.build_children(declaration);
        self.ancestry.pop();
        let children = children?;

        debug!(
            resource = %token,
            identity = capabilities.is_identity(),
            children = children.len(),
            "Built node"
        );

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            descriptor: TypeDescriptor {
                token,
                shape,
                parent,
            },
            capabilities,
            children,
        });
        Ok(id)
    }

    fn build_children(&mut self, declaration: &Declaration) -> GraphBuildResult<Children> {
        let owner = declaration.token();
        let mut named: BTreeMap<String, Child> = BTreeMap::new();
        let mut collection: Option<Child> = None;

        for field in declaration.fields() {
            let Some(child) = self.build_child(owner, field)? else {
                continue;
            };
            let identity = self.nodes[child.node.0].is_identity();

            if child.is_collection() {
                if !identity {
                    return Err(GraphBuildError::CollectionNotIdentity {
                        ty: owner.name(),
                        field: child.field,
                        child: field.target().name(),
                    });
                }
                if let Some(first) = &collection {
                    return Err(GraphBuildError::MultipleCollections {
                        ty: owner.name(),
                        first: first.field.clone(),
                        second: child.field,
                    });
                }
                collection = Some(child);
            } else {
                if identity {
                    return Err(GraphBuildError::ScalarIsIdentity {
                        ty: owner.name(),
                        field: child.field,
                        child: field.target().name(),
                    });
                }
                if named.contains_key(&child.name) {
                    return Err(GraphBuildError::DuplicateChild {
                        ty: owner.name(),
                        name: child.name,
                    });
                }
                named.insert(child.name.clone(), child);
            }
        }

        match collection {
            None => Ok(Children::Named(named)),
            Some(child) if named.is_empty() => Ok(Children::Collection(child)),
            Some(child) => Err(GraphBuildError::ConflictingChildren {
                ty: owner.name(),
                named: named
                    .values()
                    .map(|c| c.field.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                collection: child.field,
            }),
        }
    }

    /// `None` for fields that are not resources.
    fn build_child(&mut self, owner: TypeToken, field: &FieldDecl) -> GraphBuildResult<Option<Child>> {
        let target = field.target();

        if !self.registry.declares_manifest(target) {
            if field.directive_tag().is_some() {
                return Err(GraphBuildError::TaggedNonResource {
                    ty: owner.name(),
                    field: field.name().to_owned(),
                    child: target.name(),
                });
            }
            return Ok(None);
        }

        let directive = field
            .directive_tag()
            .map(Directive::parse)
            .transpose()
            .map_err(|source| GraphBuildError::Directive {
                ty: owner.name(),
                field: field.name().to_owned(),
                source,
            })?
            .unwrap_or_default();

        if let Some(start) = self.ancestry.iter().position(|t| *t == target) {
            let path = self.ancestry[start..]
                .iter()
                .chain(std::iter::once(&target))
                .map(TypeToken::name)
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(GraphBuildError::RecursiveResource {
                ty: target.name(),
                path,
            });
        }

        let node = self.build_node(target, Some(owner), field.shape())?;
        Ok(Some(Child {
            node,
            name: field.name().to_lowercase(),
            field: field.name().to_owned(),
            directive,
            shape: field.shape(),
        }))
    }
}
