//! Hypermedia expansion: merging child links and embedded children into a
//! rendered entity.

use halyard_core::path::join_path;
use halyard_core::{AnyEntity, Expansion};
use halyard_graph::{Child, Graph};
use serde_json::{Map, Value, json};
use tracing::trace;

use crate::dispatcher::Dispatcher;
use crate::error::{ApiError, ApiResult};
use crate::resolver::{PathResolver, ResolvedPath};

/// Key under which link relations are collected.
pub const LINKS_KEY: &str = "_links";

/// Renders entities with their declared children linked or embedded.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionEngine<'g> {
    graph: &'g Graph,
    base_path: &'g str,
    max_depth: usize,
}

impl<'g> ExpansionEngine<'g> {
    /// Engine over `graph`, building links under `base_path` and embedding
    /// at most `max_depth` levels deep.
    #[must_use]
    pub fn new(graph: &'g Graph, base_path: &'g str, max_depth: usize) -> Self {
        Self {
            graph,
            base_path,
            max_depth,
        }
    }

    /// Render `entity`, the manifested target of `resolved`.
    ///
    /// Children that fail to load are embedded as `{ "message": ... }`
    /// objects rather than failing the whole response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Internal`] if the entity cannot be serialized.
    ///
    /// # Panics
    ///
    /// Panics if `resolved` was produced over a different graph.
    pub fn expand(&self, resolved: &ResolvedPath, entity: &AnyEntity) -> ApiResult<Value> {
        self.expand_at(resolved, entity, 0)
    }

    fn expand_at(
        &self,
        resolved: &ResolvedPath,
        entity: &AnyEntity,
        depth: usize,
    ) -> ApiResult<Value> {
        let mut body = serialize(entity)?;

        // Only objects have room for children.
        if let Value::Object(object) = &mut body {
            self.merge_children(object, resolved, entity, depth);
        }
        Ok(body)
    }

    fn merge_children(
        &self,
        object: &mut Map<String, Value>,
        resolved: &ResolvedPath,
        entity: &AnyEntity,
        depth: usize,
    ) {
        let node = self.graph.node(resolved.node());
        let location = format!("{}{}", self.base_path, join_path(resolved.segments()));
        let mut links = Map::new();

        for child in node.children().iter() {
            if let Some(rel) = &child.directive().link {
                links.insert(rel.clone(), self.link(&location, child));
            }

            let expansion = &child.directive().expansion;
            if !expansion.embeds() {
                continue;
            }

            let value = if child.is_collection() {
                message(format!(
                    "embedding {} children is not yet supported",
                    child.shape()
                ))
            } else if *expansion == Expansion::Href {
                json!({ "_self": format!("{location}/{}", child.name()) })
            } else {
                self.embed(resolved, entity, child, depth)
            };
            object.insert(child.name().to_owned(), value);
        }

        if !links.is_empty() {
            let self_href = if location.is_empty() {
                "/".to_owned()
            } else {
                location
            };
            links.insert("self".to_owned(), json!({ "href": self_href }));
            object.insert(LINKS_KEY.to_owned(), Value::Object(links));
        }
    }

    fn link(&self, location: &str, child: &Child) -> Value {
        if child.is_collection() {
            let placeholder = self.graph.node(child.node()).type_name().to_lowercase();
            json!({ "href": format!("{location}/{{{placeholder}}}"), "templated": true })
        } else {
            json!({ "href": format!("{location}/{}", child.name()) })
        }
    }

    /// Synthetic GET on a named child, expanded in turn.
    fn embed(
        &self,
        resolved: &ResolvedPath,
        entity: &AnyEntity,
        child: &Child,
        depth: usize,
    ) -> Value {
        if depth >= self.max_depth {
            return message(format!(
                "embedding depth limit of {} reached",
                self.max_depth
            ));
        }

        let target = PathResolver::descend(resolved, entity.clone(), child, child.name());
        trace!(path = %target.path(), depth, "Embedding child");

        let dispatch = match Dispatcher::new(self.graph).get(&target) {
            Ok(dispatch) => dispatch,
            Err(e) => return message(e.to_string()),
        };
        let Some(child_entity) = dispatch.entity else {
            return Value::Null;
        };

        // fields() selects from the entity itself; only a full embed recurses.
        let rendered = match &child.directive().expansion {
            Expansion::Fields(fields) => {
                serialize(&child_entity).map(|value| select_fields(value, fields))
            },
            _ => self.expand_at(&target, &child_entity, depth.saturating_add(1)),
        };

        rendered.unwrap_or_else(|e| message(e.to_string()))
    }
}

fn serialize(entity: &AnyEntity) -> ApiResult<Value> {
    entity.to_json().map_err(|e| {
        ApiError::Internal(format!("cannot serialize {}: {e}", entity.type_token()))
    })
}

fn select_fields(mut value: Value, fields: &[String]) -> Value {
    if let Value::Object(object) = &mut value {
        object.retain(|key, _| fields.iter().any(|f| f == key));
    }
    value
}

fn message(text: String) -> Value {
    json!({ "message": text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Catalog;
    use halyard_capabilities::{FieldDecl, Id, Parent, Registry, ResourceSchema};
    use serde::{Deserialize, Serialize};

    fn expand_at_path(
        graph: &Graph,
        segments: &[&str],
        base_path: &str,
        max_depth: usize,
    ) -> Value {
        let resolved = PathResolver::new(graph).resolve(segments).unwrap();
        let entity = Dispatcher::new(graph).get(&resolved).unwrap().entity.unwrap();
        ExpansionEngine::new(graph, base_path, max_depth)
            .expand(&resolved, &entity)
            .unwrap()
    }

    #[test]
    fn test_root_expansion() {
        let catalog = Catalog::with_test_app();
        let body = expand_at_path(&catalog.graph, &[], "", 16);

        assert_eq!(
            body,
            json!({
                "welcome": "Welcome to the app catalog",
                "version": "1.0",
                "apps": { "_self": "/apps" },
                "build": { "commit": "4f2a9c1" },
                "health": {
                    "hello": "world",
                    "database": { "_self": "/health/database" }
                },
                "_links": {
                    "apps": { "href": "/apps" },
                    "health": { "href": "/health" },
                    "self": { "href": "/" }
                }
            })
        );
        // href embedding does not manifest the child
        assert_eq!(catalog.recorder.resources(), vec!["Root", "Build", "Health"]);
    }

    #[test]
    fn test_base_path_prefixes_links() {
        let catalog = Catalog::new();
        let body = expand_at_path(&catalog.graph, &[], "/api", 16);
        assert_eq!(body["apps"]["_self"], "/api/apps");
        assert_eq!(body["health"]["database"]["_self"], "/api/health/database");
        assert_eq!(body["_links"]["self"]["href"], "/api");
    }

    #[test]
    fn test_depth_limit() {
        let catalog = Catalog::new();
        let body = expand_at_path(&catalog.graph, &[], "", 0);
        assert_eq!(
            body["health"]["message"],
            "embedding depth limit of 0 reached"
        );
        assert_eq!(
            body["build"]["message"],
            "embedding depth limit of 0 reached"
        );
        assert_eq!(catalog.recorder.resources(), vec!["Root"]);
    }

    #[test]
    fn test_collection_embed_is_a_placeholder() {
        let catalog = Catalog::with_test_app();
        let body = expand_at_path(&catalog.graph, &["apps"], "", 16);

        assert_eq!(
            body,
            json!({
                "number_of_apps": 1,
                "apps": { "message": "embedding map children is not yet supported" }
            })
        );
        assert!(!catalog.recorder.was_called::<halyard_test::App>());
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Shelf {
        label: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Book {
        title: String,
    }

    #[test]
    fn test_collection_link_is_templated() {
        let registry = Registry::new()
            .with(
                ResourceSchema::<Shelf>::new()
                    .manifest(|| -> Result<Option<Shelf>, String> {
                        Ok(Some(Shelf {
                            label: "fiction".to_owned(),
                        }))
                    })
                    .field(FieldDecl::map::<Book>("books").tag("link(rel=book)")),
            )
            .with(ResourceSchema::<Book>::new().manifest(
                |Parent(_): Parent<Shelf>, Id(title): Id| -> Result<Option<Book>, String> {
                    Ok(Some(Book { title }))
                },
            ));
        let graph = Graph::build::<Shelf>(&registry).unwrap();

        assert_eq!(
            expand_at_path(&graph, &[], "", 16),
            json!({
                "label": "fiction",
                "_links": {
                    "book": { "href": "/{book}", "templated": true },
                    "self": { "href": "/" }
                }
            })
        );
    }
}
