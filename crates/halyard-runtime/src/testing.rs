//! The shared catalog, built into a graph for the unit tests.

use halyard_graph::Graph;
use halyard_test::{CallRecorder, CatalogStore, Root, catalog_registry};

use crate::Api;

pub(crate) struct Catalog {
    pub(crate) graph: Graph,
    pub(crate) store: CatalogStore,
    pub(crate) recorder: CallRecorder,
}

impl Catalog {
    pub(crate) fn new() -> Self {
        Self::with_store(CatalogStore::new())
    }

    /// `test-app`, released as `1.2.3`.
    pub(crate) fn with_test_app() -> Self {
        Self::with_store(CatalogStore::new().with_app("test-app", &["1.2.3"]))
    }

    pub(crate) fn with_store(store: CatalogStore) -> Self {
        let recorder = CallRecorder::new();
        let graph = Graph::build::<Root>(&catalog_registry(&store, &recorder)).unwrap();
        Self {
            graph,
            store,
            recorder,
        }
    }

    pub(crate) fn api(&self) -> Api {
        Api::from_graph(self.graph.clone())
    }
}
