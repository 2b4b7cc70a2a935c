//! The catalog model: a small app store used across the test suites.
//!
//! ```text
//! /                          Root
//! /health                    Health      embed(all) link(rel=health)
//! /health/database           Database    embed(href)
//! /build                     Build       embed(fields(commit))
//! /apps                      Apps        embed(href) link(rel=apps)
//! /apps/{app}                App         map, embed(all)
//! /apps/{app}/{appversion}   AppVersion  slice
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use halyard_capabilities::{FieldDecl, Id, Parent, Payload, Registry, ResourceSchema};
use halyard_core::TypeToken;
use serde::{Deserialize, Serialize};

use crate::mocks::CallRecorder;

/// Entry point of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Root {
    /// Greeting.
    pub welcome: String,
    /// Catalog version.
    pub version: String,
}

/// Liveness information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Always `"world"`.
    pub hello: String,
}

/// Backing store status, below [`Health`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    /// Whether the store is reachable.
    pub connected: bool,
}

/// Build information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    /// Commit hash.
    pub commit: String,
    /// Build date.
    pub date: String,
}

/// The app collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apps {
    /// How many apps the store holds.
    pub number_of_apps: usize,
}

/// One app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    /// Name; must equal the id it is stored under.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// One released version of an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppVersion {
    /// Version id, e.g. `1.2.3`.
    pub id: String,
    /// App name.
    pub name: String,
    /// Human-readable version.
    pub version: String,
}

impl App {
    /// App with an empty description.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            description: String::new(),
        }
    }
}

impl AppVersion {
    /// Version `id` of app `name`.
    #[must_use]
    pub fn new(name: &str, id: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            version: format!("v{id}"),
        }
    }
}

#[derive(Debug, Clone)]
struct AppRecord {
    app: App,
    versions: BTreeMap<String, AppVersion>,
}

/// In-memory store behind the catalog capabilities.
///
/// Cheap to clone; clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    apps: Arc<RwLock<BTreeMap<String, AppRecord>>>,
}

impl CatalogStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an app.
    pub fn insert_app(&self, id: &str, app: App) {
        let mut apps = self.apps.write().unwrap_or_else(PoisonError::into_inner);
        match apps.get_mut(id) {
            Some(record) => record.app = app,
            None => {
                apps.insert(id.to_owned(), AppRecord {
                    app,
                    versions: BTreeMap::new(),
                });
            },
        }
    }

    /// Add or replace a version. Returns `false` if the app is unknown.
    pub fn insert_version(&self, app: &str, version: AppVersion) -> bool {
        let mut apps = self.apps.write().unwrap_or_else(PoisonError::into_inner);
        let Some(record) = apps.get_mut(app) else {
            return false;
        };
        record.versions.insert(version.id.clone(), version);
        true
    }

    /// Builder form of [`insert_app`](Self::insert_app) and
    /// [`insert_version`](Self::insert_version).
    #[must_use]
    pub fn with_app(self, name: &str, versions: &[&str]) -> Self {
        self.insert_app(name, App::new(name));
        for id in versions {
            self.insert_version(name, AppVersion::new(name, id));
        }
        self
    }

    /// An app by id.
    #[must_use]
    pub fn app(&self, id: &str) -> Option<App> {
        let apps = self.apps.read().unwrap_or_else(PoisonError::into_inner);
        apps.get(id).map(|r| r.app.clone())
    }

    /// A version by app and version id.
    #[must_use]
    pub fn version(&self, app: &str, id: &str) -> Option<AppVersion> {
        let apps = self.apps.read().unwrap_or_else(PoisonError::into_inner);
        apps.get(app).and_then(|r| r.versions.get(id).cloned())
    }

    /// Remove an app and its versions.
    pub fn remove_app(&self, id: &str) -> bool {
        let mut apps = self.apps.write().unwrap_or_else(PoisonError::into_inner);
        apps.remove(id).is_some()
    }

    /// Remove a version.
    pub fn remove_version(&self, app: &str, id: &str) -> bool {
        let mut apps = self.apps.write().unwrap_or_else(PoisonError::into_inner);
        apps.get_mut(app)
            .is_some_and(|r| r.versions.remove(id).is_some())
    }

    /// Number of apps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.apps.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the store holds no apps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type Found<T> = Result<Option<T>, String>;

fn parent_of<P: 'static>() -> Option<TypeToken> {
    Some(TypeToken::of::<P>())
}

/// Declarations for the whole catalog, backed by `store` and recording
/// every Manifest call in `recorder`.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn catalog_registry(store: &CatalogStore, recorder: &CallRecorder) -> Registry {
    let rec = recorder.clone();
    let root = ResourceSchema::<Root>::new()
        .manifest(move || -> Found<Root> {
            rec.record::<Root>(None, "")?;
            Ok(Some(Root {
                welcome: "Welcome to the app catalog".to_owned(),
                version: "1.0".to_owned(),
            }))
        })
        .field(FieldDecl::scalar::<Health>("Health").tag("embed(all) link(rel=health)"))
        .field(FieldDecl::scalar::<Build>("Build").tag("embed(fields(commit))"))
        .field(FieldDecl::scalar::<Apps>("Apps").tag("embed(href) link(rel=apps)"))
        .field(FieldDecl::scalar::<String>("Welcome"));

    let rec = recorder.clone();
    let health = ResourceSchema::<Health>::new()
        .manifest(move |Parent(_): Parent<Root>| -> Found<Health> {
            rec.record::<Health>(parent_of::<Root>(), "")?;
            Ok(Some(Health {
                hello: "world".to_owned(),
            }))
        })
        .field(FieldDecl::scalar::<Database>("Database").tag("embed(href)"));

    let rec = recorder.clone();
    let database = ResourceSchema::<Database>::new().manifest(
        move |Parent(_): Parent<Health>| -> Found<Database> {
            rec.record::<Database>(parent_of::<Health>(), "")?;
            Ok(Some(Database { connected: true }))
        },
    );

    let rec = recorder.clone();
    let build = ResourceSchema::<Build>::new().manifest(
        move |Parent(_): Parent<Root>| -> Found<Build> {
            rec.record::<Build>(parent_of::<Root>(), "")?;
            Ok(Some(Build {
                commit: "4f2a9c1".to_owned(),
                date: "2026-10-01".to_owned(),
            }))
        },
    );

    let (rec, st) = (recorder.clone(), store.clone());
    let apps = ResourceSchema::<Apps>::new()
        .manifest(move |Parent(_): Parent<Root>| -> Found<Apps> {
            rec.record::<Apps>(parent_of::<Root>(), "")?;
            Ok(Some(Apps {
                number_of_apps: st.len(),
            }))
        })
        .field(FieldDecl::map::<App>("Apps").tag("embed(all)"));

    let (rec, st) = (recorder.clone(), store.clone());
    let (write_store, delete_store) = (store.clone(), store.clone());
    let app = ResourceSchema::<App>::new()
        .manifest(move |Parent(_): Parent<Apps>, Id(id): Id| -> Found<App> {
            rec.record::<App>(parent_of::<Apps>(), &id)?;
            Ok(st.app(&id))
        })
        .validate(|Id(id): Id, Payload(app): Payload<App>| -> Result<(), String> {
            if app.name != id {
                return Err(format!("name '{}' does not match id '{id}'", app.name));
            }
            Ok(())
        })
        .write(
            move |Parent(_): Parent<Apps>, Id(id): Id, Payload(app): Payload<App>| -> Result<(), String> {
                write_store.insert_app(&id, app);
                Ok(())
            },
        )
        .delete(move |Id(id): Id| -> Result<(), String> {
            delete_store.remove_app(&id);
            Ok(())
        })
        .field(FieldDecl::slice::<AppVersion>("Versions"));

    let (rec, st) = (recorder.clone(), store.clone());
    let (write_store, delete_store) = (store.clone(), store.clone());
    let exists_store = store.clone();
    let version = ResourceSchema::<AppVersion>::new()
        .manifest(
            move |Parent(app): Parent<App>, Id(id): Id| -> Found<AppVersion> {
                rec.record::<AppVersion>(parent_of::<App>(), &id)?;
                Ok(st.version(&app.name, &id))
            },
        )
        .exists(move |Parent(app): Parent<App>, Id(id): Id| -> Result<bool, String> {
            Ok(exists_store.version(&app.name, &id).is_some())
        })
        .write(
            move |Parent(app): Parent<App>,
                  Id(id): Id,
                  Payload(mut version): Payload<AppVersion>|
                  -> Result<(), String> {
                version.id = id;
                if write_store.insert_version(&app.name, version) {
                    Ok(())
                } else {
                    Err(format!("app '{}' vanished", app.name))
                }
            },
        )
        .delete(move |Parent(app): Parent<App>, Id(id): Id| -> Result<(), String> {
            delete_store.remove_version(&app.name, &id);
            Ok(())
        });

    Registry::new()
        .with(root)
        .with(health)
        .with(database)
        .with(build)
        .with(apps)
        .with(app)
        .with(version)
}
