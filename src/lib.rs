//! Fixture generator for functional testing of Ansible Galaxy tooling.
//!
//! Builds real collection archives from a small catalog of template
//! collections so tests can upload, import and inspect them:
//!
//! - **Templates** - named collection skeletons shipped in `collections/`
//! - **Content injection** - placeholder roles, plugins and docs copied in
//!   before the build
//! - **Metadata patching** - namespace, name, version and other `galaxy.yml`
//!   overrides
//! - **Packaging** - runs `ansible-galaxy collection build` and finds the
//!   archive it produced
//!
//! # Architecture
//!
//! ```text
//! build_collection(BuildRequest)
//!     │
//!     ├── Checkout::materialize   template -> <tmp>/orion-utils-*/collections/<base>
//!     ├── PreBuild hook           e.g. CollectionSetup (roles, plugins, docs)
//!     ├── GalaxyMetadata          merge CollectionConfig, validate, rewrite
//!     ├── extra files             YAML documents at arbitrary paths
//!     └── packaging command       output scraped for *.tar.gz
//!             │
//!             └── CollectionArtifact
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use orion_utils::{build_collection, BuildRequest, CollectionConfig};
//!
//! let artifact = build_collection(
//!     BuildRequest::new("skeleton")
//!         .config(CollectionConfig::new().namespace("foo").version("5.5.5"))
//!         .key("foobar"),
//! )?;
//! assert!(artifact.name.ends_with("_foobar"));
//! assert!(artifact.contains("MANIFEST.json")?);
//! artifact.cleanup()?;
//! ```
//!
//! Checkouts are never removed automatically; call
//! [`CollectionArtifact::cleanup`] once a test is done with one.

pub mod artifact;
pub mod build;
pub mod error;
pub mod filesystem;
pub mod fixtures;
pub mod ident;
pub mod metadata;
pub mod preflight;
pub mod process;
pub mod settings;
pub mod setup;
pub mod template;
pub mod version;

pub use artifact::CollectionArtifact;
pub use build::{build_collection, BuildRequest, Builder, PreBuild};
pub use error::BuildError;
pub use fixtures::{ContentCard, UpdateScenario};
pub use ident::random_key;
pub use metadata::CollectionConfig;
pub use settings::Settings;
pub use setup::{CollectionSetup, ContentIndex, SetupReport};
pub use version::increment_version;
