//! Tsubaki Addon Hosting
//!
//! Discovers independently built addons and routes requests to them:
//! - Addons implement `AddonContract` and declare a name plus domains
//! - Discovery sources implement `Discover` (static list, `register_addon!`,
//!   manifest directory, or any combination)
//! - `AddonProvider` scores every addon's domains against a request with a
//!   `DomainMatcher` and runs the single best match
//!
//! ```rust,ignore
//! let provider = AddonProvider::addons();
//! let exec = provider.execute(&["math", "sum"], &["1".into(), "2".into()]);
//! match exec.result {
//!     ExecutedResult::Success => { /* ... */ }
//!     ExecutedResult::NoMatched | ExecutedResult::NoAddon => { /* nobody handles it */ }
//!     _ => {}
//! }
//! ```

mod traits;
mod entry;
mod matcher;
mod catalog;
mod registration;
mod manifest;
mod config;
mod registry;

pub use traits::{AddonContract, AddonFactory, short_type_name};
pub use entry::AddonEntry;
pub use matcher::{DomainMatcher, OverlapMatcher, JaccardMatcher};
pub use catalog::{Discover, DiscoveredAddon, StaticCatalog, AggregateCatalog, default_catalog};
pub use registration::{AddonRegistration, InventoryCatalog, registration, registrations};
pub use manifest::{AddonManifest, ManifestCatalog};
pub use config::{HostConfig, MatcherKind, ADDONS_PATH_VAR, MATCHER_VAR, DEFAULT_ADDONS_PATH};
pub use registry::{AddonProvider, Lookup, ProviderCell};

#[doc(hidden)]
pub use inventory;

/// Re-export core types for addon authors
pub mod prelude {
    pub use crate::{
        AddonContract, AddonProvider, AddonRegistration, Discover, DiscoveredAddon, DomainMatcher,
        Lookup, StaticCatalog,
    };
    pub use crate::register_addon;
    pub use tsubaki_core::prelude::*;
}
