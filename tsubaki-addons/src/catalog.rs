//! Discovery providers
//!
//! The registry consumes an ordered list of (factory, metadata) pairs and
//! does not care where they come from. Concrete sources:
//! - `StaticCatalog`: explicit registration list
//! - `InventoryCatalog`: addons submitted with `register_addon!` in any linked crate
//! - `ManifestCatalog`: JSON manifests in an addons directory
//! - `AggregateCatalog`: several of the above, concatenated

use crate::{AddonContract, AddonFactory, HostConfig, InventoryCatalog, ManifestCatalog};
use std::fmt;
use std::sync::Arc;
use tsubaki_core::AddonMetadata;

/// A deferred addon together with its declared metadata
#[derive(Clone)]
pub struct DiscoveredAddon {
    pub factory: AddonFactory,
    pub metadata: AddonMetadata,
}

impl DiscoveredAddon {
    pub fn new<F>(metadata: AddonMetadata, factory: F) -> Self
    where
        F: Fn() -> Box<dyn AddonContract> + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
            metadata,
        }
    }
}

impl fmt::Debug for DiscoveredAddon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveredAddon")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Source of addons, called once when a registry is built
pub trait Discover {
    fn discover(&self) -> Vec<DiscoveredAddon>;
}

impl<F> Discover for F
where
    F: Fn() -> Vec<DiscoveredAddon>,
{
    fn discover(&self) -> Vec<DiscoveredAddon> {
        self()
    }
}

/// Explicit, ordered list of addons
#[derive(Clone, Default)]
pub struct StaticCatalog {
    addons: Vec<DiscoveredAddon>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self { addons: Vec::new() }
    }

    pub fn with_addon<F>(mut self, metadata: AddonMetadata, factory: F) -> Self
    where
        F: Fn() -> Box<dyn AddonContract> + Send + Sync + 'static,
    {
        self.addons.push(DiscoveredAddon::new(metadata, factory));
        self
    }

    pub fn with_default<A>(self, metadata: AddonMetadata) -> Self
    where
        A: AddonContract + Default + 'static,
    {
        self.with_addon(metadata, || Box::new(A::default()))
    }

    pub fn len(&self) -> usize {
        self.addons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addons.is_empty()
    }
}

impl Discover for StaticCatalog {
    fn discover(&self) -> Vec<DiscoveredAddon> {
        self.addons.clone()
    }
}

/// Concatenation of several catalogs, in insertion order
#[derive(Default)]
pub struct AggregateCatalog {
    catalogs: Vec<Box<dyn Discover>>,
}

impl AggregateCatalog {
    pub fn new() -> Self {
        Self { catalogs: Vec::new() }
    }

    pub fn with_catalog<D: Discover + 'static>(mut self, catalog: D) -> Self {
        self.catalogs.push(Box::new(catalog));
        self
    }
}

impl Discover for AggregateCatalog {
    fn discover(&self) -> Vec<DiscoveredAddon> {
        self.catalogs.iter().flat_map(|c| c.discover()).collect()
    }
}

/// Addons linked into the binary, followed by manifests in the addons directory
pub fn default_catalog(config: &HostConfig) -> AggregateCatalog {
    AggregateCatalog::new()
        .with_catalog(InventoryCatalog)
        .with_catalog(ManifestCatalog::new(&config.addons_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsubaki_core::AddonOutput;

    struct Nop;

    impl AddonContract for Nop {
        fn execute(&self, _args: &[String]) -> AddonOutput {
            AddonOutput::handled()
        }
    }

    #[test]
    fn test_static_catalog_preserves_order() {
        let catalog = StaticCatalog::new()
            .with_addon(AddonMetadata::new("a", ["x"]), || Box::new(Nop))
            .with_addon(AddonMetadata::new("b", ["x"]), || Box::new(Nop))
            .with_addon(AddonMetadata::unnamed(["x"]), || Box::new(Nop));
        let names: Vec<_> = catalog.discover().into_iter().map(|d| d.metadata.name).collect();
        assert_eq!(names, vec![Some("a".to_string()), Some("b".to_string()), None]);
    }

    #[test]
    fn test_factories_are_deferred() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static BUILT: AtomicUsize = AtomicUsize::new(0);

        let catalog = StaticCatalog::new().with_addon(AddonMetadata::new("a", ["x"]), || {
            BUILT.fetch_add(1, Ordering::SeqCst);
            Box::new(Nop)
        });
        let discovered = catalog.discover();
        assert_eq!(BUILT.load(Ordering::SeqCst), 0);
        let _ = (discovered[0].factory)();
        assert_eq!(BUILT.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_aggregate_concatenates() {
        let first = StaticCatalog::new().with_addon(AddonMetadata::new("a", ["x"]), || Box::new(Nop));
        let second = StaticCatalog::new()
            .with_addon(AddonMetadata::new("b", ["x"]), || Box::new(Nop))
            .with_addon(AddonMetadata::new("c", ["x"]), || Box::new(Nop));
        let aggregate = AggregateCatalog::new().with_catalog(first).with_catalog(second);
        let names: Vec<_> = aggregate
            .discover()
            .into_iter()
            .filter_map(|d| d.metadata.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_closure_catalog() {
        let catalog = || vec![DiscoveredAddon::new(AddonMetadata::new("a", ["x"]), || Box::new(Nop))];
        assert_eq!(catalog.discover().len(), 1);
    }
}
