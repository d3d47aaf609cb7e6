//! Lazily instantiated registry entry

use crate::catalog::DiscoveredAddon;
use crate::{AddonContract, AddonFactory};
use std::sync::OnceLock;
use tracing::debug;
use tsubaki_core::AddonMetadata;

/// One discovered addon: its metadata plus a deferred, cached instance
pub struct AddonEntry {
    metadata: AddonMetadata,
    factory: AddonFactory,
    instance: OnceLock<Box<dyn AddonContract>>,
}

impl AddonEntry {
    pub(crate) fn new(discovered: DiscoveredAddon) -> Self {
        Self {
            metadata: discovered.metadata,
            factory: discovered.factory,
            instance: OnceLock::new(),
        }
    }

    pub fn metadata(&self) -> &AddonMetadata {
        &self.metadata
    }

    /// Declared name, verbatim
    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    pub fn is_instantiated(&self) -> bool {
        self.instance.get().is_some()
    }

    /// The addon instance, constructed on first access.
    ///
    /// Concurrent first callers block until the single construction
    /// finishes, so the factory runs at most once per entry.
    pub fn value(&self) -> &(dyn AddonContract + 'static) {
        self.instance
            .get_or_init(|| {
                debug!(addon = self.metadata.display_name(), "Instantiating addon");
                (self.factory)()
            })
            .as_ref()
    }
}
