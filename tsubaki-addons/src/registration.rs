//! Static addon registration via `inventory`.
//!
//! Each `register_addon!` invocation submits an `AddonRegistration`. At
//! startup every registration linked into the binary is collected, so
//! addon crates are picked up without any wiring in the host.

use crate::catalog::{Discover, DiscoveredAddon};
use crate::AddonContract;
use std::sync::Arc;
use tsubaki_core::AddonMetadata;

/// Compile-time description of an addon
pub struct AddonRegistration {
    /// Stable identifier, referenced by manifests
    pub kind: &'static str,
    pub name: Option<&'static str>,
    pub domains: &'static [&'static str],
    /// Sort priority (higher = registered first)
    pub priority: i16,
    pub factory: fn() -> Box<dyn AddonContract>,
}

inventory::collect!(AddonRegistration);

fn instantiate<A: AddonContract + Default + 'static>() -> Box<dyn AddonContract> {
    Box::new(A::default())
}

impl AddonRegistration {
    pub const fn new<A: AddonContract + Default + 'static>(
        kind: &'static str,
        name: Option<&'static str>,
        domains: &'static [&'static str],
    ) -> Self {
        Self {
            kind,
            name,
            domains,
            priority: 0,
            factory: instantiate::<A>,
        }
    }

    pub const fn with_priority(mut self, priority: i16) -> Self {
        self.priority = priority;
        self
    }

    pub fn metadata(&self) -> AddonMetadata {
        AddonMetadata {
            name: self.name.map(str::to_string),
            domains: self.domains.iter().collect(),
        }
    }

    pub fn discovered(&self) -> DiscoveredAddon {
        DiscoveredAddon {
            factory: Arc::new(self.factory),
            metadata: self.metadata(),
        }
    }
}

/// All registrations, priority descending then kind ascending
pub fn registrations() -> Vec<&'static AddonRegistration> {
    let mut regs: Vec<_> = inventory::iter::<AddonRegistration>.into_iter().collect();
    regs.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.kind.cmp(b.kind)));
    regs
}

/// Find a registration by kind (case-insensitive)
pub fn registration(kind: &str) -> Option<&'static AddonRegistration> {
    let kind = kind.trim().to_lowercase();
    inventory::iter::<AddonRegistration>
        .into_iter()
        .find(|r| r.kind.to_lowercase() == kind)
}

/// Every addon submitted with `register_addon!`
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryCatalog;

impl Discover for InventoryCatalog {
    fn discover(&self) -> Vec<DiscoveredAddon> {
        registrations().into_iter().map(AddonRegistration::discovered).collect()
    }
}

/// Registers an addon type via `inventory`.
///
/// ```rust,ignore
/// register_addon!(Echo {
///     kind: "echo",
///     name: Some("echo"),
///     domains: ["echo", "text"],
/// });
/// ```
#[macro_export]
macro_rules! register_addon {
    ($ty:ty {
        kind: $kind:expr,
        name: $name:expr,
        domains: [$($domain:expr),* $(,)?]
        $(, priority: $priority:expr)?
        $(,)?
    }) => {
        $crate::inventory::submit! {
            $crate::AddonRegistration::new::<$ty>($kind, $name, &[$($domain),*])
                $(.with_priority($priority))?
        }
    };
}
