//! Tsubaki Mock Addons
//!
//! Small addons for exercising a host:
//! - `echo` (echo, text): joins its arguments
//! - `sum` (math, sum): adds integers, fails on bad input
//! - `maintenance` (math, maintenance): always declines
//! - unnamed `Reverse` (text, reverse): reverses its arguments
//!
//! Linking this crate registers all four through `register_addon!`, so the
//! default host picks them up. `load_mock_addons` adds them to a
//! `StaticCatalog` instead, for hosts that wire addons explicitly.

mod math;
mod text;

pub use math::{Maintenance, Sum};
pub use text::{Echo, Reverse};

use tsubaki_addons::StaticCatalog;
use tsubaki_core::AddonMetadata;

/// Load mock addons into a static catalog
pub fn load_mock_addons(catalog: StaticCatalog) -> StaticCatalog {
    catalog
        .with_default::<Echo>(AddonMetadata::new("echo", ["echo", "text"]))
        .with_default::<Sum>(AddonMetadata::new("sum", ["math", "sum"]))
        .with_default::<Maintenance>(AddonMetadata::new("maintenance", ["math", "maintenance"]))
        .with_default::<Reverse>(AddonMetadata::unnamed(["text", "reverse"]))
}

/// Create a catalog holding only the mock addons
pub fn mock_catalog() -> StaticCatalog {
    load_mock_addons(StaticCatalog::new())
}
