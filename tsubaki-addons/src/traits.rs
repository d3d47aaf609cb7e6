//! Addon contract

use std::sync::Arc;
use tsubaki_core::AddonOutput;

/// Capability interface every addon implements
pub trait AddonContract: Send + Sync {
    /// Handle a request. Arguments are forwarded verbatim from the host.
    fn execute(&self, args: &[String]) -> AddonOutput;

    /// Concrete type identifier, used by advance-search lookups
    fn type_name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Deferred constructor for an addon instance
pub type AddonFactory = Arc<dyn Fn() -> Box<dyn AddonContract> + Send + Sync>;

/// Strip module path and generic arguments: `a::b::Foo<c::Bar>` -> `Foo`
pub fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
