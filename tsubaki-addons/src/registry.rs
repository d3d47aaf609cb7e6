//! Addon Registry
//!
//! `AddonProvider` is built once from a `Discover` source and never changes
//! afterwards. It offers three operations:
//! - `addon_names`: declared names in registration order
//! - `execute`: pick the best-scoring addon for a set of domains and run it
//! - `get` / `lookup` (and `provider[..]`): find an addon by name

use crate::catalog::{default_catalog, Discover};
use crate::{AddonContract, AddonEntry, DomainMatcher, HostConfig, OverlapMatcher};
use std::ops::Index;
use std::sync::OnceLock;
use tracing::{debug, info, warn};
use tsubaki_core::{AddonError, DomainSet, ExecutedResult, Execution};

static ADDONS: ProviderCell = ProviderCell::new();

/// Central addon registry and dispatcher
pub struct AddonProvider {
    entries: Vec<AddonEntry>,
    matcher: Box<dyn DomainMatcher>,
}

impl AddonProvider {
    /// Build a registry with the default `OverlapMatcher`
    pub fn new(catalog: &dyn Discover) -> Self {
        Self::with_matcher(catalog, Box::new(OverlapMatcher))
    }

    pub fn with_matcher(catalog: &dyn Discover, matcher: Box<dyn DomainMatcher>) -> Self {
        let entries: Vec<AddonEntry> = catalog.discover().into_iter().map(AddonEntry::new).collect();

        debug!("Loading addons...");
        for entry in &entries {
            debug!("{}", entry.metadata().display_name());
        }
        info!(count = entries.len(), matcher = matcher.name(), "Addon registry ready");

        Self { entries, matcher }
    }

    /// Registry over the default catalog, using the configured matcher
    pub fn from_config(config: &HostConfig) -> Self {
        Self::with_matcher(&default_catalog(config), config.matcher())
    }

    /// Process-wide registry, built from the environment on first use
    pub fn addons() -> &'static AddonProvider {
        ADDONS.get_or_init(|| {
            let config = HostConfig::from_env().unwrap_or_else(|e| {
                warn!(error = %e, "Invalid addon host configuration, using defaults");
                HostConfig::default()
            });
            Self::from_config(&config)
        })
    }

    /// Declared names in registration order; blank or missing names are kept as-is
    pub fn addon_names(&self) -> Vec<Option<&str>> {
        self.entries.iter().map(AddonEntry::name).collect()
    }

    pub fn entries(&self) -> &[AddonEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn matcher(&self) -> &dyn DomainMatcher {
        self.matcher.as_ref()
    }

    fn score(&self, entry: &AddonEntry, requested: &DomainSet) -> f64 {
        let score = self.matcher.compare(&entry.metadata().domains, requested);
        if score.is_finite() && score >= 0.0 {
            score
        } else {
            warn!(
                addon = entry.metadata().display_name(),
                matcher = self.matcher.name(),
                score,
                "Matcher produced an invalid score, treating as no match"
            );
            0.0
        }
    }

    /// Dispatch a request to the best-matching addon.
    ///
    /// With several candidates, the highest score wins and ties go to the
    /// entry registered last. A top score of zero means nothing matched and
    /// no addon is touched. Panics raised by the addon propagate unchanged.
    pub fn execute<D: AsRef<str>>(&self, domains: &[D], args: &[String]) -> Execution {
        let requested: DomainSet = domains.iter().collect();

        match self.entries.len() {
            0 => Execution::skipped(ExecutedResult::NoAddon),
            1 => {
                let entry = &self.entries[0];
                if self.score(entry, &requested) == 0.0 {
                    Execution::skipped(ExecutedResult::NoMatched)
                } else {
                    Self::invoke(entry, args)
                }
            }
            _ => {
                let mut top = 0.0;
                let mut winner = None;
                for entry in &self.entries {
                    let score = self.score(entry, &requested);
                    debug!(addon = entry.metadata().display_name(), score, "Scored addon");
                    if score >= top {
                        top = score;
                        winner = Some(entry);
                    }
                }
                match winner {
                    Some(entry) if top != 0.0 => Self::invoke(entry, args),
                    _ => Execution::skipped(ExecutedResult::NoMatched),
                }
            }
        }
    }

    fn invoke(entry: &AddonEntry, args: &[String]) -> Execution {
        let output = entry.value().execute(args);
        let execution = Execution::from_output(output);
        debug!(
            addon = entry.metadata().display_name(),
            result = %execution.result,
            "Addon executed"
        );
        execution
    }

    /// Find an addon by exact, case-sensitive name
    pub fn get(&self, name: &str) -> Result<&(dyn AddonContract + 'static), AddonError> {
        self.lookup(Lookup::new(name))
    }

    /// Find the first addon matching the query, in registration order
    pub fn lookup(&self, query: Lookup<'_>) -> Result<&(dyn AddonContract + 'static), AddonError> {
        if query.name.is_empty() {
            return Err(AddonError::invalid_argument("name", "addon name must not be empty"));
        }

        for entry in &self.entries {
            let meta = entry.metadata();
            let matched = if meta.is_unnamed() {
                query.advance_search && query.matches(entry.value().type_name())
            } else {
                meta.name.as_deref().map_or(false, |n| query.matches(n))
            };
            if matched {
                return Ok(entry.value());
            }
        }

        Err(AddonError::not_found(query.name))
    }
}

// Indexing panics on a failed lookup, like `HashMap`'s `Index`.
impl<'a> Index<&'a str> for AddonProvider {
    type Output = dyn AddonContract;

    fn index(&self, name: &'a str) -> &Self::Output {
        &self[Lookup::new(name)]
    }
}

impl<'a> Index<Lookup<'a>> for AddonProvider {
    type Output = dyn AddonContract;

    fn index(&self, query: Lookup<'a>) -> &Self::Output {
        match self.lookup(query) {
            Ok(addon) => addon,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Name lookup parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup<'a> {
    pub name: &'a str,
    pub ignore_case: bool,
    /// Fall back to the addon's type name when it declares no name
    pub advance_search: bool,
}

impl<'a> Lookup<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            ignore_case: false,
            advance_search: false,
        }
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn advance_search(mut self, advance_search: bool) -> Self {
        self.advance_search = advance_search;
        self
    }

    fn matches(&self, candidate: &str) -> bool {
        if self.ignore_case {
            candidate.to_lowercase() == self.name.to_lowercase()
        } else {
            candidate == self.name
        }
    }
}

impl<'a> From<&'a str> for Lookup<'a> {
    fn from(name: &'a str) -> Self {
        Self::new(name)
    }
}

/// One-shot holder for a shared registry.
///
/// The first caller builds the registry; concurrent first callers block
/// until it is ready and every caller sees the same instance.
pub struct ProviderCell {
    cell: OnceLock<AddonProvider>,
}

impl ProviderCell {
    pub const fn new() -> Self {
        Self { cell: OnceLock::new() }
    }

    pub fn get_or_init<F>(&self, init: F) -> &AddonProvider
    where
        F: FnOnce() -> AddonProvider,
    {
        self.cell.get_or_init(init)
    }

    pub fn get(&self) -> Option<&AddonProvider> {
        self.cell.get()
    }
}

impl Default for ProviderCell {
    fn default() -> Self {
        Self::new()
    }
}
