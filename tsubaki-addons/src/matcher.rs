//! Domain similarity scoring
//!
//! A matcher scores how well an addon's declared domains cover a request.
//! Scores are non-negative and deterministic; `0.0` means "no match" and
//! guarantees the addon is never selected. Larger is strictly better.

use tsubaki_core::DomainSet;

/// Pluggable scoring policy
pub trait DomainMatcher: Send + Sync {
    fn name(&self) -> &'static str;
    fn compare(&self, declared: &DomainSet, requested: &DomainSet) -> f64;
}

/// Score = number of shared tags. The default policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapMatcher;

impl DomainMatcher for OverlapMatcher {
    fn name(&self) -> &'static str {
        "overlap"
    }

    fn compare(&self, declared: &DomainSet, requested: &DomainSet) -> f64 {
        declared.intersection_count(requested) as f64
    }
}

/// Score = |declared ∩ requested| / |declared ∪ requested|, in `[0, 1]`.
/// Favors addons whose declared domains closely fit the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaccardMatcher;

impl DomainMatcher for JaccardMatcher {
    fn name(&self) -> &'static str {
        "jaccard"
    }

    fn compare(&self, declared: &DomainSet, requested: &DomainSet) -> f64 {
        let union = declared.union_count(requested);
        if union == 0 {
            return 0.0;
        }
        declared.intersection_count(requested) as f64 / union as f64
    }
}
