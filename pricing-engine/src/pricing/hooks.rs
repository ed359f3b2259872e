//! Tier post-processing hooks
//!
//! Processors run in registration order after the active tier sequence is
//! resolved. Each one sees the current list and may return a replacement.

use super::resolver::ResolvedTier;
use super::snapshot::PricingSnapshot;

/// Pluggable step over the resolved tier list
pub trait TierPostProcessor: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Return `Some(list)` to replace the tiers, `None` to keep them
    fn process(&self, tiers: &[ResolvedTier], snapshot: &PricingSnapshot) -> Option<Vec<ResolvedTier>>;
}

/// Closure-backed processor
pub struct FnPostProcessor<F> {
    name: String,
    f: F,
}

impl<F> FnPostProcessor<F>
where
    F: Fn(&[ResolvedTier], &PricingSnapshot) -> Option<Vec<ResolvedTier>> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> TierPostProcessor for FnPostProcessor<F>
where
    F: Fn(&[ResolvedTier], &PricingSnapshot) -> Option<Vec<ResolvedTier>> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, tiers: &[ResolvedTier], snapshot: &PricingSnapshot) -> Option<Vec<ResolvedTier>> {
        (self.f)(tiers, snapshot)
    }
}

/// Run every processor in order, threading the list through
pub fn run_post_processors(
    processors: &[Box<dyn TierPostProcessor>],
    mut tiers: Vec<ResolvedTier>,
    snapshot: &PricingSnapshot,
) -> Vec<ResolvedTier> {
    for processor in processors {
        if let Some(replaced) = processor.process(&tiers, snapshot) {
            tracing::debug!(
                processor = processor.name(),
                before = tiers.len(),
                after = replaced.len(),
                "Tier list replaced by post-processor"
            );
            tiers = replaced;
        }
    }
    tiers
}
