use crate::verifier::{CompatibilityVerdict, VerifierFormat};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::sync::Arc;
use stratum_utils_rs::collections::DashMapExtension;

static GLOBAL_CACHE: Lazy<Arc<VerdictCache>> = Lazy::new(|| Arc::new(VerdictCache::new()));

type VerdictKey = (TypeId, VerifierFormat);

/// Verdicts keyed by exact type and format. Entries are written once and never evicted.
#[derive(Debug, Default)]
pub struct VerdictCache {
  verdicts: DashMap<VerdictKey, CompatibilityVerdict>,
}

impl VerdictCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// The process-wide cache used by [`CompatibilityVerifier::global`](crate::verifier::CompatibilityVerifier::global).
  pub fn global() -> Arc<VerdictCache> {
    GLOBAL_CACHE.clone()
  }

  pub fn get(&self, type_id: TypeId, format: VerifierFormat) -> Option<CompatibilityVerdict> {
    self.verdicts.get(&(type_id, format)).map(|entry| entry.value().clone())
  }

  /// Returns the cached verdict, computing and storing it on a miss.
  ///
  /// The flag is `true` on a cache hit. Racing callers may all compute; the first
  /// stored verdict is returned to every one of them.
  pub fn get_or_compute<F>(&self, type_id: TypeId, format: VerifierFormat, compute: F) -> (CompatibilityVerdict, bool)
  where
    F: FnOnce() -> CompatibilityVerdict, {
    self.verdicts.load_or_insert_with((type_id, format), compute)
  }

  pub fn len(&self) -> usize {
    self.verdicts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.verdicts.is_empty()
  }
}
