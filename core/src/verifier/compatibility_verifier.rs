use crate::shape::Shape;
use crate::verifier::rules::evaluate;
use crate::verifier::{CompatibilityVerdict, VerdictCache, VerifierFormat};
use std::any::{type_name, Any, TypeId};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Checks types against the object contract of a [`VerifierFormat`].
///
/// The MessagePack rules:
///
/// 1. the type is `pub` and not declared inside another item;
/// 2. non-union types carry `#[shape(object)]`;
/// 3. every member has `#[shape(key = ..)]` or `#[shape(ignore)]`, unless the object marker
///    sets `keys_as_names`, and no key is used twice;
/// 4. unions declare at least one case, each with a unique `union_key` and a subtype that
///    itself carries the object marker.
///
/// The Bincode rules keep 1 and 2 only; a union passes rule 2 when every case maps to a
/// subtype carrying the object marker.
///
/// Every violation is reported in the verdict's reason. Verdicts, negative ones included,
/// are cached per type and format.
#[derive(Debug, Clone)]
pub struct CompatibilityVerifier {
  cache: Arc<VerdictCache>,
  format: VerifierFormat,
}

impl Default for CompatibilityVerifier {
  fn default() -> Self {
    Self::global()
  }
}

impl CompatibilityVerifier {
  pub fn new(cache: Arc<VerdictCache>) -> Self {
    Self {
      cache,
      format: VerifierFormat::default(),
    }
  }

  pub fn with_format(mut self, format: VerifierFormat) -> Self {
    self.format = format;
    self
  }

  pub fn format(&self) -> VerifierFormat {
    self.format
  }

  pub fn global() -> Self {
    Self::new(VerdictCache::global())
  }

  pub fn cache(&self) -> &Arc<VerdictCache> {
    &self.cache
  }

  pub fn is_serializable<T>(&self) -> CompatibilityVerdict
  where
    T: Shape + ?Sized + 'static, {
    let format = self.format;
    let (verdict, hit) = self.cache.get_or_compute(TypeId::of::<T>(), format, || {
      tracing::trace!("Verdict cache miss: type = {}, format = {}", type_name::<T>(), format);
      let verdict = Self::inspect::<T>(format);
      if !verdict.ok {
        tracing::debug!(
          "Incompatible type: type = {}, format = {}, reason = {}",
          type_name::<T>(),
          format,
          verdict.reason
        );
      }
      verdict
    });
    if hit {
      tracing::trace!("Verdict cache hit: type = {}, format = {}", type_name::<T>(), format);
    }
    verdict
  }

  fn inspect<T>(format: VerifierFormat) -> CompatibilityVerdict
  where
    T: Shape + ?Sized, {
    // shape() is user code; a panic there becomes a negative verdict
    match panic::catch_unwind(AssertUnwindSafe(|| evaluate(&T::shape(), format))) {
      Ok(verdict) => verdict,
      Err(payload) => CompatibilityVerdict::incompatible(format!(
        "type {} could not be inspected: {}",
        type_name::<T>(),
        panic_message(payload.as_ref())
      )),
    }
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    message.to_string()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "unknown panic".to_string()
  }
}
