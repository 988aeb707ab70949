use crate::error::{DeserializationError, PipelineError, TransformError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use tokio_util::sync::CancellationToken;

/// Receives the erased deserializer produced by a codec and materializes a value from it.
pub trait DeserializeSink {
  fn accept(&mut self, deserializer: &mut dyn erased_serde::Deserializer<'_>) -> Result<(), erased_serde::Error>;
}

/// A [`DeserializeSink`] holding at most one decoded `T`.
#[derive(Debug)]
pub struct Slot<T>(Option<T>);

impl<T> Slot<T> {
  pub fn new() -> Self {
    Self(None)
  }

  pub fn take(&mut self) -> Option<T> {
    self.0.take()
  }
}

impl<T> Default for Slot<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: DeserializeOwned> DeserializeSink for Slot<T> {
  fn accept(&mut self, deserializer: &mut dyn erased_serde::Deserializer<'_>) -> Result<(), erased_serde::Error> {
    self.0 = Some(erased_serde::deserialize::<T>(deserializer)?);
    Ok(())
  }
}

/// Contract shared by base codecs, transform decorators and composed pipelines.
///
/// The methods are type-erased so that decorators can be stacked behind
/// `Box<dyn Serializer>`; typed access goes through [`SerializerExt`].
#[async_trait]
pub trait Serializer: Debug + Send + Sync {
  async fn serialize_erased(
    &self,
    value: &(dyn erased_serde::Serialize + Sync),
    cancel: &CancellationToken,
  ) -> Result<Vec<u8>, PipelineError>;

  async fn deserialize_erased(
    &self,
    data: Vec<u8>,
    sink: &mut (dyn DeserializeSink + Send),
    cancel: &CancellationToken,
  ) -> Result<(), PipelineError>;

  /// Undoes every byte transform layered in this instance and returns the codec's byte form.
  async fn deserialize_raw_bytes(&self, data: Vec<u8>, cancel: &CancellationToken) -> Result<Vec<u8>, TransformError>;
}

#[async_trait]
impl<S: Serializer + ?Sized> Serializer for Box<S> {
  async fn serialize_erased(
    &self,
    value: &(dyn erased_serde::Serialize + Sync),
    cancel: &CancellationToken,
  ) -> Result<Vec<u8>, PipelineError> {
    (**self).serialize_erased(value, cancel).await
  }

  async fn deserialize_erased(
    &self,
    data: Vec<u8>,
    sink: &mut (dyn DeserializeSink + Send),
    cancel: &CancellationToken,
  ) -> Result<(), PipelineError> {
    (**self).deserialize_erased(data, sink, cancel).await
  }

  async fn deserialize_raw_bytes(&self, data: Vec<u8>, cancel: &CancellationToken) -> Result<Vec<u8>, TransformError> {
    (**self).deserialize_raw_bytes(data, cancel).await
  }
}

/// Typed entry points over any [`Serializer`].
#[async_trait]
pub trait SerializerExt: Serializer {
  async fn serialize<T>(&self, value: &T) -> Result<Vec<u8>, PipelineError>
  where
    T: Serialize + Sync, {
    self.serialize_with(value, &CancellationToken::new()).await
  }

  async fn serialize_with<T>(&self, value: &T, cancel: &CancellationToken) -> Result<Vec<u8>, PipelineError>
  where
    T: Serialize + Sync, {
    self.serialize_erased(value, cancel).await
  }

  async fn deserialize<T>(&self, data: Vec<u8>) -> Result<T, PipelineError>
  where
    T: DeserializeOwned + Send, {
    self.deserialize_with(data, &CancellationToken::new()).await
  }

  async fn deserialize_with<T>(&self, data: Vec<u8>, cancel: &CancellationToken) -> Result<T, PipelineError>
  where
    T: DeserializeOwned + Send, {
    let mut slot = Slot::<T>::new();
    self.deserialize_erased(data, &mut slot, cancel).await?;
    slot.take().ok_or_else(|| DeserializationError::Empty.into())
  }
}

impl<S: Serializer + ?Sized> SerializerExt for S {}

pub(crate) fn ensure_not_cancelled(cancel: &CancellationToken) -> Result<(), PipelineError> {
  if cancel.is_cancelled() {
    return Err(PipelineError::Cancelled);
  }
  Ok(())
}
