use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::hash::Hash;

/// Insert-once helpers for maps whose entries never change after the first write.
pub trait DashMapExtension<K: Eq + Hash, V: Clone> {
  /// Returns the stored value, inserting `value` when the key is vacant.
  ///
  /// The flag is `true` when a value was already present.
  fn load_or_store(&self, key: K, value: V) -> (V, bool);

  /// Returns the stored value, computing it with `f` when the key is vacant.
  ///
  /// `f` runs without holding a shard lock, so racing callers may each run it.
  /// Only the first stored value is kept and every caller receives that value.
  fn load_or_insert_with<F>(&self, key: K, f: F) -> (V, bool)
  where
    F: FnOnce() -> V;
}

impl<K: Eq + Hash, V: Clone> DashMapExtension<K, V> for DashMap<K, V> {
  fn load_or_store(&self, key: K, value: V) -> (V, bool) {
    match self.entry(key) {
      Entry::Occupied(entry) => (entry.get().clone(), true),
      Entry::Vacant(entry) => (entry.insert(value).clone(), false),
    }
  }

  fn load_or_insert_with<F>(&self, key: K, f: F) -> (V, bool)
  where
    F: FnOnce() -> V, {
    if let Some(existing) = self.get(&key) {
      return (existing.value().clone(), true);
    }
    let value = f();
    self.load_or_store(key, value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc;

  #[test]
  fn load_or_store_keeps_first_value() {
    let map = DashMap::new();
    assert_eq!(map.load_or_store("a", 1), (1, false));
    assert_eq!(map.load_or_store("a", 2), (1, true));
    assert_eq!(map.len(), 1);
  }

  #[test]
  fn load_or_insert_with_skips_compute_when_present() {
    let map = DashMap::new();
    map.insert("a", 7);
    let (value, existed) = map.load_or_insert_with("a", || panic!("must not compute"));
    assert_eq!(value, 7);
    assert!(existed);
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn racing_computations_agree_on_one_value() {
    let map = Arc::new(DashMap::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let mut handles = Vec::new();
    for i in 0..16usize {
      let map = map.clone();
      let calls = calls.clone();
      handles.push(tokio::spawn(async move {
        map
          .load_or_insert_with("key", || {
            calls.fetch_add(1, Ordering::SeqCst);
            i
          })
          .0
      }));
    }
    let mut seen = Vec::new();
    for handle in handles {
      seen.push(handle.await.unwrap());
    }
    assert!(seen.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(map.len(), 1);
    assert!(calls.load(Ordering::SeqCst) >= 1);
  }
}
