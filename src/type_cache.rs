use crate::{locator::TypeLocator, structure::StructTypeHandle};
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("generated type `{0}` could not be located")]
pub struct ClassResolutionError(pub String);

/// Memoized name → type resolution in front of a [`TypeLocator`].
///
/// Two threads missing on the same name may both consult the locator; the
/// first insert wins and the other result is dropped, so every caller ends
/// up with the same handle.
pub struct TypeCache {
    locator: Arc<dyn TypeLocator>,
    entries: RwLock<HashMap<String, StructTypeHandle>>,
}

impl TypeCache {
    pub fn new(locator: Arc<dyn TypeLocator>) -> Self {
        Self {
            locator,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn resolve(&self, name: &str) -> Result<StructTypeHandle, ClassResolutionError> {
        if let Some(handle) = self.cached(name) {
            tracing::trace!("type cache hit for `{}`", name);
            return Ok(handle);
        }

        tracing::trace!("type cache miss for `{}`", name);
        let located = self
            .locator
            .locate(name)
            .ok_or_else(|| ClassResolutionError(name.to_owned()))?;

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let handle = entries.entry(name.to_owned()).or_insert(located);
        Ok(Arc::clone(handle))
    }

    fn cached(&self, name: &str) -> Option<StructTypeHandle> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cached(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{locator::StructTypeRegistry, structure::StructSchema, value::ValueType};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLocator {
        inner: StructTypeRegistry,
        lookups: AtomicUsize,
    }

    impl TypeLocator for CountingLocator {
        fn locate(&self, name: &str) -> Option<StructTypeHandle> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.locate(name)
        }
    }

    fn counting_locator() -> Arc<CountingLocator> {
        let inner = StructTypeRegistry::new().with(
            StructSchema::new("tutorial.Calc$add_args")
                .field(1, "a", ValueType::I32)
                .into_handle(),
        );
        Arc::new(CountingLocator {
            inner,
            lookups: AtomicUsize::new(0),
        })
    }

    #[test]
    fn successful_lookups_are_memoized() {
        let locator = counting_locator();
        let cache = TypeCache::new(locator.clone());

        let first = cache.resolve("tutorial.Calc$add_args").expect("first resolve");
        let second = cache.resolve("tutorial.Calc$add_args").expect("second resolve");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(locator.lookups.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_lookups_are_not_cached() {
        let locator = counting_locator();
        let cache = TypeCache::new(locator.clone());

        for _ in 0..2 {
            assert_eq!(
                cache.resolve("tutorial.Calc$missing_args").err(),
                Some(ClassResolutionError("tutorial.Calc$missing_args".into()))
            );
        }

        assert_eq!(locator.lookups.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_first_resolutions_converge() {
        let cache = Arc::new(TypeCache::new(counting_locator()));

        let handles: Vec<StructTypeHandle> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    let cache = Arc::clone(&cache);
                    scope.spawn(move || {
                        cache
                            .resolve("tutorial.Calc$add_args")
                            .expect("concurrent resolve")
                    })
                })
                .collect();
            workers
                .into_iter()
                .map(|worker| worker.join().expect("worker panicked"))
                .collect()
        });

        let winner = cache.resolve("tutorial.Calc$add_args").expect("resolve");
        assert!(handles.iter().all(|handle| Arc::ptr_eq(handle, &winner)));
        assert_eq!(cache.len(), 1);
    }
}
