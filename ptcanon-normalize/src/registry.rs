//! Bounded cache of per-network adapters.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;
use lru::LruCache;
use ptcanon_core::NetworkId;
use thiserror::Error;

use crate::{Adapter, ConfigError, ConfigFile, NetworkConfig, SharedTables};

/// Adapters kept when no capacity is configured.
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(16) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// Errors returned by [`AdapterRegistry::get`].
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No configuration exists for the requested network.
    #[error("unknown network '{network}'")]
    UnknownNetwork {
        /// The requested identifier.
        network: NetworkId,
    },
    /// The network's configuration could not be compiled.
    #[error("failed to build adapter for network '{network}'")]
    Build {
        /// Network whose configuration is invalid.
        network: NetworkId,
        /// Underlying configuration error.
        #[source]
        source: ConfigError,
    },
}

/// Hands out at most one live [`Adapter`] per network.
///
/// Adapters are built lazily from configuration and kept in a bounded LRU;
/// an evicted adapter is rebuilt on its next request. Repeated calls return
/// the same `Arc` while the entry stays cached.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use ptcanon_core::Product;
/// use ptcanon_normalize::{AdapterRegistry, ConfigFile, NetworkConfig, ProductIndexTable};
///
/// let config = ConfigFile {
///     networks: vec![NetworkConfig::new(
///         "demo".parse()?,
///         ProductIndexTable::new(vec![Some(Product::Bus)])?,
///     )],
///     ..ConfigFile::default()
/// };
/// let registry = AdapterRegistry::with_default_capacity(config)?;
/// let first = registry.get(&"demo".parse()?)?;
/// let second = registry.get(&"demo".parse()?)?;
/// assert!(Arc::ptr_eq(&first, &second));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct AdapterRegistry {
    configs: BTreeMap<NetworkId, NetworkConfig>,
    shared: SharedTables,
    cache: Mutex<LruCache<NetworkId, Arc<Adapter>>>,
}

impl AdapterRegistry {
    /// Index a configuration document.
    ///
    /// # Errors
    /// Returns [`ConfigError::DuplicateNetwork`] when two networks share an
    /// identifier and any error raised while building the shared tables.
    pub fn new(config: ConfigFile, capacity: NonZeroUsize) -> Result<Self, ConfigError> {
        let shared = SharedTables::from_config(&config.shared)?;
        let mut configs = BTreeMap::new();
        for network in config.networks {
            let id = network.id.clone();
            if configs.insert(id.clone(), network).is_some() {
                return Err(ConfigError::DuplicateNetwork { network: id });
            }
        }
        Ok(Self {
            configs,
            shared,
            cache: Mutex::new(LruCache::new(capacity)),
        })
    }

    /// Index a configuration document with [`DEFAULT_CAPACITY`].
    ///
    /// # Errors
    /// See [`AdapterRegistry::new`].
    pub fn with_default_capacity(config: ConfigFile) -> Result<Self, ConfigError> {
        Self::new(config, DEFAULT_CAPACITY)
    }

    /// Configured network identifiers in ascending order.
    pub fn networks(&self) -> impl Iterator<Item = &NetworkId> {
        self.configs.keys()
    }

    /// Number of adapters currently cached.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.lock().len()
    }

    /// Adapter for `network`, building it on a cache miss.
    ///
    /// The adapter is built without holding the cache lock. When two callers
    /// race on the same miss, the first inserted adapter wins and both get
    /// it.
    ///
    /// # Errors
    /// Returns [`RegistryError::UnknownNetwork`] for unconfigured networks
    /// and [`RegistryError::Build`] when the configuration is invalid.
    pub fn get(&self, network: &NetworkId) -> Result<Arc<Adapter>, RegistryError> {
        if let Some(adapter) = self.lock().get(network) {
            debug!("adapter cache hit for {network}");
            return Ok(Arc::clone(adapter));
        }
        let config = self
            .configs
            .get(network)
            .ok_or_else(|| RegistryError::UnknownNetwork {
                network: network.clone(),
            })?;
        debug!("adapter cache miss for {network}, building");
        let built = Adapter::from_config(config, &self.shared)
            .map(Arc::new)
            .map_err(|source| RegistryError::Build {
                network: network.clone(),
                source,
            })?;

        let mut cache = self.lock();
        if let Some(existing) = cache.get(network) {
            debug!("adapter for {network} was cached concurrently, discarding duplicate");
            return Ok(Arc::clone(existing));
        }
        if let Some((evicted, _)) = cache.push(network.clone(), Arc::clone(&built)) {
            debug!("evicted adapter for {evicted}");
        }
        Ok(built)
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<NetworkId, Arc<Adapter>>> {
        // Cached adapters are immutable, so a poisoned lock still holds a
        // consistent cache.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProductIndexTable;
    use ptcanon_core::Product;
    use rstest::{fixture, rstest};
    use std::sync::Barrier;
    use std::thread;

    fn network(id: &str) -> NetworkConfig {
        NetworkConfig::new(
            id.parse().unwrap(),
            ProductIndexTable::new(vec![Some(Product::Bus)]).unwrap(),
        )
    }

    #[fixture]
    fn registry() -> AdapterRegistry {
        let config = ConfigFile {
            networks: vec![network("a"), network("b"), network("c")],
            ..ConfigFile::default()
        };
        AdapterRegistry::new(config, NonZeroUsize::new(2).unwrap()).unwrap()
    }

    #[rstest]
    fn evicts_least_recently_used(registry: AdapterRegistry) {
        let a = registry.get(&"a".parse().unwrap()).unwrap();
        registry.get(&"b".parse().unwrap()).unwrap();
        registry.get(&"c".parse().unwrap()).unwrap();
        assert_eq!(registry.cached(), 2);
        let rebuilt = registry.get(&"a".parse().unwrap()).unwrap();
        assert!(!Arc::ptr_eq(&a, &rebuilt));
    }

    #[rstest]
    fn concurrent_misses_share_one_adapter(registry: AdapterRegistry) {
        const CALLERS: usize = 8;
        let id: NetworkId = "a".parse().unwrap();
        let barrier = Barrier::new(CALLERS);
        let adapters: Vec<Arc<Adapter>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..CALLERS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        registry.get(&id).unwrap()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        let cached = registry.get(&id).unwrap();
        assert_eq!(registry.cached(), 1);
        assert!(adapters.iter().all(|adapter| Arc::ptr_eq(adapter, &cached)));
    }

    #[rstest]
    fn unknown_networks_fail(registry: AdapterRegistry) {
        assert!(matches!(
            registry.get(&"zzz".parse().unwrap()),
            Err(RegistryError::UnknownNetwork { .. })
        ));
    }

    #[rstest]
    fn duplicate_networks_are_rejected() {
        let config = ConfigFile {
            networks: vec![network("a"), network("a")],
            ..ConfigFile::default()
        };
        assert!(matches!(
            AdapterRegistry::with_default_capacity(config),
            Err(ConfigError::DuplicateNetwork { .. })
        ));
    }

    #[rstest]
    fn lists_configured_networks(registry: AdapterRegistry) {
        let ids: Vec<&str> = registry.networks().map(NetworkId::as_str).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
