//! Preference-store adapter.
//!
//! Implements both [`ConfigPort`] and [`StoragePort`] on top of a
//! namespaced key/value map.
//!
//! - Config validation: all fields are range-checked before persistence.
//! - Namespace isolation: keys are stored as `namespace::key`.
//! - Backing file (optional): the whole map is rewritten as JSON after
//!   every mutation, so a crash loses at most the write in flight.
//!   Without a file the store lives only as long as the process.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort, StorageError, StoragePort};
use crate::config::SystemConfig;
use crate::error::Error;

const CONFIG_NAMESPACE: &str = "geoalert";
const CONFIG_KEY: &str = "syscfg";

pub struct PrefsAdapter {
    store: RefCell<HashMap<String, Vec<u8>>>,
    path: Option<PathBuf>,
}

impl PrefsAdapter {
    /// In-memory store, nothing survives the process.
    pub fn new() -> Self {
        info!("PrefsAdapter: in-memory backend");
        Self {
            store: RefCell::new(HashMap::new()),
            path: None,
        }
    }

    /// Open (or create on first write) a store backed by `path`.
    ///
    /// A missing file is an empty store.  An unreadable or corrupt file is
    /// an error; the caller decides whether to fall back to [`new`](Self::new).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let map = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<HashMap<String, Vec<u8>>>(&bytes)
                .map_err(|_| Error::Storage(StorageError::IoError))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        info!(
            "PrefsAdapter: {} ({} keys)",
            path.display(),
            map.len()
        );
        Ok(Self {
            store: RefCell::new(map),
            path: Some(path),
        })
    }

    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{}::{}", namespace, key)
    }

    /// Flush after changing `key`; if that fails, put `previous` back so
    /// memory and file agree.
    fn flush_or_revert(&self, key: String, previous: Option<Vec<u8>>) -> Result<(), StorageError> {
        let result = self.flush();
        if result.is_err() {
            let mut map = self.store.borrow_mut();
            match previous {
                Some(old) => map.insert(key, old),
                None => map.remove(&key),
            };
        }
        result
    }

    /// Rewrite the backing file, if there is one.
    fn flush(&self) -> Result<(), StorageError> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        let bytes = serde_json::to_vec(&*self.store.borrow()).map_err(|_| StorageError::IoError)?;
        std::fs::write(path, bytes).map_err(|e| {
            warn!("PrefsAdapter: write to {} failed: {}", path.display(), e);
            match e.kind() {
                std::io::ErrorKind::StorageFull => StorageError::Full,
                _ => StorageError::IoError,
            }
        })
    }
}

fn validate_config(cfg: &SystemConfig) -> Result<(), ConfigError> {
    if !(10.0..=50_000.0).contains(&cfg.alert_radius_m) {
        return Err(ConfigError::ValidationFailed(
            "alert_radius_m must be 10–50000",
        ));
    }
    if !(1_000..=3_600_000).contains(&cfg.stale_fix_ms) {
        return Err(ConfigError::ValidationFailed(
            "stale_fix_ms must be 1000–3600000",
        ));
    }
    if !(0.0..=10_000.0).contains(&cfg.significant_accuracy_loss_m) {
        return Err(ConfigError::ValidationFailed(
            "significant_accuracy_loss_m must be 0–10000",
        ));
    }
    Ok(())
}

impl ConfigPort for PrefsAdapter {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let key = Self::composite_key(CONFIG_NAMESPACE, CONFIG_KEY);
        if let Some(bytes) = self.store.borrow().get(&key) {
            let cfg: SystemConfig =
                postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
            info!("PrefsAdapter: loaded config from store");
            Ok(cfg)
        } else {
            info!("PrefsAdapter: no stored config, using defaults");
            Ok(SystemConfig::default())
        }
    }

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        validate_config(config)?;

        let key = Self::composite_key(CONFIG_NAMESPACE, CONFIG_KEY);
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        let previous = self.store.borrow_mut().insert(key.clone(), bytes);
        self.flush_or_revert(key, previous)?;
        info!("PrefsAdapter: config saved");
        Ok(())
    }
}

impl StoragePort for PrefsAdapter {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let composite = Self::composite_key(namespace, key);
        match self.store.borrow().get(&composite) {
            Some(data) => {
                let len = data.len().min(buf.len());
                buf[..len].copy_from_slice(&data[..len]);
                Ok(len)
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn value_len(&self, namespace: &str, key: &str) -> Result<usize, StorageError> {
        let composite = Self::composite_key(namespace, key);
        self.store
            .borrow()
            .get(&composite)
            .map(Vec::len)
            .ok_or(StorageError::NotFound)
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let composite = Self::composite_key(namespace, key);
        let previous = self.store.get_mut().insert(composite.clone(), data.to_vec());
        self.flush_or_revert(composite, previous)
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        let composite = Self::composite_key(namespace, key);
        match self.store.get_mut().remove(&composite) {
            Some(previous) => self.flush_or_revert(composite, Some(previous)),
            None => Ok(()),
        }
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        let composite = Self::composite_key(namespace, key);
        self.store.borrow().contains_key(&composite)
    }
}

impl Default for PrefsAdapter {
    fn default() -> Self {
        Self::new()
    }
}
