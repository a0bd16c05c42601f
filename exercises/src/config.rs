//! Settings for both exercises. Every field has a default, so a JSON file only
//! needs the values it wants to change:
//!
//! ```json
//! { "pool": { "workers": 20 }, "search": { "threshold": 300 } }
//! ```

use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use spool::sync::Semaphore;

use crate::{error::{ConfigError, PoolError}, highly_divisible::SearchOptions};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub pool: PoolConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// The answer must have strictly more divisors than this.
    pub threshold: u64,
    /// Only inspect even triangular numbers. Not a sound pruning rule in general.
    pub even_only: bool,
    /// Give up after this triangle index.
    pub max_index: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub workers: usize,
    /// Semaphore permits, i.e. how many workers may be active at once.
    pub capacity: usize,
    /// Upper bound of the random time a worker stays active.
    pub max_hold_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: 500,
            even_only: false,
            max_index: None,
        }
    }
}

impl SearchConfig {
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            even_only: self.even_only,
            max_index: self.max_index,
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            capacity: 3,
            max_hold_ms: 1000,
        }
    }
}

impl PoolConfig {
    pub fn max_hold(&self) -> Duration {
        Duration::from_millis(self.max_hold_ms)
    }

    pub fn validate(&self) -> Result<(), PoolError> {
        if self.capacity == 0 || self.capacity > Semaphore::MAX_PERMITS {
            return Err(PoolError::InvalidCapacity {
                capacity: self.capacity,
                max: Semaphore::MAX_PERMITS,
            });
        }
        Ok(())
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_the_classic_programs() {
        let config = Config::default();
        assert_eq!(config.search.threshold, 500);
        assert!(!config.search.even_only);
        assert_eq!(config.pool.workers, 10);
        assert_eq!(config.pool.capacity, 3);
        assert_eq!(config.pool.max_hold(), Duration::from_secs(1));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "pool": { "capacity": 5 }, "search": { "even_only": true } }"#).unwrap();
        assert_eq!(config.pool.capacity, 5);
        assert_eq!(config.pool.workers, 10);
        assert!(config.search.even_only);
        assert_eq!(config.search.threshold, 500);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "search": {{ "threshold": 5, "max_index": 100 }} }}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.search.threshold, 5);
        assert_eq!(config.search.options().max_index, Some(100));
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Read { .. })));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = PoolConfig { capacity: 0, ..PoolConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(PoolError::InvalidCapacity { capacity: 0, .. })
        ));
        assert!(PoolConfig::default().validate().is_ok());
    }
}
