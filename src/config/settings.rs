use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;
use std::sync::RwLock;

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::new);

const DEFAULT_DIFFICULTY: u32 = 4;
const DEFAULT_DATA_FILE: &str = crate::storage::LEDGER_FILE;
const DEFAULT_SIGNATURE_SCHEME: &str = "placeholder";

const DIFFICULTY_KEY: &str = "LEDGER_DIFFICULTY";
const DATA_FILE_KEY: &str = "LEDGER_DATA_FILE";
const SIGNATURE_SCHEME_KEY: &str = "LEDGER_SIGNATURE_SCHEME";

/// Process-level settings, read once from the environment. The ledger
/// itself stays an explicit owned value; config only feeds construction
/// parameters at the consumer boundary.
pub struct Config {
    inner: RwLock<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Config {
        let mut map = HashMap::new();
        for key in [DIFFICULTY_KEY, DATA_FILE_KEY, SIGNATURE_SCHEME_KEY] {
            if let Ok(value) = env::var(key) {
                map.insert(String::from(key), value);
            }
        }

        Config {
            inner: RwLock::new(map),
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        inner.get(key).cloned()
    }

    pub fn set(&self, key: &str, value: String) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on config - this should never happen");
        inner.insert(String::from(key), value);
    }

    /// Difficulty for newly created ledgers. Unparsable values fall back to
    /// the default.
    pub fn get_difficulty(&self) -> u32 {
        self.get(DIFFICULTY_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_DIFFICULTY)
    }

    /// Path of the persisted ledger document.
    pub fn get_data_file(&self) -> String {
        self.get(DATA_FILE_KEY)
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string())
    }

    /// Configured signature scheme name; parsed at the call site.
    pub fn get_signature_scheme(&self) -> String {
        self.get(SIGNATURE_SCHEME_KEY)
            .unwrap_or_else(|| DEFAULT_SIGNATURE_SCHEME.to_string())
    }
}
