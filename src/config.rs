use crate::domain::filtering::injection::DEFAULT_MAX_DEPTH;

/// Which persistence adapter backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(format!("Unknown store backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub store_backend: StoreBackend,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub customers_collection: String,
    pub orders_collection: String,
    // MongoDB connection pool settings
    pub mongodb_max_pool_size: u32,
    pub mongodb_connect_timeout_secs: u64,
    // Request limits
    pub max_body_bytes: usize,
    pub injection_max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            store_backend: StoreBackend::MongoDb,
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            mongodb_database: "shop".to_string(),
            customers_collection: "customers".to_string(),
            orders_collection: "orders".to_string(),
            mongodb_max_pool_size: 20,
            mongodb_connect_timeout_secs: 10,
            max_body_bytes: 64 * 1024,
            injection_max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            store_backend: std::env::var("STORE_BACKEND")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.store_backend),
            mongodb_uri: std::env::var("MONGODB_URI").unwrap_or(defaults.mongodb_uri),
            mongodb_database: std::env::var("MONGODB_DATABASE")
                .unwrap_or(defaults.mongodb_database),
            customers_collection: std::env::var("CUSTOMERS_COLLECTION")
                .unwrap_or(defaults.customers_collection),
            orders_collection: std::env::var("ORDERS_COLLECTION")
                .unwrap_or(defaults.orders_collection),
            mongodb_max_pool_size: std::env::var("MONGODB_MAX_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.mongodb_max_pool_size),
            mongodb_connect_timeout_secs: std::env::var("MONGODB_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.mongodb_connect_timeout_secs),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            injection_max_depth: std::env::var("INJECTION_MAX_DEPTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.injection_max_depth),
        }
    }

    /// Configuration for a process-local store, used by tests and demos
    pub fn in_memory() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.store_backend == StoreBackend::MongoDb
            && !self.mongodb_uri.starts_with("mongodb://")
            && !self.mongodb_uri.starts_with("mongodb+srv://")
        {
            return Err("MONGODB_URI must start with mongodb:// or mongodb+srv://".to_string());
        }

        if self.listen_addr.is_empty() {
            return Err("LISTEN_ADDR cannot be empty".to_string());
        }

        if self.mongodb_database.is_empty() {
            return Err("MONGODB_DATABASE cannot be empty".to_string());
        }

        for (name, value) in [
            ("CUSTOMERS_COLLECTION", &self.customers_collection),
            ("ORDERS_COLLECTION", &self.orders_collection),
        ] {
            if value.is_empty() || value.contains('$') {
                return Err(format!("{} must be a plain collection name", name));
            }
        }

        if self.mongodb_max_pool_size == 0 {
            return Err("MONGODB_MAX_POOL_SIZE must be at least 1".to_string());
        }

        if self.max_body_bytes < 1024 || self.max_body_bytes > 16 * 1024 * 1024 {
            return Err("MAX_BODY_BYTES must be between 1KiB and 16MiB".to_string());
        }

        if self.injection_max_depth == 0 || self.injection_max_depth > 32 {
            return Err("INJECTION_MAX_DEPTH must be between 1 and 32".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.injection_max_depth, 5);
    }

    #[test]
    fn test_rejects_non_mongodb_uri() {
        let config = Config {
            mongodb_uri: "postgres://localhost".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_memory_backend_ignores_uri() {
        let config = Config {
            mongodb_uri: String::new(),
            ..Config::in_memory()
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_operator_collection_name() {
        let config = Config {
            orders_collection: "$cmd".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_depth() {
        let config = Config {
            injection_max_depth: 0,
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_store_backend_parsing() {
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert_eq!("MongoDB".parse::<StoreBackend>(), Ok(StoreBackend::MongoDb));
        assert!("postgres".parse::<StoreBackend>().is_err());
    }
}
