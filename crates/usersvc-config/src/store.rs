#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(crate::env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("STORE_BACKEND")
            .map(|v| v.trim().to_lowercase())
            .as_deref()
        {
            Some("postgres") | Some("postgresql") => StoreBackend::Postgres,
            _ => StoreBackend::Memory,
        };

        Self {
            backend,
            database_url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            max_connections: crate::parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5),
        }
    }

    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            database_url: None,
            max_connections: 5,
        }
    }
}
