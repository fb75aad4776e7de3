use std::path::PathBuf;

/// Runtime configuration shared by the service layers.
///
/// The server binary builds this from its TOML config plus CLI flags,
/// then passes it to storage initialization.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding the database and other runtime files.
    pub data_dir: Option<PathBuf>,

    /// Path to the redb database file.
    /// Defaults to `{data_dir}/medsched.redb` if not specified.
    pub db_path: Option<PathBuf>,

    /// Listen address for the HTTP server.
    pub listen: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            db_path: None,
            listen: "0.0.0.0:8080".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolve the redb database path, falling back to `{data_dir}/medsched.redb`.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| {
            self.data_dir
                .as_ref()
                .map(|d| d.join("medsched.redb"))
                .unwrap_or_else(|| PathBuf::from("medsched.redb"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_db_path_under_data_dir() {
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from("/data")),
            ..Default::default()
        };
        assert_eq!(config.resolve_db_path(), PathBuf::from("/data/medsched.redb"));
        assert_eq!(config.listen, "0.0.0.0:8080");
    }

    #[test]
    fn explicit_db_path_wins() {
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from("/data")),
            db_path: Some(PathBuf::from("/var/lib/sched.redb")),
            ..Default::default()
        };
        assert_eq!(config.resolve_db_path(), PathBuf::from("/var/lib/sched.redb"));
    }

    #[test]
    fn no_data_dir_uses_cwd() {
        assert_eq!(ServiceConfig::default().resolve_db_path(), PathBuf::from("medsched.redb"));
    }
}
