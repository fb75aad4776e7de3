//! Bootstrap: first-start checks and seed import.
//!
//! When medschedd starts:
//! 1. Verify the config is usable. If not, refuse to start.
//! 2. Import the seed file, if one is configured.

use std::path::Path;

use availability::{AvailabilityService, Seed, SeedSummary};
use tracing::info;

use crate::config::ServerConfig;

/// Verify server configuration is ready for production use.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.jwt.secret.is_empty() {
        anyhow::bail!("JWT secret is empty in configuration.");
    }
    if config.jwt.expire_secs <= 0 {
        anyhow::bail!("JWT expire_secs must be positive.");
    }
    if config.storage.data_dir.is_empty() {
        anyhow::bail!("Storage data_dir is empty in configuration.");
    }
    if config.seed.path.as_deref() == Some("") {
        anyhow::bail!("Seed path is empty in configuration.");
    }
    Ok(())
}

/// Load and import the configured seed file. No-op without one.
pub fn import_seed(
    config: &ServerConfig,
    service: &AvailabilityService,
) -> anyhow::Result<Option<SeedSummary>> {
    let Some(path) = config.seed.path.as_deref() else {
        return Ok(None);
    };
    info!("Importing seed from {}", path);
    let seed = Seed::load(Path::new(path))?;
    let summary = service.import(&seed)?;
    Ok(Some(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JwtConfig, SeedConfig, StorageConfig};
    use availability::AvailabilityStore;
    use std::sync::Arc;

    fn config() -> ServerConfig {
        ServerConfig {
            storage: StorageConfig { data_dir: "/tmp".to_string() },
            jwt: JwtConfig { secret: "test".to_string(), expire_secs: 3600 },
            seed: SeedConfig::default(),
        }
    }

    #[test]
    fn test_verify_config_ok() {
        assert!(verify_config(&config()).is_ok());
    }

    #[test]
    fn test_verify_config_empty_secret() {
        let mut c = config();
        c.jwt.secret.clear();
        assert!(verify_config(&c).is_err());
    }

    #[test]
    fn test_verify_config_empty_data_dir() {
        let mut c = config();
        c.storage.data_dir.clear();
        assert!(verify_config(&c).is_err());
    }

    #[test]
    fn test_verify_config_bad_expiry() {
        let mut c = config();
        c.jwt.expire_secs = 0;
        assert!(verify_config(&c).is_err());
    }

    #[test]
    fn test_import_seed() {
        let dir = tempfile::tempdir().unwrap();
        let seed_path = dir.path().join("seed.toml");
        std::fs::write(
            &seed_path,
            "[[doctors]]\nid = \"d1\"\nfacilityId = \"f1\"\nname = \"Dr. One\"\nspecialty = \"gp\"\n",
        )
        .unwrap();

        let store = AvailabilityStore::open(&dir.path().join("boot.redb")).unwrap();
        let service = AvailabilityService::new(Arc::new(store));

        assert!(import_seed(&config(), &service).unwrap().is_none());

        let mut c = config();
        c.seed.path = Some(seed_path.display().to_string());
        let summary = import_seed(&c, &service).unwrap().unwrap();
        assert_eq!(summary.doctors, 1);
        assert_eq!(service.get_doctor("f1", "d1").unwrap().name, "Dr. One");
    }

    #[test]
    fn test_import_missing_seed_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = AvailabilityStore::open(&dir.path().join("boot.redb")).unwrap();
        let service = AvailabilityService::new(Arc::new(store));
        let mut c = config();
        c.seed.path = Some("/nonexistent/seed.toml".into());
        assert!(import_seed(&c, &service).is_err());
    }
}
