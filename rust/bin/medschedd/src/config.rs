//! Server-side configuration, one TOML file per context.
//!
//! ```toml
//! [storage]
//! data_dir = "/var/lib/medsched"
//!
//! [jwt]
//! secret = "change-me"
//! expire_secs = 86400
//!
//! [seed]
//! path = "/etc/medsched/seed.toml"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory holding named contexts.
pub const CONFIG_DIR: &str = "/etc/medsched";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub storage: StorageConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expire_secs")]
    pub expire_secs: i64,
}

fn default_expire_secs() -> i64 {
    86400
}

/// Optional seed data imported at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ServerConfig {
    /// Map a context name to its config file. Anything that looks like a
    /// path (contains `/` or ends in `.toml`) is used as-is.
    pub fn resolve_path(context: &str) -> PathBuf {
        if context.contains('/') || context.ends_with(".toml") {
            PathBuf::from(context)
        } else {
            Path::new(CONFIG_DIR).join(format!("{}.toml", context))
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_context_name() {
        assert_eq!(
            ServerConfig::resolve_path("clinic-north"),
            PathBuf::from("/etc/medsched/clinic-north.toml")
        );
        assert_eq!(ServerConfig::resolve_path("./dev.toml"), PathBuf::from("./dev.toml"));
        assert_eq!(ServerConfig::resolve_path("dev.toml"), PathBuf::from("dev.toml"));
        assert_eq!(ServerConfig::resolve_path("/tmp/x"), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn load_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ctx.toml");
        std::fs::write(
            &path,
            "[storage]\ndata_dir = \"/var/lib/medsched\"\n\n[jwt]\nsecret = \"s3cret\"\n",
        )
        .unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.storage.data_dir, "/var/lib/medsched");
        assert_eq!(config.jwt.expire_secs, 86400);
        assert!(config.seed.path.is_none());
    }

    #[test]
    fn load_missing_file_fails() {
        let err = ServerConfig::load(Path::new("/nonexistent/medsched.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn toml_roundtrip() {
        let config = ServerConfig {
            storage: StorageConfig { data_dir: "/data".into() },
            jwt: JwtConfig { secret: "k".into(), expire_secs: 60 },
            seed: SeedConfig { path: Some("/data/seed.toml".into()) },
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let back: ServerConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.seed.path.as_deref(), Some("/data/seed.toml"));
        assert_eq!(back.jwt.expire_secs, 60);
    }
}
