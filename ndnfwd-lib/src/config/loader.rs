use std::fs;
use std::path::Path;

use super::Config;
use crate::error::{NdnfwdError, Result};

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let text = fs::read_to_string(path)
        .map_err(|e| NdnfwdError::Config(format!("failed to read config file: {e}")))?;
    let cfg: Config =
        toml::from_str(&text).map_err(|e| NdnfwdError::Config(format!("failed to parse config: {e}")))?;

    validate_config(&cfg)?;
    Ok(cfg)
}

fn validate_config(cfg: &Config) -> Result<()> {
    if cfg.userspace_fallback_threshold > 100 {
        return Err(NdnfwdError::Config(format!(
            "userspace_fallback_threshold must be in 0..=100, got {}",
            cfg.userspace_fallback_threshold
        )));
    }
    if cfg.cs_max_size_bytes == 0 {
        return Err(NdnfwdError::Config("cs_max_size_bytes must be non-zero".into()));
    }
    if cfg.cs_capacity == 0 || cfg.pit_capacity == 0 || cfg.nonce_capacity == 0 {
        return Err(NdnfwdError::Config("table capacities must be non-zero".into()));
    }
    if cfg.hash_cap_bytes == 0 {
        return Err(NdnfwdError::Config("hash_cap_bytes must be non-zero".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tmp_path(name: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("ndnfwd-{nanos}-{name}.toml"))
    }

    #[test]
    fn loads_minimal_config_with_defaults() -> Result<()> {
        let path = tmp_path("minimal");
        fs::write(&path, "").map_err(NdnfwdError::Io)?;
        let cfg = load_from_path(&path)?;
        assert!(cfg.cs_enabled);
        assert!(cfg.pit_enabled);
        assert_eq!(cfg.userspace_fallback_threshold, 0);
        assert_eq!(cfg.cs_capacity, 32_768);
        Ok(())
    }

    #[test]
    fn loads_overridden_fields() -> Result<()> {
        let path = tmp_path("overrides");
        let toml = r#"
hash_algorithm = "murmur"
cs_enabled = false
userspace_fallback_threshold = 10
cs_max_size_bytes = 4096
"#;
        fs::write(&path, toml).map_err(NdnfwdError::Io)?;
        let cfg = load_from_path(&path)?;
        assert!(!cfg.cs_enabled);
        assert_eq!(cfg.userspace_fallback_threshold, 10);
        assert_eq!(cfg.cs_max_size_bytes, 4096);
        Ok(())
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let path = tmp_path("bad-threshold");
        fs::write(&path, "userspace_fallback_threshold = 101").unwrap();
        assert!(load_from_path(&path).is_err());
    }
}
