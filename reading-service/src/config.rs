use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// JSON array document (the document-database style layout).
    Json,
    /// The original flat CSV file.
    Csv,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                kind: StoreKind::Json,
                path: "readings.json".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load from the file named by `READINGS_CONFIG`, falling back to
    /// `readings-config.toml` in the working directory. No config file at
    /// all means the default JSON store; a file that exists but does not
    /// parse is an error.
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        if let Ok(path) = env::var("READINGS_CONFIG") {
            let contents = fs::read_to_string(&path)?;
            return Ok(toml::from_str(&contents)?);
        }

        match fs::read_to_string("readings-config.toml") {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_store_section() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [store]
            kind = "csv"
            path = "readings.csv"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.store.kind, StoreKind::Csv);
        assert_eq!(cfg.store.path, "readings.csv");
    }

    #[test]
    fn default_is_a_json_store() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.store.kind, StoreKind::Json);
        assert_eq!(cfg.store.path, "readings.json");
    }
}
