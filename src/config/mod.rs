use serde::Deserialize;
use std::path::PathBuf;

fn default_marker() -> bool {
    false
}
fn default_verbose() -> bool {
    false
}

/// Settings read from an optional TOML config file. CLI flags always win
/// over the file, the file over built-in defaults.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default = "default_marker")]
    pub marker: bool,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub icon: Option<PathBuf>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("kmlcentroid.toml"));
    paths.push(PathBuf::from(".kmlcentroid.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("kmlcentroid").join("config.toml"));
        paths.push(config_dir.join("kmlcentroid.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".kmlcentroid.toml"));
        paths.push(home.join(".config").join("kmlcentroid").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: FileConfig = toml::from_str(
            r#"
marker = true
output = "marked.kml"
icon = "cross.svg"
verbose = true
"#,
        )
        .unwrap();

        assert!(config.marker);
        assert_eq!(config.output, Some(PathBuf::from("marked.kml")));
        assert_eq!(config.icon, Some(PathBuf::from("cross.svg")));
        assert!(config.verbose);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(!config.marker);
        assert!(config.output.is_none());
        assert!(config.icon.is_none());
        assert!(!config.verbose);
    }
}
