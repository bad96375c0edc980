use log::info;

use crate::errors::{Result, UploaderError};

pub const DEFAULT_TRANSPORT: &str = "paper";
pub const DEFAULT_BUS_DOMAIN: &str = "merlin";

/// Process-level settings for the uploader binary. The library crates
/// never read these; collaborators built from them are passed down.
#[derive(Debug, Clone)]
pub struct Settings {
    pub transport: String,
    pub bus_domain: String,
}

impl Settings {
    /// Loads TOML settings; a missing file yields the defaults.
    pub fn load(filepath: &str) -> Result<Self> {
        let settings = config::builder::ConfigBuilder::<config::builder::DefaultState>::default()
            .add_source(
                config::File::with_name(filepath)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .build()
            .map_err(|e| UploaderError::settings(e.to_string()))?;

        let transport = settings
            .get("transport")
            .unwrap_or_else(|_| DEFAULT_TRANSPORT.to_string());
        let bus_domain = settings
            .get("bus.domain")
            .unwrap_or_else(|_| DEFAULT_BUS_DOMAIN.to_string());
        info!("settings: transport={} bus.domain={}", transport, bus_domain);

        Ok(Settings {
            transport,
            bus_domain,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_load_toml_settings() {
        let mut tempfile = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(tempfile, "transport = \"paper\"\n\n[bus]\ndomain = \"hpt\"").unwrap();
        let settings = Settings::load(tempfile.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.transport, "paper");
        assert_eq!(settings.bus_domain, "hpt");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = Settings::load("does/not/exist/uploader.toml").unwrap();
        assert_eq!(settings.transport, DEFAULT_TRANSPORT);
        assert_eq!(settings.bus_domain, DEFAULT_BUS_DOMAIN);
    }
}
