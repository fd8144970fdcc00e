//! Configuration management
//!
//! Settings live in an INI file (`~/.dsynth.cfg` by default). Command-line
//! flags override anything read here.

use crate::audio::{AudioFormat, SampleWidth};
use crate::synth::SynthSettings;
use crate::{Result, SynthError};
use ini::Ini;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Synthesizer configuration
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path
    path: PathBuf,
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from `path`, creating it with defaults if missing
    ///
    /// A default file that cannot be written is reported and the defaults are
    /// used from memory.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| SynthError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            if let Err(e) = default.write_to_file(&path) {
                warn!("Could not write default config to {:?}: {}", path, e);
            }
            default
        };

        Ok(Self { ini, path })
    }

    /// Configuration with built-in defaults and no backing file on disk yet
    pub fn defaults() -> Self {
        Self {
            ini: Self::default_config(),
            path: Self::config_path(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| SynthError::Config(format!("Failed to save config: {}", e)))
    }

    /// Default config file path (~/.dsynth.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".dsynth.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("paths"))
            .set("diphones", "./diphones")
            .set("dictionary", "./cmudict.dict");

        ini.with_section(Some("synth"))
            .set("crossfade", "false")
            .set("overlap_ms", "10")
            .set("sample_rate", "16000")
            .set("sample_width", "16");

        ini.with_section(Some("output"));

        ini
    }

    /// Get a boolean value from config
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get a float value from config
    pub fn get_float(&self, section: &str, key: &str, default: f64) -> f64 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Directory holding one WAV file per diphone
    pub fn diphones_dir(&self) -> PathBuf {
        PathBuf::from(self.get_string("paths", "diphones", "./diphones"))
    }

    /// Pronunciation dictionary file
    pub fn dictionary_path(&self) -> PathBuf {
        PathBuf::from(self.get_string("paths", "dictionary", "./cmudict.dict"))
    }

    /// Crossfade units unless overridden on the command line
    pub fn crossfade(&self) -> bool {
        self.get_bool("synth", "crossfade", false)
    }

    /// Crossfade overlap in milliseconds
    ///
    /// Negative values fall back to the 10 ms default.
    pub fn overlap_ms(&self) -> f64 {
        let ms = self.get_float("synth", "overlap_ms", 10.0);
        if ms.is_finite() && ms >= 0.0 {
            ms
        } else {
            warn!("Ignoring invalid overlap_ms {}", ms);
            10.0
        }
    }

    /// Output format used when the diphone library is empty
    pub fn fallback_format(&self) -> AudioFormat {
        let rate = u32::try_from(self.get_int("synth", "sample_rate", 16_000))
            .ok()
            .filter(|&r| r > 0)
            .unwrap_or(16_000);
        let width = u16::try_from(self.get_int("synth", "sample_width", 16))
            .ok()
            .and_then(SampleWidth::from_bits)
            .unwrap_or(SampleWidth::I16);
        AudioFormat::new(rate, width)
    }

    /// Synthesizer tunables derived from the `[synth]` section
    pub fn synth_settings(&self) -> SynthSettings {
        SynthSettings {
            overlap_seconds: self.overlap_ms() / 1000.0,
            fallback_format: self.fallback_format(),
        }
    }

    /// Default volume as written in the config (validated at use)
    pub fn volume(&self) -> Option<String> {
        self.ini
            .get_from(Some("output"), "volume")
            .map(|v| v.to_string())
    }

    /// Preferred audio player executable
    pub fn player(&self) -> Option<String> {
        self.ini
            .get_from(Some("output"), "player")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
