use aqm0802_lcd::settings::{DEFAULT_CONTRAST, MAX_CONTRAST};
use dotenv::var;
use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

/// Settings persisted between runs.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq)]
pub struct Config {
    /// Contrast last chosen from the menu, applied after initialization.
    pub contrast: u8,
}

impl Config {
    /// Location of the config file, `CONFIG_FILE` or `config.json` in the working directory.
    pub fn path() -> PathBuf {
        PathBuf::from(var("CONFIG_FILE").unwrap_or_else(|_| "config.json".to_string()))
    }

    /// Loads the config from [Self::path].
    ///
    /// Returns `Ok(None)` only if the file doesn't exist. A file that can't be read or parsed is
    /// an error, so it never gets overwritten with the defaults.
    pub fn try_load() -> eyre::Result<Option<Self>> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> eyre::Result<Option<Self>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).wrap_err_with(|| format!("cannot open {}", path.display()));
            }
        };
        let mut config: Config = serde_json::from_reader(BufReader::new(file))
            .wrap_err_with(|| format!("invalid config file {}", path.display()))?;
        config.contrast = config.contrast.min(MAX_CONTRAST);
        Ok(Some(config))
    }

    pub fn save(&self) -> eyre::Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> eyre::Result<()> {
        let file =
            File::create(path).wrap_err_with(|| format!("cannot create {}", path.display()))?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            contrast: DEFAULT_CONTRAST,
        }
    }
}

/// Parses an I²C address given either in hex (`0x3E`) or in decimal.
pub fn parse_address(address: &str) -> eyre::Result<u8> {
    let address = address.trim();
    let value = match address.strip_prefix("0x").or_else(|| address.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16)?,
        None => address.parse()?,
    };
    if value > 0x7F {
        return Err(eyre::eyre!("I2C address 0x{:02X} is not a 7-bit address", value));
    }
    Ok(value)
}
