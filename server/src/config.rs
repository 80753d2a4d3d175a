use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Deserialize, Debug, PartialEq)]
#[serde(rename = "QueryTubeConfig", default)]
pub struct Config {
    /// wasm-bindgen output for the frontend, served under `/pkg`.
    pub assets: PathBuf,
    /// Stylesheets and friends, served under `/static`.
    pub static_dir: PathBuf,
    /// How many candidates to ask the video API for.
    pub max_results: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            assets: PathBuf::from("frontend/pkg"),
            static_dir: PathBuf::from("frontend/static"),
            max_results: 10,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("error reading: {source}")]
    IO {
        #[from]
        source: io::Error,
    },
    #[error("error parsing: {source}")]
    Parse {
        #[from]
        source: ron::Error,
    },
}

impl Config {
    pub fn load(filename: &Path) -> Result<Config, ConfigError> {
        let file = File::open(filename)?;
        let config: Config = ron::de::from_reader(file)?;
        Ok(config)
    }
}
