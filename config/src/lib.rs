use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

mod error;

pub mod harness;
pub mod plot;

pub use error::Error;
pub use harness::HarnessConfig;
pub use plot::{PlotConfig, Scheme, TRIAL_COUNT};

const CARGO_MANIFEST_DIR: &str = env!("CARGO_MANIFEST_DIR");
const CONFIG_ENV_PREFIX: &str = "JWT_BENCH";

/// Configuration read from `JWT_BENCH_<PREFIX>_*` environment variables.
///
/// Base values are loaded from `.config.env` next to this crate's manifest
/// first; variables already present in the environment take precedence.
pub trait Config: DeserializeOwned {
    const PREFIX: &'static str;

    fn from_env() -> Result<Self, Error> {
        let prefix = format!("{}_{}", CONFIG_ENV_PREFIX, Self::PREFIX);
        let _result = dotenvy::from_path(config_env_path());

        // don't bail in tests.
        #[cfg(not(test))]
        _result?;

        Ok(config::Config::builder()
            .add_source(config::Environment::with_prefix(&prefix).try_parsing(true))
            .build()?
            .try_deserialize()?)
    }
}

#[doc(hidden)]
pub fn config_env_path() -> PathBuf {
    Path::new(CARGO_MANIFEST_DIR).join(".config.env")
}
