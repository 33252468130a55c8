use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to load base values: {0}")]
    DotEnv(#[from] dotenvy::Error),
}
