use std::path::PathBuf;

use serde::Deserialize;

use super::Config;

/// Settings for the token benchmark harness.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HarnessConfig {
    /// Port the token service binds on localhost. `0` picks a free port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Modulus size of the generated RSA key.
    #[serde(default = "default_rsa_bits")]
    pub rsa_bits: usize,

    /// Where the measured dataset is written.
    #[serde(default = "default_results")]
    pub results: PathBuf,
}

fn default_port() -> u16 {
    8080
}

fn default_rsa_bits() -> usize {
    2048
}

fn default_results() -> PathBuf {
    PathBuf::from("result.csv")
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            rsa_bits: default_rsa_bits(),
            results: default_results(),
        }
    }
}

impl Config for HarnessConfig {
    const PREFIX: &'static str = "HARNESS";
}
