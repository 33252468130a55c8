use std::fmt;
use std::path::PathBuf;

/// Number of trials recorded per scheme.
pub const TRIAL_COUNT: usize = 50;

/// Token signing schemes under comparison, in canonical order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Scheme {
    Rsa,
    Ecdsa,
    Hmac,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Rsa, Scheme::Ecdsa, Scheme::Hmac];

    /// Display name used in chart legends.
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::Rsa => "RSA",
            Scheme::Ecdsa => "ECDSA",
            Scheme::Hmac => "HMAC",
        }
    }

    /// Route the token service issues this scheme's tokens on.
    pub fn route(&self) -> &'static str {
        match self {
            Scheme::Rsa => "/rsa",
            Scheme::Ecdsa => "/ecdsa",
            Scheme::Hmac => "/hmac",
        }
    }

    pub fn from_route(route: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scheme| scheme.route() == route)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs shared by the results parser and the chart renderer.
///
/// `schemes` fixes both the number of groups expected in the results file and
/// the label each group is plotted under.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub trials: usize,
    pub schemes: Vec<Scheme>,
    pub input: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            trials: TRIAL_COUNT,
            schemes: Scheme::ALL.to_vec(),
            input: PathBuf::from("result.csv"),
            output_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_round_trip() {
        for scheme in Scheme::ALL {
            assert_eq!(Scheme::from_route(scheme.route()), Some(scheme));
        }
        assert_eq!(Scheme::from_route("/none"), None);
    }

    #[test]
    fn default_plot_config() {
        let config = PlotConfig::default();
        assert_eq!(config.trials, 50);
        assert_eq!(config.schemes, vec![Scheme::Rsa, Scheme::Ecdsa, Scheme::Hmac]);
        assert_eq!(config.input, PathBuf::from("result.csv"));
    }
}
