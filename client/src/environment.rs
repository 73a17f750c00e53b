use std::{fmt::Display, str::FromStr};

/// Deployment target of the MobileNig API. Only affects path routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Live,
    Test,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Live => "LIVE",
            Environment::Test => "TEST",
        }
    }
}

impl AsRef<str> for Environment {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown environment: {0}")]
pub struct UnknownEnvironment(pub String);

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    /// Matches `"LIVE"` and `"TEST"` exactly; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LIVE" => Ok(Environment::Live),
            "TEST" => Ok(Environment::Test),
            other => Err(UnknownEnvironment(other.to_string())),
        }
    }
}
