use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Operating system a run definition targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Host {
    Linux,
    Windows,
    Macos,
    Other,
}

impl Host {
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Macos
        } else {
            Self::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Windows => "windows",
            Self::Macos => "macos",
            Self::Other => "other",
        }
    }
}

impl Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names() {
        assert_eq!(serde_json::to_string(&Host::Macos).unwrap(), "\"macos\"");
        assert_eq!(
            serde_json::from_str::<Host>("\"windows\"").unwrap(),
            Host::Windows
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn current_linux() {
        assert_eq!(Host::current(), Host::Linux);
    }
}
