use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// What a manifest read does when `index.json` exists but cannot be parsed
/// or read.
///
/// `ReturnEmpty` is the compatible default: the folder is treated as having
/// no items, and the next write replaces the unreadable file, losing
/// whatever it held. `Fail` surfaces the problem as an error instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptManifestPolicy {
    #[default]
    ReturnEmpty,
    Fail,
}

impl FromStr for CorruptManifestPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "return_empty" | "empty" => Ok(CorruptManifestPolicy::ReturnEmpty),
            "fail" => Ok(CorruptManifestPolicy::Fail),
            _ => Err(anyhow::anyhow!("Invalid corrupt manifest policy: {}", s)),
        }
    }
}

impl Display for CorruptManifestPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CorruptManifestPolicy::ReturnEmpty => write!(f, "return_empty"),
            CorruptManifestPolicy::Fail => write!(f, "fail"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse() {
        assert_eq!(
            "return_empty".parse::<CorruptManifestPolicy>().unwrap(),
            CorruptManifestPolicy::ReturnEmpty
        );
        assert_eq!(
            "FAIL".parse::<CorruptManifestPolicy>().unwrap(),
            CorruptManifestPolicy::Fail
        );
        assert!("retry".parse::<CorruptManifestPolicy>().is_err());
    }
}
