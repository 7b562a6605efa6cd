//! Permission input: one permission string or several.

use serde::{Deserialize, Serialize};

/// The permission(s) an action or column requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Permission {
    /// A single permission string.
    One(String),
    /// Several permission strings.
    Many(Vec<String>),
}

impl Permission {
    /// The permission strings in declaration order.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(p) => std::slice::from_ref(p),
            Self::Many(ps) => ps,
        }
    }

    /// Whether no permission string is required.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl From<&str> for Permission {
    fn from(p: &str) -> Self {
        Self::One(p.to_string())
    }
}

impl From<String> for Permission {
    fn from(p: String) -> Self {
        Self::One(p)
    }
}

impl From<Vec<String>> for Permission {
    fn from(ps: Vec<String>) -> Self {
        Self::Many(ps)
    }
}

impl From<Vec<&str>> for Permission {
    fn from(ps: Vec<&str>) -> Self {
        Self::Many(ps.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Permission {
    fn from(ps: &[&str]) -> Self {
        Self::Many(ps.iter().map(|p| p.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Permission {
    fn from(ps: [&str; N]) -> Self {
        Self::Many(ps.iter().map(|p| p.to_string()).collect())
    }
}
