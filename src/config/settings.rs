use serde::{Deserialize, Serialize};

use crate::syntax::Dialect;

/// How far default-export alias symbols are chased when deciding whether a
/// declaration is the default export of its file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AliasResolution {
    /// Follow exactly one level of alias indirection
    SingleHop,
    /// Follow aliases until a non-alias symbol is reached (cycle-safe)
    #[default]
    Transitive,
}

/// How the tree is rebuilt after a text edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReparseStrategy {
    /// Edit the previous tree and let tree-sitter reuse unchanged subtrees
    #[default]
    Incremental,
    /// Parse the whole buffer from scratch
    Full,
}

/// Settings shared by every source file of a project.
///
/// ```toml
/// dialect = "tsx"
/// alias-resolution = "single-hop"
/// reparse = "full"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub dialect: Dialect,
    pub alias_resolution: AliasResolution,
    pub reparse: ReparseStrategy,
}

impl Settings {
    /// Parse settings from TOML text. Missing keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.alias_resolution, AliasResolution::Transitive);
        assert_eq!(settings.reparse, ReparseStrategy::Incremental);
        assert_eq!(settings.dialect, Dialect::TypeScript);
    }

    #[test]
    fn test_all_keys_are_read() {
        let settings = Settings::from_toml(
            r#"
dialect = "tsx"
alias-resolution = "single-hop"
reparse = "full"
"#,
        )
        .unwrap();
        assert_eq!(settings.dialect, Dialect::Tsx);
        assert_eq!(settings.alias_resolution, AliasResolution::SingleHop);
        assert_eq!(settings.reparse, ReparseStrategy::Full);
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        assert!(Settings::from_toml(r#"reparse = "sometimes""#).is_err());
    }
}
