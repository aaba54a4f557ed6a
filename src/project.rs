use std::collections::BTreeMap;

use log::debug;

use crate::config::{Settings, load_user_settings};
use crate::error::{MorphError, MorphResult};
use crate::file::SourceFile;

/// Source files sharing one set of settings.
#[derive(Debug, Default)]
pub struct Project {
    settings: Settings,
    files: BTreeMap<String, SourceFile>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            files: BTreeMap::new(),
        }
    }

    /// A project configured from the user's `katachi.toml`, or defaults.
    pub fn from_user_config() -> MorphResult<Self> {
        Ok(Self::with_settings(load_user_settings()?))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Parse `text` as a new file. Fails if `name` is taken.
    pub fn create_source_file(
        &mut self,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> MorphResult<&mut SourceFile> {
        let name = name.into();
        if self.files.contains_key(&name) {
            return Err(MorphError::invalid_operation(format!(
                "a source file named `{name}` already exists"
            )));
        }

        let file = SourceFile::new(name.clone(), text, self.settings.clone())?;
        debug!(target: "katachi::manipulation", "Added {} to project", name);
        Ok(self.files.entry(name).or_insert(file))
    }

    pub fn source_file(&self, name: &str) -> Option<&SourceFile> {
        self.files.get(name)
    }

    pub fn source_file_mut(&mut self, name: &str) -> Option<&mut SourceFile> {
        self.files.get_mut(name)
    }

    pub fn source_file_or_throw(&self, name: &str) -> MorphResult<&SourceFile> {
        self.source_file(name)
            .ok_or_else(|| MorphError::not_found(format!("no source file named `{name}`")))
    }

    pub fn remove_source_file(&mut self, name: &str) -> Option<SourceFile> {
        self.files.remove(name)
    }

    /// Files in name order.
    pub fn source_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReparseStrategy;
    use crate::syntax::Dialect;

    #[test]
    fn test_create_and_lookup() {
        let mut project = Project::new();
        project.create_source_file("b.ts", "class B {}").unwrap();
        project.create_source_file("a.ts", "class A {}").unwrap();
        let names: Vec<&str> = project.source_files().map(SourceFile::name).collect();
        assert_eq!(names, vec!["a.ts", "b.ts"]);
        assert!(project.source_file("a.ts").is_some());
        assert!(matches!(
            project.source_file_or_throw("c.ts"),
            Err(MorphError::NotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut project = Project::new();
        project.create_source_file("a.ts", "").unwrap();
        assert!(matches!(
            project.create_source_file("a.ts", ""),
            Err(MorphError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_files_inherit_settings() {
        let settings = Settings {
            dialect: Dialect::Tsx,
            reparse: ReparseStrategy::Full,
            ..Default::default()
        };
        let mut project = Project::with_settings(settings.clone());
        let file = project.create_source_file("a.ts", "const a = <b />;").unwrap();
        assert_eq!(file.settings(), &settings);
        assert_eq!(file.dialect(), Dialect::Tsx);
        assert!(file.diagnostics().is_empty());
    }

    #[test]
    fn test_remove_source_file() {
        let mut project = Project::new();
        project.create_source_file("a.ts", "let a;").unwrap();
        let removed = project.remove_source_file("a.ts").unwrap();
        assert_eq!(removed.text(), "let a;");
        assert!(project.source_file("a.ts").is_none());
    }
}
