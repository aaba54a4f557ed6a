use crate::error::{MorphError, MorphResult};
use crate::file::SourceFile;
use crate::manipulation::remove_nodes;
use crate::node::{AnyNode, AstNode};
use crate::structures::ExportableNodeStructure;
use crate::syntax::ModifierKind;
use crate::traits::ModifierableNode;

/// Declarations that can be exported from their file.
///
/// A file has at most one default export. Making a node the default export
/// first strips default-export status from whatever currently holds it.
pub trait ExportableNode: ModifierableNode {
    fn has_export_keyword(&self, file: &SourceFile) -> MorphResult<bool> {
        self.has_modifier(file, ModifierKind::Export)
    }

    fn export_keyword(&self, file: &SourceFile) -> MorphResult<Option<AnyNode>> {
        self.first_modifier_by_kind(file, ModifierKind::Export)
    }

    fn export_keyword_or_throw(&self, file: &SourceFile) -> MorphResult<AnyNode> {
        self.first_modifier_by_kind_or_throw(file, ModifierKind::Export)
    }

    fn has_default_keyword(&self, file: &SourceFile) -> MorphResult<bool> {
        self.has_modifier(file, ModifierKind::Default)
    }

    fn default_keyword(&self, file: &SourceFile) -> MorphResult<Option<AnyNode>> {
        self.first_modifier_by_kind(file, ModifierKind::Default)
    }

    fn default_keyword_or_throw(&self, file: &SourceFile) -> MorphResult<AnyNode> {
        self.first_modifier_by_kind_or_throw(file, ModifierKind::Default)
    }

    /// Whether this node is the default export of its file, either by its
    /// own `default` keyword or through the file's default export symbol.
    fn is_default_export(&self, file: &SourceFile) -> MorphResult<bool> {
        if self.has_default_keyword(file)? {
            return Ok(true);
        }

        let (Some(default), Some(symbol)) = (file.default_export_symbol(), self.symbol(file)?)
        else {
            return Ok(false);
        };
        if symbol == default {
            return Ok(true);
        }
        let aliased = file
            .symbols()
            .aliased_symbol(default, file.settings().alias_resolution);
        Ok(aliased == Some(symbol))
    }

    /// Exported under its own name from the top level of the file.
    fn is_named_export(&self, file: &SourceFile) -> MorphResult<bool> {
        Ok(self.parent_or_throw(file)?.is_source_file(file)?
            && self.has_export_keyword(file)?
            && !self.has_default_keyword(file)?)
    }

    fn set_is_default_export(&self, file: &mut SourceFile, value: bool) -> MorphResult<Self> {
        if value == self.is_default_export(file)? {
            return Ok(*self);
        }
        if value && !self.parent_or_throw(file)?.is_source_file(file)? {
            return Err(MorphError::invalid_operation(
                "the parent must be a source file in order to set a default export",
            ));
        }

        if file.default_export_symbol().is_some() {
            file.remove_default_export()?;
        }
        if value {
            self.add_modifier(file, ModifierKind::Export)?;
            self.add_modifier(file, ModifierKind::Default)?;
        }
        Ok(*self)
    }

    fn set_is_exported(&self, file: &mut SourceFile, value: bool) -> MorphResult<Self> {
        if self.parent_or_throw(file)?.is_source_file(file)? {
            self.set_is_default_export(file, false)?;
        }

        if value {
            if !self.has_export_keyword(file)? {
                self.add_modifier(file, ModifierKind::Export)?;
            }
        } else if let Some(keyword) = self.export_keyword(file)? {
            remove_nodes(file, &[keyword.id()])?;
        }
        Ok(*self)
    }

    fn fill_exportable(
        &self,
        file: &mut SourceFile,
        structure: &ExportableNodeStructure,
    ) -> MorphResult<()> {
        if let Some(exported) = structure.is_exported {
            // `isDefaultExport` is applied last and wins, so a node that
            // already is the default export keeps its keywords
            let stays_default =
                structure.is_default_export == Some(true) && self.is_default_export(file)?;
            if !stays_default {
                self.set_is_exported(file, exported)?;
            }
        }
        if let Some(default) = structure.is_default_export {
            self.set_is_default_export(file, default)?;
        }
        Ok(())
    }
}
