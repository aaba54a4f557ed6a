use crate::error::MorphResult;
use crate::file::SourceFile;
use crate::node::AnyNode;
use crate::structures::AbstractableNodeStructure;
use crate::syntax::ModifierKind;
use crate::traits::ModifierableNode;

pub trait AbstractableNode: ModifierableNode {
    fn is_abstract(&self, file: &SourceFile) -> MorphResult<bool> {
        self.has_modifier(file, ModifierKind::Abstract)
    }

    fn abstract_keyword(&self, file: &SourceFile) -> MorphResult<Option<AnyNode>> {
        self.first_modifier_by_kind(file, ModifierKind::Abstract)
    }

    fn abstract_keyword_or_throw(&self, file: &SourceFile) -> MorphResult<AnyNode> {
        self.first_modifier_by_kind_or_throw(file, ModifierKind::Abstract)
    }

    fn set_is_abstract(&self, file: &mut SourceFile, value: bool) -> MorphResult<Self> {
        self.toggle_modifier(file, ModifierKind::Abstract, Some(value))
    }

    fn fill_abstractable(
        &self,
        file: &mut SourceFile,
        structure: &AbstractableNodeStructure,
    ) -> MorphResult<()> {
        if let Some(value) = structure.is_abstract {
            self.set_is_abstract(file, value)?;
        }
        Ok(())
    }
}
