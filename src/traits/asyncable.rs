use crate::error::MorphResult;
use crate::file::SourceFile;
use crate::node::AnyNode;
use crate::structures::AsyncableNodeStructure;
use crate::syntax::ModifierKind;
use crate::traits::ModifierableNode;

pub trait AsyncableNode: ModifierableNode {
    fn is_async(&self, file: &SourceFile) -> MorphResult<bool> {
        self.has_modifier(file, ModifierKind::Async)
    }

    fn async_keyword(&self, file: &SourceFile) -> MorphResult<Option<AnyNode>> {
        self.first_modifier_by_kind(file, ModifierKind::Async)
    }

    fn async_keyword_or_throw(&self, file: &SourceFile) -> MorphResult<AnyNode> {
        self.first_modifier_by_kind_or_throw(file, ModifierKind::Async)
    }

    fn set_is_async(&self, file: &mut SourceFile, value: bool) -> MorphResult<Self> {
        self.toggle_modifier(file, ModifierKind::Async, Some(value))
    }

    fn fill_asyncable(
        &self,
        file: &mut SourceFile,
        structure: &AsyncableNodeStructure,
    ) -> MorphResult<()> {
        if let Some(value) = structure.is_async {
            self.set_is_async(file, value)?;
        }
        Ok(())
    }
}
