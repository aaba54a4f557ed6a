//! Structures: partial desired state of a node.
//!
//! Every field is optional. An absent field leaves the node alone; a present
//! one is applied. Fields that can be cleared (`type`, `initializer`) are
//! doubly optional: JSON `null` clears, a string sets.
//!
//! ```json
//! { "name": "Point", "isExported": true, "type": null }
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// Distinguish an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedNodeStructure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportableNodeStructure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_exported: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default_export: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbientableNodeStructure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_declare_keyword: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbstractableNodeStructure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_abstract: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsyncableNodeStructure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_async: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedNodeStructure {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_text: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializerExpressionableNodeStructure {
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub initializer: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClassDeclarationStructure {
    #[serde(flatten)]
    pub named: NamedNodeStructure,
    #[serde(flatten)]
    pub exportable: ExportableNodeStructure,
    #[serde(flatten)]
    pub abstractable: AbstractableNodeStructure,
    #[serde(flatten)]
    pub ambientable: AmbientableNodeStructure,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FunctionDeclarationStructure {
    #[serde(flatten)]
    pub named: NamedNodeStructure,
    #[serde(flatten)]
    pub exportable: ExportableNodeStructure,
    #[serde(flatten)]
    pub asyncable: AsyncableNodeStructure,
    #[serde(flatten)]
    pub ambientable: AmbientableNodeStructure,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct InterfaceDeclarationStructure {
    #[serde(flatten)]
    pub named: NamedNodeStructure,
    #[serde(flatten)]
    pub exportable: ExportableNodeStructure,
    #[serde(flatten)]
    pub ambientable: AmbientableNodeStructure,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDeclarationStructure {
    #[serde(flatten)]
    pub named: NamedNodeStructure,
    #[serde(flatten)]
    pub exportable: ExportableNodeStructure,
    #[serde(flatten)]
    pub ambientable: AmbientableNodeStructure,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_const: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TypeAliasDeclarationStructure {
    #[serde(flatten)]
    pub named: NamedNodeStructure,
    #[serde(flatten)]
    pub typed: TypedNodeStructure,
    #[serde(flatten)]
    pub exportable: ExportableNodeStructure,
    #[serde(flatten)]
    pub ambientable: AmbientableNodeStructure,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct VariableStatementStructure {
    #[serde(flatten)]
    pub exportable: ExportableNodeStructure,
    #[serde(flatten)]
    pub ambientable: AmbientableNodeStructure,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct VariableDeclarationStructure {
    #[serde(flatten)]
    pub named: NamedNodeStructure,
    #[serde(flatten)]
    pub typed: TypedNodeStructure,
    #[serde(flatten)]
    pub initializer: InitializerExpressionableNodeStructure,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParameterDeclarationStructure {
    #[serde(flatten)]
    pub named: NamedNodeStructure,
    #[serde(flatten)]
    pub initializer: InitializerExpressionableNodeStructure,
    #[serde(flatten)]
    pub typed: TypedNodeStructure,
}
