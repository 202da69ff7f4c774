use serde::{Deserialize, Serialize};

/// An item listed in a category's index section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStub {
    /// Display name of the item (e.g. `ta.sma`)
    pub name: String,

    /// Absolute URL of the item, fragment included
    pub url: String,

    /// In-page anchor of the item's detail block (Functions and Variables only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

/// A single function argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Extracted fields of a function's detail block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDetail {
    /// Raw markup of the whole detail block
    pub info: String,
    pub description: String,
    pub syntax: String,
    /// Text after the last `→` in `syntax`
    pub return_type: String,
    pub returns: String,
    pub arguments: Vec<Argument>,
}

/// Extracted fields of a variable's detail block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDetail {
    /// Raw markup of the whole detail block
    pub info: String,
    pub description: String,
    #[serde(rename = "type")]
    pub type_name: String,
    /// Markup of each remark paragraph, in order
    pub remarks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    #[serde(flatten)]
    pub stub: ItemStub,
    #[serde(flatten)]
    pub detail: FunctionDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRecord {
    #[serde(flatten)]
    pub stub: ItemStub,
    #[serde(flatten)]
    pub detail: VariableDetail,
}

/// One entry of a category artifact
///
/// Serialized untagged: a function record is a flat object with the stub
/// fields followed by the detail fields; a generic record is the stub alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Function(FunctionRecord),
    Variable(VariableRecord),
    Generic(ItemStub),
}

impl Record {
    /// Returns the stub fields common to every record
    pub fn stub(&self) -> &ItemStub {
        match self {
            Record::Function(r) => &r.stub,
            Record::Variable(r) => &r.stub,
            Record::Generic(stub) => stub,
        }
    }

    pub fn name(&self) -> &str {
        &self.stub().name
    }

    pub fn as_function(&self) -> Option<&FunctionRecord> {
        match self {
            Record::Function(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableRecord> {
        match self {
            Record::Variable(r) => Some(r),
            _ => None,
        }
    }
}
