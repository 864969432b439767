//! Items flowing between nodes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Points an output item back at the input item that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    pub item: usize,
}

/// One unit of data passed between nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeItem {
    pub json: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_item: Option<PairedItem>,
}

impl NodeItem {
    /// An input item with no lineage.
    pub fn new(json: Value) -> Self {
        Self {
            json,
            paired_item: None,
        }
    }

    /// An output item produced from input item `index`.
    pub fn paired(json: Value, index: usize) -> Self {
        Self {
            json,
            paired_item: Some(PairedItem { item: index }),
        }
    }

    /// An input item carrying an empty JSON object.
    pub fn empty() -> Self {
        Self::new(Value::Object(Map::new()))
    }
}
