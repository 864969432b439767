//! Turns an API answer into output items.

use serde_json::{json, Value};

use nodes::NodeItem;

/// Field a non-object answer is wrapped under.
pub const SCALAR_FIELD: &str = "response";

/// One item per array element (order kept), one item for an object, otherwise
/// one item wrapping the value under [`SCALAR_FIELD`]. Every item is paired
/// with input item `item_index`.
pub fn normalize_response(response: Value, item_index: usize) -> Vec<NodeItem> {
    match response {
        Value::Array(values) => values
            .into_iter()
            .map(|v| NodeItem::paired(v, item_index))
            .collect(),
        obj @ Value::Object(_) => vec![NodeItem::paired(obj, item_index)],
        scalar => vec![NodeItem::paired(json!({ SCALAR_FIELD: scalar }), item_index)],
    }
}
