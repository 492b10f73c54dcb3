//! UNO command names and argument payload builders.
//!
//! UNO dispatch arguments are flat JSON objects whose values carry an
//! explicit `{"type", "value"}` wrapper, e.g.
//!
//! ```json
//! {"ToPoint": {"type": "string", "value": "$B$2"}}
//! ```

use serde_json::{json, Value};

pub const CMD_GOTO_CELL: &str = ".uno:GoToCell";
pub const CMD_INSERT_GRAPHIC: &str = ".uno:InsertGraphic";
pub const CMD_ADD_SHEET: &str = ".uno:Add";
pub const CMD_SAVE: &str = ".uno:Save";

/// Arguments for `.uno:GoToCell`, targeting `$column$row`.
pub fn goto_cell_args(column: &str, row: &str) -> Value {
    json!({
        "ToPoint": {
            "type": "string",
            "value": format!("${column}${row}"),
        }
    })
}

/// Arguments for `.uno:InsertGraphic`, taking a `file://` URL.
pub fn insert_graphic_args(file_url: &str) -> Value {
    json!({
        "FileName": {
            "type": "string",
            "value": file_url,
        }
    })
}

/// Arguments for `.uno:Add` (append a named spreadsheet sheet).
pub fn add_sheet_args(name: &str) -> Value {
    json!({
        "Name": {
            "type": "string",
            "value": name,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn goto_cell_payload_shape() {
        assert_eq!(
            goto_cell_args("A", "1"),
            json!({"ToPoint": {"type": "string", "value": "$A$1"}})
        );
    }

    #[test]
    fn insert_graphic_payload_shape() {
        assert_eq!(
            insert_graphic_args("file:///tmp/shot.png"),
            json!({"FileName": {"type": "string", "value": "file:///tmp/shot.png"}})
        );
    }

    #[test]
    fn add_sheet_payload_shape() {
        assert_eq!(
            add_sheet_args("Sheet2"),
            json!({"Name": {"type": "string", "value": "Sheet2"}})
        );
    }
}
