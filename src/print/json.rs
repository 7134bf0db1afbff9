use crate::core::pagination::PrintDocument;
use crate::errors::AppResult;

/// Page plan as pretty JSON, for renderers outside this tool.
pub fn render_json(doc: &PrintDocument<'_>) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(doc)? + "\n")
}
