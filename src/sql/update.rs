use serde_json::Value;

use super::error::SqlBuildError;
use super::SqlFragment;

/// Builds the `SET` clause of a parameterized partial-update statement.
///
/// Accepts a JSON object mapping column names to new values and returns
/// the comma-joined assignment list plus the values in placeholder order.
///
/// Input: `{"name": "Applepie", "num_employees": "100", "description": "Apple post-layoffs"}`
///
/// Output: `("name=$1, num_employees=$2, description=$3",
///           ["Applepie", "100", "Apple post-layoffs"])`
///
/// Placeholders are numbered by the field map's insertion order. Values
/// are never interpolated into the clause text. The caller is expected
/// to have restricted the keys to updatable columns already (identity
/// and key fields filtered out by the typed request payloads); this
/// function only rejects inputs that are not a JSON object or carry no
/// fields at all, since an empty `SET` would otherwise rewrite every row.
///
/// `params.len()` always equals the number of assignments, so the caller
/// can bind the row identifier as `$params.len() + 1`.
pub fn build_set_clause(fields: &Value) -> Result<SqlFragment, SqlBuildError> {
    let map = fields
        .as_object()
        .ok_or(SqlBuildError::InvalidInput("update data must be a JSON object"))?;

    if map.is_empty() {
        return Err(SqlBuildError::InvalidInput("no fields to update"));
    }

    let mut assignments = Vec::with_capacity(map.len());
    let mut params = Vec::with_capacity(map.len());

    for (idx, (column, value)) in map.iter().enumerate() {
        assignments.push(format!("{}=${}", column, idx + 1));
        params.push(value.clone());
    }

    Ok(SqlFragment {
        clause: assignments.join(", "),
        params,
    })
}
