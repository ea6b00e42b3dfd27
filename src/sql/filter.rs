use serde_json::{Map, Value};

use super::error::SqlBuildError;
use super::SqlFragment;

/// How a recognized criterion translates into a SQL predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate {
    /// Case-insensitive substring match: `column ILIKE '%' || $k || '%'`.
    Contains { column: &'static str },
    /// `column >= $k`.
    GreaterEq { column: &'static str },
    /// `column <= $k`.
    LessEq { column: &'static str },
    /// Fixed condition with no bound parameter, emitted only when the
    /// criterion value is truthy.
    Flag { condition: &'static str },
}

/// One recognized filter criterion: the key clients supply and the
/// predicate it maps to.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub predicate: Predicate,
}

/// Static per-resource declaration of the recognized filter criteria.
///
/// Criteria are applied in the order they are declared here, not in the
/// order the client supplied them, so placeholder numbering is the same
/// for every equivalent request.
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
    pub fields: &'static [FieldSpec],
    /// Optional (min key, max key) pair checked before any clause is
    /// built; min > max fails with `InvalidRange`.
    pub range: Option<(&'static str, &'static str)>,
}

/// Company list filters: name substring, employee-count bounds.
pub const COMPANY_FILTERS: FilterSpec = FilterSpec {
    fields: &[
        FieldSpec {
            key: "name",
            predicate: Predicate::Contains { column: "name" },
        },
        FieldSpec {
            key: "minEmployees",
            predicate: Predicate::GreaterEq { column: "num_employees" },
        },
        FieldSpec {
            key: "maxEmployees",
            predicate: Predicate::LessEq { column: "num_employees" },
        },
    ],
    range: Some(("minEmployees", "maxEmployees")),
};

/// Job list filters: title substring, salary floor, equity flag.
pub const JOB_FILTERS: FilterSpec = FilterSpec {
    fields: &[
        FieldSpec {
            key: "title",
            predicate: Predicate::Contains { column: "title" },
        },
        FieldSpec {
            key: "minSalary",
            predicate: Predicate::GreaterEq { column: "salary" },
        },
        FieldSpec {
            key: "hasEquity",
            predicate: Predicate::Flag { condition: "equity > 0" },
        },
    ],
    range: None,
};

/// Builds the `WHERE` clause of a parameterized list query from a sparse
/// criteria map.
///
/// Only keys declared in `spec` contribute predicates; anything else is
/// ignored, since unknown keys are rejected upstream by the typed query
/// payloads. Predicates are joined with `" AND "`. An empty criteria map
/// (or one containing only unrecognized or falsy-flag entries) yields an
/// empty clause, and the caller omits the `WHERE` keyword entirely.
pub fn build_filter_clause(
    criteria: &Map<String, Value>,
    spec: &FilterSpec,
) -> Result<SqlFragment, SqlBuildError> {
    if let Some((min_key, max_key)) = spec.range {
        if let (Some(min), Some(max)) = (criteria.get(min_key), criteria.get(max_key)) {
            if let (Some(min), Some(max)) = (numeric(min), numeric(max)) {
                if min > max {
                    return Err(SqlBuildError::InvalidRange(format!(
                        "{} ({}) cannot exceed {} ({})",
                        min_key, min, max_key, max
                    )));
                }
            }
        }
    }

    let mut predicates = Vec::new();
    let mut params = Vec::new();

    for field in spec.fields {
        let Some(value) = criteria.get(field.key) else {
            continue;
        };

        match field.predicate {
            Predicate::Contains { column } => {
                predicates.push(format!("{} ILIKE '%' || ${} || '%'", column, params.len() + 1));
                params.push(value.clone());
            }
            Predicate::GreaterEq { column } => {
                predicates.push(format!("{} >= ${}", column, params.len() + 1));
                params.push(value.clone());
            }
            Predicate::LessEq { column } => {
                predicates.push(format!("{} <= ${}", column, params.len() + 1));
                params.push(value.clone());
            }
            Predicate::Flag { condition } => {
                if truthy(value) {
                    predicates.push(condition.to_string());
                }
            }
        }
    }

    Ok(SqlFragment {
        clause: predicates.join(" AND "),
        params,
    })
}

/// Numeric view of a criterion value; filter values arrive as JSON
/// numbers from typed query payloads but may be numeric strings when the
/// map is assembled by hand.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
