use once_cell::sync::Lazy;
use serde_json::Value;
use sqlx::{postgres::PgArguments, postgres::PgPoolOptions, FromRow, PgPool};

use crate::config;

static POOL: Lazy<PgPool> = Lazy::new(|| {
    let cfg = config::config();
    PgPoolOptions::new()
        .max_connections(cfg.database.max_connections)
        // connect_lazy: no connection is made until the first query, so
        // the pool can be built synchronously at startup
        .connect_lazy(&cfg.database.url)
        .unwrap_or_else(|e| panic!("invalid DATABASE_URL {}: {}", cfg.database.url, e))
});

/// Shared connection pool for the application database.
pub fn pool() -> &'static PgPool {
    &POOL
}

/// Bind a JSON parameter value onto a typed query.
///
/// The SQL builders carry parameter lists as `serde_json::Value` so that
/// one clause type covers strings, numbers, and booleans; this maps each
/// variant onto the matching Postgres bind.
pub fn bind_value<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(u) = n.as_u64() {
                // Postgres doesn't have u64; cast down if safe
                q.bind(u as i64)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        // Arrays and objects never come out of the clause builders; bind
        // as JSONB so a future caller still gets something sensible
        Value::Array(_) | Value::Object(_) => q.bind(v.clone()),
    }
}
