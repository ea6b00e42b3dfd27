//! Data access for companies.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use crate::db;
use crate::models::ModelError;
use crate::sql::{build_filter_clause, build_set_clause, COMPANY_FILTERS};

const COMPANY_COLUMNS: &str = "handle, name, num_employees, description, logo_url";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub num_employees: Option<i32>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

/// Payload for company creation. Unknown fields are rejected at
/// deserialization, mirroring the JSON-schema checks at the boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub num_employees: Option<i32>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

/// Payload for partial company updates. The handle is deliberately
/// absent: identity fields never reach the SET-clause builder. Absent
/// fields are skipped during serialization so only supplied columns are
/// written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_employees: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Find all companies matching the given criteria (all rows when the
/// criteria map is empty), ordered by name.
pub async fn find_all(criteria: &Map<String, Value>) -> Result<Vec<Company>, ModelError> {
    let fragment = build_filter_clause(criteria, &COMPANY_FILTERS)?;

    let mut sql = format!("SELECT {} FROM companies", COMPANY_COLUMNS);
    if !fragment.clause.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&fragment.clause);
    }
    sql.push_str(" ORDER BY name");

    let mut query = sqlx::query_as::<_, Company>(&sql);
    for param in &fragment.params {
        query = db::bind_value(query, param);
    }

    Ok(query.fetch_all(db::pool()).await?)
}

/// Given a company handle, return data about the company.
pub async fn get(handle: &str) -> Result<Company, ModelError> {
    let sql = format!("SELECT {} FROM companies WHERE handle = $1", COMPANY_COLUMNS);

    sqlx::query_as::<_, Company>(&sql)
        .bind(handle)
        .fetch_optional(db::pool())
        .await?
        .ok_or_else(|| ModelError::NotFound(format!("No company: {}", handle)))
}

/// Create a company; fails if the handle is already taken.
pub async fn create(data: NewCompany) -> Result<Company, ModelError> {
    let existing = sqlx::query_as::<_, (String,)>("SELECT handle FROM companies WHERE handle = $1")
        .bind(&data.handle)
        .fetch_optional(db::pool())
        .await?;

    if existing.is_some() {
        return Err(ModelError::Duplicate(format!(
            "Duplicate company: {}",
            data.handle
        )));
    }

    let sql = format!(
        "INSERT INTO companies (handle, name, num_employees, description, logo_url) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        COMPANY_COLUMNS
    );

    Ok(sqlx::query_as::<_, Company>(&sql)
        .bind(&data.handle)
        .bind(&data.name)
        .bind(data.num_employees)
        .bind(&data.description)
        .bind(&data.logo_url)
        .fetch_one(db::pool())
        .await?)
}

/// Partial update: only the fields present in `data` are changed.
pub async fn update(handle: &str, data: &CompanyUpdate) -> Result<Company, ModelError> {
    let fields = serde_json::to_value(data)?;
    let fragment = build_set_clause(&fields)?;
    let handle_placeholder = fragment.params.len() + 1;

    let sql = format!(
        "UPDATE companies SET {} WHERE handle = ${} RETURNING {}",
        fragment.clause, handle_placeholder, COMPANY_COLUMNS
    );

    let mut query = sqlx::query_as::<_, Company>(&sql);
    for param in &fragment.params {
        query = db::bind_value(query, param);
    }
    query = query.bind(handle);

    query
        .fetch_optional(db::pool())
        .await?
        .ok_or_else(|| ModelError::NotFound(format!("No company: {}", handle)))
}

/// Delete a company (and, via FK cascade, its jobs).
pub async fn remove(handle: &str) -> Result<(), ModelError> {
    let deleted =
        sqlx::query_as::<_, (String,)>("DELETE FROM companies WHERE handle = $1 RETURNING handle")
            .bind(handle)
            .fetch_optional(db::pool())
            .await?;

    match deleted {
        Some(_) => Ok(()),
        None => Err(ModelError::NotFound(format!("No company: {}", handle))),
    }
}
