//! Data access for jobs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use crate::db;
use crate::models::ModelError;
use crate::sql::{build_filter_clause, build_set_clause, JOB_FILTERS};

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Partial job update. The id and owning company are not updatable, so
/// neither can reach the SET-clause builder. Equity rides as a plain
/// float here; the column is numeric and accepts it on assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity: Option<f64>,
}

/// Find all jobs matching the given criteria (all rows when the
/// criteria map is empty), ordered by id.
pub async fn find_all(criteria: &Map<String, Value>) -> Result<Vec<Job>, ModelError> {
    let fragment = build_filter_clause(criteria, &JOB_FILTERS)?;

    let mut sql = format!("SELECT {} FROM jobs", JOB_COLUMNS);
    if !fragment.clause.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&fragment.clause);
    }
    sql.push_str(" ORDER BY id");

    let mut query = sqlx::query_as::<_, Job>(&sql);
    for param in &fragment.params {
        query = db::bind_value(query, param);
    }

    Ok(query.fetch_all(db::pool()).await?)
}

/// All jobs belonging to one company, ordered by id.
pub async fn find_for_company(handle: &str) -> Result<Vec<Job>, ModelError> {
    let sql = format!(
        "SELECT {} FROM jobs WHERE company_handle = $1 ORDER BY id",
        JOB_COLUMNS
    );

    Ok(sqlx::query_as::<_, Job>(&sql)
        .bind(handle)
        .fetch_all(db::pool())
        .await?)
}

/// Given a job id, return data about the job.
pub async fn get(id: i32) -> Result<Job, ModelError> {
    let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);

    sqlx::query_as::<_, Job>(&sql)
        .bind(id)
        .fetch_optional(db::pool())
        .await?
        .ok_or_else(|| ModelError::NotFound(format!("No job: {}", id)))
}

/// Create a job; fails if a job with the same title already exists.
pub async fn create(data: NewJob) -> Result<Job, ModelError> {
    let existing = sqlx::query_as::<_, (i32,)>("SELECT id FROM jobs WHERE title = $1")
        .bind(&data.title)
        .fetch_optional(db::pool())
        .await?;

    if existing.is_some() {
        return Err(ModelError::Duplicate(format!(
            "Duplicate job: {}",
            data.title
        )));
    }

    let sql = format!(
        "INSERT INTO jobs (title, salary, equity, company_handle) \
         VALUES ($1, $2, $3, $4) RETURNING {}",
        JOB_COLUMNS
    );

    Ok(sqlx::query_as::<_, Job>(&sql)
        .bind(&data.title)
        .bind(data.salary)
        .bind(data.equity)
        .bind(&data.company_handle)
        .fetch_one(db::pool())
        .await?)
}

/// Partial update: only the fields present in `data` are changed.
pub async fn update(id: i32, data: &JobUpdate) -> Result<Job, ModelError> {
    let fields = serde_json::to_value(data)?;
    let fragment = build_set_clause(&fields)?;
    let id_placeholder = fragment.params.len() + 1;

    let sql = format!(
        "UPDATE jobs SET {} WHERE id = ${} RETURNING {}",
        fragment.clause, id_placeholder, JOB_COLUMNS
    );

    let mut query = sqlx::query_as::<_, Job>(&sql);
    for param in &fragment.params {
        query = db::bind_value(query, param);
    }
    query = query.bind(id);

    query
        .fetch_optional(db::pool())
        .await?
        .ok_or_else(|| ModelError::NotFound(format!("No job: {}", id)))
}

/// Delete a job.
pub async fn remove(id: i32) -> Result<(), ModelError> {
    let deleted = sqlx::query_as::<_, (i32,)>("DELETE FROM jobs WHERE id = $1 RETURNING id")
        .bind(id)
        .fetch_optional(db::pool())
        .await?;

    match deleted {
        Some(_) => Ok(()),
        None => Err(ModelError::NotFound(format!("No job: {}", id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_payload_feeds_set_builder() {
        let data = JobUpdate {
            title: Some("Senior Engineer".to_string()),
            salary: Some(150000),
            equity: None,
        };

        let fields = serde_json::to_value(&data).unwrap();
        let fragment = build_set_clause(&fields).unwrap();

        assert_eq!(fragment.clause, "title=$1, salary=$2");
        assert_eq!(fragment.params, vec![json!("Senior Engineer"), json!(150000)]);
    }

    #[test]
    fn update_payload_rejects_identity_fields() {
        let result: Result<JobUpdate, _> = serde_json::from_value(json!({ "id": 7 }));
        assert!(result.is_err());

        let result: Result<JobUpdate, _> =
            serde_json::from_value(json!({ "company_handle": "acme" }));
        assert!(result.is_err());
    }

    #[test]
    fn empty_update_payload_is_rejected_by_builder() {
        let fields = serde_json::to_value(JobUpdate::default()).unwrap();
        assert!(build_set_clause(&fields).is_err());
    }
}
