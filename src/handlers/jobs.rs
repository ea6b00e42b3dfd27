//! Job endpoints.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::models::job::{self, JobUpdate, NewJob};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFilterQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "minSalary", skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<i32>,
    #[serde(rename = "hasEquity", skip_serializing_if = "Option::is_none")]
    pub has_equity: Option<bool>,
}

impl JobFilterQuery {
    pub fn criteria(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// GET /jobs - list jobs, optionally filtered
pub async fn list(Query(query): Query<JobFilterQuery>) -> Result<Json<Value>, ApiError> {
    let jobs = job::find_all(&query.criteria()).await?;
    Ok(Json(json!({ "jobs": jobs })))
}

/// GET /jobs/:id - one job
pub async fn show(Path(id): Path<i32>) -> Result<Json<Value>, ApiError> {
    let job = job::get(id).await?;
    Ok(Json(json!({ "job": job })))
}

/// POST /jobs - create a job (admin)
pub async fn create(Json(body): Json<NewJob>) -> Result<(StatusCode, Json<Value>), ApiError> {
    let job = job::create(body).await?;
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

/// PATCH /jobs/:id - partial update (admin)
pub async fn update(
    Path(id): Path<i32>,
    Json(body): Json<JobUpdate>,
) -> Result<Json<Value>, ApiError> {
    let job = job::update(id, &body).await?;
    Ok(Json(json!({ "job": job })))
}

/// DELETE /jobs/:id - delete a job (admin)
pub async fn remove(Path(id): Path<i32>) -> Result<Json<Value>, ApiError> {
    job::remove(id).await?;
    Ok(Json(json!({ "deleted": id })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_map_preserves_has_equity_flag() {
        let query = JobFilterQuery {
            has_equity: Some(true),
            ..Default::default()
        };

        let criteria = query.criteria();
        assert_eq!(criteria["hasEquity"], json!(true));
    }

    #[test]
    fn empty_query_yields_empty_criteria() {
        assert!(JobFilterQuery::default().criteria().is_empty());
    }
}
