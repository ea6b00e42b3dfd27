//! Company endpoints.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::models::company::{self, CompanyUpdate, NewCompany};
use crate::models::job;

/// Recognized list filters; anything else in the query string is a 400
/// before the filter builder ever sees it.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyFilterQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "minEmployees", skip_serializing_if = "Option::is_none")]
    pub min_employees: Option<i32>,
    #[serde(rename = "maxEmployees", skip_serializing_if = "Option::is_none")]
    pub max_employees: Option<i32>,
}

impl CompanyFilterQuery {
    /// Sparse criteria map for the filter builder.
    pub fn criteria(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// GET /companies - list companies, optionally filtered
pub async fn list(Query(query): Query<CompanyFilterQuery>) -> Result<Json<Value>, ApiError> {
    let companies = company::find_all(&query.criteria()).await?;
    Ok(Json(json!({ "companies": companies })))
}

/// GET /companies/:handle - one company plus its jobs
pub async fn show(Path(handle): Path<String>) -> Result<Json<Value>, ApiError> {
    let company = company::get(&handle).await?;
    let jobs = job::find_for_company(&handle).await?;
    Ok(Json(json!({ "company": company, "jobs": jobs })))
}

/// POST /companies - create a company (admin)
pub async fn create(
    Json(body): Json<NewCompany>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let company = company::create(body).await?;
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// PATCH /companies/:handle - partial update (admin)
pub async fn update(
    Path(handle): Path<String>,
    Json(body): Json<CompanyUpdate>,
) -> Result<Json<Value>, ApiError> {
    let company = company::update(&handle, &body).await?;
    Ok(Json(json!({ "company": company })))
}

/// DELETE /companies/:handle - delete a company (admin)
pub async fn remove(Path(handle): Path<String>) -> Result<Json<Value>, ApiError> {
    company::remove(&handle).await?;
    Ok(Json(json!({ "deleted": handle })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_map_contains_only_supplied_filters() {
        let query = CompanyFilterQuery {
            name: Some("net".to_string()),
            ..Default::default()
        };

        let criteria = query.criteria();
        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria["name"], json!("net"));
    }

    #[test]
    fn criteria_map_uses_client_facing_keys() {
        let query = CompanyFilterQuery {
            min_employees: Some(1),
            max_employees: Some(5),
            ..Default::default()
        };

        let criteria = query.criteria();
        assert_eq!(criteria["minEmployees"], json!(1));
        assert_eq!(criteria["maxEmployees"], json!(5));
    }

    #[test]
    fn unknown_query_keys_are_rejected_upstream() {
        let result: Result<CompanyFilterQuery, _> =
            serde_json::from_value(json!({ "nameLike": "net" }));
        assert!(result.is_err());
    }
}
