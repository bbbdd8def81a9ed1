//! Level 3 retrieval handlers.
//!
//! Region endpoints take an inclusive `lat1..lat2` / `lon1..lon2` box; full
//! endpoints take an optional `scaleFactor` stride. Retrieval is blocking
//! file and CPU work, so it runs on the blocking pool.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use chrono::{DateTime, Utc};
use l3_common::{BoundingBox, L3Error, L3Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::handlers::error::ApiError;
use crate::retrieval::{LevelThreeData, RetrievalService};
use crate::state::{AppState, SharedReader};

/// Query parameters for region endpoints.
#[derive(Debug, Deserialize)]
pub struct RegionParams {
    pub lat1: Option<f32>,
    pub lat2: Option<f32>,
    pub lon1: Option<f32>,
    pub lon2: Option<f32>,
    /// Number of datasets (N-latest only).
    pub n: Option<i64>,
}

impl RegionParams {
    fn bbox(&self) -> L3Result<BoundingBox> {
        Ok(BoundingBox::new(
            required(self.lat1, "lat1")?,
            required(self.lat2, "lat2")?,
            required(self.lon1, "lon1")?,
            required(self.lon2, "lon2")?,
        ))
    }
}

/// Query parameters for full-grid endpoints.
#[derive(Debug, Deserialize)]
pub struct FullParams {
    #[serde(rename = "scaleFactor")]
    pub scale_factor: Option<i64>,
    /// Number of datasets (N-latest only).
    pub n: Option<i64>,
}

/// Region retrieval payload.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionResponse {
    pub generated_at_instant: DateTime<Utc>,
    pub lat1: f32,
    pub lat2: f32,
    pub lon1: f32,
    pub lon2: f32,
    #[serde(rename = "minNO2")]
    pub min_no2: f64,
    #[serde(rename = "maxNO2")]
    pub max_no2: f64,
    #[serde(rename = "centerNO2")]
    pub center_no2: f64,
    pub image_png: String,
}

impl RegionResponse {
    fn new(bbox: &BoundingBox, data: LevelThreeData, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at_instant: generated_at,
            lat1: bbox.lat1,
            lat2: bbox.lat2,
            lon1: bbox.lon1,
            lon2: bbox.lon2,
            min_no2: data.min_value,
            max_no2: data.max_value,
            center_no2: data.center_value,
            image_png: data.image_base64,
        }
    }
}

/// Full-grid retrieval payload.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullResponse {
    pub generated_at_instant: DateTime<Utc>,
    pub scale_factor: usize,
    #[serde(rename = "minNO2")]
    pub min_no2: f64,
    #[serde(rename = "maxNO2")]
    pub max_no2: f64,
    pub image_png: String,
}

impl FullResponse {
    fn new(stride: usize, data: LevelThreeData, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at_instant: generated_at,
            scale_factor: stride,
            min_no2: data.min_value,
            max_no2: data.max_value,
            image_png: data.image_base64,
        }
    }
}

/// GET /api/level-three/retrieve
pub async fn retrieve_handler(
    Extension(state): Extension<Arc<AppState>>,
    params: Result<Query<RegionParams>, QueryRejection>,
) -> Result<Json<RegionResponse>, ApiError> {
    let Query(params) = params.map_err(bad_query)?;
    let bbox = params.bbox()?;
    info!(?bbox, "Level 3 region request");

    let data = run_blocking(&state, move |svc| svc.retrieve_latest_region(&bbox)).await?;
    Ok(Json(RegionResponse::new(&bbox, data, Utc::now())))
}

/// GET /api/level-three/retrieve-latest
pub async fn retrieve_latest_handler(
    Extension(state): Extension<Arc<AppState>>,
    params: Result<Query<RegionParams>, QueryRejection>,
) -> Result<Json<Vec<RegionResponse>>, ApiError> {
    let Query(params) = params.map_err(bad_query)?;
    let bbox = params.bbox()?;
    let n = count(params.n)?;
    info!(?bbox, n, "Level 3 region series request");

    let results = run_blocking(&state, move |svc| svc.retrieve_n_latest_regions(&bbox, n)).await?;
    let now = Utc::now();
    Ok(Json(
        results
            .into_iter()
            .map(|data| RegionResponse::new(&bbox, data, now))
            .collect(),
    ))
}

/// GET /api/level-three/full
pub async fn full_handler(
    Extension(state): Extension<Arc<AppState>>,
    params: Result<Query<FullParams>, QueryRejection>,
) -> Result<Json<FullResponse>, ApiError> {
    let Query(params) = params.map_err(bad_query)?;
    let stride = stride(params.scale_factor, state.default_stride)?;
    info!(stride, "Level 3 full grid request");

    let data = run_blocking(&state, move |svc| svc.retrieve_latest_full(stride)).await?;
    Ok(Json(FullResponse::new(stride, data, Utc::now())))
}

/// GET /api/level-three/full-latest
pub async fn full_latest_handler(
    Extension(state): Extension<Arc<AppState>>,
    params: Result<Query<FullParams>, QueryRejection>,
) -> Result<Json<Vec<FullResponse>>, ApiError> {
    let Query(params) = params.map_err(bad_query)?;
    let stride = stride(params.scale_factor, state.default_stride)?;
    let n = count(params.n)?;
    info!(n, stride, "Level 3 full grid series request");

    let results = run_blocking(&state, move |svc| svc.retrieve_n_latest_full(n, stride)).await?;
    let now = Utc::now();
    Ok(Json(
        results
            .into_iter()
            .map(|data| FullResponse::new(stride, data, now))
            .collect(),
    ))
}

async fn run_blocking<T, F>(state: &AppState, f: F) -> L3Result<T>
where
    T: Send + 'static,
    F: FnOnce(&RetrievalService<SharedReader>) -> L3Result<T> + Send + 'static,
{
    let retrieval = Arc::clone(&state.retrieval);
    tokio::task::spawn_blocking(move || f(&retrieval))
        .await
        .map_err(|e| L3Error::InternalError(format!("retrieval task failed: {}", e)))?
}

fn bad_query(rejection: QueryRejection) -> ApiError {
    L3Error::invalid_parameter("query", rejection.body_text()).into()
}

fn required(value: Option<f32>, name: &str) -> L3Result<f32> {
    value.ok_or_else(|| L3Error::invalid_parameter(name, "missing required parameter"))
}

fn count(n: Option<i64>) -> L3Result<usize> {
    let n = n.ok_or_else(|| L3Error::invalid_parameter("n", "missing required parameter"))?;
    usize::try_from(n).map_err(|_| L3Error::invalid_parameter("n", format!("must be >= 0, got {}", n)))
}

fn stride(scale_factor: Option<i64>, default: usize) -> L3Result<usize> {
    match scale_factor {
        None => Ok(default),
        Some(s) if s >= 1 => usize::try_from(s)
            .map_err(|_| L3Error::invalid_parameter("scaleFactor", "out of range")),
        Some(s) => Err(L3Error::invalid_parameter(
            "scaleFactor",
            format!("must be >= 1, got {}", s),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_rejects_negative() {
        assert_eq!(count(Some(3)).unwrap(), 3);
        assert_eq!(count(Some(0)).unwrap(), 0);
        assert!(count(Some(-1)).is_err());
        assert!(count(None).is_err());
    }

    #[test]
    fn test_stride_defaults_and_bounds() {
        assert_eq!(stride(None, 10).unwrap(), 10);
        assert_eq!(stride(Some(4), 10).unwrap(), 4);
        assert!(stride(Some(0), 10).is_err());
        assert!(stride(Some(-3), 10).is_err());
    }

    #[test]
    fn test_response_field_names() {
        let data = LevelThreeData {
            min_value: 1.0,
            max_value: 2.0,
            center_value: 1.5,
            image_base64: "abc".to_string(),
        };
        let bbox = BoundingBox::new(30.0, 45.0, -90.0, -75.0);
        let json = serde_json::to_value(RegionResponse::new(&bbox, data, Utc::now())).unwrap();

        for key in [
            "generatedAtInstant",
            "lat1",
            "lat2",
            "lon1",
            "lon2",
            "minNO2",
            "maxNO2",
            "centerNO2",
            "imagePng",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }
}
