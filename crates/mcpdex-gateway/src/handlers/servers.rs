use crate::error::Result;
use crate::model::{
    DescriptionRequest, DescriptionResponse, FetchParams, FetchResponse, SearchParams,
    SearchResponse, SubmitRequest, SubmitResponse, TrendingParams, TrendingResponse,
};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use mcpdex_core::{DescribeParams, ServerId, SubmitParams};
use mcpdex_directory::DEFAULT_TRENDING_COUNT;

pub async fn submit_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>> {
    let Json(request) = payload?;

    let record = state
        .directory()
        .submit(SubmitParams {
            name: request.name,
            repository_url: request.github_url,
        })
        .await?;

    Ok(Json(SubmitResponse {
        success: true,
        message: "Server submitted successfully",
        server_id: record.id.clone(),
        data: record,
    }))
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let query = params.q.unwrap_or_default();
    let results = state.directory().search(&query).await?;
    Ok(Json(SearchResponse { results }))
}

pub async fn trending_handler(
    State(state): State<AppState>,
    Query(params): Query<TrendingParams>,
) -> Json<TrendingResponse> {
    let count = params
        .count
        .and_then(|count| count.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_TRENDING_COUNT);

    let servers = state.directory().top_trending(count).await;
    Json(TrendingResponse { servers })
}

pub async fn fetch_handler(
    State(state): State<AppState>,
    Query(params): Query<FetchParams>,
) -> Result<Json<FetchResponse>> {
    let name = params.name.unwrap_or_default();
    let server = state.directory().fetch_by_name(&name).await?;
    Ok(Json(FetchResponse { server }))
}

pub async fn describe_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DescriptionRequest>, JsonRejection>,
) -> Result<Json<DescriptionResponse>> {
    let Json(request) = payload?;
    let id = request
        .server_id
        .filter(|id| !id.is_empty())
        .map(ServerId::new)
        .transpose()?;

    let enrichment = state
        .directory()
        .describe(DescribeParams {
            name: request.name,
            repository_url: request.github_url,
            id,
        })
        .await?;

    Ok(Json(DescriptionResponse {
        success: true,
        description: enrichment.description().to_string(),
        short_description: enrichment.short_description().to_string(),
        message: "Description generated successfully",
    }))
}
