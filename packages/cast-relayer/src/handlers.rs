//! HTTP request handlers.

use crate::metrics::METRICS;
use crate::middleware::RequestId;
use crate::response::{HealthResponse, PublishResponse};
use crate::schemas::PublishRequest;
use crate::signer::to_hex;
use crate::state::AppState;
use axum::extract::{FromRequest, State};
use axum::response::IntoResponse;
use axum::Json;
use farcaster_types::CastAddBody;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

/// Prometheus metrics in text exposition format.
pub async fn metrics() -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4",
        )],
        METRICS.render(),
    )
}

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        hub: state.publisher.hub().address().to_string(),
        network: state.network.as_str(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        requests: state.request_count.load(Ordering::Relaxed),
    })
}

/// Build, sign and submit a cast on behalf of `fid`.
pub async fn publish(
    State(state): State<Arc<AppState>>,
    request: axum::extract::Request,
) -> Result<Json<PublishResponse>, crate::Error> {
    let start = std::time::Instant::now();
    METRICS.casts_total.fetch_add(1, Ordering::Relaxed);
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let req_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_default();

    let result = publish_inner(&state, request, &req_id).await;
    METRICS.record_publish_duration(start);
    match &result {
        Ok(_) => {
            METRICS.casts_success.fetch_add(1, Ordering::Relaxed);
        }
        Err(e) => {
            METRICS.record_error(e);
            warn!(req_id = %req_id, kind = e.kind(), error = %e, "Publish failed");
        }
    }
    result.map(Json)
}

async fn publish_inner(
    state: &Arc<AppState>,
    request: axum::extract::Request,
    req_id: &str,
) -> Result<PublishResponse, crate::Error> {
    let Json(payload) = Json::<PublishRequest>::from_request(request, state)
        .await
        .map_err(|e| crate::Error::InvalidRequest(e.body_text()))?;

    let fid = payload.fid;
    let material = payload.signing_material();
    info!(
        req_id = %req_id,
        fid,
        with_key = material.signer_private_key.as_deref().is_some_and(|k| !k.is_empty()),
        "Publishing cast"
    );

    let body = CastAddBody::try_from(payload.data)?;
    let outcome = state.publisher.publish_cast(body, fid, &material).await?;

    Ok(PublishResponse {
        success: true,
        message: "Cast published successfully",
        signer_public_key: to_hex(&outcome.signer_public_key),
        signer_private_key: outcome.signer_private_key.map(|k| to_hex(&k)),
        message_hash: to_hex(&outcome.message_hash),
    })
}
