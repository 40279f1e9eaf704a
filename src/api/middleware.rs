use actix_web::{
    Error, HttpMessage,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
    middleware::Next,
};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id stored in request extensions by [`request_id`].
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Tags every request with a UUID, logs it with the outcome and echoes it back in `x-request-id`.
///
/// Mounted with `actix_web::middleware::from_fn(request_id)`.
pub async fn request_id(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let id = Uuid::new_v4().to_string();
    log::debug!("request_id={} {} {}", id, req.method(), req.path());
    req.extensions_mut().insert(RequestId(id.clone()));

    let started = Instant::now();
    let mut resp = next.call(req).await?;

    log::debug!(
        "request_id={} status={} elapsed_ms={}",
        id,
        resp.status().as_u16(),
        started.elapsed().as_millis()
    );
    if let Ok(value) = HeaderValue::from_str(&id) {
        resp.headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    Ok(resp)
}
