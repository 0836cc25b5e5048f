use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use log::debug;

use crate::interfaces::subscribe::{generate_subscription, SubscriptionResult};
use crate::models::AppState;
use crate::utils::http::HttpClient;
use crate::vfs::KvStore;

/// Collects the incoming request headers as name/value pairs
fn request_headers(req: &HttpRequest) -> Vec<(String, String)> {
    req.headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

fn into_response(result: SubscriptionResult) -> HttpResponse {
    let status =
        StatusCode::from_u16(result.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut resp = HttpResponse::build(status);
    for (name, value) in result.headers {
        resp.append_header((name, value));
    }
    resp.body(result.body)
}

/// Handler for `GET /sub/{id}`: compiles the subscription of one profile
pub async fn sub_handler<K, H>(
    req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState<K, H>>,
) -> HttpResponse
where
    K: KvStore + 'static,
    H: HttpClient + 'static,
{
    let profile_id = path.into_inner();
    debug!("Subscription request for profile {}", profile_id);

    let headers = request_headers(&req);
    into_response(generate_subscription(app_state.get_ref(), &profile_id, &headers).await)
}

pub async fn health_handler() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("prosub is running")
}

/// Registers the subscription routes for a given store and client
pub fn config<K, H>(cfg: &mut web::ServiceConfig)
where
    K: KvStore + 'static,
    H: HttpClient + 'static,
{
    cfg.route("/", web::get().to(health_handler))
        .route("/sub/{id}", web::get().to(sub_handler::<K, H>))
        .route("/api/subscribe/{id}", web::get().to(sub_handler::<K, H>));
}
