// code-review: some asserts must be public because they are used in other modules.

use reqwest::Response;
use serde_json::Value;
use torrust_transfer_manager::servers::apis::v1::context::stats::resources::Stats;
use torrust_transfer_manager::servers::apis::v1::context::transfer::resources::Transfer;
use torrust_transfer_manager::servers::apis::v1::responses::ErrorBody;

// Resource responses

pub async fn assert_stats(response: Response, stats: Stats) {
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers().get("content-type").unwrap(), "application/json");
    assert_eq!(response.json::<Stats>().await.unwrap(), stats);
}

pub async fn transfer(response: Response) -> Transfer {
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers().get("content-type").unwrap(), "application/json");
    response.json::<Transfer>().await.unwrap()
}

pub async fn transfer_list(response: Response) -> Vec<Transfer> {
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers().get("content-type").unwrap(), "application/json");
    response.json::<Vec<Transfer>>().await.unwrap()
}

// OK response

pub async fn assert_ok(response: Response) {
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers().get("content-type").unwrap(), "application/json");
    assert_eq!(response.json::<Value>().await.unwrap(), serde_json::json!({ "status": "ok" }));
}

// Error responses

pub async fn assert_error(response: Response, status: u16, kind: &str) {
    assert_eq!(response.status(), status);
    assert_eq!(response.headers().get("content-type").unwrap(), "application/json");

    let body = response.json::<ErrorBody>().await.unwrap();

    assert_eq!(body.kind, kind, "unexpected error: {}", body.message);
}

pub async fn assert_invalid_request(response: Response) {
    assert_error(response, 400, "invalid_request").await;
}

pub async fn assert_invalid_metadata(response: Response) {
    assert_error(response, 400, "invalid_metadata").await;
}

pub async fn assert_not_found(response: Response) {
    assert_error(response, 404, "not_found").await;
}

pub async fn assert_engine_rejected(response: Response) {
    assert_error(response, 500, "engine_rejected").await;
}
