use axum::body::Body;
use axum::Router;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use pokedex_proxy::utils::{logger, validation::Validate};
use pokedex_proxy::{build_router, AppState, LambdaConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

/// API-gateway style invocation: the subset of the HTTP event the pages need.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub raw_path: Option<String>,
    pub path: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

fn request_uri(request: &Request) -> String {
    fn non_empty(p: &Option<String>) -> Option<&str> {
        p.as_deref().filter(|p| !p.is_empty())
    }

    let path = non_empty(&request.raw_path)
        .or_else(|| non_empty(&request.path))
        .unwrap_or("/");

    match &request.query_string_parameters {
        Some(params) if !params.is_empty() => {
            let mut pairs: Vec<(&String, &String)> = params.iter().collect();
            pairs.sort();
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs)
                .finish();
            format!("{}?{}", path, query)
        }
        _ => path.to_string(),
    }
}

async fn function_handler(router: Router, event: LambdaEvent<Request>) -> Result<Response, Error> {
    let uri = request_uri(&event.payload);
    tracing::info!(uri = %uri, "Handling page request");

    let request = axum::http::Request::builder()
        .method("GET")
        .uri(&uri)
        .body(Body::empty())?;

    let response = router.oneshot(request).await?;
    let status_code = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;

    tracing::info!(uri = %uri, status = status_code, "Page request completed");
    Ok(Response {
        status_code,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
        is_base64_encoded: false,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let lambda_config = LambdaConfig::from_env()?;
    lambda_config.validate()?;

    // Built once per cold start and reused across invocations.
    let router = build_router(Arc::new(AppState::from_config(lambda_config.aggregator)));

    run(service_fn(move |event: LambdaEvent<Request>| {
        function_handler(router.clone(), event)
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uri_defaults_to_root() {
        assert_eq!(request_uri(&Request::default()), "/");
    }

    #[test]
    fn test_request_uri_encodes_query() {
        let request: Request = serde_json::from_value(serde_json::json!({
            "rawPath": "/",
            "queryStringParameters": {"typeOf": "fire", "offset": "20"}
        }))
        .unwrap();

        assert_eq!(request_uri(&request), "/?offset=20&typeOf=fire");
    }

    #[test]
    fn test_request_uri_falls_back_to_path() {
        let request: Request = serde_json::from_value(serde_json::json!({
            "path": "/infos",
            "queryStringParameters": {"pokemonName": "mr mime"}
        }))
        .unwrap();

        assert_eq!(request_uri(&request), "/infos?pokemonName=mr+mime");
    }

    #[test]
    fn test_request_uri_skips_empty_raw_path() {
        let request: Request = serde_json::from_value(serde_json::json!({
            "rawPath": "",
            "path": "/infos"
        }))
        .unwrap();

        assert_eq!(request_uri(&request), "/infos");
    }
}
