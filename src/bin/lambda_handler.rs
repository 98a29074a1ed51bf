//! AWS Lambda handler for running a single calculation
//!
//! Accepts `{"product": "sip", "inputs": {"monthly_investment": "5,000", ...}}`
//! either as a direct invocation payload or as the body of a Lambda Function
//! URL / API Gateway request, and returns the calculation result as JSON.

use chrono::{SecondsFormat, Utc};
use finance_calculator::{CalcError, CalculationResult, ProductType, RawInputs, ScenarioRunner};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Input for one calculation
#[derive(Debug, Deserialize)]
pub struct CalculationRequest {
    /// Product tag, e.g. "sip" or "step-up-sip"
    pub product: String,

    /// Field name to value; values may be strings ("1,00,000") or numbers
    #[serde(default)]
    pub inputs: Value,
}

/// Output for a successful calculation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    #[serde(flatten)]
    pub result: CalculationResult,
    pub generated_at: String,
    pub execution_time_ms: u64,
}

fn cors_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Methods": "POST, OPTIONS",
        "Access-Control-Allow-Headers": "Content-Type",
    })
}

fn http_response(status: u16, body: String) -> Value {
    json!({
        "statusCode": status,
        "headers": cors_headers(),
        "body": body,
    })
}

fn error_response(status: u16, message: &str, issues: Vec<Value>) -> Value {
    let mut body = json!({ "error": message });
    if !issues.is_empty() {
        body["issues"] = Value::Array(issues);
    }
    http_response(status, body.to_string())
}

fn calc_error_response(err: &CalcError) -> Value {
    match err {
        CalcError::Validation(v) => {
            let issues = v
                .issues
                .iter()
                .map(|i| json!({ "field": i.field, "problem": i.problem }))
                .collect();
            error_response(400, &err.to_string(), issues)
        }
        CalcError::InvalidInput { field, reason } => error_response(
            400,
            &err.to_string(),
            vec![json!({ "field": field, "problem": reason })],
        ),
        CalcError::Io(_) | CalcError::Csv(_) => error_response(500, &err.to_string(), Vec::new()),
        _ => error_response(400, &err.to_string(), Vec::new()),
    }
}

/// HTTP method when the payload came through a Function URL or API Gateway
fn request_method(payload: &Value) -> Option<&str> {
    payload
        .pointer("/requestContext/http/method")
        .or_else(|| payload.get("httpMethod"))
        .and_then(Value::as_str)
}

/// Calculation request carried by the payload; direct invocations are the request itself
fn request_body(payload: &Value) -> Result<Value, String> {
    match payload.get("body") {
        Some(Value::String(text)) => {
            if payload.get("isBase64Encoded").and_then(Value::as_bool) == Some(true) {
                return Err("base64-encoded bodies are not supported".to_string());
            }
            serde_json::from_str(text).map_err(|e| format!("Invalid JSON: {}", e))
        }
        Some(Value::Null) | None => Ok(payload.clone()),
        Some(other) => Ok(other.clone()),
    }
}

fn handle(payload: &Value, runner: &ScenarioRunner) -> Value {
    let start = Instant::now();

    // Handle CORS preflight
    if request_method(payload).is_some_and(|m| m.eq_ignore_ascii_case("OPTIONS")) {
        return http_response(200, String::new());
    }

    let body = match request_body(payload) {
        Ok(body) => body,
        Err(message) => return error_response(400, &message, Vec::new()),
    };

    let request: CalculationRequest = match serde_json::from_value(body) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid request: {}", e), Vec::new()),
    };

    let product: ProductType = match request.product.parse() {
        Ok(p) => p,
        Err(e) => return calc_error_response(&e),
    };

    let inputs = match RawInputs::from_json(&request.inputs) {
        Some(inputs) => inputs,
        None => return error_response(400, "inputs must be a JSON object", Vec::new()),
    };

    match runner.run(product, &inputs) {
        Ok(result) => {
            let response = CalculationResponse {
                result,
                generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                execution_time_ms: start.elapsed().as_millis() as u64,
            };
            info!("{} calculated in {} ms", product, response.execution_time_ms);
            match serde_json::to_string(&response) {
                Ok(body) => http_response(200, body),
                Err(e) => error_response(500, &e.to_string(), Vec::new()),
            }
        }
        Err(e) => {
            warn!("{} rejected: {}", product, e);
            calc_error_response(&e)
        }
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<Value>, runner: &ScenarioRunner) -> Result<Value, Error> {
    Ok(handle(&event.payload, runner))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let runner = match std::env::var("TAX_TABLE_DIR") {
        Ok(dir) => ScenarioRunner::from_csv_path(Path::new(&dir))?,
        Err(_) => ScenarioRunner::new(),
    };
    let runner = Arc::new(runner);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let runner = Arc::clone(&runner);
        async move { handler(event, &runner).await }
    }))
    .await
}
