//! AWS Lambda handler for the plan calculators
//!
//! Accepts calculator, filter, comparison and enquiry requests as JSON and
//! returns JSON results. Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{info, warn};
use plan_advisor::backend::{plan_detail, BackendError, InMemoryBackend, PlanBackend};
use plan_advisor::calculators::{
    calculate_maturity_benefit, calculate_premium, calculate_roi, InputLimits, MaturityQuery,
    PremiumQuery,
};
use plan_advisor::catalog::Catalog;
use plan_advisor::comparison::PlanSelection;
use plan_advisor::enquiry::EnquiryForm;
use plan_advisor::filter::{filter_plans, PlanFilterCriteria};
use plan_advisor::i18n::Language;
use plan_advisor::plan::Plan;
use plan_advisor::quotes::{maturity_quotes, premium_quotes, rank_by_roi};
use plan_advisor::{AdvisorConfig, ValidationErrors};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Reference data and storage shared across invocations
struct AppState {
    catalog: Catalog,
    plans: Vec<Plan>,
    backend: InMemoryBackend,
    limits: InputLimits,
    language: Language,
}

impl AppState {
    fn load() -> plan_advisor::Result<Self> {
        let config = AdvisorConfig::load(None)?;
        let catalog = config.load_catalog()?;
        let plans = config.load_plans()?;
        info!("Serving {} plans from {}", plans.len(), config.catalog_dir.display());
        Ok(Self {
            catalog,
            backend: InMemoryBackend::new(plans.clone()),
            plans,
            limits: config.limits,
            language: config.language,
        })
    }

    fn plan(&self, plan_id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == plan_id)
    }
}

/// Premium calculator input; without `planId` every eligible plan is quoted
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PremiumRequest {
    #[serde(default)]
    plan_id: Option<String>,
    #[serde(flatten)]
    query: PremiumQuery,
}

/// Maturity and ROI input; without `planId` every eligible plan is projected
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MaturityRequest {
    #[serde(default)]
    plan_id: Option<String>,
    #[serde(flatten)]
    query: MaturityQuery,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompareRequest {
    plan_ids: Vec<String>,
    #[serde(default)]
    language: Option<Language>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FilterResponse<'a> {
    plan_ids: Vec<&'a str>,
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    json_response(status, &json!({ "error": message }))
}

fn validation_response(errors: &ValidationErrors) -> Result<Response<Body>, Error> {
    json_response(422, &json!({ "error": "Validation failed", "fields": errors }))
}

fn json_response<T: Serialize>(status: u16, body: &T) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

fn parse_body<T: DeserializeOwned>(event: &Request) -> Result<T, String> {
    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };
    serde_json::from_str(&body_str).map_err(|e| format!("Invalid JSON: {}", e))
}

macro_rules! body_or_400 {
    ($event:expr) => {
        match parse_body($event) {
            Ok(r) => r,
            Err(message) => return error_response(400, &message),
        }
    };
}

async fn handle_premium(state: &AppState, event: &Request) -> Result<Response<Body>, Error> {
    let request: PremiumRequest = body_or_400!(event);
    if let Err(errors) = request.query.validate(&state.limits) {
        return validation_response(&errors);
    }
    let q = &request.query;

    match request.plan_id.as_deref() {
        Some(id) => match state.plan(id) {
            Some(plan) => {
                let result = calculate_premium(&state.catalog, q.age, q.sum_assured, q.term, plan);
                json_response(200, &result)
            }
            None => error_response(404, &format!("Plan not found: {}", id)),
        },
        None => json_response(200, &premium_quotes(&state.catalog, &state.plans, q)),
    }
}

async fn handle_maturity(state: &AppState, event: &Request) -> Result<Response<Body>, Error> {
    let request: MaturityRequest = body_or_400!(event);
    if let Err(errors) = request.query.validate(&state.limits) {
        return validation_response(&errors);
    }
    let q = &request.query;

    match request.plan_id.as_deref() {
        Some(id) => match state.plan(id) {
            Some(plan) => {
                let result = calculate_maturity_benefit(
                    &state.catalog,
                    q.premium_amount,
                    q.term,
                    q.age,
                    plan,
                );
                json_response(200, &result)
            }
            None => error_response(404, &format!("Plan not found: {}", id)),
        },
        None => json_response(200, &maturity_quotes(&state.catalog, &state.plans, q)),
    }
}

async fn handle_roi(state: &AppState, event: &Request) -> Result<Response<Body>, Error> {
    let request: MaturityRequest = body_or_400!(event);
    if let Err(errors) = request.query.validate(&state.limits) {
        return validation_response(&errors);
    }
    let q = &request.query;

    match request.plan_id.as_deref() {
        Some(id) => match state.plan(id) {
            Some(plan) => {
                let result = calculate_roi(&state.catalog, q.premium_amount, q.term, q.age, plan);
                json_response(200, &result)
            }
            None => error_response(404, &format!("Plan not found: {}", id)),
        },
        None => json_response(200, &rank_by_roi(&state.catalog, &state.plans, q)),
    }
}

async fn handle_filter(state: &AppState, event: &Request) -> Result<Response<Body>, Error> {
    let criteria: PlanFilterCriteria = body_or_400!(event);
    let plan_ids = filter_plans(&state.catalog, &criteria);
    json_response(200, &FilterResponse { plan_ids })
}

async fn handle_compare(state: &AppState, event: &Request) -> Result<Response<Body>, Error> {
    let request: CompareRequest = body_or_400!(event);
    let mut selection = PlanSelection::new();
    for id in &request.plan_ids {
        if state.plan(id).is_none() {
            return error_response(404, &format!("Plan not found: {}", id));
        }
        if !selection.is_selected(id) {
            selection.toggle(id);
        }
    }

    let language = request.language.unwrap_or(state.language);
    match selection.compare(&state.plans, language) {
        Ok(table) => json_response(200, &table),
        Err(e) => error_response(422, &e.to_string()),
    }
}

async fn handle_enquiry(state: &AppState, event: &Request) -> Result<Response<Body>, Error> {
    let form: EnquiryForm = body_or_400!(event);
    match state.backend.submit_enquiry(form) {
        Ok(()) => json_response(201, &json!({ "status": "received" })),
        Err(BackendError::InvalidEnquiry(errors)) => validation_response(&errors),
        Err(e) => {
            warn!("Enquiry submission failed: {}", e);
            error_response(503, &e.to_string())
        }
    }
}

async fn handle_plans(state: &AppState) -> Result<Response<Body>, Error> {
    match state.backend.get_all_plans() {
        Ok(plans) => json_response(200, &plans),
        Err(e) => error_response(503, &e.to_string()),
    }
}

async fn handle_plan_detail(state: &AppState, id: &str) -> Result<Response<Body>, Error> {
    match plan_detail(&state.backend, id) {
        Ok(Some(detail)) => json_response(200, &detail),
        Ok(None) => error_response(404, &format!("Plan not found: {}", id)),
        Err(e) => error_response(503, &e.to_string()),
    }
}

/// Lambda handler function
async fn handler(state: &AppState, event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();
    let method = event.method().as_str().to_string();
    let path = event.uri().path().trim_end_matches('/').to_string();

    // Handle CORS preflight
    if method == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)?);
    }

    let response = match (method.as_str(), path.as_str()) {
        ("POST", "/premium") => handle_premium(state, &event).await,
        ("POST", "/maturity") => handle_maturity(state, &event).await,
        ("POST", "/roi") => handle_roi(state, &event).await,
        ("POST", "/filter") => handle_filter(state, &event).await,
        ("POST", "/compare") => handle_compare(state, &event).await,
        ("POST", "/enquiry") => handle_enquiry(state, &event).await,
        ("GET", "/plans") => handle_plans(state).await,
        ("GET", p) if p.starts_with("/plans/") => {
            handle_plan_detail(state, &p["/plans/".len()..]).await
        }
        _ => error_response(404, &format!("No route for {} {}", method, path)),
    };

    info!("{} {} handled in {} ms", method, path, start.elapsed().as_millis());
    response
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let state = Arc::new(AppState::load()?);
    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { handler(&state, event).await }
    }))
    .await
}
