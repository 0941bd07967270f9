//! HTTP request handlers for the web adapter.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::display::dividend_yield_estimate;
use crate::domain::engine::EngineType;
use crate::domain::flight_log::{
    ContributionPoint, FlightLogEntry, PeriodMetrics, contribution_chart, generate_flight_log,
};
use crate::domain::gauges::{
    PortfolioGauges, engine_type_breakdown, health_status, integrity_status,
};
use crate::domain::holding::Holding;
use crate::domain::income_projection::{
    DEFAULT_INCOME_YEARS, IncomeProjection, dominant_engine_type, project_income,
};
use crate::domain::projection::{ProjectionPoint, ProjectionRequest, project};
use crate::domain::query::{filter_holdings, top_movers};
use crate::domain::settings::{build_projection_request, check_horizon};
use crate::domain::timeline::{ComparativeTimeline, TimePeriod, generate_timeline};

use super::{AppState, WebError};

pub const DEFAULT_CHART_POINTS: usize = 200;
pub const DEFAULT_MOVERS_LIMIT: usize = 5;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn load(state: &AppState) -> Result<Vec<Holding>, WebError> {
    Ok(state.holdings.load_holdings()?)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuery {
    pub search: Option<String>,
    pub engine_type: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataResponse {
    pub source: String,
    pub count: usize,
    pub holdings: Vec<Holding>,
}

pub async fn data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DataQuery>,
) -> Result<Json<DataResponse>, WebError> {
    let holdings = load(&state)?;
    let engine_type = query
        .engine_type
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<EngineType>)
        .transpose()?;
    let term = query.search.unwrap_or_default();

    let matched: Vec<Holding> = filter_holdings(&holdings, &term, engine_type)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(DataResponse {
        source: state.holdings.source_name(),
        count: matched.len(),
        holdings: matched,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub gauges: PortfolioGauges,
    pub health_status: String,
    pub integrity_status: String,
    pub engine_breakdown: BTreeMap<String, usize>,
    pub income: IncomeProjection,
}

pub async fn portfolio(State(state): State<Arc<AppState>>) -> Result<Json<PortfolioResponse>, WebError> {
    let holdings = load(&state)?;
    let gauges = PortfolioGauges::compute(&holdings);
    let current = gauges.snapshot.total_yearly_thrust;
    let income = project_income(
        current,
        current * 2.0,
        dominant_engine_type(&holdings),
        DEFAULT_INCOME_YEARS,
        today(),
    );

    Ok(Json(PortfolioResponse {
        health_status: health_status(u32::from(gauges.snapshot.overall_health)),
        integrity_status: integrity_status(gauges.engine_integrity),
        engine_breakdown: engine_type_breakdown(&holdings),
        gauges,
        income,
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionQuery {
    pub initial_investment: Option<f64>,
    pub monthly_investment: Option<f64>,
    pub engine_type: Option<String>,
    pub desired_goal: Option<f64>,
    pub max_years: Option<u32>,
    pub points: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub request: ProjectionRequest,
    pub years_to_goal: Option<f64>,
    pub value_at_goal: Option<f64>,
    pub final_value: f64,
    pub chart: Vec<ProjectionPoint>,
}

fn non_negative(name: &str, value: f64) -> Result<f64, WebError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(WebError::bad_request(format!("{name} must be a non-negative number")))
    }
}

pub async fn projection(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProjectionQuery>,
) -> Result<Json<ProjectionResponse>, WebError> {
    let mut request = build_projection_request(&*state.config)?;

    if let Some(v) = query.initial_investment {
        request.initial_investment = non_negative("initialInvestment", v)?;
    }
    if let Some(v) = query.monthly_investment {
        request.monthly_investment = non_negative("monthlyInvestment", v)?;
    }
    if let Some(v) = query.desired_goal {
        request.desired_goal = non_negative("desiredGoal", v)?;
    }
    if let Some(t) = query.engine_type.as_deref() {
        request.engine_type = t.parse()?;
    }
    if let Some(years) = query.max_years {
        request.max_years = check_horizon("query", "maxYears", years)?;
    }

    let result = project(&request, today());
    let chart = result.chart_window(query.points.unwrap_or(DEFAULT_CHART_POINTS));

    Ok(Json(ProjectionResponse {
        years_to_goal: result.years_to_goal(),
        value_at_goal: result.value_at_goal(),
        final_value: result.final_value,
        request: result.request,
        chart,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct TimelineQuery {
    pub period: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResponse {
    pub period: &'static str,
    pub label: &'static str,
    pub timeline: ComparativeTimeline,
    pub flight_log: Vec<FlightLogEntry>,
    pub metrics: PeriodMetrics,
    pub contributions: Vec<ContributionPoint>,
}

pub async fn timeline(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TimelineQuery>,
) -> Result<Json<TimelineResponse>, WebError> {
    let holdings = load(&state)?;
    let period = match query.period {
        Some(key) => TimePeriod::from_key(&key),
        None => state
            .config
            .get_string("timeline", "period")
            .map(|k| TimePeriod::from_key(&k))
            .unwrap_or_default(),
    };
    let anchor = today();
    let months = period.months_past().max(0) as u32;

    Ok(Json(TimelineResponse {
        period: period.key(),
        label: period.label(),
        timeline: generate_timeline(&holdings, period.months_past(), period.months_future(), anchor),
        flight_log: generate_flight_log(&holdings, months, anchor),
        metrics: PeriodMetrics::compute(period),
        contributions: contribution_chart(period, anchor),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct MoversQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mover {
    pub ticker: String,
    pub yearly_thrust: f64,
    pub current_value: f64,
    pub dividend_yield: f64,
}

pub async fn movers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MoversQuery>,
) -> Result<Json<Vec<Mover>>, WebError> {
    let holdings = load(&state)?;
    let limit = query.limit.unwrap_or(DEFAULT_MOVERS_LIMIT);
    let ranked = top_movers(&holdings, limit)
        .into_iter()
        .map(|h| Mover {
            ticker: h.ticker.clone(),
            yearly_thrust: h.yearly_thrust,
            current_value: h.current_value,
            dividend_yield: dividend_yield_estimate(h),
        })
        .collect();
    Ok(Json(ranked))
}

pub async fn not_found() -> Response {
    WebError::not_found("Page not found").into_response()
}
