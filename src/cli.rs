//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::adapters::cache::{CachedHoldings, DEFAULT_TTL};
use crate::adapters::csv_adapter::CsvHoldingsAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::format::{
    format_currency, format_currency_chart, format_currency_table, format_percent,
};
use crate::domain::config_validation::{
    validate_data_config, validate_projection_config, validate_timeline_config,
};
use crate::domain::display::dividend_yield_estimate;
use crate::domain::engine::EngineType;
use crate::domain::error::ThrustError;
use crate::domain::flight_log::{
    PeriodMetrics, contribution_chart, distance, generate_flight_log, speed,
};
use crate::domain::gauges::{
    GaugeKind, PortfolioGauges, classify_gauge, engine_type_breakdown, health_status,
    integrity_status,
};
use crate::domain::holding::Holding;
use crate::domain::income_projection::{DEFAULT_INCOME_YEARS, dominant_engine_type, project_income};
use crate::domain::income_projection::IncomeProjection;
use crate::domain::projection::{ProjectionRequest, project};
use crate::domain::query::{RankMetric, filter_holdings, top_by_type, top_movers};
use crate::domain::settings::{build_projection_request, check_horizon};
use crate::domain::timeline::{TimePeriod, generate_timeline};
use crate::ports::config_port::ConfigPort;
use crate::ports::holdings_port::HoldingsPort;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";

#[derive(Parser, Debug)]
#[command(name = "thrustdeck", about = "Propulsion-engine portfolio analytics")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Holdings CSV, overrides [data] path
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Portfolio totals, health and gauges
    Summary,
    /// Engine profiles and top holdings per engine type
    Engines {
        /// Ranking metric: thrust, value or shares
        #[arg(long, default_value = "thrust")]
        metric: String,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Volatility-adjusted growth projection towards a goal
    Project {
        #[arg(long)]
        initial: Option<f64>,
        #[arg(long)]
        monthly: Option<f64>,
        #[arg(long)]
        engine: Option<String>,
        #[arg(long)]
        goal: Option<f64>,
        #[arg(long)]
        max_years: Option<u32>,
        /// Maximum number of rows in the printed path
        #[arg(long, default_value_t = 20)]
        points: usize,
    },
    /// Income (yearly thrust) projection with NAV drag
    Income {
        /// Target yearly thrust, defaults to twice the current amount
        #[arg(long)]
        goal: Option<f64>,
        #[arg(long, default_value_t = DEFAULT_INCOME_YEARS)]
        years: u32,
        #[arg(long)]
        engine: Option<String>,
    },
    /// Past and projected portfolio value against the benchmark
    Timeline {
        /// 1month, 6months, 1year, 5years or alltime
        #[arg(long)]
        period: Option<String>,
    },
    /// Accumulated distributions and contribution history
    FlightLog {
        #[arg(long)]
        period: Option<String>,
    },
    /// Holdings ranked by thrust times value
    Movers {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Filter holdings by ticker, frequency or escape ratio
    Search {
        #[arg(default_value = "")]
        term: String,
        #[arg(long)]
        engine: Option<String>,
    },
    /// Start the JSON web server
    Serve,
}

/// Install the global tracing subscriber. Logs go to stderr.
///
/// `RUST_LOG` controls the filter (default `warn`); set
/// `THRUSTDECK_LOG_FORMAT=json` for JSON lines.
pub fn init_tracing() {
    let log_format = std::env::var("THRUSTDECK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

pub fn run(cli: Cli) -> ExitCode {
    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn dispatch(cli: Cli) -> Result<(), ThrustError> {
    let config = load_config(cli.config.as_deref())?;
    validate_projection_config(&config)?;
    validate_timeline_config(&config)?;
    let anchor = today();

    // The projector is a pure function of its inputs and never reads holdings.
    if let Command::Project {
        initial,
        monthly,
        engine,
        goal,
        max_years,
        points,
    } = cli.command
    {
        let mut request = build_projection_request(&config)?;
        apply_projection_overrides(&mut request, initial, monthly, engine, goal, max_years)?;
        run_project(&request, points, anchor);
        return Ok(());
    }

    if cli.data.is_none() {
        validate_data_config(&config)?;
    }
    let holdings = holdings_source(&config, cli.data)?;

    match cli.command {
        Command::Summary => run_summary(&holdings),
        Command::Engines { metric, limit } => run_engines(&holdings, &metric, limit),
        Command::Project { .. } => Ok(()),
        Command::Income {
            goal,
            years,
            engine,
        } => {
            let years = check_horizon("income", "years", years)?;
            run_income(&holdings, goal, years, engine.as_deref(), anchor)
        }
        Command::Timeline { period } => {
            run_timeline(&holdings, resolve_period(&config, period.as_deref()), anchor)
        }
        Command::FlightLog { period } => {
            run_flight_log(&holdings, resolve_period(&config, period.as_deref()), anchor)
        }
        Command::Movers { limit } => run_movers(&holdings, limit),
        Command::Search { term, engine } => run_search(&holdings, &term, engine.as_deref()),
        Command::Serve => run_serve(config, holdings),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Load the INI file, or an empty configuration when none is given.
pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, ThrustError> {
    match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            FileConfigAdapter::from_file(p)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// Resolve the holdings CSV and wrap it in the TTL cache.
pub fn holdings_source(
    config: &dyn ConfigPort,
    data_override: Option<PathBuf>,
) -> Result<CachedHoldings<CsvHoldingsAdapter>, ThrustError> {
    let path = data_override
        .or_else(|| config.get_string("data", "path").map(PathBuf::from))
        .ok_or_else(|| ThrustError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })?;
    let ttl = match config.get_int("data", "cache_ttl_secs", DEFAULT_TTL.as_secs() as i64) {
        _ if !config.get_bool("data", "cache", true) => Duration::ZERO,
        secs if secs >= 0 => Duration::from_secs(secs as u64),
        _ => DEFAULT_TTL,
    };
    Ok(CachedHoldings::new(CsvHoldingsAdapter::new(path), ttl))
}

fn invalid_projection(key: &str, reason: &str) -> ThrustError {
    ThrustError::ConfigInvalid {
        section: "projection".into(),
        key: key.into(),
        reason: reason.into(),
    }
}

fn apply_projection_overrides(
    request: &mut ProjectionRequest,
    initial: Option<f64>,
    monthly: Option<f64>,
    engine: Option<String>,
    goal: Option<f64>,
    max_years: Option<u32>,
) -> Result<(), ThrustError> {
    for (key, value) in [
        ("initial_investment", initial),
        ("monthly_investment", monthly),
        ("desired_goal", goal),
    ] {
        if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
            return Err(invalid_projection(key, "must be a non-negative number"));
        }
    }
    if let Some(v) = initial {
        request.initial_investment = v;
    }
    if let Some(v) = monthly {
        request.monthly_investment = v;
    }
    if let Some(v) = goal {
        request.desired_goal = v;
    }
    if let Some(e) = engine {
        request.engine_type = e.parse()?;
    }
    if let Some(years) = max_years {
        request.max_years = check_horizon("projection", "max_years", years)?;
    }
    Ok(())
}

fn resolve_period(config: &dyn ConfigPort, flag: Option<&str>) -> TimePeriod {
    flag.map(str::to_string)
        .or_else(|| config.get_string("timeline", "period"))
        .map(|k| TimePeriod::from_key(&k))
        .unwrap_or_default()
}

fn parse_engine(engine: Option<&str>) -> Result<Option<EngineType>, ThrustError> {
    engine.map(str::parse).transpose()
}

fn load_holdings(source: &dyn HoldingsPort) -> Result<Vec<Holding>, ThrustError> {
    eprintln!("Loading holdings from {}", source.source_name());
    let holdings = source.load_holdings()?;
    eprintln!("Loaded {} holdings", holdings.len());
    Ok(holdings)
}

fn run_summary(source: &dyn HoldingsPort) -> Result<(), ThrustError> {
    let holdings = load_holdings(source)?;
    let gauges = PortfolioGauges::compute(&holdings);
    let snapshot = &gauges.snapshot;

    println!("Total value:      {}", format_currency(snapshot.total_value, 2));
    println!("Yearly thrust:    {}", format_currency(snapshot.total_yearly_thrust, 2));
    println!("Monthly income:   {}", format_currency(gauges.income_per_month, 2));
    println!(
        "Overall health:   {} ({})",
        snapshot.overall_health,
        health_status(u32::from(snapshot.overall_health))
    );
    println!(
        "Engine integrity: {} ({})",
        gauges.engine_integrity,
        integrity_status(gauges.engine_integrity)
    );
    println!(
        "Engine level:     {} {}",
        gauges.avg_engine_level,
        classify_gauge(gauges.avg_engine_level, GaugeKind::EngineLevel)
    );
    println!(
        "Reliability:      {} {}",
        gauges.thrust_reliability,
        classify_gauge(gauges.thrust_reliability, GaugeKind::ThrustReliability)
    );
    println!(
        "Energy cost:      {} {}",
        gauges.avg_energy_cost,
        classify_gauge(gauges.avg_energy_cost, GaugeKind::EnergyCost)
    );
    println!();
    for (engine, count) in engine_type_breakdown(&holdings) {
        println!("  {engine:<24} {count}");
    }
    Ok(())
}

fn run_engines(source: &dyn HoldingsPort, metric: &str, limit: usize) -> Result<(), ThrustError> {
    let metric: RankMetric = metric.parse()?;
    let holdings = load_holdings(source)?;
    let top = top_by_type(&holdings, metric, limit);

    for engine in EngineType::ALL {
        let profile = engine.profile();
        println!(
            "{} {}: yield {}, NAV drag {}",
            profile.emoji,
            profile.label,
            format_percent(profile.default_yield),
            format_percent(profile.default_nav_drag * 100.0)
        );
        for h in top.get(&engine).map(Vec::as_slice).unwrap_or_default() {
            println!(
                "    {:<8} {:>10} {:>10}",
                h.ticker,
                format_currency_table(h.current_value),
                format_currency_table(h.yearly_thrust)
            );
        }
    }
    Ok(())
}

fn run_project(request: &ProjectionRequest, points: usize, anchor: NaiveDate) {
    let result = project(request, anchor);

    println!(
        "{} from {} plus {}/month, goal {}",
        request.engine_type,
        format_currency(request.initial_investment, 1),
        format_currency(request.monthly_investment, 0),
        format_currency(request.desired_goal, 1)
    );
    match result.goal {
        Some(g) => println!(
            "Goal reached after {} years at {}",
            g.years_to_goal,
            format_currency(g.value_at_goal, 2)
        ),
        None => println!(
            "Goal not reached within {} years, final value {}",
            request.max_years,
            format_currency(result.final_value, 2)
        ),
    }
    for point in result.chart_window(points) {
        println!("  {}  {:>10}", point.date, format_currency_chart(point.value));
    }
}

fn run_income(
    source: &dyn HoldingsPort,
    goal: Option<f64>,
    years: u32,
    engine: Option<&str>,
    anchor: NaiveDate,
) -> Result<(), ThrustError> {
    let explicit_engine = parse_engine(engine)?;
    let holdings = load_holdings(source)?;
    let current: f64 = holdings.iter().map(|h| h.yearly_thrust).sum();
    let engine_type = explicit_engine.or_else(|| dominant_engine_type(&holdings));
    let goal = goal.unwrap_or(current * 2.0);

    let income = project_income(current, goal, engine_type, years, anchor);
    println!(
        "Current thrust {} / goal {} ({}% yield, {} drag)",
        format_currency(income.current_thrust, 2),
        format_currency(income.goal_thrust, 2),
        income.default_yield,
        income.default_nav_drag
    );
    println!("{}", income_outcome(&income, years));
    for point in income.timeline.iter().step_by(12) {
        println!("  {}  {:>10}", point.date, format_currency(point.annual_thrust, 2));
    }
    Ok(())
}

fn income_outcome(income: &IncomeProjection, years: u32) -> String {
    if income.goal_reached {
        format!("Goal reached in {} years", income.years_to_goal)
    } else {
        format!("Goal not reached within {years} years")
    }
}

fn run_timeline(
    source: &dyn HoldingsPort,
    period: TimePeriod,
    anchor: NaiveDate,
) -> Result<(), ThrustError> {
    let holdings = load_holdings(source)?;
    let timeline = generate_timeline(&holdings, period.months_past(), period.months_future(), anchor);

    println!(
        "{} window, average yield {}",
        period.label(),
        format_percent(timeline.avg_yield * 100.0)
    );
    for (i, p) in timeline.points.iter().enumerate() {
        let marker = if i == timeline.present_index { '*' } else { ' ' };
        println!(
            "{marker} {}  {:>10}  {:>10}",
            p.date,
            format_currency_chart(p.portfolio_value),
            format_currency_chart(p.benchmark_value)
        );
    }
    Ok(())
}

fn run_flight_log(
    source: &dyn HoldingsPort,
    period: TimePeriod,
    anchor: NaiveDate,
) -> Result<(), ThrustError> {
    let holdings = load_holdings(source)?;
    let log = generate_flight_log(&holdings, period.months_past() as u32, anchor);

    println!(
        "Speed {}/month, distance {}",
        format_currency(speed(&log), 2),
        format_currency(distance(&log), 2)
    );
    for entry in &log {
        println!(
            "  {}  {:>10}  {:>10}",
            entry.date,
            format_currency_table(entry.actual_wealth),
            format_currency_table(entry.projected_wealth)
        );
    }

    let metrics = PeriodMetrics::compute(period);
    println!();
    println!(
        "{}: invested {}, gained {} ({}), benchmark {}",
        period.label(),
        format_currency(metrics.total_invested, 1),
        format_currency(metrics.total_gained, 1),
        format_percent(metrics.total_gained_percent),
        format_percent(metrics.benchmark_growth_percent)
    );
    for p in contribution_chart(period, anchor) {
        println!(
            "  {}  {:>8}  {:>8}  {:>8}",
            p.date,
            format_currency_chart(p.money_invested),
            format_currency_chart(p.portfolio_value),
            format_currency_chart(p.benchmark_value)
        );
    }
    Ok(())
}

fn run_movers(source: &dyn HoldingsPort, limit: usize) -> Result<(), ThrustError> {
    let holdings = load_holdings(source)?;
    for h in top_movers(&holdings, limit) {
        println!(
            "{:<8} {:>10} {:>10} {:>7}",
            h.ticker,
            format_currency_table(h.current_value),
            format_currency_table(h.yearly_thrust),
            format_percent(dividend_yield_estimate(h))
        );
    }
    Ok(())
}

fn run_search(source: &dyn HoldingsPort, term: &str, engine: Option<&str>) -> Result<(), ThrustError> {
    let engine = parse_engine(engine)?;
    let holdings = load_holdings(source)?;
    let matched = filter_holdings(&holdings, term, engine);
    for h in &matched {
        let engine = h.engine_type.map_or("Unknown", EngineType::label);
        println!(
            "{:<8} {:<10} {:<24} {:>10}",
            h.ticker,
            h.frequency,
            engine,
            format_currency_table(h.current_value)
        );
    }
    eprintln!("{} of {} holdings matched", matched.len(), holdings.len());
    Ok(())
}

#[cfg(feature = "web")]
fn run_serve(
    config: FileConfigAdapter,
    holdings: CachedHoldings<CsvHoldingsAdapter>,
) -> Result<(), ThrustError> {
    use crate::adapters::web::{AppState, build_router};
    use std::net::SocketAddr;
    use std::sync::Arc;

    let listen = config
        .get_string("web", "listen")
        .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
    let addr: SocketAddr = listen.parse().map_err(|_| ThrustError::ConfigInvalid {
        section: "web".into(),
        key: "listen".into(),
        reason: format!("'{listen}' is not a socket address"),
    })?;

    eprintln!("Serving {} on http://{}", holdings.source_name(), addr);
    let state = AppState {
        holdings: Arc::new(holdings),
        config: Arc::new(config),
    };
    let router = build_router(state);

    tokio::runtime::Runtime::new()?.block_on(async {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, "web server listening");
        axum::serve(listener, router).await
    })?;
    Ok(())
}

#[cfg(not(feature = "web"))]
fn run_serve(
    _config: FileConfigAdapter,
    _holdings: CachedHoldings<CsvHoldingsAdapter>,
) -> Result<(), ThrustError> {
    Err(ThrustError::ConfigInvalid {
        section: "web".into(),
        key: "listen".into(),
        reason: "thrustdeck was built without the web feature".into(),
    })
}
