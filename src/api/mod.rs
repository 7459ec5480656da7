use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    Frequency, Projection, ProjectionInput, ProjectionResult, ProjectionSample,
    check_frequency_pair, project, resolve,
};

mod report;

pub use report::{ChartPoint, ChartSeries, Summary, format_currency, format_usd, render_table};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    initial_deposit: Option<f64>,
    regular_deposit: Option<f64>,
    years: Option<u32>,
    interest_rate: Option<f64>,
    deposit_frequency: Option<String>,
    compound_frequency: Option<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "compound",
    about = "Compound interest savings projector (regular deposits + periodic compounding)"
)]
struct Cli {
    #[arg(long, default_value_t = 1000.0, help = "Lump sum deposited at time zero")]
    initial_deposit: f64,
    #[arg(
        long,
        default_value_t = 100.0,
        allow_negative_numbers = true,
        help = "Amount added at the end of every deposit period"
    )]
    regular_deposit: f64,
    #[arg(long, default_value_t = 10, help = "Projection horizon in whole years")]
    years: u32,
    #[arg(
        long,
        default_value_t = 5.0,
        allow_negative_numbers = true,
        help = "Annual interest rate in percent, e.g. 5"
    )]
    interest_rate: f64,
    #[arg(
        long,
        default_value = "monthly",
        help = "annually, semi-annually, quarterly, monthly, weekly or daily; unknown labels mean monthly"
    )]
    deposit_frequency: String,
    #[arg(
        long,
        default_value = "monthly",
        help = "Must compound at least as often as deposits"
    )]
    compound_frequency: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    input: ProjectionInput,
    samples: Vec<ProjectionSample>,
    result: ProjectionResult,
    summary: Summary,
    chart: ChartSeries,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn resolve_frequency_label(flag: &str, label: &str) -> u32 {
    if Frequency::from_label(label).is_none() {
        log::warn!(
            "{flag} {label:?} is not a known frequency, using {}",
            Frequency::DEFAULT
        );
    }
    resolve(label)
}

fn build_inputs(cli: &Cli) -> Result<ProjectionInput, String> {
    if !cli.initial_deposit.is_finite() || cli.initial_deposit < 0.0 {
        return Err("--initial-deposit must be a finite number >= 0".to_string());
    }

    if !cli.regular_deposit.is_finite() {
        return Err("--regular-deposit must be a finite number".to_string());
    }

    if !cli.interest_rate.is_finite() {
        return Err("--interest-rate must be a finite number".to_string());
    }

    let deposit_frequency = resolve_frequency_label("--deposit-frequency", &cli.deposit_frequency);
    let compound_frequency =
        resolve_frequency_label("--compound-frequency", &cli.compound_frequency);

    check_frequency_pair(deposit_frequency, compound_frequency).map_err(|e| {
        format!(
            "--compound-frequency {} cannot be combined with --deposit-frequency {}: {e}",
            cli.compound_frequency, cli.deposit_frequency
        )
    })?;

    Ok(ProjectionInput {
        initial_deposit: cli.initial_deposit,
        regular_deposit: cli.regular_deposit,
        years: cli.years,
        annual_interest_rate_percent: cli.interest_rate,
        deposit_frequency,
        compound_frequency,
    })
}

fn run_projection(inputs: &ProjectionInput) -> Result<Projection, String> {
    log::debug!("projecting {inputs:?}");
    project(inputs).map_err(|e| e.to_string())
}

/// Parses command-line flags, projects, and prints the report to stdout.
pub fn run_cli<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            // --help and --version land here; they are output, not failures.
            return e
                .print()
                .map_err(|io| format!("Failed to print usage: {io}"));
        }
        Err(e) => return Err(e.to_string().trim_end().to_string()),
    };
    let inputs = build_inputs(&cli)?;
    let projection = run_projection(&inputs)?;

    match cli.format {
        OutputFormat::Table => print!("{}", render_table(&projection)),
        OutputFormat::Json => {
            let response = build_project_response(inputs, projection);
            let json = serde_json::to_string_pretty(&response)
                .map_err(|e| format!("Failed to serialize projection: {e}"))?;
            println!("{json}");
        }
    }
    Ok(())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    log::info!("Compound interest HTTP API listening on http://{addr}");
    log::info!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    no_store(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    no_store((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    no_store((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_handler_impl(payload: ProjectPayload) -> Response {
    let result = api_inputs_from_payload(payload)
        .and_then(|inputs| run_projection(&inputs).map(|projection| (inputs, projection)));

    match result {
        Ok((inputs, projection)) => {
            no_store(Json(build_project_response(inputs, projection)))
        }
        Err(msg) => {
            log::warn!("rejected projection request: {msg}");
            error_response(StatusCode::BAD_REQUEST, &msg)
        }
    }
}

fn no_store<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    no_store((
        status,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    ))
}

#[cfg(test)]
fn api_inputs_from_json(json: &str) -> Result<ProjectionInput, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_inputs_from_payload(payload)
}

fn api_inputs_from_payload(payload: ProjectPayload) -> Result<ProjectionInput, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.initial_deposit {
        cli.initial_deposit = v;
    }
    if let Some(v) = payload.regular_deposit {
        cli.regular_deposit = v;
    }
    if let Some(v) = payload.years {
        cli.years = v;
    }
    if let Some(v) = payload.interest_rate {
        cli.interest_rate = v;
    }
    if let Some(v) = payload.deposit_frequency {
        cli.deposit_frequency = v;
    }
    if let Some(v) = payload.compound_frequency {
        cli.compound_frequency = v;
    }

    build_inputs(&cli).map_err(|msg| flags_to_api_keys(&msg))
}

/// Validation messages name CLI flags; API callers know the JSON keys instead.
fn flags_to_api_keys(msg: &str) -> String {
    const KEYS: [(&str, &str); 5] = [
        ("--initial-deposit", "initialDeposit"),
        ("--regular-deposit", "regularDeposit"),
        ("--interest-rate", "interestRate"),
        ("--deposit-frequency", "depositFrequency"),
        ("--compound-frequency", "compoundFrequency"),
    ];
    KEYS.into_iter()
        .fold(msg.to_string(), |acc, (flag, key)| acc.replace(flag, key))
}

fn default_cli_for_api() -> Cli {
    Cli {
        initial_deposit: 1_000.0,
        regular_deposit: 100.0,
        years: 10,
        interest_rate: 5.0,
        deposit_frequency: Frequency::Monthly.label().to_string(),
        compound_frequency: Frequency::Monthly.label().to_string(),
        format: OutputFormat::Json,
    }
}

fn build_project_response(inputs: ProjectionInput, projection: Projection) -> ProjectResponse {
    let summary = Summary::from_result(&projection.result);
    let chart = ChartSeries::from_samples(&projection.samples);
    ProjectResponse {
        input: inputs,
        samples: projection.samples,
        result: projection.result,
        summary,
        chart,
    }
}
