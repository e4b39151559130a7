//! Polyscreener: Polymarket market screener with smart-wallet tracking
//!
//! Usage:
//!   polyscreener serve --port 3001 - Launch web server with UI
//!   polyscreener markets --sector crypto - Print a market list
//!   polyscreener market <slug-or-id> - Print one market's detail
//!   polyscreener leaderboard --search whale - Print the smart-wallet leaderboard

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use clap::{Parser, Subcommand};
use engine::format::{format_cents, format_pnl, format_usd, short_address};
use engine::{
    normalize_wallet_address, HttpMarketSource, Screener, ScreenerConfig, Sector,
};
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

const APP_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "-", env!("GIT_HASH"));

/// Default and cap for `?first=` on subgraph routes
const DEFAULT_SUBGRAPH_FIRST: u32 = 50;
const MAX_SUBGRAPH_FIRST: u32 = 1000;

#[derive(Parser)]
#[command(name = "polyscreener")]
#[command(about = "Polymarket market screener with smart-wallet tracking", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the screener web server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value_t = 3001)]
        port: u16,
    },
    /// List markets for a sector
    Markets {
        /// trending, new, politics, crypto, sports, smart
        #[arg(long, default_value = "trending")]
        sector: String,
        /// Case-insensitive search on the question
        #[arg(long, default_value = "")]
        search: String,
        /// Rows to print (max 50)
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Show one market by slug or ID
    Market {
        /// Market slug or Gamma market ID
        id: String,
    },
    /// Show the smart-wallet leaderboard
    Leaderboard {
        /// Filter by username or twitter handle
        #[arg(long, default_value = "")]
        search: String,
    },
}

#[derive(Clone)]
struct AppState {
    screener: Arc<Screener<HttpMarketSource>>,
    pinned_wallet: Arc<RwLock<Option<String>>>,
}

impl AppState {
    fn pinned(&self) -> Option<String> {
        self.pinned_wallet
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn set_pinned(&self, wallet: Option<String>) {
        *self.pinned_wallet.write().unwrap_or_else(|e| e.into_inner()) = wallet;
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug,engine=debug,polyscreener=debug")
    } else {
        EnvFilter::new("info,engine=info,polyscreener=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).compact())
        .with(filter)
        .init();
}

fn build_screener() -> anyhow::Result<Screener<HttpMarketSource>> {
    let config = ScreenerConfig::from_env();
    info!(
        gamma = %config.gamma_url,
        clob = %config.clob_url,
        data = %config.data_url,
        "Upstream endpoints"
    );
    Ok(Screener::from_config(&config)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dotenvy::dotenv().ok();

    match cli.command {
        Commands::Serve { host, port } => {
            cmd_serve(&host, port).await?;
        }
        Commands::Markets {
            sector,
            search,
            limit,
        } => {
            cmd_markets(&sector, &search, limit).await?;
        }
        Commands::Market { id } => {
            cmd_market(&id).await?;
        }
        Commands::Leaderboard { search } => {
            cmd_leaderboard(&search)?;
        }
    }

    Ok(())
}

// ============================================================================
// Serve command: Axum web server
// ============================================================================

async fn cmd_serve(host: &str, port: u16) -> anyhow::Result<()> {
    info!("Polyscreener v{} starting...", APP_VERSION);

    let state = AppState {
        screener: Arc::new(build_screener()?),
        pinned_wallet: Arc::new(RwLock::new(None)),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Determine static files directory
    let exe_path = std::env::current_exe().unwrap_or_default();
    let exe_dir = exe_path.parent().unwrap_or(std::path::Path::new("."));
    let dist_dir = exe_dir.join("dist");
    let static_dir = if dist_dir.exists() {
        dist_dir
    } else {
        std::path::PathBuf::from("dist")
    };

    let app = Router::new()
        .nest("/api", api_routes(state))
        .fallback_service(ServeDir::new(&static_dir))
        .layer(cors);

    let addr: std::net::SocketAddr = format!("{}:{}", host, port).parse()?;
    println!("\n=== Polyscreener v{} ===", APP_VERSION);
    println!("Market Screener Server");
    println!("Listening on http://{}", addr);
    println!("\nEndpoints:");
    println!("  GET  /api/health              - Health check");
    println!("  GET  /api/markets             - Market list (?sector&search&limit)");
    println!("  GET  /api/markets/:id         - Market detail by slug or ID");
    println!("  GET  /api/orderbook           - Order book depth (?token_id)");
    println!("  GET  /api/leaderboard         - Smart-wallet leaderboard (?search)");
    println!("  GET  /api/leaderboard/live    - Live PNL leaderboard");
    println!("  GET  /api/traders/:address    - Trader stats");
    println!("  GET  /api/ticker              - BTC/ETH/SOL 24h ticker");
    println!("  *    /api/pin                 - Get, set or clear the pinned wallet");
    println!("  GET  /api/subgraph/:kind      - positions, activity, pnl, orders, open-interest");
    println!("\nPress Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api_health))
        .route("/markets", get(api_markets))
        .route("/markets/:id", get(api_market_detail))
        .route("/orderbook", get(api_order_book))
        .route("/leaderboard", get(api_leaderboard))
        .route("/leaderboard/live", get(api_live_leaderboard))
        .route("/traders/:address", get(api_trader))
        .route("/ticker", get(api_ticker))
        .route("/pin", get(api_get_pin).post(api_set_pin).delete(api_clear_pin))
        .route("/subgraph/:kind", get(api_subgraph))
        .with_state(state)
}

// ============================================================================
// CLI commands
// ============================================================================

async fn cmd_markets(sector: &str, search: &str, limit: usize) -> anyhow::Result<()> {
    let sector = Sector::from_str(sector).map_err(|e| anyhow::anyhow!(e))?;
    let screener = build_screener()?;
    let listing = screener.markets(sector, search, limit).await;

    println!("\n=== Polyscreener v{} ===", APP_VERSION);
    println!(
        "{} markets | {} total volume | {} with smart money",
        listing.summary.total_markets,
        format_usd(listing.summary.total_volume),
        listing.summary.smart_markets
    );
    println!("\n{} ({} shown):", sector.as_str().to_uppercase(), listing.markets.len());
    println!(
        "  {:>3}  {:<60} {:>8} {:>8} {:>10} {:>5}",
        "#", "Question", "YES", "NO", "Vol 24h", "Smart"
    );
    println!("  {}", "-".repeat(100));
    for (i, row) in listing.markets.iter().enumerate() {
        println!(
            "  {:>3}  {:<60} {:>8} {:>8} {:>10} {:>5}",
            i + 1,
            truncate(&row.market.question, 60),
            format_cents(row.yes_price),
            format_cents(row.no_price()),
            format_usd(row.market.volume24hr.unwrap_or(0.0)),
            row.smart_count,
        );
    }
    if listing.markets.is_empty() {
        println!("\nNo markets found.");
    }
    Ok(())
}

async fn cmd_market(id: &str) -> anyhow::Result<()> {
    let screener = build_screener()?;
    let Some(detail) = screener.market_detail(id, None).await else {
        println!("MARKET_NOT_FOUND: {}", id);
        return Ok(());
    };

    println!("\n{}", detail.market.question);
    println!(
        "YES {} | NO {} | {} | Volume {} | Liquidity {}",
        format_cents(detail.yes_price),
        format_cents(detail.no_price),
        detail.category.label(),
        format_usd(detail.market.volume.unwrap_or(0.0)),
        format_usd(detail.market.liquidity.unwrap_or(0.0)),
    );

    let tag = if detail.smart_wallets.is_simulated() {
        " (simulated)"
    } else {
        ""
    };
    println!("\nSmart money: {} wallets{}", detail.smart_wallets.len(), tag);
    for p in &detail.smart_wallets.positions {
        println!(
            "  {:<20} {:<15} {:<4} {:>10} {:>10}",
            p.username,
            short_address(&p.address),
            p.outcome.label(),
            format_usd(p.value),
            format_pnl(p.unrealized_pnl),
        );
    }

    if let Some(book) = &detail.order_book {
        println!(
            "\nOrder book: spread {} ({:.2}%) | {} bids | {} asks",
            book.spread,
            book.spread_pct,
            book.bids.len(),
            book.asks.len()
        );
    }

    if !detail.recent_trades.is_empty() {
        println!("\nRecent trades:");
        for t in &detail.recent_trades {
            let who = t
                .username
                .clone()
                .unwrap_or_else(|| short_address(&t.wallet));
            println!(
                "  {:<4} {:<4} {:>10} @ {:<6} {}",
                t.side,
                t.outcome,
                format_usd(t.value),
                format_cents(t.price * 100.0),
                who
            );
        }
    }
    Ok(())
}

fn cmd_leaderboard(search: &str) -> anyhow::Result<()> {
    let screener = build_screener()?;
    let view = screener.leaderboard(search);

    println!(
        "\nTracking {} wallets | {} combined PNL",
        view.tracked_wallets,
        format_usd(view.total_pnl)
    );
    println!(
        "  {:>3}  {:<20} {:<15} {:>10} {:>10} {:>6} {:>6}",
        "#", "Trader", "Wallet", "PNL", "Volume", "WR%", "Trades"
    );
    println!("  {}", "-".repeat(80));
    for r in &view.rows {
        println!(
            "  {:>3}  {:<20} {:<15} {:>10} {:>10} {:>5.0}% {:>6}",
            r.rank,
            r.username,
            r.address,
            format_pnl(r.pnl),
            format_usd(r.volume),
            r.win_rate * 100.0,
            r.trades,
        );
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

// ============================================================================
// API Handlers: Markets
// ============================================================================

/// GET /api/health
async fn api_health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "polyscreener",
        "version": APP_VERSION,
    }))
}

#[derive(Deserialize)]
struct MarketsParams {
    sector: Option<String>,
    #[serde(default)]
    search: String,
    limit: Option<usize>,
}

/// GET /api/markets: sector list with summary
async fn api_markets(
    State(state): State<AppState>,
    Query(params): Query<MarketsParams>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let sector = match params.sector.as_deref() {
        Some(s) => Sector::from_str(s).map_err(bad_request)?,
        None => Sector::default(),
    };
    let listing = state
        .screener
        .markets(sector, &params.search, params.limit.unwrap_or(engine::markets::MAX_LISTED))
        .await;
    Ok(Json(json!(listing)))
}

/// GET /api/markets/:id: detail by slug or market ID
async fn api_market_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let pinned = state.pinned();
    match state.screener.market_detail(&id, pinned.as_deref()).await {
        Some(detail) => Ok(Json(json!(detail))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "MARKET_NOT_FOUND", "id": id })),
        )),
    }
}

#[derive(Deserialize)]
struct OrderBookParams {
    token_id: Option<String>,
}

/// GET /api/orderbook?token_id=
async fn api_order_book(
    State(state): State<AppState>,
    Query(params): Query<OrderBookParams>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let token_id = params
        .token_id
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| bad_request("token_id is required".to_string()))?;
    Ok(Json(json!(state.screener.order_book(&token_id).await)))
}

// ============================================================================
// API Handlers: Leaderboard & traders
// ============================================================================

#[derive(Deserialize)]
struct LeaderboardParams {
    #[serde(default)]
    search: String,
}

/// GET /api/leaderboard: derived smart-wallet leaderboard
async fn api_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Json<serde_json::Value> {
    Json(json!(state.screener.leaderboard(&params.search)))
}

/// GET /api/leaderboard/live: Data API PNL leaderboard, tracked wallets tagged
async fn api_live_leaderboard(State(state): State<AppState>) -> Json<serde_json::Value> {
    let rows = state.screener.live_leaderboard().await;
    Json(json!({ "count": rows.len(), "entries": rows }))
}

/// GET /api/traders/:address: hover-card stats
async fn api_trader(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let address = normalize_wallet_address(&address)
        .ok_or_else(|| bad_request(format!("invalid wallet address: {address}")))?;
    Ok(Json(json!(state.screener.trader_stats(&address).await)))
}

/// GET /api/ticker
async fn api_ticker(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "quotes": state.screener.ticker().await }))
}

// ============================================================================
// API Handlers: Pinned wallet
// ============================================================================

#[derive(Deserialize)]
struct PinRequest {
    address: String,
}

/// GET /api/pin
async fn api_get_pin(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "wallet": state.pinned() }))
}

/// POST /api/pin: `{"address": "0x..."}`
async fn api_set_pin(
    State(state): State<AppState>,
    Json(request): Json<PinRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let wallet = normalize_wallet_address(&request.address)
        .ok_or_else(|| bad_request(format!("invalid wallet address: {}", request.address)))?;
    info!(wallet = %wallet, "Pinned wallet");
    state.set_pinned(Some(wallet.clone()));
    Ok(Json(json!({ "wallet": wallet })))
}

/// DELETE /api/pin
async fn api_clear_pin(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.set_pinned(None);
    Json(json!({ "wallet": null }))
}

// ============================================================================
// API Handlers: Subgraphs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubgraphKind {
    Positions,
    Activity,
    Pnl,
    Orders,
    OpenInterest,
}

impl FromStr for SubgraphKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positions" => Ok(Self::Positions),
            "activity" => Ok(Self::Activity),
            "pnl" => Ok(Self::Pnl),
            "orders" => Ok(Self::Orders),
            "open-interest" => Ok(Self::OpenInterest),
            other => Err(format!("unknown subgraph: {other}")),
        }
    }
}

#[derive(Deserialize)]
struct SubgraphParams {
    first: Option<u32>,
}

fn clamp_first(first: Option<u32>) -> u32 {
    first
        .unwrap_or(DEFAULT_SUBGRAPH_FIRST)
        .clamp(1, MAX_SUBGRAPH_FIRST)
}

/// GET /api/subgraph/:kind?first=
async fn api_subgraph(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<SubgraphParams>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let kind = SubgraphKind::from_str(&kind)
        .map_err(|e| (StatusCode::NOT_FOUND, Json(json!({ "error": e }))))?;
    let first = clamp_first(params.first);
    let screener = &state.screener;

    let items = match kind {
        SubgraphKind::Positions => json!(screener.subgraph_positions(first).await),
        SubgraphKind::Activity => json!(screener.subgraph_activity(first).await),
        SubgraphKind::Pnl => json!(screener.subgraph_pnl(first).await),
        SubgraphKind::Orders => json!(screener.subgraph_order_fills(first).await),
        SubgraphKind::OpenInterest => json!(screener.subgraph_open_interest(first).await),
    };
    Ok(Json(json!({ "first": first, "items": items })))
}

fn bad_request(message: String) -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}
