mod display;
mod surface;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use casejump_core::placement::placement;
use casejump_core::resolve::DEFAULT_SITE;
use casejump_core::{DisplayArea, EntryPoint, PatternCatalog, Selection, UrlResolver, classify};
use casejump_host::{Host, HostConfig, Lookup, Request, Response, VerifyStrategy, run_session};
use casejump_store::{JsonFileBackend, StateStore};
use casejump_verify::HttpProbe;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{Level, info, warn};

use crate::surface::TerminalSurface;

type CliHost = Host<JsonFileBackend, HttpProbe, TerminalSurface>;

/// Jump from selected Korean legal text to the matching CaseNote page.
#[derive(Parser)]
#[command(name = "casejump", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file holding settings, history, and window bounds
    #[arg(long, global = true, env = "CASEJUMP_STATE", default_value = "casejump-state.json")]
    state: PathBuf,

    /// Destination site base URL
    #[arg(long, global = true, env = "CASEJUMP_SITE", default_value = DEFAULT_SITE)]
    site: String,

    /// Seconds to wait for an existence probe
    #[arg(long, global = true, env = "CASEJUMP_PROBE_TIMEOUT_SECS", default_value_t = 10)]
    probe_timeout_secs: u64,

    /// How precedent pages are verified: probe | post-navigation
    #[arg(long, global = true, env = "CASEJUMP_STRATEGY", default_value_t = VerifyStrategy::Probe)]
    strategy: VerifyStrategy,

    /// Display work-area width used for popup placement
    #[arg(long, global = true, default_value_t = 1920)]
    display_width: i32,

    /// Display work-area height used for popup placement
    #[arg(long, global = true, default_value_t = 1080)]
    display_height: i32,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how a selection classifies and where it would go (no network)
    Classify {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Look up a selection, open it, and record it in history
    Search {
        #[arg(required = true)]
        text: Vec<String>,
        /// Only try court case numbers
        #[arg(long, conflicts_with = "law")]
        precedent: bool,
        /// Search within one statute (law id, e.g. civilLaw)
        #[arg(long)]
        law: Option<String>,
    },
    /// Probe several selections concurrently without recording history
    Check {
        #[arg(required = true)]
        selections: Vec<String>,
    },
    /// Show or edit recent lookups
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Replace the label of a history entry
    Title { url: String, title: String },
    /// Show or edit which statutes appear in the menu
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
    /// Print the context-menu tree for the current settings
    Menus,
    /// Print where the popup window would be placed
    Placement,
    /// Serve JSON-lines requests on stdin, one response per line on stdout
    Serve,
}

#[derive(Subcommand)]
enum HistoryAction {
    List,
    Remove { index: usize },
    Clear,
    /// Reopen an entry and move it to the top
    Open { index: usize },
}

#[derive(Subcommand)]
enum SettingsAction {
    Show,
    Enable { law_id: String },
    Disable { law_id: String },
    /// Add or remove a favorite (at most three)
    Favorite { law_id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Classify { text } => return classify_only(&cli, &text.join(" ")),
        Commands::Placement => return show_placement(&cli).await,
        _ => {}
    }

    let mut host = open_host(&cli)?;
    let result = run(&cli, &mut host).await;
    host.shutdown().await;
    result
}

async fn run(cli: &Cli, host: &mut CliHost) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Search {
            text,
            precedent,
            law,
        } => {
            let selection = text.join(" ");
            let request = match (law, precedent) {
                (Some(law_id), _) => Request::DirectLawSearch {
                    law_id: law_id.clone(),
                    selection,
                },
                (None, true) => Request::PrecedentSearch { selection },
                (None, false) => Request::IntelligentSearch { selection },
            };
            show(host.handle(request).await)
        }
        Commands::Check { selections } => check(host, selections).await,
        Commands::History { action } => {
            let request = match action {
                None | Some(HistoryAction::List) => Request::ListHistory,
                Some(HistoryAction::Remove { index }) => Request::RemoveHistory { index: *index },
                Some(HistoryAction::Clear) => Request::ClearHistory,
                Some(HistoryAction::Open { index }) => {
                    let history = host
                        .store()
                        .history()
                        .list()
                        .await
                        .context("reading history")?;
                    let item = history
                        .get(*index)
                        .cloned()
                        .with_context(|| format!("no history entry at {index}"))?;
                    Request::OpenFromHistory { item }
                }
            };
            show(host.handle(request).await)
        }
        Commands::Title { url, title } => {
            succeeded(
                host.handle(Request::UpdateHistoryTitle {
                    url: url.clone(),
                    new_title: title.clone(),
                })
                .await,
            )?;
            show(host.handle(Request::ListHistory).await)
        }
        Commands::Settings { action } => {
            let change = match action {
                None | Some(SettingsAction::Show) => None,
                Some(SettingsAction::Enable { law_id }) => Some(Request::SetLawEnabled {
                    law_id: law_id.clone(),
                    enabled: true,
                }),
                Some(SettingsAction::Disable { law_id }) => Some(Request::SetLawEnabled {
                    law_id: law_id.clone(),
                    enabled: false,
                }),
                Some(SettingsAction::Favorite { law_id }) => Some(Request::ToggleFavorite {
                    law_id: law_id.clone(),
                }),
            };
            if let Some(request) = change {
                succeeded(host.handle(request).await)?;
            }
            show(host.handle(Request::GetSettings).await)
        }
        Commands::Menus => show(host.handle(Request::UpdateMenus).await),
        Commands::Serve => {
            info!(state = %cli.state.display(), strategy = %cli.strategy, "serving on stdin");
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let handled = run_session(host, stdin, tokio::io::stdout())
                .await
                .context("session I/O")?;
            info!(handled, "session closed");
            Ok(())
        }
        Commands::Classify { .. } | Commands::Placement => Ok(()),
    }
}

fn host_config(cli: &Cli) -> HostConfig {
    HostConfig {
        site: cli.site.trim_end_matches('/').to_string(),
        strategy: strategy_for(cli),
        probe_timeout: Duration::from_secs(cli.probe_timeout_secs),
        display: display_area(cli),
        ..HostConfig::default()
    }
}

/// Page reports only arrive over a `serve` session. A one-shot command
/// exits before any could, so it verifies with a probe instead.
fn strategy_for(cli: &Cli) -> VerifyStrategy {
    match (&cli.command, cli.strategy) {
        (Commands::Serve, strategy) => strategy,
        (_, VerifyStrategy::PostNavigation) => {
            warn!("post-navigation checks need a serve session; probing instead");
            VerifyStrategy::Probe
        }
        (_, strategy) => strategy,
    }
}

fn display_area(cli: &Cli) -> DisplayArea {
    DisplayArea {
        width: cli.display_width,
        height: cli.display_height,
    }
}

fn open_host(cli: &Cli) -> anyhow::Result<CliHost> {
    let config = host_config(cli);
    let store = Arc::new(StateStore::new(JsonFileBackend::new(&cli.state)));
    let probe = HttpProbe::new(config.probe_timeout).context("building HTTP client")?;
    Host::new(config, store, probe, TerminalSurface::default()).context("starting host")
}

fn classify_only(cli: &Cli, text: &str) -> anyhow::Result<()> {
    let catalog = PatternCatalog::standard().context("compiling citation patterns")?;
    let selection = Selection::parse(text).context("nothing to classify")?;
    let classification = classify(&selection, &catalog);
    let target =
        UrlResolver::new(&cli.site).resolve(&classification, &selection, EntryPoint::Intelligent);
    display::print_plan(selection.as_str(), &classification, &target);
    Ok(())
}

async fn show_placement(cli: &Cli) -> anyhow::Result<()> {
    let store = StateStore::new(JsonFileBackend::new(&cli.state));
    let saved = store
        .window_bounds()
        .await
        .with_context(|| format!("reading {}", cli.state.display()))?;
    let source = if saved.is_some() { "saved" } else { "default" };
    display::print_bounds(source, placement(saved, display_area(cli)));
    Ok(())
}

/// Probe every selection at once. Nothing is opened or recorded.
async fn check(host: &CliHost, selections: &[String]) -> anyhow::Result<()> {
    let mut planned = Vec::with_capacity(selections.len());
    for text in selections {
        match Selection::parse(text) {
            Ok(selection) => {
                let target = host
                    .plan(&selection, &Lookup::Intelligent)
                    .with_context(|| format!("resolving {text:?}"))?;
                planned.push((text.as_str(), target));
            }
            Err(_) => warn!(text = %text, "blank selection skipped"),
        }
    }

    let verifier = host.verifier();
    let verdicts =
        futures::future::join_all(planned.iter().map(|(_, target)| verifier.verify(target))).await;
    for ((text, _), verdict) in planned.iter().zip(&verdicts) {
        display::print_verdict(text, verdict);
    }
    Ok(())
}

fn succeeded(response: Response) -> anyhow::Result<Response> {
    match response {
        Response::Failed { message } => anyhow::bail!(message),
        other => Ok(other),
    }
}

fn show(response: Response) -> anyhow::Result<()> {
    display::print_response(&succeeded(response)?);
    Ok(())
}
