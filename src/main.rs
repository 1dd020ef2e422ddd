//! PhishScan CLI
//!
//! Terminal client for the PhishScan backend:
//! - Scan a URL and print the verdict
//! - Show backend statistics
//! - Browse and export the local scan history
//! - Clear history and notify theme changes

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use phishscan::config::{generate_default_config, Config, LoggingConfig};
use phishscan::history::{HistoryFile, ScanHistory, ScanHistoryEntry};
use phishscan::verdict::{ShapBar, ShapDirection, VerdictView};
use phishscan::{HttpScanApi, ScanApi, ScanController, Stats, Theme};

/// Characters in a full-width SHAP bar
const SHAP_BAR_WIDTH: usize = 30;

#[derive(Parser)]
#[command(name = "phishscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check URLs against the PhishScan service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: ~/.config/phishscan/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a URL
    Scan {
        /// Absolute URL, e.g. https://example.com
        url: String,
    },

    /// Show backend statistics
    Stats,

    /// List recent scans
    History {
        /// Print the plain-text report of entry N (1 = newest)
        #[arg(short, long)]
        report: Option<usize>,
    },

    /// Clear backend and local history
    ClearHistory,

    /// Tell the backend about a theme change
    Theme {
        /// light or dark
        theme: Theme,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    init_logging(&config.logging);

    let api = HttpScanApi::new(&config.api.base_url, config.api.request_timeout())?;
    let history_file = HistoryFile::new(config.history.path());

    match cli.command {
        Commands::Scan { url } => {
            let controller = ScanController::new(api);

            let view = match controller.submit(&url).await {
                Ok(view) => view,
                Err(e) if e.is_validation() => bail!("{}", e),
                Err(e) => {
                    tracing::debug!(error = %e, "Scan failed");
                    bail!("{}", e.user_message());
                }
            };

            print!("{}", render_verdict(&view));

            if let Some(entry) = controller.session().history.get(0).cloned() {
                let mut history = history_file.load()?;
                history.record(entry);
                history_file.save(&history)?;
            }

            if let Some(stats) = controller.stats() {
                println!();
                print_stats(&stats);
            }
        }

        Commands::Stats => {
            let stats = api.stats().await.map_err(|e| {
                tracing::debug!(error = %e, "Stats request failed");
                anyhow::anyhow!(e.user_message())
            })?;
            print_stats(&stats);
        }

        Commands::History { report } => {
            let history = history_file.load()?;

            match report {
                Some(n) => {
                    let entry = n
                        .checked_sub(1)
                        .and_then(|i| history.get(i))
                        .with_context(|| format!("No history entry #{} ({} stored)", n, history.len()))?;
                    print!("{}", entry.report_text());
                }
                None => print_history(&history),
            }
        }

        Commands::ClearHistory => {
            let controller = ScanController::new(api);
            let response = controller
                .clear_history()
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;

            if !response.is_success() {
                bail!(
                    "Backend refused to clear history: {}",
                    response.message.unwrap_or(response.status)
                );
            }

            history_file.save(&ScanHistory::default())?;
            println!(
                "{}",
                response.message.as_deref().unwrap_or("History cleared")
            );
        }

        Commands::Theme { theme } => {
            // Best-effort, like the web UI
            match api.set_theme(theme).await {
                Ok(()) => println!("Theme set to {}", theme),
                Err(e) => tracing::warn!(theme = %theme, error = %e, "Theme notification failed"),
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("phishscan={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn render_verdict(view: &VerdictView) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", view.style.icon(), view.title()));
    out.push_str(&format!("URL:        {}\n", view.url));
    out.push_str(&format!("Confidence: {}\n", view.confidence_text));
    if !view.message.is_empty() {
        out.push_str(&format!("{}\n", view.message));
    }

    if !view.features.is_empty() {
        out.push_str("\nFeatures:\n");
        for row in &view.features {
            out.push_str(&format!("  {}\n", row.line()));
        }
    }

    if !view.shap_bars.is_empty() {
        let label_width = view
            .shap_bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0);

        out.push_str("\nFeature contributions:\n");
        for bar in &view.shap_bars {
            out.push_str(&format!(
                "  {:<width$}  {}\n",
                bar.label,
                shap_bar_text(bar),
                width = label_width
            ));
        }
    }

    out
}

/// `+0.30 |#########` for positive, `-0.30 |---------` for negative values
fn shap_bar_text(bar: &ShapBar) -> String {
    let cells = ((bar.width_pct / 100.0) * SHAP_BAR_WIDTH as f64).round() as usize;
    let fill = match bar.direction {
        ShapDirection::Positive => '#',
        ShapDirection::Negative => '-',
    };
    format!(
        "{:>6} |{}",
        bar.value_text(),
        std::iter::repeat(fill).take(cells).collect::<String>()
    )
}

fn print_stats(stats: &Stats) {
    println!("Total scans:     {}", stats.total_scans);
    println!("Threats blocked: {}", stats.threats_blocked);
}

fn print_history(history: &ScanHistory) {
    if history.is_empty() {
        println!("No scans recorded yet.");
        println!();
        println!("Scan your first URL with:");
        println!("  phishscan scan https://example.com");
        return;
    }

    println!("{:<4} {:<12} {:<20} {}", "#", "Status", "Time", "URL");
    println!("{}", "-".repeat(72));
    for (i, entry) in history.iter().enumerate() {
        print_history_row(i + 1, entry);
    }
}

fn print_history_row(n: usize, entry: &ScanHistoryEntry) {
    println!(
        "{:<4} {:<12} {:<20} {}",
        n,
        entry.status.as_str(),
        entry
            .timestamp
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M"),
        entry.url
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishscan::ScanResult;

    fn view() -> VerdictView {
        let result: ScanResult = serde_json::from_str(
            r#"{"status": "dangerous", "message": "Known phishing kit",
                "confidence": 0.8765,
                "features": {"url_length": 112, "has_ip": true},
                "shap_values": {"url_length": 0.5, "has_ip": -1.7}}"#,
        )
        .unwrap();
        VerdictView::from_result("http://198.51.100.7/login", &result)
    }

    #[test]
    fn test_render_verdict() {
        let text = render_verdict(&view());
        assert!(text.contains("Dangerous URL"));
        assert!(text.contains("Confidence: 87.65%"));
        assert!(text.contains("  url length: 112\n"));
        assert!(text.contains("  has ip: true\n"));
    }

    #[test]
    fn test_shap_bar_text() {
        let bars = view().shap_bars;
        assert_eq!(shap_bar_text(&bars[0]), format!(" +0.50 |{}", "#".repeat(15)));
        // Capped at the full track
        assert_eq!(shap_bar_text(&bars[1]), format!(" -1.70 |{}", "-".repeat(30)));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["phishscan", "theme", "dark"]).unwrap();
        assert!(matches!(cli.command, Commands::Theme { theme: Theme::Dark }));

        let cli = Cli::try_parse_from(["phishscan", "history", "--report", "2"]).unwrap();
        assert!(matches!(cli.command, Commands::History { report: Some(2) }));

        assert!(Cli::try_parse_from(["phishscan", "theme", "sepia"]).is_err());
    }
}
