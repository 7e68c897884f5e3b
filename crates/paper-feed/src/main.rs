//! Paper Feed - Entry Point
//!
//! Renders the ranked paper list, saves papers and copies paper ids, either
//! as one-shot commands or in an interactive session.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::FixedOffset;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use paper_feed::clipboard::SystemClipboard;
use paper_feed::config::{Config, api};
use paper_feed::notify::TerminalNotifier;
use paper_feed::page::lock;
use paper_feed::render::ControlKind;
use paper_feed::{EventLoop, FeedApp, LoadOutcome, UiEvent};

#[derive(Parser, Debug)]
#[command(name = "paper-feed")]
#[command(about = "Browse, save and copy papers from a ranked paper feed")]
#[command(version)]
struct Cli {
    /// Feed server base URL
    #[arg(long, default_value = api::DEFAULT_BASE_URL, env = "PAPER_FEED_URL", global = true)]
    base_url: String,

    /// Whole-request timeout in seconds (default: wait for the server)
    #[arg(long, env = "PAPER_FEED_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// Show dates in UTC instead of the local time zone
    #[arg(long, global = true)]
    utc: bool,

    /// Insert titles and abstracts without HTML escaping
    #[arg(long, global = true)]
    raw_html: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the paper list and print the rendered papers region
    Render {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Emit a complete HTML document instead of the region only
        #[arg(long)]
        document: bool,
    },
    /// Save a paper by id
    Save {
        /// Paper id, as shown in the feed
        paper_id: String,
    },
    /// Copy a paper id to the system clipboard
    Copy {
        /// Paper id, as shown in the feed
        paper_id: String,
    },
    /// Interactive session on stdin
    Browse,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::new(self.base_url.clone());
        config.request_timeout = self.timeout_secs.map(Duration::from_secs);
        config.render.escape_html = !self.raw_html;
        if self.utc {
            config.render.utc_offset = FixedOffset::east_opt(0);
        }
        config
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so rendered HTML on stdout stays clean.
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %cli.base_url,
        "Starting paper feed"
    );

    let config = cli.config();
    let app = FeedApp::from_config(&config, Arc::new(SystemClipboard), Arc::new(TerminalNotifier))?;

    match cli.command {
        Command::Render { output, document } => render(&app, output, document).await,
        Command::Save { paper_id } => {
            app.save_paper(&paper_id).await?;
            Ok(())
        }
        Command::Copy { paper_id } => {
            app.copy_link(&paper_id).await?;
            Ok(())
        }
        Command::Browse => browse(app).await,
    }
}

async fn render(app: &FeedApp, output: Option<PathBuf>, document: bool) -> anyhow::Result<()> {
    if app.load_papers().await == LoadOutcome::Failed {
        anyhow::bail!("could not load papers (see log)");
    }

    let html = {
        let page = lock(app.page());
        if document { page.document_html() } else { page.papers_html().to_string() }
    };

    match output {
        Some(path) => {
            tokio::fs::write(&path, html).await?;
            tracing::info!(path = %path.display(), "Wrote page");
        }
        None => println!("{html}"),
    }
    Ok(())
}

const BROWSE_HELP: &str = "\
commands:
  list             show loaded papers
  save <n>         click the save button of paper n
  copy <n>         click the copy button of paper n
  submit <id>      fill the save form with <id> and submit it
  reload           fetch the paper list again
  show             print the papers region HTML
  help             this text
  quit             leave (waits for running actions)";

async fn browse(app: FeedApp) -> anyhow::Result<()> {
    let (events, event_loop) = EventLoop::channel(app.clone(), 32);
    let running = tokio::spawn(event_loop.run());

    events.send(UiEvent::Ready).await?;
    println!("{BROWSE_HELP}");

    let mut reader = BufReader::new(tokio::io::stdin());
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            tracing::info!("Stdin closed, shutting down");
            break;
        }

        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let arg = words.next();

        let event = match (command, arg) {
            ("quit" | "exit", _) => break,
            ("help", _) => {
                println!("{BROWSE_HELP}");
                None
            }
            ("list", _) => {
                print_listing(&app);
                None
            }
            ("show", _) => {
                println!("{}", lock(app.page()).papers_html());
                None
            }
            ("reload", _) => Some(UiEvent::Reload),
            ("submit", Some(paper_id)) => {
                lock(app.page()).save_form_mut().set_paper_id(paper_id);
                Some(UiEvent::submit_save_form(app.page()))
            }
            ("save", Some(n)) => click_event(&app, n, ControlKind::SavePaper),
            ("copy", Some(n)) => click_event(&app, n, ControlKind::CopyLink),
            _ => {
                eprintln!("unrecognized command: {}", line.trim());
                None
            }
        };

        if let Some(event) = event {
            events.send(event).await?;
        }
    }

    drop(events);
    let handled = running.await?;
    tracing::info!(handled, "Session finished");
    Ok(())
}

fn click_event(app: &FeedApp, n: &str, kind: ControlKind) -> Option<UiEvent> {
    let Ok(n) = n.parse::<usize>() else {
        eprintln!("expected a paper number, got {n:?}");
        return None;
    };

    let event = n.checked_sub(1).and_then(|block| UiEvent::click(app.page(), block, kind));
    if event.is_none() {
        eprintln!("no paper #{n} on the page");
    }
    event
}

fn print_listing(app: &FeedApp) {
    let page = lock(app.page());
    if page.blocks().is_empty() {
        println!("(no papers loaded)");
        return;
    }
    for (i, block) in page.blocks().iter().enumerate() {
        println!("{:>3}. {}  [{}]", i + 1, block.title, block.paper_id);
    }
}
