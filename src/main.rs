//! AI Therapist CLI
//!
//! Terminal client for the chat server:
//! - Interactive chat session
//! - One-shot messages and coping strategies
//! - Start or clear conversations
//! - Mood dashboard from exported chart data

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use aitherapist::api::{ChatApi, HttpChatApi};
use aitherapist::chat::render::format_plain;
use aitherapist::chat::{ChatController, ChatMessage, ConversationAction, Effect, ModalContent};
use aitherapist::config::{Config, LoggingConfig};
use aitherapist::dashboard::{
    tooltip_label, Attempt, ChartError, ChartKind, ChartMount, ChartOutcome, ChartSpec,
    ChartSurface, DailyMood, DashboardController, DashboardData, EmptyState, MoodTotals,
};
use aitherapist::notify::NotificationId;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "aitherapist")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Talk to the AI Therapist from your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: user config dir, then ./aitherapist.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Chat server URL, overrides the config file
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Conversation to continue
    #[arg(long, global = true)]
    pub conversation: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat session
    Chat,

    /// Send a single message and print the reply
    Send {
        /// Message text
        message: String,
    },

    /// Fetch a coping strategy
    Strategy {
        /// Strategy category
        #[arg(short = 't', long = "type", default_value = "general")]
        kind: String,
    },

    /// Start a new conversation
    NewChat {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete the current conversation
    ClearChat {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Render mood charts from a JSON export
    Dashboard {
        /// File with `chart_data` and `total_stats`
        path: PathBuf,
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
    if let Some(url) = cli.server_url.clone() {
        config.server.base_url = url;
    }

    init_tracing(&config.logging);
    tracing::debug!("Chat server: {}", config.server.base_url);

    match cli.command {
        Commands::Chat => {
            let api = HttpChatApi::new(config.server.clone())?;
            let controller = ChatController::new(api, config.chat, cli.conversation);
            run_session(controller).await?;
        }

        Commands::Send { message } => {
            let api = HttpChatApi::new(config.server.clone())?;
            let mut controller = ChatController::new(api, config.chat, cli.conversation);
            let mut printer = Printer::default();
            printer.skip_existing(controller.state().transcript().messages());

            controller.input(message);
            let effects = controller.submit().await;
            printer.flush(&mut controller, &effects);

            if let Some(id) = controller.state().conversation_id() {
                println!("(conversation {})", id);
            }
            if printer.errors > 0 {
                std::process::exit(1);
            }
        }

        Commands::Strategy { kind } => {
            let api = HttpChatApi::new(config.server.clone())?;
            let mut controller = ChatController::new(api, config.chat, None);
            controller.show_coping_strategy(Some(&kind)).await;

            let content = &controller.state().modal().content;
            if !matches!(content, ModalContent::Strategy(_)) {
                bail!("{}", aitherapist::chat::modal::FAILED_TEXT);
            }
            print_modal(content);
        }

        Commands::NewChat { yes } => {
            run_conversation_action(config, cli.conversation, ConversationAction::NewChat, yes)
                .await?;
        }

        Commands::ClearChat { yes } => {
            run_conversation_action(config, cli.conversation, ConversationAction::ClearChat, yes)
                .await?;
        }

        Commands::Dashboard { path } => {
            let data = load_dashboard(&path)?;
            let controller = DashboardController::new(data, config.dashboard);
            let mut surface = TerminalSurface::default();

            let attempt = match controller.first_attempt(&mut surface) {
                Attempt::Deferred(delay) => {
                    tokio::time::sleep(delay).await;
                    controller.retry(&mut surface)
                }
                other => other,
            };

            if let Attempt::Rendered(report) = attempt {
                for mount in ChartMount::ALL {
                    if let ChartOutcome::Failed(e) = report.outcome(mount) {
                        eprintln!("{}: {}", mount.title(), e);
                    }
                }
            }
            print_summary(controller.data());
        }

        Commands::Config { output } => {
            let config = aitherapist::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("aitherapist={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

// ============ Chat session ============

const HELP: &str = "Commands: /strategy [type], /new, /clear, /help, /quit";

async fn run_session<A: ChatApi>(mut controller: ChatController<A>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut printer = Printer::default();

    printer.flush(&mut controller, &[]);
    println!("{}", HELP);

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        let effects = match line.split_once(' ').unwrap_or((line, "")) {
            ("/quit", _) | ("/exit", _) => break,
            ("/help", _) => {
                println!("{}", HELP);
                continue;
            }
            ("/strategy", kind) => {
                let kind = Some(kind.trim()).filter(|k| !k.is_empty());
                let effects = controller.show_coping_strategy(kind).await;
                print_modal(&controller.state().modal().content);
                controller.state_mut().close_coping_modal();
                effects
            }
            ("/new", _) => {
                let action = ConversationAction::NewChat;
                let answer = ask(&mut lines, action.prompt()).await?;
                controller.new_chat(&|_: &str| answer).await
            }
            ("/clear", _) => {
                let action = ConversationAction::ClearChat;
                let answer = ask(&mut lines, action.prompt()).await?;
                controller.clear_chat(&|_: &str| answer).await
            }
            _ => {
                controller.input(line);
                controller.submit().await
            }
        };

        printer.flush(&mut controller, &effects);
    }

    Ok(())
}

async fn ask(lines: &mut Lines<BufReader<Stdin>>, prompt: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(is_yes(&answer))
}

fn confirm_stdin(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    let _ = std::io::stdout().flush();
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer).is_ok() && is_yes(&answer)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

async fn run_conversation_action(
    config: Config,
    conversation: Option<String>,
    action: ConversationAction,
    yes: bool,
) -> anyhow::Result<()> {
    let api = HttpChatApi::new(config.server.clone())?;
    let mut controller = ChatController::new(api, config.chat, conversation);
    let confirm = |prompt: &str| yes || confirm_stdin(prompt);

    let effects = match action {
        ConversationAction::NewChat => controller.new_chat(&confirm).await,
        ConversationAction::ClearChat => controller.clear_chat(&confirm).await,
    };

    if effects.is_empty() {
        println!("Cancelled");
        return Ok(());
    }

    let mut printer = Printer::default();
    printer.skip_existing(controller.state().transcript().messages());
    printer.flush(&mut controller, &effects);
    Ok(())
}

/// Prints transcript entries and notifications as they appear
#[derive(Default)]
struct Printer {
    shown: HashSet<u64>,
    errors: usize,
}

impl Printer {
    fn skip_existing(&mut self, messages: &[ChatMessage]) {
        self.shown.extend(messages.iter().map(|m| m.id.0));
    }

    fn flush<A: ChatApi>(&mut self, controller: &mut ChatController<A>, effects: &[Effect]) {
        for message in controller.state().transcript().messages() {
            if self.shown.insert(message.id.0) && !message.is_user() {
                print_message(message);
            }
        }

        let mut dismissed: Vec<NotificationId> = Vec::new();
        for effect in effects {
            match effect {
                Effect::ScheduleDismiss { id, .. } => {
                    if let Some(n) = controller
                        .state()
                        .notifications()
                        .active()
                        .iter()
                        .find(|n| n.id == *id)
                    {
                        if n.kind == aitherapist::NotificationKind::Error {
                            self.errors += 1;
                            eprintln!("! {}", n.message);
                        } else {
                            println!("* {}", n.message);
                        }
                    }
                    dismissed.push(*id);
                }
                Effect::ClearSendFlash { .. } => controller.state_mut().clear_send_flash(),
                Effect::Navigate(url) => {
                    println!("* Server moved the conversation to {}", url);
                }
                _ => {}
            }
        }

        for id in dismissed {
            controller.state_mut().dismiss_notification(id);
        }
    }
}

fn print_message(message: &ChatMessage) {
    let badge = message
        .sentiment
        .map(|s| format!(" {} {}", s.emoji(), s))
        .unwrap_or_default();
    println!("[{}]{} {}", message.timestamp, badge, format_plain(&message.text));
}

fn print_modal(content: &ModalContent) {
    match content {
        ModalContent::Loading => println!("{}", aitherapist::chat::modal::LOADING_TEXT),
        ModalContent::Strategy(html) => {
            let text = html
                .replace("<br>", "\n")
                .replace("<strong>", "")
                .replace("</strong>", "");
            println!("{}", html_unescape(&text));
        }
        ModalContent::Failed => eprintln!("! {}", aitherapist::chat::modal::FAILED_TEXT),
    }
}

fn html_unescape(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

// ============ Dashboard ============

#[derive(Debug, Deserialize)]
struct DashboardFile {
    #[serde(default)]
    chart_data: Vec<DailyMood>,
    #[serde(default)]
    total_stats: Option<MoodTotals>,
}

fn load_dashboard(path: &Path) -> anyhow::Result<DashboardData> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dashboard data from {:?}", path))?;
    let file: DashboardFile = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid dashboard data in {:?}", path))?;

    let totals = file
        .total_stats
        .unwrap_or_else(|| MoodTotals::from_series(&file.chart_data));
    Ok(DashboardData::new(file.chart_data, totals))
}

const BAR_WIDTH: u32 = 30;

/// Draws charts as text bars
#[derive(Default)]
struct TerminalSurface;

impl ChartSurface for TerminalSurface {
    fn library_available(&self) -> bool {
        true
    }

    fn has_mount(&self, _mount: ChartMount) -> bool {
        true
    }

    fn draw(&mut self, mount: ChartMount, spec: &ChartSpec) -> Result<(), ChartError> {
        println!("{}", mount.title());
        println!("{}", "-".repeat(60));

        match spec.kind {
            ChartKind::Line => {
                let peak = spec
                    .data
                    .datasets
                    .iter()
                    .flat_map(|d| d.data.iter().copied())
                    .max()
                    .unwrap_or(0);

                for (i, label) in spec.data.labels.iter().enumerate() {
                    println!("{}", label);
                    for dataset in &spec.data.datasets {
                        let value = dataset.data.get(i).copied().unwrap_or(0);
                        println!(
                            "  {:<9} {:>3} {}",
                            dataset.label.as_deref().unwrap_or("-"),
                            value,
                            bar(value, u64::from(peak))
                        );
                    }
                }
            }
            ChartKind::Doughnut => {
                let dataset = spec
                    .data
                    .datasets
                    .first()
                    .ok_or_else(|| ChartError::Draw("doughnut without data".into()))?;
                let total: u64 = dataset.data.iter().map(|v| u64::from(*v)).sum();

                for (label, value) in spec.data.labels.iter().zip(&dataset.data) {
                    println!(
                        "  {:<28} {}",
                        tooltip_label(label, *value, total),
                        bar(*value, total)
                    );
                }
            }
        }
        println!();
        Ok(())
    }

    fn show_empty(&mut self, empty: &EmptyState) {
        println!("{}", empty.mount.title());
        println!("{}", "-".repeat(60));
        for line in empty.lines() {
            println!("  {}", line);
        }
        println!();
    }
}

fn bar(value: u32, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    "#".repeat((u64::from(value) * u64::from(BAR_WIDTH) / max) as usize)
}

fn print_summary(data: &DashboardData) {
    let pct = data.totals.percentages();
    println!("Days tracked: {}", data.days_tracked());
    println!("Total chats:  {}", u64::from(data.totals.total).max(data.totals.sum()));
    println!(
        "Positive {:.1}% | Neutral {:.1}% | Negative {:.1}%",
        pct.positive, pct.neutral, pct.negative
    );
}
