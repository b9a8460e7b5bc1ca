use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use services::QuizServices;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod http;

const DEFAULT_QUESTIONS_FILE: &str = "questions.txt";
const DEFAULT_BIND: &str = "127.0.0.1:5000";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidBind { raw: String },
    InvalidQuestionsPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidBind { raw } => write!(f, "invalid --bind value: {raw}"),
            ArgsError::InvalidQuestionsPath { raw } => {
                write!(f, "invalid --questions value: {raw:?}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- serve [--questions <path>] [--bind <addr>]");
    eprintln!("  cargo run -p app -- check [--questions <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --questions {DEFAULT_QUESTIONS_FILE}");
    eprintln!("  --bind {DEFAULT_BIND}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_QUESTIONS_FILE, QUIZ_BIND, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Serve,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "serve" => Some(Self::Serve),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    questions: PathBuf,
    bind: SocketAddr,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut questions = parse_questions_path(
            std::env::var("QUIZ_QUESTIONS_FILE")
                .unwrap_or_else(|_| DEFAULT_QUESTIONS_FILE.to_string()),
        )?;
        let mut bind =
            parse_bind(std::env::var("QUIZ_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()))?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => {
                    questions = parse_questions_path(require_value(args, "--questions")?)?;
                }
                "--bind" => {
                    bind = parse_bind(require_value(args, "--bind")?)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { questions, bind })
    }
}

fn parse_bind(raw: String) -> Result<SocketAddr, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidBind { raw })
}

// Relative paths resolve against the working directory at startup, so later
// reloads keep pointing at the same file.
fn parse_questions_path(raw: String) -> Result<PathBuf, ArgsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ArgsError::InvalidQuestionsPath { raw });
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1).peekable();

    // Default behavior: serve when no subcommand is provided.
    let cmd = match argv.peek().map(String::as_str) {
        None => Command::Serve,
        Some("--help" | "-h" | "help") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Serve,
        Some(first) => {
            let cmd = Command::from_arg(first).ok_or_else(|| {
                let err = ArgsError::UnknownCommand(first.to_string());
                eprintln!("{err}");
                print_usage();
                err
            })?;
            argv.next();
            cmd
        }
    };

    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    let services = QuizServices::from_file(&parsed.questions)?;

    match cmd {
        Command::Check => {
            let pairs = services.questions().all_questions()?;
            println!(
                "{} questions loaded from {}",
                pairs.len(),
                parsed.questions.display()
            );
            Ok(())
        }
        Command::Serve => {
            let app = http::router(&services);
            let listener = tokio::net::TcpListener::bind(parsed.bind).await?;
            info!(addr = %parsed.bind, questions = %parsed.questions.display(), "quiz server listening");
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
