// ABOUTME: CLI for extracting job postings and tracking applications with jobtrail.
// ABOUTME: Reads a page from URL, file or stdin, prints the record as JSON and logs/saves it to a JSON store.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use jobtrail_extract::{Engine, FormEdits, JobRecord, Page};
use jobtrail_tracker::{ApplicationFlow, Backend, JsonStore, Prompt, Submission};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Extract job postings and keep track of applications.
#[derive(Parser, Debug)]
#[command(name = "jobtrail")]
#[command(about = "Extract job postings and track applications", long_about = None)]
struct Cli {
    /// Path of the applications store.
    #[arg(long, global = true, env = "JOBTRAIL_STORE")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the extracted record as JSON.
    Extract {
        #[command(flatten)]
        page: PageArgs,

        /// Output compact JSON instead of pretty.
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
    /// Report whether the page looks like a job posting.
    Check {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Extract and log an application.
    Log(SubmitArgs),
    /// Extract and save a job for later.
    Save(SubmitArgs),
    /// Show whether a URL is already logged or saved.
    Status {
        url: String,
    },
}

#[derive(Args, Debug)]
struct PageArgs {
    /// Page URL (http/https), local HTML file, or "-" for stdin.
    target: String,

    /// Page address to use for file or stdin input.
    #[arg(long)]
    url: Option<String>,
}

#[derive(Args, Debug)]
struct SubmitArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Override an extracted field, e.g. --set salary='$90k'. Repeatable.
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    set: Vec<String>,

    /// Submit even when the job is already tracked.
    #[arg(long, default_value_t = false)]
    force: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let engine = Engine::builder().build();

    match cli.command {
        Command::Extract { page, compact } => {
            let page = load_page(&engine, &page).await?;
            let record = engine.extract(&page);
            print_json(&serde_json::to_value(&record)?, compact)?;
        }
        Command::Check { page } => {
            let page = load_page(&engine, &page).await?;
            print_json(
                &json!({ "url": page.url(), "isJobPage": engine.is_job_page(&page) }),
                false,
            )?;
        }
        Command::Log(args) => {
            let store = open_store(cli.store)?;
            submit(&engine, store, args, Submission::Log).await?;
        }
        Command::Save(args) => {
            let store = open_store(cli.store)?;
            submit(&engine, store, args, Submission::Save).await?;
        }
        Command::Status { url } => {
            let store = open_store(cli.store)?;
            let check = store
                .check_job_exists(&url)
                .await
                .with_context(|| format!("reading {}", store.path().display()))?;
            print_json(&serde_json::to_value(&check)?, false)?;
        }
    }

    Ok(())
}

async fn submit(engine: &Engine, store: JsonStore, args: SubmitArgs, submission: Submission) -> Result<()> {
    let edits = parse_edits(&args.set)?;
    let page = load_page(engine, &args.page).await?;
    let mut record: JobRecord = engine.extract(&page);
    record.apply_edits(&edits);

    let flow = ApplicationFlow::new(store);
    if !args.force {
        let prompt = flow.prepare(&record.url, &CancellationToken::new()).await;
        if let Some(reason) = blocked_by(prompt, submission) {
            eprintln!("{} Use --force to submit anyway.", reason);
            return Ok(());
        }
    }

    let note = flow.submit(submission, &record).await;
    if note.is_error {
        bail!(note.message);
    }
    println!("{}", note.message);
    Ok(())
}

/// Why a submission should not go ahead, if it shouldn't.
fn blocked_by(prompt: Prompt, submission: Submission) -> Option<&'static str> {
    match (prompt, submission) {
        (Prompt::AlreadyLogged, _) => Some("You've already logged this job application."),
        (Prompt::AlreadySaved, Submission::Save) => Some("You've already saved this job for later."),
        _ => None,
    }
}

fn parse_edits(pairs: &[String]) -> Result<FormEdits> {
    let mut edits = FormEdits::default();
    for pair in pairs {
        let (field, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("--set expects FIELD=VALUE, got {:?}", pair))?;
        if !edits.set(field.trim(), value) {
            bail!("unknown or read-only field: {}", field.trim());
        }
    }
    Ok(edits)
}

fn open_store(path: Option<PathBuf>) -> Result<JsonStore> {
    let path = match path {
        Some(path) => path,
        None => dirs::data_dir()
            .ok_or_else(|| anyhow!("no data directory; pass --store or set JOBTRAIL_STORE"))?
            .join("jobtrail")
            .join("applications.json"),
    };
    Ok(JsonStore::new(path))
}

async fn load_page(engine: &Engine, args: &PageArgs) -> Result<Page> {
    let target = args.target.as_str();

    if target.starts_with("http://") || target.starts_with("https://") {
        let mut page = engine.fetch_page(target).await?;
        if let Some(url) = &args.url {
            page = Page::parse(&page.document().html(), url);
        }
        return Ok(page);
    }

    let html = if target == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        let path = PathBuf::from(target);
        if !path.exists() {
            return Err(anyhow!("file not found: {}", target));
        }
        fs::read_to_string(&path)?
    };
    let url = args.url.as_deref().unwrap_or(target);
    Ok(Page::parse(&html, url))
}

fn print_json(value: &serde_json::Value, compact: bool) -> Result<()> {
    if compact {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}
