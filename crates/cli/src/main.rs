// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod manifest;
mod render;

#[cfg(test)]
mod tests;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::eyre::{Context, Result, eyre};
use grafica::{Command as RegistryCommand, RegistryState, apply};
use grafica_api::{
    ClientConfig, Completion, DEFAULT_BASE_URL, HttpSolicitationApi, ListFilter, Session,
    SolicitationSyncCoordinator, StaticIdentity, SubmitMode, SubmitOutcome, parse_date,
    translate_core_error, translate_domain_error,
};
use grafica_domain::{
    PagesPerSheet, PrintConfig, Solicitation, TableRow, User, compute_sheets_total, count_pages,
    validate_page_range,
};
use manifest::{Manifest, add_to_registry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

type Coordinator = SolicitationSyncCoordinator<HttpSolicitationApi>;

/// Grafica - print solicitation client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the print-shop API
    #[arg(long, env = "GRAFICA_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout, in seconds
    #[arg(long, env = "GRAFICA_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Bearer token issued by the identity service
    #[arg(long, env = "GRAFICA_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Full name of the requesting user
    #[arg(long, env = "GRAFICA_USER_NAME")]
    user_name: Option<String>,

    /// Registration number of the requesting user
    #[arg(long, env = "GRAFICA_REGISTRATION")]
    registration: Option<String>,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check or count a page-range string
    Pages {
        #[command(subcommand)]
        action: PagesAction,
    },

    /// Compute the sheets a copy consumes
    Sheets {
        /// Page count of the document
        page_count: u32,
        /// Custom page range (all pages when omitted)
        #[arg(long)]
        pages: Option<String>,
        /// Number of copies
        #[arg(long, default_value_t = 1)]
        copies: u32,
        /// Pages per side of the sheet (1, 2 or 4)
        #[arg(long, default_value_t = 1)]
        pages_per_sheet: u8,
        /// Print on both sides
        #[arg(long)]
        front_and_back: bool,
    },

    /// Submit a manifest as a new solicitation, or add it to an existing one
    Submit {
        /// Path to the JSON manifest
        manifest: PathBuf,
        /// Add the copies to this solicitation instead of creating one
        #[arg(long)]
        edit: Option<i64>,
        /// Term in hours (overrides the manifest)
        #[arg(long)]
        deadline: Option<u32>,
        /// Replace duplicates instead of skipping them
        #[arg(long)]
        overwrite: bool,
        /// Print the registry without submitting
        #[arg(long)]
        dry_run: bool,
    },

    /// Show one solicitation
    Show { id: i64 },

    /// List solicitations
    List {
        /// Server-side scope (e.g. "mine")
        #[arg(long)]
        filtering: Option<String>,
        /// Only concluded (true) or open (false) solicitations
        #[arg(long)]
        concluded: Option<bool>,
        /// Window start, YYYY-MM-DD
        #[arg(long)]
        start_date: Option<String>,
        /// Window end, YYYY-MM-DD
        #[arg(long)]
        end_date: Option<String>,
        /// Free-text search
        #[arg(long)]
        query: Option<String>,
    },

    /// List the copies of one solicitation
    Copies {
        id: i64,
        #[arg(long)]
        query: Option<String>,
    },

    /// Flip a solicitation between open and concluded
    Toggle { id: i64 },

    /// Delete a solicitation
    Delete { id: i64 },

    /// Remove one copy from a solicitation
    RemoveCopy { id: i64, copy_id: i64 },

    /// Comment on a solicitation
    Comment { id: i64, message: String },

    /// Download an attached file
    Download {
        id: i64,
        file_name: String,
        /// Destination path (defaults to the file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render an HTML report of the given solicitations
    Report {
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Destination path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
enum PagesAction {
    /// Validate a range against a document's page count
    Validate { range: String, total_pages: u32 },
    /// Count the pages a range selects
    Count { range: String },
}

impl Args {
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.verbosity.log_level_filter().as_trace().into())
            .from_env_lossy()
    }

    fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url).with_timeout(Duration::from_secs(self.timeout_secs))
    }

    fn user(&self) -> User {
        User {
            common_name: self.user_name.clone(),
            registration_number: self.registration.clone(),
            ..User::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(args.env_filter())
        .init();

    match &args.command {
        Command::Pages { action } => run_pages(action),
        Command::Sheets {
            page_count,
            pages,
            copies,
            pages_per_sheet,
            front_and_back,
        } => run_sheets(
            *page_count,
            pages.as_deref(),
            *copies,
            *pages_per_sheet,
            *front_and_back,
        ),
        command => {
            let coordinator: Arc<Coordinator> = Arc::new(connect(&args).await?);
            watch_interrupt(&coordinator);
            run_remote(&coordinator, command).await
        }
    }
}

fn run_pages(action: &PagesAction) -> Result<()> {
    match action {
        PagesAction::Validate { range, total_pages } => {
            validate_page_range(range, *total_pages).map_err(translate_domain_error)?;
            println!("{range}: valid for {total_pages} pages");
        }
        PagesAction::Count { range } => println!("{}", count_pages(range)),
    }
    Ok(())
}

fn run_sheets(
    page_count: u32,
    pages: Option<&str>,
    copies: u32,
    pages_per_sheet: u8,
    front_and_back: bool,
) -> Result<()> {
    let per_side: PagesPerSheet =
        PagesPerSheet::try_from(pages_per_sheet).map_err(translate_domain_error)?;
    let mut config: PrintConfig = PrintConfig::default()
        .with_copy_count(copies)
        .with_pages_per_sheet(per_side)
        .with_front_and_back(front_and_back);

    if let Some(range) = pages {
        validate_page_range(range, page_count).map_err(translate_domain_error)?;
        config = config.with_custom_pages(range);
    }
    config.normalize();

    println!("{}", compute_sheets_total(page_count, &config));
    Ok(())
}

async fn connect(args: &Args) -> Result<Coordinator> {
    let token: &str = args
        .token
        .as_deref()
        .ok_or_else(|| eyre!("A token is required (--token or GRAFICA_TOKEN)"))?;

    let identity: StaticIdentity = StaticIdentity::new(token, args.user());
    let session: Session = Session::establish(&identity).await?;
    let api: HttpSolicitationApi = HttpSolicitationApi::new(args.client_config())?;

    debug!(base_url = %args.base_url, "Connected");
    Ok(SolicitationSyncCoordinator::new(api, session))
}

/// Detaches in-flight calls on Ctrl-C.
fn watch_interrupt(coordinator: &Arc<Coordinator>) {
    let coordinator: Arc<Coordinator> = Arc::clone(coordinator);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, abandoning in-flight request");
            coordinator.dispose();
        }
    });
}

fn completed<T>(completion: Completion<T>) -> Result<T> {
    completion
        .into_option()
        .ok_or_else(|| eyre!("Request abandoned"))
}

async fn fetch(coordinator: &Coordinator, id: i64) -> Result<Solicitation> {
    completed(coordinator.fetch(id).await?)
}

async fn run_remote(coordinator: &Coordinator, command: &Command) -> Result<()> {
    match command {
        Command::Pages { .. } | Command::Sheets { .. } => {}
        Command::Submit {
            manifest,
            edit,
            deadline,
            overwrite,
            dry_run,
        } => {
            run_submit(
                coordinator,
                manifest,
                *edit,
                *deadline,
                *overwrite,
                *dry_run,
            )
            .await?;
        }
        Command::Show { id } => {
            print!("{}", render::describe_solicitation(&fetch(coordinator, *id).await?));
        }
        Command::List {
            filtering,
            concluded,
            start_date,
            end_date,
            query,
        } => {
            let mut filter: ListFilter = ListFilter::default().with_dates(
                start_date
                    .as_deref()
                    .map(|text| parse_date("startDate", text))
                    .transpose()?,
                end_date
                    .as_deref()
                    .map(|text| parse_date("endDate", text))
                    .transpose()?,
            );
            if let Some(filtering) = filtering {
                filter = filter.with_filtering(filtering);
            }
            if let Some(concluded) = concluded {
                filter = filter.with_concluded(*concluded);
            }
            if let Some(query) = query {
                filter = filter.with_query(query);
            }

            let rows: Vec<TableRow> = completed(coordinator.list(&filter).await?)?;
            for row in &rows {
                println!("{}", render::describe_row(row));
            }
            info!(rows = rows.len(), "Listed solicitations");
        }
        Command::Copies { id, query } => {
            let rows: Vec<TableRow> =
                completed(coordinator.list_copies(*id, query.as_deref()).await?)?;
            for row in &rows {
                println!("{}", render::describe_row(row));
            }
        }
        Command::Toggle { id } => {
            println!("{}", completed(coordinator.toggle_status(*id).await?)?);
        }
        Command::Delete { id } => {
            println!("{}", completed(coordinator.delete(*id).await?)?);
        }
        Command::RemoveCopy { id, copy_id } => {
            let solicitation: Solicitation = fetch(coordinator, *id).await?;
            let reloaded: Solicitation =
                completed(coordinator.remove_copy_then_refetch(*copy_id, &solicitation).await?)?;
            print!("{}", render::describe_solicitation(&reloaded));
        }
        Command::Comment { id, message } => {
            println!("{}", completed(coordinator.comment(*id, message).await?)?);
        }
        Command::Download {
            id,
            file_name,
            output,
        } => {
            let bytes: Vec<u8> = completed(coordinator.download(*id, file_name).await?)?;
            let path: PathBuf = output.clone().unwrap_or_else(|| PathBuf::from(file_name));
            tokio::fs::write(&path, &bytes)
                .await
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = bytes.len(), "Downloaded file");
        }
        Command::Report { ids, output } => {
            let mut solicitations: Vec<Solicitation> = Vec::with_capacity(ids.len());
            for id in ids {
                solicitations.push(fetch(coordinator, *id).await?);
            }
            let html: String = completed(coordinator.report(&solicitations).await?)?;
            match output {
                Some(path) => tokio::fs::write(path, html)
                    .await
                    .wrap_err_with(|| format!("Failed to write {}", path.display()))?,
                None => println!("{html}"),
            }
        }
    }
    Ok(())
}

async fn run_submit(
    coordinator: &Coordinator,
    manifest_path: &Path,
    edit: Option<i64>,
    deadline: Option<u32>,
    overwrite: bool,
    dry_run: bool,
) -> Result<()> {
    let manifest: Manifest = Manifest::load(manifest_path)?;
    let base_dir: &Path = manifest_path.parent().unwrap_or_else(|| Path::new("."));

    let (mode, start): (SubmitMode, RegistryState) = match edit {
        Some(id) => {
            let solicitation: Solicitation = fetch(coordinator, id).await?;
            let registry: RegistryState =
                RegistryState::from_solicitation(&solicitation).map_err(translate_core_error)?;
            (SubmitMode::EditSolicitation, registry)
        }
        None => (SubmitMode::NewSolicitation, RegistryState::new()),
    };

    let mut registry: RegistryState =
        add_to_registry(start, manifest.resolve(base_dir)?, overwrite)?;
    if let Some(hours) = deadline.or(manifest.deadline) {
        registry = apply(&registry, RegistryCommand::SelectDeadline { hours })
            .map_err(translate_core_error)?
            .new_state;
    }

    print!("{}", render::describe_registry(&registry));
    if dry_run {
        return Ok(());
    }

    let outcome: SubmitOutcome =
        completed(coordinator.submit(mode, &registry, registry.deadline()).await?)?;
    match outcome {
        SubmitOutcome::Created { solicitation, .. } => {
            println!(
                "Created solicitation {}",
                solicitation
                    .id
                    .map_or_else(|| String::from("(no id)"), |id| format!("#{id}"))
            );
        }
        SubmitOutcome::Edited {
            message,
            solicitation,
            ..
        } => {
            println!("{message}");
            print!("{}", render::describe_solicitation(&solicitation));
        }
    }
    Ok(())
}
