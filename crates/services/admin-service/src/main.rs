//! Admin Service - operator CLI for the admin directory.

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use admin_service_lib::config::AdminServiceConfig;
use admin_service_lib::service::{ServiceContainer, Services};
use admin_service_lib::{open_services, seed};
use common::AppResult;
use domain::{AccountStatus, DeleteRequestStatus, NewResource, ResourceContent, ResourceKind};

#[derive(Parser)]
#[command(name = "admin-service")]
#[command(about = "Admin hierarchy and delete request governance")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Snapshot file to operate on
    #[arg(long, global = true, env = "ADMIN_SNAPSHOT_PATH")]
    snapshot: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the demo HQ -> ADMIN -> MERCHANT tree if the directory is empty
    Seed,
    /// Inspect and manage accounts
    Accounts {
        #[command(subcommand)]
        action: AccountCommands,
    },
    /// Choose the acting account
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Delete request workflow
    Requests {
        #[command(subcommand)]
        action: RequestCommands,
    },
    /// Owner-scoped connections and news
    Resources {
        #[command(subcommand)]
        action: ResourceCommands,
    },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// List every account
    List,
    /// Direct children of an account
    Children { id: Uuid },
    /// Set an account's status (HQ only)
    Status {
        id: Uuid,
        /// ACTIVE, STOPPED or PENDING_DELETE
        status: AccountStatus,
    },
}

#[derive(Subcommand)]
enum SessionCommands {
    /// Act as the given account
    Use { id: Uuid },
    /// Show the acting account
    Show,
    /// Stop acting as anyone
    Clear,
}

#[derive(Subcommand)]
enum RequestCommands {
    /// List requests, optionally by status
    List {
        /// REQUESTED, APPROVED or REJECTED
        #[arg(long)]
        status: Option<DeleteRequestStatus>,
    },
    /// File a delete request against an account below you
    File {
        target: Uuid,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Approve a pending request (HQ only)
    Approve {
        id: Uuid,
        #[arg(long)]
        log: Option<String>,
    },
    /// Reject a pending request (HQ only)
    Reject {
        id: Uuid,
        #[arg(long)]
        log: Option<String>,
    },
}

#[derive(Subcommand)]
enum ResourceCommands {
    /// List resources of one kind; defaults to the acting account's
    List {
        /// connection or news
        kind: ResourceKind,
        #[arg(long)]
        owner: Option<Uuid>,
    },
    /// Add a resource owned by the acting account
    Add {
        /// connection or news
        kind: ResourceKind,
        title: String,
        #[arg(long, default_value = "")]
        body: String,
        #[arg(long)]
        link: Option<String>,
    },
    /// Delete a resource owned by the acting account
    Remove { id: Uuid },
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!(code = e.code(), "Command failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let mut config = AdminServiceConfig::from_env();
    if let Some(path) = cli.snapshot {
        config = config.with_snapshot_path(path);
    }
    let services = open_services(&config).await?;

    match cli.command {
        Commands::Seed => match seed::bootstrap(&services).await? {
            Some(tree) => print_json(&[tree.hq, tree.admin, tree.merchant]),
            None => Ok(()),
        },
        Commands::Accounts { action } => accounts(&services, action).await,
        Commands::Session { action } => session(&services, action).await,
        Commands::Requests { action } => requests(&services, action).await,
        Commands::Resources { action } => resources(&services, action).await,
    }
}

async fn accounts(services: &Services, action: AccountCommands) -> AppResult<()> {
    match action {
        AccountCommands::List => print_json(&services.accounts().list().await?),
        AccountCommands::Children { id } => print_json(&services.accounts().get_children(id).await?),
        AccountCommands::Status { id, status } => {
            let actor = services.sessions().require_current().await?;
            print_json(&services.accounts().set_status(actor.id, id, status).await?)
        }
    }
}

async fn session(services: &Services, action: SessionCommands) -> AppResult<()> {
    match action {
        SessionCommands::Use { id } => print_json(&services.sessions().sign_in(id).await?),
        SessionCommands::Show => print_json(&services.sessions().current().await?),
        SessionCommands::Clear => services.sessions().sign_out().await,
    }
}

async fn requests(services: &Services, action: RequestCommands) -> AppResult<()> {
    let workflow = services.delete_requests();
    match action {
        RequestCommands::List { status } => print_json(&workflow.list_by_status(status).await?),
        RequestCommands::File { target, reason } => {
            let actor = services.sessions().require_current().await?;
            print_json(&workflow.file_request(actor.id, target, reason).await?)
        }
        RequestCommands::Approve { id, log } => {
            let actor = services.sessions().require_current().await?;
            print_json(&workflow.approve(actor.id, id, log).await?)
        }
        RequestCommands::Reject { id, log } => {
            let actor = services.sessions().require_current().await?;
            print_json(&workflow.reject(actor.id, id, log).await?)
        }
    }
}

async fn resources(services: &Services, action: ResourceCommands) -> AppResult<()> {
    let index = services.resources();
    match action {
        ResourceCommands::List { kind, owner } => {
            let owner = match owner {
                Some(owner) => owner,
                None => services.sessions().require_current().await?.id,
            };
            print_json(&index.list_by_owner(kind, owner).await?)
        }
        ResourceCommands::Add {
            kind,
            title,
            body,
            link,
        } => {
            let actor = services.sessions().require_current().await?;
            let data = NewResource {
                kind,
                owner_id: actor.id,
                content: ResourceContent {
                    title,
                    body,
                    link,
                    image_url: None,
                },
            };
            print_json(&index.create(actor.id, data).await?)
        }
        ResourceCommands::Remove { id } => {
            let actor = services.sessions().require_current().await?;
            print_json(&index.remove(actor.id, id).await?)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
