//! CLI entry point for userql.

mod output;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use userql_client::{NewUser, UserFacade, UserPatch};
use userql_core::UserqlConfig;

use crate::output::{filter_updated_since, render_user, render_users};

#[derive(Parser)]
#[command(name = "userql")]
#[command(about = "Create, read, update and delete users over GraphQL")]
struct Cli {
    /// Config file prefix (default: userql).
    #[arg(short, long, default_value = "userql")]
    config: String,

    /// Override the GraphQL endpoint from config.
    #[arg(long)]
    endpoint: Option<String>,

    /// Print passwords instead of redacting them.
    #[arg(long)]
    show_password: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a user.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Delete a user and print its last-known state.
    Delete { id: String },
    /// Update a user. Only the given fields are sent.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Get a user by id.
    Get { id: String },
    /// List all users.
    List {
        /// Only show users updated at or after this RFC 3339 timestamp.
        #[arg(long)]
        updated_since: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        tracing::error!(error = %err, "userql failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = UserqlConfig::load(&cli.config)?;
    if let Some(endpoint) = &cli.endpoint {
        config.graphql.endpoint = endpoint.clone();
        config.validate()?;
    }

    let api = UserFacade::connect(&config.graphql)?;
    let show_password = cli.show_password;

    let rendered = match cli.command {
        Command::Create {
            name,
            email,
            password,
        } => {
            let user = api
                .mutation()
                .create_user(&NewUser::new(name, email, password))
                .await?;
            tracing::info!(id = %user.id, "Created user");
            render_user(&user, show_password)?
        }
        Command::Delete { id } => {
            let user = api.mutation().delete_user(id).await?;
            tracing::info!(id = %user.id, "Deleted user");
            render_user(&user, show_password)?
        }
        Command::Update {
            id,
            name,
            email,
            password,
        } => {
            let patch = UserPatch {
                name,
                email,
                password,
            };
            if patch.is_empty() {
                anyhow::bail!("Nothing to update: pass at least one of --name, --email, --password");
            }
            let user = api.mutation().update_user(id, &patch).await?;
            tracing::info!(id = %user.id, "Updated user");
            render_user(&user, show_password)?
        }
        Command::Get { id } => {
            let user = api.query().user(id).await?;
            render_user(&user, show_password)?
        }
        Command::List { updated_since } => {
            let since = updated_since.as_deref().map(parse_since).transpose()?;
            let mut users = api.query().users().await?;
            if let Some(since) = since {
                users = filter_updated_since(users, since);
            }
            tracing::info!(count = users.len(), "Listed users");
            render_users(&users, show_password)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&rendered)?);
    Ok(())
}

fn parse_since(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let ts = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| anyhow::anyhow!("Invalid --updated-since {raw:?}: {e}"))?;
    Ok(ts.with_timezone(&Utc))
}
