use actionstatus_cli::{commands, CliPlatform};
use actionstatus_app_core::Platform;
use actionstatus_core::RepoEdit;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about = "Monitor GitHub Actions workflow status for a list of repositories")]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Directory holding repos.json and settings.json (defaults to the user config dir)
    #[arg(long, global = true, env = "ACTIONSTATUS_STATE_DIR")]
    state_dir: Option<Utf8PathBuf>,
    /// Override the badge server for this run
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show monitored repositories and their last known status
    List,
    Add {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        workflow: Option<String>,
    },
    Edit {
        index: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        workflow: Option<String>,
    },
    Remove {
        #[arg(required = true)]
        indices: Vec<usize>,
    },
    /// Poll every repository's workflow badge
    Refresh {
        #[arg(long, default_value_t = actionstatus_config::REFRESH_DEADLINE_SECS)]
        timeout: u64,
    },
    /// Describe the navigation chrome of a platform
    Chrome {
        #[arg(long, value_enum)]
        platform: Option<CliPlatform>,
        #[arg(long)]
        editing: bool,
    },
    Settings {
        #[arg(long)]
        github_url: Option<String>,
        #[arg(long)]
        concurrency: Option<usize>,
        #[arg(long)]
        request_timeout: Option<u64>,
    },
}

fn setup_logging(verbose: bool) {
    let subscriber = match EnvFilter::try_from_default_env() {
        Ok(filter) => FmtSubscriber::builder().with_env_filter(filter).finish(),
        Err(_) => {
            let level = if verbose { Level::DEBUG } else { Level::WARN };
            FmtSubscriber::builder()
                .with_env_filter(EnvFilter::new(level.as_str()))
                .finish()
        }
    };
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let state_dir = cli.state_dir.as_deref();

    match cli.command {
        Commands::List => {
            let c = commands::open_controller(state_dir, cli.base_url)?;
            commands::print_list(&commands::cmd_list(&c));
        }
        Commands::Add {
            name,
            owner,
            workflow,
        } => {
            let mut c = commands::open_controller(state_dir, cli.base_url)?;
            let repo = commands::cmd_add(&mut c, name, owner, workflow)?;
            println!(":: Added {} ({})", repo.slug(), repo.id);
        }
        Commands::Edit {
            index,
            name,
            owner,
            workflow,
        } => {
            let mut c = commands::open_controller(state_dir, cli.base_url)?;
            let edit = RepoEdit {
                name,
                owner,
                workflow,
            };
            let repo = commands::cmd_edit(&mut c, index, edit)?;
            println!(":: Updated {} ({})", repo.slug(), repo.id);
        }
        Commands::Remove { indices } => {
            let mut c = commands::open_controller(state_dir, cli.base_url)?;
            for repo in commands::cmd_remove(&mut c, &indices)? {
                println!(":: Removed {}", repo.slug());
            }
        }
        Commands::Refresh { timeout } => {
            let mut c = commands::open_controller(state_dir, cli.base_url)?;
            let vm = commands::cmd_refresh(&mut c, Duration::from_secs(timeout), true).await?;
            commands::print_list(&vm);
        }
        Commands::Chrome { platform, editing } => {
            let platform = platform.map(Platform::from).unwrap_or_else(Platform::current);
            println!("{}", commands::cmd_chrome(platform, editing));
        }
        Commands::Settings {
            github_url,
            concurrency,
            request_timeout,
        } => {
            let settings =
                commands::cmd_settings(state_dir, github_url, concurrency, request_timeout)?;
            println!("github_base_url:      {}", settings.github_base_url);
            println!("refresh_concurrency:  {}", settings.refresh_concurrency);
            println!("request_timeout_secs: {}", settings.request_timeout_secs);
        }
    }

    Ok(())
}
