mod cli;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use pm_tracker::model::{ProjectId, ProjectStatus, ResourceId, SubTaskId, TaskId, TaskStatus};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pm-tracker", version, about = "Projects, tasks and a resource allocation ledger")]
struct Cli {
    /// TOML configuration file; missing file means defaults.
    #[arg(long, global = true, env = "PM_TRACKER_CONFIG", default_value = pm_tracker::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Overrides `data_dir` from the configuration.
    #[arg(long, global = true, env = "PM_TRACKER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Print lists and summaries as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a configuration file with every default spelled out.
    Init {
        #[arg(long)]
        force: bool,
    },
    #[command(subcommand)]
    Resource(ResourceCommand),
    #[command(subcommand)]
    Project(ProjectCommand),
    #[command(subcommand)]
    Task(TaskCommand),
    /// Projects grouped by status.
    Board,
    /// Counts, hours and resource utilisation.
    Dashboard,
    /// Write one collection as CSV or XLSX.
    Export {
        #[arg(value_enum)]
        collection: CollectionArg,
        path: PathBuf,
        /// Defaults to the file extension.
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },
    /// Delete every project, task and resource.
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ResourceCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        total: u32,
        #[arg(long)]
        skillset: Option<String>,
    },
    List,
    Edit {
        id: ResourceId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        total: Option<u32>,
        #[arg(long, conflicts_with = "clear_skillset")]
        skillset: Option<String>,
        #[arg(long)]
        clear_skillset: bool,
    },
    Delete {
        id: ResourceId,
    },
    Allocate {
        id: ResourceId,
        project: ProjectId,
        amount: u32,
    },
    Deallocate {
        id: ResourceId,
        project: ProjectId,
        amount: u32,
    },
    Available {
        id: ResourceId,
    },
}

#[derive(Args)]
struct ProjectFields {
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    sponsor: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    start: Option<NaiveDate>,
    /// YYYY-MM-DD
    #[arg(long)]
    end: Option<NaiveDate>,
    #[arg(long)]
    skillset: Option<String>,
}

#[derive(Subcommand)]
enum ProjectCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        department: String,
        #[command(flatten)]
        fields: ProjectFields,
        /// Files to attach.
        #[arg(long = "attach")]
        attachments: Vec<PathBuf>,
    },
    List {
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        sponsor: Option<String>,
        #[arg(long)]
        status: Option<ProjectStatus>,
    },
    Show {
        id: ProjectId,
    },
    Edit {
        id: ProjectId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[command(flatten)]
        fields: ProjectFields,
    },
    Status {
        id: ProjectId,
        status: ProjectStatus,
    },
    Attach {
        id: ProjectId,
        path: PathBuf,
    },
    Detach {
        id: ProjectId,
        index: usize,
    },
    Delete {
        id: ProjectId,
    },
}

#[derive(Subcommand)]
enum TaskCommand {
    Add {
        project: ProjectId,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = 0.0)]
        estimated: f64,
        #[arg(long, default_value_t = 0.0)]
        actual: f64,
        #[arg(long, default_value_t = TaskStatus::Open)]
        status: TaskStatus,
    },
    List {
        #[arg(long)]
        project: Option<ProjectId>,
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long)]
        search: Option<String>,
    },
    Edit {
        id: TaskId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        estimated: Option<f64>,
        #[arg(long)]
        actual: Option<f64>,
    },
    Status {
        id: TaskId,
        status: TaskStatus,
    },
    Delete {
        id: TaskId,
    },
    #[command(subcommand)]
    Sub(SubTaskCommand),
}

#[derive(Subcommand)]
enum SubTaskCommand {
    Add {
        task: TaskId,
        #[arg(long)]
        title: String,
        #[arg(long, default_value_t = 0.0)]
        estimated: f64,
        #[arg(long, default_value_t = 0.0)]
        actual: f64,
    },
    Edit {
        task: TaskId,
        id: SubTaskId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        estimated: Option<f64>,
        #[arg(long)]
        actual: Option<f64>,
    },
    Remove {
        task: TaskId,
        id: SubTaskId,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CollectionArg {
    Projects,
    Tasks,
    Resources,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Xlsx,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let mut config = pm_tracker::config::load_config(&args.config)?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    pm_tracker::lifecycle::setup_tracing(&config.log_filter);

    if let Command::Init { force } = args.command {
        return cli::init_config(&args.config, &config, force);
    }

    let system = pm_tracker::lifecycle::TrackerSystem::open(&config)?;
    let output = cli::Output { json: args.json };
    let result = match args.command {
        Command::Init { .. } => Ok(()),
        Command::Resource(cmd) => cli::resource(&system, &output, cmd).await,
        Command::Project(cmd) => cli::project(&system, &output, cmd).await,
        Command::Task(cmd) => cli::task(&system, &output, cmd).await,
        Command::Board => cli::board(&system, &output).await,
        Command::Dashboard => cli::dashboard(&system, &output).await,
        Command::Export {
            collection,
            path,
            format,
        } => cli::export(&system, collection, &path, format).await,
        Command::Clear { yes } => cli::clear(&system, yes).await,
    };
    system.shutdown().await?;
    result
}
