mod commands;
mod logging;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "appvars",
    about = "Build the application matrix and per-application build envs for GitHub Actions"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Serialized record (or record list) handed over by the previous step.
#[derive(Args)]
struct AppVarsInput {
    #[arg(long, env = "INPUT_APPVARS", hide_env_values = true)]
    appvars: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the YAML application list to JSON
    Convert {
        /// YAML list of application specifications
        #[arg(long, env = "INPUT_APPS")]
        apps: String,
    },
    /// Check that the application list is a non-empty array
    ValidateInput(AppVarsInput),
    /// Infer missing application types from marker files
    DetectType(AppVarsInput),
    /// Extract description and runtime versions from manifests
    AppMeta(AppVarsInput),
    /// Flag applications whose watched paths changed
    DetectChanges(AppVarsInput),
    /// Validate the fully enriched application list
    ValidateResult(AppVarsInput),
    /// Stamp the run version onto every application
    Version(AppVarsInput),
    /// Reshape the application list into a job matrix
    Matrix(AppVarsInput),
    /// Merge action inputs into one application record
    MergeInputs {
        /// Record of the application being built
        #[arg(long = "app-vars", env = "INPUT_APP_VARS", hide_env_values = true)]
        app_vars: String,
    },
    /// Add branch facts, Helm values and PR deploy names
    Repo {
        #[command(flatten)]
        input: AppVarsInput,
        /// YAML Helm overrides used when the record has none
        #[arg(long, env = "INPUT_PR_DEPLOY_ADDITIONAL_HELM_VALUES")]
        helm_values: Option<String>,
    },
    /// Apply prune defaults and process Maven settings fields
    DockerMaven {
        #[command(flatten)]
        input: AppVarsInput,
        /// Token resolved for `token` in `from-github-context`
        #[arg(long, env = "INPUT_GITHUB_REPO_TOKEN", hide_env_values = true)]
        github_repo_token: Option<String>,
    },
    /// Derive dependency cache keys
    Cache(AppVarsInput),
    /// Generate identifiers and write the secret-free snapshot
    Finalize(AppVarsInput),
    /// Resolve the app-config branch used by PR deploys
    ConfigBranch {
        /// Repository holding the application config (owner/repo)
        #[arg(long, env = "INPUT_APP_CONFIG_REPO")]
        app_config_repo: String,
        /// Token with read access to the config repository
        #[arg(long, env = "GH_TOKEN", default_value = "", hide_env_values = true)]
        token: String,
        /// Requested branch; empty selects main
        #[arg(long, env = "INPUT_PR_DEPLOY_APP_CONFIG_BRANCH", default_value = "")]
        branch: String,
    },
    /// Gather downloaded build env snapshots into one JSON array
    Collect {
        /// Directory holding the downloaded `*.json` snapshots
        #[arg(long, env = "DOWNLOAD_PATH")]
        dir: PathBuf,
    },
    /// Fail when required build envs are missing or empty
    Require {
        /// A record or an array of records
        #[arg(long, env = "INPUT_JSON_CONFIG", default_value = "", hide_env_values = true)]
        json: String,
        /// Newline-separated list of required keys
        #[arg(long, env = "INPUT_REQUIRED_KEYS")]
        required_keys: String,
    },
}

impl Commands {
    /// Name used in the failure annotation.
    fn stage(&self) -> &'static str {
        match self {
            Commands::Convert { .. } => "convert",
            Commands::ValidateInput(_) => "validate input",
            Commands::DetectType(_) => "detect type",
            Commands::AppMeta(_) => "get app meta",
            Commands::DetectChanges(_) => "detect changes",
            Commands::ValidateResult(_) => "validate result",
            Commands::Version(_) => "create app vars matrix",
            Commands::Matrix(_) => "make matrix compatible",
            Commands::MergeInputs { .. } => "merge inputs",
            Commands::Repo { .. } => "process repo and PR deploy vars",
            Commands::DockerMaven { .. } => "process docker and maven vars",
            Commands::Cache(_) => "process cache vars",
            Commands::Finalize(_) => "finalize outputs",
            Commands::ConfigBranch { .. } => "checkout config branch",
            Commands::Collect { .. } => "collect build envs",
            Commands::Require { .. } => "validate required build envs",
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Convert { apps } => commands::convert(&apps),
        Commands::ValidateInput(input) => commands::validate_input(&input.appvars),
        Commands::DetectType(input) => commands::detect_type(&input.appvars),
        Commands::AppMeta(input) => commands::app_meta(&input.appvars),
        Commands::DetectChanges(input) => commands::detect_changes(&input.appvars).await,
        Commands::ValidateResult(input) => commands::validate_result(&input.appvars),
        Commands::Version(input) => commands::version(&input.appvars),
        Commands::Matrix(input) => commands::matrix(&input.appvars),
        Commands::MergeInputs { app_vars } => commands::merge_inputs(&app_vars),
        Commands::Repo { input, helm_values } => {
            commands::repo(&input.appvars, helm_values.as_deref())
        }
        Commands::DockerMaven {
            input,
            github_repo_token,
        } => commands::docker_maven(&input.appvars, github_repo_token),
        Commands::Cache(input) => commands::cache(&input.appvars),
        Commands::Finalize(input) => commands::finalize(&input.appvars),
        Commands::ConfigBranch {
            app_config_repo,
            token,
            branch,
        } => commands::config_branch(&app_config_repo, &token, &branch).await,
        Commands::Collect { dir } => commands::collect(&dir),
        Commands::Require {
            json,
            required_keys,
        } => commands::require(&json, &required_keys),
    }
}

#[tokio::main]
async fn main() {
    logging::init();

    let cli = Cli::parse();
    let stage = cli.command.stage();

    if let Err(e) = run(cli.command).await {
        tracing::error!("Failed to {stage}: {e:#}");
        std::process::exit(1);
    }
}
