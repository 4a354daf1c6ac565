//! Command dispatch

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::application::services::warn_on_cancellation;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output::{self, render_tree, TerminalNotifier};
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::RunState;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{IndicatifProgress, Notifier};
use crate::infrastructure::{InfraError, InfraResult};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e))?;
        return Ok(());
    };
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);

    match command {
        Commands::Hello => {
            notifier.info("Hello! This is the AI Competition Workspace.");
            Ok(())
        }
        Commands::Tree => cmd_tree(&build_container(cli)?),
        Commands::Refresh => cmd_refresh(&build_container(cli)?, notifier.as_ref()),
        Commands::Create { name, framework } => cmd_create(
            &build_container(cli)?,
            notifier.as_ref(),
            name.as_deref(),
            framework.as_deref(),
        ),
        Commands::Run {
            competition,
            experiment,
        } => cmd_run(
            &build_container(cli)?,
            notifier,
            competition.as_deref(),
            experiment.as_deref(),
        ),
        Commands::Details {
            competition,
            experiment,
            print,
        } => cmd_details(
            &build_container(cli)?,
            competition.as_deref(),
            experiment.as_deref(),
            *print,
        ),
        Commands::Config { command } => cmd_config(cli, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = load_settings(cli)?;
    Ok(ServiceContainer::new(settings)?)
}

/// Current-thread runtime for a single foreground run.
fn build_runtime() -> InfraResult<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| InfraError::Runtime {
            message: format!("start async runtime: {e}"),
        })
}

fn workspace_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.workspace {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir().map_err(|e| InfraError::io("get current directory", e).into()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let workspace = workspace_dir(cli)?;
    let mut settings = Settings::load(Some(&workspace))?;
    if let Some(data) = &cli.data {
        settings.data_file = Some(data.clone());
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer) -> CliResult<()> {
    let tree = container.tree();
    output::info(&render_tree(&tree));
    Ok(())
}

#[instrument(skip(container, notifier))]
fn cmd_refresh(container: &ServiceContainer, notifier: &dyn Notifier) -> CliResult<()> {
    let tree = container.tree();
    let stale = Arc::new(AtomicBool::new(false));
    let subscription = {
        let stale = Arc::clone(&stale);
        tree.subscribe(move || stale.store(true, Ordering::SeqCst))
    };

    tree.refresh();

    // Host side: re-query from the root once invalidated
    if stale.swap(false, Ordering::SeqCst) {
        output::info(&render_tree(&tree));
    }
    subscription.dispose();

    notifier.info("Refresh complete!");
    Ok(())
}

#[instrument(skip(container, notifier))]
fn cmd_create(
    container: &ServiceContainer,
    notifier: &dyn Notifier,
    name: Option<&str>,
    framework: Option<&str>,
) -> CliResult<()> {
    let service = container.projects();
    if let Some(fw) = framework {
        if !service.frameworks().iter().any(|f| f == fw) {
            return Err(CliError::InvalidArgs(format!(
                "unknown framework '{fw}' (available: {})",
                service.frameworks().join(", ")
            )));
        }
    }

    match service.create(name, framework)? {
        Some(plan) => notifier.info(&plan.announcement()),
        None => debug!("project creation cancelled"),
    }
    Ok(())
}

#[instrument(skip(container, notifier))]
fn cmd_run(
    container: &ServiceContainer,
    notifier: Arc<dyn Notifier>,
    competition: Option<&str>,
    experiment: Option<&str>,
) -> CliResult<()> {
    let tree = container.tree();
    let selected = container.picker().pick(&tree, competition, experiment)?;
    let label = selected.experiment.label().to_string();
    let runner = container.runner();

    let runtime = build_runtime()?;

    let report = runtime.block_on(async {
        let token = CancellationToken::new();

        let ctrl_c = {
            let token = token.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    token.cancel();
                }
            })
        };
        let hook = warn_on_cancellation(&token, &label, Arc::clone(&notifier));

        let progress = IndicatifProgress::new(&format!("Running {label}"));
        let report = runner.run(&label, &token, &progress).await?;
        if report.state == RunState::Cancelled {
            progress.abandon("cancelled");
        }

        ctrl_c.abort();
        drop(hook);
        Ok::<_, ApplicationError>(report)
    })?;

    debug!("run {} finished: {}", report.id, report.state);
    if report.state == RunState::Completed {
        notifier.info(&format!(
            "Experiment '{}' in '{}' completed!",
            label, selected.competition
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_details(
    container: &ServiceContainer,
    competition: Option<&str>,
    experiment: Option<&str>,
    print: bool,
) -> CliResult<()> {
    let tree = container.tree();
    let picker = container.picker();
    let selected = picker.pick(&tree, competition, experiment)?;
    let lines = tree
        .detail_lines(&selected.competition, selected.experiment.label())
        .ok_or_else(|| {
            ApplicationError::MissingSelection(format!(
                "No experiment named '{}'",
                selected.experiment.label()
            ))
        })?;

    if print {
        output::header(&format!("Details: {}", selected.experiment.label()));
        for line in &lines {
            output::detail(line);
        }
    } else {
        picker.show(&lines, &format!("{}: ", selected.experiment.label()))?;
    }
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let workspace = workspace_dir(cli)?;
            output::header("Config files");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail("global: (no config directory)"),
            }
            output::detail(&format!(
                "local:  {}",
                local_config_path(&workspace).display()
            ));
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
