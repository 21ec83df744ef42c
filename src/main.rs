//! ylaunch application entry point
//!
//! This is the main executable for the Y Pipeline launcher. It opens the
//! three-pane browser by default and offers scriptable listing and launch
//! commands for the same hierarchy.
//!
//! # Usage
//!
//! ```bash
//! # Browse projects interactively (default command)
//! ylaunch
//! ylaunch browse --root /mnt/projects
//!
//! # List projects, a project's seq/shot tree, or a shot's files
//! ylaunch ls
//! ylaunch ls p1
//! ylaunch ls p1 sh010 --seq sq010 --role maya
//!
//! # Launch Nuke on a flat shot's role directory
//! ylaunch launch p1 s1 --role nuke
//!
//! # Print what would run without starting anything
//! ylaunch launch p1 sh010 -s sq010 -r maya -f sh010_anim_v001.ma --dry-run
//!
//! # Show the effective configuration
//! ylaunch config show
//! ```
//!
//! # Configuration
//!
//! Settings live in the user's config directory
//! (`~/.config/ylaunch/config.toml` on Linux), can be overridden with
//! `YLAUNCH_*` environment variables and then with the global flags. When
//! `browse` starts without a projects root it asks for one.

use std::path::PathBuf;
use std::process::ExitCode;
use ylaunch::{
    LauncherError, LauncherSession, Role,
    cli::{Cli, Commands, ConfigCommands},
    config::{self, LauncherConfig},
    logging,
    output::{OutputWriter, StdoutWriter},
    scanner::SeqShotRef,
    tui::{self, UiError},
    watcher::DirWatcher,
};

type Result<T> = std::result::Result<T, LauncherError>;

/// Open a session on the configured roots
fn open_session(config: &LauncherConfig) -> Result<LauncherSession<DirWatcher>> {
    let root = config
        .root_path
        .clone()
        .ok_or_else(|| LauncherError::InvalidState("no projects root configured, pass --root".to_string()))?;

    let mut session = LauncherSession::new(DirWatcher::new()?);
    session.set_roots(root, config.publish_root_path.clone())?;
    Ok(session)
}

/// Select a project, failing if it is not listed under the root
fn enter_project(session: &mut LauncherSession<DirWatcher>, project: &str) -> Result<()> {
    if !session.projects().iter().any(|p| p == project) {
        let path = session
            .selection()
            .root_path()
            .map_or_else(|| PathBuf::from(project), |root| root.join(project));
        return Err(LauncherError::PathUnavailable(path));
    }
    session.select_project(project)
}

/// Resolve a shot argument to a row of the scanned tree
///
/// With a sequence the shot must be nested under it; otherwise it must be a
/// top-level node. A sequence group is accepted here and left to the session,
/// which gives it no listing.
fn shot_ref(session: &LauncherSession<DirWatcher>, shot: &str, sequence: Option<&str>) -> Result<SeqShotRef> {
    session
        .seq_shot_tree()
        .row(sequence, shot)
        .ok_or_else(|| {
            let project = session.selection().project_path().unwrap_or_default();
            let path = match sequence {
                Some(seq) => project.join(seq).join(shot),
                None => project.join(shot),
            };
            LauncherError::PathUnavailable(path)
        })
}

/// Print advisories queued by the session
fn report_advisories(session: &mut LauncherSession<DirWatcher>, output: &dyn OutputWriter) {
    for advisory in session.take_advisories() {
        output.report(&advisory);
    }
}

/// Handle the browse command
fn handle_browse_command(config: LauncherConfig) -> Result<()> {
    let config = if config.has_root() {
        config
    } else {
        config::prompt_roots(config)?
    };

    tui::run(config).map_err(|e| match e {
        UiError::LauncherError(e) => e,
        UiError::IoError(e) => LauncherError::IoError(e),
    })
}

/// Handle the ls command
fn handle_ls_command(
    config: &LauncherConfig,
    project: Option<&str>,
    shot: Option<&str>,
    sequence: Option<&str>,
    role: Option<Role>,
    output: &dyn OutputWriter,
) -> Result<()> {
    let mut session = open_session(config)?;

    let Some(project) = project else {
        report_advisories(&mut session, output);
        for name in session.projects() {
            println!("{name}");
        }
        return Ok(());
    };

    enter_project(&mut session, project)?;

    let Some(shot) = shot else {
        report_advisories(&mut session, output);
        for node in &session.seq_shot_tree().nodes {
            if node.is_leaf() {
                println!("{}", node.name);
            } else {
                println!("{}/", node.name);
            }
            for child in &node.children {
                println!("  {}", child.name);
            }
        }
        return Ok(());
    };

    let role = role.ok_or(LauncherError::NoRoleSelected)?;
    session.select_role(Some(role))?;
    let node = shot_ref(&session, shot, sequence)?;
    session.select_seq_shot(&node)?;
    report_advisories(&mut session, output);

    if let Ok(dir) = session.selection().resolved_file_path() {
        output.info(&format!("{}:", dir.display()));
    }
    for name in session.files() {
        println!("{name}");
    }
    Ok(())
}

/// Parameters of the launch command
struct LaunchArgs<'a> {
    project: &'a str,
    shot: &'a str,
    sequence: Option<&'a str>,
    role: Role,
    file: Option<&'a str>,
    dry_run: bool,
}

/// Handle the launch command
fn handle_launch_command(config: &LauncherConfig, args: &LaunchArgs<'_>, output: &dyn OutputWriter) -> Result<()> {
    let mut session = open_session(config)?;
    session.select_role(Some(args.role))?;
    enter_project(&mut session, args.project)?;

    let node = shot_ref(&session, args.shot, args.sequence)?;
    session.select_seq_shot(&node)?;

    if let Some(file) = args.file {
        if !session.files().iter().any(|f| f == file) {
            report_advisories(&mut session, output);
            let dir = session.selection().resolved_file_path()?;
            return Err(LauncherError::PathUnavailable(dir.join(file)));
        }
        session.select_file(Some(file))?;
    }

    if args.dry_run {
        let plan = session.launch_plan(config)?;
        report_advisories(&mut session, output);
        println!("{plan}");
        return Ok(());
    }

    let result = session.launch(config);
    report_advisories(&mut session, output);
    let pid = result?;
    output.success(&format!("Launched {} (pid {pid})", args.role));
    Ok(())
}

/// Handle config subcommands
fn handle_config_command(config: &LauncherConfig, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", config.to_toml()?);
        }
        ConfigCommands::Path => {
            println!("{}", LauncherConfig::config_path()?.display());
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = LauncherConfig::load()?.with_overrides(cli.overrides());
    let output = StdoutWriter::new(config.quiet);

    match cli.get_command() {
        Commands::Browse => handle_browse_command(config),
        Commands::Ls {
            project,
            shot,
            sequence,
            role,
        } => handle_ls_command(
            &config,
            project.as_deref(),
            shot.as_deref(),
            sequence.as_deref(),
            role,
            &output,
        ),
        Commands::Launch {
            project,
            shot,
            sequence,
            role,
            file,
            dry_run,
        } => {
            let args = LaunchArgs {
                project: &project,
                shot: &shot,
                sequence: sequence.as_deref(),
                role,
                file: file.as_deref(),
                dry_run,
            };
            handle_launch_command(&config, &args, &output)
        }
        Commands::Config(command) => handle_config_command(&config, &command),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            StdoutWriter::new(false).report(&e);
            ExitCode::FAILURE
        }
    }
}
