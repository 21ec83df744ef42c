//! Environment and command-line assembly for DCC launches
//!
//! Turns a terminal [`Selection`] into a [`LaunchPlan`]: the executable, its
//! arguments and the pipeline variables handed to the new process. The plan
//! is passed explicitly to the spawn call; the launcher's own environment is
//! never modified.
//!
//! # Variables
//!
//! Every launch exports `ROLE`, `PROJECT_ROOT`, `PUBLISH_ROOT`, `SHOW`,
//! `SEQ` and `SHOT`. Maya launches additionally receive the studio
//! environment-definition file, with the pipeline variables applied last.

pub mod env_file;

use crate::config::Executables;
use crate::resolver::{DirectoryLaunch, Role};
use crate::session::Selection;
use crate::{LauncherError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Everything needed to start one DCC process
#[derive(Debug)]
pub struct LaunchPlan {
    /// Role being launched
    pub role: Role,
    /// Executable path
    pub program: PathBuf,
    /// Arguments after the executable
    pub args: Vec<String>,
    /// Variables set on top of the inherited environment
    pub env: BTreeMap<String, String>,
    /// Non-fatal problems found while building the plan
    pub warnings: Vec<LauncherError>,
}

impl LaunchPlan {
    /// Executable followed by its arguments
    #[must_use]
    pub fn command_line(&self) -> Vec<String> {
        std::iter::once(self.program.to_string_lossy().to_string())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for LaunchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            writeln!(f, "{key}={value}")?;
        }
        write!(f, "{}", self.command_line().join(" "))
    }
}

/// Build the launch for a selection
///
/// # Errors
///
/// Returns `LauncherError::NoRoleSelected` if no role is chosen and
/// `LauncherError::PathUnavailable` if the selection does not resolve to a
/// shot's role directory.
pub fn build_launch(
    selection: &Selection,
    executables: &Executables,
    env_file: Option<&Path>,
) -> Result<LaunchPlan> {
    let role = selection.role().ok_or(LauncherError::NoRoleSelected)?;
    let resolved = selection.resolved_file_path()?;
    let convention = role.convention();

    let mut warnings = Vec::new();
    let mut env = BTreeMap::new();

    if role == Role::Maya
        && let Some(path) = env_file
    {
        match env_file::load_env_definition(path) {
            Ok(definition) => {
                for malformed in definition.malformed {
                    tracing::warn!(line = malformed.line, text = %malformed.text, "skipping env definition line");
                    warnings.push(malformed.into());
                }
                env.extend(definition.vars);
            }
            Err(e) => warnings.push(e),
        }
    }

    env.extend(pipeline_env(selection, role));

    let mut args: Vec<String> = convention.leading_args.iter().map(|a| (*a).to_string()).collect();
    match selection.selected_file() {
        Some(file) => {
            if let Some(flag) = convention.file_flag {
                args.push(flag.to_string());
            }
            args.push(resolved.join(file).to_string_lossy().to_string());
        }
        None => match convention.directory_launch {
            DirectoryLaunch::Flag(flag) => {
                args.push(flag.to_string());
                args.push(resolved.to_string_lossy().to_string());
            }
            DirectoryLaunch::EnvVar(var) => {
                env.insert(var.to_string(), resolved.to_string_lossy().to_string());
            }
        },
    }

    Ok(LaunchPlan {
        role,
        program: executables.for_role(role).to_path_buf(),
        args,
        env,
        warnings,
    })
}

/// Fixed pipeline variables derived from the selection
fn pipeline_env(selection: &Selection, role: Role) -> [(String, String); 6] {
    let path_value = |path: Option<&Path>| path.map(|p| p.to_string_lossy().to_string()).unwrap_or_default();
    [
        ("ROLE".to_string(), role.as_str().to_string()),
        ("PROJECT_ROOT".to_string(), path_value(selection.root_path())),
        ("PUBLISH_ROOT".to_string(), path_value(selection.publish_root_path())),
        ("SHOW".to_string(), selection.project().unwrap_or_default().to_string()),
        ("SEQ".to_string(), selection.sequence().unwrap_or_default().to_string()),
        ("SHOT".to_string(), selection.shot().unwrap_or_default().to_string()),
    ]
}

/// Start the planned process without waiting for it
///
/// # Errors
///
/// Returns `LauncherError::IoError` if the process cannot be started.
pub fn spawn(plan: &LaunchPlan) -> Result<u32> {
    tracing::info!(command = %plan.command_line().join(" "), "launching {}", plan.role);
    let child = Command::new(&plan.program)
        .args(&plan.args)
        .envs(&plan.env)
        .stdin(Stdio::null())
        .spawn()?;
    Ok(child.id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LauncherSession;
    use crate::testing::{RecordingWatcher, StudioTree, tree_row};

    fn executables() -> Executables {
        Executables {
            maya: PathBuf::from("/apps/maya"),
            houdini: PathBuf::from("/apps/houdini"),
            nuke: PathBuf::from("/apps/nuke"),
        }
    }

    fn session_on(
        studio: &StudioTree,
        role: Option<Role>,
        sequence: Option<&str>,
        shot: &str,
    ) -> LauncherSession<RecordingWatcher> {
        let mut session = LauncherSession::new(RecordingWatcher::default());
        session
            .set_roots(studio.root(), Some(PathBuf::from("/publish")))
            .unwrap();
        session.select_role(role).unwrap();
        session.select_project("p1").unwrap();
        let node = tree_row(&session, sequence, shot);
        session.select_seq_shot(&node).unwrap();
        session
    }

    fn flat_studio() -> StudioTree {
        let studio = StudioTree::new();
        studio.file("p1/s1/nuke/shotA_comp.nk");
        studio.file("p1/s1/maya/s1_layout.ma");
        studio.dir("p1/s1/houdini");
        studio.dir("p1/sq010/sh010/maya");
        studio
    }

    #[test]
    fn test_nuke_file_launch() {
        let studio = flat_studio();
        let mut session = session_on(&studio, Some(Role::Nuke), None, "s1");
        session.select_file(Some("shotA_comp.nk")).unwrap();

        let plan = build_launch(session.selection(), &executables(), None).unwrap();
        let file = studio.root().join("p1/s1/nuke/shotA_comp.nk");
        assert_eq!(
            plan.command_line(),
            vec!["/apps/nuke".to_string(), "--nukex".to_string(), file.to_string_lossy().to_string()]
        );
    }

    #[test]
    fn test_nuke_directory_launch() {
        let studio = flat_studio();
        let session = session_on(&studio, Some(Role::Nuke), None, "s1");

        let plan = build_launch(session.selection(), &executables(), None).unwrap();
        let dir = studio.root().join("p1/s1/nuke");
        assert_eq!(
            plan.command_line(),
            vec![
                "/apps/nuke".to_string(),
                "--nukex".to_string(),
                "-m".to_string(),
                dir.to_string_lossy().to_string(),
            ]
        );
    }

    #[test]
    fn test_maya_file_and_directory_launch() {
        let studio = flat_studio();
        let mut session = session_on(&studio, Some(Role::Maya), None, "s1");
        let dir = studio.root().join("p1/s1/maya");

        let plan = build_launch(session.selection(), &executables(), None).unwrap();
        assert_eq!(plan.args, vec!["-proj".to_string(), dir.to_string_lossy().to_string()]);

        session.select_file(Some("s1_layout.ma")).unwrap();
        let plan = build_launch(session.selection(), &executables(), None).unwrap();
        assert_eq!(
            plan.args,
            vec!["-file".to_string(), dir.join("s1_layout.ma").to_string_lossy().to_string()]
        );
    }

    #[test]
    fn test_houdini_directory_launch_sets_job() {
        let studio = flat_studio();
        let session = session_on(&studio, Some(Role::Houdini), None, "s1");

        let plan = build_launch(session.selection(), &executables(), None).unwrap();
        assert!(plan.args.is_empty());
        assert_eq!(plan.command_line(), vec!["/apps/houdini".to_string()]);
        assert_eq!(
            plan.env["JOB"],
            studio.root().join("p1/s1/houdini").to_string_lossy()
        );
    }

    #[test]
    fn test_pipeline_variables() {
        let studio = flat_studio();
        let session = session_on(&studio, Some(Role::Maya), Some("sq010"), "sh010");

        let plan = build_launch(session.selection(), &executables(), None).unwrap();
        assert_eq!(plan.env["ROLE"], "maya");
        assert_eq!(plan.env["PROJECT_ROOT"], studio.root().to_string_lossy());
        assert_eq!(plan.env["PUBLISH_ROOT"], "/publish");
        assert_eq!(plan.env["SHOW"], "p1");
        assert_eq!(plan.env["SEQ"], "sq010");
        assert_eq!(plan.env["SHOT"], "sh010");
    }

    #[test]
    fn test_flat_shot_has_empty_seq() {
        let studio = flat_studio();
        let session = session_on(&studio, Some(Role::Nuke), None, "s1");

        let plan = build_launch(session.selection(), &executables(), None).unwrap();
        assert_eq!(plan.env["SEQ"], "");
        assert_eq!(plan.env["SHOT"], "s1");
    }

    #[test]
    fn test_maya_env_file_loses_to_pipeline_keys() {
        let studio = flat_studio();
        let env_path = studio.file_with_content(
            "maya.env",
            "# studio maya env\nSHOW=wrong_show\nMAYA_APP_DIR=/studio/maya\nbroken\n",
        );
        let mut session = session_on(&studio, Some(Role::Maya), None, "s1");

        let plan = session
            .launch_plan(&crate::config::LauncherConfig {
                executables: executables(),
                env_file: Some(env_path),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(plan.env["SHOW"], "p1");
        assert_eq!(plan.env["MAYA_APP_DIR"], "/studio/maya");
        assert!(plan.warnings.is_empty());
        let advisories = session.take_advisories();
        assert!(matches!(
            advisories.as_slice(),
            [LauncherError::MalformedEnvDefinition { line: 4, .. }]
        ));
    }

    #[test]
    fn test_env_file_only_applies_to_maya() {
        let studio = flat_studio();
        let env_path = studio.file_with_content("maya.env", "MAYA_APP_DIR=/studio/maya\n");
        let session = session_on(&studio, Some(Role::Nuke), None, "s1");

        let plan = build_launch(session.selection(), &executables(), Some(&env_path)).unwrap();
        assert!(!plan.env.contains_key("MAYA_APP_DIR"));
    }

    #[test]
    fn test_unreadable_env_file_is_a_warning() {
        let studio = flat_studio();
        let session = session_on(&studio, Some(Role::Maya), None, "s1");

        let plan = build_launch(
            session.selection(),
            &executables(),
            Some(Path::new("/nonexistent/maya.env")),
        )
        .unwrap();
        assert!(matches!(plan.warnings.as_slice(), [LauncherError::PathUnavailable(_)]));
        assert_eq!(plan.env["SHOW"], "p1");
    }

    #[test]
    fn test_no_role_fails() {
        let studio = flat_studio();
        let session = session_on(&studio, None, None, "s1");
        assert!(matches!(
            build_launch(session.selection(), &executables(), None),
            Err(LauncherError::NoRoleSelected)
        ));
    }

    #[test]
    fn test_sequence_group_is_not_launchable() {
        let studio = flat_studio();
        let session = session_on(&studio, Some(Role::Maya), None, "sq010");
        assert!(matches!(
            build_launch(session.selection(), &executables(), None),
            Err(LauncherError::PathUnavailable(_))
        ));
    }

    #[test]
    fn test_display_lists_env_then_command() {
        let studio = flat_studio();
        let session = session_on(&studio, Some(Role::Nuke), None, "s1");
        let plan = build_launch(session.selection(), &executables(), None).unwrap();

        let text = plan.to_string();
        assert!(text.starts_with("PROJECT_ROOT="));
        assert!(text.lines().last().unwrap().starts_with("/apps/nuke --nukex -m "));
    }

    #[test]
    fn test_spawn_starts_process() {
        let plan = LaunchPlan {
            role: Role::Nuke,
            program: PathBuf::from("true"),
            args: Vec::new(),
            env: BTreeMap::from([("SHOW".to_string(), "p1".to_string())]),
            warnings: Vec::new(),
        };
        assert!(spawn(&plan).unwrap() > 0);
    }

    #[test]
    fn test_spawn_missing_program_is_io_error() {
        let plan = LaunchPlan {
            role: Role::Maya,
            program: PathBuf::from("/nonexistent/ylaunch/maya"),
            args: Vec::new(),
            env: BTreeMap::new(),
            warnings: Vec::new(),
        };
        assert!(matches!(spawn(&plan), Err(LauncherError::IoError(_))));
    }
}
