use crate::command::{CommandFactory, ExecutableCommand, Factory, Stdin, Stdout};
use crate::env::{Environment, GlobalEnvironment};
use crate::parser::Invocation;
use anyhow::{Context, Result, anyhow};
use log::debug;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

/// Command that is not a builtin.
pub struct ExternalCommand {
    name: String,
    args: Vec<String>,
    local_env: Environment,
}

impl CommandFactory for Factory<ExternalCommand> {
    /// Accepts every name; resolution happens when the command runs, against the
    /// environment of that moment.
    fn try_create(&self, invocation: &Invocation) -> Option<Box<dyn ExecutableCommand>> {
        Some(Box::new(ExternalCommand {
            name: invocation.name.clone(),
            args: invocation.args.clone(),
            local_env: invocation.local_env.clone(),
        }))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        self: Box<Self>,
        stdin: &mut dyn Stdin,
        stdout: &mut dyn Stdout,
        env: &GlobalEnvironment,
    ) -> Result<()> {
        let vars = self.local_env.merged_over(&env.snapshot());
        let search_paths = vars.get("PATH").unwrap_or_default();
        let program = find_command_path(OsStr::new(search_paths), Path::new(&self.name))
            .ok_or_else(|| anyhow!("command not found: {}", self.name))?;
        debug!("spawning {} {:?}", program.display(), self.args);

        let mut child = std::process::Command::new(&*program)
            .args(&self.args)
            .env_clear()
            .envs(vars.iter())
            .stdin(stdin.stdio()?)
            .stdout(stdout.stdio()?)
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("{}: failed to start", self.name))?;
        let exit_status = child
            .wait()
            .with_context(|| format!("{}: failed to wait", self.name))?;
        match exit_status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(anyhow!("{}: exited with status {code}", self.name)),
            None => Err(anyhow!(
                "{}: exited with status {}",
                self.name,
                terminated_by_signal(exit_status)
            )),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match exit_status.signal() {
        Some(signal) => 128 + signal,
        None => -1,
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

/// Resolve a command path the way a typical shell would.
///
/// Behavior:
/// - Absolute path: returns it if it exists.
/// - Relative with multiple components (e.g., `bin/sh`): returns it if it exists.
/// - `./foo` on Unix or any `./`-prefixed path on other platforms: returns it if it exists.
/// - Single path component (no separators): search each directory in `search_paths` (PATH)
///   and return the first existing match.
/// - Empty path: returns `None`.
pub fn find_command_path<'a>(search_paths: &OsStr, path: &'a Path) -> Option<Cow<'a, Path>> {
    if path.is_absolute() {
        return find_by_path(path).map(Cow::Borrowed);
    }

    let search_in_current_dir = cfg!(not(unix)) || path.starts_with("./");
    if search_in_current_dir && path.exists() {
        return Some(Cow::Borrowed(path));
    }

    let mut components = path.components();
    match (components.next(), components.next()) {
        (None, _) => None,
        (Some(single), None) => find_in_path(search_paths, single.as_os_str()).map(Cow::Owned),
        _ => find_by_path(path).map(Cow::Borrowed),
    }
}

fn find_in_path(search_paths: &OsStr, cmd: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(cmd))
        .find(|candidate| candidate.is_file())
}

fn find_by_path(path: &Path) -> Option<&Path> {
    if path.exists() { Some(path) } else { None }
}
