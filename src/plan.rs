//! The approved actions and the single shell command that carries them out.

use crate::error::{GuzzleError, Result};
use std::convert::Infallible;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Everything the user agreed to, in the order it will run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionPlan {
    pub tap: Vec<String>,
    pub untap: Vec<String>,
    pub install: Vec<String>,
    pub remove: Vec<String>,
    pub update: bool,
    pub upgrade: bool,
}

impl ActionPlan {
    pub fn is_empty(&self) -> bool {
        self.tap.is_empty()
            && self.untap.is_empty()
            && self.install.is_empty()
            && self.remove.is_empty()
            && !self.update
            && !self.upgrade
    }

    /// One shell command per step, every word shell-quoted.
    ///
    /// Taps and untaps are one command each; installs and removals are batched
    /// into a single command apiece.
    pub fn commands(&self, brew_bin: &Path) -> Result<Vec<String>> {
        let brew = brew_bin.to_string_lossy();
        let mut commands = Vec::new();

        for tap in &self.tap {
            commands.push(shell_command(&brew, "tap", std::slice::from_ref(tap))?);
        }
        for tap in &self.untap {
            commands.push(shell_command(&brew, "untap", std::slice::from_ref(tap))?);
        }
        if !self.install.is_empty() {
            commands.push(shell_command(&brew, "install", &self.install)?);
        }
        if !self.remove.is_empty() {
            commands.push(shell_command(&brew, "remove", &self.remove)?);
        }
        if self.update {
            commands.push(shell_command(&brew, "update", &[])?);
        }
        if self.upgrade {
            commands.push(shell_command(&brew, "upgrade", &[])?);
        }

        Ok(commands)
    }
}

/// `<brew> <subcommand> <names...>` with each word quoted for `sh`
fn shell_command(brew: &str, subcommand: &str, names: &[String]) -> Result<String> {
    let mut words = vec![quote(brew)?, subcommand.to_string()];
    for name in names {
        words.push(quote(name)?);
    }
    Ok(words.join(" "))
}

fn quote(word: &str) -> Result<String> {
    shlex::try_quote(word)
        .map(|quoted| quoted.into_owned())
        .map_err(|_| GuzzleError::Unquotable(word.to_string()))
}

/// How a session ended when it didn't hand control to the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NothingToDo,
    DryRun(String),
}

/// Run the plan, consuming it.
///
/// On success with work to do this never returns: the process is replaced by
/// `sh -c <commands>`, whose exit status becomes ours.
pub fn execute(
    plan: ActionPlan,
    brew_bin: &Path,
    dry_run: bool,
    out: &mut impl Write,
) -> Result<Outcome> {
    let commands = plan.commands(brew_bin)?;
    if commands.is_empty() {
        writeln!(out, "Nothing to do.")?;
        return Ok(Outcome::NothingToDo);
    }

    let command_line = commands.join("; ");
    if dry_run {
        writeln!(out, "Would run: {}", command_line)?;
        return Ok(Outcome::DryRun(command_line));
    }

    writeln!(out, "Running command: {}", command_line)?;
    out.flush()?;
    match replace_process(&command_line)? {}
}

#[cfg(unix)]
fn replace_process(command_line: &str) -> Result<Infallible> {
    use std::os::unix::process::CommandExt;

    debug!(command_line, "exec");
    // exec only returns on failure
    let err = Command::new("sh").arg("-c").arg(command_line).exec();
    Err(err.into())
}

#[cfg(not(unix))]
fn replace_process(command_line: &str) -> Result<Infallible> {
    debug!(command_line, "spawning");
    let status = Command::new("sh").arg("-c").arg(command_line).status()?;
    std::process::exit(status.code().unwrap_or(1));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brew() -> &'static Path {
        Path::new("/usr/local/bin/brew")
    }

    #[test]
    fn test_commands_fixed_order() {
        let plan = ActionPlan {
            tap: vec!["foo/bar".into(), "baz/qux".into()],
            untap: vec!["old/tap".into()],
            install: vec!["wget".into(), "jq".into()],
            remove: vec!["curl".into()],
            update: true,
            upgrade: true,
        };
        assert_eq!(
            plan.commands(brew()).unwrap(),
            [
                "/usr/local/bin/brew tap foo/bar",
                "/usr/local/bin/brew tap baz/qux",
                "/usr/local/bin/brew untap old/tap",
                "/usr/local/bin/brew install wget jq",
                "/usr/local/bin/brew remove curl",
                "/usr/local/bin/brew update",
                "/usr/local/bin/brew upgrade",
            ]
        );
    }

    #[test]
    fn test_empty_batches_are_omitted() {
        let plan = ActionPlan {
            update: true,
            ..Default::default()
        };
        assert_eq!(plan.commands(brew()).unwrap(), ["/usr/local/bin/brew update"]);
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_execute_nothing_to_do() {
        let mut out = Vec::new();
        let outcome = execute(ActionPlan::default(), brew(), false, &mut out).unwrap();
        assert_eq!(outcome, Outcome::NothingToDo);
        assert_eq!(String::from_utf8(out).unwrap(), "Nothing to do.\n");
    }

    #[test]
    fn test_execute_dry_run_joins_with_semicolons() {
        let plan = ActionPlan {
            install: vec!["wget".into()],
            upgrade: true,
            ..Default::default()
        };
        let mut out = Vec::new();
        let outcome = execute(plan, brew(), true, &mut out).unwrap();
        assert_eq!(
            outcome,
            Outcome::DryRun(
                "/usr/local/bin/brew install wget; /usr/local/bin/brew upgrade".to_string()
            )
        );
    }

    #[test]
    fn test_brew_path_with_space_stays_one_word() {
        let plan = ActionPlan {
            tap: vec!["foo/bar".into()],
            update: true,
            ..Default::default()
        };
        let commands = plan
            .commands(Path::new("/Users/Jane Doe/homebrew/bin/brew"))
            .unwrap();
        assert_eq!(
            shlex::split(&commands[0]).unwrap(),
            ["/Users/Jane Doe/homebrew/bin/brew", "tap", "foo/bar"]
        );
        assert_eq!(
            shlex::split(&commands[1]).unwrap(),
            ["/Users/Jane Doe/homebrew/bin/brew", "update"]
        );
    }

    #[test]
    fn test_shell_syntax_in_names_is_inert() {
        let plan = ActionPlan {
            install: vec!["wget;touch${IFS}/tmp/pwned".into(), "$(reboot)".into()],
            ..Default::default()
        };
        let mut out = Vec::new();
        let Outcome::DryRun(line) = execute(plan, brew(), true, &mut out).unwrap() else {
            panic!("expected a command");
        };
        assert_eq!(
            shlex::split(&line).unwrap(),
            [
                "/usr/local/bin/brew",
                "install",
                "wget;touch${IFS}/tmp/pwned",
                "$(reboot)"
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_quoted_line_runs_as_one_statement() {
        let plan = ActionPlan {
            install: vec!["a  b".into(), "c;echo injected".into()],
            ..Default::default()
        };
        // echo stands in for brew so the shell's word splitting is visible
        let commands = plan.commands(Path::new("echo")).unwrap();
        let output = Command::new("sh").arg("-c").arg(&commands[0]).output().unwrap();
        assert_eq!(
            String::from_utf8_lossy(&output.stdout),
            "install a  b c;echo injected\n"
        );
    }

    #[test]
    fn test_nul_byte_cannot_be_quoted() {
        let plan = ActionPlan {
            remove: vec!["bad\0name".into()],
            ..Default::default()
        };
        assert!(matches!(
            plan.commands(brew()),
            Err(GuzzleError::Unquotable(_))
        ));
    }
}
