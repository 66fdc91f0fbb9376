//! Shell completion scripts for correlation-report

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::ui::cli::Cli;

/// Binary name completions are registered under
pub const BIN_NAME: &str = "correlation-report";

/// Completion script for `shell` as a string
pub fn completion_script(shell: Shell) -> Result<String, String> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    generate(shell, &mut cmd, BIN_NAME, &mut buf);
    String::from_utf8(buf).map_err(|e| format!("Failed to generate completion script: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_script_bash() {
        let script = completion_script(Shell::Bash).expect("bash script");
        assert!(script.contains(BIN_NAME));
        assert!(script.contains("export"));
    }

    #[test]
    fn test_completion_script_zsh() {
        let script = completion_script(Shell::Zsh).expect("zsh script");
        assert!(script.contains("#compdef correlation-report"));
    }

    #[test]
    fn test_completion_script_fish_lists_subcommands() {
        let script = completion_script(Shell::Fish).expect("fish script");
        for sub in ["list", "export", "delete"] {
            assert!(script.contains(sub), "missing {sub}");
        }
    }
}
