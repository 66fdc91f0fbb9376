//! Confirmation before destructive gateway actions

use dialoguer::{Confirm, theme::ColorfulTheme};
use std::io::IsTerminal;

/// What to do before deleting a stored result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteGate {
    /// `--yes` was given
    Skip,
    /// Ask on the terminal
    Prompt,
    /// No terminal to ask on and no `--yes`
    Refuse,
}

pub fn delete_gate(assume_yes: bool, interactive: bool) -> DeleteGate {
    match (assume_yes, interactive) {
        (true, _) => DeleteGate::Skip,
        (false, true) => DeleteGate::Prompt,
        (false, false) => DeleteGate::Refuse,
    }
}

pub fn delete_prompt(job_id: &str) -> String {
    format!("Delete result '{job_id}'? This action cannot be undone")
}

/// Ask before deleting `job_id`. Returns whether to go ahead.
pub fn confirm_delete(job_id: &str, assume_yes: bool) -> Result<bool, String> {
    let interactive = std::io::stdin().is_terminal() && std::io::stderr().is_terminal();
    match delete_gate(assume_yes, interactive) {
        DeleteGate::Skip => Ok(true),
        DeleteGate::Refuse => Err(format!(
            "Refusing to delete '{job_id}' without confirmation; pass --yes to proceed"
        )),
        DeleteGate::Prompt => Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(delete_prompt(job_id))
            .default(false)
            .interact()
            .map_err(|e| format!("Confirmation prompt failed: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_gate() {
        assert_eq!(delete_gate(true, false), DeleteGate::Skip);
        assert_eq!(delete_gate(true, true), DeleteGate::Skip);
        assert_eq!(delete_gate(false, true), DeleteGate::Prompt);
        assert_eq!(delete_gate(false, false), DeleteGate::Refuse);
    }

    #[test]
    fn test_delete_prompt_names_result() {
        let prompt = delete_prompt("corr_7");
        assert!(prompt.contains("corr_7"));
        assert!(prompt.contains("cannot be undone"));
    }

    #[test]
    fn test_confirm_delete_with_yes_skips_prompt() {
        assert_eq!(confirm_delete("corr_7", true), Ok(true));
    }
}
