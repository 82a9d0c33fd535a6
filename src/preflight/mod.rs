//! Preflight checks for collection builds.
//!
//! Validates that the host has the packaging tool before a build runs, so a
//! missing `ansible-galaxy` shows up as one clear error instead of an empty
//! build log.
//!
//! # Example
//!
//! ```rust
//! use orion_utils::preflight::{command_exists, check_required_tools};
//!
//! if !command_exists("ansible-galaxy") {
//!     println!("ansible-core not installed");
//! }
//!
//! let tools = &[("ansible-galaxy", "ansible-core"), ("tar", "tar")];
//! if let Err(e) = check_required_tools(tools) {
//!     eprintln!("{}", e);
//! }
//! ```

use anyhow::{bail, Result};

use crate::settings::Settings;

/// Check if a command exists on the host system.
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Host tools the default pipeline relies on.
///
/// Each tuple is (command_name, package_name).
pub const REQUIRED_TOOLS: &[(&str, &str)] = &[("ansible-galaxy", "ansible-core"), ("tar", "tar")];

/// Check that specific tools are available.
///
/// # Returns
///
/// * `Ok(())` if all tools are found
/// * `Err` with list of missing tools and their packages
pub fn check_required_tools(tools: &[(&str, &str)]) -> Result<()> {
    let missing = tools
        .iter()
        .filter(|(tool, _)| !command_exists(tool))
        .map(|(tool, package)| format!("  {} (install: {})", tool, package))
        .collect::<Vec<_>>();

    if !missing.is_empty() {
        bail!("Missing required host tools:\n{}", missing.join("\n"));
    }

    Ok(())
}

/// Check that every tool in [`REQUIRED_TOOLS`] is available.
pub fn check_host_tools() -> Result<()> {
    check_required_tools(REQUIRED_TOOLS)
}

/// Check that the program behind `settings.build_command` is installed.
pub fn check_packaging_tool(settings: &Settings) -> Result<()> {
    match settings.build_program() {
        Some(program) => check_required_tools(&[(program, program)]),
        None => bail!("build command is empty"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exists() {
        assert!(command_exists("sh"));
        assert!(!command_exists("definitely_not_a_real_command_12345"));
    }

    #[test]
    fn test_check_required_tools_failure_lists_package() {
        let tools = &[("ls", "coreutils"), ("nonexistent_command_xyz", "fake-package")];
        let err = check_required_tools(tools).unwrap_err().to_string();
        assert!(err.contains("nonexistent_command_xyz (install: fake-package)"));
        assert!(!err.contains("coreutils"));
    }

    #[test]
    fn test_check_host_tools_matches_required_tools() {
        let all_present = REQUIRED_TOOLS.iter().all(|(tool, _)| command_exists(tool));
        assert_eq!(check_host_tools().is_ok(), all_present);
    }

    #[test]
    fn test_check_packaging_tool() {
        let settings = Settings::default().with_build_command("sh -c true");
        assert!(check_packaging_tool(&settings).is_ok());

        let settings = Settings::default().with_build_command("   ");
        assert!(check_packaging_tool(&settings).is_err());
    }
}
