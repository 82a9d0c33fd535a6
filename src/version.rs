use anyhow::{Context, Result};

/// Bump the patch component of a `major.minor.patch` version.
///
/// Components after the third are dropped. Fewer than three components or a
/// non-numeric component is an error.
///
/// ```
/// assert_eq!(orion_utils::increment_version("1.1.1").unwrap(), "1.1.2");
/// ```
pub fn increment_version(version: &str) -> Result<String> {
    let parts = version
        .split('.')
        .map(|part| {
            part.parse::<u64>()
                .with_context(|| format!("invalid version component '{part}' in '{version}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    match parts.as_slice() {
        [major, minor, patch, ..] => Ok(format!("{}.{}.{}", major, minor, patch + 1)),
        _ => anyhow::bail!("version '{version}' does not have three components"),
    }
}
