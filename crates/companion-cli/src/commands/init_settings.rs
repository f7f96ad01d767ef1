use anyhow::{Context, Result};

use super::context::{GlobalArgs, ResolvedSettings};

pub fn run(args: &GlobalArgs, force: bool) -> Result<()> {
    let resolved = ResolvedSettings::resolve(args)?;
    let path = &resolved.settings_path;

    if path.exists() && !force {
        println!("Settings already exist at {}", path.display());
        return Ok(());
    }

    resolved
        .settings
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
