use anyhow::Result;

use super::context::{GlobalArgs, ResolvedSettings};

pub fn run(args: &GlobalArgs) -> Result<()> {
    let resolved = ResolvedSettings::resolve(args)?;
    println!("{}", resolved.save_file()?.display());
    Ok(())
}
