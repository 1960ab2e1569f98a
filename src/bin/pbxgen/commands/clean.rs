//! `pbxgen clean` command

use anyhow::Result;

use crate::cli::{CleanArgs, Cli};
use pbxgen::ops::clean;
use pbxgen::util::GlobalContext;

pub fn execute(_args: CleanArgs, cli: &Cli) -> Result<()> {
    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(cli.verbose);
    ctx.set_color(!cli.no_color);

    let result = clean(&ctx)?;
    for path in &result.removed {
        eprintln!("     Removed {}", path.display());
    }

    Ok(())
}
