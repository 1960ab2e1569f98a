//! `pbxgen generate` command

use std::io::IsTerminal;

use anyhow::{bail, Result};

use crate::cli::{Cli, GenerateArgs};
use pbxgen::ops::{generate, GenerateOptions};
use pbxgen::util::diagnostic::{emit, suggestions, Diagnostic};
use pbxgen::util::GlobalContext;

pub fn execute(args: GenerateArgs, cli: &Cli) -> Result<()> {
    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(cli.verbose);
    ctx.set_color(!cli.no_color && std::io::stderr().is_terminal());

    let opts = GenerateOptions { jobs: args.jobs };
    let result = generate(&ctx, &opts)?;

    for (name, location) in &result.generated {
        eprintln!("   Generated {} ({})", name, location.display());
    }
    eprintln!("   Generated {}", result.workspace.display());

    if !result.failed.is_empty() {
        for (name, error) in &result.failed {
            let diag = Diagnostic::warning(format!("skipped project `{name}`"))
                .with_context(error.clone())
                .with_suggestion(suggestions::MEMBER_FAILED);
            emit(&diag, ctx.color());
        }
        bail!(
            "generation failed for {} of {} projects",
            result.failed.len(),
            result.failed.len() + result.generated.len()
        );
    }

    Ok(())
}
