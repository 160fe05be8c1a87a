//! Implementation of the `stackforge stacks` command.

use serde::Serialize;
use stackforge_core::domain::{BACKEND_STACKS, BackendStack, FRONTEND_STACKS, FrontendStack};

use crate::{
    cli::{ListFormat, StacksArgs, TierFilter},
    error::CliResult,
    output::OutputManager,
};

/// One listed stack profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct StackRow {
    tier: &'static str,
    name: &'static str,
    files: Vec<&'static str>,
    aliases: &'static [&'static str],
    default: bool,
}

impl StackRow {
    fn backend(stack: &BackendStack, default: bool) -> Self {
        Self {
            tier: "backend",
            name: stack.name,
            files: vec![stack.entry_file, stack.models_file],
            aliases: stack.aliases,
            default,
        }
    }

    fn frontend(stack: &FrontendStack, default: bool) -> Self {
        Self {
            tier: "frontend",
            name: stack.name,
            files: vec![stack.landing_file],
            aliases: stack.aliases,
            default,
        }
    }
}

fn rows(tier: Option<TierFilter>) -> Vec<StackRow> {
    let backend = BACKEND_STACKS
        .iter()
        .enumerate()
        .map(|(i, s)| StackRow::backend(s, i == 0));
    let frontend = FRONTEND_STACKS
        .iter()
        .enumerate()
        .map(|(i, s)| StackRow::frontend(s, i == 0));

    match tier {
        Some(TierFilter::Backend) => backend.collect(),
        Some(TierFilter::Frontend) => frontend.collect(),
        None => backend.chain(frontend).collect(),
    }
}

pub fn execute(args: StacksArgs, output: &OutputManager) -> CliResult<()> {
    let rows = rows(args.tier);

    if output.is_json() {
        return output.json(&rows);
    }

    match args.format {
        ListFormat::Table => {
            let mut current = "";
            for row in &rows {
                if row.tier != current {
                    if !current.is_empty() {
                        output.print("")?;
                    }
                    current = row.tier;
                    output.header(&format!("Supported {} stacks:", row.tier))?;
                }
                let marker = if row.default { " (default)" } else { "" };
                output.print(&format!(
                    "  {:<9} {:<28} aliases: {}{}",
                    row.name,
                    row.files.join(", "),
                    row.aliases.join(", "),
                    marker
                ))?;
            }
            output.print("")?;
            output.print("Unrecognised technologies use the default profile's files.")?;
        }

        ListFormat::Json => output.json(&rows)?,

        ListFormat::List => {
            for row in &rows {
                output.print(row.name)?;
            }
        }

        ListFormat::Csv => {
            output.print("tier,name,files,default")?;
            for row in &rows {
                output.print(&format!(
                    "{},{},{},{}",
                    row.tier,
                    row.name,
                    row.files.join(" "),
                    row.default
                ))?;
            }
        }
    }

    Ok(())
}
