//! Implementation of the `stackforge create` command.
//!
//! Responsibility: resolve stacks and output location from flags and
//! config, wire the adapters, run the orchestrator and display results.
//! No generation logic lives here.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use stackforge_adapters::{ApiKey, FixedPacer, GeminiConfig, GeminiGenerator, LocalFilesystem};
use stackforge_core::{
    application::{APP_PACKAGE_NAME, AppOrchestrator, AppSummary, GenerationClient, Materializer, PlannedFile},
    domain::stacks::{find_backend, find_frontend, resolve_backend, resolve_frontend},
};

use crate::{
    cli::{CreateArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Stacks and location a run resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Request {
    description: String,
    backend: String,
    frontend: String,
    output_dir: PathBuf,
}

impl Request {
    fn app_root(&self) -> PathBuf {
        self.output_dir.join(APP_PACKAGE_NAME)
    }
}

/// Execute the `stackforge create` command.
///
/// Dispatch sequence:
/// 1. Resolve description, stacks and output directory
/// 2. Early-exit with the plan if `--dry-run`
/// 3. Read the credential (fatal if missing)
/// 4. Confirm replacing an existing app unless `--yes`
/// 5. Generate and write via `AppOrchestrator`
/// 6. Print the summary tree
#[instrument(skip_all)]
pub fn execute(
    args: CreateArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    // 1. Resolve request
    let request = resolve_request(&args, config)?;
    let plan = AppOrchestrator::plan(&request.backend, &request.frontend);

    debug!(
        backend = %request.backend,
        frontend = %request.frontend,
        output_dir = %request.output_dir.display(),
        "Request resolved"
    );

    // 2. Dry run: describe but do not call or write.
    if args.dry_run {
        return show_plan(&request, &plan, output);
    }

    // 3. Credential, before any generation work
    let api_key = ApiKey::from_env(&config.generation.api_key_env)?;

    // 4. Existing output is replaced wholesale
    let app_root = request.app_root();
    if app_root.exists() {
        if !args.yes && !global.quiet && std::io::stdin().is_terminal() {
            let prompt = format!("Replace existing {}?", app_root.display());
            if !confirm(&prompt)? {
                return Err(CliError::Cancelled);
            }
        } else {
            output.warning(&format!("Replacing {}", app_root.display()))?;
        }
    }

    // 5. Wire adapters and run
    let model = args
        .model
        .unwrap_or_else(|| config.generation.model.clone());
    let gemini = GeminiConfig::new(api_key)
        .with_model(model)
        .with_base_url(config.generation.base_url.clone())
        .with_timeout(config.generation.timeout());
    let client = GenerationClient::new(
        Box::new(GeminiGenerator::new(gemini)?),
        Box::new(FixedPacer::new(config.generation.pacing())),
    );
    let materializer = Materializer::new(Box::new(LocalFilesystem::new()), &request.output_dir);
    let mut orchestrator = AppOrchestrator::new(client, materializer);

    output.header(&format!(
        "Creating {} + {} app in {}",
        request.backend,
        request.frontend,
        app_root.display()
    ))?;
    info!(path = %app_root.display(), files = plan.len(), "Generation started");

    let spinner = output.spinner(&format!("Generating {} files", plan.len()));
    let result = orchestrator.create_app(&request.description, &request.backend, &request.frontend);
    spinner.finish_and_clear();
    let summary = result?;

    // 6. Report
    report(&summary, output)
}

// ── Request resolution ────────────────────────────────────────────────────────

fn resolve_request(args: &CreateArgs, config: &AppConfig) -> CliResult<Request> {
    let description = args.description.trim();
    if description.is_empty() {
        return Err(CliError::InvalidInput(
            "the application description is empty".into(),
        ));
    }

    Ok(Request {
        description: description.to_owned(),
        backend: non_empty(args.backend.as_deref()).unwrap_or(&config.defaults.backend).to_owned(),
        frontend: non_empty(args.frontend.as_deref())
            .unwrap_or(&config.defaults.frontend)
            .to_owned(),
        output_dir: args.output.clone().unwrap_or_else(|| config.output.dir.clone()),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_plan(request: &Request, plan: &[PlannedFile], out: &OutputManager) -> CliResult<()> {
    if out.is_json() {
        return out.json(&plan);
    }

    out.info(&format!(
        "Dry run: would create {}",
        request.app_root().display()
    ))?;
    out.print(&format!("  Backend:  {}", stack_label(&request.backend, true)))?;
    out.print(&format!("  Frontend: {}", stack_label(&request.frontend, false)))?;
    for file in plan {
        out.print(&format!("  {:<14} {}", file.role, file.path.display()))?;
    }
    Ok(())
}

/// The user's spelling plus the profile it maps to when they differ.
fn stack_label(tech: &str, backend: bool) -> String {
    let (known, profile) = if backend {
        (find_backend(tech).is_some(), resolve_backend(tech).name)
    } else {
        (find_frontend(tech).is_some(), resolve_frontend(tech).name)
    };

    if !known {
        format!("{tech} (unknown, using {profile} files)")
    } else if profile != tech {
        format!("{tech} ({profile})")
    } else {
        tech.to_owned()
    }
}

fn report(summary: &AppSummary, out: &OutputManager) -> CliResult<()> {
    if out.is_json() {
        return out.json(summary);
    }

    out.success(&format!("Application written to {}", summary.root.display()))?;
    out.print("")?;
    out.print(summary.tree().trim_end())?;

    if summary.is_degraded() {
        out.print("")?;
        out.warning(&format!(
            "{} of {} files hold a failure marker instead of code: {}",
            summary.degraded.len(),
            summary.files.len(),
            summary.degraded.join(", ")
        ))?;
    }

    if !out.is_quiet() {
        out.print("")?;
        out.print("Next steps:")?;
        out.print(&format!("  cd {}", relative_display(&summary.root)))?;
    }

    Ok(())
}

fn relative_display(path: &Path) -> String {
    path.strip_prefix(".")
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| CliError::Io {
            context: "Failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(prompt: &str) -> CliResult<bool> {
    use std::io::{self, Write};

    use crate::error::IoContext;

    print!("{prompt} [Y/n] ");
    io::stdout()
        .flush()
        .context(|| "Failed to flush stdout".into())?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context(|| "Failed to read confirmation input".into())?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(description: &str) -> CreateArgs {
        CreateArgs {
            description: description.into(),
            backend: None,
            frontend: None,
            output: None,
            model: None,
            yes: false,
            dry_run: false,
        }
    }

    #[test]
    fn config_defaults_fill_missing_flags() {
        let request = resolve_request(&args("A recipe app"), &AppConfig::default()).unwrap();
        assert_eq!(request.backend, "FastAPI");
        assert_eq!(request.frontend, "Next.js");
        assert_eq!(request.app_root(), PathBuf::from("./generated_app"));
    }

    #[test]
    fn flags_override_config() {
        let mut a = args("  A todo app  ");
        a.backend = Some("Express".into());
        a.frontend = Some("Vue".into());
        a.output = Some(PathBuf::from("out"));

        let request = resolve_request(&a, &AppConfig::default()).unwrap();
        assert_eq!(request.description, "A todo app");
        assert_eq!(request.backend, "Express");
        assert_eq!(request.frontend, "Vue");
        assert_eq!(request.app_root(), PathBuf::from("out/generated_app"));
    }

    #[test]
    fn blank_flag_falls_back_to_config() {
        let mut a = args("A recipe app");
        a.backend = Some("   ".into());
        let request = resolve_request(&a, &AppConfig::default()).unwrap();
        assert_eq!(request.backend, "FastAPI");
    }

    #[test]
    fn empty_description_is_invalid_input() {
        assert!(matches!(
            resolve_request(&args("   "), &AppConfig::default()),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn stack_labels_explain_mapping() {
        assert_eq!(stack_label("FastAPI", true), "FastAPI");
        assert_eq!(stack_label("flask", true), "flask (FastAPI)");
        assert_eq!(
            stack_label("Elm", false),
            "Elm (unknown, using Next.js files)"
        );
    }

    #[test]
    fn relative_display_drops_leading_dot() {
        assert_eq!(
            relative_display(Path::new("./generated_app")),
            "generated_app"
        );
        assert_eq!(
            relative_display(Path::new("/tmp/out/generated_app")),
            "/tmp/out/generated_app"
        );
    }
}
