//! CLI binary for dialogforge: generate authoring dialogs from component
//! definition documents.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use forge_engine::{
    ComponentOutput, ExceptionHandler, RenderContext, TerminationPolicy, WidgetRegistry, build_all,
};
use forge_model::config::ForgeConfig;
use forge_model::storage;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dialogforge", about = "Authoring dialog generator")]
struct Cli {
    /// Project root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate dialog XML for every component definition
    Build {
        /// Directory holding definition documents (defaults to <project>/definitions)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output root the apps tree is written under (defaults to <project>/out)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Load and render definitions without writing, reporting every problem
    Validate {
        /// Directory holding definition documents (defaults to <project>/definitions)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show definition statistics
    Info {
        /// Directory holding definition documents (defaults to <project>/definitions)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;

    match cli.command {
        Commands::Build { input, out } => cmd_build(&project_root, input, out),
        Commands::Validate { input } => cmd_validate(&project_root, input),
        Commands::Info { input } => cmd_info(&project_root, input),
    }
}

fn definitions_dir(project_root: &Path, input: Option<PathBuf>) -> PathBuf {
    input.unwrap_or_else(|| project_root.join("definitions"))
}

fn load(project_root: &Path, input: Option<PathBuf>) -> Result<storage::LoadOutcome> {
    let dir = definitions_dir(project_root, input);
    let outcome = storage::load_dir(&dir)
        .with_context(|| format!("failed to load definitions from {}", dir.display()))?;
    for warning in &outcome.warnings {
        tracing::warn!("{warning}");
    }
    Ok(outcome)
}

/// Render every component; reports stay in the handler, a fatal report
/// surfaces as the returned error.
fn generate(
    outcome: &storage::LoadOutcome,
    config: &ForgeConfig,
) -> Result<(Vec<ComponentOutput>, Vec<String>)> {
    let widgets = WidgetRegistry::new();
    let policy = TerminationPolicy::from_config(&config.policy);
    let mut reporter = ExceptionHandler::new(policy);
    let outputs = {
        let mut ctx = RenderContext::new(&outcome.registry, &widgets, config, &mut reporter);
        build_all(&mut ctx)
    };
    let reports: Vec<String> = reporter.reports().iter().map(ToString::to_string).collect();
    let outputs = outputs.context("dialog generation aborted by termination policy")?;
    Ok((outputs, reports))
}

fn cmd_build(project_root: &Path, input: Option<PathBuf>, out: Option<PathBuf>) -> Result<()> {
    let config = ForgeConfig::load(project_root)?;
    let outcome = load(project_root, input)?;
    let (outputs, reports) = generate(&outcome, &config)?;

    let out_root = out
        .unwrap_or_else(|| project_root.join("out"))
        .join(&config.output.apps_root);
    let mut files = 0usize;
    for output in &outputs {
        let component_dir = out_root.join(&output.path);
        let dialog_dir = component_dir.join(&config.output.dialog_node);
        std::fs::create_dir_all(&dialog_dir)
            .with_context(|| format!("failed to create {}", dialog_dir.display()))?;
        std::fs::write(
            component_dir.join(".content.xml"),
            forge_target::xml::to_xml(&output.content),
        )?;
        std::fs::write(
            dialog_dir.join(".content.xml"),
            forge_target::xml::to_xml(&output.dialog),
        )?;
        files += 2;
    }

    for report in &reports {
        println!("warning: {report}");
    }
    println!(
        "Generated {} dialog(s), {} file(s) under {}",
        outputs.len(),
        files,
        out_root.display()
    );
    Ok(())
}

fn cmd_validate(project_root: &Path, input: Option<PathBuf>) -> Result<()> {
    let config = ForgeConfig::load(project_root)?;
    let outcome = load(project_root, input)?;
    let (outputs, reports) = generate(&outcome, &config)?;

    for report in &reports {
        println!("warning: {report}");
    }
    println!(
        "{} component(s) rendered, {} problem(s) found",
        outputs.len(),
        reports.len()
    );
    if reports.is_empty() {
        println!("OK");
    }
    Ok(())
}

fn cmd_info(project_root: &Path, input: Option<PathBuf>) -> Result<()> {
    let outcome = load(project_root, input)?;
    let registry = &outcome.registry;
    let components = registry.components().count();
    let fields: usize = registry.classes().map(|c| c.fields.len()).sum();

    println!("Classes:      {}", registry.len());
    println!("Components:   {components}");
    println!("Value classes: {}", registry.len() - components);
    println!("Fields:       {fields}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_definitions(dir: &Path) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(
            dir.join("teaser.json"),
            r#"{
                "version": "1.0",
                "components": [
                    {
                        "name": "Teaser",
                        "title": "Teaser",
                        "path": "components/content/teaser",
                        "fields": [
                            {
                                "name": "title",
                                "label": "Title",
                                "widgets": [{ "kind": "text_field" }]
                            }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
    }

    #[test]
    fn test_build_writes_content_pair() {
        let tmp = tempfile::tempdir().unwrap();
        write_definitions(&tmp.path().join("definitions"));

        cmd_build(tmp.path(), None, None).unwrap();

        let component = tmp
            .path()
            .join("out/jcr_root/apps/components/content/teaser");
        assert!(component.join(".content.xml").exists());
        let dialog = std::fs::read_to_string(
            component.join("_cq_dialog/.content.xml"),
        )
        .unwrap();
        assert!(dialog.contains("name=\"./title\""));
    }

    #[test]
    fn test_validate_reports_clean_definitions() {
        let tmp = tempfile::tempdir().unwrap();
        write_definitions(&tmp.path().join("definitions"));
        cmd_validate(tmp.path(), None).unwrap();
    }

    #[test]
    fn test_info_counts_classes() {
        let tmp = tempfile::tempdir().unwrap();
        write_definitions(&tmp.path().join("definitions"));
        cmd_info(tmp.path(), None).unwrap();
    }
}
