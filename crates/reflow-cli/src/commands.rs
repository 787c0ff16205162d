use std::convert::Infallible;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::{debug, warn};

use reflow_batch::{translate_snapshot_diff, Batch, Command as SurfaceCommand};
use reflow_diff::diff_snapshots;
use reflow_director::{Director, ReconcileSummary};
use reflow_surface::InMemorySurface;
use reflow_types::Snapshot;

use crate::cli::*;
use crate::snapshot_file::{load_config, load_sections};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Diff(args) => cmd_diff(args, format),
        Command::Verify(args) => cmd_verify(args, format),
        Command::Config(args) => cmd_config(args, format),
    }
}

#[derive(Debug, Serialize)]
struct DiffReport {
    section_edits: usize,
    item_edits: usize,
    dropped: usize,
    commands: Vec<SurfaceCommand>,
}

fn diff_files(old: &Path, new: &Path) -> anyhow::Result<DiffReport> {
    let old = Snapshot::from_sections(load_sections(old)?);
    let new = Snapshot::from_sections(load_sections(new)?);
    for duplicate in new.duplicate_section_ids() {
        warn!(section = %duplicate, "duplicate section identity in NEW");
    }

    let diff = diff_snapshots(&old, &new);
    let Batch { commands, dropped } = translate_snapshot_diff(&diff);
    debug!(commands = commands.len(), "translated diff");
    Ok(DiffReport {
        section_edits: diff.sections.len(),
        item_edits: diff.item_changes(),
        dropped,
        commands,
    })
}

fn cmd_diff(args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let report = diff_files(&args.old, &args.new)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            if report.commands.is_empty() {
                println!("No changes.");
                return Ok(());
            }
            println!(
                "{} commands ({} section edits, {} item edits)",
                report.commands.len().to_string().bold(),
                report.section_edits,
                report.item_edits
            );
            for command in &report.commands {
                println!("  {}", paint(command));
            }
        }
    }
    Ok(())
}

fn paint(command: &SurfaceCommand) -> colored::ColoredString {
    let text = command.to_string();
    match command {
        SurfaceCommand::SectionDelete { .. } | SurfaceCommand::ItemDelete { .. } => text.red(),
        SurfaceCommand::SectionInsert { .. } | SurfaceCommand::ItemInsert { .. } => text.green(),
        SurfaceCommand::SectionMove { .. } | SurfaceCommand::ItemMove { .. } => text.yellow(),
        SurfaceCommand::SectionReplace { .. } | SurfaceCommand::ItemReplace { .. } => text.cyan(),
    }
}

#[derive(Debug, Serialize)]
struct VerifyReport {
    matches: bool,
    summary: ReconcileSummary,
}

fn verify_files(old: &Path, new: &Path, config: Option<&Path>) -> anyhow::Result<VerifyReport> {
    let config = load_config(config)?;
    let old = load_sections(old)?;
    let new = load_sections(new)?;

    let surface = InMemorySurface::from_source(&Snapshot::capture(&old))
        .context("failed to render OLD")?;
    let mut director = Director::new(surface, config).with_sections(old);
    let target = Snapshot::capture(&new);
    let summary = director
        .reconcile(
            move |list| {
                list.set(new);
                Ok::<_, Infallible>(())
            },
            || {},
        )
        .context("reconciliation failed")?;

    Ok(VerifyReport {
        matches: director.surface().matches(&target),
        summary,
    })
}

fn cmd_verify(args: VerifyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let report = verify_files(&args.old, &args.new, args.config.as_deref())?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            let summary = &report.summary;
            if report.matches {
                println!("{} Surface matches NEW", "✓".green().bold());
            } else {
                println!("{} Surface does not match NEW", "✗".red().bold());
            }
            println!("  Section edits: {}", summary.section_edits);
            println!("  Item edits: {}", summary.item_edits);
            if summary.full_reload {
                println!("  Applied as: {}", "full reload".yellow());
            } else {
                println!("  Commands: {}", summary.commands);
            }
        }
    }
    if !report.matches {
        anyhow::bail!("rendered structure differs from NEW");
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => print!("{}", toml::to_string_pretty(&config)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_types::IndexPath;
    use std::path::PathBuf;

    fn write(dir: &tempfile::TempDir, name: &str, json: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn diff_reports_moved_section_coordinates() {
        let dir = tempfile::tempdir().unwrap();
        let old = write(
            &dir,
            "old.json",
            r#"[{"model_id": "S1", "items": [{"id": "a"}]},
                {"model_id": "S2", "items": [{"id": "x"}, {"id": "y"}]}]"#,
        );
        let new = write(
            &dir,
            "new.json",
            r#"[{"model_id": "S2", "items": [{"id": "y"}, {"id": "z"}]},
                {"model_id": "S1", "items": [{"id": "a"}]}]"#,
        );

        let report = diff_files(&old, &new).unwrap();
        assert_eq!(
            report.commands,
            vec![
                SurfaceCommand::SectionMove { from: 1, to: 0 },
                SurfaceCommand::ItemDelete { at: IndexPath::new(1, 0) },
                SurfaceCommand::ItemInsert { at: IndexPath::new(0, 1) },
            ]
        );
    }

    #[test]
    fn diff_detects_content_change() {
        let dir = tempfile::tempdir().unwrap();
        let old = write(&dir, "old.json", r#"[{"model_id": "S1", "items": [{"id": "a", "content": 1}]}]"#);
        let new = write(&dir, "new.json", r#"[{"model_id": "S1", "items": [{"id": "a", "content": 2}]}]"#);

        let report = diff_files(&old, &new).unwrap();
        assert_eq!(
            report.commands,
            vec![SurfaceCommand::ItemReplace { at: IndexPath::new(0, 0) }]
        );
    }

    #[test]
    fn verify_reconciles_to_new() {
        let dir = tempfile::tempdir().unwrap();
        let old = write(
            &dir,
            "old.json",
            r#"[{"model_id": "S1", "items": [{"id": "a"}, {"id": "b"}, {"id": "c"}]},
                {"model_id": "S2", "items": []}]"#,
        );
        let new = write(
            &dir,
            "new.json",
            r#"[{"model_id": "S3", "items": [{"id": "q"}]},
                {"model_id": "S1", "header_title": "First", "items": [{"id": "c"}, {"id": "a"}, {"id": "d"}]}]"#,
        );

        let report = verify_files(&old, &new, None).unwrap();
        assert!(report.matches);
        assert!(!report.summary.full_reload);
        assert!(report.summary.commands > 0);
    }

    #[test]
    fn verify_honours_full_reload_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let old = write(&dir, "old.json", r#"[]"#);
        let new = write(
            &dir,
            "new.json",
            r#"[{"model_id": "S1"}, {"model_id": "S2"}, {"model_id": "S3"}]"#,
        );
        let config = dir.path().join("reflow.toml");
        std::fs::write(&config, "full_reload_threshold = 2\n").unwrap();

        let report = verify_files(&old, &new, Some(&config)).unwrap();
        assert!(report.matches);
        assert!(report.summary.full_reload);
    }

    #[test]
    fn verify_rejects_malformed_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let old = write(&dir, "old.json", r#"[]"#);
        let new = write(&dir, "new.json", r#"{"not": "a list"}"#);

        let err = verify_files(&old, &new, None).unwrap_err();
        assert!(err.to_string().contains("new.json"));
    }
}
