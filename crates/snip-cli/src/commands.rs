use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use snip_diff::{diff_versions, unified_patch, ChangeKind, VersionDiff};
use snip_lang::{detect, highlight};
use snip_sdk::{AccessGate, FileSnippetStore, Snippets};
use snip_server::config::ENV_ADMIN_PASSWORD;
use snip_server::{ServerConfig, SnipServer};
use snip_types::{LanguageHint, PublicId, VersionId};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Detect(args) => cmd_detect(args, format),
        Command::Highlight(args) => cmd_highlight(args, format),
        Command::Diff(args) => cmd_diff(args, format),
        Command::Create(args) => cmd_create(args, format),
        Command::Publish(args) => cmd_publish(args, format),
        Command::Show(args) => cmd_show(args, format),
        Command::Compare(args) => cmd_compare(args, format),
        Command::Feedback(args) => cmd_feedback(args, format),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(data) = args.data {
        config.data_path = Some(data);
    }
    tracing::debug!(?config, "resolved server config");
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(SnipServer::new(config).serve())?;
    Ok(())
}

fn cmd_detect(args: DetectArgs, format: OutputFormat) -> anyhow::Result<()> {
    let code = read_file(&args.file)?;
    let filename = args.file.to_string_lossy();
    let language = detect(&code, Some(&filename));
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({ "language": language })),
        OutputFormat::Text => {
            match language {
                Some(language) => println!("{} ({})", language.id().bold(), language.label()),
                None => println!("{}", "unknown (empty input)".dimmed()),
            }
            Ok(())
        }
    }
}

fn cmd_highlight(args: HighlightArgs, format: OutputFormat) -> anyhow::Result<()> {
    let code = read_file(&args.file)?;
    let filename = args.file.to_string_lossy();
    let highlighted = highlight(&code, &LanguageHint::parse(&args.language), Some(&filename));
    match format {
        OutputFormat::Json => print_json(&highlighted),
        OutputFormat::Text => {
            println!("{}", highlighted.html);
            Ok(())
        }
    }
}

fn cmd_diff(args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let old = read_file(&args.old)?;
    let new = read_file(&args.new)?;

    if args.unified {
        let patch = unified_patch(
            &old,
            &new,
            &args.old.to_string_lossy(),
            &args.new.to_string_lossy(),
            args.context,
        );
        print!("{}", colorize_patch(&patch));
        return Ok(());
    }

    let diff = diff_versions(&old, &new, &LanguageHint::parse(&args.language));
    match format {
        OutputFormat::Json => print_json(&diff),
        OutputFormat::Text => {
            print_diff(&diff);
            Ok(())
        }
    }
}

fn cmd_create(args: CreateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let code = read_file(&args.file)?;
    let snippets = open_store(&args.store)?;
    let language = language_for(&args.language, &code, &args.file);
    let public_id = snippets.create_snippet(&code, language, &presented_secret(&args.secret))?;
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({ "public_id": public_id, "version": 1 })),
        OutputFormat::Text => {
            println!("{} Created snippet {}", "✓".green().bold(), public_id.to_string().yellow().bold());
            println!("  Version: {}", "1".bold());
            Ok(())
        }
    }
}

fn cmd_publish(args: PublishArgs, format: OutputFormat) -> anyhow::Result<()> {
    let code = read_file(&args.file)?;
    let public_id = PublicId::parse(&args.public_id)?;
    let snippets = open_store(&args.store)?;
    let language = language_for(&args.language, &code, &args.file);
    let version =
        snippets.create_version(&public_id, &code, language, &presented_secret(&args.secret))?;
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({ "public_id": public_id, "version": version })),
        OutputFormat::Text => {
            println!(
                "{} Published version {} of {}",
                "✓".green().bold(),
                version.to_string().bold(),
                public_id.to_string().yellow()
            );
            Ok(())
        }
    }
}

fn cmd_show(args: ShowArgs, format: OutputFormat) -> anyhow::Result<()> {
    let public_id = PublicId::parse(&args.public_id)?;
    let snippets = open_store(&args.store)?;
    let view = snippets
        .get_snippet(&public_id)?
        .with_context(|| format!("snippet {public_id} not found"))?;
    if let OutputFormat::Json = format {
        return print_json(&view);
    }

    println!(
        "Snippet {}  ({} version{})",
        public_id.to_string().yellow().bold(),
        view.snippet.latest_version,
        if view.snippet.latest_version == 1 { "" } else { "s" }
    );
    for version in &view.versions {
        println!(
            "  {}  {}  {}  {}",
            format!("v{}", version.version).bold(),
            version.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            version.language.as_str().cyan(),
            version.id.to_string().dimmed()
        );
    }

    let number = args.version.unwrap_or(view.snippet.latest_version);
    let version = view
        .version(number)
        .with_context(|| format!("version {number} of {public_id} not found"))?;
    println!();
    let width = version.line_count().max(1).to_string().len();
    for (i, line) in version.code.lines().enumerate() {
        println!("{} {}", format!("{:>width$}", i + 1).dimmed(), line);
    }
    Ok(())
}

fn cmd_compare(args: CompareArgs, format: OutputFormat) -> anyhow::Result<()> {
    let public_id = PublicId::parse(&args.public_id)?;
    let snippets = open_store(&args.store)?;
    let comparison = match (args.from, args.to) {
        (None, to) => snippets.compare_with_previous(&public_id, to)?,
        (Some(from), Some(to)) => snippets.compare(&public_id, from, to)?,
        (Some(from), None) => {
            let latest = snippets
                .get_snippet(&public_id)?
                .map(|view| view.snippet.latest_version)
                .with_context(|| format!("snippet {public_id} not found"))?;
            snippets.compare(&public_id, from, latest)?
        }
    };
    match format {
        OutputFormat::Json => print_json(&comparison),
        OutputFormat::Text => {
            let from = comparison
                .from
                .map_or_else(|| "empty".to_string(), |n| format!("v{n}"));
            println!(
                "Comparing {} → {} ({})",
                from.bold(),
                format!("v{}", comparison.to).bold(),
                comparison.diff.language.label().cyan()
            );
            print_diff(&comparison.diff);
            Ok(())
        }
    }
}

fn cmd_feedback(args: FeedbackArgs, format: OutputFormat) -> anyhow::Result<()> {
    let snippets = open_store(&args.store)?;
    match args.action {
        FeedbackAction::Add { version_id, content } => {
            let version_id: VersionId = version_id.parse()?;
            let entry = snippets.add_feedback(&version_id, &content)?;
            match format {
                OutputFormat::Json => print_json(&entry),
                OutputFormat::Text => {
                    println!("{} Feedback added ({})", "✓".green().bold(), entry.id.short_id().dimmed());
                    Ok(())
                }
            }
        }
        FeedbackAction::List { version_id } => {
            let version_id: VersionId = version_id.parse()?;
            let entries = snippets.get_feedback(&version_id)?;
            if let OutputFormat::Json = format {
                return print_json(&entries);
            }
            if entries.is_empty() {
                println!("No feedback.");
            }
            for entry in &entries {
                println!(
                    "{}  {}",
                    entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
                    entry.content
                );
            }
            Ok(())
        }
    }
}

// ---- Helpers ----

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Open the local store, gated by `ADMIN_PASSWORD` like the server.
fn open_store(args: &StoreArgs) -> anyhow::Result<Snippets<FileSnippetStore>> {
    let store = FileSnippetStore::open(&args.store)
        .with_context(|| format!("opening store {}", args.store.display()))?;
    let gate = AccessGate::new(std::env::var(ENV_ADMIN_PASSWORD).ok());
    Ok(Snippets::new(store, gate))
}

fn presented_secret(args: &SecretArgs) -> String {
    args.password
        .clone()
        .or_else(|| std::env::var(ENV_ADMIN_PASSWORD).ok())
        .unwrap_or_default()
}

/// An explicit `--language` wins; `auto` consults the file name first.
fn language_for(flag: &str, code: &str, file: &Path) -> LanguageHint {
    let hint = LanguageHint::parse(flag);
    if !hint.is_auto() {
        return hint;
    }
    let filename = file.to_string_lossy();
    match detect(code, Some(&filename)) {
        Some(language) => LanguageHint::from(language),
        None => LanguageHint::Auto,
    }
}

fn print_diff(diff: &VersionDiff) {
    if diff.is_unchanged() {
        println!("{}", "No changes.".dimmed());
    }
    for rendered in &diff.rows {
        let row = &rendered.row;
        let old = row.old_line.map_or_else(String::new, |n| n.to_string());
        let new = row.new_line.map_or_else(String::new, |n| n.to_string());
        let line = format!("{} {}", row.marker(), row.content);
        let line = match row.kind {
            ChangeKind::Added => line.green(),
            ChangeKind::Removed => line.red(),
            ChangeKind::Equal => line.normal(),
        };
        println!("{} {} {}", format!("{old:>4}").dimmed(), format!("{new:>4}").dimmed(), line);
    }
    println!(
        "{} {}",
        format!("+{}", diff.additions()).green(),
        format!("-{}", diff.deletions()).red()
    );
}

fn colorize_patch(patch: &str) -> String {
    patch
        .lines()
        .map(|line| {
            let colored = if line.starts_with("+++") || line.starts_with("---") {
                line.bold()
            } else if line.starts_with("@@") {
                line.cyan()
            } else if line.starts_with('+') {
                line.green()
            } else if line.starts_with('-') {
                line.red()
            } else {
                line.normal()
            };
            format!("{colored}\n")
        })
        .collect()
}
