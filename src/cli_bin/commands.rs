//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::*;
use log::{debug, info, warn};
use serde::Serialize;
use stagex::catalog::detail::{PerformanceInfo, NOT_FOUND_MESSAGE, NO_RELATED_MESSAGE};
use stagex::catalog::{Catalog, DetailPage, FeaturedPolicy, SharedCatalog};
use stagex::core::{ContentKind, ContentRecord};
use stagex::error::{Result, StagexError};
use stagex::io::{ContentSource, FsSource, GeneratorConfig, ManifestGenerator, PrecomputedAggregate};
use stagex::pipeline::{Pipeline, PipelineConfig, Strategy};
use std::collections::HashMap;
use std::sync::Arc;

/// Everything the catalog commands share
pub struct Context {
    pipeline: Pipeline<FsSource>,
    strategy: Strategy,
    format: OutputFormat,
    shared: SharedCatalog,
}

impl Context {
    pub fn new(cli: &Cli) -> Self {
        let pipeline = Pipeline::open(PipelineConfig {
            root: cli.root.clone(),
            extension: cli.extension.clone(),
            ..Default::default()
        });
        let strategy = match cli.strategy {
            Some(StrategyArg::Manifest) => Strategy::Manifest,
            Some(StrategyArg::Directory) => pipeline.directory_strategy(),
            Some(StrategyArg::Precomputed) => Strategy::Precomputed,
            None => Strategy::detect(pipeline.source(), pipeline.config()),
        };
        debug!("Using the {} strategy", strategy);

        Self {
            pipeline,
            strategy,
            format: cli.format,
            shared: SharedCatalog::empty(FeaturedPolicy::RecentCollections),
        }
    }

    /// Run an ingestion pass and return the published catalog
    fn catalog(&self) -> Arc<Catalog> {
        self.pipeline.refresh(&self.shared, &self.strategy)
    }
}

/// Execute the generate command
pub fn generate_command(cli: &Cli, args: &GenerateArgs) -> Result<()> {
    debug!("Executing generate command with args: {:?}", args);

    let defaults = GeneratorConfig::default();
    let generator = ManifestGenerator::with_config(GeneratorConfig {
        root: cli.root.clone(),
        output: args.output.clone().unwrap_or(defaults.output),
        extension: cli.extension.clone(),
    });
    let report = generator.generate()?;

    output(cli.format, &report.manifest, || {
        for kind in ContentKind::ALL {
            println!("{}: {} file(s)", kind.directory(), report.count(kind));
            for file in report.manifest.files(kind) {
                println!("  {}", file);
            }
        }
        println!("Wrote {}", report.output_path.display());
    })
}

#[derive(Serialize)]
struct Section<'a> {
    name: &'static str,
    records: Vec<&'a ContentRecord>,
}

/// Execute the list command
pub fn list_command(ctx: &Context, args: &ListArgs) -> Result<()> {
    debug!("Executing list command with args: {:?}", args);

    let catalog = ctx.catalog();
    let config = ctx.pipeline.config();
    let featured_count = args.featured.unwrap_or(config.featured_count);
    let grid_count = args.grid.unwrap_or(config.grid_count);
    let policy = args.policy.map(FeaturedPolicy::from).unwrap_or(catalog.policy());

    let featured = || Section {
        name: "featured",
        records: catalog.featured_with(policy, featured_count),
    };
    let grid = || Section {
        name: "grid",
        records: catalog.grid(grid_count),
    };

    let mut sections = match args.view {
        View::Home => vec![featured(), grid()],
        View::Featured => vec![featured()],
        View::Grid => vec![grid()],
        View::All => vec![Section {
            name: "all",
            records: catalog.records().iter().collect(),
        }],
        View::Posts => vec![Section {
            name: "posts",
            records: catalog.posts().collect(),
        }],
        View::Collections => vec![Section {
            name: "collections",
            records: catalog.collections().collect(),
        }],
    };

    if let Some(category) = &args.category {
        for section in &mut sections {
            section.records.retain(|r| &r.category == category);
        }
    }

    output(ctx.format, &sections, || {
        for section in &sections {
            println!("== {} ({}) ==", section.name, section.records.len());
            print_records(&section.records);
        }
    })
}

#[derive(Serialize)]
struct DetailView<'a> {
    page_title: String,
    date: String,
    image: &'a str,
    hashtags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    performance: Option<PerformanceInfo<'a>>,
    record: &'a ContentRecord,
    related: &'a [&'a ContentRecord],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    members: Vec<&'a ContentRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

#[derive(Serialize)]
struct NotFoundView<'a> {
    id: &'a str,
    message: &'static str,
}

/// Execute the show command
pub fn show_command(ctx: &Context, args: &ShowArgs) -> Result<()> {
    debug!("Executing show command with args: {:?}", args);

    let catalog = ctx.catalog();
    let detail = match catalog.detail(&args.id, args.related) {
        DetailPage::Found(detail) => detail,
        DetailPage::NotFound { id } => return not_found(ctx.format, &id),
    };

    let record = detail.record;
    let source: &dyn ContentSource = ctx.pipeline.source();
    let body = args
        .body
        .then(|| detail.render_body(source, &|md: &str| md.to_string()));

    let view = DetailView {
        page_title: detail.page_title(),
        date: record.display_date(),
        image: record.image_or_default(),
        hashtags: detail.hashtags(),
        performance: detail.performance_info(),
        record,
        related: &detail.related,
        members: catalog.collection_members(record),
        body,
    };

    output(ctx.format, &view, || {
        println!("{}", view.page_title);
        println!("{} | {} | {}", record.category, view.date, view.image);
        if let Some(info) = &view.performance {
            println!("venue: {}", info.venue.unwrap_or("-"));
            println!("period: {}", info.period.unwrap_or("-"));
        }
        if !view.hashtags.is_empty() {
            println!("{}", view.hashtags.join(" "));
        }
        if !record.excerpt.is_empty() {
            println!();
            println!("{}", record.excerpt);
        }
        if record.is_collection() {
            println!();
            println!("== members ({}) ==", view.members.len());
            print_records(&view.members);
        }
        println!();
        println!("== related ==");
        if view.related.is_empty() {
            println!("{}", NO_RELATED_MESSAGE);
        } else {
            print_records(view.related);
        }
        if let Some(body) = &view.body {
            println!();
            println!("{}", body);
        }
    })
}

/// Execute the search command
pub fn search_command(ctx: &Context, args: &SearchArgs) -> Result<()> {
    debug!("Executing search command with args: {:?}", args);

    let catalog = ctx.catalog();
    let found = catalog.search(&args.term);
    info!("{} record(s) match '{}'", found.len(), args.term);

    output(ctx.format, &found, || print_records(&found))
}

/// Execute the related command
pub fn related_command(ctx: &Context, args: &RelatedArgs) -> Result<()> {
    debug!("Executing related command with args: {:?}", args);

    let catalog = ctx.catalog();
    let detail = match catalog.detail(&args.id, args.max) {
        DetailPage::Found(detail) => detail,
        DetailPage::NotFound { id } => return not_found(ctx.format, &id),
    };

    output(ctx.format, &detail.related, || {
        if detail.related.is_empty() {
            println!("{}", NO_RELATED_MESSAGE);
        } else {
            print_records(&detail.related);
        }
    })
}

#[derive(Serialize)]
struct FileStatus {
    kind: ContentKind,
    file: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Execute the validate command
pub fn validate_command(ctx: &Context, args: &ValidateArgs) -> Result<()> {
    debug!("Executing validate command with args: {:?}", args);

    let Some(enumerator) = ctx.pipeline.enumerator(&ctx.strategy) else {
        return validate_aggregate(ctx, args);
    };

    let mut statuses = Vec::new();
    for (kind, aggregated) in ctx.pipeline.audit(enumerator.as_ref()) {
        let failures: HashMap<&str, &StagexError> = aggregated
            .failures
            .iter()
            .map(|(file, e)| (file.as_str(), e))
            .collect();

        for file in enumerator.enumerate(kind) {
            let status = match failures.get(file.as_str()) {
                None => FileStatus {
                    kind,
                    file,
                    status: "ok",
                    reason: None,
                },
                Some(e) if matches!(e, StagexError::MissingFrontMatter { .. }) => FileStatus {
                    kind,
                    file,
                    status: "absent",
                    reason: Some(e.to_string()),
                },
                Some(e) => FileStatus {
                    kind,
                    file,
                    status: "error",
                    reason: Some(e.to_string()),
                },
            };
            statuses.push(status);
        }
    }

    output(ctx.format, &statuses, || {
        for s in &statuses {
            match &s.reason {
                Some(reason) => println!("{}/{}: {} ({})", s.kind.directory(), s.file, s.status, reason),
                None => println!("{}/{}: {}", s.kind.directory(), s.file, s.status),
            }
        }
    })?;

    check_statuses(&statuses, args.fail_fast)
}

fn validate_aggregate(ctx: &Context, args: &ValidateArgs) -> Result<()> {
    let path = &ctx.pipeline.config().aggregate_path;
    let status = match PrecomputedAggregate::load(ctx.pipeline.source(), path) {
        Ok(aggregate) => FileStatus {
            kind: ContentKind::Post,
            file: path.clone(),
            status: "ok",
            reason: Some(format!(
                "{} post(s), {} collection(s)",
                aggregate.posts.len(),
                aggregate.collections.len()
            )),
        },
        Err(e) => FileStatus {
            kind: ContentKind::Post,
            file: path.clone(),
            status: "error",
            reason: Some(e.to_string()),
        },
    };

    output(ctx.format, &[&status], || match &status.reason {
        Some(reason) => println!("{}: {} ({})", status.file, status.status, reason),
        None => println!("{}: {}", status.file, status.status),
    })?;

    check_statuses(std::slice::from_ref(&status), args.fail_fast)
}

/// Log the outcome of a validate run; with `fail_fast`, any error status
/// fails the command
fn check_statuses(statuses: &[FileStatus], fail_fast: bool) -> Result<()> {
    let errors = statuses.iter().filter(|s| s.status == "error").count();
    if errors == 0 {
        info!("All {} file(s) built", statuses.len());
        return Ok(());
    }

    warn!("{} of {} file(s) failed to build", errors, statuses.len());
    if fail_fast {
        return Err(StagexError::validation(format!(
            "{} file(s) failed to build",
            errors
        )));
    }
    Ok(())
}

fn not_found(format: OutputFormat, id: &str) -> Result<()> {
    info!("No record with id '{}'", id);
    let view = NotFoundView {
        id,
        message: NOT_FOUND_MESSAGE,
    };
    output(format, &view, || println!("{}", NOT_FOUND_MESSAGE))
}

fn print_records(records: &[&ContentRecord]) {
    for record in records {
        println!(
            "{}  {:<10} {}  {}",
            record.display_date(),
            record.kind.name(),
            record.id(),
            record.title
        );
    }
}

/// Print `value` as JSON or YAML, or run `text` for the text format
fn output<T, F>(format: OutputFormat, value: &T, text: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(),
{
    match format {
        OutputFormat::Text => text(),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(file: &str, status: &'static str) -> FileStatus {
        FileStatus {
            kind: ContentKind::Post,
            file: file.to_string(),
            status,
            reason: None,
        }
    }

    #[test]
    fn test_fail_fast_on_error_status() {
        let statuses = [status("a.md", "ok"), status("b.md", "error")];
        assert!(check_statuses(&statuses, false).is_ok());
        assert!(matches!(
            check_statuses(&statuses, true),
            Err(StagexError::Validation { .. })
        ));
    }

    #[test]
    fn test_absent_is_not_a_failure() {
        let statuses = [status("a.md", "ok"), status("plain.md", "absent")];
        assert!(check_statuses(&statuses, true).is_ok());
    }

    #[test]
    fn test_fail_fast_on_unreadable_aggregate() {
        let aggregate = [status("data/posts.json", "error")];
        assert!(check_statuses(&aggregate, true).is_err());
    }
}
