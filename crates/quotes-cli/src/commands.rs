//! Maps each CLI verb onto the query service or importer and renders the
//! result to stdout.

use anyhow::Context as _;
use quotes_core::{Quote, QuoteFilter};
use quotes_service::{ImportPolicy, ImportReport, Importer, QuoteService};
use quotes_store_sqlite::SqliteStore;
use serde::Serialize;

use crate::{cli::Command, settings::Settings};

/// Run one command against the configured store.
///
/// The store is opened here and closed before returning, whether or not the
/// command succeeded.
pub async fn run(command: Command, json: bool, settings: &Settings) -> anyhow::Result<()> {
  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("failed to open store at {}", settings.store_path.display()))?;
  tracing::info!(path = %settings.store_path.display(), "store opened");

  let service = QuoteService::with_limit(store, settings.list_limit)?;
  let result = dispatch(&service, command, json).await;

  let closed = service
    .into_store()
    .close()
    .await
    .context("failed to close store");
  tracing::info!("store closed");

  result.and(closed)
}

async fn dispatch(
  service: &QuoteService<SqliteStore>,
  command: Command,
  json: bool,
) -> anyhow::Result<()> {
  match command {
    Command::Generate(filter) => {
      let quote = service
        .generate(filter.category.as_deref(), filter.author.as_deref())
        .await?;
      if json {
        print_json(&quote)?;
      } else {
        println!("{quote}");
      }
    }

    Command::Add {
      category,
      quote,
      author,
    } => {
      let stored = service.add(&category, author.as_deref(), &quote).await?;
      if json {
        print_json(&stored)?;
      } else {
        println!(
          "Added quote #{} to {} by {}",
          stored.id, stored.category, stored.author
        );
      }
    }

    Command::ListQuotes { filter, limit } => {
      let category = filter.category.as_deref();
      let author = filter.author.as_deref();
      let quotes = service.list_quotes(category, author, limit).await?;
      if json {
        print_json(&quotes)?;
      } else {
        let total = service.count(category, author).await?;
        print_quotes(&quotes, total, &QuoteFilter::new(category, author));
      }
    }

    Command::ListCategories => {
      let categories = service.list_categories().await?;
      print_names(&categories, json, "No categories yet.")?;
    }

    Command::ListAuthors => {
      let authors = service.list_authors().await?;
      print_names(&authors, json, "No authors yet.")?;
    }

    Command::ImportQuotes { file_path, append } => {
      let policy = if append {
        ImportPolicy::Append
      } else {
        ImportPolicy::SkipExisting
      };
      let report = Importer::new(service.store())
        .with_policy(policy)
        .import_file(&file_path)
        .await?;
      if json {
        print_json(&report)?;
      } else {
        print_import_report(&report, &file_path.display().to_string());
      }
    }
  }

  Ok(())
}

// ─── Rendering ───────────────────────────────────────────────────────────────

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

fn print_quotes(quotes: &[Quote], total: u64, filter: &QuoteFilter) {
  if quotes.is_empty() {
    println!("No quotes found for {filter}.");
    return;
  }
  for quote in quotes {
    println!("{:>4}  {quote}", quote.id);
  }
  if total > quotes.len() as u64 {
    println!("(showing {} of {total})", quotes.len());
  }
}

fn print_names(names: &[String], json: bool, empty: &str) -> anyhow::Result<()> {
  if json {
    return print_json(names);
  }
  if names.is_empty() {
    println!("{empty}");
  }
  for name in names {
    println!("{name}");
  }
  Ok(())
}

fn print_import_report(report: &ImportReport, source: &str) {
  println!(
    "Imported {} quotes from {source} ({} skipped, {} already present)",
    report.inserted, report.skipped, report.duplicates
  );
  for issue in &report.issues {
    match issue.index {
      Some(i) => println!("  skipped {}[{i}]: {}", issue.category, issue.reason),
      None => println!("  skipped {}: {}", issue.category, issue.reason),
    }
  }
}
