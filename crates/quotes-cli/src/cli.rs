//! Command-line surface of the `quotes` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::RangedU64ValueParser};

#[derive(Parser, Debug)]
#[command(
  name = "quotes",
  version,
  about = "Store, import, list and draw random quotes"
)]
pub struct Cli {
  /// Path to a TOML config file (store_path, log_dir, list_limit).
  #[arg(
    short,
    long,
    global = true,
    value_name = "FILE",
    env = "QUOTES_CONFIG",
    default_value = "quotes.toml"
  )]
  pub config: PathBuf,

  /// SQLite database file; overrides the config file.
  #[arg(long, global = true, value_name = "PATH")]
  pub db: Option<PathBuf>,

  /// Directory for the general and error logs; overrides the config file.
  #[arg(long, global = true, value_name = "DIR")]
  pub log_dir: Option<PathBuf>,

  /// Print results as JSON.
  #[arg(long, global = true)]
  pub json: bool,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Print one random quote, optionally narrowed by category and author
  Generate(FilterArgs),

  /// Add a single quote
  Add {
    #[arg(long, value_parser = non_empty)]
    category: String,

    /// The quote text
    #[arg(long, value_parser = non_empty)]
    quote: String,

    /// Defaults to "Unknown"
    #[arg(long, value_parser = non_empty)]
    author: Option<String>,
  },

  /// List matching quotes, a page at a time
  ListQuotes {
    #[command(flatten)]
    filter: FilterArgs,

    /// Maximum number of quotes to print (default from config, normally 5)
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    limit: Option<usize>,
  },

  /// List every distinct category
  ListCategories,

  /// List every distinct author
  ListAuthors,

  /// Bulk-load quotes from a JSON file mapping category to entries
  ImportQuotes {
    #[arg(
      long,
      alias = "file_path",
      value_name = "FILE",
      default_value = "data/quotes.json"
    )]
    file_path: PathBuf,

    /// Insert entries even if an identical quote is already stored
    #[arg(long)]
    append: bool,
  },
}

/// Optional equality filters shared by `generate` and `list-quotes`.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
  /// Exact category name
  #[arg(long)]
  pub category: Option<String>,

  /// Author name, matched case-insensitively
  #[arg(long)]
  pub author: Option<String>,
}

fn non_empty(s: &str) -> Result<String, String> {
  let trimmed = s.trim();
  if trimmed.is_empty() {
    Err("value must not be empty".to_string())
  } else {
    Ok(trimmed.to_string())
  }
}

#[cfg(test)]
mod tests {
  use clap::{CommandFactory, error::ErrorKind};

  use super::*;

  #[test]
  fn cli_definition_is_consistent() { Cli::command().debug_assert(); }

  #[test]
  fn parses_list_quotes_with_filters() {
    let cli = Cli::try_parse_from([
      "quotes",
      "list-quotes",
      "--category",
      "Wisdom",
      "--author",
      "sogo",
      "--limit",
      "3",
    ])
    .unwrap();

    match cli.command {
      Command::ListQuotes { filter, limit } => {
        assert_eq!(filter.category.as_deref(), Some("Wisdom"));
        assert_eq!(filter.author.as_deref(), Some("sogo"));
        assert_eq!(limit, Some(3));
      }
      other => panic!("unexpected command: {other:?}"),
    }
  }

  #[test]
  fn add_requires_category_and_quote() {
    let err = Cli::try_parse_from(["quotes", "add", "--quote", "x"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
  }

  #[test]
  fn add_rejects_blank_values() {
    let err =
      Cli::try_parse_from(["quotes", "add", "--category", "  ", "--quote", "x"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
  }

  #[test]
  fn list_quotes_rejects_zero_limit() {
    let err =
      Cli::try_parse_from(["quotes", "list-quotes", "--limit", "0"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
  }

  #[test]
  fn import_accepts_underscore_alias() {
    let cli = Cli::try_parse_from([
      "quotes",
      "import-quotes",
      "--file_path",
      "seed.json",
    ])
    .unwrap();
    assert!(matches!(
      cli.command,
      Command::ImportQuotes { ref file_path, append: false } if file_path == &PathBuf::from("seed.json")
    ));
  }
}
