use clap::{Args, Parser, Subcommand};

use crate::model::text::Category;

#[derive(Parser)]
#[command(name = "td", about = concat!("textdesk v", env!("CARGO_PKG_VERSION"), " - manage the texts your app shows"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// API base URL (overrides config and TEXTDESK_API_URL)
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// Read configuration from this file
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List texts, optionally searched and filtered by category
    List(ListArgs),
    /// Show one text
    Show(ShowArgs),
    /// Create a new text
    Create(CreateArgs),
    /// Edit an existing text
    Edit(EditArgs),
    /// Permanently delete texts
    Delete(DeleteArgs),
    /// List categories with their codes and text counts
    Categories,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive substring to look for in the text body
    #[arg(long, short)]
    pub search: Option<String>,
    /// Only texts of this category (slug or code)
    #[arg(long, short)]
    pub category: Option<Category>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Text ID
    pub id: i64,
    /// Print the stored form verbatim, markers included
    #[arg(long)]
    pub raw: bool,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct BodySource {
    /// Text body (newlines become line breaks)
    #[arg(long, short, conflicts_with = "file")]
    pub text: Option<String>,
    /// Read the body from a file; `-` reads stdin
    #[arg(long, short)]
    pub file: Option<String>,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Category (slug or code)
    #[arg(long, short)]
    pub category: Category,
    #[command(flatten)]
    pub body: BodySource,
}

#[derive(Args)]
pub struct EditArgs {
    /// Text ID
    pub id: i64,
    /// New category (default: keep the current one)
    #[arg(long, short)]
    pub category: Option<Category>,
    #[command(flatten)]
    pub body: BodySource,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Text IDs to delete
    #[arg(required = true)]
    pub ids: Vec<i64>,
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_filters() {
        let cli = Cli::try_parse_from(["td", "list", "--search", "hola", "-c", "about-us"]).unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.search.as_deref(), Some("hola"));
                assert_eq!(args.category, Some(Category::AboutUs));
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(Cli::try_parse_from(["td", "list", "--category", "blog"]).is_err());
    }

    #[test]
    fn text_and_file_conflict() {
        assert!(
            Cli::try_parse_from(["td", "create", "-c", "diary", "--text", "x", "--file", "y"])
                .is_err()
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["td", "show", "4", "--json", "--api-url", "http://h/Api"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.api_url.as_deref(), Some("http://h/Api"));
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["td"]).unwrap();
        assert!(cli.command.is_none());
    }
}
