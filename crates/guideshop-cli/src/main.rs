use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use guideshop_markdown::{
    FORMATTERS, Formatters, MarkdownStrings, TextEditState, TextRange, utf16_len,
};
use miette::{IntoDiagnostic, Result, WrapErr};

#[derive(Parser)]
#[command(version, about = "GuideShop - apply markdown toolbar formatters to text", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a KDL file overriding markdown markers and hints
    #[arg(long, global = true, env = "GUIDESHOP_MARKDOWN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every formatter and the number of params it takes
    List,
    /// Apply a formatter to text read from a file or stdin
    Format {
        /// Formatter name, e.g. `bold` or `code`
        name: String,

        /// Selection start in UTF-16 code units (defaults to end of text)
        #[arg(long)]
        start: Option<usize>,

        /// Selection end in UTF-16 code units (defaults to start)
        #[arg(long)]
        end: Option<usize>,

        /// Formatter param; repeat for formatters that take several
        #[arg(long = "param")]
        params: Vec<String>,

        /// Read text from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,

        /// Print the result as JSON with the new selection
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    init_miette();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            for kind in FORMATTERS {
                println!("{:<16} {} params", kind.name(), kind.arity());
            }
        }
        Commands::Format {
            name,
            start,
            end,
            params,
            input,
            json,
        } => {
            let strings = load_strings(cli.config.as_deref())?;
            let text = read_input(input.as_deref())?;
            let selection = resolve_selection(utf16_len(&text), start, end);
            let state = TextEditState::new(text, selection);

            let action = Formatters::lookup(&name)?.with_params(params)?;
            let result = Formatters::new(strings).apply(&action, &state)?;

            if json {
                let out = serde_json::to_string_pretty(&result).into_diagnostic()?;
                println!("{out}");
            } else {
                print!("{}", result.text);
                eprintln!(
                    "selection: {}..{}",
                    result.selection.start, result.selection.end
                );
            }
        }
    }

    Ok(())
}

/// Fill in the selection the user left out: a missing start means the end
/// of the text, a missing end collapses to a caret.
fn resolve_selection(len: usize, start: Option<usize>, end: Option<usize>) -> TextRange {
    let start = start.unwrap_or(len);
    let end = end.unwrap_or(start);
    TextRange::new(start, end)
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display())),
        None => std::io::read_to_string(std::io::stdin())
            .into_diagnostic()
            .wrap_err("Failed to read stdin"),
    }
}

/// Explicit config must exist; the default location is optional.
fn load_strings(config: Option<&Path>) -> Result<MarkdownStrings> {
    let path = match config {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(MarkdownStrings::default()),
        },
    };

    tracing::debug!(path = %path.display(), "loading markdown config");
    let source = std::fs::read_to_string(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read config {}", path.display()))?;
    let strings = MarkdownStrings::from_kdl(&source)?;
    Ok(strings)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("guideshop").join("markdown.kdl"))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .expect("couldn't set the miette hook");
    miette::set_panic_hook();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_selection_defaults() {
        assert_eq!(resolve_selection(10, None, None), TextRange::caret(10));
        assert_eq!(resolve_selection(10, Some(3), None), TextRange::caret(3));
        assert_eq!(resolve_selection(10, Some(3), Some(7)), TextRange::new(3, 7));
        assert_eq!(resolve_selection(10, None, Some(4)), TextRange::new(10, 4));
    }

    #[test]
    fn test_parse_format_args() {
        let cli = Cli::try_parse_from([
            "guideshop-md",
            "format",
            "link",
            "--start",
            "2",
            "--param",
            "docs",
            "--param",
            "https://example.com",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Format {
                name,
                start,
                end,
                params,
                json,
                ..
            } => {
                assert_eq!(name, "link");
                assert_eq!(start, Some(2));
                assert_eq!(end, None);
                assert_eq!(params, ["docs", "https://example.com"]);
                assert!(json);
            }
            Commands::List => panic!("expected format command"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
