//! Clap argument types and input validation.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use jarvis::models::{ReviewRequest, ReviewType, ValidationError};
use jarvis::output::{OutputRenderer, ReviewReport};

/// LLM-backed code review for Python snippets.
#[derive(Parser, Debug)]
#[command(name = jarvis::constants::APP_NAME, version = jarvis::constants::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Review one snippet with the configured backend.
    Review(ReviewArgs),

    /// Print the prompt that would be sent, without calling any backend.
    Prompt(PromptArgs),

    /// Review every file in a directory and write a text report.
    Batch(BatchArgs),

    /// Show which settings are present and which backend would be used.
    Config,

    /// List the review types.
    Types,
}

/// Where the snippet comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetSource {
    File(PathBuf),
    Stdin,
}

/// Snippet input shared by `review` and `prompt`.
#[derive(clap::Args, Debug)]
pub struct SnippetArgs {
    /// File holding the code to review.
    pub file: Option<PathBuf>,

    /// Read the code to review from stdin.
    #[arg(long, default_value_t = false)]
    pub stdin: bool,

    /// Review type: bug_detection, syntax_revision, style_suggestions, doc_strings_add.
    #[arg(long = "type", short = 't', default_value = "bug_detection")]
    pub review_type: String,
}

impl SnippetArgs {
    /// Validate that exactly one input source is provided.
    pub fn validate_input(&self) -> Result<SnippetSource, String> {
        match (&self.file, self.stdin) {
            (Some(_), true) => Err("only one input source allowed: FILE or --stdin".to_string()),
            (None, false) => Err("one input source is required: FILE or --stdin".to_string()),
            (Some(path), false) => Ok(SnippetSource::File(path.clone())),
            (None, true) => Ok(SnippetSource::Stdin),
        }
    }

    /// Pair the snippet with the requested review type, validating both.
    pub fn to_request(&self, snippet: String) -> Result<ReviewRequest, ValidationError> {
        ReviewRequest::from_input(snippet, &self.review_type)
    }
}

/// Arguments for the `review` subcommand.
#[derive(Parser, Debug)]
pub struct ReviewArgs {
    #[command(flatten)]
    pub input: SnippetArgs,

    /// Output format.
    #[arg(long, default_value = "terminal")]
    pub format: OutputFormat,
}

/// Arguments for the `prompt` subcommand.
#[derive(Parser, Debug)]
pub struct PromptArgs {
    #[command(flatten)]
    pub input: SnippetArgs,
}

/// Arguments for the `batch` subcommand.
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Directory whose files are reviewed, one snippet per file.
    pub dir: PathBuf,

    /// Review type applied to every file.
    #[arg(long = "type", short = 't', default_value = "bug_detection")]
    pub review_type: String,

    /// Report file to write.
    #[arg(long, short = 'o', default_value = jarvis::constants::DEFAULT_BATCH_OUTPUT)]
    pub output: PathBuf,
}

impl BatchArgs {
    pub fn parsed_review_type(&self) -> Result<ReviewType, ValidationError> {
        self.review_type.parse()
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl OutputFormat {
    /// Render a report using the renderer for this format.
    pub fn render(&self, report: &ReviewReport) -> String {
        match self {
            OutputFormat::Terminal => jarvis::output::terminal::TerminalRenderer.render(report),
            OutputFormat::Json => jarvis::output::json::JsonRenderer.render(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("jarvis").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn review_defaults() {
        let cli = parse(&["review", "snippet.py"]);
        let Command::Review(args) = cli.command else {
            panic!("expected review");
        };
        assert_eq!(args.input.review_type, "bug_detection");
        assert_eq!(args.format, OutputFormat::Terminal);
        assert_eq!(
            args.input.validate_input().unwrap(),
            SnippetSource::File(PathBuf::from("snippet.py"))
        );
    }

    #[test]
    fn review_with_type_and_json() {
        let cli = parse(&["review", "--stdin", "--type", "style_suggestions", "--format", "json"]);
        let Command::Review(args) = cli.command else {
            panic!("expected review");
        };
        assert_eq!(args.input.review_type, "style_suggestions");
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.input.validate_input().unwrap(), SnippetSource::Stdin);
    }

    #[test]
    fn validate_no_input() {
        let cli = parse(&["prompt"]);
        let Command::Prompt(args) = cli.command else {
            panic!("expected prompt");
        };
        assert!(
            args.input
                .validate_input()
                .unwrap_err()
                .contains("one input source is required")
        );
    }

    #[test]
    fn validate_both_inputs() {
        let cli = parse(&["prompt", "a.py", "--stdin"]);
        let Command::Prompt(args) = cli.command else {
            panic!("expected prompt");
        };
        assert!(
            args.input
                .validate_input()
                .unwrap_err()
                .contains("only one input source allowed")
        );
    }

    #[test]
    fn to_request_validates_type_and_snippet() {
        let cli = parse(&["review", "a.py", "--type", "doc_strings_add"]);
        let Command::Review(args) = cli.command else {
            panic!("expected review");
        };
        let request = args.input.to_request("def f(): pass".into()).unwrap();
        assert_eq!(request.review_type, ReviewType::DocstringAddition);
        assert_eq!(request.snippet, "def f(): pass");

        assert_eq!(
            args.input.to_request(" \n".into()),
            Err(ValidationError::EmptySnippet)
        );

        let cli = parse(&["prompt", "a.py", "-t", "lint"]);
        let Command::Prompt(args) = cli.command else {
            panic!("expected prompt");
        };
        assert_eq!(
            args.input.to_request("x = 1".into()),
            Err(ValidationError::UnknownReviewType("lint".into()))
        );
    }

    #[test]
    fn batch_defaults() {
        let cli = parse(&["batch", "tests/"]);
        let Command::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(args.dir, PathBuf::from("tests/"));
        assert_eq!(args.output, PathBuf::from("jarvis_review_results.txt"));
        assert_eq!(args.parsed_review_type().unwrap(), ReviewType::BugDetection);
    }

    #[test]
    fn batch_unknown_type_is_validation_error() {
        let cli = parse(&["batch", "in", "-t", "refactor"]);
        let Command::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert!(args.parsed_review_type().is_err());
    }

    #[test]
    fn unknown_format_rejected() {
        assert!(Cli::try_parse_from(["jarvis", "review", "a.py", "--format", "github"]).is_err());
    }
}
