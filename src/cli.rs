//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use keyword_core::{AnalysisDepth, ContentMode};

/// Extract, score and categorize SEO keywords from page content.
///
/// Reads a content document (JSON) from INPUT or stdin and writes the
/// keyword report as JSON.
#[derive(Parser, Debug)]
#[command(name = "keyword-extractor")]
#[command(author, version, about)]
pub struct Args {
    /// Content document JSON file (reads stdin when omitted)
    pub input: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(short, long)]
    pub pretty: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Extraction pipeline (auto, article, ecommerce, general)
    #[arg(short, long)]
    pub mode: Option<ContentMode>,

    /// Maximum keywords in the report and in each bucket (1-500)
    #[arg(short = 'k', long, value_parser = clap::value_parser!(u16).range(1..=500))]
    pub max_keywords: Option<u16>,

    /// Minimum keyword length in characters (1-50)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=50))]
    pub min_keyword_length: Option<u8>,

    /// Stopword language (ISO code or English name)
    #[arg(short, long)]
    pub language: Option<String>,

    /// File with extra stopwords, one per line
    #[arg(long)]
    pub stopwords_file: Option<PathBuf>,

    /// Keep stopwords when filtering tokens
    #[arg(long)]
    pub include_stopwords: bool,

    /// Analysis depth hint (quick, standard, deep)
    #[arg(short, long)]
    pub depth: Option<AnalysisDepth>,

    /// File with observed search suggestions, one per line
    #[arg(short, long)]
    pub suggestions: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["keyword-extractor"]).unwrap();
        assert!(args.input.is_none());
        assert!(args.output.is_none());
        assert!(!args.pretty);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert!(args.mode.is_none());
        assert!(args.max_keywords.is_none());
        assert!(!args.include_stopwords);
    }

    #[test]
    fn test_cli_positional_input() {
        let args = Args::try_parse_from(["keyword-extractor", "page.json"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("page.json")));
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["keyword-extractor", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["keyword-extractor", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["keyword-extractor", "--quiet"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["keyword-extractor", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let err = Args::try_parse_from(["keyword-extractor", "--invalid-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_mode_parses_aliases() {
        let args = Args::try_parse_from(["keyword-extractor", "--mode", "e-commerce"]).unwrap();
        assert_eq!(args.mode, Some(ContentMode::Ecommerce));

        let args = Args::try_parse_from(["keyword-extractor", "-m", "article"]).unwrap();
        assert_eq!(args.mode, Some(ContentMode::Article));
    }

    #[test]
    fn test_cli_unknown_mode_rejected() {
        let err = Args::try_parse_from(["keyword-extractor", "--mode", "blog"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_max_keywords_range() {
        let args = Args::try_parse_from(["keyword-extractor", "-k", "25"]).unwrap();
        assert_eq!(args.max_keywords, Some(25));

        let err = Args::try_parse_from(["keyword-extractor", "-k", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

        let err = Args::try_parse_from(["keyword-extractor", "-k", "501"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_min_keyword_length_zero_rejected() {
        let err =
            Args::try_parse_from(["keyword-extractor", "--min-keyword-length", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_depth_and_language() {
        let args = Args::try_parse_from([
            "keyword-extractor",
            "--depth",
            "deep",
            "--language",
            "es",
        ])
        .unwrap();
        assert_eq!(args.depth, Some(AnalysisDepth::Deep));
        assert_eq!(args.language.as_deref(), Some("es"));
    }

    #[test]
    fn test_cli_files_and_flags_combined() {
        let args = Args::try_parse_from([
            "keyword-extractor",
            "page.json",
            "-o",
            "report.json",
            "--pretty",
            "--stopwords-file",
            "stop.txt",
            "--suggestions",
            "suggest.txt",
            "--include-stopwords",
        ])
        .unwrap();
        assert_eq!(args.output, Some(PathBuf::from("report.json")));
        assert!(args.pretty);
        assert_eq!(args.stopwords_file, Some(PathBuf::from("stop.txt")));
        assert_eq!(args.suggestions, Some(PathBuf::from("suggest.txt")));
        assert!(args.include_stopwords);
    }
}
