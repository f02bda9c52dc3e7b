// Error reporting with Ariadne
//
// Parse errors carry byte spans into the original input, so the same error
// can be printed as a full report (CLI) or collapsed to one line (page).

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use chumsky::error::{Simple, SimpleReason};
use lexer::token::Token;

/// Type alias for Chumsky parser errors
pub type ParseError = Simple<Token>;

/// Print every error as an Ariadne report on stderr
pub fn report_errors(filename: &str, source: &str, errors: &[ParseError]) {
    for error in errors {
        if let Err(e) = build_report(filename, error, true).eprint((filename, Source::from(source))) {
            eprintln!("failed to print parse report: {}", e);
        }
    }
}

/// Render the reports to a plain (uncolored) string
pub fn render_errors(filename: &str, source: &str, errors: &[ParseError]) -> String {
    let mut out = Vec::new();
    for error in errors {
        // Writing into a Vec cannot fail
        let _ = build_report(filename, error, false).write((filename, Source::from(source)), &mut out);
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// One-line description of the first error, used where a full report
/// has nowhere to go (result regions, engine errors).
pub fn summarize(errors: &[ParseError]) -> String {
    match errors.first() {
        Some(error) => format!("{} at position {}", describe(error), error.span().start),
        None => "invalid input".to_string(),
    }
}

fn build_report<'a>(
    filename: &'a str,
    error: &ParseError,
    color: bool,
) -> Report<'a, (&'a str, std::ops::Range<usize>)> {
    let span = error.span();

    let report = Report::build(ReportKind::Error, filename, span.start)
        .with_config(Config::default().with_color(color))
        .with_code("E001")
        .with_message("Parse Error")
        .with_label(
            Label::new((filename, span))
                .with_message(describe(error))
                .with_color(Color::Red),
        );

    // Add expected tokens if available (limit to 5 to avoid overwhelming output)
    if error.expected().len() > 0 && matches!(error.reason(), SimpleReason::Unexpected) {
        report.with_help(expected_list(error)).finish()
    } else {
        report.finish()
    }
}

fn describe(error: &ParseError) -> String {
    match error.reason() {
        SimpleReason::Unclosed { delimiter, .. } => {
            format!("unclosed delimiter '{}'", delimiter)
        }
        SimpleReason::Custom(msg) => msg.clone(),
        SimpleReason::Unexpected => match error.found() {
            Some(Token::Error) => "invalid character".to_string(),
            Some(token) => format!("unexpected '{}'", token),
            None => "unexpected end of input".to_string(),
        },
    }
}

fn expected_list(error: &ParseError) -> String {
    let mut expected: Vec<String> = error.expected().map(format_expected).collect();
    // HashSet order is not stable
    expected.sort();
    let total = expected.len();
    expected.truncate(5);

    if total > 5 {
        format!("Expected one of: {}, ...", expected.join(", "))
    } else {
        format!("Expected: {}", expected.join(", "))
    }
}

/// Format expected token for human-readable output
fn format_expected(token: &Option<Token>) -> String {
    match token {
        Some(Token::Identifier(_)) => "identifier".to_string(),
        Some(Token::Number(_)) => "number".to_string(),
        Some(Token::Error) => "valid character".to_string(),
        Some(t) => format!("'{}'", t),
        None => "end of input".to_string(),
    }
}
