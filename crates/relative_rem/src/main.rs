//! Command line driver that rewrites numeric `rem` lengths in a stylesheet
//! into `calc()` expressions against a configurable base custom property.

use anyhow::{Result, anyhow};
use env_logger::{Builder, Env};
use log::{debug, info};
use rem_rewriter::Options;
use rem_syntax::rewrite_stylesheet;
use std::env;
use std::fs::{read_to_string, write};
use std::io::{Read as _, Write as _, stderr, stdin, stdout};
use std::path::Path;

/// One parsed command line invocation.
struct Invocation {
    /// Input path; stdin when omitted or `-`.
    input: Option<String>,
    /// Output path; stdout when omitted.
    output: Option<String>,
    /// Rewrite configuration.
    options: Options,
}

/// Parse command line arguments into an invocation.
///
/// # Errors
/// Returns an error on an unknown flag, a flag without its value or a second
/// positional argument.
fn parse_invocation(args: &[String]) -> Result<Invocation> {
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut options = Options::default();
    let mut index = 0;
    while index < args.len() {
        let arg = args[index].as_str();
        if let Some(rest) = arg.strip_prefix("--base-var=") {
            options.base_css_variable = rest.to_owned();
            index += 1;
        } else if arg == "--base-var" {
            if index + 1 >= args.len() {
                return Err(anyhow!("--base-var requires a value"));
            }
            options.base_css_variable = args[index + 1].clone();
            index += 2;
        } else if let Some(rest) = arg.strip_prefix("--output=") {
            output = Some(rest.to_owned());
            index += 1;
        } else if arg == "--output" {
            if index + 1 >= args.len() {
                return Err(anyhow!("--output requires a value"));
            }
            output = Some(args[index + 1].clone());
            index += 2;
        } else if arg != "-" && arg.starts_with('-') {
            return Err(anyhow!("unknown flag '{arg}'"));
        } else if input.is_none() {
            input = Some(arg.to_owned());
            index += 1;
        } else {
            return Err(anyhow!("unexpected argument '{arg}'"));
        }
    }
    Ok(Invocation {
        input,
        output,
        options,
    })
}

/// Print usage information to stderr.
fn print_usage() {
    drop(writeln!(
        stderr(),
        "Usage:\n  relative_rem [INPUT] [--base-var <NAME>] [--output <FILE>]\n\nRewrites numeric rem lengths in CSS into calc() expressions against a base\ncustom property. INPUT defaults to stdin; pass - to force stdin."
    ));
}

/// Read the stylesheet from the given path, or stdin when omitted or `-`.
///
/// # Errors
/// Returns an error if the file does not exist or the stream cannot be read.
fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path_text) if path_text != "-" => {
            if !Path::new(path_text).exists() {
                return Err(anyhow!("input '{path_text}' not found"));
            }
            Ok(read_to_string(path_text)?)
        }
        _ => {
            let mut buffer = String::new();
            stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Write the rewritten stylesheet to the given path, or stdout when omitted.
///
/// # Errors
/// Returns an error if the file or stream cannot be written.
fn write_output(path: Option<&str>, css: &str) -> Result<()> {
    match path {
        Some(path_text) => write(path_text, css)?,
        None => stdout().write_all(css.as_bytes())?,
    }
    Ok(())
}

/// Main entry point for the relative_rem CLI tool.
///
/// # Errors
/// Returns an error if argument parsing, reading or writing fails.
fn main() -> Result<()> {
    let _log_init: Result<(), _> = Builder::from_env(Env::default().filter_or("RUST_LOG", "warn"))
        .is_test(false)
        .try_init();
    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = match parse_invocation(&args) {
        Ok(parsed) => parsed,
        Err(error) => {
            print_usage();
            return Err(error);
        }
    };
    debug!(
        "[REWRITE] base variable: {}",
        invocation.options.base_css_variable
    );
    let css = read_input(invocation.input.as_deref())?;
    let rewritten = rewrite_stylesheet(&css, &invocation.options);
    info!(
        "[REWRITE] {} bytes in, {} bytes out",
        css.len(),
        rewritten.len()
    );
    write_output(invocation.output.as_deref(), &rewritten)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rem_rewriter::DEFAULT_BASE_CSS_VARIABLE;

    fn parse_owned(args: &[&str]) -> Result<Invocation> {
        let owned: Vec<String> = args.iter().map(|arg| (*arg).to_owned()).collect();
        parse_invocation(&owned)
    }

    fn parse_error(args: &[&str]) -> String {
        match parse_owned(args) {
            Ok(_) => String::new(),
            Err(error) => error.to_string(),
        }
    }

    #[test]
    fn parses_defaults() -> Result<()> {
        let invocation = parse_owned(&[])?;
        assert_eq!(invocation.input, None);
        assert_eq!(invocation.output, None);
        assert_eq!(
            invocation.options.base_css_variable,
            DEFAULT_BASE_CSS_VARIABLE
        );
        Ok(())
    }

    #[test]
    fn parses_flags_with_separate_values() -> Result<()> {
        let invocation = parse_owned(&[
            "styles.css",
            "--base-var",
            "--app-rem",
            "--output",
            "out.css",
        ])?;
        assert_eq!(invocation.input.as_deref(), Some("styles.css"));
        assert_eq!(invocation.output.as_deref(), Some("out.css"));
        assert_eq!(invocation.options.base_css_variable, "--app-rem");
        Ok(())
    }

    #[test]
    fn parses_flags_with_equals() -> Result<()> {
        let invocation = parse_owned(&["--base-var=--app-rem", "--output=out.css", "-"])?;
        assert_eq!(invocation.input.as_deref(), Some("-"));
        assert_eq!(invocation.output.as_deref(), Some("out.css"));
        assert_eq!(invocation.options.base_css_variable, "--app-rem");
        Ok(())
    }

    #[test]
    fn rejects_bad_argument_shapes() {
        assert_eq!(parse_error(&["--nope"]), "unknown flag '--nope'");
        assert_eq!(parse_error(&["--base-var"]), "--base-var requires a value");
        assert_eq!(parse_error(&["--output"]), "--output requires a value");
        assert_eq!(
            parse_error(&["one.css", "two.css"]),
            "unexpected argument 'two.css'"
        );
    }
}
