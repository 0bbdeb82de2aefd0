//! Relative `rem` rewriting for declaration values.
//! Spec: <https://www.w3.org/TR/css-values-3/#font-relative-lengths>

#![forbid(unsafe_code)]

pub mod scan;

/// Custom property consulted when no explicit base variable is configured.
pub const DEFAULT_BASE_CSS_VARIABLE: &str = "--rem-relative-base";

/// Configuration for `rem` literal rewriting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Name of the custom property holding the base rem size, including the
    /// leading `--`. The name is spliced into `var()` references verbatim.
    pub base_css_variable: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_css_variable: DEFAULT_BASE_CSS_VARIABLE.to_owned(),
        }
    }
}

/// Rewrite every bare numeric `rem` length in one declaration value.
///
/// The value is scanned left to right in a single pass:
/// - Quoted strings, `url()` arguments and custom property names are copied
///   through untouched.
/// - A number directly followed by the unit `rem` in any letter case becomes
///   `calc(<number> * var(<base>))`, except zero which collapses to `0`.
/// - Everything else is copied through byte for byte, whitespace and
///   comments included.
///
/// Values that do not contain the letters `rem` anywhere skip the scan and
/// come back unchanged.
///
/// Spec: <https://www.w3.org/TR/css-values-3/#calc-func>
pub fn rewrite_value(value: &str, options: &Options) -> String {
    if !contains_rem(value) {
        return value.to_owned();
    }
    let bytes = value.as_bytes();
    let mut out = String::with_capacity(value.len());
    let mut copied_to = 0;
    let mut pos = 0;
    while pos < bytes.len() {
        if let Some(end) = scan::match_protected(bytes, pos) {
            // Protected spans stay inside the pending plain run.
            pos = end;
        } else if let Some(literal) = scan::match_rem_literal(bytes, pos) {
            out.push_str(&value[copied_to..pos]);
            push_rewritten_literal(
                &mut out,
                &value[pos..literal.number_end],
                &value[pos..literal.end],
                &options.base_css_variable,
            );
            copied_to = literal.end;
            pos = literal.end;
        } else {
            pos += 1;
        }
    }
    out.push_str(&value[copied_to..]);
    out
}

/// A value without the letters `rem` cannot contain a rewritable literal.
#[inline]
fn contains_rem(value: &str) -> bool {
    value
        .as_bytes()
        .windows(3)
        .any(|window| window.eq_ignore_ascii_case(b"rem"))
}

/// Append the rewritten form of one matched literal.
fn push_rewritten_literal(out: &mut String, number: &str, raw: &str, base_css_variable: &str) {
    let Ok(rems) = number.parse::<f64>() else {
        // The scanner's number grammar always parses as f64; keep the raw
        // text if that ever stops holding.
        out.push_str(raw);
        return;
    };
    if rems == 0.0 {
        out.push('0');
        return;
    }
    out.push_str("calc(");
    out.push_str(&rems.to_string());
    out.push_str(" * var(");
    out.push_str(base_css_variable);
    out.push_str("))");
}
