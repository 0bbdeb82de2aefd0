//! Stylesheet walking for `rem` literal rewriting.
//! Spec: <https://www.w3.org/TR/css-syntax-3/>
use cssparser::AtRuleParser as CssAtRuleParser;
use cssparser::CowRcStr;
use cssparser::DeclarationParser as CssDeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser as CssQualifiedRuleParser;
use cssparser::RuleBodyItemParser as CssRuleBodyItemParser;
use cssparser::RuleBodyParser as CssRuleBodyParser;
use cssparser::SourcePosition;
use cssparser::StyleSheetParser;
use rem_rewriter::Options;
use rem_rewriter::rewrite_value;

/// Byte range of one declaration's raw value within the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ValueSpan {
    start: usize,
    end: usize,
}

/// Rule walker that records the byte range of every declaration value.
///
/// Rule preludes, at-rule conditions and selector text are never recorded,
/// which is what keeps media query lengths and selectors out of the rewrite.
struct ValueSpanCollector {
    /// Position of the start of the sheet; offsets are measured against it.
    sheet_start: SourcePosition,
    /// Collected value ranges, in source order.
    spans: Vec<ValueSpan>,
}

impl ValueSpanCollector {
    fn new(sheet_start: SourcePosition) -> Self {
        Self {
            sheet_start,
            spans: Vec::new(),
        }
    }

    /// Byte offset of the parser's current position from the start of the sheet.
    fn current_offset(&self, input: &Parser<'_, '_>) -> usize {
        input.slice_from(self.sheet_start).len()
    }

    /// Walk a rule body, recording declaration values and recursing into
    /// nested rules.
    fn collect_rule_body(&mut self, input: &mut Parser<'_, '_>) {
        let mut body = CssRuleBodyParser::new(input, self);
        while body.next().is_some() {}
    }
}

impl CssDeclarationParser<'_> for ValueSpanCollector {
    type Declaration = ();
    type Error = ();

    fn parse_value<'input>(
        &mut self,
        _name: CowRcStr<'input>,
        input: &mut Parser<'input, '_>,
        _decl_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'input, Self::Error>> {
        let start = self.current_offset(input);
        // Consume until end of the declaration item.
        while input.next_including_whitespace_and_comments().is_ok() {}
        let end = self.current_offset(input);
        self.spans.push(ValueSpan { start, end });
        Ok(())
    }
}

impl CssAtRuleParser<'_> for ValueSpanCollector {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    #[inline]
    fn parse_prelude<'input>(
        &mut self,
        _name: CowRcStr<'input>,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        // At-rule conditions are left to the pass-through copy. The prelude
        // must still be consumed in full or the rule errors out, block
        // included.
        while input.next_including_whitespace_and_comments().is_ok() {}
        Ok(())
    }

    #[inline]
    fn parse_block<'input>(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        self.collect_rule_body(input);
        Ok(())
    }

    #[inline]
    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
    ) -> Result<Self::AtRule, Self::Error> {
        // @import and friends carry no declarations.
        Ok(())
    }
}

impl CssQualifiedRuleParser<'_> for ValueSpanCollector {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();

    #[inline]
    fn parse_prelude<'input>(
        &mut self,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        // Selector text is left to the pass-through copy.
        while input.next_including_whitespace_and_comments().is_ok() {}
        Ok(())
    }

    #[inline]
    fn parse_block<'input>(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        self.collect_rule_body(input);
        Ok(())
    }
}

impl CssRuleBodyItemParser<'_, (), ()> for ValueSpanCollector {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        true
    }
}

/// Collect the byte range of every declaration value in the sheet.
///
/// Invalid constructs are skipped by the parser's own error recovery and end
/// up with no recorded span, so their text passes through unchanged.
fn collect_value_spans(css: &str) -> Vec<ValueSpan> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut collector = ValueSpanCollector::new(parser.position());
    let mut rules = StyleSheetParser::new(&mut parser, &mut collector);
    while rules.next().is_some() {}
    let mut spans = collector.spans;
    // Collection follows source order already; sorting keeps the splice
    // correct on any recovery path.
    spans.sort_unstable_by_key(|span| span.start);
    spans
}

/// Copy the sheet, replacing each recorded value range with its rewrite.
fn splice_spans(css: &str, spans: &[ValueSpan], options: &Options) -> String {
    if spans.is_empty() {
        return css.to_owned();
    }
    let mut out = String::with_capacity(css.len());
    let mut copied_to = 0;
    for span in spans {
        // Spans are disjoint and ordered; one that would rewind the copy
        // cursor is dropped.
        if span.start < copied_to {
            continue;
        }
        out.push_str(&css[copied_to..span.start]);
        out.push_str(&rewrite_value(&css[span.start..span.end], options));
        copied_to = span.end;
    }
    out.push_str(&css[copied_to..]);
    out
}

/// Rewrite every bare numeric `rem` length in a stylesheet.
///
/// Declaration values are located with `cssparser` and rewritten through
/// [`rewrite_value`]; every byte outside a declaration value, selectors,
/// at-rule preludes, comments and malformed regions included, is copied
/// through unchanged. The sheet does not need to be fully valid CSS.
pub fn rewrite_stylesheet(css: &str, options: &Options) -> String {
    let spans = collect_value_spans(css);
    splice_spans(css, &spans, options)
}
