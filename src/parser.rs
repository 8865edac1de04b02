use crate::error::ParseError;

/// Transient state for one `tokenize` call.
///
/// At most one of `in_single` / `in_double` is set at any time. `quoted`
/// records that the pending token has opened a quote region, so that an empty
/// region such as `''` still produces an (empty) argument.
#[derive(Debug, Default)]
struct QuoteState {
    in_single: bool,
    in_double: bool,
    quoted: bool,
    current: String,
}

impl QuoteState {
    fn in_quote(&self) -> bool {
        self.in_single || self.in_double
    }

    /// Moves the pending token (if any) onto `tokens`.
    fn flush(&mut self, tokens: &mut Vec<String>) {
        if !self.current.is_empty() || self.quoted {
            tokens.push(std::mem::take(&mut self.current));
        }
        self.quoted = false;
    }
}

/// Splits one input line into arguments.
///
/// - Single and double quotes group whitespace into one argument and are
///   removed from the result. A quote of the other kind inside a quoted region
///   is kept literally.
/// - Quoted and unquoted runs that touch join into one argument, so `a''b`
///   yields `ab` while a lone `''` yields an empty argument.
/// - A quote left open at the end of the line is an error and nothing is
///   returned.
///
/// A blank line yields an empty vector.
pub fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut state = QuoteState::default();

    for ch in line.chars() {
        match ch {
            '\'' if !state.in_double => {
                state.in_single = !state.in_single;
                state.quoted = true;
            }
            '"' if !state.in_single => {
                state.in_double = !state.in_double;
                state.quoted = true;
            }
            c if c.is_whitespace() && !state.in_quote() => state.flush(&mut tokens),
            c => state.current.push(c),
        }
    }

    if state.in_quote() {
        return Err(ParseError::MismatchedQuotes);
    }
    state.flush(&mut tokens);
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tokenize_simple() {
        let tokens = tokenize("echo hello world").unwrap();
        assert_eq!(tokens, vec!["echo", "hello", "world"]);
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize("echo 'hello world'").unwrap(),
            vec!["echo", "hello world"]
        );
        assert_eq!(
            tokenize("echo \"hello   world\"").unwrap(),
            vec!["echo", "hello   world"]
        );
    }

    #[test]
    fn test_empty_quotes_make_empty_argument() {
        assert_eq!(tokenize("echo \"\"").unwrap(), vec!["echo", ""]);
        assert_eq!(tokenize("echo ''").unwrap(), vec!["echo", ""]);
        assert_eq!(tokenize("'' \"\"").unwrap(), vec!["", ""]);
    }

    #[test]
    fn test_adjacent_runs_concatenate() {
        assert_eq!(tokenize("a''b").unwrap(), vec!["ab"]);
        assert_eq!(tokenize("''b").unwrap(), vec!["b"]);
        assert_eq!(tokenize("\"a\"'b'c").unwrap(), vec!["abc"]);
        assert_eq!(tokenize("--name='x y'").unwrap(), vec!["--name=x y"]);
    }

    #[test]
    fn test_opposite_quote_is_literal() {
        assert_eq!(tokenize("echo \"it's\"").unwrap(), vec!["echo", "it's"]);
        assert_eq!(
            tokenize("echo 'say \"hi\"'").unwrap(),
            vec!["echo", "say \"hi\""]
        );
    }

    #[test]
    fn test_mismatched_quotes() {
        assert_eq!(
            tokenize("echo 'unterminated"),
            Err(ParseError::MismatchedQuotes)
        );
        assert_eq!(tokenize("\""), Err(ParseError::MismatchedQuotes));
        assert_eq!(
            tokenize("echo \"it's"),
            Err(ParseError::MismatchedQuotes)
        );
    }

    #[test]
    fn test_blank_lines() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("   \t  ").unwrap().is_empty());
    }

    #[test]
    fn test_trailing_token_flushed() {
        assert_eq!(tokenize("  ls   -l").unwrap(), vec!["ls", "-l"]);
    }

    proptest! {
        #[test]
        fn test_tokenize_is_deterministic(s in "\\PC{0,64}") {
            prop_assert_eq!(tokenize(&s), tokenize(&s));
        }

        #[test]
        fn test_unquoted_input_matches_split_whitespace(s in "[a-z0-9 \\t./-]{0,64}") {
            let expected: Vec<String> = s.split_whitespace().map(String::from).collect();
            prop_assert_eq!(tokenize(&s).unwrap(), expected);
        }

        #[test]
        fn test_quoted_words_survive(
            words in prop::collection::vec("[a-z ]{0,10}", 1..6),
        ) {
            let line = words
                .iter()
                .map(|w| format!("'{}'", w))
                .collect::<Vec<_>>()
                .join(" ");
            prop_assert_eq!(tokenize(&line).unwrap(), words);
        }

        #[test]
        fn test_no_unquoted_whitespace_or_quotes(s in "[a-z \"']{0,32}") {
            if let Ok(tokens) = tokenize(&s) {
                if !s.contains('\'') && !s.contains('"') {
                    for token in &tokens {
                        prop_assert!(!token.contains(' '));
                        prop_assert!(!token.is_empty());
                    }
                }
            }
        }
    }
}
