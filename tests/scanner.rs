#[cfg(test)]
mod scanner_tests {
    use pretty_assertions::assert_eq;

    use rox::diagnostics::Diagnostics;
    use rox::error::RoxError;
    use rox::scanner::*;
    use rox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_two_character_operators() {
        assert_token_sequence(
            "! != = == < <= > >= /",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::SLASH, "/"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "var fun_1 = nil; classy class _x while",
            &[
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "fun_1"),
                (TokenType::EQUAL, "="),
                (TokenType::NIL, "nil"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::IDENTIFIER, "classy"),
                (TokenType::CLASS, "class"),
                (TokenType::IDENTIFIER, "_x"),
                (TokenType::WHILE, "while"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_comments_are_skipped() {
        assert_token_sequence(
            "// leading comment\nprint 1; // trailing\n// no newline at end",
            &[
                (TokenType::PRINT, "print"),
                (TokenType::NUMBER(0.0), "1"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_number_literals() {
        let tokens: Vec<Token> = Scanner::new("12 3.25 7. .5")
            .filter_map(Result::ok)
            .collect();

        let kinds: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        // A trailing or leading dot is not part of the number.
        assert_eq!(
            kinds,
            vec![
                "NUMBER 12 12.0",
                "NUMBER 3.25 3.25",
                "NUMBER 7 7.0",
                "DOT . null",
                "DOT . null",
                "NUMBER 5 5.0",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_string_literals_span_lines() {
        let tokens: Vec<Token> = Scanner::new("\"one\ntwo\" x")
            .filter_map(Result::ok)
            .collect();

        assert_eq!(tokens[0].token_type, TokenType::STRING(String::new()));
        match &tokens[0].token_type {
            TokenType::STRING(s) => assert_eq!(s, "one\ntwo"),
            other => panic!("expected a string, got {:?}", other),
        }
        assert_eq!(tokens[0].lexeme, "\"one\ntwo\"");

        // The identifier after the string is on line 2.
        assert_eq!(tokens[1].lexeme, "x");
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_line_numbers() {
        let tokens: Vec<Token> = Scanner::new("a\nb\n\nc").filter_map(Result::ok).collect();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();

        assert_eq!(lines, vec![1, 2, 4, 4]);
    }

    #[test]
    fn test_unterminated_string() {
        let results: Vec<_> = Scanner::new("print \"abc\ndef").collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());

        let err = results[1].as_ref().unwrap_err();
        assert_eq!(err.to_string(), "[line 2] Error: Unterminated string.");

        let eof = results[2].as_ref().unwrap();
        assert_eq!(eof.token_type, TokenType::EOF);
        assert_eq!(eof.line, 2);
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let scanner = Scanner::new(source);

        let results: Vec<_> = scanner.collect();

        // 0: COMMA ','
        // 1: DOT '.'
        // 2: Error for '$'
        // 3: LEFT_PAREN '('
        // 4: Error for '#'
        // 5: EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();

        assert_eq!(
            errors,
            vec![
                "[line 1] Error: Unexpected character: $",
                "[line 1] Error: Unexpected character: #",
            ]
        );

        fn assert_token_matches(
            result: &Result<Token, RoxError>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(
                        token.token_type, expected_type,
                        "Expected token type {:?}, got {:?}",
                        expected_type, token.token_type
                    );
                    assert_eq!(
                        token.lexeme, expected_lexeme,
                        "Expected lexeme '{}', got '{}'",
                        expected_lexeme, token.lexeme
                    );
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }

    #[test]
    fn test_non_ascii_character_is_one_error() {
        let results: Vec<_> = Scanner::new("a é b").collect();
        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();

        assert_eq!(errors, vec!["[line 1] Error: Unexpected character: é"]);
        assert_eq!(results.len(), 4); // a, error, b, EOF
    }

    #[test]
    fn test_non_ascii_inside_strings_is_fine() {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new("\"héllo\"").scan_tokens(&mut diagnostics);

        assert!(diagnostics.is_empty());
        assert_eq!(tokens[0].to_string(), "STRING \"héllo\" héllo");
    }

    #[test]
    fn test_scan_tokens_reports_and_continues() {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new("@ print 1;\n~").scan_tokens(&mut diagnostics);

        assert_eq!(diagnostics.errors().len(), 2);
        assert!(diagnostics.had_error());
        assert_eq!(diagnostics.errors()[1].line(), Some(2));

        let types: Vec<&str> = tokens.iter().map(|t| t.token_type.name()).collect();
        assert_eq!(types, vec!["PRINT", "NUMBER", "SEMICOLON", "EOF"]);
    }

    #[test]
    fn test_empty_source_is_just_eof() {
        let tokens: Vec<_> = Scanner::new("").collect();

        assert_eq!(tokens.len(), 1);
        assert_token_sequence("", &[(TokenType::EOF, "")]);
    }
}
