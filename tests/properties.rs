//! Property-based tests for the rune reader and the lex driver.

use parsekit::grammars::sexp::{self, EOF, ERR};
use parsekit::lexing::{
    lex_static, Consumer, LexStatus, RuneReader, StringReader, Token, TokenType, REPLACEMENT,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Mark,
    Read,
    Rewind,
    Commit,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Mark),
        3 => Just(Op::Read),
        1 => Just(Op::Rewind),
        1 => Just(Op::Commit),
    ]
}

/// Inputs the S-expression grammar mostly accepts, with the odd stray rune.
fn sexp_source() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("(".to_string()),
            Just(")".to_string()),
            Just(" ".to_string()),
            Just("\n".to_string()),
            "[a-z][a-z0-9-]{0,5}",
            "[1-9][0-9]{0,3}",
            "0\\.[0-9]{1,3}",
            Just(";".to_string()),
        ],
        0..30,
    )
    .prop_map(|parts| parts.concat())
}

/// Space separated atoms and parens; always lexes completely.
fn clean_source() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("(".to_string()),
            Just(")".to_string()),
            "[a-z][a-z0-9-]{0,5}",
            "[1-9][0-9]{0,3}",
            "0\\.[0-9]{1,3}",
        ],
        0..30,
    )
    .prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn test_rewind_restores_marked_offsets(input in "\\PC{0,20}", ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut reader = StringReader::new(&input);
        let len = input.chars().count();
        let mut offset = 0;
        let mut marks = Vec::new();

        for op in ops {
            match op {
                Op::Mark => {
                    prop_assert_eq!(reader.mark(), offset);
                    marks.push(offset);
                }
                Op::Read => {
                    let rune = reader.read();
                    if offset < len {
                        prop_assert_eq!(Some(rune), input.chars().nth(offset));
                        offset += 1;
                    } else {
                        prop_assert_eq!(rune, REPLACEMENT);
                    }
                }
                Op::Rewind => {
                    reader.rewind();
                    if let Some(mark) = marks.pop() {
                        offset = mark;
                    }
                }
                Op::Commit => {
                    reader.commit();
                    marks.pop();
                }
            }
            prop_assert_eq!(reader.offset(), offset);
            prop_assert_eq!(reader.marks(), marks.len());
            prop_assert_eq!(reader.eof(), offset >= len);
        }
    }

    #[test]
    fn test_reading_past_the_end_is_stable(input in "\\PC{0,10}", extra in 1usize..5) {
        let mut reader = StringReader::new(&input);
        let len = input.chars().count();
        for _ in 0..len {
            reader.read();
        }
        for _ in 0..extra {
            prop_assert_eq!(reader.peek(), REPLACEMENT);
            prop_assert_eq!(reader.read(), REPLACEMENT);
            prop_assert_eq!(reader.offset(), len);
        }
    }

    #[test]
    fn test_stream_ends_with_exactly_one_terminal(source in sexp_source()) {
        let (tokens, status) = sexp::tokenize(&source);
        let terminals = tokens.iter().filter(|t| t.typ == EOF || t.typ == ERR).count();
        prop_assert_eq!(terminals, 1);

        let last = tokens.last().unwrap();
        match status {
            LexStatus::Complete => prop_assert_eq!(&last.typ, &EOF),
            LexStatus::Failed { offset } => {
                prop_assert_eq!(&last.typ, &ERR);
                prop_assert_eq!(last.offset, offset);
            }
        }
    }

    #[test]
    fn test_complete_streams_cover_the_input(source in clean_source()) {
        let (tokens, status) = sexp::tokenize(&source);
        prop_assert!(status.is_complete());

        let rebuilt: String = tokens.iter().map(|t| t.value.as_str()).collect();
        prop_assert_eq!(&rebuilt, &source);

        let mut expected_offset = 0;
        for token in &tokens {
            prop_assert_eq!(token.offset, expected_offset);
            expected_offset = token.end();
        }
        prop_assert_eq!(expected_offset, source.chars().count());
    }

    #[test]
    fn test_first_consumer_shadows_the_rest(source in "[a-z()]{1,20}") {
        const ANY: TokenType = TokenType::new("ANY");
        let consumers: Vec<Box<dyn Consumer>> = vec![
            (|input: &mut dyn RuneReader| Some(Token::new(ANY, input.read().to_string()))).boxed(),
            sexp::consumers().remove(0),
        ];
        let mut tokens = Vec::new();
        let status = lex_static(&mut StringReader::new(&source), &mut tokens, &EOF, &ERR, &consumers);

        prop_assert!(status.is_complete());
        prop_assert_eq!(tokens.len(), source.chars().count() + 1);
        prop_assert!(tokens[..tokens.len() - 1].iter().all(|t| t.typ == ANY));
    }

    #[test]
    fn test_lexing_releases_every_mark(source in sexp_source()) {
        let mut reader = StringReader::new(&source);
        let mut tokens = Vec::new();
        sexp::lexer().lex(&mut reader, &mut tokens);
        prop_assert_eq!(reader.marks(), 0);
    }
}
