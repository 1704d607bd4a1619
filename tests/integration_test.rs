//! Integration tests for strbuf.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use strbuf::error::{BufferError, ConversionError, Error};
use strbuf::{BufferList, ByteBuffer};

/// Asserts that the byte after the content is the zero sentinel.
fn assert_terminated(buffer: &ByteBuffer) {
    let with_nul = buffer.as_bytes_with_nul().expect("buffer is live");
    assert_eq!(with_nul.len(), buffer.len() + 1);
    assert_eq!(with_nul[buffer.len()], 0);
}

#[test]
fn test_buffer_lifecycle() {
    let mut buffer = ByteBuffer::from_bytes(b"hello");
    assert_eq!(buffer.as_bytes(), b"hello");
    assert_eq!(buffer.capacity(), 5);
    assert_terminated(&buffer);

    buffer.release();
    assert!(buffer.is_released());
    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.capacity(), 0);

    buffer.release();
    assert!(buffer.is_released());
    assert_eq!(buffer, {
        let mut other = ByteBuffer::from_bytes(b"x");
        other.release();
        other
    });
}

#[test]
fn test_edit_sequence_keeps_sentinel() {
    let mut buffer = ByteBuffer::with_capacity(4);
    buffer.append_bytes(b"world").expect("append");
    assert_terminated(&buffer);
    buffer.insert_bytes(0, b"hello ").expect("insert");
    assert_terminated(&buffer);
    buffer.push_byte(b'!').expect("push");
    assert_terminated(&buffer);
    buffer.remove_range(5, 10).expect("remove");
    assert_eq!(buffer.as_bytes(), b"hello!");
    assert_terminated(&buffer);
    buffer.resize(3);
    assert_eq!(buffer.as_bytes(), b"hel");
    assert_terminated(&buffer);
}

#[test]
fn test_c_string_view() {
    let buffer = ByteBuffer::from_bytes(b"interop");
    let c_str = buffer.as_c_str().expect("no interior nul");
    assert_eq!(c_str.to_bytes(), b"interop");

    let round_trip = ByteBuffer::from_c_str(c_str);
    assert_eq!(round_trip, buffer);

    let with_nul = ByteBuffer::from_bytes(b"a\0b");
    assert_eq!(
        with_nul.as_c_str(),
        Err(Error::Buffer(BufferError::InteriorNul { offset: 1 }))
    );
}

#[test]
fn test_subrange_and_find() {
    let source = ByteBuffer::from_bytes(b"key=value;key=other");
    let eq = source.find(b"=", 0).expect("has =");
    let key = ByteBuffer::from_subrange(&source, 0, eq - 1).expect("range");
    assert_eq!(key.as_bytes(), b"key");
    assert_eq!(source.find_last(b"key", 0).expect("has key"), 10);
    assert_eq!(
        source.find(b"missing", 0),
        Err(Error::Buffer(BufferError::NotFound))
    );
}

#[test]
fn test_numeric_round_trip() {
    assert_eq!(ByteBuffer::from_i64(42).to_i64(), Ok(42));
    assert!(matches!(
        ByteBuffer::from_bytes(b"007").to_i64(),
        Err(Error::Conversion(ConversionError::Int { .. }))
    ));
    assert!(ByteBuffer::from_bytes(b"-3.14").to_f64().is_ok());
    for rejected in [&b"3.14.1"[..], &b"abc"[..], &b"."[..]] {
        assert!(ByteBuffer::from_bytes(rejected).to_f64().is_err());
    }
}

#[test]
fn test_compare_and_order() {
    let mut words: Vec<ByteBuffer> = ["pear", "apple", "fig"]
        .into_iter()
        .map(ByteBuffer::from)
        .collect();
    words.sort();
    let sorted: Vec<String> = words.iter().map(ToString::to_string).collect();
    assert_eq!(sorted, ["apple", "fig", "pear"]);

    let released = ByteBuffer::default();
    assert_eq!(
        words[0].compare(&released),
        Err(Error::Buffer(BufferError::Compare))
    );
}

mod tokenize_tests {
    use strbuf::tokenize::{Tokenizer, split};
    use strbuf::{BufferList, ByteBuffer};

    fn tokens(list: &BufferList) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_csv_examples() {
        let cases: [(&str, &[&str]); 5] = [
            ("a,b,c", &["a", "b", "c"]),
            ("a,,b", &["a", "", "b"]),
            ("a,", &["a", ""]),
            ("\"a,b\",c", &["a,b", "c"]),
            ("", &[""]),
        ];
        for (input, expected) in cases {
            let list = split(&ByteBuffer::from(input), b",", b"\"").expect("split");
            assert_eq!(tokens(&list), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_tokenizing_trimmed_fields() {
        let tokenizer = Tokenizer::new().with_delimiters(b";");
        let list = tokenizer
            .tokenize(&ByteBuffer::from(" a ; \"b;c\" ;d"))
            .expect("tokenize");
        let mut trimmed = Vec::new();
        for mut token in list {
            token.trim().expect("trim");
            trimmed.push(token.to_string());
        }
        assert_eq!(trimmed, ["a", "b;c", "d"]);
    }
}

mod io_tests {
    use std::io::Cursor;
    use strbuf::io::{FileReader, INITIAL_LINE_WINDOW, LineReader};
    use strbuf::{BufferList, ByteBuffer, Tokenizer};
    use tempfile::TempDir;

    #[test]
    fn test_read_and_split_csv_file() {
        let temp_dir = TempDir::new().expect("temp dir");
        let file_path = temp_dir.path().join("people.csv");
        std::fs::write(&file_path, "name,city\r\n\"Doe, J\",Oslo\r\n").expect("write");

        let lines = BufferList::from_path(&file_path).expect("read lines");
        assert_eq!(lines.len(), 2);

        let tokenizer = Tokenizer::new().with_delimiters(b",\r");
        let row = tokenizer
            .tokenize(lines.get(1).expect("second line"))
            .expect("tokenize");
        let fields: Vec<String> = row.iter().map(ToString::to_string).collect();
        assert_eq!(fields, ["Doe, J", "Oslo", ""]);
    }

    #[test]
    fn test_file_reader_and_line_reader_agree() {
        let temp_dir = TempDir::new().expect("temp dir");
        let file_path = temp_dir.path().join("mixed.txt");
        let long = "y".repeat(INITIAL_LINE_WINDOW * 3);
        std::fs::write(&file_path, format!("short\n\n{long}\ntail")).expect("write");

        let whole = FileReader::open(&file_path)
            .expect("open")
            .read_lines()
            .expect("read");
        let streamed: Vec<ByteBuffer> = LineReader::open(&file_path)
            .expect("open")
            .collect::<strbuf::Result<_>>()
            .expect("stream");
        assert_eq!(whole.as_slice(), streamed.as_slice());
        assert_eq!(streamed.len(), 4);
    }

    #[test]
    fn test_from_reader_empty() {
        let lines = BufferList::from_reader(Cursor::new(Vec::new())).expect("read");
        assert!(lines.is_empty());
    }
}

mod property_tests {
    use proptest::prelude::*;
    use strbuf::tokenize::split;
    use strbuf::{BufferList, ByteBuffer};

    proptest! {
        #[test]
        fn construct_then_read_back(bytes in proptest::collection::vec(any::<u8>(), 0..200)) {
            let buffer = ByteBuffer::from_bytes(&bytes);
            prop_assert_eq!(buffer.as_bytes(), bytes.as_slice());
            prop_assert_eq!(buffer.as_bytes_with_nul().unwrap().last(), Some(&0));
        }

        #[test]
        fn remove_then_reinsert_restores(
            bytes in proptest::collection::vec(any::<u8>(), 1..100),
            a in any::<proptest::sample::Index>(),
            b in any::<proptest::sample::Index>(),
        ) {
            let (start, end) = {
                let (x, y) = (a.index(bytes.len()), b.index(bytes.len()));
                (x.min(y), x.max(y))
            };
            let mut buffer = ByteBuffer::from_bytes(&bytes);
            buffer.remove_range(start, end).unwrap();
            buffer.insert_bytes(start, &bytes[start..=end]).unwrap();
            prop_assert_eq!(buffer.as_bytes(), bytes.as_slice());
            prop_assert_eq!(buffer.as_bytes_with_nul().unwrap()[bytes.len()], 0);
        }

        #[test]
        fn tokens_rejoin_to_source(fields in proptest::collection::vec("[a-z]{0,6}", 1..8)) {
            let line = fields.join(",");
            let list = split(&ByteBuffer::from(line.as_str()), b",", b"\"").unwrap();
            let rejoined: Vec<String> = list.iter().map(ToString::to_string).collect();
            prop_assert_eq!(rejoined, fields);
        }

        #[test]
        fn list_capacity_covers_length(count in 1usize..64) {
            let mut list = BufferList::new();
            for i in 0..count {
                list.push_owned(ByteBuffer::from_i64(i64::try_from(i).unwrap())).unwrap();
            }
            prop_assert_eq!(list.len(), count);
            prop_assert!(list.capacity() >= count);
            prop_assert!(list.capacity().is_power_of_two());
        }
    }
}

/// CLI command integration tests.
mod cli_tests {
    use strbuf::cli::commands::execute;
    use strbuf::cli::parser::{Cli, Commands};
    use tempfile::TempDir;

    /// Helper to create a CLI struct with text output.
    fn make_cli(command: Commands) -> Cli {
        Cli {
            verbose: false,
            format: "text".to_string(),
            command,
        }
    }

    /// Helper to create a CLI struct with JSON output.
    fn make_cli_json(command: Commands) -> Cli {
        Cli {
            verbose: false,
            format: "json".to_string(),
            command,
        }
    }

    #[test]
    fn test_cmd_split_file_json() {
        let temp_dir = TempDir::new().expect("temp dir");
        let file_path = temp_dir.path().join("rows.csv");
        std::fs::write(&file_path, "a,b\nc,\"d,e\"\n").expect("write");

        let cli = make_cli_json(Commands::Split {
            text: None,
            file: Some(file_path),
            delimiters: ",".to_string(),
            toggles: "\"".to_string(),
            max_token_len: None,
        });
        let output = execute(&cli).expect("split output");
        let rows: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert_eq!(rows[1]["line"], 2);
        assert_eq!(rows[1]["tokens"], serde_json::json!(["c", "d,e"]));
    }

    #[test]
    fn test_cmd_parse_float_rejects() {
        let cli = make_cli(Commands::Parse {
            value: "1.2.3".to_string(),
            float: true,
        });
        assert!(execute(&cli).is_err());
    }

    #[test]
    fn test_cmd_compare_equal() {
        let cli = make_cli(Commands::Compare {
            left: "same".to_string(),
            right: "same".to_string(),
        });
        assert_eq!(execute(&cli).expect("compare"), "same == same\n");
    }
}
