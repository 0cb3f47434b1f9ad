use jdi_core::document::{open_document, output_path, write_document};
use jdi_core::DocError;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

#[test]
fn writes_markdown_next_to_source() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("index.js");
    {
        let mut f = File::create(&source).unwrap();
        write!(
            f,
            "#!/usr/bin/env node\n// # `index.js`\n'use strict' // jdi-disable-line\nconst fs = require('fs')\n\n// ## done\n"
        )
        .unwrap();
    }

    let written = write_document(&source, "js").expect("Should write document");

    assert_eq!(written.source, source);
    assert_eq!(written.destination, tmp.path().join("index.js.md"));
    let md = fs::read_to_string(&written.destination).unwrap();
    assert_eq!(written.bytes_written, md.len() as u64);
    assert!(
        md.starts_with("# `index.js`\n```js\nconst fs = require('fs')\n\n```\n## done\n------------------------\nGenerated _"),
        "unexpected markdown:\n{md}"
    );
    assert!(md.ends_with("_ from [&#x24C8; index.js](index.js \"View in source\")\n\n"));
}

#[test]
fn crlf_sources_are_split_into_clean_lines() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("win.ts");
    fs::write(&source, "// title\r\nlet a = 1\r\n").unwrap();

    let lines: Vec<String> = open_document(&source, "js")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(&lines[..4], &["title", "```ts", "let a = 1", "```"]);
}

#[test]
fn extensionless_source_uses_default_language() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("jdi");
    fs::write(&source, "run()\n").unwrap();

    let written = write_document(&source, "sh").unwrap();
    let md = fs::read_to_string(written.destination).unwrap();
    assert!(md.starts_with("```sh\nrun()\n```\n"), "unexpected markdown:\n{md}");
}

#[test]
fn rewriting_replaces_previous_output() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("a.js");
    fs::write(output_path(&source), "stale content that is much longer than the new one\n".repeat(20)).unwrap();
    fs::write(&source, "// fresh\n").unwrap();

    let written = write_document(&source, "js").unwrap();
    let md = fs::read_to_string(written.destination).unwrap();
    assert!(md.starts_with("fresh\n"));
    assert!(!md.contains("stale"));
}

#[test]
fn missing_source_creates_no_output() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("missing.js");

    let err = write_document(&source, "js").unwrap_err();

    assert!(matches!(err, DocError::Io(_)), "got {err:?}");
    assert!(!output_path(&source).exists());
}

#[test]
fn invalid_utf8_reports_the_line() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("bin.js");
    fs::write(&source, b"// ok\n\xff\xfe\n").unwrap();

    let err = write_document(&source, "js").unwrap_err();

    match err {
        DocError::InvalidUtf8 { path, line } => {
            assert_eq!(path, source);
            assert_eq!(line, 2);
        }
        other => panic!("Unexpected error {other:?}"),
    }
}

#[test]
fn leading_byte_order_mark_does_not_hide_the_first_comment() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("bom.js");
    fs::write(&source, "\u{feff}// # Title\nx()\n").unwrap();

    let lines: Vec<String> = open_document(&source, "js")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(&lines[..4], &["# Title", "```js", "x()", "```"]);
    assert!(!lines.iter().any(|l| l.contains('\u{feff}')));
}

#[test]
fn byte_order_mark_before_shebang_still_drops_it() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("cli");
    fs::write(&source, "\u{feff}#!/usr/bin/env node\n// usage\n").unwrap();

    let written = write_document(&source, "js").unwrap();
    let md = fs::read_to_string(written.destination).unwrap();
    assert!(md.starts_with("usage\n------------------------\n"), "unexpected markdown:\n{md}");
}

#[test]
fn byte_order_mark_is_only_stripped_from_the_first_line() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("mid.js");
    fs::write(&source, "a()\n\u{feff}b()\n").unwrap();

    let lines: Vec<String> = open_document(&source, "js")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(&lines[..3], &["```js", "a()", "\u{feff}b()"]);
}
