use super::*;

#[test]
fn splits_on_any_whitespace_run() {
    assert_eq!(
        tokenize("crop\t0  0 10   10"),
        Line::Command(vec!["crop", "0", "0", "10", "10"])
    );
}

#[test]
fn hash_and_slash_comments_produce_no_fields() {
    assert_eq!(tokenize("# a comment"), Line::Comment);
    assert_eq!(tokenize("// another"), Line::Comment);
    assert_eq!(tokenize("   #indented"), Line::Comment);
    assert!(tokenize("#").fields().is_empty());
}

#[test]
fn single_slash_is_not_a_comment() {
    assert_eq!(tokenize("/ blur"), Line::Command(vec!["/", "blur"]));
}

#[test]
fn blank_and_whitespace_only_lines_are_blank() {
    assert_eq!(tokenize(""), Line::Blank);
    assert_eq!(tokenize(" \t  "), Line::Blank);
}

#[test]
fn quotes_are_ordinary_characters() {
    assert_eq!(
        tokenize("read \"my file.png\""),
        Line::Command(vec!["read", "\"my", "file.png\""])
    );
}

#[test]
fn trailing_comment_marker_stays_a_field() {
    assert_eq!(
        tokenize("blur 2 # soft"),
        Line::Command(vec!["blur", "2", "#", "soft"])
    );
}
