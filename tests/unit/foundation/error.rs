use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ImgshError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        ImgshError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        ImgshError::bind("a.png", anyhow::anyhow!("missing"))
            .to_string()
            .starts_with("read 'a.png':")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ImgshError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_render_and_encode_are_recoverable() {
    assert!(ImgshError::render("x").is_recoverable());
    assert!(ImgshError::encode("x").is_recoverable());
    assert!(!ImgshError::MissingSource.is_recoverable());
    assert!(!ImgshError::sink("out.png", std::io::Error::other("denied")).is_recoverable());
}

#[test]
fn exit_codes_are_distinct_per_category() {
    let outcomes = [
        ExitOutcome::Success,
        ExitOutcome::Usage,
        ExitOutcome::ScriptOpen,
        ExitOutcome::OutputOpen,
        ExitOutcome::MissingSource,
        ExitOutcome::BindFailed,
        ExitOutcome::Failure,
    ];
    let mut codes: Vec<u8> = outcomes.iter().map(|o| o.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), outcomes.len());
    assert_eq!(ExitOutcome::Success.code(), 0);
}

#[test]
fn fatal_errors_classify_to_their_outcome() {
    assert_eq!(
        ExitOutcome::from_error(&ImgshError::bind("x", anyhow::anyhow!("nope"))),
        ExitOutcome::BindFailed
    );
    assert_eq!(
        ExitOutcome::from_error(&ImgshError::sink("w.png", std::io::Error::other("ro"))),
        ExitOutcome::OutputOpen
    );
    assert_eq!(
        ExitOutcome::from_error(&ImgshError::MissingSource),
        ExitOutcome::MissingSource
    );
    assert_eq!(
        ExitOutcome::from_error(&ImgshError::Script(std::io::Error::other("eio"))),
        ExitOutcome::Failure
    );
}
