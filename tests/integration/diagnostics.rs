//! Transcript attribution against realistic analyzer output.

use modlens::diagnostics::ErrorAttributor;
use modlens::test_utils::{TranscriptBuilder, init_test_logging};

#[test]
fn attributes_errors_to_the_file_mentioned_after_them() {
    init_test_logging();
    let transcript = TranscriptBuilder::new()
        .line("analyzing archive shield-generator")
        .error(12, 4, "attempt to index a nil value")
        .error(31, 1, "unexpected symbol near ')'")
        .evaluating("shield/guard.lua")
        .error(7, 9, "bad argument #1 to 'pairs'")
        .mention("shield/overlay.lua")
        .line("analysis finished with 3 errors")
        .build();

    let mut attributor = ErrorAttributor::new();
    attributor.parse_errors(&transcript);

    assert_eq!(attributor.total_error_count(), 3);
    assert_eq!(
        attributor.files_with_errors(),
        vec!["shield/guard.lua", "shield/overlay.lua"]
    );

    let guard = attributor.errors_for_file("shield/guard.lua");
    assert_eq!(guard.len(), 2);
    assert_eq!(guard[0].line, 12);
    assert_eq!(guard[1].message, "unexpected symbol near ')'");

    let overlay = attributor.errors_for_file("shield/overlay.lua");
    assert_eq!(overlay.len(), 1);
    assert_eq!((overlay[0].line, overlay[0].column), (7, 9));
}

#[test]
fn transcript_without_markers_has_no_errors() {
    init_test_logging();
    let transcript = TranscriptBuilder::new()
        .line("analyzing archive")
        .evaluating("mod/entry.lua")
        .line("done")
        .build();

    let mut attributor = ErrorAttributor::new();
    attributor.parse_errors(&transcript);

    assert_eq!(attributor.total_error_count(), 0);
    assert!(attributor.errors_for_file("mod/entry.lua").is_empty());
}

#[test]
fn markers_without_mentions_default_to_entry_file() {
    init_test_logging();
    let transcript = TranscriptBuilder::new()
        .error(1, 1, "first")
        .error(2, 2, "second")
        .build();

    let mut attributor = ErrorAttributor::new().with_fallback("main.lua");
    attributor.parse_errors(&transcript);

    assert_eq!(attributor.files_with_errors(), vec!["main.lua"]);
    assert_eq!(attributor.errors_for_file("main.lua").len(), 2);
}

#[test]
fn query_by_short_form_finds_nested_index_key() {
    init_test_logging();
    let transcript = TranscriptBuilder::new()
        .error(5, 1, "oops")
        .evaluating("deep/nested/module.lua")
        .build();

    let mut attributor = ErrorAttributor::new();
    attributor.parse_errors(&transcript);

    assert!(attributor.has_errors("nested/module.lua"));
    assert_eq!(attributor.errors_for_file("module.lua").len(), 1);
}

#[test]
fn defensive_copies_do_not_alias_the_index() {
    init_test_logging();
    let transcript = TranscriptBuilder::new().error(1, 1, "oops").evaluating("a.lua").build();

    let mut attributor = ErrorAttributor::new();
    attributor.parse_errors(&transcript);

    let mut copy = attributor.errors_for_file("a.lua");
    copy.clear();
    assert_eq!(attributor.errors_for_file("a.lua").len(), 1);
}

#[test]
fn garbage_input_degrades_to_empty_index() {
    init_test_logging();
    let mut attributor = ErrorAttributor::new();
    attributor.parse_errors("\u{0}\u{1}[[[:::]]] not a transcript [x:y] nope");
    assert_eq!(attributor.total_error_count(), 0);
}
