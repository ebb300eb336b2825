//! Unit tests for the segmenter against realistic log text

use logseg::OrphanPolicy;

use crate::helpers::{group_texts, load_fixture, segment_all, JAVA_PATTERN};

#[test]
fn java_log_groups_keep_stack_traces_with_their_entry() {
    let input = load_fixture("java_app.log");
    let groups = segment_all(&input, JAVA_PATTERN, 3, OrphanPolicy::Drop);

    assert_eq!(groups.len(), 3);
    assert_eq!(
        groups.iter().map(|g| g.entry_count()).collect::<Vec<_>>(),
        vec![3, 3, 2]
    );

    let texts = group_texts(&groups);
    assert!(texts[1].starts_with("2024-03-01 10:00:01,517 ERROR"));
    assert!(texts[1].contains("\tat java.base/java.lang.Thread.run(Thread.java:833)\n"));
    assert!(texts[2].contains("Caused by: java.sql.SQLTimeoutException"));
}

#[test]
fn java_log_banner_is_dropped_by_default() {
    let input = load_fixture("java_app.log");
    let groups = segment_all(&input, JAVA_PATTERN, 500, OrphanPolicy::Drop);

    assert_eq!(groups.len(), 1);
    let text = &group_texts(&groups)[0];
    assert!(!text.contains("Starting service"));

    let banner_end = input.find("2024-03-01").unwrap();
    assert_eq!(text, &input[banner_end..]);
}

#[test]
fn java_log_banner_becomes_preamble_group() {
    let input = load_fixture("java_app.log");
    let groups = segment_all(&input, JAVA_PATTERN, 500, OrphanPolicy::Preamble);

    assert_eq!(groups.len(), 2);
    assert!(groups[0].is_preamble());
    assert_eq!(groups[0].line_count(), 2);
    assert_eq!(groups[0].entry_count(), 0);
    assert_eq!(groups[1].entry_count(), 8);
    assert_eq!(group_texts(&groups).concat(), input);
}

#[test]
fn continuation_does_not_count_as_entry() {
    let groups = segment_all("A1\nB\nA2\n", "A", 2, OrphanPolicy::Drop);
    assert_eq!(group_texts(&groups), vec!["A1\nB\nA2\n"]);
    assert_eq!(groups[0].entry_count(), 2);
    assert_eq!(groups[0].line_count(), 3);
}

#[test]
fn three_entries_with_cap_two_split_into_two_groups() {
    let groups = segment_all("E1\nE2\nE3\n", "E", 2, OrphanPolicy::Drop);
    assert_eq!(group_texts(&groups), vec!["E1\nE2\n", "E3\n"]);
}

#[test]
fn first_line_numbers_are_one_based() {
    let groups = segment_all("x\nE1\nE2\nE3\n", "E", 2, OrphanPolicy::Drop);
    assert_eq!(groups[0].first_line(), 2);
    assert_eq!(groups[1].first_line(), 4);
}

#[test]
fn pattern_is_anchored_at_line_start() {
    let groups = segment_all("ERROR a\nnot an ERROR\nERROR b\n", "ERROR", 1, OrphanPolicy::Drop);
    assert_eq!(group_texts(&groups), vec!["ERROR a\nnot an ERROR\n", "ERROR b\n"]);
}

#[test]
fn alternation_is_anchored_as_a_whole() {
    let groups = segment_all("INFO a\nx WARN b\nWARN c\n", "INFO|WARN", 5, OrphanPolicy::Drop);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].entry_count(), 2);
}

#[test]
fn crlf_and_missing_final_newline_are_preserved() {
    let input = "E1\r\n  more\r\nE2 last";
    let groups = segment_all(input, "E", 10, OrphanPolicy::Drop);
    assert_eq!(group_texts(&groups).concat(), input);
}

#[test]
fn empty_input_yields_no_groups() {
    assert!(segment_all("", "E", 2, OrphanPolicy::Drop).is_empty());
    assert!(segment_all("", "E", 2, OrphanPolicy::Preamble).is_empty());
}

#[test]
fn unmatched_input_under_preamble_is_one_group() {
    let groups = segment_all("a\nb\n", "E", 2, OrphanPolicy::Preamble);
    assert_eq!(group_texts(&groups), vec!["a\nb\n"]);
    assert!(groups[0].is_preamble());
}

#[test]
fn corrupt_first_entry_is_not_dropped_as_orphan() {
    let input: &[u8] = b"x\xff ERROR boom\n  detail\ny ERROR again\n";
    let pattern = logseg::BoundaryPattern::new(r".*ERROR").unwrap();
    let groups: Vec<_> = logseg::Segmenter::new(input, pattern, 1)
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].to_bytes(), b"x\xff ERROR boom\n  detail\n");
    assert_eq!(groups[1].to_bytes(), b"y ERROR again\n");
}

#[test]
fn pattern_ending_in_dollar_matches_crlf_lines() {
    let input = "=== run 1 ===\r\nstep a\r\n=== run 2 ===\r\nstep b";
    let groups = segment_all(input, r"=== .* ===$", 1, OrphanPolicy::Drop);
    assert_eq!(
        group_texts(&groups),
        vec!["=== run 1 ===\r\nstep a\r\n", "=== run 2 ===\r\nstep b"]
    );
}
