// tests/sink_format.rs

use devserve::sink::format_line;
use devserve::types::LineFormat;
use devserve_test_utils::init_tracing;

#[test]
fn plain_lines_pass_through_untouched() {
    init_tracing();
    assert_eq!(format_line(LineFormat::Plain, "  raw line  "), "  raw line  ");
}

#[test]
fn json_lines_are_pretty_printed() {
    init_tracing();

    let rendered = format_line(LineFormat::Json, r#"{"level":"info","msg":"serving"}"#);
    assert!(rendered.contains("\"level\": \"info\""));
    assert!(rendered.contains("\"msg\": \"serving\""));
    assert!(rendered.contains('\n'), "pretty output spans multiple lines");
}

/// A line that fails to parse must fall back to the raw text; a formatter
/// failure never costs us the line.
#[test]
fn invalid_json_falls_back_to_the_raw_line() {
    init_tracing();
    assert_eq!(
        format_line(LineFormat::Json, "plain text, not json"),
        "plain text, not json"
    );
}
