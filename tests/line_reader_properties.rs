// tests/line_reader_properties.rs

//! Property test for the line splitter: every non-blank line is delivered to
//! the sink exactly once, in order, whether or not the final line carries a
//! terminator.

use proptest::prelude::*;

use devserve::exec::forward_lines;
use devserve_test_utils::builders::collecting_sink;

proptest! {
    #[test]
    fn every_nonblank_line_arrives_once_in_order(
        lines in proptest::collection::vec("[ -~]{0,20}", 0..32),
        terminated in proptest::bool::ANY,
    ) {
        let mut input = lines.join("\n");
        if terminated && !input.is_empty() {
            input.push('\n');
        }

        let expected: Vec<String> = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .cloned()
            .collect();

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("build test runtime");

        let (sink, captured) = collecting_sink();
        rt.block_on(async {
            forward_lines(input.as_bytes(), sink.as_ref())
                .await
                .expect("reading from a byte slice cannot fail");
        });

        prop_assert_eq!(&*captured.lock().unwrap(), &expected);
    }
}
