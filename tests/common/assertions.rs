//! Domain-specific assertion macros for glog harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that show the
//! whole rendered output or request, not just the mismatching value.

/// Assert that rendered output contains `needle` on exactly `n` lines.
///
/// ```rust
/// assert_line_count!(output, "sshd(5) fail", 1);
/// ```
#[macro_export]
macro_rules! assert_line_count {
    ($output:expr, $needle:expr, $n:expr) => {{
        let output: &str = &$output;
        let needle: &str = $needle;
        let actual = output.lines().filter(|l| l.contains(needle)).count();
        if actual != $n {
            panic!(
                "assert_line_count! failed: {:?} on {} lines, expected {}\n--- output ---\n{}",
                needle, actual, $n, output
            );
        }
    }};
}

/// Assert that a recorded request body has `key` set to `value`.
///
/// ```rust
/// assert_request_field!(requests[0], "sin", 499);
/// ```
#[macro_export]
macro_rules! assert_request_field {
    ($request:expr, $key:expr, $value:expr) => {{
        let request: &serde_json::Value = &$request;
        let key: &str = $key;
        let expected = serde_json::json!($value);
        match request.get(key) {
            Some(actual) => pretty_assertions::assert_eq!(
                actual, &expected,
                "request field {:?} in {}", key, request
            ),
            None => panic!(
                "assert_request_field! failed: {:?} missing from request {}",
                key, request
            ),
        }
    }};
}

/// Assert that a recorded request body does not carry `key` at all.
#[macro_export]
macro_rules! assert_request_omits {
    ($request:expr, $key:expr) => {{
        let request: &serde_json::Value = &$request;
        let key: &str = $key;
        if request.get(key).is_some() {
            panic!(
                "assert_request_omits! failed: {:?} present in request {}",
                key, request
            );
        }
    }};
}
