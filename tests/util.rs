/// Check that two floats differ by at most 5e-5 times the smaller magnitude, in either direction.
#[macro_export]
macro_rules! assert_floats_near_equal {
    ($expected:expr, $actual:expr, $msg:expr) => {{
        let expected: f64 = $expected;
        let actual: f64 = $actual;
        let scale = expected.abs().min(actual.abs());
        let diff = (expected - actual).abs();
        assert!(diff <= scale * 0.00005, "{}: expected {}, got {}", $msg, expected, actual);
    }};
}
