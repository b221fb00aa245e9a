
mod rejections;

/// Number of quickcheck cases per property.
pub(crate) fn quickcheck_tests() -> u64 {
    if cfg!(any(miri, feature = "test-fast")) {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}
