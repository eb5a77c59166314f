use super::*;

#[test]
fn interval_wraps() {
    assert_eq!(interval_index(0, 3000, 2), 0);
    assert_eq!(interval_index(2999, 3000, 2), 0);
    assert_eq!(interval_index(3000, 3000, 2), 1);
    assert_eq!(interval_index(6000, 3000, 2), 0);
    assert_eq!(interval_index(3600, 1200, 3), 0);
    assert_eq!(interval_index(10, 0, 3), 0);
}

#[test]
fn typewriter_reveals_scalar_values() {
    let text = "温柔，嘴角";
    assert_eq!(typewriter(text, 0, 100), "");
    assert_eq!(typewriter(text, 199, 100), "温");
    assert_eq!(typewriter(text, 300, 100), "温柔，");
    assert_eq!(typewriter(text, 10_000, 100), text);
}
