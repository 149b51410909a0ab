use leftright_core::layouts::{Hand, KnownLayout, LayoutRegistry};
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

#[rstest]
#[case("qwerty", 'a', Hand::Left)]
#[case("qwerty", 'J', Hand::Right)]
#[case("qwerty", ' ', Hand::Neutral)]
#[case("qwerty", 'ü', Hand::Neutral)]
#[case("qwerty", '\n', Hand::Neutral)]
#[case("dvorak", 'a', Hand::Left)]
#[case("dvorak", 't', Hand::Right)]
#[case("colemak", 'e', Hand::Right)]
#[case("colemak", 'S', Hand::Left)]
#[case("azerty", 'q', Hand::Left)]
#[case("azerty", 'm', Hand::Right)]
fn test_classification(#[case] layout: &str, #[case] c: char, #[case] expected: Hand) {
    let reg = LayoutRegistry::new_with_defaults();
    assert_eq!(reg.require(layout).unwrap().classify(c), expected);
}

#[test]
fn test_baselines() {
    assert_eq!(KnownLayout::Qwerty.to_layout().baseline.unwrap().left, 56);
    assert_eq!(KnownLayout::Dvorak.to_layout().baseline.unwrap().right, 56);
    assert!(KnownLayout::Azerty.to_layout().baseline.is_none());
}

#[test]
fn test_unknown_layout_is_an_error() {
    let reg = LayoutRegistry::new_with_defaults();
    assert!(reg.require("bepo").is_err());
}

#[test]
fn test_load_and_merge_custom_layout() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"id": "workman", "name": "Workman", "left_hand": "QDRWBASHTGZXMCV", "right_hand": "jfupyneoikl", "baseline": {{"left": 50, "right": 50}}}}]"#
    )
    .unwrap();

    let loaded = LayoutRegistry::load_from_file(file.path()).unwrap();
    let mut reg = LayoutRegistry::new_with_defaults();
    reg.merge(loaded);

    let workman = reg.require("workman").unwrap();
    assert_eq!(workman.name, "Workman");
    assert_eq!(workman.classify('q'), Hand::Left);
    assert_eq!(workman.classify('N'), Hand::Right);
    assert_eq!(reg.ids().count(), 5);
}

#[test]
fn test_load_rejects_bad_ids() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"id": "Bad Id", "name": "x", "left_hand": "a", "right_hand": "b"}}]"#
    )
    .unwrap();
    assert!(LayoutRegistry::load_from_file(file.path()).is_err());
}

#[test]
fn test_load_missing_file() {
    assert!(LayoutRegistry::load_from_file("/definitely/not/here.json").is_err());
}
