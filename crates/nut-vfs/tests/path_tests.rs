use nut_vfs::VfsPath;
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case("a/../b", "/b")]
#[case("../a", "/a")]
#[case("/a/b/../../c", "/c")]
#[case("a\\..\\b", "/b")]
#[case("a/./b//c", "/a/b/c")]
#[case("/nuts/", "/nuts")]
#[case("", "/")]
#[case("..", "/")]
fn test_normalization(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(VfsPath::new(input).as_str(), expected);
}

#[rstest]
#[case("/nuts", "a.nut", "/nuts/a.nut")]
#[case("/nuts", "../conf/x.json", "/conf/x.json")]
#[case("/nuts/sub", "/abs/y.nut", "/abs/y.nut")]
#[case("/", "a.nut", "/a.nut")]
#[case("/nuts", "lib\\b.nut", "/nuts/lib/b.nut")]
fn test_join(#[case] base: &str, #[case] segment: &str, #[case] expected: &str) {
    assert_eq!(VfsPath::new(base).join(segment).as_str(), expected);
}

#[rstest]
#[case("/nuts/demo.nuts.json", Some("json"), Some("demo.nuts"))]
#[case("/nuts/demo", None, Some("demo"))]
#[case("/conf/.hidden", None, Some(".hidden"))]
#[case("/", None, None)]
fn test_decomposition(
    #[case] input: &str,
    #[case] ext: Option<&str>,
    #[case] stem: Option<&str>,
) {
    let path = VfsPath::new(input);
    assert_eq!(path.extension(), ext);
    assert_eq!(path.stem(), stem);
}

#[test]
fn test_dir_of_root_is_root() {
    assert_eq!(VfsPath::root().dir(), VfsPath::root());
    assert_eq!(VfsPath::new("/nuts/a.nut").dir().as_str(), "/nuts");
}

proptest! {
    #[test]
    fn test_normalization_invariants(s in "\\PC*") {
        let path = VfsPath::new(&s);
        let as_str = path.as_str();

        prop_assert!(as_str.starts_with('/'));
        prop_assert!(!as_str.contains('\\'));
        prop_assert!(!as_str.contains("//"));
        prop_assert!(as_str == "/" || !as_str.ends_with('/'));

        // Normalizing twice changes nothing
        prop_assert_eq!(VfsPath::new(as_str), path.clone());
    }

    #[test]
    fn test_join_stays_normalized(a in "[a-z./]{0,12}", b in "[a-z./]{0,12}") {
        let joined = VfsPath::new(&a).join(&b);
        prop_assert!(!joined.as_str().contains("//"));
        prop_assert_eq!(VfsPath::new(joined.as_str()), joined);
    }
}
