//! Tests for project graph resolution

use std::sync::Arc;

use nut_assets::{AssetsManager, Error, ProjectGraph, ProjectResolver, VisitedSets};
use nut_vfs::{ErrorCode, MemoryFs, VfsPath};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn paths(items: &[&str]) -> Vec<VfsPath> {
    items.iter().map(VfsPath::new).collect()
}

fn demo_fs() -> MemoryFs {
    MemoryFs::new()
        .with_file(
            "/nuts/demo.nuts.json",
            r#"{"files":["a.nut", {"include":"lib.nuts.json"}]}"#,
        )
        .with_file("/nuts/lib.nuts.json", r#"{"files":["b.nut"]}"#)
        .with_file("/nuts/a.nut", "// a")
        .with_file("/nuts/b.nut", "// b")
}

#[test]
fn test_demo_project_resolves_in_discovery_order() {
    let mut manager = AssetsManager::new(Arc::new(demo_fs()));
    manager.set_project_name("demo");

    let graph = manager.read_project_complete().expect("demo project should resolve");

    assert_eq!(graph.project_file_name, VfsPath::new("/nuts/demo.nuts.json"));
    assert_eq!(graph.files, paths(&["/nuts/a.nut", "/nuts/b.nut"]));
    assert_eq!(graph.file_contents, vec!["// a", "// b"]);
    assert!(graph.is_loaded());
}

#[test]
fn test_cyclic_includes_terminate() {
    let fs = MemoryFs::new()
        .with_file("/nuts/a.nuts.json", r#"{"files":["a1.nut", {"include":"b.nuts.json"}, "a2.nut"]}"#)
        .with_file("/nuts/b.nuts.json", r#"{"files":["b1.nut", {"include":"A.NUTS.JSON"}]}"#)
        .with_file("/nuts/a1.nut", "")
        .with_file("/nuts/a2.nut", "")
        .with_file("/nuts/b1.nut", "");

    let graph = ProjectResolver::new(&fs)
        .resolve(&VfsPath::new("/nuts/a.nuts.json"))
        .unwrap();

    assert_eq!(
        graph.files,
        paths(&["/nuts/a1.nut", "/nuts/b1.nut", "/nuts/a2.nut"])
    );
}

#[test]
fn test_duplicate_entries_are_collapsed() {
    let fs = MemoryFs::new()
        .with_file(
            "/nuts/p.nuts.json",
            r#"{"files":["a.nut", "./a.nut", "A.NUT", "sub/../a.nut", "b.nut"]}"#,
        )
        .with_file("/nuts/a.nut", "")
        .with_file("/nuts/b.nut", "");

    let graph = ProjectResolver::new(&fs)
        .resolve(&VfsPath::new("/nuts/p.nuts.json"))
        .unwrap();

    assert_eq!(graph.files, paths(&["/nuts/a.nut", "/nuts/b.nut"]));
}

#[test]
fn test_diamond_include_lists_shared_file_once() {
    let fs = MemoryFs::new()
        .with_file(
            "/nuts/top.nuts.json",
            r#"{"files":[{"include":["left.nuts.json", "right.nuts.json"]}]}"#,
        )
        .with_file("/nuts/left.nuts.json", r#"{"files":["shared.nut", "left.nut"]}"#)
        .with_file("/nuts/right.nuts.json", r#"{"files":["right.nut", "shared.nut"]}"#)
        .with_file("/nuts/shared.nut", "")
        .with_file("/nuts/left.nut", "")
        .with_file("/nuts/right.nut", "");

    let graph = ProjectResolver::new(&fs)
        .resolve(&VfsPath::new("/nuts/top.nuts.json"))
        .unwrap();

    assert_eq!(
        graph.files,
        paths(&["/nuts/shared.nut", "/nuts/left.nut", "/nuts/right.nut"])
    );
}

#[test]
fn test_includes_resolve_relative_to_their_descriptor() {
    let fs = MemoryFs::new()
        .with_file("/nuts/app.nuts.yaml", "files:\n  - include: lib/lib.nuts.json\n")
        .with_file("/nuts/lib/lib.nuts.json", r#"{"files":["util.nut", "../main.nut"]}"#)
        .with_file("/nuts/lib/util.nut", "")
        .with_file("/nuts/main.nut", "");

    let graph = ProjectResolver::new(&fs)
        .resolve(&VfsPath::new("/nuts/app.nuts.yaml"))
        .unwrap();

    assert_eq!(graph.files, paths(&["/nuts/lib/util.nut", "/nuts/main.nut"]));
}

#[test]
fn test_single_nut_root() {
    let fs = MemoryFs::new().with_file("/nuts/tool.nut", "print(1)");
    let graph = ProjectResolver::new(&fs)
        .resolve(&VfsPath::new("/nuts/tool.nut"))
        .unwrap();

    assert_eq!(
        graph,
        ProjectGraph {
            project_file_name: VfsPath::new("/nuts/tool.nut"),
            files: paths(&["/nuts/tool.nut"]),
            file_contents: Vec::new(),
        }
    );
}

#[test]
fn test_missing_root_is_not_found() {
    let err = ProjectResolver::new(&MemoryFs::new())
        .resolve(&VfsPath::new("/nuts/none.nuts.json"))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case::object_without_include(r#"{"files":[{"name":"a.nut"}]}"#)]
#[case::number_entry(r#"{"files":[42]}"#)]
#[case::include_of_numbers(r#"{"files":[{"include":[1, 2]}]}"#)]
#[case::include_object(r#"{"files":[{"include":{"path":"x"}}]}"#)]
#[case::files_object(r#"{"files":{"a":"a.nut"}}"#)]
#[case::array_root(r#"["a.nut"]"#)]
fn test_structural_problems_are_invalid_format(#[case] descriptor: &str) {
    let fs = MemoryFs::new()
        .with_file("/nuts/p.nuts.json", descriptor)
        .with_file("/nuts/a.nut", "");

    let err = ProjectResolver::new(&fs)
        .resolve(&VfsPath::new("/nuts/p.nuts.json"))
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidFormat, "{err}");
}

#[test]
fn test_unparseable_descriptor_is_unknown_format() {
    let fs = MemoryFs::new().with_file("/nuts/p.nuts.json", "{\"files\": [\n  - : :");
    let err = ProjectResolver::new(&fs)
        .resolve(&VfsPath::new("/nuts/p.nuts.json"))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownFormat { .. }));
}

#[test]
fn test_missing_asset_is_missing_files() {
    let fs = MemoryFs::new().with_file("/nuts/p.nuts.json", r#"{"files":["gone.nut"]}"#);
    let err = ProjectResolver::new(&fs)
        .resolve(&VfsPath::new("/nuts/p.nuts.json"))
        .unwrap_err();

    match err {
        Error::MissingFiles { project, file } => {
            assert_eq!(project, VfsPath::new("/nuts/p.nuts.json"));
            assert_eq!(file, VfsPath::new("/nuts/gone.nut"));
        }
        other => panic!("expected MissingFiles, got {other:?}"),
    }
}

#[test]
fn test_missing_include_is_missing_files() {
    let fs = MemoryFs::new().with_file("/nuts/p.nuts.json", r#"{"files":[{"include":"gone.nuts.json"}]}"#);
    let err = ProjectResolver::new(&fs)
        .resolve(&VfsPath::new("/nuts/p.nuts.json"))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::MissingFiles);
}

#[test]
fn test_broken_candidate_stops_the_probe() {
    // The .nutsjsnproj candidate exists but is broken; the valid .nuts.json
    // later in the probe order must not be picked.
    let fs = demo_fs().with_file("/nuts/demo.nutsjsnproj", r#"{"files":["missing.nut"]}"#);
    let err = ProjectResolver::new(&fs)
        .resolve_default_project(&VfsPath::new("/nuts"), "demo")
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::MissingFiles);
}

#[test]
fn test_probe_falls_through_to_single_nut() {
    let fs = MemoryFs::new().with_file("/nuts/solo.nut", "print(2)");
    let graph = ProjectResolver::new(&fs)
        .resolve_default_project(&VfsPath::new("/nuts"), "solo")
        .unwrap();
    assert_eq!(graph.files, paths(&["/nuts/solo.nut"]));
    assert_eq!(graph.file_contents, vec!["print(2)"]);
}

#[test]
fn test_probe_without_candidates_is_not_found() {
    let err = ProjectResolver::new(&MemoryFs::new())
        .resolve_default_project(&VfsPath::new("/nuts"), "demo")
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[test]
fn test_shared_visited_sets_dedupe_across_calls() {
    let fs = demo_fs();
    let resolver = ProjectResolver::new(&fs);
    let mut graph = ProjectGraph::new();
    let mut visited = VisitedSets::new();

    resolver
        .resolve_into(&VfsPath::new("/nuts/lib.nuts.json"), &mut graph, &mut visited)
        .unwrap();
    resolver
        .resolve_into(&VfsPath::new("/nuts/demo.nuts.json"), &mut graph, &mut visited)
        .unwrap();

    assert_eq!(graph.files, paths(&["/nuts/b.nut", "/nuts/a.nut"]));
    assert!(visited.contains_descriptor(&VfsPath::new("/NUTS/LIB.NUTS.JSON")));
}

#[test]
fn test_descriptor_with_comments() {
    let fs = MemoryFs::new()
        .with_file(
            "/nuts/p.nutsjsnproj",
            "{\n  // entry point\n  \"files\": [\"main.nut\" /* only one */]\n}\n",
        )
        .with_file("/nuts/main.nut", "");
    let graph = ProjectResolver::new(&fs)
        .resolve(&VfsPath::new("/nuts/p.nutsjsnproj"))
        .unwrap();
    assert_eq!(graph.files, paths(&["/nuts/main.nut"]));
}
