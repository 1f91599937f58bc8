//! End-to-end navigation tests over real archives.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;

use jarscope_core::EntryKind;
use jarscope_core::Workspace;
use jarscope_core::test_utils::create_test_class;
use jarscope_core::test_utils::create_test_tar;
use jarscope_core::test_utils::create_test_zip;

/// jar inside war inside ear, with markers driving the factory choice at
/// every level.
fn build_ear() -> Vec<u8> {
    let class = create_test_class("com/u/Helper", Some("java/lang/Object"), &[], &[]);
    let jar = create_test_zip(vec![
        ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n".as_slice()),
        ("com/u/Helper.class", class.as_slice()),
    ]);
    let war = create_test_zip(vec![
        ("WEB-INF/web.xml", b"<web-app/>".as_slice()),
        ("WEB-INF/lib/util.jar", jar.as_slice()),
    ]);
    create_test_zip(vec![
        ("META-INF/application.xml", b"<application/>".as_slice()),
        ("web.war", war.as_slice()),
    ])
}

#[test]
fn test_triple_nesting_walk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.ear");
    fs::write(&path, build_ear()).unwrap();

    let mut ws = Workspace::with_defaults();
    let ear = ws.open(&path).unwrap();
    assert_eq!(ws.container_type(ear), "ear");

    let war_entry = ws.find(ear, "web.war").unwrap();
    let war = ws.nested_container(war_entry).unwrap();
    assert_eq!(ws.container_type(war), "war");

    let jar_entry = ws.find(war, "WEB-INF/lib/util.jar").unwrap();
    let jar = ws.nested_container(jar_entry).unwrap();
    assert_eq!(ws.container_type(jar), "jar");

    let class = ws.find(jar, "com/u/Helper.class").unwrap();
    assert!(matches!(ws.kind(class), EntryKind::File { .. }));
    let bytes = ws.read(class).unwrap();
    assert_eq!(&bytes[..4], &[0xCA, 0xFE, 0xBA, 0xBE]);
}

#[test]
fn test_ordering_invariant_at_every_level() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixed.zip");
    fs::write(
        &path,
        create_test_zip(vec![
            ("zebra.txt", b"z".as_slice()),
            ("alpha/inner.txt", b"i".as_slice()),
            ("beta.txt", b"b".as_slice()),
            ("alpha/deep/leaf.txt", b"l".as_slice()),
            ("mike/note.txt", b"n".as_slice()),
        ]),
    )
    .unwrap();

    let mut ws = Workspace::with_defaults();
    let container = ws.open(&path).unwrap();

    let mut pending = vec![ws.root(container)];
    while let Some(entry) = pending.pop() {
        let children = ws.children(entry);
        let keys: Vec<(bool, String)> = children
            .iter()
            .map(|&c| (!ws.is_directory(c), ws.path(c).to_string()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted, "children of {:?} out of order", ws.path(entry));
        pending.extend(children.iter().filter(|&&c| ws.is_directory(c)));
    }
}

#[test]
fn test_reopening_materializes_independently() {
    let dir = tempfile::tempdir().unwrap();
    let inner = create_test_zip(vec![("inside.txt", b"payload".as_slice())]);
    let path = dir.path().join("outer.zip");
    fs::write(&path, create_test_zip(vec![("inner.zip", inner.as_slice())])).unwrap();

    let mut ws = Workspace::with_defaults();
    let first_open = ws.open(&path).unwrap();
    let second_open = ws.open(&path).unwrap();

    let first_entry = ws.find(first_open, "inner.zip").unwrap();
    let second_entry = ws.find(second_open, "inner.zip").unwrap();
    assert_ne!(first_entry, second_entry);

    let first_nested = ws.nested_container(first_entry).unwrap();
    let second_nested = ws.nested_container(second_entry).unwrap();
    assert_ne!(first_nested, second_nested);

    // Both materialized copies are independently readable.
    let first_file = ws.find(first_nested, "inside.txt").unwrap();
    let second_file = ws.find(second_nested, "inside.txt").unwrap();
    assert_eq!(ws.read(first_file).unwrap(), b"payload");
    assert_eq!(ws.read(second_file).unwrap(), b"payload");
}

#[test]
fn test_tar_gz_nested_in_zip() {
    let dir = tempfile::tempdir().unwrap();
    let tar = create_test_tar(vec![("docs/readme.md", b"# hi".as_slice())]);
    let mut gz = Vec::new();
    {
        use std::io::Write;
        let mut encoder = flate2::write::GzEncoder::new(&mut gz, flate2::Compression::default());
        encoder.write_all(&tar).unwrap();
        encoder.finish().unwrap();
    }
    let path = dir.path().join("bundle.zip");
    fs::write(&path, create_test_zip(vec![("dist.tar.gz", gz.as_slice())])).unwrap();

    let mut ws = Workspace::with_defaults();
    let container = ws.open(&path).unwrap();
    let archive_entry = ws.find(container, "dist.tar.gz").unwrap();
    let nested = ws.nested_container(archive_entry).unwrap();
    assert_eq!(ws.container_type(nested), "tar");

    let readme = ws.find(nested, "docs/readme.md").unwrap();
    assert_eq!(ws.read(readme).unwrap(), b"# hi");
}

#[test]
fn test_corruption_does_not_abort_walk() {
    let dir = tempfile::tempdir().unwrap();
    let good = create_test_zip(vec![("ok.txt", b"ok".as_slice())]);
    let path = dir.path().join("outer.zip");
    fs::write(
        &path,
        create_test_zip(vec![
            ("broken.jar", b"garbage, not a zip".as_slice()),
            ("good.zip", good.as_slice()),
        ]),
    )
    .unwrap();

    let mut ws = Workspace::with_defaults();
    let container = ws.open(&path).unwrap();

    let broken = ws.find(container, "broken.jar").unwrap();
    assert!(ws.children(broken).is_empty());

    // The sibling still expands fine after the corrupt entry.
    let good_entry = ws.find(container, "good.zip").unwrap();
    let children = ws.children(good_entry);
    assert_eq!(children.len(), 1);
    assert_eq!(ws.path(children[0]), "ok.txt");
}

#[test]
fn test_directory_container_with_nested_archive() {
    let dir = tempfile::tempdir().unwrap();
    let jar = create_test_zip(vec![
        ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n".as_slice()),
        ("com/x/A.class", b"\xca\xfe\xba\xbe".as_slice()),
    ]);
    fs::write(dir.path().join("lib.jar"), jar).unwrap();
    fs::write(dir.path().join("notes.txt"), b"plain").unwrap();

    let mut ws = Workspace::with_defaults();
    let container = ws.open(dir.path()).unwrap();
    assert_eq!(ws.container_type(container), "directory");

    // The jar sits on the real filesystem, so it mounts in place.
    let jar_entry = ws.find(container, "lib.jar").unwrap();
    let nested = ws.nested_container(jar_entry).unwrap();
    assert_eq!(ws.container_type(nested), "jar");
    assert!(ws.find(nested, "com/x/A.class").is_some());

    let notes = ws.find(container, "notes.txt").unwrap();
    assert!(ws.children(notes).is_empty());
}
