//! Test utilities for building in-memory fixtures.
//!
//! Reusable helpers for tests that need real archive bytes or synthetic
//! compiled classes, reducing duplication across unit and integration
//! tests.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

/// Creates an in-memory ZIP archive from a list of `(path, content)`
/// entries.
///
/// # Examples
///
/// ```
/// use jarscope_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(vec![("file.txt", b"hello"), ("dir/nested.txt", b"world")]);
/// ```
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut buffer);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        for (path, data) in entries {
            writer.start_file(path, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }
    buffer.into_inner()
}

/// Creates an in-memory TAR archive from a list of `(path, content)`
/// entries. Files are created with mode 0o644.
#[must_use]
pub fn create_test_tar(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, path, data).unwrap();
    }
    builder.into_inner().unwrap()
}

/// Synthesizes minimal valid class-file bytes for a type declaration.
///
/// `name` and `superclass` use binary form (`/` package separator);
/// members are `(name, descriptor)` pairs. The emitted file carries no
/// attributes or bytecode, just enough structure for type decoding.
///
/// # Examples
///
/// ```
/// use jarscope_core::test_utils::create_test_class;
///
/// let bytes = create_test_class(
///     "com/example/App",
///     Some("java/lang/Object"),
///     &[("count", "I")],
///     &[("main", "([Ljava/lang/String;)V")],
/// );
/// assert_eq!(&bytes[..4], &[0xCA, 0xFE, 0xBA, 0xBE]);
/// ```
#[must_use]
pub fn create_test_class(
    name: &str,
    superclass: Option<&str>,
    fields: &[(&str, &str)],
    methods: &[(&str, &str)],
) -> Vec<u8> {
    let mut pool: Vec<Vec<u8>> = Vec::new();

    let mut push_utf8 = |pool: &mut Vec<Vec<u8>>, text: &str| -> u16 {
        let mut entry = vec![1u8];
        entry.extend_from_slice(&u16::try_from(text.len()).unwrap().to_be_bytes());
        entry.extend_from_slice(text.as_bytes());
        pool.push(entry);
        u16::try_from(pool.len()).unwrap()
    };
    let push_class = |pool: &mut Vec<Vec<u8>>, name_index: u16| -> u16 {
        let mut entry = vec![7u8];
        entry.extend_from_slice(&name_index.to_be_bytes());
        pool.push(entry);
        u16::try_from(pool.len()).unwrap()
    };

    let name_utf8 = push_utf8(&mut pool, name);
    let this_class = push_class(&mut pool, name_utf8);
    let super_class = superclass.map_or(0, |s| {
        let utf8 = push_utf8(&mut pool, s);
        push_class(&mut pool, utf8)
    });

    let mut member_indexes = Vec::new();
    for (member_name, descriptor) in fields.iter().chain(methods) {
        let name_index = push_utf8(&mut pool, member_name);
        let descriptor_index = push_utf8(&mut pool, descriptor);
        member_indexes.push((name_index, descriptor_index));
    }

    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
    bytes.extend_from_slice(&0u16.to_be_bytes()); // minor_version
    bytes.extend_from_slice(&52u16.to_be_bytes()); // major_version

    bytes.extend_from_slice(&u16::try_from(pool.len() + 1).unwrap().to_be_bytes());
    for entry in &pool {
        bytes.extend_from_slice(entry);
    }

    bytes.extend_from_slice(&0x0021u16.to_be_bytes()); // ACC_PUBLIC | ACC_SUPER
    bytes.extend_from_slice(&this_class.to_be_bytes());
    bytes.extend_from_slice(&super_class.to_be_bytes());
    bytes.extend_from_slice(&0u16.to_be_bytes()); // interfaces_count

    let (field_indexes, method_indexes) = member_indexes.split_at(fields.len());
    for member_table in [field_indexes, method_indexes] {
        bytes.extend_from_slice(&u16::try_from(member_table.len()).unwrap().to_be_bytes());
        for (name_index, descriptor_index) in member_table {
            bytes.extend_from_slice(&0u16.to_be_bytes()); // access_flags
            bytes.extend_from_slice(&name_index.to_be_bytes());
            bytes.extend_from_slice(&descriptor_index.to_be_bytes());
            bytes.extend_from_slice(&0u16.to_be_bytes()); // attributes_count
        }
    }

    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_round_trip() {
        let data = create_test_zip(vec![("a.txt", b"alpha")]);
        let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.by_index(0).unwrap().name(), "a.txt");
    }

    #[test]
    fn test_tar_round_trip() {
        let data = create_test_tar(vec![("a.txt", b"alpha")]);
        let mut archive = tar::Archive::new(Cursor::new(data));
        let entries: Vec<_> = archive.entries().unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
