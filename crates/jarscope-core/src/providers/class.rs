//! Type decoding for compiled Java classes.
//!
//! Reads just enough of the class-file format to recover the declared
//! shape of a type: constant pool, `this_class`, superclass, and the
//! field/method tables with their binary descriptors. Bytecode bodies and
//! attributes are skipped; source reconstruction is out of scope.

use std::sync::Arc;

use crate::model::EntryId;
use crate::model::Workspace;
use crate::registry::Provider;
use crate::registry::SelectorRegistry;
use crate::registry::axes::MemberDecl;
use crate::registry::axes::TypeDecl;
use crate::registry::axes::TypeProvider;

const CLASS_MAGIC: u32 = 0xCAFE_BABE;

/// Decodes `.class` entries in any container.
pub struct ClassTypeProvider;

impl Provider for ClassTypeProvider {
    fn selectors(&self) -> Vec<String> {
        vec!["*:file:*.class".to_string()]
    }
}

impl TypeProvider for ClassTypeProvider {
    fn parse_type(&self, ws: &Workspace, entry: EntryId) -> Option<TypeDecl> {
        let bytes = ws.read(entry).ok()?;
        parse_class(&bytes)
    }
}

/// Stock type-decoding registry.
#[must_use]
pub fn default_types() -> SelectorRegistry<dyn TypeProvider> {
    let mut registry: SelectorRegistry<dyn TypeProvider> = SelectorRegistry::new();
    registry.register(Arc::new(ClassTypeProvider));
    registry
}

/// Parses class-file bytes into a [`TypeDecl`]. Returns `None` on any
/// malformed input rather than erroring.
#[must_use]
pub fn parse_class(bytes: &[u8]) -> Option<TypeDecl> {
    let mut reader = Reader::new(bytes);
    if reader.read_u32()? != CLASS_MAGIC {
        return None;
    }
    reader.skip(4)?; // minor_version, major_version

    let pool = read_constant_pool(&mut reader)?;

    reader.skip(2)?; // access_flags
    let this_class = reader.read_u16()?;
    let super_class = reader.read_u16()?;

    let name = pool.class_name(this_class)?.to_string();
    let superclass = if super_class == 0 {
        None
    } else {
        pool.class_name(super_class).map(ToString::to_string)
    };

    let interface_count = usize::from(reader.read_u16()?);
    reader.skip(interface_count * 2)?;

    let fields = read_members(&mut reader, &pool)?;
    let methods = read_members(&mut reader, &pool)?;

    Some(TypeDecl {
        name,
        superclass,
        fields,
        methods,
    })
}

enum CpEntry<'a> {
    Utf8(&'a str),
    Class(u16),
    Other,
}

struct ConstantPool<'a> {
    entries: Vec<CpEntry<'a>>,
}

impl ConstantPool<'_> {
    fn utf8(&self, index: u16) -> Option<&str> {
        match self.entries.get(usize::from(index))? {
            CpEntry::Utf8(text) => Some(text),
            _ => None,
        }
    }

    fn class_name(&self, index: u16) -> Option<&str> {
        match self.entries.get(usize::from(index))? {
            CpEntry::Class(name_index) => self.utf8(*name_index),
            _ => None,
        }
    }
}

fn read_constant_pool<'a>(reader: &mut Reader<'a>) -> Option<ConstantPool<'a>> {
    let count = usize::from(reader.read_u16()?);
    let mut entries = Vec::with_capacity(count);
    entries.push(CpEntry::Other); // slot 0 is unused by the format
    let mut index = 1;
    while index < count {
        let tag = reader.read_u8()?;
        let entry = match tag {
            1 => {
                let length = usize::from(reader.read_u16()?);
                let raw = reader.take(length)?;
                CpEntry::Utf8(std::str::from_utf8(raw).ok()?)
            }
            7 => CpEntry::Class(reader.read_u16()?),
            8 | 16 | 19 | 20 => {
                reader.skip(2)?;
                CpEntry::Other
            }
            15 => {
                reader.skip(3)?;
                CpEntry::Other
            }
            3 | 4 | 9 | 10 | 11 | 12 | 17 | 18 => {
                reader.skip(4)?;
                CpEntry::Other
            }
            5 | 6 => {
                // longs and doubles occupy two pool slots
                reader.skip(8)?;
                entries.push(CpEntry::Other);
                index += 1;
                CpEntry::Other
            }
            _ => return None,
        };
        entries.push(entry);
        index += 1;
    }
    Some(ConstantPool { entries })
}

fn read_members(reader: &mut Reader<'_>, pool: &ConstantPool<'_>) -> Option<Vec<MemberDecl>> {
    let count = reader.read_u16()?;
    let mut members = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        reader.skip(2)?; // access_flags
        let name = pool.utf8(reader.read_u16()?)?.to_string();
        let descriptor = pool.utf8(reader.read_u16()?)?.to_string();
        let attribute_count = reader.read_u16()?;
        for _ in 0..attribute_count {
            reader.skip(2)?; // attribute_name_index
            let length = reader.read_u32()?;
            reader.skip(usize::try_from(length).ok()?)?;
        }
        members.push(MemberDecl { name, descriptor });
    }
    Some(members)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, length: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(length)?;
        let slice = self.bytes.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    fn skip(&mut self, length: usize) -> Option<()> {
        self.take(length).map(|_| ())
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take(1).map(|b| b[0])
    }

    fn read_u16(&mut self) -> Option<u16> {
        self.take(2).map(|b| u16::from_be_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take(4)
            .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}
