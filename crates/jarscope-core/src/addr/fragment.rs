//! Address fragments naming a type, field, or method.

use std::fmt;

use crate::descriptor::match_field;
use crate::descriptor::match_method;
use crate::registry::axes::MemberDecl;

/// A member reference inside a fragment: name plus wildcard-capable
/// binary descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
    /// Member name.
    pub name: String,
    /// Field or method descriptor; may be `?`, `(*)?`, or carry `?`/`*`
    /// wildcards at individual slots.
    pub descriptor: String,
}

/// The fragment of an address: `typeName` or
/// `typeName-memberName-descriptor`.
///
/// `typeName` uses binary form (`/` package separator, `$` nested-type
/// separator) and may be prefixed `*/` to mean "any package".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    type_name: String,
    member: Option<MemberRef>,
}

impl Fragment {
    /// Fragment naming a type.
    #[must_use]
    pub fn for_type(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member: None,
        }
    }

    /// Fragment naming a member of a type.
    #[must_use]
    pub fn for_member(
        type_name: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            member: Some(MemberRef {
                name: name.into(),
                descriptor: descriptor.into(),
            }),
        }
    }

    /// Parses fragment text. Returns `None` for shapes outside the
    /// grammar; resolution treats that as "not found", never an error.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        let mut parts = text.splitn(3, '-');
        let type_name = parts.next()?.to_string();
        match (parts.next(), parts.next()) {
            (None, _) => Some(Self {
                type_name,
                member: None,
            }),
            (Some(name), Some(descriptor)) if !name.is_empty() && !descriptor.is_empty() => {
                Some(Self {
                    type_name,
                    member: Some(MemberRef {
                        name: name.to_string(),
                        descriptor: descriptor.to_string(),
                    }),
                })
            }
            _ => None,
        }
    }

    /// The (possibly `*/`-prefixed) type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The member reference, absent for type-only fragments.
    #[must_use]
    pub fn member(&self) -> Option<&MemberRef> {
        self.member.as_ref()
    }

    /// Returns `true` if this fragment names the given binary type name,
    /// honoring the `*/` any-package prefix.
    #[must_use]
    pub fn matches_type(&self, candidate: &str) -> bool {
        match self.type_name.strip_prefix("*/") {
            Some(rest) => candidate == rest || candidate.ends_with(&format!("/{rest}")),
            None => candidate == self.type_name,
        }
    }

    /// Returns `true` if this fragment's member reference matches a
    /// declared member, comparing descriptors with the wildcard matcher.
    /// Type-only fragments match nothing here.
    #[must_use]
    pub fn matches_member(&self, declared: &MemberDecl) -> bool {
        let Some(member) = &self.member else {
            return false;
        };
        if member.name != declared.name {
            return false;
        }
        let method_like =
            member.descriptor.starts_with('(') || declared.descriptor.starts_with('(');
        if method_like {
            match_method(&member.descriptor, &declared.descriptor)
        } else {
            match_field(&member.descriptor, &declared.descriptor)
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name)?;
        if let Some(member) = &self.member {
            write!(f, "-{}-{}", member.name, member.descriptor)?;
        }
        Ok(())
    }
}
