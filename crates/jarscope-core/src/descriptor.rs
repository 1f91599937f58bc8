//! Wildcard-aware comparison of binary field and method descriptors.
//!
//! Descriptors follow the JVM binary grammar (`I`, `[J`, `Lcom/x/Foo;`,
//! `(Ljava/lang/String;I)V`), extended with two wildcards used by address
//! fragments: `?` matches any single type at its slot, and a `*` inside a
//! reference type name matches any package prefix. The special method
//! descriptor `(*)?` matches any signature.
//!
//! The relation is symmetric but not transitive: `match(a, b)` always
//! equals `match(b, a)`, while `?` bridges descriptors that do not match
//! each other.

/// Compares two field descriptors, honoring `?` and `*` wildcards.
///
/// Array dimensions must agree exactly; the wildcard applies to the
/// element type, not the brackets.
#[must_use]
pub fn match_field(d1: &str, d2: &str) -> bool {
    if d1 == "?" || d2 == "?" {
        return true;
    }

    let (dim1, elem1) = strip_array(d1);
    let (dim2, elem2) = strip_array(d2);
    if dim1 != dim2 {
        return false;
    }
    if elem1 == "?" || elem2 == "?" {
        return true;
    }
    if elem1 == elem2 {
        return !elem1.is_empty();
    }

    if is_reference(elem1) && is_reference(elem2) && (elem1.contains('*') || elem2.contains('*')) {
        return match_reference(elem1, elem2);
    }

    false
}

/// Compares two method descriptors.
///
/// `(*)?` on either side matches any signature. Otherwise both sides must
/// have identical arity; parameters are compared pairwise with
/// [`match_field`], then the return descriptors are compared the same way.
/// Descriptors that fail to parse match nothing.
#[must_use]
pub fn match_method(d1: &str, d2: &str) -> bool {
    if d1 == "(*)?" || d2 == "(*)?" {
        return true;
    }

    let Some((params1, ret1)) = split_method(d1) else {
        return false;
    };
    let Some((params2, ret2)) = split_method(d2) else {
        return false;
    };
    let Some(args1) = tokenize_params(params1) else {
        return false;
    };
    let Some(args2) = tokenize_params(params2) else {
        return false;
    };

    if args1.len() != args2.len() {
        return false;
    }
    for (a, b) in args1.iter().zip(&args2) {
        if !match_field(a, b) {
            return false;
        }
    }
    match_field(ret1, ret2)
}

/// Splits `[[I` into (2, `I`).
fn strip_array(descriptor: &str) -> (usize, &str) {
    let dims = descriptor.bytes().take_while(|&b| b == b'[').count();
    (dims, &descriptor[dims..])
}

fn is_reference(elem: &str) -> bool {
    elem.len() >= 3 && elem.starts_with('L') && elem.ends_with(';')
}

/// Suffix comparison from the trailing `;` backward. A `*` in either name
/// stands for any package prefix, so the walk succeeds the moment one is
/// reached; a plain character mismatch fails.
fn match_reference(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut i = a.len();
    let mut j = b.len();
    loop {
        if i == 0 || j == 0 {
            return i == 0 && j == 0;
        }
        let (ca, cb) = (a[i - 1], b[j - 1]);
        if ca == b'*' || cb == b'*' {
            return true;
        }
        if ca != cb {
            return false;
        }
        i -= 1;
        j -= 1;
    }
}

/// Splits `(...)R` into the parameter region and the return descriptor.
fn split_method(descriptor: &str) -> Option<(&str, &str)> {
    let rest = descriptor.strip_prefix('(')?;
    let close = rest.find(')')?;
    let ret = &rest[close + 1..];
    if ret.is_empty() {
        return None;
    }
    Some((&rest[..close], ret))
}

/// Tokenizes a parameter region into individual field descriptors.
/// Returns `None` on malformed input.
fn tokenize_params(params: &str) -> Option<Vec<&str>> {
    let bytes = params.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let start = pos;
        while pos < bytes.len() && bytes[pos] == b'[' {
            pos += 1;
        }
        match bytes.get(pos)? {
            b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' | b'?' => pos += 1,
            b'L' => {
                let semi = params[pos..].find(';')?;
                pos += semi + 1;
            }
            _ => return None,
        }
        tokens.push(&params[start..pos]);
    }
    Some(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_field_exact() {
        assert!(match_field("I", "I"));
        assert!(match_field("Ljava/lang/String;", "Ljava/lang/String;"));
        assert!(!match_field("I", "J"));
        assert!(!match_field("Ljava/lang/String;", "Ljava/lang/Object;"));
    }

    #[test]
    fn test_match_field_any_type() {
        assert!(match_field("?", "I"));
        assert!(match_field("Lcom/x/Foo;", "?"));
        assert!(match_field("?", "[[D"));
    }

    #[test]
    fn test_match_field_any_package() {
        assert!(match_field("L*/Test;", "Ltest/Test;"));
        assert!(match_field("Ltest/Test;", "L*/Test;"));
        assert!(match_field("L*/Test;", "La/b/c/Test;"));
        assert!(!match_field("Lother/Test;", "Ltest/Test;"));
        assert!(!match_field("L*/Test;", "Ltest/Other;"));
    }

    #[test]
    fn test_match_field_arrays() {
        assert!(match_field("[I", "[I"));
        assert!(match_field("[?", "[Lcom/x/Foo;"));
        assert!(match_field("[L*/Foo;", "[La/Foo;"));
        assert!(!match_field("[I", "[[I"));
        assert!(!match_field("[I", "I"));
    }

    #[test]
    fn test_match_method_any_signature() {
        assert!(match_method("(*)?", "(I)V"));
        assert!(match_method("(I)V", "(*)?"));
        assert!(match_method("(*)?", "()Ljava/lang/String;"));
    }

    #[test]
    fn test_match_method_concrete() {
        assert!(match_method("(I)V", "(I)V"));
        assert!(!match_method("(I)V", "(J)V"));
        assert!(!match_method("(I)V", "(II)V"));
        assert!(!match_method("(I)V", "(I)I"));
    }

    #[test]
    fn test_match_method_wildcard_slots() {
        assert!(match_method("(?)V", "(Ljava/lang/String;)V"));
        assert!(match_method("(I?J)V", "(IDJ)V"));
        assert!(match_method("(I)?", "(I)[B"));
        assert!(match_method("(L*/List;I)V", "(Ljava/util/List;I)V"));
    }

    #[test]
    fn test_match_method_malformed() {
        assert!(!match_method("(I)V", "IV"));
        assert!(!match_method("(Lunterminated)V", "(I)V"));
        assert!(!match_method("(I)", "(I)"));
        assert!(!match_method("(X)V", "(X)V"));
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ("(*)?", "(I)V"),
            ("(?)V", "(J)V"),
            ("L*/Test;", "Ltest/Test;"),
            ("[I", "[J"),
            ("(II)V", "(I)V"),
        ];
        for (a, b) in pairs {
            assert_eq!(match_field(a, b), match_field(b, a), "field {a} vs {b}");
            assert_eq!(match_method(a, b), match_method(b, a), "method {a} vs {b}");
        }
    }
}
