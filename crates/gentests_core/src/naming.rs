//! Test naming conventions.
//!
//! Free functions get `test_<name>`; methods get `test_<type>_<method>` with the type name converted to
//! snake case. Names are expected without a raw-identifier prefix.

use crate::conventions::TEST_FN_PREFIX;

/// Convert an `UpperCamelCase` (or already snake) name to `snake_case`.
///
/// Acronym runs stay together: `HTTPServer` becomes `http_server`.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                None | Some('_') => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                Some(_) => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }

    out
}

/// Name of the generated test for a function, optionally owned by a type.
pub fn test_name(owner: Option<&str>, function: &str) -> String {
    match owner {
        Some(owner) => format!("{TEST_FN_PREFIX}{}_{function}", to_snake_case(owner)),
        None => format!("{TEST_FN_PREFIX}{function}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_camel() {
        assert_eq!(to_snake_case("Calculator"), "calculator");
        assert_eq!(to_snake_case("RingBuffer"), "ring_buffer");
    }

    #[test]
    fn test_snake_case_acronyms() {
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("IOBuffer"), "io_buffer");
    }

    #[test]
    fn test_snake_case_already_snake() {
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("Vec3d"), "vec3d");
    }

    #[test]
    fn test_free_function_name() {
        assert_eq!(test_name(None, "add"), "test_add");
    }

    #[test]
    fn test_method_name() {
        assert_eq!(test_name(Some("RingBuffer"), "push"), "test_ring_buffer_push");
    }
}
