//! Built-in knowledge of the platform library.
//!
//! Universe snapshots only describe the scanned API, so the supertypes of
//! the standard collection, map and callback types are supplied here.

/// Root of every collection type.
pub const COLLECTION: &str = "java.util.Collection";
/// Root of every map type.
pub const MAP: &str = "java.util.Map";
/// Single-argument callback type.
pub const CONSUMER: &str = "java.util.function.Consumer";

const HIERARCHY: &[(&str, &[&str])] = &[
    ("java.util.Collection", &["java.lang.Iterable"]),
    ("java.util.List", &["java.util.Collection"]),
    ("java.util.Set", &["java.util.Collection"]),
    ("java.util.SortedSet", &["java.util.Set"]),
    ("java.util.NavigableSet", &["java.util.SortedSet"]),
    ("java.util.Queue", &["java.util.Collection"]),
    ("java.util.Deque", &["java.util.Queue"]),
    ("java.util.ArrayList", &["java.util.List"]),
    ("java.util.LinkedList", &["java.util.List", "java.util.Deque"]),
    ("java.util.HashSet", &["java.util.Set"]),
    ("java.util.LinkedHashSet", &["java.util.HashSet"]),
    ("java.util.TreeSet", &["java.util.NavigableSet"]),
    ("java.util.SortedMap", &["java.util.Map"]),
    ("java.util.NavigableMap", &["java.util.SortedMap"]),
    ("java.util.HashMap", &["java.util.Map"]),
    ("java.util.LinkedHashMap", &["java.util.HashMap"]),
    ("java.util.TreeMap", &["java.util.NavigableMap"]),
    ("java.lang.Integer", &["java.lang.Number"]),
    ("java.lang.Long", &["java.lang.Number"]),
    ("java.lang.Short", &["java.lang.Number"]),
    ("java.lang.Byte", &["java.lang.Number"]),
    ("java.lang.Double", &["java.lang.Number"]),
    ("java.lang.Float", &["java.lang.Number"]),
    ("java.lang.String", &["java.lang.CharSequence"]),
];

/// Direct supertypes of a well-known platform type.
pub fn supertypes(name: &str) -> &'static [&'static str] {
    HIERARCHY
        .iter()
        .find(|(ty, _)| *ty == name)
        .map(|(_, supers)| *supers)
        .unwrap_or(&[])
}

/// Returns true if the type lives in the implicitly imported language package.
pub fn is_lang_type(name: &str) -> bool {
    crate::package_of(name) == "java.lang"
}
