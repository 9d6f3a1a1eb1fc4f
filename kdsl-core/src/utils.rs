//! Shared utility functions for code generation.

/// Uppercase the first character (e.g., "dynamodb" -> "Dynamodb")
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Last segment of a dotted name (e.g., "com.acme.model" -> "model")
pub fn last_segment(s: &str) -> &str {
    s.rsplit('.').next().unwrap_or(s)
}

/// Relative directory for a dotted package (e.g., "com.acme" -> "com/acme")
pub fn package_dir(package: &str) -> String {
    package.replace('.', "/")
}

/// Join a package and a simple name, skipping the dot for the default package
pub fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", package, name)
    }
}
