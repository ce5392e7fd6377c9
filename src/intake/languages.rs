//! Supported file extensions and their display labels.

/// Extension (lowercase, dotted) to language label.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    (".js", "JavaScript"),
    (".ts", "TypeScript"),
    (".jsx", "React JSX"),
    (".tsx", "React TSX"),
    (".py", "Python"),
    (".java", "Java"),
    (".cpp", "C++"),
    (".c", "C"),
    (".go", "Go"),
    (".rb", "Ruby"),
    (".php", "PHP"),
    (".html", "HTML"),
    (".css", "CSS"),
    (".scss", "SCSS"),
    (".json", "JSON"),
    (".md", "Markdown"),
    (".rs", "Rust"),
    (".swift", "Swift"),
    (".kt", "Kotlin"),
    (".cs", "C#"),
];

/// Label for a dotted lowercase extension.
pub fn language_for(extension: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, label)| *label)
}

/// Extension of a file name: the text after the final `.`, lowercased and
/// prefixed with `.`. Names without a `.` have no extension.
pub fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    Some(format!(".{}", ext.to_lowercase()))
}

/// Comma-separated list of supported extensions, in table order.
pub fn supported_list() -> String {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|(ext, _)| *ext)
        .collect::<Vec<_>>()
        .join(", ")
}
