//! Parser module — turns one stub file into function descriptors.

pub mod classify;
pub mod stub;

pub use stub::ParseOptions;

use crate::model::ParsedFile;
use std::path::Path;

/// Owning type name for a stub file: the file name without its extension.
/// `"dump/Player.cs"` → `"Player"`, `"Foo.Bar.cs"` → `"Foo.Bar"`.
pub fn type_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Parse the contents of the stub file at `path`.
pub fn parse_file(path: &Path, content: &str, options: &ParseOptions) -> ParsedFile {
    let type_name = type_name(path);
    let doc = stub::parse(&type_name, content, options);
    ParsedFile {
        path: path.to_path_buf(),
        type_name,
        functions: doc.functions,
        diagnostics: doc.diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_name_from_path() {
        assert_eq!(type_name(Path::new("dump/Player.cs")), "Player");
        assert_eq!(type_name(Path::new("Foo.Bar.cs")), "Foo.Bar");
        assert_eq!(type_name(Path::new("Makefile")), "Makefile");
    }

    #[test]
    fn parse_file_seeds_type_name() {
        let content = "[Address(RVA = \"0x100\")]\npublic void Awake()\n{\n}\n";
        let parsed = parse_file(Path::new("dump/Player.cs"), content, &ParseOptions::default());
        assert_eq!(parsed.type_name, "Player");
        assert_eq!(parsed.functions.len(), 1);
        assert_eq!(parsed.functions[0].name_segments, vec!["Player", "Awake"]);
    }
}
