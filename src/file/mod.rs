// src/file/mod.rs
pub mod picker;

pub use picker::{detect_picker, FilePicker, NativePicker, UnavailablePicker};

/// Named set of extensions offered by the file picker.
#[derive(Debug, Clone, PartialEq)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: Vec<String>) -> Self {
        Self {
            name: name.into(),
            extensions,
        }
    }

    /// Case-insensitive extension check, used to pre-validate manual input.
    pub fn accepts(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn accepts_matches_extension_ignoring_case() {
        let filter = FileFilter::new("Financial Files", vec!["csv".into(), "xlsx".into()]);
        assert!(filter.accepts(Path::new("/tmp/statement.CSV")));
        assert!(filter.accepts(Path::new("march.xlsx")));
        assert!(!filter.accepts(Path::new("notes.txt")));
        assert!(!filter.accepts(Path::new("no_extension")));
    }
}
