use crate::catalog;
use crate::convert::SelectedFile;

/// The chosen file together with what can be made from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    file: SelectedFile,
    candidates: Vec<String>,
    output_format: Option<String>,
}

impl Selection {
    pub fn new(file: SelectedFile) -> Self {
        let candidates: Vec<String> = catalog::candidates_for(&file.extension)
            .iter()
            .map(|f| f.to_string())
            .collect();
        let output_format = candidates.first().cloned();
        Self {
            file,
            candidates,
            output_format,
        }
    }

    pub fn file(&self) -> &SelectedFile {
        &self.file
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn output_format(&self) -> Option<&str> {
        self.output_format.as_deref()
    }

    /// Returns false, leaving the current choice alone, when `format` is
    /// not one of the candidates.
    pub(super) fn choose(&mut self, format: &str) -> bool {
        if self.candidates.iter().any(|c| c == format) {
            self.output_format = Some(format.to_string());
            true
        } else {
            false
        }
    }

    pub(super) fn extend_candidates(&mut self, suggestions: &[String]) -> usize {
        let before = self.candidates.len();
        self.candidates = catalog::merge_suggestions(&self.candidates, suggestions);
        self.candidates.len() - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_candidate() {
        let selection = Selection::new(SelectedFile::new("r", "report.docx", 1));
        assert_eq!(selection.candidates()[0], "PDF");
        assert_eq!(selection.output_format(), Some("PDF"));
    }

    #[test]
    fn unknown_type_has_no_format() {
        let selection = Selection::new(SelectedFile::new("r", "notes.xyz", 1));
        assert!(selection.candidates().is_empty());
        assert_eq!(selection.output_format(), None);
    }

    #[test]
    fn choose_only_accepts_candidates() {
        let mut selection = Selection::new(SelectedFile::new("r", "photo.png", 1));
        assert!(selection.choose("WEBP"));
        assert_eq!(selection.output_format(), Some("WEBP"));
        assert!(!selection.choose("MP3"));
        assert_eq!(selection.output_format(), Some("WEBP"));
    }

    #[test]
    fn extending_keeps_existing_choice() {
        let mut selection = Selection::new(SelectedFile::new("r", "photo.heic", 1));
        let added = selection.extend_candidates(&["JPG".to_string(), "AVIF".to_string()]);
        assert_eq!(added, 1);
        assert_eq!(selection.candidates().last().map(String::as_str), Some("AVIF"));
        assert_eq!(selection.output_format(), Some("JPG"));
    }
}
