use std::path::Path;

/// Assigns a MIME type to a file
pub trait MimeClassifier: Send + Sync {
    fn classify(&self, path: &Path) -> Option<String>;
}

/// Guesses the MIME type from the file extension
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtensionMimeClassifier;

impl MimeClassifier for ExtensionMimeClassifier {
    fn classify(&self, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        mime_guess::from_ext(&ext).first().map(|m| m.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_classifier() {
        let classifier = ExtensionMimeClassifier;
        assert_eq!(classifier.classify(Path::new("/a/b.pdf")).as_deref(), Some("application/pdf"));
        assert_eq!(classifier.classify(Path::new("/a/b.PNG")).as_deref(), Some("image/png"));
        assert_eq!(classifier.classify(Path::new("/a/README")), None);
    }
}
