use std::fmt;
use std::sync::Arc;

/// A user-selected dataset, forwarded verbatim to the Encryption Service.
///
/// The bytes are shared, so cloning a session snapshot never copies the
/// dataset.
#[derive(Clone, PartialEq, Eq)]
pub struct DatasetInput {
    file_name: String,
    content: Arc<[u8]>,
}

impl DatasetInput {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: Arc::from(content.into()),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Size in KiB, as shown next to the selected file.
    pub fn size_kib(&self) -> f64 {
        self.content.len() as f64 / 1024.0
    }
}

// Dataset bytes stay out of debug output and logs.
impl fmt::Debug for DatasetInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetInput")
            .field("file_name", &self.file_name)
            .field("len", &self.content.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_content() {
        let input = DatasetInput::new("secret.csv", b"name,ssn\nalice,123".to_vec());
        let debug = format!("{:?}", input);
        assert!(debug.contains("secret.csv"));
        assert!(!debug.contains("alice"));
    }

    #[test]
    fn test_size_kib() {
        let input = DatasetInput::new("a.txt", vec![0u8; 2048]);
        assert_eq!(input.size_kib(), 2.0);
        assert_eq!(input.len(), 2048);
    }
}
