pub mod pdftotext;

use crate::error::TerrasError;

/// Content extracted from a single page of a report.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
}

impl PageContent {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from document bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, TerrasError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Split extracted text into pages on form feeds, the page separator pdftotext writes.
///
/// A trailing form feed does not produce an extra empty page.
pub fn split_pages(text: &str) -> Vec<PageContent> {
    text.split('\x0c')
        .enumerate()
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            lines: page_text.lines().map(|l| l.to_string()).collect(),
        })
        .filter(|p| !p.lines.is_empty() || p.page_number == 1)
        .collect()
}

/// Backend for text that was already extracted (pdftotext output saved as .txt).
pub struct PlainTextExtractor;

impl PdfExtractor for PlainTextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageContent>, TerrasError> {
        Ok(split_pages(&String::from_utf8_lossy(bytes)))
    }

    fn backend_name(&self) -> &str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages() {
        let pages = split_pages("a\nb\x0cc\x0c");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines, vec!["a", "b"]);
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(pages[1].text(), "c");
    }

    #[test]
    fn test_empty_text_is_one_empty_page() {
        let pages = split_pages("");
        assert_eq!(pages.len(), 1);
        assert!(pages[0].lines.is_empty());
    }

    #[test]
    fn test_plain_text_extractor() {
        let pages = PlainTextExtractor
            .extract_pages("Município A- I\nCastro 1,00".as_bytes())
            .unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].lines.len(), 2);
    }
}
