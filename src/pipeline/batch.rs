//! Batch construction: pair each page with the run's processing-mode tag.
//!
//! The batch is the unit handed to the OCR engine in a single call. Batch
//! order is defined to equal page order; nothing downstream carries an
//! explicit page number, so this ordering is load-bearing.

use crate::config::ProcessingMode;
use crate::pipeline::pages::PageImage;

/// One unit of OCR work: a page plus the extraction behaviour to apply.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub page: PageImage,
    pub mode: ProcessingMode,
}

/// Map the ordered page sequence 1:1 to work items.
///
/// Pure; an empty page sequence yields an empty batch, which is legal and
/// flows through to an empty output document.
pub fn build_batch(pages: Vec<PageImage>, mode: ProcessingMode) -> Vec<WorkItem> {
    pages
        .into_iter()
        .map(|page| WorkItem { page, mode })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn page(index: usize) -> PageImage {
        PageImage {
            index,
            image: RgbImage::new(2, 2),
        }
    }

    #[test]
    fn batch_preserves_page_order_and_tags_every_item() {
        let pages = vec![page(0), page(1), page(2)];
        let batch = build_batch(pages, ProcessingMode::Plain);

        assert_eq!(batch.len(), 3);
        for (i, item) in batch.iter().enumerate() {
            assert_eq!(item.page.index, i);
            assert_eq!(item.mode, ProcessingMode::Plain);
        }
    }

    #[test]
    fn empty_input_yields_empty_batch() {
        assert!(build_batch(Vec::new(), ProcessingMode::LayoutAware).is_empty());
    }
}
