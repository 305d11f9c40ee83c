//! Sliding-window text chunking with page tracking

use crate::config::ChunkingConfig;
use crate::types::{Chunk, Document, PageRecord};

/// Cuts document text into fixed-size overlapping character windows.
///
/// Page contents are concatenated in order (newline-separated, tracking each
/// page's starting offset) and windows of `chunk_size` characters are emitted,
/// advancing `chunk_size - overlap` characters per step. The final window may
/// be shorter. Identical input always yields an identical window sequence.
pub struct WindowChunker {
    /// Window size in characters
    chunk_size: usize,
    /// Overlap between consecutive windows
    overlap: usize,
}

impl WindowChunker {
    /// Create a new chunker. `overlap` must be smaller than `chunk_size`;
    /// config validation enforces this before we get here.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        debug_assert!(chunk_size > 0 && overlap < chunk_size);
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Create a chunker from configuration
    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    /// Chunk a document's pages into windows.
    pub fn chunk(&self, doc: &Document, pages: &[PageRecord]) -> Vec<Chunk> {
        let (text, page_starts) = concat_pages(pages);
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let step = self.chunk_size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0usize;
        let mut index = 0u32;

        loop {
            let end = (start + self.chunk_size).min(chars.len());
            let content: String = chars[start..end].iter().collect();
            let page_number = page_for_offset(&page_starts, start);

            chunks.push(Chunk::new(
                doc.id,
                doc.filename.clone(),
                content,
                page_number,
                start,
                end,
                index,
            ));

            if end == chars.len() {
                break;
            }
            start += step;
            index += 1;
        }

        chunks
    }
}

/// Join page contents with newlines, recording the character offset at which
/// each page begins.
fn concat_pages(pages: &[PageRecord]) -> (String, Vec<(usize, u32)>) {
    let mut text = String::new();
    let mut starts = Vec::with_capacity(pages.len());
    let mut char_len = 0usize;

    for page in pages {
        if char_len > 0 {
            text.push('\n');
            char_len += 1;
        }
        starts.push((char_len, page.page_number));
        text.push_str(&page.content);
        char_len += page.content.chars().count();
    }

    (text, starts)
}

/// Page containing the given character offset.
fn page_for_offset(page_starts: &[(usize, u32)], offset: usize) -> u32 {
    let idx = page_starts.partition_point(|&(start, _)| start <= offset);
    page_starts
        .get(idx.saturating_sub(1))
        .map(|&(_, page)| page)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::new("test.pdf".to_string(), "hash".to_string(), 1, 0)
    }

    fn one_page(len: usize) -> Vec<PageRecord> {
        let content: String = "abcdefghij".chars().cycle().take(len).collect();
        vec![PageRecord {
            page_number: 1,
            content,
        }]
    }

    /// Expected window count for the sliding-window loop.
    fn expected_count(len: usize, size: usize, overlap: usize) -> usize {
        if len <= size {
            1
        } else {
            (len - overlap).div_ceil(size - overlap)
        }
    }

    #[test]
    fn window_count_matches_formula() {
        for len in [1, 50, 51, 130, 399, 400, 401, 500, 900, 901, 1234] {
            let chunks = WindowChunker::new(50, 10).chunk(&doc(), &one_page(len));
            assert_eq!(
                chunks.len(),
                expected_count(len, 50, 10),
                "length {}",
                len
            );
        }
    }

    #[test]
    fn default_config_window_count() {
        let chunker = WindowChunker::from_config(&ChunkingConfig::default());
        let chunks = chunker.chunk(&doc(), &one_page(1700));
        // step 400: windows at 0, 400, 800, and 1200 (which ends at 1700)
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks.len(), expected_count(1700, 500, 100));
    }

    #[test]
    fn no_window_exceeds_chunk_size() {
        let chunks = WindowChunker::new(50, 10).chunk(&doc(), &one_page(1234));
        assert!(chunks.iter().all(|c| c.content.chars().count() <= 50));
    }

    #[test]
    fn consecutive_windows_share_exact_overlap() {
        let chunks = WindowChunker::new(50, 10).chunk(&doc(), &one_page(500));
        for pair in chunks.windows(2) {
            let tail: String = pair[0].content.chars().rev().take(10).collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            let head: String = pair[1].content.chars().take(10).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn final_window_may_be_shorter() {
        let chunks = WindowChunker::new(50, 10).chunk(&doc(), &one_page(90));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content.chars().count(), 50);
        assert_eq!(chunks[1].content.chars().count(), 50); // 40..90
        let chunks = WindowChunker::new(50, 10).chunk(&doc(), &one_page(75));
        assert_eq!(chunks[1].content.chars().count(), 35); // 40..75
    }

    #[test]
    fn chunking_is_deterministic() {
        let pages = one_page(987);
        let a = WindowChunker::new(50, 10).chunk(&doc(), &pages);
        let b = WindowChunker::new(50, 10).chunk(&doc(), &pages);
        let contents = |chunks: &[Chunk]| {
            chunks
                .iter()
                .map(|c| (c.content.clone(), c.char_start, c.char_end, c.chunk_index))
                .collect::<Vec<_>>()
        };
        assert_eq!(contents(&a), contents(&b));
    }

    #[test]
    fn offsets_are_contiguous_windows() {
        let chunks = WindowChunker::new(50, 10).chunk(&doc(), &one_page(130));
        assert_eq!(
            chunks
                .iter()
                .map(|c| (c.char_start, c.char_end))
                .collect::<Vec<_>>(),
            vec![(0, 50), (40, 90), (80, 130)]
        );
    }

    #[test]
    fn windows_map_back_to_their_page() {
        let pages = vec![
            PageRecord {
                page_number: 1,
                content: "a".repeat(60),
            },
            PageRecord {
                page_number: 2,
                content: "b".repeat(60),
            },
        ];
        let chunks = WindowChunker::new(50, 10).chunk(&doc(), &pages);
        assert_eq!(chunks[0].page_number, 1);
        // last window starts inside page 2's text (page 2 begins at offset 61)
        assert_eq!(chunks.last().unwrap().page_number, 2);
        assert!(chunks.iter().all(|c| c.filename == "test.pdf"));
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let pages = vec![PageRecord {
            page_number: 1,
            content: "é".repeat(120),
        }];
        let chunks = WindowChunker::new(50, 10).chunk(&doc(), &pages);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.content.chars().all(|ch| ch == 'é')));
    }

    #[test]
    fn empty_pages_produce_no_chunks() {
        let pages = vec![PageRecord {
            page_number: 1,
            content: String::new(),
        }];
        assert!(WindowChunker::new(50, 10).chunk(&doc(), &pages).is_empty());
    }
}
