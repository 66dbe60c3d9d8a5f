//! Fixed-window chunking with overlap between consecutive windows.

use super::types::Chunk;

/// Split `text` into at most `max_chunks` windows of up to `max_chunk_size` characters.
///
/// Each window after the first starts `max_chunk_size - overlap` characters after the
/// previous window's start, so a passage spanning a window boundary stays visible at the
/// head of the next window. When `overlap >= max_chunk_size` the step is clamped to one
/// character to guarantee progress. Sizes are measured in characters, never bytes.
pub fn chunk_text(text: &str, max_chunk_size: usize, overlap: usize, max_chunks: usize) -> Vec<Chunk> {
    let chars: Vec<char> = text.chars().collect();
    let total = chars.len();
    if total == 0 || max_chunk_size == 0 || max_chunks == 0 {
        return Vec::new();
    }

    let step = max_chunk_size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < total && chunks.len() < max_chunks {
        let end = (start + max_chunk_size).min(total);
        chunks.push(Chunk {
            index: chunks.len(),
            text: chars[start..end].iter().collect(),
        });
        if end == total {
            break;
        }
        start += step;
    }

    chunks
}
