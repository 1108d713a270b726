//! Chunk-based tile rendering.
//!
//! Divides the image into rectangular chunks that can be rendered
//! independently and in parallel. Chunk coordinates are 1-based and
//! inclusive, with row 1 at the bottom of the image.

/// Split `1..=total` into consecutive inclusive ranges of at most
/// `chunk_size` values.
///
/// `chunked_range(10, 3)` is `[(1, 3), (4, 6), (7, 9), (10, 10)]`. A chunk
/// size larger than `total` yields a single range.
pub fn chunked_range(total: u32, chunk_size: u32) -> Vec<(u32, u32)> {
    debug_assert!(chunk_size >= 1, "chunk size must be at least 1");
    let chunk_size = chunk_size.clamp(1, total.max(1));

    let mut ranges = Vec::with_capacity(total.div_ceil(chunk_size) as usize);
    let mut start = 1;
    while start <= total {
        let end = start.saturating_add(chunk_size - 1).min(total);
        ranges.push((start, end));
        if end == total {
            break;
        }
        start = end + 1;
    }
    ranges
}

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// First and last column, 1-based inclusive
    pub x: (u32, u32),
    /// First and last row, 1-based inclusive, counted from the bottom
    pub y: (u32, u32),
    /// Index of this chunk in the render order
    pub index: usize,
}

impl Chunk {
    pub fn width(&self) -> u32 {
        self.x.1 - self.x.0 + 1
    }

    pub fn height(&self) -> u32 {
        self.y.1 - self.y.0 + 1
    }

    /// Get the total number of pixels in this chunk.
    pub fn pixel_count(&self) -> u32 {
        self.width() * self.height()
    }
}

/// Generate chunks covering a `width` x `height` image, sorted in spiral
/// order from the center.
///
/// The chunks are the cross product of the column and row ranges, so
/// every pixel belongs to exactly one chunk.
pub fn generate_chunks(width: u32, height: u32, chunk_size: u32) -> Vec<Chunk> {
    let columns = chunked_range(width, chunk_size);
    let rows = chunked_range(height, chunk_size);

    let mut chunks: Vec<Chunk> = columns
        .iter()
        .flat_map(|&x| rows.iter().map(move |&y| Chunk { x, y, index: 0 }))
        .collect();

    sort_spiral(&mut chunks, width, height);

    // Update indices after sorting
    for (i, chunk) in chunks.iter_mut().enumerate() {
        chunk.index = i;
    }

    chunks
}

/// Sort chunks by distance from image center (spiral order).
///
/// Chunks closer to the center are rendered first, so a partial
/// render shows the middle of the image.
fn sort_spiral(chunks: &mut [Chunk], width: u32, height: u32) {
    let center_x = (width as f32 + 1.0) / 2.0;
    let center_y = (height as f32 + 1.0) / 2.0;

    let distance = |chunk: &Chunk| {
        let cx = (chunk.x.0 + chunk.x.1) as f32 / 2.0;
        let cy = (chunk.y.0 + chunk.y.1) as f32 / 2.0;
        (cx - center_x).powi(2) + (cy - center_y).powi(2)
    };

    chunks.sort_by(|a, b| {
        distance(a)
            .partial_cmp(&distance(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunked_range() {
        assert_eq!(chunked_range(10, 3), vec![(1, 3), (4, 6), (7, 9), (10, 10)]);
        assert_eq!(chunked_range(10, 5), vec![(1, 5), (6, 10)]);
        assert_eq!(chunked_range(1, 1), vec![(1, 1)]);
    }

    #[test]
    fn test_chunked_range_oversized_chunk() {
        assert_eq!(chunked_range(7, 50), vec![(1, 7)]);
        assert!(chunked_range(0, 50).is_empty());
    }

    #[test]
    fn test_chunked_range_is_gap_free() {
        for total in 1..40 {
            for chunk_size in 1..12 {
                let ranges = chunked_range(total, chunk_size);
                assert_eq!(ranges[0].0, 1);
                assert_eq!(ranges[ranges.len() - 1].1, total);
                for pair in ranges.windows(2) {
                    assert_eq!(pair[0].1 + 1, pair[1].0);
                }
                assert!(ranges.iter().all(|(s, e)| s <= e && e - s < chunk_size));
            }
        }
    }

    #[test]
    fn test_generate_chunks_exact_fit() {
        let chunks = generate_chunks(128, 128, 64);
        assert_eq!(chunks.len(), 4); // 2x2 grid

        // Total pixels should equal image size
        let total_pixels: u32 = chunks.iter().map(|c| c.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_chunks_partial_fit() {
        let chunks = generate_chunks(100, 30, 64);
        assert_eq!(chunks.len(), 2);
        let total_pixels: u32 = chunks.iter().map(|c| c.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 30);
    }

    #[test]
    fn test_generate_chunks_cover_every_pixel_once() {
        let (width, height) = (37, 23);
        let mut seen = vec![0u8; (width * height) as usize];
        for chunk in generate_chunks(width, height, 8) {
            for y in chunk.y.0..=chunk.y.1 {
                for x in chunk.x.0..=chunk.x.1 {
                    seen[((y - 1) * width + (x - 1)) as usize] += 1;
                }
            }
        }
        assert!(seen.iter().all(|&n| n == 1));
    }

    #[test]
    fn test_spiral_order_starts_at_center() {
        let chunks = generate_chunks(90, 90, 30);
        assert_eq!(chunks.len(), 9);
        assert_eq!(chunks[0].x, (31, 60));
        assert_eq!(chunks[0].y, (31, 60));
        assert!(chunks.iter().enumerate().all(|(i, c)| c.index == i));
    }
}
