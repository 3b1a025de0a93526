//! Pixel format conversion for GPU readback.

use rayon::prelude::*;

/// Row length in bytes of an RGBA8 texture copy, rounded up to `alignment`.
#[must_use]
pub fn padded_rgba_row_len(width: u32, alignment: u32) -> usize {
    let unpadded = width as usize * 4;
    let alignment = alignment.max(1) as usize;

    unpadded.div_ceil(alignment) * alignment
}

/// Drops row padding and the alpha channel from RGBA readback data.
///
/// Rows are converted in parallel and keep their order.
///
/// # Panics
/// Panics if `padded_row_len` is shorter than one RGBA row, or if `src` does
/// not hold `height` padded rows.
#[must_use]
pub fn strip_padded_rgba(src: &[u8], width: u32, height: u32, padded_row_len: usize) -> Vec<u8> {
    let rgba_row_len = width as usize * 4;
    let rgb_row_len = width as usize * 3;

    assert!(
        padded_row_len >= rgba_row_len,
        "padded row length {} is shorter than {} RGBA bytes",
        padded_row_len,
        rgba_row_len
    );
    assert!(
        src.len() >= padded_row_len * height as usize,
        "src length {} is too short for {} rows of {} bytes",
        src.len(),
        height,
        padded_row_len
    );

    let mut dst = vec![0; rgb_row_len * height as usize];

    if rgb_row_len == 0 {
        return dst;
    }

    dst.par_chunks_exact_mut(rgb_row_len)
        .zip(src.par_chunks(padded_row_len))
        .for_each(|(dst_row, src_row)| {
            for (dst_pixel, src_pixel) in dst_row
                .chunks_exact_mut(3)
                .zip(src_row[..rgba_row_len].chunks_exact(4))
            {
                dst_pixel.copy_from_slice(&src_pixel[..3]);
            }
        });

    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_row_len_rounds_up_to_alignment() {
        assert_eq!(padded_rgba_row_len(64, 256), 256);
        assert_eq!(padded_rgba_row_len(65, 256), 512);
        assert_eq!(padded_rgba_row_len(1, 256), 256);
        assert_eq!(padded_rgba_row_len(3, 1), 12);
    }

    #[test]
    fn test_strip_known_values() {
        let src = vec![
            255, 0, 0, 255, // red
            0, 255, 0, 128, // green
            0, 0, 255, 0, // blue
            255, 255, 255, 255, // white
        ];

        let dst = strip_padded_rgba(&src, 2, 2, 8);

        assert_eq!(dst, vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255]);
    }

    #[test]
    fn test_strip_discards_row_padding() {
        let src = vec![
            1, 2, 3, 4, 9, 9, 9, 9, // row 0 plus padding
            5, 6, 7, 8, 9, 9, 9, 9, // row 1 plus padding
        ];

        let dst = strip_padded_rgba(&src, 1, 2, 8);

        assert_eq!(dst, vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_strip_preserves_row_order_for_many_rows() {
        let width = 3;
        let height = 300;
        let padded = padded_rgba_row_len(width, 256);
        let src: Vec<u8> = (0..height)
            .flat_map(|row| {
                let mut bytes = vec![row as u8; width as usize * 4];
                bytes.resize(padded, 0);
                bytes
            })
            .collect();

        let dst = strip_padded_rgba(&src, width, height, padded);

        for (row, chunk) in dst.chunks_exact(width as usize * 3).enumerate() {
            assert!(chunk.iter().all(|&byte| byte == row as u8));
        }
    }

    #[test]
    #[should_panic(expected = "too short")]
    fn test_strip_rejects_short_source() {
        let _ = strip_padded_rgba(&[0; 8], 1, 2, 8);
    }
}
