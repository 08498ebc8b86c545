#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Encodes a blank 24-bit BMP of the given size.
pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

/// Writes `count` frames named `F000.bmp`, `F001.bmp`, ... into `dir` and
/// returns their paths in order.
pub fn write_frames(dir: &Path, count: usize, width: u32, height: u32) -> Vec<String> {
    (0..count)
        .map(|i| {
            let path = dir.join(format!("F{i:03}.bmp"));
            write_bmp(&path, width, height);
            path.to_string_lossy().into_owned()
        })
        .collect()
}

/// Frame names under a directory that does not exist, so that nothing can
/// be read from them.
pub fn phantom_names(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("/nonexistent-croppan-frames/F{i:03}"))
        .collect()
}
