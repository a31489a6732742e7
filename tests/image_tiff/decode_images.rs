extern crate tiff;

use tiff::encoder::colortype;
use tiff::encoder::compression::{Deflate, Lzw, Uncompressed};

use tiff_meta::tiff::tags::{CompressionMethod, PhotometricInterpretation, PlanarConfiguration};
use tiff_meta::{ChunkLayout, ImageMode};

use super::util::{decoded_strips, encode, open_tiff};

fn native_bytes(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_ne_bytes()).collect()
}

#[test]
fn test_gray8() {
    let pixels: Vec<u8> = (0..32 * 16).map(|i| i as u8).collect();
    let file = encode::<colortype::Gray8, _>(32, 16, Uncompressed, &[&pixels[..]]);
    let tiff = open_tiff(&file);

    assert_eq!(tiff.ifds().len(), 1);
    let ifd = &tiff.ifds()[0];
    assert_eq!(ifd.image_width(), Some(32));
    assert_eq!(ifd.image_height(), Some(16));
    assert_eq!(ifd.bits_per_sample(), &[8]);
    assert_eq!(
        ifd.photometric_interpretation(),
        Some(PhotometricInterpretation::BlackIsZero)
    );
    assert_eq!(ifd.planar_configuration(), PlanarConfiguration::Chunky);

    let layout = ifd.image_layout().unwrap();
    assert_eq!(layout.mode(), ImageMode::Gray);
    assert!(matches!(layout.chunk_layout(), ChunkLayout::Strips { .. }));
    assert_eq!(decoded_strips(&tiff, &file, 0), pixels);
}

#[test]
fn test_gray16() {
    let pixels: Vec<u16> = (0..20 * 10).map(|i| i * 300).collect();
    let file = encode::<colortype::Gray16, _>(20, 10, Uncompressed, &[&pixels[..]]);
    let tiff = open_tiff(&file);

    let ifd = &tiff.ifds()[0];
    assert_eq!(ifd.bits_per_sample(), &[16]);
    let layout = ifd.image_layout().unwrap();
    assert_eq!(layout.mode(), ImageMode::Gray);
    assert_eq!(layout.bits_per_sample(), 16);
    assert_eq!(decoded_strips(&tiff, &file, 0), native_bytes(&pixels));
}

#[test]
fn test_rgb8_deflate() {
    let pixels: Vec<u8> = (0..64 * 64 * 3).map(|i| (i / 7) as u8).collect();
    let file = encode::<colortype::RGB8, _>(64, 64, Deflate::default(), &[&pixels[..]]);
    let tiff = open_tiff(&file);

    let ifd = &tiff.ifds()[0];
    assert_eq!(ifd.compression(), CompressionMethod::Deflate);
    assert_eq!(ifd.samples_per_pixel(), 3);
    let layout = ifd.image_layout().unwrap();
    assert_eq!(layout.mode(), ImageMode::RGB);
    assert_eq!(decoded_strips(&tiff, &file, 0), pixels);
}

#[test]
fn test_rgb16_lzw() {
    let pixels: Vec<u16> = (0..16 * 8 * 3).map(|i| (i % 97) * 600).collect();
    let file = encode::<colortype::RGB16, _>(16, 8, Lzw::default(), &[&pixels[..]]);
    let tiff = open_tiff(&file);

    let ifd = &tiff.ifds()[0];
    assert_eq!(ifd.compression(), CompressionMethod::LZW);
    assert_eq!(ifd.bits_per_sample(), &[16, 16, 16]);
    let layout = ifd.image_layout().unwrap();
    assert_eq!(layout.mode(), ImageMode::RGB);
    assert_eq!(decoded_strips(&tiff, &file, 0), native_bytes(&pixels));
}

#[test]
fn test_multi_page() {
    let first = vec![10u8; 8 * 8];
    let second = vec![20u8; 8 * 8];
    let file = encode::<colortype::Gray8, _>(8, 8, Uncompressed, &[&first[..], &second[..]]);
    let tiff = open_tiff(&file);

    assert_eq!(tiff.ifds().len(), 2);
    assert!(tiff.ifds()[0].next_ifd_offset().is_some());
    assert!(tiff.ifds()[1].next_ifd_offset().is_none());
    assert_eq!(decoded_strips(&tiff, &file, 0), first);
    assert_eq!(decoded_strips(&tiff, &file, 1), second);
}
