//! End-to-end inference over a synthetic archive: locate, carve, extract,
//! classify, and size two frames with nothing but the byte stream.

use texcarve_core::{
    carve_spans, codec, FormatClassifier, FrameExtractor, FrameLocator, TextureFormat,
    TextureLayout, ZstdFrameDecompressor, FRAME_MAGIC, TRAILER_TRIM,
};

/// 64 bytes that score like BC1: a steady color in the first half,
/// alternating far-apart colors in the second.
fn bc1_like_payload() -> Vec<u8> {
    let mut payload = Vec::with_capacity(64);
    for _ in 0..8 {
        payload.extend_from_slice(&[0x11, 0x22, 0x11, 0x22]);
    }
    for i in 0..8 {
        let unit: [u8; 4] = if i % 2 == 0 {
            [0x11, 0x22, 0x11, 0x22]
        } else {
            [0x4C, 0xB3, 0x4C, 0xB3]
        };
        payload.extend_from_slice(&unit);
    }
    payload
}

/// 35 bytes: divisible by neither 8 nor 16, so only R8 survives
/// eligibility.
fn r8_only_payload() -> Vec<u8> {
    (0..35u8).collect()
}

fn compress(payload: &[u8]) -> Vec<u8> {
    zstd::bulk::compress(payload, 3).expect("compression of test payload")
}

#[test]
fn two_frame_archive_end_to_end() {
    let first = bc1_like_payload();
    let second = r8_only_payload();

    let frame_a = compress(&first);
    let frame_b = compress(&second);
    let mut archive = frame_a.clone();
    archive.extend_from_slice(&frame_b);

    // Real zstd frames begin with the magic the locator scans for.
    assert_eq!(&archive[..4], FRAME_MAGIC);

    let locator = FrameLocator::new();
    let offsets = locator.scan(&archive);
    assert_eq!(offsets, vec![0, frame_a.len()]);

    let spans = carve_spans(&offsets, archive.len());
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].end, spans[1].start);
    assert_eq!(spans[1].end, archive.len());

    let extractor = FrameExtractor::new(ZstdFrameDecompressor::new());
    let payloads: Vec<Vec<u8>> = spans
        .iter()
        .map(|span| extractor.extract(&archive, *span).expect("frame decompresses"))
        .collect();
    assert_eq!(payloads[0], first);
    assert_eq!(payloads[1], second);

    let classifier = FormatClassifier::new();
    let format_a = classifier.classify(&payloads[0]);
    let format_b = classifier.classify(&payloads[1]);
    assert_eq!(format_a, TextureFormat::Bc1);
    assert_eq!(format_b, TextureFormat::R8);

    // 64 bytes of BC1 = 8 blocks, most-square split 4x2.
    let layout_a = TextureLayout::infer(payloads[0].len(), format_a);
    assert_eq!(layout_a.block_count, 8);
    assert_eq!((layout_a.blocks_wide, layout_a.blocks_high), (4, 2));
    assert_eq!((layout_a.width_px, layout_a.height_px), (16, 8));

    let layout_b = TextureLayout::infer(payloads[1].len(), format_b);
    assert_eq!((layout_b.width_px, layout_b.height_px), (7, 5));

    let decoded_a = codec::decode_payload(&payloads[0], format_a);
    assert_eq!(decoded_a.rgba.len(), 16 * 8 * 4);
    let decoded_b = codec::decode_payload(&payloads[1], format_b);
    assert_eq!(decoded_b.rgba.len(), 7 * 5 * 4);
    // R8 decodes the payload bytes straight into gray texels.
    assert_eq!(decoded_b.rgba[4 * 4], 4);
}

#[test]
fn trailer_bytes_before_next_magic_are_recovered() {
    let first = bc1_like_payload();
    let second = r8_only_payload();

    // 39 stray bytes trail the first frame before the second one's magic.
    let mut archive = compress(&first);
    archive.extend_from_slice(&[0xABu8; TRAILER_TRIM]);
    let second_start = archive.len();
    archive.extend_from_slice(&compress(&second));

    let locator = FrameLocator::new();
    let offsets = locator.scan(&archive);
    assert_eq!(offsets, vec![0, second_start]);

    let spans = carve_spans(&offsets, archive.len());
    let extractor = FrameExtractor::new(ZstdFrameDecompressor::new());

    // The first span over-reads into the trailer; the trim retry recovers it.
    assert_eq!(extractor.extract(&archive, spans[0]).unwrap(), first);
    assert_eq!(extractor.extract(&archive, spans[1]).unwrap(), second);
}

#[test]
fn empty_archive_means_zero_frames() {
    let locator = FrameLocator::new();
    let offsets = locator.scan(&[0u8; 256]);
    assert!(offsets.is_empty());
    assert!(carve_spans(&offsets, 256).is_empty());
}
