//! Media type sniffing for payloads that arrive without a declared type.

/// Returns the media type implied by the leading magic bytes, if recognised.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        [0x42, 0x4D, ..] => Some("image/bmp"),
        _ => None,
    }
}

/// Like [`sniff_image_mime`], falling back to `image/png` for unknown data.
pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    sniff_image_mime(bytes).unwrap_or_else(|| {
        tracing::warn!(
            "Unrecognized image format (first 4 bytes: {:02X?}), falling back to image/png",
            &bytes[..bytes.len().min(4)]
        );
        "image/png"
    })
}
