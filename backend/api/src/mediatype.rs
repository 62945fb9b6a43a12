/// Media type sniffing from magic bytes
///
/// Pure and deterministic: inspects a bounded prefix of a binary blob for
/// known file-format signatures and returns the matching MIME type. Callers
/// decide what an unrecognized buffer means (the feed labels it "unknown",
/// the media endpoint rejects it with 400).

/// How many leading bytes are ever inspected.
const SNIFF_PREFIX_LEN: usize = 16;

/// Sniff the MIME type of a binary blob from its leading bytes.
///
/// Returns `None` when no known signature matches.
pub fn sniff(bytes: &[u8]) -> Option<&'static str> {
    let prefix = &bytes[..bytes.len().min(SNIFF_PREFIX_LEN)];

    if prefix.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }
    if prefix.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if prefix.starts_with(b"GIF87a") || prefix.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if prefix.starts_with(b"RIFF") && prefix.len() >= 12 {
        match &prefix[8..12] {
            b"WEBP" => return Some("image/webp"),
            b"WAVE" => return Some("audio/wav"),
            b"AVI " => return Some("video/x-msvideo"),
            _ => {}
        }
    }
    if prefix.starts_with(b"BM") {
        return Some("image/bmp");
    }
    if prefix.starts_with(b"%PDF") {
        return Some("application/pdf");
    }
    if prefix.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
        return Some("application/zip");
    }
    if prefix.starts_with(&[0x1F, 0x8B]) {
        return Some("application/gzip");
    }
    // ISO-BMFF containers carry their signature at offset 4
    if prefix.len() >= 8 && &prefix[4..8] == b"ftyp" {
        return Some("video/mp4");
    }
    if prefix.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
        return Some("video/webm");
    }
    if prefix.starts_with(b"OggS") {
        return Some("audio/ogg");
    }
    if prefix.starts_with(b"ID3") {
        return Some("audio/mpeg");
    }
    // Bare MPEG audio frame sync: 11 set bits
    if prefix.len() >= 2 && prefix[0] == 0xFF && prefix[1] & 0xE0 == 0xE0 {
        return Some("audio/mpeg");
    }

    None
}
