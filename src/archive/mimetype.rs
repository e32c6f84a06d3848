/// Sniffs a downloaded payload. Unknown content is reported as octet-stream.
pub fn detect_mimetype(bytes: &[u8]) -> String {
    match infer::get(bytes) {
        Some(k) => k.mime_type().to_string(),
        None => "application/octet-stream".to_string(),
    }
}

pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_HEADER: [u8; 11] = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_mimetype_detection() {
        assert_eq!(detect_mimetype(&JPEG_HEADER), "image/jpeg");
        assert_eq!(detect_mimetype(&PNG_HEADER), "image/png");
        assert!(is_image(&detect_mimetype(&PNG_HEADER)));

        // An HTML error page served in place of the image must not pass.
        let page = b"<html><body>Not Found</body></html>";
        assert!(!is_image(&detect_mimetype(page)));
        assert_eq!(detect_mimetype(&[]), "application/octet-stream");
    }
}
