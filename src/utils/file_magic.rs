/// 检查上传图片的文件头是否与扩展名一致
///
/// `extension` 带点号，如 ".png"；只识别头像允许的图片格式，其余一律拒绝。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        ".png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        ".gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        // RIFF....WEBP
        ".webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",
        _ => false,
    }
}

/// 根据扩展名给出下载时使用的 Content-Type
pub fn image_content_type(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, ".png"));
        assert!(validate_magic_bytes(&png_header, ".PNG"));
        assert!(!validate_magic_bytes(&png_header, ".jpg"));
    }

    #[test]
    fn test_webp_needs_full_header() {
        assert!(validate_magic_bytes(b"RIFF\x00\x00\x00\x00WEBPVP8 ", ".webp"));
        assert!(!validate_magic_bytes(b"RIFF\x00\x00", ".webp"));
    }

    #[test]
    fn test_non_image_rejected() {
        assert!(!validate_magic_bytes(b"%PDF-1.4", ".pdf"));
        assert!(!validate_magic_bytes(b"hello", ".txt"));
        assert!(!validate_magic_bytes(&[], ".png"));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(image_content_type(".JPG"), "image/jpeg");
        assert_eq!(image_content_type(".bin"), "application/octet-stream");
    }
}
