use std::path::Path;

const OCTET_STREAM: &str = "application/octet-stream";

/// MIME type declared to the vision model for an uploaded image.
///
/// The extension wins when it names an image type; otherwise the leading bytes
/// are inspected. Anything unrecognised is passed through as octet-stream.
pub fn image_mime_type(path: &Path, head: &[u8]) -> String {
    let guessed = mime_guess::from_path(path).first();
    if let Some(mime) = guessed.filter(|m| m.type_() == mime_guess::mime::IMAGE) {
        return mime.essence_str().to_string();
    }

    sniff_image(head).unwrap_or(OCTET_STREAM).to_string()
}

fn sniff_image(head: &[u8]) -> Option<&'static str> {
    match head {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        [b'B', b'M', ..] => Some("image/bmp"),
        [_, _, _, _, b'f', b't', b'y', b'p', b'h', b'e', b'i', b'c', ..] => Some("image/heic"),
        _ => None,
    }
}
