//! Static table of which output formats each input extension can be
//! converted into.

/// Input extension → candidate outputs. The first candidate is the one
/// preselected when a file of that type is chosen.
const CONVERSION_MAP: &[(&str, &[&str])] = &[
    // Documents
    ("DOCX", &["PDF", "TXT", "DOC", "ODT", "RTF", "HTML", "EPUB"]),
    ("DOC", &["PDF", "DOCX", "TXT", "ODT", "RTF", "HTML"]),
    ("ODT", &["PDF", "DOCX", "DOC", "TXT", "RTF"]),
    ("RTF", &["PDF", "DOCX", "DOC", "TXT", "ODT"]),
    ("TXT", &["PDF", "DOCX", "ODT", "RTF", "HTML"]),
    ("HTML", &["PDF", "DOCX", "TXT", "MD"]),
    ("MD", &["PDF", "HTML", "DOCX", "TXT"]),
    ("PDF", &["DOCX", "TXT", "JPG", "PNG", "HTML", "EPUB"]),
    ("EPUB", &["PDF", "MOBI", "TXT", "DOCX"]),
    // Spreadsheets
    ("XLSX", &["PDF", "CSV", "XLS", "ODS", "HTML"]),
    ("XLS", &["XLSX", "PDF", "CSV", "ODS"]),
    ("ODS", &["XLSX", "PDF", "CSV", "XLS"]),
    ("CSV", &["XLSX", "PDF", "ODS", "JSON"]),
    // Presentations
    ("PPTX", &["PDF", "PPT", "ODP", "JPG", "PNG"]),
    ("PPT", &["PPTX", "PDF", "ODP"]),
    ("ODP", &["PDF", "PPTX", "PPT"]),
    // Images
    ("JPG", &["PNG", "WEBP", "PDF", "GIF", "BMP", "TIFF", "ICO"]),
    ("JPEG", &["PNG", "WEBP", "PDF", "GIF", "BMP", "TIFF", "ICO"]),
    ("PNG", &["JPG", "WEBP", "PDF", "GIF", "BMP", "TIFF", "ICO"]),
    ("WEBP", &["JPG", "PNG", "GIF", "PDF"]),
    ("GIF", &["PNG", "JPG", "WEBP", "MP4"]),
    ("BMP", &["PNG", "JPG", "WEBP", "PDF"]),
    ("TIFF", &["PDF", "JPG", "PNG"]),
    ("HEIC", &["JPG", "PNG", "WEBP", "PDF"]),
    ("SVG", &["PNG", "JPG", "PDF", "WEBP"]),
    // CAD
    ("DWG", &["PDF", "DXF", "SVG", "PNG"]),
    ("DXF", &["PDF", "DWG", "SVG", "PNG"]),
    // Audio
    ("MP3", &["WAV", "OGG", "FLAC", "AAC", "M4A"]),
    ("WAV", &["MP3", "OGG", "FLAC", "AAC"]),
    ("FLAC", &["MP3", "WAV", "OGG", "AAC"]),
    ("OGG", &["MP3", "WAV", "FLAC"]),
    ("M4A", &["MP3", "WAV", "OGG"]),
    // Video
    ("MP4", &["AVI", "MOV", "MKV", "WEBM", "GIF", "MP3"]),
    ("MOV", &["MP4", "AVI", "MKV", "WEBM", "GIF"]),
    ("AVI", &["MP4", "MOV", "MKV", "WEBM"]),
    ("MKV", &["MP4", "AVI", "MOV", "WEBM"]),
    ("WEBM", &["MP4", "GIF", "MOV"]),
    // Archives
    ("ZIP", &["7Z", "TAR", "RAR"]),
    ("RAR", &["ZIP", "7Z", "TAR"]),
    ("7Z", &["ZIP", "TAR"]),
    ("TAR", &["ZIP", "7Z"]),
];

const MIME_TYPES: &[(&str, &str)] = &[
    ("PDF", "application/pdf"),
    (
        "DOCX",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("DOC", "application/msword"),
    ("ODT", "application/vnd.oasis.opendocument.text"),
    ("RTF", "application/rtf"),
    ("TXT", "text/plain"),
    ("HTML", "text/html"),
    ("MD", "text/markdown"),
    ("EPUB", "application/epub+zip"),
    (
        "XLSX",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("XLS", "application/vnd.ms-excel"),
    ("ODS", "application/vnd.oasis.opendocument.spreadsheet"),
    ("CSV", "text/csv"),
    (
        "PPTX",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    ("PPT", "application/vnd.ms-powerpoint"),
    ("ODP", "application/vnd.oasis.opendocument.presentation"),
    ("JPG", "image/jpeg"),
    ("JPEG", "image/jpeg"),
    ("PNG", "image/png"),
    ("WEBP", "image/webp"),
    ("GIF", "image/gif"),
    ("BMP", "image/bmp"),
    ("TIFF", "image/tiff"),
    ("HEIC", "image/heic"),
    ("SVG", "image/svg+xml"),
    ("DWG", "image/vnd.dwg"),
    ("DXF", "image/vnd.dxf"),
    ("MP3", "audio/mpeg"),
    ("WAV", "audio/wav"),
    ("FLAC", "audio/flac"),
    ("OGG", "audio/ogg"),
    ("M4A", "audio/mp4"),
    ("MP4", "video/mp4"),
    ("MOV", "video/quicktime"),
    ("AVI", "video/x-msvideo"),
    ("MKV", "video/x-matroska"),
    ("WEBM", "video/webm"),
    ("ZIP", "application/zip"),
    ("RAR", "application/vnd.rar"),
    ("7Z", "application/x-7z-compressed"),
    ("TAR", "application/x-tar"),
];

pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Every input extension the built-in catalog knows, in table order.
pub fn supported_extensions() -> impl Iterator<Item = &'static str> {
    CONVERSION_MAP.iter().map(|(ext, _)| *ext)
}

/// Candidate output formats for an input extension. Unknown extensions
/// are valid input and simply have no candidates.
pub fn candidates_for(extension: &str) -> &'static [&'static str] {
    let key = extension.trim().to_uppercase();
    CONVERSION_MAP
        .iter()
        .find(|(ext, _)| *ext == key)
        .map(|(_, formats)| *formats)
        .unwrap_or(&[])
}

pub fn mime_type_for(extension: &str) -> &'static str {
    let key = extension.trim().to_uppercase();
    MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == key)
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_MIME_TYPE)
}

/// Appends suggested formats to `base`, keeping `base` order intact and
/// skipping blanks and anything already listed.
pub fn merge_suggestions(base: &[String], suggestions: &[String]) -> Vec<String> {
    let mut merged = base.to_vec();
    for suggestion in suggestions {
        let format = suggestion.trim().trim_start_matches('.').to_uppercase();
        if format.is_empty() || merged.contains(&format) {
            continue;
        }
        merged.push(format);
    }
    merged
}
