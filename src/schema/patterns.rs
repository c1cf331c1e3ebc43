//! Vocabularies shared by the value and key matchers.

use super::meta::FileCategory;
use once_cell::sync::Lazy;
use regex::Regex;

/// Words that mark a field (key) or sample value as a file upload, with the
/// category family each one suggests.
pub const FILE_KEYWORDS: &[(&str, FileCategory)] = &[
    ("image", FileCategory::Image),
    ("photo", FileCategory::Image),
    ("logo", FileCategory::Image),
    ("avatar", FileCategory::Image),
    ("document", FileCategory::Document),
    ("attachment", FileCategory::Document),
    ("pdf", FileCategory::Document),
    ("video", FileCategory::Video),
    ("audio", FileCategory::Audio),
    ("sound", FileCategory::Audio),
    ("file", FileCategory::File),
    ("media", FileCategory::File),
];

/// Extensions accepted for a generic upload, and recognised as a key suffix
/// (`intro_mp4`) or a value suffix (`photo.jpg`).
pub const FILE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "svg", "pdf", "mp3", "mp4", "wav", "webm", "txt", "doc", "docx",
    "xls", "xlsx", "zip",
];

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "svg", "webp"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "xls", "xlsx", "txt"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];

/// Language codes whose presence as mapping keys marks a translatable field.
pub const LANGUAGE_KEYS: &[&str] = &["ar", "en", "fr", "de", "es", "it", "tr", "ru", "zh", "jp"];

#[allow(clippy::expect_used)]
static ENUM_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*enum\[(.*)\]\s*$").expect("enum literal regex should be valid")
});

/// Canonical extension set of a file category.
pub fn category_extensions(category: FileCategory) -> Vec<String> {
    let list = match category {
        FileCategory::Image => IMAGE_EXTENSIONS,
        FileCategory::Document => DOCUMENT_EXTENSIONS,
        FileCategory::Audio => AUDIO_EXTENSIONS,
        FileCategory::Video => VIDEO_EXTENSIONS,
        FileCategory::File => FILE_EXTENSIONS,
    };
    list.iter().map(|s| s.to_string()).collect()
}

/// Category family of an extension; unknown extensions are generic files.
pub fn category_for_extension(ext: &str) -> FileCategory {
    let ext = ext.to_ascii_lowercase();
    let ext = ext.as_str();
    if IMAGE_EXTENSIONS.contains(&ext) {
        FileCategory::Image
    } else if DOCUMENT_EXTENSIONS.contains(&ext) {
        FileCategory::Document
    } else if AUDIO_EXTENSIONS.contains(&ext) {
        FileCategory::Audio
    } else if VIDEO_EXTENSIONS.contains(&ext) {
        FileCategory::Video
    } else {
        FileCategory::File
    }
}

/// Category family of a file keyword (`photo` → image, `media` → generic).
pub fn category_for_keyword(word: &str) -> Option<FileCategory> {
    FILE_KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == word)
        .map(|(_, category)| *category)
}

/// Whether `ext` is one of the recognised upload extensions.
pub fn is_file_extension(ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    FILE_EXTENSIONS.contains(&ext.as_str())
        || IMAGE_EXTENSIONS.contains(&ext.as_str())
        || AUDIO_EXTENSIONS.contains(&ext.as_str())
        || VIDEO_EXTENSIONS.contains(&ext.as_str())
}

/// Most specific file category suggested by a keyword anywhere in `text`.
///
/// Keywords match as substrings (`userphoto`, `filename`). Specific families
/// (image, document, audio, video) win over the generic `file`/`media` words,
/// so `media_photo` is an image.
pub fn keyword_category(text: &str) -> Option<FileCategory> {
    let text = text.to_ascii_lowercase();
    let mut found = None;
    for (keyword, category) in FILE_KEYWORDS {
        if !text.contains(keyword) {
            continue;
        }
        if *category != FileCategory::File {
            return Some(*category);
        }
        found.get_or_insert(FileCategory::File);
    }
    found
}

/// Whether `text` has the `enum[...]` shape.
pub fn is_enum_literal(text: &str) -> bool {
    ENUM_LITERAL.is_match(text)
}

/// Values listed in an `enum[a, b, c]` literal, trimmed.
///
/// A malformed literal (no closing bracket) or an empty list yields an empty
/// vector.
pub fn enum_values(text: &str) -> Vec<String> {
    ENUM_LITERAL
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|inner| {
            inner
                .as_str()
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
