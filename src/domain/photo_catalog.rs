use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static PHOTO_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[PHOTO:(?P<label>[^\]]*)\]").unwrap());

/// Piece of an assistant reply as it should be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplaySegment<'a> {
    /// Literal text, including markers whose label is not in the catalog.
    Text(&'a str),
    Photo(PhotoRef<'a>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRef<'a> {
    pub url: &'a str,
    pub caption: String,
}

/// Label to image URL lookup used to expand `[PHOTO:<label>]` markers in
/// assistant replies.
///
/// Labels are matched case-insensitively after trimming. The catalog is built
/// once at startup and never mutated, so expansion is a pure function of the
/// input text.
#[derive(Debug, Clone, Default)]
pub struct PhotoCatalog {
    photos: HashMap<String, String>,
}

impl PhotoCatalog {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let photos = entries
            .into_iter()
            .map(|(label, url)| (normalize_label(label.as_ref()), url.into()))
            .collect();
        Self { photos }
    }

    pub fn url_for(&self, label: &str) -> Option<&str> {
        self.photos.get(&normalize_label(label)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Splits `text` into literal runs and resolved photos, in order.
    pub fn segments<'a>(&'a self, text: &'a str) -> Vec<DisplaySegment<'a>> {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for captures in PHOTO_MARKER.captures_iter(text) {
            let (Some(marker), Some(label)) = (captures.get(0), captures.name("label")) else {
                continue;
            };
            let Some(photo) = self.resolve(label.as_str()) else {
                continue;
            };

            if cursor < marker.start() {
                segments.push(DisplaySegment::Text(&text[cursor..marker.start()]));
            }
            segments.push(DisplaySegment::Photo(photo));
            cursor = marker.end();
        }

        if cursor < text.len() {
            segments.push(DisplaySegment::Text(&text[cursor..]));
        }
        segments
    }

    /// Plain-text expansion: every known marker becomes an image block,
    /// everything else is returned untouched.
    pub fn substitute(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for segment in self.segments(text) {
            match segment {
                DisplaySegment::Text(literal) => out.push_str(literal),
                DisplaySegment::Photo(photo) => out.push_str(&format!(
                    r#"<figure class="photo"><img src="{url}" alt="Photo: {caption}"><figcaption>{caption}</figcaption></figure>"#,
                    url = photo.url,
                    caption = photo.caption
                )),
            }
        }
        out
    }

    fn resolve(&self, label: &str) -> Option<PhotoRef<'_>> {
        let key = normalize_label(label);
        let url = self.photos.get(&key)?;
        Some(PhotoRef {
            url,
            caption: title_case(&key),
        })
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

fn title_case(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
