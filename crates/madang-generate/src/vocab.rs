//! Fixed vocabularies for book synthesis.

use rand::Rng;

/// Publishers found in the bookstore's seed catalog.
pub const PUBLISHERS: &[&str] = &[
    "굿스포츠",
    "나무수",
    "대한미디어",
    "이상미디어",
    "삼성당",
    "Pearson",
];

/// Sports topics the catalog is organized around.
pub const TOPIC_KEYWORDS: &[&str] = &[
    "축구",
    "농구",
    "야구",
    "배구",
    "골프",
    "테니스",
    "피겨",
    "수영",
    "올림픽",
];

/// Title format wrapping a topic keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleTemplate {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

impl TitleTemplate {
    const fn new(prefix: &'static str, suffix: &'static str) -> Self {
        Self { prefix, suffix }
    }

    pub fn render(&self, keyword: &str) -> String {
        format!("{}{keyword}{}", self.prefix, self.suffix)
    }
}

pub const TITLE_TEMPLATES: &[TitleTemplate] = &[
    TitleTemplate::new("", "의 역사"),
    TitleTemplate::new("", " 아는 사람"),
    TitleTemplate::new("", "의 이해"),
    TitleTemplate::new("", " 바이블"),
    TitleTemplate::new("", " 교본"),
    TitleTemplate::new("", " 단계별 기술"),
    TitleTemplate::new("즐거운 ", ""),
    TitleTemplate::new("", "를 부탁해"),
    TitleTemplate::new("", " 이야기"),
];

/// Uniform pick from a non-empty slice.
pub(crate) fn pick<'a, T, R: Rng + ?Sized>(values: &'a [T], rng: &mut R) -> &'a T {
    let idx = rng.random_range(0..values.len());
    &values[idx]
}
