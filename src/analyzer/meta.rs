//! Meta tag analyzer - title, description, Open Graph and canonical.
//!
//! 20 points total. Lengths are counted in characters so Korean text
//! measures the same as it does in the browser.

use crate::domain::models::{MetaAnalysis, ScoreItem};
use scraper::{Html, Selector};
use std::sync::OnceLock;
use url::Url;

pub fn analyze_meta(html: &str, url: &str) -> MetaAnalysis {
    let document = Html::parse_document(html);

    MetaAnalysis {
        title_optimization: analyze_title(&document),
        description_optimization: analyze_description(&document),
        open_graph: analyze_open_graph(&document),
        canonical_url: analyze_canonical(&document, url),
    }
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn analyze_title(document: &Html) -> ScoreItem {
    static TITLE: OnceLock<Selector> = OnceLock::new();
    static OG_TITLE: OnceLock<Selector> = OnceLock::new();
    let title_sel = TITLE.get_or_init(|| Selector::parse("title").unwrap());
    let og_title = OG_TITLE.get_or_init(|| Selector::parse("meta[property='og:title']").unwrap());

    let title = document
        .select(title_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| meta_content(document, og_title));

    let Some(title) = title else {
        return ScoreItem::new("Title 최적화", false, 0, 7, "Title 태그 없음 - 필수 요소");
    };

    let length = title.chars().count();

    // 50-60 characters is the sweet spot for answer-engine snippets.
    let (mut score, mut detail) = if (50..=60).contains(&length) {
        (5, format!("Title 길이 최적 ({length}자)"))
    } else if (40..=70).contains(&length) {
        (4, format!("Title 길이 양호 ({length}자) - 50-60자 권장"))
    } else if (20..40).contains(&length) {
        (2, format!("Title 너무 짧음 ({length}자) - 50-60자 권장"))
    } else if length > 70 {
        (2, format!("Title 너무 김 ({length}자) - 검색 결과에서 잘릴 수 있음"))
    } else {
        (1, format!("Title 길이 부족 ({length}자)"))
    };

    const INTENT_KEYWORDS: [&str; 14] = [
        "추천", "비교", "리뷰", "가격", "구매", "최고", "베스트", "가이드", "방법", "사용법",
        "선택", "순위", "용", "위한",
    ];
    if INTENT_KEYWORDS.iter().any(|kw| title.contains(kw)) {
        score = (score + 2).min(7);
        detail.push_str(" | 쇼핑 의도 키워드 포함");
    }

    ScoreItem::new("Title 최적화", score >= 4, score, 7, detail)
}

fn analyze_description(document: &Html) -> ScoreItem {
    static DESCRIPTION: OnceLock<Selector> = OnceLock::new();
    static OG_DESCRIPTION: OnceLock<Selector> = OnceLock::new();
    let description_sel =
        DESCRIPTION.get_or_init(|| Selector::parse("meta[name='description']").unwrap());
    let og_description =
        OG_DESCRIPTION.get_or_init(|| Selector::parse("meta[property='og:description']").unwrap());

    let description =
        meta_content(document, description_sel).or_else(|| meta_content(document, og_description));

    let Some(description) = description else {
        return ScoreItem::new(
            "Description 최적화",
            false,
            0,
            7,
            "Meta Description 없음 - 필수 요소",
        );
    };

    let length = description.chars().count();

    let (mut score, mut detail) = if (120..=160).contains(&length) {
        (5, format!("Description 길이 최적 ({length}자)"))
    } else if (100..=180).contains(&length) {
        (4, format!("Description 길이 양호 ({length}자)"))
    } else if (50..100).contains(&length) {
        (2, format!("Description 너무 짧음 ({length}자) - 120-160자 권장"))
    } else if length > 180 {
        (
            2,
            format!("Description 너무 김 ({length}자) - 검색 결과에서 잘릴 수 있음"),
        )
    } else {
        (1, format!("Description 길이 부족 ({length}자)"))
    };

    const INTENT_PHRASES: [&str; 11] = [
        "을 찾는", "를 찾는", "을 위한", "를 위한", "보다", "추천", "비교", "방법", "가이드",
        "완벽", "최신",
    ];
    if INTENT_PHRASES.iter().any(|phrase| description.contains(phrase)) {
        score = (score + 2).min(7);
        detail.push_str(" | 쇼핑 의도 문구 포함");
    }

    ScoreItem::new("Description 최적화", score >= 4, score, 7, detail)
}

fn analyze_open_graph(document: &Html) -> ScoreItem {
    static OG_TITLE: OnceLock<Selector> = OnceLock::new();
    static OG_DESCRIPTION: OnceLock<Selector> = OnceLock::new();
    static OG_IMAGE: OnceLock<Selector> = OnceLock::new();
    let og_title = OG_TITLE.get_or_init(|| Selector::parse("meta[property='og:title']").unwrap());
    let og_description =
        OG_DESCRIPTION.get_or_init(|| Selector::parse("meta[property='og:description']").unwrap());
    let og_image = OG_IMAGE.get_or_init(|| Selector::parse("meta[property='og:image']").unwrap());

    let essential = [
        ("title", meta_content(document, og_title)),
        ("description", meta_content(document, og_description)),
        ("image", meta_content(document, og_image)),
    ];
    let present = essential.iter().filter(|(_, v)| v.is_some()).count();

    let (score, detail) = match present {
        3 => (
            3,
            "Open Graph 태그 완벽 (title, description, image)".to_string(),
        ),
        2 => {
            let missing: Vec<&str> = essential
                .iter()
                .filter(|(_, v)| v.is_none())
                .map(|(name, _)| *name)
                .collect();
            (2, format!("Open Graph 양호 - 누락: {}", missing.join(", ")))
        }
        1 => (1, "Open Graph 부족 - 소셜 공유 최적화 필요".to_string()),
        _ => (
            0,
            "Open Graph 태그 없음 - og:title, og:description, og:image 추가 권장".to_string(),
        ),
    };

    ScoreItem::new("Open Graph", score >= 2, score, 3, detail)
}

fn analyze_canonical(document: &Html, page_url: &str) -> ScoreItem {
    static CANONICAL: OnceLock<Selector> = OnceLock::new();
    let canonical_sel = CANONICAL.get_or_init(|| Selector::parse("link[rel='canonical']").unwrap());

    let canonical = document
        .select(canonical_sel)
        .next()
        .and_then(|el| el.value().attr("href"));

    let Some(canonical) = canonical else {
        return ScoreItem::new(
            "Canonical URL",
            false,
            0,
            3,
            "Canonical URL 없음 - 중복 콘텐츠 이슈 방지를 위해 추가 권장",
        );
    };

    // A canonical tag that exists always passes; only the score reflects
    // whether it points back at this page.
    let resolved = Url::parse(page_url)
        .ok()
        .and_then(|current| current.join(canonical).ok().map(|c| (current, c)));

    match resolved {
        Some((current, canonical_url)) => {
            let matches = canonical_url.host_str() == current.host_str()
                && canonical_url.path() == current.path();
            if matches {
                ScoreItem::new("Canonical URL", true, 3, 3, "Canonical URL 정상 설정")
            } else {
                ScoreItem::new(
                    "Canonical URL",
                    true,
                    2,
                    3,
                    format!(
                        "Canonical URL 설정됨 (다른 페이지로 지정: {})",
                        canonical_url.path()
                    ),
                )
            }
        }
        None => ScoreItem::new("Canonical URL", true, 1, 3, "Canonical URL 형식 오류"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_title_with_intent_keyword() {
        let html = "<html><head><title>나이키 신발 추천 BEST 10</title></head></html>";
        let item = analyze_title(&Html::parse_document(html));
        // 15 chars lands in the shortest band (1) plus the intent bonus.
        assert_eq!(item.score, 3);
        assert!(!item.passed);
        assert!(item.detail.contains("쇼핑 의도 키워드 포함"));
    }

    #[test]
    fn test_title_optimal_length() {
        let title = "아".repeat(55);
        let html = format!("<html><head><title>{title}</title></head></html>");
        let item = analyze_title(&Html::parse_document(&html));
        assert_eq!(item.score, 5);
        assert!(item.passed);
    }

    #[test]
    fn test_title_intent_bonus_caps_at_seven() {
        let title = format!("{} 추천", "아".repeat(53));
        let html = format!("<html><head><title>{title}</title></head></html>");
        let item = analyze_title(&Html::parse_document(&html));
        assert_eq!(item.score, 7);
    }

    #[test]
    fn test_title_falls_back_to_og_title() {
        let html = r#"<html><head>
            <meta property="og:title" content="소셜 카드용 제목">
        </head></html>"#;
        let item = analyze_title(&Html::parse_document(html));
        assert!(item.score > 0);

        let empty = "<html><head></head></html>";
        let item = analyze_title(&Html::parse_document(empty));
        assert_eq!(item.score, 0);
        assert!(!item.passed);
    }

    #[test]
    fn test_description_length_bands() {
        let optimal = "가".repeat(140);
        let html = format!(r#"<html><head><meta name="description" content="{optimal}"></head></html>"#);
        let item = analyze_description(&Html::parse_document(&html));
        assert_eq!(item.score, 5);

        let short = "가".repeat(60);
        let html = format!(r#"<html><head><meta name="description" content="{short}"></head></html>"#);
        let item = analyze_description(&Html::parse_document(&html));
        assert_eq!(item.score, 2);
        assert!(!item.passed);
    }

    #[test]
    fn test_description_intent_phrase_bonus() {
        let desc = format!("{} 추천 가이드", "가".repeat(130));
        let html = format!(r#"<html><head><meta name="description" content="{desc}"></head></html>"#);
        let item = analyze_description(&Html::parse_document(&html));
        assert_eq!(item.score, 7);
        assert!(item.detail.contains("쇼핑 의도 문구 포함"));
    }

    #[test]
    fn test_open_graph_counts() {
        let all = r#"<html><head>
            <meta property="og:title" content="t">
            <meta property="og:description" content="d">
            <meta property="og:image" content="i.jpg">
        </head></html>"#;
        let item = analyze_open_graph(&Html::parse_document(all));
        assert_eq!(item.score, 3);
        assert!(item.passed);

        let two = r#"<html><head>
            <meta property="og:title" content="t">
            <meta property="og:description" content="d">
        </head></html>"#;
        let item = analyze_open_graph(&Html::parse_document(two));
        assert_eq!(item.score, 2);
        assert!(item.detail.contains("image"));

        let item = analyze_open_graph(&Html::parse_document("<html></html>"));
        assert_eq!(item.score, 0);
        assert!(!item.passed);
    }

    #[test]
    fn test_canonical_exact_match() {
        let html = r#"<html><head><link rel="canonical" href="https://example.com/page"></head></html>"#;
        let item = analyze_canonical(
            &Html::parse_document(html),
            "https://example.com/page",
        );
        assert_eq!(item.score, 3);
        assert!(item.passed);
    }

    #[test]
    fn test_canonical_relative_href_resolves() {
        let html = r#"<html><head><link rel="canonical" href="/page"></head></html>"#;
        let item = analyze_canonical(
            &Html::parse_document(html),
            "https://example.com/page",
        );
        assert_eq!(item.score, 3);
    }

    #[test]
    fn test_canonical_pointing_elsewhere_still_passes() {
        let html =
            r#"<html><head><link rel="canonical" href="https://example.com/other"></head></html>"#;
        let item = analyze_canonical(
            &Html::parse_document(html),
            "https://example.com/page",
        );
        assert_eq!(item.score, 2);
        assert!(item.passed, "existing canonical passes regardless of target");
        assert!(item.detail.contains("/other"));
    }

    #[test]
    fn test_canonical_missing_is_the_only_failure() {
        let item = analyze_canonical(&Html::parse_document("<html></html>"), "https://example.com");
        assert_eq!(item.score, 0);
        assert!(!item.passed);
    }
}
