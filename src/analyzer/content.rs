//! Content authority analyzer - signals that make a page citable.
//!
//! Scores statistics density, citation/source markup and the balance of
//! readable HTML text versus image-locked content. 15 points total.

use crate::domain::models::{ContentAnalysis, ScoreItem};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;

const TRUSTED_DOMAINS: [&str; 8] = [
    "wikipedia.org",
    "gov.kr",
    "go.kr",
    "ac.kr",
    "edu",
    "bloomberg.com",
    "reuters.com",
    "statista.com",
];

pub fn analyze_content(html: &str) -> ContentAnalysis {
    let document = Html::parse_document(html);

    ContentAnalysis {
        has_statistics: analyze_statistics(&document),
        has_citations: analyze_citations(&document),
        html_vs_image: analyze_html_vs_image(&document),
    }
}

fn analyze_statistics(document: &Html) -> ScoreItem {
    static BODY: OnceLock<Selector> = OnceLock::new();
    static PERCENTAGE: OnceLock<Regex> = OnceLock::new();
    static NUMBER_WITH_UNIT: OnceLock<Regex> = OnceLock::new();
    static YEAR: OnceLock<Regex> = OnceLock::new();
    static STAT_KEYWORDS: OnceLock<Regex> = OnceLock::new();
    let body = BODY.get_or_init(|| Selector::parse("body").unwrap());
    let percentage = PERCENTAGE.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?%").unwrap());
    let number_with_unit = NUMBER_WITH_UNIT
        .get_or_init(|| Regex::new(r"\d+(?:\.\d+)?(?:만|억|천|배|개|건|명|원|달러|%)").unwrap());
    let year = YEAR.get_or_init(|| Regex::new(r"20[1-2]\d년?").unwrap());
    let stat_keywords = STAT_KEYWORDS
        .get_or_init(|| Regex::new("통계|조사|연구|리포트|보고서|데이터|분석|결과|기준").unwrap());

    let body_text = document
        .select(body)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();

    let percent_count = percentage.find_iter(&body_text).count();
    let number_count = number_with_unit.find_iter(&body_text).count();
    let year_count = year.find_iter(&body_text).count();
    let keyword_count = stat_keywords.find_iter(&body_text).count();

    // Years cap at 3 so a date-heavy archive page cannot fake density.
    let total_matches = percent_count + number_count + year_count.min(3) + keyword_count;

    let (score, detail) = if total_matches >= 10 {
        (
            5,
            format!("풍부한 데이터 포함: 통계 {percent_count}개, 수치 {number_count}개"),
        )
    } else if total_matches >= 5 {
        (4, format!("적절한 데이터 포함: 통계/수치 {total_matches}개"))
    } else if total_matches >= 2 {
        (2, "기본 데이터 존재 - 더 많은 통계/수치 추가 권장".to_string())
    } else {
        (
            0,
            "구체적인 데이터/통계 부족 - AI 신뢰도 향상을 위해 수치 데이터 추가 권장".to_string(),
        )
    };

    ScoreItem::new("데이터/통계", score >= 3, score, 5, detail)
}

fn analyze_citations(document: &Html) -> ScoreItem {
    static ANCHORS: OnceLock<Selector> = OnceLock::new();
    static BLOCKQUOTE: OnceLock<Selector> = OnceLock::new();
    static CITE: OnceLock<Selector> = OnceLock::new();
    static FOOTNOTES: OnceLock<Selector> = OnceLock::new();
    let anchors = ANCHORS.get_or_init(|| Selector::parse("a[href]").unwrap());
    let blockquote = BLOCKQUOTE.get_or_init(|| Selector::parse("blockquote").unwrap());
    let cite = CITE.get_or_init(|| Selector::parse("cite").unwrap());
    let footnotes = FOOTNOTES.get_or_init(|| {
        Selector::parse("[class*='footnote'], [id*='footnote'], [class*='reference']").unwrap()
    });

    let external_links: Vec<&str> = document
        .select(anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.starts_with("http://") || href.starts_with("https://"))
        .collect();

    let blockquote_count = document.select(blockquote).count();
    let cite_count = document.select(cite).count();
    let footnote_count = document.select(footnotes).count();

    let trusted_refs = external_links
        .iter()
        .filter(|link| TRUSTED_DOMAINS.iter().any(|domain| link.contains(domain)))
        .count();

    let citation_score = external_links.len().min(5)
        + blockquote_count * 2
        + cite_count * 2
        + trusted_refs * 2
        + footnote_count;

    let (score, detail) = if citation_score >= 10 || trusted_refs >= 2 {
        (
            5,
            format!(
                "출처 표기 우수: 외부 링크 {}개, 인용 {blockquote_count}개",
                external_links.len()
            ),
        )
    } else if citation_score >= 5 {
        (4, format!("출처 표기 양호: 외부 링크 {}개", external_links.len()))
    } else if external_links.len() >= 2 || blockquote_count >= 1 {
        (2, "기본 출처 존재 - 권위있는 출처 추가 권장".to_string())
    } else {
        (0, "출처/인용 표기 없음 - 외부 참조 링크 추가 권장".to_string())
    };

    ScoreItem::new("출처 표기", score >= 3, score, 5, detail)
}

fn analyze_html_vs_image(document: &Html) -> ScoreItem {
    static IMAGES: OnceLock<Selector> = OnceLock::new();
    static TEXT_BEARING: OnceLock<Selector> = OnceLock::new();
    static TABLES: OnceLock<Selector> = OnceLock::new();
    static LISTS: OnceLock<Selector> = OnceLock::new();
    let images = IMAGES.get_or_init(|| Selector::parse("img").unwrap());
    let text_bearing = TEXT_BEARING
        .get_or_init(|| Selector::parse("p, li, td, th, h1, h2, h3, h4, h5, h6").unwrap());
    let tables = TABLES.get_or_init(|| Selector::parse("table").unwrap());
    let lists = LISTS.get_or_init(|| Selector::parse("ul, ol").unwrap());

    let mut image_count = 0;
    let mut images_with_alt = 0;
    let mut infographic_suspects = 0;

    for img in document.select(images) {
        image_count += 1;
        let alt = img.value().attr("alt").unwrap_or("");
        let src = img.value().attr("src").unwrap_or("");
        let width = img
            .value()
            .attr("width")
            .and_then(|w| w.parse::<i64>().ok())
            .unwrap_or(0);

        if !alt.is_empty() {
            images_with_alt += 1;
        }

        if width > 600
            || src.contains("infographic")
            || src.contains("chart")
            || alt.contains('표')
            || alt.contains("차트")
            || alt.contains("그래프")
        {
            infographic_suspects += 1;
        }
    }

    let raw_text = document
        .select(text_bearing)
        .flat_map(|el| el.text())
        .collect::<String>();
    let text_length = raw_text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .count();

    let structured_elements = document.select(tables).count() + document.select(lists).count();

    let (score, mut detail) = if text_length > 1000 && structured_elements >= 2 {
        (
            5,
            format!("HTML 구조화 우수: 텍스트 {text_length}자, 표/목록 {structured_elements}개"),
        )
    } else if text_length > 500 && structured_elements >= 1 {
        (4, format!("HTML 구조화 양호: 텍스트 {text_length}자"))
    } else if text_length > 300 {
        (
            3,
            "기본 텍스트 콘텐츠 존재 - 구조화 요소(표, 목록) 추가 권장".to_string(),
        )
    } else if infographic_suspects > 2 {
        (1, "이미지 의존도 높음 - 텍스트 이미지를 HTML로 변환 권장".to_string())
    } else {
        (
            2,
            "텍스트 콘텐츠 부족 - AI가 읽을 수 있는 HTML 텍스트 추가 권장".to_string(),
        )
    };

    // Alt coverage only annotates the detail, it never moves the score.
    if image_count > 0 && (images_with_alt as f64 / image_count as f64) < 0.5 {
        detail.push_str(" | 이미지 alt 태그 부족");
    }

    ScoreItem::new("HTML vs 이미지", score >= 3, score, 5, detail)
}
