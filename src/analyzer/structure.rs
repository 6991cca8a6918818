//! Structure analyzer - how well the page layout serves answer engines.
//!
//! Scores list usage, table quality, answer-first section openings and
//! content freshness. 25 points total.

use crate::analyzer::jsonld;
use crate::domain::models::{ScoreItem, StructureAnalysis};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::sync::OnceLock;

pub fn analyze_structure(html: &str) -> StructureAnalysis {
    let document = Html::parse_document(html);

    StructureAnalysis {
        list_content: analyze_list_content(&document),
        table_usage: analyze_table_usage(&document),
        heading_first: analyze_heading_first(&document),
        freshness: analyze_freshness(&document),
    }
}

fn analyze_list_content(document: &Html) -> ScoreItem {
    static UL: OnceLock<Selector> = OnceLock::new();
    static OL: OnceLock<Selector> = OnceLock::new();
    static LI: OnceLock<Selector> = OnceLock::new();
    let ul = UL.get_or_init(|| Selector::parse("ul").unwrap());
    let ol = OL.get_or_init(|| Selector::parse("ol").unwrap());
    let li = LI.get_or_init(|| Selector::parse("li").unwrap());

    let total_lists = document.select(ul).count() + document.select(ol).count();
    let li_count = document.select(li).count();

    let (score, detail) = if li_count >= 10 && total_lists >= 3 {
        (
            7,
            format!("풍부한 목록 콘텐츠: {total_lists}개 목록, {li_count}개 항목"),
        )
    } else if li_count >= 5 && total_lists >= 2 {
        (
            5,
            format!("적절한 목록 콘텐츠: {total_lists}개 목록, {li_count}개 항목"),
        )
    } else if li_count >= 3 && total_lists >= 1 {
        (
            3,
            format!("기본 목록 존재: {total_lists}개 목록, {li_count}개 항목"),
        )
    } else {
        (
            0,
            "목록형 콘텐츠 부족 - AI 인용률 향상을 위해 목록 추가 권장".to_string(),
        )
    };

    ScoreItem::new("목록형 콘텐츠", score >= 5, score, 7, detail)
}

fn analyze_table_usage(document: &Html) -> ScoreItem {
    static TABLE: OnceLock<Selector> = OnceLock::new();
    static THEAD: OnceLock<Selector> = OnceLock::new();
    static TH: OnceLock<Selector> = OnceLock::new();
    let table = TABLE.get_or_init(|| Selector::parse("table").unwrap());
    let thead = THEAD.get_or_init(|| Selector::parse("thead").unwrap());
    let th = TH.get_or_init(|| Selector::parse("th").unwrap());

    let mut table_count = 0;
    let mut quality_tables = 0;
    for t in document.select(table) {
        table_count += 1;
        // A table with a thead or any th cell reads as structured data.
        if t.select(thead).next().is_some() || t.select(th).next().is_some() {
            quality_tables += 1;
        }
    }

    let (score, detail) = if quality_tables >= 2 {
        (
            6,
            format!("고품질 표 {quality_tables}개 발견 - AI 인용률 2.5배 향상 기대"),
        )
    } else if quality_tables >= 1 {
        (4, format!("표 {quality_tables}개 발견 (헤더 포함)"))
    } else if table_count >= 1 {
        (
            2,
            format!("표 {table_count}개 발견 - thead/th 추가로 품질 향상 권장"),
        )
    } else {
        (0, "표 형식 미사용 - 데이터 정리에 표 활용 권장".to_string())
    };

    ScoreItem::new("표 형식 사용", score >= 4, score, 6, detail)
}

fn analyze_heading_first(document: &Html) -> ScoreItem {
    static HEADINGS: OnceLock<Selector> = OnceLock::new();
    static ANSWER_PATTERN: OnceLock<Regex> = OnceLock::new();
    let headings = HEADINGS.get_or_init(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());
    // Leading digit, Korean topic marker, or a conclusion keyword marks a
    // section that answers up front.
    let answer_pattern = ANSWER_PATTERN.get_or_init(|| {
        Regex::new(r"^\d+|^[가-힣]+[은는이가]\s|결론|요약|핵심|정리|따라서|결과적으로").unwrap()
    });

    let mut total_sections = 0;
    let mut good_starts = 0;

    for heading in document.select(headings) {
        let Some(next) = heading.next_siblings().find_map(ElementRef::wrap) else {
            continue;
        };
        total_sections += 1;

        let text = next.text().collect::<String>();
        let words: Vec<&str> = text.split_whitespace().take(60).collect();
        let opening = words.join(" ");

        if answer_pattern.is_match(&opening) || words.len() >= 20 {
            good_starts += 1;
        }
    }

    let ratio = if total_sections > 0 {
        good_starts as f64 / total_sections as f64
    } else {
        0.0
    };

    let (score, detail) = if ratio >= 0.7 {
        (7, format!("두괄식 구조 우수: {good_starts}/{total_sections} 섹션"))
    } else if ratio >= 0.5 {
        (5, format!("두괄식 구조 양호: {good_starts}/{total_sections} 섹션"))
    } else if ratio >= 0.3 {
        (
            3,
            format!("두괄식 구조 개선 필요: {good_starts}/{total_sections} 섹션"),
        )
    } else {
        // Floor of 1: pages without headings are already penalized elsewhere.
        (1, "섹션 시작에 핵심 답변 배치 권장".to_string())
    };

    ScoreItem::new("두괄식 작성", score >= 5, score, 7, detail)
}

fn analyze_freshness(document: &Html) -> ScoreItem {
    analyze_freshness_at(document, Utc::now())
}

/// Freshness check against an explicit reference time so tests can
/// freeze the clock.
fn analyze_freshness_at(document: &Html, now: DateTime<Utc>) -> ScoreItem {
    let latest = collect_date_candidates(document)
        .iter()
        .filter_map(|raw| parse_date_lenient(raw))
        .max();

    let (score, detail) = match latest {
        Some(date) => {
            let date_str = date.format("%Y-%m-%d");
            if date > now - Duration::days(365) {
                (5, format!("최신 콘텐츠 확인: {date_str}"))
            } else {
                (2, format!("날짜 표기 있음 ({date_str}) - 콘텐츠 업데이트 권장"))
            }
        }
        None => (
            0,
            "발행일/수정일 표기 없음 - datePublished 스키마 추가 권장".to_string(),
        ),
    };

    ScoreItem::new("콘텐츠 최신성", score >= 3, score, 5, detail)
}

fn collect_date_candidates(document: &Html) -> Vec<String> {
    static PUBLISHED: OnceLock<Selector> = OnceLock::new();
    static MODIFIED: OnceLock<Selector> = OnceLock::new();
    static META_DATE: OnceLock<Selector> = OnceLock::new();
    static TIME: OnceLock<Selector> = OnceLock::new();
    let published =
        PUBLISHED.get_or_init(|| Selector::parse("meta[property='article:published_time']").unwrap());
    let modified =
        MODIFIED.get_or_init(|| Selector::parse("meta[property='article:modified_time']").unwrap());
    let meta_date = META_DATE.get_or_init(|| Selector::parse("meta[name='date']").unwrap());
    let time = TIME.get_or_init(|| Selector::parse("time[datetime]").unwrap());

    let mut candidates = Vec::new();

    for (selector, attr) in [
        (published, "content"),
        (modified, "content"),
        (meta_date, "content"),
        (time, "datetime"),
    ] {
        if let Some(value) = document
            .select(selector)
            .next()
            .and_then(|el| el.value().attr(attr))
        {
            candidates.push(value.to_string());
        }
    }

    for block in jsonld::extract_blocks(document) {
        for key in ["datePublished", "dateModified"] {
            if let Some(Value::String(s)) = block.get(key) {
                candidates.push(s.clone());
            }
        }
    }

    candidates
}

/// Accept the date formats the probed sources emit in practice.
fn parse_date_lenient(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }
    }
    None
}
