//! The GEO scoring engine.
//!
//! Five independent analyzers inspect one page's HTML/URL and produce
//! bounded, explainable sub-scores; `analyze_pages` averages them across
//! pages into the category report and `score_site` assembles the final
//! graded result. Pure computation over in-memory strings - nothing here
//! does I/O or returns errors for malformed input.

pub mod content;
pub mod jsonld;
pub mod meta;
pub mod recommend;
pub mod schema;
pub mod structure;
pub mod url;

pub use self::content::analyze_content;
pub use self::meta::analyze_meta;
pub use self::recommend::generate_recommendations;
pub use self::schema::analyze_schema;
pub use self::structure::analyze_structure;
pub use self::url::analyze_url;

use crate::domain::models::{
    Categories, CategoryScore, GeoScoreResult, Grade, PageAnalysis, PageAudit, PageData,
    PageScores, ScoreItem, SiteType,
};
use chrono::{SecondsFormat, Utc};

pub const STRUCTURE_MAX: u32 = 25;
pub const SCHEMA_MAX: u32 = 25;
pub const URL_MAX: u32 = 15;
pub const META_MAX: u32 = 20;
pub const CONTENT_MAX: u32 = 15;

/// Run all five analyzers over a single page.
pub fn analyze(html: &str, page_url: &str, site_type: SiteType) -> PageAudit {
    PageAudit {
        structure: analyze_structure(html),
        schema: analyze_schema(html, site_type),
        url: analyze_url(page_url),
        meta: analyze_meta(html, page_url),
        content: analyze_content(html),
    }
}

/// Multi-page aggregation result, before grading.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub categories: Categories,
    pub pages: Vec<PageAnalysis>,
    pub total_score: u32,
}

/// Analyze every crawled page and aggregate into category scores.
///
/// Category scores are averaged over pages and rounded per category
/// before summing into the total, so the total can differ by a point
/// or two from averaging page totals directly. Consumers depend on
/// this rounding order.
pub fn analyze_pages(pages: &[PageData], site_type: SiteType) -> AnalysisResult {
    let mut page_analyses = Vec::with_capacity(pages.len());
    let mut sums = [0u32; 5];

    let mut structure_items = Vec::new();
    let mut schema_items = Vec::new();
    let mut url_items = Vec::new();
    let mut meta_items = Vec::new();
    let mut content_items = Vec::new();

    for page in pages {
        let audit = analyze(&page.html, &page.url, site_type);

        let scores = PageScores {
            structure: audit.structure.total(),
            schema: audit.schema.total(),
            url: audit.url.total(),
            meta: audit.meta.total(),
            content: audit.content.total(),
            total: audit.total(),
        };

        sums[0] += scores.structure;
        sums[1] += scores.schema;
        sums[2] += scores.url;
        sums[3] += scores.meta;
        sums[4] += scores.content;

        structure_items.extend(audit.structure.items().map(Clone::clone));
        schema_items.extend(audit.schema.items().map(Clone::clone));
        url_items.extend(audit.url.items().map(Clone::clone));
        meta_items.extend(audit.meta.items().map(Clone::clone));
        content_items.extend(audit.content.items().map(Clone::clone));

        page_analyses.push(PageAnalysis {
            url: page.url.clone(),
            title: page.title.clone(),
            scores,
        });
    }

    // Floor at 1 so an empty crawl yields a zero-score result instead of
    // dividing by zero.
    let page_count = pages.len().max(1) as f64;
    let average = |sum: u32| (sum as f64 / page_count).round() as u32;

    let categories = Categories {
        structure: build_category(average(sums[0]), STRUCTURE_MAX, structure_items),
        schema: build_category(average(sums[1]), SCHEMA_MAX, schema_items),
        url: build_category(average(sums[2]), URL_MAX, url_items),
        meta: build_category(average(sums[3]), META_MAX, meta_items),
        content: build_category(average(sums[4]), CONTENT_MAX, content_items),
    };

    let total_score = categories.structure.score
        + categories.schema.score
        + categories.url.score
        + categories.meta.score
        + categories.content.score;

    AnalysisResult {
        categories,
        pages: page_analyses,
        total_score,
    }
}

/// Full report assembly: aggregate, grade, recommend, timestamp.
pub fn score_site(url: &str, pages: &[PageData], site_type: SiteType) -> GeoScoreResult {
    let analysis = analyze_pages(pages, site_type);
    let grade = Grade::from_score(analysis.total_score);
    let recommendations = generate_recommendations(&analysis.categories);

    GeoScoreResult {
        url: url.to_string(),
        analyzed_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        total_score: analysis.total_score,
        grade,
        categories: analysis.categories,
        pages: analysis.pages,
        recommendations,
    }
}

/// Deduplicate items by name, keeping the lowest-scoring instance so
/// the worst occurrence across pages surfaces as the actionable issue.
fn build_category(score: u32, max_score: u32, items: Vec<ScoreItem>) -> CategoryScore {
    let mut unique: Vec<ScoreItem> = Vec::new();
    for item in items {
        match unique.iter_mut().find(|existing| existing.name == item.name) {
            Some(existing) => {
                if item.score < existing.score {
                    *existing = item;
                }
            }
            None => unique.push(item),
        }
    }

    CategoryScore::new(score, max_score, unique)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str, html: &str) -> PageData {
        PageData {
            url: url.to_string(),
            html: html.to_string(),
            title: "테스트 페이지".to_string(),
            load_time: 120.0,
            status_code: 200,
        }
    }

    #[test]
    fn test_empty_page_list_yields_zero_result() {
        let result = analyze_pages(&[], SiteType::General);
        assert_eq!(result.total_score, 0);
        assert!(result.pages.is_empty());
        assert_eq!(result.categories.structure.score, 0);
        assert_eq!(result.categories.schema.score, 0);
        assert_eq!(result.categories.url.score, 0);
        assert_eq!(result.categories.meta.score, 0);
        assert_eq!(result.categories.content.score, 0);
        assert_eq!(result.categories.structure.percentage, 0);
        assert!(result.categories.structure.items.is_empty());
    }

    #[test]
    fn test_dedup_keeps_lowest_scoring_instance() {
        let rich_lists = r#"<body>
            <ul><li>a</li><li>b</li><li>c</li><li>d</li></ul>
            <ol><li>e</li><li>f</li><li>g</li></ol>
            <ul><li>h</li><li>i</li><li>j</li></ul>
        </body>"#;
        let no_lists = "<body><p>목록 없음</p></body>";

        let pages = [
            page("https://example.com/a", rich_lists),
            page("https://example.com/b", no_lists),
            page("https://example.com/c", rich_lists),
        ];
        let result = analyze_pages(&pages, SiteType::General);

        let list_items: Vec<_> = result
            .categories
            .structure
            .items
            .iter()
            .filter(|item| item.name == "목록형 콘텐츠")
            .collect();
        assert_eq!(list_items.len(), 1, "duplicates collapse to one entry");
        assert_eq!(list_items[0].score, 0, "worst occurrence wins");
    }

    #[test]
    fn test_category_rounds_before_total_sum() {
        // URL scores 15 and 10 average to 12.5, which rounds up to 13.
        let pages = [
            page("https://example.com/clean-path", "<body></body>"),
            page("https://example.com/has_underscore", "<body></body>"),
        ];
        let result = analyze_pages(&pages, SiteType::Portfolio);

        assert_eq!(result.pages[0].scores.url, 15);
        assert_eq!(result.pages[1].scores.url, 10);
        assert_eq!(result.categories.url.score, 13);

        let summed = result.categories.structure.score
            + result.categories.schema.score
            + result.categories.url.score
            + result.categories.meta.score
            + result.categories.content.score;
        assert_eq!(result.total_score, summed);
    }

    #[test]
    fn test_single_page_total_matches_page_total() {
        let pages = [page("https://example.com/page", "<body><p>본문</p></body>")];
        let result = analyze_pages(&pages, SiteType::General);
        assert_eq!(result.total_score, result.pages[0].scores.total);
        assert!(result.total_score <= 100);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let html = r#"<html><head><title>결정성 테스트 페이지</title></head>
            <body><ul><li>하나</li><li>둘</li><li>셋</li></ul></body></html>"#;
        let first = analyze(html, "https://example.com/page", SiteType::General);
        let second = analyze(html, "https://example.com/page", SiteType::General);
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn test_score_site_assembles_graded_report() {
        let pages = [page("https://example.com/", "<body></body>")];
        let result = score_site("https://example.com/", &pages, SiteType::General);

        assert_eq!(result.url, "https://example.com/");
        assert_eq!(result.grade, Grade::from_score(result.total_score));
        assert!(result.analyzed_at.ends_with('Z'));
        assert!(!result.recommendations.is_empty(), "bare page fails checks");
        assert_eq!(result.pages.len(), 1);
    }

    #[test]
    fn test_all_items_stay_within_bounds() {
        let html = r#"<html><head><title>경계 검사</title></head>
            <body><table><tr><td>x</td></tr></table></body></html>"#;
        let audit = analyze(html, "https://example.com/", SiteType::Ecommerce);

        let all: Vec<&ScoreItem> = audit
            .structure
            .items()
            .into_iter()
            .chain(audit.schema.items())
            .chain(audit.url.items())
            .chain(audit.meta.items())
            .chain(audit.content.items())
            .collect();
        assert_eq!(all.len(), 18);
        for item in all {
            assert!(item.score <= item.max_score, "{} exceeds max", item.name);
            assert!(!item.detail.is_empty(), "{} has empty detail", item.name);
        }
        assert!(audit.total() <= 100);
    }
}
