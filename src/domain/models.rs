//! Report entities for the GEO scoring engine.
//!
//! Everything here is a pure computation output for a single analysis
//! run; serialization matches the wire shape the report consumers read
//! (`camelCase` keys, grades as `"A+"` etc.).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ====== Enums ======

/// Letter grade derived from the 0-100 total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    D,
    F,
}

impl Grade {
    /// Map a total score to its grade. Caller guarantees 0-100; no
    /// clamping of out-of-range input is performed.
    pub fn from_score(total_score: u32) -> Self {
        match total_score {
            95.. => Grade::APlus,
            85.. => Grade::A,
            78.. => Grade::BPlus,
            70.. => Grade::B,
            63.. => Grade::CPlus,
            55.. => Grade::C,
            40.. => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Grade::APlus => "AI 검색 엔진 최적화 완벽",
            Grade::A => "AI 검색 엔진 최적화 우수",
            Grade::BPlus => "AI 검색 엔진 최적화 양호",
            Grade::B => "AI 검색 엔진 최적화 보통",
            Grade::CPlus => "개선 필요",
            Grade::C => "상당한 개선 필요",
            Grade::D => "많은 개선 필요",
            Grade::F => "전면 개선 필요",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Site classification gating which schema checks are relevant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    #[default]
    General,
    Ecommerce,
    Blog,
    Corporate,
    Portfolio,
}

impl SiteType {
    pub fn label_ko(&self) -> &'static str {
        match self {
            SiteType::General => "일반 사이트",
            SiteType::Ecommerce => "쇼핑몰",
            SiteType::Blog => "블로그",
            SiteType::Corporate => "기업 사이트",
            SiteType::Portfolio => "포트폴리오",
        }
    }
}

impl FromStr for SiteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "general" => Ok(SiteType::General),
            "ecommerce" => Ok(SiteType::Ecommerce),
            "blog" => Ok(SiteType::Blog),
            "corporate" => Ok(SiteType::Corporate),
            "portfolio" => Ok(SiteType::Portfolio),
            other => Err(format!(
                "unknown site type '{other}' (expected general|ecommerce|blog|corporate|portfolio)"
            )),
        }
    }
}

/// Recommendation priority, derived from the failed item's max score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Items worth >=7 points are high priority, >=5 medium, the rest low.
    pub fn from_max_score(max_score: u32) -> Self {
        if max_score >= 7 {
            Priority::High
        } else if max_score >= 5 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

/// One of the five scoring dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Structure,
    Schema,
    Url,
    Meta,
    Content,
}

// ====== Atomic evaluation result ======

/// Atomic named check with a bounded score and human-readable rationale.
///
/// `name` is stable across runs and keys the recommendation table;
/// `detail` always carries the measured quantities behind the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreItem {
    pub name: String,
    pub passed: bool,
    pub score: u32,
    pub max_score: u32,
    pub detail: String,
}

impl ScoreItem {
    pub fn new(
        name: impl Into<String>,
        passed: bool,
        score: u32,
        max_score: u32,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            passed,
            score,
            max_score,
            detail: detail.into(),
        }
    }
}

// ====== Per-analyzer bundles ======

/// Structure analysis: lists, tables, answer-first sections, freshness. Max 25.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureAnalysis {
    pub list_content: ScoreItem,
    pub table_usage: ScoreItem,
    pub heading_first: ScoreItem,
    pub freshness: ScoreItem,
}

impl StructureAnalysis {
    pub fn total(&self) -> u32 {
        self.list_content.score
            + self.table_usage.score
            + self.heading_first.score
            + self.freshness.score
    }

    pub fn items(&self) -> [&ScoreItem; 4] {
        [
            &self.list_content,
            &self.table_usage,
            &self.heading_first,
            &self.freshness,
        ]
    }
}

/// Schema analysis: Product/FAQ/HowTo/Review structured data. Max 25.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaAnalysis {
    pub product_schema: ScoreItem,
    pub faq_schema: ScoreItem,
    pub how_to_schema: ScoreItem,
    pub review_schema: ScoreItem,
}

impl SchemaAnalysis {
    pub fn total(&self) -> u32 {
        self.product_schema.score
            + self.faq_schema.score
            + self.how_to_schema.score
            + self.review_schema.score
    }

    pub fn items(&self) -> [&ScoreItem; 4] {
        [
            &self.product_schema,
            &self.faq_schema,
            &self.how_to_schema,
            &self.review_schema,
        ]
    }
}

/// URL rule analysis: hyphens, lowercase, encoded characters. Max 15.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlAnalysis {
    pub uses_hyphens: ScoreItem,
    pub is_lowercase: ScoreItem,
    pub no_encoded_chars: ScoreItem,
}

impl UrlAnalysis {
    pub fn total(&self) -> u32 {
        self.uses_hyphens.score + self.is_lowercase.score + self.no_encoded_chars.score
    }

    pub fn items(&self) -> [&ScoreItem; 3] {
        [
            &self.uses_hyphens,
            &self.is_lowercase,
            &self.no_encoded_chars,
        ]
    }
}

/// Meta tag analysis: title, description, Open Graph, canonical. Max 20.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaAnalysis {
    pub title_optimization: ScoreItem,
    pub description_optimization: ScoreItem,
    pub open_graph: ScoreItem,
    pub canonical_url: ScoreItem,
}

impl MetaAnalysis {
    pub fn total(&self) -> u32 {
        self.title_optimization.score
            + self.description_optimization.score
            + self.open_graph.score
            + self.canonical_url.score
    }

    pub fn items(&self) -> [&ScoreItem; 4] {
        [
            &self.title_optimization,
            &self.description_optimization,
            &self.open_graph,
            &self.canonical_url,
        ]
    }
}

/// Content authority analysis: statistics, citations, HTML vs image. Max 15.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub has_statistics: ScoreItem,
    pub has_citations: ScoreItem,
    pub html_vs_image: ScoreItem,
}

impl ContentAnalysis {
    pub fn total(&self) -> u32 {
        self.has_statistics.score + self.has_citations.score + self.html_vs_image.score
    }

    pub fn items(&self) -> [&ScoreItem; 3] {
        [
            &self.has_statistics,
            &self.has_citations,
            &self.html_vs_image,
        ]
    }
}

/// All five analyzer bundles for a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAudit {
    pub structure: StructureAnalysis,
    pub schema: SchemaAnalysis,
    pub url: UrlAnalysis,
    pub meta: MetaAnalysis,
    pub content: ContentAnalysis,
}

impl PageAudit {
    pub fn total(&self) -> u32 {
        self.structure.total()
            + self.schema.total()
            + self.url.total()
            + self.meta.total()
            + self.content.total()
    }
}

// ====== Aggregated report entities ======

/// Per-category aggregate across all analyzed pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub items: Vec<ScoreItem>,
}

impl CategoryScore {
    pub fn new(score: u32, max_score: u32, items: Vec<ScoreItem>) -> Self {
        Self {
            score,
            max_score,
            percentage: (score as f64 / max_score as f64 * 100.0).round() as u32,
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Categories {
    pub structure: CategoryScore,
    pub schema: CategoryScore,
    pub url: CategoryScore,
    pub meta: CategoryScore,
    pub content: CategoryScore,
}

/// Unaveraged category totals for a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageScores {
    pub structure: u32,
    pub schema: u32,
    pub url: u32,
    pub meta: u32,
    pub content: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAnalysis {
    pub url: String,
    pub title: String,
    pub scores: PageScores,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Priority,
    pub category: Category,
    pub issue: String,
    pub suggestion: String,
    pub impact: String,
}

/// Top-level report for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoScoreResult {
    pub url: String,
    pub analyzed_at: String,
    pub total_score: u32,
    pub grade: Grade,
    pub categories: Categories,
    pub pages: Vec<PageAnalysis>,
    pub recommendations: Vec<Recommendation>,
}

// ====== Crawler contract ======

/// One crawled page as supplied by the crawler collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub url: String,
    pub html: String,
    pub title: String,
    pub load_time: f64,
    pub status_code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_score(100), Grade::APlus);
        assert_eq!(Grade::from_score(95), Grade::APlus);
        assert_eq!(Grade::from_score(94), Grade::A);
        assert_eq!(Grade::from_score(85), Grade::A);
        assert_eq!(Grade::from_score(78), Grade::BPlus);
        assert_eq!(Grade::from_score(70), Grade::B);
        assert_eq!(Grade::from_score(63), Grade::CPlus);
        assert_eq!(Grade::from_score(55), Grade::C);
        assert_eq!(Grade::from_score(40), Grade::D);
        assert_eq!(Grade::from_score(39), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
    }

    #[test]
    fn test_grade_monotonic() {
        // A higher total must never produce a strictly worse grade.
        let rank = |g: Grade| match g {
            Grade::APlus => 7,
            Grade::A => 6,
            Grade::BPlus => 5,
            Grade::B => 4,
            Grade::CPlus => 3,
            Grade::C => 2,
            Grade::D => 1,
            Grade::F => 0,
        };
        let mut prev = rank(Grade::from_score(0));
        for score in 1..=100 {
            let current = rank(Grade::from_score(score));
            assert!(
                current >= prev,
                "grade rank regressed between {} and {}",
                score - 1,
                score
            );
            prev = current;
        }
    }

    #[test]
    fn test_grade_serializes_with_plus_sign() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
        assert_eq!(serde_json::to_string(&Grade::BPlus).unwrap(), "\"B+\"");
        assert_eq!(serde_json::to_string(&Grade::F).unwrap(), "\"F\"");
    }

    #[test]
    fn test_site_type_parsing() {
        assert_eq!("ecommerce".parse::<SiteType>().unwrap(), SiteType::Ecommerce);
        assert_eq!("Portfolio".parse::<SiteType>().unwrap(), SiteType::Portfolio);
        assert!("webshop".parse::<SiteType>().is_err());
        assert_eq!(SiteType::default(), SiteType::General);
    }

    #[test]
    fn test_priority_from_max_score() {
        assert_eq!(Priority::from_max_score(10), Priority::High);
        assert_eq!(Priority::from_max_score(7), Priority::High);
        assert_eq!(Priority::from_max_score(6), Priority::Medium);
        assert_eq!(Priority::from_max_score(5), Priority::Medium);
        assert_eq!(Priority::from_max_score(3), Priority::Low);
    }

    #[test]
    fn test_category_score_percentage_rounds() {
        let cat = CategoryScore::new(13, 25, Vec::new());
        assert_eq!(cat.percentage, 52);
        let cat = CategoryScore::new(7, 15, Vec::new());
        // 46.66.. rounds to 47
        assert_eq!(cat.percentage, 47);
    }

    #[test]
    fn test_score_item_serializes_camel_case() {
        let item = ScoreItem::new("표 형식 사용", true, 4, 6, "표 1개 발견 (헤더 포함)");
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("maxScore").is_some());
        assert!(json.get("max_score").is_none());
    }
}
