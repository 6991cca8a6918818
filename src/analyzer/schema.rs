//! Schema markup analyzer - structured data answer engines can lift.
//!
//! Scores Product, FAQ, HowTo and Review structured data from JSON-LD
//! blocks and legacy microdata. 25 points total. A relevance table keyed
//! by site type gates each check; an inapplicable check scores full
//! marks so a portfolio site is not punished for lacking Product schema.

use crate::analyzer::jsonld::{self, display_value, is_present};
use crate::domain::models::{SchemaAnalysis, ScoreItem, SiteType};
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::OnceLock;

pub fn analyze_schema(html: &str, site_type: SiteType) -> SchemaAnalysis {
    let document = Html::parse_document(html);
    let schemas = jsonld::extract_blocks(&document);
    let microdata = Microdata::detect(&document);
    let relevance = Relevance::for_site_type(site_type);

    SchemaAnalysis {
        product_schema: if relevance.product {
            analyze_product(&schemas, microdata.product)
        } else {
            not_applicable("Product 스키마", 10, site_type)
        },
        faq_schema: if relevance.faq {
            analyze_faq(&schemas, microdata.faq)
        } else {
            not_applicable("FAQ 스키마", 5, site_type)
        },
        how_to_schema: if relevance.how_to {
            analyze_how_to(&schemas, microdata.how_to)
        } else {
            not_applicable("HowTo 스키마", 5, site_type)
        },
        review_schema: if relevance.review {
            analyze_review(&schemas, microdata.review)
        } else {
            not_applicable("Review 스키마", 5, site_type)
        },
    }
}

/// Which schema checks apply per site type.
struct Relevance {
    product: bool,
    faq: bool,
    how_to: bool,
    review: bool,
}

impl Relevance {
    fn for_site_type(site_type: SiteType) -> Self {
        match site_type {
            SiteType::General | SiteType::Ecommerce => Self {
                product: true,
                faq: true,
                how_to: true,
                review: true,
            },
            SiteType::Blog => Self {
                product: false,
                faq: true,
                how_to: true,
                review: false,
            },
            SiteType::Corporate => Self {
                product: false,
                faq: true,
                how_to: false,
                review: false,
            },
            SiteType::Portfolio => Self {
                product: false,
                faq: false,
                how_to: false,
                review: false,
            },
        }
    }
}

fn not_applicable(name: &str, max_score: u32, site_type: SiteType) -> ScoreItem {
    ScoreItem::new(
        name,
        true,
        max_score,
        max_score,
        format!("{}에는 해당 없음 - 감점 제외", site_type.label_ko()),
    )
}

struct Microdata {
    product: bool,
    faq: bool,
    how_to: bool,
    review: bool,
}

impl Microdata {
    fn detect(document: &Html) -> Self {
        static PRODUCT: OnceLock<Selector> = OnceLock::new();
        static FAQ: OnceLock<Selector> = OnceLock::new();
        static HOW_TO: OnceLock<Selector> = OnceLock::new();
        static REVIEW: OnceLock<Selector> = OnceLock::new();
        let product =
            PRODUCT.get_or_init(|| Selector::parse("[itemtype*='schema.org/Product']").unwrap());
        let faq = FAQ.get_or_init(|| Selector::parse("[itemtype*='schema.org/FAQPage']").unwrap());
        let how_to =
            HOW_TO.get_or_init(|| Selector::parse("[itemtype*='schema.org/HowTo']").unwrap());
        let review =
            REVIEW.get_or_init(|| Selector::parse("[itemtype*='schema.org/Review']").unwrap());

        Self {
            product: document.select(product).next().is_some(),
            faq: document.select(faq).next().is_some(),
            how_to: document.select(how_to).next().is_some(),
            review: document.select(review).next().is_some(),
        }
    }
}

fn analyze_product(schemas: &[Value], has_microdata: bool) -> ScoreItem {
    let product = jsonld::find_by_type(schemas, "Product");

    let Some(product) = product else {
        if has_microdata {
            return ScoreItem::new(
                "Product 스키마",
                true,
                5,
                10,
                "Product 마이크로데이터 존재 - JSON-LD 형식 권장",
            );
        }
        return ScoreItem::new(
            "Product 스키마",
            false,
            0,
            10,
            "Product 스키마 없음 - 제품 페이지인 경우 추가 필수",
        );
    };

    let has_required = ["name", "description"]
        .iter()
        .all(|field| is_present(product.get(*field)));
    let recommended_count = ["image", "brand", "sku", "offers"]
        .iter()
        .filter(|field| is_present(product.get(**field)))
        .count();

    // An offers array contributes through its first entry only.
    let offer = product.get("offers").and_then(|offers| match offers {
        Value::Array(entries) => entries.first(),
        other => Some(other),
    });
    let offer_count = offer
        .map(|o| {
            ["price", "priceCurrency", "availability"]
                .iter()
                .filter(|field| is_present(o.get(**field)))
                .count()
        })
        .unwrap_or(0);

    let total_fields = recommended_count + offer_count;
    let mut missing: Vec<&str> = Vec::new();
    let mut detail = String::new();
    let score;

    if !has_required {
        score = 2;
        if !is_present(product.get("name")) {
            missing.push("name");
        }
        if !is_present(product.get("description")) {
            missing.push("description");
        }
    } else if total_fields >= 6 {
        score = 10;
        detail = "Product 스키마 완벽: 모든 권장 필드 포함".to_string();
    } else if total_fields >= 4 {
        score = 8;
        if !offer.map(|o| is_present(o.get("price"))).unwrap_or(false) {
            missing.push("price");
        }
        if !offer
            .map(|o| is_present(o.get("availability")))
            .unwrap_or(false)
        {
            missing.push("availability");
        }
    } else if total_fields >= 2 {
        score = 5;
        if !is_present(product.get("brand")) {
            missing.push("brand");
        }
        if !is_present(product.get("sku")) {
            missing.push("sku");
        }
        if !is_present(product.get("offers")) {
            missing.push("offers");
        }
    } else {
        score = 3;
    }

    if !missing.is_empty() {
        detail = format!("Product 스키마 존재 - 누락 필드: {}", missing.join(", "));
    } else if detail.is_empty() {
        detail = "Product 스키마 양호".to_string();
    }

    ScoreItem::new("Product 스키마", score >= 5, score, 10, detail)
}

fn analyze_faq(schemas: &[Value], has_microdata: bool) -> ScoreItem {
    let faq = jsonld::find_by_type(schemas, "FAQPage");

    if faq.is_none() && !has_microdata {
        return ScoreItem::new(
            "FAQ 스키마",
            false,
            0,
            5,
            "FAQ 스키마 없음 - 자주 묻는 질문 섹션 추가 권장",
        );
    }

    let question_count = entry_count(faq, "mainEntity");

    let (score, detail) = if question_count >= 5 {
        (5, format!("FAQ 스키마 완벽: {question_count}개 Q&A 포함"))
    } else if question_count >= 3 {
        (
            4,
            format!("FAQ 스키마 양호: {question_count}개 Q&A - 5개 이상 권장"),
        )
    } else if question_count >= 1 || has_microdata {
        (2, "FAQ 스키마 존재 - 더 많은 Q&A 추가 권장".to_string())
    } else {
        (0, "FAQ 스키마에 Q&A 없음 - mainEntity 추가 필요".to_string())
    };

    ScoreItem::new("FAQ 스키마", score >= 3, score, 5, detail)
}

fn analyze_how_to(schemas: &[Value], has_microdata: bool) -> ScoreItem {
    let how_to = jsonld::find_by_type(schemas, "HowTo");

    if how_to.is_none() && !has_microdata {
        return ScoreItem::new(
            "HowTo 스키마",
            false,
            0,
            5,
            "HowTo 스키마 없음 - 가이드/튜토리얼 콘텐츠인 경우 추가 권장",
        );
    }

    let step_count = entry_count(how_to, "step");

    let (score, detail) = if step_count >= 5 {
        (5, format!("HowTo 스키마 완벽: {step_count}개 단계 포함"))
    } else if step_count >= 3 {
        (4, format!("HowTo 스키마 양호: {step_count}개 단계"))
    } else if step_count >= 1 || has_microdata {
        (2, "HowTo 스키마 존재 - 상세 단계 추가 권장".to_string())
    } else {
        (0, "HowTo 스키마에 단계 없음 - step 추가 필요".to_string())
    };

    ScoreItem::new("HowTo 스키마", score >= 3, score, 5, detail)
}

fn analyze_review(schemas: &[Value], has_microdata: bool) -> ScoreItem {
    let review = jsonld::find_by_type(schemas, "Review");
    let aggregate = jsonld::find_by_type(schemas, "AggregateRating");
    let product = jsonld::find_by_type(schemas, "Product");

    let product_rating = product
        .and_then(|p| p.get("aggregateRating"))
        .filter(|v| is_present(Some(v)));
    let product_review = product
        .and_then(|p| p.get("review"))
        .filter(|v| is_present(Some(v)));

    if review.is_none()
        && aggregate.is_none()
        && product_rating.is_none()
        && product_review.is_none()
        && !has_microdata
    {
        return ScoreItem::new(
            "Review 스키마",
            false,
            0,
            5,
            "Review/Rating 스키마 없음 - 리뷰 데이터가 있다면 스키마 추가 권장",
        );
    }

    let (score, detail) = if let Some(rating) = aggregate.or(product_rating) {
        let rating_value = rating.get("ratingValue").filter(|v| is_present(Some(v)));
        let review_count = rating
            .get("reviewCount")
            .filter(|v| is_present(Some(v)))
            .or_else(|| rating.get("ratingCount").filter(|v| is_present(Some(v))));

        match (rating_value, review_count) {
            (Some(value), Some(count)) => (
                5,
                format!(
                    "Review 스키마 완벽: 평점 {}, 리뷰 {}개",
                    display_value(value),
                    display_value(count)
                ),
            ),
            _ => (3, "AggregateRating 존재 - reviewCount 추가 권장".to_string()),
        }
    } else {
        (2, "Review 스키마 존재 - AggregateRating 추가 권장".to_string())
    };

    ScoreItem::new("Review 스키마", score >= 3, score, 5, detail)
}

/// Entry count the way duck-typed consumers read it: array length,
/// 1 for a single object, 0 when absent.
fn entry_count(schema: Option<&Value>, key: &str) -> usize {
    match schema.and_then(|s| s.get(key)) {
        Some(Value::Array(entries)) => entries.len(),
        Some(value) if is_present(Some(value)) => 1,
        _ => 0,
    }
}
