//! Recommendation generator - turns failed checks into actions.
//!
//! Every failed item maps through a static suggestion table keyed by the
//! item name; priority comes from the item's max score, so a 7-point
//! check outranks a 3-point one no matter the category.

use crate::domain::models::{Categories, Category, CategoryScore, Priority, Recommendation};

pub fn generate_recommendations(categories: &Categories) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let ordered: [(Category, &CategoryScore); 5] = [
        (Category::Structure, &categories.structure),
        (Category::Schema, &categories.schema),
        (Category::Url, &categories.url),
        (Category::Meta, &categories.meta),
        (Category::Content, &categories.content),
    ];

    for (category, score) in ordered {
        for item in &score.items {
            if !item.passed {
                let (suggestion, impact) = lookup(&item.name);
                recommendations.push(Recommendation {
                    priority: Priority::from_max_score(item.max_score),
                    category,
                    issue: format!("{}: {}", item.name, item.detail),
                    suggestion: suggestion.to_string(),
                    impact: impact.to_string(),
                });
            }
        }
    }

    // Stable sort keeps category insertion order inside a priority tier.
    recommendations.sort_by_key(|r| r.priority);
    recommendations
}

fn lookup(name: &str) -> (&'static str, &'static str) {
    match name {
        "목록형 콘텐츠" => (
            "핵심 정보를 <ul> 또는 <ol> 목록으로 정리하세요. AI는 목록 형태의 정보를 50% 더 자주 인용합니다.",
            "최대 +7점",
        ),
        "표 형식 사용" => (
            "비교 데이터나 스펙을 <table>로 정리하고 <thead>와 <th>를 포함하세요.",
            "최대 +6점, 인용률 2.5배 증가",
        ),
        "두괄식 작성" => (
            "각 섹션의 첫 40-60단어 안에 핵심 답변을 배치하세요.",
            "최대 +7점",
        ),
        "콘텐츠 최신성" => (
            "datePublished, dateModified 스키마를 추가하고 콘텐츠를 정기적으로 업데이트하세요.",
            "최대 +5점",
        ),
        "Product 스키마" => (
            "Product 스키마에 name, description, price, availability, brand, sku를 포함하세요.",
            "최대 +10점",
        ),
        "FAQ 스키마" => (
            "FAQPage 스키마를 추가하고 최소 5개 이상의 Q&A를 포함하세요.",
            "최대 +5점",
        ),
        "HowTo 스키마" => ("가이드 콘텐츠에 HowTo 스키마를 추가하세요.", "최대 +5점"),
        "Review 스키마" => (
            "AggregateRating 스키마에 ratingValue와 reviewCount를 포함하세요.",
            "최대 +5점",
        ),
        "하이픈 사용" => ("URL에서 언더스코어(_)를 하이픈(-)으로 변경하세요.", "+5점"),
        "소문자 사용" => ("URL을 모두 소문자로 변경하세요.", "+5점"),
        "영문 URL" => (
            "한글 URL을 영문으로 변경하세요 (예: /검색 → /search).",
            "+5점",
        ),
        "Title 최적화" => (
            "Title을 50-60자로 조정하고 쇼핑 의도 키워드(추천, 비교, 가이드 등)를 포함하세요.",
            "최대 +7점",
        ),
        "Description 최적화" => (
            "Description을 120-160자로 작성하고 \"~를 찾는\", \"~를 위한\" 같은 의도 문구를 포함하세요.",
            "최대 +7점",
        ),
        "Open Graph" => (
            "og:title, og:description, og:image 태그를 추가하세요.",
            "최대 +3점",
        ),
        "Canonical URL" => (
            "<link rel=\"canonical\" href=\"...\"> 태그를 추가하세요.",
            "최대 +3점",
        ),
        "데이터/통계" => (
            "구체적인 수치, 통계, 퍼센트 데이터를 추가하세요. AI는 정량적 데이터를 신뢰합니다.",
            "최대 +5점",
        ),
        "출처 표기" => (
            "신뢰할 수 있는 외부 소스 링크와 인용을 추가하세요.",
            "최대 +5점",
        ),
        "HTML vs 이미지" => (
            "텍스트 이미지를 HTML 텍스트로 변환하고 표/목록을 HTML로 작성하세요.",
            "최대 +5점",
        ),
        _ => ("해당 항목을 개선하세요.", "점수 향상"),
    }
}
