//! URL rule analyzer - path hygiene checks answer engines reward.
//!
//! Three binary checks on the pathname only. 15 points total. An
//! unparseable URL fails all three with a parse-failure detail.

use crate::domain::models::{ScoreItem, UrlAnalysis};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub fn analyze_url(url: &str) -> UrlAnalysis {
    let Ok(parsed) = Url::parse(url) else {
        return failed_analysis();
    };

    let pathname = parsed.path();

    let has_underscore = pathname.contains('_');
    let uses_hyphens = ScoreItem::new(
        "하이픈 사용",
        !has_underscore,
        if has_underscore { 0 } else { 5 },
        5,
        if has_underscore {
            format!("URL에 언더스코어(_) 발견: \"{pathname}\" - 하이픈(-) 사용 권장")
        } else {
            "하이픈 사용 규칙 준수".to_string()
        },
    );

    let has_uppercase = pathname != pathname.to_lowercase();
    let is_lowercase = ScoreItem::new(
        "소문자 사용",
        !has_uppercase,
        if has_uppercase { 0 } else { 5 },
        5,
        if has_uppercase {
            format!("URL에 대문자 포함: \"{pathname}\" - 소문자 사용 권장")
        } else {
            "소문자 규칙 준수".to_string()
        },
    );

    static ENCODED_PATTERN: OnceLock<Regex> = OnceLock::new();
    let encoded_pattern = ENCODED_PATTERN.get_or_init(|| Regex::new("%[A-Fa-f0-9]{2}").unwrap());
    let has_encoded_chars = encoded_pattern.is_match(pathname);
    let no_encoded_chars = ScoreItem::new(
        "영문 URL",
        !has_encoded_chars,
        if has_encoded_chars { 0 } else { 5 },
        5,
        if has_encoded_chars {
            format!("인코딩된 문자 감지: \"{pathname}\" - 영문 URL 사용 권장")
        } else {
            "영문 URL 규칙 준수".to_string()
        },
    );

    UrlAnalysis {
        uses_hyphens,
        is_lowercase,
        no_encoded_chars,
    }
}

fn failed_analysis() -> UrlAnalysis {
    let failed = |name: &str| ScoreItem::new(name, false, 0, 5, "URL 파싱 실패");

    UrlAnalysis {
        uses_hyphens: failed("하이픈 사용"),
        is_lowercase: failed("소문자 사용"),
        no_encoded_chars: failed("영문 URL"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_case_underscore_path() {
        let analysis = analyze_url("https://example.com/My_Page");
        assert_eq!(analysis.uses_hyphens.score, 0);
        assert!(!analysis.uses_hyphens.passed);
        assert_eq!(analysis.is_lowercase.score, 0);
        assert_eq!(analysis.no_encoded_chars.score, 5);
        assert_eq!(analysis.total(), 5);
    }

    #[test]
    fn test_clean_path_scores_full() {
        let analysis = analyze_url("https://example.com/seo-guide/best-chairs");
        assert_eq!(analysis.total(), 15);
        assert!(analysis.uses_hyphens.passed);
        assert!(analysis.is_lowercase.passed);
        assert!(analysis.no_encoded_chars.passed);
    }

    #[test]
    fn test_korean_path_is_percent_encoded() {
        // The url crate percent-encodes non-ASCII path segments, which is
        // exactly what the encoded-character check looks for.
        let analysis = analyze_url("https://example.com/검색");
        assert_eq!(analysis.no_encoded_chars.score, 0);
        assert!(analysis
            .no_encoded_chars
            .detail
            .contains("인코딩된 문자 감지"));
    }

    #[test]
    fn test_unparseable_url_fails_all_checks() {
        let analysis = analyze_url("not a url at all");
        assert_eq!(analysis.total(), 0);
        for item in analysis.items() {
            assert!(!item.passed);
            assert!(!item.name.is_empty());
            assert_eq!(item.detail, "URL 파싱 실패");
        }
    }

    #[test]
    fn test_query_string_is_ignored() {
        let analysis = analyze_url("https://example.com/page?Sort_Order=DESC");
        assert_eq!(analysis.total(), 15);
    }
}
