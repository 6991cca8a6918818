// benches/analyzer_benchmarks.rs
use criterion::{criterion_group, criterion_main, Criterion};
use std::{hint::black_box, time::Duration};

use geoscore::analyzer::analyze;
use geoscore::domain::models::SiteType;

fn fixture_html() -> String {
    let body = r#"
        <h2>요약</h2>
        <p>결론적으로 2024년 조사 결과 사용자의 87%가 만족했습니다. 판매량은 120만개로
        통계 기준 2.5배 성장했으며 연구 데이터 분석 리포트가 이를 뒷받침합니다.</p>
        <table><thead><tr><th>모델</th><th>가격</th></tr></thead>
        <tr><td>A</td><td>299,000원</td></tr></table>
        <ul><li>하나</li><li>둘</li><li>셋</li><li>넷</li></ul>
        <ol><li>다섯</li><li>여섯</li><li>일곱</li></ol>
        <a href="https://ko.wikipedia.org/wiki/SEO">위키백과</a>
        <blockquote>전문가 인용</blockquote>
    "#
    .repeat(20);

    format!(
        r#"<html><head>
        <title>2024년 무선 청소기 추천 비교 가이드 - 가격과 성능 총정리</title>
        <meta name="description" content="무선 청소기를 찾는 분들을 위한 가격 비교와 추천 가이드입니다.">
        <meta property="og:title" content="무선 청소기 추천">
        <meta property="og:description" content="비교 가이드">
        <meta property="og:image" content="cover.jpg">
        <link rel="canonical" href="https://example.com/guide">
        <script type="application/ld+json">
        {{"@type":"Product","name":"청소기","description":"무선 청소기","brand":"BrandCo",
          "offers":{{"price":"299000","priceCurrency":"KRW","availability":"InStock"}}}}
        </script>
        </head><body>{body}</body></html>"#
    )
}

fn bench_analyze_single_page(c: &mut Criterion) {
    let html = fixture_html();

    c.bench_function("analyze_rich_page", |b| {
        b.iter(|| {
            let audit = analyze(
                black_box(&html),
                black_box("https://example.com/guide"),
                SiteType::General,
            );
            black_box(audit)
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(10));
    targets = bench_analyze_single_page
}

criterion_main!(benches);
