//! Benchmarks for tier classification and candidate registration

use candidate_tiering::{
    AssessmentResponse, CandidateInput, CandidateQuery, CandidateRegistry, ExperienceLevel,
    SortField, TierClassifier,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde_json::json;

fn mid_level_answers() -> serde_json::Value {
    json!({
        "htmlCssJsKnowledge": "advanced",
        "reactNextJsKnowledge": "intermediate",
        "canBuildCrudApp": true,
        "canImplementAuth": true,
        "canImplementGoogleAuth": false,
        "databaseKnowledge": "intermediate",
        "expressHonoKnowledge": "intermediate",
        "canBuildAuthenticatedApi": true,
        "canDocumentApi": true,
        "laravelKnowledge": "none",
        "golangKnowledge": "none",
        "canBuildGoApi": false,
        "canDeployApps": true
    })
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier");
    group.throughput(Throughput::Elements(1));

    let classifier = TierClassifier::new();
    let typed = AssessmentResponse::uniform(ExperienceLevel::Advanced, true);
    let raw = mid_level_answers();

    group.bench_function("classify_typed", |b| {
        b.iter(|| classifier.classify(black_box(&typed)));
    });

    group.bench_function("classify_json", |b| {
        b.iter(|| classifier.classify_value(black_box(Some(&raw))));
    });

    group.finish();
}

fn bench_register(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    group.throughput(Throughput::Elements(1));

    group.bench_function("register_candidate", |b| {
        let registry = CandidateRegistry::new();
        let mut counter = 0u64;

        b.iter(|| {
            counter += 1;
            let _ = registry.register(CandidateInput {
                name: "Bench Candidate".into(),
                email: format!("bench{}@example.com", counter),
                phone: "+1234567890".into(),
                country: None,
                assessment_responses: Some(mid_level_answers()),
            });
        });
    });

    group.finish();
}

fn bench_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    // Pre-register candidates
    let registry = CandidateRegistry::new();
    for i in 0..1000 {
        let _ = registry.register(CandidateInput {
            name: format!("Candidate {:04}", i),
            email: format!("candidate{}@example.com", i),
            phone: "+1234567890".into(),
            country: Some("USA".into()),
            assessment_responses: Some(mid_level_answers()),
        });
    }

    let query = CandidateQuery {
        search: Some("candidate 04".into()),
        sort_by: SortField::Name,
        ..Default::default()
    };

    group.bench_function("list_search_1000", |b| {
        b.iter(|| registry.list(black_box(&query)));
    });

    group.bench_function("stats_1000", |b| {
        b.iter(|| registry.stats());
    });

    group.finish();
}

criterion_group!(benches, bench_classify, bench_register, bench_list);
criterion_main!(benches);
