// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use retgate::guard::{encode_uri_component, path_search};
use retgate::{GuardConfig, PageLocation, RedirectPolicy, ResponseClassifier, StatusEnvelope};

fn classify_benchmark(c: &mut Criterion) {
    let policy = RedirectPolicy::new(&GuardConfig::production()).expect("default config");
    let classifier = ResponseClassifier::new(policy);
    let location =
        PageLocation::parse("https://v-ins.com.cn/orders/list?a.b=1&token=x").expect("location");

    let bodies: [&[u8]; 5] = [
        br#"{"retcode":0,"data":{"items":[1,2,3]}}"#,
        br#"{"retcode":1001,"message":"bad params"}"#,
        br#"{"retcode":4005,"message":"not logged in"}"#,
        br#"{"retcode":4006,"message":"expired"}"#,
        br#"{"retcode":"not_login","redirect":"https://sso.example/x"}"#,
    ];

    c.bench_function("envelope_parse", |b| {
        b.iter(|| {
            for body in &bodies {
                black_box(StatusEnvelope::from_body(body));
            }
        })
    });

    let envelopes: Vec<StatusEnvelope> =
        bodies.iter().map(|b| StatusEnvelope::from_body(b)).collect();

    c.bench_function("classify", |b| {
        b.iter(|| {
            for envelope in &envelopes {
                black_box(classifier.classify(envelope, &location, 1_700_000_000_000));
            }
        })
    });

    c.bench_function("path_search_encode", |b| {
        b.iter(|| black_box(encode_uri_component(&path_search(&location))))
    });
}

criterion_group!(benches, classify_benchmark);
criterion_main!(benches);
