//! Pattern matcher and decision point benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hrms_authz::{
    aggregate_roles, AccessRule, DecisionPoint, InMemoryAuthzStore, Role, RoleStore, RuleStore,
};
use std::sync::Arc;
use tokio::runtime::Runtime;

fn create_test_rules(count: usize) -> Vec<AccessRule> {
    (0..count)
        .map(|i| {
            AccessRule::new(
                format!("r{}", i),
                format!("RULE_{}", i),
                &format!("/api/module{}/**", i % 50),
                if i % 3 == 0 { "*" } else { "GET" },
            )
        })
        .collect()
}

fn bench_pattern_matching(c: &mut Criterion) {
    let literal = AccessRule::new("r", "L", "/api/employees", "GET");
    let wildcard = AccessRule::new("r", "W", "/api/employees/*/contracts", "GET");
    let glob = AccessRule::new("r", "G", "/api/employees/**", "*");

    let mut group = c.benchmark_group("pattern_matching");
    group.bench_function("literal", |b| {
        b.iter(|| literal.matches(black_box("/api/employees"), black_box("GET")))
    });
    group.bench_function("single_wildcard", |b| {
        b.iter(|| wildcard.matches(black_box("/api/employees/42/contracts"), black_box("GET")))
    });
    group.bench_function("trailing_glob", |b| {
        b.iter(|| glob.matches(black_box("/api/employees/42/contracts/2024"), black_box("PUT")))
    });
    group.finish();
}

fn bench_decision(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("decision_point");

    for rule_count in [10, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("rules", rule_count),
            rule_count,
            |b, &count| {
                let (engine, snapshot) = rt.block_on(async {
                    let store = InMemoryAuthzStore::new();
                    let rules = create_test_rules(count);
                    let mut role = Role::new("role-bench", "BENCH");
                    for rule in rules {
                        RuleStore::put(&store, rule.clone()).await.unwrap();
                        role.add_rule(rule);
                    }
                    RoleStore::put(&store, role.clone()).await.unwrap();

                    let snapshot = aggregate_roles("user:bench", &[role]);
                    let engine = DecisionPoint::new(Arc::new(store.clone()), Arc::new(store));
                    (engine, snapshot)
                });

                b.iter(|| {
                    rt.block_on(async {
                        engine
                            .decide(
                                black_box(Some(&snapshot)),
                                black_box("/api/module7/records/42"),
                                black_box("GET"),
                            )
                            .await
                            .unwrap()
                    })
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_pattern_matching, bench_decision);
criterion_main!(benches);
