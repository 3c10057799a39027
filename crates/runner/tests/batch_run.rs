//! Batch Run Integration Test
//!
//! Runs several subjects through every switch method and the timing fit:
//! - Lexical tables with phonology
//! - Norms spelled differently from the lists (resolved by fuzzy match)
//! - SVD clusters mirroring the norms
//! - One subject with an unknown item that must fail on its own

use forage_core::{CategoryNorms, SwitchCode, TimingCode};
use forage_lexicon::{LexicalTables, SvdClusters};
use forage_norms::NormMatcher;
use forage_ports::LexiconError;
use forage_runner::{BatchResources, BatchRunner, RunnerConfig, RunnerError, Subject};
use forage_switch::SwitchMethod;

const VOCABULARY: [(&str, &str); 10] = [
    ("cow", "Farm"),
    ("cows", "Farm"),
    ("pig", "Farm"),
    ("horse", "Farm"),
    ("lion", "Africa"),
    ("tiger", "Africa"),
    ("tigers", "Africa"),
    ("zebra", "Africa"),
    ("salmon", "Fish"),
    ("trout", "Fish"),
];

fn group_of(item: &str) -> &'static str {
    VOCABULARY
        .iter()
        .find(|(label, _)| *label == item)
        .map(|(_, group)| *group)
        .unwrap()
}

fn lexical_tables() -> LexicalTables {
    let labels: Vec<String> = VOCABULARY.iter().map(|(l, _)| l.to_string()).collect();
    let n = labels.len();
    let mut semantic = vec![vec![1.0; n]; n];
    let mut phonological = vec![vec![1.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let (a, b) = (labels[i].as_str(), labels[j].as_str());
            semantic[i][j] = if group_of(a) == group_of(b) { 0.7 } else { 0.2 };
            phonological[i][j] = if a.chars().next() == b.chars().next() {
                0.5
            } else {
                0.1
            };
        }
    }
    let frequencies = (0..n).map(|i| i as f64 + 1.0).collect();

    LexicalTables::new(labels, semantic, frequencies)
        .unwrap()
        .with_phonology(phonological)
        .unwrap()
}

/// Norms only list singular spellings
fn norm_matcher() -> NormMatcher {
    NormMatcher::new(CategoryNorms::from_pairs(
        VOCABULARY
            .iter()
            .filter(|(label, _)| !matches!(*label, "cows" | "tigers"))
            .copied(),
    ))
}

fn svd_clusters() -> SvdClusters {
    let mut clusters = SvdClusters::new();
    for (label, group) in VOCABULARY {
        let cluster = match group {
            "Farm" => 0,
            "Africa" => 1,
            _ => 2,
        };
        clusters.assign(label, cluster, 0.8);
    }
    clusters
}

fn list(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn subjects() -> Vec<Subject> {
    vec![
        Subject::new(
            "s1",
            list(&[
                "cow", "pig", "horse", "lion", "tigers", "zebra", "salmon", "trout",
            ]),
        )
        .with_reaction_times(vec![2.0, 4.0, 5.5, 9.0, 10.5, 12.0, 17.0, 18.0]),
        Subject::new("s2", list(&["tigers", "lion", "cows", "pig"])),
        Subject::new("s3", list(&["cow", "unicorn"])),
    ]
}

fn config() -> RunnerConfig {
    RunnerConfig {
        methods: vec![
            SwitchMethod::Simdrop,
            SwitchMethod::Norms,
            SwitchMethod::NormsCategorical,
            SwitchMethod::Multimodal { alpha: 0.5 },
            SwitchMethod::Delta {
                rise_thresh: 0.5,
                fall_thresh: 0.5,
            },
            SwitchMethod::SvdGtom { threshold: 0.5 },
        ],
        ..Default::default()
    }
}

#[test]
fn test_batch_isolates_failing_subject() {
    let _ = env_logger::try_init();

    let tables = lexical_tables();
    let matcher = norm_matcher();
    let clusters = svd_clusters();
    let resources = BatchResources::new(&tables)
        .with_norms(&matcher)
        .with_clusters(&clusters);

    let runner = BatchRunner::new(config()).unwrap();
    let report = runner.run(&subjects(), &resources);

    assert_eq!(report.len(), 3);
    let ids: Vec<&str> = report
        .outcomes
        .iter()
        .map(|o| o.subject_id.as_str())
        .collect();
    assert_eq!(ids, vec!["s1", "s2", "s3"]);

    assert_eq!(report.succeeded().count(), 2);
    let failed: Vec<_> = report.failed().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, "s3");
    assert_eq!(
        *failed[0].1,
        RunnerError::Lexicon(LexiconError::UnknownItem("unicorn".to_string()))
    );
}

#[test]
fn test_norms_resolve_plural_spellings() {
    let tables = lexical_tables();
    let matcher = norm_matcher();
    let clusters = svd_clusters();
    let resources = BatchResources::new(&tables)
        .with_norms(&matcher)
        .with_clusters(&clusters);

    let runner = BatchRunner::new(config()).unwrap();
    let report = runner.run(&subjects(), &resources);

    let s1 = report.get("s1").unwrap().result.as_ref().unwrap();
    let expected = vec![2, 0, 0, 1, 0, 0, 1, 0];
    assert_eq!(s1.switches_for("norms").unwrap().to_codes(), expected);
    assert_eq!(
        s1.switches_for("norms_categorical").unwrap().to_codes(),
        expected
    );
    assert_eq!(s1.switches_for("svd_gtom").unwrap().to_codes(), expected);
    assert_eq!(
        s1.switches_for("simdrop").unwrap().to_codes(),
        vec![2, 0, 0, 1, 0, 0, 1, 2]
    );

    let s2 = report.get("s2").unwrap().result.as_ref().unwrap();
    assert_eq!(
        s2.switches_for("norms_categorical").unwrap().to_codes(),
        vec![2, 0, 1, 0]
    );

    // "tigers" and "cows" were fuzzy-matched once and shared across threads
    assert_eq!(matcher.cached(), 2);
}

#[test]
fn test_timing_only_for_subjects_with_times() {
    let tables = lexical_tables();
    let matcher = norm_matcher();
    let clusters = svd_clusters();
    let resources = BatchResources::new(&tables)
        .with_norms(&matcher)
        .with_clusters(&clusters);

    let runner = BatchRunner::new(config()).unwrap();
    let report = runner.run(&subjects(), &resources);

    let s1 = report.get("s1").unwrap().result.as_ref().unwrap();
    let timing = s1.timing.as_ref().unwrap().as_ref().unwrap();
    assert_eq!(timing.len(), 8);
    assert_eq!(timing.classification.codes()[0], TimingCode::Boundary);
    assert_eq!(timing.classification.count(TimingCode::Boundary), 1);
    assert!(timing.curve.c > 0.0 && timing.curve.c <= 36.0);
    assert!(timing.curve.m >= 0.0 && timing.curve.m <= 1.0);

    let s2 = report.get("s2").unwrap().result.as_ref().unwrap();
    assert!(s2.timing.is_none());
}

#[test]
fn test_parallel_run_matches_sequential() {
    let tables = lexical_tables();
    let matcher = norm_matcher();
    let clusters = svd_clusters();
    let resources = BatchResources::new(&tables)
        .with_norms(&matcher)
        .with_clusters(&clusters);

    let runner = BatchRunner::new(config()).unwrap();
    let subjects = subjects();
    let report = runner.run(&subjects, &resources);

    for subject in &subjects {
        let sequential = runner.run_subject(subject, &resources);
        let parallel = &report.get(&subject.id).unwrap().result;
        assert_eq!(&sequential, parallel, "{}", subject.id);
    }
}

#[test]
fn test_every_classification_starts_with_boundary() {
    let tables = lexical_tables();
    let matcher = norm_matcher();
    let clusters = svd_clusters();
    let resources = BatchResources::new(&tables)
        .with_norms(&matcher)
        .with_clusters(&clusters);

    let runner = BatchRunner::new(config()).unwrap();
    for report in runner.run(&subjects(), &resources).succeeded() {
        assert_eq!(report.switches.len(), 6);
        for (name, classification) in &report.switches {
            assert_eq!(classification.len(), report.history.len(), "{}", name);
            assert_eq!(classification[0], SwitchCode::Boundary, "{}", name);
        }
    }
}
