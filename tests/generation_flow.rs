//! End-to-end generation flows, including the concurrent-creation race the
//! durable store's unique constraint has to settle.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{MemorySequenceStore, test_engine};
use shortcode_engine::prelude::*;
use shortcode_engine::utils::code_validator::validate_code;

#[tokio::test]
async fn test_generated_codes_always_validate() {
    let engine = test_engine();

    for strategy in [
        Strategy::Random,
        Strategy::Pronounceable,
        Strategy::Memorable,
        Strategy::Sequential,
    ] {
        let code = engine
            .generator
            .generate(&GenerationRequest::with_strategy(strategy))
            .await
            .unwrap();
        assert!(validate_code(&code).is_ok(), "{:?} produced '{}'", strategy, code);
    }
}

#[tokio::test]
async fn test_generate_all_lengths_in_range() {
    let engine = test_engine();

    for length in [3usize, 10, 25, 50] {
        let request = GenerationRequest {
            length: Some(length),
            ..GenerationRequest::default()
        };
        let code = engine.generator.generate(&request).await.unwrap();
        assert_eq!(code.len(), length);
    }
}

#[tokio::test]
async fn test_bulk_generate_batch_is_collision_free() {
    let engine = test_engine();

    let codes = engine
        .generator
        .bulk_generate(100, &GenerationRequest::default())
        .await
        .unwrap();

    let unique: HashSet<&String> = codes.iter().collect();
    assert_eq!(unique.len(), 100);
}

#[tokio::test]
async fn test_sequential_counter_never_duplicates_under_concurrency() {
    let sequence = Arc::new(MemorySequenceStore::new());

    let mut handles = Vec::new();
    for _ in 0..50 {
        let sequence = sequence.clone();
        handles.push(tokio::spawn(async move {
            sequence.increment_and_get("shortcode:counter").await.unwrap()
        }));
    }

    let mut values = HashSet::new();
    for handle in handles {
        assert!(values.insert(handle.await.unwrap()), "duplicate counter value");
    }
    assert_eq!(values.len(), 50);
}

#[tokio::test]
async fn test_sequential_codes_are_strictly_increasing() {
    let engine = test_engine();
    let request = GenerationRequest::with_strategy(Strategy::Sequential);

    let mut previous = String::new();
    for _ in 0..5 {
        let code = engine.generator.generate(&request).await.unwrap();
        if !previous.is_empty() {
            assert_eq!(code.len(), previous.len());
            assert!(code > previous, "{} should sort after {}", code, previous);
        }
        previous = code;
    }
}

#[tokio::test]
async fn test_concurrent_creation_race_surfaces_constraint_violation() {
    // A deterministic strategy makes both writers pick the same candidate, so
    // both pass the advisory check and race the insert. Exactly one may win;
    // the loser must see the conflict, never a silent duplicate.
    let engine = Arc::new(test_engine());

    let request = GenerationRequest {
        strategy: Strategy::HashBased,
        hash_source: Some("https://example.com/contested".to_string()),
        max_retries: Some(2),
        ..GenerationRequest::default()
    };

    let input = || CreateLink {
        long_url: "https://example.com/contested".to_string(),
        generation: request.clone(),
        ..CreateLink::default()
    };

    let (a, b) = tokio::join!(
        {
            let engine = engine.clone();
            let input = input();
            async move { engine.links.create_link(input).await }
        },
        {
            let engine = engine.clone();
            let input = input();
            async move { engine.links.create_link(input).await }
        }
    );

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one writer may claim the code");
    assert_eq!(engine.store.len(), 1, "no duplicate links were created");

    let loser = if a.is_err() { a } else { b };
    assert!(matches!(
        loser.unwrap_err(),
        CodeError::Exhausted { .. } | CodeError::CodeTaken
    ));
}

#[tokio::test]
async fn test_custom_code_lost_race_is_reported_as_taken() {
    let engine = test_engine();

    let input = CreateLink {
        long_url: "https://example.com".to_string(),
        custom_code: Some("flash-sale".to_string()),
        ..CreateLink::default()
    };

    engine.links.create_link(input.clone()).await.unwrap();

    let err = engine.links.create_link(input).await.unwrap_err();
    assert!(matches!(err, CodeError::CodeTaken));
}

#[tokio::test]
async fn test_memorable_scenario_word_digits() {
    let engine = test_engine();

    let request = GenerationRequest {
        strategy: Strategy::Memorable,
        length: Some(6),
        ..GenerationRequest::default()
    };

    let code = engine.generator.generate(&request).await.unwrap();

    assert!(code.len() <= 8, "got '{}'", code);
    assert!(validate_code(&code).is_ok());
    let digits: String = code.chars().skip_while(|c| c.is_ascii_alphabetic()).collect();
    assert!(digits.len() >= 2);
    assert!(digits.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_validate_reserved_scenario() {
    let engine = test_engine();

    let report = engine.generator.validate("admin").await;

    assert!(!report.valid);
    assert_eq!(report.reason.unwrap().to_string(), "Reserved word");
    assert_eq!(report.suggestions.len(), 3);
    assert!(report.suggestions.iter().all(|s| !s.is_empty()));
}

#[tokio::test]
async fn test_pattern_strategy_end_to_end() {
    let engine = test_engine();

    let request = GenerationRequest {
        strategy: Strategy::CustomPattern,
        pattern: Some("AAA-NNN".to_string()),
        ..GenerationRequest::default()
    };

    let code = engine.generator.generate(&request).await.unwrap();

    assert_eq!(code.len(), 7);
    assert_eq!(&code[3..4], "-");
}
