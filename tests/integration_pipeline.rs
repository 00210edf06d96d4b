//! Integration tests for the signing pipeline.
//!
//! These tests exercise the public API end-to-end with the real digest
//! implementations:
//! - determinism and idempotence across runs
//! - input-order independence
//! - slow-digest exclusivity under concurrent load
//! - event stream observed by a subscriber

use sequence_signer::core::{Signer, SlowDigest};
use sequence_signer::events::{Event, EventChannel, PipelineEvent, StageEvent, StageName};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn signature_is_idempotent_across_runs() {
    let inputs: Vec<u64> = (0..20).collect();
    let signer = Signer::builder().build();

    let first = signer.sign(&inputs).unwrap();
    let second = signer.sign(&inputs).unwrap();

    assert_eq!(first.value, second.value);
}

#[test]
fn input_order_does_not_change_the_signature() {
    let signer = Signer::builder().build();

    let forward = signer.sign(&[0, 1]).unwrap();
    let swapped = signer.sign(&[1, 0]).unwrap();
    assert_eq!(forward.value, swapped.value);

    let sorted: Vec<u64> = (0..10).collect();
    let shuffled: Vec<u64> = vec![7, 2, 9, 0, 5, 1, 8, 3, 6, 4];
    assert_eq!(
        signer.sign(&sorted).unwrap().value,
        signer.sign(&shuffled).unwrap().value
    );
}

#[test]
fn signature_has_one_sorted_block_per_item() {
    let signer = Signer::builder().build();
    let signature = signer.sign(&[4, 8, 15, 16, 23, 42]).unwrap();

    let blocks: Vec<&str> = signature.value.split('_').collect();
    assert_eq!(blocks.len(), 6);

    let mut sorted = blocks.clone();
    sorted.sort();
    assert_eq!(blocks, sorted, "blocks must be in byte-wise sorted order");

    // 6 salted digests of 16 hex chars each per block
    for block in blocks {
        assert_eq!(block.len(), 96);
        assert!(block.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

#[test]
fn duplicate_inputs_produce_duplicate_blocks() {
    let signer = Signer::builder().build();
    let signature = signer.sign(&[7, 7]).unwrap();

    let blocks: Vec<&str> = signature.value.split('_').collect();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0], blocks[1]);
}

#[test]
fn empty_input_signs_to_the_empty_string() {
    let signer = Signer::builder().build();
    assert_eq!(signer.sign(&[]).unwrap().value, "");
}

/// Slow digest wrapper that tracks overlapping invocations.
#[derive(Clone)]
struct CountingSlow {
    in_flight: Arc<AtomicUsize>,
    max_seen: Arc<AtomicUsize>,
    calls: Arc<AtomicUsize>,
}

impl CountingSlow {
    fn new() -> Self {
        Self {
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_seen: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl SlowDigest for CountingSlow {
    fn digest(&self, input: &str) -> String {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_seen.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(2));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        format!("slow({input})")
    }
}

#[test]
fn slow_digest_is_serialized_across_the_whole_run() {
    let counting = CountingSlow::new();
    let signer = Signer::builder().slow(counting.clone()).build();

    let inputs: Vec<u64> = (0..24).collect();
    signer.sign(&inputs).unwrap();

    assert_eq!(counting.calls.load(Ordering::SeqCst), 24);
    assert_eq!(
        counting.max_seen.load(Ordering::SeqCst),
        1,
        "slow digest must never overlap with itself"
    );
}

#[test]
fn events_trace_the_full_run() {
    let (sender, receiver) = EventChannel::new();
    let signer = Signer::builder().build();

    let signature = signer.sign_with_events(&[1, 2, 3], &sender).unwrap();
    drop(sender);

    let events: Vec<Event> = receiver.iter().collect();

    let mut started_stages = HashSet::new();
    let mut pipeline_started = false;
    let mut completed_summary = None;
    for event in &events {
        match event {
            Event::Pipeline(PipelineEvent::Started { total_items }) => {
                pipeline_started = true;
                assert_eq!(*total_items, 3);
            }
            Event::Stage(StageEvent::Started { stage }) => {
                started_stages.insert(*stage);
            }
            Event::Pipeline(PipelineEvent::Completed { summary }) => {
                completed_summary = Some(summary.clone());
            }
            _ => {}
        }
    }

    assert!(pipeline_started);
    assert_eq!(
        started_stages,
        HashSet::from([StageName::SingleHash, StageName::MultiHash, StageName::Combine])
    );

    let summary = completed_summary.expect("run must emit a completion summary");
    assert_eq!(summary.total_items, 3);
    assert_eq!(summary.signature_len, signature.value.len());
}

#[test]
fn malformed_initial_value_aborts_with_no_output() {
    use sequence_signer::core::{
        CombineStage, MultiHashStage, PipelineExecutor, PipelineValue, SerializationGate,
        Sha256Digest, SingleHashStage, Stage, Xxh3Digest,
    };
    use sequence_signer::error::StageError;
    use sequence_signer::SignerError;

    let fast = Arc::new(Xxh3Digest);
    let stages: Vec<Box<dyn Stage>> = vec![
        Box::new(SingleHashStage::new(
            Arc::clone(&fast) as Arc<dyn sequence_signer::core::FastDigest>,
            Arc::new(Sha256Digest),
            Arc::new(SerializationGate::new()),
        )),
        Box::new(MultiHashStage::new(fast)),
        Box::new(CombineStage::new()),
    ];
    let initial = vec![
        PipelineValue::Int(1),
        PipelineValue::Text("not an integer".into()),
    ];

    let result = PipelineExecutor::run(stages, initial);
    match result {
        Err(SignerError::Stage(StageError::TypeMismatch { stage, .. })) => {
            assert_eq!(stage, "single-hash");
        }
        other => panic!("expected a type-mismatch fault, got {:?}", other.err()),
    }
}

#[test]
fn default_signer_matches_explicit_builder_defaults() {
    use sequence_signer::core::{Sha256Digest, Xxh3Digest};

    let default = Signer::default().sign(&[1, 2, 3]).unwrap();
    let explicit = Signer::builder()
        .fast(Xxh3Digest)
        .slow(Sha256Digest)
        .build()
        .sign(&[1, 2, 3])
        .unwrap();

    assert_eq!(default.value, explicit.value);
}
