//! Integration tests for the batch writer.

use arbor_core::Vertex;
use arbor_graph::store::{BatchWriter, GraphError, IdGenerator, VertexStore};
use arbor_storage::backends::RedbEngine;
use arbor_storage::StorageEngine;

fn create_test_engine() -> RedbEngine {
    RedbEngine::in_memory().expect("Failed to create in-memory engine")
}

fn create_vertices(
    batch: &mut BatchWriter<'_, RedbEngine>,
    id_gen: &IdGenerator,
    vids: std::ops::Range<u64>,
) {
    for vid in vids {
        VertexStore::create(batch.tx_mut().unwrap(), id_gen, vid, |id| Vertex::new(id, vid))
            .unwrap();
        batch.record_mutation().unwrap();
    }
}

#[test]
fn zero_threshold_is_rejected() {
    let engine = create_test_engine();
    let result = BatchWriter::with_threshold(&engine, 0);
    assert!(matches!(result, Err(GraphError::InvalidParameter { param: "threshold", .. })));
}

#[test]
fn reaching_threshold_commits_exactly_once() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut batch = BatchWriter::with_threshold(&engine, 10).unwrap();
    create_vertices(&mut batch, &id_gen, 0..10);

    assert_eq!(batch.commit_count(), 1);
    assert_eq!(batch.pending_mutations(), 0);

    // The committed batch is durable while the writer is still open
    let tx = engine.begin_read().unwrap();
    assert_eq!(VertexStore::count(&tx).unwrap(), 10);
}

#[test]
fn below_threshold_stays_uncommitted() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut batch = BatchWriter::with_threshold(&engine, 10).unwrap();
    create_vertices(&mut batch, &id_gen, 0..9);

    assert_eq!(batch.commit_count(), 0);
    assert_eq!(batch.pending_mutations(), 9);

    let tx = engine.begin_read().unwrap();
    assert_eq!(VertexStore::count(&tx).unwrap(), 0);
}

#[test]
fn force_commit_resets_the_counter() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut batch = BatchWriter::with_threshold(&engine, 100).unwrap();
    create_vertices(&mut batch, &id_gen, 0..3);
    assert_eq!(batch.pending_mutations(), 3);

    batch.force_commit().unwrap();
    assert_eq!(batch.commit_count(), 1);
    assert_eq!(batch.pending_mutations(), 0);

    let tx = engine.begin_read().unwrap();
    assert_eq!(VertexStore::count(&tx).unwrap(), 3);
}

#[test]
fn finish_commits_the_tail() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut batch = BatchWriter::with_threshold(&engine, 10).unwrap();
    create_vertices(&mut batch, &id_gen, 0..25);
    assert_eq!(batch.commit_count(), 2);
    assert_eq!(batch.pending_mutations(), 5);
    batch.finish().unwrap();

    let tx = engine.begin_read().unwrap();
    assert_eq!(VertexStore::count(&tx).unwrap(), 25);
}

#[test]
fn drop_without_finish_discards_the_tail() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut batch = BatchWriter::with_threshold(&engine, 10).unwrap();
    create_vertices(&mut batch, &id_gen, 0..25);
    drop(batch);

    // Two full batches committed; the 5-mutation tail rolled back
    let tx = engine.begin_read().unwrap();
    assert_eq!(VertexStore::count(&tx).unwrap(), 20);
}

#[test]
fn writes_are_visible_within_the_open_batch() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut batch = BatchWriter::with_threshold(&engine, 100).unwrap();
    create_vertices(&mut batch, &id_gen, 0..5);

    // Reads through the writer's own transaction see uncommitted writes
    assert_eq!(VertexStore::count(batch.tx().unwrap()).unwrap(), 5);
    assert!(VertexStore::lookup_vid(batch.tx().unwrap(), 3).unwrap().is_some());
}

#[test]
fn default_writer_uses_default_threshold() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut batch = BatchWriter::new(&engine).unwrap();
    create_vertices(&mut batch, &id_gen, 0..100);

    // Well below 4095, so nothing commits until finish
    assert_eq!(batch.commit_count(), 0);
    assert_eq!(batch.pending_mutations(), 100);
    batch.finish().unwrap();

    let tx = engine.begin_read().unwrap();
    assert_eq!(VertexStore::count(&tx).unwrap(), 100);
}
