//! Integration tests for vertex and edge storage.

use arbor_core::{Edge, EdgeId, Value, Vertex, VertexId};
use arbor_graph::index::{AdjacencyIndex, Direction};
use arbor_graph::store::{EdgeStore, GraphError, IdGenerator, VertexStore};
use arbor_storage::backends::RedbEngine;
use arbor_storage::{StorageEngine, Transaction};

fn create_test_engine() -> RedbEngine {
    RedbEngine::in_memory().expect("Failed to create in-memory engine")
}

#[test]
fn create_and_get_vertex() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut tx = engine.begin_write().unwrap();
    let vertex = VertexStore::create(&mut tx, &id_gen, 42, |id| {
        Vertex::new(id, 42).with_property("name", "Alice")
    })
    .unwrap();
    tx.commit().unwrap();

    let tx = engine.begin_read().unwrap();
    let retrieved = VertexStore::get(&tx, vertex.id).unwrap();
    assert!(retrieved.is_some());
    let retrieved = retrieved.unwrap();
    assert_eq!(retrieved.id, vertex.id);
    assert_eq!(retrieved.vid, 42);
    assert_eq!(retrieved.get_property("name"), Some(&Value::String("Alice".to_owned())));
}

#[test]
fn resolve_by_external_id() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut tx = engine.begin_write().unwrap();
    let vertex = VertexStore::create(&mut tx, &id_gen, 7, |id| Vertex::new(id, 7)).unwrap();
    tx.commit().unwrap();

    let tx = engine.begin_read().unwrap();
    assert_eq!(VertexStore::lookup_vid(&tx, 7).unwrap(), Some(vertex.id));
    let resolved = VertexStore::resolve_vid(&tx, 7).unwrap();
    assert_eq!(resolved.id, vertex.id);
}

#[test]
fn resolve_unknown_external_id_fails() {
    let engine = create_test_engine();

    let tx = engine.begin_read().unwrap();
    assert_eq!(VertexStore::lookup_vid(&tx, 999).unwrap(), None);
    let result = VertexStore::resolve_vid(&tx, 999);
    assert!(matches!(result, Err(GraphError::VertexNotFound(999))));
}

#[test]
fn duplicate_external_id_fails() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut tx = engine.begin_write().unwrap();
    VertexStore::create(&mut tx, &id_gen, 5, |id| Vertex::new(id, 5)).unwrap();
    let result = VertexStore::create(&mut tx, &id_gen, 5, |id| Vertex::new(id, 5));
    assert!(matches!(result, Err(GraphError::VertexAlreadyExists(5))));
}

#[test]
fn get_nonexistent_returns_none() {
    let engine = create_test_engine();

    let tx = engine.begin_read().unwrap();
    let result = VertexStore::get(&tx, VertexId::new(999)).unwrap();
    assert!(result.is_none());
}

#[test]
fn update_replaces_properties() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut tx = engine.begin_write().unwrap();
    let mut vertex = VertexStore::create(&mut tx, &id_gen, 1, |id| Vertex::new(id, 1)).unwrap();
    tx.commit().unwrap();

    vertex.set_property("score", 0.5);
    let mut tx = engine.begin_write().unwrap();
    VertexStore::update(&mut tx, &vertex).unwrap();
    tx.commit().unwrap();

    let tx = engine.begin_read().unwrap();
    let retrieved = VertexStore::get(&tx, vertex.id).unwrap().unwrap();
    assert_eq!(retrieved.get_property("score"), Some(&Value::Float(0.5)));
}

#[test]
fn update_cannot_change_external_id() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut tx = engine.begin_write().unwrap();
    let mut vertex = VertexStore::create(&mut tx, &id_gen, 1, |id| Vertex::new(id, 1)).unwrap();
    vertex.vid = 2;
    let result = VertexStore::update(&mut tx, &vertex);
    assert!(matches!(result, Err(GraphError::Internal(_))));
}

#[test]
fn set_property_reads_back() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut tx = engine.begin_write().unwrap();
    let vertex = VertexStore::create(&mut tx, &id_gen, 1, |id| Vertex::new(id, 1)).unwrap();
    VertexStore::set_property(&mut tx, vertex.id, "distance", Value::Int(3)).unwrap();
    tx.commit().unwrap();

    let tx = engine.begin_read().unwrap();
    let retrieved = VertexStore::get(&tx, vertex.id).unwrap().unwrap();
    assert_eq!(retrieved.get_property("distance"), Some(&Value::Int(3)));
}

#[test]
fn set_property_on_missing_vertex_fails() {
    let engine = create_test_engine();

    let mut tx = engine.begin_write().unwrap();
    let result = VertexStore::set_property(&mut tx, VertexId::new(99), "x", Value::Int(1));
    assert!(matches!(result, Err(GraphError::InvalidVertexReference(_))));
}

#[test]
fn count_and_all() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let tx = engine.begin_read().unwrap();
    assert_eq!(VertexStore::count(&tx).unwrap(), 0);
    assert!(VertexStore::all(&tx).unwrap().is_empty());
    drop(tx);

    let mut tx = engine.begin_write().unwrap();
    for vid in [3u64, 1, 2] {
        VertexStore::create(&mut tx, &id_gen, vid, |id| Vertex::new(id, vid)).unwrap();
    }
    tx.commit().unwrap();

    let tx = engine.begin_read().unwrap();
    assert_eq!(VertexStore::count(&tx).unwrap(), 3);
    assert_eq!(VertexStore::all(&tx).unwrap().len(), 3);
}

#[test]
fn vid_scan_is_ascending() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut tx = engine.begin_write().unwrap();
    for vid in [30u64, 10, 20, 5] {
        VertexStore::create(&mut tx, &id_gen, vid, |id| Vertex::new(id, vid)).unwrap();
    }
    tx.commit().unwrap();

    let tx = engine.begin_read().unwrap();
    let mut seen = Vec::new();
    VertexStore::for_each_by_vid(&tx, |vid, _| {
        seen.push(vid);
        true
    })
    .unwrap();
    assert_eq!(seen, vec![5, 10, 20, 30]);
}

#[test]
fn max_vid_tracks_highest() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let tx = engine.begin_read().unwrap();
    assert_eq!(VertexStore::max_vid(&tx).unwrap(), None);
    drop(tx);

    let mut tx = engine.begin_write().unwrap();
    for vid in [100u64, 7, 55] {
        VertexStore::create(&mut tx, &id_gen, vid, |id| Vertex::new(id, vid)).unwrap();
    }
    tx.commit().unwrap();

    let tx = engine.begin_read().unwrap();
    assert_eq!(VertexStore::max_vid(&tx).unwrap(), Some(100));
}

#[test]
fn create_and_get_edge() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut tx = engine.begin_write().unwrap();
    let a = VertexStore::create(&mut tx, &id_gen, 1, |id| Vertex::new(id, 1)).unwrap();
    let b = VertexStore::create(&mut tx, &id_gen, 2, |id| Vertex::new(id, 2)).unwrap();
    let edge = EdgeStore::create(&mut tx, &id_gen, a.id, b.id, |id| {
        Edge::new(id, a.id, b.id).with_weight(2.5)
    })
    .unwrap();
    tx.commit().unwrap();

    let tx = engine.begin_read().unwrap();
    let retrieved = EdgeStore::get(&tx, edge.id).unwrap().unwrap();
    assert_eq!(retrieved.source, a.id);
    assert_eq!(retrieved.target, b.id);
    assert_eq!(retrieved.weight, Some(2.5));
    assert!(EdgeStore::exists(&tx, edge.id).unwrap());
    assert_eq!(EdgeStore::count(&tx).unwrap(), 1);
}

#[test]
fn edge_to_missing_vertex_fails() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut tx = engine.begin_write().unwrap();
    let a = VertexStore::create(&mut tx, &id_gen, 1, |id| Vertex::new(id, 1)).unwrap();
    let missing = VertexId::new(999);
    let result = EdgeStore::create(&mut tx, &id_gen, a.id, missing, |id| {
        Edge::new(id, a.id, missing)
    });
    assert!(matches!(result, Err(GraphError::InvalidVertexReference(_))));
}

#[test]
fn edge_get_or_error() {
    let engine = create_test_engine();

    let tx = engine.begin_read().unwrap();
    let result = EdgeStore::get_or_error(&tx, EdgeId::new(999));
    assert!(matches!(result, Err(GraphError::EdgeNotFound(_))));
}

#[test]
fn adjacency_resolves_neighbors() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut tx = engine.begin_write().unwrap();
    let a = VertexStore::create(&mut tx, &id_gen, 1, |id| Vertex::new(id, 1)).unwrap();
    let b = VertexStore::create(&mut tx, &id_gen, 2, |id| Vertex::new(id, 2)).unwrap();
    let c = VertexStore::create(&mut tx, &id_gen, 3, |id| Vertex::new(id, 3)).unwrap();
    EdgeStore::create(&mut tx, &id_gen, a.id, b.id, |id| Edge::new(id, a.id, b.id)).unwrap();
    EdgeStore::create(&mut tx, &id_gen, a.id, c.id, |id| Edge::new(id, a.id, c.id)).unwrap();
    EdgeStore::create(&mut tx, &id_gen, c.id, a.id, |id| Edge::new(id, c.id, a.id)).unwrap();
    tx.commit().unwrap();

    let tx = engine.begin_read().unwrap();
    let out = AdjacencyIndex::out_neighbors(&tx, a.id).unwrap();
    assert_eq!(out, vec![b.id, c.id]);

    let incoming = AdjacencyIndex::in_neighbors(&tx, a.id).unwrap();
    assert_eq!(incoming, vec![c.id]);

    let both = AdjacencyIndex::neighbors(&tx, a.id, Direction::Both).unwrap();
    assert_eq!(both.len(), 3);
    assert_eq!(AdjacencyIndex::neighbors(&tx, a.id, Direction::Outgoing).unwrap(), out);
    assert_eq!(
        AdjacencyIndex::neighbors(&tx, a.id, Direction::Incoming).unwrap(),
        vec![c.id]
    );
}

#[test]
fn adjacency_degree_queries() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut tx = engine.begin_write().unwrap();
    let a = VertexStore::create(&mut tx, &id_gen, 1, |id| Vertex::new(id, 1)).unwrap();
    let b = VertexStore::create(&mut tx, &id_gen, 2, |id| Vertex::new(id, 2)).unwrap();
    EdgeStore::create(&mut tx, &id_gen, a.id, b.id, |id| Edge::new(id, a.id, b.id)).unwrap();
    tx.commit().unwrap();

    let tx = engine.begin_read().unwrap();
    assert_eq!(AdjacencyIndex::count_outgoing(&tx, a.id).unwrap(), 1);
    assert_eq!(AdjacencyIndex::count_outgoing(&tx, b.id).unwrap(), 0);
    assert!(AdjacencyIndex::has_outgoing(&tx, a.id).unwrap());
    assert!(!AdjacencyIndex::has_outgoing(&tx, b.id).unwrap());
}

#[test]
fn adjacency_scan_handles_max_vertex_id() {
    // The out-index prefix for u64::MAX ends in eight 0xFF bytes, which
    // stresses the exclusive-bound arithmetic behind the prefix scan.
    let engine = create_test_engine();
    let high_gen = IdGenerator::with_start(u64::MAX, 1);
    let id_gen = IdGenerator::new();

    let mut tx = engine.begin_write().unwrap();
    let a = VertexStore::create(&mut tx, &high_gen, 1, |id| Vertex::new(id, 1)).unwrap();
    let b = VertexStore::create(&mut tx, &id_gen, 2, |id| Vertex::new(id, 2)).unwrap();
    EdgeStore::create(&mut tx, &id_gen, a.id, b.id, |id| Edge::new(id, a.id, b.id)).unwrap();
    tx.commit().unwrap();

    let tx = engine.begin_read().unwrap();
    assert_eq!(a.id.as_u64(), u64::MAX);
    assert_eq!(AdjacencyIndex::out_neighbors(&tx, a.id).unwrap(), vec![b.id]);
    assert_eq!(AdjacencyIndex::in_neighbors(&tx, b.id).unwrap(), vec![a.id]);
}

#[test]
fn id_generator_resumes_from_max() {
    let engine = create_test_engine();
    let id_gen = IdGenerator::new();

    let mut tx = engine.begin_write().unwrap();
    for vid in 1..=5u64 {
        VertexStore::create(&mut tx, &id_gen, vid, |id| Vertex::new(id, vid)).unwrap();
    }
    tx.commit().unwrap();

    // Simulate a restart: derive fresh counters from the stored data
    let tx = engine.begin_read().unwrap();
    let resumed = IdGenerator::with_start(id_gen.current_vertex_counter(), 1);
    drop(tx);

    let mut tx = engine.begin_write().unwrap();
    let vertex = VertexStore::create(&mut tx, &resumed, 6, |id| Vertex::new(id, 6)).unwrap();
    assert_eq!(vertex.id.as_u64(), 6);
}
