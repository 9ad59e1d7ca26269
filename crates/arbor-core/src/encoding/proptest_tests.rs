//! Property-based tests for encoding round-trips.

#![allow(clippy::expect_used, clippy::float_cmp)]

use proptest::prelude::*;

use crate::encoding::{Decoder, Encoder};
use crate::types::{Edge, EdgeId, Value, Vertex, VertexId};

/// Strategy for generating arbitrary `Value` instances.
fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        // Filter out NaN since NaN != NaN
        any::<f64>().prop_filter("not NaN", |f| !f.is_nan()).prop_map(Value::Float),
        ".*".prop_map(Value::String),
    ]
}

/// Strategy for generating arbitrary `Vertex` instances.
fn arb_vertex() -> impl Strategy<Value = Vertex> {
    (
        any::<u64>(),
        any::<u64>(),
        prop::collection::hash_map("[a-zA-Z_][a-zA-Z0-9_]*", arb_value(), 0..10),
    )
        .prop_map(|(id, vid, properties)| {
            let mut vertex = Vertex::new(VertexId::new(id), vid);
            vertex.properties = properties;
            vertex
        })
}

/// Strategy for generating arbitrary `Edge` instances.
fn arb_edge() -> impl Strategy<Value = Edge> {
    (
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        prop::option::of(any::<f64>().prop_filter("not NaN", |f| !f.is_nan())),
    )
        .prop_map(|(id, source, target, weight)| {
            let mut edge = Edge::new(EdgeId::new(id), VertexId::new(source), VertexId::new(target));
            edge.weight = weight;
            edge
        })
}

proptest! {
    #[test]
    fn value_roundtrip(value in arb_value()) {
        let encoded = value.encode().expect("encoding should succeed");
        let decoded = Value::decode(&encoded).expect("decoding should succeed");
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn vertex_roundtrip(vertex in arb_vertex()) {
        let encoded = vertex.encode().expect("encoding should succeed");
        let decoded = Vertex::decode(&encoded).expect("decoding should succeed");
        prop_assert_eq!(decoded, vertex);
    }

    #[test]
    fn edge_roundtrip(edge in arb_edge()) {
        let encoded = edge.encode().expect("encoding should succeed");
        let decoded = Edge::decode(&encoded).expect("decoding should succeed");
        prop_assert_eq!(decoded, edge);
    }

    #[test]
    fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        // Arbitrary input must produce Ok or Err, never a panic.
        let _ = Value::decode(&bytes);
        let _ = Vertex::decode(&bytes);
        let _ = Edge::decode(&bytes);
    }
}
