use super::*;
use crate::error::{MeshError, TopologyError};
use crate::geom2::pos;

fn v(i: usize) -> VertexId {
    VertexId(i)
}

#[test]
fn edge_key_is_canonical() {
    let k = EdgeKey::new(v(7), v(3));
    assert_eq!(k.lo(), v(3));
    assert_eq!(k.hi(), v(7));
    assert_eq!(k, EdgeKey::new(v(3), v(7)));
    assert_eq!(k.other(v(3)), Some(v(7)));
    assert_eq!(k.other(v(4)), None);
}

#[test]
fn attach_and_release_track_use_count() {
    let mut edges = EdgeTable::new();
    let t = Owner::Triangle(TriangleId(0));
    let l = Owner::Loop(LoopId(0));
    let c1 = edges.attach(v(5), v(2), t);
    assert!(!c1.forward());
    assert_eq!(c1.vertex1(), v(5));
    assert_eq!(c1.vertex2(), v(2));
    let c2 = edges.attach(v(2), v(5), l);
    assert!(c2.forward());
    assert_eq!(edges.len(), 1);
    let key = c1.edge();
    assert_eq!(edges.use_count(key), 2);
    assert!(edges.get(key).unwrap().is_interior());
    assert_eq!(edges.get(key).unwrap().triangle_use_count(), 1);
    assert_eq!(edges.get(key).unwrap().loop_use_count(), 1);

    // Still referenced by the loop: explicit removal must refuse.
    assert_eq!(edges.release(c1).unwrap(), 1);
    assert!(matches!(
        edges.remove(key),
        Err(MeshError::Topology(TopologyError::EdgeStillInUse { uses: 1, .. }))
    ));
    assert_eq!(edges.release(c2).unwrap(), 0);
    // Zero-use edges linger until swept.
    assert_eq!(edges.len(), 1);
    assert_eq!(edges.remove_unused(), 1);
    assert!(edges.is_empty());
}

#[test]
fn release_of_unknown_edge_is_an_error() {
    let mut a = EdgeTable::new();
    let mut b = EdgeTable::new();
    let c = a.attach(v(0), v(1), Owner::Triangle(TriangleId(9)));
    assert!(matches!(
        b.release(c),
        Err(MeshError::Topology(TopologyError::MissingEdge { .. }))
    ));
}


#[test]
fn loop_keeps_material_order_and_closes() {
    let mut edges = EdgeTable::new();
    let verts: Vec<Vertex> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
        .iter()
        .map(|&(x, y)| Vertex::new(pos(x, y)))
        .collect();
    let ids = [v(0), v(1), v(2), v(3)];
    let lp = Loop::from_material_order(LoopId(0), &ids, &mut edges);
    assert_eq!(lp.vertex_indices(), ids.to_vec());
    let n = lp.len();
    for i in 0..n {
        assert_eq!(lp.coedges()[i].vertex2(), lp.coedges()[(i + 1) % n].vertex1());
    }
    assert!((lp.signed_area(&verts) - 1.0).abs() < 1e-12);
    assert!(lp.is_outer(&verts));
    assert_eq!(edges.len(), 4);
}

#[test]
fn split_coedge_inserts_midpoint_and_retires_edge() {
    let mut edges = EdgeTable::new();
    let mut verts: Vec<Vertex> = [(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]
        .iter()
        .map(|&(x, y)| Vertex::new(pos(x, y)))
        .collect();
    let mut lp = Loop::from_material_order(LoopId(3), &[v(0), v(1), v(2)], &mut edges);
    let idx = lp.position_of(EdgeKey::new(v(0), v(1))).unwrap();
    let m = lp.split_coedge(idx, &mut verts, &mut edges).unwrap();
    assert_eq!(m, v(3));
    assert_eq!(verts[3].position, pos(1.0, 0.0));
    assert_eq!(lp.len(), 4);
    assert!(edges.find(v(0), v(1)).is_none());
    assert_eq!(edges.find(v(0), v(3)).unwrap().use_count(), 1);
    assert_eq!(edges.find(v(3), v(1)).unwrap().use_count(), 1);
    assert_eq!(lp.vertex_indices(), vec![v(0), v(3), v(1), v(2)]);
    // Area is unchanged by inserting a collinear point.
    assert!((lp.signed_area(&verts) - 2.0).abs() < 1e-12);

    assert!(matches!(
        lp.split_coedge(99, &mut verts, &mut edges),
        Err(MeshError::Topology(TopologyError::CoedgeOutOfRange { index: 99, len: 4 }))
    ));
}

#[test]
fn split_refuses_edge_still_shared_with_a_triangle() {
    let mut edges = EdgeTable::new();
    let mut verts: Vec<Vertex> = [(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]
        .iter()
        .map(|&(x, y)| Vertex::new(pos(x, y)))
        .collect();
    let mut lp = Loop::from_material_order(LoopId(0), &[v(0), v(1), v(2)], &mut edges);
    let _tri_use = edges.attach(v(0), v(1), Owner::Triangle(TriangleId(0)));
    let idx = lp.position_of(EdgeKey::new(v(0), v(1))).unwrap();
    assert!(matches!(
        lp.split_coedge(idx, &mut verts, &mut edges),
        Err(MeshError::Topology(TopologyError::EdgeStillInUse { uses: 1, .. }))
    ));
}
