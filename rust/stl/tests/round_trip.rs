// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read/write round trips through the STL codec.

use approx::assert_relative_eq;
use spacetime::{AttachPolicy, Face, Point};
use spacetime_stl::{load_stl, read_stl, save_stl, write_stl, StlConfig, StlError};

const TRIANGLE: &str = "solid\n facet normal 0 0 1\n  outer loop\n   vertex 0 0 0\n   vertex 1 0 0\n   vertex 0 1 0\n  endloop\n endfacet\nendsolid\n";

/// Build a strip of `n` disjoint triangles.
fn strip(n: usize) -> Face {
    let mut root = Face::new();
    for i in 0..n {
        let x = i as f64 * 1.25;
        let mut face = Face::new();
        face.set_normal(Point::new(0.0, 0.0, if i % 2 == 0 { 1.0 } else { -1.0 }));
        face.set_vertex(Point::new(x, 0.5, -0.125)).unwrap();
        face.set_vertex(Point::new(x + 1.0, 0.5, 0.0)).unwrap();
        face.set_vertex(Point::new(x + 0.5, 1.75, 3.0)).unwrap();
        root.attach(face).unwrap();
    }
    root
}

fn to_text(root: &Face, config: &StlConfig) -> String {
    let mut out = Vec::new();
    write_stl(&mut out, root, config).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn example_triangle_reads_back_and_rewrites() {
    let config = StlConfig::default();
    let root = read_stl(TRIANGLE.as_bytes(), &config).unwrap();

    assert_eq!(root.face_count(), 1);
    let face = root.faces().next().unwrap();
    assert_eq!(face.normal().map(Point::coords), Some([0.0, 0.0, 1.0]));
    assert_eq!(
        face.vertices().map(|v| v.map(Point::coords)),
        [
            Some([0.0, 0.0, 0.0]),
            Some([1.0, 0.0, 0.0]),
            Some([0.0, 1.0, 0.0])
        ]
    );

    let text = to_text(&root, &config);
    assert!(text.starts_with("solid\n  facet normal 0.000000 0.000000 1.000000\n"));
    assert!(text.ends_with("  endfacet\nendsolid\n"));
}

#[test]
fn many_faces_keep_order_and_coordinates() {
    let original = strip(25);
    let config = StlConfig::default();

    let restored = read_stl(to_text(&original, &config).as_bytes(), &config).unwrap();
    assert_eq!(restored.face_count(), 25);

    for (before, after) in original.faces().zip(restored.faces()) {
        let n0 = before.normal().unwrap().coords();
        let n1 = after.normal().unwrap().coords();
        assert_eq!(n0, n1);
        for (a, b) in before.vertices().iter().zip(after.vertices().iter()) {
            let (a, b) = (a.unwrap().coords(), b.unwrap().coords());
            for axis in 0..3 {
                assert_relative_eq!(a[axis], b[axis], epsilon = 1e-6);
            }
        }
    }
}

#[test]
fn text_is_stable_after_one_round_trip() {
    let config = StlConfig::default().with_solid_name("strip");
    let first = to_text(&strip(4), &config);
    let second = to_text(&read_stl(first.as_bytes(), &config).unwrap(), &config);
    assert_eq!(first, second);
}

#[test]
fn unset_vertex_written_and_read_back() {
    let mut face = Face::new();
    face.set_vertex_a(Point::new(1.0, 2.0, 3.0));
    face.set_vertex_c(Point::new(4.0, 5.0, 6.0));
    let mut root = Face::new();
    root.attach(face).unwrap();

    let config = StlConfig::default();
    let text = to_text(&root, &config);
    assert_eq!(text.matches("vertex").count(), 2);
    assert!(text.contains("facet normal 0.000000 0.000000 0.000000"));

    // Vertices fill roles in order on the way back in.
    let restored = read_stl(text.as_bytes(), &config).unwrap();
    let face = restored.faces().next().unwrap();
    assert_eq!(face.vertex_b().map(Point::coords), Some([4.0, 5.0, 6.0]));
    assert!(face.vertex_c().is_none());
}

#[test]
fn vertex_cloud_policy_collapses_shared_corners() {
    // Two triangles forming a quad share the corners (1,0,0) and (0,1,0).
    let mut quad = Face::new();
    for corners in [
        [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
    ] {
        let mut face = Face::new();
        face.set_normal(Point::new(0.0, 0.0, 1.0));
        for corner in corners {
            face.set_vertex(Point::from(corner)).unwrap();
        }
        quad.attach(face).unwrap();
    }

    let text = to_text(&quad, &StlConfig::default());
    let config = StlConfig::default()
        .with_root_policy(AttachPolicy::AllRoles)
        .with_resolution(1000.0);
    let cloud = read_stl(text.as_bytes(), &config).unwrap();

    assert_eq!(cloud.face_count(), 0);
    assert_eq!(cloud.points().count(), 4);
    assert!(cloud.members().get_at(1.0, 1.0, 0.0, None).is_ok());
}

#[test]
fn format_error_reports_line() {
    let text = TRIANGLE.replace("vertex 0 1 0", "vertex 0 1");
    match read_stl(text.as_bytes(), &StlConfig::default()) {
        Err(StlError::Format { line, message }) => {
            assert_eq!(line, 6);
            assert!(message.contains("3 ordinates"));
        }
        other => panic!("expected format error, got {other:?}"),
    }
}

#[test]
fn save_then_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strip.stl");
    let config = StlConfig::default().with_precision(4);

    save_stl(&path, &strip(5), &config).unwrap();
    let loaded = load_stl(&path, &config).unwrap();

    assert_eq!(loaded.face_count(), 5);
    let last = loaded.faces().last().unwrap();
    assert_relative_eq!(last.vertex_a().and_then(Point::x).unwrap(), 5.0);
}
