// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ASCII STL writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use spacetime::{Element, Face, Point};

use crate::config::StlConfig;
use crate::error::StlResult;

/// Writes every child face of `root` as one facet block, in slot order.
///
/// A face without a normal is written with `0 0 0`; unset vertices are left
/// out of the loop. Members that are not faces are skipped.
pub fn write_stl<W: Write>(mut writer: W, root: &Face, config: &StlConfig) -> StlResult<()> {
    let precision = config.precision;
    let name = config.solid_name.as_deref().unwrap_or("");

    writeln!(writer, "{}", header("solid", name))?;

    let mut facets = 0usize;
    let mut skipped = 0usize;
    for member in root.members() {
        let Element::Face(face) = member else {
            skipped += 1;
            continue;
        };

        let normal = face.normal().map(Point::coords).unwrap_or([0.0; 3]);
        writeln!(
            writer,
            "  facet normal {}",
            format_coords(normal, precision)
        )?;
        writeln!(writer, "    outer loop")?;
        for vertex in face.vertices().into_iter().flatten() {
            writeln!(
                writer,
                "      vertex {}",
                format_coords(vertex.coords(), precision)
            )?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
        facets += 1;
    }

    writeln!(writer, "{}", header("endsolid", name))?;
    writer.flush()?;

    if skipped > 0 {
        tracing::warn!(skipped, "Skipped non-face members while writing STL");
    }
    tracing::debug!(facets, "Wrote STL solid");
    Ok(())
}

/// Writes `root` to `path` with [`write_stl`], replacing any existing file.
pub fn save_stl<P: AsRef<Path>>(path: P, root: &Face, config: &StlConfig) -> StlResult<()> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Saving STL");
    let file = File::create(path)?;
    write_stl(BufWriter::new(file), root, config)
}

fn header(keyword: &str, name: &str) -> String {
    if name.is_empty() {
        keyword.to_string()
    } else {
        format!("{keyword} {name}")
    }
}

fn format_coords([x, y, z]: [f64; 3], precision: usize) -> String {
    format!("{x:.precision$} {y:.precision$} {z:.precision$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Face {
        let mut face = Face::new();
        face.set_normal(Point::new(0.0, 0.0, 1.0));
        face.set_vertex(Point::new(0.0, 0.0, 0.0)).unwrap();
        face.set_vertex(Point::new(1.0, 0.0, 0.0)).unwrap();
        face.set_vertex(Point::new(0.0, 1.0, 0.0)).unwrap();
        face
    }

    fn write(root: &Face, config: &StlConfig) -> String {
        let mut out = Vec::new();
        write_stl(&mut out, root, config).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn writes_fixed_point_block() {
        let mut root = Face::new();
        root.attach(triangle()).unwrap();

        let expected = "solid\n  facet normal 0.000000 0.000000 1.000000\n    outer loop\n      vertex 0.000000 0.000000 0.000000\n      vertex 1.000000 0.000000 0.000000\n      vertex 0.000000 1.000000 0.000000\n    endloop\n  endfacet\nendsolid\n";
        assert_eq!(write(&root, &StlConfig::default()), expected);
    }

    #[test]
    fn empty_root() {
        let config = StlConfig::default().with_solid_name("empty");
        assert_eq!(write(&Face::new(), &config), "solid empty\nendsolid empty\n");
    }

    #[test]
    fn precision_is_configurable() {
        let mut face = Face::new();
        face.set_vertex(Point::new(1.0 / 3.0, -2.5, 10.0)).unwrap();
        let mut root = Face::new();
        root.attach(face).unwrap();

        let out = write(&root, &StlConfig::default().with_precision(2));
        assert!(out.contains("      vertex 0.33 -2.50 10.00\n"));
    }

    #[test]
    fn missing_normal_writes_zero() {
        let mut root = Face::new();
        root.attach(Face::new()).unwrap();

        let out = write(&root, &StlConfig::default().with_precision(1));
        assert!(out.contains("  facet normal 0.0 0.0 0.0\n    outer loop\n    endloop\n"));
    }

    #[test]
    fn unset_vertices_are_skipped() {
        let mut face = Face::new();
        face.set_normal(Point::new(0.0, 0.0, 1.0));
        face.set_vertex_c(Point::new(7.0, 8.0, 9.0));
        let mut root = Face::new();
        root.attach(face).unwrap();

        let out = write(&root, &StlConfig::default().with_precision(0));
        assert_eq!(out.matches("vertex").count(), 1);
        assert!(out.contains("      vertex 7 8 9\n"));
    }

    #[test]
    fn lone_vertex_a_writes_one_line() {
        let mut face = Face::new();
        face.set_vertex_a(Point::new(1.0, 2.0, 3.0));
        let mut root = Face::new();
        root.attach(face).unwrap();

        let out = write(&root, &StlConfig::default());
        assert_eq!(out.matches("vertex").count(), 1);
        assert!(out.contains("      vertex 1.000000 2.000000 3.000000\n    endloop\n"));
    }

    #[test]
    fn point_members_are_skipped() {
        let mut root = Face::with_policy(spacetime::AttachPolicy::AllRoles);
        root.attach(triangle()).unwrap();
        assert_eq!(root.len(), 3);

        assert_eq!(write(&root, &StlConfig::default()), "solid\nendsolid\n");
    }
}
