// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ASCII STL reader.
//!
//! Each `facet ... endfacet` block becomes a child [`Face`] holding its
//! normal and up to three vertices. On `endfacet` the child is folded into
//! the root face under [`StlConfig::root_policy`], so the root either keeps
//! the facets in file order or collects their deduplicated vertices.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use spacetime::{Face, Point};

use crate::config::StlConfig;
use crate::error::{StlError, StlResult};

/// Reads an ASCII STL solid into a root face.
///
/// # Example
///
/// ```
/// use spacetime_stl::{read_stl, StlConfig};
///
/// let text = "solid\n facet normal 0 0 1\n  outer loop\n   vertex 0 0 0\n   \
///             vertex 1 0 0\n   vertex 0 1 0\n  endloop\n endfacet\nendsolid\n";
/// let root = read_stl(text.as_bytes(), &StlConfig::default()).unwrap();
/// assert_eq!(root.face_count(), 1);
/// ```
pub fn read_stl<R: BufRead>(reader: R, config: &StlConfig) -> StlResult<Face> {
    read_stl_named(reader, config).map(|(face, _)| face)
}

/// Reads an ASCII STL solid, also returning the name on its `solid` line.
pub fn read_stl_named<R: BufRead>(
    reader: R,
    config: &StlConfig,
) -> StlResult<(Face, Option<String>)> {
    let mut parser = Parser::new(config);

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => StlError::format(line_no, "invalid UTF-8"),
            _ => StlError::Io(e),
        })?;
        if parser.feed(line_no, &line)? == Step::Done {
            tracing::debug!(
                facets = parser.facets,
                name = parser.name.as_deref().unwrap_or(""),
                "Read STL solid"
            );
            return Ok((parser.root, parser.name));
        }
    }

    tracing::warn!(facets = parser.facets, "STL input ended without endsolid");
    if parser.current.is_some() {
        tracing::warn!("Dropping unterminated facet at end of input");
    }
    Ok((parser.root, parser.name))
}

/// Opens `path` and reads it with [`read_stl`].
pub fn load_stl<P: AsRef<Path>>(path: P, config: &StlConfig) -> StlResult<Face> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Loading STL");
    let file = File::open(path)?;
    read_stl(BufReader::new(file), config)
}

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Continue,
    Done,
}

struct Parser<'a> {
    config: &'a StlConfig,
    root: Face,
    current: Option<Face>,
    name: Option<String>,
    facets: usize,
}

impl<'a> Parser<'a> {
    fn new(config: &'a StlConfig) -> Self {
        Self {
            config,
            root: Face::with_policy(config.root_policy).with_resolution(config.resolution),
            current: None,
            name: None,
            facets: 0,
        }
    }

    fn feed(&mut self, line_no: usize, line: &str) -> StlResult<Step> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut tokens = line.split_ascii_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(Step::Continue);
        };

        match keyword {
            "solid" => {
                let name = tokens.collect::<Vec<_>>().join(" ");
                self.name = (!name.is_empty()).then_some(name);
            }
            "facet" => {
                if self.current.is_some() {
                    return Err(StlError::format(line_no, "facet inside facet"));
                }
                match tokens.next() {
                    Some("normal") => {}
                    _ => {
                        return Err(StlError::format(line_no, "expected 'normal' after 'facet'"))
                    }
                }
                let normal = parse_point(line_no, &mut tokens)?;
                let mut face = Face::new().with_resolution(self.config.resolution);
                face.set_normal(normal);
                self.current = Some(face);
            }
            "outer" => {}
            "vertex" => {
                let point = parse_point(line_no, &mut tokens)?;
                let face = self.current_face(line_no, "vertex")?;
                face.set_vertex(point)
                    .map_err(|source| StlError::Face { line: line_no, source })?;
            }
            "endloop" => {
                self.current_face(line_no, "endloop")?;
            }
            "endfacet" => {
                let face = self
                    .current
                    .take()
                    .ok_or_else(|| StlError::format(line_no, "endfacet outside facet"))?;
                self.root
                    .attach(face)
                    .map_err(|source| StlError::Face { line: line_no, source })?;
                self.facets += 1;
                tracing::trace!(line = line_no, facet = self.facets, "Attached facet");
            }
            "endsolid" => {
                if self.current.is_some() {
                    return Err(StlError::format(line_no, "endsolid inside facet"));
                }
                return Ok(Step::Done);
            }
            other => {
                return Err(StlError::format(
                    line_no,
                    format!("unknown keyword '{other}'"),
                ))
            }
        }

        Ok(Step::Continue)
    }

    fn current_face(&mut self, line_no: usize, keyword: &str) -> StlResult<&mut Face> {
        self.current
            .as_mut()
            .ok_or_else(|| StlError::format(line_no, format!("{keyword} outside facet")))
    }
}

/// Parses the remaining tokens as exactly x, y and z.
fn parse_point<'t, I>(line_no: usize, tokens: &mut I) -> StlResult<Point>
where
    I: Iterator<Item = &'t str>,
{
    let mut coords = [0.0f64; 3];
    for coord in &mut coords {
        let token = tokens
            .next()
            .ok_or_else(|| StlError::format(line_no, "expected 3 ordinates"))?;
        *coord = fast_float::parse(token)
            .map_err(|_| StlError::format(line_no, format!("invalid number '{token}'")))?;
    }
    if let Some(extra) = tokens.next() {
        return Err(StlError::format(
            line_no,
            format!("unexpected token '{extra}' after 3 ordinates"),
        ));
    }
    Ok(Point::from(coords))
}
