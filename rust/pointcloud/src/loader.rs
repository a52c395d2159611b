// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ASCII point-record loader
//!
//! Reads the ASCII layout produced by most scanners and by `bin2ascii`-style
//! converters:
//!
//! ```text
//! ply
//! format ascii 1.0
//! element vertex 3
//! property float x
//! property float y
//! property float z
//! end_header
//! 0.0 0.0 0.0
//! 1.5 2.0 0.1 255 255 255
//! ...
//! ```
//!
//! Only `element <name> <count>` header lines are interpreted; every other
//! header line is skipped. Each point record must start with at least three
//! whitespace-separated numbers (x, y, z); trailing columns are ignored.

use std::path::Path;

use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::{digit1, space0, space1},
    combinator::{all_consuming, map_res},
    sequence::{preceded, separated_pair, terminated},
    IResult,
};

use crate::error::{Error, Result};
use crate::point::{Point3, PointSet};

/// Line that terminates the header
pub const END_HEADER: &str = "end_header";

/// Element counts declared by the header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// Number of point records following the header
    pub vertices: usize,
    pub faces: usize,
    pub edges: usize,
    /// Every declared element in header order, including unknown ones
    pub elements: Vec<(String, usize)>,
}

/// Line iterator over a text buffer yielding `(line_number, line)`
///
/// Splits on `\n` using memchr and strips a trailing `\r`.
struct Lines<'a> {
    text: &'a str,
    pos: usize,
    number: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            number: 0,
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }

        let rest = &self.text[self.pos..];
        let end = memchr::memchr(b'\n', rest.as_bytes()).unwrap_or(rest.len());
        let line = &rest[..end];
        let line = line.strip_suffix('\r').unwrap_or(line);

        self.pos += end + 1;
        self.number += 1;
        Some((self.number, line))
    }
}

/// Parse `element <name> <count>`
fn element_decl(input: &str) -> IResult<&str, (&str, usize)> {
    all_consuming(terminated(
        preceded(
            terminated(tag("element"), space1),
            separated_pair(
                take_while1(|c: char| !c.is_whitespace()),
                space1,
                map_res(digit1, |s: &str| s.parse::<usize>()),
            ),
        ),
        space0,
    ))(input)
}

fn is_element_line(line: &str) -> bool {
    line.split_ascii_whitespace().next() == Some("element")
}

/// Consume header lines up to and including the sentinel
fn read_header(lines: &mut Lines<'_>) -> Result<Header> {
    let mut header = Header::default();
    let mut saw_vertex = false;

    for (number, line) in lines.by_ref() {
        let trimmed = line.trim();
        if trimmed == END_HEADER {
            if !saw_vertex {
                return Err(Error::MissingVertexCount);
            }
            return Ok(header);
        }

        if !is_element_line(trimmed) {
            continue;
        }

        let (_, (name, count)) = element_decl(trimmed).map_err(|_| Error::MalformedHeader {
            line: number,
            text: line.to_string(),
        })?;

        match name {
            "vertex" => {
                header.vertices = count;
                saw_vertex = true;
            }
            "face" => header.faces = count,
            "edge" => header.edges = count,
            _ => {}
        }
        header.elements.push((name.to_string(), count));
    }

    Err(Error::MissingSentinel)
}

/// Parse the leading x, y, z columns of a record
fn parse_record(line: &str, number: usize) -> Result<Point3> {
    let mut coords = [0.0f64; 3];
    let mut found = 0;

    for token in line.split_ascii_whitespace().take(3) {
        let value = fast_float::parse::<f64, _>(token)
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::InvalidNumber {
                line: number,
                token: token.to_string(),
            })?;
        coords[found] = value;
        found += 1;
    }

    if found < 3 {
        return Err(Error::ShortRecord {
            line: number,
            found,
        });
    }

    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

/// Parse only the header of a point-record text
pub fn parse_header(text: &str) -> Result<Header> {
    read_header(&mut Lines::new(text))
}

/// Load points and return the parsed header alongside them
pub fn load_points_with_header(text: &str) -> Result<(Header, PointSet)> {
    let mut lines = Lines::new(text);
    let header = read_header(&mut lines)?;

    let mut points = Vec::with_capacity(header.vertices);
    for _ in 0..header.vertices {
        let Some((number, line)) = lines.next() else {
            return Err(Error::TruncatedBody {
                expected: header.vertices,
                found: points.len(),
            });
        };
        points.push(parse_record(line, number)?);
    }

    Ok((header, PointSet::new(points)))
}

/// Load the point records from a text buffer
pub fn load_points(text: &str) -> Result<PointSet> {
    load_points_with_header(text).map(|(_, points)| points)
}

/// Read a file and load its point records
pub fn load_points_from_path(path: impl AsRef<Path>) -> Result<PointSet> {
    let text = std::fs::read_to_string(path)?;
    load_points(&text)
}
