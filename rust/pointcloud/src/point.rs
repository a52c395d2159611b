// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point and bounding-box types

/// A single scanned sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Axis-aligned bounds of a point set
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Bounds {
    /// Bounds of a single point
    fn at(p: &Point3) -> Self {
        Self {
            min_x: p.x,
            max_x: p.x,
            min_y: p.y,
            max_y: p.y,
            min_z: p.z,
            max_z: p.z,
        }
    }

    fn include(&mut self, p: &Point3) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
        self.min_z = self.min_z.min(p.z);
        self.max_z = self.max_z.max(p.z);
    }

    /// Extent along x
    pub fn span_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along y
    pub fn span_y(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when the footprint collapses to a line or a point
    pub fn is_degenerate_xy(&self) -> bool {
        self.span_x() == 0.0 || self.span_y() == 0.0
    }
}

/// Ordered sequence of scanned points with bounds computed once on construction
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointSet {
    points: Vec<Point3>,
    bounds: Option<Bounds>,
}

impl PointSet {
    pub fn new(points: Vec<Point3>) -> Self {
        let mut iter = points.iter();
        let bounds = iter.next().map(|first| {
            let mut bounds = Bounds::at(first);
            for p in iter {
                bounds.include(p);
            }
            bounds
        });
        Self { points, bounds }
    }

    /// Build from `(x, y, z)` tuples
    pub fn from_xyz<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64, f64)>,
    {
        Self::new(
            coords
                .into_iter()
                .map(|(x, y, z)| Point3::new(x, y, z))
                .collect(),
        )
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box, `None` for an empty set
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point3;
    type IntoIter = std::slice::Iter<'a, Point3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
