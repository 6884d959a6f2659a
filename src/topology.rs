//! Decoding of TopoJSON documents into drawable shapes.
//!
//! Only what a pre-projected map needs is supported: arcs (quantized
//! and delta-encoded or not), polygons and lines, collections of
//! them, and meshes of shared borders.  Coordinates are returned in
//! the units of the document, no projection is applied.

use std::collections::HashMap;
use serde::Deserialize;
use crate::data::Id;
use crate::error::{Error, Result};

/// A position in the plane.
pub type Point = [f64; 2];
/// A closed ring (the last point joins the first one) or an open line.
pub type Line = Vec<Point>;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(try_from = "Vec<f64>")]
struct Position(Point);

impl TryFrom<Vec<f64>> for Position {
    type Error = &'static str;

    fn try_from(v: Vec<f64>) -> Result<Self, Self::Error> {
        match v[..] {
            [x, y, ..] => Ok(Position([x, y])),
            _ => Err("a position needs at least two coordinates"),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
enum Kind {
    GeometryCollection,
    Polygon,
    MultiPolygon,
    LineString,
    MultiLineString,
    #[serde(other)]
    Other, // Point, MultiPoint
}

// Arc references nest 1 to 3 levels deep depending on the geometry
// type.  Empty lists parse at the shallowest level.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
enum ArcRefs {
    #[default]
    Missing,
    Depth1(Vec<i64>),
    Depth2(Vec<Vec<i64>>),
    Depth3(Vec<Vec<Vec<i64>>>),
}

impl ArcRefs {
    fn depth1(&self, kind: &'static str) -> Result<&[i64]> {
        match self {
            ArcRefs::Missing => Ok(&[]),
            ArcRefs::Depth1(v) => Ok(v),
            _ => Err(Error::InvalidGeometry(kind)),
        }
    }

    fn depth2(&self, kind: &'static str) -> Result<Vec<&[i64]>> {
        match self {
            ArcRefs::Missing => Ok(vec![]),
            ArcRefs::Depth1(v) if v.is_empty() => Ok(vec![]),
            ArcRefs::Depth2(v) => Ok(v.iter().map(|l| &l[..]).collect()),
            _ => Err(Error::InvalidGeometry(kind)),
        }
    }

    fn depth3(&self, kind: &'static str) -> Result<Vec<Vec<&[i64]>>> {
        match self {
            ArcRefs::Missing => Ok(vec![]),
            ArcRefs::Depth1(v) if v.is_empty() => Ok(vec![]),
            ArcRefs::Depth2(v) if v.iter().all(|p| p.is_empty()) =>
                Ok(v.iter().map(|_| vec![]).collect()),
            ArcRefs::Depth3(v) =>
                Ok(v.iter().map(|p| p.iter().map(|r| &r[..]).collect())
                   .collect()),
            _ => Err(Error::InvalidGeometry(kind)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: Option<Kind>, // `null` geometries have no type
    #[serde(default)]
    id: Option<Id>,
    #[serde(default)]
    arcs: ArcRefs,
    #[serde(default)]
    geometries: Vec<Geometry>,
}

/// The shape of a decoded geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Polygons, each one an outer ring followed by its holes.
    Polygons(Vec<Vec<Line>>),
    Lines(Vec<Line>),
    Collection(Vec<Shape>),
    Empty,
}

/// A geometry of a topology object together with its id.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<Id>,
    pub shape: Shape,
}

/// Which arcs of an object a [`Topology::mesh`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFilter {
    /// Every arc used by the object.
    All,
    /// Arcs shared by two different geometries (inner borders).
    Interior,
    /// Arcs used by a single geometry (outline).
    Exterior,
}

/// A TopoJSON document with its arcs decoded to absolute coordinates.
#[derive(Debug, Clone)]
pub struct Topology {
    objects: HashMap<String, Geometry>,
    arcs: Vec<Line>,
}

#[derive(Deserialize)]
struct RawTopology {
    #[serde(default)]
    transform: Option<Transform>,
    objects: HashMap<String, Geometry>,
    arcs: Vec<Vec<Position>>,
}

impl<'de> Deserialize<'de> for Topology {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where D: serde::Deserializer<'de> {
        let raw = RawTopology::deserialize(d)?;
        let arcs = raw.arcs.into_iter()
            .map(|arc| decode_arc(arc, raw.transform))
            .collect();
        Ok(Topology { objects: raw.objects, arcs })
    }
}

fn decode_arc(arc: Vec<Position>, transform: Option<Transform>) -> Line {
    match transform {
        None => arc.into_iter().map(|Position(p)| p).collect(),
        Some(Transform { scale: [sx, sy], translate: [tx, ty] }) => {
            let (mut x, mut y) = (0., 0.);
            arc.into_iter().map(|Position([dx, dy])| {
                x += dx;
                y += dy;
                [x * sx + tx, y * sy + ty]
            }).collect()
        }
    }
}

impl Topology {
    fn object(&self, name: &str) -> Result<&Geometry> {
        self.objects.get(name)
            .ok_or_else(|| Error::MissingObject(name.to_string()))
    }

    /// Append the points of arc `i` to `line`; negative indices `!j`
    /// designate arc `j` reversed.  The first point of the arc is
    /// dropped when it continues a line.
    fn extend_with_arc(&self, line: &mut Line, i: i64) -> Result<()> {
        let j = if i < 0 { !i } else { i };
        let arc = usize::try_from(j).ok()
            .and_then(|j| self.arcs.get(j))
            .ok_or(Error::InvalidArc(i))?;
        let skip = usize::from(!line.is_empty());
        if i < 0 {
            line.extend(arc.iter().rev().skip(skip));
        } else {
            line.extend(arc.iter().skip(skip));
        }
        Ok(())
    }

    fn stitch(&self, arcs: &[i64]) -> Result<Line> {
        let mut line = Vec::new();
        for &i in arcs { self.extend_with_arc(&mut line, i)? }
        Ok(line)
    }

    fn shape(&self, g: &Geometry) -> Result<Shape> {
        let polygon = |rings: &[&[i64]]| -> Result<Vec<Line>> {
            rings.iter().map(|r| self.stitch(r)).collect()
        };
        Ok(match g.kind {
            None | Some(Kind::Other) => Shape::Empty,
            Some(Kind::GeometryCollection) =>
                Shape::Collection(g.geometries.iter()
                                  .map(|g| self.shape(g))
                                  .collect::<Result<_>>()?),
            Some(Kind::LineString) =>
                Shape::Lines(vec![self.stitch(g.arcs.depth1("LineString")?)?]),
            Some(Kind::MultiLineString) =>
                Shape::Lines(g.arcs.depth2("MultiLineString")?.into_iter()
                             .map(|l| self.stitch(l))
                             .collect::<Result<_>>()?),
            Some(Kind::Polygon) =>
                Shape::Polygons(vec![polygon(&g.arcs.depth2("Polygon")?)?]),
            Some(Kind::MultiPolygon) =>
                Shape::Polygons(g.arcs.depth3("MultiPolygon")?.iter()
                                .map(|p| polygon(p))
                                .collect::<Result<_>>()?),
        })
    }

    /// Features of the object `name`: one per member if it is a
    /// geometry collection, otherwise the object itself.
    pub fn features(&self, name: &str) -> Result<Vec<Feature>> {
        let obj = self.object(name)?;
        let feature = |g: &Geometry| -> Result<Feature> {
            Ok(Feature { id: g.id.clone(), shape: self.shape(g)? })
        };
        match obj.kind {
            Some(Kind::GeometryCollection) =>
                obj.geometries.iter().map(feature).collect(),
            _ => Ok(vec![feature(obj)?]),
        }
    }

    /// Arcs of the object `name` selected by `filter`, in arc order.
    /// An arc is shared when the first and last geometries using it
    /// differ.
    pub fn mesh(&self, name: &str, filter: MeshFilter) -> Result<Vec<Line>> {
        let obj = self.object(name)?;
        let mut users: Vec<Option<(usize, usize)>> = vec![None; self.arcs.len()];
        let mut n_geom = 0;
        self.collect_arc_users(obj, &mut users, &mut n_geom)?;
        let lines = users.iter().zip(&self.arcs)
            .filter(|(u, _)| match (u, filter) {
                (None, _) => false,
                (Some(_), MeshFilter::All) => true,
                (Some((a, b)), MeshFilter::Interior) => a != b,
                (Some((a, b)), MeshFilter::Exterior) => a == b,
            })
            .map(|(_, arc)| arc.clone())
            .collect();
        Ok(lines)
    }

    // Record, for each arc, the first and last geometry using it.
    fn collect_arc_users(&self, g: &Geometry,
                         users: &mut [Option<(usize, usize)>],
                         n_geom: &mut usize) -> Result<()> {
        let refs: Vec<i64> = match g.kind {
            None | Some(Kind::Other) => return Ok(()),
            Some(Kind::GeometryCollection) => {
                for g in &g.geometries {
                    self.collect_arc_users(g, users, n_geom)?
                }
                return Ok(())
            }
            Some(Kind::LineString) => g.arcs.depth1("LineString")?.to_vec(),
            Some(Kind::MultiLineString) => g.arcs.depth2("MultiLineString")?
                .concat(),
            Some(Kind::Polygon) => g.arcs.depth2("Polygon")?.concat(),
            Some(Kind::MultiPolygon) => g.arcs.depth3("MultiPolygon")?
                .into_iter().flatten().flatten().copied().collect(),
        };
        let geom = *n_geom;
        *n_geom += 1;
        for i in refs {
            let j = if i < 0 { !i } else { i };
            let user = usize::try_from(j).ok()
                .and_then(|j| users.get_mut(j))
                .ok_or(Error::InvalidArc(i))?;
            *user = Some(match *user {
                None => (geom, geom),
                Some((first, _)) => (first, geom),
            });
        }
        Ok(())
    }
}
