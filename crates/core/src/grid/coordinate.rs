//! This sub-module contains the basic value types of the lattice coordinate
//! system. See the parent module documentation for a description of how the
//! coordinate systems relate to each other.

use anyhow::anyhow;
use derive_more::{Add, AddAssign, Display, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// A vertex on the triangular lattice, in cube coordinates. See this page for
/// info on how the cube coordinate system works:
/// https://www.redblobgames.com/grids/hexagons/#coordinates-cube
///
/// **For any lattice vertex, all three components are integers and
/// `a + b + c = 0`.** Since the third component is always derivable from the
/// other two, we only store `a` and `b`. This also makes it impossible to
/// construct a coordinate that breaks the invariant, which is why arithmetic
/// on these values never needs to be re-validated.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Add,
    Sub,
    Neg,
    AddAssign,
    SubAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", "self.a()", "self.b()", "self.c()")]
pub struct CubeCoordinate {
    a: i32,
    b: i32,
}

impl CubeCoordinate {
    pub const ORIGIN: Self = Self::new_ab(0, 0);

    /// Construct a coordinate from all three components. Returns an error if
    /// the components don't sum to zero, since that triple doesn't name any
    /// vertex on the lattice.
    pub fn new(a: i32, b: i32, c: i32) -> anyhow::Result<Self> {
        if a + b + c != 0 {
            Err(anyhow!(
                "Invalid cube coordinate ({}, {}, {}); must be on the plane \
                a+b+c=0",
                a,
                b,
                c
            ))
        } else {
            Ok(Self::new_ab(a, b))
        }
    }

    /// Construct a coordinate with the given a and b. Since a+b+c=0 for all
    /// vertices, we can derive c from a & b.
    pub const fn new_ab(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> i32 {
        self.a
    }

    pub fn b(&self) -> i32 {
        self.b
    }

    pub fn c(&self) -> i32 {
        -(self.a + self.b)
    }

    /// Convert an offset (column/row) array position into a cube coordinate.
    /// Odd rows are shifted half a column to the right, which is why the row
    /// only contributes `floor(y / 2)` to the shear. This is the exact
    /// inverse of [Self::to_offset].
    pub fn from_offset(x: i32, y: i32) -> Self {
        Self::new_ab(x - y.div_euclid(2), y)
    }

    /// Get the offset (column/row) array position of this vertex. This is the
    /// exact inverse of [Self::from_offset].
    pub fn to_offset(self) -> (i32, i32) {
        (self.offset_x(), self.offset_y())
    }

    /// Column of this vertex in offset coordinates
    pub fn offset_x(&self) -> i32 {
        self.a + self.b.div_euclid(2)
    }

    /// Like [Self::to_offset], but returns `None` if the column doesn't fit
    /// in an `i32`
    pub fn checked_offset(self) -> Option<(i32, i32)> {
        Some((self.a.checked_add(self.b.div_euclid(2))?, self.b))
    }

    /// Row of this vertex in offset coordinates
    pub fn offset_y(&self) -> i32 {
        self.b
    }

    /// Get the vertex one lattice step away in the given direction
    pub fn neighbor(self, direction: Direction) -> Self {
        self + direction.vector()
    }

    /// Like [Self::neighbor], but returns `None` instead of overflowing at the
    /// edge of the `i32` range
    pub fn checked_neighbor(self, direction: Direction) -> Option<Self> {
        let step = direction.vector();
        Some(Self::new_ab(
            self.a.checked_add(step.a)?,
            self.b.checked_add(step.b)?,
        ))
    }

    /// Get an iterator of all the vertices directly adjacent to this one, in
    /// [Direction::CLOCKWISE] order. Always contains exactly 6 values, some of
    /// which may fall outside any particular grid.
    pub fn neighbors(self) -> impl Iterator<Item = CubeCoordinate> {
        Direction::CLOCKWISE
            .iter()
            .map(move |direction| self.neighbor(*direction))
    }

    /// Calculate the path distance between two vertices, meaning the number
    /// of edges you have to walk to get from one to the other.
    pub fn distance_to(self, other: CubeCoordinate) -> usize {
        // https://www.redblobgames.com/grids/hexagons/#distances
        let diff = self - other;
        diff.a()
            .unsigned_abs()
            .max(diff.b().unsigned_abs())
            .max(diff.c().unsigned_abs()) as usize
    }
}

/// Fractional components are clamped to this magnitude before being reduced
/// to integers. Anything this far out is off every grid anyway, and the
/// headroom keeps derived components and neighbor steps inside `i32`.
const MAX_COMPONENT: f64 = (i32::MAX / 8) as f64;

/// Clamp a fractional component into the range [MAX_COMPONENT] allows. NaN
/// passes through untouched, and later casts it to zero.
fn clamp_component(value: f64) -> f64 {
    value.clamp(-MAX_COMPONENT, MAX_COMPONENT)
}

/// A point in grid space that doesn't necessarily fall on a lattice vertex.
/// These are produced by inverse-projecting screen positions, and can be
/// reduced to a [CubeCoordinate] either by rounding (nearest vertex) or by
/// flooring (reference vertex of the containing face).
///
/// Unlike [CubeCoordinate], all three components are stored, because float
/// error means `a + b + c` is only ever approximately zero. That invariant is
/// **not** enforced here.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Display,
    Add,
    Sub,
    Neg,
    AddAssign,
    SubAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", "self.a", "self.b", "self.c")]
pub struct FractionalCoordinate {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl FractionalCoordinate {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Construct a point from a and b, deriving c so the point sits on the
    /// plane `a + b + c = 0`
    pub fn new_ab(a: f64, b: f64) -> Self {
        Self::new(a, b, -a - b)
    }

    /// Find the lattice vertex nearest to this point.
    ///
    /// Each component is rounded independently (half away from zero), which
    /// can leave the triple off the `a + b + c = 0` plane. To fix that, the
    /// component that moved the furthest while rounding is thrown away and
    /// recomputed from the other two. `a` is only recomputed if its residual
    /// is strictly larger than both others, then `b` under the same rule, and
    /// `c` in every other case, including ties and NaN residuals.
    ///
    /// Points further than about a quarter billion steps from the origin are
    /// pulled in to that distance first.
    pub fn round(self) -> CubeCoordinate {
        let ([a, b, c], [diff_a, diff_b, diff_c]) = self.round_components();

        if diff_a > diff_b && diff_a > diff_c {
            // a gets derived from b and c
            CubeCoordinate::new_ab(-b - c, b)
        } else if diff_b > diff_a && diff_b > diff_c {
            // b gets derived from a and c
            CubeCoordinate::new_ab(a, -a - c)
        } else {
            // c gets derived, which is exactly what new_ab does
            CubeCoordinate::new_ab(a, b)
        }
    }

    /// When the `a` and `b` rounding residuals tie for largest, [Self::round]
    /// derives `c`, which can land on a vertex that is neither of the two
    /// closest ones. This happens at the exact midpoint of an NE-SW edge. In
    /// that case this returns both endpoints (`a` derived, then `b` derived).
    /// Otherwise `None`.
    pub(crate) fn round_tie(self) -> Option<[CubeCoordinate; 2]> {
        let ([a, b, c], [diff_a, diff_b, diff_c]) = self.round_components();
        if diff_a == diff_b && diff_a > diff_c {
            Some([
                CubeCoordinate::new_ab(-b - c, b),
                CubeCoordinate::new_ab(a, -a - c),
            ])
        } else {
            None
        }
    }

    /// Round each component on its own, returning the rounded integers and
    /// how far each one moved
    fn round_components(self) -> ([i32; 3], [f64; 3]) {
        let rounded_a = clamp_component(self.a).round();
        let rounded_b = clamp_component(self.b).round();
        let rounded_c = clamp_component(self.c).round();
        (
            [rounded_a as i32, rounded_b as i32, rounded_c as i32],
            [
                (self.a - rounded_a).abs(),
                (self.b - rounded_b).abs(),
                (self.c - rounded_c).abs(),
            ],
        )
    }

    /// Floor `a` and `b` and derive `c` from them. This is **not** a true
    /// floor of all three components: the result is the reference vertex of
    /// the face containing this point (the corner of the unit cell spanned by
    /// the `a` and `b` axes), which is what face lookup needs. Far-off
    /// points are clamped the same way as in [Self::round].
    pub fn floor(self) -> CubeCoordinate {
        CubeCoordinate::new_ab(
            clamp_component(self.a).floor() as i32,
            clamp_component(self.b).floor() as i32,
        )
    }
}

impl From<CubeCoordinate> for FractionalCoordinate {
    fn from(other: CubeCoordinate) -> Self {
        Self::new(other.a().into(), other.b().into(), other.c().into())
    }
}

/// The 6 directions you can step from one lattice vertex to an adjacent one.
/// Each direction is named by its heading in screen space, where `y` grows
/// downward. The first three are the "canonical" directions: each grid node
/// owns the edges that leave it in those directions. The last three are their
/// opposites.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    EnumIter,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// North-west, `(0, -1, 1)`
    NW,
    /// North-east, `(1, -1, 0)`
    NE,
    /// East, `(1, 0, -1)`
    E,
    /// South-east, `(0, 1, -1)`
    SE,
    /// South-west, `(-1, 1, 0)`
    SW,
    /// West, `(-1, 0, 1)`
    W,
}

/// Unit vector for each direction, indexed by [Direction::index]
const DIRECTION_VECTORS: [CubeCoordinate; 6] = [
    CubeCoordinate::new_ab(0, -1),
    CubeCoordinate::new_ab(1, -1),
    CubeCoordinate::new_ab(1, 0),
    CubeCoordinate::new_ab(0, 1),
    CubeCoordinate::new_ab(-1, 1),
    CubeCoordinate::new_ab(-1, 0),
];

impl Direction {
    /// All directions in clockwise order (as seen on screen), starting at
    /// north-west. A direction's position in this list is its index.
    pub const CLOCKWISE: &'static [Self] =
        &[Self::NW, Self::NE, Self::E, Self::SE, Self::SW, Self::W];

    /// The directions whose edges are stored directly on a node
    pub const CANONICAL: &'static [Self] = &[Self::NW, Self::NE, Self::E];

    /// Get the direction with the given index. The index wraps around, so
    /// `from_index(6) == from_index(0)`.
    pub fn from_index(index: usize) -> Self {
        Self::CLOCKWISE[index % Self::CLOCKWISE.len()]
    }

    /// Index of this direction within [Self::CLOCKWISE], in `[0, 6)`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Is this one of the three directions stored directly on a node?
    pub fn is_canonical(self) -> bool {
        self.index() < 3
    }

    /// The direction pointing the opposite way
    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// The next direction counter-clockwise from this one
    pub fn previous(self) -> Self {
        // Adding 5 instead of subtracting 1 keeps us in unsigned land, and
        // gives the same result after the modulo
        Self::from_index(self.index() + 5)
    }

    /// The unit vector that moves a coordinate one step in this direction
    pub fn vector(self) -> CubeCoordinate {
        DIRECTION_VECTORS[self.index()]
    }
}

/// A vertex coordinate paired with a direction. This is how edges and faces
/// are addressed: an edge is the segment from `coordinate` to its neighbor in
/// `direction`, and a face is the triangle wedged between the neighbors in
/// `direction.previous()` and `direction`.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{} {}", coordinate, direction)]
pub struct DirectedCoordinate {
    pub coordinate: CubeCoordinate,
    pub direction: Direction,
}

impl DirectedCoordinate {
    pub fn new(coordinate: CubeCoordinate, direction: Direction) -> Self {
        Self {
            coordinate,
            direction,
        }
    }

    /// The vertex at the far end of this direction, i.e. the other endpoint
    /// when this addresses an edge
    pub fn target(self) -> CubeCoordinate {
        self.coordinate.neighbor(self.direction)
    }

    /// Address the same edge from the other endpoint. Faces have no such
    /// symmetry, so only use this for edges.
    pub fn reversed(self) -> Self {
        Self::new(self.target(), self.direction.opposite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_tokens, Token};
    use strum::IntoEnumIterator;

    /// Every coordinate in a reasonably sized patch around the origin
    fn patch() -> impl Iterator<Item = CubeCoordinate> {
        (-20..=20).flat_map(|a| {
            (-20..=20).map(move |b| CubeCoordinate::new_ab(a, b))
        })
    }

    fn assert_zero_sum(coord: CubeCoordinate) {
        assert_eq!(coord.a() + coord.b() + coord.c(), 0, "{}", coord);
    }

    #[test]
    fn test_new_validates_plane() {
        assert_eq!(
            CubeCoordinate::new(1, -2, 1).unwrap(),
            CubeCoordinate::new_ab(1, -2)
        );
        assert!(CubeCoordinate::new(1, 1, 1).is_err());
    }

    #[test]
    fn test_offset_round_trip() {
        for coord in patch() {
            let (x, y) = coord.to_offset();
            assert_eq!(CubeCoordinate::from_offset(x, y), coord);
        }
        for x in -20..=20 {
            for y in -20..=20 {
                let coord = CubeCoordinate::from_offset(x, y);
                assert_eq!(coord.to_offset(), (x, y));
            }
        }
    }

    #[test]
    fn test_offset_odd_rows() {
        assert_eq!(CubeCoordinate::from_offset(0, 0), CubeCoordinate::ORIGIN);
        assert_eq!(
            CubeCoordinate::from_offset(1, 1),
            CubeCoordinate::new_ab(1, 1)
        );
        assert_eq!(
            CubeCoordinate::from_offset(1, 2),
            CubeCoordinate::new_ab(0, 2)
        );
        assert_eq!(
            CubeCoordinate::from_offset(0, -1),
            CubeCoordinate::new_ab(1, -1)
        );
    }

    #[test]
    fn test_arithmetic_zero_sum() {
        let p = CubeCoordinate::new_ab(3, -7);
        let q = CubeCoordinate::new_ab(-2, 5);
        assert_zero_sum(p + q);
        assert_zero_sum(p - q);
        assert_zero_sum(-p);
        assert_eq!(p + q, CubeCoordinate::new_ab(1, -2));
        assert_eq!(p - q, CubeCoordinate::new_ab(5, -12));
        for direction in Direction::iter() {
            assert_zero_sum(p.neighbor(direction));
        }
    }

    #[test]
    fn test_neighbor_symmetry() {
        for coord in patch() {
            for direction in Direction::iter() {
                assert_eq!(
                    coord.neighbor(direction).neighbor(direction.opposite()),
                    coord
                );
            }
        }
    }

    #[test]
    fn test_direction_vectors() {
        let expected = [
            (0, -1, 1),
            (1, -1, 0),
            (1, 0, -1),
            (0, 1, -1),
            (-1, 1, 0),
            (-1, 0, 1),
        ];
        for (direction, (a, b, c)) in Direction::iter().zip(expected) {
            assert_eq!(
                direction.vector(),
                CubeCoordinate::new(a, b, c).unwrap(),
                "{}",
                direction
            );
        }
    }

    #[test]
    fn test_direction_index() {
        for (i, direction) in Direction::iter().enumerate() {
            assert_eq!(direction.index(), i);
            assert_eq!(Direction::from_index(i), direction);
            assert_eq!(Direction::from_index(i + 6), direction);
        }
        assert_eq!(Direction::NW.opposite(), Direction::SE);
        assert_eq!(Direction::NE.opposite(), Direction::SW);
        assert_eq!(Direction::E.opposite(), Direction::W);
        assert_eq!(Direction::NW.previous(), Direction::W);
        assert!(Direction::E.is_canonical());
        assert!(!Direction::SE.is_canonical());
    }

    #[test]
    fn test_distance_to() {
        let p0 = CubeCoordinate::ORIGIN;
        let p1 = CubeCoordinate::new_ab(-1, 1);
        let p2 = CubeCoordinate::new_ab(2, -1);
        let p3 = CubeCoordinate::new_ab(2, -3);

        assert_eq!(p0.distance_to(p0), 0);
        assert_eq!(p3.distance_to(p3), 0);

        assert_eq!(p0.distance_to(p1), 1);
        assert_eq!(p0.distance_to(p2), 2);
        assert_eq!(p0.distance_to(p3), 3);

        assert_eq!(p1.distance_to(p2), 3);
        assert_eq!(p1.distance_to(p3), 4);
        assert_eq!(p2.distance_to(p3), 2);
    }

    #[test]
    fn test_round_idempotent() {
        for coord in patch() {
            assert_eq!(FractionalCoordinate::from(coord).round(), coord);
        }
    }

    #[test]
    fn test_round_recomputes_largest_residual() {
        // a moves 0.4, b moves 0.1, c moves 0.3 => a is recomputed
        let point = FractionalCoordinate::new(1.4, -0.1, -1.3);
        assert_eq!(point.round(), CubeCoordinate::new(1, 0, -1).unwrap());

        // b moves the most
        let point = FractionalCoordinate::new(0.2, 0.45, -0.65);
        assert_eq!(point.round(), CubeCoordinate::new(0, 1, -1).unwrap());

        // c moves the most
        let point = FractionalCoordinate::new(2.1, -0.8, -1.3);
        assert_eq!(point.round(), CubeCoordinate::new(2, -1, -1).unwrap());
    }

    #[test]
    fn test_round_ties_recompute_c() {
        // a and c tie => c is recomputed from the rounded a and b
        let point = FractionalCoordinate::new(0.5, 0.0, -0.5);
        let rounded = point.round();
        assert_eq!(rounded, CubeCoordinate::new(1, 0, -1).unwrap());
        assert_zero_sum(rounded);

        // NaN never wins a comparison, so c gets recomputed
        let point = FractionalCoordinate::new(2.0, -1.0, f64::NAN);
        assert_eq!(point.round(), CubeCoordinate::new_ab(2, -1));
    }

    #[test]
    fn test_round_tie() {
        // Midpoint of the edge between (2, 3) and (3, 2). Deriving c lands on
        // (3, 3), which is neither end.
        let point = FractionalCoordinate::new(2.5, 2.5, -5.0);
        assert_eq!(point.round(), CubeCoordinate::new_ab(3, 3));
        assert_eq!(
            point.round_tie(),
            Some([CubeCoordinate::new_ab(2, 3), CubeCoordinate::new_ab(3, 2)])
        );

        // a and c tie, but deriving c already gives one of the ends
        let point = FractionalCoordinate::new(0.5, 0.0, -0.5);
        assert_eq!(point.round_tie(), None);
        assert_eq!(FractionalCoordinate::new(0.1, 0.2, -0.3).round_tie(), None);
    }

    #[test]
    fn test_round_far_away() {
        for point in [
            FractionalCoordinate::new_ab(1e12, 0.0),
            FractionalCoordinate::new_ab(-1e12, 1e12),
            FractionalCoordinate::new_ab(f64::MAX, f64::MIN),
            FractionalCoordinate::new_ab(1e20, 1e20),
        ] {
            for coordinate in [point.round(), point.floor()] {
                assert_zero_sum(coordinate);
                // Still room to step in any direction
                for neighbor in coordinate.neighbors() {
                    assert_zero_sum(neighbor);
                }
            }
        }
    }

    #[test]
    fn test_round_zero_sum() {
        for i in -50..50 {
            for j in -50..50 {
                let point = FractionalCoordinate::new_ab(
                    i as f64 * 0.137,
                    j as f64 * 0.291,
                );
                assert_zero_sum(point.round());
                assert_zero_sum(point.floor());
            }
        }
    }

    #[test]
    fn test_floor() {
        let point = FractionalCoordinate::new_ab(1.7, -0.2);
        assert_eq!(point.floor(), CubeCoordinate::new(1, -1, 0).unwrap());
        let point = FractionalCoordinate::new_ab(-0.5, 2.5);
        assert_eq!(point.floor(), CubeCoordinate::new(-1, 2, -1).unwrap());
    }

    #[test]
    fn test_fractional_arithmetic() {
        let p = FractionalCoordinate::new_ab(1.5, -0.5);
        let camera = FractionalCoordinate::new_ab(-2.0, 1.0);
        assert_eq!(p + camera, FractionalCoordinate::new(-0.5, 0.5, 0.0));
        assert_eq!(p - camera, FractionalCoordinate::new(3.5, -1.5, -2.0));
    }

    #[test]
    fn test_directed_coordinate() {
        let edge =
            DirectedCoordinate::new(CubeCoordinate::ORIGIN, Direction::E);
        assert_eq!(edge.target(), CubeCoordinate::new_ab(1, 0));
        assert_eq!(
            edge.reversed(),
            DirectedCoordinate::new(CubeCoordinate::new_ab(1, 0), Direction::W)
        );
        assert_eq!(edge.reversed().reversed(), edge);
    }

    #[test]
    fn test_serde() {
        assert_tokens(
            &CubeCoordinate::new_ab(1, -2),
            &[
                Token::Struct {
                    name: "CubeCoordinate",
                    len: 2,
                },
                Token::Str("a"),
                Token::I32(1),
                Token::Str("b"),
                Token::I32(-2),
                Token::StructEnd,
            ],
        );
        assert_tokens(
            &Direction::SE,
            &[Token::UnitVariant {
                name: "Direction",
                variant: "se",
            }],
        );
    }
}
