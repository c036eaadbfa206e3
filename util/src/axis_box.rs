use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Integer rectangle over a pixel lattice.
///
/// Equivalent to an axis-aligned bounding box. The rectangle covers points
/// `p` with `p0 <= p < p1` on both axes, so the `p1` corner is not part of
/// the rectangle.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct Rect {
    pub p0: [i32; 2],
    pub p1: [i32; 2],
}

impl Serialize for Rect {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        [self.p0[0], self.p0[1], self.p1[0], self.p1[1]].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rect {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let elts = <Vec<i32>>::deserialize(deserializer)?;
        let &[x0, y0, x1, y1] = &elts[..] else {
            return Err(serde::de::Error::custom("bad element count"));
        };
        Ok(Rect::new([x0, y0], [x1, y1]))
    }
}

impl From<[i32; 4]> for Rect {
    fn from([x0, y0, x1, y1]: [i32; 4]) -> Self {
        Rect::new([x0, y0], [x1, y1])
    }
}

impl Rect {
    /// Create a new rectangle. If p1 has components that are smaller than
    /// p0's, the corresponding range is clamped to zero.
    pub fn new(p0: impl Into<[i32; 2]>, p1: impl Into<[i32; 2]>) -> Self {
        let (p0, p1) = (p0.into(), p1.into());

        Rect {
            p0,
            p1: std::array::from_fn(|i| p0[i].max(p1[i])),
        }
    }

    /// Create a rectangle with the given dimensions at origin.
    pub fn sized(dim: impl Into<[i32; 2]>) -> Self {
        Rect::new([0, 0], dim)
    }

    /// Create a rectangle from an origin point and a size.
    pub fn at(pos: impl Into<[i32; 2]>, dim: impl Into<[i32; 2]>) -> Self {
        Rect::sized(dim) + pos
    }

    pub fn is_empty(&self) -> bool {
        (0..2).any(|i| self.p1[i] <= self.p0[i])
    }

    pub fn contains(&self, p: impl Into<[i32; 2]>) -> bool {
        let p = p.into();
        (0..2).all(|i| (self.p0[i]..self.p1[i]).contains(&p[i]))
    }

    pub fn contains_other(&self, r: &Rect) -> bool {
        (0..2).all(|i| self.p0[i] <= r.p0[i] && self.p1[i] >= r.p1[i])
    }

    /// Rectangles intersect when they share an area. Rectangles that only
    /// touch along an edge do not intersect.
    pub fn intersects(&self, r: &Rect) -> bool {
        (0..2).all(|i| r.p0[i] < self.p1[i] && r.p1[i] > self.p0[i])
    }

    /// Return the vector of the rectangle's dimensions.
    pub fn dim(&self) -> [i32; 2] {
        [self.width(), self.height()]
    }

    pub fn min(&self) -> [i32; 2] {
        self.p0
    }

    pub fn max(&self) -> [i32; 2] {
        self.p1
    }

    pub fn width(&self) -> i32 {
        self.p1[0] - self.p0[0]
    }

    pub fn height(&self) -> i32 {
        self.p1[1] - self.p0[1]
    }

    pub fn area(&self) -> i32 {
        self.width() * self.height()
    }

    /// Grow the rectangle, with separate amounts for the low and high sides
    /// of each axis.
    pub fn grow(
        &self,
        lower_amount: impl Into<[i32; 2]>,
        upper_amount: impl Into<[i32; 2]>,
    ) -> Rect {
        let (lower, upper) = (lower_amount.into(), upper_amount.into());
        Rect::new(
            std::array::from_fn(|i| self.p0[i] - lower[i]),
            std::array::from_fn(|i| self.p1[i] + upper[i]),
        )
    }

    /// Return a unit thickness slice of the rectangle. For each axis, a
    /// negative component of `normal` picks the low side, a positive one the
    /// high side and zero keeps the whole extent.
    ///
    /// ```
    /// use util::Rect;
    ///
    /// let r = Rect::sized([10, 5]);
    /// assert_eq!(r.border([0, -1]), Rect::new([0, 0], [10, 1]));
    /// assert_eq!(r.border([1, 0]), Rect::new([9, 0], [10, 5]));
    /// ```
    pub fn border(&self, normal: impl Into<[i32; 2]>) -> Rect {
        let normal = normal.into();
        let mut ret = *self;

        for i in 0..2 {
            match normal[i] {
                n if n < 0 => ret.p1[i] = ret.p1[i].min(ret.p0[i] + 1),
                n if n > 0 => ret.p0[i] = ret.p0[i].max(ret.p1[i] - 1),
                _ => {}
            }
        }

        ret
    }

    /// Iterate through the outermost points in the rectangle.
    pub fn edge(&self) -> impl Iterator<Item = [i32; 2]> {
        let [x0, y0] = self.p0;
        let [x1, y1] = self.p1;
        let [x1, y1] = [x1 - 1, y1 - 1];

        (x0..x1).map(move |x| [x, y0]).chain(
            (y0..y1).map(move |y| [x1, y]).chain(
                ((x0 + 1)..=x1)
                    .rev()
                    .map(move |x| [x, y1])
                    .chain(((y0 + 1)..=y1).rev().map(move |y| [x0, y])),
            ),
        )
    }

    /// Get a row-major index for a point within the rectangle. Points outside
    /// the rectangle are wrapped into it.
    pub fn idx(&self, p: impl Into<[i32; 2]>) -> usize {
        let p = p.into();
        let x = (p[0] - self.p0[0]).rem_euclid(self.width()) as usize;
        let y = (p[1] - self.p0[1]).rem_euclid(self.height()) as usize;
        x + y * self.width() as usize
    }

    /// Get the point for a row-major index, inverse of `idx`.
    pub fn get(&self, n: usize) -> [i32; 2] {
        let w = self.width() as usize;
        [self.p0[0] + (n % w) as i32, self.p0[1] + (n / w) as i32]
    }

    /// Number of lattice points in the rectangle.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.area() as usize
        }
    }
}

impl<E: Into<[i32; 2]>> Add<E> for Rect {
    type Output = Rect;

    fn add(mut self, rhs: E) -> Self::Output {
        self += rhs;
        self
    }
}

impl<E: Into<[i32; 2]>> AddAssign<E> for Rect {
    fn add_assign(&mut self, rhs: E) {
        let rhs = rhs.into();
        for i in 0..2 {
            self.p0[i] += rhs[i];
            self.p1[i] += rhs[i];
        }
    }
}

impl<E: Into<[i32; 2]>> Sub<E> for Rect {
    type Output = Rect;

    fn sub(mut self, rhs: E) -> Self::Output {
        self -= rhs;
        self
    }
}

impl<E: Into<[i32; 2]>> SubAssign<E> for Rect {
    fn sub_assign(&mut self, rhs: E) {
        let rhs = rhs.into();
        for i in 0..2 {
            self.p0[i] -= rhs[i];
            self.p1[i] -= rhs[i];
        }
    }
}

impl IntoIterator for Rect {
    type Item = [i32; 2];

    type IntoIter = LatticeIter;

    fn into_iter(self) -> LatticeIter {
        LatticeIter {
            inner: self,
            x: self.p0,
        }
    }
}

/// Row-major iterator over the points of a rectangle.
pub struct LatticeIter {
    inner: Rect,
    x: [i32; 2],
}

impl Iterator for LatticeIter {
    type Item = [i32; 2];

    fn next(&mut self) -> Option<Self::Item> {
        if self.inner.is_empty() {
            return None;
        }
        if self.x[0] >= self.inner.p1[0] {
            self.x[0] = self.inner.p0[0];
            self.x[1] += 1;
        }
        if self.x[1] >= self.inner.p1[1] {
            return None;
        }
        let ret = self.x;
        self.x[0] += 1;
        Some(ret)
    }
}
