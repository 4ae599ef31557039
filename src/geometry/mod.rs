//! Geometric primitives in page space.
//!
//! Word boxes, quad regions and annotation bounds all share one coordinate
//! system supplied by the document collaborator. Nothing here depends on
//! which way the y axis points.

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// X coordinate of the minimum corner
    pub x: f32,
    /// Y coordinate of the minimum corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two corner coordinates `(x0, y0)` and `(x1, y1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use annot_oxide::geometry::Rect;
    ///
    /// // A word box as dumped by a layout engine
    /// let word = Rect::from_points(72.0, 90.0, 101.5, 102.0);
    /// assert_eq!(word.right(), 101.5);
    /// assert_eq!(word.height, 12.0);
    /// ```
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Smallest rectangle enclosing all `points`, or `None` if there are none.
    ///
    /// # Examples
    ///
    /// ```
    /// use annot_oxide::geometry::{Point, Rect};
    ///
    /// let quad = [
    ///     Point::new(10.0, 5.0),
    ///     Point::new(40.0, 5.0),
    ///     Point::new(10.0, 15.0),
    ///     Point::new(40.0, 15.0),
    /// ];
    /// let rect = Rect::bounding(&quad).unwrap();
    /// assert_eq!(rect, Rect::from_points(10.0, 5.0, 40.0, 15.0));
    /// ```
    pub fn bounding(points: &[Point]) -> Option<Rect> {
        let first = points.first()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Some(Rect::from_points(x0, y0, x1, y1))
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when the rectangle encloses no area or has non-finite coordinates.
    pub fn is_empty(&self) -> bool {
        !(self.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// True when every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Check if this rectangle overlaps another with non-empty area.
    ///
    /// Rectangles that only share an edge do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use annot_oxide::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// let r2 = Rect::new(50.0, 50.0, 100.0, 100.0);
    /// let r3 = Rect::new(100.0, 0.0, 10.0, 10.0);
    ///
    /// assert!(r1.intersects(&r2));
    /// assert!(!r1.intersects(&r3));
    /// ```
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Overlapping part of two rectangles, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        Some(Rect::from_points(
            self.left().max(other.left()),
            self.top().max(other.top()),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        ))
    }

    /// Compute the union of this rectangle with another.
    pub fn union(&self, other: &Rect) -> Rect {
        let x0 = self.left().min(other.left());
        let y0 = self.top().min(other.top());
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Rect::from_points(x0, y0, x1, y1)
    }

    /// Scale every coordinate by `factor`.
    pub fn scale(&self, factor: f32) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

impl From<[f32; 4]> for Rect {
    /// Corner form `[x0, y0, x1, y1]`.
    fn from([x0, y0, x1, y1]: [f32; 4]) -> Self {
        Rect::from_points(x0, y0, x1, y1)
    }
}
