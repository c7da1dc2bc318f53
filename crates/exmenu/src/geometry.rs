use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Bisector of sector 0. Screen space is y-down, so this points up.
pub const REFERENCE: Point = Point { x: 0.0, y: -1.0 };

// Wider sectors are split into triangles no wider than this before hit testing.
const MAX_TRIANGLE_SPAN: f64 = 90.0;

const ICON_RADIUS_DIVISOR: f64 = 1.5;
const BADGE_OFFSET: f64 = 0.8;
const BADGE_DIVISOR: f64 = 3.0;

pub fn rotate(v: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Point::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Unit vector at `degrees` from the reference direction.
pub fn direction(degrees: f64) -> Point {
    rotate(REFERENCE, degrees)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl Sector {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn bisector(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn start_vertex(&self, center: Point, radius: f64) -> Point {
        center + direction(self.start) * radius
    }

    pub fn end_vertex(&self, center: Point, radius: f64) -> Point {
        center + direction(self.end) * radius
    }

    // Wide sectors are fanned into an odd number of triangles so the bisector
    // never lands on an internal edge.
    pub fn contains(&self, point: Point, center: Point, radius: f64) -> bool {
        let pieces = ((self.span() / MAX_TRIANGLE_SPAN).ceil() as usize).max(1) | 1;
        if pieces == 1 {
            return point_in_sector(
                point,
                center,
                self.start_vertex(center, radius),
                self.end_vertex(center, radius),
            );
        }

        let width = self.span() / pieces as f64;
        (0..pieces).any(|j| {
            let a = self.start + width * j as f64;
            let b = if j + 1 == pieces { self.end } else { a + width };
            point_in_sector(
                point,
                center,
                center + direction(a) * radius,
                center + direction(b) * radius,
            )
        })
    }
}

/// Splits the full circle into `item_count` equal sectors.
pub fn partition_angles(item_count: usize) -> Vec<Sector> {
    if item_count == 0 {
        return Vec::new();
    }

    let step = 360.0 / item_count as f64;
    let half = step / 2.0;
    let boundary = |i: usize| -half + step * i as f64;

    (0..item_count)
        .map(|index| Sector {
            index,
            start: boundary(index),
            end: boundary(index + 1),
        })
        .collect()
}

fn sign(p1: Point, p2: Point, p3: Point) -> f64 {
    (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
}

/// Points on an edge are outside.
pub fn point_in_sector(point: Point, center: Point, start: Point, end: Point) -> bool {
    let d1 = sign(point, center, start);
    let d2 = sign(point, start, end);
    let d3 = sign(point, end, center);

    (d1 < 0.0 && d2 < 0.0 && d3 < 0.0) || (d1 > 0.0 && d2 > 0.0 && d3 > 0.0)
}

pub fn hit_test(sectors: &[Sector], point: Point, center: Point, radius: f64) -> Option<usize> {
    sectors
        .iter()
        .find(|s| s.contains(point, center, radius))
        .map(|s| s.index)
}

pub fn icon_placement(
    center: Point,
    radius: f64,
    sector_index: usize,
    item_count: usize,
    icon_size: f64,
) -> Rect {
    debug_assert!(sector_index < item_count, "sector index out of range");

    let step = 360.0 / item_count as f64;
    let angle = -step / 2.0 + step / 2.0 * (2 * sector_index + 1) as f64;
    let icon_center = center + direction(angle) * (radius / ICON_RADIUS_DIVISOR);

    Rect::new(
        icon_center.x - icon_size / 2.0,
        icon_center.y - icon_size / 2.0,
        icon_size,
        icon_size,
    )
}

/// Kind badge, overlapping the icon's bottom-right corner.
pub fn badge_rect(icon: Rect) -> Rect {
    Rect::new(
        icon.x + icon.width * BADGE_OFFSET,
        icon.y + icon.height * BADGE_OFFSET,
        icon.width / BADGE_DIVISOR,
        icon.height / BADGE_DIVISOR,
    )
}

pub fn label_rect(icon: Rect, label_height: f64) -> Rect {
    Rect::new(icon.x, icon.y + icon.height, icon.width, label_height)
}
