//! Hand landmark geometry.
//!
//! A `LandmarkSet` is the only input shape the classifier accepts: exactly 21
//! points in normalized frame coordinates, vertical axis increasing downward.
//! Construction fails fast on malformed input so a truncated or corrupted hand
//! can never be scored as a valid gesture.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Number of landmarks in a hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_KNUCKLE: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_KNUCKLE: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_KNUCKLE: usize = 13;
pub const RING_TIP: usize = 16;
pub const PINKY_KNUCKLE: usize = 17;
pub const PINKY_TIP: usize = 20;

/// A normalized 2D landmark position. Serialized as `[x, y]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f32; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

/// The four non-thumb fingers, each judged against its knuckle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    pub fn tip(self) -> usize {
        match self {
            Finger::Index => INDEX_TIP,
            Finger::Middle => MIDDLE_TIP,
            Finger::Ring => RING_TIP,
            Finger::Pinky => PINKY_TIP,
        }
    }

    pub fn knuckle(self) -> usize {
        match self {
            Finger::Index => INDEX_KNUCKLE,
            Finger::Middle => MIDDLE_KNUCKLE,
            Finger::Ring => RING_KNUCKLE,
            Finger::Pinky => PINKY_KNUCKLE,
        }
    }
}

/// Exactly 21 landmarks for one detected hand. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct LandmarkSet {
    points: [Point; LANDMARK_COUNT],
}

impl LandmarkSet {
    /// Build a landmark set, rejecting wrong point counts and non-finite coordinates.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        let count = points.len();
        let points: [Point; LANDMARK_COUNT] = points.try_into().map_err(|_| {
            anyhow!(
                "landmark set must have exactly {} points, got {}",
                LANDMARK_COUNT,
                count
            )
        })?;
        if let Some(idx) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(anyhow!("landmark {} has a non-finite coordinate", idx));
        }
        Ok(Self { points })
    }

    /// Build from points already known to be finite, such as generated poses.
    pub(crate) fn from_finite(points: [Point; LANDMARK_COUNT]) -> Self {
        debug_assert!(points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        Self { points }
    }

    pub fn from_xy(coords: &[(f32, f32)]) -> Result<Self> {
        Self::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    pub fn point(&self, idx: usize) -> Point {
        self.points[idx]
    }

    pub fn points(&self) -> &[Point; LANDMARK_COUNT] {
        &self.points
    }

    /// Tip strictly above its knuckle (smaller y).
    pub fn is_extended(&self, finger: Finger) -> bool {
        self.points[finger.tip()].y < self.points[finger.knuckle()].y
    }

    /// Tip strictly below its knuckle (larger y).
    pub fn is_curled(&self, finger: Finger) -> bool {
        self.points[finger.tip()].y > self.points[finger.knuckle()].y
    }

    /// Thumb tip strictly above the index fingertip.
    pub fn thumb_above_index(&self) -> bool {
        self.points[THUMB_TIP].y < self.points[INDEX_TIP].y
    }
}

impl TryFrom<Vec<Point>> for LandmarkSet {
    type Error = anyhow::Error;

    fn try_from(points: Vec<Point>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<LandmarkSet> for Vec<Point> {
    fn from(set: LandmarkSet) -> Self {
        set.points.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(y: f32) -> Vec<Point> {
        vec![Point::new(0.5, y); LANDMARK_COUNT]
    }

    #[test]
    fn rejects_short_and_long_sets() {
        let err = LandmarkSet::new(vec![Point::new(0.5, 0.5); 20]).unwrap_err();
        assert!(err.to_string().contains("got 20"));
        assert!(LandmarkSet::new(vec![Point::new(0.5, 0.5); 22]).is_err());
        assert!(LandmarkSet::new(Vec::new()).is_err());
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let mut points = flat(0.5);
        points[INDEX_TIP] = Point::new(0.5, f32::NAN);
        let err = LandmarkSet::new(points).unwrap_err();
        assert!(err.to_string().contains("landmark 8"));
    }

    #[test]
    fn equal_tip_and_knuckle_is_neither_extended_nor_curled() {
        let set = LandmarkSet::new(flat(0.5)).unwrap();
        for finger in Finger::ALL {
            assert!(!set.is_extended(finger));
            assert!(!set.is_curled(finger));
        }
    }

    #[test]
    fn deserializes_from_coordinate_pairs() {
        let json = serde_json::to_string(&vec![[0.25_f32, 0.75_f32]; LANDMARK_COUNT]).unwrap();
        let set: LandmarkSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set.point(WRIST), Point::new(0.25, 0.75));

        let short = serde_json::to_string(&vec![[0.25_f32, 0.75_f32]; 3]).unwrap();
        let err = serde_json::from_str::<LandmarkSet>(&short).unwrap_err();
        assert!(err.to_string().contains("exactly 21 points"));
    }
}
