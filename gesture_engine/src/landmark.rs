//! Hand landmarks as delivered by a detector, one frame at a time.

use std::fmt;

use tracing::warn;

// ════════════════════════════════════════════════════════════════════════════
// Point / LandmarkId
// ════════════════════════════════════════════════════════════════════════════

/// Pixel position inside the camera frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Point { x, y }
    }
}

/// One of the 21 anatomical hand points (0 = wrist … 20 = pinky tip).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LandmarkId(u8);

impl LandmarkId {
    pub const COUNT: usize = 21;

    pub const WRIST:      LandmarkId = LandmarkId(0);
    pub const THUMB_TIP:  LandmarkId = LandmarkId(4);
    pub const INDEX_TIP:  LandmarkId = LandmarkId(8);
    pub const MIDDLE_TIP: LandmarkId = LandmarkId(12);
    pub const RING_TIP:   LandmarkId = LandmarkId(16);
    pub const PINKY_TIP:  LandmarkId = LandmarkId(20);

    /// `None` for ids outside 0–20.
    pub fn new(id: u8) -> Option<Self> {
        ((id as usize) < Self::COUNT).then_some(LandmarkId(id))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LandmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Thumb, index, middle, ring, pinky tips.
pub const FINGERTIPS: [LandmarkId; 5] = [
    LandmarkId::THUMB_TIP,
    LandmarkId::INDEX_TIP,
    LandmarkId::MIDDLE_TIP,
    LandmarkId::RING_TIP,
    LandmarkId::PINKY_TIP,
];

// ════════════════════════════════════════════════════════════════════════════
// Landmark / LandmarkFrame
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Landmark {
    pub id:  LandmarkId,
    pub pos: Point,
}

/// Landmarks of a single detected hand for one video frame.
///
/// Points are indexed by id, so lookups are O(1) and a detector that
/// reports fewer than 21 points is represented faithfully.  "No hand" is
/// `Option<LandmarkFrame>::None` at the call sites, never an empty frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LandmarkFrame {
    points: [Option<Point>; LandmarkId::COUNT],
}

impl LandmarkFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from detector `(id, x, y)` triples.
    ///
    /// Triples whose id is outside 0–20 are dropped; a repeated id keeps the
    /// last position seen.
    pub fn from_triples<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = (u8, u32, u32)>,
    {
        let mut frame = Self::new();
        for (id, x, y) in triples {
            match LandmarkId::new(id) {
                Some(id) => frame.set(id, Point::new(x, y)),
                None     => warn!(id, "dropping landmark with out-of-range id"),
            }
        }
        frame
    }

    pub fn set(&mut self, id: LandmarkId, pos: Point) {
        self.points[id.index()] = Some(pos);
    }

    pub fn get(&self, id: LandmarkId) -> Option<Point> {
        self.points[id.index()]
    }

    pub fn len(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.points.iter().all(Option::is_none)
    }

    /// Present landmarks in id order.
    pub fn iter(&self) -> impl Iterator<Item = Landmark> + '_ {
        self.points.iter().enumerate().filter_map(|(i, p)| {
            p.map(|pos| Landmark { id: LandmarkId(i as u8), pos })
        })
    }
}

impl FromIterator<Landmark> for LandmarkFrame {
    fn from_iter<T: IntoIterator<Item = Landmark>>(iter: T) -> Self {
        let mut frame = Self::new();
        for lm in iter {
            frame.set(lm.id, lm.pos);
        }
        frame
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landmark_id_bounds() {
        assert!(LandmarkId::new(0).is_some());
        assert!(LandmarkId::new(20).is_some());
        assert!(LandmarkId::new(21).is_none());
    }

    #[test]
    fn from_triples_drops_bad_ids() {
        let frame = LandmarkFrame::from_triples([(0, 1, 2), (21, 5, 5), (255, 0, 0)]);
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.get(LandmarkId::WRIST), Some(Point::new(1, 2)));
    }

    #[test]
    fn repeated_id_keeps_last() {
        let frame = LandmarkFrame::from_triples([(4, 1, 1), (4, 9, 9)]);
        assert_eq!(frame.get(LandmarkId::THUMB_TIP), Some(Point::new(9, 9)));
    }

    #[test]
    fn iter_in_id_order() {
        let frame = LandmarkFrame::from_triples([(8, 0, 0), (0, 0, 0), (4, 0, 0)]);
        let ids: Vec<usize> = frame.iter().map(|l| l.id.index()).collect();
        assert_eq!(ids, vec![0, 4, 8]);
    }

    #[test]
    fn collect_from_landmarks() {
        let frame: LandmarkFrame = LandmarkFrame::from_triples([(12, 3, 4)])
            .iter()
            .collect();
        assert_eq!(frame.get(LandmarkId::MIDDLE_TIP), Some(Point::new(3, 4)));
        assert!(!frame.is_empty());
        assert!(LandmarkFrame::new().is_empty());
    }
}
