//! Arc-length polyline marching
//!
//! A [`PathCursor`] decomposes an ordered coordinate sequence into
//! segments with precomputed length and delta, then advances along it by
//! Euclidean distance. One advance may cross several short segments:
//! leftover distance carries over into the next segment, and every
//! boundary vertex crossed is reported in order, so the emitted points
//! are always a monotone arc-length prefix of the path.

use mapreel_core::{AnimationError, LngLat};

/// Outcome of one cursor advance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum March {
    /// The cursor moved to this point, somewhere inside a segment.
    Moved(LngLat),
    /// The path ran out. Leftover distance is discarded; the cursor sits
    /// on the final vertex from here on.
    Exhausted,
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    length: f64,
    d_lng: f64,
    d_lat: f64,
}

/// Persistent marching state over one path.
#[derive(Clone, Debug)]
pub struct PathCursor {
    coords: Vec<LngLat>,
    segments: Vec<Segment>,
    total_length: f64,
    seg_idx: usize,
    covered: f64,
    last: LngLat,
    exhausted: bool,
}

impl PathCursor {
    /// Build a cursor over `coords`. Fewer than two coordinates cannot be
    /// marched and fail fast.
    pub fn new(coords: &[LngLat]) -> Result<Self, AnimationError> {
        if coords.len() < 2 {
            return Err(AnimationError::DegeneratePath {
                points: coords.len(),
            });
        }

        let segments: Vec<Segment> = coords
            .windows(2)
            .map(|pair| {
                let d_lng = pair[1].lng - pair[0].lng;
                let d_lat = pair[1].lat - pair[0].lat;
                Segment {
                    length: (d_lng * d_lng + d_lat * d_lat).sqrt(),
                    d_lng,
                    d_lat,
                }
            })
            .collect();
        let total_length = segments.iter().map(|s| s.length).sum();

        Ok(Self {
            coords: coords.to_vec(),
            segments,
            total_length,
            seg_idx: 0,
            covered: 0.0,
            last: coords[0],
            exhausted: false,
        })
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    pub fn coords(&self) -> &[LngLat] {
        &self.coords
    }

    pub fn first_point(&self) -> LngLat {
        self.coords[0]
    }

    pub fn final_point(&self) -> LngLat {
        self.coords[self.coords.len() - 1]
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Advance the cursor by `distance`, calling `emit` for every segment
    /// boundary vertex crossed on the way (in path order, the landing
    /// point itself not included).
    ///
    /// Zero-length segments (duplicate consecutive coordinates) are
    /// consumed by the carry-over loop like any other crossing, and
    /// axis-aligned segments move along the live axis only, so no slope
    /// ratio is ever formed.
    pub fn advance(&mut self, distance: f64, mut emit: impl FnMut(LngLat)) -> March {
        if self.exhausted {
            return March::Exhausted;
        }

        let mut remaining = distance;
        let mut new_covered = self.covered + distance;

        while new_covered >= self.segments[self.seg_idx].length {
            let consumed = self.segments[self.seg_idx].length - self.covered;
            remaining -= consumed;
            new_covered -= self.segments[self.seg_idx].length;
            self.covered = 0.0;
            self.seg_idx += 1;

            if self.seg_idx >= self.segments.len() {
                self.exhausted = true;
                self.last = self.final_point();
                return March::Exhausted;
            }

            self.last = self.coords[self.seg_idx];
            emit(self.last);
        }

        self.covered = new_covered;

        let seg = &self.segments[self.seg_idx];
        let (step_lng, step_lat) = if seg.d_lng == 0.0 {
            (0.0, remaining.copysign(seg.d_lat))
        } else if seg.d_lat == 0.0 {
            (remaining.copysign(seg.d_lng), 0.0)
        } else {
            let k = (seg.d_lat / seg.d_lng).abs();
            let lng = (remaining * remaining / (k * k + 1.0)).sqrt();
            (lng.copysign(seg.d_lng), (k * lng).copysign(seg.d_lat))
        };

        self.last = LngLat::new(self.last.lng + step_lng, self.last.lat + step_lat);
        March::Moved(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(points: &[(f64, f64)]) -> Vec<LngLat> {
        points.iter().map(|&(lng, lat)| LngLat::new(lng, lat)).collect()
    }

    #[test]
    fn rejects_degenerate_paths() {
        assert!(matches!(
            PathCursor::new(&[]),
            Err(AnimationError::DegeneratePath { points: 0 })
        ));
        assert!(matches!(
            PathCursor::new(&[LngLat::new(1.0, 1.0)]),
            Err(AnimationError::DegeneratePath { points: 1 })
        ));
    }

    #[test]
    fn marches_within_one_segment() {
        let mut cursor = PathCursor::new(&path(&[(0.0, 0.0), (10.0, 0.0)])).unwrap();
        assert!((cursor.total_length() - 10.0).abs() < 1e-12);

        let result = cursor.advance(4.0, |_| panic!("no vertex crossed"));
        assert_eq!(result, March::Moved(LngLat::new(4.0, 0.0)));

        let result = cursor.advance(3.0, |_| panic!("no vertex crossed"));
        assert_eq!(result, March::Moved(LngLat::new(7.0, 0.0)));
    }

    #[test]
    fn carries_over_across_multiple_segments() {
        // three segments of length 1 each
        let mut cursor =
            PathCursor::new(&path(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (2.0, 1.0)])).unwrap();

        let mut crossed = Vec::new();
        let result = cursor.advance(2.5, |p| crossed.push(p));

        assert_eq!(crossed, path(&[(1.0, 0.0), (1.0, 1.0)]));
        assert_eq!(result, March::Moved(LngLat::new(1.5, 1.0)));
    }

    #[test]
    fn exactly_vertical_segments_do_not_divide_by_zero() {
        let mut cursor = PathCursor::new(&path(&[(3.0, 0.0), (3.0, -8.0)])).unwrap();

        let result = cursor.advance(2.0, |_| {});
        match result {
            March::Moved(p) => {
                assert!((p.lng - 3.0).abs() < 1e-12);
                assert!((p.lat + 2.0).abs() < 1e-12);
                assert!(p.lat.is_finite());
            }
            March::Exhausted => panic!("should not exhaust"),
        }
    }

    #[test]
    fn zero_length_segments_are_skipped() {
        let mut cursor =
            PathCursor::new(&path(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (2.0, 0.0)])).unwrap();

        let mut crossed = Vec::new();
        let result = cursor.advance(1.5, |p| crossed.push(p));

        // crosses the duplicate vertex twice in the record, lands mid last segment
        assert_eq!(result, March::Moved(LngLat::new(1.5, 0.0)));
        assert!(crossed.iter().all(|p| *p == LngLat::new(1.0, 0.0)));
    }

    #[test]
    fn exhaustion_discards_leftover_and_stays_exhausted() {
        let mut cursor = PathCursor::new(&path(&[(0.0, 0.0), (1.0, 0.0)])).unwrap();

        assert_eq!(cursor.advance(5.0, |_| {}), March::Exhausted);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.final_point(), LngLat::new(1.0, 0.0));

        // repeat advances are inert
        assert_eq!(cursor.advance(1.0, |_| panic!("must not emit")), March::Exhausted);
    }

    #[test]
    fn emitted_points_are_a_monotone_arc_length_prefix() {
        let coords = path(&[(0.0, 0.0), (0.5, 0.5), (1.5, 0.5), (1.5, 2.0), (0.0, 2.0)]);
        let mut cursor = PathCursor::new(&coords).unwrap();
        let total = cursor.total_length();

        let mut walked = vec![cursor.first_point()];
        loop {
            match cursor.advance(total / 7.3, |p| walked.push(p)) {
                March::Moved(p) => walked.push(p),
                March::Exhausted => {
                    walked.push(cursor.final_point());
                    break;
                }
            }
        }

        // arc length along emitted points never decreases and each emitted
        // vertex appears in original order
        let mut acc = 0.0;
        let mut prev = walked[0];
        for p in &walked[1..] {
            acc += prev.distance_to(*p);
            prev = *p;
        }
        assert!((acc - total).abs() < 1e-9);
        assert_eq!(*walked.last().unwrap(), coords[coords.len() - 1]);

        let mut vertex_iter = coords.iter();
        for p in &walked {
            if coords.contains(p) {
                // must appear in order
                assert!(vertex_iter.any(|v| v == p), "vertex out of order: {p:?}");
            }
        }
    }
}
