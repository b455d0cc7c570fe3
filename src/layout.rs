//! Minimal flex-sizing layout: just enough for containers to turn a list
//! of children's sizing requests into concrete geometry.

use crate::geometry::Rect;
use crate::widget::SizeRequest;

/// Direction a container arranges its children along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Stack children top to bottom.
    Vertical,
    /// Stack children left to right.
    Horizontal,
}

/// A single segment's sizing constraint along the split axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// Fixed size in cells.
    Fixed(u16),
    /// Flexible: shares whatever space remains after fixed segments,
    /// evenly among all flexible segments.
    Flex,
}

impl Constraint {
    /// Build a constraint from a widget's sizing request along `direction`.
    pub fn from_request(request: SizeRequest, direction: Direction) -> Self {
        let fixed = match direction {
            Direction::Vertical => request.fixed_h,
            Direction::Horizontal => request.fixed_w,
        };
        if fixed == 0 {
            Constraint::Flex
        } else {
            Constraint::Fixed(fixed)
        }
    }
}

/// Split `area` along `direction` into one rect per constraint. Tolerates
/// zero or negative available space by clamping every size to zero rather
/// than panicking.
pub fn split(area: Rect, direction: Direction, constraints: &[Constraint]) -> Vec<Rect> {
    if constraints.is_empty() {
        return Vec::new();
    }

    let total = match direction {
        Direction::Vertical => area.size.height,
        Direction::Horizontal => area.size.width,
    };

    let sizes = solve(total, constraints);

    let mut results = Vec::with_capacity(constraints.len());
    let mut offset: u16 = 0;
    for &size in &sizes {
        let rect = match direction {
            Direction::Vertical => Rect::new(
                area.position.x,
                area.position.y.saturating_add(offset),
                area.size.width,
                size,
            ),
            Direction::Horizontal => Rect::new(
                area.position.x.saturating_add(offset),
                area.position.y,
                size,
                area.size.height,
            ),
        };
        results.push(rect);
        offset = offset.saturating_add(size);
    }
    results
}

fn solve(total: u16, constraints: &[Constraint]) -> Vec<u16> {
    let mut sizes = vec![0u16; constraints.len()];
    let mut remaining = total;

    for (i, c) in constraints.iter().enumerate() {
        if let Constraint::Fixed(s) = c {
            let s = (*s).min(remaining);
            sizes[i] = s;
            remaining = remaining.saturating_sub(s);
        }
    }

    let flex_count = constraints.iter().filter(|c| matches!(c, Constraint::Flex)).count();
    if flex_count > 0 {
        let each = remaining / flex_count as u16;
        let mut extra = remaining % flex_count as u16;
        for (i, c) in constraints.iter().enumerate() {
            if matches!(c, Constraint::Flex) {
                let bonus = if extra > 0 {
                    extra -= 1;
                    1
                } else {
                    0
                };
                sizes[i] = each + bonus;
            }
        }
    }

    sizes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_split_fixed() {
        let area = Rect::new(0, 0, 80, 24);
        let rects = split(area, Direction::Vertical, &[Constraint::Fixed(3), Constraint::Fixed(5)]);
        assert_eq!(rects[0], Rect::new(0, 0, 80, 3));
        assert_eq!(rects[1], Rect::new(0, 3, 80, 5));
    }

    #[test]
    fn horizontal_split_fixed() {
        let area = Rect::new(0, 0, 80, 24);
        let rects = split(area, Direction::Horizontal, &[Constraint::Fixed(20), Constraint::Fixed(30)]);
        assert_eq!(rects[0], Rect::new(0, 0, 20, 24));
        assert_eq!(rects[1], Rect::new(20, 0, 30, 24));
    }

    #[test]
    fn fixed_plus_flex_fills_remainder() {
        let area = Rect::new(0, 0, 80, 24);
        let rects = split(area, Direction::Vertical, &[Constraint::Fixed(3), Constraint::Flex]);
        assert_eq!(rects[0], Rect::new(0, 0, 80, 3));
        assert_eq!(rects[1], Rect::new(0, 3, 80, 21));
    }

    #[test]
    fn multiple_flex_distribute_evenly_with_remainder() {
        let area = Rect::new(0, 0, 80, 25);
        let rects = split(area, Direction::Vertical, &[Constraint::Flex, Constraint::Flex, Constraint::Flex]);
        let heights: Vec<u16> = rects.iter().map(|r| r.size.height).collect();
        assert_eq!(heights.iter().sum::<u16>(), 25);
        assert!(heights.iter().all(|&h| h == 8 || h == 9));
    }

    #[test]
    fn fixed_larger_than_area_clamps() {
        let area = Rect::new(0, 0, 80, 5);
        let rects = split(area, Direction::Vertical, &[Constraint::Fixed(20), Constraint::Flex]);
        assert_eq!(rects[0].size.height, 5);
        assert_eq!(rects[1].size.height, 0);
    }

    #[test]
    fn zero_area_never_panics() {
        let area = Rect::new(0, 0, 0, 0);
        let rects = split(area, Direction::Vertical, &[Constraint::Fixed(3), Constraint::Flex]);
        assert_eq!(rects[0].size.height, 0);
        assert_eq!(rects[1].size.height, 0);
    }

    #[test]
    fn empty_constraints_returns_empty() {
        let area = Rect::new(0, 0, 80, 24);
        assert!(split(area, Direction::Vertical, &[]).is_empty());
    }

    #[test]
    fn offset_area_split() {
        let area = Rect::new(5, 10, 40, 20);
        let rects = split(area, Direction::Vertical, &[Constraint::Fixed(5), Constraint::Flex]);
        assert_eq!(rects[0], Rect::new(5, 10, 40, 5));
        assert_eq!(rects[1], Rect::new(5, 15, 40, 15));
    }

    #[test]
    fn constraint_from_request() {
        let fixed = SizeRequest { fixed_w: 10, fixed_h: 0 };
        let flexible = SizeRequest { fixed_w: 0, fixed_h: 0 };
        assert_eq!(Constraint::from_request(fixed, Direction::Horizontal), Constraint::Fixed(10));
        assert_eq!(Constraint::from_request(fixed, Direction::Vertical), Constraint::Flex);
        assert_eq!(Constraint::from_request(flexible, Direction::Horizontal), Constraint::Flex);
    }
}
