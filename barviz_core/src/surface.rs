// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::mark::{Mark, MarkId};

/// A named layer of marks.
///
/// Groups paint in ascending `z_index` order; ties keep insertion order. Marks inside a group
/// paint in insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkGroup {
    /// Layer name (emitted as the SVG `class` attribute).
    pub name: String,
    /// Rendering order hint.
    pub z_index: i32,
    /// Marks in paint order.
    pub marks: Vec<Mark>,
}

impl MarkGroup {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>, z_index: i32) -> Self {
        Self {
            name: name.into(),
            z_index,
            marks: Vec::new(),
        }
    }

    /// Appends marks and returns the group.
    pub fn with_marks(mut self, marks: impl IntoIterator<Item = Mark>) -> Self {
        self.marks.extend(marks);
        self
    }

    /// Appends a single mark.
    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }
}

/// A drawing surface that owns every group produced by one chart render.
///
/// Renderers are expected to [`clear`](Self::clear) the surface before drawing so repeated
/// renders replace content instead of accumulating it.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    view: Rect,
    groups: Vec<MarkGroup>,
}

impl Surface {
    /// Creates an empty surface with a `width` x `height` view box at the origin.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            view: Rect::new(0.0, 0.0, width, height),
            groups: Vec::new(),
        }
    }

    /// Returns the view box.
    pub fn view(&self) -> Rect {
        self.view
    }

    /// Replaces the view box.
    pub fn set_view(&mut self, view: Rect) {
        self.view = view;
    }

    /// Removes all groups. The view box is kept.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Appends a group.
    pub fn append(&mut self, group: MarkGroup) {
        self.groups.push(group);
    }

    /// Returns the groups in insertion order.
    pub fn groups(&self) -> &[MarkGroup] {
        &self.groups
    }

    /// Returns the first group with the given name.
    pub fn group(&self, name: &str) -> Option<&MarkGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Returns groups sorted into paint order.
    pub fn groups_in_paint_order(&self) -> Vec<&MarkGroup> {
        let mut out: Vec<&MarkGroup> = self.groups.iter().collect();
        // Stable sort keeps insertion order for equal z.
        out.sort_by_key(|g| g.z_index);
        out
    }

    /// Iterates all marks across groups, in insertion order.
    pub fn marks(&self) -> impl Iterator<Item = &Mark> {
        self.groups.iter().flat_map(|g| g.marks.iter())
    }

    /// Looks up a mark by id.
    pub fn mark(&self, id: MarkId) -> Option<&Mark> {
        self.marks().find(|m| m.id == id)
    }

    /// Returns the total number of marks.
    pub fn mark_count(&self) -> usize {
        self.groups.iter().map(|g| g.marks.len()).sum()
    }

    /// Returns `true` if the surface holds no marks.
    pub fn is_empty(&self) -> bool {
        self.mark_count() == 0
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::mark::{MarkPayload, RectMark};

    fn rect_mark(id: u64) -> Mark {
        Mark::new(
            MarkId::from_raw(id),
            MarkPayload::Rect(RectMark::new(Rect::new(0.0, 0.0, 1.0, 1.0))),
        )
    }

    #[test]
    fn paint_order_is_stable_for_equal_z() {
        let mut s = Surface::new(10.0, 10.0);
        s.append(MarkGroup::new("b", 5));
        s.append(MarkGroup::new("a", 0));
        s.append(MarkGroup::new("c", 5));

        let names: Vec<&str> = s
            .groups_in_paint_order()
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn clear_drops_marks_but_keeps_view() {
        let mut s = Surface::new(20.0, 10.0);
        s.append(MarkGroup::new("bars", 0).with_marks([rect_mark(1), rect_mark(2)]));
        assert_eq!(s.mark_count(), 2);
        assert!(s.mark(MarkId::from_raw(2)).is_some());

        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.view(), Rect::new(0.0, 0.0, 20.0, 10.0));
    }
}
