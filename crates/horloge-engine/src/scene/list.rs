use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for one frame.
///
/// `push()` is O(1). Paint-order iteration reuses an internal index buffer, so
/// a warmed-up list does not allocate per frame.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_indices.clear();
        self.sorted_dirty = true;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { key: SortKey::new(z, order), cmd });
        self.sorted_dirty = true;
    }

    /// Iterates items back to front without cloning commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());
        let items = &self.items;
        self.sorted_indices.sort_by_key(|&i| items[i].key);
        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::{Color, Paint};

    fn radii(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Circle(c) => c.radius,
                DrawCmd::RoundedRect(_) => -1.0,
            })
            .collect()
    }

    fn dot(list: &mut DrawList, z: i32, radius: f32) {
        list.push_circle(ZIndex(z), Vec2::zero(), radius, Paint::solid(Color::transparent()), None);
    }

    #[test]
    fn paint_order_is_z_then_insertion() {
        let mut list = DrawList::new();
        dot(&mut list, 1, 1.0);
        dot(&mut list, 0, 2.0);
        dot(&mut list, 1, 3.0);
        dot(&mut list, 0, 4.0);
        assert_eq!(radii(&mut list), vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn push_after_iteration_resorts() {
        let mut list = DrawList::new();
        dot(&mut list, 5, 1.0);
        assert_eq!(radii(&mut list), vec![1.0]);
        dot(&mut list, 0, 2.0);
        assert_eq!(radii(&mut list), vec![2.0, 1.0]);
    }

    #[test]
    fn clear_resets_order_and_items() {
        let mut list = DrawList::new();
        dot(&mut list, 0, 1.0);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(radii(&mut list), Vec::<f32>::new());
        dot(&mut list, 0, 7.0);
        assert_eq!(list.items()[0].key.order, 0);
        assert_eq!(list.len(), 1);
    }
}
