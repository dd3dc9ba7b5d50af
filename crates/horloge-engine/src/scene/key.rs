use super::ZIndex;

/// Stable sort key for draw items.
///
/// Field order matters for the derived `Ord`: `z` first (back to front), then
/// `order` (insertion order within one z layer).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_wins_over_insertion_order() {
        let early_top = SortKey::new(ZIndex(2), 0);
        let late_bottom = SortKey::new(ZIndex(1), 9);
        assert!(late_bottom < early_top);
    }

    #[test]
    fn insertion_order_breaks_ties() {
        assert!(SortKey::new(ZIndex(0), 1) < SortKey::new(ZIndex(0), 2));
    }

    #[test]
    fn above_saturates() {
        assert_eq!(ZIndex(3).above(), ZIndex(4));
        assert_eq!(ZIndex(i32::MAX).above(), ZIndex(i32::MAX));
    }
}
