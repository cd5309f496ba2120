/// A zero-based page of `items_per_page` items. Zero items per page means
/// "no paging": everything is returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    pub page: u64,
    pub items_per_page: u64,
}

impl Window {
    pub fn new(page: u64, items_per_page: u64) -> Self {
        Self {
            page,
            items_per_page,
        }
    }

    pub fn everything() -> Self {
        Self::default()
    }

    pub fn skip(&self) -> u64 {
        match self.limit() {
            Some(limit) => self.page.saturating_mul(limit),
            None => 0,
        }
    }

    pub fn limit(&self) -> Option<u64> {
        (self.items_per_page > 0).then_some(self.items_per_page)
    }

    /// `[skip, skip + limit)`, clamped to the input. Past the end is empty.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = usize::try_from(self.skip()).unwrap_or(usize::MAX);
        let iter = items.into_iter().skip(skip);
        match self.limit() {
            Some(limit) => iter
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .collect(),
            None => iter.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_items_per_page_returns_everything() {
        let window = Window::new(3, 0);
        assert_eq!(window.skip(), 0);
        assert_eq!(window.limit(), None);
        assert_eq!(window.slice((0..5).collect()), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn pages_are_zero_based() {
        assert_eq!(Window::new(0, 2).slice((0..5).collect()), vec![0, 1]);
        assert_eq!(Window::new(2, 2).slice((0..5).collect()), vec![4]);
    }

    #[test]
    fn slicing_past_the_end_is_empty() {
        assert!(Window::new(10, 2).slice((0..5).collect::<Vec<_>>()).is_empty());
        assert!(Window::new(u64::MAX, u64::MAX).slice(vec![1]).is_empty());
    }
}
