use serde::{Deserialize, Serialize};

pub fn default_page() -> usize {
    1
}

pub fn default_per_page() -> usize {
    9
}

const MAX_PER_PAGE: usize = 100;

/// One-based page selection supplied by list endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    fn normalized(self) -> (usize, usize) {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        (page, per_page)
    }
}

/// A window over an already-ordered result set.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

impl<T> Page<T> {
    pub fn slice(items: Vec<T>, request: PageRequest) -> Self {
        let (page, per_page) = request.normalized();
        let total = items.len();
        let start = (page - 1).saturating_mul(per_page);

        let items = if start >= total {
            Vec::new()
        } else {
            items
                .into_iter()
                .skip(start)
                .take(per_page)
                .collect()
        };

        Self {
            items,
            total,
            page,
            per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: usize, per_page: usize) -> PageRequest {
        PageRequest { page, per_page }
    }

    #[test]
    fn slices_in_order() {
        let page = Page::slice((1..=10).collect(), request(2, 3));
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total, 10);
        assert_eq!(page.page, 2);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let page = Page::slice(vec![1, 2, 3], request(5, 3));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn zero_inputs_are_normalized() {
        let page = Page::slice(vec![1, 2, 3], request(0, 0));
        assert_eq!(page.items, vec![1]);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 1);
    }

    #[test]
    fn per_page_is_capped() {
        let page = Page::slice((1..=5).collect(), request(1, 10_000));
        assert_eq!(page.per_page, 100);
        assert_eq!(page.items.len(), 5);
    }
}
