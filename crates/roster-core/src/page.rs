//! Offset pagination.

use serde::{Deserialize, Serialize};

/// Which page to read, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub page:     u64,
  pub per_page: u64,
}

impl PageRequest {
  /// Both values are clamped to at least 1.
  pub fn new(page: u64, per_page: u64) -> Self {
    Self {
      page:     page.max(1),
      per_page: per_page.max(1),
    }
  }

  /// Number of rows to skip.
  pub fn offset(&self) -> u64 { (self.page - 1).saturating_mul(self.per_page) }
}

/// One page of records plus the counts needed to reach the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
  pub items:        Vec<T>,
  /// Total number of records across all pages.
  pub total:        u64,
  pub current_page: u64,
  pub per_page:     u64,
}

impl<T> Page<T> {
  pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
    Self {
      items,
      total,
      current_page: request.page,
      per_page: request.per_page,
    }
  }

  /// The last page number; an empty collection still has one (empty) page.
  pub fn last_page(&self) -> u64 { self.total.div_ceil(self.per_page).max(1) }

  /// 1-based position of the first item on this page.
  pub fn first_item(&self) -> Option<u64> {
    (!self.items.is_empty())
      .then(|| (self.current_page - 1) * self.per_page + 1)
  }

  /// 1-based position of the last item on this page.
  pub fn last_item(&self) -> Option<u64> {
    self.first_item().map(|first| first + self.items.len() as u64 - 1)
  }

  pub fn has_more(&self) -> bool { self.current_page < self.last_page() }

  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      items:        self.items.into_iter().map(f).collect(),
      total:        self.total,
      current_page: self.current_page,
      per_page:     self.per_page,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn request_clamps_to_first_page() {
    let req = PageRequest::new(0, 0);
    assert_eq!(req, PageRequest { page: 1, per_page: 1 });
    assert_eq!(req.offset(), 0);
    assert_eq!(PageRequest::new(3, 10).offset(), 20);
  }

  #[test]
  fn metadata_for_a_middle_page() {
    let page = Page::new((11..=20).collect(), 25, PageRequest::new(2, 10));
    assert_eq!(page.last_page(), 3);
    assert_eq!(page.first_item(), Some(11));
    assert_eq!(page.last_item(), Some(20));
    assert!(page.has_more());
  }

  #[test]
  fn metadata_for_the_last_partial_page() {
    let page = Page::new(vec![21, 22, 23, 24, 25], 25, PageRequest::new(3, 10));
    assert_eq!(page.first_item(), Some(21));
    assert_eq!(page.last_item(), Some(25));
    assert!(!page.has_more());
  }

  #[test]
  fn empty_collection_has_one_page() {
    let page: Page<i64> = Page::new(vec![], 0, PageRequest::new(1, 10));
    assert_eq!(page.last_page(), 1);
    assert_eq!(page.first_item(), None);
    assert_eq!(page.last_item(), None);
  }

  #[test]
  fn map_preserves_counts() {
    let page = Page::new(vec![1, 2], 12, PageRequest::new(2, 10)).map(|n| n * 10);
    assert_eq!(page.items, vec![10, 20]);
    assert_eq!(page.total, 12);
    assert_eq!(page.current_page, 2);
  }
}
