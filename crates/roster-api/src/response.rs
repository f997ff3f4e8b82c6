//! Response bodies shared by the handlers.

use roster_core::page::Page;
use serde::Serialize;

/// `{ "status": 200, "message": "OK", "data": ... }`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub status:  u16,
  pub message: &'static str,
  pub data:    T,
}

impl<T> Envelope<T> {
  pub fn ok(data: T) -> Self {
    Self {
      status: 200,
      message: "OK",
      data,
    }
  }
}

/// A page of records in the length-aware paginator layout clients of this
/// API already consume.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
  pub current_page:   u64,
  pub data:           Vec<T>,
  pub first_page_url: String,
  pub from:           Option<u64>,
  pub last_page:      u64,
  pub last_page_url:  String,
  pub next_page_url:  Option<String>,
  pub path:           String,
  pub per_page:       u64,
  pub prev_page_url:  Option<String>,
  pub to:             Option<u64>,
  pub total:          u64,
}

impl<T> Paginated<T> {
  /// `path` is the URL of the listing itself, without a query string.
  pub fn new(page: Page<T>, path: &str) -> Self {
    let url = |n: u64| format!("{path}?page={n}");
    let last_page = page.last_page();
    let current = page.current_page;

    Self {
      current_page:   current,
      first_page_url: url(1),
      from:           page.first_item(),
      last_page,
      last_page_url:  url(last_page),
      next_page_url:  page.has_more().then(|| url(current + 1)),
      path:           path.to_owned(),
      per_page:       page.per_page,
      prev_page_url:  (current > 1).then(|| url(current - 1)),
      to:             page.last_item(),
      total:          page.total,
      data:           page.items,
    }
  }
}

#[cfg(test)]
mod tests {
  use roster_core::page::PageRequest;

  use super::*;

  #[test]
  fn middle_page_links_both_ways() {
    let page = Page::new(vec![11, 12], 25, PageRequest::new(2, 10));
    let body = Paginated::new(page, "/api/people");

    assert_eq!(body.first_page_url, "/api/people?page=1");
    assert_eq!(body.last_page_url, "/api/people?page=3");
    assert_eq!(body.next_page_url.as_deref(), Some("/api/people?page=3"));
    assert_eq!(body.prev_page_url.as_deref(), Some("/api/people?page=1"));
    assert_eq!(body.path, "/api/people");
  }

  #[test]
  fn single_page_has_no_neighbours() {
    let page = Page::new(vec![1], 1, PageRequest::new(1, 10));
    let body = Paginated::new(page, "/people");

    assert_eq!(body.next_page_url, None);
    assert_eq!(body.prev_page_url, None);
    assert_eq!(body.last_page, 1);
  }

  #[test]
  fn envelope_serializes_status_message_data() {
    let json = serde_json::to_value(Envelope::ok("x")).unwrap();
    assert_eq!(json, serde_json::json!({ "status": 200, "message": "OK", "data": "x" }));
  }
}
