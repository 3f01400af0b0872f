//! Generic list-view controller: search filter plus page-number pagination
//!
//! One instance per resource screen. The controller owns the record set
//! fetched from its `RecordSource`, the user-edited search term, and the
//! 1-based page number, and derives the exact slice of records to render.

use tracing::warn;

use crate::api::{ApiError, RecordSource};
use crate::models::Resource;

/// Records shown per page on every screen
pub const PAGE_SIZE: usize = 8;

/// Derived view of the current record set: the slice to render plus the
/// pagination figures driving the Prev/Next controls.
#[derive(Debug)]
pub struct PageView<'a, R> {
    /// Records on the effective page, at most `page_size` of them
    pub page_items: Vec<&'a R>,
    /// Always at least 1, even for an empty filtered set
    pub total_pages: usize,
    /// Number of records surviving the search filter
    pub filtered_count: usize,
    /// Effective page: the stored page, or 1 when the stored page fell
    /// beyond `total_pages`. The presentation layer reflects a correction
    /// back via `set_page`.
    pub page: usize,
}

impl<R> PageView<'_, R> {
    /// 0-based index of the first record on the page, for row numbering
    pub fn page_start(&self, page_size: usize) -> usize {
        (self.page - 1) * page_size
    }
}

pub struct ListView<R: Resource> {
    source: Box<dyn RecordSource<R> + Send + Sync>,
    records: Vec<R>,
    search: String,
    page: usize,
    page_size: usize,
    error: Option<String>,
}

impl<R: Resource> ListView<R> {
    pub fn new(source: Box<dyn RecordSource<R> + Send + Sync>) -> Self {
        Self {
            source,
            records: Vec::new(),
            search: String::new(),
            page: 1,
            page_size: PAGE_SIZE,
            error: None,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Replace the record set from the source. On failure the record set
    /// is emptied (stale rows are never shown against a failed state) and
    /// the failure becomes a user-visible message.
    pub async fn load(&mut self) {
        match self.source.list_all().await {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(e) => {
                warn!("failed to load {}: {}", R::NAME, e);
                self.records = Vec::new();
                self.error = Some(format!("Failed to load {}: {}", R::NAME, e));
            }
        }
    }

    /// Delete one record, then refetch the full set. The displayed list
    /// only changes after the server round-trip succeeds; a failed delete
    /// leaves the record set untouched. Returns whether the delete
    /// succeeded.
    pub async fn remove(&mut self, id: i64) -> bool {
        match self.source.delete(id).await {
            Ok(()) => {
                self.load().await;
                true
            }
            Err(e) => {
                warn!("failed to delete {} {}: {}", R::TITLE, id, e);
                self.error = Some(format!("Failed to delete {} {}: {}", R::TITLE, id, e));
                false
            }
        }
    }

    /// Store the term verbatim and jump back to page 1. Filtering is
    /// purely local; no network call happens here.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// Store any positive page number. Boundary checks belong to the
    /// presentation layer, which disables Prev/Next at the edges.
    pub fn set_page(&mut self, page: usize) {
        if page >= 1 {
            self.page = page;
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Pure computation of the filtered, paged view.
    ///
    /// An empty trimmed term matches everything in insertion order.
    /// Otherwise a record is kept when any haystack field, lowercased,
    /// contains the trimmed lowercased term (OR across fields). A stored
    /// page beyond the last computes as page 1 rather than clamping to
    /// the last page.
    pub fn view(&self) -> PageView<'_, R> {
        let term = self.search.trim().to_lowercase();

        let filtered: Vec<&R> = if term.is_empty() {
            self.records.iter().collect()
        } else {
            self.records
                .iter()
                .filter(|record| {
                    record
                        .search_haystack()
                        .iter()
                        .any(|field| field.to_lowercase().contains(&term))
                })
                .collect()
        };

        let filtered_count = filtered.len();
        let total_pages = ((filtered_count + self.page_size - 1) / self.page_size).max(1);
        let page = if self.page > total_pages { 1 } else { self.page };

        let start = (page - 1) * self.page_size;
        let page_items = filtered
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect();

        PageView {
            page_items,
            total_pages,
            filtered_count,
            page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Student;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    /// In-memory record source standing in for the REST API. Clones share
    /// state, so tests keep a handle to flip failure flags mid-test.
    #[derive(Clone)]
    struct FakeSource {
        records: Arc<Mutex<Vec<Student>>>,
        fail_list: Arc<AtomicBool>,
        fail_delete: Arc<AtomicBool>,
    }

    impl FakeSource {
        fn with_students(count: usize) -> Self {
            Self {
                records: Arc::new(Mutex::new((1..=count as i64).map(student).collect())),
                fail_list: Arc::new(AtomicBool::new(false)),
                fail_delete: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    #[async_trait]
    impl RecordSource<Student> for FakeSource {
        async fn list_all(&self) -> Result<Vec<Student>, ApiError> {
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(ApiError::Server {
                    status: 503,
                    body: "unavailable".to_string(),
                });
            }
            Ok(self.records.lock().unwrap().clone())
        }

        async fn get_one(&self, id: i64) -> Result<Student, ApiError> {
            self.records
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.student_id == Some(id))
                .cloned()
                .ok_or(ApiError::Server {
                    status: 404,
                    body: "not found".to_string(),
                })
        }

        async fn create(&self, record: &Student) -> Result<Student, ApiError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(record.clone())
        }

        async fn update(&self, _id: i64, record: &Student) -> Result<Student, ApiError> {
            Ok(record.clone())
        }

        async fn delete(&self, id: i64) -> Result<(), ApiError> {
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(ApiError::Server {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            self.records
                .lock()
                .unwrap()
                .retain(|s| s.student_id != Some(id));
            Ok(())
        }
    }

    fn student(i: i64) -> Student {
        Student {
            student_id: Some(i),
            student_number: Some(format!("N{:04}", i)),
            first_name: Some(format!("S{}", i)),
            last_name: Some("Tester".to_string()),
            email: Some(format!("s{}@example.edu", i)),
            ..Student::default()
        }
    }

    async fn loaded_view(count: usize) -> ListView<Student> {
        let mut list = ListView::new(Box::new(FakeSource::with_students(count)));
        list.load().await;
        list
    }

    fn first_names(view: &PageView<'_, Student>) -> Vec<String> {
        view.page_items
            .iter()
            .map(|s| s.first_name.clone().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn empty_term_matches_everything() {
        let list = loaded_view(10).await;
        let view = list.view();
        assert_eq!(view.filtered_count, 10);
        assert_eq!(view.total_pages, 2);
    }

    #[tokio::test]
    async fn pagination_scenario_ten_students() {
        let mut list = loaded_view(10).await;

        let view = list.view();
        assert_eq!(view.page, 1);
        assert_eq!(
            first_names(&view),
            vec!["S1", "S2", "S3", "S4", "S5", "S6", "S7", "S8"]
        );
        assert_eq!(view.total_pages, 2);

        list.set_page(2);
        let view = list.view();
        assert_eq!(first_names(&view), vec!["S9", "S10"]);
    }

    #[tokio::test]
    async fn search_scenario_s10() {
        let mut list = loaded_view(10).await;
        list.set_search_term("s10");

        let view = list.view();
        assert_eq!(view.filtered_count, 1);
        assert_eq!(view.total_pages, 1);
        assert_eq!(first_names(&view), vec!["S10"]);
    }

    #[tokio::test]
    async fn search_matches_any_field_not_all() {
        let mut list = loaded_view(10).await;

        // Matches only the email field; first/last name do not contain it
        list.set_search_term("s3@example");
        let view = list.view();
        assert_eq!(view.filtered_count, 1);
        assert_eq!(first_names(&view), vec!["S3"]);

        // A term absent from every configured field matches nothing
        list.set_search_term("zzz-nothing");
        assert_eq!(list.view().filtered_count, 0);
    }

    #[tokio::test]
    async fn term_is_trimmed_and_case_folded_only_at_compute_time() {
        let mut list = loaded_view(10).await;
        list.set_search_term("  S10  ");

        assert_eq!(list.search_term(), "  S10  ");
        assert_eq!(list.view().filtered_count, 1);
    }

    #[tokio::test]
    async fn total_pages_formula() {
        for (count, expected) in [(0, 1), (1, 1), (8, 1), (9, 2), (16, 2), (17, 3)] {
            let list = loaded_view(count).await;
            assert_eq!(list.view().total_pages, expected, "count={}", count);
        }
    }

    #[tokio::test]
    async fn full_pages_except_possibly_the_last() {
        let mut list = loaded_view(17).await;

        assert_eq!(list.view().page_items.len(), 8);
        list.set_page(2);
        assert_eq!(list.view().page_items.len(), 8);
        list.set_page(3);
        assert_eq!(list.view().page_items.len(), 1);
    }

    #[tokio::test]
    async fn changing_search_term_resets_page() {
        let mut list = loaded_view(20).await;
        list.set_page(3);
        assert_eq!(list.page(), 3);

        list.set_search_term("s");
        assert_eq!(list.page(), 1);
    }

    #[tokio::test]
    async fn out_of_range_page_computes_as_page_one() {
        let mut list = loaded_view(10).await;

        // Filtering shrinks the set under the stored page; the view resets
        // to page 1 (never clamps to the new last page) and the caller
        // writes the correction back through set_page.
        list.set_search_term("s1");
        list.set_page(5);

        let view = list.view();
        assert_eq!(list.page(), 5);
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 1);
        assert_eq!(first_names(&view), vec!["S1", "S10"]);
    }

    #[tokio::test]
    async fn set_page_ignores_zero() {
        let mut list = loaded_view(10).await;
        list.set_page(0);
        assert_eq!(list.page(), 1);
    }

    #[tokio::test]
    async fn remove_refetches_the_full_set() {
        let mut list = loaded_view(10).await;

        assert!(list.remove(5).await);
        assert_eq!(list.record_count(), 9);

        let view = list.view();
        assert!(!first_names(&view).contains(&"S5".to_string()));
        list.set_page(2);
        assert!(!first_names(&list.view()).contains(&"S5".to_string()));
    }

    #[tokio::test]
    async fn failed_delete_leaves_records_untouched() {
        let source = FakeSource::with_students(10);
        source.fail_delete.store(true, Ordering::SeqCst);

        let mut list = ListView::new(Box::new(source.clone()));
        list.load().await;

        assert!(!list.remove(5).await);
        assert_eq!(list.record_count(), 10);
        assert!(list.error().unwrap().contains("Failed to delete"));
    }

    #[tokio::test]
    async fn failed_load_empties_the_record_set() {
        let source = FakeSource::with_students(10);
        let mut list = ListView::new(Box::new(source.clone()));
        list.load().await;
        assert_eq!(list.record_count(), 10);

        source.fail_list.store(true, Ordering::SeqCst);
        list.load().await;

        assert_eq!(list.record_count(), 0);
        assert!(list.error().unwrap().contains("Failed to load"));

        let view = list.view();
        assert_eq!(view.filtered_count, 0);
        assert_eq!(view.total_pages, 1);
        assert!(view.page_items.is_empty());
    }

    #[tokio::test]
    async fn successful_load_clears_previous_error() {
        let source = FakeSource::with_students(3);
        source.fail_list.store(true, Ordering::SeqCst);

        let mut list = ListView::new(Box::new(source.clone()));
        list.load().await;
        assert!(list.error().is_some());

        source.fail_list.store(false, Ordering::SeqCst);
        list.load().await;
        assert!(list.error().is_none());
        assert_eq!(list.record_count(), 3);
    }

    #[tokio::test]
    async fn custom_page_size() {
        let mut list = ListView::new(Box::new(FakeSource::with_students(10))).with_page_size(4);
        list.load().await;

        let view = list.view();
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.page_items.len(), 4);
        list.set_page(3);
        assert_eq!(list.view().page_items.len(), 2);
    }
}
