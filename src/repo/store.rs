use crate::models::error::Result;
use crate::models::object_record::ObjectRecord;

/// One page of a bucket listing
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    pub records: Vec<ObjectRecord>,
    /// Token for the following page, `None` on the last page
    pub next_token: Option<String>,
}

/// The two storage capabilities a scan needs: paged listing and delete-by-key.
pub trait ObjectStore {
    fn list_page(&self, bucket: &str, continuation_token: Option<&str>) -> Result<ListingPage>;

    fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;
}

/// Walk a bucket listing page by page.
///
/// Pages are fetched lazily, one request per `next()`. The iterator ends after
/// the last page or after the first error; it cannot be restarted.
pub fn list_pages<'a, S: ObjectStore + ?Sized>(store: &'a S, bucket: &'a str) -> Pages<'a, S> {
    Pages {
        store,
        bucket,
        next_token: None,
        finished: false,
    }
}

pub struct Pages<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    bucket: &'a str,
    next_token: Option<String>,
    finished: bool,
}

impl<S: ObjectStore + ?Sized> Iterator for Pages<'_, S> {
    type Item = Result<Vec<ObjectRecord>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.store.list_page(self.bucket, self.next_token.as_deref()) {
            Ok(page) => {
                self.next_token = page.next_token;
                if self.next_token.is_none() {
                    self.finished = true;
                }
                Some(Ok(page.records))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::models::error::TidyError;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// In-memory store serving pre-built pages, with injectable failures
    #[derive(Default)]
    pub struct MemoryStore {
        pages: Vec<Vec<ObjectRecord>>,
        fail_on_page: Option<usize>,
        failing_keys: HashSet<String>,
        pub list_calls: RefCell<usize>,
        pub deleted: RefCell<Vec<String>>,
    }

    impl MemoryStore {
        pub fn with_pages(pages: Vec<Vec<ObjectRecord>>) -> Self {
            Self {
                pages,
                ..Default::default()
            }
        }

        pub fn failing_page(mut self, index: usize) -> Self {
            self.fail_on_page = Some(index);
            self
        }

        pub fn failing_delete(mut self, key: &str) -> Self {
            self.failing_keys.insert(key.to_string());
            self
        }
    }

    impl ObjectStore for MemoryStore {
        fn list_page(&self, bucket: &str, continuation_token: Option<&str>) -> Result<ListingPage> {
            *self.list_calls.borrow_mut() += 1;

            let index = continuation_token
                .map(|t| t.parse::<usize>().unwrap())
                .unwrap_or(0);

            if self.fail_on_page == Some(index) {
                return Err(TidyError::ListObjects {
                    bucket: bucket.to_string(),
                    cause: "AccessDenied".to_string(),
                });
            }

            let records = self.pages.get(index).cloned().unwrap_or_default();
            let next_token = if index + 1 < self.pages.len() {
                Some((index + 1).to_string())
            } else {
                None
            };
            Ok(ListingPage {
                records,
                next_token,
            })
        }

        fn delete_object(&self, _bucket: &str, key: &str) -> Result<()> {
            if self.failing_keys.contains(key) {
                return Err(TidyError::DeleteObject {
                    key: key.to_string(),
                    cause: "AccessDenied".to_string(),
                });
            }
            self.deleted.borrow_mut().push(key.to_string());
            Ok(())
        }
    }
}
