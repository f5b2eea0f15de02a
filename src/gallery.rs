//! Gallery page state
//!
//! Holds the currently displayed page of update images and the pagination
//! driving it. Navigation methods report whether the page actually changed
//! so the caller knows when to fetch the next page; the new page's total
//! feeds back into the pagination when it lands.

use std::sync::Arc;

use crate::model::{ImageInfo, PageRequest, ProjectImages};
use crate::pagination::Pagination;
use crate::store::ErrorStore;
use crate::ClientError;

/// State of the update-image gallery screen
pub struct GalleryState {
    pagination: Pagination,
    images: ProjectImages,
    errors: Arc<ErrorStore>,
}

impl GalleryState {
    /// Empty gallery; the first page is fetched by the caller using
    /// [`GalleryState::page_request`]
    pub fn new(page_size: usize, errors: Arc<ErrorStore>) -> Self {
        Self {
            pagination: Pagination::new(0, page_size),
            images: ProjectImages::default(),
            errors,
        }
    }

    /// Install a fetched page and feed its total back into the pagination
    pub fn set_page_data(&mut self, page: ProjectImages) {
        self.pagination.set_total_items(page.total as usize);
        self.images = page;
    }

    /// Forward a failed gallery fetch to the error sink; the page on
    /// display stays as it was
    pub fn report_fetch_error(&self, message: impl Into<String>) {
        self.errors.report(&ClientError::Fetch(message.into()));
    }

    /// The images of the page on display
    pub fn images(&self) -> &[ImageInfo] {
        &self.images.data
    }

    /// Current paging state
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Query parameters for fetching the current page
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.pagination.current_page(),
            limit: self.pagination.page_size(),
        }
    }

    /// Jump to a page; true if the shown page changed and a refetch is due
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let before = self.pagination.current_page();
        self.pagination.go_to_page(page);
        self.pagination.current_page() != before
    }

    /// Advance one page; true if the shown page changed
    pub fn next_page(&mut self) -> bool {
        let before = self.pagination.current_page();
        self.pagination.next_page();
        self.pagination.current_page() != before
    }

    /// Go back one page; true if the shown page changed
    pub fn previous_page(&mut self) -> bool {
        let before = self.pagination.current_page();
        self.pagination.previous_page();
        self.pagination.current_page() != before
    }
}
