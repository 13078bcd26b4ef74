//! Filtered, paginated listings.
//!
//! A listing counts the filtered rows, resolves the requested page against
//! that count and then loads only that page. Page numbers are 1-based; an
//! unparsable or out-of-range page is `NotFound`. An empty table still has one
//! (empty) page.

use fleet_db::{
    db::{connection::DbConnection, query},
    model::{car::CarWithManufacturer, driver::Driver, manufacturer::Manufacturer},
};
use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::{
    error::{ServiceError, ServiceResult},
    form::search::{
        CarSearchForm, DriverSearchForm, ManufacturerSearchForm, SearchField, SearchForm,
        SearchFormContext,
    },
};

/// Page selector as given by the `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    Number(u32),
    Last,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::Number(1)
    }
}

impl PageRequest {
    /// ## Summary
    /// Parses the `page` parameter. Absent means the first page.
    ///
    /// ## Errors
    /// Returns `NotFound` for anything but a positive integer or `last`.
    pub fn parse(raw: Option<&str>) -> ServiceResult<Self> {
        let Some(raw) = raw else {
            return Ok(Self::default());
        };
        if raw == "last" {
            return Ok(Self::Last);
        }
        match raw.parse::<u32>() {
            Ok(number) if number >= 1 => Ok(Self::Number(number)),
            _ => Err(ServiceError::NotFound(
                "That page number is not an integer".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub count: i64,
    pub per_page: u32,
}

impl Paginator {
    /// ## Summary
    /// Creates a paginator over `count` rows.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` if `per_page` is zero.
    pub fn new(count: i64, per_page: u32) -> ServiceResult<Self> {
        if per_page == 0 {
            return Err(ServiceError::InvalidConfiguration(
                "paginate_by must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            count: count.max(0),
            per_page,
        })
    }

    #[must_use]
    pub fn num_pages(&self) -> u32 {
        let per_page = i64::from(self.per_page);
        let pages = (self.count + per_page - 1) / per_page;
        u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
    }

    /// ## Summary
    /// Resolves a page request against the row count.
    ///
    /// ## Errors
    /// Returns `NotFound` if the page lies past the last page.
    pub fn page(&self, request: PageRequest) -> ServiceResult<PageObj> {
        let num_pages = self.num_pages();
        let number = match request {
            PageRequest::Last => num_pages,
            PageRequest::Number(number) if number <= num_pages => number,
            PageRequest::Number(_) => {
                return Err(ServiceError::NotFound(
                    "That page contains no results".to_string(),
                ));
            }
        };

        Ok(PageObj {
            number,
            num_pages,
            count: self.count,
            per_page: self.per_page,
            has_next: number < num_pages,
            has_previous: number > 1,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageObj {
    pub number: u32,
    pub num_pages: u32,
    pub count: i64,
    #[serde(skip)]
    per_page: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageObj {
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.number - 1) * i64::from(self.per_page)
    }

    #[must_use]
    pub fn has_other_pages(&self) -> bool {
        self.has_next || self.has_previous
    }
}

/// A row type that can be listed; `LIST_KEY` names the list in the context.
pub trait Listed: Serialize {
    const LIST_KEY: &'static str;
}

impl Listed for Manufacturer {
    const LIST_KEY: &'static str = "manufacturer_list";
}

impl Listed for CarWithManufacturer {
    const LIST_KEY: &'static str = "car_list";
}

impl Listed for Driver {
    const LIST_KEY: &'static str = "driver_list";
}

#[derive(Debug, Clone)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub page: PageObj,
    pub search_form: SearchFormContext,
}

impl<T> ListPage<T> {
    #[must_use]
    pub fn is_paginated(&self) -> bool {
        self.page.has_other_pages()
    }
}

impl<T: Listed> Serialize for ListPage<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ListPage", 4)?;
        state.serialize_field(T::LIST_KEY, &self.items)?;
        state.serialize_field("search_form", &self.search_form)?;
        state.serialize_field("is_paginated", &self.is_paginated())?;
        state.serialize_field("page_obj", &self.page)?;
        state.end()
    }
}

fn resolve_page<F: SearchField>(
    form: &SearchForm<F>,
    count: i64,
    request: PageRequest,
    per_page: u32,
) -> ServiceResult<PageObj> {
    let page = Paginator::new(count, per_page)?.page(request)?;
    tracing::debug!(
        form = F::FORM,
        count,
        page = page.number,
        num_pages = page.num_pages,
        "Resolved listing page"
    );
    Ok(page)
}

/// ## Summary
/// Lists manufacturers, narrowed by the search form's `name`.
///
/// ## Errors
/// Returns `NotFound` for an out-of-range page, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn manufacturers(
    conn: &mut DbConnection<'_>,
    form: &ManufacturerSearchForm,
    request: PageRequest,
    per_page: u32,
) -> ServiceResult<ListPage<Manufacturer>> {
    let filter = form.filter_value();
    let count = query::manufacturer::count(conn, filter.as_deref()).await?;
    let page = resolve_page(form, count, request, per_page)?;
    let items =
        query::manufacturer::list(conn, filter.as_deref(), page.limit(), page.offset()).await?;

    Ok(ListPage {
        items,
        page,
        search_form: form.context(),
    })
}

/// ## Summary
/// Lists cars with their manufacturers, narrowed by the search form's `model`.
///
/// ## Errors
/// Returns `NotFound` for an out-of-range page, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn cars(
    conn: &mut DbConnection<'_>,
    form: &CarSearchForm,
    request: PageRequest,
    per_page: u32,
) -> ServiceResult<ListPage<CarWithManufacturer>> {
    let filter = form.filter_value();
    let count = query::car::count(conn, filter.as_deref()).await?;
    let page = resolve_page(form, count, request, per_page)?;
    let items = query::car::list(conn, filter.as_deref(), page.limit(), page.offset()).await?;

    Ok(ListPage {
        items,
        page,
        search_form: form.context(),
    })
}

/// ## Summary
/// Lists drivers, narrowed by the search form's `username`.
///
/// ## Errors
/// Returns `NotFound` for an out-of-range page, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn drivers(
    conn: &mut DbConnection<'_>,
    form: &DriverSearchForm,
    request: PageRequest,
    per_page: u32,
) -> ServiceResult<ListPage<Driver>> {
    let filter = form.filter_value();
    let count = query::driver::count(conn, filter.as_deref()).await?;
    let page = resolve_page(form, count, request, per_page)?;
    let items = query::driver::list(conn, filter.as_deref(), page.limit(), page.offset()).await?;

    Ok(ListPage {
        items,
        page,
        search_form: form.context(),
    })
}
