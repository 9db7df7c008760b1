use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const NO_NEXT_PAGE: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Paginate {
    pub current_page: i64,
    /// `-1` when `current_page` is the last page.
    pub next_page: i64,
    pub total_page: i64,
}

impl Paginate {
    /// `limit` must be positive.
    pub fn new(total_count: i64, limit: i64, page: i64) -> Self {
        let offset = (page - 1).saturating_mul(limit);
        let total_page = total_count / limit + i64::from(total_count % limit != 0);
        let next_page = match page.checked_add(1) {
            Some(next) if total_count.saturating_sub(offset) > limit => next,
            _ => NO_NEXT_PAGE,
        };

        Self {
            current_page: page,
            next_page,
            total_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_of_many() {
        assert_eq!(
            Paginate::new(100, 5, 1),
            Paginate {
                current_page: 1,
                next_page: 2,
                total_page: 20
            }
        );
    }

    #[test]
    fn last_page_has_no_next() {
        let page = Paginate::new(100, 5, 20);
        assert_eq!(page.next_page, NO_NEXT_PAGE);
        assert_eq!(page.total_page, 20);
    }

    #[test]
    fn partial_last_page_rounds_up() {
        let page = Paginate::new(11, 5, 2);
        assert_eq!(page.total_page, 3);
        assert_eq!(page.next_page, 3);

        let page = Paginate::new(11, 5, 3);
        assert_eq!(page.next_page, NO_NEXT_PAGE);
    }

    #[test]
    fn exact_fit_stops_at_boundary() {
        let page = Paginate::new(10, 5, 2);
        assert_eq!(page.total_page, 2);
        assert_eq!(page.next_page, NO_NEXT_PAGE);
    }

    #[test]
    fn empty_result() {
        let page = Paginate::new(0, 5, 1);
        assert_eq!(page.total_page, 0);
        assert_eq!(page.next_page, NO_NEXT_PAGE);
    }

    #[test]
    fn huge_limit_is_a_single_page() {
        let page = Paginate::new(100, i64::MAX, 1);
        assert_eq!(page.total_page, 1);
        assert_eq!(page.next_page, NO_NEXT_PAGE);
    }

    #[test]
    fn huge_page_is_past_the_end() {
        let page = Paginate::new(100, 5, i64::MAX);
        assert_eq!(page.current_page, i64::MAX);
        assert_eq!(page.next_page, NO_NEXT_PAGE);
        assert_eq!(page.total_page, 20);
    }
}
