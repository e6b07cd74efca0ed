use serde::Serialize;

pub trait Id {
    fn id(&self) -> i64;
}

/// One page of an id-ordered listing. Queries fetch `page_size + 1` rows so
/// the extra row tells whether another page exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<i64>,
}

impl<T: Id> Page<T> {
    pub fn new(mut rows: Vec<T>, page_size: i64) -> Self {
        let page_size = page_size.max(0) as usize;
        let has_more = rows.len() > page_size;
        rows.truncate(page_size);
        let next_cursor = if has_more {
            rows.last().map(Id::id)
        } else {
            None
        };
        Self {
            items: rows,
            next_cursor,
        }
    }
}
