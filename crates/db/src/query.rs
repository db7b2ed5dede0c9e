//! Fragments shared by the dynamic list queries.

use gamesapi_core::ordering::OrderBy;
use gamesapi_core::search::{prefix_pattern, search_terms};
use sqlx::{Postgres, QueryBuilder};

/// Append `AND column ILIKE 'term%'` for every term in `search`.
pub(crate) fn push_prefix_search(
    qb: &mut QueryBuilder<'_, Postgres>,
    column: &str,
    search: Option<&str>,
) {
    let Some(search) = search else {
        return;
    };
    for term in search_terms(search) {
        qb.push(format!(" AND {column} ILIKE "))
            .push_bind(prefix_pattern(&term));
    }
}

/// Append `ORDER BY` for the validated keys followed by `tiebreak`.
///
/// `column_for` maps a whitelisted field name to its qualified column.
pub(crate) fn push_order_by(
    qb: &mut QueryBuilder<'_, Postgres>,
    ordering: &[OrderBy],
    column_for: fn(&str) -> &'static str,
    tiebreak: &str,
) {
    qb.push(" ORDER BY ");
    for order in ordering {
        qb.push(format!(
            "{} {}, ",
            column_for(order.field),
            order.direction.as_sql()
        ));
    }
    qb.push(tiebreak);
}

/// Append `LIMIT $n OFFSET $m`.
pub(crate) fn push_page(qb: &mut QueryBuilder<'_, Postgres>, limit: i64, offset: i64) {
    qb.push(" LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
}
