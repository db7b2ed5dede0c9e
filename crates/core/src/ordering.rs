//! `?ordering=` parameter parsing.
//!
//! The parameter is a comma-separated list of field names, each optionally
//! prefixed with `-` for descending order. Only whitelisted fields are kept;
//! anything else is silently dropped.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// A single validated sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: &'static str,
    pub direction: Direction,
}

impl OrderBy {
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub const fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }
}

/// Parse `param` against the `allowed` field names.
pub fn parse_ordering(param: Option<&str>, allowed: &[&'static str]) -> Vec<OrderBy> {
    let Some(param) = param else {
        return Vec::new();
    };

    let mut out: Vec<OrderBy> = Vec::new();
    for raw in param.split(',') {
        let raw = raw.trim();
        let (name, direction) = match raw.strip_prefix('-') {
            Some(rest) => (rest, Direction::Desc),
            None => (raw, Direction::Asc),
        };
        let Some(field) = allowed.iter().copied().find(|f| *f == name) else {
            continue;
        };
        if out.iter().any(|o| o.field == field) {
            continue;
        }
        out.push(OrderBy { field, direction });
    }
    out
}

/// Like [`parse_ordering`] but falls back to `default` when nothing valid
/// was requested.
pub fn resolve_ordering(
    param: Option<&str>,
    allowed: &[&'static str],
    default: &[OrderBy],
) -> Vec<OrderBy> {
    let parsed = parse_ordering(param, allowed);
    if parsed.is_empty() {
        default.to_vec()
    } else {
        parsed
    }
}
