// List query parameters for the record store.
//
// `sort` takes comma-separated keys prefixed with `+`/`-`; `filter` is the
// store's small boolean DSL: `(field='value')` terms joined by `&&` / `||`,
// with `~` for "contains".

use std::fmt;

/// Default page size used by list endpoints.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Largest page the store will serve in one response.
pub const MAX_PER_PAGE: u32 = 500;

// ── Sort ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Ordered list of sort keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    keys: Vec<(String, Direction)>,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            keys: vec![(field.into(), Direction::Asc)],
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            keys: vec![(field.into(), Direction::Desc)],
        }
    }

    pub fn then_asc(mut self, field: impl Into<String>) -> Self {
        self.keys.push((field.into(), Direction::Asc));
        self
    }

    pub fn then_desc(mut self, field: impl Into<String>) -> Self {
        self.keys.push((field.into(), Direction::Desc));
        self
    }

    /// Parse the wire form (`"-created,+codigo"`, `"codigo"`).
    ///
    /// A key with no prefix sorts ascending. Empty segments are skipped.
    pub fn parse(raw: &str) -> Option<Self> {
        let keys: Vec<_> = raw
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|k| {
                if let Some(field) = k.strip_prefix('-') {
                    (field.to_owned(), Direction::Desc)
                } else {
                    (k.trim_start_matches('+').to_owned(), Direction::Asc)
                }
            })
            .collect();
        if keys.is_empty() { None } else { Some(Self { keys }) }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, dir)) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            let prefix = match dir {
                Direction::Asc => '+',
                Direction::Desc => '-',
            };
            write!(f, "{prefix}{field}")?;
        }
        Ok(())
    }
}

// ── Filter ──────────────────────────────────────────────────────────

/// Right-hand side of a filter comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for FilterValue {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
}

impl Op {
    fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Contains => "~",
        }
    }
}

/// Boolean filter expression in the store's DSL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Compare {
        field: String,
        op: Op,
        value: FilterValue,
    },
    And(Vec<Filter>),
    Or(Vec<Filter>),
    /// Pre-rendered expression, passed through untouched.
    Raw(String),
}

impl Filter {
    fn compare(field: impl Into<String>, op: Op, value: impl Into<FilterValue>) -> Self {
        Self::Compare {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::compare(field, Op::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::compare(field, Op::Ne, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::compare(field, Op::Gt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::compare(field, Op::Gte, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::compare(field, Op::Lt, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::compare(field, Op::Lte, value)
    }

    pub fn contains(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::compare(field, Op::Contains, value)
    }

    pub fn raw(expr: impl Into<String>) -> Self {
        Self::Raw(expr.into())
    }

    /// Conjunction, flattening nested `And`s.
    pub fn and(self, other: Filter) -> Self {
        match (self, other) {
            (Self::And(mut a), Self::And(b)) => {
                a.extend(b);
                Self::And(a)
            }
            (Self::And(mut a), b) => {
                a.push(b);
                Self::And(a)
            }
            (a, b) => Self::And(vec![a, b]),
        }
    }

    /// Disjunction, flattening nested `Or`s.
    pub fn or(self, other: Filter) -> Self {
        match (self, other) {
            (Self::Or(mut a), Self::Or(b)) => {
                a.extend(b);
                Self::Or(a)
            }
            (Self::Or(mut a), b) => {
                a.push(b);
                Self::Or(a)
            }
            (a, b) => Self::Or(vec![a, b]),
        }
    }

    fn write_group(f: &mut fmt::Formatter<'_>, parts: &[Filter], joiner: &str) -> fmt::Result {
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                f.write_str(joiner)?;
            }
            match part {
                Self::And(_) | Self::Or(_) => write!(f, "({part})")?,
                _ => write!(f, "{part}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare { field, op, value } => write!(f, "({field}{}{value})", op.symbol()),
            Self::And(parts) => Self::write_group(f, parts, " && "),
            Self::Or(parts) => Self::write_group(f, parts, " || "),
            Self::Raw(expr) => f.write_str(expr),
        }
    }
}

// ── ListQuery ───────────────────────────────────────────────────────

/// Parameters for a single list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub sort: Option<Sort>,
    pub filter: Option<Filter>,
    pub expand: Vec<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            filter: None,
            expand: Vec::new(),
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn expand(mut self, relation: impl Into<String>) -> Self {
        self.expand.push(relation.into());
        self
    }

    /// Render as query-string pairs.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("perPage", self.per_page.to_string()),
        ];
        if let Some(ref sort) = self.sort {
            params.push(("sort", sort.to_string()));
        }
        if let Some(ref filter) = self.filter {
            params.push(("filter", filter.to_string()));
        }
        if !self.expand.is_empty() {
            params.push(("expand", self.expand.join(",")));
        }
        params
    }
}
