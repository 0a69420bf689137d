//! Query description
//!
//! Builder for read queries plus their PostgREST query-string encoding.

use serde_json::Value;
use std::cmp::Ordering;

/// A read query against one table or view
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    /// Column projection, `*` or a comma-separated list (embedded resources allowed)
    pub columns: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
    /// Restrict to exactly one record
    pub single: bool,
}

/// Row filter
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column = value`
    Eq { column: String, value: Value },
    /// Case-insensitive pattern match, `*` or `%` as wildcard
    ILike { column: String, pattern: String },
    /// Matches when any inner filter matches
    Any(Vec<Filter>),
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Ordering key
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

impl Query {
    /// Start a query on `table`, projecting every column
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
            single: false,
        }
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn ilike(mut self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.filters.push(Filter::ILike {
            column: column.into(),
            pattern: pattern.into(),
        });
        self
    }

    pub fn any(mut self, filters: Vec<Filter>) -> Self {
        self.filters.push(Filter::Any(filters));
        self
    }

    pub fn order(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    /// Encode as a PostgREST query string (without the leading `?`)
    pub fn to_query_string(&self) -> String {
        let mut pairs = vec![("select".to_string(), self.columns.clone())];

        for filter in &self.filters {
            match filter {
                Filter::Any(inner) => {
                    let parts: Vec<String> = inner.iter().map(Filter::to_nested).collect();
                    pairs.push(("or".to_string(), format!("({})", parts.join(","))));
                }
                Filter::Eq { column, .. } | Filter::ILike { column, .. } => {
                    pairs.push((column.clone(), filter.operator_expr()));
                }
            }
        }

        if let Some(order) = &self.order {
            pairs.push(("order".to_string(), order.to_param()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }

        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn ilike(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Filter::ILike {
            column: column.into(),
            pattern: pattern.into(),
        }
    }

    /// `op.value` form used as a top-level parameter value
    fn operator_expr(&self) -> String {
        match self {
            Filter::Eq { value: Value::Null, .. } => "is.null".to_string(),
            Filter::Eq { value, .. } => format!("eq.{}", literal(value)),
            Filter::ILike { pattern, .. } => format!("ilike.{}", pattern),
            Filter::Any(_) => self.to_nested(),
        }
    }

    /// `column.op.value` form used inside logical groups
    fn to_nested(&self) -> String {
        match self {
            Filter::Eq { column, .. } | Filter::ILike { column, .. } => {
                format!("{}.{}", column, self.operator_expr())
            }
            Filter::Any(inner) => {
                let parts: Vec<String> = inner.iter().map(Filter::to_nested).collect();
                format!("or({})", parts.join(","))
            }
        }
    }

    /// Evaluate against a JSON row
    pub fn matches(&self, row: &Value) -> bool {
        match self {
            Filter::Eq { column, value } => row.get(column).unwrap_or(&Value::Null) == value,
            Filter::ILike { column, pattern } => row
                .get(column)
                .and_then(Value::as_str)
                .map(|text| like_match(&pattern.to_lowercase(), &text.to_lowercase()))
                .unwrap_or(false),
            Filter::Any(inner) => inner.iter().any(|f| f.matches(row)),
        }
    }
}

impl Order {
    fn to_param(&self) -> String {
        let dir = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        format!("{}.{}", self.column, dir)
    }

    /// Compare two rows by this key.
    ///
    /// Null ranks above every value, as in Postgres: last when ascending,
    /// first when descending.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let left = a.get(&self.column).unwrap_or(&Value::Null);
        let right = b.get(&self.column).unwrap_or(&Value::Null);

        let ord = match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => compare_values(left, right),
        };
        match self.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => literal(a).cmp(&literal(b)),
    }
}

/// Glob-style match where `*` and `%` match any run of characters
fn like_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();

    let (mut pi, mut ti) = (0, 0);
    let mut star: Option<usize> = None;
    let mut mark = 0;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '*' || p[pi] == '%') {
            star = Some(pi);
            mark = ti;
            pi += 1;
        } else if pi < p.len() && p[pi] == t[ti] {
            pi += 1;
            ti += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            mark += 1;
            ti = mark;
        } else {
            return false;
        }
    }

    while pi < p.len() && (p[pi] == '*' || p[pi] == '%') {
        pi += 1;
    }
    pi == p.len()
}
