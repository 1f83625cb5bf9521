//! Query builder for the table REST API
//!
//! Conditions are collected as `(column, "op.value")` pairs and handed to
//! reqwest as URL query parameters. Multiple conditions are ANDed by the
//! backend; `ilike_any` adds a single OR group.

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// Query parameters for one table request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuery {
    select: Option<String>,
    conditions: Vec<(String, String)>,
    order: Vec<String>,
    limit: Option<u32>,
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select specific columns (defaults to `*`)
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.select = Some(columns.join(","));
        self
    }

    /// `column = value`
    pub fn eq(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.conditions
            .push((column.to_string(), format!("eq.{}", value)));
        self
    }

    /// `column >= value`
    pub fn gte(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.conditions
            .push((column.to_string(), format!("gte.{}", value)));
        self
    }

    /// `column <= value`
    pub fn lte(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.conditions
            .push((column.to_string(), format!("lte.{}", value)));
        self
    }

    /// Case-insensitive substring match against any of `columns`
    pub fn ilike_any(mut self, columns: &[&str], search: &str) -> Self {
        let pattern = quote_value(&format!("*{}*", search));
        let group: Vec<String> = columns
            .iter()
            .map(|column| format!("{}.ilike.{}", column, pattern))
            .collect();
        self.conditions
            .push(("or".to_string(), format!("({})", group.join(","))));
        self
    }

    /// Append a sort key
    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.order.push(format!("{}.{}", column, order.as_str()));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether the query narrows the rows at all (updates and deletes
    /// without a filter are refused by the table client)
    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// Build the query pairs for a read
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![(
            "select".to_string(),
            self.select.clone().unwrap_or_else(|| "*".to_string()),
        )];
        pairs.extend(self.conditions.iter().cloned());
        if !self.order.is_empty() {
            pairs.push(("order".to_string(), self.order.join(",")));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }

    /// Build the query pairs for a write (filters plus returned columns)
    pub fn to_filter_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.conditions.clone();
        if let Some(select) = &self.select {
            pairs.push(("select".to_string(), select.clone()));
        }
        pairs
    }
}

/// Values inside an OR group must be double-quoted when they contain
/// reserved characters.
fn quote_value(value: &str) -> String {
    if value.contains([',', '(', ')', '.', ':', '"', '\\']) {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escaped)
    } else {
        value.to_string()
    }
}
