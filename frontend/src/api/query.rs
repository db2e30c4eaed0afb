use chrono::{DateTime, SecondsFormat, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Display;

const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'*')
    .remove(b',');

/// Row filter for a table request, rendered as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    columns: Option<String>,
    filters: Vec<(String, String)>,
    order: Vec<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.columns = Some(columns.to_string());
        self
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "eq", value)
    }

    pub fn lt(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "lt", value)
    }

    pub fn gt(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "gt", value)
    }

    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "gte", value)
    }

    pub fn lte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "lte", value)
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order.push(format!("{}.{}", column, direction));
        self
    }

    fn filter(mut self, column: &str, operator: &str, value: impl Display) -> Self {
        self.filters
            .push((column.to_string(), format!("{}.{}", operator, value)));
        self
    }

    /// Query string for a read. Writes pass `with_select = false` so the
    /// filter targets rows without a column projection.
    pub fn to_query_string(&self, with_select: bool) -> String {
        let mut params = Vec::new();
        if with_select {
            let columns = self.columns.as_deref().unwrap_or("*");
            params.push(format!("select={}", encode(columns)));
        }
        for (column, condition) in &self.filters {
            params.push(format!("{}={}", encode(column), encode(condition)));
        }
        if !self.order.is_empty() {
            params.push(format!("order={}", encode(&self.order.join(","))));
        }
        params.join("&")
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Timestamp literal used in range filters.
pub fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_query_selects_everything() {
        assert_eq!(Query::new().to_query_string(true), "select=*");
        assert_eq!(Query::new().to_query_string(false), "");
    }

    #[test]
    fn filters_and_order_render_in_call_order() {
        let query = Query::new()
            .eq("userId", "u1")
            .eq("status", "active")
            .order("endDate", true);
        assert_eq!(
            query.to_query_string(true),
            "select=*&userId=eq.u1&status=eq.active&order=endDate.asc"
        );
    }

    #[test]
    fn timestamps_are_percent_encoded() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 0).unwrap();
        assert_eq!(timestamp(at), "2025-01-02T09:30:00.000Z");
        let query = Query::new().lt("startDate", timestamp(at));
        assert_eq!(
            query.to_query_string(false),
            "startDate=lt.2025-01-02T09%3A30%3A00.000Z"
        );
    }

    #[test]
    fn projection_keeps_column_list_readable() {
        let query = Query::new()
            .select("discountPrice,paymentStatus")
            .order("isPrimary", false);
        assert_eq!(
            query.to_query_string(true),
            "select=discountPrice,paymentStatus&order=isPrimary.desc"
        );
    }

    #[test]
    fn filter_values_with_reserved_characters_are_escaped() {
        let query = Query::new().eq("email", "ana+test@example.pt");
        assert_eq!(
            query.to_query_string(false),
            "email=eq.ana%2Btest%40example.pt"
        );
    }
}
