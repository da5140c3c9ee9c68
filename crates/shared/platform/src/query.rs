//! Query shape understood by the hosted record store: table, equality and
//! membership filters, an optional foreign-key embed, ordering and limit.

use std::fmt::Display;

/// Select / mutation target against one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: String,
    columns: String,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<usize>,
}

impl Query {
    /// Start a query selecting every column of `table`.
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    /// Embed columns of a related table through a foreign key, exposed
    /// under `alias` in each returned row.
    pub fn embed(mut self, alias: &str, table: &str, foreign_key: &str, columns: &str) -> Self {
        self.columns
            .push_str(&format!(",{}:{}!{}({})", alias, table, foreign_key, columns));
        self
    }

    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value)));
        self
    }

    pub fn in_list<S: AsRef<str>>(mut self, column: &str, values: &[S]) -> Self {
        let quoted: Vec<String> = values
            .iter()
            .map(|v| format!("\"{}\"", v.as_ref().replace('"', "\\\"")))
            .collect();
        self.filters
            .push((column.to_string(), format!("in.({})", quoted.join(","))));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order = Some(format!("{}.{}", column, direction));
        self
    }

    /// Newest rows first
    pub fn newest_first(self) -> Self {
        self.order("created_at", false)
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Query-string parameters for a read.
    pub fn select_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.columns.clone())];
        params.extend(self.filters.iter().cloned());
        if let Some(order) = &self.order {
            params.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    /// Query-string parameters selecting the rows a mutation applies to.
    pub fn filter_params(&self) -> Vec<(String, String)> {
        self.filters.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_joined_select_renders_embed_and_order() {
        let query = Query::from("ads")
            .embed("seller", "users", "ads_seller_id_fkey", "full_name,email")
            .eq("status", "active")
            .newest_first();

        let params = query.select_params();
        assert_eq!(
            param(&params, "select"),
            Some("*,seller:users!ads_seller_id_fkey(full_name,email)")
        );
        assert_eq!(param(&params, "status"), Some("eq.active"));
        assert_eq!(param(&params, "order"), Some("created_at.desc"));
        assert_eq!(param(&params, "limit"), None);
    }

    #[test]
    fn test_in_list_quotes_values() {
        let query = Query::from("ad_views")
            .select("id")
            .in_list("ad_id", &["a", "b"]);

        assert_eq!(
            param(&query.select_params(), "ad_id"),
            Some("in.(\"a\",\"b\")")
        );
    }

    #[test]
    fn test_filter_params_exclude_select_and_order() {
        let query = Query::from("ads")
            .eq("id", "ad-1")
            .eq("seller_id", "u-1")
            .newest_first()
            .limit(1);

        assert_eq!(
            query.filter_params(),
            vec![
                ("id".to_string(), "eq.ad-1".to_string()),
                ("seller_id".to_string(), "eq.u-1".to_string()),
            ]
        );
    }
}
