/// Read query for a CMS collection.
///
/// Supports a single equality filter and an optional limit, which is all
/// the pages ever ask for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filter: Option<(String, String)>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only records whose `field` equals `value`
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            filter: Some((field.into(), value.into())),
            limit: None,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs in Directus syntax
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some((field, value)) = &self.filter {
            pairs.push((format!("filter[{}][_eq]", field), value.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        assert!(Query::new().to_pairs().is_empty());
    }

    #[test]
    fn test_eq_filter() {
        let query = Query::eq("slug", "spring-fair").limit(1);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("filter[slug][_eq]".to_string(), "spring-fair".to_string()),
                ("limit".to_string(), "1".to_string()),
            ]
        );
    }
}
