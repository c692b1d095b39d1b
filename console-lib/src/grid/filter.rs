//! Free-text row filtering.

use crate::model::GridRow;

use super::Column;

/// Keeps rows where any searchable column's display text contains `query`,
/// ignoring case. Order is preserved. A blank query keeps every row.
pub fn filter_rows<'a, R: GridRow>(rows: &'a [R], query: &str, columns: &[Column<R>]) -> Vec<&'a R> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }

    rows.iter()
        .filter(|row| {
            columns
                .iter()
                .filter(|column| column.searchable)
                .any(|column| column.cell(row).to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    fn users() -> Vec<User> {
        let mut ada = User::new(1, "Ada", "Lovelace", "ada@example.com");
        ada.organization = Some("Analytical Engines".into());
        let grace = User::new(2, "Grace", "Hopper", "grace@navy.mil");
        vec![ada, grace]
    }

    #[test]
    fn test_blank_query_keeps_everything() {
        let rows = users();
        let columns = vec![Column::<User>::new("name", "Name")];
        assert_eq!(filter_rows(&rows, "   ", &columns).len(), 2);
    }

    #[test]
    fn test_matches_any_searchable_column() {
        let rows = users();
        let columns = vec![
            Column::<User>::new("name", "Name"),
            Column::new("organization", "Organization"),
        ];
        let hits = filter_rows(&rows, "ENGINES", &columns);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn test_skips_unsearchable_columns() {
        let rows = users();
        let columns = vec![
            Column::<User>::new("name", "Name"),
            Column::new("email", "Email").not_searchable(),
        ];
        assert!(filter_rows(&rows, "navy", &columns).is_empty());
    }
}
