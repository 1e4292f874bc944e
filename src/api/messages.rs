use crate::api::models::QueryFilter;

pub fn message_endpoint(user_id: &str, id: &str) -> String {
    format!("/gmail/v1/users/{user_id}/messages/{id}")
}

pub fn list_endpoint(user_id: &str) -> String {
    format!("/gmail/v1/users/{user_id}/messages")
}

pub fn get_query() -> Vec<(String, String)> {
    vec![("format".to_string(), "full".to_string())]
}

pub fn list_query(filter: &QueryFilter) -> Vec<(String, String)> {
    let mut params = vec![("maxResults".to_string(), filter.max_results.to_string())];

    let query = filter.query.trim();
    if !query.is_empty() {
        params.push(("q".to_string(), query.to_string()));
    }

    for label_id in &filter.label_ids {
        params.push(("labelIds".to_string(), label_id.clone()));
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_repeats_label_ids() {
        let filter = QueryFilter {
            query: "is:unread".to_string(),
            label_ids: vec!["Label_1".to_string(), "Label_2".to_string()],
            max_results: 3,
        };

        let params = list_query(&filter);
        assert_eq!(
            params,
            [
                ("maxResults".to_string(), "3".to_string()),
                ("q".to_string(), "is:unread".to_string()),
                ("labelIds".to_string(), "Label_1".to_string()),
                ("labelIds".to_string(), "Label_2".to_string()),
            ]
        );
    }

    #[test]
    fn blank_query_is_omitted() {
        let filter = QueryFilter {
            query: "  ".to_string(),
            label_ids: vec![],
            max_results: 10,
        };

        assert_eq!(
            list_query(&filter),
            [("maxResults".to_string(), "10".to_string())]
        );
    }
}
