pub fn list_labels_endpoint(user_id: &str) -> String {
    format!("/gmail/v1/users/{user_id}/labels")
}

pub fn batch_modify_endpoint(user_id: &str) -> String {
    format!("/gmail/v1/users/{user_id}/messages/batchModify")
}
