//! Return-all accumulation over the paged listing endpoint.

use serde_json::Value;
use tracing::{debug, warn};

use nodes::{AuthenticatedRequest, HttpRequestOptions, RequestError};

/// Hard ceiling on page requests for a single return-all listing.
pub const MAX_PAGES: u32 = 101;

/// Fetches `page = 0, 1, 2, ...` while the response reports
/// `pageInfo.hasNextPage`, concatenating every page's `data` array in request
/// order. Stops after [`MAX_PAGES`] requests whatever the server claims.
pub async fn fetch_all_pages(
    http: &dyn AuthenticatedRequest,
    first_page: &HttpRequestOptions,
) -> Result<Vec<Value>, RequestError> {
    let mut all = Vec::new();
    let mut request = first_page.clone();

    for page in 0..MAX_PAGES {
        request.query.insert("page".to_owned(), page.to_string());
        let response = http.request(&request).await?;

        if let Some(data) = response.get("data").and_then(Value::as_array) {
            debug!("page {} returned {} posts", page, data.len());
            all.extend(data.iter().cloned());
        }

        if !has_next_page(&response) {
            return Ok(all);
        }
    }

    warn!(
        "stopped paging after {} pages although the API reports more",
        MAX_PAGES
    );
    Ok(all)
}

fn has_next_page(response: &Value) -> bool {
    response
        .pointer("/pageInfo/hasNextPage")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Single-page listing answers wrap the posts in `data`; unwrap when present.
pub fn unwrap_data(response: Value) -> Value {
    match response {
        Value::Object(mut map) if map.get("data").is_some_and(|d| !d.is_null()) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodes::mock::MockHttp;
    use serde_json::json;

    fn page(ids: &[u32], has_next: bool) -> Result<Value, RequestError> {
        Ok(json!({
            "data": ids.iter().map(|id| json!({ "id": id })).collect::<Vec<_>>(),
            "pageInfo": { "hasNextPage": has_next }
        }))
    }

    #[tokio::test]
    async fn concatenates_pages_until_last() {
        let mock = MockHttp::sequence(vec![
            page(&[1, 2], true),
            page(&[3], true),
            page(&[4, 5], true),
            page(&[6], true),
            page(&[7], false),
        ]);
        let first = HttpRequestOptions::get("/social-posts").with_query("limit", 50);

        let all = fetch_all_pages(&mock, &first).await.unwrap();

        let ids: Vec<u64> = all.iter().map(|v| v["id"].as_u64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);

        let pages: Vec<String> = mock.requests().iter().map(|r| r.query["page"].clone()).collect();
        assert_eq!(pages, vec!["0", "1", "2", "3", "4"]);
        assert!(mock.requests().iter().all(|r| r.query["limit"] == "50"));
    }

    #[tokio::test]
    async fn always_true_next_flag_stops_at_ceiling() {
        let mock = MockHttp::returning(json!({
            "data": [{ "id": 1 }],
            "pageInfo": { "hasNextPage": true }
        }));

        let all = fetch_all_pages(&mock, &HttpRequestOptions::get("/social-posts"))
            .await
            .unwrap();

        assert_eq!(mock.call_count(), 101);
        assert_eq!(all.len(), 101);
        assert_eq!(mock.requests().last().unwrap().query["page"], "100");
    }

    #[tokio::test]
    async fn missing_page_info_ends_after_first_page() {
        let mock = MockHttp::returning(json!({ "data": [{ "id": 1 }, { "id": 2 }] }));
        let all = fetch_all_pages(&mock, &HttpRequestOptions::get("/social-posts"))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn page_failure_propagates() {
        let mock = MockHttp::sequence(vec![
            page(&[1], true),
            Err(RequestError::Connection("connection refused".into())),
        ]);
        let err = fetch_all_pages(&mock, &HttpRequestOptions::get("/social-posts"))
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Connection(_)));
    }

    #[test]
    fn unwrap_data_only_touches_objects_with_data() {
        assert_eq!(unwrap_data(json!({ "data": [1, 2] })), json!([1, 2]));
        assert_eq!(unwrap_data(json!({ "items": [] })), json!({ "items": [] }));
        assert_eq!(unwrap_data(json!("ok")), json!("ok"));
    }
}
