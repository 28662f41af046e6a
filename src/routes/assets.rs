use crate::asset::{Asset, ASSETS};
use axum::Json;

/// GET /api/assets
pub async fn list() -> Json<&'static [Asset]> {
    Json(&ASSETS[..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_registry() {
        let Json(assets) = list().await;
        let value = serde_json::to_value(assets).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
        assert_eq!(value[1]["symbol"], "BTC-USD");
        assert_eq!(value[0]["class"], "stock");
        assert!(value[0].get("band").is_none());
    }
}
