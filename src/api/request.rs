use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// 单次请求的描述：路径、方法、可选 JSON 体、附加请求头和查询参数
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub path: String,
    pub method: Method,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            path: path.into(),
            method,
            body: None,
            headers: Vec::new(),
            query: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// 序列化请求体，字段名以 serde 定义的 wire 名称为准
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::request_failed(None, format!("Failed to encode request: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// 追加查询参数，序列化为 null 的字段会被跳过
    pub fn query<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(params)
            .map_err(|e| ApiError::request_failed(None, format!("Failed to encode query: {}", e)))?;
        if let Value::Object(map) = value {
            for (key, v) in map {
                let rendered = match v {
                    Value::Null => continue,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                self.query.push((key, rendered));
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LeadFilter, LeadStatus};
    use serde_json::json;

    #[test]
    fn builders_set_method_and_path() {
        let req = ApiRequest::delete("/api/leads/1");
        assert_eq!(req.method, Method::DELETE);
        assert_eq!(req.path, "/api/leads/1");
        assert!(req.body.is_none());
    }

    #[test]
    fn query_skips_unset_filters() {
        let filter = LeadFilter {
            status: Some(LeadStatus::Hot),
            limit: Some(20),
            ..Default::default()
        };
        let req = ApiRequest::get("/api/leads/").query(&filter).unwrap();
        let mut query = req.query.clone();
        query.sort();
        assert_eq!(
            query,
            vec![
                ("limit".to_string(), "20".to_string()),
                ("status".to_string(), "hot".to_string()),
            ]
        );
    }

    #[test]
    fn json_body_and_headers_accumulate() {
        let req = ApiRequest::post("/x")
            .json(&json!({"a": 1}))
            .unwrap()
            .header("X-Trace", "abc");
        assert_eq!(req.body, Some(json!({"a": 1})));
        assert_eq!(req.headers, vec![("X-Trace".to_string(), "abc".to_string())]);
    }
}
