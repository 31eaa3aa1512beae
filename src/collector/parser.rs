//! Coordinator JMX JSON 응답 파서
//!
//! `/v1/jmx/mbean/<name>` 응답을 파싱하여 내부 데이터 구조로 변환합니다.
//! 최상위 구조(`attributes`)는 엄격하게, 속성 값의 타입은 관대하게 다룹니다.

use serde::Deserialize;
use serde_json::Value;

use crate::error::CollectorError;

/// Collector 작업 결과 타입
pub type CollectResult<T> = Result<T, CollectorError>;

/// 하나의 bean 조회 결과
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedMetric {
    /// 구현 클래스 이름 (응답에 없으면 빈 문자열)
    pub class_name: String,
    /// JMX ObjectName
    pub object_name: Option<String>,
    /// 디코딩 순서를 유지한 속성 목록
    pub attributes: Vec<Attribute>,
}

/// 개별 속성
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// 속성 이름
    pub name: String,
    /// 선언된 Java 타입 (예: "long")
    pub type_name: Option<String>,
    /// 속성 값
    pub value: AttributeValue,
}

/// 속성 값
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// 숫자
    Number(f64),
    /// 불리언
    Boolean(bool),
    /// 문자열
    Text(String),
    /// Null 또는 값 없음
    Null,
    /// 배열/객체 (CompositeData 등)
    Composite(Value),
}

impl AttributeValue {
    /// 로그용 값 종류 이름
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Number(_) => "number",
            AttributeValue::Boolean(_) => "boolean",
            AttributeValue::Text(_) => "string",
            AttributeValue::Null => "null",
            AttributeValue::Composite(_) => "composite",
        }
    }
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AttributeValue::Null,
            Value::Bool(b) => AttributeValue::Boolean(b),
            // serde_json without arbitrary_precision always yields an f64
            Value::Number(n) => match n.as_f64() {
                Some(f) => AttributeValue::Number(f),
                None => AttributeValue::Text(n.to_string()),
            },
            Value::String(s) => AttributeValue::Text(s),
            other @ (Value::Array(_) | Value::Object(_)) => AttributeValue::Composite(other),
        }
    }
}

/// 내부 파싱용 구조체
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBean {
    #[serde(default)]
    class_name: Option<String>,
    #[serde(default)]
    object_name: Option<String>,
    attributes: Vec<RawAttribute>,
}

#[derive(Deserialize)]
struct RawAttribute {
    name: String,
    #[serde(rename = "type", default)]
    type_name: Option<String>,
    #[serde(default)]
    value: Value,
}

/// 단일 bean 응답 파싱
pub fn parse_bean(json: &str) -> CollectResult<FetchedMetric> {
    let raw: RawBean =
        serde_json::from_str(json).map_err(|e| CollectorError::JsonParse(e.to_string()))?;

    Ok(convert_raw_bean(raw))
}

/// 바이트 본문 파싱
pub fn parse_bean_slice(body: &[u8]) -> CollectResult<FetchedMetric> {
    let raw: RawBean =
        serde_json::from_slice(body).map_err(|e| CollectorError::JsonParse(e.to_string()))?;

    Ok(convert_raw_bean(raw))
}

fn convert_raw_bean(raw: RawBean) -> FetchedMetric {
    FetchedMetric {
        class_name: raw.class_name.unwrap_or_default(),
        object_name: raw.object_name,
        attributes: raw
            .attributes
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                type_name: a.type_name,
                value: AttributeValue::from(a.value),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let json = r#"{
            "className": "com.facebook.presto.execution.SqlQueryManager",
            "objectName": "com.facebook.presto.execution:name=QueryManager",
            "description": "",
            "attributes": [
                {"name": "RunningQueries", "type": "long", "value": 7},
                {"name": "ExecutionTime.OneMinute.P95", "type": "double", "value": 1234.5},
                {"name": "Executor.Shutdown", "type": "boolean", "value": false},
                {"name": "Executor.RejectedExecutionHandler", "type": "java.lang.String", "value": "AbortPolicy"},
                {"name": "ExecutionTime.OneMinute.Min", "type": "double", "value": null}
            ]
        }"#;

        let bean = parse_bean(json).unwrap();
        assert_eq!(bean.class_name, "com.facebook.presto.execution.SqlQueryManager");
        assert_eq!(
            bean.object_name.as_deref(),
            Some("com.facebook.presto.execution:name=QueryManager")
        );
        assert_eq!(bean.attributes.len(), 5);
        assert_eq!(bean.attributes[0].name, "RunningQueries");
        assert_eq!(bean.attributes[0].type_name.as_deref(), Some("long"));
        assert_eq!(bean.attributes[0].value, AttributeValue::Number(7.0));
        assert_eq!(bean.attributes[1].value, AttributeValue::Number(1234.5));
        assert_eq!(bean.attributes[2].value, AttributeValue::Boolean(false));
        assert_eq!(
            bean.attributes[3].value,
            AttributeValue::Text("AbortPolicy".to_string())
        );
        assert_eq!(bean.attributes[4].value, AttributeValue::Null);
    }

    #[test]
    fn test_parse_minimal_response() {
        let bean = parse_bean(r#"{"attributes":[{"name":"RunningQueries","value":7}]}"#).unwrap();
        assert!(bean.class_name.is_empty());
        assert!(bean.object_name.is_none());
        assert_eq!(bean.attributes[0].type_name, None);
        assert_eq!(bean.attributes[0].value, AttributeValue::Number(7.0));
    }

    #[test]
    fn test_missing_value_is_null() {
        let bean = parse_bean(r#"{"attributes":[{"name":"FreeBytes"}]}"#).unwrap();
        assert_eq!(bean.attributes[0].value, AttributeValue::Null);
    }

    #[test]
    fn test_composite_value() {
        let bean = parse_bean(
            r#"{"attributes":[{"name":"Usage","value":{"used":1,"max":2}},{"name":"Ids","value":[1,2]}]}"#,
        )
        .unwrap();
        assert_eq!(bean.attributes[0].value.kind(), "composite");
        assert_eq!(bean.attributes[1].value.kind(), "composite");
    }

    #[test]
    fn test_attributes_are_required() {
        let result = parse_bean(r#"{"className":"x"}"#);
        assert!(matches!(result, Err(CollectorError::JsonParse(_))));
    }

    #[test]
    fn test_attribute_name_is_required() {
        let result = parse_bean(r#"{"attributes":[{"value":1}]}"#);
        assert!(matches!(result, Err(CollectorError::JsonParse(_))));
    }

    #[test]
    fn test_invalid_json() {
        let result = parse_bean("<html>Service Unavailable</html>");
        assert!(result.as_ref().is_err_and(|e| e.is_decode()));
    }

    #[test]
    fn test_parse_slice_matches_str() {
        let json = r#"{"attributes":[{"name":"MaxBytes","value":1073741824}]}"#;
        assert_eq!(
            parse_bean_slice(json.as_bytes()).unwrap(),
            parse_bean(json).unwrap()
        );
    }
}
