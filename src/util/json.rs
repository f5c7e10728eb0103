use serde_json::Value;

use crate::common::error::DeviceError;

// 设备应答里给 trawler 用的簿记字段，对状态本身没有意义
const API_BOOKKEEPING_FIELDS: [&str; 3] = ["links", "message", "status"];

/// strip the bookkeeping fields from a decoded response, the caller's copy is untouched
pub fn strip_api_fields(data: &Value) -> Value {
    let mut stripped = data.clone();
    if let Some(map) = stripped.as_object_mut() {
        for field in API_BOOKKEEPING_FIELDS {
            map.remove(field);
        }
    }
    stripped
}

/// get string field in json data, return string if ok, otherwise return error
pub fn get_str(json_data: &Value, value_name: &str) -> Result<String, DeviceError> {
    let str = json_data[value_name]
        .as_str()
        .ok_or(DeviceError::Lookup(format!(
            "json parser: cannot find field '{}' in response",
            value_name
        )))?;
    Ok(str.to_string())
}

/// get bool field in json data
pub fn get_bool(json_data: &Value, value_name: &str) -> Result<bool, DeviceError> {
    json_data[value_name]
        .as_bool()
        .ok_or(DeviceError::Lookup(format!(
            "json parser: cannot find field '{}' in response",
            value_name
        )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_removes_exactly_the_bookkeeping_fields() {
        let data = json!({"a": 1, "links": [{"rel": "self"}], "message": "x", "status": "ok"});
        let stripped = strip_api_fields(&data);
        assert_eq!(stripped, json!({"a": 1}));
        // 原值不能被改动
        assert_eq!(data["message"], json!("x"));
    }

    #[test]
    fn test_strip_is_noop_without_bookkeeping_fields() {
        let data = json!({"a": 1, "b": {"c": 2}});
        assert_eq!(strip_api_fields(&data), data);
    }

    #[test]
    fn test_strip_passes_non_objects_through() {
        let data = json!([1, 2, 3]);
        assert_eq!(strip_api_fields(&data), data);
    }

    #[test]
    fn test_get_bool_missing_field_is_lookup_error() {
        let data = json!({"enabled": true});
        assert!(get_bool(&data, "enabled").unwrap());
        let err = get_bool(&data, "unknown").unwrap_err();
        assert!(matches!(err, DeviceError::Lookup(_)));
    }

    #[test]
    fn test_get_str() {
        let data = json!({"name": "qx-020000"});
        assert_eq!(get_str(&data, "name").unwrap(), "qx-020000");
        assert!(get_str(&data, "missing").is_err());
    }
}
