//! Operation metadata attached to an API path.
//!
//! An [`Operation`] carries the well-known Swagger 1.0 operation fields as
//! typed optionals plus an `extra` bag that is flattened into the rendered
//! object, so custom fields pass through untouched.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::error::CatalogError;

/// HTTP methods an operation can be declared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// All supported methods, in declaration order.
    pub const ALL: [HttpMethod; 4] = [Self::Get, Self::Post, Self::Put, Self::Delete];

    /// Upper-case wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CatalogError::unsupported_method(s))
    }
}

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Path,
    Query,
    Body,
    Header,
    Form,
}

/// A single operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name. Body parameters conventionally use `body`.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Type name, either a primitive (`string`, `integer`) or a model id.
    pub data_type: String,

    pub param_type: ParamType,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub allow_multiple: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowable_values: Option<Value>,

    /// Fields not covered above, rendered verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Parameter {
    /// Create a parameter of the given kind.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            description: None,
            data_type: data_type.into(),
            param_type,
            // Path segments are always present.
            required: param_type == ParamType::Path,
            allow_multiple: false,
            allowable_values: None,
            extra: Map::new(),
        }
    }

    pub fn path(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::new(name, data_type, ParamType::Path)
    }

    pub fn query(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::new(name, data_type, ParamType::Query)
    }

    pub fn header(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::new(name, data_type, ParamType::Header)
    }

    pub fn form(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::new(name, data_type, ParamType::Form)
    }

    /// Create the request body parameter.
    pub fn body(data_type: impl Into<String>) -> Self {
        Self::new("body", data_type, ParamType::Body).required(true)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn allow_multiple(mut self, allow_multiple: bool) -> Self {
        self.allow_multiple = allow_multiple;
        self
    }

    /// Restrict the accepted values, e.g. `{"valueType": "LIST", "values": [...]}`.
    pub fn allowable_values(mut self, values: Value) -> Self {
        self.allowable_values = Some(values);
        self
    }
}

/// A documented error status for an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub reason: String,
}

/// One HTTP method exposed at an API path, plus descriptive metadata.
///
/// `http_method` is assigned when the operation is registered on a
/// [`Resource`](super::Resource); any value set beforehand is overwritten.
/// `extra` never carries `httpMethod`, and carries `summary` only when the
/// supplied summary was not a string and no summary argument replaced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<HttpMethod>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_class: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub error_responses: Vec<ErrorResponse>,

    /// Caller-supplied fields with no typed counterpart.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Operation {
    /// Create an empty operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an operation from an untyped JSON object.
    ///
    /// Each known field whose value fits its typed slot is parsed into it.
    /// Values that don't fit are kept in `extra` exactly as given, so they
    /// render unchanged. `httpMethod` is dropped since registration assigns
    /// it. Only a non-object payload is an error.
    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(CatalogError::invalid_operation(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )));
            }
        };

        Ok(fields
            .into_iter()
            .fold(Self::new(), |operation, (key, value)| operation.field(key, value)))
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn response_class(mut self, response_class: impl Into<String>) -> Self {
        self.response_class = Some(response_class.into());
        self
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn error_response(mut self, code: u16, reason: impl Into<String>) -> Self {
        self.error_responses.push(ErrorResponse {
            code,
            reason: reason.into(),
        });
        self
    }

    /// Attach a field by its rendered name.
    ///
    /// Known names go to their typed slot when the value fits and to `extra`
    /// verbatim when it doesn't. `httpMethod` is ignored.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();

        let leftover = match key.as_str() {
            "httpMethod" => {
                debug!("Ignoring httpMethod field, it is assigned at registration");
                None
            }
            "summary" => fit(value, &mut self.summary),
            "notes" => fit(value, &mut self.notes),
            "nickname" => fit(value, &mut self.nickname),
            "responseClass" => fit(value, &mut self.response_class),
            "parameters" => fit_list(value, &mut self.parameters),
            "errorResponses" => fit_list(value, &mut self.error_responses),
            _ => Some(value),
        };

        match leftover {
            Some(value) => {
                self.extra.insert(key, value);
            }
            // A typed value supersedes an earlier untyped one.
            None => {
                self.extra.remove(&key);
            }
        }
        self
    }

    /// Stamp the registered method and settle the summary.
    ///
    /// A `summary` argument always wins. Without one, an operation that has
    /// no summary at all renders `""`.
    pub(crate) fn assign(&mut self, method: HttpMethod, summary: Option<&str>) {
        self.extra.remove("httpMethod");
        if let Some(summary) = summary {
            self.summary = Some(summary.to_string());
        }

        if self.summary.is_some() {
            self.extra.remove("summary");
        } else if !self.extra.contains_key("summary") {
            self.summary = Some(String::new());
        }

        self.http_method = Some(method);
    }
}

/// Parse `value` into `slot` if it round-trips unchanged, else hand it back.
fn fit<T>(value: Value, slot: &mut Option<T>) -> Option<Value>
where
    T: Serialize + DeserializeOwned,
{
    match parse_exact(&value) {
        Some(parsed) => {
            *slot = Some(parsed);
            None
        }
        None => Some(value),
    }
}

/// Like [`fit`] for list fields. Empty lists stay in `extra` so they still
/// render.
fn fit_list<T>(value: Value, slot: &mut Vec<T>) -> Option<Value>
where
    T: Serialize + DeserializeOwned,
{
    match parse_exact::<Vec<T>>(&value) {
        Some(parsed) if !parsed.is_empty() => {
            *slot = parsed;
            None
        }
        _ => Some(value),
    }
}

fn parse_exact<T>(value: &Value) -> Option<T>
where
    T: Serialize + DeserializeOwned,
{
    let parsed: T = serde_json::from_value(value.clone()).ok()?;
    (serde_json::to_value(&parsed).ok()? == *value).then_some(parsed)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_parse_is_case_insensitive() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Delete".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert!(matches!(
            "PATCH".parse::<HttpMethod>(),
            Err(CatalogError::UnsupportedMethod(m)) if m == "PATCH"
        ));
    }

    #[test]
    fn test_operation_renders_known_and_custom_fields() {
        let op = Operation::new()
            .summary("Find pet by ID")
            .response_class("Pet")
            .parameter(Parameter::path("petId", "string").description("ID of pet"))
            .error_response(404, "Pet not found")
            .field("deprecated", false);

        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(
            value,
            json!({
                "summary": "Find pet by ID",
                "responseClass": "Pet",
                "parameters": [{
                    "name": "petId",
                    "description": "ID of pet",
                    "dataType": "string",
                    "paramType": "path",
                    "required": true,
                    "allowMultiple": false
                }],
                "errorResponses": [{"code": 404, "reason": "Pet not found"}],
                "deprecated": false
            })
        );
    }

    #[test]
    fn test_from_value_keeps_unknown_fields() {
        let op = Operation::from_value(json!({
            "summary": "List",
            "responseClass": "List[Pet]",
            "x-internal": {"owner": "team"}
        }))
        .unwrap();

        assert_eq!(op.summary.as_deref(), Some("List"));
        assert_eq!(op.response_class.as_deref(), Some("List[Pet]"));
        assert_eq!(op.extra.get("x-internal"), Some(&json!({"owner": "team"})));
        assert!(op.http_method.is_none());
    }

    #[test]
    fn test_from_value_keeps_mismatched_fields_verbatim() {
        let payload = json!({
            "summary": null,
            "responseClass": 5,
            "parameters": [{"name": "limit", "paramType": "query"}],
            "errorResponses": [{"code": "404", "reason": "Missing"}],
            "httpMethod": "PATCH"
        });
        let op = Operation::from_value(payload).unwrap();

        assert!(op.http_method.is_none());
        assert!(op.summary.is_none());
        assert!(op.response_class.is_none());
        assert!(op.parameters.is_empty());
        assert!(op.error_responses.is_empty());
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "summary": null,
                "responseClass": 5,
                "parameters": [{"name": "limit", "paramType": "query"}],
                "errorResponses": [{"code": "404", "reason": "Missing"}]
            })
        );
    }

    #[test]
    fn test_from_value_parses_fitting_lists() {
        let op = Operation::from_value(json!({
            "parameters": [{
                "name": "petId",
                "dataType": "string",
                "paramType": "path",
                "required": true,
                "allowMultiple": false
            }],
            "errorResponses": [{"code": 404, "reason": "Pet not found"}],
            "nickname": "getPetById"
        }))
        .unwrap();

        assert_eq!(op.parameters, vec![Parameter::path("petId", "string")]);
        assert_eq!(op.error_responses[0].code, 404);
        assert_eq!(op.nickname.as_deref(), Some("getPetById"));
        assert!(op.extra.is_empty());
    }

    #[test]
    fn test_field_routes_known_names() {
        let op = Operation::new()
            .field("httpMethod", "PATCH")
            .field("summary", "other")
            .field("responseClass", 7);

        assert!(op.http_method.is_none());
        assert_eq!(op.summary.as_deref(), Some("other"));
        assert_eq!(op.extra.get("responseClass"), Some(&json!(7)));
        assert!(!op.extra.contains_key("httpMethod"));
        assert!(!op.extra.contains_key("summary"));

        let op = op.field("responseClass", "Pet");
        assert_eq!(op.response_class.as_deref(), Some("Pet"));
        assert!(!op.extra.contains_key("responseClass"));
    }

    #[test]
    fn test_assign_settles_method_and_summary() {
        let mut op = Operation::new();
        op.extra.insert("httpMethod".into(), json!("PATCH"));
        op.extra.insert("summary".into(), json!("stale"));
        op.assign(HttpMethod::Get, Some("S"));
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"httpMethod": "GET", "summary": "S"})
        );

        let mut op = Operation::new();
        op.assign(HttpMethod::Put, None);
        assert_eq!(op.summary.as_deref(), Some(""));

        let mut op = Operation::from_value(json!({"summary": null})).unwrap();
        op.assign(HttpMethod::Post, None);
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"httpMethod": "POST", "summary": null})
        );
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        let err = Operation::from_value(json!("GET /pets")).unwrap_err();
        assert!(err.to_string().contains("found a string"));

        assert!(Operation::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn test_body_parameter_defaults() {
        let param = Parameter::body("Pet");
        assert_eq!(param.name, "body");
        assert!(param.required);
        assert_eq!(param.param_type, ParamType::Body);

        let query = Parameter::query("status", "string");
        assert!(!query.required);
    }
}
