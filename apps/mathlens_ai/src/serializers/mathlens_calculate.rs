use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

#[derive(Debug, Deserialize)]
pub struct CalculateIn {
    /// `data:<mime>;base64,<payload>` snapshot of the canvas
    pub image: String,
    /// previously assigned variables; the browser stores numbers here too
    #[serde(default)]
    pub dict_of_vars: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct CalculateOut {
    pub message: &'static str,
    pub data: Vec<ExpressionRecord>,
    pub status: &'static str,
}

/// Answer value as the model gave it. Serialized without a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl From<Value> for ResultValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => ResultValue::Bool(b),
            Value::Number(n) => ResultValue::Number(n),
            Value::String(s) => ResultValue::Text(s),
            // null and compound answers are kept as their JSON text
            other => ResultValue::Text(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionRecord {
    pub expr: String,
    pub result: ResultValue,
    pub assign: bool,
}

impl ExpressionRecord {
    /// Build a record from one element of the model's reply.
    ///
    /// Returns `None` unless the element is an object with an `expr` (string or
    /// number) and a `result`. `assign` is only `true` for a JSON `true`.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut obj) = value else {
            return None;
        };

        let expr = match obj.remove("expr")? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let result = ResultValue::from(obj.remove("result")?);
        let assign = matches!(obj.get("assign"), Some(Value::Bool(true)));

        Some(Self { expr, result, assign })
    }
}
