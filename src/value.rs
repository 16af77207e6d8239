use indexmap::IndexMap;

/// An ordered mapping of field names to values.
pub type Document = IndexMap<String, Value>;

/// A target query document value.
///
/// This mirrors the generic document model of the store: JSON types with a
/// distinction between integers and floats, and objects that keep their
/// keys in insertion order (stage and sort documents are order sensitive).
///
/// # Examples
///
/// ```
/// use mongosql::Value;
///
/// let filter = Value::object([("price", Value::object([("$gt", Value::Integer(12))]))]);
/// assert_eq!(mongosql::to_json(&filter), r#"{"price":{"$gt":12}}"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// Array of values
    Array(Vec<Value>),

    /// Object with ordered string keys
    Object(Document),
}

impl Value {
    /// Build an object from key/value pairs. A repeated key keeps its first
    /// position and its last value.
    pub fn object<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Value {
        Value::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Object with a single key, the common shape of operator documents.
    pub fn single(key: impl Into<String>, value: Value) -> Value {
        let mut doc = Document::with_capacity(1);
        doc.insert(key.into(), value);
        Value::Object(doc)
    }

    pub fn as_object(&self) -> Option<&Document> {
        match self {
            Value::Object(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a key on an object value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|doc| doc.get(key))
    }

    /// Keys of an object value in order; empty for anything else.
    pub fn keys(&self) -> Vec<&str> {
        self.as_object()
            .map(|doc| doc.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Object(doc)
    }
}
