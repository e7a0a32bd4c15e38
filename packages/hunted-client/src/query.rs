//! Request options and their query-string encoding

use std::fmt;

use url::form_urlencoded;

/// A single option value: one scalar, or a list sent as repeated parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Scalar(String),
    List(Vec<String>),
}

impl OptionValue {
    /// The scalar value, if this is not a list
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            OptionValue::Scalar(value) => Some(value.as_str()),
            OptionValue::List(_) => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Scalar(value) => f.write_str(value),
            OptionValue::List(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Scalar(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Scalar(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Scalar(value.to_string())
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        OptionValue::Scalar(value.to_string())
    }
}

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        OptionValue::Scalar(value.to_string())
    }
}

impl<T: ToString> From<Vec<T>> for OptionValue {
    fn from(values: Vec<T>) -> Self {
        OptionValue::List(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for OptionValue {
    fn from(values: [T; N]) -> Self {
        OptionValue::List(values.iter().map(ToString::to_string).collect())
    }
}

/// Ordered option map
///
/// Keys keep their insertion order; setting a key that already exists
/// replaces its value where it stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    entries: Vec<(String, OptionValue)>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Options::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key`, replacing any previous value in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Options
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Options::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

/// Encode options as a query string
///
/// Returns `""` for no options, otherwise `?k=v&k=v...`. List values emit
/// one pair per element. Values are not percent-encoded here; the URL
/// parser does that when the request is built.
pub fn encode(options: &Options) -> String {
    let mut pairs = Vec::new();
    for (key, value) in options.iter() {
        match value {
            OptionValue::Scalar(v) => pairs.push(format!("{}={}", key, v)),
            OptionValue::List(values) => {
                pairs.extend(values.iter().map(|v| format!("{}={}", key, v)));
            }
        }
    }

    if pairs.is_empty() {
        return String::new();
    }
    format!("?{}", pairs.join("&"))
}

/// Form-encode a single value so `&`, `=`, `#` and spaces survive [`encode`]
///
/// For operations that build their own query from free text; [`encode`]
/// itself never escapes.
pub fn escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Parse a query string produced by [`encode`] back into options
///
/// Repeated keys fold into a list.
pub fn decode(query: &str) -> Options {
    let mut options = Options::new();
    let query = query.strip_prefix('?').unwrap_or(query);

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match options.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => {
                let merged = match std::mem::replace(slot, OptionValue::List(Vec::new())) {
                    OptionValue::Scalar(prev) => vec![prev, value.to_string()],
                    OptionValue::List(mut prev) => {
                        prev.push(value.to_string());
                        prev
                    }
                };
                *slot = OptionValue::List(merged);
            }
            None => options.insert(key, value),
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&Options::new()), "");
    }

    #[test]
    fn test_encode_scalar() {
        let options = Options::new().with("name", "Shakira");
        assert_eq!(encode(&options), "?name=Shakira");
    }

    #[test]
    fn test_encode_list_repeats_key() {
        let options = Options::new().with("name", vec!["Madonna", "Shakira"]);
        assert_eq!(encode(&options), "?name=Madonna&name=Shakira");
    }

    #[test]
    fn test_encode_keeps_key_order() {
        let options = Options::new()
            .with("name", "Shakira")
            .with("provider", ["itunes", "grooveshark"])
            .with("count", 5u32);
        assert_eq!(
            encode(&options),
            "?name=Shakira&provider=itunes&provider=grooveshark&count=5"
        );
    }

    #[test]
    fn test_encode_does_not_escape() {
        let options = Options::new().with("name", "Broken Bells");
        assert_eq!(encode(&options), "?name=Broken Bells");
    }

    #[test]
    fn test_escape_reserved_characters() {
        assert_eq!(escape("Simon & Garfunkel"), "Simon+%26+Garfunkel");
        assert_eq!(escape("C# a=b"), "C%23+a%3Db");
        assert_eq!(escape("Shakira"), "Shakira");
    }

    #[test]
    fn test_escaped_value_stays_one_pair() {
        let options = Options::new().with("text", escape("Simon & Garfunkel met C# Band"));
        let decoded = decode(&encode(&options));
        assert_eq!(decoded.len(), 1);
        assert_eq!(
            decoded.get("text"),
            Some(&OptionValue::from("Simon+%26+Garfunkel+met+C%23+Band"))
        );
    }

    #[test]
    fn test_encode_empty_list_emits_nothing() {
        let options = Options::new().with("artist", Vec::<u64>::new());
        assert_eq!(encode(&options), "");
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut options = Options::new().with("a", "1").with("b", "2");
        options.insert("a", "3");
        assert_eq!(encode(&options), "?a=3&b=2");
    }

    #[test]
    fn test_remove() {
        let mut options = Options::new().with("a", "1").with("b", "2");
        assert_eq!(options.remove("a"), Some(OptionValue::from("1")));
        assert_eq!(options.remove("a"), None);
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn test_scalar_round_trip() {
        let options = Options::new()
            .with("text", "hello")
            .with("emerging", true)
            .with("count", 10u32);
        assert_eq!(decode(&encode(&options)), options);
    }

    #[test]
    fn test_decode_folds_repeated_keys() {
        let options = decode("?artist=3024&count=5&artist=48452");
        assert_eq!(
            options.get("artist"),
            Some(&OptionValue::List(vec!["3024".into(), "48452".into()]))
        );
        assert_eq!(options.iter().map(|(k, _)| k).collect::<Vec<_>>(), ["artist", "count"]);
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode("").is_empty());
        assert!(decode("?").is_empty());
    }
}
