use crate::encoding::percent_encode_cow;
use crate::values::OAUTH_HEADER;
use std::borrow::Cow;

/// Authentication parameters of one outgoing request.
///
/// Entries are kept in insertion order; every consumer that needs an order sorts
/// explicitly (see [`AuthParameterSet::sorted`] and [`AuthParameterSet::to_header`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthParameterSet<'a> {
    entries: Vec<(Cow<'a, str>, Cow<'a, str>)>,
}

impl<'a> AuthParameterSet<'a> {
    pub fn new() -> Self {
        AuthParameterSet {
            entries: Vec::new(),
        }
    }

    /// Insert a parameter, replacing the value of an existing key.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<Cow<'a, str>>,
        V: Into<Cow<'a, str>>,
    {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<Cow<'a, str>> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_ref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    /// Entries sorted ascending by raw key.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut params = self.iter().collect::<Vec<_>>();
        params.sort();
        params
    }

    /// Entries percent-encoded and sorted ascending by encoded key.
    pub fn sorted_encoded(&self) -> Vec<(Cow<'_, str>, Cow<'_, str>)> {
        let mut params = self
            .iter()
            .map(|(k, v)| (percent_encode_cow(k), percent_encode_cow(v)))
            .collect::<Vec<_>>();
        params.sort();
        params
    }

    /// Render as an `Authorization` header value: `OAuth k1="v1", k2="v2"`.
    pub fn to_header(&self) -> String {
        let fields = self
            .sorted_encoded()
            .into_iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, v))
            .collect::<Vec<String>>()
            .join(", ");
        format!("{} {}", OAUTH_HEADER, fields)
    }
}

impl<'a, K, V> FromIterator<(K, V)> for AuthParameterSet<'a>
where
    K: Into<Cow<'a, str>>,
    V: Into<Cow<'a, str>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = AuthParameterSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut set = AuthParameterSet::new();
        set.insert("b", "1").insert("a", "2").insert("b", "3");
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("b"), Some("3"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![("b", "3"), ("a", "2")]);
    }

    #[test]
    fn test_remove() {
        let mut set: AuthParameterSet = vec![("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(set.remove("a").as_deref(), Some("1"));
        assert_eq!(set.remove("a"), None);
        assert!(!set.contains_key("a"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_sorted_ignores_insertion_order() {
        let set: AuthParameterSet = vec![("oauth_version", "1.0"), ("oauth_nonce", "n"), ("oauth_consumer_key", "ck")]
            .into_iter()
            .collect();
        let keys = set.sorted().into_iter().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(keys, vec!["oauth_consumer_key", "oauth_nonce", "oauth_version"]);
    }

    #[test]
    fn test_sorted_encoded_uses_encoded_key() {
        // ':' sorts after '0' raw, but "%3A" sorts before it
        let set: AuthParameterSet = vec![("a0", "x"), ("a:", "y")].into_iter().collect();
        let raw = set.sorted().into_iter().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(raw, vec!["a0", "a:"]);
        let keys = set
            .sorted_encoded()
            .into_iter()
            .map(|(k, _)| k.into_owned())
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["a%3A", "a0"]);
    }

    #[test]
    fn test_to_header() {
        let set: AuthParameterSet = vec![("oauth_signature", "ab+c="), ("oauth_nonce", "n 1")]
            .into_iter()
            .collect();
        assert_eq!(
            set.to_header(),
            "OAuth oauth_nonce=\"n%201\", oauth_signature=\"ab%2Bc%3D\""
        );
    }
}
