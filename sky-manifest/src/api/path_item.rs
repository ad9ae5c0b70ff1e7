use std::fmt;

use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, IgnoredAny, MapAccess, Visitor},
    ser::SerializeMap,
};
use skyway_ir::HttpMethod;

use super::OperationEntry;

/// The operations declared under one path.
///
/// Keys that are HTTP methods (in any case) become operations; everything
/// else in a path item (`parameters`, `summary`, `$ref`, ...) is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    operations: IndexMap<HttpMethod, OperationEntry>,
}

impl PathItem {
    /// Operations in document order.
    pub fn iter(&self) -> impl Iterator<Item = (HttpMethod, &OperationEntry)> {
        self.operations.iter().map(|(method, entry)| (*method, entry))
    }

    pub fn get(&self, method: HttpMethod) -> Option<&OperationEntry> {
        self.operations.get(&method)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PathItemVisitor;

        impl<'de> Visitor<'de> for PathItemVisitor {
            type Value = PathItem;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a path item mapping HTTP methods to operations")
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(PathItem::default())
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut operations = IndexMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    let Ok(method) = key.parse::<HttpMethod>() else {
                        map.next_value::<IgnoredAny>()?;
                        continue;
                    };
                    // `get: ~` declares the method with nothing in it
                    let entry = map.next_value::<Option<OperationEntry>>()?.unwrap_or_default();
                    if operations.insert(method, entry).is_some() {
                        return Err(de::Error::custom(format!(
                            "method '{method}' is declared more than once"
                        )));
                    }
                }
                Ok(PathItem { operations })
            }
        }

        deserializer.deserialize_any(PathItemVisitor)
    }
}

impl Serialize for PathItem {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.operations.len()))?;
        for (method, entry) in &self.operations {
            map.serialize_entry(method.as_str(), entry)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_method_keys_ignored() {
        let item: PathItem = serde_yaml::from_str(
            r#"
summary: Users
parameters:
  - name: id
    in: path
get:
  operationId: getUser
"#,
        )
        .unwrap();

        assert_eq!(item.len(), 1);
        assert_eq!(
            item.get(HttpMethod::Get).unwrap().operation_id.as_deref(),
            Some("getUser")
        );
    }

    #[test]
    fn test_method_keys_ignore_case() {
        let item: PathItem = serde_yaml::from_str("GET: {}\nPost: {}").unwrap();
        let methods: Vec<_> = item.iter().map(|(m, _)| m).collect();
        assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Post]);
    }

    #[test]
    fn test_duplicate_method_rejected() {
        let err = serde_yaml::from_str::<PathItem>("get: {}\nGET: {}").unwrap_err();
        assert!(err.to_string().contains("declared more than once"));
    }

    #[test]
    fn test_null_item_and_null_operation() {
        let item: PathItem = serde_yaml::from_str("~").unwrap();
        assert!(item.is_empty());

        let item: PathItem = serde_yaml::from_str("get: ~").unwrap();
        assert_eq!(item.get(HttpMethod::Get), Some(&OperationEntry::default()));
    }
}
