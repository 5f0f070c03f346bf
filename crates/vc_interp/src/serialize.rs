//! `serde` support: a live tree serializes as its current values.
//!
//! Strings are evaluated during serialization. `undefined` object members
//! are skipped and `undefined` array elements are written as unit (`null`
//! in JSON), matching [`Current::to_json`].

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{ArrayRef, Current, ObjectRef, RootEntry};

impl Serialize for Current<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Undefined | Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Number(value) => value.serialize(serializer),
            Self::String(value) => serializer.serialize_str(value),
            Self::Object(object) => object.serialize(serializer),
            Self::Array(array) => array.serialize(serializer),
        }
    }
}

impl Serialize for ObjectRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.iter() {
            if !value.is_undefined() {
                map.serialize_entry(key, &value)?;
            }
        }
        map.end()
    }
}

impl Serialize for ArrayRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self.iter() {
            seq.serialize_element(&value)?;
        }
        seq.end()
    }
}

impl Serialize for RootEntry {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.view().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;

    use serde::Deserialize;
    use serde_json::json;

    use crate::{Options, wrap};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Endpoint {
        host: String,
        url: String,
        ports: Vec<u16>,
    }

    #[test]
    fn json_matches_to_json() {
        let mut root = wrap(
            &json!({ "host": "h", "url": "http://${host}", "ports": [80], "extra": null }),
            Options::default(),
        );
        root.entry_mut("ports")
            .and_then(|e| e.as_array_mut())
            .unwrap()
            .set_len(2);

        let value = serde_json::to_value(&root).unwrap();
        assert_eq!(value, root.to_json());
        assert_eq!(value["ports"], json!([80, null]));
    }

    #[test]
    fn deserializes_evaluated_values() {
        let root = wrap(
            &json!({ "host": "db.local", "url": "pg://${host}:${ports[0]}", "ports": [5432] }),
            Options::default(),
        );

        let text = serde_json::to_string(&root).unwrap();
        let endpoint: Endpoint = serde_json::from_str(&text).unwrap();
        assert_eq!(
            endpoint,
            Endpoint {
                host: "db.local".into(),
                url: "pg://db.local:5432".into(),
                ports: vec![5432],
            }
        );
    }

    #[test]
    fn ron_round_trip() {
        let root = wrap(
            &json!({ "name": "svc", "greeting": "hello ${name}" }),
            Options::default(),
        );

        let text = ron::to_string(&root).unwrap();
        let map: BTreeMap<String, String> = ron::from_str(&text).unwrap();
        assert_eq!(map["greeting"], "hello svc");
        assert_eq!(map.len(), 2);
    }
}
