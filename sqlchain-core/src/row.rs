//! Result rows returned by an executor

use crate::{Result, Value};
use serde::de::{DeserializeOwned, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// One result row: column (or alias) names paired with their values, in the
/// order the executor produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    /// Build a row from parallel column and value lists.
    ///
    /// Extra entries on the longer side are dropped.
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        let mut row = Self { columns, values };
        let len = row.columns.len().min(row.values.len());
        row.columns.truncate(len);
        row.values.truncate(len);
        row
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.push(column.into());
        self.values.push(value.into());
    }

    /// Value of the first column named `column`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|name| name == column)
            .map(|idx| &self.values[idx])
    }

    pub fn get_index(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// JSON object keyed by column name. When two columns share a name the
    /// later one wins.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }

    /// Deserialize the row into any type whose fields match the column names.
    ///
    /// SQLite has no boolean storage class, so booleans come back as
    /// `Integer(0|1)`. Annotate `bool` fields with
    /// `#[serde(deserialize_with = "sqlchain_core::row::bool_from_integer")]`.
    pub fn deserialize<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        Ok(serde_json::from_value(self.to_json())?)
    }
}

/// serde `deserialize_with` helper reading a `bool` field from either a JSON
/// boolean or an integer, where any non-zero integer is `true`.
pub fn bool_from_integer<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Integer(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Integer(n) => n != 0,
    })
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value.to_json())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        id: i64,
        name: String,
        nickname: Option<String>,
    }

    fn user_row() -> Row {
        let mut row = Row::default();
        row.push("id", 1i64);
        row.push("name", "John Doe");
        row.push("nickname", Value::Null);
        row
    }

    #[test]
    fn test_get_by_name_and_index() {
        let row = user_row();
        assert_eq!(row.get("name"), Some(&Value::from("John Doe")));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.get_index(0), Some(&Value::Integer(1)));
        assert_eq!(row.len(), 3);
        assert!(!row.is_empty());
    }

    #[test]
    fn test_new_truncates_to_shorter_side() {
        let row = Row::new(vec!["a".into(), "b".into()], vec![Value::Integer(1)]);
        assert_eq!(row.columns(), &["a".to_string()]);
        assert_eq!(row.values(), &[Value::Integer(1)]);
    }

    #[test]
    fn test_column_order_preserved() {
        let row = user_row();
        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["id", "name", "nickname"]);
    }

    #[test]
    fn test_to_json() {
        assert_eq!(
            user_row().to_json(),
            serde_json::json!({"id": 1, "name": "John Doe", "nickname": null})
        );
    }

    #[test]
    fn test_deserialize() {
        let user: User = user_row().deserialize().unwrap();
        assert_eq!(
            user,
            User {
                id: 1,
                name: "John Doe".to_string(),
                nickname: None,
            }
        );
    }

    #[test]
    fn test_deserialize_type_mismatch() {
        let mut row = Row::default();
        row.push("id", "not a number");
        row.push("name", "x");
        let result: Result<User> = row.deserialize();
        assert!(matches!(result, Err(crate::Error::Serialization(_))));
    }

    #[test]
    fn test_bool_fields_from_stored_integers() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Account {
            #[serde(deserialize_with = "bool_from_integer")]
            active: bool,
            #[serde(deserialize_with = "bool_from_integer")]
            verified: bool,
        }

        let mut row = Row::default();
        row.push("active", Value::Integer(1));
        row.push("verified", Value::Integer(0));
        let account: Account = row.deserialize().unwrap();
        assert_eq!(
            account,
            Account {
                active: true,
                verified: false
            }
        );

        let mut row = Row::default();
        row.push("active", true);
        row.push("verified", "yes");
        assert!(matches!(
            row.deserialize::<Account>(),
            Err(crate::Error::Serialization(_))
        ));
    }

    #[test]
    fn test_serialize_as_map() {
        let json = serde_json::to_string(&user_row()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["name"], "John Doe");
    }
}
