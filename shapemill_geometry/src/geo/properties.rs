use serde_json::{Map, Value as JsonValue};
use std::{
	collections::{BTreeMap, btree_map},
	fmt::Debug,
};

/// Attributes of a feature: trimmed dBASE field names mapped to trimmed
/// text values. Numeric dBASE fields are surfaced as their raw trimmed
/// text; no type coercion happens here.
///
/// Backed by a `BTreeMap` so iteration and serialization order are
/// deterministic.
#[derive(Clone, Default, PartialEq)]
pub struct GeoProperties(BTreeMap<String, String>);

impl GeoProperties {
	pub fn new() -> GeoProperties {
		GeoProperties(BTreeMap::new())
	}

	pub fn insert(&mut self, key: String, value: String) {
		self.0.insert(key, value);
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
		self.0.iter()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn to_json(&self) -> JsonValue {
		JsonValue::Object(Map::from_iter(
			self.0.iter().map(|(k, v)| (k.clone(), JsonValue::from(v.as_str()))),
		))
	}
}

impl From<Vec<(&str, &str)>> for GeoProperties {
	fn from(value: Vec<(&str, &str)>) -> Self {
		GeoProperties(
			value
				.into_iter()
				.map(|(k, v)| (k.to_string(), v.to_string()))
				.collect(),
		)
	}
}

impl IntoIterator for GeoProperties {
	type Item = (String, String);
	type IntoIter = btree_map::IntoIter<String, String>;
	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl Debug for GeoProperties {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.0.iter()).finish()
	}
}
