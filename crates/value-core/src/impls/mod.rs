mod serde_json;
