/// An account holder. The API key is the sole credential; it never leaves
/// the store except through `find_by_api_key` lookups.
#[derive(Debug, Clone)]
pub struct Wizard {
    pub name: String,
    pub api_key: String,
}
