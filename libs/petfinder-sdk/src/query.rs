use url::form_urlencoded;

/// Search criteria for the list endpoints (`/animals`, `/organizations`).
///
/// Keys are kept in insertion order. Setting a key again replaces its value
/// but keeps its original position, so the rendered query string is stable.
/// Names are not validated; the upstream decides what it accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(String, String)>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty parameter set for an animal search.
    #[must_use]
    pub fn new_pet_search_params() -> Self {
        Self::default()
    }

    /// `location`, `distance` and `sort=distance`, as used by the nearby search.
    #[must_use]
    pub fn nearby(location: &str, distance: &str) -> Self {
        let mut params = Self::new();
        params.add_param("location", location);
        params.add_param("distance", distance);
        params.add_param("sort", "distance");
        params
    }

    /// Set `key` to `value`, overwriting an earlier value for the same key.
    pub fn add_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.params.push((key, value)),
        }
    }

    /// Builder form of [`add_param`](Self::add_param).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_param(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `?k1=v1&k2=v2`, form-urlencoded, in insertion order.
    ///
    /// Returns an empty string (not `?`) when no parameters are set. Empty
    /// values are kept as `key=`.
    #[must_use]
    pub fn create_query_string(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish();
        format!("?{encoded}")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn empty_renders_empty_string() {
        assert_eq!(QueryParams::new().create_query_string(), "");
        assert_eq!(QueryParams::new_pet_search_params().create_query_string(), "");
    }

    #[test]
    fn insertion_order_is_kept() {
        let params = QueryParams::new()
            .with("type", "dog")
            .with("age", "baby")
            .with("limit", "20");
        assert_eq!(params.create_query_string(), "?type=dog&age=baby&limit=20");
    }

    #[test]
    fn overwrite_keeps_position_and_latest_value() {
        let mut params = QueryParams::new();
        params.add_param("location", "10001");
        params.add_param("distance", "10");
        params.add_param("location", "94103");
        params.add_param("distance", "25");

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("location"), Some("94103"));
        assert_eq!(params.create_query_string(), "?location=94103&distance=25");
    }

    #[test]
    fn one_pair_per_distinct_key() {
        let mut params = QueryParams::new();
        for (i, key) in ["a", "b", "a", "c", "b", "a"].iter().enumerate() {
            params.add_param(*key, i.to_string());
        }

        let query = params.create_query_string();
        let pairs: Vec<&str> = query.trim_start_matches('?').split('&').collect();
        assert_eq!(pairs, vec!["a=5", "b=4", "c=3"]);
    }

    #[test]
    fn values_are_percent_encoded() {
        let params = QueryParams::new()
            .with("location", "Salt Lake City, UT")
            .with("name", "Mr. Whiskers & Co")
            .with("breed", "pit/bull");
        assert_eq!(
            params.create_query_string(),
            "?location=Salt+Lake+City%2C+UT&name=Mr.+Whiskers+%26+Co&breed=pit%2Fbull"
        );
    }

    #[test]
    fn empty_values_are_kept() {
        let params = QueryParams::new().with("location", "").with("distance", "");
        assert_eq!(params.create_query_string(), "?location=&distance=");
    }

    #[test]
    fn nearby_sets_location_distance_and_sort() {
        let params = QueryParams::nearby("10001", "25");
        assert_eq!(
            params.create_query_string(),
            "?location=10001&distance=25&sort=distance"
        );
        let collected: Vec<_> = params.pairs().collect();
        assert_eq!(
            collected,
            vec![("location", "10001"), ("distance", "25"), ("sort", "distance")]
        );
    }
}
