use serde::{Deserialize, Serialize};

/// Cities shown when the user has not picked any favorites yet.
pub const DEFAULT_CITIES: [&str; 5] = ["Prishtina", "Prizren", "Ferizaj", "Peja", "Gjilan"];

/// How many favorites the dashboard fetches at once.
pub const DASHBOARD_LIMIT: usize = 5;

/// Ordered set of favorite city names. Stored as a plain TOML array; loading
/// goes through [`FavoriteCities::add`] so stored names are trimmed and unique.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FavoriteCities(Vec<String>);

impl FavoriteCities {
    pub fn defaults() -> Self {
        Self(DEFAULT_CITIES.iter().map(|c| c.to_string()).collect())
    }

    /// Add a city, trimmed. Returns `false` for blank names and duplicates.
    pub fn add(&mut self, city: &str) -> bool {
        let city = city.trim();
        if city.is_empty() || self.contains(city) {
            return false;
        }
        self.0.push(city.to_string());
        true
    }

    /// Remove an exact match. Returns whether anything was removed.
    pub fn remove(&mut self, city: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c != city);
        self.0.len() != before
    }

    pub fn contains(&self, city: &str) -> bool {
        self.0.iter().any(|c| c == city)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Cities the dashboard should fetch: the first few favorites, or the
    /// defaults when there are none.
    pub fn dashboard_cities(&self) -> Vec<String> {
        if self.0.is_empty() {
            return Self::defaults().0;
        }
        self.0.iter().take(DASHBOARD_LIMIT).cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for FavoriteCities {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut favorites = Self::default();
        for city in iter {
            let city: String = city.into();
            favorites.add(&city);
        }
        favorites
    }
}

impl From<Vec<String>> for FavoriteCities {
    fn from(cities: Vec<String>) -> Self {
        cities.into_iter().collect()
    }
}

impl From<FavoriteCities> for Vec<String> {
    fn from(favorites: FavoriteCities) -> Self {
        favorites.0
    }
}
