/// Kosovo cities and municipalities offered as search suggestions.
pub const KOSOVO_CITIES: &[&str] = &[
    "Prishtina",
    "Prizren",
    "Ferizaj",
    "Peja",
    "Gjilan",
    "Mitrovica",
    "Podujeva",
    "Vushtrri",
    "Rahovec",
    "Drenas",
    "Lipjan",
    "Kamenica",
    "Viti",
    "Deçan",
    "Istog",
    "Klinë",
    "Skenderaj",
    "Dragash",
    "Kaçanik",
    "Obiliq",
    "Leposaviq",
    "Shtime",
    "Junik",
    "Malisheva",
    "Suhareka",
    "Kllokot",
    "Hani i Elezit",
    "Zveçan",
    "Zubin Potok",
    "Ranillug",
    "Graçanica",
    "Partesh",
    "Mamusha",
    "Novobërda",
    "Fushë Kosova",
];

pub const MAX_SUGGESTIONS: usize = 10;

/// Case-insensitive substring match over [`KOSOVO_CITIES`].
pub fn search(query: &str) -> Vec<&'static str> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    KOSOVO_CITIES
        .iter()
        .copied()
        .filter(|city| city.to_lowercase().contains(&query))
        .take(MAX_SUGGESTIONS)
        .collect()
}
