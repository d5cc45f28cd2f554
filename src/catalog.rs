//! Fixed reference data consumed by the query builder and the views.

/// Genre vocabulary, alphabetically sorted. The index stores genres as a flat
/// string, so this list is the only place the vocabulary is enumerated.
pub const GENRES: [&str; 21] = [
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Disaster",
    "Documentary",
    "Drama",
    "Eastern",
    "Family",
    "Fantasy",
    "History",
    "Holiday",
    "Horror",
    "Musical",
    "Mystery",
    "Romance",
    "Science Fiction",
    "Thriller",
    "War",
    "Western",
];

/// Duration buckets: minimum-runtime thresholds in minutes with display
/// labels, ascending. A bucket is a floor ("90 minutes or more"). Views rely
/// on iteration order.
pub const DURATIONS: [(u32, &str); 10] = [
    (60, "1 hour"),
    (70, "1 hour 10 minutes"),
    (80, "1 hour 20 minutes"),
    (90, "1 hour 30 minutes"),
    (100, "1 hour 40 minutes"),
    (110, "1 hour 50 minutes"),
    (120, "2 hours"),
    (130, "2 hours 10 minutes"),
    (140, "2 hours 20 minutes"),
    (150, "2 hours 30 minutes"),
];
