//! Train-category lookups.
//!
//! Two related but distinct mappings: the resolver turns a short
//! category code into its full marketing name, and the classifier
//! buckets a raw category into the coarse transport type shown on
//! destination cards.

/// Category code to full name, matched by case-insensitive prefix in
/// declared order. Longer codes are listed before their own prefixes
/// (ICE before IC, TGV/BUS/BAT before T) so that the first hit is the
/// most specific one.
const TRAIN_TYPE_NAMES: &[(&str, &str)] = &[
    ("ICE", "InterCity Express"),
    ("TGV", "Train à Grande Vitesse"),
    ("BUS", "Bus"),
    ("BAT", "Boat"),
    ("IC", "InterCity"),
    ("IR", "InterRegio"),
    ("EC", "EuroCity"),
    ("RE", "Regional Express"),
    ("RJ", "RailJet"),
    ("EN", "EuroNight"),
    ("R", "Regional"),
    ("S", "S-Bahn"),
    ("T", "Tram"),
];

/// Resolve a short category code to its full name.
///
/// Codes with trailing digits resolve by prefix ("IC1234" is an
/// InterCity). Unknown codes are returned unchanged.
pub fn train_type_name(category: &str) -> String {
    let upper = category.to_uppercase();
    for (code, name) in TRAIN_TYPE_NAMES {
        if upper.starts_with(code) {
            return (*name).to_string();
        }
    }
    category.to_string()
}

/// Expand a composite train-type string ("IC 1 → S 9") into full names
/// ("InterCity → S-Bahn").
///
/// Each leg's leading uppercase-letter run is resolved; legs without
/// one are dropped.
pub fn expand_train_types(train_type: &str) -> String {
    train_type
        .split(" → ")
        .filter_map(|leg| {
            let code: String = leg.chars().take_while(char::is_ascii_uppercase).collect();
            if code.is_empty() {
                None
            } else {
                Some(train_type_name(&code))
            }
        })
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Classify a raw category code into a coarse transport type.
///
/// The branches are tested in a fixed order: express-family codes
/// first, then regional, S-Bahn, bus, tram, boat. Substring tests mean
/// the order is load-bearing ("BAT" contains "T" and therefore lands
/// in the tram branch before the boat branch is reached).
pub fn classify_transport(category: &str) -> String {
    let upper = category.to_uppercase();

    if upper.contains("IC") || upper.contains("IR") || upper.contains("ICE") || upper.contains("EC")
    {
        "Express".to_string()
    } else if upper == "R" || upper.contains("RE") {
        "Regional".to_string()
    } else if upper.starts_with('S') {
        "S-Bahn".to_string()
    } else if upper.contains("BUS") {
        "Bus".to_string()
    } else if upper.contains('T') || upper.contains("TRAM") {
        "Tram".to_string()
    } else if upper.contains("BAT") || upper.contains("SHIP") {
        "Boat".to_string()
    } else {
        upper
    }
}
