/// Recursively deep-merge `overlay` into `base`.
///
/// - Tables merge recursively per-field.
/// - Scalars and arrays from the overlay **replace** the base value.
pub fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

/// Set a dotted `path` (e.g. `api.base_path`) in `root`, creating tables as
/// needed.
pub fn set_path(root: &mut toml::Value, path: &str, value: toml::Value) {
    let toml::Value::Table(table) = root else {
        return;
    };
    match path.split_once('.') {
        None => {
            table.insert(path.to_owned(), value);
        },
        Some((head, rest)) => {
            let child = table
                .entry(head)
                .or_insert(toml::Value::Table(toml::map::Map::new()));
            set_path(child, rest, value);
        },
    }
}
