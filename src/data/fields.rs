use crate::shared::*;

/// The farm's eight plots, in tile units. Omitted `w`/`h` default to 5×3.
///
///   (1,1)  (7,1)  (13,1)
///   (1,5)         (13,5)
///   (1,9)  (7,9)  (13,9)
pub const FIELD_LAYOUT: &str = r#"[
    (x: 1, y: 1),
    (x: 1, y: 5),
    (x: 1, y: 9),
    (x: 7, y: 1),
    (x: 7, y: 9),
    (x: 13, y: 1),
    (x: 13, y: 5),
    (x: 13, y: 9),
]"#;

/// Parse a RON field list and check that it describes a usable farm.
pub fn parse_field_layout(source: &str) -> Result<Vec<FieldDef>, String> {
    let defs: Vec<FieldDef> =
        ron::from_str(source).map_err(|e| format!("Field layout is not valid RON: {}", e))?;
    validate_field_layout(&defs)?;
    Ok(defs)
}

/// Rejects empty layouts, zero-sized fields and overlapping rectangles.
/// Lookup is first-match, so overlaps would make a tile ambiguous.
pub fn validate_field_layout(defs: &[FieldDef]) -> Result<(), String> {
    if defs.is_empty() {
        return Err("Field layout contains no fields".to_string());
    }

    for (i, def) in defs.iter().enumerate() {
        if def.w == 0 || def.h == 0 {
            return Err(format!(
                "Field #{} at ({}, {}) has zero size {}x{}",
                i, def.x, def.y, def.w, def.h
            ));
        }
    }

    let fields: Vec<Field> = defs.iter().map(Field::from_def).collect();
    for (i, a) in fields.iter().enumerate() {
        for (j, b) in fields.iter().enumerate().skip(i + 1) {
            if a.overlaps(b) {
                return Err(format!(
                    "Field #{} at {:?} overlaps field #{} at {:?}",
                    i, a.origin, j, b.origin
                ));
            }
        }
    }

    Ok(())
}

/// Fields that stick out past the visible tile grid. Not fatal: the hidden
/// part simply can't be clicked.
pub fn fields_outside_screen(defs: &[FieldDef], settings: &GameSettings) -> Vec<usize> {
    let cols = (settings.screen_width / settings.tile_size) as i32;
    let rows = (settings.screen_height / settings.tile_size) as i32;
    defs.iter()
        .enumerate()
        .filter(|(_, d)| {
            d.x < 0 || d.y < 0 || d.x + d.w as i32 > cols || d.y + d.h as i32 > rows
        })
        .map(|(i, _)| i)
        .collect()
}
