// src/process/normalize.rs
use crate::schema::{CanonicalRecord, Field};

/// Position of each canonical field inside one source header.
///
/// Built once per resolved header, then applied to every row of that source.
/// The first header cell matching a canonical name (ignoring case) wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldMap {
    positions: [Option<usize>; 8],
}

impl FieldMap {
    pub fn from_header(header: &[String]) -> Self {
        let mut positions = [None; 8];
        for (i, name) in header.iter().enumerate() {
            if let Some(field) = Field::from_header(name) {
                positions[field.index()].get_or_insert(i);
            }
        }
        Self { positions }
    }

    pub fn position(&self, field: Field) -> Option<usize> {
        self.positions[field.index()]
    }

    /// Canonical fields present in the header, in canonical order.
    pub fn mapped(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL
            .into_iter()
            .filter(|f| self.position(*f).is_some())
    }

    /// Build the canonical record for one raw row. Fields whose position lies
    /// past the end of the row come out empty.
    pub fn apply(&self, row: &[String]) -> CanonicalRecord {
        let mut rec = CanonicalRecord::default();
        for field in Field::ALL {
            if let Some(cell) = self.position(field).and_then(|i| row.get(i)) {
                rec.set(field, cell.as_str());
            }
        }
        rec
    }
}

/// Normalize a single row against its header.
pub fn normalize(header: &[String], row: &[String]) -> CanonicalRecord {
    FieldMap::from_header(header).apply(row)
}

/// Column indices of `header` in display order.
///
/// The `term` column is moved to sit right after `course` when both exist.
/// "Adjacent" means term directly follows course: a `Term, Course` header is
/// still reordered to `Course, Term`. Only the presentation order changes;
/// raw indices still feed the same fields.
pub fn display_order(header: &[String]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..header.len()).collect();
    let find = |field: Field| header.iter().position(|h| Field::from_header(h) == Some(field));

    if let (Some(course), Some(term)) = (find(Field::Course), find(Field::Term)) {
        if term != course + 1 {
            order.remove(term);
            let at = order
                .iter()
                .position(|&i| i == course)
                .map_or(order.len(), |p| p + 1);
            order.insert(at, term);
        }
    }
    order
}

/// `header` reordered for display, see [`display_order`].
pub fn display_header(header: &[String]) -> Vec<String> {
    display_order(header)
        .into_iter()
        .map(|i| header[i].clone())
        .collect()
}
