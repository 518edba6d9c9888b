// Sheet row normalization: header aliasing into typed interactions.
//
// The DM and comment sheets were built by hand and their headers drift:
// "ID instagram" vs "ID_instagram", "Conteúdo" vs "Comentario", "DATA" vs
// "Data". Each canonical field has an ordered list of candidate headers, and
// headers are compared on a normalized key (lower-case, accents folded,
// separators collapsed), so new spellings only need a table entry.

use crate::interactions::{Interaction, InteractionKind, Sentiment};

/// Canonical interaction fields read from a sheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ProfileId,
    Handle,
    Text,
    Date,
    Time,
    Timestamp,
    Sentiment,
}

/// Ordered candidate header names for one field. The first candidate whose
/// column holds a non-empty cell wins.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    pub field: Field,
    pub candidates: &'static [&'static str],
}

pub const DM_ALIASES: &[FieldAliases] = &[
    FieldAliases { field: Field::ProfileId, candidates: &["ID instagram", "ID_instagram"] },
    FieldAliases { field: Field::Handle, candidates: &["@", "Handle"] },
    FieldAliases { field: Field::Text, candidates: &["Interação", "Mensagem"] },
    FieldAliases { field: Field::Date, candidates: &["DATA", "Data"] },
    FieldAliases { field: Field::Time, candidates: &["HORA", "Hora"] },
    FieldAliases { field: Field::Timestamp, candidates: &["TimeStamp", "Timestamp"] },
    FieldAliases { field: Field::Sentiment, candidates: &["Sentimento", "Sentiment"] },
];

pub const COMMENT_ALIASES: &[FieldAliases] = &[
    FieldAliases { field: Field::ProfileId, candidates: &["ID_instagram", "ID instagram"] },
    FieldAliases { field: Field::Handle, candidates: &["IG_LEAD", "@", "Handle"] },
    FieldAliases { field: Field::Text, candidates: &["Conteúdo", "Comentario", "Comentário"] },
    FieldAliases { field: Field::Date, candidates: &["Data", "DATA"] },
    FieldAliases { field: Field::Time, candidates: &["Hora", "HORA"] },
    FieldAliases { field: Field::Timestamp, candidates: &["Timestamp", "TimeStamp"] },
    FieldAliases { field: Field::Sentiment, candidates: &["Sentimento", "Sentiment"] },
];

/// The alias table for a given interaction kind.
pub fn aliases_for(kind: InteractionKind) -> &'static [FieldAliases] {
    match kind {
        InteractionKind::DirectMessage => DM_ALIASES,
        InteractionKind::Comment => COMMENT_ALIASES,
    }
}

/// Fold a header into its comparison key.
///
/// "ID instagram", "ID_instagram" and " id  INSTAGRAM " all map to
/// "id instagram"; "Comentário" and "comentario" both map to "comentario".
pub fn normalize_header(header: &str) -> String {
    let mut key = String::with_capacity(header.len());
    let mut pending_space = false;

    for c in header.trim().chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_space = !key.is_empty();
            continue;
        }
        if pending_space {
            key.push(' ');
            pending_space = false;
        }
        key.push(fold_accent(c));
    }

    key
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// Normalized header keys for one sheet, indexed by column.
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    keys: Vec<String>,
}

impl HeaderIndex {
    pub fn new(headers: &[String]) -> Self {
        Self {
            keys: headers.iter().map(|h| normalize_header(h)).collect(),
        }
    }

    /// Value of the first candidate column with a non-empty cell in `row`,
    /// or "" when none matches. Cells past the end of a short row are empty.
    pub fn lookup<'r>(&self, row: &'r [String], candidates: &[&str]) -> &'r str {
        for candidate in candidates {
            let wanted = normalize_header(candidate);
            for (idx, key) in self.keys.iter().enumerate() {
                if *key != wanted {
                    continue;
                }
                if let Some(cell) = row.get(idx) {
                    let cell = cell.trim();
                    if !cell.is_empty() {
                        return cell;
                    }
                }
            }
        }
        ""
    }
}

fn field_value<'r>(
    index: &HeaderIndex,
    aliases: &[FieldAliases],
    row: &'r [String],
    field: Field,
) -> &'r str {
    aliases
        .iter()
        .find(|a| a.field == field)
        .map(|a| index.lookup(row, a.candidates))
        .unwrap_or("")
}

/// Map one data row onto an interaction using the kind's alias table.
pub fn normalize_row(kind: InteractionKind, index: &HeaderIndex, row: &[String]) -> Interaction {
    let aliases = aliases_for(kind);
    let get = |field| field_value(index, aliases, row, field).to_string();

    let handle = get(Field::Handle);

    Interaction {
        kind,
        profile_id: get(Field::ProfileId),
        handle: (!handle.is_empty()).then_some(handle),
        text: get(Field::Text),
        date: get(Field::Date),
        time: get(Field::Time),
        timestamp: get(Field::Timestamp),
        sentiment: Sentiment::from_label(field_value(index, aliases, row, Field::Sentiment)),
    }
}

/// Convert a raw `values` grid (header row first) into interactions.
///
/// An empty grid or a header-only grid yields no interactions. Rows whose
/// cells are all blank are skipped.
pub fn normalize_values(kind: InteractionKind, values: &[Vec<String>]) -> Vec<Interaction> {
    let Some((headers, rows)) = values.split_first() else {
        return Vec::new();
    };

    let index = HeaderIndex::new(headers);

    rows.iter()
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .map(|row| normalize_row(kind, &index, row))
        .collect()
}
