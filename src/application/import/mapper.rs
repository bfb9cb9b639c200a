use std::collections::BTreeMap;
use tracing::{debug, warn};
use crate::domain::models::{
    ColumnAssignment, ColumnMapping, ColumnOverride, FieldSchema, FieldSpec, MappingDiagnosis,
    MappingMode, MatchSource,
};

/// Shortest header that may match as a substring of a longer term.
const MIN_REVERSE_MATCH_LEN: usize = 3;

struct Resolver<'a> {
    headers: &'a [String],
    schema: &'static FieldSchema,
    claimed: Vec<bool>,
    assigned: Vec<Option<ColumnAssignment>>,
}

impl<'a> Resolver<'a> {
    fn new(headers: &'a [String], schema: &'static FieldSchema) -> Self {
        Self {
            headers,
            schema,
            claimed: vec![false; headers.len()],
            assigned: vec![None; schema.fields.len()],
        }
    }

    fn assign(&mut self, field_index: usize, column: usize, source: MatchSource) {
        let field = &self.schema.fields[field_index];
        debug!(
            "Mapped header '{}' -> '{}' ({:?})",
            self.headers[column], field.name, source
        );
        self.claimed[column] = true;
        self.assigned[field_index] = Some(ColumnAssignment {
            field: field.name,
            header: self.headers[column].clone(),
            column,
            source,
        });
    }

    fn find_unclaimed(&self, predicate: impl Fn(&str) -> bool) -> Option<usize> {
        self.headers
            .iter()
            .enumerate()
            .find(|(i, h)| !self.claimed[*i] && predicate(h.as_str()))
            .map(|(i, _)| i)
    }

    fn apply_overrides(&mut self, overrides: &ColumnOverride) {
        for (source, target) in overrides {
            let Some(field_index) = self.schema.index_of(target.trim()) else {
                warn!("Ignoring manual mapping '{}' -> '{}': unknown field", source, target);
                continue;
            };
            if self.assigned[field_index].is_some() {
                warn!("Ignoring manual mapping '{}' -> '{}': field already mapped", source, target);
                continue;
            }
            match self.find_unclaimed(|h| h == source.trim()) {
                Some(column) => self.assign(field_index, column, MatchSource::Override),
                None => warn!("Ignoring manual mapping '{}' -> '{}': header not present", source, target),
            }
        }
    }

    /// Runs one matching pass over every still-unassigned field.
    fn pass(&mut self, matcher: impl Fn(&FieldSpec, &str) -> Option<MatchSource>) {
        for field_index in 0..self.schema.fields.len() {
            if self.assigned[field_index].is_some() {
                continue;
            }
            let field = &self.schema.fields[field_index];
            let hit = self
                .headers
                .iter()
                .enumerate()
                .filter(|(i, _)| !self.claimed[*i])
                .find_map(|(i, h)| matcher(field, h).map(|source| (i, source)));
            if let Some((column, source)) = hit {
                self.assign(field_index, column, source);
            }
        }
    }

    fn finish(self) -> (ColumnMapping, Vec<&'static str>, Vec<String>) {
        let missing = self
            .schema
            .fields
            .iter()
            .zip(&self.assigned)
            .filter(|(f, a)| f.required && a.is_none())
            .map(|(f, _)| f.name)
            .collect();
        let unrecognized = self
            .headers
            .iter()
            .zip(&self.claimed)
            .filter(|(h, claimed)| !**claimed && !h.is_empty())
            .map(|(h, _)| h.clone())
            .collect();
        let mapping = ColumnMapping::new(self.assigned.into_iter().flatten().collect());
        (mapping, missing, unrecognized)
    }
}

fn exact_match(field: &FieldSpec, header: &str) -> Option<MatchSource> {
    if header == field.name {
        Some(MatchSource::Exact)
    } else if field.aliases.contains(&header) {
        Some(MatchSource::Alias)
    } else {
        None
    }
}

fn synonym_match(field: &FieldSpec, header: &str) -> Option<MatchSource> {
    field
        .match_terms()
        .any(|term| term.eq_ignore_ascii_case(header.trim()))
        .then_some(MatchSource::Synonym)
}

fn substring_match(field: &FieldSpec, header: &str) -> Option<MatchSource> {
    field
        .match_terms()
        .any(|term| is_substring_match(header, term))
        .then_some(MatchSource::Substring)
}

/// Case-insensitive containment in either direction.
pub fn is_substring_match(header: &str, term: &str) -> bool {
    let header = header.trim().to_lowercase();
    if header.is_empty() {
        return false;
    }
    let term = term.to_lowercase();
    header.contains(&term) || (header.len() >= MIN_REVERSE_MATCH_LEN && term.contains(&header))
}

/// Every header that substring-matches any term of `field`, in term order.
pub fn suggest_headers(headers: &[String], field: &FieldSpec) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();
    for term in field.match_terms() {
        for header in headers {
            if is_substring_match(header, term) && !suggestions.contains(header) {
                suggestions.push(header.clone());
            }
        }
    }
    suggestions
}

/// Resolves source headers against `schema`.
///
/// Manual overrides win for every field they name. Remaining fields go
/// through global passes (exact, then synonym and substring in
/// `MappingMode::Synonyms`) so a heuristic match never takes a header that an
/// exact match elsewhere would claim.
pub fn resolve_columns(
    headers: &[String],
    schema: &'static FieldSchema,
    overrides: Option<&ColumnOverride>,
    mode: MappingMode,
) -> (ColumnMapping, MappingDiagnosis) {
    let mut resolver = Resolver::new(headers, schema);
    if let Some(overrides) = overrides {
        resolver.apply_overrides(overrides);
    }
    resolver.pass(exact_match);
    if mode == MappingMode::Synonyms {
        resolver.pass(synonym_match);
        resolver.pass(substring_match);
    }

    let (mapping, missing, unrecognized_headers) = resolver.finish();
    let mut suggested_mappings = BTreeMap::new();
    for name in &missing {
        if let Some(field) = schema.field(name) {
            suggested_mappings.insert(name.to_string(), suggest_headers(headers, field));
        }
    }

    let diagnosis = MappingDiagnosis {
        is_valid: missing.is_empty(),
        missing_required: missing.iter().map(|s| s.to_string()).collect(),
        unrecognized_headers,
        suggested_mappings,
    };
    if !diagnosis.is_valid {
        warn!(
            "Column mapping is missing required fields: {:?}",
            diagnosis.missing_required
        );
    }
    (mapping, diagnosis)
}

/// Checks headers against `schema` without an override.
pub fn validate_column_mapping(
    headers: &[String],
    schema: &'static FieldSchema,
    mode: MappingMode,
) -> MappingDiagnosis {
    resolve_columns(headers, schema, None, mode).1
}
