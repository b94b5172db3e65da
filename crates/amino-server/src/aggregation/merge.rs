//! Merging partial records into one composite record

use amino_common::types::{
    DiseaseAssociation, DrugAssociation, InteractionPartner, ProteinRecord, SourceKind,
    StructureEntry,
};
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::sources::PartialRecord;

/// Merge partial records fetched for `identifier`
///
/// Partials are applied in source priority order. Scalar fields keep the first
/// non-empty value, collections are unioned and de-duplicated. Callers must
/// have dropped partials tagged with another identifier.
pub fn merge(identifier: &str, mut partials: Vec<PartialRecord>) -> ProteinRecord {
    partials.sort_by_key(|p| p.source);

    let mut record = ProteinRecord::empty(identifier);
    let mut structures = Vec::new();
    let mut interactions = Vec::new();
    let mut diseases = Vec::new();
    let mut drugs = Vec::new();
    let mut function = None;
    let mut summary = None;

    for partial in partials {
        debug_assert_eq!(partial.identifier, identifier);

        if !record.sources.contains(&partial.source) {
            record.sources.push(partial.source);
        }

        fill(&mut record.accession, partial.accession);
        fill(&mut record.protein_name, partial.protein_name);
        fill(&mut record.organism, partial.organism);
        if record.sequence.is_none() && partial.sequence.is_some() {
            record.sequence = partial.sequence;
            record.sequence_length = partial.sequence_length;
        }
        fill(&mut record.interaction_network_url, partial.interaction_network_url);
        fill(&mut function, partial.function);
        fill(&mut summary, partial.summary);

        union(&mut record.gene_names, partial.gene_names);
        union(&mut record.subcellular_locations, partial.subcellular_locations);
        for term in partial.go_terms {
            if !record.go_terms.iter().any(|t| t.id == term.id) {
                record.go_terms.push(term);
            }
        }

        structures.extend(partial.structures);
        interactions.extend(partial.interactions);
        diseases.extend(partial.diseases);
        drugs.extend(partial.drugs);
    }

    record.gene_symbol = record.gene_names.first().cloned();
    record.structures = merge_structures(structures);
    record.interactions = merge_interactions(interactions);
    record.diseases = merge_diseases(diseases);
    record.drugs = merge_drugs(drugs);

    match (function, summary) {
        (Some(f), Some(s)) => {
            record.function = Some(f);
            record.summary = Some(s);
        },
        (Some(f), None) => {
            record.summary = Some(f.clone());
            record.function = Some(f);
        },
        (None, Some(s)) => {
            record.function = Some(s.clone());
            record.summary = Some(s);
        },
        (None, None) => record.summary = synthesize_summary(&record),
    }

    record
}

fn fill(slot: &mut Option<String>, candidate: Option<String>) {
    if slot.is_none() {
        *slot = candidate.filter(|v| !v.trim().is_empty());
    }
}

fn union(target: &mut Vec<String>, values: Vec<String>) {
    for value in values {
        if !value.trim().is_empty() && !target.contains(&value) {
            target.push(value);
        }
    }
}

/// `"{name} ({gene}) is a protein found in {organism}."`, or `None` with nothing to say
fn synthesize_summary(record: &ProteinRecord) -> Option<String> {
    let subject = match (&record.protein_name, &record.gene_symbol) {
        (Some(name), Some(gene)) => format!("{} ({})", name, gene),
        (Some(name), None) => name.clone(),
        (None, Some(gene)) => gene.clone(),
        (None, None) => return None,
    };

    Some(match &record.organism {
        Some(organism) => format!("{} is a protein found in {}.", subject, organism),
        None => format!("{} is a protein.", subject),
    })
}

fn resolution_order(a: &StructureEntry, b: &StructureEntry) -> Ordering {
    match (a.resolution, b.resolution) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Experimental structures by resolution (unknown last), then predicted models
fn merge_structures(structures: Vec<StructureEntry>) -> Vec<StructureEntry> {
    let mut seen = HashSet::new();
    let mut unique: Vec<StructureEntry> = structures
        .into_iter()
        .filter(|s| seen.insert((s.source, s.id.clone())))
        .collect();

    unique.sort_by(|a, b| {
        let predicted_a = a.source == SourceKind::Alphafold;
        let predicted_b = b.source == SourceKind::Alphafold;
        predicted_a
            .cmp(&predicted_b)
            .then_with(|| resolution_order(a, b))
    });

    unique
}

fn merge_interactions(interactions: Vec<InteractionPartner>) -> Vec<InteractionPartner> {
    let mut merged: Vec<InteractionPartner> = Vec::new();

    for partner in interactions {
        match merged.iter_mut().find(|p| p.identifier == partner.identifier) {
            Some(existing) if partner.score > existing.score => *existing = partner,
            Some(_) => {},
            None => merged.push(partner),
        }
    }

    merged.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    merged
}

fn merge_diseases(diseases: Vec<DiseaseAssociation>) -> Vec<DiseaseAssociation> {
    let mut merged: Vec<DiseaseAssociation> = Vec::new();

    for disease in diseases {
        let key = disease.name.to_lowercase();
        match merged.iter_mut().find(|d| d.name.to_lowercase() == key) {
            Some(existing) if disease.score > existing.score => {
                let description = existing.description.take();
                *existing = disease;
                if existing.description.is_none() {
                    existing.description = description;
                }
            },
            Some(existing) => {
                if existing.description.is_none() {
                    existing.description = disease.description;
                }
            },
            None => merged.push(disease),
        }
    }

    merged
}

fn merge_drugs(drugs: Vec<DrugAssociation>) -> Vec<DrugAssociation> {
    let mut seen = HashSet::new();
    drugs
        .into_iter()
        .filter(|d| seen.insert(d.name.to_lowercase()))
        .collect()
}
