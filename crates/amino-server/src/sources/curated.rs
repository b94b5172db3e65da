//! Curated reference data for well-known human genes
//!
//! Used to short-circuit lookups of the most common genes (symbol to UniProt
//! accession and NCBI gene id), and as the backing table for disease and drug
//! associations where no open API exists or the API is unavailable.

use amino_common::types::{DiseaseAssociation, DrugAssociation, SourceKind};

/// Gene symbol to reviewed human UniProt accession
const ACCESSIONS: &[(&str, &str)] = &[
    ("TP53", "P04637"),
    ("BRCA1", "P38398"),
    ("BRCA2", "P51587"),
    ("EGFR", "P00533"),
    ("INS", "P01308"),
    ("APP", "P05067"),
    ("APOE", "P02649"),
    ("TNF", "P01375"),
    ("IL6", "P05231"),
    ("ALB", "P02768"),
    ("KRAS", "P01116"),
    ("PTEN", "P60484"),
    ("VEGFA", "P15692"),
    ("SOD1", "P00441"),
    ("CFTR", "P13569"),
];

/// Gene symbol to NCBI Gene id
const GENE_IDS: &[(&str, &str)] = &[
    ("TP53", "7157"),
    ("BRCA1", "672"),
    ("BRCA2", "675"),
    ("EGFR", "1956"),
    ("INS", "3630"),
    ("APP", "351"),
    ("APOE", "348"),
    ("TNF", "7124"),
    ("IL6", "3569"),
    ("ALB", "213"),
    ("KRAS", "3845"),
    ("PTEN", "5728"),
    ("VEGFA", "7422"),
    ("SOD1", "6647"),
    ("CFTR", "1080"),
];

pub struct CuratedDisease {
    pub name: &'static str,
    pub description: &'static str,
    pub score: f64,
}

pub struct CuratedDrug {
    pub name: &'static str,
    pub drug_type: &'static str,
    pub mechanism: &'static str,
    pub groups: &'static [&'static str],
}

const HBOC: CuratedDisease = CuratedDisease {
    name: "Hereditary breast and ovarian cancer syndrome",
    description: "An autosomal dominant syndrome associated with increased risk of breast and ovarian cancer.",
    score: 0.9,
};

const COLORECTAL_CANCER: CuratedDisease = CuratedDisease {
    name: "Colorectal cancer",
    description: "A common malignancy associated with genetic and environmental risk factors.",
    score: 0.8,
};

const ALZHEIMERS: CuratedDisease = CuratedDisease {
    name: "Alzheimer's disease",
    description: "A progressive neurodegenerative disorder characterized by memory loss and cognitive decline.",
    score: 0.9,
};

const DISEASES: &[(&str, &[CuratedDisease])] = &[
    (
        "TP53",
        &[
            CuratedDisease {
                name: "Li-Fraumeni syndrome",
                description: "A rare autosomal dominant syndrome predisposing to multiple forms of cancer.",
                score: 0.9,
            },
            COLORECTAL_CANCER,
            CuratedDisease {
                name: "Breast cancer",
                description: "A common malignancy in women.",
                score: 0.7,
            },
        ],
    ),
    (
        "BRCA1",
        &[
            HBOC,
            CuratedDisease {
                name: "Breast cancer",
                description: "A common malignancy in women.",
                score: 0.9,
            },
            CuratedDisease {
                name: "Ovarian cancer",
                description: "A malignancy of the ovaries.",
                score: 0.8,
            },
        ],
    ),
    (
        "BRCA2",
        &[
            HBOC,
            CuratedDisease {
                name: "Pancreatic cancer",
                description: "A malignant neoplasm of the pancreas.",
                score: 0.8,
            },
            CuratedDisease {
                name: "Fanconi anemia",
                description: "A rare genetic disorder affecting bone marrow.",
                score: 0.7,
            },
        ],
    ),
    (
        "EGFR",
        &[
            CuratedDisease {
                name: "Non-small cell lung cancer",
                description: "A type of lung cancer that is the most common form of lung cancer.",
                score: 0.9,
            },
            CuratedDisease {
                name: "Glioblastoma",
                description: "A highly aggressive brain tumor.",
                score: 0.8,
            },
            CuratedDisease {
                score: 0.7,
                ..COLORECTAL_CANCER
            },
        ],
    ),
    (
        "INS",
        &[
            CuratedDisease {
                name: "Diabetes mellitus",
                description: "A metabolic disorder characterized by hyperglycemia resulting from defects in insulin secretion, insulin action, or both.",
                score: 0.9,
            },
            CuratedDisease {
                name: "Hyperinsulinemic hypoglycemia",
                description: "A condition characterized by abnormally high levels of insulin in the blood, causing hypoglycemia.",
                score: 0.8,
            },
        ],
    ),
    (
        "APP",
        &[
            ALZHEIMERS,
            CuratedDisease {
                name: "Cerebral amyloid angiopathy",
                description: "A condition in which amyloid deposits form in the walls of blood vessels of the brain.",
                score: 0.8,
            },
        ],
    ),
    (
        "APOE",
        &[
            ALZHEIMERS,
            CuratedDisease {
                name: "Hyperlipidemia",
                description: "Abnormally elevated levels of lipids in the blood.",
                score: 0.8,
            },
            CuratedDisease {
                name: "Cardiovascular disease",
                description: "Diseases affecting the heart and blood vessels.",
                score: 0.7,
            },
        ],
    ),
];

const APPROVED: &[&str] = &["approved"];

const OLAPARIB: CuratedDrug = CuratedDrug {
    name: "Olaparib",
    drug_type: "small molecule",
    mechanism: "PARP inhibitor",
    groups: APPROVED,
};

const DRUGS: &[(&str, &[CuratedDrug])] = &[
    (
        "TP53",
        &[
            CuratedDrug {
                name: "APR-246",
                drug_type: "small molecule",
                mechanism: "p53 reactivator",
                groups: &["investigational"],
            },
            CuratedDrug {
                name: "COTI-2",
                drug_type: "small molecule",
                mechanism: "p53 reactivator",
                groups: &["experimental"],
            },
        ],
    ),
    (
        "BRCA1",
        &[
            OLAPARIB,
            CuratedDrug {
                name: "Talazoparib",
                ..OLAPARIB
            },
        ],
    ),
    (
        "BRCA2",
        &[
            OLAPARIB,
            CuratedDrug {
                name: "Rucaparib",
                ..OLAPARIB
            },
        ],
    ),
    (
        "EGFR",
        &[
            CuratedDrug {
                name: "Gefitinib",
                drug_type: "small molecule",
                mechanism: "EGFR inhibitor",
                groups: APPROVED,
            },
            CuratedDrug {
                name: "Erlotinib",
                drug_type: "small molecule",
                mechanism: "EGFR inhibitor",
                groups: APPROVED,
            },
            CuratedDrug {
                name: "Cetuximab",
                drug_type: "antibody",
                mechanism: "EGFR inhibitor",
                groups: APPROVED,
            },
        ],
    ),
    (
        "INS",
        &[
            CuratedDrug {
                name: "Insulin glargine",
                drug_type: "protein",
                mechanism: "Insulin receptor agonist",
                groups: APPROVED,
            },
            CuratedDrug {
                name: "Insulin lispro",
                drug_type: "protein",
                mechanism: "Insulin receptor agonist",
                groups: APPROVED,
            },
        ],
    ),
    (
        "APP",
        &[
            CuratedDrug {
                name: "Aducanumab",
                drug_type: "antibody",
                mechanism: "Amyloid beta-directed antibody",
                groups: APPROVED,
            },
            CuratedDrug {
                name: "Lecanemab",
                drug_type: "antibody",
                mechanism: "Amyloid beta-directed antibody",
                groups: APPROVED,
            },
        ],
    ),
    (
        "APOE",
        &[
            CuratedDrug {
                name: "Statins",
                drug_type: "small molecule",
                mechanism: "HMG-CoA reductase inhibitor",
                groups: APPROVED,
            },
            CuratedDrug {
                name: "Lomitapide",
                drug_type: "small molecule",
                mechanism: "Microsomal triglyceride transfer protein inhibitor",
                groups: APPROVED,
            },
        ],
    ),
];

/// How a curated entry was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CuratedMatch {
    /// The symbol itself is curated
    Exact,
    /// A curated symbol contains, or is contained in, the requested one
    Similar(&'static str),
}

fn exact<T: ?Sized>(table: &'static [(&'static str, &'static T)], symbol: &str) -> Option<&'static T> {
    let upper = symbol.trim().to_uppercase();
    table
        .iter()
        .find(|(gene, _)| *gene == upper)
        .map(|(_, value)| *value)
}

fn similar<T: ?Sized>(
    table: &'static [(&'static str, &'static T)],
    symbol: &str,
) -> Option<(&'static str, &'static T)> {
    let lower = symbol.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }
    table.iter().copied().find(|(gene, _)| {
        let gene = gene.to_lowercase();
        gene.contains(&lower) || lower.contains(&gene)
    })
}

pub fn accession_for(symbol: &str) -> Option<&'static str> {
    exact(ACCESSIONS, symbol)
}

pub fn gene_id_for(symbol: &str) -> Option<&'static str> {
    exact(GENE_IDS, symbol)
}

pub fn diseases_for(symbol: &str) -> Option<&'static [CuratedDisease]> {
    exact(DISEASES, symbol)
}

pub fn similar_diseases(symbol: &str) -> Option<(&'static str, &'static [CuratedDisease])> {
    similar(DISEASES, symbol)
}

/// Exact match first, then the first similar gene
pub fn drugs_for(symbol: &str) -> Option<(CuratedMatch, &'static [CuratedDrug])> {
    if let Some(drugs) = exact(DRUGS, symbol) {
        return Some((CuratedMatch::Exact, drugs));
    }
    similar(DRUGS, symbol).map(|(gene, drugs)| (CuratedMatch::Similar(gene), drugs))
}

impl CuratedDisease {
    pub fn to_association(&self, source: SourceKind) -> DiseaseAssociation {
        DiseaseAssociation {
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            score: Some(self.score),
            source,
        }
    }
}

impl CuratedDrug {
    pub fn to_association(&self, source: SourceKind) -> DrugAssociation {
        DrugAssociation {
            name: self.name.to_string(),
            drug_type: Some(self.drug_type.to_string()),
            mechanism: Some(self.mechanism.to_string()),
            groups: self.groups.iter().map(|g| g.to_string()).collect(),
            source,
        }
    }
}
