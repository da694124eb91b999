use tracing::debug;

use super::catalog::Catalog;
use super::config::DerogationConfig;
use super::domain::{Requirement, SimilarCase, Situation};

/// Score every catalog example against the situation's circumstance keywords.
pub(crate) fn find_similar(
    catalog: &Catalog,
    situation: &Situation,
    requirement: &Requirement,
    config: &DerogationConfig,
) -> Vec<SimilarCase> {
    let mut cases: Vec<SimilarCase> = catalog
        .scenarios()
        .iter()
        .flat_map(|scenario| {
            scenario.examples.iter().map(move |example| (scenario, example))
        })
        .filter_map(|(scenario, example)| {
            let text = example.situation.to_lowercase();
            let hits = situation
                .circumstances()
                .iter()
                .filter(|c| text.contains(c.kind.keyword()))
                .count() as u32;
            let similarity = (config.similarity_base as u32 + hits * config.similarity_step as u32)
                .min(100) as u8;

            (similarity > config.similarity_cutoff).then(|| SimilarCase {
                scenario_id: scenario.id.to_string(),
                situation: example.situation.to_string(),
                outcome: example.outcome,
                counterparty: example.counterparty.to_string(),
                conditions: (!example.conditions.is_empty())
                    .then(|| example.conditions.iter().map(|c| c.to_string()).collect()),
                similarity,
                lessons: example.lessons.iter().map(|l| l.to_string()).collect(),
            })
        })
        .collect();

    cases.sort_by(|a, b| b.similarity.cmp(&a.similarity));

    debug!(
        requirement = %requirement.id,
        matches = cases.len(),
        "similar cases scored"
    );

    cases
}
