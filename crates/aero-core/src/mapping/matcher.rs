//! Keyword matcher over the static rule tables.

use std::collections::HashSet;

use super::rules::{
    AccessPattern, AccessType, Latency, QueryFrequency, VolumeEstimate, AGENT_RULES,
    WORKFLOW_RULES,
};

/// A workflow -> entity tuple produced by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowMatch {
    pub entity: &'static str,
    pub access_type: AccessType,
    pub is_primary: bool,
    pub volume: VolumeEstimate,
    pub latency: Latency,
}

/// An agent -> entity tuple produced by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentMatch {
    pub entity: &'static str,
    pub access_pattern: AccessPattern,
    pub latency: Latency,
    pub frequency: QueryFrequency,
    pub critical: bool,
}

fn matches_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Match a workflow's text against the rule table.
///
/// The blob is name plus description, lowercased. Tuples are
/// deduplicated by (entity, access type), first occurrence winning.
pub fn match_workflow(name: &str, description: Option<&str>) -> Vec<WorkflowMatch> {
    let text = format!("{} {}", name, description.unwrap_or("")).to_lowercase();
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for rule in WORKFLOW_RULES {
        if matches_any(&text, rule.keywords) && seen.insert((rule.entity, rule.access_type.as_str()))
        {
            matches.push(WorkflowMatch {
                entity: rule.entity,
                access_type: rule.access_type,
                is_primary: rule.is_primary,
                volume: rule.volume,
                latency: rule.latency,
            });
        }
    }

    matches
}

/// Match an agent's text against the rule table.
///
/// The blob is name plus type plus description, lowercased. Multi-entity
/// rules expand to one tuple per entity; tuples are deduplicated by
/// (entity, access pattern), first occurrence winning.
pub fn match_agent(name: &str, kind: Option<&str>, description: Option<&str>) -> Vec<AgentMatch> {
    let text = format!(
        "{} {} {}",
        name,
        kind.unwrap_or(""),
        description.unwrap_or("")
    )
    .to_lowercase();
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for rule in AGENT_RULES {
        if !matches_any(&text, rule.keywords) {
            continue;
        }
        for entity in rule.entities {
            if seen.insert((*entity, rule.access_pattern.as_str())) {
                matches.push(AgentMatch {
                    entity,
                    access_pattern: rule.access_pattern,
                    latency: rule.latency,
                    frequency: rule.frequency,
                    critical: rule.critical,
                });
            }
        }
    }

    matches
}
