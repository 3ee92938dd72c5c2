//! Company opportunity linking.
//!
//! A fixed table of business rules links pre-existing Company nodes
//! (matched by is_airline_company) to Workflow nodes with weighted
//! OPPORTUNITY_FOR edges. Rules are data; each compiles to one Cypher
//! query that MERGEs the edges and returns how many pairs it touched.
//! Company nodes are never created here.

use anyhow::Result;
use neo4rs::Query;
use tracing::info;

use crate::GraphClient;

/// Priority stamped on an opportunity edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpportunityPriority {
    Immediate,
    High,
}

impl OpportunityPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityPriority::Immediate => "IMMEDIATE",
            OpportunityPriority::High => "HIGH",
        }
    }
}

/// One opportunity-linking rule.
///
/// Workflow predicates are AND-combined; a minimum agentic potential
/// pulls the HAS_VERSION join into the match. The optional fit flag is
/// an extra boolean property stamped on the edge.
#[derive(Debug, Clone, Copy)]
pub struct OpportunityRule {
    pub label: &'static str,
    pub reason: &'static str,
    pub confidence: f64,
    pub priority: OpportunityPriority,
    pub code_prefixes: &'static [&'static str],
    pub domain: Option<&'static str>,
    pub subdomain_contains: Option<&'static str>,
    pub min_agentic_potential: Option<i64>,
    pub fit_flag: Option<&'static str>,
}

/// Opportunity rules, applied in order.
pub const OPPORTUNITY_RULES: &[OpportunityRule] = &[
    OpportunityRule {
        label: "Baggage workflows",
        reason: "number_labs_baggage_focus",
        confidence: 0.98,
        priority: OpportunityPriority::Immediate,
        code_prefixes: &["WF-BAG", "WF-PRIORITY-002"],
        domain: None,
        subdomain_contains: None,
        min_agentic_potential: None,
        fit_flag: Some("number_labs_fit"),
    },
    OpportunityRule {
        label: "Flight operations",
        reason: "copa_airlines_target",
        confidence: 0.95,
        priority: OpportunityPriority::High,
        code_prefixes: &["WF-FLT", "WF-PRIORITY-001"],
        domain: Some("Flight Operations"),
        subdomain_contains: None,
        min_agentic_potential: Some(8),
        fit_flag: Some("copa_fit"),
    },
    OpportunityRule {
        label: "High-value passenger protection",
        reason: "revenue_protection_hauenstein",
        confidence: 0.92,
        priority: OpportunityPriority::High,
        code_prefixes: &["WF-HVPAX", "WF-PRIORITY-003"],
        domain: None,
        subdomain_contains: None,
        min_agentic_potential: None,
        fit_flag: None,
    },
    OpportunityRule {
        label: "Disruption management",
        reason: "disruption_management",
        confidence: 0.90,
        priority: OpportunityPriority::High,
        code_prefixes: &[],
        domain: None,
        subdomain_contains: Some("Disruption"),
        min_agentic_potential: Some(8),
        fit_flag: None,
    },
];

/// Linked-pair count for one rule.
#[derive(Debug, Clone)]
pub struct OpportunityOutcome {
    pub label: &'static str,
    pub linked: i64,
}

/// Compile a rule to its Cypher text. Code prefixes are const table
/// entries, so they are inlined rather than passed as parameters.
fn cypher_for(rule: &OpportunityRule) -> String {
    let mut conditions: Vec<String> = Vec::new();

    if rule.domain.is_some() {
        conditions.push("w.domain = $domain".to_string());
    }
    if !rule.code_prefixes.is_empty() {
        let prefix_checks: Vec<String> = rule
            .code_prefixes
            .iter()
            .map(|p| format!("w.code STARTS WITH '{}'", p))
            .collect();
        conditions.push(format!("({})", prefix_checks.join(" OR ")));
    }
    if rule.subdomain_contains.is_some() {
        conditions.push("w.subdomain CONTAINS $subdomain".to_string());
    }
    if rule.min_agentic_potential.is_some() {
        conditions.push("v.agentic_potential >= $min_potential".to_string());
    }

    let workflow_match = if rule.min_agentic_potential.is_some() {
        "MATCH (w:Workflow)-[:HAS_VERSION]->(v:WorkflowVersion)"
    } else {
        "MATCH (w:Workflow)"
    };

    let mut set_clauses = vec![
        "r.confidence = $confidence".to_string(),
        "r.reason = $reason".to_string(),
        "r.priority = $priority".to_string(),
    ];
    if let Some(flag) = rule.fit_flag {
        set_clauses.push(format!("r.{} = true", flag));
    }

    format!(
        "MATCH (c:Company)
         WHERE c.is_airline_company = true
         {}
         WHERE {}
         MERGE (c)-[r:OPPORTUNITY_FOR]->(w)
         SET {}
         RETURN count(r) as created",
        workflow_match,
        conditions.join(" AND "),
        set_clauses.join(", "),
    )
}

fn build_query(rule: &OpportunityRule) -> Query {
    let mut query = Query::new(cypher_for(rule))
        .param("confidence", rule.confidence)
        .param("reason", rule.reason)
        .param("priority", rule.priority.as_str());

    if let Some(domain) = rule.domain {
        query = query.param("domain", domain);
    }
    if let Some(subdomain) = rule.subdomain_contains {
        query = query.param("subdomain", subdomain);
    }
    if let Some(min) = rule.min_agentic_potential {
        query = query.param("min_potential", min);
    }

    query
}

/// Apply every opportunity rule, in table order.
pub async fn link_opportunities(client: &GraphClient) -> Result<Vec<OpportunityOutcome>> {
    let mut outcomes = Vec::new();

    for rule in OPPORTUNITY_RULES {
        let linked: i64 = client
            .query_scalar(build_query(rule), "created")
            .await?
            .unwrap_or(0);

        info!(rule = rule.label, linked, "Linked opportunities");
        outcomes.push(OpportunityOutcome {
            label: rule.label,
            linked,
        });
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_values() {
        assert_eq!(OPPORTUNITY_RULES.len(), 4);

        let baggage = &OPPORTUNITY_RULES[0];
        assert_eq!(baggage.confidence, 0.98);
        assert_eq!(baggage.reason, "number_labs_baggage_focus");
        assert_eq!(baggage.priority, OpportunityPriority::Immediate);
        assert_eq!(baggage.fit_flag, Some("number_labs_fit"));

        let flight = &OPPORTUNITY_RULES[1];
        assert_eq!(flight.confidence, 0.95);
        assert_eq!(flight.domain, Some("Flight Operations"));
        assert_eq!(flight.min_agentic_potential, Some(8));
        assert_eq!(flight.fit_flag, Some("copa_fit"));

        assert_eq!(OPPORTUNITY_RULES[2].confidence, 0.92);
        assert_eq!(OPPORTUNITY_RULES[2].priority, OpportunityPriority::High);

        let disruption = &OPPORTUNITY_RULES[3];
        assert_eq!(disruption.confidence, 0.90);
        assert_eq!(disruption.subdomain_contains, Some("Disruption"));
        assert!(disruption.code_prefixes.is_empty());
    }

    #[test]
    fn test_priority_strings() {
        assert_eq!(OpportunityPriority::Immediate.as_str(), "IMMEDIATE");
        assert_eq!(OpportunityPriority::High.as_str(), "HIGH");
    }

    #[test]
    fn test_cypher_prefix_rule() {
        let cypher = cypher_for(&OPPORTUNITY_RULES[0]);
        assert!(cypher.contains("c.is_airline_company = true"));
        assert!(cypher.contains("w.code STARTS WITH 'WF-BAG'"));
        assert!(cypher.contains("w.code STARTS WITH 'WF-PRIORITY-002'"));
        assert!(cypher.contains("r.number_labs_fit = true"));
        assert!(!cypher.contains("HAS_VERSION"));
    }

    #[test]
    fn test_cypher_version_join_rule() {
        let cypher = cypher_for(&OPPORTUNITY_RULES[1]);
        assert!(cypher.contains("MATCH (w:Workflow)-[:HAS_VERSION]->(v:WorkflowVersion)"));
        assert!(cypher.contains("w.domain = $domain"));
        assert!(cypher.contains("v.agentic_potential >= $min_potential"));
        assert!(cypher.contains("r.copa_fit = true"));
    }

    #[test]
    fn test_cypher_subdomain_rule() {
        let cypher = cypher_for(&OPPORTUNITY_RULES[3]);
        assert!(cypher.contains("w.subdomain CONTAINS $subdomain"));
        assert!(cypher.contains("v.agentic_potential >= $min_potential"));
        assert!(!cypher.contains("STARTS WITH"));
    }

    #[test]
    fn test_all_rules_merge_and_count() {
        for rule in OPPORTUNITY_RULES {
            let cypher = cypher_for(rule);
            assert!(cypher.contains("MERGE (c)-[r:OPPORTUNITY_FOR]->(w)"));
            assert!(cypher.contains("RETURN count(r) as created"));
        }
    }
}
