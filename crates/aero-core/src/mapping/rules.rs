//! Static keyword rule tables for the entity mappers.
//!
//! Rules are data, not dispatch: each table row carries the keywords
//! to look for and the access metadata to stamp on the mapping. Tables
//! are scanned in declaration order and the matcher keeps the first
//! tuple per (entity, access) key, so order matters.

/// How a workflow touches a data entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessType {
    Read,
    Write,
    ReadWrite,
}

impl AccessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::Read => "read",
            AccessType::Write => "write",
            AccessType::ReadWrite => "read_write",
        }
    }
}

/// How an agent consumes a data entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPattern {
    Batch,
    Stream,
    OnDemand,
    Scheduled,
}

impl AccessPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessPattern::Batch => "batch",
            AccessPattern::Stream => "stream",
            AccessPattern::OnDemand => "on_demand",
            AccessPattern::Scheduled => "scheduled",
        }
    }
}

/// How fresh the data has to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latency {
    RealTime,
    NearRealTime,
    Batch,
    OnDemand,
}

impl Latency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Latency::RealTime => "real-time",
            Latency::NearRealTime => "near-real-time",
            Latency::Batch => "batch",
            Latency::OnDemand => "on-demand",
        }
    }
}

/// How often an agent queries the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFrequency {
    Continuous,
    PerMinute,
    PerHour,
    PerDay,
}

impl QueryFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryFrequency::Continuous => "continuous",
            QueryFrequency::PerMinute => "per_minute",
            QueryFrequency::PerHour => "per_hour",
            QueryFrequency::PerDay => "per_day",
        }
    }
}

/// Expected row volume for a workflow mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeEstimate {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl VolumeEstimate {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeEstimate::Low => "low",
            VolumeEstimate::Medium => "medium",
            VolumeEstimate::High => "high",
            VolumeEstimate::VeryHigh => "very_high",
        }
    }
}

/// Keyword rule mapping workflows to one data entity.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub entity: &'static str,
    pub access_type: AccessType,
    pub is_primary: bool,
    pub volume: VolumeEstimate,
    pub latency: Latency,
}

/// Keyword rule mapping agents to one or more data entities.
#[derive(Debug, Clone, Copy)]
pub struct AgentRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub entities: &'static [&'static str],
    pub access_pattern: AccessPattern,
    pub latency: Latency,
    pub frequency: QueryFrequency,
    pub critical: bool,
}

/// Workflow mapping rules, scanned in order.
pub const WORKFLOW_RULES: &[WorkflowRule] = &[
    WorkflowRule {
        name: "flight_operations",
        keywords: &[
            "flight",
            "delay",
            "departure",
            "arrival",
            "dispatch",
            "operations",
            "crew scheduling",
        ],
        entity: "FLIFO",
        access_type: AccessType::ReadWrite,
        is_primary: true,
        volume: VolumeEstimate::High,
        latency: Latency::RealTime,
    },
    WorkflowRule {
        name: "customer_service",
        keywords: &[
            "customer",
            "passenger",
            "service",
            "check-in",
            "boarding",
            "rebooking",
            "disruption",
        ],
        entity: "PNR",
        access_type: AccessType::ReadWrite,
        is_primary: true,
        volume: VolumeEstimate::High,
        latency: Latency::NearRealTime,
    },
    WorkflowRule {
        name: "loyalty",
        keywords: &[
            "loyalty",
            "member",
            "upgrade",
            "recognition",
            "tier",
            "miles",
            "points",
        ],
        entity: "LOYALTY",
        access_type: AccessType::Read,
        is_primary: false,
        volume: VolumeEstimate::Medium,
        latency: Latency::NearRealTime,
    },
    WorkflowRule {
        name: "revenue_management",
        keywords: &[
            "revenue",
            "pricing",
            "yield",
            "inventory",
            "seat",
            "availability",
            "capacity",
            "demand",
        ],
        entity: "INVENTORY",
        access_type: AccessType::ReadWrite,
        is_primary: true,
        volume: VolumeEstimate::VeryHigh,
        latency: Latency::RealTime,
    },
    WorkflowRule {
        name: "ticketing",
        keywords: &[
            "ticket",
            "fare",
            "refund",
            "exchange",
            "payment",
            "revenue accounting",
        ],
        entity: "E_TKT",
        access_type: AccessType::ReadWrite,
        is_primary: true,
        volume: VolumeEstimate::High,
        latency: Latency::NearRealTime,
    },
    WorkflowRule {
        name: "baggage",
        keywords: &["bag", "luggage", "misconnect", "ground", "ramp", "loading"],
        entity: "BAGGAGE",
        access_type: AccessType::ReadWrite,
        is_primary: true,
        volume: VolumeEstimate::High,
        latency: Latency::RealTime,
    },
    WorkflowRule {
        name: "schedule_planning",
        keywords: &["schedule", "planning", "network", "route", "frequency"],
        entity: "SSM",
        access_type: AccessType::ReadWrite,
        is_primary: true,
        volume: VolumeEstimate::Low,
        latency: Latency::Batch,
    },
    WorkflowRule {
        name: "connections",
        keywords: &["connect", "transfer", "minimum connect", "mct"],
        entity: "MCT",
        access_type: AccessType::Read,
        is_primary: false,
        volume: VolumeEstimate::Low,
        latency: Latency::OnDemand,
    },
];

/// Agent mapping rules, scanned in order.
pub const AGENT_RULES: &[AgentRule] = &[
    AgentRule {
        name: "delay_detection",
        keywords: &["delay", "detection", "disruption", "schedule monitoring"],
        entities: &["FLIFO"],
        access_pattern: AccessPattern::Stream,
        latency: Latency::RealTime,
        frequency: QueryFrequency::Continuous,
        critical: true,
    },
    AgentRule {
        name: "rebooking",
        keywords: &["rebooking", "reaccommodation", "disruption recovery"],
        entities: &["PNR", "FLIFO", "INVENTORY"],
        access_pattern: AccessPattern::Stream,
        latency: Latency::RealTime,
        frequency: QueryFrequency::PerMinute,
        critical: true,
    },
    AgentRule {
        name: "customer_context",
        keywords: &["customer", "context", "profile", "history"],
        entities: &["PNR", "LOYALTY"],
        access_pattern: AccessPattern::OnDemand,
        latency: Latency::NearRealTime,
        frequency: QueryFrequency::PerMinute,
        critical: false,
    },
    AgentRule {
        name: "bag_tracking",
        keywords: &["bag", "baggage", "luggage", "tracking", "misconnect"],
        entities: &["BAGGAGE"],
        access_pattern: AccessPattern::Stream,
        latency: Latency::RealTime,
        frequency: QueryFrequency::Continuous,
        critical: true,
    },
    AgentRule {
        name: "pricing_optimization",
        keywords: &["pricing", "revenue", "yield", "optimization", "demand"],
        entities: &["INVENTORY"],
        access_pattern: AccessPattern::Batch,
        latency: Latency::NearRealTime,
        frequency: QueryFrequency::PerHour,
        critical: false,
    },
    AgentRule {
        name: "overbooking",
        keywords: &["overbooking", "overbook", "capacity", "optimization"],
        entities: &["INVENTORY"],
        access_pattern: AccessPattern::Scheduled,
        latency: Latency::Batch,
        frequency: QueryFrequency::PerDay,
        critical: false,
    },
    AgentRule {
        name: "connection_protection",
        keywords: &["connection", "protect", "transfer", "misconnect"],
        entities: &["FLIFO", "PNR", "MCT"],
        access_pattern: AccessPattern::Stream,
        latency: Latency::RealTime,
        frequency: QueryFrequency::Continuous,
        critical: true,
    },
    AgentRule {
        name: "loyalty_tier",
        keywords: &["loyalty", "tier", "status", "member", "recognition"],
        entities: &["LOYALTY"],
        access_pattern: AccessPattern::Batch,
        latency: Latency::Batch,
        frequency: QueryFrequency::PerDay,
        critical: false,
    },
    AgentRule {
        name: "clv_scoring",
        keywords: &["clv", "lifetime value", "customer value", "scoring"],
        entities: &["PNR", "LOYALTY", "E_TKT"],
        access_pattern: AccessPattern::Batch,
        latency: Latency::Batch,
        frequency: QueryFrequency::PerDay,
        critical: false,
    },
    AgentRule {
        name: "refund_processing",
        keywords: &["refund", "exchange", "ticket", "processing"],
        entities: &["E_TKT"],
        access_pattern: AccessPattern::OnDemand,
        latency: Latency::NearRealTime,
        frequency: QueryFrequency::PerMinute,
        critical: false,
    },
    AgentRule {
        name: "weather_rerouting",
        keywords: &["weather", "reroute", "route optimization"],
        entities: &["FLIFO"],
        access_pattern: AccessPattern::Stream,
        latency: Latency::RealTime,
        frequency: QueryFrequency::Continuous,
        critical: true,
    },
    AgentRule {
        name: "crew_scheduling",
        keywords: &["crew", "scheduling", "roster", "assignment"],
        entities: &["FLIFO"],
        access_pattern: AccessPattern::Scheduled,
        latency: Latency::NearRealTime,
        frequency: QueryFrequency::PerHour,
        critical: true,
    },
    AgentRule {
        name: "demand_forecasting",
        keywords: &["demand", "forecast", "prediction", "trend"],
        entities: &["INVENTORY", "PNR"],
        access_pattern: AccessPattern::Batch,
        latency: Latency::Batch,
        frequency: QueryFrequency::PerDay,
        critical: false,
    },
    AgentRule {
        name: "schedule_optimization",
        keywords: &["schedule", "optimization", "planning", "network"],
        entities: &["SSM"],
        access_pattern: AccessPattern::Batch,
        latency: Latency::Batch,
        frequency: QueryFrequency::PerDay,
        critical: false,
    },
];

/// Entity codes the rule tables may target.
pub const KNOWN_ENTITY_CODES: &[&str] = &[
    "FLIFO", "PNR", "LOYALTY", "INVENTORY", "E_TKT", "BAGGAGE", "SSM", "MCT",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_sizes() {
        assert_eq!(WORKFLOW_RULES.len(), 8);
        assert_eq!(AGENT_RULES.len(), 14);
    }

    #[test]
    fn test_keywords_are_lowercase_and_nonempty() {
        for rule in WORKFLOW_RULES {
            assert!(!rule.keywords.is_empty(), "rule {} has no keywords", rule.name);
            for kw in rule.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "keyword {:?} in {}", kw, rule.name);
            }
        }
        for rule in AGENT_RULES {
            assert!(!rule.keywords.is_empty(), "rule {} has no keywords", rule.name);
            for kw in rule.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "keyword {:?} in {}", kw, rule.name);
            }
        }
    }

    #[test]
    fn test_rules_target_known_entities() {
        for rule in WORKFLOW_RULES {
            assert!(
                KNOWN_ENTITY_CODES.contains(&rule.entity),
                "unknown entity {} in {}",
                rule.entity,
                rule.name
            );
        }
        for rule in AGENT_RULES {
            assert!(!rule.entities.is_empty(), "rule {} has no entities", rule.name);
            for entity in rule.entities {
                assert!(
                    KNOWN_ENTITY_CODES.contains(entity),
                    "unknown entity {} in {}",
                    entity,
                    rule.name
                );
            }
        }
    }

    #[test]
    fn test_workflow_rules_target_distinct_entities() {
        let mut seen = std::collections::HashSet::new();
        for rule in WORKFLOW_RULES {
            assert!(seen.insert(rule.entity), "duplicate entity {}", rule.entity);
        }
    }

    #[test]
    fn test_metadata_strings() {
        assert_eq!(AccessType::ReadWrite.as_str(), "read_write");
        assert_eq!(AccessPattern::OnDemand.as_str(), "on_demand");
        assert_eq!(Latency::NearRealTime.as_str(), "near-real-time");
        assert_eq!(Latency::OnDemand.as_str(), "on-demand");
        assert_eq!(QueryFrequency::PerMinute.as_str(), "per_minute");
        assert_eq!(VolumeEstimate::VeryHigh.as_str(), "very_high");
    }
}
