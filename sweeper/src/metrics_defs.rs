//! Metrics definitions for the sweeper service.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub description: &'static str,
}

pub const DELETE_REQUESTS: MetricDef = MetricDef {
    name: "delete_random.requests",
    metric_type: MetricType::Counter,
    description: "Number of delete-random requests received",
};

pub const DELETE_OUTCOMES: MetricDef = MetricDef {
    name: "delete_random.outcomes",
    metric_type: MetricType::Counter,
    description: "Delete-random results. Tagged with outcome.",
};

pub const RECORDS_LISTED: MetricDef = MetricDef {
    name: "airtable.list.records",
    metric_type: MetricType::Histogram,
    description: "Number of records returned by one list call",
};

pub const ALL_METRICS: &[MetricDef] = &[DELETE_REQUESTS, DELETE_OUTCOMES, RECORDS_LISTED];
