//! Per-tag delta templates: (base, variance) for every metric.
//!
//! Balancing numbers live here in one place. A sampled value is drawn
//! uniformly from `[base - var, base + var]` and scaled by the mode swing.

use sim_core::{Metric, Tag};

pub(crate) type Template = [(Metric, f64, f64); 8];

pub(crate) fn template(tag: Tag) -> Template {
    use Metric::*;
    match tag {
        Tag::Growth => [
            (Cash, -60_000.0, 55_000.0),
            (Mrr, 1_200.0, 900.0),
            (Reputation, 3.0, 4.0),
            (SupportLoad, 9.0, 6.0),
            (InfraLoad, 9.0, 6.0),
            (Churn, 0.010, 0.010),
            (Morale, 2.0, 4.0),
            (TechDebt, 6.0, 5.0),
        ],
        Tag::Efficiency => [
            (Cash, 40_000.0, 50_000.0),
            (Mrr, -200.0, 350.0),
            (Reputation, -2.0, 4.0),
            (SupportLoad, -6.0, 6.0),
            (InfraLoad, -6.0, 6.0),
            (Churn, 0.004, 0.008),
            (Morale, -1.0, 3.0),
            (TechDebt, -3.0, 4.0),
        ],
        Tag::Reliability => [
            (Cash, -55_000.0, 45_000.0),
            (Mrr, -150.0, 250.0),
            (Reputation, 4.0, 4.0),
            (SupportLoad, -10.0, 7.0),
            (InfraLoad, -10.0, 7.0),
            (Churn, -0.008, 0.010),
            (Morale, 1.0, 3.0),
            (TechDebt, -6.0, 5.0),
        ],
        Tag::Compliance => [
            (Cash, -70_000.0, 55_000.0),
            (Mrr, -250.0, 250.0),
            (Reputation, 6.0, 4.0),
            (SupportLoad, 2.0, 4.0),
            (InfraLoad, 2.0, 4.0),
            (Churn, -0.004, 0.008),
            (Morale, -1.0, 2.0),
            (TechDebt, 1.0, 3.0),
        ],
        Tag::Fundraising => [
            (Cash, 180_000.0, 160_000.0),
            (Mrr, 0.0, 200.0),
            (Reputation, 1.0, 5.0),
            (SupportLoad, 3.0, 4.0),
            (InfraLoad, 3.0, 4.0),
            (Churn, 0.000, 0.006),
            (Morale, 2.0, 4.0),
            (TechDebt, 2.0, 4.0),
        ],
        Tag::People => [
            (Cash, -45_000.0, 45_000.0),
            (Mrr, 150.0, 250.0),
            (Reputation, 3.0, 4.0),
            (SupportLoad, -8.0, 7.0),
            (InfraLoad, -5.0, 6.0),
            (Churn, -0.003, 0.008),
            (Morale, 7.0, 6.0),
            (TechDebt, -1.0, 3.0),
        ],
        Tag::Product => [
            (Cash, -50_000.0, 45_000.0),
            (Mrr, 700.0, 650.0),
            (Reputation, 3.0, 4.0),
            (SupportLoad, -3.0, 6.0),
            (InfraLoad, 2.0, 5.0),
            (Churn, -0.006, 0.010),
            (Morale, 2.0, 4.0),
            (TechDebt, 2.0, 4.0),
        ],
        Tag::Sales => [
            (Cash, -25_000.0, 35_000.0),
            (Mrr, 900.0, 850.0),
            (Reputation, 1.0, 4.0),
            (SupportLoad, 4.0, 5.0),
            (InfraLoad, 3.0, 4.0),
            (Churn, 0.006, 0.010),
            (Morale, 1.0, 3.0),
            (TechDebt, 4.0, 4.0),
        ],
        Tag::Marketing => [
            (Cash, -45_000.0, 45_000.0),
            (Mrr, 650.0, 650.0),
            (Reputation, 4.0, 4.0),
            (SupportLoad, 2.0, 4.0),
            (InfraLoad, 2.0, 4.0),
            (Churn, -0.002, 0.009),
            (Morale, 1.0, 3.0),
            (TechDebt, 2.0, 4.0),
        ],
        Tag::Security => [
            (Cash, -60_000.0, 50_000.0),
            (Mrr, -120.0, 250.0),
            (Reputation, 5.0, 4.0),
            (SupportLoad, -6.0, 6.0),
            (InfraLoad, -5.0, 6.0),
            (Churn, -0.006, 0.010),
            (Morale, -1.0, 3.0),
            (TechDebt, 2.0, 4.0),
        ],
    }
}
