//! Contact statistics
//!
//! Domain ranking and per-field completeness, computed on demand from the
//! current store contents.

use chrono::Utc;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::ContactService;
use crate::app::models::{Contact, ContactStats, DomainStats, FieldStats, RawRowSnapshot};
use crate::constants::{TOP_DOMAINS_LIMIT, fields};

impl ContactService {
    pub fn stats(&self) -> ContactStats {
        let contacts = self.store.get_all();
        let invalid_rows = self.store.invalid_rows();
        let total_errors = self.store.load_errors().len();
        compute_stats(&contacts, &invalid_rows, total_errors)
    }
}

/// Statistics over valid contacts plus the raw values of rejected rows
pub fn compute_stats(
    contacts: &[Contact],
    invalid_rows: &[RawRowSnapshot],
    total_errors: usize,
) -> ContactStats {
    let counted = contacts.len() + invalid_rows.len();
    let valid_percentage = if counted == 0 {
        0.0
    } else {
        contacts.len() as f64 / counted as f64 * 100.0
    };

    let domains = domain_counts(contacts);
    let total_domains = domains.len();

    ContactStats {
        total: contacts.len(),
        total_errors,
        total_invalid: invalid_rows.len(),
        valid_percentage,
        total_domains,
        top_domains: top_domains(domains, contacts.len(), TOP_DOMAINS_LIMIT),
        field_stats: field_stats(contacts, invalid_rows),
        timestamp: Utc::now(),
    }
}

/// Email domain counts, in order of first appearance
fn domain_counts(contacts: &[Contact]) -> Vec<(String, usize)> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for domain in contacts.iter().filter_map(Contact::email_domain) {
        match positions.get(&domain) {
            Some(&position) => counts[position].1 += 1,
            None => {
                positions.insert(domain.clone(), counts.len());
                counts.push((domain, 1));
            }
        }
    }
    counts
}

/// Most common domains, count descending then name ascending
fn top_domains(mut domains: Vec<(String, usize)>, total: usize, limit: usize) -> Vec<DomainStats> {
    domains.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    domains
        .into_iter()
        .take(limit)
        .map(|(domain, count)| DomainStats {
            domain,
            count,
            percentage: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .collect()
}

fn field_stats(
    contacts: &[Contact],
    invalid_rows: &[RawRowSnapshot],
) -> BTreeMap<String, FieldStats> {
    let key_values: Vec<String> = contacts.iter().map(|c| c.key.to_string()).collect();

    let columns: [(&str, Vec<&str>); 4] = [
        (
            fields::KEY,
            key_values
                .iter()
                .map(String::as_str)
                .chain(invalid_rows.iter().map(|r| r.key.as_str()))
                .collect(),
        ),
        (
            fields::NAME,
            contacts
                .iter()
                .map(|c| c.name.as_str())
                .chain(invalid_rows.iter().map(|r| r.name.as_str()))
                .collect(),
        ),
        (
            fields::EMAIL,
            contacts
                .iter()
                .map(|c| c.email.as_str())
                .chain(invalid_rows.iter().map(|r| r.email.as_str()))
                .collect(),
        ),
        (
            fields::PHONE,
            contacts
                .iter()
                .map(|c| c.phone.as_str())
                .chain(invalid_rows.iter().map(|r| r.phone.as_str()))
                .collect(),
        ),
    ];

    columns
        .into_iter()
        .map(|(field, values)| (field.to_string(), summarize_field(&values)))
        .collect()
}

fn summarize_field(values: &[&str]) -> FieldStats {
    let empty_values = values.iter().filter(|v| v.is_empty()).count();
    let unique_values = values
        .iter()
        .filter(|v| !v.is_empty())
        .collect::<HashSet<_>>()
        .len();
    let completeness = if values.is_empty() {
        0.0
    } else {
        (values.len() - empty_values) as f64 / values.len() as f64 * 100.0
    };

    FieldStats {
        unique_values,
        empty_values,
        completeness,
    }
}
