//! Benchmark control catalog
//!
//! One module per benchmark section, each exporting a `CHECKS` table.

mod admin_center;
mod defender;
mod entra;
mod exchange;
mod purview;
mod sharepoint;
mod teams;

use crate::checks::metadata::{Level, License};
use crate::checks::CheckDescriptor;
use crate::session::Service;

const SECTIONS: &[&[CheckDescriptor]] = &[
    admin_center::CHECKS,
    defender::CHECKS,
    purview::CHECKS,
    entra::CHECKS,
    exchange::CHECKS,
    sharepoint::CHECKS,
    teams::CHECKS,
];

/// Every check, ordered by control ID
pub fn all() -> Vec<&'static CheckDescriptor> {
    let mut checks: Vec<&'static CheckDescriptor> =
        SECTIONS.iter().flat_map(|section| section.iter()).collect();
    checks.sort_by_key(|c| c.metadata.sort_key());
    checks
}

pub fn find(id: &str) -> Option<&'static CheckDescriptor> {
    SECTIONS
        .iter()
        .flat_map(|section| section.iter())
        .find(|c| c.id() == id)
}

/// Catalog selection used by `cis365 list`
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub section: Option<u8>,
    pub level: Option<Level>,
    /// Tenant license; controls requiring a higher tier are excluded
    pub license: Option<License>,
    pub service: Option<Service>,
}

impl CatalogFilter {
    pub fn matches(&self, check: &CheckDescriptor) -> bool {
        let meta = check.metadata;

        if let Some(section) = self.section {
            if meta.section.number() != section {
                return false;
            }
        }
        if let Some(level) = self.level {
            if meta.level != level {
                return false;
            }
        }
        if let Some(license) = self.license {
            if !meta.license.applies_to(license) {
                return false;
            }
        }
        if let Some(service) = self.service {
            if check.source.service() != service {
                return false;
            }
        }
        true
    }
}

pub fn filter(filter: &CatalogFilter) -> Vec<&'static CheckDescriptor> {
    all().into_iter().filter(|c| filter.matches(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_control_ids_are_unique() {
        let mut seen = HashSet::new();
        for check in all() {
            assert!(seen.insert(check.id()), "duplicate control {}", check.id());
        }
        assert_eq!(seen.len(), 30);
    }

    #[test]
    fn test_rule_fields_resolve_on_source() {
        for check in all() {
            let known = check.source.field_names();
            for rule in check.rule.fields() {
                assert!(
                    known.contains(&rule.field),
                    "{}: field '{}' is not exposed by {}",
                    check.id(),
                    rule.field,
                    check.source.name()
                );
            }
            assert!(!check.rule.fields().is_empty(), "{} has no rules", check.id());
        }
    }

    #[test]
    fn test_section_matches_control_id() {
        for check in all() {
            assert_eq!(
                check.metadata.section_number(),
                Some(check.metadata.section.number()),
                "{} is filed under the wrong section",
                check.id()
            );
        }
    }

    #[test]
    fn test_declared_services_match_source() {
        for check in all() {
            assert_eq!(
                check.metadata.services,
                &[check.source.service()],
                "{} declares the wrong service",
                check.id()
            );
        }
    }

    #[test]
    fn test_metadata_text_is_authored() {
        for check in all() {
            let meta = check.metadata;
            assert!(!meta.title.is_empty(), "{} has no title", meta.id);
            assert!(!meta.description.is_empty(), "{} has no description", meta.id);
            assert!(!meta.audit.is_empty(), "{} has no audit text", meta.id);
            assert!(!meta.remediation.is_empty(), "{} has no remediation", meta.id);
        }
    }

    #[test]
    fn test_ordering_is_numeric() {
        let ids: Vec<&str> = all().iter().map(|c| c.id()).collect();
        let first_entra = ids.iter().position(|id| id.starts_with("5.")).unwrap();
        assert_eq!(ids[0], "1.3.1");
        assert_eq!(ids[first_entra], "5.1.2.2");
        assert_eq!(ids.last(), Some(&"8.5.8"));
    }

    #[test]
    fn test_find_is_exact() {
        assert_eq!(find("6.5.4").map(|c| c.id()), Some("6.5.4"));
        assert!(find("6.5").is_none());
        assert!(find("9.9.9").is_none());
    }

    #[test]
    fn test_filter_by_section_and_service() {
        let teams = filter(&CatalogFilter {
            section: Some(8),
            ..Default::default()
        });
        assert!(!teams.is_empty());
        assert!(teams.iter().all(|c| c.id().starts_with("8.")));

        let graph = filter(&CatalogFilter {
            service: Some(Service::Graph),
            ..Default::default()
        });
        assert!(graph.iter().any(|c| c.id() == "7.2.3"));
        assert!(graph.iter().all(|c| c.source.service() == Service::Graph));
    }

    #[test]
    fn test_filter_by_license_excludes_higher_tier() {
        let e3 = filter(&CatalogFilter {
            license: Some(License::E3),
            ..Default::default()
        });
        assert!(e3.iter().all(|c| c.metadata.license == License::E3));
        assert!(e3.len() < all().len());

        let l2 = filter(&CatalogFilter {
            level: Some(Level::L2),
            ..Default::default()
        });
        assert!(l2.iter().all(|c| c.metadata.level == Level::L2));
    }
}
