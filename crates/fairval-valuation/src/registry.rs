//! Method Registry
//!
//! Static metadata for the fair-value methods, for listing and lookup by name.

use crate::estimates::Method;
use crate::traits::MethodKind;
use std::collections::HashMap;

/// Method metadata
#[derive(Debug, Clone)]
pub struct MethodInfo {
    /// Method name (unique identifier)
    pub name: &'static str,
    /// Method tag
    pub method: Method,
    /// Method family
    pub kind: MethodKind,
    /// Brief description of the estimate
    pub description: &'static str,
    /// Input fields the method reads
    pub required_inputs: &'static [&'static str],
}

/// Get all available method info, in canonical order
pub fn available_methods() -> Vec<MethodInfo> {
    vec![
        MethodInfo {
            name: "ev_ebitda",
            method: Method::Ev,
            kind: MethodKind::Enterprise,
            description: "EBITDA grown one period at a constant EV/EBITDA multiple, per share",
            required_inputs: &["enterprise_value", "ebitda", "shares_outstanding"],
        },
        MethodInfo {
            name: "dcf",
            method: Method::Dcf,
            kind: MethodKind::Earnings,
            description: "Next-year EPS over the discount/growth spread",
            required_inputs: &["eps"],
        },
        MethodInfo {
            name: "graham",
            method: Method::Graham,
            kind: MethodKind::Asset,
            description: "Graham number: sqrt(22.5 x EPS x book value per share)",
            required_inputs: &["eps", "book_value_per_share"],
        },
        MethodInfo {
            name: "pe",
            method: Method::Pe,
            kind: MethodKind::Earnings,
            description: "EPS capitalized at the trailing P/E (15 when unknown)",
            required_inputs: &["eps", "pe_ratio_hint"],
        },
    ]
}

/// Get method info by name
pub fn get_method_info(name: &str) -> Option<MethodInfo> {
    available_methods().into_iter().find(|m| m.name == name)
}

/// Get all methods of a family
pub fn methods_by_kind(kind: MethodKind) -> Vec<MethodInfo> {
    available_methods()
        .into_iter()
        .filter(|m| m.kind == kind)
        .collect()
}

/// Count methods per family
pub fn count_by_kind() -> HashMap<MethodKind, usize> {
    let mut counts = HashMap::new();
    for method in available_methods() {
        *counts.entry(method.kind).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::{DcfMethod, EvEbitdaMethod, GrahamMethod, PeMethod};
    use crate::traits::FairValueMethod;

    #[test]
    fn test_available_methods() {
        let methods = available_methods();
        assert_eq!(methods.len(), 4);

        let order: Vec<_> = methods.iter().map(|m| m.method).collect();
        assert_eq!(order, Method::ALL.to_vec());
    }

    #[test]
    fn test_names_match_tags() {
        for info in available_methods() {
            assert_eq!(info.name, info.method.name());
        }
    }

    #[test]
    fn test_registry_matches_implementations() {
        let implementations: Vec<Box<dyn FairValueMethod>> = vec![
            Box::new(EvEbitdaMethod::default()),
            Box::new(DcfMethod::default()),
            Box::new(GrahamMethod::default()),
            Box::new(PeMethod::default()),
        ];

        for method in implementations {
            let info = get_method_info(method.name()).unwrap();
            assert_eq!(info.kind, method.kind());
            assert_eq!(info.required_inputs, method.required_inputs());
        }
    }

    #[test]
    fn test_lookup() {
        assert!(get_method_info("graham").is_some());
        assert!(get_method_info("nonexistent").is_none());
    }

    #[test]
    fn test_by_kind() {
        assert_eq!(methods_by_kind(MethodKind::Earnings).len(), 2);
        assert_eq!(count_by_kind().get(&MethodKind::Asset), Some(&1));
    }
}
