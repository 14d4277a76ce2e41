use std::collections::HashMap;

use crate::document::{ContextRule, FeatureFlag, RuleType};

/// Caller-supplied field values for context rules, e.g. {"domain": "example.com"}.
/// Supplied per evaluation, never persisted.
pub type EvaluationContext = HashMap<String, String>;

/// Evaluate a single context rule against the provided context.
/// A rule whose field is absent from the context fails; unknown rule
/// types fail closed.
fn evaluate_rule(rule: &ContextRule, context: &EvaluationContext) -> bool {
    let value = match context.get(&rule.field_name) {
        Some(v) => v,
        None => return false,
    };

    match rule.rule_type {
        RuleType::Equals => value == &rule.field_value,
        RuleType::StartsWith => value.starts_with(&rule.field_value),
        RuleType::Unknown => false,
    }
}

/// Evaluate a flag's effective value for an optional context.
///
/// With no context rules, or no context supplied, the base value stands.
/// Otherwise all rules are combined with AND: if every rule passes the
/// base value stands, if any rule fails the base value is inverted.
pub fn evaluate_flag(flag: &FeatureFlag, context: Option<&EvaluationContext>) -> bool {
    if flag.context_rules.is_empty() {
        return flag.value;
    }

    let context = match context {
        Some(c) => c,
        None => return flag.value,
    };

    let all_rules_pass = flag
        .context_rules
        .iter()
        .all(|rule| evaluate_rule(rule, context));

    if all_rules_pass {
        flag.value
    } else {
        !flag.value
    }
}

/// Evaluate every flag in the list against the same context.
/// Keys are flag names; duplicate names overwrite silently, last one wins.
pub fn evaluate_all(
    flags: &[FeatureFlag],
    context: Option<&EvaluationContext>,
) -> HashMap<String, bool> {
    flags
        .iter()
        .map(|flag| (flag.name.clone(), evaluate_flag(flag, context)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(value: bool, rules: Vec<ContextRule>) -> FeatureFlag {
        FeatureFlag {
            name: "test_flag".to_string(),
            value,
            description: "A test flag".to_string(),
            context_rules: rules,
        }
    }

    fn rule(rule_type: RuleType, field_name: &str, field_value: &str) -> ContextRule {
        ContextRule {
            rule_type,
            field_name: field_name.to_string(),
            field_value: field_value.to_string(),
        }
    }

    fn context(pairs: &[(&str, &str)]) -> EvaluationContext {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_rules_returns_base_value() {
        let ctx = context(&[("domain", "example.com")]);
        assert!(evaluate_flag(&flag(true, vec![]), Some(&ctx)));
        assert!(!evaluate_flag(&flag(false, vec![]), Some(&ctx)));
        assert!(evaluate_flag(&flag(true, vec![]), None));
    }

    #[test]
    fn test_rules_without_context_returns_base_value() {
        let rules = vec![rule(RuleType::Equals, "domain", "example.com")];
        assert!(evaluate_flag(&flag(true, rules.clone()), None));
        assert!(!evaluate_flag(&flag(false, rules), None));
    }

    #[test]
    fn test_equals_rule() {
        let f = flag(true, vec![rule(RuleType::Equals, "domain", "example.com")]);

        let matching = context(&[("domain", "example.com")]);
        assert!(evaluate_flag(&f, Some(&matching)));

        let other = context(&[("domain", "other.com")]);
        assert!(!evaluate_flag(&f, Some(&other)));
    }

    #[test]
    fn test_starts_with_rule_with_false_base() {
        let f = flag(false, vec![rule(RuleType::StartsWith, "path", "/api")]);

        // Rule passes, base false propagates
        let api = context(&[("path", "/api/v2")]);
        assert!(!evaluate_flag(&f, Some(&api)));

        // Rule fails, base is negated
        let web = context(&[("path", "/web")]);
        assert!(evaluate_flag(&f, Some(&web)));
    }

    #[test]
    fn test_starts_with_is_case_sensitive() {
        let f = flag(true, vec![rule(RuleType::StartsWith, "path", "/API")]);
        let ctx = context(&[("path", "/api/v2")]);
        assert!(!evaluate_flag(&f, Some(&ctx)));
    }

    #[test]
    fn test_missing_context_field_fails_rule() {
        let f = flag(true, vec![rule(RuleType::Equals, "domain", "example.com")]);
        let ctx = context(&[("path", "/api")]);
        assert!(!evaluate_flag(&f, Some(&ctx)));
    }

    #[test]
    fn test_unknown_rule_type_fails_closed() {
        let f = flag(true, vec![rule(RuleType::Unknown, "domain", "example.com")]);
        // Even a context carrying the named field cannot satisfy it
        let ctx = context(&[("domain", "example.com")]);
        assert!(!evaluate_flag(&f, Some(&ctx)));
    }

    #[test]
    fn test_all_rules_combined_with_and() {
        let f = flag(
            true,
            vec![
                rule(RuleType::Equals, "domain", "example.com"),
                rule(RuleType::StartsWith, "path", "/api"),
            ],
        );

        let both = context(&[("domain", "example.com"), ("path", "/api/v2")]);
        assert!(evaluate_flag(&f, Some(&both)));

        let one = context(&[("domain", "example.com"), ("path", "/web")]);
        assert!(!evaluate_flag(&f, Some(&one)));
    }

    #[test]
    fn test_evaluate_all_maps_names_to_values() {
        let flags = vec![
            FeatureFlag {
                name: "a".to_string(),
                value: true,
                description: String::new(),
                context_rules: vec![],
            },
            FeatureFlag {
                name: "b".to_string(),
                value: false,
                description: String::new(),
                context_rules: vec![rule(RuleType::Equals, "domain", "example.com")],
            },
        ];

        let ctx = context(&[("domain", "example.com")]);
        let results = evaluate_all(&flags, Some(&ctx));
        assert_eq!(results.len(), 2);
        assert!(results["a"]);
        // all rules pass, base false propagates
        assert!(!results["b"]);
    }

    #[test]
    fn test_evaluate_all_duplicate_names_last_wins() {
        let flags = vec![
            FeatureFlag {
                name: "dup".to_string(),
                value: true,
                description: String::new(),
                context_rules: vec![],
            },
            FeatureFlag {
                name: "dup".to_string(),
                value: false,
                description: String::new(),
                context_rules: vec![],
            },
        ];

        let results = evaluate_all(&flags, None);
        assert_eq!(results.len(), 1);
        assert!(!results["dup"]);
    }
}
