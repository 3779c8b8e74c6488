//! Rule definitions and the keyword-indexed catalog.
//!
//! The rule set is a fixed, ordered table of `(label, regex, keywords)`
//! entries compiled once into a [`RuleCatalog`]. The catalog builds an
//! Aho-Corasick automaton over the rule keywords so the detector can skip
//! regexes whose keywords never appear in the diff text. Rules are
//! independent of each other: the same text span may produce findings from
//! several rules.

use std::collections::HashMap;
use std::fmt;

use aho_corasick::AhoCorasick;
use regex::Regex;

use crate::error::RuleError;

/// A single uncompiled rule: what to call it, what to match, and which
/// literal keywords gate the regex.
#[derive(Debug, Clone, Copy)]
pub struct RuleDef {
    /// Human-readable label, reported as the finding type.
    pub label: &'static str,
    /// Regular expression matching the secret shape.
    pub regex: &'static str,
    /// Case-insensitive keywords for pre-filtering. An empty slice means the
    /// rule runs against every diff unconditionally.
    pub keywords: &'static [&'static str],
}

/// The built-in detection rules, in reporting order.
pub static BUILTIN_RULES: &[RuleDef] = &[
    RuleDef {
        label: "AWS Access Key ID",
        regex: r#"(?i)[+\-\s]*aws_access_key_id\s*=\s*['"]?(AKIA[0-9A-Z]{16})['"]?"#,
        keywords: &["aws_access_key_id"],
    },
    RuleDef {
        label: "AWS Secret Access Key",
        regex: r#"(?i)[+\-\s]*aws_secret_access_key\s*=\s*['"]?([A-Za-z0-9/+=]{40})['"]?"#,
        keywords: &["aws_secret_access_key"],
    },
    RuleDef {
        label: "Private Key Block",
        regex: r"-----BEGIN (?:EC|PGP|DSA|RSA|OPENSSH)? ?PRIVATE KEY(?: BLOCK)?-----",
        keywords: &["private key"],
    },
    RuleDef {
        label: "JWT Token",
        regex: r"\beyJ[A-Za-z0-9_\-]+\.[A-Za-z0-9_\-]+\.[A-Za-z0-9_\-]+\b",
        keywords: &["eyJ"],
    },
    RuleDef {
        label: "Slack Token",
        regex: r"\bxox[baprs]-[0-9A-Za-z]{10,48}\b",
        keywords: &["xox"],
    },
    RuleDef {
        label: "Hard-coded Password",
        regex: r#"(?i)[+\-\s]*(password|passwd|pwd|secret)\s*[:=]\s*['"][^'" ]{8,}['"]"#,
        keywords: &["password", "passwd", "pwd", "secret"],
    },
    RuleDef {
        label: "Google API Key",
        regex: r"\bAIza[0-9A-Za-z\-_]{35}\b",
        keywords: &["AIza"],
    },
    RuleDef {
        label: "Bearer/OAuth Token",
        regex: r#"(?i)authorization[:=]\s*['"]?Bearer\s+[A-Za-z0-9\-_\.]{20,}['"]?"#,
        keywords: &["authorization"],
    },
    RuleDef {
        label: "SSH Key Fingerprint",
        regex: r"ssh-rsa\s+[A-Za-z0-9+/=]{100,}",
        keywords: &["ssh-rsa"],
    },
];

/// A compiled detection rule.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Human-readable label, reported as the finding type.
    pub label: &'static str,
    /// The compiled regular expression.
    pub regex: Regex,
    /// Keywords gating this rule, as declared.
    pub keywords: &'static [&'static str],
}

impl Rule {
    fn from_def(def: &RuleDef) -> Result<Self, RuleError> {
        let regex = Regex::new(def.regex).map_err(|source| RuleError::InvalidRegex {
            label: def.label.to_owned(),
            source,
        })?;

        Ok(Self {
            label: def.label,
            regex,
            keywords: def.keywords,
        })
    }
}

/// Ordered collection of compiled rules with Aho-Corasick pre-filtering.
pub struct RuleCatalog {
    rules: Vec<Rule>,
    keyword_automaton: Option<AhoCorasick>,
    keyword_to_rules: Vec<Vec<usize>>,
    rules_without_keywords: Vec<usize>,
}

impl fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleCatalog")
            .field("rules", &self.rules.len())
            .field("rules_without_keywords", &self.rules_without_keywords.len())
            .finish_non_exhaustive()
    }
}

impl RuleCatalog {
    /// Compiles the built-in rule table.
    pub fn builtin() -> Result<Self, RuleError> {
        let rules = BUILTIN_RULES
            .iter()
            .map(Rule::from_def)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    /// Creates a catalog from a list of rules, building the keyword index.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        let index = build_keyword_index(&rules);
        let keyword_automaton = build_automaton(&index.keywords);

        Self {
            rules,
            keyword_automaton,
            keyword_to_rules: index.keyword_to_rules,
            rules_without_keywords: index.rules_without_keywords,
        }
    }

    /// Returns all rules, in catalog order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Looks up a rule by its label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.label == label)
    }

    /// Returns the number of rules in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the catalog contains no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Marks which rules should run against `content`, by index.
    ///
    /// Rules without keywords always run; keyworded rules run only when the
    /// automaton finds at least one of their keywords.
    #[must_use]
    pub(crate) fn select_rules(&self, content: &str) -> Vec<bool> {
        let mut should_run = vec![false; self.rules.len()];

        for &idx in &self.rules_without_keywords {
            should_run[idx] = true;
        }

        if let Some(automaton) = &self.keyword_automaton {
            for mat in automaton.find_iter(content) {
                let keyword_idx = mat.pattern().as_usize();
                for &rule_idx in &self.keyword_to_rules[keyword_idx] {
                    should_run[rule_idx] = true;
                }
            }
        }

        should_run
    }
}

struct KeywordIndex {
    keywords: Vec<String>,
    keyword_to_rules: Vec<Vec<usize>>,
    rules_without_keywords: Vec<usize>,
}

fn build_keyword_index(rules: &[Rule]) -> KeywordIndex {
    let mut keywords = Vec::new();
    let mut keyword_to_rules: Vec<Vec<usize>> = Vec::new();
    let mut rules_without_keywords = Vec::new();
    let mut keyword_positions: HashMap<&str, usize> = HashMap::new();

    for (rule_idx, rule) in rules.iter().enumerate() {
        if rule.keywords.is_empty() {
            rules_without_keywords.push(rule_idx);
            continue;
        }

        for &keyword in rule.keywords {
            if let Some(&existing_idx) = keyword_positions.get(keyword) {
                keyword_to_rules[existing_idx].push(rule_idx);
            } else {
                keyword_positions.insert(keyword, keywords.len());
                keywords.push(keyword.to_owned());
                keyword_to_rules.push(vec![rule_idx]);
            }
        }
    }

    KeywordIndex {
        keywords,
        keyword_to_rules,
        rules_without_keywords,
    }
}

fn build_automaton(keywords: &[String]) -> Option<AhoCorasick> {
    if keywords.is_empty() {
        return None;
    }

    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(aho_corasick::MatchKind::LeftmostLongest)
        .build(keywords)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_compiles_all_nine_rules() {
        let catalog = RuleCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 9);
    }

    #[test]
    fn builtin_rules_all_have_label_and_keywords() {
        let catalog = RuleCatalog::builtin().unwrap();
        for rule in catalog.rules() {
            assert!(!rule.label.is_empty());
            assert!(!rule.keywords.is_empty());
        }
    }

    #[test]
    fn builtin_preserves_reporting_order() {
        let catalog = RuleCatalog::builtin().unwrap();
        assert_eq!(catalog.rules()[0].label, "AWS Access Key ID");
        assert_eq!(catalog.rules()[8].label, "SSH Key Fingerprint");
    }

    #[test]
    fn get_finds_rule_by_exact_label() {
        let catalog = RuleCatalog::builtin().unwrap();
        assert!(catalog.get("JWT Token").is_some());
        assert!(catalog.get("Nonexistent Rule").is_none());
    }

    #[test]
    fn new_with_empty_vec_is_empty() {
        let catalog = RuleCatalog::new(vec![]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn select_rules_skips_rules_whose_keywords_are_absent() {
        let catalog = RuleCatalog::builtin().unwrap();
        let selected = catalog.select_rules("nothing interesting here");
        assert!(selected.iter().all(|&run| !run));
    }

    #[test]
    fn select_rules_activates_rule_when_keyword_present() {
        let catalog = RuleCatalog::builtin().unwrap();
        let selected = catalog.select_rules("+aws_access_key_id = \"x\"");
        assert!(selected[0]);
        assert!(!selected[4]);
    }

    #[test]
    fn select_rules_keyword_match_is_case_insensitive() {
        let catalog = RuleCatalog::builtin().unwrap();
        let selected = catalog.select_rules("AWS_ACCESS_KEY_ID = ...");
        assert!(selected[0]);
    }

    #[test]
    fn shared_keyword_activates_every_declaring_rule() {
        let defs = [
            RuleDef {
                label: "first",
                regex: r"a+",
                keywords: &["shared"],
            },
            RuleDef {
                label: "second",
                regex: r"b+",
                keywords: &["shared"],
            },
        ];
        let rules = defs.iter().map(|d| Rule::from_def(d).unwrap()).collect();
        let catalog = RuleCatalog::new(rules);

        let selected = catalog.select_rules("contains shared keyword");
        assert!(selected[0]);
        assert!(selected[1]);
    }

    #[test]
    fn rule_without_keywords_always_selected() {
        let def = RuleDef {
            label: "unconditional",
            regex: r"x",
            keywords: &[],
        };
        let catalog = RuleCatalog::new(vec![Rule::from_def(&def).unwrap()]);

        assert!(catalog.select_rules("anything")[0]);
        assert!(catalog.select_rules("")[0]);
    }

    #[test]
    fn from_def_reports_invalid_regex_with_label() {
        let def = RuleDef {
            label: "broken",
            regex: r"[unclosed",
            keywords: &[],
        };

        let err = Rule::from_def(&def).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn debug_impl_shows_rule_count() {
        let catalog = RuleCatalog::builtin().unwrap();
        let debug = format!("{catalog:?}");
        assert!(debug.contains("RuleCatalog"));
        assert!(debug.contains("rules"));
    }
}
