//! Access-list display.

use crate::models::{AclPolicy, AclRule};
use crate::templating::ContextBuilder;

/// Display form of an access list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclView {
    /// Whether the `ACL` region is shown at all.
    pub visible: bool,
    /// `allow all` or `deny all`.
    pub default_label: String,
    /// `"<rule kind> <group>"` labels in declaration order.
    pub rules: Vec<String>,
}

impl AclView {
    /// Resolve an optional access list.
    ///
    /// A missing list behaves like `allow` with no rules. The region is hidden
    /// only in that situation: default allow and nothing else to say.
    pub fn resolve(acl: Option<&AclRule>) -> Self {
        let Some(acl) = acl else {
            return Self {
                visible: false,
                default_label: default_label(AclPolicy::Allow).to_string(),
                rules: Vec::new(),
            };
        };

        let rules: Vec<String> =
            acl.entries.iter().map(|entry| format!("{} {}", entry.rule_kind, entry.group)).collect();

        Self {
            visible: acl.default_policy == AclPolicy::Deny || !rules.is_empty(),
            default_label: default_label(acl.default_policy).to_string(),
            rules,
        }
    }

    /// Write the `ACL{ RULES[ACLRULE], DEFACL }` region.
    pub fn emit(&self, builder: &mut ContextBuilder) {
        let mut acl = builder.conditional("ACL", self.visible);
        {
            let mut rules = acl.repeating("RULES");
            for rule in &self.rules {
                rules.row(|row| row.set_field("ACLRULE", rule.as_str()));
            }
        }
        acl.set_field("DEFACL", self.default_label.as_str());
    }
}

fn default_label(policy: AclPolicy) -> &'static str {
    match policy {
        AclPolicy::Allow => "allow all",
        AclPolicy::Deny => "deny all",
    }
}
