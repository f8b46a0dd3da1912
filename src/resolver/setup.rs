//! Build setup rows.

use crate::constants::SECRET_MASK;
use crate::models::SetupItem;
use crate::templating::ContextBuilder;

/// One row of the `T` region on a build page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupRow {
    pub item_type: String,
    pub name: String,
    pub value: String,
    pub operation: String,
    pub priority: String,
}

impl SetupRow {
    /// Flatten a setup item. Secret variable values are replaced by the mask.
    pub fn project(item: &SetupItem) -> Self {
        let item_type = item.tag().to_string();
        match item {
            SetupItem::Variable {
                name,
                value,
                operation,
                priority,
                secret,
            } => Self {
                item_type,
                name: name.clone(),
                value: if *secret {
                    SECRET_MASK.to_string()
                } else {
                    value.clone()
                },
                operation: operation.clone(),
                priority: priority.clone(),
            },
            // Script type is shown in the operation column.
            SetupItem::Script {
                name,
                script_type,
                priority,
            } => Self {
                item_type,
                name: name.clone(),
                value: String::new(),
                operation: script_type.clone(),
                priority: priority.clone(),
            },
            SetupItem::Alias {
                name,
                value,
                priority,
            } => Self {
                item_type,
                name: name.clone(),
                value: value.clone(),
                operation: String::new(),
                priority: priority.clone(),
            },
            SetupItem::Unknown {
                ..
            } => Self {
                item_type,
                ..Self::default()
            },
        }
    }

    pub fn emit(&self, row: &mut ContextBuilder) {
        row.set_field("TTYPE", self.item_type.as_str());
        row.set_field("TNAME", self.name.as_str());
        row.set_field("TVALUE", self.value.as_str());
        row.set_field("TOPERATION", self.operation.as_str());
        row.set_field("TPRIORITY", self.priority.as_str());
    }
}

/// Write the `T` region, one row per item in declaration order.
pub fn emit_setup(builder: &mut ContextBuilder, items: &[SetupItem]) {
    let mut rows = builder.repeating("T");
    for item in items {
        let row = SetupRow::project(item);
        rows.row(|r| row.emit(r));
    }
}
