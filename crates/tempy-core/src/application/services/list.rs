//! Template listing service.

use tracing::debug;

use crate::application::ports::TemplateStore;

/// Display information for one discovered template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    pub name: String,
    pub description: Option<String>,
}

impl TemplateInfo {
    /// Format one listing line.
    ///
    /// Human format pads the name to 20 columns before the description;
    /// machine format is `name:description`. A template without a
    /// description prints just the name (human) or `name:` (machine).
    pub fn format_line(&self, machine: bool) -> String {
        match (&self.description, machine) {
            (Some(desc), true) => format!("{}:{}", self.name, desc),
            (Some(desc), false) => format!("{:<20}{}", self.name, desc),
            (None, true) => format!("{}:", self.name),
            (None, false) => self.name.clone(),
        }
    }
}

/// Read-only template enumeration over a store.
pub struct TemplateService {
    store: Box<dyn TemplateStore>,
}

impl TemplateService {
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// All discovered templates in scan order.
    pub fn list(&self, report_failures: bool) -> Vec<TemplateInfo> {
        let sets = self.store.scan(report_failures);
        debug!(count = sets.len(), "listing templates");
        sets.into_iter()
            .map(|set| TemplateInfo {
                name: set.effective_name().to_string(),
                description: set.metadata.description.clone(),
            })
            .collect()
    }
}
