//! Ordered class taxonomy used to size and label reports.

use crate::util::{DetPipeError, DetPipeResult};

/// Names (and optional icons) of the classes a model predicts, in
/// class-index order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Taxonomy {
    names: Vec<String>,
    icons: Option<Vec<String>>,
}

impl Taxonomy {
    /// Creates a taxonomy from class names; at least one name is required.
    pub fn new<I, S>(names: I) -> DetPipeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(DetPipeError::InvalidClassCount { num_classes: 0 });
        }
        Ok(Self { names, icons: None })
    }

    /// Attaches one icon per class.
    pub fn with_icons<I, S>(mut self, icons: I) -> DetPipeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let icons: Vec<String> = icons.into_iter().map(Into::into).collect();
        if icons.len() != self.names.len() {
            return Err(DetPipeError::TaxonomyMismatch {
                expected: self.names.len(),
                got: icons.len(),
            });
        }
        self.icons = Some(icons);
        Ok(self)
    }

    /// The six-class office inventory taxonomy.
    pub fn inventory() -> Self {
        let names = ["CPU", "Mesa", "Mouse", "Pantalla", "Silla", "Teclado"];
        let icons = ["🖥️", "🪑", "🖱️", "💻", "💺", "⌨️"];
        Self {
            names: names.iter().map(|s| s.to_string()).collect(),
            icons: Some(icons.iter().map(|s| s.to_string()).collect()),
        }
    }

    /// Returns the number of classes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false; a taxonomy holds at least one class.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns all class names in class-index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the name of `class_index`.
    pub fn name(&self, class_index: usize) -> Option<&str> {
        self.names.get(class_index).map(String::as_str)
    }

    /// Returns the icon of `class_index`, if icons are attached.
    pub fn icon(&self, class_index: usize) -> Option<&str> {
        self.icons
            .as_ref()
            .and_then(|icons| icons.get(class_index))
            .map(String::as_str)
    }

    /// Returns `"<icon> <name>"`, or just the name without icons.
    pub fn label(&self, class_index: usize) -> Option<String> {
        let name = self.name(class_index)?;
        Some(match self.icon(class_index) {
            Some(icon) => format!("{icon} {name}"),
            None => name.to_string(),
        })
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::inventory()
    }
}
