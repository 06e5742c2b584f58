// crates/uanodeset-rs/src/config.rs

use std::collections::BTreeSet;

/// Default locale written on `DisplayName` and `Description`.
pub const DEFAULT_LOCALE: &str = "en";
/// Model URI declared in the `<Models>` section.
pub const DEFAULT_MODEL_URI: &str = "KEPServerEnterprise";
/// URI of the standard OPC UA namespace, required by every model.
pub const STANDARD_MODEL_URI: &str = "http://opcfoundation.org/UA/";

/// A literal namespace URI rewrite applied to the written document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriPatch {
    /// URI the server reports.
    pub from: String,
    /// URI the consuming tooling expects.
    pub to: String,
}

impl UriPatch {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The exact `<Uri>` element text that is searched for.
    pub fn placeholder(&self) -> String {
        format!("<Uri>{}</Uri>", self.from)
    }

    pub fn replacement(&self) -> String {
        format!("<Uri>{}</Uri>", self.to)
    }
}

impl Default for UriPatch {
    fn default() -> Self {
        UriPatch::new("KEPServerEX", "KEPServerEnterprise")
    }
}

/// Configuration of one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Write the `Value` of Variables (VariableTypes always carry theirs).
    pub export_values: bool,
    /// Export only nodes whose own namespace index is listed. `None` exports all nodes.
    pub namespace_filter: Option<BTreeSet<u16>>,
    /// Locale attached to every `DisplayName` and `Description`.
    pub locale: String,
    pub model_uri: String,
    pub required_model: String,
    /// Rewrite applied to the written file. `None` leaves it untouched.
    pub uri_patch: Option<UriPatch>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            export_values: false,
            namespace_filter: None,
            locale: DEFAULT_LOCALE.to_string(),
            model_uri: DEFAULT_MODEL_URI.to_string(),
            required_model: STANDARD_MODEL_URI.to_string(),
            uri_patch: Some(UriPatch::default()),
        }
    }
}

impl ExportOptions {
    /// Restricts the export to the given namespace indices. An empty list
    /// disables the filter.
    pub fn with_namespaces(mut self, namespaces: impl IntoIterator<Item = u16>) -> Self {
        let set: BTreeSet<u16> = namespaces.into_iter().collect();
        self.namespace_filter = (!set.is_empty()).then_some(set);
        self
    }

    pub fn with_values(mut self, export_values: bool) -> Self {
        self.export_values = export_values;
        self
    }

    /// Whether a node living in `namespace` passes the filter.
    pub fn selects(&self, namespace: u16) -> bool {
        self.namespace_filter
            .as_ref()
            .is_none_or(|set| set.contains(&namespace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert!(!options.export_values);
        assert_eq!(options.locale, "en");
        assert_eq!(
            options.uri_patch.unwrap().placeholder(),
            "<Uri>KEPServerEX</Uri>"
        );
    }

    #[test]
    fn test_namespace_filter() {
        let options = ExportOptions::default().with_namespaces([2]);
        assert!(options.selects(2));
        assert!(!options.selects(0));

        let all = ExportOptions::default().with_namespaces([]);
        assert!(all.namespace_filter.is_none());
        assert!(all.selects(7));
    }
}
