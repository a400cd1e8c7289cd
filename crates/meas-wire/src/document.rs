//! Namespace table and document roots.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::element::Element;
use crate::error::WireError;

/// Prefix to namespace URI table shared by every document in the process.
///
/// Built on first use and never modified afterwards.
pub fn namespaces() -> &'static IndexMap<&'static str, &'static str> {
    static TABLE: OnceLock<IndexMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| {
        IndexMap::from([
            ("om", "http://www.opengis.net/om/2.0"),
            ("gml", "http://www.opengis.net/gml/3.2"),
            ("gmlcov", "http://www.opengis.net/gmlcov/1.0"),
            ("swe", "http://www.opengis.net/swe/2.0"),
            ("tsml", "http://www.opengis.net/tsml/1.0"),
            ("xlink", "http://www.w3.org/1999/xlink"),
            ("xsi", "http://www.w3.org/2001/XMLSchema-instance"),
            ("xs", "http://www.w3.org/2001/XMLSchema"),
            ("cocop", "http://www.cocop-spire.eu/om-custom/1.2"),
        ])
    })
}

/// Namespace URI registered for `prefix`.
pub fn namespace_uri(prefix: &str) -> Option<&'static str> {
    namespaces().get(prefix).copied()
}

/// A root element carrying `xmlns:` declarations for every prefix used in
/// its subtree.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Wrap `root`, declaring each namespace prefix that appears in element
    /// names, attribute names or `xsi:type` values below it.
    ///
    /// Fails with [`WireError::UnknownPrefix`] if a prefix is not registered.
    pub fn new(mut root: Element) -> Result<Self, WireError> {
        let mut prefixes = BTreeSet::new();
        root.walk(&mut |el| {
            collect_prefix(el.name(), &mut prefixes);
            for (name, value) in el.attributes() {
                collect_prefix(name, &mut prefixes);
                if name == crate::names::XSI_TYPE {
                    collect_prefix(value, &mut prefixes);
                }
            }
        });
        for prefix in prefixes {
            let uri = namespace_uri(&prefix).ok_or(WireError::UnknownPrefix {
                prefix: prefix.clone(),
            })?;
            root.set_attr(format!("xmlns:{prefix}"), uri);
        }
        Ok(Self { root })
    }

    /// The stamped root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Unwrap into the root element.
    pub fn into_root(self) -> Element {
        self.root
    }
}

fn collect_prefix(qname: &str, out: &mut BTreeSet<String>) {
    if let Some((prefix, _)) = qname.split_once(':') {
        if prefix != "xmlns" {
            out.insert(prefix.to_string());
        }
    }
}
