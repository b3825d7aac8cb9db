use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::License;

/// Raw license names and URLs as seen in dependency manifests, mapped to the
/// license text file they stand for.
///
/// Keys are matched verbatim. Both `http` and `https` spellings are listed
/// explicitly, and `https//www.gnu.org/licenses/gpl-3.0.txt` (no colon) is a
/// value found in published POMs and must stay as written.
///
/// License texts follow choosealicense.com's `_licenses` directory.
const ENTRIES: &[(&str, &str)] = &[
    // Apache License 2.0
    ("Apache 2.0", "apache-2.0.txt"),
    ("Apache License 2.0", "apache-2.0.txt"),
    ("The Apache Software License", "apache-2.0.txt"),
    ("The Apache Software License, Version 2.0", "apache-2.0.txt"),
    ("http://www.apache.org/licenses/LICENSE-2.0.txt", "apache-2.0.txt"),
    ("https://www.apache.org/licenses/LICENSE-2.0.txt", "apache-2.0.txt"),
    ("http://opensource.org/licenses/Apache-2.0", "apache-2.0.txt"),
    ("https://opensource.org/licenses/Apache-2.0", "apache-2.0.txt"),
    // BSD 2-Clause "Simplified" License
    ("BSD 2-Clause \"Simplified\" License", "bsd-2-clause.txt"),
    ("http://opensource.org/licenses/BSD-2-Clause", "bsd-2-clause.txt"),
    ("https://opensource.org/licenses/BSD-2-Clause", "bsd-2-clause.txt"),
    // BSD 3-Clause "New" or "Revised" License
    ("BSD 3-Clause \"New\" or \"Revised\" License", "bsd-3-clause.txt"),
    ("http://opensource.org/licenses/BSD-3-Clause", "bsd-3-clause.txt"),
    ("https://opensource.org/licenses/BSD-3-Clause", "bsd-3-clause.txt"),
    // Eclipse Public License 2.0
    ("Eclipse Public License 2.0", "epl-2.0.txt"),
    ("http://www.eclipse.org/org/documents/epl-2.0/EPL-2.0.txt", "epl-2.0.txt"),
    ("https://www.eclipse.org/org/documents/epl-2.0/EPL-2.0.txt", "epl-2.0.txt"),
    ("http://opensource.org/licenses/EPL-2.0", "epl-2.0.txt"),
    ("https://opensource.org/licenses/EPL-2.0", "epl-2.0.txt"),
    // GNU General Public License v2.0
    ("GNU General Public License v2.0", "gpl-2.0.txt"),
    ("http://www.gnu.org/licenses/gpl-2.0.txt", "gpl-2.0.txt"),
    ("https://www.gnu.org/licenses/gpl-2.0.txt", "gpl-2.0.txt"),
    ("http://opensource.org/licenses/GPL-2.0", "gpl-2.0.txt"),
    ("https://opensource.org/licenses/GPL-2.0", "gpl-2.0.txt"),
    // GNU General Public License v3.0
    ("GNU General Public License v3.0", "gpl-3.0.txt"),
    ("https//www.gnu.org/licenses/gpl-3.0.txt", "gpl-3.0.txt"),
    ("https://www.gnu.org/licenses/gpl-3.0.txt", "gpl-3.0.txt"),
    ("http://opensource.org/licenses/GPL-3.0", "gpl-3.0.txt"),
    ("https://opensource.org/licenses/GPL-3.0", "gpl-3.0.txt"),
    // GNU Lesser General Public License v2.1
    ("GNU Lesser General Public License v2.1", "lgpl-2.1.txt"),
    ("http://www.gnu.org/licenses/lgpl-2.1.txt", "lgpl-2.1.txt"),
    ("https://www.gnu.org/licenses/lgpl-2.1.txt", "lgpl-2.1.txt"),
    ("http://opensource.org/licenses/LGPL-2.1", "lgpl-2.1.txt"),
    ("https://opensource.org/licenses/LGPL-2.1", "lgpl-2.1.txt"),
    // GNU Lesser General Public License v3.0
    ("GNU Lesser General Public License v3.0", "lgpl-3.0.txt"),
    ("http://www.gnu.org/licenses/lgpl-3.0.txt", "lgpl-3.0.txt"),
    ("https://www.gnu.org/licenses/lgpl-3.0.txt", "lgpl-3.0.txt"),
    ("http://opensource.org/licenses/LGPL-3.0", "lgpl-3.0.txt"),
    ("https://opensource.org/licenses/LGPL-3.0", "lgpl-3.0.txt"),
    // MIT License
    ("MIT License", "mit.txt"),
    ("http://opensource.org/licenses/MIT", "mit.txt"),
    ("https://opensource.org/licenses/MIT", "mit.txt"),
    ("http://www.opensource.org/licenses/mit-license.php", "mit.txt"),
    // Mozilla Public License 2.0
    ("Mozilla Public License 2.0", "mpl-2.0.txt"),
    ("http://www.mozilla.org/media/MPL/2.0/index.txt", "mpl-2.0.txt"),
    ("https://www.mozilla.org/media/MPL/2.0/index.txt", "mpl-2.0.txt"),
    ("http://opensource.org/licenses/MPL-2.0", "mpl-2.0.txt"),
    ("https://opensource.org/licenses/MPL-2.0", "mpl-2.0.txt"),
];

static CATALOG: Lazy<LicenseCatalog> = Lazy::new(LicenseCatalog::from_entries);

/// Read-only lookup from raw license strings to canonical license text ids.
#[derive(Debug)]
pub struct LicenseCatalog {
    entries: &'static [(&'static str, &'static str)],
    index: HashMap<&'static str, &'static str>,
}

impl LicenseCatalog {
    /// The process-wide catalog, built on first access.
    pub fn global() -> &'static LicenseCatalog {
        &CATALOG
    }

    fn from_entries() -> Self {
        Self {
            entries: ENTRIES,
            index: ENTRIES.iter().copied().collect(),
        }
    }

    /// Exact-match lookup of a license name or URL.
    ///
    /// No case folding, trimming or scheme normalization is applied; a miss
    /// is an ordinary outcome and returns `None`.
    pub fn resolve(&self, key: &str) -> Option<&'static str> {
        self.index.get(key).copied()
    }

    /// All `(raw key, canonical id)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        self.entries.iter().copied()
    }

    /// Each canonical id once, in the order it first appears.
    pub fn canonical_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = Vec::new();
        for (_, id) in self.iter() {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Whether `id` names one of the catalog's license texts.
    pub fn contains_id(&self, id: &str) -> bool {
        self.entries.iter().any(|(_, known)| *known == id)
    }

    /// Key used by renderers to pick a license text: the catalog id for the
    /// URL, then for the name, otherwise the raw URL (possibly empty).
    pub fn license_key(&self, license: &License) -> String {
        self.resolve(license.url())
            .or_else(|| self.resolve(license.name()))
            .map(str::to_string)
            .unwrap_or_else(|| license.url().to_string())
    }
}
