use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;
use std::{env, fs};

use toml_edit::{Document, Item};

/// The facade package re-exporting every `nodal_*` crate as a module.
const FACADE: &str = "nodal";
const PREFIX: &str = "nodal_";

/// Dependency tables searched, in order.
const TABLES: [&str; 2] = ["dependencies", "dev-dependencies"];

/// The `Cargo.toml` of the crate a derive is expanding in.
///
/// Generated code has to name `nodal_model` items through a path the
/// caller can see. That is `::nodal_model` when it is a direct dependency,
/// and `::nodal::model` when the caller only depends on the facade.
///
/// ```rust
/// # use nodal_macro_utils::Manifest;
/// let model: syn::Path = Manifest::crate_path("nodal_model");
/// ```
///
/// A crate naming itself this way needs `extern crate self as nodal_model;`.
#[derive(Debug)]
pub struct Manifest {
    document: Document<Box<str>>,
    modified: SystemTime,
}

impl Manifest {
    /// Path to the crate `name` as seen from the expanding crate.
    ///
    /// Falls back to `::name` when neither the crate nor the facade is
    /// listed.
    pub fn crate_path(name: &str) -> syn::Path {
        Self::with_current(|manifest| manifest.resolve(name))
            .unwrap_or_else(|| path(&format!("::{name}")))
    }

    fn resolve(&self, name: &str) -> Option<syn::Path> {
        let tables = TABLES.iter().filter_map(|key| match self.document.get(key) {
            Some(Item::Table(table)) => Some(table),
            _ => None,
        });

        for table in tables {
            if table.contains_key(name) {
                return Some(path(&format!("::{name}")));
            }
            if let Some(module) = name.strip_prefix(PREFIX)
                && table.contains_key(FACADE)
            {
                return Some(path(&format!("::{FACADE}::{module}")));
            }
        }
        None
    }

    /// Runs `f` on the parsed manifest of `CARGO_MANIFEST_DIR`.
    ///
    /// Parsed documents are kept per path until the file changes on disk.
    fn with_current<R>(f: impl FnOnce(&Self) -> Option<R>) -> Option<R> {
        static PARSED: Mutex<BTreeMap<PathBuf, Manifest>> = Mutex::new(BTreeMap::new());

        let mut file = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        file.push("Cargo.toml");
        let modified = fs::metadata(&file).and_then(|meta| meta.modified()).ok()?;

        let mut parsed = PARSED.lock().unwrap_or_else(PoisonError::into_inner);
        if parsed.get(&file).is_none_or(|cached| cached.modified != modified) {
            let text = fs::read_to_string(&file).ok()?;
            let document = Document::parse(text.into_boxed_str())
                .unwrap_or_else(|err| panic!("invalid manifest {}: {err}", file.display()));
            parsed.insert(file.clone(), Manifest { document, modified });
        }

        f(parsed.get(&file)?)
    }
}

fn path(text: &str) -> syn::Path {
    syn::parse_str(text).unwrap_or_else(|_| panic!("`{text}` is not a path"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(toml: &str) -> Manifest {
        Manifest {
            document: Document::parse(Box::from(toml)).unwrap(),
            modified: SystemTime::UNIX_EPOCH,
        }
    }

    fn render(path: Option<syn::Path>) -> Option<String> {
        path.map(|path| {
            path.segments
                .iter()
                .map(|segment| segment.ident.to_string())
                .collect::<Vec<_>>()
                .join("::")
        })
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\nnodal_model = \"0.0.1\"\nnodal = \"0.0.1\"\n");
        assert_eq!(render(m.resolve("nodal_model")).as_deref(), Some("nodal_model"));
    }

    #[test]
    fn facade_module() {
        let m = manifest("[dev-dependencies]\nnodal = { path = \"..\" }\n");
        assert_eq!(render(m.resolve("nodal_model")).as_deref(), Some("nodal::model"));
        assert_eq!(render(m.resolve("serde")), None);
    }
}
