// aurpub: AUR package publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parser for `makepkg --printsrcinfo` output.
//!
//! ```text
//! pkgbase = foo            <- base section
//! \tpkgver = 2.0
//! \tmakedepends = bar>=2.0
//!
//! pkgname = foo            <- package section
//! \tdepends = baz
//!
//! pkgname = foo-debug      <- package section
//! ```

use serde::Serialize;

use crate::error::ResolutionError;

/// One `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub key: String,
    pub value: String,
}

/// A `pkgbase` or `pkgname` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Value of the header line.
    pub name: String,
    pub fields: Vec<Field>,
}

impl Section {
    /// First value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    /// All values of `key`, in file order.
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.fields
            .iter()
            .filter(move |f| f.key == key)
            .map(|f| f.value.as_str())
    }

    /// All values whose key is `base` or `base_<arch>`.
    pub fn values_with_arch<'a>(&'a self, base: &'a str) -> impl Iterator<Item = &'a str> {
        self.fields
            .iter()
            .filter(move |f| is_arch_variant(&f.key, base))
            .map(|f| f.value.as_str())
    }
}

/// `key == base` or `key == base_<suffix>`.
fn is_arch_variant(key: &str, base: &str) -> bool {
    key.strip_prefix(base)
        .is_some_and(|rest| rest.is_empty() || (rest.starts_with('_') && rest.len() > 1))
}

/// Parsed `.SRCINFO`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Srcinfo {
    /// The `pkgbase` section, if present.
    pub base: Option<Section>,
    /// `pkgname` sections in file order.
    pub packages: Vec<Section>,
}

impl Srcinfo {
    /// Parses the text of a `.SRCINFO` export.
    ///
    /// Blank lines and `#` comments are skipped. Fields before the first
    /// header are rejected.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError::MalformedMetadata` for a line without
    /// `=` or a field outside any section.
    pub fn parse(text: &str) -> Result<Self, ResolutionError> {
        let mut srcinfo = Self::default();
        let mut current: Option<Section> = None;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Keys never contain '=', values may ("bar>=2.0").
            let (key, value) = line
                .split_once('=')
                .map(|(k, v)| (k.trim(), v.trim()))
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| ResolutionError::MalformedMetadata {
                    line: index + 1,
                    message: format!("expected 'key = value', got '{line}'"),
                })?;

            match key {
                "pkgbase" | "pkgname" => {
                    if let Some(done) = current.take() {
                        srcinfo.push(done);
                    }
                    current = Some(Section {
                        name: value.to_string(),
                        fields: vec![Field {
                            key: key.to_string(),
                            value: value.to_string(),
                        }],
                    });
                }
                _ => {
                    let section =
                        current
                            .as_mut()
                            .ok_or_else(|| ResolutionError::MalformedMetadata {
                                line: index + 1,
                                message: format!("field '{key}' before pkgbase/pkgname"),
                            })?;
                    section.fields.push(Field {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }

        if let Some(done) = current {
            srcinfo.push(done);
        }
        Ok(srcinfo)
    }

    fn push(&mut self, section: Section) {
        if section.get("pkgbase").is_some() && self.base.is_none() {
            self.base = Some(section);
        } else {
            self.packages.push(section);
        }
    }

    /// Base and package sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.base.iter().chain(self.packages.iter())
    }

    /// Looks up a field in the base section.
    #[must_use]
    pub fn base_value(&self, key: &str) -> Option<&str> {
        self.base.as_ref().and_then(|b| b.get(key))
    }

    /// Names of the packages, in declaration order.
    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(|p| p.name.as_str())
    }

    /// All values of `base` and its arch variants across every section.
    #[must_use]
    pub fn collect_all(&self, base: &str) -> Vec<String> {
        self.sections()
            .flat_map(|s| s.values_with_arch(base))
            .map(ToString::to_string)
            .collect()
    }
}
