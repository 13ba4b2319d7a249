//! Structured flag permission keys

use std::fmt;

use super::{ClaimFlag, ANY, FLAG_PERMISSION_PREFIX};
use crate::error::FlagError;

/// Segment separating the target path from the source path
const SOURCE_MARKER: &str = "source";

/// A flag permission key in structured form.
///
/// Serialises to
/// `griefprevention.flags.<flag>[.<target>][.source.<source>][.<meta>]`;
/// block-state metadata always trails the whole key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlagKey {
    flag: ClaimFlag,
    /// Dotted target path (`minecraft.dirt`, `minecraft`, `plugin.command.arg`)
    target: Option<String>,
    meta: Option<u32>,
    /// Dotted source path (`minecraft.zombie`)
    source: Option<String>,
}

impl FlagKey {
    /// Key for a flag with no target and no source
    pub fn new(flag: ClaimFlag) -> Self {
        Self {
            flag,
            target: None,
            meta: None,
            source: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_meta(mut self, meta: u32) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn flag(&self) -> ClaimFlag {
        self.flag
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn meta(&self) -> Option<u32> {
        self.meta
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Whether this is the bare flag with no target, source or meta
    pub fn is_bare(&self) -> bool {
        self.target.is_none() && self.source.is_none() && self.meta.is_none()
    }

    /// Set the source from user input.
    ///
    /// `any` clears the source, `ns:any` becomes `ns`, colons become dots.
    /// A source on a key without a target adds the namespace as target so
    /// the source segment never directly follows the flag name.
    pub fn apply_source(&mut self, input: &str, namespace: &str) {
        let input = input.trim().to_ascii_lowercase();
        if input.is_empty() || input == ANY {
            self.source = None;
            return;
        }

        let normalized = match input.split_once(':') {
            Some((ns, id)) if id == ANY => ns.to_string(),
            _ => input.replace(':', "."),
        };

        if self.target.is_none() {
            self.target = Some(namespace.to_string());
        }
        self.source = Some(normalized);
    }

    /// Serialise to the permission string stored in the permission store
    pub fn to_permission(&self) -> String {
        let mut out = self.flag.permission();
        if let Some(target) = &self.target {
            out.push('.');
            out.push_str(target);
        }
        if let Some(source) = &self.source {
            out.push('.');
            out.push_str(SOURCE_MARKER);
            out.push('.');
            out.push_str(source);
        }
        if let Some(meta) = self.meta {
            out.push('.');
            out.push_str(&meta.to_string());
        }
        out
    }

    /// The permission string without the `griefprevention.flags.` prefix
    pub fn stripped(&self) -> String {
        let permission = self.to_permission();
        permission[FLAG_PERMISSION_PREFIX.len()..].to_string()
    }

    /// Parse a stored permission string
    ///
    /// Fails with `InvalidFlag` when the prefix is missing or the flag name is
    /// not a known [`ClaimFlag`].
    pub fn parse(permission: &str) -> Result<Self, FlagError> {
        let rest = permission
            .strip_prefix(FLAG_PERMISSION_PREFIX)
            .ok_or_else(|| FlagError::InvalidFlag(permission.to_string()))?;

        let (base, tail) = match rest.split_once('.') {
            Some((base, tail)) => (base, Some(tail)),
            None => (rest, None),
        };
        let flag =
            ClaimFlag::from_name(base).ok_or_else(|| FlagError::InvalidFlag(base.to_string()))?;

        let mut key = Self::new(flag);
        let Some(tail) = tail.filter(|t| !t.is_empty()) else {
            return Ok(key);
        };

        let (target_part, source_part) = split_source(tail);
        let mut target: Vec<&str> = target_part
            .map(|t| t.split('.').collect())
            .unwrap_or_default();
        let mut source: Vec<&str> = source_part
            .map(|s| s.split('.').collect())
            .unwrap_or_default();

        // Meta needs a full `namespace.id` target in front of it
        if flag.targets().accepts_meta() {
            if source.is_empty() {
                if target.len() >= 3 {
                    if let Some(meta) = parse_meta(target.last()) {
                        target.pop();
                        key.meta = Some(meta);
                    }
                }
            } else if source.len() >= 2 && target.len() >= 2 {
                if let Some(meta) = parse_meta(source.last()) {
                    source.pop();
                    key.meta = Some(meta);
                }
            }
        }

        if !target.is_empty() {
            key.target = Some(target.join("."));
        }
        if !source.is_empty() {
            key.source = Some(source.join("."));
        }
        Ok(key)
    }

    /// Whether an override stored under `self` applies to `other`.
    ///
    /// Targets match on whole dot-separated segments: `minecraft.dirt` covers
    /// `minecraft.dirt` and `minecraft.dirt.x` but not `minecraft.dirtpath`.
    /// An absent target, meta or source on `self` covers any value.
    pub fn covers(&self, other: &FlagKey) -> bool {
        if self.flag != other.flag {
            return false;
        }

        let target_ok = match (&self.target, &other.target) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(mine), Some(theirs)) => {
                theirs == mine
                    || (theirs.starts_with(mine.as_str())
                        && theirs.as_bytes().get(mine.len()) == Some(&b'.'))
            }
        };
        let meta_ok = self.meta.is_none() || self.meta == other.meta;
        let source_ok = self.source.is_none() || self.source == other.source;

        target_ok && meta_ok && source_ok
    }

    /// How narrowly this key is scoped; used to rank competing matches
    pub fn specificity(&self) -> usize {
        let target = self.target.as_ref().map_or(0, |t| t.split('.').count());
        let source = self.source.as_ref().map_or(0, |s| s.split('.').count());
        target + source + usize::from(self.meta.is_some())
    }

    /// Hierarchical parents of this key, closest first.
    ///
    /// Mirrors permission-node inheritance: meta is dropped first, then source
    /// segments, then target segments, down to the bare flag.
    pub fn ancestors(&self) -> Vec<FlagKey> {
        let mut out = Vec::new();
        let mut current = self.clone();

        if current.meta.take().is_some() {
            out.push(current.clone());
        }
        while let Some(source) = current.source.take() {
            if let Some((parent, _)) = source.rsplit_once('.') {
                current.source = Some(parent.to_string());
            }
            out.push(current.clone());
        }
        while let Some(target) = current.target.take() {
            if let Some((parent, _)) = target.rsplit_once('.') {
                current.target = Some(parent.to_string());
            }
            out.push(current.clone());
        }
        out
    }
}

/// Split a key tail into target and source parts around the source marker
fn split_source(tail: &str) -> (Option<&str>, Option<&str>) {
    if let Some(source) = tail.strip_prefix("source.") {
        return (None, Some(source));
    }
    match tail.find(".source.") {
        Some(idx) => (Some(&tail[..idx]), Some(&tail[idx + ".source.".len()..])),
        None => (Some(tail), None),
    }
}

fn parse_meta(segment: Option<&&str>) -> Option<u32> {
    segment
        .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
}

impl fmt::Display for FlagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_permission())
    }
}
