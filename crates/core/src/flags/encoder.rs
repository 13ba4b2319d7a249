//! Flag target encoding
//!
//! Turns a human-entered `(flag, source, target)` triple into a [`FlagKey`]
//! and back.
//!
//! Target syntax:
//! - `any` - unscoped, no target segment
//! - `namespace:id` or `id` - registry identifier (host namespace assumed)
//! - `namespace:any` - every identifier of a namespace
//! - `namespace:id.meta` - block state metadata, for block/item flags only
//! - `plugin:command[arg1:arg2]` - command flags only

use griefprevention_host::GameRegistry;

use super::{ClaimFlag, FlagKey, TargetKinds, ANY};
use crate::error::FlagError;

/// Human-readable form of a flag key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFlag {
    pub flag: ClaimFlag,
    /// Source in `namespace:id` form, `None` when unscoped
    pub source: Option<String>,
    /// Target in the syntax accepted by [`encode`], `None` when unscoped
    pub target: Option<String>,
}

impl DecodedFlag {
    /// Source as typed by a user (`any` when unscoped)
    pub fn source_or_any(&self) -> &str {
        self.source.as_deref().unwrap_or(ANY)
    }

    /// Target as typed by a user (`any` when unscoped)
    pub fn target_or_any(&self) -> &str {
        self.target.as_deref().unwrap_or(ANY)
    }
}

/// Encode a `(flag, source, target)` triple into a flag key.
///
/// The target is validated against the game registries; commands must exist
/// in the command registry. Fails with `TargetNotValid` naming the offending
/// fragment.
pub fn encode(
    flag: ClaimFlag,
    source: &str,
    target: &str,
    registry: &dyn GameRegistry,
    namespace: &str,
) -> Result<FlagKey, FlagError> {
    build_key(flag, source, target, Some(registry), namespace)
}

/// Build a flag key from syntactically valid input without consulting the
/// registries.
///
/// Used when the host asks about an action it is about to perform, where the
/// identifiers come from the game itself.
pub fn key_for(
    flag: ClaimFlag,
    source: &str,
    target: &str,
    namespace: &str,
) -> Result<FlagKey, FlagError> {
    build_key(flag, source, target, None, namespace)
}

fn build_key(
    flag: ClaimFlag,
    source: &str,
    target: &str,
    registry: Option<&dyn GameRegistry>,
    namespace: &str,
) -> Result<FlagKey, FlagError> {
    let target = target.trim().to_ascii_lowercase();
    let mut key = FlagKey::new(flag);

    if flag.is_command() {
        if target != ANY {
            key = key.with_target(parse_command_target(&target, registry, namespace)?);
        }
    } else if target != ANY {
        let (ns, rest) = target.split_once(':').unwrap_or((namespace, target.as_str()));
        if ns.is_empty() || rest.is_empty() {
            return Err(FlagError::TargetNotValid(target.clone()));
        }

        if rest == ANY {
            key = key.with_target(ns);
        } else {
            let (id, meta) = match rest.split_once('.') {
                Some((id, meta)) => (id, Some(parse_meta(meta)?)),
                None => (rest, None),
            };
            if meta.is_some() && !flag.targets().accepts_meta() {
                return Err(FlagError::TargetNotValid(rest.to_string()));
            }

            let full_id = format!("{}:{}", ns, id);
            let unknown =
                registry.is_some_and(|r| !validate_target(flag.targets(), &full_id, meta, r));
            if id.is_empty() || unknown {
                return Err(FlagError::TargetNotValid(full_id));
            }

            key = key.with_target(format!("{}.{}", ns, id));
            if let Some(meta) = meta {
                key = key.with_meta(meta);
            }
        }
    }

    key.apply_source(source, namespace);
    Ok(key)
}

/// Decode a stored permission string into its human-readable parts
pub fn decode(permission: &str) -> Result<DecodedFlag, FlagError> {
    FlagKey::parse(permission).map(|key| key.decoded())
}

impl FlagKey {
    /// Human-readable parts of this key; re-encoding them yields this key
    pub fn decoded(&self) -> DecodedFlag {
        let target = self.target().map(|path| {
            let mut segments = path.split('.');
            let ns = segments.next().unwrap_or_default();
            let rest: Vec<&str> = segments.collect();

            if self.flag().is_command() {
                match rest.split_first() {
                    None => format!("{}:{}", ns, ANY),
                    Some((command, [])) => format!("{}:{}", ns, command),
                    Some((command, args)) => format!("{}:{}[{}]", ns, command, args.join(":")),
                }
            } else if rest.is_empty() {
                format!("{}:{}", ns, ANY)
            } else {
                let mut id = format!("{}:{}", ns, rest.join("."));
                if let Some(meta) = self.meta() {
                    id.push('.');
                    id.push_str(&meta.to_string());
                }
                id
            }
        });

        let source = self.source().map(|path| match path.split_once('.') {
            Some((ns, id)) => format!("{}:{}", ns, id),
            None => path.to_string(),
        });

        DecodedFlag {
            flag: self.flag(),
            source,
            target,
        }
    }
}

fn parse_meta(meta: &str) -> Result<u32, FlagError> {
    if meta.is_empty() || !meta.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FlagError::TargetNotValid(meta.to_string()));
    }
    meta.parse()
        .map_err(|_| FlagError::TargetNotValid(meta.to_string()))
}

/// Check a registry id against every kind the flag accepts
fn validate_target(
    kinds: TargetKinds,
    id: &str,
    meta: Option<u32>,
    registry: &dyn GameRegistry,
) -> bool {
    let block = kinds.contains(TargetKinds::BLOCK)
        && match meta {
            Some(meta) => registry.has_block_state(id, meta),
            None => registry.has_block(id),
        };
    let item = kinds.contains(TargetKinds::ITEM)
        && match meta {
            Some(meta) => registry.has_block_state(id, meta),
            None => registry.has_item(id),
        };
    let entity = kinds.contains(TargetKinds::ENTITY) && meta.is_none() && registry.has_entity(id);

    block || item || entity
}

/// Parse `[plugin:]command[[arg1:arg2...]]` into `plugin.command.arg1.arg2`
fn parse_command_target(
    input: &str,
    registry: Option<&dyn GameRegistry>,
    namespace: &str,
) -> Result<String, FlagError> {
    let invalid = || FlagError::TargetNotValid(input.to_string());

    let (head, args) = match input.find('[') {
        Some(open) => {
            let inner = input[open + 1..].strip_suffix(']').ok_or_else(invalid)?;
            if inner.contains(['[', ']']) {
                return Err(invalid());
            }
            (&input[..open], Some(inner))
        }
        None if input.contains(']') => return Err(invalid()),
        None => (input, None),
    };

    if head.is_empty() {
        return Err(invalid());
    }
    let (plugin, command) = head.split_once(':').unwrap_or((namespace, head));
    if plugin.is_empty() || command.is_empty() || plugin.contains('.') || command.contains('.') {
        return Err(invalid());
    }

    if command == ANY {
        if args.is_some() {
            return Err(invalid());
        }
        return Ok(plugin.to_string());
    }

    if registry.is_some_and(|r| !r.has_command(plugin, command)) {
        return Err(FlagError::TargetNotValid(format!("{}:{}", plugin, command)));
    }

    let mut path = format!("{}.{}", plugin, command);
    if let Some(args) = args {
        for arg in args.split(':') {
            if arg.is_empty() || arg.contains('.') {
                return Err(invalid());
            }
            path.push('.');
            path.push_str(arg);
        }
    }
    Ok(path)
}
