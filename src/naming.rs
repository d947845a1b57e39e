//! Kubernetes object naming
//!
//! Atlas names allow characters Kubernetes rejects. Names are lower-cased,
//! disallowed characters are spelled out through a [`NameDictionary`] and
//! anything left outside `[a-z0-9-]` is dropped. The result is a DNS-1123
//! label: at most 63 characters, no leading or trailing `-`. A candidate
//! with nothing left after that is named by a hash of its raw text.

use std::collections::{BTreeMap, HashSet};

use sha2::{Digest, Sha256};

/// Maximum length of a normalized name
pub const MAX_NAME_LENGTH: usize = 63;

/// Length of the random disambiguation suffix
pub const SUFFIX_LENGTH: usize = 6;

/// Length of hash-derived name tokens
pub const HASH_TOKEN_LENGTH: usize = 8;

/// Character substitution table used by [`normalize`]
#[derive(Clone, Debug)]
pub struct NameDictionary {
    substitutions: BTreeMap<char, &'static str>,
}

impl Default for NameDictionary {
    fn default() -> Self {
        let substitutions = [
            (' ', "-"),
            ('_', "-"),
            ('.', "dot"),
            ('@', "at"),
            ('&', "and"),
            ('+', "plus"),
            (':', "colon"),
            ('/', "slash"),
            ('\\', "backslash"),
            ('!', "exclamation-mark"),
            ('#', "hash"),
            ('$', "dollar"),
            ('%', "percent"),
            ('*', "asterisk"),
            (',', "comma"),
            (';', "semicolon"),
            ('=', "equal"),
            ('?', "question-mark"),
            ('^', "caret"),
            ('|', "pipe"),
            ('~', "tilde"),
            ('(', "left-parenthesis"),
            (')', "right-parenthesis"),
            ('[', "left-square-bracket"),
            (']', "right-square-bracket"),
            ('{', "left-curly-bracket"),
            ('}', "right-curly-bracket"),
            ('<', "less-than"),
            ('>', "greater-than"),
            ('\'', "single-quote"),
            ('"', "double-quote"),
            ('`', "backtick"),
        ]
        .into_iter()
        .collect();
        Self { substitutions }
    }
}

impl NameDictionary {
    /// Replacement for a character, if the dictionary has one
    pub fn substitute(&self, c: char) -> Option<&'static str> {
        self.substitutions.get(&c).copied()
    }
}

/// Turn an arbitrary candidate into a valid Kubernetes object name
pub fn normalize(candidate: &str, dictionary: &NameDictionary) -> String {
    let mut expanded = String::with_capacity(candidate.len());
    for c in candidate.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            expanded.push(c);
            continue;
        }
        match dictionary.substitute(c) {
            Some("-") => expanded.push('-'),
            Some(word) => {
                expanded.push('-');
                expanded.push_str(word);
                expanded.push('-');
            }
            None => {}
        }
    }

    // collapse runs of '-'
    let mut name = String::with_capacity(expanded.len());
    for c in expanded.chars() {
        if c == '-' && name.ends_with('-') {
            continue;
        }
        name.push(c);
    }

    let mut name = name.trim_matches('-').to_string();
    if name.is_empty() {
        return hash_token(candidate);
    }
    if name.len() > MAX_NAME_LENGTH {
        name.truncate(MAX_NAME_LENGTH);
        name = name.trim_end_matches('-').to_string();
    }
    name
}

/// Normalize each part, join them with `-` and bound the result
///
/// Every non-empty part contributes to the name, even one made only of
/// characters the dictionary cannot spell out.
pub fn normalize_parts(parts: &[&str], dictionary: &NameDictionary) -> String {
    let joined = parts
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| normalize(p, dictionary))
        .collect::<Vec<_>>()
        .join("-");
    normalize(&joined, dictionary)
}

/// Short lowercase hex token derived from arbitrary text
pub fn hash_token(source: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(source.as_bytes()));
    digest[..HASH_TOKEN_LENGTH].to_string()
}

/// Append a suffix to a normalized name, shortening the name so the suffix survives
pub fn with_suffix(name: &str, suffix: &str, dictionary: &NameDictionary) -> String {
    let room = MAX_NAME_LENGTH.saturating_sub(suffix.len() + 1);
    let base = if name.len() > room {
        name[..room].trim_end_matches('-')
    } else {
        name
    };
    normalize_parts(&[base, suffix], dictionary)
}

/// Compact region token for names: separators removed, lower-cased
///
/// `US_EAST_1` becomes `useast1`, `europe-west1` becomes `europewest1`.
pub fn region_token(region: &str) -> String {
    region
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Source of disambiguation suffixes for collision-prone names
pub trait SuffixSource: Send + Sync {
    /// A short lowercase alphanumeric token
    fn suffix(&self) -> String;
}

/// Random suffixes drawn from a v4 UUID
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomSuffix;

impl SuffixSource for RandomSuffix {
    fn suffix(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()[..SUFFIX_LENGTH].to_string()
    }
}

/// Always returns the same suffix
#[derive(Clone, Debug)]
pub struct FixedSuffix(pub String);

impl SuffixSource for FixedSuffix {
    fn suffix(&self) -> String {
        self.0.clone()
    }
}

/// Build a name that stays unique within a run by appending a suffix before normalizing
pub fn unique_name(parts: &[&str], dictionary: &NameDictionary, suffixes: &dyn SuffixSource) -> String {
    let suffix = suffixes.suffix();
    with_suffix(&normalize_parts(parts, dictionary), &suffix, dictionary)
}

/// Names handed out during one run, per kind
///
/// Distinct Atlas names can normalize to the same Kubernetes name
/// (`app_user` and `app-user`). The second claimant gets a hash of its
/// source identity appended instead.
#[derive(Clone, Debug, Default)]
pub struct NameClaims {
    taken: HashSet<(String, String)>,
}

impl NameClaims {
    /// Mark a name as used without disambiguation
    ///
    /// Returns false if the name was already taken.
    pub fn reserve(&mut self, kind: &str, name: &str) -> bool {
        self.taken.insert((kind.to_string(), name.to_string()))
    }

    /// Claim `name` for `kind`, appending a token derived from `source` if it is taken
    pub fn claim(&mut self, kind: &str, name: String, source: &str, dictionary: &NameDictionary) -> String {
        if self.reserve(kind, &name) {
            return name;
        }
        let mut seed = source.to_string();
        loop {
            let candidate = with_suffix(&name, &hash_token(&seed), dictionary);
            if self.reserve(kind, &candidate) {
                return candidate;
            }
            seed.push('#');
        }
    }

    pub fn is_taken(&self, kind: &str, name: &str) -> bool {
        self.taken.contains(&(kind.to_string(), name.to_string()))
    }
}
