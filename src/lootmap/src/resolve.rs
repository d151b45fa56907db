//! Item id → icon name resolution
//!
//! Item ids and icon file names follow loosely related conventions, so an
//! id is resolved by trying a fixed list of strategies, cheapest and most
//! certain first:
//!
//! | Order | Rule   | Match                                                   |
//! |-------|--------|---------------------------------------------------------|
//! | 1     | Exact  | id equals an icon base name, ignoring case              |
//! | 2     | Alias  | id after alias substitution equals an icon base name    |
//! | 3     | Suffix | id minus the instance suffix equals an icon base name   |
//! | 4     | Fuzzy  | closest icon sharing the id's prefix, above the cutoff  |
//!
//! The first strategy that produces a hit wins. Ids nothing matches are
//! reported as missing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::icons::IconCatalog;
use crate::similarity::close_match;
use crate::{Error, Result};

/// One literal substring replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub pattern: String,
    pub replacement: String,
}

impl Alias {
    pub fn new(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

/// Known renames between item families and icon families
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("Food_Kebab", "Food_Skewer"),
    ("Shortbow", "Bow"),
    ("Ingredient_Charcoal", "Rubble_Charcoal_Small"),
    ("Potion_Health_Lesser", "Potion_Health_Small"),
    ("Potion_Stamina_Lesser", "Potion_Stamina_Small"),
    ("Potion_Mana_Lesser", "Potion_Mana_Small"),
];

/// Ordered list of substring replacements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable(pub Vec<Alias>);

impl Default for AliasTable {
    fn default() -> Self {
        Self(
            DEFAULT_ALIASES
                .iter()
                .map(|(p, r)| Alias::new(p, r))
                .collect(),
        )
    }
}

impl AliasTable {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Replace every occurrence of every pattern, in table order
    ///
    /// Each replacement runs on the output of the previous one, so a later
    /// pattern can match text an earlier replacement produced.
    pub fn apply(&self, id: &str) -> String {
        self.0
            .iter()
            .fold(id.to_string(), |acc, alias| acc.replace(&alias.pattern, &alias.replacement))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Tunables for the resolution chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Suffix marking an item instance rather than its type
    pub instance_suffix: String,
    /// Separator between an id's category prefix and the rest
    pub prefix_delimiter: char,
    /// Minimum similarity for a fuzzy match, in `[0, 1]`
    pub cutoff: f64,
    /// Kept last so TOML writes it after the scalar keys
    pub aliases: AliasTable,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            instance_suffix: "_Item".to_string(),
            prefix_delimiter: '_',
            cutoff: 0.6,
            aliases: AliasTable::default(),
        }
    }
}

impl ResolverSettings {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.cutoff) {
            return Err(Error::InvalidSettings(format!(
                "cutoff must be between 0 and 1, got {}",
                self.cutoff
            )));
        }
        if let Some(alias) = self.aliases.0.iter().find(|a| a.pattern.is_empty()) {
            return Err(Error::InvalidSettings(format!(
                "alias pattern for '{}' is empty",
                alias.replacement
            )));
        }
        Ok(())
    }
}

/// Which strategy resolved an id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    Exact,
    Alias,
    Suffix,
    Fuzzy,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Exact => write!(f, "exact"),
            Rule::Alias => write!(f, "alias"),
            Rule::Suffix => write!(f, "suffix"),
            Rule::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// A strategy's answer for one id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    /// Icon base name
    pub icon: String,
    /// False when the default `<id>.<ext>` path already names the icon
    pub explicit: bool,
}

impl Hit {
    fn explicit(icon: &str) -> Self {
        Self {
            icon: icon.to_string(),
            explicit: true,
        }
    }
}

/// A single resolution rule
pub type Strategy = fn(&str, &IconCatalog, &ResolverSettings) -> Option<Hit>;

fn exact(id: &str, catalog: &IconCatalog, _: &ResolverSettings) -> Option<Hit> {
    let file = catalog.lookup(id)?;
    let default_file = format!("{}.{}", id, catalog.extension());
    Some(Hit {
        icon: catalog.base_name(file).to_string(),
        explicit: file != default_file,
    })
}

fn alias(id: &str, catalog: &IconCatalog, settings: &ResolverSettings) -> Option<Hit> {
    let candidate = settings.aliases.apply(id);
    catalog.lookup_base(&candidate).map(Hit::explicit)
}

fn suffix(id: &str, catalog: &IconCatalog, settings: &ResolverSettings) -> Option<Hit> {
    if settings.instance_suffix.is_empty() {
        return None;
    }
    let stripped = id.strip_suffix(settings.instance_suffix.as_str())?;
    catalog.lookup_base(stripped).map(Hit::explicit)
}

fn fuzzy(id: &str, catalog: &IconCatalog, settings: &ResolverSettings) -> Option<Hit> {
    let prefix = id.split(settings.prefix_delimiter).next().unwrap_or(id);

    let files = catalog.files();
    let mut candidates: Vec<&str> = files
        .iter()
        .map(String::as_str)
        .filter(|f| f.starts_with(prefix))
        .collect();
    if candidates.is_empty() {
        candidates = files.iter().map(String::as_str).collect();
    }

    close_match(id, candidates, settings.cutoff).map(|f| Hit::explicit(catalog.base_name(f)))
}

/// Resolution strategies in evaluation order
pub const STRATEGIES: [(Rule, Strategy); 4] = [
    (Rule::Exact, exact),
    (Rule::Alias, alias),
    (Rule::Suffix, suffix),
    (Rule::Fuzzy, fuzzy),
];

/// Outcome for one id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Icon is `<id>.<ext>`; no mapping entry needed
    Implicit,
    /// Icon found under a different name
    Mapped { rule: Rule, icon: String },
    /// No strategy matched
    Missing,
}

/// Results of resolving a set of ids
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveOutcome {
    /// id → icon base name, for ids the default path would not find
    pub mappings: BTreeMap<String, String>,
    /// Rule that produced each mapping
    pub rules: BTreeMap<String, Rule>,
    /// Ids whose icon is already at the default path
    pub implicit: usize,
    /// Ids with no icon, sorted
    pub missing: Vec<String>,
}

impl ResolveOutcome {
    /// Number of mappings produced by `rule`
    pub fn count(&self, rule: Rule) -> usize {
        self.rules.values().filter(|r| **r == rule).count()
    }

    /// Ids that resolved to some icon
    pub fn resolved(&self) -> usize {
        self.mappings.len() + self.implicit
    }
}

/// Applies [`STRATEGIES`] against an icon catalog
pub struct Resolver {
    catalog: IconCatalog,
    settings: ResolverSettings,
}

impl Resolver {
    pub fn new(catalog: IconCatalog, settings: ResolverSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { catalog, settings })
    }

    /// Resolve one id, stopping at the first strategy that hits
    pub fn resolve(&self, id: &str) -> Resolution {
        for (rule, strategy) in STRATEGIES {
            if let Some(hit) = strategy(id, &self.catalog, &self.settings) {
                return if hit.explicit {
                    Resolution::Mapped {
                        rule,
                        icon: hit.icon,
                    }
                } else {
                    Resolution::Implicit
                };
            }
        }
        Resolution::Missing
    }

    /// Resolve every id, in sorted order
    pub fn resolve_all<I, S>(&self, ids: I) -> ResolveOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids: Vec<S> = ids.into_iter().collect();
        ids.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
        ids.dedup_by(|a, b| a.as_ref() == b.as_ref());

        let mut outcome = ResolveOutcome::default();
        for id in &ids {
            let id = id.as_ref();
            match self.resolve(id) {
                Resolution::Implicit => outcome.implicit += 1,
                Resolution::Mapped { rule, icon } => {
                    tracing::debug!("{} -> {} ({})", id, icon, rule);
                    outcome.mappings.insert(id.to_string(), icon);
                    outcome.rules.insert(id.to_string(), rule);
                }
                Resolution::Missing => outcome.missing.push(id.to_string()),
            }
        }
        outcome
    }
}
